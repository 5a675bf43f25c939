//! Searchfox search payload and its normalization
//!
//! A Searchfox JSON response mixes two kinds of top-level keys. Keys wrapped in
//! `*` (`*title*`, `*timedout*`, `*limits*`) describe the search itself. Every
//! other key is a section of hits, and a section comes in one of two shapes:
//!
//! ```json
//! { "Textual Occurrences": [ { "path": "...", "lines": [ ... ] } ] }
//! { "normal": { "Definitions (nsIFoo)": [ { "path": "...", "lines": [ ... ] } ] } }
//! ```
//!
//! The shape is checked per key at runtime, so new section kinds introduced
//! upstream land in one of the two branches without code changes.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::{NormalizedResult, NormalizedSearch, ResultLimit, SearchDiagnostics};

/// Raw Searchfox response, keys in upstream order
pub type SearchfoxResponse = Map<String, Value>;

const METADATA_MARKER: char = '*';
const TIMED_OUT_KEY: &str = "*timedout*";
const TITLE_KEY: &str = "*title*";
const LIMITS_KEY: &str = "*limits*";

pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_MARKER)
}

/// Shape of a non-metadata section value
#[derive(Debug, Clone, Copy)]
pub enum Section<'a> {
    /// Files listed directly under the section key
    Files(&'a [Value]),
    /// Category label to files
    Categories(&'a Map<String, Value>),
}

impl<'a> Section<'a> {
    /// Returns None for values that are neither a list nor a mapping
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(files) => Some(Self::Files(files)),
            Value::Object(categories) => Some(Self::Categories(categories)),
            _ => None,
        }
    }
}

/// A single matching line inside a file hit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineHit {
    pub lno: u64,
    /// Null or missing text yields an empty snippet
    #[serde(default)]
    pub line: Option<String>,
    pub bounds: Option<Vec<u64>>,
    pub context: Option<String>,
    pub contextsym: Option<String>,
    #[serde(rename = "peekRange")]
    pub peek_range: Option<String>,
    pub upsearch: Option<String>,
}

/// Borrowed view of one file entry: its path and raw line list
#[derive(Debug, Clone, Copy)]
pub struct FileHit<'a> {
    pub path: &'a str,
    pub lines: &'a [Value],
}

impl<'a> FileHit<'a> {
    /// Files without a `lines` array contribute nothing and yield None
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let lines = value.get("lines")?.as_array()?;
        let path = value.get("path").and_then(Value::as_str).unwrap_or_default();
        Some(Self { path, lines })
    }
}

/// How the `context` of a result is decided for the section being walked
#[derive(Debug, Clone, Copy)]
enum ContextLabel<'a> {
    Section(&'a str),
    Category { section: &'a str, category: &'a str },
}

impl ContextLabel<'_> {
    fn resolve(&self, line: &LineHit) -> String {
        match self {
            Self::Section(section) => section.to_string(),
            Self::Category { section, category } => match line.context.as_deref() {
                Some(context) if !context.is_empty() => context.to_string(),
                _ => format!("{}: {}", section, category),
            },
        }
    }
}

impl SearchDiagnostics {
    /// Reads the metadata keys; wrong-typed values count as absent
    pub fn from_payload(payload: &SearchfoxResponse) -> Self {
        Self {
            timed_out: payload.get(TIMED_OUT_KEY).and_then(Value::as_bool),
            title: payload
                .get(TITLE_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            limits_applied: payload.get(LIMITS_KEY).and_then(Value::as_array).map(|limits| {
                limits
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
        }
    }
}

/// Flattens Searchfox payloads into a bounded list of results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer {
    limit: ResultLimit,
}

impl ResponseNormalizer {
    pub fn new(limit: ResultLimit) -> Self {
        Self { limit }
    }

    /// Walks sections in payload order and stops materializing results as
    /// soon as the limit is reached.
    pub fn normalize(&self, payload: &SearchfoxResponse) -> NormalizedSearch {
        let mut collector = ResultCollector::new(self.limit);

        for (section_key, value) in payload {
            if collector.is_full() {
                break;
            }
            if is_metadata_key(section_key) {
                continue;
            }

            match Section::classify(value) {
                Some(Section::Files(files)) => {
                    collector.collect_files(files, ContextLabel::Section(section_key));
                }
                Some(Section::Categories(categories)) => {
                    for (category, files) in categories {
                        if collector.is_full() {
                            break;
                        }
                        let Some(files) = files.as_array() else {
                            tracing::debug!(
                                "Ignoring non-list category '{}' in section '{}'",
                                category,
                                section_key
                            );
                            continue;
                        };
                        collector.collect_files(
                            files,
                            ContextLabel::Category {
                                section: section_key,
                                category,
                            },
                        );
                    }
                }
                None => {
                    tracing::debug!("Ignoring section '{}' with unexpected shape", section_key);
                }
            }
        }

        NormalizedSearch {
            results: collector.results,
            diagnostics: SearchDiagnostics::from_payload(payload),
        }
    }
}

struct ResultCollector {
    limit: ResultLimit,
    results: Vec<NormalizedResult>,
}

impl ResultCollector {
    fn new(limit: ResultLimit) -> Self {
        let capacity = match limit {
            ResultLimit::AtMost(max) => max.min(1024),
            ResultLimit::Unbounded => 0,
        };
        Self {
            limit,
            results: Vec::with_capacity(capacity),
        }
    }

    fn is_full(&self) -> bool {
        self.limit.is_reached(self.results.len())
    }

    fn collect_files(&mut self, files: &[Value], label: ContextLabel<'_>) {
        for file in files {
            if self.is_full() {
                return;
            }
            let Some(file) = FileHit::from_value(file) else {
                continue;
            };

            for line in file.lines {
                if self.is_full() {
                    return;
                }
                match LineHit::deserialize(line) {
                    Ok(line) => self.push(file.path, line, label),
                    Err(e) => {
                        tracing::debug!("Skipping malformed line hit in {}: {}", file.path, e);
                    }
                }
            }
        }
    }

    fn push(&mut self, path: &str, line: LineHit, label: ContextLabel<'_>) {
        let context = label.resolve(&line);
        let column = line
            .bounds
            .as_ref()
            .and_then(|bounds| bounds.first().copied())
            .unwrap_or(0);

        self.results.push(NormalizedResult {
            path: path.to_string(),
            line: line.lno,
            column,
            snippet: line.line.unwrap_or_default(),
            context,
            contextsym: line.contextsym,
            peek_range: line.peek_range,
            upsearch: line.upsearch,
            bounds: line.bounds,
        });
    }
}
