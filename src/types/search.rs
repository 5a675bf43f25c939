//! Search query and result types
//!
//! `SearchQuery` is what the caller asked for after defaulting, `NormalizedResult`
//! is one flattened hit, and `SearchCodeOutput` is the JSON document handed back
//! to the MCP client.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::LogicalRepository;

/// Number of results returned when the caller does not set a limit
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Upper bound on the number of normalized results materialized per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultLimit {
    /// Mirror the upstream payload completely
    #[default]
    Unbounded,
    AtMost(usize),
}

impl ResultLimit {
    /// Interprets a caller-supplied numeric limit.
    ///
    /// Zero, negative and non-finite values all mean "no cap", the same as an
    /// absent limit. Fractional values round up.
    pub fn from_number(limit: f64) -> Self {
        if limit.is_finite() && limit > 0.0 {
            Self::AtMost(limit.ceil() as usize)
        } else {
            Self::Unbounded
        }
    }

    pub fn is_reached(&self, count: usize) -> bool {
        match self {
            Self::Unbounded => false,
            Self::AtMost(max) => count >= *max,
        }
    }
}

impl From<Option<usize>> for ResultLimit {
    fn from(limit: Option<usize>) -> Self {
        match limit {
            Some(0) | None => Self::Unbounded,
            Some(max) => Self::AtMost(max),
        }
    }
}

/// A validated code search request. Lives for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub repo: LogicalRepository,
    pub path_filter: Option<String>,
    pub case_sensitive: bool,
    pub use_regexp: bool,
    pub limit: ResultLimit,
}

impl SearchQuery {
    pub fn new<T: Into<String>>(query: T) -> Self {
        Self {
            query: query.into(),
            repo: LogicalRepository::default(),
            path_filter: None,
            case_sensitive: false,
            use_regexp: false,
            limit: ResultLimit::AtMost(DEFAULT_SEARCH_LIMIT),
        }
    }
}

/// One line hit flattened out of the Searchfox payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedResult {
    pub path: String,
    pub line: u64,
    pub column: u64,
    pub snippet: String,
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contextsym: Option<String>,
    #[serde(rename = "peekRange", skip_serializing_if = "Option::is_none")]
    pub peek_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsearch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Vec<u64>>,
}

/// Diagnostics Searchfox reports about the search itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDiagnostics {
    pub timed_out: Option<bool>,
    pub title: Option<String>,
    pub limits_applied: Option<Vec<String>>,
}

/// Normalized results plus diagnostics for one search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSearch {
    pub results: Vec<NormalizedResult>,
    pub diagnostics: SearchDiagnostics,
}

/// JSON document returned by the `search_code` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCodeOutput {
    pub query: String,
    pub repo: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timedout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_available: Option<String>,
    pub results: Vec<NormalizedResult>,
}

impl SearchCodeOutput {
    pub fn new(query: &SearchQuery, search: NormalizedSearch) -> Self {
        let NormalizedSearch {
            results,
            diagnostics,
        } = search;

        let total_available = diagnostics
            .timed_out
            .filter(|timed_out| *timed_out)
            .map(|_| "Search timed out - more results may be available".to_string());

        Self {
            query: query.query.clone(),
            repo: query.repo.to_string(),
            count: results.len(),
            title: diagnostics.title,
            timedout: diagnostics.timed_out,
            limits: diagnostics.limits_applied,
            total_available,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_limit_from_number() {
        assert_eq!(ResultLimit::from_number(10.0), ResultLimit::AtMost(10));
        assert_eq!(ResultLimit::from_number(2.5), ResultLimit::AtMost(3));
        assert_eq!(ResultLimit::from_number(0.0), ResultLimit::Unbounded);
        assert_eq!(ResultLimit::from_number(-4.0), ResultLimit::Unbounded);
        assert_eq!(ResultLimit::from_number(f64::NAN), ResultLimit::Unbounded);
    }

    #[test]
    fn test_result_limit_is_reached() {
        assert!(!ResultLimit::Unbounded.is_reached(usize::MAX));
        assert!(!ResultLimit::AtMost(2).is_reached(1));
        assert!(ResultLimit::AtMost(2).is_reached(2));
        assert_eq!(ResultLimit::from(Some(0)), ResultLimit::Unbounded);
    }

    #[test]
    fn test_output_reports_timeout() {
        let query = SearchQuery::new("nsIFoo");
        let search = NormalizedSearch {
            results: vec![],
            diagnostics: SearchDiagnostics {
                timed_out: Some(true),
                title: Some("nsIFoo - mozsearch".to_string()),
                limits_applied: None,
            },
        };

        let output = SearchCodeOutput::new(&query, search);
        assert_eq!(output.repo, "mozilla-central");
        assert_eq!(output.count, 0);
        assert_eq!(output.timedout, Some(true));
        assert!(output.total_available.is_some());

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("limits").is_none());
        assert_eq!(json["title"], "nsIFoo - mozsearch");
    }

    #[test]
    fn test_output_omits_total_when_not_timed_out() {
        let query = SearchQuery::new("nsIFoo");
        let search = NormalizedSearch {
            results: vec![],
            diagnostics: SearchDiagnostics {
                timed_out: Some(false),
                ..Default::default()
            },
        };

        let output = SearchCodeOutput::new(&query, search);
        assert_eq!(output.timedout, Some(false));
        assert!(output.total_available.is_none());
    }
}
