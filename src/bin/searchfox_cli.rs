use anyhow::{Result, anyhow};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use searchfox_mcp::config::ServerConfig;
use searchfox_mcp::tools::SearchfoxTools;
use searchfox_mcp::tools::functions;
use searchfox_mcp::types::{
    DEFAULT_REPOSITORY, DEFAULT_SEARCH_LIMIT, FileRequest, LogicalRepository, ResultLimit,
    SearchQuery,
};

#[derive(Parser)]
#[command(name = "searchfox-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Searchfox CLI - Search Mozilla source code and read files from the terminal"
)]
#[command(
    long_about = "Searchfox CLI runs the same operations as the Searchfox MCP server from a terminal. Results are printed as the JSON documents the MCP tools return, which makes it useful for scripting and for checking what an MCP client will see."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Searchfox base URL (can also be set via SEARCHFOX_MCP_BASE_URL)
    #[arg(long, global = true)]
    searchfox_url: Option<String>,
    /// Raw file content base URL (can also be set via SEARCHFOX_MCP_RAW_CONTENT_URL)
    #[arg(long, global = true)]
    raw_content_url: Option<String>,
    /// Request timeout in seconds for upstream calls
    #[arg(long, global = true)]
    request_timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a repository with exact literal matching (or a regular expression with --regexp)
    Search {
        /// Search text, matched literally unless --regexp is given
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        query: String,
        /// Repository to search in (e.g., mozilla-central, comm-central)
        #[arg(short, long, default_value = DEFAULT_REPOSITORY)]
        repo: String,
        /// Path filter, substring glob with optional ^ and $ anchors (e.g., "^dom/")
        #[arg(short, long)]
        path: Option<String>,
        /// Case sensitive search
        #[arg(long)]
        case: bool,
        /// Treat the query as a regular expression
        #[arg(long)]
        regexp: bool,
        /// Maximum number of results, 0 for no limit
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Print the contents of a file from the GitHub mirror of a repository
    GetFile {
        /// File path within the repository
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        path: String,
        /// Repository name (e.g., mozilla-central, mozilla-esr128)
        #[arg(short, long, default_value = DEFAULT_REPOSITORY)]
        repo: String,
        /// Print only the file content instead of the JSON result
        #[arg(long)]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::resolve(cli.searchfox_url, cli.raw_content_url, cli.request_timeout)?;
    let tools = SearchfoxTools::new(config)?;

    match cli.command {
        Commands::Search {
            query,
            repo,
            path,
            case,
            regexp,
            limit,
        } => {
            let query = SearchQuery {
                query,
                repo: LogicalRepository::new(repo),
                path_filter: path,
                case_sensitive: case,
                use_regexp: regexp,
                limit: ResultLimit::from(Some(limit)),
            };

            let output = functions::search::search_code(tools.search_service(), query)
                .await
                .map_err(|e| anyhow!(String::from(e)))?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::GetFile { path, repo, raw } => {
            let request = FileRequest {
                repo: LogicalRepository::new(repo),
                path,
            };

            let result = functions::file::get_file(tools.file_retriever(), request)
                .await
                .map_err(|e| anyhow!(String::from(e)))?;

            if raw {
                if let Some(note) = &result.note {
                    eprintln!("{}", note);
                }
                print!("{}", result.content);
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
    }

    Ok(())
}
