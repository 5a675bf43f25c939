//! Services composing the upstream clients into the two tool operations

pub mod fetch;
pub mod repository;
pub mod search;

pub use fetch::FileRetriever;
pub use repository::RepositoryResolver;
pub use search::SearchService;
