pub mod client;
pub mod payload;

pub use client::SearchfoxClient;
pub use payload::{ResponseNormalizer, SearchfoxResponse};
