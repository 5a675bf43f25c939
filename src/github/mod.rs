pub mod client;
pub mod error;

pub use client::RawContentClient;
pub use error::FetchFailure;
