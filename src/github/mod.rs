//! GitHub GraphQL access: page fetching, PR resolution, and commit pagination.
//!
//! Every operation here is read-only and fails fast: the first transport or
//! decode error is returned to the caller and ends the run.

mod client;
mod error;
mod fetcher;
mod paginator;
pub mod queries;
mod resolver;

pub use client::OctocrabClient;
pub use error::FetchError;
pub use fetcher::{GraphQlQuery, PageFetcher};
pub use paginator::list_commits;
pub use resolver::resolve_pull_requests;
