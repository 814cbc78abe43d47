//! GitHub API error types.
//!
//! Every query failure aborts the run; there is no retry layer. The variants
//! only distinguish *where* a failure happened so the final report can say
//! whether GitHub was unreachable or answered with something unexpected:
//!
//! - **Transport** errors cover the HTTP call itself and GraphQL `errors`
//!   arrays returned alongside a 200 response.
//! - **Schema** errors mean a response arrived but could not be mapped onto the
//!   shape the query expects.

use thiserror::Error;

/// An error returned by a single page fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed or GitHub rejected the query.
    #[error("GitHub API request failed: {message}")]
    Transport {
        /// A human-readable description of the error.
        message: String,
        /// The underlying octocrab error, if the failure came from the HTTP layer.
        #[source]
        source: Option<octocrab::Error>,
    },

    /// The response did not have the expected shape.
    #[error("unexpected GitHub API response for {query}: {source}")]
    Schema {
        /// The GraphQL operation name whose response failed to decode.
        query: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The response carried neither `data` nor `errors`.
    #[error("GitHub API response for {query} contained no data")]
    MissingData { query: &'static str },
}

impl FetchError {
    /// Wraps an octocrab error as a transport failure.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Builds a transport failure from the `errors` array of a GraphQL response.
    pub fn graphql(messages: &[String]) -> Self {
        Self::Transport {
            message: messages.join("; "),
            source: None,
        }
    }

    pub fn schema(query: &'static str, source: serde_json::Error) -> Self {
        Self::Schema { query, source }
    }

    /// Returns true if the failure was a shape mismatch rather than a transport problem.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. } | Self::MissingData { .. })
    }
}
