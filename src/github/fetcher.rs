//! Single-page GraphQL query execution.
//!
//! [`PageFetcher`] is the seam between the pipeline and the network: one call
//! runs one query and decodes one typed response. The production
//! implementation goes through octocrab; tests script responses instead.

use std::future::Future;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::client::OctocrabClient;
use super::error::FetchError;

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQlQuery {
    /// The operation name, used in logs and error messages.
    pub name: &'static str,
    /// The query text sent to the API.
    pub text: &'static str,
}

/// Executes GraphQL queries one page at a time.
///
/// Implementations must not retry: the first failure is returned as-is and
/// aborts the invocation.
///
/// # Example (scripted fake for testing)
///
/// ```ignore
/// struct ScriptedFetcher {
///     pages: Mutex<VecDeque<serde_json::Value>>,
/// }
///
/// impl PageFetcher for ScriptedFetcher {
///     async fn fetch<T: DeserializeOwned + Send>(
///         &self,
///         query: &GraphQlQuery,
///         _variables: serde_json::Value,
///     ) -> Result<T, FetchError> {
///         let page = self.pages.lock().unwrap().pop_front().unwrap();
///         serde_json::from_value(page).map_err(|e| FetchError::schema(query.name, e))
///     }
/// }
/// ```
pub trait PageFetcher {
    /// Runs `query` with `variables` and decodes the `data` object into `T`.
    fn fetch<T: DeserializeOwned + Send>(
        &self,
        query: &GraphQlQuery,
        variables: serde_json::Value,
    ) -> impl Future<Output = Result<T, FetchError>> + Send;
}

/// The outer GraphQL response body.
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

impl PageFetcher for OctocrabClient {
    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        query: &GraphQlQuery,
        variables: serde_json::Value,
    ) -> Result<T, FetchError> {
        tracing::debug!(query = query.name, %variables, "Running GraphQL query");

        let body: serde_json::Value = self
            .inner()
            .graphql(&serde_json::json!({
                "query": query.text,
                "variables": variables,
            }))
            .await
            .map_err(FetchError::from_octocrab)?;

        decode_response(query, body)
    }
}

/// Splits a raw GraphQL body into its `data` payload, surfacing `errors` first.
fn decode_response<T: DeserializeOwned>(
    query: &GraphQlQuery,
    body: serde_json::Value,
) -> Result<T, FetchError> {
    let envelope: GraphQlEnvelope =
        serde_json::from_value(body).map_err(|e| FetchError::schema(query.name, e))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(FetchError::graphql(&messages));
    }

    let data = envelope
        .data
        .filter(|d| !d.is_null())
        .ok_or(FetchError::MissingData { query: query.name })?;

    serde_json::from_value(data).map_err(|e| FetchError::schema(query.name, e))
}
