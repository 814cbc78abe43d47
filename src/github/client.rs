//! Octocrab client wrapper used as the production [`PageFetcher`].
//!
//! [`PageFetcher`]: super::PageFetcher

use octocrab::Octocrab;

/// A GitHub API client authenticated with the action's token.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,
}

impl OctocrabClient {
    /// Creates a new client around a configured octocrab instance.
    ///
    /// Use this when you need custom authentication (e.g., GitHub App
    /// installation tokens) or a non-default API endpoint.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Creates a client from a GitHub token.
    pub fn from_token(token: impl Into<String>) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient").finish_non_exhaustive()
    }
}
