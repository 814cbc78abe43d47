//! Resolves a pushed ref to the pull requests associated with it.

use serde_json::json;

use crate::types::{PrNumber, PullRequestSet, RepoId};

use super::error::FetchError;
use super::fetcher::PageFetcher;
use super::queries::{PULL_REQUESTS_BY_REF, PullRequestsByRefResponse};

/// Fetches up to `limit` pull requests associated with `git_ref`.
///
/// Runs a single query. PR numbers keep the API's order and null nodes are
/// skipped. `has_more` comes from the connection's `hasNextPage` flag; it is
/// also set if the API returns more than `limit` nodes, the extras being
/// dropped.
///
/// A ref with no associated pull requests (or a repository/ref the API
/// cannot see) yields an empty set, not an error: direct pushes to branches
/// without a PR are a normal case.
pub async fn resolve_pull_requests<F: PageFetcher>(
    fetcher: &F,
    repo: &RepoId,
    git_ref: &str,
    limit: u32,
) -> Result<PullRequestSet, FetchError> {
    let variables = json!({
        "owner": repo.owner,
        "repo": repo.repo,
        "ref": git_ref,
        "limit": limit,
    });

    let response: PullRequestsByRefResponse =
        fetcher.fetch(&PULL_REQUESTS_BY_REF, variables).await?;

    let Some(connection) = response
        .repository
        .and_then(|r| r.git_ref)
        .map(|r| r.associated_pull_requests)
    else {
        tracing::debug!(%repo, git_ref, "Ref not visible to the API; no pull requests");
        return Ok(PullRequestSet::default());
    };

    let mut numbers: Vec<PrNumber> = connection
        .nodes
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|node| PrNumber(node.number))
        .collect();

    // Never hand back more than was asked for, whatever the API returned.
    let overflow = numbers.len() > limit as usize;
    numbers.truncate(limit as usize);
    let has_more = connection.page_info.has_next_page || overflow;

    tracing::debug!(
        %repo,
        git_ref,
        count = numbers.len(),
        has_more,
        "Resolved associated pull requests"
    );

    Ok(PullRequestSet { numbers, has_more })
}
