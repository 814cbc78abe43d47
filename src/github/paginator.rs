//! Cursor-driven pagination over a pull request's commits.

use serde_json::json;

use crate::types::{Commit, PageCursor, PrNumber, RepoId};

use super::error::FetchError;
use super::fetcher::PageFetcher;
use super::queries::{COMMITS_PAGE_SIZE, PULL_REQUEST_COMMITS, PullRequestCommitsResponse};

/// Lists every commit of a pull request, following cursors until the last page.
///
/// The loop keeps three pieces of state: the cursor to request after, the
/// accumulated commits, and the continuation flag from the previous page.
/// Pages are fetched strictly one after another because each request needs
/// the previous page's `endCursor`.
///
/// The result is the concatenation of every page's non-null nodes in page
/// order. Commits with no committer identity keep `committer_email: None`.
///
/// A page on which the repository or pull request is missing ends the loop.
/// An API that reports `hasNextPage` without advancing its cursor would loop
/// forever; that is a broken upstream contract and is not guarded against here.
pub async fn list_commits<F: PageFetcher>(
    fetcher: &F,
    repo: &RepoId,
    pr: PrNumber,
) -> Result<Vec<Commit>, FetchError> {
    let mut commits = Vec::new();
    let mut cursor = PageCursor::default();
    let mut page = 0u32;

    loop {
        let variables = json!({
            "owner": repo.owner,
            "repo": repo.repo,
            "pullRequestNumber": pr.0,
            "lastEndCursor": cursor.end_cursor,
        });

        let response: PullRequestCommitsResponse =
            fetcher.fetch(&PULL_REQUEST_COMMITS, variables).await?;
        page += 1;

        let Some(connection) = response
            .repository
            .and_then(|r| r.pull_request)
            .map(|p| p.commits)
        else {
            tracing::debug!(%pr, page, "Pull request not visible to the API; stopping");
            break;
        };

        let before = commits.len();
        commits.extend(
            connection
                .nodes
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .map(|node| Commit {
                    message: node.commit.message,
                    committer_email: node.commit.committer.and_then(|c| c.email),
                }),
        );

        tracing::debug!(
            %pr,
            page,
            page_size = COMMITS_PAGE_SIZE,
            received = commits.len() - before,
            has_next_page = connection.page_info.has_next_page,
            "Fetched commit page"
        );

        cursor = PageCursor {
            end_cursor: connection.page_info.end_cursor,
            has_next_page: connection.page_info.has_next_page,
        };

        if !cursor.has_next_page {
            break;
        }
    }

    tracing::info!(%pr, commits = commits.len(), pages = page, "Listed pull request commits");
    Ok(commits)
}
