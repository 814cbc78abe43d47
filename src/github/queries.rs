//! GraphQL documents and their response shapes.
//!
//! The response structs mirror GitHub's schema closely and use `Option`
//! wherever the schema allows `null`, so an absent repository, ref, or
//! connection node never turns into a decode failure.

use serde::Deserialize;

use super::fetcher::GraphQlQuery;

/// Number of commits requested per page.
pub const COMMITS_PAGE_SIZE: u32 = 100;

/// Pull requests associated with a qualified ref, capped at `$limit`.
pub const PULL_REQUESTS_BY_REF: GraphQlQuery = GraphQlQuery {
    name: "pullRequestsByRef",
    text: r#"
query pullRequestsByRef($owner: String!, $repo: String!, $ref: String!, $limit: Int!) {
    repository(owner: $owner, name: $repo) {
        ref(qualifiedName: $ref) {
            associatedPullRequests(first: $limit) {
                nodes {
                    number
                }
                pageInfo {
                    endCursor
                    hasNextPage
                }
            }
        }
    }
}
"#,
};

/// One page of a pull request's commits, starting after `$lastEndCursor`.
pub const PULL_REQUEST_COMMITS: GraphQlQuery = GraphQlQuery {
    name: "pullRequestCommits",
    text: r#"
query pullRequestCommits($owner: String!, $repo: String!, $pullRequestNumber: Int!, $lastEndCursor: String) {
    repository(owner: $owner, name: $repo) {
        pullRequest(number: $pullRequestNumber) {
            commits(first: 100, after: $lastEndCursor) {
                nodes {
                    commit {
                        message
                        committer {
                            email
                        }
                    }
                }
                pageInfo {
                    endCursor
                    hasNextPage
                }
            }
        }
    }
}
"#,
};

/// Shared `pageInfo` selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

// ─── pullRequestsByRef ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PullRequestsByRefResponse {
    pub repository: Option<RefRepository>,
}

#[derive(Debug, Deserialize)]
pub struct RefRepository {
    #[serde(rename = "ref")]
    pub git_ref: Option<GitRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRef {
    pub associated_pull_requests: PullRequestConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestConnection {
    #[serde(default)]
    pub nodes: Option<Vec<Option<PullRequestNode>>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestNode {
    pub number: u64,
}

// ─── pullRequestCommits ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PullRequestCommitsResponse {
    pub repository: Option<CommitsRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsRepository {
    pub pull_request: Option<CommitsPullRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CommitsPullRequest {
    pub commits: CommitConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitConnection {
    #[serde(default)]
    pub nodes: Option<Vec<Option<PullRequestCommitNode>>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestCommitNode {
    pub commit: CommitNode,
}

#[derive(Debug, Deserialize)]
pub struct CommitNode {
    pub message: String,
    pub committer: Option<GitActor>,
}

#[derive(Debug, Deserialize)]
pub struct GitActor {
    pub email: Option<String>,
}
