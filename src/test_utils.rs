//! Shared test utilities and arbitrary generators for property-based testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use proptest::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::action::{ActionInputs, DEFAULT_MAX_PULL_REQUESTS, Reporter};
use crate::github::{FetchError, GraphQlQuery, PageFetcher};
use crate::types::{Commit, ExclusionSet};

// ─── Generators ───

pub fn arb_email() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("bot@example.com".to_string()),
        Just("Dev@Example.com".to_string()),
        "[a-z]{1,8}@[a-z]{1,6}\\.(com|org)",
    ]
}

pub fn arb_commit() -> impl Strategy<Value = Commit> {
    (
        "[a-z]{1,8}(\\([a-z]{1,6}\\))?: [a-z ]{1,30}",
        prop::option::of(arb_email()),
    )
        .prop_map(|(message, email)| Commit::new(message, email))
}

pub fn arb_exclusions() -> impl Strategy<Value = ExclusionSet> {
    prop::collection::vec(arb_email(), 0..4).prop_map(|emails| emails.into_iter().collect())
}

// ─── Scripted GraphQL responses ───

/// One recorded [`FakeFetcher`] request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCall {
    pub query: &'static str,
    pub variables: Value,
}

/// A [`PageFetcher`] that replays scripted `data` objects in order.
///
/// Running out of script is a transport error, so tests notice unexpected
/// extra requests.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    calls: Mutex<Vec<FetchCall>>,
}

impl FakeFetcher {
    pub fn new(responses: impl IntoIterator<Item = Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Appends a transport failure to the script.
    pub fn then_fail(self, message: &str) -> Self {
        self.responses.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests made for the named query.
    pub fn count(&self, query: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.query == query).count()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        query: &GraphQlQuery,
        variables: Value,
    ) -> Result<T, FetchError> {
        self.calls.lock().unwrap().push(FetchCall {
            query: query.name,
            variables,
        });
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(data)) => {
                serde_json::from_value(data).map_err(|e| FetchError::schema(query.name, e))
            }
            Some(Err(message)) => Err(FetchError::graphql(&[message])),
            None => Err(FetchError::graphql(&[format!("no scripted response for {}", query.name)])),
        }
    }
}

/// `data` for the pull-requests-by-ref query.
pub fn pull_requests_page(numbers: &[u64], has_more: bool) -> Value {
    let nodes: Vec<Value> = numbers.iter().map(|n| json!({ "number": n })).collect();
    json!({
        "repository": { "ref": { "associatedPullRequests": {
            "nodes": nodes,
            "pageInfo": { "endCursor": null, "hasNextPage": has_more }
        }}}
    })
}

/// `data` for one page of the pull-request-commits query.
pub fn commits_page(commits: &[Commit], end_cursor: Option<&str>, has_next_page: bool) -> Value {
    let nodes: Vec<Value> = commits
        .iter()
        .map(|c| {
            json!({ "commit": {
                "message": c.message,
                "committer": { "email": c.committer_email },
            }})
        })
        .collect();
    json!({
        "repository": { "pullRequest": { "commits": {
            "nodes": nodes,
            "pageInfo": { "endCursor": end_cursor, "hasNextPage": has_next_page }
        }}}
    })
}

// ─── Action fakes ───

/// Everything a [`RecordingReporter`] was told, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Notice(String),
    Warning(String),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.select(|r| match r {
            Report::Notice(m) => Some(m),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.select(|r| match r {
            Report::Warning(m) => Some(m),
            _ => None,
        })
    }

    pub fn failures(&self) -> Vec<String> {
        self.select(|r| match r {
            Report::Failure(m) => Some(m),
            _ => None,
        })
    }

    fn select(&self, pick: impl Fn(&Report) -> Option<&String>) -> Vec<String> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| pick(r).cloned())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn notice(&self, message: &str) {
        self.reports.lock().unwrap().push(Report::Notice(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.reports.lock().unwrap().push(Report::Warning(message.to_string()));
    }

    fn fail(&self, message: &str) {
        self.reports.lock().unwrap().push(Report::Failure(message.to_string()));
    }
}

/// Inputs with a dummy token and no exclusions.
pub fn inputs() -> ActionInputs {
    ActionInputs {
        token: "ghs_test".to_string(),
        exclusions: ExclusionSet::default(),
        config_file: None,
        max_pull_requests: DEFAULT_MAX_PULL_REQUESTS,
    }
}
