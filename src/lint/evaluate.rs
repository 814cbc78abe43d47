//! Exclusion filtering and concurrent linting of one pull request's commits.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};

use crate::types::{Commit, ExclusionSet};

use super::RuleEngine;
use super::result::LintResult;
use super::rules::RuleSet;

#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("no rules. please configure commitlint.")]
    EmptyRuleSet,

    #[error("lint task failed: {0}")]
    LintTask(#[from] JoinError),
}

/// Keeps the commits whose committer is not excluded, in their original order.
///
/// Commits without a committer email are always kept.
pub fn filter_commits(commits: Vec<Commit>, exclusions: &ExclusionSet) -> Vec<Commit> {
    commits.into_iter().filter(|c| exclusions.retains(c)).collect()
}

/// Filters `commits` and lints the survivors.
///
/// Each message is linted on the blocking pool; results come back in the
/// order of the retained commits regardless of completion order.
pub async fn evaluate<E: RuleEngine + 'static>(
    commits: Vec<Commit>,
    exclusions: &ExclusionSet,
    engine: Arc<E>,
    rules: Arc<RuleSet>,
) -> Result<Vec<LintResult>, EvaluateError> {
    if rules.is_empty() {
        return Err(EvaluateError::EmptyRuleSet);
    }

    let total = commits.len();
    let retained = filter_commits(commits, exclusions);
    tracing::debug!(
        total,
        retained = retained.len(),
        excluded = total - retained.len(),
        "Filtered commits"
    );

    let mut tasks = JoinSet::new();
    for (index, commit) in retained.into_iter().enumerate() {
        let engine = Arc::clone(&engine);
        let rules = Arc::clone(&rules);
        tasks.spawn_blocking(move || (index, engine.lint(&commit.message, &rules)));
    }

    let mut indexed = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        indexed.push(joined?);
    }
    indexed.sort_by_key(|(index, _)| *index);

    Ok(indexed.into_iter().map(|(_, result)| result).collect())
}
