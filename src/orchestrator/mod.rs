//! One linting run over the pull requests of a pushed ref.
//!
//! The run is strictly sequential over pull requests and streams feedback
//! through the context's [`Reporter`] as it goes:
//!
//! 1. Check the event is a `push` and read its ref.
//! 2. Resolve the ref to at most `max-pull-requests` pull requests.
//! 3. Load the rule set once.
//! 4. For each pull request, list its commits, lint the ones not made by an
//!    excluded committer, and report every result.
//!
//! Lint failures are accumulated; any other failure ends the run with a
//! [`RunError`].

use std::sync::Arc;

use thiserror::Error;

use crate::action::{ActionContext, EventError, PushEvent, Reporter};
use crate::github::{FetchError, PageFetcher, list_commits, resolve_pull_requests};
use crate::lint::{EvaluateError, RuleConfigError, RuleEngine, evaluate};


/// How a run ended, when it did not end in an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The ref has no pull requests.
    Skipped,
    Passed,
    /// At least one linted commit had an error.
    Failed,
}

impl Outcome {
    /// The process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Skipped | Outcome::Passed => 0,
            Outcome::Failed => 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("action must be triggered by push event")]
    NotPushEvent { event_name: String },

    #[error("invalid push event payload: {0}")]
    InvalidPayload(#[source] EventError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    RuleConfig(#[from] RuleConfigError),

    #[error("no rules. please configure commitlint.")]
    EmptyRuleSet,

    #[error(transparent)]
    Evaluate(#[from] EvaluateError),
}

/// Lints every commit of the pull requests associated with the pushed ref.
pub async fn run<R, F, E>(
    ctx: &ActionContext<R>,
    fetcher: &F,
    engine: Arc<E>,
) -> Result<Outcome, RunError>
where
    R: Reporter,
    F: PageFetcher,
    E: RuleEngine + 'static,
{
    if ctx.event_name != "push" {
        return Err(RunError::NotPushEvent {
            event_name: ctx.event_name.clone(),
        });
    }
    let event = PushEvent::from_value(&ctx.payload).map_err(RunError::InvalidPayload)?;
    let git_ref = event.git_ref.as_str();
    let reporter = &ctx.reporter;

    reporter.notice(&format!("linting against {git_ref} of {}", ctx.repo));

    let pull_requests =
        resolve_pull_requests(fetcher, &ctx.repo, git_ref, ctx.inputs.max_pull_requests).await?;
    if pull_requests.is_empty() {
        reporter.notice("could not detect pull request number. skipping.");
        return Ok(Outcome::Skipped);
    }
    if pull_requests.has_more {
        tracing::warn!(
            git_ref,
            limit = ctx.inputs.max_pull_requests,
            "Ref has more pull requests than the limit"
        );
        reporter.warning(&format!("{git_ref} is associated with too many pull requests."));
    }

    reporter.notice("loading configuration");
    let rules = engine.load()?;
    if rules.is_empty() {
        return Err(RunError::EmptyRuleSet);
    }
    tracing::debug!(rules = rules.len(), "Loaded rule set");
    let rules = Arc::new(rules);

    let mut failed = false;
    for pr in pull_requests.numbers {
        let commits = list_commits(fetcher, &ctx.repo, pr).await?;
        if commits.is_empty() {
            // Later pull requests are not processed; what ran so far decides the outcome.
            tracing::info!(%pr, "Pull request has no commits; stopping");
            reporter.notice("no commits found.");
            break;
        }

        let results = evaluate(
            commits,
            &ctx.inputs.exclusions,
            Arc::clone(&engine),
            Arc::clone(&rules),
        )
        .await?;

        for result in &results {
            reporter.notice(&engine.format(result));
        }

        let errored = results.iter().filter(|r| !r.is_valid()).count();
        tracing::info!(%pr, linted = results.len(), errored, "Linted pull request");
        if errored > 0 {
            reporter.fail(&format!("commitlint failed for pull request {pr}."));
            failed = true;
        }
    }

    Ok(if failed { Outcome::Failed } else { Outcome::Passed })
}
