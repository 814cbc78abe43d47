//! Everything a run needs from the workflow environment.

use std::path::PathBuf;

use serde_json::Value;

use crate::types::RepoId;

use super::event::{EventError, read_payload};
use super::inputs::ActionInputs;
use super::reporter::Reporter;

/// The triggering event, repository, inputs, and feedback channel of one run.
#[derive(Debug)]
pub struct ActionContext<R> {
    /// `GITHUB_EVENT_NAME`, e.g. `push`.
    pub event_name: String,
    pub repo: RepoId,
    /// The raw event payload. Its shape depends on `event_name`.
    pub payload: Value,
    pub inputs: ActionInputs,
    pub reporter: R,
}

impl<R: Reporter> ActionContext<R> {
    pub fn new(
        event_name: impl Into<String>,
        repo: RepoId,
        payload: Value,
        inputs: ActionInputs,
        reporter: R,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            repo,
            payload,
            inputs,
            reporter,
        }
    }

    /// Builds the context from the runner's environment variables.
    pub fn from_env(inputs: ActionInputs, reporter: R) -> Result<Self, EventError> {
        Self::from_lookup(|name| std::env::var(name).ok(), inputs, reporter)
    }

    /// Builds the context with `lookup` standing in for the environment.
    ///
    /// A missing `GITHUB_EVENT_PATH` leaves the payload null; whether that
    /// matters depends on the event.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        inputs: ActionInputs,
        reporter: R,
    ) -> Result<Self, EventError> {
        let event_name =
            lookup("GITHUB_EVENT_NAME").ok_or(EventError::MissingVar("GITHUB_EVENT_NAME"))?;

        let full_name =
            lookup("GITHUB_REPOSITORY").ok_or(EventError::MissingVar("GITHUB_REPOSITORY"))?;
        let repo = RepoId::parse(&full_name).ok_or(EventError::InvalidRepository(full_name))?;

        let payload = match lookup("GITHUB_EVENT_PATH").filter(|p| !p.is_empty()) {
            Some(path) => read_payload(&PathBuf::from(path))?,
            None => Value::Null,
        };

        tracing::debug!(event = %event_name, %repo, "Loaded workflow context");
        Ok(Self::new(event_name, repo, payload, inputs, reporter))
    }
}
