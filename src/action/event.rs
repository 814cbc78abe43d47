//! The workflow run's triggering event.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid repository {0:?}, expected owner/repo")]
    InvalidRepository(String),

    #[error("failed to read event payload {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed event payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// The parts of a `push` payload the linter needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
    /// Fully qualified ref, e.g. `refs/heads/feature`.
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl PushEvent {
    pub fn from_value(payload: &Value) -> Result<Self, EventError> {
        Ok(Self::deserialize(payload)?)
    }
}

/// Reads the event payload written by the runner.
pub fn read_payload(path: &Path) -> Result<Value, EventError> {
    let bytes = std::fs::read(path).map_err(|source| EventError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
