//! Action inputs.
//!
//! GitHub Actions passes `with:` inputs as `INPUT_<NAME>` environment
//! variables. Values are trimmed and an empty value counts as unset.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ExclusionSet;

/// Pull requests resolved per ref unless `max-pull-requests` says otherwise.
pub const DEFAULT_MAX_PULL_REQUESTS: u32 = 5;

/// The most associated pull requests one GraphQL connection page can return.
pub const MAX_PULL_REQUESTS_LIMIT: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Input required and not supplied: {0}")]
    Missing(&'static str),

    #[error("Invalid value for input {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Everything the action reads from its `with:` block.
#[derive(Clone)]
pub struct ActionInputs {
    pub token: String,
    pub exclusions: ExclusionSet,
    /// Explicit rule config; when unset the working directory is searched.
    pub config_file: Option<PathBuf>,
    pub max_pull_requests: u32,
}

impl std::fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInputs")
            .field("token", &"<redacted>")
            .field("exclusions", &self.exclusions.len())
            .field("config_file", &self.config_file)
            .field("max_pull_requests", &self.max_pull_requests)
            .finish()
    }
}

impl ActionInputs {
    /// Reads inputs from the process environment.
    pub fn from_env() -> Result<Self, InputError> {
        Self::from_lookup(|name| std::env::var(input_var(name)).ok())
    }

    /// Reads inputs through `lookup`, which maps an input name such as
    /// `exclude-committers` to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InputError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get("token").ok_or(InputError::Missing("token"))?;

        // `exclude-commiters` is the name older workflows were written against.
        let exclusions = get("exclude-committers")
            .or_else(|| get("exclude-commiters"))
            .map(|v| ExclusionSet::from_lines(&v))
            .unwrap_or_default();

        let config_file = get("config-file").map(PathBuf::from);

        let max_pull_requests = match get("max-pull-requests") {
            None => DEFAULT_MAX_PULL_REQUESTS,
            Some(value) => match value.parse::<u32>() {
                Ok(n) if (1..=MAX_PULL_REQUESTS_LIMIT).contains(&n) => n,
                Ok(_) => {
                    return Err(InputError::Invalid {
                        name: "max-pull-requests",
                        value,
                        reason: "must be between 1 and 100",
                    });
                }
                Err(_) => {
                    return Err(InputError::Invalid {
                        name: "max-pull-requests",
                        value,
                        reason: "not a number",
                    });
                }
            },
        };

        Ok(Self {
            token,
            exclusions,
            config_file,
            max_pull_requests,
        })
    }
}

/// The environment variable GitHub Actions uses for an input.
pub fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}
