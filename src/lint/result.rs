//! Structured lint output.

use serde::{Deserialize, Serialize};

/// How a rule violation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Level 0: the rule is configured but never reports.
    Disabled,
    /// Level 1: reported, does not fail the commit.
    Warning,
    /// Level 2: reported and fails the commit.
    Error,
}

impl Severity {
    /// Maps a commitlint numeric level.
    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            0 => Some(Severity::Disabled),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The rule name, e.g. `type-enum`.
    pub name: String,
    pub severity: Severity,
    /// Human-readable description, e.g. `type may not be empty`.
    pub message: String,
}

/// The outcome of linting one commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    /// The message that was linted.
    pub input: String,
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl LintResult {
    /// A result with no violations.
    pub fn clean(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A commit fails iff it has at least one error. Warnings never fail.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first line of the input, as shown in formatted output.
    pub fn header(&self) -> &str {
        self.input.lines().next().unwrap_or_default()
    }

    /// Files a violation under errors or warnings by its severity.
    pub(crate) fn push(&mut self, violation: Violation) {
        match violation.severity {
            Severity::Error => self.errors.push(violation),
            Severity::Warning => self.warnings.push(violation),
            Severity::Disabled => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: Severity) -> Violation {
        Violation {
            name: "subject-empty".to_string(),
            severity,
            message: "subject may not be empty".to_string(),
        }
    }

    #[test]
    fn warnings_alone_keep_result_valid() {
        let mut result = LintResult::clean("feat:");
        result.push(violation(Severity::Warning));
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn any_error_invalidates_result() {
        let mut result = LintResult::clean("feat:");
        result.push(violation(Severity::Error));
        assert!(!result.is_valid());
    }

    #[test]
    fn disabled_violations_are_dropped() {
        let mut result = LintResult::clean("feat:");
        result.push(violation(Severity::Disabled));
        assert_eq!(result, LintResult::clean("feat:"));
    }

    #[test]
    fn header_is_first_line() {
        assert_eq!(LintResult::clean("fix: a\n\nbody").header(), "fix: a");
        assert_eq!(LintResult::clean("").header(), "");
    }

    #[test]
    fn severity_levels() {
        assert_eq!(Severity::from_level(0), Some(Severity::Disabled));
        assert_eq!(Severity::from_level(1), Some(Severity::Warning));
        assert_eq!(Severity::from_level(2), Some(Severity::Error));
        assert_eq!(Severity::from_level(3), None);
    }
}
