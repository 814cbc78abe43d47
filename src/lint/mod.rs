//! Commit message linting.
//!
//! The [`RuleEngine`] trait is the seam between the orchestrator and the rule
//! implementation. [`CommitlintEngine`] is the production engine; tests can
//! substitute their own.

mod case;
pub mod config;
mod engine;
mod evaluate;
mod format;
mod parse;
mod result;
mod rules;

pub use case::TargetCase;
pub use config::RuleConfigError;
pub use engine::{CommitlintEngine, RuleSource, is_ignored};
pub use evaluate::{EvaluateError, evaluate, filter_commits};
pub use format::format_result;
pub use parse::{ParsedCommit, parse_commit};
pub use result::{LintResult, Severity, Violation};
pub use rules::{Condition, Rule, RuleConfig, RuleSet, RuleValue, apply_rules};

/// Loads rules, lints messages, and renders results.
///
/// `lint` and `format` are synchronous and pure, so an engine can be shared
/// across blocking lint tasks behind an `Arc`.
pub trait RuleEngine: Send + Sync {
    /// Loads the rule set for this invocation.
    fn load(&self) -> Result<RuleSet, RuleConfigError>;

    /// Lints one commit message.
    fn lint(&self, message: &str, rules: &RuleSet) -> LintResult;

    /// Renders a result for display.
    fn format(&self, result: &LintResult) -> String;
}
