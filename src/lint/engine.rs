//! The commitlint-compatible [`RuleEngine`].

use std::path::PathBuf;

use super::RuleEngine;
use super::config::{self, RuleConfigError};
use super::format::format_result;
use super::parse::parse_commit;
use super::result::LintResult;
use super::rules::{RuleSet, apply_rules};

/// Where the engine reads its rules from.
#[derive(Debug, Clone)]
pub enum RuleSource {
    /// Search a directory for the usual commitlint config files.
    Discover(PathBuf),
    /// Read one specific config file.
    File(PathBuf),
    /// Use an already-built rule set.
    Inline(RuleSet),
}

/// Lints messages with commitlint's rule semantics.
#[derive(Debug, Clone)]
pub struct CommitlintEngine {
    source: RuleSource,
}

impl CommitlintEngine {
    pub fn new(source: RuleSource) -> Self {
        Self { source }
    }

    /// An engine over a fixed rule set.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self::new(RuleSource::Inline(rules))
    }
}

impl RuleEngine for CommitlintEngine {
    fn load(&self) -> Result<RuleSet, RuleConfigError> {
        match &self.source {
            RuleSource::Discover(dir) => config::discover(dir),
            RuleSource::File(path) => config::load_file(path),
            RuleSource::Inline(rules) => Ok(rules.clone()),
        }
    }

    fn lint(&self, message: &str, rules: &RuleSet) -> LintResult {
        if rules.default_ignores && is_ignored(message) {
            tracing::debug!(header = message.lines().next().unwrap_or_default(), "Ignoring commit");
            return LintResult::clean(message);
        }
        apply_rules(rules, &parse_commit(message), message)
    }

    fn format(&self, result: &LintResult) -> String {
        format_result(result)
    }
}

/// Whether commitlint would skip this message by default.
pub fn is_ignored(message: &str) -> bool {
    let header = message.trim_start().lines().next().unwrap_or_default();

    const PREFIXES: [&str; 10] = [
        "Merge pull request",
        "Merge branch",
        "Merge tag",
        "Merge remote-tracking branch",
        "Automatic merge",
        "Revert ",
        "revert ",
        "fixup!",
        "squash!",
        "amend!",
    ];
    if PREFIXES.iter().any(|p| header.starts_with(p)) {
        return true;
    }

    // `Merge x into y`, `Auto-merged x into y`, `Merged x in|into y`, `Merged PR n: title`
    let into = header.contains(" into ");
    if header.starts_with("Merge ") || header.starts_with("Auto-merged ") {
        return into;
    }
    if header.starts_with("Merged PR ") && header.contains(": ") {
        return true;
    }
    header.starts_with("Merged ") && (into || header.contains(" in "))
}
