//! Rule definitions and their evaluation against a parsed commit.
//!
//! Each configured rule carries a severity, a condition (`always`/`never`) and
//! an optional value whose shape depends on the rule. Values are validated
//! when the rule set is loaded, so evaluation itself cannot fail.

use std::collections::BTreeMap;
use std::fmt;

use super::case::TargetCase;
use super::parse::ParsedCommit;
use super::result::{LintResult, Severity, Violation};

/// Every rule this engine understands.
///
/// Declaration order is evaluation order, so violations are reported type
/// first, then scope, subject, header, body, footer, and trailers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    TypeEnum,
    TypeCase,
    TypeEmpty,
    TypeMaxLength,
    TypeMinLength,
    ScopeEnum,
    ScopeCase,
    ScopeEmpty,
    ScopeMaxLength,
    SubjectCase,
    SubjectEmpty,
    SubjectFullStop,
    SubjectMaxLength,
    SubjectMinLength,
    HeaderMaxLength,
    HeaderMinLength,
    HeaderFullStop,
    BodyLeadingBlank,
    BodyEmpty,
    BodyMaxLength,
    BodyMaxLineLength,
    FooterLeadingBlank,
    FooterEmpty,
    FooterMaxLineLength,
    SignedOffBy,
}

/// The shape of value a rule takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    List,
    Cases,
    Length,
    Text { default: &'static str },
}

const ALL_RULES: [Rule; 25] = [
    Rule::TypeEnum,
    Rule::TypeCase,
    Rule::TypeEmpty,
    Rule::TypeMaxLength,
    Rule::TypeMinLength,
    Rule::ScopeEnum,
    Rule::ScopeCase,
    Rule::ScopeEmpty,
    Rule::ScopeMaxLength,
    Rule::SubjectCase,
    Rule::SubjectEmpty,
    Rule::SubjectFullStop,
    Rule::SubjectMaxLength,
    Rule::SubjectMinLength,
    Rule::HeaderMaxLength,
    Rule::HeaderMinLength,
    Rule::HeaderFullStop,
    Rule::BodyLeadingBlank,
    Rule::BodyEmpty,
    Rule::BodyMaxLength,
    Rule::BodyMaxLineLength,
    Rule::FooterLeadingBlank,
    Rule::FooterEmpty,
    Rule::FooterMaxLineLength,
    Rule::SignedOffBy,
];

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::TypeEnum => "type-enum",
            Rule::TypeCase => "type-case",
            Rule::TypeEmpty => "type-empty",
            Rule::TypeMaxLength => "type-max-length",
            Rule::TypeMinLength => "type-min-length",
            Rule::ScopeEnum => "scope-enum",
            Rule::ScopeCase => "scope-case",
            Rule::ScopeEmpty => "scope-empty",
            Rule::ScopeMaxLength => "scope-max-length",
            Rule::SubjectCase => "subject-case",
            Rule::SubjectEmpty => "subject-empty",
            Rule::SubjectFullStop => "subject-full-stop",
            Rule::SubjectMaxLength => "subject-max-length",
            Rule::SubjectMinLength => "subject-min-length",
            Rule::HeaderMaxLength => "header-max-length",
            Rule::HeaderMinLength => "header-min-length",
            Rule::HeaderFullStop => "header-full-stop",
            Rule::BodyLeadingBlank => "body-leading-blank",
            Rule::BodyEmpty => "body-empty",
            Rule::BodyMaxLength => "body-max-length",
            Rule::BodyMaxLineLength => "body-max-line-length",
            Rule::FooterLeadingBlank => "footer-leading-blank",
            Rule::FooterEmpty => "footer-empty",
            Rule::FooterMaxLineLength => "footer-max-line-length",
            Rule::SignedOffBy => "signed-off-by",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_RULES.iter().copied().find(|r| r.name() == name)
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            Rule::TypeEnum | Rule::ScopeEnum => ValueKind::List,
            Rule::TypeCase | Rule::ScopeCase | Rule::SubjectCase => ValueKind::Cases,
            Rule::TypeMaxLength
            | Rule::TypeMinLength
            | Rule::ScopeMaxLength
            | Rule::SubjectMaxLength
            | Rule::SubjectMinLength
            | Rule::HeaderMaxLength
            | Rule::HeaderMinLength
            | Rule::BodyMaxLength
            | Rule::BodyMaxLineLength
            | Rule::FooterMaxLineLength => ValueKind::Length,
            Rule::SubjectFullStop | Rule::HeaderFullStop => ValueKind::Text { default: "." },
            Rule::SignedOffBy => ValueKind::Text {
                default: "Signed-off-by:",
            },
            Rule::TypeEmpty
            | Rule::ScopeEmpty
            | Rule::SubjectEmpty
            | Rule::BodyLeadingBlank
            | Rule::BodyEmpty
            | Rule::FooterLeadingBlank
            | Rule::FooterEmpty => ValueKind::None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a rule asserts or negates its condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Condition {
    #[default]
    Always,
    Never,
}

impl Condition {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "always" => Some(Condition::Always),
            "never" => Some(Condition::Never),
            _ => None,
        }
    }

    /// Applies the condition to an "is the property present" check.
    fn expect(&self, holds: bool) -> bool {
        match self {
            Condition::Always => holds,
            Condition::Never => !holds,
        }
    }

    /// `must` / `must not`.
    fn must(&self) -> &'static str {
        match self {
            Condition::Always => "must",
            Condition::Never => "must not",
        }
    }
}

/// A validated rule value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue {
    None,
    List(Vec<String>),
    Cases(Vec<TargetCase>),
    Length(usize),
    Text(String),
}

/// One entry of a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub severity: Severity,
    pub condition: Condition,
    pub value: RuleValue,
}

impl RuleConfig {
    pub fn new(severity: Severity, condition: Condition, value: RuleValue) -> Self {
        Self {
            severity,
            condition,
            value,
        }
    }
}

/// The rules a commit message is checked against.
///
/// Disabled (level 0) rules still count as configured: a rule set is only
/// "empty" when it names no rules at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: BTreeMap<Rule, RuleConfig>,
    /// Skip merge, revert, and fixup commits entirely.
    pub default_ignores: bool,
}

impl RuleSet {
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
            default_ignores: true,
        }
    }

    pub fn with_rule(mut self, rule: Rule, config: RuleConfig) -> Self {
        self.insert(rule, config);
        self
    }

    pub fn insert(&mut self, rule: Rule, config: RuleConfig) {
        self.rules.insert(rule, config);
    }

    pub fn get(&self, rule: Rule) -> Option<&RuleConfig> {
        self.rules.get(&rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rule, &RuleConfig)> {
        self.rules.iter().map(|(rule, config)| (*rule, config))
    }

    /// Overlays `other` on top of `self`; rules named in `other` win.
    pub fn merge(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
        self.default_ignores = other.default_ignores;
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every enabled rule against `commit`.
pub fn apply_rules(rules: &RuleSet, commit: &ParsedCommit, input: &str) -> LintResult {
    let mut result = LintResult::clean(input);

    for (rule, config) in rules.iter() {
        if config.severity == Severity::Disabled {
            continue;
        }
        if let Some(message) = check(rule, config, commit) {
            result.push(Violation {
                name: rule.name().to_string(),
                severity: config.severity,
                message,
            });
        }
    }

    result
}

/// Returns the violation message if `rule` fails for `commit`.
fn check(rule: Rule, config: &RuleConfig, commit: &ParsedCommit) -> Option<String> {
    let when = config.condition;
    let value = &config.value;
    let header = Some(commit.header.as_str()).filter(|h| !h.is_empty());

    match rule {
        // A message without a type is not of any listed type; a missing scope is fine.
        Rule::TypeEnum => {
            let commit_type = commit.commit_type.as_deref().unwrap_or_default();
            check_enum("type", Some(commit_type), when, value)
        }
        Rule::ScopeEnum => non_empty(commit.scope.as_deref())
            .and_then(|scope| check_enum("scope", Some(scope), when, value)),
        Rule::TypeCase => check_case("type", commit.commit_type.as_deref(), when, value),
        Rule::ScopeCase => check_case("scope", commit.scope.as_deref(), when, value),
        Rule::SubjectCase => {
            // Subjects that open with a digit or symbol have no case to check.
            let subject = commit
                .subject
                .as_deref()
                .filter(|s| s.starts_with(char::is_alphabetic))?;
            check_case("subject", Some(subject), when, value)
        }
        Rule::TypeEmpty => check_empty("type", commit.commit_type.as_deref(), when),
        Rule::ScopeEmpty => check_empty("scope", commit.scope.as_deref(), when),
        Rule::SubjectEmpty => check_empty("subject", commit.subject.as_deref(), when),
        Rule::BodyEmpty => check_empty("body", commit.body.as_deref(), when),
        Rule::FooterEmpty => check_empty("footer", commit.footer.as_deref(), when),
        Rule::TypeMaxLength => check_max("type", commit.commit_type.as_deref(), value),
        Rule::ScopeMaxLength => check_max("scope", commit.scope.as_deref(), value),
        Rule::SubjectMaxLength => check_max("subject", commit.subject.as_deref(), value),
        Rule::BodyMaxLength => check_max("body", commit.body.as_deref(), value),
        Rule::TypeMinLength => check_min("type", commit.commit_type.as_deref(), value),
        Rule::SubjectMinLength => check_min("subject", commit.subject.as_deref(), value),
        Rule::HeaderMaxLength => {
            let max = length(value)?;
            let len = char_len(&commit.header);
            (len > max).then(|| {
                format!("header must not be longer than {max} characters, current length is {len}")
            })
        }
        Rule::HeaderMinLength => {
            let min = length(value)?;
            let len = char_len(&commit.header);
            (len < min).then(|| {
                format!("header must not be shorter than {min} characters, current length is {len}")
            })
        }
        Rule::SubjectFullStop => check_full_stop("subject", commit.subject.as_deref(), when, value),
        Rule::HeaderFullStop => check_full_stop("header", header, when, value),
        Rule::BodyMaxLineLength => check_line_length("body", commit.body.as_deref(), value),
        Rule::FooterMaxLineLength => check_line_length("footer", commit.footer.as_deref(), value),
        Rule::BodyLeadingBlank => {
            commit.body.as_ref()?;
            let blank = commit.raw.lines().nth(1).is_none_or(|l| l.trim().is_empty());
            leading_blank_message("body", blank, when)
        }
        Rule::FooterLeadingBlank => {
            let start = commit.footer_line?;
            let blank = start
                .checked_sub(1)
                .and_then(|i| commit.raw.lines().nth(i))
                .is_none_or(|l| l.trim().is_empty());
            leading_blank_message("footer", blank, when)
        }
        Rule::SignedOffBy => {
            let RuleValue::Text(prefix) = value else {
                return None;
            };
            let signed = commit
                .raw
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty() && !l.starts_with('#'))
                .is_some_and(|l| l.starts_with(prefix.as_str()));
            (!when.expect(signed)).then(|| format!("message {} be signed off", when.must()))
        }
    }
}

fn non_empty(part: Option<&str>) -> Option<&str> {
    part.filter(|p| !p.is_empty())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn length(value: &RuleValue) -> Option<usize> {
    match value {
        RuleValue::Length(n) => Some(*n),
        _ => None,
    }
}

fn check_enum(
    part: &str,
    actual: Option<&str>,
    when: Condition,
    value: &RuleValue,
) -> Option<String> {
    let actual = actual?;
    let RuleValue::List(allowed) = value else {
        return None;
    };
    // Multiple scopes may be given as `a,b` or `a/b`.
    let all_listed = actual
        .split([',', '/'])
        .map(str::trim)
        .all(|p| allowed.iter().any(|a| a == p));
    (!when.expect(all_listed))
        .then(|| format!("{part} {} be one of [{}]", when.must(), allowed.join(", ")))
}

fn check_case(
    part: &str,
    actual: Option<&str>,
    when: Condition,
    value: &RuleValue,
) -> Option<String> {
    let actual = non_empty(actual)?;
    let RuleValue::Cases(cases) = value else {
        return None;
    };
    let passes = match when {
        Condition::Always => cases.iter().any(|c| c.matches(actual)),
        Condition::Never => !cases.iter().any(|c| c.matches(actual)),
    };
    if passes {
        return None;
    }
    let names: Vec<&str> = cases.iter().map(TargetCase::as_str).collect();
    let expected = match when {
        Condition::Always if names.len() > 1 => {
            format!("one of the following cases: {}", names.join(", "))
        }
        _ => names.join(", "),
    };
    Some(format!("{part} {} be {expected}", when.must()))
}

fn check_empty(part: &str, actual: Option<&str>, when: Condition) -> Option<String> {
    let is_empty = non_empty(actual).is_none();
    match when {
        Condition::Never => is_empty.then(|| format!("{part} may not be empty")),
        Condition::Always => (!is_empty).then(|| format!("{part} must be empty")),
    }
}

fn check_max(part: &str, actual: Option<&str>, value: &RuleValue) -> Option<String> {
    let actual = non_empty(actual)?;
    let max = length(value)?;
    (char_len(actual) > max).then(|| format!("{part} must not be longer than {max} characters"))
}

fn check_min(part: &str, actual: Option<&str>, value: &RuleValue) -> Option<String> {
    let actual = non_empty(actual)?;
    let min = length(value)?;
    (char_len(actual) < min).then(|| format!("{part} must not be shorter than {min} characters"))
}

fn check_full_stop(
    part: &str,
    actual: Option<&str>,
    when: Condition,
    value: &RuleValue,
) -> Option<String> {
    let actual = non_empty(actual)?;
    let RuleValue::Text(stop) = value else {
        return None;
    };
    let ends = actual.ends_with(stop.as_str());
    match when {
        Condition::Never => ends.then(|| format!("{part} may not end with full stop")),
        Condition::Always => (!ends).then(|| format!("{part} must end with full stop")),
    }
}

fn check_line_length(part: &str, actual: Option<&str>, value: &RuleValue) -> Option<String> {
    let actual = non_empty(actual)?;
    let max = length(value)?;
    actual
        .lines()
        .any(|l| char_len(l) > max)
        .then(|| format!("{part}'s lines must not be longer than {max} characters"))
}

fn leading_blank_message(part: &str, blank: bool, when: Condition) -> Option<String> {
    match when {
        Condition::Always => (!blank).then(|| format!("{part} must have leading blank line")),
        Condition::Never => blank.then(|| format!("{part} may not have leading blank line")),
    }
}
