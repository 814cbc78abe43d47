//! Rule configuration loading.
//!
//! Configuration uses commitlint's JSON layout:
//!
//! ```json
//! {
//!   "extends": ["@commitlint/config-conventional"],
//!   "rules": { "type-enum": [2, "always", ["feat", "fix"]] },
//!   "defaultIgnores": true
//! }
//! ```
//!
//! Each rule entry is `[level, when?, value?]`. Validation happens here so
//! that evaluation never sees a malformed rule.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::case::TargetCase;
use super::result::Severity;
use super::rules::{Condition, Rule, RuleConfig, RuleSet, RuleValue, ValueKind};

/// Files searched (in order) when no explicit config path is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    ".commitlintrc",
    ".commitlintrc.json",
    "commitlint.config.json",
];

/// The only shareable config that can be extended.
pub const CONVENTIONAL_PRESET: &str = "@commitlint/config-conventional";

/// Error type for rule configuration failures.
#[derive(Debug, Error)]
pub enum RuleConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("found invalid rule name: {name}")]
    UnknownRule { name: String },

    #[error("invalid configuration for rule {rule}: {reason}")]
    InvalidRule { rule: &'static str, reason: String },

    #[error("cannot extend {name}: only @commitlint/config-conventional is built in")]
    UnsupportedExtends { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    extends: Option<Extends>,
    #[serde(default)]
    rules: serde_json::Map<String, Value>,
    default_ignores: Option<bool>,
}

/// Loads the rule set from `path`.
pub fn load_file(path: &Path) -> Result<RuleSet, RuleConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| RuleConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| RuleConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    from_value(value).map_err(|e| match e {
        ParseFailure::Json(source) => RuleConfigError::Json {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Config(e) => e,
    })
}

/// Looks for a config file in `dir`, falling back to the `commitlint` key of
/// `package.json`.
///
/// Returns an empty rule set when nothing is found; the caller decides
/// whether that is acceptable.
pub fn discover(dir: &Path) -> Result<RuleSet, RuleConfigError> {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Using commitlint config file");
            return load_file(&path);
        }
    }

    let package = dir.join("package.json");
    if package.is_file() {
        let text = std::fs::read_to_string(&package).map_err(|source| RuleConfigError::Io {
            path: package.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| RuleConfigError::Json {
            path: package.clone(),
            source,
        })?;
        if let Some(section) = value.get("commitlint") {
            tracing::debug!(path = %package.display(), "Using commitlint section of package.json");
            return from_value(section.clone()).map_err(|e| match e {
                ParseFailure::Json(source) => RuleConfigError::Json {
                    path: package,
                    source,
                },
                ParseFailure::Config(e) => e,
            });
        }
    }

    tracing::debug!(dir = %dir.display(), "No commitlint configuration found");
    Ok(RuleSet::new())
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    Config(RuleConfigError),
}

impl From<RuleConfigError> for ParseFailure {
    fn from(e: RuleConfigError) -> Self {
        ParseFailure::Config(e)
    }
}

fn from_value(value: Value) -> Result<RuleSet, ParseFailure> {
    let raw: RawConfig = serde_json::from_value(value).map_err(ParseFailure::Json)?;

    let extends = match raw.extends {
        None => Vec::new(),
        Some(Extends::One(name)) => vec![name],
        Some(Extends::Many(names)) => names,
    };

    let mut rules = RuleSet::new();
    for name in extends {
        match name.as_str() {
            CONVENTIONAL_PRESET | "config-conventional" => rules.merge(conventional_preset()),
            _ => return Err(RuleConfigError::UnsupportedExtends { name }.into()),
        }
    }

    let mut local = RuleSet::new();
    for (name, entry) in raw.rules {
        let rule = Rule::from_name(&name).ok_or(RuleConfigError::UnknownRule { name })?;
        local.insert(rule, parse_rule(rule, &entry)?);
    }
    local.default_ignores = raw.default_ignores.unwrap_or(true);
    rules.merge(local);

    Ok(rules)
}

/// Parses one `[level, when?, value?]` entry.
pub fn parse_rule(rule: Rule, entry: &Value) -> Result<RuleConfig, RuleConfigError> {
    let invalid = |reason: &str| RuleConfigError::InvalidRule {
        rule: rule.name(),
        reason: reason.to_string(),
    };

    let items = entry
        .as_array()
        .ok_or_else(|| invalid("expected an array of [level, when, value]"))?;

    let severity = items
        .first()
        .and_then(Value::as_u64)
        .and_then(Severity::from_level)
        .ok_or_else(|| invalid("level must be 0, 1 or 2"))?;

    let condition = match items.get(1) {
        None => Condition::Always,
        Some(Value::String(when)) => Condition::from_name(when)
            .ok_or_else(|| invalid("when must be \"always\" or \"never\""))?,
        Some(_) => return Err(invalid("when must be a string")),
    };

    let raw_value = items.get(2);
    let value = match rule.value_kind() {
        // `[0]` switches a rule off without restating its value.
        _ if severity == Severity::Disabled && raw_value.is_none() => RuleValue::None,
        ValueKind::None => RuleValue::None,
        ValueKind::List => {
            let list = raw_value
                .and_then(Value::as_array)
                .ok_or_else(|| invalid("value must be a list of strings"))?;
            let strings = list
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("value must be a list of strings"))?;
            RuleValue::List(strings)
        }
        ValueKind::Cases => {
            let names: Vec<&str> = match raw_value {
                Some(Value::String(name)) => vec![name.as_str()],
                Some(Value::Array(list)) => list
                    .iter()
                    .map(Value::as_str)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| invalid("cases must be strings"))?,
                _ => return Err(invalid("value must be a case name or list of case names")),
            };
            let cases = names
                .into_iter()
                .map(|n| {
                    TargetCase::from_name(n).ok_or_else(|| invalid(&format!("unknown case {n}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            RuleValue::Cases(cases)
        }
        ValueKind::Length => {
            let n = raw_value
                .and_then(Value::as_u64)
                .ok_or_else(|| invalid("value must be a non-negative integer"))?;
            RuleValue::Length(usize::try_from(n).map_err(|_| invalid("value is too large"))?)
        }
        ValueKind::Text { default } => match raw_value {
            None => RuleValue::Text(default.to_string()),
            Some(Value::String(s)) => RuleValue::Text(s.clone()),
            Some(_) => return Err(invalid("value must be a string")),
        },
    };

    Ok(RuleConfig::new(severity, condition, value))
}

/// The rules of `@commitlint/config-conventional`.
pub fn conventional_preset() -> RuleSet {
    use Condition::{Always, Never};
    use Severity::{Error, Warning};

    let types = [
        "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style",
        "test",
    ];

    RuleSet::new()
        .with_rule(Rule::BodyLeadingBlank, RuleConfig::new(Warning, Always, RuleValue::None))
        .with_rule(
            Rule::BodyMaxLineLength,
            RuleConfig::new(Error, Always, RuleValue::Length(100)),
        )
        .with_rule(Rule::FooterLeadingBlank, RuleConfig::new(Warning, Always, RuleValue::None))
        .with_rule(
            Rule::FooterMaxLineLength,
            RuleConfig::new(Error, Always, RuleValue::Length(100)),
        )
        .with_rule(
            Rule::HeaderMaxLength,
            RuleConfig::new(Error, Always, RuleValue::Length(100)),
        )
        .with_rule(
            Rule::SubjectCase,
            RuleConfig::new(
                Error,
                Never,
                RuleValue::Cases(vec![
                    TargetCase::SentenceCase,
                    TargetCase::StartCase,
                    TargetCase::PascalCase,
                    TargetCase::UpperCase,
                ]),
            ),
        )
        .with_rule(Rule::SubjectEmpty, RuleConfig::new(Error, Never, RuleValue::None))
        .with_rule(
            Rule::SubjectFullStop,
            RuleConfig::new(Error, Never, RuleValue::Text(".".to_string())),
        )
        .with_rule(
            Rule::TypeCase,
            RuleConfig::new(Error, Always, RuleValue::Cases(vec![TargetCase::LowerCase])),
        )
        .with_rule(Rule::TypeEmpty, RuleConfig::new(Error, Never, RuleValue::None))
        .with_rule(
            Rule::TypeEnum,
            RuleConfig::new(
                Error,
                Always,
                RuleValue::List(types.iter().map(|t| t.to_string()).collect()),
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn parses_full_entry() {
        let config = parse_rule(Rule::TypeEnum, &json!([2, "always", ["feat", "fix"]])).unwrap();
        assert_eq!(config.severity, Severity::Error);
        assert_eq!(config.condition, Condition::Always);
        assert_eq!(
            config.value,
            RuleValue::List(vec!["feat".to_string(), "fix".to_string()])
        );
    }

    #[test]
    fn when_defaults_to_always_and_text_values_to_their_default() {
        let config = parse_rule(Rule::SubjectFullStop, &json!([1])).unwrap();
        assert_eq!(config.severity, Severity::Warning);
        assert_eq!(config.condition, Condition::Always);
        assert_eq!(config.value, RuleValue::Text(".".to_string()));
    }

    #[test]
    fn case_value_accepts_single_name() {
        let config = parse_rule(Rule::TypeCase, &json!([2, "always", "lower-case"])).unwrap();
        assert_eq!(config.value, RuleValue::Cases(vec![TargetCase::LowerCase]));
    }

    #[test]
    fn rejects_bad_level() {
        let err = parse_rule(Rule::TypeEmpty, &json!([3, "never"])).unwrap_err();
        assert!(matches!(err, RuleConfigError::InvalidRule { rule: "type-empty", .. }));
    }

    #[test]
    fn rejects_bad_condition() {
        assert!(parse_rule(Rule::TypeEmpty, &json!([2, "sometimes"])).is_err());
    }

    #[test]
    fn rejects_missing_list() {
        assert!(parse_rule(Rule::ScopeEnum, &json!([2, "always"])).is_err());
    }

    #[test]
    fn rejects_unknown_case() {
        assert!(parse_rule(Rule::SubjectCase, &json!([2, "never", ["shouty-case"]])).is_err());
    }

    #[test]
    fn unknown_rule_name_is_an_error() {
        let err = from_value(json!({ "rules": { "no-such-rule": [2, "always"] } }));
        assert!(matches!(
            err,
            Err(ParseFailure::Config(RuleConfigError::UnknownRule { .. }))
        ));
    }

    #[test]
    fn local_rules_override_preset() {
        let rules = from_value(json!({
            "extends": ["@commitlint/config-conventional"],
            "rules": { "type-enum": [2, "always", ["feat"]], "header-max-length": [0] }
        }))
        .unwrap();

        assert_eq!(rules.len(), conventional_preset().len());
        assert_eq!(
            rules.get(Rule::TypeEnum).unwrap().value,
            RuleValue::List(vec!["feat".to_string()])
        );
        assert_eq!(
            rules.get(Rule::HeaderMaxLength).unwrap().severity,
            Severity::Disabled
        );
    }

    #[test]
    fn extends_accepts_a_single_string() {
        let rules = from_value(json!({ "extends": "@commitlint/config-conventional" })).unwrap();
        assert_eq!(rules, conventional_preset());
    }

    #[test]
    fn other_presets_are_rejected() {
        assert!(matches!(
            from_value(json!({ "extends": ["@commitlint/config-angular"] })),
            Err(ParseFailure::Config(RuleConfigError::UnsupportedExtends { .. }))
        ));
    }

    #[test]
    fn default_ignores_can_be_turned_off() {
        let rules = from_value(json!({ "rules": {}, "defaultIgnores": false })).unwrap();
        assert!(!rules.default_ignores);
        assert!(rules.is_empty());
    }

    #[test]
    fn discover_prefers_commitlintrc() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(".commitlintrc.json"),
            r#"{ "rules": { "type-empty": [2, "never"] } }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "commitlint": { "rules": { "subject-empty": [2, "never"] } } }"#,
        )
        .unwrap();

        let rules = discover(dir.path()).unwrap();

        assert_eq!(rules.len(), 1);
        assert!(rules.get(Rule::TypeEmpty).is_some());
    }

    #[test]
    fn discover_falls_back_to_package_json() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "x", "commitlint": { "extends": ["@commitlint/config-conventional"] } }"#,
        )
        .unwrap();

        assert_eq!(discover(dir.path()).unwrap(), conventional_preset());
    }

    #[test]
    fn discover_without_config_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{ "name": "x" }"#).unwrap();

        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn load_file_reports_path_on_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commitlint.config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_file(&path).unwrap_err();

        assert!(matches!(err, RuleConfigError::Json { .. }));
        assert!(err.to_string().contains("commitlint.config.json"));
    }

    #[test]
    fn load_file_missing_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RuleConfigError::Io { .. }));
    }
}
