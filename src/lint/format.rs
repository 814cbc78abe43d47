//! Plain-text rendering of lint results, in commitlint's colourless layout.
//!
//! ```text
//! ⧗   input: random text
//! ✖   type may not be empty [type-empty]
//! ✖   subject may not be empty [subject-empty]
//!
//! ✖   found 2 problems, 0 warnings
//! ```

use super::result::{LintResult, Severity, Violation};

const INPUT_SIGN: &str = "⧗";
const ERROR_SIGN: &str = "✖";
const WARNING_SIGN: &str = "⚠";
const SUCCESS_SIGN: &str = "✔";

/// Formats one result as display text (lines joined with `\n`).
pub fn format_result(result: &LintResult) -> String {
    let mut lines = vec![format!("{INPUT_SIGN}   input: {}", result.header())];

    let problems: Vec<String> = result
        .errors
        .iter()
        .chain(&result.warnings)
        .map(format_violation)
        .collect();
    let has_problems = !problems.is_empty();
    lines.extend(problems);
    if has_problems {
        lines.push(String::new());
    }

    let summary_sign = if !result.errors.is_empty() {
        ERROR_SIGN
    } else if !result.warnings.is_empty() {
        WARNING_SIGN
    } else {
        SUCCESS_SIGN
    };
    lines.push(format!(
        "{summary_sign}   found {} problems, {} warnings",
        result.errors.len(),
        result.warnings.len()
    ));

    lines.join("\n")
}

fn format_violation(violation: &Violation) -> String {
    let sign = match violation.severity {
        Severity::Error => ERROR_SIGN,
        Severity::Warning => WARNING_SIGN,
        Severity::Disabled => " ",
    };
    format!("{sign}   {} [{}]", violation.message, violation.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(name: &str, severity: Severity, message: &str) -> Violation {
        Violation {
            name: name.to_string(),
            severity,
            message: message.to_string(),
        }
    }

    #[test]
    fn clean_result() {
        let text = format_result(&LintResult::clean("fix: bug\n\nmore detail"));
        assert_eq!(text, "⧗   input: fix: bug\n✔   found 0 problems, 0 warnings");
    }

    #[test]
    fn errors_then_warnings_then_summary() {
        let result = LintResult {
            input: "random text".to_string(),
            errors: vec![violation("type-empty", Severity::Error, "type may not be empty")],
            warnings: vec![violation(
                "body-leading-blank",
                Severity::Warning,
                "body must have leading blank line",
            )],
        };

        assert_eq!(
            format_result(&result),
            "⧗   input: random text\n\
             ✖   type may not be empty [type-empty]\n\
             ⚠   body must have leading blank line [body-leading-blank]\n\
             \n\
             ✖   found 1 problems, 1 warnings"
        );
    }

    #[test]
    fn warnings_only_summary_uses_warning_sign() {
        let result = LintResult {
            input: "feat: x".to_string(),
            errors: Vec::new(),
            warnings: vec![violation("scope-empty", Severity::Warning, "scope may not be empty")],
        };
        assert!(format_result(&result).ends_with("⚠   found 0 problems, 1 warnings"));
    }
}
