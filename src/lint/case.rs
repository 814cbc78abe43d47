//! Letter-case checks used by the `*-case` rules.

use std::fmt;

/// A letter case a header part can be required (or forbidden) to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetCase {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl TargetCase {
    /// Parses a commitlint case name. Both `lower-case` and `lowercase` spellings are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let case = match name {
            "lower-case" | "lowercase" => TargetCase::LowerCase,
            "upper-case" | "uppercase" => TargetCase::UpperCase,
            "camel-case" | "camelcase" => TargetCase::CamelCase,
            "kebab-case" | "kebabcase" => TargetCase::KebabCase,
            "pascal-case" | "pascalcase" => TargetCase::PascalCase,
            "sentence-case" | "sentencecase" => TargetCase::SentenceCase,
            "snake-case" | "snakecase" => TargetCase::SnakeCase,
            "start-case" | "startcase" => TargetCase::StartCase,
            _ => return None,
        };
        Some(case)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetCase::LowerCase => "lower-case",
            TargetCase::UpperCase => "upper-case",
            TargetCase::CamelCase => "camel-case",
            TargetCase::KebabCase => "kebab-case",
            TargetCase::PascalCase => "pascal-case",
            TargetCase::SentenceCase => "sentence-case",
            TargetCase::SnakeCase => "snake-case",
            TargetCase::StartCase => "start-case",
        }
    }

    /// Converts `input` to this case.
    fn convert(&self, input: &str) -> String {
        match self {
            TargetCase::LowerCase => input.to_lowercase(),
            TargetCase::UpperCase => input.to_uppercase(),
            TargetCase::SentenceCase => upper_first(input),
            TargetCase::CamelCase => {
                let mut words = words(input).into_iter();
                let mut out = words.next().map(|w| w.to_lowercase()).unwrap_or_default();
                for word in words {
                    out.push_str(&capitalize(&word));
                }
                out
            }
            TargetCase::PascalCase => words(input).iter().map(|w| capitalize(w)).collect(),
            TargetCase::KebabCase => lower_words(input).join("-"),
            TargetCase::SnakeCase => lower_words(input).join("_"),
            TargetCase::StartCase => words(input)
                .iter()
                .map(|w| upper_first(w))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Whether `input` already has this case.
    ///
    /// Inputs that convert to nothing, or start with a digit after conversion,
    /// satisfy every case.
    pub fn matches(&self, input: &str) -> bool {
        let converted = self.convert(input);
        if converted.is_empty() || converted.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
        converted == input
    }
}

impl fmt::Display for TargetCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits on non-alphanumerics and lower-to-upper transitions.
fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn lower_words(input: &str) -> Vec<String> {
    words(input).iter().map(|w| w.to_lowercase()).collect()
}

fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    upper_first(&word.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_and_upper() {
        assert!(TargetCase::LowerCase.matches("feat"));
        assert!(!TargetCase::LowerCase.matches("Feat"));
        assert!(TargetCase::UpperCase.matches("FEAT"));
        assert!(!TargetCase::UpperCase.matches("FEAt"));
    }

    #[test]
    fn sentence_case_only_looks_at_first_letter() {
        assert!(TargetCase::SentenceCase.matches("Add the widget"));
        assert!(TargetCase::SentenceCase.matches("ADD THE WIDGET"));
        assert!(!TargetCase::SentenceCase.matches("add the widget"));
    }

    #[test]
    fn start_case_capitalises_every_word() {
        assert!(TargetCase::StartCase.matches("Add The Widget"));
        assert!(!TargetCase::StartCase.matches("Add the widget"));
    }

    #[test]
    fn pascal_camel_kebab_snake() {
        assert!(TargetCase::PascalCase.matches("AddWidget"));
        assert!(!TargetCase::PascalCase.matches("add widget"));
        assert!(TargetCase::CamelCase.matches("addWidget"));
        assert!(TargetCase::KebabCase.matches("add-widget"));
        assert!(!TargetCase::KebabCase.matches("add_widget"));
        assert!(TargetCase::SnakeCase.matches("add_widget"));
    }

    #[test]
    fn leading_digits_and_empty_input_match_everything() {
        assert!(TargetCase::UpperCase.matches("123 bump"));
        assert!(TargetCase::PascalCase.matches(""));
        assert!(TargetCase::SentenceCase.matches("2fa support"));
    }

    #[test]
    fn names_round_trip() {
        for case in [
            TargetCase::LowerCase,
            TargetCase::UpperCase,
            TargetCase::CamelCase,
            TargetCase::KebabCase,
            TargetCase::PascalCase,
            TargetCase::SentenceCase,
            TargetCase::SnakeCase,
            TargetCase::StartCase,
        ] {
            assert_eq!(TargetCase::from_name(case.as_str()), Some(case));
        }
        assert_eq!(TargetCase::from_name("lowercase"), Some(TargetCase::LowerCase));
        assert_eq!(TargetCase::from_name("shouting"), None);
    }
}
