//! Conventional-commit message parsing.
//!
//! A message is split into a header (`type(scope)!: subject`), an optional
//! body, and an optional footer. The footer starts at the first
//! `BREAKING CHANGE:` note, or else at a trailing paragraph made up entirely
//! of git trailers (`Signed-off-by: ...`, `Closes #12`).

/// A commit message broken into its conventional parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommit {
    /// The message with surrounding whitespace removed.
    pub raw: String,
    /// The first line.
    pub header: String,
    /// `None` when the header does not follow the conventional layout.
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub footer: Option<String>,
    /// Index into `raw.lines()` where the footer begins.
    pub footer_line: Option<usize>,
}

/// Parses a commit message.
pub fn parse_commit(message: &str) -> ParsedCommit {
    let raw = message.trim().to_string();
    let lines: Vec<&str> = raw.lines().collect();
    let header = lines.first().copied().unwrap_or_default().to_string();

    let (commit_type, scope, subject) = match parse_header(&header) {
        Some(h) => (Some(h.commit_type), h.scope, Some(h.subject)),
        None => (None, None, None),
    };

    let footer_line = find_footer_start(&lines);
    let body_end = footer_line.unwrap_or(lines.len());
    let body = join_non_blank(lines.get(1..body_end).unwrap_or_default());
    let footer = footer_line.and_then(|start| join_non_blank(&lines[start..]));

    ParsedCommit {
        raw,
        header,
        commit_type,
        scope,
        subject,
        body,
        footer,
        footer_line,
    }
}

struct Header {
    commit_type: String,
    scope: Option<String>,
    subject: String,
}

/// Matches `^(\w*)(?:\((.*)\))?!?: (.*)$`.
///
/// The scope is greedy: it extends to the last `)` that is followed by `: `
/// or `!: `.
fn parse_header(header: &str) -> Option<Header> {
    let type_end = header
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(header.len());
    let commit_type = &header[..type_end];
    let rest = &header[type_end..];

    let (scope, rest) = match rest.strip_prefix('(') {
        Some(inner) => {
            let close = inner
                .match_indices(')')
                .map(|(i, _)| i)
                .filter(|&i| {
                    let after = &inner[i + 1..];
                    after.starts_with(": ") || after.starts_with("!: ")
                })
                .last()?;
            (Some(inner[..close].to_string()), &inner[close + 1..])
        }
        None => (None, rest),
    };

    // Optional `!` breaking marker.
    let rest = rest.strip_prefix('!').unwrap_or(rest);
    let subject = rest.strip_prefix(": ")?;

    Some(Header {
        commit_type: commit_type.to_string(),
        scope,
        subject: subject.to_string(),
    })
}

/// Finds the line index where the footer begins, skipping the header.
fn find_footer_start(lines: &[&str]) -> Option<usize> {
    if let Some(note) = lines.iter().skip(1).position(|l| is_breaking_note(l)) {
        return Some(note + 1);
    }

    // Last paragraph, provided it is separated from the header by a blank line.
    let end = lines.iter().rposition(|l| !l.trim().is_empty())?;
    if end == 0 {
        return None;
    }
    let start = lines[..=end]
        .iter()
        .rposition(|l| l.trim().is_empty())
        .map(|blank| blank + 1)?;
    if start == 0 {
        return None;
    }

    lines[start..=end]
        .iter()
        .all(|l| is_trailer(l))
        .then_some(start)
}

fn is_breaking_note(line: &str) -> bool {
    line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:")
}

/// `Token: value` or `Token #value`, where the token is a hyphenated word.
fn is_trailer(line: &str) -> bool {
    if is_breaking_note(line) {
        return true;
    }
    let token_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(line.len());
    if token_end == 0 || !line.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return false;
    }
    let rest = &line[token_end..];
    let value = rest.strip_prefix(": ").or_else(|| rest.strip_prefix(" #"));
    value.is_some_and(|v| !v.trim().is_empty())
}

fn join_non_blank(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let trimmed = text.trim_matches(|c: char| c == '\n' || c == '\r');
    if trimmed.trim().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
