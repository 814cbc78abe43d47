//! Commits, pull request sets, and the committer exclusion list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ids::PrNumber;

/// The pull requests associated with a ref, bounded by the requested limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSet {
    /// PR numbers in the order the API returned them. Duplicates are kept.
    pub numbers: Vec<PrNumber>,
    /// True when the API reports more associated PRs beyond the limit.
    pub has_more: bool,
}

impl PullRequestSet {
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// A single commit of a pull request, reduced to what linting needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The full commit message, possibly multi-line.
    pub message: String,
    /// The committer's email. `None` when the commit carries no committer identity.
    pub committer_email: Option<String>,
}

impl Commit {
    pub fn new(message: impl Into<String>, committer_email: Option<String>) -> Self {
        Self {
            message: message.into(),
            committer_email,
        }
    }
}

/// Position within a cursor-paginated connection.
///
/// A cursor with no `end_cursor` on the first request means "start from the
/// beginning". Pagination stops only once `has_next_page` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Committer emails whose commits are skipped entirely.
///
/// Entries are trimmed and lower-cased at construction; lookups normalise the
/// probe the same way, so `Bot@Example.com ` matches `bot@example.com`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    emails: HashSet<String>,
}

impl ExclusionSet {
    /// Builds the set from a newline-delimited configuration value.
    ///
    /// Blank lines (after trimming) are dropped.
    pub fn from_lines(value: &str) -> Self {
        value.lines().collect()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize(email))
    }

    /// Whether a commit survives filtering. Commits without a committer email
    /// can never be matched and are always retained.
    pub fn retains(&self, commit: &Commit) -> bool {
        match &commit.committer_email {
            Some(email) => !self.contains(email),
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let emails = iter
            .into_iter()
            .map(|s| normalize(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { emails }
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_lines_trims_and_drops_blank_entries() {
        let set = ExclusionSet::from_lines("  bot@example.com\n\n\t\nci@example.com  \r\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("bot@example.com"));
        assert!(set.contains("ci@example.com"));
        assert!(!set.contains(""));
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let set = ExclusionSet::from_lines("Renovate[bot]@Users.NoReply.GitHub.com");
        assert!(set.contains("renovate[bot]@users.noreply.github.com"));
        assert!(set.contains(" RENOVATE[BOT]@USERS.NOREPLY.GITHUB.COM "));
    }

    #[test]
    fn commit_without_email_is_always_retained() {
        let set = ExclusionSet::from_lines("bot@example.com");
        assert!(set.retains(&Commit::new("chore: sync", None)));
        assert!(!set.retains(&Commit::new(
            "chore: sync",
            Some("bot@example.com".to_string())
        )));
    }

    #[test]
    fn empty_value_yields_empty_set() {
        assert!(ExclusionSet::from_lines("").is_empty());
        assert!(ExclusionSet::from_lines("\n \n").is_empty());
    }

    proptest! {
        #[test]
        fn every_listed_email_is_excluded(
            emails in prop::collection::vec("[a-zA-Z0-9._]{1,12}@[a-z]{1,8}\\.[a-z]{2,3}", 0..8)
        ) {
            let set = ExclusionSet::from_lines(&emails.join("\n"));
            for email in &emails {
                prop_assert!(set.contains(email));
                prop_assert!(set.contains(&email.to_uppercase()));
            }
        }
    }
}
