//! Core domain types for the commit linter.
//!
//! Everything here is created fresh for a single invocation and dropped at the
//! end of it; nothing is persisted between runs.

pub mod commit;
pub mod ids;

pub use commit::{Commit, ExclusionSet, PageCursor, PullRequestSet};
pub use ids::{PrNumber, RepoId};
