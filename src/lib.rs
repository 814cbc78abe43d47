//! commitlint-pr - Lints the commit messages of the pull requests behind a pushed ref.
//!
//! This library provides the GitHub access, rule engine, and run orchestration
//! for the `commitlint-pr` action binary.

pub mod action;
pub mod github;
pub mod lint;
pub mod orchestrator;
pub mod types;

#[cfg(test)]
mod test_utils;
