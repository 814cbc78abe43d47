//! Run feedback as GitHub Actions workflow commands.

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

/// Where notices, warnings, and failures go.
///
/// Methods take `&self` so one reporter can be shared by the whole run.
pub trait Reporter: Send + Sync {
    fn notice(&self, message: &str);
    fn warning(&self, message: &str);
    /// Reports a failure. The process exit code is decided separately.
    fn fail(&self, message: &str);
}

/// Writes `::notice::`, `::warning::` and `::error::` lines.
#[derive(Debug)]
pub struct WorkflowReporter<W> {
    out: Mutex<W>,
}

impl WorkflowReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> WorkflowReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn command(&self, name: &str, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written =
            writeln!(out, "::{name}::{}", escape_data(message)).and_then(|()| out.flush());
        if let Err(e) = written {
            tracing::warn!(command = name, error = %e, "Failed to write workflow command");
        }
    }
}

impl<W: Write + Send> Reporter for WorkflowReporter<W> {
    fn notice(&self, message: &str) {
        self.command("notice", message);
    }

    fn warning(&self, message: &str) {
        self.command("warning", message);
    }

    fn fail(&self, message: &str) {
        self.command("error", message);
    }
}

/// Escapes a workflow command's message so multi-line text survives.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn output(reporter: WorkflowReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn emits_one_command_per_call() {
        let reporter = WorkflowReporter::new(Vec::new());
        reporter.notice("loading configuration");
        reporter.warning("refs/heads/x is associated with too many pull requests.");
        reporter.fail("commitlint failed for pull request #3.");

        assert_eq!(
            output(reporter),
            "::notice::loading configuration\n\
             ::warning::refs/heads/x is associated with too many pull requests.\n\
             ::error::commitlint failed for pull request #3.\n"
        );
    }

    #[test]
    fn multi_line_messages_stay_on_one_line() {
        let reporter = WorkflowReporter::new(Vec::new());
        reporter.notice("⧗   input: x\r\n✖   found 1 problems, 0 warnings");

        assert_eq!(
            output(reporter),
            "::notice::⧗   input: x%0D%0A✖   found 1 problems, 0 warnings\n"
        );
    }

    #[test]
    fn percent_is_escaped_first() {
        assert_eq!(escape_data("100%\n"), "100%25%0A");
    }

    proptest! {
        #[test]
        fn escaped_data_has_no_line_breaks(message in ".*") {
            let escaped = escape_data(&message);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
        }
    }
}
