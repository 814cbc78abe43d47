//! The GitHub Actions side of a run: inputs, the triggering event, and
//! workflow-command feedback.

mod context;
mod event;
mod inputs;
mod reporter;

pub use context::ActionContext;
pub use event::{EventError, PushEvent, read_payload};
pub use inputs::{ActionInputs, DEFAULT_MAX_PULL_REQUESTS, InputError, input_var};
pub use reporter::{Reporter, WorkflowReporter, escape_data};
