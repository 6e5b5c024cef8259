use std::fmt;

/// Same representation as `workstream_core::RunId`; the app passes ids across unchanged.
pub type RunId = u64;

/// How the job's execution path ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Failed(String),
    Panicked,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed => write!(f, "completed"),
            RunOutcome::Failed(message) => write!(f, "failed: {message}"),
            RunOutcome::Panicked => write!(f, "panicked"),
        }
    }
}
