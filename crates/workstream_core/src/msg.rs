use crate::RunId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a prompt.
    PromptSubmitted(String),
    /// The launcher accepted the request and the job is running.
    RunStarted { run_id: RunId, request: String },
    /// The launcher refused or failed to start the job.
    LaunchFailed { reason: String },
    /// Streamer rendered an intermediate snapshot.
    SnapshotRendered { run_id: RunId, text: String },
    /// Streamer drained the final snapshot after the job finished.
    RunDrained { run_id: RunId, text: String },
    /// User asked to clear the chat.
    ResetClicked,
    /// Leaves the session untouched.
    NoOp,
}
