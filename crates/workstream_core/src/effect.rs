#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LaunchRun { request: String },
    Notify(Notice),
}

/// Feedback for the user that does not belong in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A prompt arrived while a run was still in flight and was rejected.
    Busy,
    /// The job could not be started.
    LaunchFailed { reason: String },
    /// Reset is only honoured between runs.
    ResetIgnored,
}
