//! Workstream engine: background job execution and output streaming.
mod job;
mod launcher;
mod sink;
mod streamer;
mod types;

pub use job::{Job, JobError, JobFactory};
pub use launcher::{JobHandle, JobLauncher, LaunchError};
pub use sink::OutputSink;
pub use streamer::{
    OutputStreamer, Renderer, StreamPhase, StreamReport, StreamerSettings, MIN_POLL_INTERVAL,
};
pub use types::{RunId, RunOutcome};
