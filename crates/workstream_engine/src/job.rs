use thiserror::Error;

use crate::OutputSink;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("job could not be constructed: {0}")]
    Construction(String),
    #[error("job failed: {0}")]
    Failed(String),
}

/// The long-running computation behind a request.
///
/// Output goes to `sink` only; returning from `run` is the completion signal.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    async fn run(&self, request: &str, sink: &OutputSink) -> Result<(), JobError>;
}

/// Builds a fresh job for each run.
pub trait JobFactory: Send + Sync {
    fn build(&self) -> Result<Box<dyn Job>, JobError>;
}

impl<F> JobFactory for F
where
    F: Fn() -> Result<Box<dyn Job>, JobError> + Send + Sync,
{
    fn build(&self) -> Result<Box<dyn Job>, JobError> {
        self()
    }
}
