use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use workstream_logging::{ws_debug, ws_error, ws_info, ws_warn};

use crate::{JobError, JobFactory, OutputSink, RunId, RunOutcome};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("run {active} is still in progress")]
    Busy { active: RunId },
    #[error("failed to construct job: {0}")]
    Construction(#[source] JobError),
    #[error("failed to build job runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn job thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Starts jobs on their own thread, one run at a time.
pub struct JobLauncher {
    factory: Arc<dyn JobFactory>,
    next_run_id: RunId,
    active: Option<(RunId, Arc<AtomicBool>)>,
}

impl JobLauncher {
    pub fn new(factory: Arc<dyn JobFactory>) -> Self {
        Self {
            factory,
            next_run_id: 1,
            active: None,
        }
    }

    /// Launches one run for `request`.
    ///
    /// Returns `Ok(None)` for an empty request without building anything.
    /// Construction, runtime and thread errors are returned before the job
    /// gets a chance to execute. A request made while this launcher's previous
    /// run is still alive is rejected with [`LaunchError::Busy`].
    pub fn start(&mut self, request: &str) -> Result<Option<JobHandle>, LaunchError> {
        if request.trim().is_empty() {
            ws_debug!("empty request; nothing to launch");
            return Ok(None);
        }
        if let Some((active, alive)) = &self.active {
            if alive.load(Ordering::Acquire) {
                ws_warn!("rejecting request while run {} is active", active);
                return Err(LaunchError::Busy { active: *active });
            }
        }

        let job = self.factory.build().map_err(LaunchError::Construction)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(LaunchError::Runtime)?;

        let run_id = self.next_run_id;
        let sink = OutputSink::new();
        let alive = Arc::new(AtomicBool::new(true));
        let guard = LivenessGuard(alive.clone());
        let job_sink = sink.clone();
        let request = request.to_owned();

        let join = thread::Builder::new()
            .name(format!("job-run-{run_id}"))
            .spawn(move || {
                let _guard = guard;
                workstream_logging::set_run_context(run_id);
                ws_info!("job started request_len={}", request.len());
                let result = runtime.block_on(job.run(&request, &job_sink));
                // Tasks the job left behind must not write after liveness drops.
                drop(runtime);
                match &result {
                    Ok(()) => ws_info!("job finished output_len={}", job_sink.len()),
                    Err(err) => ws_error!("{}", err),
                }
                result
            })
            .map_err(LaunchError::Spawn)?;

        self.next_run_id += 1;
        self.active = Some((run_id, alive.clone()));
        ws_info!("launched run {}", run_id);

        Ok(Some(JobHandle {
            run_id,
            sink,
            alive,
            join,
        }))
    }
}

/// Clears the liveness flag when the job thread ends, however it ends.
struct LivenessGuard(Arc<AtomicBool>);

impl Drop for LivenessGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Read side of one run: liveness, snapshots of its output, and its result.
#[derive(Debug)]
pub struct JobHandle {
    run_id: RunId,
    sink: OutputSink,
    alive: Arc<AtomicBool>,
    join: JoinHandle<Result<(), JobError>>,
}

impl JobHandle {
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// True from launch until the job's function returns or unwinds.
    pub fn is_running(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> String {
        self.sink.snapshot()
    }

    /// Bytes written so far, without copying them.
    pub fn output_len(&self) -> usize {
        self.sink.len()
    }

    /// Waits for the job thread and reports how it ended.
    pub fn join(self) -> RunOutcome {
        match self.join.join() {
            Ok(Ok(())) => RunOutcome::Completed,
            Ok(Err(err)) => RunOutcome::Failed(err.to_string()),
            Err(_) => RunOutcome::Panicked,
        }
    }
}
