use std::thread;
use std::time::Duration;

use workstream_logging::{ws_debug, ws_info, ws_trace};

use crate::{JobHandle, RunId, RunOutcome};

/// Floor for the poll interval; the loop always sleeps between polls.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamerSettings {
    /// Delay between polls. Shorter is more responsive, longer polls less.
    pub poll_interval: Duration,
}

impl Default for StreamerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl StreamerSettings {
    pub fn effective_interval(&self) -> Duration {
        self.poll_interval.max(MIN_POLL_INTERVAL)
    }
}

/// Displays snapshots of a run, each one replacing the previous.
pub trait Renderer {
    fn render(&mut self, run_id: RunId, snapshot: &str);
}

impl<F> Renderer for F
where
    F: FnMut(RunId, &str),
{
    fn render(&mut self, run_id: RunId, snapshot: &str) {
        self(run_id, snapshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamPhase {
    #[default]
    Idle,
    Polling,
    Draining,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReport {
    pub run_id: RunId,
    /// Everything the job wrote, taken after it was seen finished.
    pub final_text: String,
    /// Snapshots rendered while the job was still running.
    pub polls: usize,
    pub outcome: RunOutcome,
}

/// Polls a running job at a fixed cadence and drains its final output.
#[derive(Debug, Default)]
pub struct OutputStreamer {
    settings: StreamerSettings,
    phase: StreamPhase,
}

impl OutputStreamer {
    pub fn new(settings: StreamerSettings) -> Self {
        Self {
            settings,
            phase: StreamPhase::Idle,
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub fn settings(&self) -> StreamerSettings {
        self.settings
    }

    /// Streams one run to `renderer` until the job has finished.
    ///
    /// While the job is alive every tick renders a fresh snapshot and then
    /// sleeps. Once liveness is seen false one more snapshot is taken and
    /// rendered, so output written between the last poll and the job's return
    /// is never lost. Blocks the calling thread for the length of the run.
    pub fn stream(&mut self, handle: JobHandle, renderer: &mut dyn Renderer) -> StreamReport {
        let run_id = handle.run_id();
        let interval = self.settings.effective_interval();
        self.reset();
        self.transition(run_id, StreamPhase::Polling);

        let mut polls = 0;
        let mut last_len = 0;
        while handle.is_running() {
            let snapshot = handle.snapshot();
            debug_assert!(
                snapshot.len() >= last_len,
                "output shrank from {last_len} to {} bytes",
                snapshot.len()
            );
            last_len = snapshot.len();
            renderer.render(run_id, &snapshot);
            polls += 1;
            ws_trace!("run {} poll {} len={}", run_id, polls, last_len);
            thread::sleep(interval);
        }

        self.transition(run_id, StreamPhase::Draining);
        let final_text = handle.snapshot();
        renderer.render(run_id, &final_text);
        let outcome = handle.join();
        self.transition(run_id, StreamPhase::Done);
        ws_info!(
            "run {} {} after {} polls, output_len={}",
            run_id,
            outcome,
            polls,
            final_text.len()
        );

        StreamReport {
            run_id,
            final_text,
            polls,
            outcome,
        }
    }

    /// Returns a finished streamer to `Idle` so it can take the next run.
    pub fn reset(&mut self) {
        if self.phase == StreamPhase::Done {
            ws_debug!("stream {:?} -> {:?}", self.phase, StreamPhase::Idle);
            self.phase = StreamPhase::Idle;
        }
    }

    fn transition(&mut self, run_id: RunId, next: StreamPhase) {
        debug_assert!(
            next != StreamPhase::Polling || self.phase == StreamPhase::Idle,
            "polling entered from {:?}",
            self.phase
        );
        ws_debug!("run {} stream {:?} -> {:?}", run_id, self.phase, next);
        self.phase = next;
    }
}
