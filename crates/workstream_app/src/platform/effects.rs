use std::io::Write;
use std::sync::{mpsc, Arc};

use workstream_core::{Effect, Msg, Notice};
use workstream_engine::{JobFactory, JobLauncher, OutputStreamer, RunOutcome, StreamerSettings};
use workstream_logging::{ws_error, ws_info, ws_warn};

use super::render::TerminalRenderer;

/// Executes effects from the session update against the job engine.
///
/// Results flow back to the session as messages on `msg_tx`.
pub(crate) struct EffectRunner {
    launcher: JobLauncher,
    streamer: OutputStreamer,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        factory: Arc<dyn JobFactory>,
        settings: StreamerSettings,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            launcher: JobLauncher::new(factory),
            streamer: OutputStreamer::new(settings),
            msg_tx,
        }
    }

    pub fn run<W: Write>(&mut self, effects: Vec<Effect>, renderer: &mut TerminalRenderer<W>) {
        for effect in effects {
            match effect {
                Effect::LaunchRun { request } => self.launch(request, renderer),
                Effect::Notify(notice) => notify(renderer.out(), &notice),
            }
        }
    }

    fn launch<W: Write>(&mut self, request: String, renderer: &mut TerminalRenderer<W>) {
        let handle = match self.launcher.start(&request) {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                ws_warn!("launch skipped for empty request");
                let _ = self.msg_tx.send(Msg::LaunchFailed {
                    reason: "empty request".into(),
                });
                return;
            }
            Err(err) => {
                ws_error!("launch failed: {}", err);
                let _ = self.msg_tx.send(Msg::LaunchFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };

        let run_id = handle.run_id();
        ws_info!("LaunchRun run_id={} request_len={}", run_id, request.len());
        let _ = self.msg_tx.send(Msg::RunStarted { run_id, request });

        let report = self.streamer.stream(handle, renderer);
        if !report.final_text.is_empty() && !report.final_text.ends_with('\n') {
            let _ = writeln!(renderer.out());
        }
        if report.outcome != RunOutcome::Completed {
            ws_warn!("run {} {}", run_id, report.outcome);
            let _ = writeln!(renderer.out(), "\n(run {} {})", run_id, report.outcome);
        }
        let _ = self.msg_tx.send(Msg::RunDrained {
            run_id,
            text: report.final_text,
        });
    }
}

fn notify(out: &mut impl Write, notice: &Notice) {
    let text = match notice {
        Notice::Busy => "A run is already in progress; wait for it to finish.".to_string(),
        Notice::LaunchFailed { reason } => format!("Could not start the workflow: {reason}"),
        Notice::ResetIgnored => "Reset is only possible between runs.".to_string(),
    };
    let _ = writeln!(out, "{text}");
}
