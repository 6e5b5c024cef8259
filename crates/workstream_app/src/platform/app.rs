use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use workstream_core::{update, AppState, Msg, TurnState};
use workstream_logging::{ws_debug, ws_info};

use super::config::{config_path, load_config, AppConfig};
use super::effects::EffectRunner;
use super::render::{write_transcript, TerminalRenderer};
use super::workflow::ScriptedWorkflowFactory;

pub fn run_app() -> Result<()> {
    let path = config_path();
    let config = load_config(&path).with_context(|| format!("loading {}", path.display()))?;
    workstream_logging::initialize(config.log_destination, config.level_filter()?);
    ws_info!("starting {} with config {:?}", config.title, path);

    // Unlocked handle: the job thread's terminal logger shares stdout.
    let mut session = Session::new(&config, io::stdout());
    session.greet()?;

    if let Some(prompt) = config.initial_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
        session.echo_prompt(prompt)?;
        session.handle_line(prompt)?;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading prompt")?;
        if session.handle_line(&line)? == Control::Quit {
            break;
        }
    }

    if config.transcript_json {
        let json = serde_json::to_string_pretty(session.state.transcript())
            .context("serializing transcript")?;
        writeln!(session.out(), "{json}")?;
    }
    ws_info!("exiting after {} messages", session.state.transcript().len());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    Quit,
}

/// One chat session on a terminal-like writer.
pub(crate) struct Session<W: Write> {
    title: String,
    state: AppState,
    runner: EffectRunner,
    renderer: TerminalRenderer<W>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl<W: Write> Session<W> {
    pub fn new(config: &AppConfig, out: W) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let factory = Arc::new(ScriptedWorkflowFactory::new(config.workflow.clone()));
        Self {
            title: config.title.clone(),
            state: AppState::new(config.welcome.clone()),
            runner: EffectRunner::new(factory, config.streamer_settings(), msg_tx.clone()),
            renderer: TerminalRenderer::new(out, msg_tx),
            msg_rx,
        }
    }

    pub fn out(&mut self) -> &mut W {
        self.renderer.out()
    }

    pub fn greet(&mut self) -> io::Result<()> {
        let view = self.state.view();
        let out = self.renderer.out();
        writeln!(out, "### {}", self.title)?;
        write_transcript(out, &view)?;
        writeln!(out, "Enter a prompt (/history, /reset, /quit):")
    }

    fn echo_prompt(&mut self, prompt: &str) -> io::Result<()> {
        writeln!(self.renderer.out(), "> {prompt}")
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Control> {
        match line.trim() {
            "/quit" => return Ok(Control::Quit),
            "/reset" => self.dispatch(Msg::ResetClicked),
            "/history" => {
                let view = self.state.view();
                write_transcript(self.renderer.out(), &view)?;
            }
            _ => self.dispatch(Msg::PromptSubmitted(line.to_string())),
        }
        Ok(Control::Continue)
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let (state, effects) = update(std::mem::take(&mut self.state), msg);
            self.state = state;
            if self.state.consume_dirty() {
                ws_debug!("session turn {:?}", self.state.turn());
            }

            if self.state.turn() == TurnState::Launching {
                if let Some(preview) = self.state.view().live_preview {
                    let _ = writeln!(self.renderer.out(), "{preview}");
                }
            }
            if !effects.is_empty() {
                self.runner.run(effects, &mut self.renderer);
            }
            inbox.extend(self.msg_rx.try_iter());
        }
    }
}
