use std::io::{self, Write};
use std::sync::mpsc;

use workstream_core::{format_paragraphs, Msg, Role, SessionViewModel};
use workstream_engine::{Renderer, RunId};
use workstream_logging::ws_warn;

/// Update-in-place rendering on an append-only terminal.
///
/// Snapshots of one run only ever grow, so each render prints just the
/// suffix that is not on screen yet. Every snapshot is also forwarded to the
/// session as `Msg::SnapshotRendered`.
pub(crate) struct TerminalRenderer<W: Write> {
    out: W,
    msg_tx: mpsc::Sender<Msg>,
    run: Option<RunId>,
    shown: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            out,
            msg_tx,
            run: None,
            shown: 0,
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    fn print_suffix(&mut self, snapshot: &str) -> io::Result<()> {
        let suffix = match snapshot.get(self.shown..) {
            Some(suffix) => suffix,
            None => {
                // Not a continuation of what is on screen; start over.
                writeln!(self.out)?;
                snapshot
            }
        };
        self.out.write_all(suffix.as_bytes())?;
        self.out.flush()?;
        self.shown = snapshot.len();
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, run_id: RunId, snapshot: &str) {
        if self.run != Some(run_id) {
            self.run = Some(run_id);
            self.shown = 0;
        }
        if let Err(err) = self.print_suffix(snapshot) {
            ws_warn!("failed to render run {}: {}", run_id, err);
        }
        let _ = self.msg_tx.send(Msg::SnapshotRendered {
            run_id,
            text: snapshot.to_string(),
        });
    }
}

/// Writes the whole chat, one paragraph per output line.
pub(crate) fn write_transcript(out: &mut impl Write, view: &SessionViewModel) -> io::Result<()> {
    for message in &view.messages {
        let label = match message.role {
            Role::Requester => "you",
            Role::Responder => "workflow",
        };
        writeln!(out, "[{}] {}:", message.position, label)?;
        write!(out, "{}", format_paragraphs(&message.content))?;
    }
    if let Some(preview) = &view.live_preview {
        writeln!(out, "[…] {preview}")?;
    }
    out.flush()
}
