use crate::transcript::{Role, Transcript};
use crate::view_model::{SessionViewModel, THINKING_PLACEHOLDER};

/// Same representation as `workstream_engine::RunId`; the app passes ids across unchanged.
pub type RunId = u64;

/// Where the session is in the request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    /// A launch was requested; waiting for the launcher's answer.
    Launching,
    Streaming { run_id: RunId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    welcome: String,
    transcript: Transcript,
    turn: TurnState,
    live_preview: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new(welcome: impl Into<String>) -> Self {
        let welcome = welcome.into();
        let mut transcript = Transcript::new();
        transcript.push(Role::Responder, welcome.clone());
        Self {
            welcome,
            transcript,
            turn: TurnState::Idle,
            live_preview: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> SessionViewModel {
        let live_preview = match self.turn {
            TurnState::Idle => None,
            TurnState::Launching | TurnState::Streaming { .. } => Some(
                self.live_preview
                    .clone()
                    .unwrap_or_else(|| THINKING_PLACEHOLDER.to_string()),
            ),
        };
        SessionViewModel {
            turn: self.turn,
            messages: self.transcript.messages().to_vec(),
            live_preview,
            dirty: self.dirty,
        }
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_launch(&mut self) {
        self.turn = TurnState::Launching;
        self.live_preview = None;
        self.dirty = true;
    }

    pub(crate) fn start_streaming(&mut self, run_id: RunId, request: String) {
        self.transcript.push(Role::Requester, request);
        self.turn = TurnState::Streaming { run_id };
        self.live_preview = None;
        self.dirty = true;
    }

    pub(crate) fn abort_launch(&mut self) {
        self.turn = TurnState::Idle;
        self.live_preview = None;
        self.dirty = true;
    }

    pub(crate) fn set_preview(&mut self, text: String) {
        if self.live_preview.as_deref() != Some(text.as_str()) {
            self.live_preview = Some(text);
            self.dirty = true;
        }
    }

    pub(crate) fn finish_run(&mut self, text: String) {
        self.transcript.push(Role::Responder, text);
        self.turn = TurnState::Idle;
        self.live_preview = None;
        self.dirty = true;
    }

    pub(crate) fn reset(&mut self) {
        let mut transcript = Transcript::new();
        transcript.push(Role::Responder, self.welcome.clone());
        self.transcript = transcript;
        self.dirty = true;
    }
}
