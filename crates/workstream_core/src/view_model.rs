use crate::{RenderedMessage, TurnState};

/// Shown in place of output until the first snapshot of a run arrives.
pub const THINKING_PLACEHOLDER: &str = "Thinking...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionViewModel {
    pub turn: TurnState,
    pub messages: Vec<RenderedMessage>,
    pub live_preview: Option<String>,
    pub dirty: bool,
}
