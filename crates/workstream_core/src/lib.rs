//! Workstream core: pure chat-session state machine and view-model helpers.
mod effect;
mod format;
mod msg;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::{Effect, Notice};
pub use format::format_paragraphs;
pub use msg::Msg;
pub use state::{AppState, RunId, TurnState};
pub use transcript::{RenderedMessage, Role, Transcript};
pub use update::update;
pub use view_model::{SessionViewModel, THINKING_PLACEHOLDER};
