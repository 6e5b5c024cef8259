use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Requester,
    Responder,
}

/// One finished turn in the chat. Never mutated after it is pushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub role: Role,
    pub content: String,
    pub position: usize,
}

/// Ordered, append-only list of chat messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<RenderedMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns the position it was stored at.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> usize {
        let position = self.messages.len();
        self.messages.push(RenderedMessage {
            role,
            content: content.into(),
            position,
        });
        position
    }

    pub fn messages(&self) -> &[RenderedMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&RenderedMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
