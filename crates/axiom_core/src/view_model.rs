use crate::{MessageId, Role, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub cancel_requested: bool,
    /// Drives the "Thinking..." indicator.
    pub thinking: bool,
    /// True while the conversation is empty.
    pub show_empty_hint: bool,
    pub input: String,
    pub messages: Vec<MessageView>,
    pub documents: Vec<DocumentRowView>,
    pub uploading: bool,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRowView {
    pub id: i64,
    pub label: String,
}
