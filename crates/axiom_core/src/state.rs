use crate::view_model::{AppViewModel, DocumentRowView, MessageView};
use crate::DocumentEntry;

pub type TurnId = u64;
pub type MessageId = u64;

/// Number of passages requested per query unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 5;
pub const NO_RESULTS_TEXT: &str = "No relevant information found in the provided documents.";
pub const SEARCH_ERROR_TEXT: &str = "An error occurred while processing your request.";
pub const UPLOAD_FAILED_TEXT: &str = "Failed to upload document";
pub const UNSUPPORTED_FILE_TEXT: &str = "Only .pdf, .txt and .md files can be indexed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnPhase {
    Retrieving,
    Revealing { message_id: MessageId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Turn {
    pub(crate) id: TurnId,
    pub(crate) phase: TurnPhase,
    pub(crate) cancel_requested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    turn: Option<Turn>,
    messages: Vec<Message>,
    next_message_id: MessageId,
    next_turn_id: TurnId,
    top_k: usize,
    documents: Vec<DocumentEntry>,
    uploading: bool,
    notice: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_top_k(DEFAULT_TOP_K)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that requests `top_k` passages per query; zero is raised to one.
    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            input: String::new(),
            turn: None,
            messages: Vec::new(),
            next_message_id: 1,
            next_turn_id: 1,
            top_k: top_k.max(1),
            documents: Vec::new(),
            uploading: false,
            notice: None,
            dirty: false,
        }
    }

    pub fn session(&self) -> SessionState {
        if self.turn.is_some() {
            SessionState::Busy
        } else {
            SessionState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.turn.is_some()
    }

    /// Only meaningful while Busy; an Idle session never reports a pending cancel.
    pub fn cancel_requested(&self) -> bool {
        self.turn.is_some_and(|turn| turn.cancel_requested)
    }

    pub fn active_turn(&self) -> Option<TurnId> {
        self.turn.map(|turn| turn.id)
    }

    /// Id of the assistant message currently being revealed.
    pub fn revealing_message(&self) -> Option<MessageId> {
        match self.turn?.phase {
            TurnPhase::Revealing { message_id } => Some(message_id),
            TurnPhase::Retrieving => None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn documents(&self) -> &[DocumentEntry] {
        &self.documents
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session(),
            cancel_requested: self.cancel_requested(),
            thinking: self.is_busy(),
            show_empty_hint: self.messages.is_empty(),
            input: self.input.clone(),
            messages: self
                .messages
                .iter()
                .map(|message| MessageView {
                    id: message.id,
                    role: message.role,
                    content: message.content.clone(),
                    sources: message.sources.clone().unwrap_or_default(),
                })
                .collect(),
            documents: self
                .documents
                .iter()
                .map(|doc| DocumentRowView {
                    id: doc.id,
                    label: document_label(doc),
                })
                .collect(),
            uploading: self.uploading,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn turn(&self) -> Option<Turn> {
        self.turn
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub(crate) fn begin_turn(&mut self, query: String) -> TurnId {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        self.turn = Some(Turn {
            id,
            phase: TurnPhase::Retrieving,
            cancel_requested: false,
        });
        self.push_message(Role::User, query, None);
        id
    }

    pub(crate) fn request_cancel(&mut self) {
        if let Some(turn) = self.turn.as_mut() {
            turn.cancel_requested = true;
            self.dirty = true;
        }
    }

    pub(crate) fn end_turn(&mut self) {
        if self.turn.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Appends an empty assistant shell and moves the turn into its reveal phase.
    pub(crate) fn open_reveal(&mut self, sources: Option<Vec<String>>) -> MessageId {
        let message_id = self.push_message(Role::Assistant, String::new(), sources);
        if let Some(turn) = self.turn.as_mut() {
            turn.phase = TurnPhase::Revealing { message_id };
        }
        message_id
    }

    /// Extends the content of `id`; anything that is not a longer prefix is dropped.
    pub(crate) fn extend_content(&mut self, id: MessageId, visible: String) -> bool {
        let Some(message) = self.messages.iter_mut().find(|message| message.id == id) else {
            return false;
        };
        if visible.len() <= message.content.len() || !visible.starts_with(&message.content) {
            return false;
        }
        message.content = visible;
        self.dirty = true;
        true
    }

    pub(crate) fn clear_conversation(&mut self) {
        self.turn = None;
        self.messages.clear();
        self.input.clear();
        self.notice = None;
        self.mark_dirty();
    }

    pub(crate) fn set_documents(&mut self, documents: Vec<DocumentEntry>) {
        if self.documents != documents {
            self.documents = documents;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_uploading(&mut self, uploading: bool) {
        if self.uploading != uploading {
            self.uploading = uploading;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Option<String>) {
        if self.notice != notice {
            self.notice = notice;
            self.mark_dirty();
        }
    }

    fn push_message(
        &mut self,
        role: Role,
        content: String,
        sources: Option<Vec<String>>,
    ) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(Message {
            id,
            role,
            content,
            sources,
        });
        self.mark_dirty();
        id
    }
}

fn document_label(doc: &DocumentEntry) -> String {
    match doc.filename.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Doc {}", doc.id),
    }
}
