use std::path::PathBuf;

use crate::{MessageId, TurnId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a semantic search for the active turn.
    Search {
        turn: TurnId,
        query: String,
        top_k: usize,
    },
    /// Reveal `text` into the assistant message shell `message_id`.
    Reveal {
        turn: TurnId,
        message_id: MessageId,
        text: String,
    },
    /// Trip the cancellation token of `turn`.
    CancelTurn { turn: TurnId },
    LoadDocuments,
    UploadDocument { path: PathBuf },
}
