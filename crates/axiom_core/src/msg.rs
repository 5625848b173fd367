use std::path::PathBuf;

use crate::{MessageId, TurnId};

/// One ranked search hit, as handed to the controller by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub content: String,
    pub similarity: f64,
    pub source_id: String,
}

/// An indexed document as shown in the library list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub id: i64,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the query input box.
    InputChanged(String),
    /// User submitted the current input as a query.
    QuerySubmitted,
    /// User clicked Stop.
    StopClicked,
    /// User asked for a fresh conversation.
    ResetClicked,
    /// Engine returned ranked results for a turn.
    SearchSucceeded {
        turn: TurnId,
        results: Vec<SearchHit>,
    },
    /// Engine could not obtain results for a turn.
    SearchFailed { turn: TurnId, error: String },
    /// Reveal engine emitted a longer visible prefix.
    RevealProgress {
        message_id: MessageId,
        visible: String,
    },
    /// Reveal engine stopped, either at the end of the text or on cancellation.
    RevealFinished {
        message_id: MessageId,
        outcome: RevealOutcome,
    },
    /// Library view wants a fresh document listing.
    DocumentsRequested,
    DocumentsLoaded(Vec<DocumentEntry>),
    DocumentsFailed { error: String },
    /// User picked a file to index.
    UploadRequested(PathBuf),
    UploadSucceeded { document: DocumentEntry },
    UploadFailed { error: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
