//! Axiom core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{DocumentEntry, Msg, RevealOutcome, SearchHit};
pub use state::{
    AppState, Message, MessageId, Role, SessionState, TurnId, DEFAULT_TOP_K, NO_RESULTS_TEXT,
    SEARCH_ERROR_TEXT, UNSUPPORTED_FILE_TEXT, UPLOAD_FAILED_TEXT,
};
pub use update::{is_supported_upload, update};
pub use view_model::{AppViewModel, DocumentRowView, MessageView};
