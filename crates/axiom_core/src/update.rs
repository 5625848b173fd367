use std::path::Path;

use crate::state::TurnPhase;
use crate::{
    AppState, Effect, Msg, SearchHit, TurnId, NO_RESULTS_TEXT, SEARCH_ERROR_TEXT,
    UNSUPPORTED_FILE_TEXT, UPLOAD_FAILED_TEXT,
};

const UPLOAD_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::QuerySubmitted => {
            // One turn at a time: the draft survives a rejected submit.
            if state.is_busy() || state.input().trim().is_empty() {
                return (state, Vec::new());
            }
            let query = state.take_input();
            let turn = state.begin_turn(query.clone());
            vec![Effect::Search {
                turn,
                query,
                top_k: state.top_k(),
            }]
        }
        Msg::StopClicked => match state.turn() {
            Some(turn) if !turn.cancel_requested => {
                state.request_cancel();
                vec![Effect::CancelTurn { turn: turn.id }]
            }
            _ => Vec::new(),
        },
        Msg::ResetClicked => {
            let effects = state
                .active_turn()
                .map(|turn| vec![Effect::CancelTurn { turn }])
                .unwrap_or_default();
            state.clear_conversation();
            effects
        }
        Msg::SearchSucceeded { turn, results } => {
            if !awaiting_results(&state, turn) {
                return (state, Vec::new());
            }
            if state.cancel_requested() {
                state.end_turn();
                return (state, Vec::new());
            }
            let (text, sources) = select_content(results);
            start_reveal(&mut state, turn, text, sources)
        }
        Msg::SearchFailed { turn, error: _ } => {
            if !awaiting_results(&state, turn) {
                return (state, Vec::new());
            }
            if state.cancel_requested() {
                state.end_turn();
                return (state, Vec::new());
            }
            start_reveal(&mut state, turn, SEARCH_ERROR_TEXT.to_string(), None)
        }
        Msg::RevealProgress {
            message_id,
            visible,
        } => {
            if state.revealing_message() == Some(message_id) && !state.cancel_requested() {
                state.extend_content(message_id, visible);
            }
            Vec::new()
        }
        Msg::RevealFinished { message_id, .. } => {
            if state.revealing_message() == Some(message_id) {
                state.end_turn();
            }
            Vec::new()
        }
        Msg::DocumentsRequested => vec![Effect::LoadDocuments],
        Msg::DocumentsLoaded(documents) => {
            state.set_documents(documents);
            Vec::new()
        }
        // A failed listing keeps whatever the library showed before.
        Msg::DocumentsFailed { .. } => Vec::new(),
        Msg::UploadRequested(path) => {
            if state.is_uploading() {
                return (state, Vec::new());
            }
            if !is_supported_upload(&path) {
                state.set_notice(Some(UNSUPPORTED_FILE_TEXT.to_string()));
                return (state, Vec::new());
            }
            state.set_notice(None);
            state.set_uploading(true);
            vec![Effect::UploadDocument { path }]
        }
        Msg::UploadSucceeded { document } => {
            state.set_uploading(false);
            if !state.documents().contains(&document) {
                let mut documents = state.documents().to_vec();
                documents.push(document);
                state.set_documents(documents);
            }
            vec![Effect::LoadDocuments]
        }
        Msg::UploadFailed { .. } => {
            state.set_uploading(false);
            state.set_notice(Some(UPLOAD_FAILED_TEXT.to_string()));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Whether `path` carries one of the extensions the backend can index.
pub fn is_supported_upload(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            UPLOAD_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

fn awaiting_results(state: &AppState, turn: TurnId) -> bool {
    state
        .turn()
        .is_some_and(|active| active.id == turn && active.phase == TurnPhase::Retrieving)
}

/// Top-ranked hit verbatim; the backend order is trusted and never re-sorted.
fn select_content(results: Vec<SearchHit>) -> (String, Option<Vec<String>>) {
    match results.into_iter().next() {
        Some(hit) => (hit.content, Some(vec![hit.source_id])),
        None => (NO_RESULTS_TEXT.to_string(), None),
    }
}

fn start_reveal(
    state: &mut AppState,
    turn: TurnId,
    text: String,
    sources: Option<Vec<String>>,
) -> Vec<Effect> {
    let message_id = state.open_reveal(sources);
    vec![Effect::Reveal {
        turn,
        message_id,
        text,
    }]
}
