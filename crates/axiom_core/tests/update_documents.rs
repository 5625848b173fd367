use std::path::PathBuf;

use axiom_core::{
    is_supported_upload, update, AppState, DocumentEntry, Effect, Msg, UNSUPPORTED_FILE_TEXT,
    UPLOAD_FAILED_TEXT,
};
use pretty_assertions::assert_eq;

fn entry(id: i64, filename: Option<&str>) -> DocumentEntry {
    DocumentEntry {
        id,
        filename: filename.map(ToOwned::to_owned),
    }
}

#[test]
fn documents_requested_emits_load_effect() {
    let (_, effects) = update(AppState::new(), Msg::DocumentsRequested);
    assert_eq!(effects, vec![Effect::LoadDocuments]);
}

#[test]
fn loaded_documents_are_labelled_by_filename_or_id() {
    let (mut state, _) = update(
        AppState::new(),
        Msg::DocumentsLoaded(vec![entry(1, Some("handbook.pdf")), entry(2, None)]),
    );

    let labels: Vec<_> = state
        .view()
        .documents
        .into_iter()
        .map(|row| row.label)
        .collect();
    assert_eq!(labels, vec!["handbook.pdf".to_string(), "Doc 2".to_string()]);
    assert!(state.consume_dirty());
}

#[test]
fn failed_listing_keeps_previous_documents() {
    let (state, _) = update(
        AppState::new(),
        Msg::DocumentsLoaded(vec![entry(1, Some("a.txt"))]),
    );
    let (state, effects) = update(
        state,
        Msg::DocumentsFailed {
            error: "http status 500".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.documents(), &[entry(1, Some("a.txt"))]);
}

#[test]
fn upload_flow_refreshes_library_on_success() {
    let path = PathBuf::from("/tmp/policy.PDF");
    let (state, effects) = update(AppState::new(), Msg::UploadRequested(path.clone()));
    assert!(state.is_uploading());
    assert_eq!(effects, vec![Effect::UploadDocument { path }]);

    // Only one upload in flight at a time.
    let (state, effects) = update(state, Msg::UploadRequested(PathBuf::from("other.md")));
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::UploadSucceeded {
            document: entry(5, Some("policy.PDF")),
        },
    );
    assert!(!state.is_uploading());
    assert_eq!(effects, vec![Effect::LoadDocuments]);
    assert_eq!(state.documents(), &[entry(5, Some("policy.PDF"))]);
    assert_eq!(state.notice(), None);
}

#[test]
fn upload_failure_sets_notice() {
    let (state, _) = update(AppState::new(), Msg::UploadRequested(PathBuf::from("a.txt")));
    let (state, effects) = update(
        state,
        Msg::UploadFailed {
            error: "http status 413".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.is_uploading());
    assert_eq!(state.notice(), Some(UPLOAD_FAILED_TEXT));
    assert_eq!(state.view().notice.as_deref(), Some(UPLOAD_FAILED_TEXT));
}

#[test]
fn unsupported_files_are_rejected_locally() {
    let (state, effects) = update(AppState::new(), Msg::UploadRequested(PathBuf::from("a.docx")));
    assert!(effects.is_empty());
    assert!(!state.is_uploading());
    assert_eq!(state.notice(), Some(UNSUPPORTED_FILE_TEXT));

    assert!(is_supported_upload(&PathBuf::from("notes.md")));
    assert!(is_supported_upload(&PathBuf::from("NOTES.TXT")));
    assert!(!is_supported_upload(&PathBuf::from("archive")));
}

#[test]
fn uploads_do_not_touch_the_turn_state() {
    let (state, _) = update(AppState::new(), Msg::InputChanged("q".to_string()));
    let (state, _) = update(state, Msg::QuerySubmitted);
    let (state, effects) = update(state, Msg::UploadRequested(PathBuf::from("a.md")));

    assert!(state.is_busy());
    assert_eq!(
        effects,
        vec![Effect::UploadDocument {
            path: PathBuf::from("a.md")
        }]
    );
}
