use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axiom_engine::{
    Document, DocumentMetadata, EngineEvent, EngineHandle, RetrievalClient, RevealOutcome,
    RevealSettings, SearchResult, TransportError, UploadError, UploadFile,
};
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

#[derive(Default)]
struct FakeClient {
    results: Vec<SearchResult>,
    gate: Option<Arc<Notify>>,
    uploads: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl RetrievalClient for FakeClient {
    async fn upload(&self, file: UploadFile) -> Result<Document, TransportError> {
        self.uploads.lock().unwrap().push(file.filename.clone());
        Ok(Document {
            id: 1,
            content: String::from_utf8_lossy(&file.bytes).into_owned(),
            metadata: DocumentMetadata {
                filename: Some(file.filename),
                ..DocumentMetadata::default()
            },
        })
    }

    async fn search(
        &self,
        _query: &str,
        _top_k: usize,
    ) -> Result<Vec<SearchResult>, TransportError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.results.clone())
    }

    async fn list_documents(&self) -> Result<Vec<Document>, TransportError> {
        Ok(Vec::new())
    }
}

fn fast() -> RevealSettings {
    RevealSettings {
        tick: Duration::from_millis(1),
    }
}

fn hit(id: i64, content: &str) -> SearchResult {
    SearchResult {
        id,
        content: content.to_string(),
        metadata: DocumentMetadata::default(),
        similarity: 0.5,
    }
}

#[tokio::test(start_paused = true)]
async fn reveal_events_arrive_in_order_then_finish() {
    let (engine, mut events) = EngineHandle::new(Arc::new(FakeClient::default()), fast());
    engine.reveal(1, 10, "abc".to_string());

    let mut seen = Vec::new();
    while let Some(event) = events.recv().await {
        let done = matches!(event, EngineEvent::RevealFinished { .. });
        seen.push(event);
        if done {
            break;
        }
    }

    assert_eq!(
        seen,
        vec![
            EngineEvent::RevealProgress {
                message_id: 10,
                visible: "a".to_string()
            },
            EngineEvent::RevealProgress {
                message_id: 10,
                visible: "ab".to_string()
            },
            EngineEvent::RevealProgress {
                message_id: 10,
                visible: "abc".to_string()
            },
            EngineEvent::RevealFinished {
                message_id: 10,
                outcome: RevealOutcome::Completed
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_the_active_reveal() {
    let (engine, mut events) = EngineHandle::new(Arc::new(FakeClient::default()), fast());
    engine.reveal(3, 20, "abcdefghijklmnop".to_string());

    let first = events.recv().await;
    assert!(matches!(first, Some(EngineEvent::RevealProgress { .. })));
    engine.cancel(3);

    let mut progress = 1;
    let outcome = loop {
        match events.recv().await {
            Some(EngineEvent::RevealProgress { .. }) => progress += 1,
            Some(EngineEvent::RevealFinished { outcome, .. }) => break outcome,
            other => panic!("unexpected event {other:?}"),
        }
    };
    assert_eq!(outcome, RevealOutcome::Cancelled);
    assert!(progress < 16);
}

#[tokio::test(start_paused = true)]
async fn cancelling_another_turn_has_no_effect() {
    let (engine, mut events) = EngineHandle::new(Arc::new(FakeClient::default()), fast());
    engine.reveal(5, 1, "xyz".to_string());
    engine.cancel(4);

    let outcome = loop {
        if let Some(EngineEvent::RevealFinished { outcome, .. }) = events.recv().await {
            break outcome;
        }
    };
    assert_eq!(outcome, RevealOutcome::Completed);
}

#[tokio::test]
async fn cancelled_search_still_reports_its_result() {
    let gate = Arc::new(Notify::new());
    let client = FakeClient {
        results: vec![hit(7, "Refunds are processed within 14 days."), hit(3, "...")],
        gate: Some(gate.clone()),
        ..FakeClient::default()
    };
    let (engine, mut events) = EngineHandle::new(Arc::new(client), fast());

    engine.search(2, "refund policy".to_string(), 5);
    engine.cancel(2);
    gate.notify_one();

    match events.recv().await {
        Some(EngineEvent::SearchCompleted { turn, result }) => {
            assert_eq!(turn, 2);
            let ids: Vec<_> = result.unwrap().iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![7, 3]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn upload_reads_file_and_reports_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("faq.txt");
    std::fs::write(&path, "Q and A").unwrap();

    let client = Arc::new(FakeClient::default());
    let (engine, mut events) = EngineHandle::new(client.clone(), fast());
    engine.upload(path);

    match events.recv().await {
        Some(EngineEvent::UploadCompleted { filename, result }) => {
            assert_eq!(filename, "faq.txt");
            let doc = result.unwrap();
            assert_eq!(doc.content, "Q and A");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(*client.uploads.lock().unwrap(), vec!["faq.txt".to_string()]);
}

#[tokio::test]
async fn upload_of_missing_file_never_reaches_backend() {
    let client = Arc::new(FakeClient::default());
    let (engine, mut events) = EngineHandle::new(client.clone(), fast());
    engine.upload(PathBuf::from("/no/such/dir/missing.pdf"));

    match events.recv().await {
        Some(EngineEvent::UploadCompleted { filename, result }) => {
            assert_eq!(filename, "missing.pdf");
            assert!(matches!(result, Err(UploadError::Read { .. })));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(client.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn list_documents_reports_listing() {
    let (engine, mut events) = EngineHandle::new(Arc::new(FakeClient::default()), fast());
    engine.list_documents();

    assert_eq!(events.recv().await, Some(EngineEvent::DocumentsListed(Ok(Vec::new()))));
}
