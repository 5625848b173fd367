use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Document, SearchResult, TransportError, TransportFailure, UploadFile};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Endpoint root; request paths are appended to it.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` lets a hung backend call hang the turn.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Backend contract used by the session: single-shot unary calls, no retries.
#[async_trait::async_trait]
pub trait RetrievalClient: Send + Sync {
    /// Submits a file for indexing. Every call creates a new document.
    async fn upload(&self, file: UploadFile) -> Result<Document, TransportError>;

    /// Ranked passages for `query`, in the backend's own order.
    async fn search(&self, query: &str, top_k: usize)
        -> Result<Vec<SearchResult>, TransportError>;

    async fn list_documents(&self) -> Result<Vec<Document>, TransportError>;
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: usize,
}

#[derive(Debug, Clone)]
pub struct HttpRetrievalClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRetrievalClient {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        url::Url::parse(&settings.base_url)
            .map_err(|err| TransportError::new(TransportFailure::InvalidUrl, err.to_string()))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(TransportFailure::Network, err.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl RetrievalClient for HttpRetrievalClient {
    async fn upload(&self, file: UploadFile) -> Result<Document, TransportError> {
        let url = self.endpoint("documents/upload");
        engine_debug!(
            "POST {} filename={} bytes={}",
            url,
            file.filename,
            file.bytes.len()
        );
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(file.content_type)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // Upload failures carry the backend's diagnostic body.
            let body = response.text().await.unwrap_or_default();
            engine_warn!("upload rejected status={} body={}", status.as_u16(), body);
            return Err(TransportError::new(
                TransportFailure::HttpStatus(status.as_u16()),
                body,
            ));
        }
        decode_json(response).await
    }

    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, TransportError> {
        let url = self.endpoint("search");
        engine_debug!("POST {} query_len={} top_k={}", url, query.len(), top_k);
        let response = self
            .client
            .post(url)
            .json(&SearchRequest { query, top_k })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)?;
        decode_json(response).await
    }

    async fn list_documents(&self) -> Result<Vec<Document>, TransportError> {
        let url = self.endpoint("documents");
        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)?;
        decode_json(response).await
    }
}

fn ensure_success(response: &reqwest::Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(TransportError::new(
            TransportFailure::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| TransportError::new(TransportFailure::InvalidBody, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportFailure::Timeout, err.to_string());
    }
    if err.is_builder() {
        return TransportError::new(TransportFailure::InvalidUrl, err.to_string());
    }
    TransportError::new(TransportFailure::Network, err.to_string())
}
