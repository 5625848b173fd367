use std::path::Path;

use thiserror::Error;

use crate::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("could not read {path}: {message}")]
    Read { path: String, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// File bytes staged for `POST /documents/upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename);
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    pub async fn read(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| UploadError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Ok(Self::new(display_name(path), bytes))
    }
}

/// Final path component, or the whole path when there is none.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(UploadFile::new("a.PDF", Vec::new()).content_type, "application/pdf");
        assert_eq!(UploadFile::new("notes.md", Vec::new()).content_type, "text/markdown");
        assert_eq!(UploadFile::new("x.txt", Vec::new()).content_type, "text/plain");
        assert_eq!(
            UploadFile::new("blob", Vec::new()).content_type,
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn read_uses_file_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.txt");
        std::fs::write(&path, b"hello").unwrap();

        let file = UploadFile::read(&path).await.unwrap();
        assert_eq!(file.filename, "guide.txt");
        assert_eq!(file.bytes, b"hello");
    }

    #[tokio::test]
    async fn read_reports_missing_file() {
        let err = UploadFile::read(&PathBuf::from("/definitely/not/here.md"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Read { .. }));
    }
}
