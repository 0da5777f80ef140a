//! File ingestion
//!
//! Reads user-selected files off disk and turns them into self-describing
//! `data:` URLs, the inline payload format used by course files and archive
//! attachments. Oversize files are rejected from their metadata before any
//! content is read.

mod data_url;

use std::future::Future;
use std::path::{Path, PathBuf};

use futures_util::stream::FuturesUnordered;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use data_url::{decode_data_url, encode_data_url, guess_mime};

/// Upload cap used when no configuration overrides it (50 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File too large: {name} is {size} bytes (limit {max} bytes)")]
    TooLarge { name: String, size: u64, max: u64 },

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Coarse classification of a stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[serde(alias = "img")]
    Image,
    #[serde(alias = "doc", alias = "pdf", alias = "txt")]
    Document,
    Other,
}

impl FileKind {
    /// Classify a mime type
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_lowercase();
        if mime.starts_with("image/") {
            FileKind::Image
        } else if mime.starts_with("text/")
            || mime == "application/pdf"
            || mime == "application/json"
            || mime == "application/msword"
            || mime == "application/rtf"
            || mime.starts_with("application/vnd.openxmlformats-officedocument")
            || mime.starts_with("application/vnd.oasis.opendocument")
            || mime.starts_with("application/vnd.ms-")
        {
            FileKind::Document
        } else {
            FileKind::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Document => "document",
            FileKind::Other => "other",
        }
    }
}

/// A file read into memory and encoded as a data URL
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFile {
    /// Original file name (no directory)
    pub name: String,
    /// Size in bytes
    pub size: u64,
    pub mime: String,
    pub data_url: String,
}

impl EncodedFile {
    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Read one file and encode it, rejecting it if it exceeds `max_bytes`
pub async fn read_encoded(path: &Path, max_bytes: u64) -> Result<EncodedFile> {
    let name = display_name(path);
    let metadata = tokio::fs::metadata(path).await?;

    if !metadata.is_file() {
        return Err(IngestError::NotAFile(name));
    }
    if metadata.len() > max_bytes {
        return Err(IngestError::TooLarge {
            name,
            size: metadata.len(),
            max: max_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    let size = bytes.len() as u64;
    // The file may have grown between the metadata check and the read
    if size > max_bytes {
        return Err(IngestError::TooLarge {
            name,
            size,
            max: max_bytes,
        });
    }

    let mime = guess_mime(path).to_string();
    let data_url = encode_data_url(&mime, &bytes);

    Ok(EncodedFile {
        name,
        size,
        mime,
        data_url,
    })
}

/// Start reading every file of a batch at once.
///
/// Poll the returned set as a stream: each item is yielded as soon as its
/// read completes, so results arrive in completion order, not input order.
pub fn read_batch(
    paths: &[PathBuf],
    max_bytes: u64,
) -> FuturesUnordered<impl Future<Output = (PathBuf, Result<EncodedFile>)>> {
    paths
        .iter()
        .cloned()
        .map(|path| async move {
            let result = read_encoded(&path, max_bytes).await;
            (path, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tempfile::TempDir;

    #[test]
    fn test_file_kind_from_mime() {
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Document);
        assert_eq!(FileKind::from_mime("text/plain"), FileKind::Document);
        assert_eq!(
            FileKind::from_mime("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            FileKind::Document
        );
        assert_eq!(FileKind::from_mime("application/zip"), FileKind::Other);
    }

    #[test]
    fn test_file_kind_accepts_legacy_labels() {
        let kinds: Vec<FileKind> = serde_json::from_str(r#"["img","pdf","doc","txt","other"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                FileKind::Image,
                FileKind::Document,
                FileKind::Document,
                FileKind::Document,
                FileKind::Other
            ]
        );
        assert_eq!(serde_json::to_string(&FileKind::Image).unwrap(), "\"image\"");
    }

    #[tokio::test]
    async fn test_read_encoded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let encoded = read_encoded(&path, 1024).await.unwrap();
        assert_eq!(encoded.name, "notes.txt");
        assert_eq!(encoded.size, 5);
        assert_eq!(encoded.mime, "text/plain");
        assert_eq!(encoded.data_url, "data:text/plain;base64,aGVsbG8=");
        assert_eq!(encoded.kind(), FileKind::Document);
    }

    #[tokio::test]
    async fn test_oversize_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        match read_encoded(&path, 1024).await {
            Err(IngestError::TooLarge { name, size, max }) => {
                assert_eq!(name, "big.bin");
                assert_eq!(size, 2048);
                assert_eq!(max, 1024);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_directory_rejected() {
        let temp = TempDir::new().unwrap();
        let result = read_encoded(temp.path(), DEFAULT_MAX_UPLOAD_BYTES).await;
        assert!(matches!(result, Err(IngestError::NotAFile(_))));
    }

    #[tokio::test]
    async fn test_read_batch_reports_every_file() {
        let temp = TempDir::new().unwrap();
        let small = temp.path().join("small.png");
        let large = temp.path().join("large.pdf");
        let missing = temp.path().join("missing.txt");
        std::fs::write(&small, vec![1u8; 10]).unwrap();
        std::fs::write(&large, vec![2u8; 100]).unwrap();

        let results: Vec<(PathBuf, Result<EncodedFile>)> =
            read_batch(&[small.clone(), large.clone(), missing.clone()], 50)
                .collect()
                .await;
        assert_eq!(results.len(), 3);

        for (path, result) in results {
            if path == small {
                assert_eq!(result.unwrap().kind(), FileKind::Image);
            } else if path == large {
                assert!(matches!(result, Err(IngestError::TooLarge { .. })));
            } else {
                assert!(matches!(result, Err(IngestError::Io(_))));
            }
        }
    }
}
