//! Error types for the graph_etl crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while moving files to or from a document library.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to list children of '{path}' ({status}): {message}")]
    RemoteList {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Failed to fetch '{name}' ({status}): {message}")]
    RemoteFetch {
        name: String,
        status: u16,
        message: String,
    },

    #[error("Failed to delete '{name}' ({status}): {message}")]
    RemoteDelete {
        name: String,
        status: u16,
        message: String,
    },

    #[error("No item named '{name}' under '{path}'")]
    NotFound { name: String, path: String },

    #[error("Failed to create upload session for '{path}' ({status}): {message}")]
    UploadSession {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Failed to upload '{name}' ({status}): {message}")]
    UploadTransfer {
        name: String,
        status: u16,
        message: String,
    },

    #[error("Local I/O error on {}: {source}", .path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl EtlError {
    /// Wrap an I/O error with the local path it happened on.
    pub(crate) fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EtlError::LocalIo {
            path: path.into(),
            source,
        }
    }

    /// Remote HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            EtlError::RemoteList { status, .. }
            | EtlError::RemoteFetch { status, .. }
            | EtlError::RemoteDelete { status, .. }
            | EtlError::UploadSession { status, .. }
            | EtlError::UploadTransfer { status, .. } => Some(*status),
            EtlError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for EtlError.
pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_remote_error_display() {
        let err = EtlError::RemoteDelete {
            name: "report.csv".to_string(),
            status: 403,
            message: "accessDenied".to_string(),
        };

        let display = err.to_string();
        assert!(display.contains("report.csv"));
        assert!(display.contains("403"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_local_io_keeps_source() {
        let err = EtlError::local_io(
            "out/a.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );

        assert!(err.to_string().contains("out/a.txt"));
        assert!(err.source().is_some());
        assert_eq!(err.status(), None);
    }
}
