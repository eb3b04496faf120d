//! Transfer client for SharePoint document libraries through Microsoft Graph.

use std::path::Path;
use std::sync::Arc;

use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::auth::{Authenticator, CertificateCredential};
use crate::error::{EtlError, Result};
use crate::library::DocumentLibrary;
use crate::models::{ChildrenResponse, DriveItem, UploadSession};
use crate::paths;
use crate::secret::Secret;

/// Authenticated session against one document library.
///
/// The bearer token is acquired once, when the client is created, and reused
/// for every later call. It is never refreshed: once it expires the remote
/// service answers 401 and the operation fails with that status.
pub struct TransferClient {
    library: Arc<DocumentLibrary>,
    auth: Authenticator,
    token: Secret,
    http: Client,
}

impl std::fmt::Debug for TransferClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferClient")
            .field("library", &self.library)
            .field("auth", &self.auth)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl TransferClient {
    /// Authenticate and create a new TransferClient.
    ///
    /// # Arguments
    /// * `library` - Configuration of the target document library
    /// * `thumbprint` - Hex SHA-1 thumbprint of the registered certificate
    /// * `private_key` - PEM private key matching the certificate
    pub async fn new(
        library: impl Into<Arc<DocumentLibrary>>,
        thumbprint: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self> {
        let library = library.into();
        let credential = CertificateCredential::new(thumbprint, private_key);
        let auth = Authenticator::for_library(&library, credential);
        Self::with_authenticator(library, auth).await
    }

    /// Create a TransferClient using an existing authenticator and its token cache.
    pub async fn with_authenticator(
        library: impl Into<Arc<DocumentLibrary>>,
        auth: Authenticator,
    ) -> Result<Self> {
        let library = library.into();
        let token = auth.acquire_token(library.scope()).await?;

        Ok(Self {
            library,
            auth,
            token: Secret::new(token),
            http: Client::new(),
        })
    }

    /// Get the library configuration.
    pub fn library(&self) -> &DocumentLibrary {
        &self.library
    }

    /// Get the authenticator this client was created with.
    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    /// List the names of the files directly under `remote_path`.
    ///
    /// Folders are excluded. Names are returned in listing order.
    pub async fn list_names(&self, remote_path: &str) -> Result<Vec<String>> {
        let items = self.list_children(remote_path).await?;

        Ok(items
            .into_iter()
            .filter(DriveItem::is_file)
            .map(|item| item.name)
            .collect())
    }

    /// Download every file directly under `remote_path` into `local_path`.
    ///
    /// The local directory is created when missing. Files without a download
    /// URL are skipped. The first failing download aborts the whole batch.
    ///
    /// Returns the names of the files written, in listing order.
    pub async fn fetch(&self, remote_path: &str, local_path: &str) -> Result<Vec<String>> {
        let items = self.list_children(remote_path).await?;
        let local_dir = paths::local_dir(local_path);
        let mut written = Vec::new();

        for item in items.iter().filter(|item| item.is_file()) {
            let Some(download_url) = item.download_url.as_deref() else {
                debug!(name = %item.name, "no download URL, skipping");
                continue;
            };

            let response = self.http.get(download_url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                warn!(name = %item.name, status = status.as_u16(), "download failed");
                return Err(EtlError::RemoteFetch {
                    name: item.name.clone(),
                    status: status.as_u16(),
                    message,
                });
            }

            fs::create_dir_all(&local_dir)
                .await
                .map_err(|e| EtlError::local_io(&local_dir, e))?;

            let destination = local_dir.join(&item.name);
            let bytes = write_body(response, &destination).await?;

            debug!(name = %item.name, bytes, path = %destination.display(), "downloaded");
            written.push(item.name.clone());
        }

        info!(remote_path, count = written.len(), "fetch complete");
        Ok(written)
    }

    /// Delete the item named `file_name` directly under `remote_path`.
    pub async fn delete(&self, remote_path: &str, file_name: &str) -> Result<()> {
        let items = self.list_children(remote_path).await?;

        let item = items
            .iter()
            .find(|item| item.name == file_name)
            .ok_or_else(|| EtlError::NotFound {
                name: file_name.to_string(),
                path: remote_path.to_string(),
            })?;

        let response = self
            .http
            .delete(paths::item_url(self.library.base_url(), &item.id))
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let message = response.text().await.unwrap_or_default();
            return Err(EtlError::RemoteDelete {
                name: file_name.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        info!(remote_path, file_name, id = %item.id, "deleted");
        Ok(())
    }

    /// Upload `local_path/file_name` to `remote_path/file_name`.
    ///
    /// Reads the local file, creates an upload session, then sends the whole
    /// file in a single PUT carrying `Content-Length` and `Content-Range`.
    pub async fn upload(&self, file_name: &str, remote_path: &str, local_path: &str) -> Result<()> {
        let source = paths::local_dir(local_path).join(file_name);
        let target = format!("{}/{}", remote_path.trim_end_matches('/'), file_name);

        // A missing or empty file fails before a server-side session is opened.
        let content = read_upload(&source).await?;
        let file_size = content.len() as u64;

        let session_url =
            paths::upload_session_url(self.library.base_url(), remote_path, file_name);

        let response = self
            .http
            .post(&session_url)
            .bearer_auth(self.token.as_str())
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await;
        let session = match body {
            Ok(body) if status.is_success() => serde_json::from_str::<UploadSession>(&body)
                .map_err(|e| format!("malformed upload session: {}", e)),
            Ok(body) => Err(body),
            Err(e) => Err(format!("failed to read response: {}", e)),
        };
        let session = session.map_err(|message| EtlError::UploadSession {
            path: target,
            status: status.as_u16(),
            message,
        })?;

        // Upload URLs are pre-authenticated; a bearer token must not be sent.
        let response = self
            .http
            .put(&session.upload_url)
            .header("Content-Length", file_size.to_string())
            .header("Content-Range", content_range(file_size))
            .body(content)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let message = response.text().await.unwrap_or_default();
            return Err(EtlError::UploadTransfer {
                name: file_name.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        info!(remote_path, file_name, bytes = file_size, "uploaded");
        Ok(())
    }

    /// List the direct children of `remote_path`.
    async fn list_children(&self, remote_path: &str) -> Result<Vec<DriveItem>> {
        let url = paths::children_url(self.library.base_url(), remote_path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await;
        let listing = match body {
            Ok(body) if status.is_success() => serde_json::from_str::<ChildrenResponse>(&body)
                .map_err(|e| format!("malformed listing: {}", e)),
            Ok(body) => Err(body),
            Err(e) => Err(format!("failed to read response: {}", e)),
        };
        let listing = listing.map_err(|message| EtlError::RemoteList {
            path: remote_path.to_string(),
            status: status.as_u16(),
            message,
        })?;
        debug!(remote_path, count = listing.value.len(), "listed children");
        Ok(listing.value)
    }
}

/// `Content-Range` value covering a whole file of `size` bytes.
fn content_range(size: u64) -> String {
    format!("bytes 0-{}/{}", size - 1, size)
}

/// Read a local file for upload. Empty files cannot be described by a range.
async fn read_upload(path: &Path) -> Result<Vec<u8>> {
    let content = fs::read(path)
        .await
        .map_err(|e| EtlError::local_io(path, e))?;

    if content.is_empty() {
        return Err(EtlError::local_io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "cannot upload an empty file"),
        ));
    }

    Ok(content)
}

/// Stream a response body to `destination`, returning the byte count.
async fn write_body(response: Response, destination: &Path) -> Result<u64> {
    let mut file = File::create(destination)
        .await
        .map_err(|e| EtlError::local_io(destination, e))?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| EtlError::local_io(destination, e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| EtlError::local_io(destination, e))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_range() {
        assert_eq!(content_range(10), "bytes 0-9/10");
        assert_eq!(content_range(1), "bytes 0-0/1");
    }

    #[tokio::test]
    async fn test_read_upload_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, b"").unwrap();

        let err = read_upload(&path).await.unwrap_err();
        match err {
            EtlError::LocalIo { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_upload_missing_file() {
        let err = read_upload(Path::new("/nonexistent/data.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, EtlError::LocalIo { .. }));
    }
}
