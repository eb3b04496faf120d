//! graph_etl - Minimal file transfer client for SharePoint document libraries.
//!
//! This library lets ETL jobs move files through the Microsoft Graph API
//! using an app registration authenticated with a certificate:
//! - List the files in a library folder
//! - Fetch (download) every file of a folder into a local directory
//! - Delete a file by name
//! - Upload a local file through an upload session
//!
//! # Example
//!
//! ```no_run
//! use graph_etl::{DocumentLibrary, TransferClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let library = DocumentLibrary::new(
//!         "client-id",
//!         "site-id",
//!         "drive-id",
//!         "https://login.microsoftonline.com/tenant-id",
//!         "https://graph.microsoft.com/.default",
//!     );
//!     let private_key = std::fs::read_to_string("app.key")?;
//!     let client = TransferClient::new(library, "CERT-THUMBPRINT", private_key).await?;
//!
//!     for name in client.list_names("exports/daily").await? {
//!         println!("{}", name);
//!     }
//!
//!     client.fetch("exports/daily", "staging").await?;
//!     client.upload("summary.csv", "exports/processed", "staging").await?;
//!     client.delete("exports/daily", "summary.csv").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod library;
pub mod models;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use auth::{Authenticator, CertificateCredential};
pub use client::TransferClient;
pub use error::{EtlError, Result};
pub use library::DocumentLibrary;
pub use models::DriveItem;
