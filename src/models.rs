//! Data models for Microsoft Graph and token endpoint responses.

use serde::{Deserialize, Serialize};

/// A child item of a drive folder, as returned by the children listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    /// Present only on files.
    #[serde(default)]
    pub file: Option<FileFacet>,
    /// Present only on folders.
    #[serde(default)]
    pub folder: Option<FolderFacet>,
    /// Short-lived, pre-authenticated URL for the item content.
    #[serde(
        default,
        rename = "@microsoft.graph.downloadUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<String>,
}

impl DriveItem {
    /// Whether the item is a file rather than a folder.
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    #[serde(default)]
    pub child_count: Option<u64>,
}

/// Response from the `children` endpoint.
#[derive(Debug, Deserialize)]
pub struct ChildrenResponse {
    #[serde(default)]
    pub value: Vec<DriveItem>,
}

/// Response from `createUploadSession`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSession {
    pub upload_url: String,
    #[serde(default)]
    pub expiration_date_time: Option<String>,
}

/// Body returned by the token endpoint, success or failure.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Error detail reported by the identity provider.
    pub fn error_detail(&self) -> String {
        match (&self.error, &self.error_description) {
            (Some(error), Some(description)) => format!("{}: {}", error, description),
            (Some(error), None) => error.clone(),
            (None, Some(description)) => description.clone(),
            (None, None) => "no access token in response".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_item_file() {
        let json = r#"{
            "id": "01ABC",
            "name": "report.csv",
            "size": 2048,
            "file": {"mimeType": "text/csv"},
            "@microsoft.graph.downloadUrl": "https://contoso.sharepoint.com/download?x=1"
        }"#;

        let item: DriveItem = serde_json::from_str(json).unwrap();
        assert!(item.is_file());
        assert_eq!(item.size, Some(2048));
        assert_eq!(
            item.download_url.as_deref(),
            Some("https://contoso.sharepoint.com/download?x=1")
        );
    }

    #[test]
    fn test_drive_item_folder() {
        let json = r#"{"id": "01DEF", "name": "archive", "folder": {"childCount": 3}}"#;

        let item: DriveItem = serde_json::from_str(json).unwrap();
        assert!(!item.is_file());
        assert!(item.download_url.is_none());
        assert_eq!(item.folder.and_then(|f| f.child_count), Some(3));
    }

    #[test]
    fn test_token_error_detail() {
        let json = r#"{"error": "invalid_client", "error_description": "AADSTS700027"}"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(response.access_token.is_none());
        assert_eq!(response.error_detail(), "invalid_client: AADSTS700027");
    }
}
