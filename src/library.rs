//! Addressing and identity parameters for a SharePoint document library.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EtlError, Result};

/// Default Microsoft Graph host.
pub const GRAPH_HOST: &str = "https://graph.microsoft.com";

/// Configuration of a document library reached through the Graph API.
///
/// `base_url` is derived from the Graph host, the site id and the resource
/// (drive) id. It is computed on construction and has no setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLibrary {
    client_id: String,
    site_id: String,
    res_id: String,
    authority: String,
    scope: String,
    graph_host: String,
    base_url: String,
}

/// On-disk shape of a library configuration.
#[derive(Debug, Deserialize)]
struct LibrarySettings {
    client_id: String,
    site_id: String,
    res_id: String,
    authority: String,
    scope: String,
    #[serde(default)]
    graph_host: Option<String>,
}

impl DocumentLibrary {
    /// Create a library configuration addressed on the public Graph host.
    ///
    /// # Arguments
    /// * `client_id` - Application (client) id of the app registration
    /// * `site_id` - Id of the SharePoint site owning the library
    /// * `res_id` - Id of the document library (drive)
    /// * `authority` - Token authority, e.g. `https://login.microsoftonline.com/<tenant>`
    /// * `scope` - Permission scope requested for the token
    pub fn new(
        client_id: impl Into<String>,
        site_id: impl Into<String>,
        res_id: impl Into<String>,
        authority: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        let site_id = site_id.into();
        let res_id = res_id.into();
        let graph_host = GRAPH_HOST.to_string();
        let base_url = base_url(&graph_host, &site_id, &res_id);

        Self {
            client_id: client_id.into(),
            site_id,
            res_id,
            authority: authority.into(),
            scope: scope.into(),
            graph_host,
            base_url,
        }
    }

    /// Address the library on a different Graph host (national clouds, mocks).
    pub fn with_graph_host(mut self, graph_host: impl Into<String>) -> Self {
        self.graph_host = graph_host.into().trim_end_matches('/').to_string();
        self.base_url = base_url(&self.graph_host, &self.site_id, &self.res_id);
        self
    }

    /// Load a library configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EtlError::local_io(path, e))?;
        Self::from_json(&content)
    }

    /// Parse a library configuration from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        let settings: LibrarySettings = serde_json::from_str(content)?;

        for (field, value) in [
            ("client_id", &settings.client_id),
            ("site_id", &settings.site_id),
            ("res_id", &settings.res_id),
            ("authority", &settings.authority),
            ("scope", &settings.scope),
        ] {
            if value.trim().is_empty() {
                return Err(EtlError::Config(format!("{} must not be empty", field)));
            }
        }

        let library = Self::new(
            settings.client_id,
            settings.site_id,
            settings.res_id,
            settings.authority,
            settings.scope,
        );

        Ok(match settings.graph_host {
            Some(host) => library.with_graph_host(host),
            None => library,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn res_id(&self) -> &str {
        &self.res_id
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn graph_host(&self) -> &str {
        &self.graph_host
    }

    /// Base URL of the drive, e.g. `https://graph.microsoft.com/v1.0/sites/<site>/drives/<drive>`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn base_url(graph_host: &str, site_id: &str, res_id: &str) -> String {
    format!("{}/v1.0/sites/{}/drives/{}", graph_host, site_id, res_id)
}
