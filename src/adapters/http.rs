use crate::domain::model::{ServiceCatalogEntry, ServiceIdentifier};
use crate::domain::ports::{CatalogSource, IconProbe};
use crate::utils::error::{GenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// 以 HEAD 請求檢查 `<base>/<identifier>.<ext>` 是否存在，不讀取內容
#[derive(Debug, Clone)]
pub struct HttpIconProbe {
    client: Client,
    base_url: String,
    extension: String,
    timeout: Option<Duration>,
}

impl HttpIconProbe {
    pub fn new(base_url: &str, extension: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            extension: extension.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn icon_url(&self, identifier: &ServiceIdentifier) -> String {
        format!("{}/{}.{}", self.base_url, identifier, self.extension)
    }
}

#[async_trait]
impl IconProbe for HttpIconProbe {
    async fn probe(&self, identifier: &ServiceIdentifier) -> Result<bool> {
        let url = self.icon_url(identifier);
        tracing::debug!("📡 HEAD {}", url);

        let mut request = self.client.head(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        tracing::debug!("📡 {} -> {}", url, response.status());
        Ok(response.status().is_success())
    }
}

#[derive(Debug, Deserialize)]
struct TreeListing {
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// 讀取 git tree 形式的 JSON 列表，將指定目錄下的規則檔轉成服務清單
#[derive(Debug, Clone)]
pub struct GitTreeCatalog {
    client: Client,
    endpoint: String,
    prefix: String,
    extension: String,
}

impl GitTreeCatalog {
    pub fn new(endpoint: &str, prefix: &str, extension: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            prefix: prefix.trim_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn entry_for(&self, path: &str) -> Option<ServiceCatalogEntry> {
        let relative = if self.prefix.is_empty() {
            path
        } else {
            path.strip_prefix(&self.prefix)?.strip_prefix('/')?
        };

        // 只取目錄下第一層的檔案
        if relative.contains('/') {
            return None;
        }

        let stem = relative.strip_suffix(&format!(".{}", self.extension))?;
        let identifier = ServiceIdentifier::parse(stem).ok()?;
        Some(ServiceCatalogEntry {
            identifier,
            source_path: path.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for GitTreeCatalog {
    async fn fetch(&self) -> Result<Vec<ServiceCatalogEntry>> {
        tracing::debug!("Making catalog request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .header("User-Agent", "svc-configgen")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);
        if !status.is_success() {
            return Err(GenError::CatalogFetch {
                message: format!("{} returned status {}", self.endpoint, status),
            });
        }

        let body = response.text().await?;
        let listing: TreeListing = serde_json::from_str(&body)?;
        if listing.truncated {
            tracing::warn!("⚠️ Catalog listing was truncated by the server");
        }

        let entries: Vec<ServiceCatalogEntry> = listing
            .tree
            .iter()
            .filter(|item| item.kind == "blob")
            .filter_map(|item| self.entry_for(&item.path))
            .collect();

        tracing::info!("📚 Catalog listing contained {} services", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;

    fn id(raw: &str) -> ServiceIdentifier {
        ServiceIdentifier::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_probe_existing_icon() {
        let server = MockServer::start();
        let icon_mock = server.mock(|when, then| {
            when.method(HEAD).path("/icons/github.svg");
            then.status(200);
        });

        let probe = HttpIconProbe::new(&server.url("/icons/"), "svg");
        assert!(probe.probe(&id("github")).await.unwrap());
        icon_mock.assert();
    }

    #[tokio::test]
    async fn test_probe_missing_icon() {
        let server = MockServer::start();
        let icon_mock = server.mock(|when, then| {
            when.method(HEAD).path("/icons/rednote.svg");
            then.status(404);
        });

        let probe = HttpIconProbe::new(&server.url("/icons"), "svg");
        assert!(!probe.probe(&id("rednote")).await.unwrap());
        icon_mock.assert();
    }

    #[tokio::test]
    async fn test_probe_connection_failure_is_error() {
        let probe = HttpIconProbe::new("http://127.0.0.1:1", "svg")
            .with_timeout(Duration::from_secs(2));
        assert!(probe.probe(&id("github")).await.is_err());
    }

    #[tokio::test]
    async fn test_git_tree_catalog_filters_entries() {
        let server = MockServer::start();
        let listing = serde_json::json!({
            "tree": [
                {"path": "rules", "type": "tree"},
                {"path": "rules/github.yaml", "type": "blob"},
                {"path": "rules/xai.yaml", "type": "blob"},
                {"path": "rules/README.md", "type": "blob"},
                {"path": "rules/nested/deep.yaml", "type": "blob"},
                {"path": "other/rednote.yaml", "type": "blob"}
            ],
            "truncated": false
        });

        let tree_mock = server.mock(|when, then| {
            when.method(GET).path("/tree");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(listing);
        });

        let catalog = GitTreeCatalog::new(&server.url("/tree"), "rules/", ".yaml");
        let entries = catalog.fetch().await.unwrap();

        tree_mock.assert();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].identifier, id("github"));
        assert_eq!(entries[0].source_path, "rules/github.yaml");
        assert_eq!(entries[1].identifier, id("xai"));
    }

    #[tokio::test]
    async fn test_git_tree_catalog_http_failure() {
        let server = MockServer::start();
        let tree_mock = server.mock(|when, then| {
            when.method(GET).path("/tree");
            then.status(503);
        });

        let catalog = GitTreeCatalog::new(&server.url("/tree"), "rules", "yaml");
        let err = catalog.fetch().await.unwrap_err();

        tree_mock.assert();
        assert!(matches!(err, GenError::CatalogFetch { .. }));
    }
}
