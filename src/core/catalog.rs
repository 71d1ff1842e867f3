use crate::domain::model::{ServiceCatalogEntry, ServiceIdentifier};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 已取得的服務清單，重新抓取時整份替換
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ServiceCatalogEntry>,
}

impl Catalog {
    pub fn new(mut entries: Vec<ServiceCatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        entries.dedup_by(|a, b| a.identifier == b.identifier);
        Self { entries }
    }

    pub async fn load<C: CatalogSource + ?Sized>(source: &C) -> Result<Self> {
        let entries = source.fetch().await?;
        tracing::info!("📚 Catalog loaded with {} services", entries.len());
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[ServiceCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identifier: &ServiceIdentifier) -> bool {
        self.entries
            .binary_search_by(|e| e.identifier.cmp(identifier))
            .is_ok()
    }

    /// 不分大小寫的子字串搜尋；空字串回傳全部
    pub fn search(&self, query: &str) -> Vec<&ServiceCatalogEntry> {
        let needle = query.trim().to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.identifier.as_str().contains(&needle))
            .collect()
    }
}

/// 固定清單，供離線或測試使用
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<ServiceCatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<ServiceCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn from_identifiers(identifiers: &[ServiceIdentifier]) -> Self {
        let entries = identifiers
            .iter()
            .map(|identifier| ServiceCatalogEntry {
                identifier: identifier.clone(),
                source_path: String::new(),
            })
            .collect();
        Self { entries }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(&self) -> Result<Vec<ServiceCatalogEntry>> {
        Ok(self.entries.clone())
    }
}
