use crate::domain::model::ServiceIdentifier;
use crate::domain::ports::IconProbe;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 圖示存在與否的快取，以識別碼為鍵。
/// 鎖只在讀寫 map 時持有，不會跨越 await。
#[derive(Debug, Default)]
pub struct IconCache {
    entries: Mutex<HashMap<ServiceIdentifier, bool>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &ServiceIdentifier) -> Option<bool> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(identifier).copied())
    }

    /// 同一識別碼的併發寫入結果相同，後寫入者覆蓋即可
    pub fn insert(&self, identifier: ServiceIdentifier, exists: bool) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(identifier, exists);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct IconOracle<P: IconProbe> {
    probe: P,
    cache: Arc<IconCache>,
}

impl<P: IconProbe> IconOracle<P> {
    pub fn new(probe: P, cache: Arc<IconCache>) -> Self {
        Self { probe, cache }
    }

    pub fn cache(&self) -> &Arc<IconCache> {
        &self.cache
    }

    /// 已快取時直接回傳，不會再次探測
    pub fn cached(&self, identifier: &ServiceIdentifier) -> Option<bool> {
        self.cache.get(identifier)
    }

    pub async fn exists(&self, identifier: &ServiceIdentifier) -> bool {
        if let Some(hit) = self.cache.get(identifier) {
            tracing::debug!("🗂️ Icon cache hit for {}: {}", identifier, hit);
            return hit;
        }

        let exists = match self.probe.probe(identifier).await {
            Ok(exists) => exists,
            Err(e) => {
                // 探測失敗一律視為沒有圖示，輸出完整網域
                tracing::warn!("⚠️ Icon probe for {} failed, assuming absent: {}", identifier, e);
                false
            }
        };

        self.cache.insert(identifier.clone(), exists);
        exists
    }
}
