use crate::core::inference::InferenceEngine;
use crate::core::serializer::serialize_all;
use crate::domain::model::{ServiceConfigRecord, ServiceIdentifier};
use crate::domain::ports::IconProbe;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_CONCURRENT_PROBES: usize = 8;

/// 一次套用的產生結果，`generation` 為發出時取得的序號
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBatch {
    pub generation: u64,
    pub selection: Vec<ServiceIdentifier>,
    pub records: Vec<ServiceConfigRecord>,
    pub fragment: String,
}

/// 每次選取變動執行一批推論。
/// 只有序號仍是最新發出者的批次會被套用，較舊的結果直接丟棄。
pub struct BatchCoordinator<P: IconProbe> {
    engine: InferenceEngine<P>,
    concurrency: usize,
    issued: AtomicU64,
    rendered: watch::Sender<Option<RenderedBatch>>,
}

impl<P: IconProbe> BatchCoordinator<P> {
    pub fn new(engine: InferenceEngine<P>, concurrency: usize) -> Self {
        let (rendered, _rx) = watch::channel(None);
        Self {
            engine,
            concurrency: concurrency.max(1),
            issued: AtomicU64::new(0),
            rendered,
        }
    }

    pub fn engine(&self) -> &InferenceEngine<P> {
        &self.engine
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<RenderedBatch>> {
        self.rendered.subscribe()
    }

    pub fn latest(&self) -> Option<RenderedBatch> {
        self.rendered.borrow().clone()
    }

    /// 併發推論，但結果依選取順序排列，與完成順序無關
    pub async fn infer_all(&self, selection: &[ServiceIdentifier]) -> Vec<ServiceConfigRecord> {
        let pending: Vec<_> = selection
            .iter()
            .map(|identifier| self.engine.infer(identifier))
            .collect();

        stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// 發出新批次並取得序號，之後較早發出的批次都會被視為過期
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn run_batch(&self, selection: Vec<ServiceIdentifier>) -> Option<RenderedBatch> {
        let generation = self.issue();
        self.run_issued(generation, selection).await
    }

    /// 執行已由 `issue` 取得序號的批次
    pub async fn run_issued(
        &self,
        generation: u64,
        selection: Vec<ServiceIdentifier>,
    ) -> Option<RenderedBatch> {
        tracing::debug!(
            "🚀 Batch #{} running for {} services",
            generation,
            selection.len()
        );

        let records = self.infer_all(&selection).await;

        let batch = RenderedBatch {
            generation,
            fragment: serialize_all(&records),
            records,
            selection,
        };

        let applied = self.rendered.send_if_modified(|current| {
            let newest_issued = self.issued.load(Ordering::SeqCst) == generation;
            let newer_than_current = current
                .as_ref()
                .map_or(true, |c| c.generation < generation);
            if newest_issued && newer_than_current {
                *current = Some(batch.clone());
                true
            } else {
                false
            }
        });

        if applied {
            tracing::debug!("✅ Batch #{} applied", generation);
            Some(batch)
        } else {
            tracing::debug!("🗑️ Batch #{} is stale, discarding", generation);
            None
        }
    }
}

/// 訂閱選取變動，每次變動都發出新批次
pub fn spawn_renderer<P>(
    coordinator: Arc<BatchCoordinator<P>>,
    mut selection_rx: watch::Receiver<Vec<ServiceIdentifier>>,
) -> JoinHandle<()>
where
    P: IconProbe + 'static,
{
    tokio::spawn(async move {
        while selection_rx.changed().await.is_ok() {
            let selection = selection_rx.borrow_and_update().clone();
            // 序號在發出時取得，不受任務排程先後影響
            let generation = coordinator.issue();
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                coordinator.run_issued(generation, selection).await;
            });
        }
        tracing::debug!("Selection store dropped, renderer exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::icons::test_support::StubProbe;
    use crate::core::icons::{IconCache, IconOracle};
    use crate::core::selection::SelectionStore;
    use crate::core::tables::RuleTables;
    use std::time::Duration;

    fn id(raw: &str) -> ServiceIdentifier {
        ServiceIdentifier::parse(raw).unwrap()
    }

    fn coordinator(probe: StubProbe) -> Arc<BatchCoordinator<StubProbe>> {
        let oracle = IconOracle::new(probe, Arc::new(IconCache::new()));
        let engine = InferenceEngine::new(oracle, RuleTables::builtin());
        Arc::new(BatchCoordinator::new(engine, DEFAULT_CONCURRENT_PROBES))
    }

    #[tokio::test]
    async fn test_results_follow_selection_order() {
        // 第一個服務最慢完成
        let probe = StubProbe::with_icons(&["github", "xai"])
            .delayed("github", Duration::from_millis(80))
            .delayed("xai", Duration::from_millis(5));
        let coordinator = coordinator(probe);

        let batch = coordinator
            .run_batch(vec![id("github"), id("rednote"), id("xai")])
            .await
            .unwrap();

        let names: Vec<&str> = batch.records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["github", "rednote", "xAI"]);
        assert_eq!(
            batch.fragment,
            "  { name: \"github\", tld: \"com\" },\n  { name: \"rednote\", domain: \"xiaohongshu.com\" },\n  { name: \"xAI\", tld: \"ai\", sld: \"x\" }"
        );
    }

    #[tokio::test]
    async fn test_stale_batch_is_discarded() {
        let probe = StubProbe::with_icons(&["github"]).delayed("slow", Duration::from_millis(150));
        let coordinator = coordinator(probe);

        let stale = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.run_batch(vec![id("slow")]).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fresh = coordinator.run_batch(vec![id("github")]).await;
        assert!(fresh.is_some());

        let stale = stale.await.unwrap();
        assert!(stale.is_none());

        let latest = coordinator.latest().unwrap();
        assert_eq!(latest.selection, vec![id("github")]);
        assert_eq!(latest.generation, 2);
    }

    #[tokio::test]
    async fn test_generation_is_fixed_at_issue_time() {
        let coordinator = coordinator(StubProbe::with_icons(&["github", "xai"]));

        let first = coordinator.issue();
        let second = coordinator.issue();
        assert!(first < second);

        // 後發出的批次先完成，先發出的批次晚到仍須丟棄
        let fresh = coordinator.run_issued(second, vec![id("xai")]).await;
        assert_eq!(fresh.map(|b| b.generation), Some(second));

        let stale = coordinator.run_issued(first, vec![id("github")]).await;
        assert!(stale.is_none());

        let latest = coordinator.latest().unwrap();
        assert_eq!(latest.generation, second);
        assert_eq!(latest.selection, vec![id("xai")]);
    }

    #[tokio::test]
    async fn test_renderer_tracks_selection_changes() {
        let coordinator = coordinator(StubProbe::with_icons(&["github"]));
        let mut rendered_rx = coordinator.subscribe();

        let mut store = SelectionStore::new();
        let handle = spawn_renderer(coordinator.clone(), store.subscribe());

        store.add(id("github"));

        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                rendered_rx.changed().await.unwrap();
                if let Some(batch) = rendered_rx.borrow_and_update().clone() {
                    if batch.selection == vec![id("github")] {
                        break;
                    }
                }
            }
        })
        .await
        .unwrap();

        let latest = coordinator.latest().unwrap();
        assert_eq!(latest.fragment, "  { name: \"github\", tld: \"com\" }");

        drop(store);
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
