use httpmock::prelude::*;
use httpmock::Method::HEAD;
use std::sync::Arc;
use std::time::Duration;
use svc_configgen::{
    spawn_renderer, BatchCoordinator, HttpIconProbe, IconCache, IconOracle, InferenceEngine,
    RuleTables, SelectionStore, ServiceIdentifier,
};

fn id(raw: &str) -> ServiceIdentifier {
    ServiceIdentifier::parse(raw).unwrap()
}

fn coordinator(server: &MockServer) -> Arc<BatchCoordinator<HttpIconProbe>> {
    let probe = HttpIconProbe::new(&server.url("/icons"), "svg");
    let oracle = IconOracle::new(probe, Arc::new(IconCache::new()));
    let engine = InferenceEngine::new(oracle, RuleTables::builtin());
    Arc::new(BatchCoordinator::new(engine, 4))
}

#[tokio::test]
async fn test_slow_probe_does_not_reorder_output() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/icons/github.svg");
        then.status(200).delay(Duration::from_millis(200));
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/icons/xai.svg");
        then.status(200);
    });

    let coordinator = coordinator(&server);
    let batch = coordinator
        .run_batch(vec![id("github"), id("xai")])
        .await
        .unwrap();

    assert_eq!(
        batch.fragment,
        "  { name: \"github\", tld: \"com\" },\n  { name: \"xAI\", tld: \"ai\", sld: \"x\" }"
    );
}

#[tokio::test]
async fn test_selection_changes_drive_rendering() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/icons/github.svg");
        then.status(200);
    });

    let coordinator = coordinator(&server);
    let mut rendered_rx = coordinator.subscribe();

    let mut store = SelectionStore::new();
    let renderer = spawn_renderer(coordinator.clone(), store.subscribe());

    store.add(id("rednote"));
    store.add(id("github"));
    store.reorder(1, 0).unwrap();

    let expected = vec![id("github"), id("rednote")];
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            rendered_rx.changed().await.unwrap();
            let current = rendered_rx.borrow_and_update().clone();
            if current.map(|b| b.selection) == Some(expected.clone()) {
                break;
            }
        }
    })
    .await
    .unwrap();

    let latest = coordinator.latest().unwrap();
    assert_eq!(
        latest.fragment,
        "  { name: \"github\", tld: \"com\" },\n  { name: \"rednote\", domain: \"xiaohongshu.com\" }"
    );

    drop(store);
    tokio::time::timeout(Duration::from_secs(5), renderer)
        .await
        .unwrap()
        .unwrap();
}
