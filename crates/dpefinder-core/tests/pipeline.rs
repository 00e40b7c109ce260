use std::time::Duration;

use dpefinder_core::api::{ApiError, RegistryClient};
use dpefinder_core::cache::{RegistryCache, SnapshotStore};
use dpefinder_core::geo::{Coordinate, DistanceRanker, GeoIndex, ZipTable};
use dpefinder_core::models::RecordSource;
use dpefinder_core::Error;
use mockito::Server;

fn registry_body() -> String {
    serde_json::json!({
        "total": 3,
        "data": [
            {"fullName": "Far Examiner", "address": {"zipCode": "10001", "city": "New York"}},
            {"fullName": "Near Examiner", "address": {"zipCode": "94621-4455", "city": "Oakland"}},
            {"fullName": "Lost Examiner", "address": {"zipCode": "00000", "city": "Nowhere"}}
        ],
        "Status": 0,
        "Title": null
    })
    .to_string()
}

fn zip_table() -> ZipTable {
    [
        ("94105", Coordinate::new(37.7898, -122.3942)),
        ("94621", Coordinate::new(37.7390, -122.1970)),
        ("10001", Coordinate::new(40.7506, -73.9972)),
    ]
    .into_iter()
    .collect()
}

fn cache_for(server: &Server, dir: &std::path::Path) -> RegistryCache<RegistryClient> {
    let client = RegistryClient::with_options(&server.url(), Duration::from_secs(5))
        .expect("client should build");
    let store = SnapshotStore::new(dir.to_path_buf()).expect("store should open");
    RegistryCache::new(client, store)
}

#[tokio::test]
async fn fetch_index_and_rank_then_reuse_snapshot() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/Cloa/Search/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(registry_body())
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let table = zip_table();

    let records = cache_for(&server, dir.path())
        .obtain(24, false)
        .await
        .expect("first run fetches");
    assert_eq!(records.source(), &RecordSource::Remote);
    assert_eq!(records.len(), 3);

    let index = GeoIndex::build(&records, &table);
    assert_eq!(index.len(), 2);
    let missed: Vec<&str> = index
        .unresolved()
        .iter()
        .map(|key| records.get(key).unwrap().full_name.as_str())
        .collect();
    assert_eq!(missed, vec!["Lost Examiner"]);

    let ranked = DistanceRanker::new(&table).rank(&index, "94105").unwrap();
    let names: Vec<&str> = ranked
        .iter()
        .map(|r| records.get(&r.key).unwrap().full_name.as_str())
        .collect();
    assert_eq!(names, vec!["Near Examiner", "Far Examiner"]);
    assert!(ranked[0].miles < 15.0);
    assert!(ranked[1].miles > 2500.0);

    // A second run reads the snapshot the first one wrote
    let again = cache_for(&server, dir.path())
        .obtain(24, false)
        .await
        .expect("second run loads snapshot");
    assert!(matches!(again.source(), RecordSource::Snapshot { .. }));
    assert_eq!(again.len(), 3);

    mock.assert_async().await;
}

#[tokio::test]
async fn forced_refresh_failure_is_fatal() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/Cloa/Search/")
        .with_status(500)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = cache_for(&server, dir.path());
    cache.store().save(24, &registry_body()).unwrap();

    let result = cache.obtain(24, true).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn registry_timeout_surfaces_as_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let dir = tempfile::tempdir().unwrap();
    let client = RegistryClient::with_options(&url, Duration::from_millis(200))
        .expect("client should build");
    let store = SnapshotStore::new(dir.path().to_path_buf()).expect("store should open");
    let cache = RegistryCache::new(client, store);

    let result = cache.obtain(24, false).await;
    assert!(
        matches!(result, Err(Error::Transport(ApiError::Timeout))),
        "got {:?}",
        result.map(|r| r.len())
    );
    assert!(cache.store().load(24).unwrap().is_none());

    drop(listener);
}
