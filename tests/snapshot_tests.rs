use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use heapscope::snapshot::HeapSnapshot;
use heapscope::utils::error::SnapshotError;

fn write_snapshot(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

const CHAIN: &str = r#"{
    "version": 1,
    "captured_at": "2026-07-15T09:00:00Z",
    "process": "orders-api",
    "types": ["[root]", "A", "B", "C"],
    "root": 0,
    "nodes": [
        { "type": 0, "size": 0, "edges": [1] },
        { "type": 1, "size": 10, "edges": [2] },
        { "type": 2, "size": 20, "edges": [3] },
        { "type": 3, "size": 30, "edges": [] }
    ]
}"#;

#[test]
fn open_loads_graph_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "heap.json", CHAIN);

    let snapshot = HeapSnapshot::open(&path).unwrap();
    assert_eq!(snapshot.meta().process.as_deref(), Some("orders-api"));
    assert!(snapshot.meta().captured_at.is_some());

    let stats = snapshot.stats();
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.type_count, 4);
    assert_eq!(stats.reachable_nodes, 4);
    assert_eq!(stats.reachable_bytes, 60);
}

#[test]
fn open_exposes_the_validated_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "heap.json", CHAIN);

    // Programmatic consumers walk the graph directly through the accessor.
    let snapshot = HeapSnapshot::open(&path).unwrap();
    let graph = snapshot.graph();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.root(), 0);
    assert_eq!(graph.type_name(1), "A");
    assert_eq!(graph.edges_of(1), &[2]);
    assert_eq!(graph.size_of(3), 30);
}

#[test]
fn open_missing_file_is_io_error() {
    let err = HeapSnapshot::open("/no/such/heap.json").unwrap_err();
    assert!(matches!(err, SnapshotError::Io(_)));
}

#[test]
fn open_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "broken.json", "{ not json");
    let err = HeapSnapshot::open(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Json(_)));
}

#[test]
fn open_rejects_future_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        "future.json",
        r#"{
            "version": 99,
            "types": ["[root]"],
            "root": 0,
            "nodes": [{ "type": 0 }]
        }"#,
    );
    let err = HeapSnapshot::open(&path).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::UnsupportedVersion { found: 99, .. }
    ));
}

#[test]
fn open_rejects_dangling_edges() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        "dangling.json",
        r#"{
            "version": 1,
            "types": ["[root]"],
            "root": 0,
            "nodes": [{ "type": 0, "edges": [12] }]
        }"#,
    );
    let err = HeapSnapshot::open(&path).unwrap_err();
    assert!(err.to_string().contains("missing node 12"));
}

#[test]
fn reports_from_reloaded_file_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "heap.json", CHAIN);

    let first = HeapSnapshot::open(&path)
        .unwrap()
        .top_by_inclusive_size(10)
        .unwrap()
        .to_string();
    let second = HeapSnapshot::open(&path)
        .unwrap()
        .top_by_inclusive_size(10)
        .unwrap()
        .to_string();
    assert_eq!(first, second);
}

#[test]
fn from_reader_accepts_in_memory_documents() {
    let snapshot = HeapSnapshot::from_reader(CHAIN.as_bytes()).unwrap();
    assert_eq!(snapshot.stats().reachable_bytes, 60);
    // In-memory documents carry their metadata too.
    assert_eq!(snapshot.meta().process.as_deref(), Some("orders-api"));
}
