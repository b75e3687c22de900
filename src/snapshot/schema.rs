//! On-disk heap snapshot schema.
//!
//! A snapshot is a single JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "captured_at": "2026-08-01T12:30:00Z",
//!   "process": "worker-3",
//!   "types": ["[root]", "MyApp.Session", "System.String"],
//!   "root": 0,
//!   "nodes": [
//!     { "type": 0, "size": 0, "edges": [1] },
//!     { "type": 1, "size": 64, "edges": [2] },
//!     { "type": 2, "size": 40, "edges": [] }
//!   ]
//! }
//! ```
//!
//! Nodes are identified by their position in the `nodes` array, and the
//! `type` field of each record indexes the `types` table. Unknown fields
//! are ignored so newer writers stay readable.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::graph::ObjectGraph;
use crate::utils::config::SNAPSHOT_FORMAT_VERSION;
use crate::utils::error::SnapshotError;

/// Top-level snapshot document
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotFile {
    /// Format version, checked against what this build supports
    pub version: u32,

    /// When the snapshot was captured (optional metadata)
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,

    /// Name of the dumped process (optional metadata)
    #[serde(default)]
    pub process: Option<String>,

    /// Type table: display names referenced by the node records
    pub types: Vec<String>,

    /// Index of the synthetic root node
    pub root: u32,

    /// Node records, identified by position in this array
    pub nodes: Vec<NodeRecord>,
}

/// One heap object record
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    /// Index into the type table
    #[serde(rename = "type")]
    pub type_id: u32,

    /// Shallow size in bytes
    #[serde(default)]
    pub size: u64,

    /// Ordered outgoing references, as node indices
    #[serde(default)]
    pub edges: Vec<u32>,
}

impl SnapshotFile {
    /// Validate the records and materialize the packed object graph.
    ///
    /// All index checks (root, type ids, edge targets) happen here; a graph
    /// that comes back `Ok` is safe to traverse without bounds worries.
    pub fn into_graph(self) -> Result<ObjectGraph, SnapshotError> {
        if self.version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_FORMAT_VERSION,
            });
        }

        let mut builder = ObjectGraph::builder();
        for name in self.types {
            builder.add_type(name);
        }
        for record in &self.nodes {
            builder.add_node(record.type_id, record.size);
        }
        for (index, record) in self.nodes.iter().enumerate() {
            for &target in &record.edges {
                builder.add_edge(index as u32, target);
            }
        }
        builder.set_root(self.root);
        builder.build()
    }
}
