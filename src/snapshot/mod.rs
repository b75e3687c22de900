//! Heap snapshot sessions.
//!
//! [`HeapSnapshot`] is one fully-loaded snapshot: open it, ask it for
//! reports, drop it. Nothing is memoized between calls; every report
//! recomputes the retention tree and retained sizes from the immutable
//! graph, so repeated calls with the same arguments produce identical
//! output and independent calls cannot interfere.

pub mod schema;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::analysis::aggregate::{aggregate_types, filter_by_name, SortMode, TypeAggregate};
use crate::analysis::hotpath::{dominant_path, PathSegment};
use crate::analysis::retention::{retained_sizes, SpanningTree};
use crate::graph::ObjectGraph;
use crate::report::{Column, Report, Row, TreeNode, Value};
use crate::utils::config::{COL_COUNT, COL_INCLUSIVE, COL_REFERENCES, COL_SIZE, COL_TYPE};
use crate::utils::error::{ReportError, SnapshotError};

/// Optional metadata carried by a snapshot file
#[derive(Debug, Clone, Default)]
pub struct SnapshotMeta {
    pub captured_at: Option<DateTime<Utc>>,
    pub process: Option<String>,
}

/// Summary facts about a loaded snapshot, computed on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStats {
    /// Nodes in the file, reachable or not
    pub node_count: usize,
    /// Entries in the type table
    pub type_count: usize,
    /// Nodes reachable from the root, the root included
    pub reachable_nodes: usize,
    /// Bytes retained by the root, i.e. everything reachable
    pub reachable_bytes: u64,
}

/// A loaded heap snapshot ready to answer report requests.
#[derive(Debug)]
pub struct HeapSnapshot {
    graph: ObjectGraph,
    meta: SnapshotMeta,
}

impl HeapSnapshot {
    /// Open and fully load a snapshot file.
    ///
    /// Loading either succeeds completely or fails with a [`SnapshotError`];
    /// there is no partially-loaded state to observe.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        info!("Loading heap snapshot: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a snapshot from any reader producing the JSON document.
    pub fn from_reader(reader: impl Read) -> Result<Self, SnapshotError> {
        let file: schema::SnapshotFile = serde_json::from_reader(reader)?;
        let meta = SnapshotMeta {
            captured_at: file.captured_at,
            process: file.process.clone(),
        };
        let graph = file.into_graph()?;
        debug!(
            "loaded graph: {} nodes, {} types",
            graph.node_count(),
            graph.type_count()
        );
        Ok(Self { graph, meta })
    }

    /// Wrap an already-built object graph, e.g. one assembled in memory.
    pub fn from_graph(graph: ObjectGraph) -> Self {
        Self {
            graph,
            meta: SnapshotMeta::default(),
        }
    }

    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    pub fn meta(&self) -> &SnapshotMeta {
        &self.meta
    }

    /// Top types ranked by retained (inclusive) size.
    pub fn top_by_inclusive_size(&self, rows: usize) -> Result<Report, ReportError> {
        self.top_report(rows, SortMode::InclusiveSize)
    }

    /// Top types ranked by shallow size.
    pub fn top_by_size(&self, rows: usize) -> Result<Report, ReportError> {
        self.top_report(rows, SortMode::Size)
    }

    /// Top types ranked by instance count.
    pub fn top_by_count(&self, rows: usize) -> Result<Report, ReportError> {
        self.top_report(rows, SortMode::Count)
    }

    /// The full inclusive-size-ranked table narrowed to type names containing
    /// `filter`, case-insensitively. Filtering never caps the row count; the
    /// caller decides how much of the result to show.
    pub fn by_name(&self, filter: &str) -> Result<Report, ReportError> {
        if filter.trim().is_empty() {
            return Err(ReportError::EmptyFilter);
        }
        let aggregates = filter_by_name(self.aggregate(SortMode::InclusiveSize), filter);
        Ok(table_report(aggregates))
    }

    /// The dominant reference chain keeping matching objects alive, as a
    /// tree report nested leaf-first. An empty tree means nothing matched.
    pub fn paths_to_root(&self, filter: &str) -> Result<Report, ReportError> {
        if filter.trim().is_empty() {
            return Err(ReportError::EmptyFilter);
        }
        let tree = SpanningTree::build(&self.graph);
        let chain = dominant_path(&self.graph, &tree, filter);
        Ok(tree_report(chain))
    }

    /// Node, type, and reachability counts for the loaded snapshot.
    pub fn stats(&self) -> SnapshotStats {
        let tree = SpanningTree::build(&self.graph);
        let retained = retained_sizes(&self.graph, &tree);
        SnapshotStats {
            node_count: self.graph.node_count(),
            type_count: self.graph.type_count(),
            reachable_nodes: tree.reached_count(),
            reachable_bytes: retained[self.graph.root() as usize],
        }
    }

    fn top_report(&self, rows: usize, mode: SortMode) -> Result<Report, ReportError> {
        if rows == 0 {
            return Err(ReportError::ZeroRows);
        }
        let mut aggregates = self.aggregate(mode);
        aggregates.truncate(rows);
        Ok(table_report(aggregates))
    }

    // Shared pipeline: retention tree, retained sizes, per-type aggregate.
    fn aggregate(&self, mode: SortMode) -> Vec<TypeAggregate> {
        let tree = SpanningTree::build(&self.graph);
        let retained = retained_sizes(&self.graph, &tree);
        aggregate_types(&self.graph, &tree, &retained, mode)
    }
}

fn table_report(aggregates: Vec<TypeAggregate>) -> Report {
    let columns = vec![
        Column::text(COL_TYPE),
        Column::numeric(COL_COUNT),
        Column::numeric(COL_SIZE),
        Column::numeric(COL_INCLUSIVE),
    ];
    let rows: Vec<Row> = aggregates
        .into_iter()
        .map(|aggregate| {
            vec![
                Value::Text(aggregate.name),
                Value::Number(aggregate.count),
                Value::Number(aggregate.size),
                Value::Number(aggregate.inclusive),
            ]
        })
        .collect();
    Report::table(columns, rows)
}

fn tree_report(chain: Vec<PathSegment>) -> Report {
    let columns = vec![Column::text(COL_TYPE), Column::numeric(COL_REFERENCES)];
    // The chain arrives leaf to root; nest it so the matched type is the
    // outermost line and each retainer indents one level deeper.
    let mut current: Option<TreeNode> = None;
    for segment in chain.into_iter().rev() {
        let mut node = TreeNode::new(segment.name, Some(segment.count));
        if let Some(inner) = current.take() {
            node.children.push(inner);
        }
        current = Some(node);
    }
    Report::tree(columns, current.into_iter().collect())
}
