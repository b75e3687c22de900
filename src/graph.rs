//! In-memory object graph consumed by the analysis engine.
//!
//! The graph is the materialized form of a heap snapshot: a dense array of
//! nodes carrying shallow size and type, ordered outgoing references packed
//! into one flat edge array, a type table mapping type ids to display names,
//! and a single designated root node anchoring reachability.

use crate::utils::error::SnapshotError;

/// Dense node identifier: an index into the graph's node arrays.
pub type NodeIndex = u32;

/// Identifier of an entry in the graph's type table.
pub type TypeId = u32;

/// Read-only object graph.
///
/// Edges are stored in compressed sparse row form: the outgoing references
/// of node `n` are `edge_targets[first_edge[n]..first_edge[n + 1]]`, in
/// snapshot order. Edge order is part of the contract: retention-tree
/// construction visits edges in this order, so the same graph always yields
/// the same tree, while a reordered edge list may legitimately yield a
/// different one.
#[derive(Debug, Clone)]
pub struct ObjectGraph {
    sizes: Vec<u64>,
    type_ids: Vec<TypeId>,
    first_edge: Vec<usize>,
    edge_targets: Vec<NodeIndex>,
    type_names: Vec<String>,
    root: NodeIndex,
}

impl ObjectGraph {
    /// Start building a graph node by node.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Number of nodes, reachable or not.
    pub fn node_count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of entries in the type table.
    pub fn type_count(&self) -> usize {
        self.type_names.len()
    }

    /// The designated root node.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Shallow size of a node in bytes.
    pub fn size_of(&self, node: NodeIndex) -> u64 {
        self.sizes[node as usize]
    }

    /// Type table id of a node.
    pub fn type_of(&self, node: NodeIndex) -> TypeId {
        self.type_ids[node as usize]
    }

    /// Display name of a type table entry.
    pub fn name_of(&self, type_id: TypeId) -> &str {
        &self.type_names[type_id as usize]
    }

    /// Display name of a node's type.
    pub fn type_name(&self, node: NodeIndex) -> &str {
        self.name_of(self.type_of(node))
    }

    /// Outgoing references of a node, in snapshot order.
    pub fn edges_of(&self, node: NodeIndex) -> &[NodeIndex] {
        let n = node as usize;
        &self.edge_targets[self.first_edge[n]..self.first_edge[n + 1]]
    }
}

/// Incremental [`ObjectGraph`] construction with validation at the end.
///
/// Types and nodes are handed out sequential ids in insertion order. Edges
/// may reference nodes that have not been added yet; all bounds are checked
/// once in [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    type_names: Vec<String>,
    sizes: Vec<u64>,
    type_ids: Vec<TypeId>,
    edges: Vec<Vec<NodeIndex>>,
    root: Option<NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type name, returning its id.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeId {
        let id = self.type_names.len() as TypeId;
        self.type_names.push(name.into());
        id
    }

    /// Add a node with no edges yet, returning its index.
    pub fn add_node(&mut self, type_id: TypeId, size: u64) -> NodeIndex {
        let index = self.sizes.len() as NodeIndex;
        self.sizes.push(size);
        self.type_ids.push(type_id);
        self.edges.push(Vec::new());
        index
    }

    /// Append an outgoing reference to an already-added node. The target
    /// may be a node added later; it is bounds-checked in `build`.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.edges[from as usize].push(to);
    }

    /// Designate the root node.
    pub fn set_root(&mut self, node: NodeIndex) {
        self.root = Some(node);
    }

    /// Validate all ids and assemble the packed graph.
    pub fn build(self) -> Result<ObjectGraph, SnapshotError> {
        let node_count = self.sizes.len();

        if node_count > NodeIndex::MAX as usize {
            return Err(SnapshotError::Malformed(format!(
                "too many nodes ({node_count})"
            )));
        }

        let root = match self.root {
            Some(root) if (root as usize) < node_count => root,
            Some(root) => {
                return Err(SnapshotError::Malformed(format!(
                    "root index {root} out of bounds ({node_count} nodes)"
                )))
            }
            None => return Err(SnapshotError::Malformed("no root node designated".into())),
        };

        for (node, &type_id) in self.type_ids.iter().enumerate() {
            if type_id as usize >= self.type_names.len() {
                return Err(SnapshotError::Malformed(format!(
                    "node {node} references missing type {type_id}"
                )));
            }
        }

        let mut first_edge = Vec::with_capacity(node_count + 1);
        let mut edge_targets = Vec::new();
        for (node, targets) in self.edges.iter().enumerate() {
            first_edge.push(edge_targets.len());
            for &target in targets {
                if target as usize >= node_count {
                    return Err(SnapshotError::Malformed(format!(
                        "node {node} references missing node {target}"
                    )));
                }
                edge_targets.push(target);
            }
        }
        first_edge.push(edge_targets.len());

        Ok(ObjectGraph {
            sizes: self.sizes,
            type_ids: self.type_ids,
            first_edge,
            edge_targets,
            type_names: self.type_names,
            root,
        })
    }
}
