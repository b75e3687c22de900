//! Retention tree construction and retained-size propagation.
//!
//! The retention tree assigns every reachable object exactly one retainer,
//! turning the general object graph into a tree on which subtree sums are
//! well defined. Retained (inclusive) size then falls out of one bottom-up
//! pass over that tree.

use log::debug;

use crate::graph::{NodeIndex, ObjectGraph};

/// Single-parent retention tree over the reachable part of an object graph.
///
/// Built by one iterative depth-first traversal from the root: the first
/// edge to reach a node decides its retainer. This approximates per-object
/// dominators the way heap-snapshot tooling commonly does. When several
/// independent paths reach a node, edge enumeration order decides which
/// parent wins, so a graph with reordered edges can produce a different
/// (equally valid) tree and shift retained bytes between types.
#[derive(Debug)]
pub struct SpanningTree {
    parent: Vec<Option<NodeIndex>>,
    reached: Vec<bool>,
    postorder: Vec<NodeIndex>,
}

impl SpanningTree {
    /// Build the retention tree for `graph`.
    ///
    /// Runs in one pass over the reachable nodes and edges. The traversal
    /// keeps an explicit stack of (node, next-edge cursor) frames; object
    /// graphs routinely contain chains deep enough to overflow the call
    /// stack if this recursed.
    pub fn build(graph: &ObjectGraph) -> Self {
        let node_count = graph.node_count();
        let mut parent: Vec<Option<NodeIndex>> = vec![None; node_count];
        let mut reached = vec![false; node_count];
        let mut postorder = Vec::with_capacity(node_count);
        let mut stack: Vec<(NodeIndex, usize)> = Vec::new();

        let root = graph.root();
        reached[root as usize] = true;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let edges = graph.edges_of(node);
            if frame.1 < edges.len() {
                let child = edges[frame.1];
                frame.1 += 1;
                if !reached[child as usize] {
                    // First discovery wins: this edge's source becomes the
                    // child's retainer for good.
                    reached[child as usize] = true;
                    parent[child as usize] = Some(node);
                    stack.push((child, 0));
                }
            } else {
                // All edges consumed: children are already emitted, so the
                // node itself goes next. The root leaves the stack last.
                postorder.push(node);
                stack.pop();
            }
        }

        debug!(
            "retention tree: {} of {} nodes reachable",
            postorder.len(),
            node_count
        );

        Self {
            parent,
            reached,
            postorder,
        }
    }

    /// The retainer of `node`, or `None` for the root and unreachable nodes.
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.parent[node as usize]
    }

    /// Whether `node` was reached from the root.
    pub fn is_reached(&self, node: NodeIndex) -> bool {
        self.reached[node as usize]
    }

    /// Reachable nodes in postorder: children before parents, root last.
    pub fn postorder(&self) -> &[NodeIndex] {
        &self.postorder
    }

    /// Number of nodes reachable from the root (the root included).
    pub fn reached_count(&self) -> usize {
        self.postorder.len()
    }
}

/// Compute the retained (inclusive) size of every node.
///
/// Each entry starts at the node's shallow size. Walking the postorder
/// sequence, every node except the final root entry adds its accumulated
/// total into its retainer; children always complete before their parent,
/// so each subtree is fully summed exactly once. The root's entry ends up
/// equal to the total bytes reachable from it. Unreachable nodes keep their
/// shallow size; callers filter them via [`SpanningTree::is_reached`].
pub fn retained_sizes(graph: &ObjectGraph, tree: &SpanningTree) -> Vec<u64> {
    let mut retained: Vec<u64> = (0..graph.node_count())
        .map(|node| graph.size_of(node as NodeIndex))
        .collect();

    let order = tree.postorder();
    let upward = &order[..order.len().saturating_sub(1)];
    for &node in upward {
        if let Some(parent) = tree.parent(node) {
            retained[parent as usize] += retained[node as usize];
        }
    }

    retained
}
