//! Dominant retention-path extraction.
//!
//! For a set of matching objects, this finds the single reference chain
//! that best explains what keeps them alive: each object's retainer chain
//! is collected, then the chains vote depth by depth and only the winning
//! group keeps voting at the next depth. The result is one representative
//! chain annotated with how many objects still followed it at each step.

use std::collections::HashMap;

use log::debug;

use crate::analysis::retention::SpanningTree;
use crate::graph::{NodeIndex, ObjectGraph};

/// One step of the dominant chain: a type name and the number of candidate
/// paths that still carried it at this depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub count: u64,
}

/// True for synthetic bookkeeping entries such as `[root]`, `[static vars]`,
/// or `(pinned handles)`. These never name an application type, so they are
/// dropped from retention chains.
pub fn is_pseudo_type(name: &str) -> bool {
    name.is_empty() || name.starts_with(['[', '('])
}

/// Extract the dominant retention chain for every reachable object whose
/// type name contains `filter` (case-insensitive).
///
/// The chain runs leaf to root: the matched type first, its most common
/// retainer next, and so on until the surviving paths run out of segments.
/// An empty result means nothing matched (or every matched chain consisted
/// solely of pseudo entries); that is an answer, not an error.
pub fn dominant_path(graph: &ObjectGraph, tree: &SpanningTree, filter: &str) -> Vec<PathSegment> {
    let needle = filter.to_lowercase();
    let root = graph.root();

    // Phase 1: one retainer chain per matching object, root excluded,
    // pseudo segments dropped. Parent links terminate at the root by
    // construction, so the climb needs no cycle guard.
    let mut paths: Vec<Vec<&str>> = Vec::new();
    for node in 0..graph.node_count() as NodeIndex {
        if node == root || !tree.is_reached(node) {
            continue;
        }
        if !graph.type_name(node).to_lowercase().contains(&needle) {
            continue;
        }

        let mut segments: Vec<&str> = Vec::new();
        let mut current = node;
        while current != root {
            let name = graph.type_name(current);
            if !is_pseudo_type(name) {
                segments.push(name);
            }
            match tree.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        if !segments.is_empty() {
            paths.push(segments);
        }
    }
    debug!("{} retention path(s) match filter {filter:?}", paths.len());

    // Phase 2: majority vote depth by depth. Ties go to the smaller name;
    // only the winning group stays live for the next depth.
    let mut live: Vec<usize> = (0..paths.len()).collect();
    let mut chain = Vec::new();
    let mut depth = 0;
    loop {
        let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
        for &path in &live {
            if let Some(&name) = paths[path].get(depth) {
                groups.entry(name).or_default().push(path);
            }
        }
        let winner = groups
            .into_iter()
            .max_by(|(a_name, a_members), (b_name, b_members)| {
                a_members
                    .len()
                    .cmp(&b_members.len())
                    .then_with(|| b_name.cmp(a_name))
            });
        let Some((name, members)) = winner else {
            break;
        };
        chain.push(PathSegment {
            name: name.to_string(),
            count: members.len() as u64,
        });
        live = members;
        depth += 1;
    }

    chain
}
