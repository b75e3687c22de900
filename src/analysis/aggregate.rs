//! Per-type aggregation of instance counts, shallow bytes, and retained bytes.

use std::collections::HashMap;

use log::debug;

use crate::analysis::retention::SpanningTree;
use crate::graph::{NodeIndex, ObjectGraph};

/// Ranking mode for the aggregate table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Retained bytes first, then shallow bytes, then name
    InclusiveSize,
    /// Shallow bytes first, then retained bytes, then name
    Size,
    /// Instance count first, then shallow bytes, then retained bytes, then name
    Count,
}

/// Aggregated statistics for one type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAggregate {
    pub name: String,
    /// Reachable instances of this type
    pub count: u64,
    /// Sum of shallow sizes across those instances
    pub size: u64,
    /// Sum of retained sizes, with same-type chains collapsed
    pub inclusive: u64,
}

/// Aggregate every reachable node except the root by its type name and sort
/// per `mode`.
///
/// The inclusive column sums each node's retained size, except that a node
/// whose retainer has the same type name contributes zero. Without that
/// suppression a linked-list-style chain would count every suffix of the
/// chain once per link; with it, only the outermost node of each same-type
/// run contributes its subtree.
///
/// The sort orders are total (every mode ends in the unique name), so the
/// result is deterministic regardless of map iteration order.
pub fn aggregate_types(
    graph: &ObjectGraph,
    tree: &SpanningTree,
    retained: &[u64],
    mode: SortMode,
) -> Vec<TypeAggregate> {
    let mut stats: HashMap<&str, (u64, u64, u64)> = HashMap::new();
    let root = graph.root();

    for node in 0..graph.node_count() as NodeIndex {
        if node == root || !tree.is_reached(node) {
            continue;
        }
        let name = graph.type_name(node);

        let mut inclusive = retained[node as usize];
        if let Some(parent) = tree.parent(node) {
            if graph.type_name(parent) == name {
                inclusive = 0;
            }
        }

        let entry = stats.entry(name).or_insert((0, 0, 0));
        entry.0 += 1;
        entry.1 += graph.size_of(node);
        entry.2 += inclusive;
    }

    let mut aggregates: Vec<TypeAggregate> = stats
        .into_iter()
        .map(|(name, (count, size, inclusive))| TypeAggregate {
            name: name.to_string(),
            count,
            size,
            inclusive,
        })
        .collect();

    sort_aggregates(&mut aggregates, mode);
    debug!("aggregated {} distinct types", aggregates.len());
    aggregates
}

fn sort_aggregates(aggregates: &mut [TypeAggregate], mode: SortMode) {
    match mode {
        SortMode::InclusiveSize => aggregates.sort_by(|a, b| {
            b.inclusive
                .cmp(&a.inclusive)
                .then_with(|| b.size.cmp(&a.size))
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::Size => aggregates.sort_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| b.inclusive.cmp(&a.inclusive))
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::Count => aggregates.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.size.cmp(&a.size))
                .then_with(|| b.inclusive.cmp(&a.inclusive))
                .then_with(|| a.name.cmp(&b.name))
        }),
    }
}

/// Keep only aggregates whose type name contains `filter`, case-insensitively,
/// preserving the incoming order.
pub fn filter_by_name(aggregates: Vec<TypeAggregate>, filter: &str) -> Vec<TypeAggregate> {
    let needle = filter.to_lowercase();
    aggregates
        .into_iter()
        .filter(|aggregate| aggregate.name.to_lowercase().contains(&needle))
        .collect()
}
