//! Retention-graph analysis engine.
//!
//! This module turns an object graph into the facts the reports are built
//! from:
//! - A single-parent retention tree over the reachable objects
//! - Per-object retained (inclusive) sizes
//! - Per-type aggregates under three ranking modes
//! - The dominant retention chain for a filtered set of objects

pub mod aggregate;
pub mod hotpath;
pub mod retention;

// Re-export main types and functions
pub use aggregate::{aggregate_types, filter_by_name, SortMode, TypeAggregate};
pub use hotpath::{dominant_path, is_pseudo_type, PathSegment};
pub use retention::{retained_sizes, SpanningTree};
