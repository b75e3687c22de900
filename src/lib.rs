//! heapscope
//!
//! Retained-size analysis and retention-path reporting for
//! managed-runtime heap snapshots.
//!
//! This crate provides the core implementation for the
//! `heapscope` CLI tool: load a snapshot with
//! [`snapshot::HeapSnapshot::open`], then ask it for ranked tables or
//! retention chains and render them as markdown.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install heapscope
//! heapscope --help
//! ```

pub mod analysis;
pub mod commands;
pub mod graph;
pub mod output;
pub mod report;
pub mod snapshot;
pub mod utils;
