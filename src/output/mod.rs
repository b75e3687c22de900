//! Output writers for rendered reports.
//!
//! Reports leave the engine as structured [`Report`](crate::report::Report)
//! values; this module turns them into markdown text on stdout or disk.

pub mod markdown;

// Re-export main functions
pub use markdown::{format_number, render, write_report};
