//! Report commands: ranked tables, name filtering, and retention paths.
//!
//! Each command loads the snapshot, runs one analysis operation, and hands
//! the rendered markdown to stdout or a file. Argument validation happens
//! up front, before the snapshot is read.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::analysis::SortMode;
use crate::commands::models::{FilterArgs, RootsArgs, TopArgs};
use crate::output::markdown;
use crate::report::Report;
use crate::snapshot::HeapSnapshot;
use crate::utils::config::MAX_REPORT_ROWS;

/// Validate a requested row count before any snapshot work
///
/// **Public** - used by main.rs and tests
pub fn validate_rows(rows: usize) -> Result<()> {
    if rows == 0 {
        anyhow::bail!("row count must be greater than 0");
    }
    if rows > MAX_REPORT_ROWS {
        anyhow::bail!("row count {rows} is too large (max {MAX_REPORT_ROWS})");
    }
    Ok(())
}

/// Validate a type name filter before any snapshot work
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("type name filter must not be empty");
    }
    Ok(())
}

/// Execute a ranked table command (`top`, `top-size`, `top-count`).
pub fn execute_top(args: &TopArgs, mode: SortMode) -> Result<()> {
    validate_rows(args.rows)?;
    let snapshot = open_snapshot(&args.snapshot)?;

    let report = match mode {
        SortMode::InclusiveSize => snapshot.top_by_inclusive_size(args.rows),
        SortMode::Size => snapshot.top_by_size(args.rows),
        SortMode::Count => snapshot.top_by_count(args.rows),
    }?;
    debug!("ranked table: {} row(s)", report.row_count());

    emit(&report, args.output.as_deref())
}

/// Execute the `filter` command: the full inclusive-size table narrowed to
/// matching type names.
pub fn execute_filter(args: &FilterArgs) -> Result<()> {
    validate_name(&args.name)?;
    if let Some(rows) = args.rows {
        validate_rows(rows)?;
    }
    let snapshot = open_snapshot(&args.snapshot)?;

    let mut report = snapshot.by_name(&args.name)?;
    if report.is_empty() {
        info!("No type names contain {:?}", args.name);
    }
    // The engine never caps filtered results; the row limit is purely a
    // presentation choice applied here.
    if let Some(rows) = args.rows {
        report.truncate_rows(rows);
    }

    emit(&report, args.output.as_deref())
}

/// Execute the `roots` command: the dominant retention chain for matching
/// type names, rendered as a tree.
pub fn execute_roots(args: &RootsArgs) -> Result<()> {
    validate_name(&args.name)?;
    let snapshot = open_snapshot(&args.snapshot)?;

    let report = snapshot.paths_to_root(&args.name)?;
    if report.is_empty() {
        info!("No type names contain {:?}", args.name);
    }

    emit(&report, args.output.as_deref())
}

pub(crate) fn open_snapshot(path: &Path) -> Result<HeapSnapshot> {
    if !path.exists() {
        anyhow::bail!("snapshot file not found: {}", path.display());
    }
    HeapSnapshot::open(path)
        .with_context(|| format!("failed to load heap snapshot from {}", path.display()))
}

fn emit(report: &Report, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => markdown::write_report(report, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => print!("{}", markdown::render(report)),
    }
    Ok(())
}
