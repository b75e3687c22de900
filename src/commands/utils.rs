use std::path::PathBuf;

use anyhow::Result;

use crate::commands::report::open_snapshot;
use crate::output::format_number;
use crate::utils::config::SNAPSHOT_FORMAT_VERSION;

/// Load a snapshot and print summary facts about it
pub fn inspect_snapshot(path: PathBuf) -> Result<()> {
    println!("Inspecting snapshot: {}", path.display());

    let snapshot = open_snapshot(&path)?;
    let stats = snapshot.stats();

    println!("✓ Valid heap snapshot");
    if let Some(process) = &snapshot.meta().process {
        println!("  Process: {process}");
    }
    if let Some(captured_at) = snapshot.meta().captured_at {
        println!("  Captured: {}", captured_at.to_rfc3339());
    }
    println!("  Nodes: {}", format_number(stats.node_count as u64));
    println!("  Types: {}", format_number(stats.type_count as u64));
    println!(
        "  Reachable Nodes: {}",
        format_number(stats.reachable_nodes as u64)
    );
    println!(
        "  Reachable Bytes: {}",
        format_number(stats.reachable_bytes)
    );

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("heapscope v{}", env!("CARGO_PKG_VERSION"));
    println!("Snapshot Format: v{SNAPSHOT_FORMAT_VERSION}");
    println!();
    println!("Retained-size analysis for managed-runtime heap snapshots.");
}
