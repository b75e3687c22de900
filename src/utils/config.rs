//! Configuration and constants for the CLI.

/// Snapshot format version this build understands
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Default number of rows in the ranked table reports
pub const DEFAULT_REPORT_ROWS: usize = 10;

/// Upper bound on requested rows, to catch typo'd huge values early
pub const MAX_REPORT_ROWS: usize = 10_000;

// Column headers shared by the table and tree reports. The rendering layer
// sizes columns from these, so tests that assert exact markdown depend on
// the spelling here.
pub const COL_TYPE: &str = "Object Type";
pub const COL_COUNT: &str = "Count";
pub const COL_SIZE: &str = "Size (Bytes)";
pub const COL_INCLUSIVE: &str = "Inclusive Size (Bytes)";
pub const COL_REFERENCES: &str = "Reference Count";
