use std::path::PathBuf;

use crate::utils::config::DEFAULT_REPORT_ROWS;

/// Arguments for the ranked table commands (`top`, `top-size`, `top-count`)
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TopArgs {
    /// Path to the heap snapshot file
    pub snapshot: PathBuf,

    /// Number of rows to include
    pub rows: usize,

    /// Output path for the markdown report (stdout if None)
    pub output: Option<PathBuf>,
}

impl Default for TopArgs {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("heap.json"),
            rows: DEFAULT_REPORT_ROWS,
            output: None,
        }
    }
}

/// Arguments for the `filter` command
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    /// Path to the heap snapshot file
    pub snapshot: PathBuf,

    /// Case-insensitive substring matched against type names
    pub name: String,

    /// Optional cap on the number of rows (None = all matches)
    pub rows: Option<usize>,

    /// Output path for the markdown report (stdout if None)
    pub output: Option<PathBuf>,
}

/// Arguments for the `roots` command
#[derive(Debug, Clone, Default)]
pub struct RootsArgs {
    /// Path to the heap snapshot file
    pub snapshot: PathBuf,

    /// Case-insensitive substring matched against type names
    pub name: String,

    /// Output path for the markdown report (stdout if None)
    pub output: Option<PathBuf>,
}
