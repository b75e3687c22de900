//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use models::{FilterArgs, RootsArgs, TopArgs};
pub use report::{execute_filter, execute_roots, execute_top, validate_name, validate_rows};
pub use utils::{display_version, inspect_snapshot};
