//! heapscope CLI
//!
//! Analyzes managed-runtime heap snapshots: which types retain the most
//! memory, and which reference chains keep them alive.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use heapscope::analysis::SortMode;
use heapscope::commands::{
    display_version, execute_filter, execute_roots, execute_top, inspect_snapshot, FilterArgs,
    RootsArgs, TopArgs,
};
use heapscope::utils::config::DEFAULT_REPORT_ROWS;

/// heapscope - retained-size analysis for managed heap snapshots
#[derive(Parser, Debug)]
#[command(name = "heapscope")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the types retaining the most memory (inclusive size)
    Top {
        /// Path to the heap snapshot JSON file
        snapshot: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value_t = DEFAULT_REPORT_ROWS)]
        rows: usize,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the types with the most shallow bytes
    TopSize {
        /// Path to the heap snapshot JSON file
        snapshot: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value_t = DEFAULT_REPORT_ROWS)]
        rows: usize,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the types with the most instances
    TopCount {
        /// Path to the heap snapshot JSON file
        snapshot: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value_t = DEFAULT_REPORT_ROWS)]
        rows: usize,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show all types whose name contains a substring
    Filter {
        /// Path to the heap snapshot JSON file
        snapshot: PathBuf,

        /// Case-insensitive substring to look for in type names
        #[arg(short, long)]
        name: String,

        /// Cap the number of rows (all matches if omitted)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the dominant reference chain keeping matching types alive
    Roots {
        /// Path to the heap snapshot JSON file
        snapshot: PathBuf,

        /// Case-insensitive substring to look for in type names
        #[arg(short, long)]
        name: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a snapshot file and print summary information
    Info {
        /// Path to the heap snapshot JSON file
        snapshot: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Top {
            snapshot,
            rows,
            output,
        } => {
            let args = TopArgs {
                snapshot,
                rows,
                output,
            };
            execute_top(&args, SortMode::InclusiveSize)?;
        }

        Commands::TopSize {
            snapshot,
            rows,
            output,
        } => {
            let args = TopArgs {
                snapshot,
                rows,
                output,
            };
            execute_top(&args, SortMode::Size)?;
        }

        Commands::TopCount {
            snapshot,
            rows,
            output,
        } => {
            let args = TopArgs {
                snapshot,
                rows,
                output,
            };
            execute_top(&args, SortMode::Count)?;
        }

        Commands::Filter {
            snapshot,
            name,
            rows,
            output,
        } => {
            let args = FilterArgs {
                snapshot,
                name,
                rows,
                output,
            };
            execute_filter(&args)?;
        }

        Commands::Roots {
            snapshot,
            name,
            output,
        } => {
            let args = RootsArgs {
                snapshot,
                name,
                output,
            };
            execute_roots(&args)?;
        }

        Commands::Info { snapshot } => {
            inspect_snapshot(snapshot)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
