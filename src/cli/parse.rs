//! CLI parse: clap types for stepcast. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stepcast CLI - emit structured step and status events on stdout
#[derive(Parser)]
#[command(name = "stepcast")]
#[command(about = "Emit structured, machine-parseable step and status events")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable all diagnostic logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Move to the named step and emit a step event
    Step {
        /// Step name, exactly as it appears in the catalog
        name: String,
        /// Message attached to the event
        message: String,
    },
    /// Emit an info event
    Info { message: String },
    /// Emit a warning event
    Warning { message: String },
    /// Emit an error event
    Error {
        message: String,
        /// Exit code recorded in the event
        #[arg(long, allow_negative_numbers = true)]
        exit_code: Option<i32>,
        /// Extra KEY=VALUE context; repeat for several entries (requires --exit-code)
        #[arg(long = "context", value_name = "KEY=VALUE")]
        context: Vec<String>,
        /// Terminate with the recorded exit code after emitting
        #[arg(long, default_value = "false")]
        exit: bool,
    },
    /// Emit a download (or download progress) event within a step
    Download {
        artifact: String,
        /// Step the download belongs to
        #[arg(long)]
        step: Option<String>,
        /// Percent complete; emits a progress event instead
        #[arg(long)]
        progress: Option<u8>,
    },
    /// List the active step catalog
    Steps,
}
