use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rsrcscope - Apple IIgs resource fork inspection and extraction
#[derive(Debug, Parser)]
#[command(name = "rsrcscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display header fields and resource counts.
    Info {
        /// Path to the resource fork.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// List resources with their attributes, sizes and names.
    List {
        /// Path to the resource fork.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Show only one type (e.g. rPString, 0x8006, 32774).
        #[arg(short, long, value_name = "TYPE")]
        r#type: Option<String>,
    },

    /// Write the payload of one resource to a file or stdout.
    Extract {
        /// Path to the resource fork.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Resource type (e.g. rPString, 0x8006, 32774).
        #[arg(short, long, value_name = "TYPE")]
        r#type: String,

        /// Resource id (hex like 0x1 or decimal).
        #[arg(long, value_name = "ID", conflicts_with = "name", required_unless_present = "name")]
        id: Option<String>,

        /// Resource name, looked up in the type's name table.
        #[arg(long, value_name = "NAME")]
        name: Option<String>,

        /// Output file (default: stdout).
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}
