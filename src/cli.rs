// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sequester")]
#[command(about = "Incident-response containment for cloud compute instances")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub json: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the containment pipeline for a tag-change event
    Contain {
        /// Tag-change event JSON file
        #[arg(long)]
        event: PathBuf,

        /// Inventory snapshot to run against
        #[arg(long)]
        inventory: PathBuf,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the action plan without executing it
        #[arg(long)]
        plan_only: bool,
    },

    /// List instances in an inventory snapshot
    Describe {
        /// Inventory snapshot to read
        #[arg(long)]
        inventory: PathBuf,
    },

    /// Add the containment tag to an instance and emit the tag-change event
    Tag {
        /// Inventory snapshot to update
        #[arg(long)]
        inventory: PathBuf,

        /// Instance to tag
        #[arg(long)]
        id: String,

        /// Tag key to add
        #[arg(long, default_value = sequester::gate::CONTAINMENT_TAG)]
        key: String,

        /// Tag value
        #[arg(long)]
        desc: Option<String>,

        /// Write the synthetic tag-change event here instead of stdout
        #[arg(long)]
        emit_event: Option<PathBuf>,
    },

    /// Remove the containment tag from an instance and emit the tag-change event
    Untag {
        /// Inventory snapshot to update
        #[arg(long)]
        inventory: PathBuf,

        /// Instance to untag
        #[arg(long)]
        id: String,

        /// Tag key to remove
        #[arg(long, default_value = sequester::gate::CONTAINMENT_TAG)]
        key: String,

        /// Write the synthetic tag-change event here instead of stdout
        #[arg(long)]
        emit_event: Option<PathBuf>,
    },
}
