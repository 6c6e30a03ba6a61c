//! CLI definition for the flat-tabs command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flat_tabs_fields::Align;

/// flat-tabs - tab-group resolver for CMS field schemas
///
/// Reads a form snapshot (fields, values, validation errors) and shows how a
/// tab-group field splits it into tabs.
#[derive(Parser, Debug)]
#[command(name = "flat-tabs")]
#[command(version)]
#[command(about = "Resolve tab groups over a CMS field schema")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tabs of a tab-group field
    Tabs {
        /// Snapshot file (.json, .yaml or .yml)
        snapshot: PathBuf,
        /// Name of the tab-group field
        #[arg(short, long)]
        group: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every field nested under each tab
    Members {
        /// Snapshot file (.json, .yaml or .yml)
        snapshot: PathBuf,
        /// Name of the tab-group field
        #[arg(short, long)]
        group: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the snapshot values that fall inside the tab group
    Scope {
        /// Snapshot file (.json, .yaml or .yml)
        snapshot: PathBuf,
        /// Name of the tab-group field
        #[arg(short, long)]
        group: String,
        /// Filter initial values instead of current edits
        #[arg(long)]
        initial: bool,
    },
    /// Work out which tab is open after the snapshot's validation errors
    Active {
        /// Snapshot file (.json, .yaml or .yml)
        snapshot: PathBuf,
        /// Name of the tab-group field
        #[arg(short, long)]
        group: String,
        /// Tab the user selected before the errors arrived
        #[arg(long)]
        select: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the interface definition registered with the host
    Interface {
        /// Default tab alignment (overrides configuration)
        #[arg(long)]
        align: Option<Align>,
    },
}
