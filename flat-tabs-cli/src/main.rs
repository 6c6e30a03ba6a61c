//! flat-tabs - tab-group resolver command-line interface.
//!
//! Commands:
//! - `flat-tabs tabs <snapshot> -g <group>`: List the tabs of a tab-group field
//! - `flat-tabs members <snapshot> -g <group>`: List the fields nested under each tab
//! - `flat-tabs scope <snapshot> -g <group>`: Print the values inside the tab group
//! - `flat-tabs active <snapshot> -g <group>`: Show the active tab after validation
//! - `flat-tabs interface`: Print the interface definition
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flat_tabs::commands;
use flat_tabs::{Cli, CliResult, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("flat_tabs=debug,flat_tabs_fields=debug,flat_tabs_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = result_to_exit(dispatch_command(cli.command).await);
    std::process::exit(exit_code);
}

/// Run a subcommand and return what it wants printed.
async fn dispatch_command(cmd: Commands) -> CliResult<String> {
    match cmd {
        Commands::Tabs {
            snapshot,
            group,
            json,
        } => commands::run_tabs(&snapshot, &group, json).await,
        Commands::Members {
            snapshot,
            group,
            json,
        } => commands::run_members(&snapshot, &group, json).await,
        Commands::Scope {
            snapshot,
            group,
            initial,
        } => commands::run_scope(&snapshot, &group, initial).await,
        Commands::Active {
            snapshot,
            group,
            select,
            json,
        } => commands::run_active(&snapshot, &group, select.as_deref(), json).await,
        Commands::Interface { align } => commands::run_interface(align),
    }
}

/// Print the output of a command, or its error, and convert to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<String, E>) -> i32 {
    match result {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
