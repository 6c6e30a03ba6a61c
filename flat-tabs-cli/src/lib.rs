//! flat-tabs - command-line front end for the tab-group resolver.
//!
//! Each subcommand loads a form snapshot, resolves the requested tab-group
//! field and renders the result as a table or JSON. Command functions return
//! their output so they can be tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Commands};
pub use error::{CliError, CliResult};
