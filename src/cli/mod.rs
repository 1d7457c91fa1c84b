//! CLI module
//!
//! Commands:
//! - init: seed config, data directory, content document, admin credentials
//! - start: boot the HTTP server and serve until stopped

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, start, Config};
pub use errors::{CliError, CliResult};
