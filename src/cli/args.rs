//! CLI argument definitions using clap
//!
//! Commands:
//! - foliocms init --config <path>
//! - foliocms start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FolioCMS - flat-file content management for small portfolio sites
#[derive(Parser, Debug)]
#[command(name = "foliocms")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the data directory, content document, and admin login
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./foliocms.json")]
        config: PathBuf,
    },

    /// Start the content server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./foliocms.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_default_config_path() {
        let cli = Cli::try_parse_from(["foliocms", "init"]).unwrap();
        match cli.command {
            Command::Init { config } => {
                assert_eq!(config, PathBuf::from("./foliocms.json"));
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn test_start_custom_config_path() {
        let cli = Cli::try_parse_from(["foliocms", "start", "--config", "/etc/folio.json"]).unwrap();
        match cli.command {
            Command::Start { config } => {
                assert_eq!(config, PathBuf::from("/etc/folio.json"));
            }
            _ => panic!("expected start"),
        }
    }
}
