pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Sync your team's SSH keys. Converge your key pairs. Bootstrap your fleet.
#[derive(Parser, Debug)]
#[command(name = "keywarden", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = "keywarden.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Keywarden in the current directory
    Init,

    /// Show the add/delete plan without changing anything
    Plan,

    /// Converge the provider inventory and publish the template
    Sync {
        /// Compute and report, but apply and publish nothing
        #[arg(long)]
        dry_run: bool,

        /// Permit deleting every managed key pair
        #[arg(long)]
        allow_teardown: bool,
    },

    /// Render the bootstrap template from the source keys
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show source, inventory, and convergence status
    Status,
}
