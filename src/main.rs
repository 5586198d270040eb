mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(&args.config),
        Commands::Plan => cli::commands::plan::execute(&args.config),
        Commands::Sync {
            dry_run,
            allow_teardown,
        } => cli::commands::sync::execute(&args.config, *dry_run, *allow_teardown),
        Commands::Render { output } => {
            cli::commands::render::execute(&args.config, output.as_deref())
        }
        Commands::Status => cli::commands::status::execute(&args.config),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
