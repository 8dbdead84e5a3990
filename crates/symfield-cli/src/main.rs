//! symfield CLI
//!
//! Removes one property field from every KiCad symbol library in a directory.

mod cli;
mod commands;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!(
                "{} Strip property fields from KiCad symbol libraries",
                "symfield".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "symfield --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Strip(args) => commands::run_strip(&args),
        Commands::Check { file, field, json } => commands::run_check(&file, &field, json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "symfield", &mut std::io::stdout());
            Ok(())
        }
    }
}
