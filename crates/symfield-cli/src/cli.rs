//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// symfield - Strip property fields from KiCad symbol libraries
#[derive(Parser, Debug)]
#[command(name = "symfield")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Remove a field from every symbol library in a directory
    ///
    /// Each visited file is first copied to <file><backup-suffix>. Files in
    /// which the field is found are rewritten; all others are left untouched.
    ///
    /// Examples:
    ///   symfield strip                       # FitPart, current directory
    ///   symfield strip libs -f DNP -r        # DNP, whole tree under libs/
    ///   symfield strip --dry-run --diff      # Preview changes
    Strip(StripArgs),

    /// Show which blocks would be removed from one file (read-only)
    Check {
        /// Symbol library to inspect
        file: PathBuf,

        /// Field name to look for
        #[arg(short, long, default_value = symfield_core::config::DEFAULT_FIELD_NAME)]
        field: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   symfield completions bash > ~/.local/share/bash-completion/completions/symfield
    ///   symfield completions zsh > ~/.zfunc/_symfield
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options for `symfield strip`. Unset options fall back to the config file,
/// then to built-in defaults.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StripArgs {
    /// Directory containing the libraries
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Field name to remove (default: FitPart)
    #[arg(short, long, env = "SYMFIELD_FIELD")]
    pub field: Option<String>,

    /// Include subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Suffix appended to each file name for its backup (default: .bak)
    #[arg(long)]
    pub backup_suffix: Option<String>,

    /// Extension of files to process (default: kicad_sym)
    #[arg(long)]
    pub extension: Option<String>,

    /// Preview changes without writing files or backups
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print a unified diff per modified file
    #[arg(long, requires = "dry_run")]
    pub diff: bool,

    /// Fail a file instead of removing to end of file when a block never closes
    #[arg(long)]
    pub strict: bool,

    /// Configuration file (.toml or .json); defaults to <DIR>/symfield.toml if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}
