//! Strip command implementation
//!
//! Resolves the run configuration, drives the batch and prints one line per
//! file.

use colored::Colorize;
use symfield_core::{BatchDriver, BatchReport, FileOutcome, StripConfig, UnbalancedPolicy};
use symfield_fs::NormalizedPath;

use crate::cli::StripArgs;
use crate::error::{CliError, Result};

/// Config file picked up from the target directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "symfield.toml";

/// Merge defaults, the config file and command-line flags, in that order.
pub fn resolve_config(args: &StripArgs) -> Result<StripConfig> {
    let mut config = match &args.config {
        Some(path) => StripConfig::load(&NormalizedPath::new(path))?,
        None => {
            let implicit = NormalizedPath::new(args.dir.join(CONFIG_FILE_NAME));
            if implicit.is_file() {
                StripConfig::load(&implicit)?
            } else {
                StripConfig::default()
            }
        }
    };

    if let Some(field) = &args.field {
        config.field_name = field.clone();
    }
    if let Some(suffix) = &args.backup_suffix {
        config.backup_suffix = suffix.clone();
    }
    if let Some(extension) = &args.extension {
        config.extension = extension.clone();
    }
    if args.recursive {
        config.recursive = true;
    }
    if args.dry_run {
        config.dry_run = true;
    }
    if args.strict {
        config.on_unbalanced = UnbalancedPolicy::Refuse;
    }

    config.validate()?;
    Ok(config)
}

/// Run the strip command.
///
/// Returns an error when the directory cannot be enumerated or when any file
/// failed; in the latter case every other file has still been processed.
pub fn run_strip(args: &StripArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let driver = BatchDriver::new(config)?;
    let report = driver.run(&NormalizedPath::new(&args.dir))?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report, args.diff);
    }

    if report.success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} of {} file(s) could not be processed",
            report.errors(),
            report.files.len()
        )))
    }
}

fn backup_name(backup: &NormalizedPath) -> &str {
    backup.file_name().unwrap_or(backup.as_str())
}

/// Print the human-readable report.
fn print_report(report: &BatchReport, show_diff: bool) {
    let field = report.field.as_str();

    if report.files.is_empty() {
        println!("{} No matching files found.", "OK".green().bold());
        return;
    }

    for file in &report.files {
        println!("Processing: {}", file.path);
        match &file.outcome {
            FileOutcome::Unchanged { .. } => {
                println!(" {} No '{}' field found (no changes)", "→".dimmed(), field);
            }
            FileOutcome::Modified {
                backup,
                blocks_removed,
                unterminated,
                diff,
                ..
            } => {
                if report.dry_run {
                    println!(
                        " {} Would remove field '{}' ({} block(s))",
                        "→".yellow(),
                        field,
                        blocks_removed
                    );
                } else {
                    println!(
                        " {} Field '{}' removed ({} block(s), backup: {})",
                        "→".green(),
                        field,
                        blocks_removed,
                        backup_name(backup)
                    );
                }
                if *unterminated {
                    println!(
                        " {} last block never closed; removed through end of file",
                        "!".yellow().bold()
                    );
                }
                if show_diff && let Some(diff) = diff {
                    print_diff(diff);
                }
            }
            FileOutcome::Error { message } => {
                println!(
                    " {} Error processing {}: {}",
                    "!!".red().bold(),
                    file.path,
                    message
                );
            }
        }
    }

    println!();
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    println!(
        "{}{} modified, {} unchanged, {} error(s)",
        prefix,
        report.modified().to_string().green(),
        report.unchanged(),
        if report.errors() > 0 {
            report.errors().to_string().red()
        } else {
            report.errors().to_string().normal()
        }
    );
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        let colored_line = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("    {}", colored_line);
    }
}
