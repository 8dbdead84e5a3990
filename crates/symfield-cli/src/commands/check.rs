//! Check command implementation
//!
//! Read-only: reports the blocks a strip run would remove from one file.

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use symfield_blocks::{FieldMatcher, ScanReport, scan_lines, split_lines};
use symfield_fs::{NormalizedPath, io};

use crate::error::Result;

/// Scan `file` for `field` blocks without touching it.
pub fn inspect(file: &Path, field: &str) -> Result<(ScanReport, Vec<String>)> {
    let path = NormalizedPath::new(file);
    let matcher = FieldMatcher::new(field)?;
    let (text, _) = io::read_text_lossy(&path)?;
    let lines = split_lines(&text);
    let report = scan_lines(&lines, &matcher);

    let openers = report
        .occurrences
        .iter()
        .map(|block| lines[block.start].trim().to_string())
        .collect();

    Ok((report, openers))
}

/// Run the check command.
pub fn run_check(file: &Path, field: &str, json: bool) -> Result<()> {
    let (report, openers) = inspect(file, field)?;

    if json {
        let blocks: Vec<_> = report
            .occurrences
            .iter()
            .map(|b| json!({ "start_line": b.start + 1, "end_line": b.end + 1 }))
            .collect();
        let output = json!({
            "file": file.display().to_string(),
            "field": field,
            "blocks": blocks,
            "unterminated": report.unterminated,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if report.is_empty() {
        println!(
            "{} No '{}' field in {}",
            "OK".green().bold(),
            field,
            file.display()
        );
        return Ok(());
    }

    println!(
        "{} '{}' block(s) in {}:",
        report.occurrences.len(),
        field,
        file.display()
    );
    for (block, opener) in report.occurrences.iter().zip(&openers) {
        let range = format!("{:<14}", block.to_string());
        println!("  {} {}", range.cyan(), opener.dimmed());
    }
    if report.unterminated {
        println!(
            "{} last block never closes; a strip run would remove through end of file",
            "!".yellow().bold()
        );
    }
    Ok(())
}
