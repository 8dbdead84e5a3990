//! Single-file rewriting
//!
//! For each file the [`FileRewriter`]:
//!
//! 1. copies the original to `<path><backup_suffix>` and verifies the copy,
//!    whether or not anything will change;
//! 2. reads the file, replacing malformed UTF-8;
//! 3. strips the configured field's blocks;
//! 4. writes the result with `\n` terminators only if the text changed.
//!
//! Unchanged files are never opened for writing, so their bytes and
//! modification time stay as they were. Dry runs skip steps 1 and 4.

use similar::TextDiff;
use symfield_blocks::{FieldMatcher, normalize_line_endings, strip};
use symfield_fs::{NormalizedPath, RobustnessConfig, io};

use crate::config::{StripConfig, UnbalancedPolicy};
use crate::report::FileOutcome;
use crate::{Error, Result};

/// Applies one [`StripConfig`] to individual files.
#[derive(Debug, Clone)]
pub struct FileRewriter {
    config: StripConfig,
    matcher: FieldMatcher,
    robustness: RobustnessConfig,
}

impl FileRewriter {
    /// Validate `config` and compile its field matcher.
    pub fn new(config: StripConfig) -> Result<Self> {
        config.validate()?;
        let matcher = FieldMatcher::new(&config.field_name)?;
        Ok(Self {
            config,
            matcher,
            robustness: RobustnessConfig::default(),
        })
    }

    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Process one file.
    ///
    /// # Errors
    /// I/O failures, a failed backup verification, or an unbalanced block
    /// under [`UnbalancedPolicy::Refuse`]. In every error case the original
    /// file has not been written.
    pub fn rewrite(&self, path: &NormalizedPath) -> Result<FileOutcome> {
        let backup = self.config.backup_path_for(path);

        if !self.config.dry_run {
            io::copy_verified(path, &backup)?;
        }

        let (text, lossy) = io::read_text_lossy(path)?;
        let stripped = strip(&text, &self.matcher);
        let field = self.matcher.field();

        for block in &stripped.report.occurrences {
            tracing::debug!(path = %path, field, %block, "removing block");
        }

        if stripped.report.unterminated {
            let start = stripped
                .report
                .occurrences
                .last()
                .map(|b| b.start + 1)
                .unwrap_or_default();
            match self.config.on_unbalanced {
                UnbalancedPolicy::Refuse => {
                    return Err(Error::UnbalancedBlock {
                        path: path.to_native(),
                        field: field.to_string(),
                        line: start,
                    });
                }
                UnbalancedPolicy::Consume => {
                    tracing::warn!(
                        path = %path,
                        field,
                        line = start,
                        "block never closes; removing to end of file"
                    );
                }
            }
        }

        if stripped.text == text {
            tracing::info!(path = %path, field, "no matching field, file left untouched");
            return Ok(FileOutcome::Unchanged { backup });
        }

        let output = normalize_line_endings(&stripped.text);
        let diff = if self.config.dry_run {
            Some(unified_diff(path, &text, &output))
        } else {
            if lossy {
                tracing::warn!(
                    path = %path,
                    "rewriting a file that contained invalid UTF-8; replacement characters are kept"
                );
            }
            io::write_text(path, &output, self.robustness)?;
            None
        };

        tracing::info!(
            path = %path,
            field,
            blocks = stripped.report.occurrences.len(),
            dry_run = self.config.dry_run,
            "field removed"
        );

        Ok(FileOutcome::Modified {
            backup,
            blocks_removed: stripped.report.occurrences.len(),
            lines_removed: stripped.report.removed_lines(),
            unterminated: stripped.report.unterminated,
            diff,
        })
    }
}

/// Unified diff between the current and the rewritten content of `path`.
pub fn unified_diff(path: &NormalizedPath, old: &str, new: &str) -> String {
    let old_header = format!("a/{}", path);
    let new_header = format!("b/{}", path);
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(2)
        .header(&old_header, &new_header)
        .to_string()
}
