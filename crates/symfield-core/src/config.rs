//! Run configuration
//!
//! Everything a run needs is carried by [`StripConfig`]. It is built once
//! (from defaults, an optional config file and command-line overrides),
//! validated, and then passed by reference to the rewriter and batch driver.
//!
//! ```toml
//! field_name = "FitPart"
//! recursive = true
//! backup_suffix = ".bak"
//! extension = "kicad_sym"
//! dry_run = false
//! on_unbalanced = "consume"
//! ```

use serde::{Deserialize, Serialize};
use symfield_fs::{CandidateFilter, ConfigStore, NormalizedPath};

use crate::{Error, Result};

pub const DEFAULT_FIELD_NAME: &str = "FitPart";
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";
pub const DEFAULT_EXTENSION: &str = "kicad_sym";

/// What to do when a block is still open at end of file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnbalancedPolicy {
    /// Remove everything from the opening line to end of file, with a warning.
    #[default]
    Consume,
    /// Leave the file untouched and report an error for it.
    Refuse,
}

/// Configuration for one strip run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    /// Field whose `(property "<name>" ...)` blocks are removed.
    pub field_name: String,
    /// Descend into subdirectories when looking for files.
    pub recursive: bool,
    /// Appended to a file's name to form its backup path.
    pub backup_suffix: String,
    /// Extension of candidate files, without the dot.
    pub extension: String,
    /// Report what would change without writing anything.
    pub dry_run: bool,
    pub on_unbalanced: UnbalancedPolicy,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            field_name: DEFAULT_FIELD_NAME.to_string(),
            recursive: false,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            dry_run: false,
            on_unbalanced: UnbalancedPolicy::default(),
        }
    }
}

impl StripConfig {
    /// Defaults with a different field name.
    pub fn for_field(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Self::default()
        }
    }

    /// Load from a `.toml` or `.json` file. Missing keys take their defaults.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, field = %config.field_name, "loaded configuration");
        Ok(config)
    }

    /// Check the values a run depends on.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` for an empty field name or extension, or
    /// a backup suffix that is empty or contains a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.field_name.trim().is_empty() {
            return Err(Error::invalid_config("field_name must not be empty"));
        }
        if self.backup_suffix.is_empty() {
            return Err(Error::invalid_config(
                "backup_suffix must not be empty (backups would overwrite the original)",
            ));
        }
        if self.backup_suffix.contains(['/', '\\']) {
            return Err(Error::invalid_config(format!(
                "backup_suffix {:?} must not contain a path separator",
                self.backup_suffix
            )));
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(Error::invalid_config("extension must not be empty"));
        }
        Ok(())
    }

    /// Where the backup of `path` goes.
    pub fn backup_path_for(&self, path: &NormalizedPath) -> NormalizedPath {
        path.with_appended_suffix(&self.backup_suffix)
    }

    /// Discovery filter for this configuration. Backups are never candidates.
    pub fn candidate_filter(&self) -> CandidateFilter {
        CandidateFilter::new(self.extension.as_str())
            .recursive(self.recursive)
            .excluding_suffix(self.backup_suffix.as_str())
    }
}
