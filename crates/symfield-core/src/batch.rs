//! Batch driver
//!
//! Finds candidate files under a root directory and runs the
//! [`FileRewriter`] on each in turn. A failure in one file becomes that file's
//! `Error` outcome; the remaining files are still processed. A subdirectory
//! that cannot be listed is reported the same way.

use symfield_fs::{Discovery, NormalizedPath, find_candidates};

use crate::Result;
use crate::config::StripConfig;
use crate::report::{BatchReport, FileOutcome};
use crate::rewriter::FileRewriter;

/// Drives a [`FileRewriter`] over many files.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    rewriter: FileRewriter,
}

impl BatchDriver {
    /// Validate `config` and prepare a driver for it.
    pub fn new(config: StripConfig) -> Result<Self> {
        Ok(Self {
            rewriter: FileRewriter::new(config)?,
        })
    }

    pub fn config(&self) -> &StripConfig {
        self.rewriter.config()
    }

    /// Candidate files under `root`, per the configured extension and
    /// recursion.
    ///
    /// # Errors
    /// Fails when `root` is not a readable directory. This is the only error
    /// that aborts a run.
    pub fn discover(&self, root: &NormalizedPath) -> Result<Discovery> {
        Ok(find_candidates(root, &self.config().candidate_filter())?)
    }

    /// Process every candidate under `root`.
    ///
    /// Subdirectories that could not be listed follow the processed files in
    /// the report as `Error` outcomes.
    pub fn run(&self, root: &NormalizedPath) -> Result<BatchReport> {
        let discovery = self.discover(root)?;
        tracing::info!(root = %root, files = discovery.files.len(), "starting batch");

        let mut report = self.process_files(&discovery.files);
        for dir in discovery.unreadable {
            report.push(
                dir.path,
                FileOutcome::Error {
                    message: format!("directory could not be read: {}", dir.message),
                },
            );
        }
        Ok(report)
    }

    /// Process the given files in order.
    pub fn process_files(&self, files: &[NormalizedPath]) -> BatchReport {
        let config = self.config();
        let mut report = BatchReport::new(config.field_name.as_str(), config.dry_run);

        for path in files {
            let outcome = match self.rewriter.rewrite(path) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "failed to process file");
                    FileOutcome::Error {
                        message: e.to_string(),
                    }
                }
            };
            report.push(path.clone(), outcome);
        }

        tracing::info!(
            modified = report.modified(),
            unchanged = report.unchanged(),
            errors = report.errors(),
            "batch finished"
        );
        report
    }
}
