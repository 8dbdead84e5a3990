//! File rewriting and batch orchestration for symfield
//!
//! This crate sits between the scanner and the command line:
//!
//! ```text
//!                 symfield-cli
//!                      |
//!                symfield-core
//!                 /          \
//!        symfield-blocks   symfield-fs
//! ```
//!
//! - [`config`]: the [`StripConfig`] value every run is driven by
//! - [`rewriter`]: backup, scan and conditional rewrite of one file
//! - [`batch`]: discovery plus per-file processing with isolated failures
//! - [`report`]: per-file outcomes and the aggregated [`BatchReport`]
//!
//! # Example
//!
//! ```no_run
//! use symfield_core::{BatchDriver, StripConfig};
//! use symfield_fs::NormalizedPath;
//!
//! # fn main() -> symfield_core::Result<()> {
//! let driver = BatchDriver::new(StripConfig::for_field("FitPart"))?;
//! let report = driver.run(&NormalizedPath::new("libraries"))?;
//! println!("{} modified, {} errors", report.modified(), report.errors());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod report;
pub mod rewriter;

pub use batch::BatchDriver;
pub use config::{StripConfig, UnbalancedPolicy};
pub use error::{Error, Result};
pub use report::{BatchReport, FileOutcome, FileReport};
pub use rewriter::{FileRewriter, unified_diff};
