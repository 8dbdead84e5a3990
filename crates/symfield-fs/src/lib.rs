//! Filesystem helpers for symfield
//!
//! Provides normalized path handling, tolerant text reads, locked atomic
//! writes, verified backup copies and candidate file discovery.

pub mod checksum;
pub mod config;
pub mod discovery;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use discovery::{CandidateFilter, Discovery, UnreadableDir, find_candidates};
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
