//! Balanced property-block scanner for KiCad S-expression text.
//!
//! Symbol libraries (`*.kicad_sym`) store per-symbol fields as blocks like:
//!
//! ```text
//! (property "FitPart" "Yes"
//!   (at 0 0 0)
//!   (effects (font (size 1.27 1.27)) (hide yes))
//! )
//! ```
//!
//! This crate finds every such block for one field name and removes it,
//! leaving every other byte of the document untouched: whitespace, line
//! terminators and ordering included.
//!
//! - [`marker`] decides whether a line opens a block.
//! - [`scanner`] tracks parenthesis depth to find where each block ends and
//!   excises the ranges.
//! - [`lines`] splits text into lines without losing terminators.

pub mod error;
pub mod lines;
pub mod marker;
pub mod scanner;

pub use error::{Error, Result};
pub use lines::{normalize_line_endings, split_lines};
pub use marker::{FieldMatcher, PROPERTY_KEYWORD};
pub use scanner::{
    BlockOccurrence, ScanReport, Stripped, excise, remove_blocks, scan, scan_lines, strip,
    strip_field,
};
