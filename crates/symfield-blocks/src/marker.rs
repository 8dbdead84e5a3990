//! Opening-marker detection for property blocks.
//!
//! A line opens a block when it contains `(property "<field>"`, allowing any
//! whitespace after the parenthesis and between the keyword and the quoted
//! name. Keyword and name are matched case-insensitively. Only the start of a
//! block is recognised here; where it ends is the scanner's job.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// The S-expression keyword that introduces a field.
pub const PROPERTY_KEYWORD: &str = "property";

/// Tests single lines for the opening marker of one field.
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    field: String,
    pattern: Regex,
}

impl FieldMatcher {
    /// Build a matcher for `field`.
    ///
    /// # Errors
    /// Returns `Error::EmptyFieldName` when `field` is empty or whitespace.
    ///
    /// # Example
    /// ```
    /// use symfield_blocks::FieldMatcher;
    ///
    /// let matcher = FieldMatcher::new("FitPart").unwrap();
    /// assert!(matcher.opens_block("    (property \"fitpart\" \"Yes\""));
    /// assert!(!matcher.opens_block("    (property \"Value\" \"FitPart\""));
    /// ```
    pub fn new(field: &str) -> Result<Self> {
        if field.trim().is_empty() {
            return Err(Error::EmptyFieldName);
        }

        let source = format!(
            r#"\(\s*{}\s+"{}""#,
            PROPERTY_KEYWORD,
            regex::escape(field)
        );
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidFieldName {
                field: field.to_string(),
                source,
            })?;

        Ok(Self {
            field: field.to_string(),
            pattern,
        })
    }

    /// The field name this matcher was built for.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Whether `line` contains the opening marker.
    pub fn opens_block(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}
