//! Block scanning and removal.
//!
//! The scanner walks a document once, line by line, with two pieces of state:
//! whether it is inside an open block and the current parenthesis depth.
//! There is no parse tree and no recursion, so nesting depth never costs
//! stack.
//!
//! Depth is the count of `(` minus the count of `)` on each consumed line,
//! starting with the opening line itself. A block closes on the first line
//! where the running depth is zero or below, and that line belongs to the
//! block. Parentheses inside quoted strings are counted like any other; files
//! written by KiCad keep the totals balanced, so this does not matter in
//! practice.
//!
//! ```text
//! (symbol "R"
//!   (property "FitPart" "Yes"      <- opens, depth 1
//!     (effects (font (size 1 1)))  <- depth 1
//!   )                              <- depth 0, closes
//!   (property "Value" "R")
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::lines::split_lines;
use crate::marker::FieldMatcher;

/// One block to remove: an inclusive range of 0-based line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockOccurrence {
    /// Line carrying the opening marker.
    pub start: usize,
    /// Line where the depth returned to zero (or the last line of the
    /// document when the block never closed).
    pub end: usize,
}

impl BlockOccurrence {
    /// Number of lines the block spans.
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

impl std::fmt::Display for BlockOccurrence {
    /// Formats as 1-based line numbers, the way editors show them.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "line {}", self.start + 1)
        } else {
            write!(f, "lines {}-{}", self.start + 1, self.end + 1)
        }
    }
}

/// Result of scanning one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Blocks in document order. Never overlapping.
    pub occurrences: Vec<BlockOccurrence>,
    /// The last block was still open at end of input. Its range then runs to
    /// the final line.
    pub unterminated: bool,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Total number of lines covered by all blocks.
    pub fn removed_lines(&self) -> usize {
        self.occurrences.iter().map(BlockOccurrence::line_count).sum()
    }
}

/// Text with blocks removed, plus what was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    pub text: String,
    pub report: ScanReport,
}

impl Stripped {
    pub fn changed(&self) -> bool {
        !self.report.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    Inside { start: usize, depth: i64 },
}

fn depth_delta(line: &str) -> i64 {
    line.bytes().fold(0, |acc, b| match b {
        b'(' => acc + 1,
        b')' => acc - 1,
        _ => acc,
    })
}

/// Find every block opened by `matcher` in a list of lines.
pub fn scan_lines(lines: &[&str], matcher: &FieldMatcher) -> ScanReport {
    let mut report = ScanReport::default();
    let mut state = ScanState::Outside;

    for (index, line) in lines.iter().enumerate() {
        state = match state {
            ScanState::Outside if matcher.opens_block(line) => ScanState::Inside {
                start: index,
                depth: depth_delta(line),
            },
            ScanState::Outside => continue,
            ScanState::Inside { start, depth } => ScanState::Inside {
                start,
                depth: depth + depth_delta(line),
            },
        };

        if let ScanState::Inside { start, depth } = state
            && depth <= 0
        {
            tracing::trace!(field = matcher.field(), start, end = index, "block closed");
            report.occurrences.push(BlockOccurrence { start, end: index });
            state = ScanState::Outside;
        }
    }

    if let ScanState::Inside { start, depth } = state {
        let end = lines.len() - 1;
        tracing::debug!(
            field = matcher.field(),
            start,
            depth,
            "block still open at end of input"
        );
        report.occurrences.push(BlockOccurrence { start, end });
        report.unterminated = true;
    }

    report
}

/// Find every block opened by `matcher` in `text`.
pub fn scan(text: &str, matcher: &FieldMatcher) -> ScanReport {
    scan_lines(&split_lines(text), matcher)
}

/// Join `lines`, skipping every line covered by `occurrences`.
///
/// `occurrences` must be sorted and non-overlapping, as `scan_lines` returns
/// them.
pub fn excise(lines: &[&str], occurrences: &[BlockOccurrence]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len()).sum());
    let mut blocks = occurrences.iter().peekable();

    for (index, line) in lines.iter().enumerate() {
        while blocks.peek().is_some_and(|b| b.end < index) {
            blocks.next();
        }
        if blocks.peek().is_some_and(|b| b.contains(index)) {
            continue;
        }
        out.push_str(line);
    }
    out
}

/// Remove every block opened by `matcher`, keeping all other lines verbatim.
pub fn strip(text: &str, matcher: &FieldMatcher) -> Stripped {
    let lines = split_lines(text);
    let report = scan_lines(&lines, matcher);
    let text = if report.is_empty() {
        text.to_string()
    } else {
        excise(&lines, &report.occurrences)
    };
    Stripped { text, report }
}

/// Remove every block opened by `matcher` and return the remaining text.
///
/// # Example
/// ```
/// use symfield_blocks::{FieldMatcher, remove_blocks};
///
/// let matcher = FieldMatcher::new("FitPart").unwrap();
/// let text = "(symbol \"R\"\n  (property \"FitPart\" \"Yes\")\n)\n";
/// assert_eq!(remove_blocks(text, &matcher), "(symbol \"R\"\n)\n");
/// ```
pub fn remove_blocks(text: &str, matcher: &FieldMatcher) -> String {
    strip(text, matcher).text
}

/// Build a matcher for `field` and remove its blocks from `text`.
///
/// # Errors
/// Returns an error when `field` is empty.
pub fn strip_field(text: &str, field: &str) -> Result<String> {
    let matcher = FieldMatcher::new(field)?;
    Ok(remove_blocks(text, &matcher))
}
