//! Semester segmentation of the full document text.
//!
//! Semester headers («<digits> семестр», optionally preceded by an
//! elective-pool preamble) are the only reliably recurring structural marker
//! in these documents: everything between two headers belongs to the earlier
//! one, regardless of internal formatting.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a semester boundary: optional elective-pool preamble
/// («Пул выборных дисциплин.» / «Пул дисциплин.»), then the semester number
/// and the word «семестр». Group 1 captures the digit string used as the
/// semester label.
static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Пул\s+(?:выборных\s+)?дисциплин\.?\s+)?(\d+)\s+семестр")
        .expect("semester boundary regex")
});

/// One contiguous span of source text attributed to a semester label.
///
/// `text` borrows from the document and includes the boundary marker itself;
/// the marker line carries no course columns, so downstream line extraction
/// treats it as noise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterBlock<'a> {
    /// The captured digit string (label-naive: never interpreted numerically).
    pub label: String,
    /// Block text from this boundary up to the next one (or end of text).
    pub text: &'a str,
}

/// Split document text into ordered semester blocks.
///
/// Blocks are emitted in order of appearance. Duplicate or out-of-numeric-
/// order labels each yield their own block; coalescing by label is the
/// document builder's concern, not the segmenter's. Text before the first
/// boundary belongs to no semester. No boundary at all yields an empty list.
pub fn split_semesters(text: &str) -> Vec<SemesterBlock<'_>> {
    // The regex crate has no lookahead, so the "up to the next marker"
    // bound is expressed positionally: collect every boundary match, then
    // slice between consecutive match starts.
    let boundaries: Vec<(usize, String)> = BOUNDARY_RE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("boundary match");
            (whole.start(), caps[1].to_string())
        })
        .collect();

    boundaries
        .iter()
        .enumerate()
        .map(|(i, (start, label))| {
            let end = boundaries
                .get(i + 1)
                .map(|(next_start, _)| *next_start)
                .unwrap_or(text.len());
            SemesterBlock {
                label: label.clone(),
                text: &text[*start..end],
            }
        })
        .collect()
}
