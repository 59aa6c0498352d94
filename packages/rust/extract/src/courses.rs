//! Course-line extraction within one semester block.
//!
//! Processing is line-oriented: each trimmed non-blank line is tested
//! against an explicit, priority-ordered rule list — most specific first,
//! first match wins. Lines matching no rule are noise (section sub-headers,
//! page artifacts, continuation text) and are skipped silently; there is no
//! line-level error reporting.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use curricula_shared::CourseRecord;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Four-field layout: `<number> <name (no digits)> <credits> <hours>`.
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+([^\d]+?)\s+(\d+)\s+(\d+)").expect("numbered course regex"));

/// Three-field layout: `<name (no digits)> <credits> <hours>`, anchored at
/// end of line so a numbered line's leading digits cannot leak into `name`.
static UNNUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\d]+?)\s+(\d+)\s+(\d+)$").expect("unnumbered course regex"));

// ---------------------------------------------------------------------------
// Line rule table
// ---------------------------------------------------------------------------

/// One column-layout rule: a pattern plus the record constructor for its
/// capture groups. Rule order is the precedence order — keep the most
/// specific layout first.
struct LineRule {
    name: &'static str,
    pattern: &'static LazyLock<Regex>,
    build: fn(&Captures<'_>) -> Option<CourseRecord>,
}

static LINE_RULES: &[LineRule] = &[
    LineRule {
        name: "numbered",
        pattern: &NUMBERED_RE,
        build: build_numbered,
    },
    LineRule {
        name: "unnumbered",
        pattern: &UNNUMBERED_RE,
        build: build_unnumbered,
    },
];

fn build_numbered(caps: &Captures<'_>) -> Option<CourseRecord> {
    Some(CourseRecord {
        number: Some(caps[1].to_string()),
        name: non_empty_name(&caps[2])?,
        credits: caps[3].parse().ok()?,
        hours: caps[4].parse().ok()?,
    })
}

fn build_unnumbered(caps: &Captures<'_>) -> Option<CourseRecord> {
    Some(CourseRecord {
        number: None,
        name: non_empty_name(&caps[1])?,
        credits: caps[2].parse().ok()?,
        hours: caps[3].parse().ok()?,
    })
}

/// CourseRecord invariant: the name must be non-empty after trimming.
fn non_empty_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Classify a single trimmed line against the rule list.
///
/// The first rule whose pattern matches owns the line: if its constructor
/// then rejects the captures (empty name, digit run overflowing `u32`), the
/// line is dropped with a debug trace rather than falling through — a
/// matched-but-unbuildable line signals a pattern-specification bug, not a
/// line for the next rule.
pub fn parse_course_line(line: &str) -> Option<CourseRecord> {
    for rule in LINE_RULES {
        if let Some(caps) = rule.pattern.captures(line) {
            let record = (rule.build)(&caps);
            if record.is_none() {
                debug!(rule = rule.name, line, "matched line failed record invariants, skipping");
            }
            return record;
        }
    }
    None
}

/// Extract the ordered course records from one semester block's text.
///
/// Record order equals source line order.
pub fn extract_courses(block_text: &str) -> Vec<CourseRecord> {
    block_text
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                parse_course_line(line)
            }
        })
        .collect()
}
