//! Read-side renderers over an extracted curriculum collection.
//!
//! Everything here renders to `String`; writing files (and checksumming
//! them) is the core assembler's concern. Renderers are pure projections:
//! rendering twice over the same collection is byte-identical.
//!
//! - [`table`] — flat course rows + the stable course CSV contract
//! - [`narrative`] — markdown for language-model consumption
//! - [`summary`] — per-program totals and the semester × program pivot
//! - [`collection_json`] — the pretty-printed JSON contract

pub mod narrative;
pub mod summary;
pub mod table;

use tracing::debug;

use curricula_shared::{CurriculaError, CurriculumCollection, Result};

pub use narrative::render_collection;
pub use summary::{
    PivotRow, ProgramSummaryRow, SemesterPivot, program_summary, program_summary_csv,
    semester_pivot, semester_pivot_csv,
};
pub use table::{COURSE_CSV_HEADER, CourseRow, collection_rows, rows_to_csv};

/// Serialize a collection to the JSON output contract: top-level keys are
/// program names, pretty-printed, UTF-8 with non-ASCII preserved literally.
pub fn collection_json(collection: &CurriculumCollection) -> Result<String> {
    let json = serde_json::to_string_pretty(collection)
        .map_err(|e| CurriculaError::validation(format!("JSON serialization failed: {e}")))?;
    debug!(programs = collection.len(), "collection serialized to JSON");
    Ok(json)
}

/// Map any CSV-layer failure into the unified error type.
pub(crate) fn csv_error(err: impl std::fmt::Display) -> CurriculaError {
    CurriculaError::Csv(err.to_string())
}

// ---------------------------------------------------------------------------
// Shared test data
// ---------------------------------------------------------------------------
