//! The document→structure extraction engine.
//!
//! Takes the raw, page-concatenated text of one academic-program document
//! (of unknown and inconsistent formatting) and produces the typed
//! program → semester → course hierarchy. Pure computation over the supplied
//! string: deterministic, idempotent, no I/O — reading the text and writing
//! artifacts are the caller's concern.
//!
//! Pipeline per document:
//! 1. [`program_info::extract_program_info`] — labeled-field metadata
//! 2. [`segmenter::split_semesters`] — semester boundary segmentation
//! 3. [`courses::extract_courses`] — per-block course-line classification

pub mod courses;
pub mod program_info;
pub mod segmenter;

use tracing::{debug, instrument};

use curricula_shared::{CurriculumDocument, Semesters};

pub use courses::{extract_courses, parse_course_line};
pub use program_info::extract_program_info;
pub use segmenter::{SemesterBlock, split_semesters};

/// Extract the full structure of one document from its text.
///
/// Extraction misses (an unmatched label, an unrecognized line) are expected
/// with this corpus and simply leave gaps in the result; nothing here fails.
/// Duplicate semester labels coalesce by appending the later block's courses.
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn extract_document(text: &str) -> CurriculumDocument {
    let program_info = program_info::extract_program_info(text);

    let mut semesters = Semesters::new();
    for block in segmenter::split_semesters(text) {
        let courses = courses::extract_courses(block.text);
        semesters.push(block.label, courses);
    }

    debug!(
        semesters = semesters.len(),
        has_name = program_info.name.is_some(),
        "document extracted"
    );

    CurriculumDocument {
        program_info,
        semesters,
    }
}
