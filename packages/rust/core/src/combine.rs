//! Cross-directory combination and summary statistics.
//!
//! After a batch, per-directory results merge into combined artifacts plus
//! two summaries: per-(directory, program) count/credit totals and the
//! semester × program credit pivot. Both are read-side projections over the
//! already-built collections — no new extraction logic.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, instrument};

use curricula_artifacts::{
    CourseRow, collection_rows, program_summary_csv, render_collection, rows_to_csv,
    semester_pivot_csv,
};
use curricula_shared::{
    CURRENT_SCHEMA_VERSION, CurriculaError, Result, RunId, RunManifest,
};

use crate::assembler::{MANIFEST_JSON, write_artifacts, write_json};
use crate::pipeline::ProcessDirResult;

/// Combined course CSV filename.
pub const ALL_COURSES_CSV: &str = "curriculum_all_courses.csv";
/// Combined narrative filename.
pub const ALL_NARRATIVE_MD: &str = "curriculum_all_programs_for_llm.md";
/// Per-(directory, program) summary filename.
pub const SUMMARY_STATS_CSV: &str = "curriculum_summary_stats.csv";
/// Semester × program pivot filename.
pub const SEMESTER_SUMMARY_CSV: &str = "curriculum_semester_summary.csv";

/// Rendered cross-directory artifacts.
#[derive(Debug, Clone)]
pub struct CombinedArtifacts {
    /// All course rows across directories, one CSV.
    pub courses_csv: String,
    /// Per-directory narratives, blank-line separated.
    pub narrative: String,
    /// Per-(directory, program) count/credit summary CSV.
    pub summary_csv: String,
    /// Semester × program credit pivot CSV (zero-filled).
    pub pivot_csv: String,
    /// Total course rows across the batch.
    pub row_count: usize,
    /// Documents successfully processed across the batch.
    pub document_count: usize,
    /// Programs across the batch.
    pub program_count: usize,
}

/// Merge per-directory results into the combined artifact set.
pub fn combine(results: &[ProcessDirResult]) -> Result<CombinedArtifacts> {
    let mut rows: Vec<CourseRow> = Vec::new();
    let mut narratives: Vec<String> = Vec::new();
    let mut document_count = 0;
    let mut program_count = 0;

    for result in results {
        rows.extend(collection_rows(&result.directory, &result.collection));
        narratives.push(render_collection(&result.directory, &result.collection));
        document_count += result.documents_processed;
        program_count += result.collection.len();
    }

    Ok(CombinedArtifacts {
        courses_csv: rows_to_csv(&rows)?,
        narrative: narratives.join("\n\n"),
        summary_csv: program_summary_csv(&rows)?,
        pivot_csv: semester_pivot_csv(&rows)?,
        row_count: rows.len(),
        document_count,
        program_count,
    })
}

/// Write the combined artifacts (plus a manifest) at the output root.
#[instrument(skip_all, fields(root = %output_root.display()))]
pub fn write_combined(
    output_root: &Path,
    combined: &CombinedArtifacts,
    tool_version: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_root).map_err(|e| CurriculaError::io(output_root, e))?;

    let artifacts: Vec<(&str, &str)> = vec![
        (ALL_COURSES_CSV, &combined.courses_csv),
        (ALL_NARRATIVE_MD, &combined.narrative),
        (SUMMARY_STATS_CSV, &combined.summary_csv),
        (SEMESTER_SUMMARY_CSV, &combined.pivot_csv),
    ];
    let metas = write_artifacts(output_root, &artifacts)?;

    let manifest = RunManifest {
        schema_version: CURRENT_SCHEMA_VERSION,
        id: RunId::new(),
        directory: "combined".into(),
        tool_version: tool_version.to_string(),
        created_at: Utc::now(),
        document_count: combined.document_count,
        program_count: combined.program_count,
        artifacts: metas,
    };
    write_json(&output_root.join(MANIFEST_JSON), &manifest)?;

    info!(
        rows = combined.row_count,
        programs = combined.program_count,
        "combined artifacts written"
    );

    Ok(output_root.to_path_buf())
}
