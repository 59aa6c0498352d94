//! Cross-program summary projections over flattened course rows.
//!
//! Both summaries are pure read-side projections: they introduce no new
//! extraction logic and operate only on the already-built rows.

use std::collections::HashMap;

use curricula_shared::Result;

use crate::csv_error;
use crate::table::{CourseRow, finish_csv};

// ---------------------------------------------------------------------------
// Per-(directory, program) summary
// ---------------------------------------------------------------------------

/// Course count and credit sum for one (directory, program) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSummaryRow {
    pub directory: String,
    pub program: String,
    pub course_count: usize,
    pub total_credits: u64,
}

/// Aggregate rows per (directory, program), in first-appearance order.
pub fn program_summary(rows: &[CourseRow]) -> Vec<ProgramSummaryRow> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut grouped: HashMap<(String, String), (usize, u64)> = HashMap::new();

    for row in rows {
        let key = (row.directory.clone(), row.program.clone());
        let entry = grouped.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0, 0)
        });
        entry.0 += 1;
        entry.1 += u64::from(row.credits);
    }

    order
        .into_iter()
        .map(|key| {
            let (course_count, total_credits) = grouped[&key];
            ProgramSummaryRow {
                directory: key.0,
                program: key.1,
                course_count,
                total_credits,
            }
        })
        .collect()
}

/// Render the per-program summary to CSV.
pub fn program_summary_csv(rows: &[CourseRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(["Directory", "Program", "Course Count", "Total Credits"])
        .map_err(csv_error)?;

    for summary in program_summary(rows) {
        writer
            .write_record([
                summary.directory,
                summary.program,
                summary.course_count.to_string(),
                summary.total_credits.to_string(),
            ])
            .map_err(csv_error)?;
    }

    finish_csv(writer)
}

// ---------------------------------------------------------------------------
// Semester × program pivot
// ---------------------------------------------------------------------------

/// Semester × program pivot of summed credits, with explicit zero fill for
/// semesters a program does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterPivot {
    /// Column labels: the union of semester labels across all programs.
    pub labels: Vec<String>,
    /// One row per (directory, program), credits aligned with `labels`.
    pub rows: Vec<PivotRow>,
}

/// One pivot row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub directory: String,
    pub program: String,
    /// Summed credits per semester label, zero where the program lacks it.
    pub credits: Vec<u64>,
}

/// Build the pivot from flattened rows.
///
/// Column order: semester labels sorted by `(length, lexicographic)` — exact
/// numeric order for the digit-string labels the segmenter produces. Row
/// order: first appearance of the (directory, program) pair.
pub fn semester_pivot(rows: &[CourseRow]) -> SemesterPivot {
    let mut labels: Vec<String> = Vec::new();
    for row in rows {
        if !labels.contains(&row.semester) {
            labels.push(row.semester.clone());
        }
    }
    labels.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let mut order: Vec<(String, String)> = Vec::new();
    let mut grouped: HashMap<(String, String), HashMap<String, u64>> = HashMap::new();

    for row in rows {
        let key = (row.directory.clone(), row.program.clone());
        if !grouped.contains_key(&key) {
            order.push(key.clone());
        }
        *grouped
            .entry(key)
            .or_default()
            .entry(row.semester.clone())
            .or_insert(0) += u64::from(row.credits);
    }

    let rows = order
        .into_iter()
        .map(|key| {
            let by_semester = &grouped[&key];
            let credits = labels
                .iter()
                .map(|label| by_semester.get(label).copied().unwrap_or(0))
                .collect();
            PivotRow {
                directory: key.0,
                program: key.1,
                credits,
            }
        })
        .collect();

    SemesterPivot { labels, rows }
}

/// Render the pivot to CSV: `Directory,Program,<label>...`.
pub fn semester_pivot_csv(rows: &[CourseRow]) -> Result<String> {
    let pivot = semester_pivot(rows);

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    let mut header = vec!["Directory".to_string(), "Program".to_string()];
    header.extend(pivot.labels.iter().cloned());
    writer.write_record(&header).map_err(csv_error)?;

    for row in &pivot.rows {
        let mut record = vec![row.directory.clone(), row.program.clone()];
        record.extend(row.credits.iter().map(|c| c.to_string()));
        writer.write_record(&record).map_err(csv_error)?;
    }

    finish_csv(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::collection_rows;
    use crate::test_support::sample_collection;

    fn sample_rows() -> Vec<CourseRow> {
        collection_rows("pdf_curriculum_ai", &sample_collection())
    }

    #[test]
    fn program_summary_counts_and_sums() {
        let summary = program_summary(&sample_rows());

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].program, "Искусственный интеллект");
        assert_eq!(summary[0].course_count, 3);
        assert_eq!(summary[0].total_credits, 13);
        assert_eq!(summary[1].program, "Управление ИИ продуктами");
        assert_eq!(summary[1].course_count, 2);
        assert_eq!(summary[1].total_credits, 5);
    }

    #[test]
    fn program_summary_csv_shape() {
        let csv = program_summary_csv(&sample_rows()).expect("render csv");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Directory,Program,Course Count,Total Credits")
        );
        assert!(csv.contains("pdf_curriculum_ai,Искусственный интеллект,3,13"));
    }

    #[test]
    fn pivot_zero_fills_missing_semesters() {
        let pivot = semester_pivot(&sample_rows());

        assert_eq!(pivot.labels, vec!["1", "2", "3"]);

        // Program 1 has semesters 1 and 2; cell for 3 is zero, not missing.
        assert_eq!(pivot.rows[0].program, "Искусственный интеллект");
        assert_eq!(pivot.rows[0].credits, vec![10, 3, 0]);

        // Program 2 has semesters 2 and 3; cell for 1 is zero.
        assert_eq!(pivot.rows[1].program, "Управление ИИ продуктами");
        assert_eq!(pivot.rows[1].credits, vec![0, 3, 2]);
    }

    #[test]
    fn pivot_orders_digit_labels_numerically() {
        let mut rows = sample_rows();
        let mut extra = rows[0].clone();
        extra.semester = "10".into();
        rows.push(extra);

        let pivot = semester_pivot(&rows);
        assert_eq!(pivot.labels, vec!["1", "2", "3", "10"]);
    }

    #[test]
    fn pivot_csv_shape() {
        let csv = semester_pivot_csv(&sample_rows()).expect("render csv");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Directory,Program,1,2,3"));
        assert!(csv.contains("pdf_curriculum_ai,Искусственный интеллект,10,3,0"));
        assert!(csv.contains("pdf_curriculum_ai,Управление ИИ продуктами,0,3,2"));
    }

    #[test]
    fn empty_rows_yield_header_only_summaries() {
        let summary_csv = program_summary_csv(&[]).expect("render csv");
        assert_eq!(summary_csv.trim_end(), "Directory,Program,Course Count,Total Credits");

        let pivot_csv = semester_pivot_csv(&[]).expect("render csv");
        assert_eq!(pivot_csv.trim_end(), "Directory,Program");
    }
}
