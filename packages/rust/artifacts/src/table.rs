//! Row-oriented flattening of a collection and its CSV rendering.
//!
//! The CSV column set is a stable contract: the retrieval collaborator loads
//! `Directory,Program,Semester,Course Name,Credits,Hours` as a flat table of
//! candidate course rows and assumes fixed column names.

use curricula_shared::{CurriculumCollection, Result};

use crate::csv_error;

/// Column header of the course CSV contract.
pub const COURSE_CSV_HEADER: [&str; 6] = [
    "Directory",
    "Program",
    "Semester",
    "Course Name",
    "Credits",
    "Hours",
];

/// One flattened course row — the unit exported to tabular form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub directory: String,
    pub program: String,
    pub semester: String,
    pub course_name: String,
    pub credits: u32,
    pub hours: u32,
}

/// Flatten a collection into rows, one per course record, in (program,
/// semester, original course) order as they appear in the source.
pub fn collection_rows(directory: &str, collection: &CurriculumCollection) -> Vec<CourseRow> {
    let mut rows = Vec::new();

    for (program, document) in collection.iter() {
        for (semester, courses) in document.semesters.iter() {
            for course in courses {
                rows.push(CourseRow {
                    directory: directory.to_string(),
                    program: program.to_string(),
                    semester: semester.to_string(),
                    course_name: course.name.clone(),
                    credits: course.credits,
                    hours: course.hours,
                });
            }
        }
    }

    rows
}

/// Render rows to a CSV string (UTF-8, header included).
pub fn rows_to_csv(rows: &[CourseRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(COURSE_CSV_HEADER)
        .map_err(csv_error)?;

    for row in rows {
        writer
            .write_record([
                row.directory.clone(),
                row.program.clone(),
                row.semester.clone(),
                row.course_name.clone(),
                row.credits.to_string(),
                row.hours.to_string(),
            ])
            .map_err(csv_error)?;
    }

    finish_csv(writer)
}

/// Flush a CSV writer and recover the UTF-8 string it produced.
pub(crate) fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_collection;

    #[test]
    fn rows_follow_program_semester_course_order() {
        let collection = sample_collection();
        let rows = collection_rows("pdf_curriculum_ai", &collection);

        let names: Vec<&str> = rows.iter().map(|r| r.course_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Математика",
                "Глубокое обучение",
                "Сети",
                "Продуктовая аналитика",
                "Стратегия продукта"
            ]
        );
        assert_eq!(rows[0].directory, "pdf_curriculum_ai");
        assert_eq!(rows[0].program, "Искусственный интеллект");
        assert_eq!(rows[0].semester, "1");
        assert_eq!(rows[3].program, "Управление ИИ продуктами");
    }

    #[test]
    fn csv_has_stable_header_and_one_row_per_course() {
        let collection = sample_collection();
        let rows = collection_rows("pdf_curriculum_ai", &collection);
        let csv = rows_to_csv(&rows).expect("render csv");

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Directory,Program,Semester,Course Name,Credits,Hours")
        );
        assert_eq!(csv.lines().count(), 1 + rows.len());
        assert!(csv.contains("pdf_curriculum_ai,Искусственный интеллект,1,Математика,4,144"));
    }

    #[test]
    fn empty_collection_renders_header_only() {
        let rows = collection_rows("dir", &CurriculumCollection::new());
        let csv = rows_to_csv(&rows).expect("render csv");
        assert_eq!(csv.trim_end(), "Directory,Program,Semester,Course Name,Credits,Hours");
    }
}
