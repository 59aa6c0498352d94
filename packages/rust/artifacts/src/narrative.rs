//! Narrative (markdown) rendering of a collection for language-model use.
//!
//! Missing-field representation stays out of the data model: the only
//! substitution happens here, at the presentation boundary. A course with no
//! catalog number renders the explicit `n/a` marker; absent program-info
//! fields are omitted entirely, never rendered as a placeholder.

use curricula_shared::{CurriculumCollection, ProgramInfo};

/// Render-time marker for a missing course field.
const NOT_AVAILABLE: &str = "n/a";

/// Render the full narrative for one directory's collection.
///
/// Heading hierarchy:
/// `# Curriculum: <directory>` → `## Program: <name>` →
/// `### Information about the program:` (bulleted, present fields only) and
/// `### Semester <n>:` (pipe-delimited course table), with `---` separating
/// programs.
pub fn render_collection(directory: &str, collection: &CurriculumCollection) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push(format!("# Curriculum: {directory}"));
    out.push(String::new());

    for (program, document) in collection.iter() {
        out.push(format!("## Program: {program}"));

        if !document.program_info.is_empty() {
            out.push(String::new());
            out.push("### Information about the program:".to_string());
            render_program_info(&mut out, &document.program_info);
        }

        for (semester, courses) in document.semesters.iter() {
            out.push(String::new());
            out.push(format!("### Semester {semester}:"));

            if courses.is_empty() {
                out.push("No course information available".to_string());
                continue;
            }

            out.push(String::new());
            out.push("| # | Course | Credits | Hours |".to_string());
            out.push("| --- | --- | --- | --- |".to_string());

            for course in courses {
                let number = course.number.as_deref().unwrap_or(NOT_AVAILABLE);
                out.push(format!(
                    "| {number} | {} | {} | {} |",
                    course.name, course.credits, course.hours
                ));
            }
        }

        out.push(String::new());
        out.push("---".to_string());
        out.push(String::new());
    }

    out.join("\n")
}

/// Bulleted key/value block for the present program-info fields.
fn render_program_info(out: &mut Vec<String>, info: &ProgramInfo) {
    if let Some(name) = &info.name {
        out.push(format!("- Name: {name}"));
    }
    if let Some(direction) = &info.direction {
        out.push(format!("- Direction: {direction}"));
    }
    if let Some(level) = &info.level {
        out.push(format!("- Level: {level}"));
    }
    if let Some(total) = info.total_credits {
        out.push(format!("- Total Credits: {total}"));
    }
}
