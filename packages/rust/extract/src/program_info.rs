//! Labeled-field extraction of scalar program metadata.
//!
//! The extractor is a declarative table: one [`FieldRule`] per recognized
//! label, each pairing a compiled pattern with an assignment function.
//! Adding a field means adding a table row, not a new code path.

use std::sync::LazyLock;

use regex::Regex;

use curricula_shared::ProgramInfo;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches «Программа: <value to end of line>».
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Программа[:\s]+([^\n]+)").expect("program name regex"));

/// Matches «Направление: <value to end of line>».
static DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Направление[:\s]+([^\n]+)").expect("direction regex"));

/// Matches «Уровень: <value to end of line>».
static LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Уровень[:\s]+([^\n]+)").expect("level regex"));

/// Matches «Трудоемкость» / «Общая трудоемкость» followed by a digit run.
static TOTAL_CREDITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Трудоемкость|Общая трудоемкость)[:\s]+(\d+)").expect("total credits regex")
});

// ---------------------------------------------------------------------------
// Field rule table
// ---------------------------------------------------------------------------

/// One labeled field: its pattern and where the captured value goes.
struct FieldRule {
    pattern: &'static LazyLock<Regex>,
    assign: fn(&mut ProgramInfo, &str),
}

fn assign_name(info: &mut ProgramInfo, value: &str) {
    info.name = Some(value.to_string());
}

fn assign_direction(info: &mut ProgramInfo, value: &str) {
    info.direction = Some(value.to_string());
}

fn assign_level(info: &mut ProgramInfo, value: &str) {
    info.level = Some(value.to_string());
}

fn assign_total_credits(info: &mut ProgramInfo, value: &str) {
    // The capture group is a digit run; parse can only fail on overflow.
    info.total_credits = value.parse().ok();
}

static FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        pattern: &NAME_RE,
        assign: assign_name,
    },
    FieldRule {
        pattern: &DIRECTION_RE,
        assign: assign_direction,
    },
    FieldRule {
        pattern: &LEVEL_RE,
        assign: assign_level,
    },
    FieldRule {
        pattern: &TOTAL_CREDITS_RE,
        assign: assign_total_credits,
    },
];

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Extract program metadata from the full document text.
///
/// Each label is searched case-insensitively across the whole text; the
/// earliest occurrence wins when a label repeats. The captured value runs to
/// end of line and is trimmed. A label with no match leaves its field absent
/// — never an error.
pub fn extract_program_info(text: &str) -> ProgramInfo {
    let mut info = ProgramInfo::default();

    for rule in FIELD_RULES {
        if let Some(caps) = rule.pattern.captures(text) {
            (rule.assign)(&mut info, caps[1].trim());
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_four_fields() {
        let text = "Программа: Искусственный интеллект\n\
                    Направление: 01.04.02 Прикладная математика\n\
                    Уровень: магистратура\n\
                    Общая трудоемкость: 120 з.е.\n";
        let info = extract_program_info(text);

        assert_eq!(info.name.as_deref(), Some("Искусственный интеллект"));
        assert_eq!(
            info.direction.as_deref(),
            Some("01.04.02 Прикладная математика")
        );
        assert_eq!(info.level.as_deref(), Some("магистратура"));
        assert_eq!(info.total_credits, Some(120));
    }

    #[test]
    fn absent_labels_leave_fields_absent() {
        let info = extract_program_info("Программа: ИИ\nкакой-то другой текст\n");
        assert_eq!(info.name.as_deref(), Some("ИИ"));
        assert!(info.direction.is_none());
        assert!(info.level.is_none());
        assert!(info.total_credits.is_none());
    }

    #[test]
    fn no_labels_yield_empty_info() {
        let info = extract_program_info("текст без единой метки");
        assert!(info.is_empty());
    }

    #[test]
    fn first_occurrence_wins() {
        let text = "Программа: первая\nПрограмма: вторая\n";
        let info = extract_program_info(text);
        assert_eq!(info.name.as_deref(), Some("первая"));
    }

    #[test]
    fn labels_match_case_insensitively() {
        let info = extract_program_info("ПРОГРАММА: ИИ\nтрудоемкость 120\n");
        assert_eq!(info.name.as_deref(), Some("ИИ"));
        assert_eq!(info.total_credits, Some(120));
    }

    #[test]
    fn total_credits_takes_first_digit_run() {
        let info = extract_program_info("Трудоемкость: 120 зачетных единиц (4380 часов)\n");
        assert_eq!(info.total_credits, Some(120));
    }
}
