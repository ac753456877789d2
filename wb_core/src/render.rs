//! # Plain-Text Rendering
//!
//! On-screen study view of generated questions. The loading-table cell rules
//! here are shared with the printed sheets in [`crate::pdf`]:
//!
//! - negative weights and indexes are shown in parentheses
//! - an arm of zero (no arm applies) and a zero index are shown as `—`
//! - the zero fuel weight subtotal row is highlighted

use crate::loading::{ItemKind, LoadingItem};
use crate::questions::workings::{rule, table_row};
use crate::questions::{Question, QuestionType};

/// Placeholder for cells that do not apply
pub const NOT_APPLICABLE: &str = "—";

/// Display form of one loading table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub weight: String,
    pub arm: String,
    pub index: String,
    /// Subtotal rows are drawn with emphasis
    pub highlighted: bool,
    /// Removed mass (burn-off) is drawn in the warning colour
    pub negative: bool,
}

pub fn format_weight(weight: f64) -> String {
    if weight > 0.0 {
        weight.to_string()
    } else {
        format!("({})", weight.abs())
    }
}

pub fn format_arm(arm: f64) -> String {
    if arm > 0.0 {
        arm.to_string()
    } else {
        NOT_APPLICABLE.to_string()
    }
}

/// Index to one decimal place.
pub fn format_index(index: f64) -> String {
    if index == 0.0 {
        NOT_APPLICABLE.to_string()
    } else if index > 0.0 {
        format!("{:.1}", index)
    } else {
        format!("({:.1})", index.abs())
    }
}

impl TableRow {
    pub fn from_item(item: &LoadingItem) -> Self {
        TableRow {
            name: item.name.clone(),
            weight: format_weight(item.weight),
            arm: format_arm(item.arm),
            index: format_index(item.moment_index),
            highlighted: item.kind == ItemKind::ZeroFuelSubtotal,
            negative: item.weight < 0.0,
        }
    }
}

pub fn table_rows(items: &[LoadingItem]) -> Vec<TableRow> {
    items.iter().map(TableRow::from_item).collect()
}

/// Text loading table. Highlighted rows are marked with `*` and set off by rules.
pub fn loading_table_text(items: &[LoadingItem]) -> String {
    let mut lines = vec![rule(), table_row("Item", "Weight (kg)", "Arm (mm)", "Mom Index"), rule()];
    for row in table_rows(items) {
        if row.highlighted {
            lines.push(table_row(&format!("* {}", row.name), &row.weight, &row.arm, &row.index));
            lines.push("-".repeat(rule().len()));
        } else {
            lines.push(table_row(&row.name, &row.weight, &row.arm, &row.index));
        }
    }
    lines.push(rule());
    lines.join("\n")
}

/// Upper-case badge text, e.g. `FORWARD CG LIMIT`
pub fn type_badge(question_type: QuestionType) -> String {
    question_type.as_str().replace('-', " ").to_uppercase()
}

/// Full question as text, numbered from 1. Answer and working are included
/// only when `show_answer` is set.
pub fn question_text(question: &Question, number: usize, show_answer: bool) -> String {
    let mut out = vec![
        format!("Question {}: {}   [{}]", number, question.title, type_badge(question.question_type)),
        String::new(),
        question.scenario.clone(),
        String::new(),
        "Scenario:".to_string(),
        question.scenario_text.clone(),
        String::new(),
        "Question:".to_string(),
        question.question.clone(),
    ];

    if show_answer {
        out.extend([
            String::new(),
            "Answer:".to_string(),
            question.answer.clone(),
            String::new(),
            "Working:".to_string(),
            question.workings.clone(),
        ]);
    }
    out.join("\n")
}

/// All questions separated by blank lines
pub fn question_list_text(questions: &[Question], show_answers: bool) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| question_text(q, i + 1, show_answers))
        .collect::<Vec<_>>()
        .join("\n\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::BASIC_EMPTY_WEIGHT_LABEL;
    use crate::questions::generate_question;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_cell_formats() {
        assert_eq!(format_weight(2110.0), "2110");
        assert_eq!(format_weight(-49.0), "(49)");
        assert_eq!(format_arm(0.0), "—");
        assert_eq!(format_arm(1780.0), "1780");
        assert_eq!(format_index(533.3), "533.3");
        assert_eq!(format_index(500.0), "500.0");
        assert_eq!(format_index(-8.7), "(8.7)");
        assert_eq!(format_index(0.0), "—");
    }

    #[test]
    fn test_row_flags() {
        let basic = LoadingItem::basic_empty(2000.0, 500.0);
        let row = TableRow::from_item(&basic);
        assert_eq!(row.name, BASIC_EMPTY_WEIGHT_LABEL);
        assert_eq!(row.arm, "—");
        assert!(!row.highlighted);

        let zfw = LoadingItem {
            name: "Zero Fuel Weight".into(),
            weight: 2110.0,
            arm: 0.0,
            moment_index: 533.3,
            kind: ItemKind::ZeroFuelSubtotal,
        };
        assert!(TableRow::from_item(&zfw).highlighted);

        let burn = LoadingItem::at_arm("Fuel Burn-off (25 gal)", -49.0, 1780.0, ItemKind::BurnOff);
        let row = TableRow::from_item(&burn);
        assert!(row.negative);
        assert_eq!(row.weight, "(49)");
    }

    #[test]
    fn test_badge() {
        assert_eq!(type_badge(QuestionType::ForwardCgLimit), "FORWARD CG LIMIT");
        assert_eq!(type_badge(QuestionType::PercentMac), "PERCENT MAC");
    }

    #[test]
    fn test_answers_hidden_by_default() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let q = generate_question(QuestionType::WeightBalance, &mut rng).unwrap();

        let hidden = question_text(&q, 1, false);
        assert!(hidden.starts_with("Question 1: Weight & Balance Check"));
        assert!(hidden.contains(&q.scenario_text));
        assert!(!hidden.contains("Answer:"));

        let shown = question_text(&q, 1, true);
        assert!(shown.contains(&q.answer));
        assert!(shown.contains("TAKE-OFF CHECK"));
    }

    #[test]
    fn test_loading_table_text_marks_subtotal() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let q = generate_question(QuestionType::PercentMac, &mut rng).unwrap();
        let text = loading_table_text(&q.loading_table);
        assert!(text.contains("* Zero Fuel Weight"));
        assert!(text.contains("Fuel (Main Tanks - "));
    }
}
