//! Fixed-width worked-solution text.
//!
//! Tables use a 66-character `=` rule and four columns
//! (`{:<29} | {:>11} | {:>8} | {:>9}`) so the working reads correctly in a
//! terminal and in the monospace block on the answer page.

use crate::loading::{ItemKind, LoadingItem, Totals};

/// Width of the table rules
pub const RULE_WIDTH: usize = 66;

/// A full-width `=` rule
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// One table row.
pub fn table_row(name: &str, weight: &str, arm: &str, index: &str) -> String {
    format!("{:<29} | {:>11} | {:>8} | {:>9}", name, weight, arm, index)
}

/// Totals row with a blank arm column
pub fn totals_row(label: &str, totals: &Totals) -> String {
    table_row(label, &totals.weight.to_string(), "", &totals.index.to_string())
}

/// Line-oriented builder for workings text.
#[derive(Debug, Default)]
pub struct Workings {
    lines: Vec<String>,
}

impl Workings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn rule(&mut self) -> &mut Self {
        self.lines.push(rule());
        self
    }

    /// Heading, column header and one row per item.
    ///
    /// A rule is drawn above the ZFW subtotal and above the burn-off row.
    /// Arm is left blank where it does not apply.
    pub fn loading_table(&mut self, heading: &str, items: &[LoadingItem]) -> &mut Self {
        self.line(heading);
        self.rule();
        self.line(table_row("Item", "Weight (kg)", "Arm (mm)", "Mom Index"));
        self.rule();
        for item in items {
            if matches!(item.kind, ItemKind::ZeroFuelSubtotal | ItemKind::BurnOff) {
                self.rule();
            }
            let arm = if item.has_arm() { item.arm.to_string() } else { String::new() };
            self.line(table_row(
                &item.name,
                &item.weight.to_string(),
                &arm,
                &item.moment_index.to_string(),
            ));
        }
        self
    }

    pub fn finish(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout() {
        let row = table_row("Rear Compartment", "30", "5000", "15");
        assert_eq!(row, "Rear Compartment              |          30 |     5000 |        15");
        assert_eq!(table_row("Item", "Weight (kg)", "Arm (mm)", "Mom Index").len(), RULE_WIDTH);
    }

    #[test]
    fn test_rules_before_adjustment_rows() {
        let items = vec![
            LoadingItem::basic_empty(2000.0, 500.0),
            LoadingItem {
                name: "Zero Fuel Weight".into(),
                weight: 2000.0,
                arm: 0.0,
                moment_index: 500.0,
                kind: ItemKind::ZeroFuelSubtotal,
            },
            LoadingItem::at_arm("Fuel Burn-off (20 gal)", -39.0, 1780.0, ItemKind::BurnOff),
        ];
        let mut w = Workings::new();
        w.loading_table("TABLE:", &items);
        let text = w.finish();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "TABLE:");
        assert_eq!(lines[4], table_row("Aeroplane Basic Empty Weight", "2000", "", "500"));
        assert_eq!(lines[5], rule());
        assert!(lines[6].starts_with("Zero Fuel Weight"));
        assert_eq!(lines[7], rule());
        assert!(lines[8].contains("-39"));
        assert!(lines[8].contains("1780"));
    }

    #[test]
    fn test_finish_trims_outer_whitespace() {
        let mut w = Workings::new();
        w.blank().line("A").blank();
        assert_eq!(w.finish(), "A");
    }
}
