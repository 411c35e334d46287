//! Option summary shown before a headless run

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::command::{FieldId, FieldValue, OptionState};

/// Snapshot of the options as rows for display
#[derive(Debug, Default)]
pub struct OptionSummary {
    pub rows: Vec<SummaryRow>,
    pub issues: Vec<String>,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
    pub enabled: bool,
}

impl OptionSummary {
    pub fn new(state: &OptionState, command: &str) -> Self {
        let rows = FieldId::ALL
            .iter()
            .map(|&id| SummaryRow {
                label: id.label(),
                value: match state.get(id) {
                    FieldValue::Text(text) if text.trim().is_empty() => "-".to_string(),
                    FieldValue::Text(text) => text.trim().to_string(),
                    FieldValue::Flag(true) => "yes".to_string(),
                    FieldValue::Flag(false) => "no".to_string(),
                },
                enabled: state.is_enabled(id),
            })
            .collect();

        Self {
            rows,
            issues: state
                .validation_issues()
                .iter()
                .map(ToString::to_string)
                .collect(),
            command: command.to_string(),
        }
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Option").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        for row in &self.rows {
            let value = Cell::new(&row.value);
            let value = if !row.enabled {
                value.fg(Color::DarkGrey)
            } else if row.value == "yes" {
                value.fg(Color::Green)
            } else {
                value
            };
            table.add_row(vec![Cell::new(row.label), value]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("⚙").cyan(),
            style("OPTIONS").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!("    {} {}", style("$").dim(), style(&self.command).cyan());

        if !self.issues.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("✗").red().bold(),
                style("Cannot run due to the following errors:").red()
            );
            for issue in &self.issues {
                println!("        {} {}", style("•").dim(), issue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{FlagField, TextField};

    #[test]
    fn test_rows_follow_form_order_and_enablement() {
        let mut state = OptionState::new();
        state.set_text(TextField::LcscId, "C1");
        state.set_flag(FlagField::Full, true);

        let summary = OptionSummary::new(&state, "easyeda2kicad --lcsc_id C1 --full");

        assert_eq!(summary.rows.len(), FieldId::ALL.len());
        assert_eq!(summary.rows[0].label, "LCSC Part #");
        assert_eq!(summary.rows[0].value, "C1");
        let symbol = summary.rows.iter().find(|r| r.label == "Symbol").unwrap();
        assert!(!symbol.enabled);
        assert!(summary.issues.is_empty());
    }

    #[test]
    fn test_issues_are_rendered_as_messages() {
        let summary = OptionSummary::new(&OptionState::new(), "easyeda2kicad");
        assert_eq!(
            summary.issues,
            vec![
                "LCSC Part # is required.".to_string(),
                "Select Full or at least one of Symbol, Footprint, or 3D Model.".to_string(),
            ]
        );
    }
}
