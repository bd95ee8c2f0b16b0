//! Saved reports: named, ordered column layouts for artifact lists.

use serde::Serialize;

use crate::wire::{ReportColumnRow, ReportRow};

/// One column of a report, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    pub field_name: String,
    /// Shown on result lists (the column set index-based lookups use).
    pub show_on_result: bool,
    /// Shown on the query form.
    pub show_on_query: bool,
}

impl From<ReportColumnRow> for ReportColumn {
    fn from(row: ReportColumnRow) -> Self {
        Self {
            field_name: row.field_name,
            show_on_result: row.show_on_result,
            show_on_query: row.show_on_query,
        }
    }
}

/// A saved report of a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub columns: Vec<ReportColumn>,
}

impl Report {
    /// The columns shown on result lists, keeping display order.
    ///
    /// Index-based field lookups count positions in this subset, not in the
    /// full column list.
    #[must_use]
    pub fn result_columns(&self) -> Vec<&ReportColumn> {
        self.columns
            .iter()
            .filter(|column| column.show_on_result)
            .collect()
    }
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.report_id,
            name: row.name,
            description: row.description,
            columns: row.columns.into_iter().map(ReportColumn::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report::from(ReportRow {
            report_id: 100,
            name: "Default".to_string(),
            description: "All open artifacts".to_string(),
            columns: vec![
                ReportColumnRow {
                    field_name: "artifact_id".to_string(),
                    show_on_result: true,
                    show_on_query: false,
                },
                ReportColumnRow {
                    field_name: "assigned_to".to_string(),
                    show_on_result: false,
                    show_on_query: true,
                },
                ReportColumnRow {
                    field_name: "summary".to_string(),
                    show_on_result: true,
                    show_on_query: true,
                },
            ],
        })
    }

    #[test]
    fn result_columns_filters_and_keeps_order() {
        let report = sample_report();
        let shown = report.result_columns();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].field_name, "artifact_id");
        assert_eq!(shown[1].field_name, "summary");
    }

    #[test]
    fn from_row_preserves_ids() {
        let report = sample_report();
        assert_eq!(report.id, 100);
        assert_eq!(report.columns.len(), 3);
    }
}
