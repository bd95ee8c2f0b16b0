//! `qy reports` — list the saved reports of the selected tracker.

use std::io::Write;

use quarry_client::model::{Report, Tracker};
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Debug, Serialize)]
struct ReportEntry {
    id: i32,
    name: String,
    description: String,
    result_columns: Vec<String>,
}

impl From<&Report> for ReportEntry {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            name: report.name.clone(),
            description: report.description.clone(),
            result_columns: report
                .result_columns()
                .iter()
                .map(|column| column.field_name.clone())
                .collect(),
        }
    }
}

/// Execute `qy reports`.
///
/// # Errors
///
/// Returns an error when no tracker is selected or a remote call fails.
pub fn run_reports(ctx: &CliContext) -> anyhow::Result<()> {
    let scope = match ctx.scope() {
        Ok(scope) => scope,
        Err(err) => {
            render_error(ctx.output, &err.to_cli_error())?;
            anyhow::bail!("{}", err.message);
        }
    };

    run_connected(ctx, |client| {
        let mut tracker = Tracker::new(scope.group_id, scope.tracker_id);
        tracker.load_metadata(client)?;

        let entries: Vec<ReportEntry> = tracker.reports().iter().map(ReportEntry::from).collect();

        render(ctx.output, &entries, |rows, w| {
            if rows.is_empty() {
                writeln!(w, "(no reports in tracker {})", scope.tracker_id)?;
                return Ok(());
            }
            for row in rows {
                writeln!(
                    w,
                    "{:>8}  {:<20}  [{}]",
                    row.id,
                    row.name,
                    row.result_columns.join(", ")
                )?;
            }
            Ok(())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_client::model::ReportColumn;

    #[test]
    fn entry_keeps_only_result_columns() {
        let report = Report {
            id: 100,
            name: "Default".to_string(),
            description: String::new(),
            columns: vec![
                ReportColumn {
                    field_name: "artifact_id".to_string(),
                    show_on_result: true,
                    show_on_query: false,
                },
                ReportColumn {
                    field_name: "assigned_to".to_string(),
                    show_on_result: false,
                    show_on_query: true,
                },
                ReportColumn {
                    field_name: "summary".to_string(),
                    show_on_result: true,
                    show_on_query: true,
                },
            ],
        };
        let entry = ReportEntry::from(&report);
        assert_eq!(entry.result_columns, ["artifact_id", "summary"]);
    }
}
