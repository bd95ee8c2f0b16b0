//! `qy list` — list artifacts through a report's column layout.
//!
//! The columns come from the selected report's show-on-result subset.
//! Selection order: `--report` flag, then the config's `report`, then the
//! tracker's first report. A tracker without reports falls back to a plain
//! id/summary listing.

use std::io::Write;

use clap::Args;
use quarry_client::model::{Artifact, Tracker};
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Report whose result columns shape the listing.
    #[arg(short, long)]
    pub report: Option<i32>,

    /// Maximum artifacts to show.
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
struct Listing {
    headers: Vec<String>,
    rows: Vec<ListingRow>,
}

#[derive(Debug, Serialize)]
struct ListingRow {
    artifact_id: i32,
    cells: Vec<String>,
}

/// The report the listing renders through, honoring the tracker's
/// selection and falling back to the first report.
fn active_report(tracker: &Tracker) -> Option<i32> {
    tracker
        .selected_report()
        .and_then(|id| tracker.report(id))
        .or_else(|| tracker.reports().first())
        .map(|report| report.id)
}

fn build_listing(tracker: &Tracker, artifacts: &[Artifact], limit: usize) -> Listing {
    let Some(report_id) = active_report(tracker) else {
        // No reports defined; fall back to a fixed id/summary listing.
        return Listing {
            headers: vec!["artifact_id".to_string(), "summary".to_string()],
            rows: artifacts
                .iter()
                .take(limit)
                .map(|artifact| ListingRow {
                    artifact_id: artifact.id(),
                    cells: vec![artifact.id().to_string(), artifact.summary().to_string()],
                })
                .collect(),
        };
    };

    let columns = tracker
        .report(report_id)
        .map(|report| report.result_columns())
        .unwrap_or_default();
    let headers: Vec<String> = columns
        .iter()
        .map(|column| {
            tracker
                .field(&column.field_name)
                .map_or_else(|| column.field_name.clone(), |field| field.label.clone())
        })
        .collect();

    let rows = artifacts
        .iter()
        .take(limit)
        .map(|artifact| ListingRow {
            artifact_id: artifact.id(),
            cells: (0..headers.len())
                .map(|column| {
                    artifact
                        .field_value_at(tracker, report_id, column)
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect();

    Listing { headers, rows }
}

/// Execute `qy list`.
///
/// # Errors
///
/// Returns an error when no tracker is selected or a remote call fails.
pub fn run_list(args: &ListArgs, ctx: &CliContext) -> anyhow::Result<()> {
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
        if let Some(report_id) = args.report.or(ctx.default_report()) {
            tracker.select_report(report_id);
        }

        let artifacts = tracker.artifacts(client)?;
        let listing = build_listing(&tracker, &artifacts, args.limit);

        render(ctx.output, &listing, |listing, w| {
            if listing.rows.is_empty() {
                writeln!(w, "(no artifacts)")?;
                return Ok(());
            }
            writeln!(w, "{}", listing.headers.join("  "))?;
            for row in &listing.rows {
                writeln!(w, "{}", row.cells.join("  "))?;
            }
            Ok(())
        })
    })
}
