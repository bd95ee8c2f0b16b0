//! `qy fields` — show the field schema of the selected tracker.

use std::io::Write;

use quarry_client::model::{Tracker, TrackerField};
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Debug, Serialize)]
struct FieldEntry {
    id: i32,
    name: String,
    label: String,
    display_type: String,
    standard: bool,
    options: usize,
}

impl From<&TrackerField> for FieldEntry {
    fn from(field: &TrackerField) -> Self {
        Self {
            id: field.id,
            name: field.name.clone(),
            label: field.label.clone(),
            display_type: field.display_type.as_str().to_string(),
            standard: field.standard,
            options: field.options.len(),
        }
    }
}

/// Execute `qy fields`.
///
/// # Errors
///
/// Returns an error when no tracker is selected or a remote call fails.
pub fn run_fields(ctx: &CliContext) -> anyhow::Result<()> {
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

        let entries: Vec<FieldEntry> = tracker.fields().iter().map(FieldEntry::from).collect();

        render(ctx.output, &entries, |rows, w| {
            if rows.is_empty() {
                writeln!(w, "(no fields in tracker {})", scope.tracker_id)?;
                return Ok(());
            }
            for row in rows {
                let marker = if row.standard { "std" } else { "   " };
                writeln!(
                    w,
                    "{:>8}  {}  {}  {:<24}  {} ({} options)",
                    row.id, row.display_type, marker, row.name, row.label, row.options
                )?;
            }
            Ok(())
        })
    })
}
