//! `qy update` — replace an artifact's record fields.
//!
//! The service takes a full record on every update, so the command
//! fetches the current artifact first and only overrides what the
//! flags name.

use std::io::Write;

use clap::Args;
use quarry_client::model::Tracker;
use quarry_client::wire::{ArtifactUpdateRow, FieldNameValueRow};
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Artifact id to update.
    pub artifact_id: i32,

    /// New status id.
    #[arg(long)]
    pub status: Option<i32>,

    /// New severity level (1-9).
    #[arg(long)]
    pub severity: Option<i32>,

    /// Replacement one-line summary.
    #[arg(long)]
    pub summary: Option<String>,

    /// Replacement long description.
    #[arg(long)]
    pub details: Option<String>,

    /// Stamp the close date with the current time.
    #[arg(long)]
    pub close: bool,

    /// Set a non-standard field, given as NAME=VALUE. Repeatable.
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UpdateOutcome {
    artifact_id: i32,
    status_id: i32,
    severity: i32,
    summary: String,
    close_date: i64,
    extra_fields: usize,
}

fn parse_field_assignment(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("expected NAME=VALUE, got '{raw}'");
    }
    Ok((name.to_string(), value.to_string()))
}

fn apply_overrides(
    row: &mut ArtifactUpdateRow,
    artifact_id: i32,
    args: &UpdateArgs,
    now: i64,
) -> anyhow::Result<()> {
    if let Some(status) = args.status {
        row.status_id = status;
    }
    if let Some(severity) = args.severity {
        row.severity = severity;
    }
    if let Some(summary) = &args.summary {
        row.summary.clone_from(summary);
    }
    if let Some(details) = &args.details {
        row.details.clone_from(details);
    }
    if args.close {
        row.close_date = now;
    }
    for raw in &args.fields {
        let (field_name, field_value) = parse_field_assignment(raw)?;
        row.extra_fields.push(FieldNameValueRow {
            field_name,
            artifact_id,
            field_value,
        });
    }
    Ok(())
}

/// Execute `qy update <id> [flags]`.
///
/// # Errors
///
/// Returns an error when no tracker is selected, a `--field` value is
/// malformed, or a remote call fails.
pub fn run_update(args: &UpdateArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let scope = match ctx.scope() {
        Ok(scope) => scope,
        Err(err) => {
            render_error(ctx.output, &err.to_cli_error())?;
            anyhow::bail!("{}", err.message);
        }
    };

    run_connected(ctx, |client| {
        let tracker = Tracker::new(scope.group_id, scope.tracker_id);
        let artifact = tracker.artifact(client, args.artifact_id)?;

        let mut row = ArtifactUpdateRow::from_row(artifact.row());
        apply_overrides(&mut row, args.artifact_id, args, chrono::Utc::now().timestamp())?;

        let updated_id = artifact.update(client, &row)?;
        let outcome = UpdateOutcome {
            artifact_id: updated_id,
            status_id: row.status_id,
            severity: row.severity,
            summary: row.summary.clone(),
            close_date: row.close_date,
            extra_fields: row.extra_fields.len(),
        };
        render(ctx.output, &outcome, |outcome, w| {
            writeln!(w, "updated artifact {}", outcome.artifact_id)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_row() -> ArtifactUpdateRow {
        ArtifactUpdateRow {
            status_id: 1,
            close_date: 0,
            summary: "Crash on save".to_string(),
            details: "Stack trace attached".to_string(),
            severity: 5,
            extra_fields: Vec::new(),
        }
    }

    fn no_op_args() -> UpdateArgs {
        UpdateArgs {
            artifact_id: 1807,
            status: None,
            severity: None,
            summary: None,
            details: None,
            close: false,
            fields: Vec::new(),
        }
    }

    #[test]
    fn assignment_splits_on_the_first_equals() {
        let (name, value) = parse_field_assignment("platform=a=b").unwrap();
        assert_eq!(name, "platform");
        assert_eq!(value, "a=b");
    }

    #[test]
    fn assignment_without_equals_is_rejected() {
        assert!(parse_field_assignment("platform").is_err());
        assert!(parse_field_assignment("=3").is_err());
    }

    #[test]
    fn overrides_only_touch_the_named_fields() {
        let mut row = base_row();
        let args = UpdateArgs {
            status: Some(2),
            ..no_op_args()
        };
        apply_overrides(&mut row, 1807, &args, 99).unwrap();
        assert_eq!(row.status_id, 2);
        assert_eq!(row.severity, 5);
        assert_eq!(row.summary, "Crash on save");
        assert_eq!(row.close_date, 0);
    }

    #[test]
    fn close_flag_stamps_the_given_time() {
        let mut row = base_row();
        let args = UpdateArgs {
            close: true,
            ..no_op_args()
        };
        apply_overrides(&mut row, 1807, &args, 1_214_400_000).unwrap();
        assert_eq!(row.close_date, 1_214_400_000);
    }

    #[test]
    fn field_flags_become_named_value_rows() {
        let mut row = base_row();
        let args = UpdateArgs {
            fields: vec!["platform=3".to_string(), "build=r1024".to_string()],
            ..no_op_args()
        };
        apply_overrides(&mut row, 1807, &args, 0).unwrap();
        assert_eq!(row.extra_fields.len(), 2);
        assert_eq!(row.extra_fields[0].field_name, "platform");
        assert_eq!(row.extra_fields[0].artifact_id, 1807);
        assert_eq!(row.extra_fields[1].field_value, "r1024");
    }

    #[test]
    fn update_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: UpdateArgs,
        }
        let w = Wrapper::parse_from([
            "test", "1807", "--status", "2", "--close", "--field", "platform=3",
        ]);
        assert_eq!(w.args.artifact_id, 1807);
        assert_eq!(w.args.status, Some(2));
        assert!(w.args.close);
        assert_eq!(w.args.fields, vec!["platform=3".to_string()]);
    }
}
