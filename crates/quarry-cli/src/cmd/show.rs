//! `qy show` — display one artifact with all six related collections.

use std::io::Write;

use clap::Args;
use quarry_client::model::{
    Artifact, AttachedFile, CcEntry, Dependency, FollowUp, HistoryEntry, Tracker,
};
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{kv, render, render_error, section};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Artifact id to display.
    pub artifact_id: i32,
}

/// Full artifact detail as returned in JSON output.
#[derive(Debug, Serialize)]
struct ShowArtifact {
    artifact_id: i32,
    summary: String,
    details: String,
    status: String,
    submitter: String,
    severity: String,
    open_date: String,
    close_date: String,
    extra: Vec<ExtraValue>,
    follow_ups: Vec<FollowUp>,
    attached_files: Vec<AttachedFile>,
    cc: Vec<CcEntry>,
    dependencies: Vec<Dependency>,
    inverse_dependencies: Vec<Dependency>,
    history: Vec<HistoryEntry>,
}

/// One resolved non-standard field value.
#[derive(Debug, Serialize)]
struct ExtraValue {
    name: String,
    label: String,
    value: String,
}

/// Resolve a standard field through the schema, empty when the schema
/// does not carry the field.
fn standard_text(tracker: &Tracker, artifact: &Artifact, name: &str) -> String {
    tracker
        .field(name)
        .and_then(|field| artifact.field_value(field))
        .unwrap_or_default()
}

fn build_detail(tracker: &Tracker, artifact: &Artifact) -> ShowArtifact {
    let extra = tracker
        .fields()
        .iter()
        .filter(|field| !field.standard)
        .filter_map(|field| {
            artifact.field_value(field).map(|value| ExtraValue {
                name: field.name.clone(),
                label: field.label.clone(),
                value,
            })
        })
        .collect();

    ShowArtifact {
        artifact_id: artifact.id(),
        summary: artifact.summary().to_string(),
        details: artifact.details().to_string(),
        status: standard_text(tracker, artifact, "status_id"),
        submitter: standard_text(tracker, artifact, "submitted_by"),
        severity: standard_text(tracker, artifact, "severity"),
        open_date: standard_text(tracker, artifact, "open_date"),
        close_date: standard_text(tracker, artifact, "close_date"),
        extra,
        follow_ups: artifact.follow_ups().unwrap_or_default().to_vec(),
        attached_files: artifact.attached_files().unwrap_or_default().to_vec(),
        cc: artifact.cc_list().unwrap_or_default().to_vec(),
        dependencies: artifact.dependencies().unwrap_or_default().to_vec(),
        inverse_dependencies: artifact.inverse_dependencies().unwrap_or_default().to_vec(),
        history: artifact.history().unwrap_or_default().to_vec(),
    }
}

fn render_human(detail: &ShowArtifact, w: &mut dyn Write) -> std::io::Result<()> {
    section(w, &format!("[{}] {}", detail.artifact_id, detail.summary))?;
    kv(w, "Status", &detail.status)?;
    kv(w, "Severity", &detail.severity)?;
    kv(w, "Submitter", &detail.submitter)?;
    kv(w, "Opened", &detail.open_date)?;
    if !detail.close_date.is_empty() {
        kv(w, "Closed", &detail.close_date)?;
    }
    for extra in &detail.extra {
        kv(w, &extra.label, &extra.value)?;
    }
    if !detail.details.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", detail.details)?;
    }

    if !detail.follow_ups.is_empty() {
        writeln!(w)?;
        section(w, "Follow-ups")?;
        for follow_up in &detail.follow_ups {
            writeln!(
                w,
                "- [{}] {}: {}",
                follow_up.date_display(),
                follow_up.user_name,
                follow_up.comment
            )?;
        }
    }

    if !detail.attached_files.is_empty() {
        writeln!(w)?;
        section(w, "Attached files")?;
        for file in &detail.attached_files {
            writeln!(
                w,
                "- {:>6}  {}  {} ({}, {})",
                file.id,
                file.date_display(),
                file.filename,
                file.filetype,
                file.size_display()
            )?;
        }
    }

    if !detail.cc.is_empty() {
        writeln!(w)?;
        section(w, "CC")?;
        for entry in &detail.cc {
            writeln!(w, "- {:>6}  {}  {}", entry.id, entry.date_display(), entry.email)?;
        }
    }

    if !detail.dependencies.is_empty() || !detail.inverse_dependencies.is_empty() {
        writeln!(w)?;
        section(w, "Dependencies")?;
        for dep in &detail.dependencies {
            writeln!(
                w,
                "- depends on {} ({})",
                dep.depends_on_artifact_id, dep.summary
            )?;
        }
        for dep in &detail.inverse_dependencies {
            writeln!(w, "- blocks {} ({})", dep.artifact_id, dep.summary)?;
        }
    }

    if !detail.history.is_empty() {
        writeln!(w)?;
        section(w, "History")?;
        for entry in &detail.history {
            writeln!(
                w,
                "- [{}] {}: '{}' -> '{}'",
                entry.date_display(),
                entry.field_name,
                entry.old_value,
                entry.new_value
            )?;
        }
    }

    Ok(())
}

/// Execute `qy show <id>`.
///
/// # Errors
///
/// Returns an error when no tracker is selected, the artifact does not
/// exist, or a remote call fails.
pub fn run_show(args: &ShowArgs, ctx: &CliContext) -> anyhow::Result<()> {
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

        let mut artifact = tracker.artifact(client, args.artifact_id)?;
        artifact.load_related(client)?;

        let detail = build_detail(&tracker, &artifact);
        render(ctx.output, &detail, |detail, w| render_human(detail, w))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_client::model::{DisplayType, FieldOption, TrackerField};
    use quarry_client::wire::{ArtifactRow, FieldValueRow};

    fn schema_tracker() -> Tracker {
        let field = |id: i32, name: &str, label: &str, display_type: DisplayType,
                     standard: bool, options: Vec<(i32, &str)>| {
            TrackerField {
                id,
                name: name.to_string(),
                label: label.to_string(),
                display_type,
                standard,
                options: options
                    .into_iter()
                    .map(|(id, label)| FieldOption {
                        id,
                        label: label.to_string(),
                    })
                    .collect(),
            }
        };

        Tracker::with_metadata(
            101,
            102,
            vec![
                field(1, "status_id", "Status", DisplayType::SelectBox, true, vec![(1, "Open")]),
                field(2, "severity", "Severity", DisplayType::SelectBox, true, vec![(5, "Major")]),
                field(3, "open_date", "Opened", DisplayType::DateField, true, Vec::new()),
                field(
                    10_093,
                    "platform",
                    "Platform",
                    DisplayType::SelectBox,
                    false,
                    vec![(3, "Linux")],
                ),
                field(10_120, "build", "Build", DisplayType::TextField, false, Vec::new()),
            ],
            Vec::new(),
        )
    }

    fn sample_artifact() -> Artifact {
        Artifact::new(
            101,
            ArtifactRow {
                artifact_id: 1807,
                tracker_id: 102,
                status_id: 1,
                submitted_by: 42,
                open_date: 1_214_317_500,
                close_date: 0,
                summary: "Crash on save".to_string(),
                details: "Stack trace attached".to_string(),
                severity: 5,
                extra_fields: vec![FieldValueRow {
                    field_id: 10_093,
                    artifact_id: 1807,
                    field_value: "3".to_string(),
                }],
            },
        )
    }

    #[test]
    fn detail_resolves_standard_fields_through_the_schema() {
        let detail = build_detail(&schema_tracker(), &sample_artifact());
        assert_eq!(detail.status, "Open");
        assert_eq!(detail.severity, "Major");
        assert_eq!(detail.open_date, "2008-06-24 14:25");
        assert_eq!(detail.close_date, "");
    }

    #[test]
    fn detail_skips_extra_fields_without_stored_values() {
        let detail = build_detail(&schema_tracker(), &sample_artifact());
        // platform has a stored value, build does not.
        assert_eq!(detail.extra.len(), 1);
        assert_eq!(detail.extra[0].name, "platform");
        assert_eq!(detail.extra[0].value, "Linux");
    }

    #[test]
    fn detail_without_schema_renders_empty_standard_values() {
        let tracker = Tracker::with_metadata(101, 102, Vec::new(), Vec::new());
        let detail = build_detail(&tracker, &sample_artifact());
        assert_eq!(detail.status, "");
        assert_eq!(detail.summary, "Crash on save");
    }

    #[test]
    fn human_rendering_includes_the_summary_line() {
        let detail = build_detail(&schema_tracker(), &sample_artifact());
        let mut buf = Vec::new();
        render_human(&detail, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("[1807] Crash on save"));
        assert!(text.contains("Platform"));
    }

    #[test]
    fn show_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ShowArgs,
        }
        let w = Wrapper::parse_from(["test", "1807"]);
        assert_eq!(w.args.artifact_id, 1807);
    }
}
