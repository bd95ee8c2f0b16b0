//! `qy attach` / `qy detach` — manage files attached to an artifact.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use quarry_client::model::Tracker;
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// Artifact id to attach to.
    pub artifact_id: i32,

    /// Local file to upload.
    pub file: PathBuf,

    /// Description stored next to the file.
    #[arg(long, default_value = "")]
    pub description: String,

    /// MIME type reported to the service.
    #[arg(long, default_value = "application/octet-stream")]
    pub filetype: String,
}

#[derive(Args, Debug)]
pub struct DetachArgs {
    /// Artifact id the file hangs off.
    pub artifact_id: i32,

    /// Attached file id, as shown by `qy show`.
    pub file_id: i32,
}

#[derive(Debug, Serialize)]
struct AttachOutcome {
    artifact_id: i32,
    file_id: i32,
    filename: String,
    bytes: usize,
}

#[derive(Debug, Serialize)]
struct DetachOutcome {
    artifact_id: i32,
    file_id: i32,
}

fn upload_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Execute `qy attach <id> <file>`.
///
/// # Errors
///
/// Returns an error when no tracker is selected, the file cannot be
/// read, or a remote call fails.
pub fn run_attach(args: &AttachArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let scope = match ctx.scope() {
        Ok(scope) => scope,
        Err(err) => {
            render_error(ctx.output, &err.to_cli_error())?;
            anyhow::bail!("{}", err.message);
        }
    };

    let data = std::fs::read(&args.file)
        .with_context(|| format!("could not read {}", args.file.display()))?;
    let filename = upload_name(&args.file);

    run_connected(ctx, |client| {
        let tracker = Tracker::new(scope.group_id, scope.tracker_id);
        let artifact = tracker.artifact(client, args.artifact_id)?;
        let file_id = artifact.add_attached_file(
            client,
            &data,
            &args.description,
            &filename,
            &args.filetype,
        )?;
        let outcome = AttachOutcome {
            artifact_id: args.artifact_id,
            file_id,
            filename: filename.clone(),
            bytes: data.len(),
        };
        render(ctx.output, &outcome, |outcome, w| {
            writeln!(
                w,
                "attached {} ({} bytes) to artifact {} as file {}",
                outcome.filename, outcome.bytes, outcome.artifact_id, outcome.file_id
            )
        })
    })
}

/// Execute `qy detach <id> <file-id>`.
///
/// # Errors
///
/// Returns an error when no tracker is selected or a remote call fails.
pub fn run_detach(args: &DetachArgs, ctx: &CliContext) -> anyhow::Result<()> {
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
        let file_id = artifact.delete_attached_file(client, args.file_id)?;
        let outcome = DetachOutcome {
            artifact_id: args.artifact_id,
            file_id,
        };
        render(ctx.output, &outcome, |outcome, w| {
            writeln!(
                w,
                "detached file {} from artifact {}",
                outcome.file_id, outcome.artifact_id
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct AttachWrapper {
        #[command(flatten)]
        args: AttachArgs,
    }

    #[derive(Parser)]
    struct DetachWrapper {
        #[command(flatten)]
        args: DetachArgs,
    }

    #[test]
    fn attach_args_parse_with_defaults() {
        let w = AttachWrapper::parse_from(["test", "1807", "trace.log"]);
        assert_eq!(w.args.artifact_id, 1807);
        assert_eq!(w.args.file, PathBuf::from("trace.log"));
        assert_eq!(w.args.description, "");
        assert_eq!(w.args.filetype, "application/octet-stream");
    }

    #[test]
    fn attach_flags_override_the_defaults() {
        let w = AttachWrapper::parse_from([
            "test",
            "1807",
            "shot.png",
            "--description",
            "crash dialog",
            "--filetype",
            "image/png",
        ]);
        assert_eq!(w.args.description, "crash dialog");
        assert_eq!(w.args.filetype, "image/png");
    }

    #[test]
    fn detach_args_parse() {
        let w = DetachWrapper::parse_from(["test", "1807", "801"]);
        assert_eq!(w.args.artifact_id, 1807);
        assert_eq!(w.args.file_id, 801);
    }

    #[test]
    fn upload_name_takes_the_final_component() {
        assert_eq!(upload_name(Path::new("/tmp/logs/trace.log")), "trace.log");
        assert_eq!(upload_name(Path::new("trace.log")), "trace.log");
    }
}
