//! `qy comment` — append a follow-up to an artifact.

use std::io::Write;

use clap::Args;
use quarry_client::model::Tracker;
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Artifact id to comment on.
    pub artifact_id: i32,

    /// Comment body.
    pub body: String,

    /// Comment type id, service-defined.
    #[arg(long = "comment-type", default_value_t = 1)]
    pub comment_type: i32,
}

#[derive(Debug, Serialize)]
struct CommentOutcome {
    artifact_id: i32,
    accepted: bool,
}

/// Execute `qy comment <id> <body>`.
///
/// # Errors
///
/// Returns an error when no tracker is selected or a remote call fails.
pub fn run_comment(args: &CommentArgs, ctx: &CliContext) -> anyhow::Result<()> {
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
        let accepted = artifact.add_follow_up(client, &args.body, args.comment_type)?;
        let outcome = CommentOutcome {
            artifact_id: args.artifact_id,
            accepted,
        };
        render(ctx.output, &outcome, |outcome, w| {
            if outcome.accepted {
                writeln!(w, "commented on artifact {}", outcome.artifact_id)
            } else {
                writeln!(w, "comment rejected for artifact {}", outcome.artifact_id)
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: CommentArgs,
    }

    #[test]
    fn comment_args_parse() {
        let w = Wrapper::parse_from(["test", "1807", "looks fixed in r1024"]);
        assert_eq!(w.args.artifact_id, 1807);
        assert_eq!(w.args.body, "looks fixed in r1024");
        assert_eq!(w.args.comment_type, 1);
    }

    #[test]
    fn comment_type_flag_overrides_the_default() {
        let w = Wrapper::parse_from(["test", "1807", "triaged", "--comment-type", "3"]);
        assert_eq!(w.args.comment_type, 3);
    }
}
