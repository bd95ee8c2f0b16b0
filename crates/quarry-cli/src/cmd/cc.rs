//! `qy cc` — manage an artifact's notification list.

use std::io::Write;

use clap::{Args, Subcommand};
use quarry_client::model::Tracker;
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Args, Debug)]
pub struct CcArgs {
    #[command(subcommand)]
    pub command: CcCommand,
}

#[derive(Subcommand, Debug)]
pub enum CcCommand {
    /// Add one or more email addresses to the CC list.
    Add {
        /// Artifact id.
        artifact_id: i32,

        /// Addresses to add.
        #[arg(required = true)]
        addresses: Vec<String>,

        /// Comment stored next to the entries.
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Remove a CC entry by id.
    Remove {
        /// Artifact id.
        artifact_id: i32,

        /// CC entry id, as shown by `qy show`.
        cc_id: i32,
    },
}

#[derive(Debug, Serialize)]
struct CcOutcome {
    artifact_id: i32,
    action: &'static str,
    count: usize,
}

/// Execute `qy cc add|remove`.
///
/// # Errors
///
/// Returns an error when no tracker is selected or a remote call fails.
pub fn run_cc(args: &CcArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let scope = match ctx.scope() {
        Ok(scope) => scope,
        Err(err) => {
            render_error(ctx.output, &err.to_cli_error())?;
            anyhow::bail!("{}", err.message);
        }
    };

    run_connected(ctx, |client| {
        let tracker = Tracker::new(scope.group_id, scope.tracker_id);
        let outcome = match &args.command {
            CcCommand::Add {
                artifact_id,
                addresses,
                comment,
            } => {
                let artifact = tracker.artifact(client, *artifact_id)?;
                let refs: Vec<&str> = addresses.iter().map(String::as_str).collect();
                artifact.add_cc_entries(client, &refs, comment)?;
                CcOutcome {
                    artifact_id: *artifact_id,
                    action: "added",
                    count: addresses.len(),
                }
            }
            CcCommand::Remove { artifact_id, cc_id } => {
                let artifact = tracker.artifact(client, *artifact_id)?;
                artifact.delete_cc_entry(client, *cc_id)?;
                CcOutcome {
                    artifact_id: *artifact_id,
                    action: "removed",
                    count: 1,
                }
            }
        };
        render(ctx.output, &outcome, |outcome, w| {
            writeln!(
                w,
                "{} {} cc entr{} on artifact {}",
                outcome.action,
                outcome.count,
                if outcome.count == 1 { "y" } else { "ies" },
                outcome.artifact_id
            )
        })
    })
}
