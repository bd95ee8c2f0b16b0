//! `qy dep` — manage dependencies between artifacts.

use std::io::Write;

use clap::{Args, Subcommand};
use quarry_client::model::Tracker;
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Args, Debug)]
pub struct DepArgs {
    #[command(subcommand)]
    pub command: DepCommand,
}

#[derive(Subcommand, Debug)]
pub enum DepCommand {
    /// Declare that an artifact depends on one or more others.
    Add {
        /// Artifact id that gains the dependency.
        artifact_id: i32,

        /// Artifact ids it depends on.
        #[arg(required = true)]
        depends_on: Vec<i32>,
    },

    /// Drop a dependency.
    Remove {
        /// Artifact id that loses the dependency.
        artifact_id: i32,

        /// Artifact id it no longer depends on.
        depends_on: i32,
    },
}

#[derive(Debug, Serialize)]
struct DepOutcome {
    artifact_id: i32,
    action: &'static str,
    depends_on: Vec<i32>,
}

/// Execute `qy dep add|remove`.
///
/// # Errors
///
/// Returns an error when no tracker is selected or a remote call fails.
pub fn run_dep(args: &DepArgs, ctx: &CliContext) -> anyhow::Result<()> {
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
            DepCommand::Add {
                artifact_id,
                depends_on,
            } => {
                let artifact = tracker.artifact(client, *artifact_id)?;
                artifact.add_dependencies(client, depends_on)?;
                DepOutcome {
                    artifact_id: *artifact_id,
                    action: "added",
                    depends_on: depends_on.clone(),
                }
            }
            DepCommand::Remove {
                artifact_id,
                depends_on,
            } => {
                let artifact = tracker.artifact(client, *artifact_id)?;
                let dropped = artifact.delete_dependency(client, *depends_on)?;
                DepOutcome {
                    artifact_id: *artifact_id,
                    action: "removed",
                    depends_on: vec![dropped],
                }
            }
        };
        render(ctx.output, &outcome, |outcome, w| {
            let list = outcome
                .depends_on
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                w,
                "{} dependency on {} for artifact {}",
                outcome.action, list, outcome.artifact_id
            )
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
        args: DepArgs,
    }

    #[test]
    fn dep_add_collects_every_id() {
        let w = Wrapper::parse_from(["test", "add", "1807", "1650", "1651"]);
        match w.args.command {
            DepCommand::Add {
                artifact_id,
                depends_on,
            } => {
                assert_eq!(artifact_id, 1807);
                assert_eq!(depends_on, vec![1650, 1651]);
            }
            DepCommand::Remove { .. } => panic!("expected add"),
        }
    }

    #[test]
    fn dep_add_requires_at_least_one_id() {
        assert!(Wrapper::try_parse_from(["test", "add", "1807"]).is_err());
    }

    #[test]
    fn dep_remove_parses_both_ids() {
        let w = Wrapper::parse_from(["test", "remove", "1807", "1650"]);
        match w.args.command {
            DepCommand::Remove {
                artifact_id,
                depends_on,
            } => {
                assert_eq!(artifact_id, 1807);
                assert_eq!(depends_on, 1650);
            }
            DepCommand::Add { .. } => panic!("expected remove"),
        }
    }
}
