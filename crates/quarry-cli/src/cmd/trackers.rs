//! `qy trackers` — list the trackers of the selected project group.

use std::io::Write;

use quarry_client::model::Tracker;
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::{render, render_error};

#[derive(Debug, Serialize)]
struct TrackerEntry {
    id: i32,
    name: String,
    item_name: String,
    description: String,
}

impl From<Tracker> for TrackerEntry {
    fn from(tracker: Tracker) -> Self {
        Self {
            id: tracker.id,
            name: tracker.name,
            item_name: tracker.item_name,
            description: tracker.description,
        }
    }
}

/// Execute `qy trackers`.
///
/// # Errors
///
/// Returns an error when no group is selected or a remote call fails.
pub fn run_trackers(ctx: &CliContext) -> anyhow::Result<()> {
    let group_id = match ctx.group_id() {
        Ok(id) => id,
        Err(err) => {
            render_error(ctx.output, &err.to_cli_error())?;
            anyhow::bail!("{}", err.message);
        }
    };

    run_connected(ctx, |client| {
        let rows = client.binding().trackers(client.session_hash(), group_id)?;
        let entries: Vec<TrackerEntry> = rows
            .into_iter()
            .map(Tracker::from)
            .map(TrackerEntry::from)
            .collect();

        render(ctx.output, &entries, |rows, w| {
            if rows.is_empty() {
                writeln!(w, "(no trackers in group {group_id})")?;
                return Ok(());
            }
            for row in rows {
                writeln!(w, "{:>8}  {:<20}  {}", row.id, row.name, row.description)?;
            }
            Ok(())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_client::wire::TrackerRow;

    #[test]
    fn entry_mirrors_the_tracker() {
        let entry = TrackerEntry::from(Tracker::from(TrackerRow {
            tracker_id: 102,
            group_id: 101,
            name: "Bugs".to_string(),
            item_name: "bug".to_string(),
            description: "Defect reports".to_string(),
        }));
        assert_eq!(entry.id, 102);
        assert_eq!(entry.name, "Bugs");
        assert_eq!(entry.item_name, "bug");
    }
}
