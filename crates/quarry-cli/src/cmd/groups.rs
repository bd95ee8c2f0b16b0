//! `qy groups` — list the project groups the login belongs to.

use std::io::Write;

use quarry_client::model::Group;
use serde::Serialize;

use crate::context::{CliContext, run_connected};
use crate::output::render;

#[derive(Debug, Serialize)]
struct GroupEntry {
    id: i32,
    name: String,
    unix_name: String,
}

impl From<Group> for GroupEntry {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            unix_name: group.unix_name,
        }
    }
}

/// Execute `qy groups`.
///
/// # Errors
///
/// Returns an error if the session or the discovery call fails.
pub fn run_groups(ctx: &CliContext) -> anyhow::Result<()> {
    run_connected(ctx, |client| {
        let entries: Vec<GroupEntry> = client
            .my_groups()?
            .into_iter()
            .map(GroupEntry::from)
            .collect();

        render(ctx.output, &entries, |rows, w| {
            if rows.is_empty() {
                writeln!(w, "(no groups)")?;
                return Ok(());
            }
            for row in rows {
                writeln!(w, "{:>8}  {}  ({})", row.id, row.name, row.unix_name)?;
            }
            Ok(())
        })
    })
}
