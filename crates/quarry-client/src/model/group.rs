//! Project groups: the service's top-level namespace.

use serde::Serialize;

use crate::client::TrackerClient;
use crate::error::ClientError;
use crate::model::Tracker;
use crate::wire::GroupRow;

/// One project group the logged-in user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub unix_name: String,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Self {
            id: row.group_id,
            name: row.group_name,
            unix_name: row.unix_name,
        }
    }
}

impl Group {
    /// List this group's trackers.
    ///
    /// # Errors
    ///
    /// Propagates the discovery call's [`ClientError`] unchanged.
    pub fn trackers(&self, client: &TrackerClient) -> Result<Vec<Tracker>, ClientError> {
        let rows = client.binding().trackers(client.session_hash(), self.id)?;
        Ok(rows.into_iter().map(Tracker::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_from_row() {
        let group = Group::from(GroupRow {
            group_id: 101,
            group_name: "Compiler".to_string(),
            unix_name: "compiler".to_string(),
        });
        assert_eq!(group.id, 101);
        assert_eq!(group.unix_name, "compiler");
    }
}
