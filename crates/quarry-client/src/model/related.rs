//! Typed views over the six related collections of an artifact.
//!
//! Plain data plus small display helpers; all fetch logic lives on
//! [`crate::model::Artifact`].

use serde::Serialize;

use crate::dates;
use crate::wire::{AttachedFileRow, CcRow, DependencyRow, FollowUpRow, HistoryRow};

/// One follow-up comment on an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUp {
    pub comment: String,
    pub comment_type_id: i32,
    pub date: i64,
    pub submitted_by: i32,
    pub user_name: String,
}

impl FollowUp {
    /// Comment time as minute-precision display text.
    #[must_use]
    pub fn date_display(&self) -> String {
        dates::format_minute(self.date)
    }
}

impl From<FollowUpRow> for FollowUp {
    fn from(row: FollowUpRow) -> Self {
        Self {
            comment: row.comment,
            comment_type_id: row.comment_type_id,
            date: row.date,
            submitted_by: row.submitted_by,
            user_name: row.user_name,
        }
    }
}

/// Metadata of one file attached to an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedFile {
    pub id: i32,
    pub filename: String,
    pub description: String,
    pub filesize: i64,
    pub filetype: String,
    pub add_date: i64,
    pub submitted_by: i32,
}

impl AttachedFile {
    /// File size as short display text (`512 B`, `4 KiB`, ...).
    #[must_use]
    pub fn size_display(&self) -> String {
        let size = self.filesize;
        if size < 1024 {
            return format!("{size} B");
        }
        let kib = size / 1024;
        if kib < 1024 {
            return format!("{kib} KiB");
        }
        let mib = kib / 1024;
        if mib < 1024 {
            return format!("{mib} MiB");
        }
        format!("{} GiB", mib / 1024)
    }

    /// Attach time as day-precision display text.
    #[must_use]
    pub fn date_display(&self) -> String {
        dates::format_day(self.add_date)
    }
}

impl From<AttachedFileRow> for AttachedFile {
    fn from(row: AttachedFileRow) -> Self {
        Self {
            id: row.file_id,
            filename: row.filename,
            description: row.description,
            filesize: row.filesize,
            filetype: row.filetype,
            add_date: row.add_date,
            submitted_by: row.submitted_by,
        }
    }
}

/// One carbon-copy subscription on an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CcEntry {
    pub id: i32,
    pub email: String,
    pub added_by: i32,
    pub comment: String,
    pub date: i64,
}

impl CcEntry {
    /// Subscription time as day-precision display text.
    #[must_use]
    pub fn date_display(&self) -> String {
        dates::format_day(self.date)
    }
}

impl From<CcRow> for CcEntry {
    fn from(row: CcRow) -> Self {
        Self {
            id: row.cc_id,
            email: row.email,
            added_by: row.added_by,
            comment: row.comment,
            date: row.date,
        }
    }
}

/// One dependency edge, forward or inverse depending on which collection
/// it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub id: i32,
    pub artifact_id: i32,
    pub depends_on_artifact_id: i32,
    pub summary: String,
    pub tracker_id: i32,
    pub tracker_name: String,
}

impl From<DependencyRow> for Dependency {
    fn from(row: DependencyRow) -> Self {
        Self {
            id: row.dependency_id,
            artifact_id: row.artifact_id,
            depends_on_artifact_id: row.depends_on_artifact_id,
            summary: row.summary,
            tracker_id: row.tracker_id,
            tracker_name: row.tracker_name,
        }
    }
}

/// One audit-trail entry for a field change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
    pub date: i64,
    pub modified_by: i32,
}

impl HistoryEntry {
    /// Change time as minute-precision display text.
    #[must_use]
    pub fn date_display(&self) -> String {
        dates::format_minute(self.date)
    }
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            field_name: row.field_name,
            old_value: row.old_value,
            new_value: row.new_value,
            date: row.date,
            modified_by: row.modified_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_display_picks_the_largest_unit() {
        let mut file = AttachedFile::from(AttachedFileRow {
            file_id: 1,
            artifact_id: 1807,
            filename: "trace.log".to_string(),
            description: String::new(),
            filesize: 512,
            filetype: "text/plain".to_string(),
            add_date: 1_214_317_500,
            submitted_by: 42,
        });
        assert_eq!(file.size_display(), "512 B");

        file.filesize = 2048;
        assert_eq!(file.size_display(), "2 KiB");

        file.filesize = 5 * 1024 * 1024;
        assert_eq!(file.size_display(), "5 MiB");

        file.filesize = 3 * 1024 * 1024 * 1024;
        assert_eq!(file.size_display(), "3 GiB");
    }

    #[test]
    fn follow_up_date_is_minute_precision() {
        let follow_up = FollowUp::from(FollowUpRow {
            artifact_id: 1807,
            comment: "confirmed on trunk".to_string(),
            comment_type_id: 0,
            date: 1_214_317_500,
            submitted_by: 42,
            user_name: "mchang".to_string(),
        });
        assert_eq!(follow_up.date_display(), "2008-06-24 14:25");
    }

    #[test]
    fn dependency_keeps_both_endpoints() {
        let dep = Dependency::from(DependencyRow {
            dependency_id: 77,
            artifact_id: 1807,
            depends_on_artifact_id: 1650,
            summary: "Parser rewrite".to_string(),
            tracker_id: 102,
            tracker_name: "Bugs".to_string(),
        });
        assert_eq!(dep.artifact_id, 1807);
        assert_eq!(dep.depends_on_artifact_id, 1650);
    }
}
