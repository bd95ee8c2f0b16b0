//! Wire records exchanged with the tracker service.
//!
//! Field names and shapes mirror the service's JSON exactly: snake_case
//! keys, integer ids, epoch-second dates, `0` meaning "unset" for
//! `close_date`. These rows are plain data; typed views live in
//! [`crate::model`].

use serde::{Deserialize, Serialize};

/// One artifact record as the service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRow {
    pub artifact_id: i32,
    pub tracker_id: i32,
    pub status_id: i32,
    pub submitted_by: i32,
    /// Creation time, epoch seconds.
    pub open_date: i64,
    /// Close time, epoch seconds; `0` while the artifact is still open.
    #[serde(default)]
    pub close_date: i64,
    pub summary: String,
    #[serde(default)]
    pub details: String,
    pub severity: i32,
    /// Stored values for non-standard fields, keyed by field id.
    #[serde(default)]
    pub extra_fields: Vec<FieldValueRow>,
}

/// A stored value of a non-standard field, keyed by field id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValueRow {
    pub field_id: i32,
    pub artifact_id: i32,
    pub field_value: String,
}

/// A field update sent with [`crate::binding::Binding::update_artifact`],
/// keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNameValueRow {
    pub field_name: String,
    pub artifact_id: i32,
    pub field_value: String,
}

/// Full replacement payload for an artifact's record fields.
///
/// The service expects the complete record on every update; start from
/// [`ArtifactUpdateRow::from_row`] and override what changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactUpdateRow {
    pub status_id: i32,
    pub close_date: i64,
    pub summary: String,
    pub details: String,
    pub severity: i32,
    #[serde(default)]
    pub extra_fields: Vec<FieldNameValueRow>,
}

impl ArtifactUpdateRow {
    /// Seed an update with an artifact's current record values.
    #[must_use]
    pub fn from_row(row: &ArtifactRow) -> Self {
        Self {
            status_id: row.status_id,
            close_date: row.close_date,
            summary: row.summary.clone(),
            details: row.details.clone(),
            severity: row.severity,
            extra_fields: Vec::new(),
        }
    }
}

/// One follow-up comment on an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpRow {
    pub artifact_id: i32,
    pub comment: String,
    pub comment_type_id: i32,
    /// Comment time, epoch seconds.
    pub date: i64,
    pub submitted_by: i32,
    #[serde(default)]
    pub user_name: String,
}

/// One file attached to an artifact. Carries metadata only; file bytes
/// travel base64-encoded through the attach call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFileRow {
    pub file_id: i32,
    pub artifact_id: i32,
    pub filename: String,
    #[serde(default)]
    pub description: String,
    pub filesize: i64,
    #[serde(default)]
    pub filetype: String,
    /// Attach time, epoch seconds.
    pub add_date: i64,
    pub submitted_by: i32,
}

/// One carbon-copy subscription on an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcRow {
    pub cc_id: i32,
    pub artifact_id: i32,
    pub email: String,
    pub added_by: i32,
    #[serde(default)]
    pub comment: String,
    /// Subscription time, epoch seconds.
    pub date: i64,
}

/// One dependency edge. For forward dependencies `artifact_id` is the
/// proxied artifact; for inverse dependencies it is the other artifact and
/// `depends_on_artifact_id` is the proxied one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRow {
    pub dependency_id: i32,
    pub artifact_id: i32,
    pub depends_on_artifact_id: i32,
    #[serde(default)]
    pub summary: String,
    pub tracker_id: i32,
    #[serde(default)]
    pub tracker_name: String,
}

/// One audit-trail entry for an artifact field change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub field_name: String,
    #[serde(default)]
    pub old_value: String,
    #[serde(default)]
    pub new_value: String,
    /// Change time, epoch seconds.
    pub date: i64,
    pub modified_by: i32,
}

/// One field definition in a tracker's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRow {
    pub field_id: i32,
    pub field_name: String,
    /// Display-type code: `SB`, `MB`, `TF`, `DF`, or `TA`.
    pub display_type: String,
    /// True for the fixed fields every tracker carries.
    #[serde(default)]
    pub standard: bool,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<FieldOptionRow>,
}

/// One selectable option of a select-box or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptionRow {
    pub option_id: i32,
    pub value: String,
}

/// One saved report (column layout) of a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub report_id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub columns: Vec<ReportColumnRow>,
}

/// One column of a report, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportColumnRow {
    pub field_name: String,
    #[serde(default)]
    pub show_on_result: bool,
    #[serde(default)]
    pub show_on_query: bool,
}

/// One tracker within a project group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerRow {
    pub tracker_id: i32,
    pub group_id: i32,
    pub name: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub description: String,
}

/// One project group the logged-in user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRow {
    pub group_id: i32,
    pub group_name: String,
    #[serde(default)]
    pub unix_name: String,
}

/// The service's answer to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRow {
    pub session_hash: String,
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn artifact_row_decodes_service_json() {
        let raw = json!({
            "artifact_id": 1807,
            "tracker_id": 102,
            "status_id": 1,
            "submitted_by": 42,
            "open_date": 1_214_317_500,
            "close_date": 0,
            "summary": "Crash on save",
            "details": "Stack trace attached",
            "severity": 5,
            "extra_fields": [
                {"field_id": 10_093, "artifact_id": 1807, "field_value": "3"}
            ]
        });

        let row: ArtifactRow = serde_json::from_value(raw).expect("decode artifact row");
        assert_eq!(row.artifact_id, 1807);
        assert_eq!(row.close_date, 0);
        assert_eq!(row.extra_fields.len(), 1);
        assert_eq!(row.extra_fields[0].field_value, "3");
    }

    #[test]
    fn artifact_row_defaults_omitted_optionals() {
        let raw = json!({
            "artifact_id": 9,
            "tracker_id": 1,
            "status_id": 1,
            "submitted_by": 1,
            "open_date": 1_214_317_500,
            "summary": "minimal",
            "severity": 1
        });

        let row: ArtifactRow = serde_json::from_value(raw).expect("decode minimal row");
        assert_eq!(row.close_date, 0);
        assert_eq!(row.details, "");
        assert!(row.extra_fields.is_empty());
    }

    #[test]
    fn field_row_decodes_options() {
        let raw = json!({
            "field_id": 10_093,
            "field_name": "platform",
            "display_type": "SB",
            "standard": false,
            "label": "Platform",
            "options": [
                {"option_id": 3, "value": "Linux"},
                {"option_id": 7, "value": "macOS"}
            ]
        });

        let row: FieldRow = serde_json::from_value(raw).expect("decode field row");
        assert_eq!(row.display_type, "SB");
        assert_eq!(row.options[1].value, "macOS");
    }

    #[test]
    fn field_name_value_row_round_trips() {
        let row = FieldNameValueRow {
            field_name: "platform".to_string(),
            artifact_id: 1807,
            field_value: "7".to_string(),
        };
        let encoded = serde_json::to_string(&row).expect("encode update row");
        let decoded: FieldNameValueRow =
            serde_json::from_str(&encoded).expect("decode update row");
        assert_eq!(decoded, row);
    }
}
