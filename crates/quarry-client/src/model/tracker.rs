//! Tracker metadata: field schema, saved reports, report selection.
//!
//! A [`Tracker`] memoizes its two metadata collections the same way an
//! artifact memoizes its related collections: each is either unset or
//! populated, loads are idempotent, and any failure resets both before the
//! error propagates.

use crate::binding::ArtifactRef;
use crate::client::TrackerClient;
use crate::error::ClientError;
use crate::model::artifact::Artifact;
use crate::model::field::TrackerField;
use crate::model::report::Report;
use crate::wire::TrackerRow;

/// One tracker of a project group, with lazily loaded metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    pub group_id: i32,
    pub id: i32,
    pub name: String,
    pub item_name: String,
    pub description: String,
    fields: Option<Vec<TrackerField>>,
    reports: Option<Vec<Report>>,
    selected_report: Option<i32>,
}

impl Tracker {
    /// Address a tracker directly by ids, without discovery.
    #[must_use]
    pub const fn new(group_id: i32, tracker_id: i32) -> Self {
        Self {
            group_id,
            id: tracker_id,
            name: String::new(),
            item_name: String::new(),
            description: String::new(),
            fields: None,
            reports: None,
            selected_report: None,
        }
    }

    /// Build a tracker whose metadata is already known, e.g. from a cached
    /// schema dump. No loading calls are needed afterwards.
    #[must_use]
    pub fn with_metadata(
        group_id: i32,
        tracker_id: i32,
        fields: Vec<TrackerField>,
        reports: Vec<Report>,
    ) -> Self {
        let mut tracker = Self::new(group_id, tracker_id);
        tracker.fields = Some(fields);
        tracker.reports = Some(reports);
        tracker
    }

    // -----------------------------------------------------------------------
    // Metadata loading
    // -----------------------------------------------------------------------

    /// Fetch the field schema and report list, whichever are missing.
    ///
    /// One remote call per missing collection. Idempotent: present metadata
    /// is never re-fetched. On any failure both caches are reset to unset
    /// before the error propagates, so a half-loaded schema never survives.
    ///
    /// # Errors
    ///
    /// Propagates the first failing call's [`ClientError`]. A schema entry
    /// carrying a display-type code outside the service's own vocabulary
    /// surfaces as [`ClientError::ServerFault`].
    pub fn load_metadata(&mut self, client: &TrackerClient) -> Result<(), ClientError> {
        match self.fetch_missing_metadata(client) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.invalidate_metadata();
                tracing::warn!(
                    tracker_id = self.id,
                    error = %err,
                    "metadata fetch failed, caches reset"
                );
                Err(err)
            }
        }
    }

    fn fetch_missing_metadata(&mut self, client: &TrackerClient) -> Result<(), ClientError> {
        let session = client.session_hash();

        if self.fields.is_none() {
            let rows = client
                .binding()
                .tracker_fields(session, self.group_id, self.id)?;
            let mut fields = Vec::with_capacity(rows.len());
            for row in rows {
                let field = TrackerField::try_from(row)
                    .map_err(|err| ClientError::fault(None, err.to_string()))?;
                fields.push(field);
            }
            self.fields = Some(fields);
        }

        if self.reports.is_none() {
            let rows = client
                .binding()
                .tracker_reports(session, self.group_id, self.id)?;
            self.reports = Some(rows.into_iter().map(Report::from).collect());
        }

        Ok(())
    }

    /// Drop both metadata caches unconditionally. The report selection
    /// survives; stale selections fall back to the first report on lookup.
    pub fn invalidate_metadata(&mut self) {
        self.fields = None;
        self.reports = None;
    }

    /// True once both metadata caches are populated.
    #[must_use]
    pub const fn metadata_loaded(&self) -> bool {
        self.fields.is_some() && self.reports.is_some()
    }

    // -----------------------------------------------------------------------
    // Metadata access
    // -----------------------------------------------------------------------

    /// The loaded field schema; empty until [`Tracker::load_metadata`] runs.
    #[must_use]
    pub fn fields(&self) -> &[TrackerField] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Look up a field descriptor by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TrackerField> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// The loaded reports in server order; empty until metadata is loaded.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        self.reports.as_deref().unwrap_or_default()
    }

    /// Look up a report by id.
    #[must_use]
    pub fn report(&self, id: i32) -> Option<&Report> {
        self.reports().iter().find(|report| report.id == id)
    }

    /// Select the report that index-based column lookups use by default.
    pub const fn select_report(&mut self, id: i32) {
        self.selected_report = Some(id);
    }

    /// The selected report id, when one is set.
    #[must_use]
    pub const fn selected_report(&self) -> Option<i32> {
        self.selected_report
    }

    // -----------------------------------------------------------------------
    // Artifacts
    // -----------------------------------------------------------------------

    /// List this tracker's artifacts as proxies addressed by it.
    ///
    /// # Errors
    ///
    /// Propagates the listing call's [`ClientError`] unchanged.
    pub fn artifacts(&self, client: &TrackerClient) -> Result<Vec<Artifact>, ClientError> {
        let rows = client
            .binding()
            .artifacts(client.session_hash(), self.group_id, self.id)?;
        Ok(rows
            .into_iter()
            .map(|row| Artifact::new(self.group_id, row))
            .collect())
    }

    /// Fetch one artifact of this tracker by id.
    ///
    /// # Errors
    ///
    /// Propagates the fetch call's [`ClientError`] unchanged.
    pub fn artifact(&self, client: &TrackerClient, artifact_id: i32) -> Result<Artifact, ClientError> {
        let row = client.binding().artifact(
            client.session_hash(),
            ArtifactRef::new(self.group_id, self.id, artifact_id),
        )?;
        Ok(Artifact::new(self.group_id, row))
    }
}

impl From<TrackerRow> for Tracker {
    fn from(row: TrackerRow) -> Self {
        Self {
            group_id: row.group_id,
            id: row.tracker_id,
            name: row.name,
            item_name: row.item_name,
            description: row.description,
            fields: None,
            reports: None,
            selected_report: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{DisplayType, FieldOption};
    use crate::model::report::ReportColumn;

    fn loaded_tracker() -> Tracker {
        Tracker::with_metadata(
            101,
            102,
            vec![TrackerField {
                id: 1,
                name: "status_id".to_string(),
                label: "Status".to_string(),
                display_type: DisplayType::SelectBox,
                standard: true,
                options: vec![FieldOption {
                    id: 1,
                    label: "Open".to_string(),
                }],
            }],
            vec![
                Report {
                    id: 100,
                    name: "Default".to_string(),
                    description: String::new(),
                    columns: vec![ReportColumn {
                        field_name: "status_id".to_string(),
                        show_on_result: true,
                        show_on_query: false,
                    }],
                },
                Report {
                    id: 105,
                    name: "Triage".to_string(),
                    description: String::new(),
                    columns: Vec::new(),
                },
            ],
        )
    }

    #[test]
    fn unloaded_tracker_exposes_empty_metadata() {
        let tracker = Tracker::new(101, 102);
        assert!(!tracker.metadata_loaded());
        assert!(tracker.fields().is_empty());
        assert!(tracker.reports().is_empty());
        assert!(tracker.field("status_id").is_none());
        assert!(tracker.report(100).is_none());
    }

    #[test]
    fn field_and_report_lookup_by_key() {
        let tracker = loaded_tracker();
        assert!(tracker.metadata_loaded());
        assert_eq!(
            tracker.field("status_id").map(|f| f.label.as_str()),
            Some("Status")
        );
        assert!(tracker.field("no_such_field").is_none());
        assert_eq!(tracker.report(105).map(|r| r.name.as_str()), Some("Triage"));
        assert!(tracker.report(999).is_none());
    }

    #[test]
    fn invalidate_drops_both_caches_but_keeps_selection() {
        let mut tracker = loaded_tracker();
        tracker.select_report(105);
        tracker.invalidate_metadata();

        assert!(!tracker.metadata_loaded());
        assert!(tracker.fields().is_empty());
        assert!(tracker.reports().is_empty());
        assert_eq!(tracker.selected_report(), Some(105));
    }

    #[test]
    fn tracker_from_row_starts_unloaded() {
        let tracker = Tracker::from(TrackerRow {
            tracker_id: 102,
            group_id: 101,
            name: "Bugs".to_string(),
            item_name: "bug".to_string(),
            description: "Defect reports".to_string(),
        });
        assert_eq!(tracker.id, 102);
        assert_eq!(tracker.group_id, 101);
        assert!(!tracker.metadata_loaded());
        assert_eq!(tracker.selected_report(), None);
    }
}
