//! The artifact proxy: one remote tracker item and its six lazily fetched
//! related collections.
//!
//! The proxy wraps the record the service returned and memoizes follow-ups,
//! attached files, CC entries, dependencies, inverse dependencies, and
//! history. Guarantees:
//!
//! - Each collection is either unset or populated; loads are idempotent.
//! - A failure while loading resets all six to unset before it propagates;
//!   no partial state survives.
//! - Mutators are single remote calls and never touch local state; call
//!   [`Artifact::invalidate`] to see their effects on the next load.
//!
//! Field values render through [`Artifact::field_value`]: fixed-name
//! dispatch for the standard record fields, display-type dispatch for
//! everything else.

use base64::Engine as _;

use crate::binding::ArtifactRef;
use crate::client::TrackerClient;
use crate::dates;
use crate::error::ClientError;
use crate::messages;
use crate::model::field::{DisplayType, TrackerField, parse_value_ids};
use crate::model::related::{AttachedFile, CcEntry, Dependency, FollowUp, HistoryEntry};
use crate::model::tracker::Tracker;
use crate::wire::{ArtifactRow, ArtifactUpdateRow, FieldValueRow};

/// Proxy for one artifact of a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    address: ArtifactRef,
    row: ArtifactRow,
    follow_ups: Option<Vec<FollowUp>>,
    attached_files: Option<Vec<AttachedFile>>,
    cc_list: Option<Vec<CcEntry>>,
    dependencies: Option<Vec<Dependency>>,
    inverse_dependencies: Option<Vec<Dependency>>,
    history: Option<Vec<HistoryEntry>>,
}

impl Artifact {
    /// Wrap a fetched record as a proxy addressed by its group.
    #[must_use]
    pub const fn new(group_id: i32, row: ArtifactRow) -> Self {
        Self {
            address: ArtifactRef::new(group_id, row.tracker_id, row.artifact_id),
            row,
            follow_ups: None,
            attached_files: None,
            cc_list: None,
            dependencies: None,
            inverse_dependencies: None,
            history: None,
        }
    }

    // -----------------------------------------------------------------------
    // Record access
    // -----------------------------------------------------------------------

    /// The artifact id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.row.artifact_id
    }

    /// The full remote address of this artifact.
    #[must_use]
    pub const fn address(&self) -> ArtifactRef {
        self.address
    }

    /// The raw record as the service sent it.
    #[must_use]
    pub const fn row(&self) -> &ArtifactRow {
        &self.row
    }

    /// The one-line summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.row.summary
    }

    /// The long description.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.row.details
    }

    /// Raw stored values of the non-standard fields.
    #[must_use]
    pub fn extra_fields(&self) -> &[FieldValueRow] {
        &self.row.extra_fields
    }

    /// The raw stored value for an extra field id, when one exists.
    #[must_use]
    pub fn stored_value(&self, field_id: i32) -> Option<&str> {
        self.row
            .extra_fields
            .iter()
            .find(|value| value.field_id == field_id)
            .map(|value| value.field_value.as_str())
    }

    // -----------------------------------------------------------------------
    // Related collections
    // -----------------------------------------------------------------------

    /// Fetch whichever of the six related collections are missing.
    ///
    /// One remote call per missing collection, in a fixed order: follow-ups,
    /// attached files, CC entries, dependencies, inverse dependencies,
    /// history. Idempotent: present collections are never re-fetched. On any
    /// failure all six are reset to unset before the error propagates.
    ///
    /// # Errors
    ///
    /// Propagates the first failing call's [`ClientError`].
    pub fn load_related(&mut self, client: &TrackerClient) -> Result<(), ClientError> {
        match self.fetch_missing(client) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.invalidate();
                tracing::warn!(
                    artifact_id = self.address.artifact_id,
                    error = %err,
                    "related fetch failed, collections reset"
                );
                Err(err)
            }
        }
    }

    fn fetch_missing(&mut self, client: &TrackerClient) -> Result<(), ClientError> {
        let session = client.session_hash();
        let binding = client.binding();
        let address = self.address;

        if self.follow_ups.is_none() {
            let rows = binding.artifact_follow_ups(session, address)?;
            self.follow_ups = Some(rows.into_iter().map(FollowUp::from).collect());
        }
        if self.attached_files.is_none() {
            let rows = binding.artifact_attached_files(session, address)?;
            self.attached_files = Some(rows.into_iter().map(AttachedFile::from).collect());
        }
        if self.cc_list.is_none() {
            let rows = binding.artifact_cc_list(session, address)?;
            self.cc_list = Some(rows.into_iter().map(CcEntry::from).collect());
        }
        if self.dependencies.is_none() {
            let rows = binding.artifact_dependencies(session, address)?;
            self.dependencies = Some(rows.into_iter().map(Dependency::from).collect());
        }
        if self.inverse_dependencies.is_none() {
            let rows = binding.artifact_inverse_dependencies(session, address)?;
            self.inverse_dependencies = Some(rows.into_iter().map(Dependency::from).collect());
        }
        if self.history.is_none() {
            let rows = binding.artifact_history(session, address)?;
            self.history = Some(rows.into_iter().map(HistoryEntry::from).collect());
        }

        Ok(())
    }

    /// Drop all six related collections unconditionally.
    ///
    /// Mutators never touch local state; call this after one so the next
    /// [`Artifact::load_related`] sees its effect.
    pub fn invalidate(&mut self) {
        self.follow_ups = None;
        self.attached_files = None;
        self.cc_list = None;
        self.dependencies = None;
        self.inverse_dependencies = None;
        self.history = None;
    }

    /// True once all six related collections are populated.
    #[must_use]
    pub const fn related_loaded(&self) -> bool {
        self.follow_ups.is_some()
            && self.attached_files.is_some()
            && self.cc_list.is_some()
            && self.dependencies.is_some()
            && self.inverse_dependencies.is_some()
            && self.history.is_some()
    }

    /// The follow-up comments, when loaded.
    #[must_use]
    pub fn follow_ups(&self) -> Option<&[FollowUp]> {
        self.follow_ups.as_deref()
    }

    /// The attached-file metadata, when loaded.
    #[must_use]
    pub fn attached_files(&self) -> Option<&[AttachedFile]> {
        self.attached_files.as_deref()
    }

    /// The carbon-copy subscriptions, when loaded.
    #[must_use]
    pub fn cc_list(&self) -> Option<&[CcEntry]> {
        self.cc_list.as_deref()
    }

    /// The artifacts this one depends on, when loaded.
    #[must_use]
    pub fn dependencies(&self) -> Option<&[Dependency]> {
        self.dependencies.as_deref()
    }

    /// The artifacts depending on this one, when loaded.
    #[must_use]
    pub fn inverse_dependencies(&self) -> Option<&[Dependency]> {
        self.inverse_dependencies.as_deref()
    }

    /// The audit trail, when loaded.
    #[must_use]
    pub fn history(&self) -> Option<&[HistoryEntry]> {
        self.history.as_deref()
    }

    // -----------------------------------------------------------------------
    // Field resolution
    // -----------------------------------------------------------------------

    /// Resolve one field of this artifact to display text.
    ///
    /// Standard fields dispatch on their fixed names and always yield
    /// `Some`; select values that miss the option list render empty there.
    /// Extra fields dispatch on the descriptor's display type over the
    /// artifact's stored values and yield `None` when no value is stored
    /// for the field. Select values that miss the option list render the
    /// localized unknown-value placeholder; multi-select entries that miss
    /// are skipped; malformed dates pass through raw.
    #[must_use]
    pub fn field_value(&self, field: &TrackerField) -> Option<String> {
        if field.standard {
            Some(self.standard_value(field))
        } else {
            self.extra_value(field)
        }
    }

    fn standard_value(&self, field: &TrackerField) -> String {
        match field.name.as_str() {
            "artifact_id" => self.row.artifact_id.to_string(),
            "status_id" => option_label_or_empty(field, self.row.status_id),
            "submitted_by" => option_label_or_empty(field, self.row.submitted_by),
            "severity" => option_label_or_empty(field, self.row.severity),
            "open_date" => dates::format_minute(self.row.open_date),
            "close_date" => {
                if self.row.close_date == 0 {
                    String::new()
                } else {
                    dates::format_day(self.row.close_date)
                }
            }
            "summary" => self.row.summary.clone(),
            "details" => self.row.details.clone(),
            _ => String::new(),
        }
    }

    fn extra_value(&self, field: &TrackerField) -> Option<String> {
        let stored = self.stored_value(field.id)?;
        let rendered = match field.display_type {
            DisplayType::SelectBox => stored
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|id| field.option_label(id))
                .map_or_else(|| messages::unknown_value().to_string(), str::to_string),
            DisplayType::MultiBox => parse_value_ids(stored)
                .into_iter()
                .filter_map(|id| field.option_label(id))
                .collect::<Vec<_>>()
                .join(","),
            DisplayType::TextField | DisplayType::TextArea => stored.to_string(),
            DisplayType::DateField => stored
                .trim()
                .parse::<i64>()
                .map_or_else(|_| stored.to_string(), dates::format_day),
        };
        Some(rendered)
    }

    /// Resolve the field shown in one report column to display text.
    ///
    /// The report is looked up by id among the tracker's cached reports,
    /// falling back to the first report when the id is unknown. `column`
    /// indexes the show-on-result subset in display order. A column naming
    /// a field absent from the schema resolves to `None`.
    ///
    /// # Panics
    ///
    /// Panics when the tracker has no cached reports or when `column` is
    /// past the end of the report's show-on-result columns. Both are caller
    /// contract violations, never remote-data conditions.
    #[must_use]
    pub fn field_value_at(
        &self,
        tracker: &Tracker,
        report_id: i32,
        column: usize,
    ) -> Option<String> {
        let reports = tracker.reports();
        let Some(first) = reports.first() else {
            panic!("column lookup requires loaded report metadata");
        };
        let report = tracker.report(report_id).unwrap_or(first);

        let columns = report.result_columns();
        let Some(column_ref) = columns.get(column) else {
            panic!(
                "column index {column} out of range for report {} ({} result columns)",
                report.id,
                columns.len()
            );
        };

        tracker
            .field(&column_ref.field_name)
            .and_then(|field| self.field_value(field))
    }

    /// Resolve a column through the tracker's selected report, falling back
    /// to the first report when nothing is selected.
    ///
    /// # Panics
    ///
    /// Same contract as [`Artifact::field_value_at`].
    #[must_use]
    pub fn field_value_selected(&self, tracker: &Tracker, column: usize) -> Option<String> {
        let report_id = match tracker.selected_report() {
            Some(id) => id,
            None => tracker.reports().first().map_or(0, |report| report.id),
        };
        self.field_value_at(tracker, report_id, column)
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Replace the artifact's record fields with `update`.
    ///
    /// Single remote call; local state is untouched. Returns the artifact
    /// id the service echoes back.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn update(
        &self,
        client: &TrackerClient,
        update: &ArtifactUpdateRow,
    ) -> Result<i32, ClientError> {
        tracing::debug!(artifact_id = self.address.artifact_id, "update artifact");
        client
            .binding()
            .update_artifact(client.session_hash(), self.address, update)
    }

    /// Append a follow-up comment of the given type. Returns the service's
    /// acceptance flag.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn add_follow_up(
        &self,
        client: &TrackerClient,
        comment: &str,
        comment_type: i32,
    ) -> Result<bool, ClientError> {
        client
            .binding()
            .add_follow_up(client.session_hash(), self.address, comment, comment_type)
    }

    /// Attach a file. The bytes are base64-encoded for transport; the
    /// service stores them verbatim. Returns the new file id.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn add_attached_file(
        &self,
        client: &TrackerClient,
        data: &[u8],
        description: &str,
        filename: &str,
        filetype: &str,
    ) -> Result<i32, ClientError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        tracing::debug!(
            artifact_id = self.address.artifact_id,
            filename,
            bytes = data.len(),
            "attach file"
        );
        client.binding().add_attached_file(
            client.session_hash(),
            self.address,
            &encoded,
            description,
            filename,
            filetype,
        )
    }

    /// Delete an attached file by id. Returns the deleted file id.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn delete_attached_file(
        &self,
        client: &TrackerClient,
        file_id: i32,
    ) -> Result<i32, ClientError> {
        client
            .binding()
            .delete_attached_file(client.session_hash(), self.address, file_id)
    }

    /// Subscribe addresses to this artifact's notifications. The service
    /// takes them as one comma-separated list.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn add_cc_entries(
        &self,
        client: &TrackerClient,
        addresses: &[&str],
        comment: &str,
    ) -> Result<(), ClientError> {
        let list = addresses.join(",");
        client
            .binding()
            .add_cc(client.session_hash(), self.address, &list, comment)
    }

    /// Remove one carbon-copy subscription by id.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn delete_cc_entry(&self, client: &TrackerClient, cc_id: i32) -> Result<(), ClientError> {
        client
            .binding()
            .delete_cc(client.session_hash(), self.address, cc_id)
    }

    /// Declare dependencies on other artifacts, by id.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn add_dependencies(&self, client: &TrackerClient, ids: &[i32]) -> Result<(), ClientError> {
        let list = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        client
            .binding()
            .add_dependencies(client.session_hash(), self.address, &list)
    }

    /// Remove the dependency on one artifact. Returns the removed id.
    ///
    /// # Errors
    ///
    /// Propagates the call's [`ClientError`] unchanged.
    pub fn delete_dependency(
        &self,
        client: &TrackerClient,
        depends_on_artifact_id: i32,
    ) -> Result<i32, ClientError> {
        client.binding().delete_dependency(
            client.session_hash(),
            self.address,
            depends_on_artifact_id,
        )
    }
}

fn option_label_or_empty(field: &TrackerField, id: i32) -> String {
    field.option_label(id).map_or_else(String::new, str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldOption;
    use crate::model::report::{Report, ReportColumn};

    fn extra_field(
        id: i32,
        name: &str,
        display_type: DisplayType,
        options: Vec<(i32, &str)>,
    ) -> TrackerField {
        TrackerField {
            id,
            name: name.to_string(),
            label: name.to_string(),
            display_type,
            standard: false,
            options: options
                .into_iter()
                .map(|(id, label)| FieldOption {
                    id,
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    fn standard_field(name: &str, options: Vec<(i32, &str)>) -> TrackerField {
        TrackerField {
            standard: true,
            ..extra_field(0, name, DisplayType::SelectBox, options)
        }
    }

    fn impact_field() -> TrackerField {
        extra_field(
            10_111,
            "impact",
            DisplayType::MultiBox,
            vec![(3, "Low"), (7, "High"), (9, "Crit")],
        )
    }

    fn platform_field() -> TrackerField {
        extra_field(
            10_093,
            "platform",
            DisplayType::SelectBox,
            vec![(3, "Linux"), (7, "macOS")],
        )
    }

    fn sample_row() -> ArtifactRow {
        ArtifactRow {
            artifact_id: 1807,
            tracker_id: 102,
            status_id: 1,
            submitted_by: 42,
            open_date: 1_214_317_500,
            close_date: 0,
            summary: "Crash on save".to_string(),
            details: "Stack trace attached".to_string(),
            severity: 5,
            extra_fields: vec![
                FieldValueRow {
                    field_id: 10_093,
                    artifact_id: 1807,
                    field_value: "3".to_string(),
                },
                FieldValueRow {
                    field_id: 10_111,
                    artifact_id: 1807,
                    field_value: "3, 7,9".to_string(),
                },
                FieldValueRow {
                    field_id: 10_120,
                    artifact_id: 1807,
                    field_value: "nightly-20080620".to_string(),
                },
                FieldValueRow {
                    field_id: 10_130,
                    artifact_id: 1807,
                    field_value: "1214317500".to_string(),
                },
            ],
        }
    }

    fn artifact() -> Artifact {
        Artifact::new(101, sample_row())
    }

    #[test]
    fn address_combines_group_and_record_ids() {
        let artifact = artifact();
        assert_eq!(artifact.address(), ArtifactRef::new(101, 102, 1807));
        assert_eq!(artifact.id(), 1807);
    }

    #[test]
    fn standard_artifact_id_renders_decimal() {
        let field = standard_field("artifact_id", Vec::new());
        assert_eq!(artifact().field_value(&field), Some("1807".to_string()));
    }

    #[test]
    fn standard_status_resolves_option_label() {
        let field = standard_field("status_id", vec![(1, "Open"), (3, "Closed")]);
        assert_eq!(artifact().field_value(&field), Some("Open".to_string()));
    }

    #[test]
    fn severity_uses_the_standard_option_path() {
        // severity is a standard field: it must resolve through the fixed
        // name against the severity option list, not through extra_fields.
        let field = standard_field("severity", vec![(1, "Minor"), (5, "Major"), (9, "Critical")]);
        assert_eq!(artifact().field_value(&field), Some("Major".to_string()));
    }

    #[test]
    fn standard_submitter_resolves_option_label() {
        let field = standard_field("submitted_by", vec![(42, "mchang")]);
        assert_eq!(artifact().field_value(&field), Some("mchang".to_string()));
    }

    #[test]
    fn standard_option_miss_renders_empty() {
        let field = standard_field("status_id", vec![(3, "Closed")]);
        assert_eq!(artifact().field_value(&field), Some(String::new()));
    }

    #[test]
    fn unknown_standard_name_renders_empty() {
        let field = standard_field("assigned_to", Vec::new());
        assert_eq!(artifact().field_value(&field), Some(String::new()));
    }

    #[test]
    fn open_date_is_minute_precision() {
        let field = standard_field("open_date", Vec::new());
        assert_eq!(
            artifact().field_value(&field),
            Some("2008-06-24 14:25".to_string())
        );
    }

    #[test]
    fn close_date_renders_empty_while_open() {
        let field = standard_field("close_date", Vec::new());
        assert_eq!(artifact().field_value(&field), Some(String::new()));
    }

    #[test]
    fn close_date_renders_day_once_closed() {
        let mut row = sample_row();
        row.close_date = 1_214_317_500;
        let artifact = Artifact::new(101, row);
        let field = standard_field("close_date", Vec::new());
        assert_eq!(artifact.field_value(&field), Some("2008-06-24".to_string()));
    }

    #[test]
    fn summary_and_details_pass_raw() {
        let artifact = artifact();
        assert_eq!(
            artifact.field_value(&standard_field("summary", Vec::new())),
            Some("Crash on save".to_string())
        );
        assert_eq!(
            artifact.field_value(&standard_field("details", Vec::new())),
            Some("Stack trace attached".to_string())
        );
    }

    #[test]
    fn select_box_resolves_option_label() {
        assert_eq!(
            artifact().field_value(&platform_field()),
            Some("Linux".to_string())
        );
    }

    #[test]
    fn select_box_unknown_id_renders_placeholder() {
        let mut row = sample_row();
        row.extra_fields[0].field_value = "99".to_string();
        let artifact = Artifact::new(101, row);
        assert_eq!(
            artifact.field_value(&platform_field()),
            Some("Unknown value".to_string())
        );
    }

    #[test]
    fn select_box_junk_value_renders_placeholder() {
        let mut row = sample_row();
        row.extra_fields[0].field_value = "linux".to_string();
        let artifact = Artifact::new(101, row);
        assert_eq!(
            artifact.field_value(&platform_field()),
            Some("Unknown value".to_string())
        );
    }

    #[test]
    fn multi_select_joins_labels() {
        assert_eq!(
            artifact().field_value(&impact_field()),
            Some("Low,High,Crit".to_string())
        );
    }

    #[test]
    fn multi_select_skips_unknown_ids() {
        let mut row = sample_row();
        row.extra_fields[1].field_value = "3, 8".to_string();
        let artifact = Artifact::new(101, row);
        assert_eq!(
            artifact.field_value(&impact_field()),
            Some("Low".to_string())
        );
    }

    #[test]
    fn multi_select_with_no_matches_renders_empty() {
        let mut row = sample_row();
        row.extra_fields[1].field_value = "8, oops".to_string();
        let artifact = Artifact::new(101, row);
        assert_eq!(artifact.field_value(&impact_field()), Some(String::new()));
    }

    #[test]
    fn text_fields_pass_raw() {
        let artifact = artifact();
        let text = extra_field(10_120, "build", DisplayType::TextField, Vec::new());
        assert_eq!(
            artifact.field_value(&text),
            Some("nightly-20080620".to_string())
        );

        let area = extra_field(10_120, "build", DisplayType::TextArea, Vec::new());
        assert_eq!(
            artifact.field_value(&area),
            Some("nightly-20080620".to_string())
        );
    }

    #[test]
    fn date_field_formats_epoch_seconds() {
        let field = extra_field(10_130, "due", DisplayType::DateField, Vec::new());
        assert_eq!(
            artifact().field_value(&field),
            Some("2008-06-24".to_string())
        );
    }

    #[test]
    fn date_field_junk_passes_raw() {
        let mut row = sample_row();
        row.extra_fields[3].field_value = "next tuesday".to_string();
        let artifact = Artifact::new(101, row);
        let field = extra_field(10_130, "due", DisplayType::DateField, Vec::new());
        assert_eq!(
            artifact.field_value(&field),
            Some("next tuesday".to_string())
        );
    }

    #[test]
    fn absent_extra_value_resolves_none_for_every_display_type() {
        let artifact = artifact();
        for display_type in DisplayType::ALL {
            let field = extra_field(55_555, "ghost", display_type, vec![(1, "x")]);
            assert_eq!(artifact.field_value(&field), None, "{display_type}");
        }
    }

    // --- column lookup -----------------------------------------------------

    fn report(id: i32, columns: &[(&str, bool)]) -> Report {
        Report {
            id,
            name: format!("report-{id}"),
            description: String::new(),
            columns: columns
                .iter()
                .map(|(name, shown)| ReportColumn {
                    field_name: (*name).to_string(),
                    show_on_result: *shown,
                    show_on_query: true,
                })
                .collect(),
        }
    }

    fn loaded_tracker() -> Tracker {
        Tracker::with_metadata(
            101,
            102,
            vec![
                standard_field("artifact_id", Vec::new()),
                standard_field("summary", Vec::new()),
                platform_field(),
            ],
            vec![
                report(
                    100,
                    &[
                        ("artifact_id", true),
                        ("assigned_to", false),
                        ("summary", true),
                    ],
                ),
                report(105, &[("summary", true), ("ghost_field", true)]),
            ],
        )
    }

    #[test]
    fn column_index_counts_result_columns_only() {
        let tracker = loaded_tracker();
        // Column 1 skips the hidden assigned_to column.
        assert_eq!(
            artifact().field_value_at(&tracker, 100, 1),
            Some("Crash on save".to_string())
        );
        assert_eq!(
            artifact().field_value_at(&tracker, 100, 0),
            Some("1807".to_string())
        );
    }

    #[test]
    fn unknown_report_id_falls_back_to_first_report() {
        let tracker = loaded_tracker();
        assert_eq!(
            artifact().field_value_at(&tracker, 999, 0),
            Some("1807".to_string())
        );
    }

    #[test]
    fn column_naming_unknown_field_resolves_none() {
        let tracker = loaded_tracker();
        assert_eq!(artifact().field_value_at(&tracker, 105, 1), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn column_index_past_result_columns_panics() {
        let tracker = loaded_tracker();
        let _ = artifact().field_value_at(&tracker, 100, 2);
    }

    #[test]
    #[should_panic(expected = "loaded report metadata")]
    fn column_lookup_without_reports_panics() {
        let tracker = Tracker::new(101, 102);
        let _ = artifact().field_value_at(&tracker, 100, 0);
    }

    #[test]
    fn selected_report_drives_column_lookup() {
        let mut tracker = loaded_tracker();
        assert_eq!(
            artifact().field_value_selected(&tracker, 0),
            Some("1807".to_string())
        );

        tracker.select_report(105);
        assert_eq!(
            artifact().field_value_selected(&tracker, 0),
            Some("Crash on save".to_string())
        );
    }

    #[test]
    fn invalidate_resets_all_six_collections() {
        let mut artifact = artifact();
        artifact.follow_ups = Some(Vec::new());
        artifact.attached_files = Some(Vec::new());
        artifact.cc_list = Some(Vec::new());
        artifact.dependencies = Some(Vec::new());
        artifact.inverse_dependencies = Some(Vec::new());
        artifact.history = Some(Vec::new());
        assert!(artifact.related_loaded());

        artifact.invalidate();

        assert!(!artifact.related_loaded());
        assert!(artifact.follow_ups().is_none());
        assert!(artifact.attached_files().is_none());
        assert!(artifact.cc_list().is_none());
        assert!(artifact.dependencies().is_none());
        assert!(artifact.inverse_dependencies().is_none());
        assert!(artifact.history().is_none());
    }
}
