//! The remote call surface of the tracker service.
//!
//! Every operation the client performs is exactly one remote call, and
//! [`Binding`] names them all: session management, discovery, the six
//! related-collection fetches, and the mutators. The trait is
//! transport-agnostic; [`http::HttpBinding`] speaks the JSON-over-HTTP
//! flavor, and tests drive the whole client through in-memory stubs.

pub mod http;

use crate::error::ClientError;
use crate::session::SessionHash;
use crate::wire::{
    ArtifactRow, ArtifactUpdateRow, AttachedFileRow, CcRow, DependencyRow, FieldRow, FollowUpRow,
    GroupRow, HistoryRow, ReportRow, SessionRow, TrackerRow,
};

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Full address of one artifact: the service scopes every artifact call by
/// project group, tracker, and artifact id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    pub group_id: i32,
    pub tracker_id: i32,
    pub artifact_id: i32,
}

impl ArtifactRef {
    /// Build an address from its three ids.
    #[must_use]
    pub const fn new(group_id: i32, tracker_id: i32, artifact_id: i32) -> Self {
        Self {
            group_id,
            tracker_id,
            artifact_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Binding trait
// ---------------------------------------------------------------------------

/// Abstraction over the remote tracker API.
///
/// One method per remote call; no batching, retry, or caching lives behind
/// this seam. Implementations map every failure into one of the two
/// [`ClientError`] kinds: the service answered with a fault, or the call
/// never produced an answer. The trait is object-safe so the client can
/// hold `Box<dyn Binding>`.
pub trait Binding {
    // --- session ---

    /// Authenticate and open a session.
    fn login(&self, login_name: &str, password: &str) -> Result<SessionRow, ClientError>;

    /// Close a session. The hash is invalid afterwards.
    fn logout(&self, session: &SessionHash) -> Result<(), ClientError>;

    // --- discovery and metadata ---

    /// List the project groups the logged-in user belongs to.
    fn my_groups(&self, session: &SessionHash) -> Result<Vec<GroupRow>, ClientError>;

    /// List the trackers of a project group.
    fn trackers(&self, session: &SessionHash, group_id: i32) -> Result<Vec<TrackerRow>, ClientError>;

    /// Fetch a tracker's field schema.
    fn tracker_fields(
        &self,
        session: &SessionHash,
        group_id: i32,
        tracker_id: i32,
    ) -> Result<Vec<FieldRow>, ClientError>;

    /// Fetch a tracker's saved reports, in server order.
    fn tracker_reports(
        &self,
        session: &SessionHash,
        group_id: i32,
        tracker_id: i32,
    ) -> Result<Vec<ReportRow>, ClientError>;

    /// List the artifacts of a tracker.
    fn artifacts(
        &self,
        session: &SessionHash,
        group_id: i32,
        tracker_id: i32,
    ) -> Result<Vec<ArtifactRow>, ClientError>;

    /// Fetch a single artifact record.
    fn artifact(&self, session: &SessionHash, artifact: ArtifactRef)
    -> Result<ArtifactRow, ClientError>;

    // --- related collections ---

    /// Fetch the follow-up comments of an artifact.
    fn artifact_follow_ups(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<FollowUpRow>, ClientError>;

    /// Fetch the attached-file metadata of an artifact.
    fn artifact_attached_files(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<AttachedFileRow>, ClientError>;

    /// Fetch the carbon-copy subscriptions of an artifact.
    fn artifact_cc_list(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<CcRow>, ClientError>;

    /// Fetch the artifacts this artifact depends on.
    fn artifact_dependencies(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<DependencyRow>, ClientError>;

    /// Fetch the artifacts that depend on this artifact.
    fn artifact_inverse_dependencies(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<DependencyRow>, ClientError>;

    /// Fetch the audit trail of an artifact.
    fn artifact_history(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<HistoryRow>, ClientError>;

    // --- mutators ---

    /// Replace an artifact's record fields. Returns the artifact id the
    /// service echoes back.
    fn update_artifact(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        update: &ArtifactUpdateRow,
    ) -> Result<i32, ClientError>;

    /// Append a follow-up comment. Returns the service's acceptance flag.
    fn add_follow_up(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        comment: &str,
        comment_type: i32,
    ) -> Result<bool, ClientError>;

    /// Attach a file; `encoded_data` is the base64 form of the file bytes.
    /// Returns the new file id.
    fn add_attached_file(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        encoded_data: &str,
        description: &str,
        filename: &str,
        filetype: &str,
    ) -> Result<i32, ClientError>;

    /// Delete an attached file by id. Returns the deleted file id.
    fn delete_attached_file(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        file_id: i32,
    ) -> Result<i32, ClientError>;

    /// Subscribe addresses to the artifact; `addresses` is comma-separated.
    fn add_cc(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        addresses: &str,
        comment: &str,
    ) -> Result<(), ClientError>;

    /// Remove one carbon-copy subscription by id.
    fn delete_cc(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        cc_id: i32,
    ) -> Result<(), ClientError>;

    /// Add dependency edges; `dependent_ids` is a comma-separated id list.
    fn add_dependencies(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        dependent_ids: &str,
    ) -> Result<(), ClientError>;

    /// Remove the dependency on `depends_on_artifact_id`. Returns the
    /// removed id.
    fn delete_dependency(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        depends_on_artifact_id: i32,
    ) -> Result<i32, ClientError>;
}
