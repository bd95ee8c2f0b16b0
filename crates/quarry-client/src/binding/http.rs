//! Blocking JSON-over-HTTP implementation of [`Binding`].
//!
//! One POST per remote call to `{base_url}/api/{method}`, parameters as a
//! JSON object carrying the session hash, answers as plain JSON. Void calls
//! answer JSON `null`; scalar calls answer bare JSON scalars. Error
//! statuses carry a fault body (`fault_code`, `fault_detail`) which maps to
//! [`ClientError::ServerFault`]; everything that dies before a service
//! answer maps to [`ClientError::Transport`].

use std::cell::Cell;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};

use super::{ArtifactRef, Binding};
use crate::error::ClientError;
use crate::session::SessionHash;
use crate::wire::{
    ArtifactRow, ArtifactUpdateRow, AttachedFileRow, CcRow, DependencyRow, FieldRow, FollowUpRow,
    GroupRow, HistoryRow, ReportRow, SessionRow, TrackerRow,
};

const USER_AGENT: &str = concat!("quarry-client/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP binding for one tracker service root.
pub struct HttpBinding {
    base_url: String,
    requests: Cell<usize>,
}

impl HttpBinding {
    /// Build a binding for a service root like `https://forge.example.net`.
    /// Trailing slashes are tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            requests: Cell::new(0),
        }
    }

    /// The normalized service root this binding talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of requests issued since construction.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }

    fn call<T: DeserializeOwned>(&self, method: &str, params: JsonValue) -> Result<T, ClientError> {
        self.requests.set(self.requests.get() + 1);

        let url = format!("{}/api/{method}", self.base_url);
        tracing::debug!(method, url = url.as_str(), "tracker call");

        let response = ureq::post(&url)
            .set("Accept", "application/json")
            .set("User-Agent", USER_AGENT)
            .send_json(params)
            .map_err(|err| match err {
                ureq::Error::Status(status, response) => {
                    let body = response.into_string().unwrap_or_default();
                    fault_from_status(method, status, &body)
                }
                ureq::Error::Transport(transport) => {
                    ClientError::transport(format!("{method}: {transport}"))
                }
            })?;

        response.into_json::<T>().map_err(|err| {
            ClientError::transport(format!("undecodable answer from {method}: {err}"))
        })
    }

    fn call_unit(&self, method: &str, params: JsonValue) -> Result<(), ClientError> {
        let _: JsonValue = self.call(method, params)?;
        Ok(())
    }
}

/// Map an HTTP error status plus body to a server fault.
///
/// The service sends `{"fault_code": ..., "fault_detail": ...}` with error
/// statuses; when the body is not that shape the status itself becomes the
/// code.
fn fault_from_status(method: &str, status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<FaultBody>(body) {
        Ok(fault) => ClientError::fault(fault.fault_code, fault.fault_detail),
        Err(_) => ClientError::fault(
            Some(status.to_string()),
            format!("{method} failed with HTTP {status}"),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct FaultBody {
    #[serde(default)]
    fault_code: Option<String>,
    fault_detail: String,
}

fn artifact_params(session: &SessionHash, artifact: ArtifactRef) -> JsonValue {
    json!({
        "session_hash": session.expose(),
        "group_id": artifact.group_id,
        "tracker_id": artifact.tracker_id,
        "artifact_id": artifact.artifact_id,
    })
}

fn tracker_params(session: &SessionHash, group_id: i32, tracker_id: i32) -> JsonValue {
    json!({
        "session_hash": session.expose(),
        "group_id": group_id,
        "tracker_id": tracker_id,
    })
}

fn merged(base: JsonValue, extra: JsonValue) -> JsonValue {
    let (JsonValue::Object(mut base), JsonValue::Object(extra)) = (base, extra) else {
        // Both inputs come from `json!` object literals in this module.
        return JsonValue::Null;
    };
    base.extend(extra);
    JsonValue::Object(base)
}

impl Binding for HttpBinding {
    fn login(&self, login_name: &str, password: &str) -> Result<SessionRow, ClientError> {
        self.call(
            "login",
            json!({"login_name": login_name, "password": password}),
        )
    }

    fn logout(&self, session: &SessionHash) -> Result<(), ClientError> {
        self.call_unit("logout", json!({"session_hash": session.expose()}))
    }

    fn my_groups(&self, session: &SessionHash) -> Result<Vec<GroupRow>, ClientError> {
        self.call("my_groups", json!({"session_hash": session.expose()}))
    }

    fn trackers(
        &self,
        session: &SessionHash,
        group_id: i32,
    ) -> Result<Vec<TrackerRow>, ClientError> {
        self.call(
            "trackers",
            json!({"session_hash": session.expose(), "group_id": group_id}),
        )
    }

    fn tracker_fields(
        &self,
        session: &SessionHash,
        group_id: i32,
        tracker_id: i32,
    ) -> Result<Vec<FieldRow>, ClientError> {
        self.call("tracker_fields", tracker_params(session, group_id, tracker_id))
    }

    fn tracker_reports(
        &self,
        session: &SessionHash,
        group_id: i32,
        tracker_id: i32,
    ) -> Result<Vec<ReportRow>, ClientError> {
        self.call(
            "tracker_reports",
            tracker_params(session, group_id, tracker_id),
        )
    }

    fn artifacts(
        &self,
        session: &SessionHash,
        group_id: i32,
        tracker_id: i32,
    ) -> Result<Vec<ArtifactRow>, ClientError> {
        self.call("artifacts", tracker_params(session, group_id, tracker_id))
    }

    fn artifact(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<ArtifactRow, ClientError> {
        self.call("artifact", artifact_params(session, artifact))
    }

    fn artifact_follow_ups(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<FollowUpRow>, ClientError> {
        self.call("artifact_follow_ups", artifact_params(session, artifact))
    }

    fn artifact_attached_files(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<AttachedFileRow>, ClientError> {
        self.call(
            "artifact_attached_files",
            artifact_params(session, artifact),
        )
    }

    fn artifact_cc_list(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<CcRow>, ClientError> {
        self.call("artifact_cc_list", artifact_params(session, artifact))
    }

    fn artifact_dependencies(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<DependencyRow>, ClientError> {
        self.call("artifact_dependencies", artifact_params(session, artifact))
    }

    fn artifact_inverse_dependencies(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<DependencyRow>, ClientError> {
        self.call(
            "artifact_inverse_dependencies",
            artifact_params(session, artifact),
        )
    }

    fn artifact_history(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
    ) -> Result<Vec<HistoryRow>, ClientError> {
        self.call("artifact_history", artifact_params(session, artifact))
    }

    fn update_artifact(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        update: &ArtifactUpdateRow,
    ) -> Result<i32, ClientError> {
        let params = merged(
            artifact_params(session, artifact),
            json!({
                "status_id": update.status_id,
                "close_date": update.close_date,
                "summary": update.summary,
                "details": update.details,
                "severity": update.severity,
                "extra_fields": update.extra_fields,
            }),
        );
        self.call("update_artifact", params)
    }

    fn add_follow_up(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        comment: &str,
        comment_type: i32,
    ) -> Result<bool, ClientError> {
        let params = merged(
            artifact_params(session, artifact),
            json!({"comment": comment, "comment_type": comment_type}),
        );
        self.call("add_follow_up", params)
    }

    fn add_attached_file(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        encoded_data: &str,
        description: &str,
        filename: &str,
        filetype: &str,
    ) -> Result<i32, ClientError> {
        let params = merged(
            artifact_params(session, artifact),
            json!({
                "encoded_data": encoded_data,
                "description": description,
                "filename": filename,
                "filetype": filetype,
            }),
        );
        self.call("add_attached_file", params)
    }

    fn delete_attached_file(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        file_id: i32,
    ) -> Result<i32, ClientError> {
        let params = merged(
            artifact_params(session, artifact),
            json!({"file_id": file_id}),
        );
        self.call("delete_attached_file", params)
    }

    fn add_cc(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        addresses: &str,
        comment: &str,
    ) -> Result<(), ClientError> {
        let params = merged(
            artifact_params(session, artifact),
            json!({"addresses": addresses, "comment": comment}),
        );
        self.call_unit("add_cc", params)
    }

    fn delete_cc(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        cc_id: i32,
    ) -> Result<(), ClientError> {
        let params = merged(artifact_params(session, artifact), json!({"cc_id": cc_id}));
        self.call_unit("delete_cc", params)
    }

    fn add_dependencies(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        dependent_ids: &str,
    ) -> Result<(), ClientError> {
        let params = merged(
            artifact_params(session, artifact),
            json!({"dependent_ids": dependent_ids}),
        );
        self.call_unit("add_dependencies", params)
    }

    fn delete_dependency(
        &self,
        session: &SessionHash,
        artifact: ArtifactRef,
        depends_on_artifact_id: i32,
    ) -> Result<i32, ClientError> {
        let params = merged(
            artifact_params(session, artifact),
            json!({"depends_on_artifact_id": depends_on_artifact_id}),
        );
        self.call("delete_dependency", params)
    }
}
