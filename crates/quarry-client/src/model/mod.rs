//! Typed views over the tracker service's data.
//!
//! The hierarchy mirrors the service's addressing: [`Group`] owns trackers,
//! [`Tracker`] owns schema/report metadata and artifacts, [`Artifact`] owns
//! its six related collections. Trackers and artifacts memoize remote state
//! with the same discipline: each collection is unset or populated, loads
//! are idempotent, and any failure resets the whole set before propagating.

pub mod artifact;
pub mod field;
pub mod group;
pub mod related;
pub mod report;
pub mod tracker;

pub use artifact::Artifact;
pub use field::{DisplayType, FieldOption, TrackerField, UnknownDisplayType, parse_value_ids};
pub use group::Group;
pub use related::{AttachedFile, CcEntry, Dependency, FollowUp, HistoryEntry};
pub use report::{Report, ReportColumn};
pub use tracker::Tracker;
