//! quarry-client: a blocking client for SourceForge-lineage artifact
//! trackers.
//!
//! The crate wraps a remote tracker web service behind [`Binding`] (one
//! method per remote call), a [`TrackerClient`] session handle, and typed
//! proxies in [`model`]: groups own trackers, trackers own schema and
//! report metadata, and artifacts own their six lazily fetched related
//! collections (follow-ups, attached files, CC entries, dependencies,
//! inverse dependencies, history).
//!
//! # Call model
//!
//! Everything is synchronous and blocking: one remote call at a time on
//! the calling thread. Exclusive access during fetches comes from
//! `&mut self`, not from locks; wrap a proxy in your own synchronization
//! if you must share it.
//!
//! # Errors
//!
//! Every remote operation fails with one of the two [`ClientError`] kinds:
//! the service reported a fault, or the call never produced an answer.

#![forbid(unsafe_code)]

pub mod binding;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod messages;
pub mod model;
pub mod session;
pub mod wire;

pub use binding::http::HttpBinding;
pub use binding::{ArtifactRef, Binding};
pub use client::TrackerClient;
pub use error::ClientError;
pub use session::{Session, SessionHash};
