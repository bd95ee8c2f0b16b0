//! One module per `qy` subcommand.

pub mod attach;
pub mod cc;
pub mod comment;
pub mod completions;
pub mod dep;
pub mod fields;
pub mod groups;
pub mod list;
pub mod reports;
pub mod show;
pub mod trackers;
pub mod update;
