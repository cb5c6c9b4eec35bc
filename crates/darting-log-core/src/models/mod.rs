//! Domain models for the darting-log system.

mod calculation;
mod case;
mod drug;
mod species;

pub use calculation::*;
pub use case::*;
pub use drug::*;
pub use species::*;

/// Generate a fresh record identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current instant as an RFC 3339 string.
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
