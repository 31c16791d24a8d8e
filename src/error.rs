//! Error types for exif-bridge.

use thiserror::Error;

use crate::value::TypeTag;

/// Result type alias for exif-bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the marshalling and write paths.
///
/// Charset resolution is deliberately absent here — an unrecognized or
/// missing character-set directive falls back to a default encoding and is
/// never reported as an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Metadata key is not of the form `Family.Group.Name` or names the
    /// wrong family for the target store.
    #[error("invalid metadata key: {0:?}")]
    InvalidKey(String),

    /// A textual value could not be parsed into the type the key's schema
    /// requires.
    #[error("invalid {tag} value: {text:?}")]
    InvalidValue {
        /// Target type tag derived from the key.
        tag: TypeTag,
        /// The rejected textual form.
        text: String,
    },

    /// A date entry's string form could not be parsed as a calendar date.
    #[error("cannot parse date from {0:?}")]
    DateParse(String),

    /// A time entry's string form could not be parsed as a time of day.
    #[error("cannot parse time from {0:?}")]
    TimeParse(String),
}
