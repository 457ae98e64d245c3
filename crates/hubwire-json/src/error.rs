//! Error types for hubwire-json.

use std::fmt::Display;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting between values and wire JSON.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No object was handed to the object serializer.
    #[error("input object is missing")]
    MissingInput,

    /// A string did not name any member of the target enum.
    #[error("'{value}' is not a member of enum {type_name}")]
    UnknownVariant {
        /// The string as it appeared on the wire.
        value: String,
        /// The enum being decoded.
        type_name: String,
    },

    /// Error raised by a `Serialize` or `Deserialize` implementation.
    #[error("{0}")]
    Message(String),

    /// Malformed JSON text or an encoding failure in serde_json.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}
