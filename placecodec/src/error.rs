//! All error types for the placecodec crate.
//!
//! Only the Twine to Android conversion can reject a value; everything else is
//! returned from direction parsing and batch conversion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The value mixes `%1$d` style and `%d` style placeholders, so no
    /// consistent numbering can be inferred. Carries the original input.
    #[error("the value \"{value}\" contains numbered and non-numbered placeholders")]
    MixedPlaceholderNumbering { value: String },

    #[error("unknown conversion direction `{0}`")]
    UnknownDirection(String),

    #[error("unknown error policy `{0}`")]
    UnknownPolicy(String),

    #[error("conversion error: {message}")]
    Conversion {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new conversion error with optional source error
    pub fn conversion_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Conversion {
            message: message.into(),
            source,
        }
    }

    /// Creates a mixed numbering error for `value`.
    pub fn mixed_numbering(value: impl Into<String>) -> Self {
        Error::MixedPlaceholderNumbering {
            value: value.into(),
        }
    }
}
