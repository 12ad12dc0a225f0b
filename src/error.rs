// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! The crate's single error type: a status code plus an optional boxed source.

use std::fmt;

use thiserror::Error as ThisError;

use crate::status_code::StatusCode;

/// Result alias used throughout the codec.
pub type EncodingResult<T> = Result<T, Error>;

/// A codec failure, tagged with the `StatusCode` a caller would report upstream.
#[derive(Debug, ThisError)]
#[error("{status}: {context}")]
pub struct Error {
    status: StatusCode,
    #[source]
    context: Box<dyn std::error::Error + Send + Sync>,
}

impl Error {
    /// Build an error from a status code and a source.
    pub fn new(
        status: StatusCode,
        context: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            status,
            context: context.into(),
        }
    }

    /// Build a `BadEncodingError` from anything displayable.
    pub fn encoding(context: impl fmt::Display) -> Self {
        Self::new(StatusCode::BAD_ENCODING_ERROR, context.to_string())
    }

    /// Build a `BadDecodingError` from anything displayable.
    pub fn decoding(context: impl fmt::Display) -> Self {
        Self::new(StatusCode::BAD_DECODING_ERROR, context.to_string())
    }

    /// Build a `BadEncodingLimitsExceeded` error describing which limit tripped.
    pub fn limits_exceeded(context: impl fmt::Display) -> Self {
        Self::new(StatusCode::BAD_ENCODING_LIMITS_EXCEEDED, context.to_string())
    }

    /// The status code this error corresponds to.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The underlying cause, boxed.
    pub fn full_context(&self) -> &(dyn std::error::Error + Send + Sync) {
        self.context.as_ref()
    }
}

impl From<Error> for StatusCode {
    fn from(value: Error) -> Self {
        value.status
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::decoding(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::decoding(value)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(value: std::num::ParseIntError) -> Self {
        Self::decoding(value)
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(value: std::num::ParseFloatError) -> Self {
        Self::decoding(value)
    }
}

impl From<struson::writer::JsonNumberError> for Error {
    fn from(value: struson::writer::JsonNumberError) -> Self {
        Self::encoding(value)
    }
}

impl From<struson::reader::ReaderError> for Error {
    fn from(value: struson::reader::ReaderError) -> Self {
        Self::decoding(value)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(value: base64::DecodeError) -> Self {
        Self::decoding(value)
    }
}

impl From<uuid::Error> for Error {
    fn from(value: uuid::Error) -> Self {
        Self::decoding(value)
    }
}

impl From<chrono::ParseError> for Error {
    fn from(value: chrono::ParseError) -> Self {
        Self::decoding(value)
    }
}
