// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `UaString`.

use std::fmt;
use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::EncodingResult;
use crate::json::{JsonDecodable, JsonEncodable};

/// To avoid naming conflict with the Rust `String`, the OPC UA String type is named
/// `UaString`. A string and a null value are distinct, so the value is held as an
/// `Option<String>` internally.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub struct UaString {
    value: Option<String>,
}

impl fmt::Display for UaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "[null]"),
        }
    }
}

impl UaNullable for UaString {
    fn is_ua_null(&self) -> bool {
        self.is_null()
    }
}

impl UaString {
    /// The null string.
    pub fn null() -> Self {
        Self { value: None }
    }

    /// True if this is the null string (distinct from the empty string).
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// True if null or empty.
    pub fn is_empty(&self) -> bool {
        self.value.as_ref().map(|v| v.is_empty()).unwrap_or(true)
    }

    /// Borrow the string content, if not null.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// UTF-8 byte length, `0` for the null string.
    pub fn len(&self) -> usize {
        self.value.as_ref().map(|v| v.len()).unwrap_or(0)
    }
}

impl From<&str> for UaString {
    fn from(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

impl From<String> for UaString {
    fn from(value: String) -> Self {
        Self { value: Some(value) }
    }
}

impl JsonEncodable for UaString {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
        match self.value() {
            Some(s) => stream.string_value(s)?,
            None => stream.null_value()?,
        }
        Ok(())
    }
}

impl JsonDecodable for UaString {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(UaString::null());
        }
        let s = UaString::from(decoder.current_string()?.to_string());
        decoder.limits().check_string_length(s.len())?;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_distinct_from_empty() {
        assert!(UaString::null().is_null());
        assert!(!UaString::from("").is_null());
        assert!(UaString::from("").is_empty());
    }
}
