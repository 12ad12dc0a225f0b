// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `ByteString`.

use std::io::Write;

use base64::Engine;
use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};
use crate::json::{JsonDecodable, JsonEncodable};

/// An opaque byte sequence, distinct from the empty sequence. Encoded as base64 in JSON.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub struct ByteString {
    value: Option<Vec<u8>>,
}

impl UaNullable for ByteString {
    fn is_ua_null(&self) -> bool {
        self.is_null()
    }
}

impl ByteString {
    /// The null byte string.
    pub fn null() -> Self {
        Self { value: None }
    }

    /// True if this is the null byte string.
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Byte length, `0` for the null byte string.
    pub fn len(&self) -> usize {
        self.value.as_ref().map(|v| v.len()).unwrap_or(0)
    }

    /// True if null or zero-length.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the raw bytes, if not null.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Render as a base64 string. Panics if called on the null value; callers should
    /// check [`Self::is_null`] first (mirrors how the JSON encoder uses it below).
    pub fn as_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(
            self.value
                .as_ref()
                .expect("as_base64 called on the null ByteString"),
        )
    }

    /// Decode a base64 string, tolerating embedded whitespace some producers insert.
    pub fn from_base64_ignore_whitespace(s: &str) -> Option<Self> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(cleaned)
            .ok()
            .map(|value| Self { value: Some(value) })
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(value: Vec<u8>) -> Self {
        Self { value: Some(value) }
    }
}

impl JsonEncodable for ByteString {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
        if self.value.is_some() {
            stream.string_value(&self.as_base64())?;
        } else {
            stream.null_value()?;
        }
        Ok(())
    }
}

impl JsonDecodable for ByteString {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(ByteString::null());
        }
        let raw = decoder.current_string()?;
        let decoded = ByteString::from_base64_ignore_whitespace(raw)
            .ok_or_else(|| Error::decoding("cannot decode base64 byte string"))?;
        decoder.limits().check_byte_string_length(decoded.len())?;
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_round_trips() {
        let bs = ByteString::from(vec![1, 2, 3, 255]);
        let encoded = bs.as_base64();
        let decoded = ByteString::from_base64_ignore_whitespace(&encoded).unwrap();
        assert_eq!(bs, decoded);
    }
}
