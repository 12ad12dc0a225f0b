// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `LocalizedText`.
//!
//! Reversible form: `{ "Locale": <string>, "Text": <string> }`, either field omitted
//! when null (so `{}` is a legal encoding of an all-null value). Non-reversible form:
//! the bare `Text` string (or `null` when the text itself is null) — this is one of the
//! few types whose non-reversible *shape* differs from its reversible shape, rather than
//! merely eliding default fields.

use std::fmt;
use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::EncodingResult;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::string::UaString;

/// A human readable text with an optional locale identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalizedText {
    /// The locale, e.g. `"en-US"`. Omitted from the stream if null or empty.
    pub locale: UaString,
    /// The text in the specified locale. Omitted from the stream if null or empty.
    pub text: UaString,
}

impl UaNullable for LocalizedText {
    fn is_ua_null(&self) -> bool {
        self.locale.is_null() && self.text.is_null()
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl LocalizedText {
    /// The null LocalizedText.
    pub fn null() -> Self {
        Self::default()
    }

    /// Build a new LocalizedText.
    pub fn new(locale: &str, text: &str) -> Self {
        Self {
            locale: UaString::from(locale),
            text: UaString::from(text),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self {
            locale: UaString::null(),
            text: UaString::from(value),
        }
    }
}

impl JsonEncodable for LocalizedText {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        if ctx.reversible() {
            stream.begin_object()?;
            write_field(stream, ctx, "Locale", &self.locale)?;
            write_field(stream, ctx, "Text", &self.text)?;
            stream.end_object()?;
        } else {
            self.text.encode(stream, ctx)?;
        }
        Ok(())
    }
}

impl JsonDecodable for LocalizedText {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(LocalizedText::null());
        }
        let locale: UaString = decoder.read(Some("Locale"))?;
        let text: UaString = decoder.read(Some("Text"))?;
        Ok(LocalizedText { locale, text })
    }
}
