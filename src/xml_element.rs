// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! A raw, unparsed XML fragment. Parsing and validation belong to the XML codec,
//! which this crate only calls through [`crate::type_loader::XmlDecoderFactory`].

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::EncodingResult;
use crate::json::{JsonDecodable, JsonEncodable};

/// An XML fragment carried verbatim. `None` represents the null element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    data: Option<String>,
}

impl XmlElement {
    /// Wrap a non-null XML fragment.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    /// The null XML element.
    pub fn null() -> Self {
        Self { data: None }
    }

    /// True if this is the null element.
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// The raw fragment text, if not null.
    pub fn as_str(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl UaNullable for XmlElement {
    fn is_ua_null(&self) -> bool {
        self.is_null()
    }
}

impl From<String> for XmlElement {
    fn from(value: String) -> Self {
        Self { data: Some(value) }
    }
}

impl JsonEncodable for XmlElement {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
        match &self.data {
            Some(text) => Ok(stream.string_value(text)?),
            None => Ok(stream.null_value()?),
        }
    }
}

impl JsonDecodable for XmlElement {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(XmlElement::null());
        }
        Ok(XmlElement::new(decoder.current_string()?.to_owned()))
    }
}
