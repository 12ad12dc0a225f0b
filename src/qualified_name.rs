// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `QualifiedName`: a name qualified by a namespace index.
//!
//! JSON schema: `{ "Uri": <namespace index>, "Name": <string> }`. `Uri` is omitted when
//! the namespace index is `0`; `Name` is omitted when null. The field is named `Uri` on
//! the wire even though it always carries the numeric index — this is a normative quirk
//! of the OPC UA JSON mapping, not a typo.

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::EncodingResult;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::string::UaString;

/// A name qualified by a namespace index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    /// The namespace index.
    pub namespace_index: u16,
    /// The name.
    pub name: UaString,
}

impl UaNullable for QualifiedName {
    fn is_ua_null(&self) -> bool {
        self.is_null()
    }
}

impl QualifiedName {
    /// The null QualifiedName.
    pub fn null() -> Self {
        Self::default()
    }

    /// True if this is the null QualifiedName.
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.name.is_null()
    }

    /// Build a new QualifiedName.
    pub fn new(namespace_index: u16, name: impl Into<UaString>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self {
            namespace_index: 0,
            name: UaString::from(value),
        }
    }
}

impl JsonEncodable for QualifiedName {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        stream.begin_object()?;
        write_field(stream, ctx, "Uri", &u32::from(self.namespace_index))?;
        write_field(stream, ctx, "Name", &self.name)?;
        stream.end_object()?;
        Ok(())
    }
}

impl JsonDecodable for QualifiedName {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(QualifiedName::null());
        }
        let namespace_index: u32 = decoder.read(Some("Uri"))?;
        let name: UaString = decoder.read(Some("Name"))?;
        Ok(QualifiedName {
            namespace_index: namespace_index as u16,
            name,
        })
    }
}
