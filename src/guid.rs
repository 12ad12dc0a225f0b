// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `Guid`, a 128-bit identifier backed by `uuid::Uuid`.

use std::io::Write;
use std::str::FromStr;

use struson::writer::{JsonStreamWriter, JsonWriter};
use uuid::Uuid;

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};
use crate::json::{JsonDecodable, JsonEncodable};

/// A 128-bit globally unique identifier.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Guid {
    uuid: Uuid,
}

impl Default for Guid {
    fn default() -> Self {
        Self { uuid: Uuid::nil() }
    }
}

impl UaNullable for Guid {
    fn is_ua_null(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl Guid {
    /// Generate a new random (v4) Guid.
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
        }
    }

    /// Wrap an existing `Uuid`.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self { uuid }
    }
}

impl FromStr for Guid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            uuid: Uuid::from_str(s)?,
        })
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl JsonEncodable for Guid {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
        Ok(stream.string_value(&self.uuid.to_string())?)
    }
}

impl JsonDecodable for Guid {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        let s = decoder.current_string()?;
        Guid::from_str(s).map_err(Error::decoding)
    }
}
