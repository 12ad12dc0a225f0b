// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `DataValue`: a variant plus the status and timestamp
//! metadata that typically accompanies a node value read from, or written to, a server.

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::date_time::UaDateTime;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::EncodingResult;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::status_code::{write_status_code_field, StatusCode};
use crate::variant::Variant;

/// A value together with its quality and the timestamps at which it was sourced/reported.
/// Every field may be default-valued and is then omitted in reversible form (§4.1 S3/S4).
#[derive(Debug, Clone, Default)]
pub struct DataValue {
    /// The value itself.
    pub value: Variant,
    /// The quality of the value.
    pub status: StatusCode,
    /// The time the value was read from its source.
    pub source_timestamp: UaDateTime,
    /// Sub-100ns precision for `source_timestamp`, in picoseconds.
    pub source_picoseconds: u16,
    /// The time the server received or recorded the value.
    pub server_timestamp: UaDateTime,
    /// Sub-100ns precision for `server_timestamp`, in picoseconds.
    pub server_picoseconds: u16,
}

impl UaNullable for DataValue {
    fn is_ua_null(&self) -> bool {
        self.value.is_ua_null()
            && self.status.is_ua_null()
            && self.source_timestamp.is_ua_null()
            && self.source_picoseconds == 0
            && self.server_timestamp.is_ua_null()
            && self.server_picoseconds == 0
    }
}

impl DataValue {
    /// The null DataValue: every field defaulted.
    pub fn null() -> Self {
        Self::default()
    }

    /// Build a DataValue carrying just a value, `Good` status and no timestamps.
    pub fn new(value: impl Into<Variant>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

impl JsonEncodable for DataValue {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        stream.begin_object()?;
        write_field(stream, ctx, "Value", &self.value)?;
        write_status_code_field(stream, ctx, "Status", &self.status)?;
        write_field(stream, ctx, "SourceTimestamp", &self.source_timestamp)?;
        write_field(stream, ctx, "SourcePicoseconds", &self.source_picoseconds)?;
        write_field(stream, ctx, "ServerTimestamp", &self.server_timestamp)?;
        write_field(stream, ctx, "ServerPicoseconds", &self.server_picoseconds)?;
        stream.end_object()?;
        Ok(())
    }
}

impl JsonDecodable for DataValue {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(DataValue::null());
        }
        Ok(DataValue {
            value: decoder.read(Some("Value"))?,
            status: decoder.read(Some("Status"))?,
            source_timestamp: decoder.read(Some("SourceTimestamp"))?,
            source_picoseconds: decoder.read(Some("SourcePicoseconds"))?,
            server_timestamp: decoder.read(Some("ServerTimestamp"))?,
            server_picoseconds: decoder.read(Some("ServerPicoseconds"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null() {
        assert!(DataValue::default().is_ua_null());
    }

    #[test]
    fn new_carries_good_status() {
        let dv = DataValue::new(42i32);
        assert!(dv.status.is_good());
    }
}
