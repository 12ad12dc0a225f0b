// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! A wrapped status code with severity classification and a best-effort symbolic name.

use std::fmt;
use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::{JsonDecoder, ValueKind};
use crate::encoding::UaNullable;
use crate::error::EncodingResult;
use crate::json::{write_field, JsonDecodable, JsonEncodable};

/// Severity carried in the top two bits of a `StatusCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation succeeded.
    Good,
    /// The operation succeeded but with a qualification.
    Uncertain,
    /// The operation failed.
    Bad,
}

/// A 32-bit status code. Zero is always `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StatusCode(pub u32);

const SEVERITY_MASK: u32 = 0xC000_0000;
const SEVERITY_UNCERTAIN: u32 = 0x4000_0000;
const SEVERITY_BAD: u32 = 0x8000_0000;

impl StatusCode {
    /// The well known `Good` status code.
    pub const GOOD: StatusCode = StatusCode(0);
    /// Malformed or internally inconsistent JSON input/output.
    pub const BAD_ENCODING_ERROR: StatusCode = StatusCode(0x8021_0000);
    /// A decode-specific parse failure (bad base64, bad UUID, malformed JSON itself).
    pub const BAD_DECODING_ERROR: StatusCode = StatusCode(0x8022_0000);
    /// A configured length or array limit was exceeded.
    pub const BAD_ENCODING_LIMITS_EXCEEDED: StatusCode = StatusCode(0x8024_0000);
    /// The numeric value of a DataEncoding was invalid.
    pub const BAD_DATA_ENCODING_INVALID: StatusCode = StatusCode(0x8067_0000);
    /// The DataEncoding for the requested data type was not supported.
    pub const BAD_DATA_ENCODING_UNSUPPORTED: StatusCode = StatusCode(0x8068_0000);
    /// A generic, unspecified failure.
    pub const BAD_UNEXPECTED_ERROR: StatusCode = StatusCode(0x8001_0000);
    /// The recursion depth allowed for nested structures was exceeded.
    pub const BAD_ENCODING_LIMITS_EXCEEDED_DEPTH: StatusCode = StatusCode(0x8024_0001);
    /// An uncertain base value, used as a fallback when a severity cannot be derived further.
    pub const UNCERTAIN: StatusCode = StatusCode(0x4000_0000);

    /// Classify this status code's severity from its top two bits.
    pub fn severity(&self) -> Severity {
        match self.0 & SEVERITY_MASK {
            SEVERITY_BAD => Severity::Bad,
            SEVERITY_UNCERTAIN => Severity::Uncertain,
            _ => Severity::Good,
        }
    }

    /// True if this is exactly `Good` (code `0`). Note that a non-zero code can still have
    /// `Good` severity; only the all-zero code is the canonical "no status" value.
    pub fn is_good(&self) -> bool {
        self.0 == 0
    }

    /// True if this code's severity bits indicate failure.
    pub fn is_bad(&self) -> bool {
        self.severity() == Severity::Bad
    }

    /// Resolve the symbolic name used in the non-reversible JSON form, e.g. `"BadEncodingError"`.
    /// Falls back to a severity-derived synthetic name for codes outside the built-in table.
    pub fn symbol(&self) -> String {
        if let Some(name) = known_symbol(self.0) {
            return name.to_string();
        }
        let prefix = match self.severity() {
            Severity::Good => "Good",
            Severity::Uncertain => "Uncertain",
            Severity::Bad => "Bad",
        };
        log::warn!("status code 0x{:08X} has no known symbolic name, synthesizing one", self.0);
        format!("{prefix}_0x{:08X}", self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:08X})", self.symbol(), self.0)
    }
}

impl From<u32> for StatusCode {
    fn from(value: u32) -> Self {
        StatusCode(value)
    }
}

impl From<StatusCode> for u32 {
    fn from(value: StatusCode) -> Self {
        value.0
    }
}

fn known_symbol(code: u32) -> Option<&'static str> {
    Some(match code {
        0x0000_0000 => "Good",
        0x4000_0000 => "Uncertain",
        0x8001_0000 => "BadUnexpectedError",
        0x8002_0000 => "BadInternalError",
        0x8003_0000 => "BadOutOfMemory",
        0x8004_0000 => "BadResourceUnavailable",
        0x8005_0000 => "BadCommunicationError",
        0x8006_0000 => "BadEncodingError",
        0x8007_0000 => "BadDecodingError",
        0x8021_0000 => "BadEncodingError",
        0x8022_0000 => "BadDecodingError",
        0x8024_0000 => "BadEncodingLimitsExceeded",
        0x8024_0001 => "BadEncodingLimitsExceeded",
        0x8067_0000 => "BadDataEncodingInvalid",
        0x8068_0000 => "BadDataEncodingUnsupported",
        0x8025_0000 => "BadRequestTooLarge",
        0x8026_0000 => "BadResponseTooLarge",
        0x8020_0000 => "BadInvalidArgument",
        0x8010_0000 => "BadTypeMismatch",
        _ => return None,
    })
}

impl UaNullable for StatusCode {
    fn is_ua_null(&self) -> bool {
        self.is_good()
    }
}

impl JsonEncodable for StatusCode {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        if ctx.reversible() {
            stream.number_value(self.0)?;
        } else {
            stream.begin_object()?;
            write_field(stream, ctx, "Code", &self.0)?;
            write_field(stream, ctx, "Symbol", &self.symbol())?;
            stream.end_object()?;
        }
        Ok(())
    }
}

impl JsonDecodable for StatusCode {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        match decoder.current_kind() {
            ValueKind::Object => Ok(StatusCode(decoder.read(Some("Code"))?)),
            _ => Ok(StatusCode(decoder.current_integer()?)),
        }
    }
}

/// Write `code` under `field_name`, eliding the field entirely whenever the code is
/// `Good` — in *both* encoding forms, unlike the general field-elision rule, which only
/// elides defaults in reversible form (§4.1.5).
pub fn write_status_code_field(
    stream: &mut JsonStreamWriter<&mut dyn Write>,
    ctx: &Context<'_>,
    field_name: &str,
    code: &StatusCode,
) -> EncodingResult<()> {
    if code.is_good() {
        return Ok(());
    }
    stream.name(field_name)?;
    code.encode(stream, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_is_zero() {
        assert_eq!(StatusCode::GOOD.0, 0);
        assert!(StatusCode::GOOD.is_good());
    }

    #[test]
    fn severity_from_bits() {
        assert_eq!(StatusCode::BAD_ENCODING_ERROR.severity(), Severity::Bad);
        assert_eq!(StatusCode::UNCERTAIN.severity(), Severity::Uncertain);
        assert_eq!(StatusCode::GOOD.severity(), Severity::Good);
    }

    #[test]
    fn known_symbol_resolves() {
        assert_eq!(StatusCode::BAD_ENCODING_ERROR.symbol(), "BadEncodingError");
    }

    #[test]
    fn unknown_symbol_synthesizes() {
        let code = StatusCode(0x80AB_CDEF);
        assert_eq!(code.symbol(), "Bad_0x80ABCDEF");
    }
}
