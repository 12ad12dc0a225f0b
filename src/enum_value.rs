// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Support for OPC UA enumerations: reversible form is the bare `i32`, non-reversible
//! form is `"Name_Value"` (the symbol followed by an underscore and the integer).
//!
//! Generated/hand-written enum types implement `UaEnum` and get `JsonEncodable`
//! automatically via [`encode_enum`]; decoding only ever accepts the reversible
//! `i32` form (§4.2.9), so enum types implement `JsonDecodable` directly against
//! `TryFrom<i32>` rather than through a blanket impl here.

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::error::EncodingResult;

/// An OPC UA enumeration: a symbolic name plus its `i32` wire value. Implemented by hand
/// for each generated enum type, the way the teacher's `#[derive(UaEnum)]` macro would.
pub trait UaEnum {
    /// The symbol this enumerant is named, e.g. `"Both"`.
    fn ua_enum_name(&self) -> &'static str;

    /// The `i32` this enumerant is encoded as in reversible form.
    fn ua_enum_value(&self) -> i32;
}

/// Write `value` the way every `UaEnum` is encoded: a bare `i32` in reversible form,
/// `"Name_Value"` in non-reversible form. Call this from the enum's own `JsonEncodable::encode`.
pub fn encode_enum<E: UaEnum>(
    value: &E,
    stream: &mut JsonStreamWriter<&mut dyn Write>,
    ctx: &Context<'_>,
) -> EncodingResult<()> {
    if ctx.reversible() {
        stream.number_value(value.ua_enum_value())?;
    } else {
        stream.string_value(&format!("{}_{}", value.ua_enum_name(), value.ua_enum_value()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DecodingLimits, EncodingContext};
    use crate::namespaces::{NamespaceTable, ServerTable};

    struct TimestampsToReturn;

    impl UaEnum for TimestampsToReturn {
        fn ua_enum_name(&self) -> &'static str {
            "Both"
        }
        fn ua_enum_value(&self) -> i32 {
            2
        }
    }

    #[test]
    fn reversible_is_bare_integer() {
        let ectx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
        let ctx = Context::new(&ectx, true, None);
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut sink: &mut dyn Write = &mut buf;
            let mut stream = JsonStreamWriter::new(&mut sink);
            encode_enum(&TimestampsToReturn, &mut stream, &ctx).unwrap();
            stream.finish_document().unwrap();
        }
        assert_eq!(buf, b"2");
    }

    #[test]
    fn non_reversible_is_name_underscore_value() {
        let ectx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
        let ctx = Context::new(&ectx, false, None);
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut sink: &mut dyn Write = &mut buf;
            let mut stream = JsonStreamWriter::new(&mut sink);
            encode_enum(&TimestampsToReturn, &mut stream, &ctx).unwrap();
            stream.finish_document().unwrap();
        }
        assert_eq!(buf, br#""Both_2""#);
    }
}
