// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Core encode/decode traits and blanket/scalar implementations for OPC UA JSON.
//!
//! Encoding writes through a streaming `struson` writer, exactly as a token-by-token
//! emitter should. Decoding instead walks a random-access `serde_json::Value` document
//! (see [`crate::decoder::JsonDecoder`]) so that callers may read a structure's fields
//! in any order, independent of how they appear in the source text.

use std::io::Write;

pub use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};

/// Non-finite float markers used by the wire format in both encoding forms.
pub const VALUE_INFINITY: &str = "Infinity";
pub const VALUE_NEG_INFINITY: &str = "-Infinity";
pub const VALUE_NAN: &str = "NaN";

/// Encode a value into the JSON output stream.
pub trait JsonEncodable: UaNullable {
    /// Write `self` as a bare JSON value (no enclosing field name).
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()>;
}

/// Decode a value from the decoder's current document position.
pub trait JsonDecodable: Sized {
    /// Read `self` from the value currently on top of the decoder's navigation stack.
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self>;
}

/// Write `value` as the named property `field_name` of an already-open JSON object,
/// honoring the reversible-form elision rule (§4.1.1): in reversible form a field whose
/// value is the type's null/default is skipped entirely; in non-reversible form every
/// field is written and it is up to `T::encode` to decide what "null" looks like on the
/// wire. Every structured type's `JsonEncodable::encode` calls this once per field,
/// mirroring the single choke point a derive macro would generate.
pub fn write_field<T>(
    stream: &mut JsonStreamWriter<&mut dyn Write>,
    ctx: &Context<'_>,
    field_name: &str,
    value: &T,
) -> EncodingResult<()>
where
    T: JsonEncodable,
{
    if ctx.reversible() && value.is_ua_null() {
        return Ok(());
    }
    stream.name(field_name)?;
    value.encode(stream, ctx)
}

impl<T> JsonEncodable for Option<T>
where
    T: JsonEncodable,
{
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        match self {
            Some(v) => v.encode(stream, ctx),
            None => Ok(stream.null_value()?),
        }
    }
}

impl<T> JsonDecodable for Option<T>
where
    T: JsonDecodable,
{
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            Ok(None)
        } else {
            Ok(Some(T::decode(decoder)?))
        }
    }
}

impl<T> JsonEncodable for Vec<T>
where
    T: JsonEncodable,
{
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        ctx.encoding_context().limits().check_array_length(self.len())?;
        stream.begin_array()?;
        for elem in self {
            elem.encode(stream, ctx)?;
        }
        stream.end_array()?;
        Ok(())
    }
}

impl<T> JsonDecodable for Vec<T>
where
    T: JsonDecodable,
{
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(Vec::new());
        }
        let len = decoder.current_array_len()?;
        decoder
            .limits()
            .check_array_length(len)?;
        let mut res = Vec::with_capacity(len);
        for i in 0..len {
            res.push(decoder.with_array_element(i, T::decode)?);
        }
        Ok(res)
    }
}

impl<T> JsonEncodable for Box<T>
where
    T: JsonEncodable,
{
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        self.as_ref().encode(stream, ctx)
    }
}

impl<T> JsonDecodable for Box<T>
where
    T: JsonDecodable,
{
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        Ok(Box::new(T::decode(decoder)?))
    }
}

macro_rules! json_enc_int {
    ($t:ty, as_string: $as_string:expr) => {
        impl JsonEncodable for $t {
            fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
                if $as_string {
                    stream.string_value(&self.to_string())?;
                } else {
                    stream.number_value(*self)?;
                }
                Ok(())
            }
        }

        impl JsonDecodable for $t {
            fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
                decoder.current_integer()
            }
        }
    };
}

json_enc_int!(u8, as_string: false);
json_enc_int!(u16, as_string: false);
json_enc_int!(u32, as_string: false);
json_enc_int!(i8, as_string: false);
json_enc_int!(i16, as_string: false);
json_enc_int!(i32, as_string: false);
// 64-bit integers are written as JSON strings in reversible *and* non-reversible form:
// they routinely exceed the 2^53 range a JSON number can round-trip through a double.
json_enc_int!(u64, as_string: true);
json_enc_int!(i64, as_string: true);

macro_rules! json_enc_float {
    ($t:ty) => {
        impl JsonEncodable for $t {
            fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
                if self.is_infinite() {
                    if self.is_sign_positive() {
                        stream.string_value(VALUE_INFINITY)?;
                    } else {
                        stream.string_value(VALUE_NEG_INFINITY)?;
                    }
                } else if self.is_nan() {
                    stream.string_value(VALUE_NAN)?;
                } else {
                    stream.fp_number_value(*self)?;
                }
                Ok(())
            }
        }

        impl JsonDecodable for $t {
            fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
                decoder.current_float()
            }
        }
    };
}

json_enc_float!(f32);
json_enc_float!(f64);

impl JsonEncodable for String {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
        Ok(stream.string_value(self.as_str())?)
    }
}

impl JsonDecodable for String {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        decoder.current_string().map(|s| s.to_owned())
    }
}

impl JsonEncodable for bool {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
        Ok(stream.bool_value(*self)?)
    }
}

impl JsonDecodable for bool {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        decoder.current_bool()
    }
}

/// Parse a float that may appear as one of the special string literals or a plain number,
/// shared by the decoder's `current_float` and any hand-written decode that needs this leniency.
pub(crate) fn parse_special_float<T>(raw: &str) -> EncodingResult<T>
where
    T: std::str::FromStr<Err = std::num::ParseFloatError> + num_traits_infinity::FloatLiteral,
{
    match raw {
        VALUE_INFINITY => Ok(T::pos_infinity()),
        VALUE_NEG_INFINITY => Ok(T::neg_infinity()),
        VALUE_NAN => Ok(T::nan_value()),
        other => Ok(other.parse().map_err(Error::from)?),
    }
}

/// Tiny local stand-in for the handful of float constants `parse_special_float` needs,
/// so it can stay generic over `f32`/`f64` without pulling in a numeric traits crate.
pub(crate) mod num_traits_infinity {
    pub trait FloatLiteral {
        fn pos_infinity() -> Self;
        fn neg_infinity() -> Self;
        fn nan_value() -> Self;
        fn from_f64(v: f64) -> Self;
    }

    impl FloatLiteral for f32 {
        fn pos_infinity() -> Self {
            f32::INFINITY
        }
        fn neg_infinity() -> Self {
            f32::NEG_INFINITY
        }
        fn nan_value() -> Self {
            f32::NAN
        }
        fn from_f64(v: f64) -> Self {
            v as f32
        }
    }

    impl FloatLiteral for f64 {
        fn pos_infinity() -> Self {
            f64::INFINITY
        }
        fn neg_infinity() -> Self {
            f64::NEG_INFINITY
        }
        fn nan_value() -> Self {
            f64::NAN
        }
        fn from_f64(v: f64) -> Self {
            v
        }
    }
}
