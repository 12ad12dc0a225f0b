// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! The JSON decoder: an owned, random-access document plus a navigation stack.
//!
//! Unlike a streaming reader, the whole input is parsed once at construction into a
//! `serde_json::Value` tree. Every subsequent `read` is a map lookup against the value
//! currently on top of the stack, which is what makes field order irrelevant to the
//! result: a caller may ask for `Body` before `Type` or after, and get the same answer.

use std::io::Read;

use crate::context::Context;
use crate::context::DecodingLimits;
use crate::error::{EncodingResult, Error};
use crate::json::num_traits_infinity::FloatLiteral;
use crate::json::{parse_special_float, JsonDecodable};
use crate::type_loader::{BinaryCodec, UnsupportedBinaryCodec, XmlDecoderFactory};

static DEFAULT_BINARY_CODEC: UnsupportedBinaryCodec = UnsupportedBinaryCodec;

/// The JSON kind of the value currently on top of the decoder's navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true`/`false`.
    Bool,
    /// A JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

/// A random-access JSON decoder bound to a single [`Context`] for the duration of a decode.
pub struct JsonDecoder<'c> {
    stack: Vec<serde_json::Value>,
    ctx: &'c Context<'c>,
    binary_codec: &'c dyn BinaryCodec,
    xml_decoder_factory: Option<XmlDecoderFactory>,
}

impl<'c> JsonDecoder<'c> {
    /// Parse the whole of `reader` into a document and start a decode session against it.
    pub fn from_reader<R: Read>(mut reader: R, ctx: &'c Context<'c>) -> EncodingResult<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_slice(&buf, ctx)
    }

    /// Parse a contiguous byte buffer into a document.
    pub fn from_slice(bytes: &[u8], ctx: &'c Context<'c>) -> EncodingResult<Self> {
        let root: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Self {
            stack: vec![root],
            ctx,
            binary_codec: &DEFAULT_BINARY_CODEC,
            xml_decoder_factory: None,
        })
    }

    /// Parse a document delivered as separate byte segments, concatenated once up front.
    pub fn from_segments(segments: &[&[u8]], ctx: &'c Context<'c>) -> EncodingResult<Self> {
        let mut buf = Vec::with_capacity(segments.iter().map(|s| s.len()).sum());
        for seg in segments {
            buf.extend_from_slice(seg);
        }
        Self::from_slice(&buf, ctx)
    }

    /// Use a specific binary codec for `ExtensionObject` bodies with `Encoding == 1`.
    /// Without this, such bodies fail to decode (see [`UnsupportedBinaryCodec`]).
    pub fn with_binary_codec(mut self, codec: &'c dyn BinaryCodec) -> Self {
        self.binary_codec = codec;
        self
    }

    /// Use a specific XML decoder factory for typed `ExtensionObject` bodies with
    /// `Encoding == 2`. Without this, such bodies can only be preserved untyped.
    pub fn with_xml_decoder_factory(mut self, factory: XmlDecoderFactory) -> Self {
        self.xml_decoder_factory = Some(factory);
        self
    }

    /// The context this decode session runs against.
    pub fn ctx(&self) -> &'c Context<'c> {
        self.ctx
    }

    /// The binary codec used to decode `Encoding == 1` extension object bodies.
    pub fn binary_codec(&self) -> &'c dyn BinaryCodec {
        self.binary_codec
    }

    /// The XML decoder factory used for typed `Encoding == 2` extension object bodies, if any.
    pub fn xml_decoder_factory(&self) -> Option<&XmlDecoderFactory> {
        self.xml_decoder_factory.as_ref()
    }

    /// The configured length/depth limits.
    pub fn limits(&self) -> &DecodingLimits {
        self.ctx.encoding_context().limits()
    }

    fn top(&self) -> &serde_json::Value {
        self.stack
            .last()
            .expect("navigation stack is seeded at construction and never fully popped")
    }

    /// True if the value currently on top of the stack is JSON `null`.
    pub fn current_is_null(&self) -> bool {
        self.top().is_null()
    }

    /// Borrow the raw `serde_json::Value` currently on top of the stack, for callers that
    /// need to preserve a sub-document verbatim (e.g. an unrecognized `ExtensionObject` body).
    pub fn current_raw_value(&self) -> &serde_json::Value {
        self.top()
    }

    /// The JSON kind of the value currently on top of the stack.
    pub fn current_kind(&self) -> ValueKind {
        match self.top() {
            serde_json::Value::Null => ValueKind::Null,
            serde_json::Value::Bool(_) => ValueKind::Bool,
            serde_json::Value::Number(_) => ValueKind::Number,
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Array(_) => ValueKind::Array,
            serde_json::Value::Object(_) => ValueKind::Object,
        }
    }

    /// True if a non-null property named `name` exists on the current object.
    pub fn has_field(&self, name: &str) -> bool {
        matches!(self.top().get(name), Some(v) if !v.is_null())
    }

    /// True if a property named `name` exists on the current object at all, including
    /// one explicitly set to `null`. Distinguishes "absent" from "present but null" for
    /// the handful of fields (e.g. Variant's `Body`) where that distinction matters.
    pub fn field_exists(&self, name: &str) -> bool {
        self.top().get(name).is_some()
    }

    /// Run `f` against the named field's value whenever the field is present at all,
    /// even when its value is `null` (unlike [`Self::enter_field`], which skips `null`).
    /// Returns `None` only when the field is entirely absent from the current object.
    pub fn enter_field_any<T>(
        &mut self,
        field_name: &str,
        f: impl FnOnce(&mut Self) -> EncodingResult<T>,
    ) -> EncodingResult<Option<T>> {
        let Some(child) = self.top().get(field_name).cloned() else {
            return Ok(None);
        };
        self.stack.push(child);
        let result = f(self);
        self.stack.pop();
        result.map(Some)
    }

    /// Read a named field, defaulting to `T::default()` when the field is absent or `null`.
    /// This is the field-elision counterpart used throughout reversible-form decoding.
    pub fn read<T>(&mut self, field_name: Option<&str>) -> EncodingResult<T>
    where
        T: JsonDecodable + Default,
    {
        match field_name {
            None => T::decode(self),
            Some(name) => match self.top().get(name).filter(|v| !v.is_null()).cloned() {
                Some(child) => {
                    self.stack.push(child);
                    let result = T::decode(self);
                    self.stack.pop();
                    result
                }
                None => Ok(T::default()),
            },
        }
    }

    /// Like [`Self::read`], but fails instead of defaulting when the field is missing;
    /// used for the handful of fields with no sensible zero value (e.g. Variant's `Body`).
    pub fn read_required<T>(&mut self, field_name: &str) -> EncodingResult<T>
    where
        T: JsonDecodable,
    {
        let child = self
            .top()
            .get(field_name)
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| Error::decoding(format!("missing required field `{field_name}`")))?;
        self.stack.push(child);
        let result = T::decode(self);
        self.stack.pop();
        result
    }

    /// Run `f` against the named field's value if present and non-null, returning `None`
    /// otherwise. Used where a missing field means "absent" rather than "defaulted".
    pub fn enter_field<T>(
        &mut self,
        field_name: &str,
        f: impl FnOnce(&mut Self) -> EncodingResult<T>,
    ) -> EncodingResult<Option<T>> {
        let Some(child) = self.top().get(field_name).filter(|v| !v.is_null()).cloned() else {
            return Ok(None);
        };
        self.stack.push(child);
        let result = f(self);
        self.stack.pop();
        result.map(Some)
    }

    /// The length of the current array, or an error if the current value is not an array.
    pub fn current_array_len(&self) -> EncodingResult<usize> {
        self.top()
            .as_array()
            .map(|a| a.len())
            .ok_or_else(|| Error::decoding("expected a JSON array"))
    }

    /// Run `f` against the array element at `index` of the current value.
    pub fn with_array_element<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Self) -> EncodingResult<T>,
    ) -> EncodingResult<T> {
        let elem = self
            .top()
            .as_array()
            .and_then(|a| a.get(index))
            .cloned()
            .ok_or_else(|| Error::decoding("array index out of range"))?;
        self.stack.push(elem);
        let result = f(self);
        self.stack.pop();
        result
    }

    /// Read the current value as a JSON boolean.
    pub fn current_bool(&self) -> EncodingResult<bool> {
        self.top()
            .as_bool()
            .ok_or_else(|| Error::decoding("expected a JSON boolean"))
    }

    /// Read the current value as a JSON string.
    pub fn current_string(&self) -> EncodingResult<&str> {
        self.top()
            .as_str()
            .ok_or_else(|| Error::decoding("expected a JSON string"))
    }

    /// Read the current value as an integer, tolerating both a JSON number and a
    /// base-10 JSON string (the latter is mandatory for 64-bit values, optional elsewhere).
    pub fn current_integer<T>(&self) -> EncodingResult<T>
    where
        T: TryFrom<i128>,
    {
        let v = match self.top() {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(|v| v as i128)
                .or_else(|| n.as_u64().map(|v| v as i128))
                .ok_or_else(|| Error::decoding("JSON number is not an integer"))?,
            serde_json::Value::String(s) => s
                .parse::<i128>()
                .map_err(|_| Error::decoding(format!("cannot parse `{s}` as an integer")))?,
            _ => return Err(Error::decoding("expected a JSON integer or numeric string")),
        };
        T::try_from(v).map_err(|_| Error::decoding("integer value out of range"))
    }

    /// Read the current value as a float, accepting the `"Infinity"`/`"-Infinity"`/`"NaN"`
    /// string literals as well as ordinary JSON numbers.
    pub fn current_float<T>(&self) -> EncodingResult<T>
    where
        T: FloatLiteral + std::str::FromStr<Err = std::num::ParseFloatError>,
    {
        match self.top() {
            serde_json::Value::Number(n) => {
                let v = n
                    .as_f64()
                    .ok_or_else(|| Error::decoding("JSON number is not representable as a float"))?;
                Ok(T::from_f64(v))
            }
            serde_json::Value::String(s) => parse_special_float(s),
            _ => Err(Error::decoding("expected a JSON float or special string literal")),
        }
    }
}
