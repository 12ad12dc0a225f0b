// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! The JSON encoder: a thin wrapper over a streaming `struson` writer that applies the
//! universal reversible-form field-elision rule in one place.

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::error::EncodingResult;
use crate::json::{write_field, JsonEncodable};

/// Writes a value tree to a JSON sink. `'w` is the lifetime of the underlying `Write`
/// sink, `'c` the lifetime of the shared [`Context`].
pub struct JsonEncoder<'w, 'c> {
    stream: Option<JsonStreamWriter<&'w mut dyn Write>>,
    ctx: &'c Context<'c>,
}

impl<'w, 'c> JsonEncoder<'w, 'c> {
    /// Build an encoder writing to `sink`.
    pub fn new(sink: &'w mut dyn Write, ctx: &'c Context<'c>) -> Self {
        Self {
            stream: Some(JsonStreamWriter::new(sink)),
            ctx,
        }
    }

    /// The context this encode session runs against.
    pub fn ctx(&self) -> &'c Context<'c> {
        self.ctx
    }

    fn stream_mut(&mut self) -> &mut JsonStreamWriter<&'w mut dyn Write> {
        self.stream
            .as_mut()
            .expect("encoder used after finish() was called")
    }

    /// Open a JSON object. Structured types call this at the start of their own `encode`.
    pub fn begin_object(&mut self) -> EncodingResult<()> {
        Ok(self.stream_mut().begin_object()?)
    }

    /// Close a JSON object opened with [`Self::begin_object`].
    pub fn end_object(&mut self) -> EncodingResult<()> {
        Ok(self.stream_mut().end_object()?)
    }

    /// Open a JSON array.
    pub fn begin_array(&mut self) -> EncodingResult<()> {
        Ok(self.stream_mut().begin_array()?)
    }

    /// Close a JSON array.
    pub fn end_array(&mut self) -> EncodingResult<()> {
        Ok(self.stream_mut().end_array()?)
    }

    /// Write a bare JSON `null`.
    pub fn null_value(&mut self) -> EncodingResult<()> {
        Ok(self.stream_mut().null_value()?)
    }

    /// Write an object property name, without a value. Used by structured types that
    /// need to emit a field unconditionally (e.g. `EncodingMask`).
    pub fn name(&mut self, name: &str) -> EncodingResult<()> {
        Ok(self.stream_mut().name(name)?)
    }

    /// Write a field (when `field_name` is `Some`) or a bare value (when `None`).
    ///
    /// In reversible form, a named field whose value is the type's null/default
    /// (`UaNullable::is_ua_null`) is elided entirely rather than written. In
    /// non-reversible form every named field is written; it is up to `T::encode`
    /// to decide what a null value looks like on the wire (usually a JSON `null`).
    pub fn write<T>(&mut self, field_name: Option<&str>, value: &T) -> EncodingResult<()>
    where
        T: JsonEncodable,
    {
        let ctx = self.ctx;
        match field_name {
            None => value.encode(self.stream_mut(), ctx),
            Some(name) => write_field(self.stream_mut(), ctx, name, value),
        }
    }

    /// Encode `value` as the sole top-level document.
    pub fn write_request<T>(&mut self, value: &T) -> EncodingResult<()>
    where
        T: JsonEncodable,
    {
        self.write(None, value)
    }

    /// Flush any buffered output without closing the underlying sink.
    pub fn flush(&mut self) -> EncodingResult<()> {
        Ok(self.stream_mut().flush()?)
    }

    /// Finish the document and, if the writer owns its sink lifecycle, flush it.
    /// Consumes the encoder; after this call the encoder cannot be used again.
    pub fn finish(mut self) -> EncodingResult<()> {
        let mut stream = self.stream.take().expect("finish() called twice");
        stream.finish_document()?;
        Ok(())
    }
}

impl Drop for JsonEncoder<'_, '_> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            if let Err(err) = stream.flush() {
                log::warn!("JsonEncoder dropped without finish(); best-effort flush failed: {err}");
            } else {
                log::warn!("JsonEncoder dropped without calling finish(); document may be incomplete");
            }
        }
    }
}
