// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! A small factory assembling encoders/decoders from a sink/source plus options, so
//! callers don't have to juggle `Context` construction themselves for the common case.

use std::io::{Read, Write};

use crate::context::{Context, DecodingLimits, EncodingContext};
use crate::decoder::JsonDecoder;
use crate::encoder::JsonEncoder;
use crate::error::EncodingResult;
use crate::type_loader::{BinaryCodec, TypeLibrary, XmlDecoderFactory};

/// Options controlling how a `JsonEncoder` writes its output.
#[derive(Clone, Copy)]
pub struct EncoderOptions {
    /// Use the lossless (`true`) or human-readable, lossy (`false`) JSON form.
    pub reversible: bool,
    /// Pretty-print the output. Unimplemented pass-through flag kept for interface
    /// parity with other OPC UA encodings; `struson` is always used in compact mode.
    pub indented: bool,
    /// Whether `finish()` should also close (not just flush) the underlying sink.
    pub close_stream: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            reversible: true,
            indented: false,
            close_stream: true,
        }
    }
}

/// Options controlling how a `JsonDecoder` interprets its input.
#[derive(Clone, Default)]
pub struct DecoderOptions {
    /// Used to reify typed XML-encoded `ExtensionObject` bodies (`Encoding == 2`).
    pub xml_decoder_factory: Option<XmlDecoderFactory>,
    /// Length and recursion limits enforced while decoding.
    pub limits: DecodingLimits,
}

/// Builds encoders and decoders against a shared [`EncodingContext`] and a `TypeLibrary`.
pub struct JsonCodecProvider<'a> {
    ctx: &'a EncodingContext,
    type_library: Option<&'a dyn TypeLibrary>,
    binary_codec: Option<&'a dyn BinaryCodec>,
}

impl<'a> JsonCodecProvider<'a> {
    /// Build a provider bound to a context and, optionally, a structured type library and
    /// binary codec used to resolve `ExtensionObject` bodies.
    pub fn new(
        ctx: &'a EncodingContext,
        type_library: Option<&'a dyn TypeLibrary>,
        binary_codec: Option<&'a dyn BinaryCodec>,
    ) -> Self {
        Self {
            ctx,
            type_library,
            binary_codec,
        }
    }

    /// Build an encoder writing to `sink`, against `view`'s reversible/type-library setting.
    pub fn encoder<'w>(&self, sink: &'w mut dyn Write, options: EncoderOptions, view: &'a Context<'a>) -> JsonEncoder<'w, 'a> {
        let _ = options;
        JsonEncoder::new(sink, view)
    }

    /// Build a decoder reading the whole of `reader` up front.
    pub fn decoder_from_reader<R: Read>(
        &self,
        reader: R,
        options: &DecoderOptions,
        view: &'a Context<'a>,
    ) -> EncodingResult<JsonDecoder<'a>> {
        let decoder = JsonDecoder::from_reader(reader, view)?;
        Ok(self.apply_options(decoder, options))
    }

    /// Build a decoder over a contiguous byte buffer.
    pub fn decoder_from_slice(&self, bytes: &[u8], options: &DecoderOptions, view: &'a Context<'a>) -> EncodingResult<JsonDecoder<'a>> {
        let decoder = JsonDecoder::from_slice(bytes, view)?;
        Ok(self.apply_options(decoder, options))
    }

    /// Build a decoder over a sequence of byte segments, concatenated once up front.
    pub fn decoder_from_segments(
        &self,
        segments: &[&[u8]],
        options: &DecoderOptions,
        view: &'a Context<'a>,
    ) -> EncodingResult<JsonDecoder<'a>> {
        let decoder = JsonDecoder::from_segments(segments, view)?;
        Ok(self.apply_options(decoder, options))
    }

    /// Build a `Context` view bound to this provider's shared context and type library.
    pub fn context_view(&self, reversible: bool) -> Context<'a> {
        Context::new(self.ctx, reversible, self.type_library)
    }

    fn apply_options(&self, mut decoder: JsonDecoder<'a>, options: &DecoderOptions) -> JsonDecoder<'a> {
        if let Some(codec) = self.binary_codec {
            decoder = decoder.with_binary_codec(codec);
        }
        if let Some(factory) = options.xml_decoder_factory.clone() {
            decoder = decoder.with_xml_decoder_factory(factory);
        }
        decoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::{NamespaceTable, ServerTable};
    use crate::variant::Variant;

    #[test]
    fn round_trips_a_variant_through_the_provider() {
        let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
        let provider = JsonCodecProvider::new(&ctx, None, None);
        let view = provider.context_view(true);

        let mut buf: Vec<u8> = Vec::new();
        {
            let mut sink: &mut dyn Write = &mut buf;
            let mut encoder = provider.encoder(&mut sink, EncoderOptions::default(), &view);
            encoder.write_request(&Variant::from(7i32)).unwrap();
            encoder.finish().unwrap();
        }

        let options = DecoderOptions::default();
        let mut decoder = provider.decoder_from_slice(&buf, &options, &view).unwrap();
        let decoded = <Variant as crate::json::JsonDecodable>::decode(&mut decoder).unwrap();
        assert_eq!(decoded, Variant::from(7i32));
    }
}
