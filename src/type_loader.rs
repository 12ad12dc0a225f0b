// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Small collaborator interfaces the codec calls out to, but never implements itself:
//! the structured-type library, the binary codec, and the XML decoder factory.

use std::fmt::Debug;
use std::io::Write;
use std::sync::Arc;

use struson::writer::JsonStreamWriter;

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::error::{EncodingResult, Error};
use crate::expanded_node_id::ExpandedNodeId;
use crate::xml_element::XmlElement;

/// A structured OPC UA value that knows how to encode and decode its own JSON body.
/// Implemented by generated or hand-written structured types living outside this crate;
/// `ExtensionObject` calls back into these hooks recursively. Takes the same raw
/// stream/context pair every built-in `JsonEncodable::encode` does, so a structured
/// body can be written in the middle of an already-open `ExtensionObject` object
/// without re-entering a fresh encoder over a live writer.
pub trait Encodable: Debug {
    /// Write this value's JSON body (no `TypeId`/`Encoding` envelope — that belongs to
    /// the enclosing `ExtensionObject`).
    fn encode_json(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()>;

    /// This value's own dynamic type name, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Clone this value into a fresh boxed trait object.
    fn clone_boxed(&self) -> Box<dyn Encodable>;
}

impl Clone for Box<dyn Encodable> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Resolves OPC UA type identifiers to concrete [`Encodable`] implementations and back.
/// The core codec never embeds the standard OPC UA type table; callers supply their own.
pub trait TypeLibrary {
    /// Attempt to decode a structured value of the type named by `type_id` from `decoder`'s
    /// current position. Returns `None` when the type is not known to this library (the
    /// caller then falls back to preserving the body as an opaque, re-encodable JSON blob).
    fn try_load_json(
        &self,
        type_id: &ExpandedNodeId,
        decoder: &mut JsonDecoder<'_>,
    ) -> Option<EncodingResult<Box<dyn Encodable>>>;

    /// Resolve the `ExpandedNodeId` a structured value should be encoded under.
    fn json_type_id_of(&self, value: &dyn Encodable) -> Option<ExpandedNodeId>;
}

/// A `TypeLibrary` with nothing registered; every lookup returns `None`. Useful for
/// callers that only ever round-trip opaque extension objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyTypeLibrary;

impl TypeLibrary for EmptyTypeLibrary {
    fn try_load_json(
        &self,
        _type_id: &ExpandedNodeId,
        _decoder: &mut JsonDecoder<'_>,
    ) -> Option<EncodingResult<Box<dyn Encodable>>> {
        None
    }

    fn json_type_id_of(&self, _value: &dyn Encodable) -> Option<ExpandedNodeId> {
        None
    }
}

/// Decodes a base64 byte-string extension object body via the binary codec. Out of scope
/// for this crate's own implementation; consumed only through this interface.
pub trait BinaryCodec {
    /// Decode a structured value of the type named by `type_id` from `bytes`.
    fn decode(
        &self,
        type_id: &ExpandedNodeId,
        bytes: &[u8],
        ctx: &Context<'_>,
    ) -> EncodingResult<Box<dyn Encodable>>;
}

/// The default `BinaryCodec`: always fails. A caller that needs binary-encoded extension
/// object bodies must supply a real implementation via [`crate::provider::DecoderOptions`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBinaryCodec;

impl BinaryCodec for UnsupportedBinaryCodec {
    fn decode(
        &self,
        _type_id: &ExpandedNodeId,
        _bytes: &[u8],
        _ctx: &Context<'_>,
    ) -> EncodingResult<Box<dyn Encodable>> {
        Err(Error::encoding(
            "binary extension object bodies require a BinaryCodec; none was configured",
        ))
    }
}

/// Decodes an XML extension object body into a structured value. Optional; when absent,
/// typed XML bodies fail to decode while untyped ones are preserved as raw [`XmlElement`]s.
pub type XmlDecoderFactory =
    Arc<dyn Fn(&Context<'_>, &XmlElement) -> EncodingResult<Box<dyn Encodable>> + Send + Sync>;
