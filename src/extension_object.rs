// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `ExtensionObject`: a polymorphic envelope carrying a
//! structured value identified by its `ExpandedNodeId`, with the body encoded as JSON,
//! a base64 byte string, or an embedded XML fragment.

use std::fmt;
use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::byte_string::ByteString;
use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};
use crate::expanded_node_id::ExpandedNodeId;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::type_loader::Encodable;
use crate::xml_element::XmlElement;

/// The payload carried by an `ExtensionObject`, tagged by the wire `Encoding` value.
pub enum ExtensionObjectBody {
    /// No body (`Encoding` is meaningless; the envelope is entirely null).
    Null,
    /// A structured value resolved through the configured `TypeLibrary` (`Encoding == 0`).
    Structured(Box<dyn Encodable>),
    /// An opaque binary-encoded body (`Encoding == 1`), base64 on the wire.
    Binary(ByteString),
    /// An XML fragment body (`Encoding == 2`) that no `XmlDecoderFactory` reified into a
    /// structured value.
    Xml(XmlElement),
    /// A structured body (`Encoding == 0`) whose `TypeId` the `TypeLibrary` did not
    /// recognize. The raw JSON is kept so the object round-trips unchanged.
    Unknown(serde_json::Value),
}

impl fmt::Debug for ExtensionObjectBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionObjectBody::Null => write!(f, "Null"),
            ExtensionObjectBody::Structured(v) => f.debug_tuple("Structured").field(&v.type_name()).finish(),
            ExtensionObjectBody::Binary(b) => f.debug_tuple("Binary").field(b).finish(),
            ExtensionObjectBody::Xml(x) => f.debug_tuple("Xml").field(x).finish(),
            ExtensionObjectBody::Unknown(v) => f.debug_tuple("Unknown").field(v).finish(),
        }
    }
}

impl Clone for ExtensionObjectBody {
    fn clone(&self) -> Self {
        match self {
            ExtensionObjectBody::Null => ExtensionObjectBody::Null,
            ExtensionObjectBody::Structured(v) => ExtensionObjectBody::Structured(v.clone_boxed()),
            ExtensionObjectBody::Binary(b) => ExtensionObjectBody::Binary(b.clone()),
            ExtensionObjectBody::Xml(x) => ExtensionObjectBody::Xml(x.clone()),
            ExtensionObjectBody::Unknown(v) => ExtensionObjectBody::Unknown(v.clone()),
        }
    }
}

impl Default for ExtensionObjectBody {
    fn default() -> Self {
        ExtensionObjectBody::Null
    }
}

/// A polymorphic envelope carrying a structured value plus the OPC UA type identifier
/// that names it.
#[derive(Debug, Clone, Default)]
pub struct ExtensionObject {
    /// The identifier of the structured type this object carries.
    pub type_id: ExpandedNodeId,
    /// The payload.
    pub body: ExtensionObjectBody,
}

impl UaNullable for ExtensionObject {
    fn is_ua_null(&self) -> bool {
        self.is_null()
    }
}

impl ExtensionObject {
    /// The null extension object.
    pub fn null() -> Self {
        Self::default()
    }

    /// True if both the type id and the body are null.
    pub fn is_null(&self) -> bool {
        self.type_id.is_null() && matches!(self.body, ExtensionObjectBody::Null)
    }

    /// Wrap an already-resolved structured value under `type_id`.
    pub fn new(type_id: ExpandedNodeId, value: Box<dyn Encodable>) -> Self {
        Self {
            type_id,
            body: ExtensionObjectBody::Structured(value),
        }
    }
}

fn encoding_tag(body: &ExtensionObjectBody) -> u32 {
    match body {
        ExtensionObjectBody::Null | ExtensionObjectBody::Structured(_) | ExtensionObjectBody::Unknown(_) => 0,
        ExtensionObjectBody::Binary(_) => 1,
        ExtensionObjectBody::Xml(_) => 2,
    }
}

impl JsonEncodable for ExtensionObject {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        let _depth = ctx.encoding_context().enter_nested()?;
        if self.is_null() {
            return Ok(stream.null_value()?);
        }

        let tag = encoding_tag(&self.body);
        if tag == 0 {
            if let ExtensionObjectBody::Structured(value) = &self.body {
                if let Some(lib) = ctx.type_library() {
                    if lib.json_type_id_of(value.as_ref()).is_none() {
                        return Err(Error::encoding(format!(
                            "ExtensionObject type {:?} is not known to the configured TypeLibrary",
                            self.type_id
                        )));
                    }
                }
            }
        }
        // Non-reversible form has no defined shape for raw binary/XML bodies, so those
        // fall back to the reversible envelope even when the context asks for the
        // lossy form; only a structured body is ever written bare.
        if !ctx.reversible() && tag != 0 {
            log::warn!("non-reversible form has no shape for ExtensionObject Encoding {tag}; falling back to the reversible envelope");
        }
        let use_envelope = ctx.reversible() || tag != 0;

        if use_envelope {
            stream.begin_object()?;
            write_field(stream, ctx, "TypeId", &self.type_id)?;
            if tag != 0 {
                stream.name("Encoding")?;
                tag.encode(stream, ctx)?;
            }
            stream.name("Body")?;
            encode_body(&self.body, stream, ctx)?;
            stream.end_object()?;
        } else {
            encode_body(&self.body, stream, ctx)?;
        }
        Ok(())
    }
}

fn encode_body(body: &ExtensionObjectBody, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
    match body {
        ExtensionObjectBody::Null => Ok(stream.null_value()?),
        ExtensionObjectBody::Structured(value) => value.encode_json(stream, ctx),
        ExtensionObjectBody::Binary(bytes) => bytes.encode(stream, ctx),
        ExtensionObjectBody::Xml(xml) => xml.encode(stream, ctx),
        ExtensionObjectBody::Unknown(raw) => write_raw_json(raw, stream),
    }
}

fn write_raw_json(value: &serde_json::Value, stream: &mut JsonStreamWriter<&mut dyn Write>) -> EncodingResult<()> {
    match value {
        serde_json::Value::Null => Ok(stream.null_value()?),
        serde_json::Value::Bool(b) => Ok(stream.bool_value(*b)?),
        serde_json::Value::Number(n) => Ok(stream.number_value_from_string(&n.to_string())?),
        serde_json::Value::String(s) => Ok(stream.string_value(s)?),
        serde_json::Value::Array(items) => {
            stream.begin_array()?;
            for item in items {
                write_raw_json(item, stream)?;
            }
            Ok(stream.end_array()?)
        }
        serde_json::Value::Object(map) => {
            stream.begin_object()?;
            for (k, v) in map {
                stream.name(k)?;
                write_raw_json(v, stream)?;
            }
            Ok(stream.end_object()?)
        }
    }
}

impl JsonDecodable for ExtensionObject {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(ExtensionObject::null());
        }
        let _depth = decoder.ctx().encoding_context().enter_nested()?;

        let tag: u32 = decoder.read(Some("Encoding"))?;
        if tag > 2 {
            return Err(Error::decoding(format!("ExtensionObject Encoding must be 0, 1 or 2, found {tag}")));
        }
        let type_id: ExpandedNodeId = decoder.read(Some("TypeId"))?;

        if !decoder.has_field("Body") {
            return Ok(ExtensionObject {
                type_id,
                body: ExtensionObjectBody::Null,
            });
        }

        let body = decoder
            .enter_field("Body", |inner| decode_body(inner, &type_id, tag))?
            .expect("presence already checked via has_field");

        Ok(ExtensionObject { type_id, body })
    }
}

fn decode_body(decoder: &mut JsonDecoder<'_>, type_id: &ExpandedNodeId, tag: u32) -> EncodingResult<ExtensionObjectBody> {
    match tag {
        0 => match decoder.ctx().type_library() {
            Some(lib) => match lib.try_load_json(type_id, decoder) {
                Some(result) => Ok(ExtensionObjectBody::Structured(result?)),
                None => Ok(ExtensionObjectBody::Unknown(decoder.current_raw_value().clone())),
            },
            None => Ok(ExtensionObjectBody::Unknown(decoder.current_raw_value().clone())),
        },
        1 => {
            let bytes = ByteString::decode(decoder)?;
            let Some(raw) = bytes.as_bytes() else {
                return Ok(ExtensionObjectBody::Binary(ByteString::null()));
            };
            let value = decoder.binary_codec().decode(type_id, raw, decoder.ctx())?;
            Ok(ExtensionObjectBody::Structured(value))
        }
        2 => {
            let xml = XmlElement::decode(decoder)?;
            match decoder.xml_decoder_factory() {
                Some(factory) => Ok(ExtensionObjectBody::Structured(factory(decoder.ctx(), &xml)?)),
                None => {
                    log::warn!("no XmlDecoderFactory configured; preserving ExtensionObject XML body untyped");
                    Ok(ExtensionObjectBody::Xml(xml))
                }
            }
        }
        other => Err(Error::decoding(format!("unreachable ExtensionObject Encoding {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DecodingLimits, EncodingContext};
    use crate::namespaces::{NamespaceTable, ServerTable};
    use crate::status_code::StatusCode;
    use crate::type_loader::{EmptyTypeLibrary, TypeLibrary};

    #[test]
    fn default_is_null() {
        assert!(ExtensionObject::default().is_ua_null());
    }

    #[test]
    fn encoding_tag_zero_for_structured_and_unknown() {
        assert_eq!(encoding_tag(&ExtensionObjectBody::Null), 0);
        assert_eq!(encoding_tag(&ExtensionObjectBody::Unknown(serde_json::Value::Null)), 0);
        assert_eq!(encoding_tag(&ExtensionObjectBody::Binary(ByteString::null())), 1);
        assert_eq!(encoding_tag(&ExtensionObjectBody::Xml(XmlElement::null())), 2);
    }

    #[derive(Debug, Clone)]
    struct Dummy;

    impl Encodable for Dummy {
        fn encode_json(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
            Ok(stream.null_value()?)
        }

        fn type_name(&self) -> &'static str {
            "Dummy"
        }

        fn clone_boxed(&self) -> Box<dyn Encodable> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn encode_fails_for_structured_body_unknown_to_type_library() {
        let object = ExtensionObject::new(ExpandedNodeId::null(), Box::new(Dummy));
        let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
        let library = EmptyTypeLibrary;
        let view = Context::new(&ctx, true, Some(&library as &dyn TypeLibrary));
        let mut buf: Vec<u8> = Vec::new();
        let mut sink: &mut dyn Write = &mut buf;
        let mut stream = JsonStreamWriter::new(&mut sink);
        let err = object.encode(&mut stream, &view).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_ENCODING_ERROR);
    }
}
