// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `NodeId` and `Identifier`.
//!
//! JSON schema (reversible form):
//! ```json
//! { "IdType": 1, "Id": "Demo.Static.Scalar.UInt32", "Namespace": 2 }
//! ```
//! `IdType` is omitted for numeric identifiers (the default, `0`). `Namespace` is omitted
//! when `0`. In non-reversible form, a namespace index that resolves in the context's
//! namespace table is written as the URI string instead of the index.

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::byte_string::ByteString;
use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};
use crate::guid::Guid;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::string::UaString;

/// The identifier payload carried by a `NodeId`, tagged by `IdType` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// `IdType` 0 (the default, omitted on the wire).
    Numeric(u32),
    /// `IdType` 1.
    String(UaString),
    /// `IdType` 2.
    Guid(Guid),
    /// `IdType` 3.
    ByteString(ByteString),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Numeric(0)
    }
}

impl Identifier {
    fn id_type(&self) -> u32 {
        match self {
            Identifier::Numeric(_) => 0,
            Identifier::String(_) => 1,
            Identifier::Guid(_) => 2,
            Identifier::ByteString(_) => 3,
        }
    }

    fn is_null(&self) -> bool {
        match self {
            Identifier::Numeric(n) => *n == 0,
            Identifier::String(s) => s.is_null(),
            Identifier::Guid(g) => g.is_ua_null(),
            Identifier::ByteString(b) => b.is_null(),
        }
    }
}

/// An identifier for a node in an OPC UA address space: an `Identifier` qualified by a
/// 16-bit namespace index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeId {
    /// The namespace this identifier belongs to.
    pub namespace_index: u16,
    /// The identifier itself.
    pub identifier: Identifier,
}

impl UaNullable for NodeId {
    fn is_ua_null(&self) -> bool {
        self.is_null()
    }
}

impl NodeId {
    /// The null NodeId: namespace `0`, numeric identifier `0`.
    pub fn null() -> Self {
        Self::default()
    }

    /// True if this is the null NodeId.
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.identifier.is_null()
    }

    /// Build a numeric NodeId.
    pub fn new_numeric(namespace_index: u16, id: u32) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Numeric(id),
        }
    }

    /// Build a string NodeId.
    pub fn new_string(namespace_index: u16, id: impl Into<UaString>) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::String(id.into()),
        }
    }
}

/// Shared by `NodeId` and `ExpandedNodeId`: write the `IdType`/`Id` pair.
pub(crate) fn write_identifier(
    stream: &mut JsonStreamWriter<&mut dyn Write>,
    ctx: &Context<'_>,
    identifier: &Identifier,
) -> EncodingResult<()> {
    write_field(stream, ctx, "IdType", &identifier.id_type())?;
    match identifier {
        Identifier::Numeric(n) => write_field(stream, ctx, "Id", n)?,
        Identifier::String(s) => write_field(stream, ctx, "Id", s)?,
        Identifier::Guid(g) => write_field(stream, ctx, "Id", g)?,
        Identifier::ByteString(b) => write_field(stream, ctx, "Id", b)?,
    }
    Ok(())
}

/// Shared by `NodeId` and `ExpandedNodeId`: resolve and write the `Namespace` field.
pub(crate) fn write_namespace(
    stream: &mut JsonStreamWriter<&mut dyn Write>,
    ctx: &Context<'_>,
    namespace_index: u16,
) -> EncodingResult<()> {
    if !ctx.reversible() && namespace_index > 0 {
        if let Some(uri) = ctx.encoding_context().namespaces().get_uri(namespace_index) {
            return write_field(stream, ctx, "Namespace", &uri.to_string());
        }
    }
    write_field(stream, ctx, "Namespace", &u32::from(namespace_index))
}

/// Shared by `NodeId` and `ExpandedNodeId`: read the `IdType`/`Id` pair.
pub(crate) fn read_identifier(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Identifier> {
    let id_type: u32 = decoder.read(Some("IdType"))?;
    Ok(match id_type {
        0 => Identifier::Numeric(decoder.read(Some("Id"))?),
        1 => Identifier::String(decoder.read(Some("Id"))?),
        2 => Identifier::Guid(decoder.read(Some("Id"))?),
        3 => Identifier::ByteString(decoder.read(Some("Id"))?),
        other => return Err(Error::decoding(format!("unknown NodeId IdType {other}"))),
    })
}

impl JsonEncodable for NodeId {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        stream.begin_object()?;
        write_identifier(stream, ctx, &self.identifier)?;
        write_namespace(stream, ctx, self.namespace_index)?;
        stream.end_object()?;
        Ok(())
    }
}

impl JsonDecodable for NodeId {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(NodeId::null());
        }
        let identifier = read_identifier(decoder)?;
        let namespace_index: u16 = decoder.read(Some("Namespace"))?;
        Ok(NodeId {
            namespace_index,
            identifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_node_id_has_numeric_zero() {
        let id = NodeId::null();
        assert!(id.is_null());
        assert_eq!(id.identifier, Identifier::Numeric(0));
    }
}
