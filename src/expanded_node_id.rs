// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `ExpandedNodeId`.
//!
//! JSON schema: identical to `NodeId` plus `ServerUri`. In reversible form, `Namespace`
//! carries the index and `ServerUri` the server index as a number. In non-reversible
//! form, `Namespace` carries the namespace URI (falling back to the index when
//! unresolved) and `ServerUri` carries the resolved server URI (falling back to the
//! server index). When the namespace index is greater than `1`, the non-reversible
//! encoding additionally writes `NamespaceIndex` alongside `Namespace` — a redundant
//! double-write kept for wire compatibility with the reference encoder (see DESIGN.md).

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};
use crate::decoder::ValueKind;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::node_id::{read_identifier, write_identifier, Identifier, NodeId};
use crate::string::UaString;

/// A `NodeId` qualified by an optional namespace URI and/or server index or URI, used
/// when referring to a node that may live in a different namespace/server context than
/// the one currently in scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExpandedNodeId {
    /// The local node id (namespace index plus identifier).
    pub node_id: NodeId,
    /// An explicit namespace URI overriding `node_id.namespace_index`, if set.
    pub namespace_uri: UaString,
    /// The index of the server this node lives on (`0` = the local server).
    pub server_index: u32,
}

impl UaNullable for ExpandedNodeId {
    fn is_ua_null(&self) -> bool {
        self.is_null()
    }
}

impl ExpandedNodeId {
    /// The null ExpandedNodeId.
    pub fn null() -> Self {
        Self::default()
    }

    /// True if the underlying `node_id` is null and there is no namespace/server override.
    pub fn is_null(&self) -> bool {
        self.node_id.is_null() && self.namespace_uri.is_null() && self.server_index == 0
    }

    /// Build from a plain `NodeId` with no namespace/server override.
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: UaString::null(),
            server_index: 0,
        }
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self::new(node_id)
    }
}

impl JsonEncodable for ExpandedNodeId {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        stream.begin_object()?;
        write_identifier(stream, ctx, &self.node_id.identifier)?;

        if ctx.reversible() {
            write_field(stream, ctx, "Namespace", &u32::from(self.node_id.namespace_index))?;
            write_field(stream, ctx, "ServerUri", &self.server_index)?;
        } else {
            if let Some(uri) = self.namespace_uri.value() {
                write_field(stream, ctx, "Namespace", &uri.to_string())?;
            } else if self.node_id.namespace_index > 0 {
                match ctx
                    .encoding_context()
                    .namespaces()
                    .get_uri(self.node_id.namespace_index)
                {
                    Some(uri) => write_field(stream, ctx, "Namespace", &uri.to_string())?,
                    None => write_field(stream, ctx, "Namespace", &u32::from(self.node_id.namespace_index))?,
                }
            }
            // Redundant with `Namespace` above but emitted for wire compatibility with
            // the reference encoder when the local index is not 0 or 1.
            if self.node_id.namespace_index > 1 {
                write_field(
                    stream,
                    ctx,
                    "NamespaceIndex",
                    &u32::from(self.node_id.namespace_index),
                )?;
            }

            if self.server_index > 0 {
                match ctx.encoding_context().servers().get_uri(self.server_index) {
                    Some(uri) => write_field(stream, ctx, "ServerUri", &uri.to_string())?,
                    None => write_field(stream, ctx, "ServerUri", &self.server_index)?,
                }
            }
        }

        stream.end_object()?;
        Ok(())
    }
}

impl JsonDecodable for ExpandedNodeId {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(ExpandedNodeId::null());
        }
        let identifier: Identifier = read_identifier(decoder)?;
        let server_index: u32 = decoder.read(Some("ServerUri"))?;

        let (namespace_index, namespace_uri) = if decoder.has_field("Namespace") {
            decoder
                .enter_field("Namespace", |inner| match inner.current_kind() {
                    ValueKind::String => {
                        let uri = inner.current_string()?.to_string();
                        Ok((0u16, UaString::from(uri)))
                    }
                    ValueKind::Number => Ok((inner.current_integer::<u16>()?, UaString::null())),
                    other => Err(Error::decoding(format!(
                        "ExpandedNodeId Namespace must be a string or number, found {other:?}"
                    ))),
                })?
                .ok_or_else(|| Error::decoding("Namespace field vanished mid-decode"))?
        } else {
            (0u16, UaString::null())
        };

        Ok(ExpandedNodeId {
            node_id: NodeId {
                namespace_index,
                identifier,
            },
            namespace_uri,
            server_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_round_trips_identity() {
        let id = ExpandedNodeId::null();
        assert!(id.is_null());
    }
}
