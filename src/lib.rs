// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Bidirectional OPC UA JSON data encoding (OPC UA Part 6, §5.4).
//!
//! Given a tree of OPC UA built-in values (scalars, structured types, variants, arrays
//! up to N dimensions), this crate serializes them to a UTF-8 JSON document and parses a
//! UTF-8 JSON document back into the same value tree, in both the reversible (lossless)
//! and non-reversible (human-readable, lossy) forms defined by the standard.
//!
//! Encoding writes through a streaming [`struson`] writer; decoding walks a random-access
//! [`serde_json::Value`] document parsed once at construction, so a structure's fields may
//! be read in any order regardless of how they appear in the source text. The crate never
//! embeds the thousands of standard OPC UA structured-type definitions itself — callers
//! plug their own type table in through [`type_loader::TypeLibrary`].

mod byte_string;
mod context;
mod data_value;
mod date_time;
mod decoder;
mod diagnostic_info;
mod encoder;
mod encoding;
mod enum_value;
mod error;
mod expanded_node_id;
mod extension_object;
mod guid;
mod json;
mod localized_text;
mod namespaces;
mod node_id;
mod provider;
mod qualified_name;
mod status_code;
mod string;
mod type_loader;
mod variant;
mod xml_element;

pub use byte_string::ByteString;
pub use context::{Context, DecodingLimits, DepthGauge, DepthLock, EncodingContext, DEFAULT_MAX_DECODING_DEPTH};
pub use data_value::DataValue;
pub use date_time::UaDateTime;
pub use decoder::{JsonDecoder, ValueKind};
pub use diagnostic_info::DiagnosticInfo;
pub use encoder::JsonEncoder;
pub use encoding::UaNullable;
pub use enum_value::{encode_enum, UaEnum};
pub use error::{EncodingResult, Error};
pub use expanded_node_id::ExpandedNodeId;
pub use extension_object::{ExtensionObject, ExtensionObjectBody};
pub use guid::Guid;
pub use json::{write_field, JsonDecodable, JsonEncodable, JsonStreamWriter, JsonWriter};
pub use localized_text::LocalizedText;
pub use namespaces::{NamespaceTable, ServerTable, OPC_UA_NAMESPACE};
pub use node_id::{Identifier, NodeId};
pub use provider::{DecoderOptions, EncoderOptions, JsonCodecProvider};
pub use qualified_name::QualifiedName;
pub use status_code::{write_status_code_field, Severity, StatusCode};
pub use string::UaString;
pub use type_loader::{BinaryCodec, Encodable, EmptyTypeLibrary, TypeLibrary, UnsupportedBinaryCodec, XmlDecoderFactory};
pub use variant::{Variant, VariantArray, VariantScalarTypeId};
pub use xml_element::XmlElement;
