// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `Variant`, the self-describing envelope that can carry
//! any of the 25 OPC UA builtin types, plus a same-typed array with optional
//! multi-dimensional shape metadata.

mod json;
pub mod type_id;

pub use type_id::VariantScalarTypeId;

use crate::byte_string::ByteString;
use crate::data_value::DataValue;
use crate::date_time::UaDateTime;
use crate::diagnostic_info::DiagnosticInfo;
use crate::encoding::UaNullable;
use crate::expanded_node_id::ExpandedNodeId;
use crate::extension_object::ExtensionObject;
use crate::guid::Guid;
use crate::localized_text::LocalizedText;
use crate::node_id::NodeId;
use crate::qualified_name::QualifiedName;
use crate::status_code::StatusCode;
use crate::string::UaString;
use crate::xml_element::XmlElement;

/// A same-typed array carried by `Variant::Array`, optionally shaped into more than one
/// dimension (row-major, last dimension varying fastest).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantArray {
    /// The scalar type every element of `values` holds.
    pub value_type: Option<VariantScalarTypeId>,
    /// The flattened element values.
    pub values: Vec<Variant>,
    /// The shape of the array when it has more than one dimension. `None` (or a single
    /// dimension) means the array is stored and encoded as a flat, one-dimensional list.
    pub dimensions: Option<Vec<u32>>,
}

impl VariantArray {
    /// Build a flat (one-dimensional) array.
    pub fn new(value_type: VariantScalarTypeId, values: Vec<Variant>) -> Self {
        Self {
            value_type: Some(value_type),
            values,
            dimensions: None,
        }
    }

    /// Build a multi-dimensional array. `dimensions` must have at least 2 entries whose
    /// product equals `values.len()`; this is validated during encode/decode, not here.
    pub fn new_multi(value_type: VariantScalarTypeId, values: Vec<Variant>, dimensions: Vec<u32>) -> Self {
        Self {
            value_type: Some(value_type),
            values,
            dimensions: Some(dimensions),
        }
    }
}

/// A self-describing value: a type tag plus either a scalar of that type or a same-typed
/// array (optionally multi-dimensional).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    /// The null variant (`Type` 0). Elided as a named field in reversible form.
    #[default]
    Empty,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(UaString),
    DateTime(Box<UaDateTime>),
    Guid(Box<Guid>),
    StatusCode(StatusCode),
    ByteString(ByteString),
    XmlElement(XmlElement),
    QualifiedName(Box<QualifiedName>),
    LocalizedText(Box<LocalizedText>),
    NodeId(Box<NodeId>),
    ExpandedNodeId(Box<ExpandedNodeId>),
    ExtensionObject(Box<ExtensionObject>),
    Variant(Box<Variant>),
    DataValue(Box<DataValue>),
    DiagnosticInfo(Box<DiagnosticInfo>),
    Array(Box<VariantArray>),
}

impl UaNullable for Variant {
    fn is_ua_null(&self) -> bool {
        matches!(self, Variant::Empty)
    }
}

impl Variant {
    /// The `VariantScalarTypeId` this value would be tagged with on the wire.
    pub fn type_id(&self) -> VariantScalarTypeId {
        use VariantScalarTypeId as T;
        match self {
            Variant::Empty => T::Null,
            Variant::Boolean(_) => T::Boolean,
            Variant::SByte(_) => T::SByte,
            Variant::Byte(_) => T::Byte,
            Variant::Int16(_) => T::Int16,
            Variant::UInt16(_) => T::UInt16,
            Variant::Int32(_) => T::Int32,
            Variant::UInt32(_) => T::UInt32,
            Variant::Int64(_) => T::Int64,
            Variant::UInt64(_) => T::UInt64,
            Variant::Float(_) => T::Float,
            Variant::Double(_) => T::Double,
            Variant::String(_) => T::String,
            Variant::DateTime(_) => T::DateTime,
            Variant::Guid(_) => T::Guid,
            Variant::StatusCode(_) => T::StatusCode,
            Variant::ByteString(_) => T::ByteString,
            Variant::XmlElement(_) => T::XmlElement,
            Variant::QualifiedName(_) => T::QualifiedName,
            Variant::LocalizedText(_) => T::LocalizedText,
            Variant::NodeId(_) => T::NodeId,
            Variant::ExpandedNodeId(_) => T::ExpandedNodeId,
            Variant::ExtensionObject(_) => T::ExtensionObject,
            Variant::Variant(_) => T::Variant,
            Variant::DataValue(_) => T::DataValue,
            Variant::DiagnosticInfo(_) => T::DiagnosticInfo,
            Variant::Array(a) => a.value_type.unwrap_or(T::Null),
        }
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Variant::Int32(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(UaString::from(value))
    }
}
