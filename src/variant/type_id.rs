// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! The standard OPC UA builtin type identifiers carried by `Variant`'s `Type` field.

use crate::error::{EncodingResult, Error};

/// One of the 25 OPC UA builtin scalar types a `Variant` may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum VariantScalarTypeId {
    /// No value (`Variant::Empty`). Never appears as a `Type` tag on the wire.
    Null = 0,
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    ExtensionObject = 22,
    DataValue = 23,
    Variant = 24,
    DiagnosticInfo = 25,
}

impl VariantScalarTypeId {
    /// The numeric `Type` tag this variant is written under.
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for VariantScalarTypeId {
    type Error = Error;

    fn try_from(value: u32) -> EncodingResult<Self> {
        use VariantScalarTypeId::*;
        Ok(match value {
            0 => Null,
            1 => Boolean,
            2 => SByte,
            3 => Byte,
            4 => Int16,
            5 => UInt16,
            6 => Int32,
            7 => UInt32,
            8 => Int64,
            9 => UInt64,
            10 => Float,
            11 => Double,
            12 => String,
            13 => DateTime,
            14 => Guid,
            15 => ByteString,
            16 => XmlElement,
            17 => NodeId,
            18 => ExpandedNodeId,
            19 => StatusCode,
            20 => QualifiedName,
            21 => LocalizedText,
            22 => ExtensionObject,
            23 => DataValue,
            24 => Variant,
            25 => DiagnosticInfo,
            other => return Err(Error::decoding(format!("unknown VariantScalarTypeId {other}"))),
        })
    }
}
