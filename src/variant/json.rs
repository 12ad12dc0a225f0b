// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! JSON encode/decode for `Variant`.
//!
//! Reversible form is an envelope object `{"Type": <u32>, "Body": <value>, "Dimensions":
//! [...]}` (`Dimensions` only present for arrays of rank 2 or higher); non-reversible form
//! drops the envelope and writes the bare body. A scalar body is the inner type's own JSON
//! form; an array body is a JSON array, nested once per dimension, row-major with the last
//! dimension varying fastest.

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::byte_string::ByteString;
use crate::context::Context;
use crate::data_value::DataValue;
use crate::date_time::UaDateTime;
use crate::decoder::{JsonDecoder, ValueKind};
use crate::diagnostic_info::DiagnosticInfo;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};
use crate::expanded_node_id::ExpandedNodeId;
use crate::extension_object::ExtensionObject;
use crate::guid::Guid;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::localized_text::LocalizedText;
use crate::node_id::NodeId;
use crate::qualified_name::QualifiedName;
use crate::status_code::StatusCode;
use crate::string::UaString;
use crate::xml_element::XmlElement;

use super::{Variant, VariantArray, VariantScalarTypeId};

impl JsonEncodable for Variant {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        let _depth = ctx.encoding_context().enter_nested()?;
        if matches!(self, Variant::Empty) {
            return Ok(stream.null_value()?);
        }
        if ctx.reversible() {
            stream.begin_object()?;
            stream.name("Type")?;
            self.type_id().as_u32().encode(stream, ctx)?;
            stream.name("Body")?;
            encode_body(self, stream, ctx)?;
            if let Variant::Array(arr) = self {
                if let Some(dims) = arr.dimensions.as_ref().filter(|d| d.len() >= 2) {
                    write_field(stream, ctx, "Dimensions", dims)?;
                }
            }
            stream.end_object()?;
        } else {
            encode_body(self, stream, ctx)?;
        }
        Ok(())
    }
}

impl JsonDecodable for Variant {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(Variant::Empty);
        }
        let _depth = decoder.ctx().encoding_context().enter_nested()?;
        let raw_type: u32 = decoder.read_required("Type")?;
        let type_id = VariantScalarTypeId::try_from(raw_type)?;
        let dims: Option<Vec<u32>> = decoder.read(Some("Dimensions"))?;

        if !decoder.field_exists("Body") {
            return if type_id == VariantScalarTypeId::Null {
                Ok(Variant::Empty)
            } else {
                Err(Error::decoding("Variant is missing its required Body field"))
            };
        }

        let body = decoder.enter_field_any("Body", |inner| decode_body(inner, type_id, dims.as_deref()))?;
        match body {
            Some(v) => Ok(v),
            None => Ok(Variant::Empty),
        }
    }
}

fn encode_scalar_value(v: &Variant, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
    match v {
        Variant::Empty => Ok(stream.null_value()?),
        Variant::Boolean(x) => x.encode(stream, ctx),
        Variant::SByte(x) => x.encode(stream, ctx),
        Variant::Byte(x) => x.encode(stream, ctx),
        Variant::Int16(x) => x.encode(stream, ctx),
        Variant::UInt16(x) => x.encode(stream, ctx),
        Variant::Int32(x) => x.encode(stream, ctx),
        Variant::UInt32(x) => x.encode(stream, ctx),
        Variant::Int64(x) => x.encode(stream, ctx),
        Variant::UInt64(x) => x.encode(stream, ctx),
        Variant::Float(x) => x.encode(stream, ctx),
        Variant::Double(x) => x.encode(stream, ctx),
        Variant::String(x) => x.encode(stream, ctx),
        Variant::DateTime(x) => x.encode(stream, ctx),
        Variant::Guid(x) => x.encode(stream, ctx),
        Variant::StatusCode(x) => x.encode(stream, ctx),
        Variant::ByteString(x) => x.encode(stream, ctx),
        Variant::XmlElement(x) => x.encode(stream, ctx),
        Variant::QualifiedName(x) => x.encode(stream, ctx),
        Variant::LocalizedText(x) => x.encode(stream, ctx),
        Variant::NodeId(x) => x.encode(stream, ctx),
        Variant::ExpandedNodeId(x) => x.encode(stream, ctx),
        Variant::ExtensionObject(x) => x.encode(stream, ctx),
        Variant::Variant(x) => x.encode(stream, ctx),
        Variant::DataValue(x) => x.encode(stream, ctx),
        Variant::DiagnosticInfo(x) => x.encode(stream, ctx),
        Variant::Array(_) => Err(Error::encoding("a Variant array cannot contain another array as an element")),
    }
}

fn encode_body(v: &Variant, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
    match v {
        Variant::Array(arr) => encode_array_body(&arr.values, arr.dimensions.as_deref(), stream, ctx),
        other => encode_scalar_value(other, stream, ctx),
    }
}

fn encode_array_body(
    values: &[Variant],
    dims: Option<&[u32]>,
    stream: &mut JsonStreamWriter<&mut dyn Write>,
    ctx: &Context<'_>,
) -> EncodingResult<()> {
    match dims.filter(|d| d.len() >= 2) {
        Some(dims) => {
            let product: usize = dims.iter().map(|d| *d as usize).product();
            if product != values.len() {
                return Err(Error::encoding(format!(
                    "Variant array has {} elements but Dimensions {:?} implies {product}",
                    values.len(),
                    dims
                )));
            }
            ctx.encoding_context().limits().check_array_length(product)?;
            write_nested(values, dims, stream, ctx)
        }
        None => {
            ctx.encoding_context().limits().check_array_length(values.len())?;
            stream.begin_array()?;
            for v in values {
                encode_scalar_value(v, stream, ctx)?;
            }
            stream.end_array()?;
            Ok(())
        }
    }
}

fn write_nested(
    values: &[Variant],
    dims: &[u32],
    stream: &mut JsonStreamWriter<&mut dyn Write>,
    ctx: &Context<'_>,
) -> EncodingResult<()> {
    if dims.len() == 1 {
        stream.begin_array()?;
        for v in values {
            encode_scalar_value(v, stream, ctx)?;
        }
        stream.end_array()?;
        return Ok(());
    }
    let chunk_size: usize = dims[1..].iter().map(|d| *d as usize).product();
    stream.begin_array()?;
    for chunk in values.chunks(chunk_size.max(1)) {
        write_nested(chunk, &dims[1..], stream, ctx)?;
    }
    stream.end_array()?;
    Ok(())
}

fn decode_scalar_body(decoder: &mut JsonDecoder<'_>, type_id: VariantScalarTypeId) -> EncodingResult<Variant> {
    use VariantScalarTypeId as T;
    Ok(match type_id {
        T::Null => Variant::Empty,
        T::Boolean => Variant::Boolean(bool::decode(decoder)?),
        T::SByte => Variant::SByte(i8::decode(decoder)?),
        T::Byte => Variant::Byte(u8::decode(decoder)?),
        T::Int16 => Variant::Int16(i16::decode(decoder)?),
        T::UInt16 => Variant::UInt16(u16::decode(decoder)?),
        T::Int32 => Variant::Int32(i32::decode(decoder)?),
        T::UInt32 => Variant::UInt32(u32::decode(decoder)?),
        T::Int64 => Variant::Int64(i64::decode(decoder)?),
        T::UInt64 => Variant::UInt64(u64::decode(decoder)?),
        T::Float => Variant::Float(f32::decode(decoder)?),
        T::Double => Variant::Double(f64::decode(decoder)?),
        T::String => Variant::String(UaString::decode(decoder)?),
        T::DateTime => Variant::DateTime(Box::new(UaDateTime::decode(decoder)?)),
        T::Guid => Variant::Guid(Box::new(Guid::decode(decoder)?)),
        T::StatusCode => Variant::StatusCode(StatusCode::decode(decoder)?),
        T::ByteString => Variant::ByteString(ByteString::decode(decoder)?),
        T::XmlElement => Variant::XmlElement(XmlElement::decode(decoder)?),
        T::QualifiedName => Variant::QualifiedName(Box::new(QualifiedName::decode(decoder)?)),
        T::LocalizedText => Variant::LocalizedText(Box::new(LocalizedText::decode(decoder)?)),
        T::NodeId => Variant::NodeId(Box::new(NodeId::decode(decoder)?)),
        T::ExpandedNodeId => Variant::ExpandedNodeId(Box::new(ExpandedNodeId::decode(decoder)?)),
        T::ExtensionObject => Variant::ExtensionObject(Box::new(ExtensionObject::decode(decoder)?)),
        T::Variant => Variant::Variant(Box::new(Variant::decode(decoder)?)),
        T::DataValue => Variant::DataValue(Box::new(DataValue::decode(decoder)?)),
        T::DiagnosticInfo => Variant::DiagnosticInfo(Box::new(DiagnosticInfo::decode(decoder)?)),
    })
}

fn decode_body(decoder: &mut JsonDecoder<'_>, type_id: VariantScalarTypeId, dims: Option<&[u32]>) -> EncodingResult<Variant> {
    if type_id == VariantScalarTypeId::Null {
        return Ok(Variant::Empty);
    }
    let multi_dim = dims.filter(|d| d.len() >= 2);
    if decoder.current_kind() != ValueKind::Array {
        if multi_dim.is_some() {
            return Err(Error::decoding(
                "Variant Body must be an array when Dimensions has rank 2 or higher",
            ));
        }
        return decode_scalar_body(decoder, type_id);
    }
    let values = match multi_dim {
        Some(dims) => {
            let product: usize = dims.iter().map(|d| *d as usize).product();
            decoder.limits().check_array_length(product)?;
            read_nested(decoder, type_id, dims)?
        }
        None => read_flat(decoder, type_id)?,
    };
    Ok(Variant::Array(Box::new(VariantArray {
        value_type: Some(type_id),
        values,
        dimensions: multi_dim.map(|d| d.to_vec()),
    })))
}

fn read_flat(decoder: &mut JsonDecoder<'_>, type_id: VariantScalarTypeId) -> EncodingResult<Vec<Variant>> {
    let len = decoder.current_array_len()?;
    decoder.limits().check_array_length(len)?;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(decoder.with_array_element(i, |inner| decode_scalar_body(inner, type_id))?);
    }
    Ok(out)
}

fn read_nested(decoder: &mut JsonDecoder<'_>, type_id: VariantScalarTypeId, dims: &[u32]) -> EncodingResult<Vec<Variant>> {
    let len = decoder.current_array_len()?;
    if len != dims[0] as usize {
        return Err(Error::decoding(format!(
            "array dimension mismatch: Dimensions expects {} elements at this level, found {len}",
            dims[0]
        )));
    }
    if dims.len() == 1 {
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(decoder.with_array_element(i, |inner| decode_scalar_body(inner, type_id))?);
        }
        return Ok(out);
    }
    let mut out = Vec::new();
    for i in 0..len {
        let chunk = decoder.with_array_element(i, |inner| read_nested(inner, type_id, &dims[1..]))?;
        out.extend(chunk);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DecodingLimits, EncodingContext};
    use crate::namespaces::{NamespaceTable, ServerTable};

    fn encode_to_string(value: &Variant, reversible: bool) -> String {
        let ctx = EncodingContext::default();
        let view = Context::new(&ctx, reversible, None);
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut writer: &mut dyn Write = &mut buf;
            let mut stream = JsonStreamWriter::new(&mut writer);
            value.encode(&mut stream, &view).unwrap();
            stream.finish_document().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reversible_envelope_shape() {
        let v = Variant::Int32(42);
        let json = encode_to_string(&v, true);
        assert_eq!(json, r#"{"Type":6,"Body":42}"#);
    }

    #[test]
    fn non_reversible_is_bare_body() {
        let v = Variant::Int32(42);
        let json = encode_to_string(&v, false);
        assert_eq!(json, "42");
    }

    #[test]
    fn empty_variant_is_null() {
        assert_eq!(encode_to_string(&Variant::Empty, true), "null");
        assert_eq!(encode_to_string(&Variant::Empty, false), "null");
    }

    #[test]
    fn multi_dim_array_round_trips() {
        let arr = VariantArray::new_multi(
            VariantScalarTypeId::Int32,
            vec![
                Variant::Int32(1),
                Variant::Int32(2),
                Variant::Int32(3),
                Variant::Int32(4),
                Variant::Int32(5),
                Variant::Int32(6),
            ],
            vec![2, 3],
        );
        let v = Variant::Array(Box::new(arr));
        let json = encode_to_string(&v, true);
        assert_eq!(json, r#"{"Type":6,"Body":[[1,2,3],[4,5,6]],"Dimensions":[2,3]}"#);

        let limits = DecodingLimits::none();
        let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), limits);
        let view = Context::new(&ctx, true, None);
        let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
        let decoded = Variant::decode(&mut decoder).unwrap();
        match decoded {
            Variant::Array(a) => {
                assert_eq!(a.dimensions, Some(vec![2, 3]));
                assert_eq!(a.values.len(), 6);
            }
            other => panic!("expected an array variant, got {other:?}"),
        }
    }

    #[test]
    fn non_array_body_rejected_when_dimensions_has_rank_two() {
        let ctx = EncodingContext::default();
        let view = Context::new(&ctx, true, None);
        let json = r#"{"Type":6,"Body":42,"Dimensions":[2,3]}"#;
        let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
        let err = Variant::decode(&mut decoder).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_DECODING_ERROR);
    }

    #[test]
    fn dimensions_product_checked_before_reading_contents() {
        let limits = DecodingLimits {
            max_array_length: 1000,
            ..DecodingLimits::none()
        };
        let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), limits);
        let view = Context::new(&ctx, true, None);
        let json = r#"{"Type":6,"Body":[[1]],"Dimensions":[1001,1]}"#;
        let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
        let err = Variant::decode(&mut decoder).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_ENCODING_LIMITS_EXCEEDED);
    }
}
