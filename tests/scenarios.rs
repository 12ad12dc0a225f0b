// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! End-to-end scenarios exercising the public API as an external caller would.

use std::io::Write;

use opcua_json_codec::{
    encode_enum, Context, DecodingLimits, EncodingContext, Identifier, JsonDecodable, JsonDecoder, JsonEncodable,
    JsonStreamWriter, JsonWriter, NamespaceTable, NodeId, ServerTable, StatusCode, UaEnum, Variant, VariantArray,
    VariantScalarTypeId,
};

fn encode_field<T: JsonEncodable>(name: &str, value: &T, reversible: bool) -> String {
    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    let view = Context::new(&ctx, reversible, None);
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut sink: &mut dyn Write = &mut buf;
        let mut stream = JsonStreamWriter::new(&mut sink);
        stream.begin_object().unwrap();
        opcua_json_codec::write_field(&mut stream, &view, name, value).unwrap();
        stream.end_object().unwrap();
        stream.finish_document().unwrap();
    }
    String::from_utf8(buf).unwrap()
}

// S1 — Scalar round-trip.
#[test]
fn s1_scalar_round_trip() {
    let json = encode_field("X", &42i32, true);
    assert_eq!(json, r#"{"X":42}"#);

    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    let view = Context::new(&ctx, true, None);
    let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
    let decoded: i32 = decoder.read(Some("X")).unwrap();
    assert_eq!(decoded, 42);
}

// S2 — Default elision.
#[test]
fn s2_default_elision() {
    let json = encode_field("X", &0i32, true);
    assert_eq!(json, "{}");

    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    let view = Context::new(&ctx, true, None);
    let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
    let decoded: i32 = decoder.read(Some("X")).unwrap();
    assert_eq!(decoded, 0);
}

// S3 — Non-reversible enum.
struct TimestampsToReturn;

impl UaEnum for TimestampsToReturn {
    fn ua_enum_name(&self) -> &'static str {
        "Both"
    }
    fn ua_enum_value(&self) -> i32 {
        2
    }
}

#[test]
fn s3_non_reversible_enum() {
    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    let view = Context::new(&ctx, false, None);
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut sink: &mut dyn Write = &mut buf;
        let mut stream = JsonStreamWriter::new(&mut sink);
        stream.begin_object().unwrap();
        stream.name("TimestampsToReturn").unwrap();
        encode_enum(&TimestampsToReturn, &mut stream, &view).unwrap();
        stream.end_object().unwrap();
        stream.finish_document().unwrap();
    }
    let json = String::from_utf8(buf).unwrap();
    assert_eq!(json, r#"{"TimestampsToReturn":"Both_2"}"#);
}

// S4 — String-namespace NodeId.
#[test]
fn s4_string_namespace_node_id() {
    let id = NodeId::new_string(2, "Demo.Static.Scalar.UInt32");
    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    let view = Context::new(&ctx, true, None);
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut sink: &mut dyn Write = &mut buf;
        let mut stream = JsonStreamWriter::new(&mut sink);
        id.encode(&mut stream, &view).unwrap();
        stream.finish_document().unwrap();
    }
    let json = String::from_utf8(buf).unwrap();
    assert_eq!(json, r#"{"IdType":1,"Id":"Demo.Static.Scalar.UInt32","Namespace":2}"#);

    let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
    let decoded = NodeId::decode(&mut decoder).unwrap();
    assert_eq!(decoded.namespace_index, 2);
    assert_eq!(decoded.identifier, Identifier::String("Demo.Static.Scalar.UInt32".into()));
}

// S5 — 2x3 Int32 Variant.
#[test]
fn s5_multi_dimensional_variant() {
    let arr = VariantArray::new_multi(
        VariantScalarTypeId::Int32,
        (1..=6).map(Variant::Int32).collect(),
        vec![2, 3],
    );
    let v = Variant::Array(Box::new(arr));
    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    let view = Context::new(&ctx, true, None);
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut sink: &mut dyn Write = &mut buf;
        let mut stream = JsonStreamWriter::new(&mut sink);
        v.encode(&mut stream, &view).unwrap();
        stream.finish_document().unwrap();
    }
    let json = String::from_utf8(buf).unwrap();
    assert_eq!(json, r#"{"Type":6,"Body":[[1,2,3],[4,5,6]],"Dimensions":[2,3]}"#);

    let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
    let decoded = Variant::decode(&mut decoder).unwrap();
    match decoded {
        Variant::Array(a) => {
            assert_eq!(a.dimensions, Some(vec![2, 3]));
            let flat: Vec<i32> = a
                .values
                .iter()
                .map(|v| match v {
                    Variant::Int32(x) => *x,
                    other => panic!("expected Int32, got {other:?}"),
                })
                .collect();
            assert_eq!(flat, vec![1, 2, 3, 4, 5, 6]);
        }
        other => panic!("expected an array variant, got {other:?}"),
    }
}

// S6 — 64-bit as string.
#[test]
fn s6_64_bit_as_string_and_numeric() {
    let v = 9_007_199_254_740_993u64;
    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    let view = Context::new(&ctx, true, None);
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut sink: &mut dyn Write = &mut buf;
        let mut stream = JsonStreamWriter::new(&mut sink);
        v.encode(&mut stream, &view).unwrap();
        stream.finish_document().unwrap();
    }
    let json = String::from_utf8(buf).unwrap();
    assert_eq!(json, r#""9007199254740993""#);

    let mut decoder = JsonDecoder::from_slice(json.as_bytes(), &view).unwrap();
    assert_eq!(u64::decode(&mut decoder).unwrap(), v);

    let mut decoder = JsonDecoder::from_slice(b"9007199254740993", &view).unwrap();
    assert_eq!(u64::decode(&mut decoder).unwrap(), v);
}

// S7 is covered directly in src/variant/json.rs, since it needs a custom DecodingLimits
// not exercised anywhere else in this file.

#[test]
fn status_code_good_elided_in_both_forms() {
    let ctx = EncodingContext::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::none());
    for reversible in [true, false] {
        let view = Context::new(&ctx, reversible, None);
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut sink: &mut dyn Write = &mut buf;
            let mut stream = JsonStreamWriter::new(&mut sink);
            stream.begin_object().unwrap();
            opcua_json_codec::write_status_code_field(&mut stream, &view, "Status", &StatusCode::GOOD).unwrap();
            stream.end_object().unwrap();
            stream.finish_document().unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "{}");
    }
}
