#![no_main]

use std::sync::{Arc, OnceLock};

use codec::{decode_record_from_slice, encode_record_to_vec, read_record_from};
use libfuzzer_sys::fuzz_target;
use records::{GamestateResponse, GetMoveResponse, GetNextMoveResponse, Message};
use schema::{FieldType, RecordSchema};
use wire::Limits;

/// A schema touching every field type, so arbitrary input reaches each
/// branch of the dynamic decoder.
fn every_type_schema() -> &'static RecordSchema {
    static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let inner = RecordSchema::builder("Inner")
            .field(1, "flag", FieldType::Bool)
            .field(2, "blob", FieldType::Binary)
            .build_shared()
            .expect("inner schema must be valid");
        RecordSchema::builder("EveryType")
            .field(1, "flag", FieldType::Bool)
            .field(2, "byte", FieldType::Byte)
            .field(3, "short", FieldType::I16)
            .field(4, "int", FieldType::I32)
            .field(5, "long", FieldType::I64)
            .field(6, "ratio", FieldType::Double)
            .field(7, "text", FieldType::String)
            .field(8, "blob", FieldType::Binary)
            .field(9, "inner", FieldType::structure(Arc::clone(&inner)))
            .field(10, "list", FieldType::list(FieldType::structure(inner)))
            .field(11, "set", FieldType::set(FieldType::I32))
            .field(
                12,
                "map",
                FieldType::map(FieldType::String, FieldType::list(FieldType::I64)),
            )
            .build()
            .expect("fuzz schema must be valid")
    })
}

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();

    // Slice and stream decoding must agree on every input.
    let sliced = GetNextMoveResponse::decode(data, &limits);
    let streamed = GetNextMoveResponse::read_from(data, &limits);
    assert_eq!(sliced.is_ok(), streamed.is_ok());
    if let (Ok((a, consumed)), Ok(b)) = (sliced, streamed) {
        assert_eq!(a, b);
        assert!(consumed <= data.len());
        // A decoded record re-encodes and decodes to itself.
        let bytes = a.encode().unwrap();
        let (again, _) = GetNextMoveResponse::decode(&bytes, &limits).unwrap();
        assert_eq!(again, a);
    }

    let _ = GetMoveResponse::decode(data, &limits);
    let _ = GamestateResponse::decode(data, &limits);

    // Dynamic records: doubles may decode as NaN, so compare encodings.
    let schema = every_type_schema();
    let sliced = decode_record_from_slice(schema, data, &limits);
    let streamed = read_record_from(schema, data, &limits);
    assert_eq!(sliced.is_ok(), streamed.is_ok());
    if let (Ok((a, _)), Ok(b)) = (sliced, streamed) {
        let bytes = encode_record_to_vec(schema, &a).unwrap();
        assert_eq!(encode_record_to_vec(schema, &b).unwrap(), bytes);
        let (again, consumed) = decode_record_from_slice(schema, &bytes, &limits).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(encode_record_to_vec(schema, &again).unwrap(), bytes);
    }
});
