use std::sync::Arc;

use codec::{decode_record_from_slice, encode_record_to_vec, Limits, Record, Value};
use schema::{FieldType, RecordSchema};

fn gamestate_v1() -> RecordSchema {
    RecordSchema::builder("GamestateResponse")
        .field(1, "board", FieldType::String)
        .field(2, "remoteness", FieldType::I32)
        .build()
        .unwrap()
}

/// A later revision of the record with extra fields of every shape.
fn gamestate_v2() -> RecordSchema {
    let note = RecordSchema::builder("Note")
        .field(1, "text", FieldType::String)
        .build_shared()
        .unwrap();
    RecordSchema::builder("GamestateResponse")
        .field(1, "board", FieldType::String)
        .field(7, "history", FieldType::list(FieldType::structure(note)))
        .field(2, "remoteness", FieldType::I32)
        .field(
            8,
            "weights",
            FieldType::map(FieldType::String, FieldType::Double),
        )
        .field(9, "seen", FieldType::set(FieldType::I64))
        .build()
        .unwrap()
}

#[test]
fn newer_writer_older_reader() {
    let record = Record::new()
        .with("board", "XO.")
        .with(
            "history",
            Value::List(vec![Value::from(Record::new().with("text", "opening"))]),
        )
        .with("remoteness", 4)
        .with(
            "weights",
            Value::Map(vec![(Value::from("a"), Value::Double(1.5))]),
        )
        .with("seen", Value::Set(vec![Value::I64(1), Value::I64(2)]));
    let bytes = encode_record_to_vec(&gamestate_v2(), &record).unwrap();

    let (decoded, consumed) =
        decode_record_from_slice(&gamestate_v1(), &bytes, &Limits::default()).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(
        decoded,
        Record::new().with("board", "XO.").with("remoteness", 4)
    );
}

#[test]
fn older_writer_newer_reader() {
    let record = Record::new().with("board", "...").with("remoteness", 0);
    let bytes = encode_record_to_vec(&gamestate_v1(), &record).unwrap();
    let (decoded, _) =
        decode_record_from_slice(&gamestate_v2(), &bytes, &Limits::default()).unwrap();
    assert_eq!(decoded, record);
    assert!(decoded.get("history").is_none());
}

#[test]
fn unknown_nested_struct_inside_known_nested_struct() {
    let inner_v2 = RecordSchema::builder("Inner")
        .field(1, "a", FieldType::I32)
        .field(2, "extra", FieldType::structure(Arc::new(gamestate_v1())))
        .build_shared()
        .unwrap();
    let inner_v1 = RecordSchema::builder("Inner")
        .field(1, "a", FieldType::I32)
        .build_shared()
        .unwrap();
    let writer = RecordSchema::builder("Outer")
        .field(1, "inner", FieldType::structure(inner_v2))
        .field(2, "tail", FieldType::Bool)
        .build()
        .unwrap();
    let reader = RecordSchema::builder("Outer")
        .field(1, "inner", FieldType::structure(inner_v1))
        .field(2, "tail", FieldType::Bool)
        .build()
        .unwrap();

    let record = Record::new()
        .with(
            "inner",
            Record::new()
                .with("a", 5)
                .with("extra", Record::new().with("board", "X")),
        )
        .with("tail", true);
    let bytes = encode_record_to_vec(&writer, &record).unwrap();
    let (decoded, _) = decode_record_from_slice(&reader, &bytes, &Limits::default()).unwrap();
    assert_eq!(
        decoded,
        Record::new()
            .with("inner", Record::new().with("a", 5))
            .with("tail", true)
    );
}
