//! Inspection and conversion tools for gamesman wire records.
//!
//! This crate provides utilities for looking at encoded records:
//!
//! - Walk a record's structure without a schema
//! - Decode a known record kind to JSON, or encode it from JSON
//! - Print a record kind's field table and fingerprint
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what is on the wire.

mod convert;
mod inspect;

pub use convert::{
    decode_record_bytes, decode_record_json, encode_record_json, format_decode_pretty,
    format_schema, DecodedRecord,
};
pub use inspect::{format_inspect_report, inspect_record, FieldNode, InspectReport, Node};
