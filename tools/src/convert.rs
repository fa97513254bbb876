//! Typed decode to JSON and encode from JSON.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::Limits;
use records::{GamestateResponse, GetMoveResponse, GetNextMoveResponse, Message, RecordKind};
use schema::schema_fingerprint;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// A typed record decoded from wire bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DecodedRecord {
    Gamestate(GamestateResponse),
    GetMove(GetMoveResponse),
    GetNextMove(GetNextMoveResponse),
}

impl DecodedRecord {
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Gamestate(_) => RecordKind::GamestateResponse,
            Self::GetMove(_) => RecordKind::GetMoveResponse,
            Self::GetNextMove(_) => RecordKind::GetNextMoveResponse,
        }
    }
}

/// Decodes one record of `kind` from the front of `bytes`.
pub fn decode_record_bytes(
    kind: RecordKind,
    bytes: &[u8],
    limits: &Limits,
) -> Result<DecodedRecord> {
    let (record, consumed) = match kind {
        RecordKind::GamestateResponse => decode_as(bytes, limits, DecodedRecord::Gamestate),
        RecordKind::GetMoveResponse => decode_as(bytes, limits, DecodedRecord::GetMove),
        RecordKind::GetNextMoveResponse => decode_as(bytes, limits, DecodedRecord::GetNextMove),
    }
    .with_context(|| format!("decode {kind}"))?;
    if consumed < bytes.len() {
        warn!(
            record = %kind,
            consumed,
            trailing = bytes.len() - consumed,
            "ignoring bytes after the record"
        );
    }
    Ok(record)
}

fn decode_as<M: Message>(
    bytes: &[u8],
    limits: &Limits,
    wrap: fn(M) -> DecodedRecord,
) -> codec::CodecResult<(DecodedRecord, usize)> {
    M::decode(bytes, limits).map(|(message, consumed)| (wrap(message), consumed))
}

/// Decodes one record and renders it as JSON.
pub fn decode_record_json(
    kind: RecordKind,
    bytes: &[u8],
    limits: &Limits,
) -> Result<serde_json::Value> {
    let record = decode_record_bytes(kind, bytes, limits)?;
    serde_json::to_value(&record).context("serialize record json")
}

/// Parses a JSON document as a record of `kind` and encodes it.
pub fn encode_record_json(kind: RecordKind, json: &str) -> Result<Vec<u8>> {
    let bytes = match kind {
        RecordKind::GamestateResponse => encode_as::<GamestateResponse>(json),
        RecordKind::GetMoveResponse => encode_as::<GetMoveResponse>(json),
        RecordKind::GetNextMoveResponse => encode_as::<GetNextMoveResponse>(json),
    }
    .with_context(|| format!("encode {kind}"))?;
    debug!(record = %kind, bytes = bytes.len(), "encoded record");
    Ok(bytes)
}

fn encode_as<M: Message + DeserializeOwned>(json: &str) -> Result<Vec<u8>> {
    let message: M = serde_json::from_str(json).context("parse record json")?;
    Ok(message.encode()?)
}

/// Renders a decoded record as an indented Debug dump.
#[must_use]
pub fn format_decode_pretty(record: &DecodedRecord) -> String {
    let body = match record {
        DecodedRecord::Gamestate(message) => format!("{message:#?}"),
        DecodedRecord::GetMove(message) => format!("{message:#?}"),
        DecodedRecord::GetNextMove(message) => format!("{message:#?}"),
    };
    format!("{}\n{body}", record.kind())
}

/// Renders the field table and fingerprint of a record kind.
#[must_use]
pub fn format_schema(kind: RecordKind) -> String {
    let schema = kind.schema();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (fingerprint 0x{:016x})",
        schema.name,
        schema_fingerprint(schema)
    );
    for field in &schema.fields {
        let _ = writeln!(
            out,
            "  {:>3}  {:<12} {}",
            field.id.get(),
            field.name,
            field.ty
        );
    }
    out
}
