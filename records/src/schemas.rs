//! The GamesmanWeb response schemas.
//!
//! Each schema is built once and shared; `GetMoveResponse` and
//! `GetNextMoveResponse` nest the same `GamestateResponse` schema.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use schema::{FieldType, RecordSchema};

const FIELD_BOARD: u16 = 1;
const FIELD_REMOTENESS: u16 = 2;
const FIELD_VALUE: u16 = 3;
const FIELD_MOVE: u16 = 4;
const FIELD_SCORE: u16 = 5;

const FIELD_STATUS: u16 = 1;
const FIELD_RESPONSE: u16 = 2;
const FIELD_MESSAGE: u16 = 3;

/// Schema of a single game position as reported by the server.
pub fn gamestate_response_schema() -> &'static Arc<RecordSchema> {
    static SCHEMA: OnceLock<Arc<RecordSchema>> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        RecordSchema::builder("GamestateResponse")
            .field(FIELD_BOARD, "board", FieldType::String)
            .field(FIELD_REMOTENESS, "remoteness", FieldType::I32)
            .field(FIELD_VALUE, "value", FieldType::String)
            .field(FIELD_MOVE, "move", FieldType::String)
            .field(FIELD_SCORE, "score", FieldType::I32)
            .build_shared()
            .expect("GamestateResponse schema must be valid")
    })
}

/// Schema of the reply to a single-position query.
pub fn get_move_response_schema() -> &'static Arc<RecordSchema> {
    static SCHEMA: OnceLock<Arc<RecordSchema>> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        RecordSchema::builder("GetMoveResponse")
            .field(FIELD_STATUS, "status", FieldType::String)
            .field(
                FIELD_RESPONSE,
                "response",
                FieldType::structure(Arc::clone(gamestate_response_schema())),
            )
            .field(FIELD_MESSAGE, "message", FieldType::String)
            .build_shared()
            .expect("GetMoveResponse schema must be valid")
    })
}

/// Schema of the reply listing every move available from a position.
pub fn get_next_move_response_schema() -> &'static Arc<RecordSchema> {
    static SCHEMA: OnceLock<Arc<RecordSchema>> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        RecordSchema::builder("GetNextMoveResponse")
            .field(FIELD_STATUS, "status", FieldType::String)
            .field(
                FIELD_RESPONSE,
                "response",
                FieldType::list(FieldType::structure(Arc::clone(
                    gamestate_response_schema(),
                ))),
            )
            .field(FIELD_MESSAGE, "message", FieldType::String)
            .build_shared()
            .expect("GetNextMoveResponse schema must be valid")
    })
}

/// Identifies one of the GamesmanWeb record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    GamestateResponse,
    GetMoveResponse,
    GetNextMoveResponse,
}

impl RecordKind {
    pub const ALL: [Self; 3] = [
        Self::GamestateResponse,
        Self::GetMoveResponse,
        Self::GetNextMoveResponse,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GamestateResponse => "GamestateResponse",
            Self::GetMoveResponse => "GetMoveResponse",
            Self::GetNextMoveResponse => "GetNextMoveResponse",
        }
    }

    #[must_use]
    pub fn schema(self) -> &'static Arc<RecordSchema> {
        match self {
            Self::GamestateResponse => gamestate_response_schema(),
            Self::GetMoveResponse => get_move_response_schema(),
            Self::GetNextMoveResponse => get_next_move_response_schema(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized record kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRecordKind(pub String);

impl fmt::Display for UnknownRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown record kind {:?}", self.0)
    }
}

impl std::error::Error for UnknownRecordKind {}

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    /// Accepts the record name in any case, with or without a `Response`
    /// suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace(['-', '_'], "");
        let normalized = normalized
            .strip_suffix("response")
            .unwrap_or(normalized.as_str());
        match normalized {
            "gamestate" => Ok(Self::GamestateResponse),
            "getmove" => Ok(Self::GetMoveResponse),
            "getnextmove" => Ok(Self::GetNextMoveResponse),
            _ => Err(UnknownRecordKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::schema_fingerprint;

    #[test]
    fn schemas_are_built_once() {
        assert!(Arc::ptr_eq(
            gamestate_response_schema(),
            gamestate_response_schema()
        ));
    }

    #[test]
    fn nested_schemas_share_gamestate() {
        let Some(FieldType::Struct(inner)) = get_move_response_schema()
            .field_by_name("response")
            .map(|field| &field.ty)
        else {
            panic!("response must be a struct field");
        };
        assert!(Arc::ptr_eq(inner, gamestate_response_schema()));

        let response = get_next_move_response_schema()
            .field_by_id(FIELD_RESPONSE)
            .unwrap();
        assert_eq!(response.ty.to_string(), "list<GamestateResponse>");
    }

    #[test]
    fn gamestate_field_table() {
        let fields: Vec<(u16, &str)> = gamestate_response_schema()
            .fields
            .iter()
            .map(|field| (field.id.get(), field.name.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                (1, "board"),
                (2, "remoteness"),
                (3, "value"),
                (4, "move"),
                (5, "score")
            ]
        );
    }

    #[test]
    fn fingerprints_distinguish_kinds() {
        let prints: Vec<u64> = RecordKind::ALL
            .iter()
            .map(|kind| schema_fingerprint(kind.schema()))
            .collect();
        assert_ne!(prints[0], prints[1]);
        assert_ne!(prints[1], prints[2]);
        assert_ne!(prints[0], prints[2]);
    }

    #[test]
    fn record_kind_parsing() {
        assert_eq!(
            "GamestateResponse".parse::<RecordKind>(),
            Ok(RecordKind::GamestateResponse)
        );
        assert_eq!(
            "get-move".parse::<RecordKind>(),
            Ok(RecordKind::GetMoveResponse)
        );
        assert_eq!(
            "get_next_move_response".parse::<RecordKind>(),
            Ok(RecordKind::GetNextMoveResponse)
        );
        assert!("scoreboard".parse::<RecordKind>().is_err());
    }

    #[test]
    fn record_kind_names_match_schemas() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.schema().name, kind.name());
            assert_eq!(kind.to_string().parse::<RecordKind>(), Ok(kind));
        }
    }
}
