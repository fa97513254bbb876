//! Typed GamesmanWeb response records.

use codec::{CodecResult, Record, Value};
use schema::RecordSchema;

use crate::message::{set_opt, Fields, Message};
use crate::schemas::{
    gamestate_response_schema, get_move_response_schema, get_next_move_response_schema,
};

/// A single game position and its solved value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GamestateResponse {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub board: Option<String>,
    /// Moves to the end of the game under perfect play.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub remoteness: Option<i32>,
    /// Game-theoretic value, e.g. "win", "lose", "tie".
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    /// The move leading to this position.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub r#move: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub score: Option<i32>,
}

impl Message for GamestateResponse {
    fn schema() -> &'static RecordSchema {
        gamestate_response_schema()
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        set_opt(&mut record, "board", self.board.clone());
        set_opt(&mut record, "remoteness", self.remoteness);
        set_opt(&mut record, "value", self.value.clone());
        set_opt(&mut record, "move", self.r#move.clone());
        set_opt(&mut record, "score", self.score);
        record
    }

    fn from_record(record: &Record) -> CodecResult<Self> {
        let fields = Fields::new(Self::schema(), record)?;
        Ok(Self {
            board: fields.string("board")?,
            remoteness: fields.i32("remoteness")?,
            value: fields.string("value")?,
            r#move: fields.string("move")?,
            score: fields.i32("score")?,
        })
    }
}

/// Reply to a query about one position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GetMoveResponse {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub status: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub response: Option<GamestateResponse>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
}

impl Message for GetMoveResponse {
    fn schema() -> &'static RecordSchema {
        get_move_response_schema()
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        set_opt(&mut record, "status", self.status.clone());
        set_opt(
            &mut record,
            "response",
            self.response.as_ref().map(Message::to_record),
        );
        set_opt(&mut record, "message", self.message.clone());
        record
    }

    fn from_record(record: &Record) -> CodecResult<Self> {
        let fields = Fields::new(Self::schema(), record)?;
        Ok(Self {
            status: fields.string("status")?,
            response: fields.message("response")?,
            message: fields.string("message")?,
        })
    }
}

/// Reply listing the positions reachable in one move.
///
/// An empty `response` list and an absent one are distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GetNextMoveResponse {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub status: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub response: Option<Vec<GamestateResponse>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
}

impl Message for GetNextMoveResponse {
    fn schema() -> &'static RecordSchema {
        get_next_move_response_schema()
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        set_opt(&mut record, "status", self.status.clone());
        set_opt(
            &mut record,
            "response",
            self.response.as_ref().map(|items| {
                Value::List(
                    items
                        .iter()
                        .map(|item| Value::Struct(item.to_record()))
                        .collect(),
                )
            }),
        );
        set_opt(&mut record, "message", self.message.clone());
        record
    }

    fn from_record(record: &Record) -> CodecResult<Self> {
        let fields = Fields::new(Self::schema(), record)?;
        Ok(Self {
            status: fields.string("status")?,
            response: fields.message_list("response")?,
            message: fields.string("message")?,
        })
    }
}
