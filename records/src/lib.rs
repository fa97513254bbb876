//! GamesmanWeb response records for the gamesman codec.
//!
//! Three schemas travel over the wire:
//!
//! | record | fields |
//! |---|---|
//! | `GamestateResponse` | 1 board, 2 remoteness, 3 value, 4 move, 5 score |
//! | `GetMoveResponse` | 1 status, 2 response (`GamestateResponse`), 3 message |
//! | `GetNextMoveResponse` | 1 status, 2 response (list of `GamestateResponse`), 3 message |
//!
//! Every field is optional. The typed structs implement [`Message`], which
//! converts them to and from the dynamic [`codec::Record`] form and wraps
//! the codec entry points.
//!
//! ```
//! use records::{GamestateResponse, Message};
//! use codec::Limits;
//!
//! let state = GamestateResponse {
//!     board: Some("X..".to_string()),
//!     remoteness: Some(3),
//!     value: Some("win".to_string()),
//!     ..GamestateResponse::default()
//! };
//! let bytes = state.encode().unwrap();
//! let (decoded, _) = GamestateResponse::decode(&bytes, &Limits::default()).unwrap();
//! assert_eq!(decoded, state);
//! ```

mod message;
mod responses;
mod schemas;

pub use message::Message;
pub use responses::{GamestateResponse, GetMoveResponse, GetNextMoveResponse};
pub use schemas::{
    gamestate_response_schema, get_move_response_schema, get_next_move_response_schema,
    RecordKind, UnknownRecordKind,
};
