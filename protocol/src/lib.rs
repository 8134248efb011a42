//! Wire types exchanged with the puzzle server.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Board rows as sent by the server, one glyph per cell.
pub type WireBoard = Vec<Vec<char>>;

/// Page the client navigates to after a score was accepted.
pub const RANKING_PATH: &str = "/ranking";

/// Reply of `/api/gamestate` and `/api/reset`.
///
/// Only the initial game state carries the glyph legend, reset replies leave both fields out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateReply {
    pub board: WireBoard,
    pub moves: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_on_char: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_off_char: Option<char>,
}

/// Reply of `/api/click/{row}/{col}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickReply {
    pub board: WireBoard,
    pub moves: u32,
    pub win: bool,
}

/// Reply of `/api/submit_score`, also sent with error statuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Body posted to `/api/submit_score`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub moves: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    GameState,
    Click(u8, u8),
    Reset,
    SubmitScore,
}

impl Endpoint {
    pub fn path(self) -> String {
        use Endpoint::*;
        match self {
            GameState => "/api/gamestate".to_string(),
            Click(row, col) => format!("/api/click/{}/{}", row, col),
            Reset => "/api/reset".to_string(),
            SubmitScore => "/api/submit_score".to_string(),
        }
    }

    pub const fn method(self) -> Method {
        match self {
            Self::SubmitScore => Method::Post,
            _ => Method::Get,
        }
    }
}
