use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure of a single round-trip to the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Status {
        status: u16,
        /// Server-provided message when the error body could still be read.
        detail: Option<String>,
    },
    #[error("malformed reply (status {status}): {reason}")]
    Decode { status: u16, reason: String },
}

impl ApiError {
    /// HTTP status of the failed reply, `0` when no reply arrived.
    pub fn status(&self) -> u16 {
        match self {
            Self::Network(_) => 0,
            Self::Status { status, .. } | Self::Decode { status, .. } => *status,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Board state is not initialized or empty.")]
    EmptyBoard,
    #[error("Board shape does not match the grid size")]
    ShapeMismatch,
}
