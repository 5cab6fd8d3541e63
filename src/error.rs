// File: src/error.rs
use crate::core::symbol::Symbol;
use crate::core::types::TokenId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatterError {
    #[error("Capacity exceeded: at most {limit} entries fit a 16-bit id space")]
    CapacityExceeded { limit: usize },

    #[error("Invalid token id: {0}")]
    InvalidId(TokenId),

    #[error("Symbol was never interned: {0:?}")]
    UnknownSymbol(Symbol),

    #[error("Malformed model file: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl ChatterError {
    pub fn format(message: impl Into<String>) -> Self {
        ChatterError::Format(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ChatterError>;
