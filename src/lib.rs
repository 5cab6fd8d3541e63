// src/lib.rs

pub mod chatter;
pub mod config;
pub mod core;
pub mod error;
pub mod learning;
pub mod persistence;

pub use crate::chatter::Chatter;
pub use crate::config::ChatterConfig;
pub use crate::core::model::{Model, ModelStats, Reply};
pub use crate::core::symbol::{Punctuation, Symbol};
pub use crate::core::tokenizer::{format, tokenize};
pub use crate::error::{ChatterError, Result};
