// src/core/mod.rs

pub mod model;
pub mod symbol;
pub mod symbol_table;
pub mod tokenizer;
pub mod trie;
pub mod types;
