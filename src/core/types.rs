// src/core/types.rs

/// A compact identifier for an interned symbol.
pub type TokenId = u16;

/// Number of distinct ids a `TokenId` can address.
pub const MAX_SYMBOLS: usize = TokenId::MAX as usize + 1;

/// Context length used for lookups. Learned paths are `ORDER + 1` long.
pub const ORDER: usize = 2;

/// Once a reply is this long, forward generation may stop at a sentence end.
pub const SOFT_CUTOFF: usize = 25;

/// A reply never grows beyond this many tokens.
pub const HARD_CUTOFF: usize = 100;

/// Selects which of the two tries an operation walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// "Given the last tokens, what follows."
    Forward,
    /// "Given the first tokens read backwards, what precedes."
    Backward,
}
