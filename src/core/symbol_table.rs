// File: src/core/symbol_table.rs
use crate::core::symbol::Symbol;
use crate::core::types::{TokenId, MAX_SYMBOLS};
use crate::error::{ChatterError, Result};
use std::collections::HashMap;

/// Append-only bijection between symbols and token ids.
/// Ids are handed out in first-seen order starting at 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    store: Vec<Symbol>,
    lookup: HashMap<Symbol, TokenId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `symbol`, assigning the next free one if unseen.
    pub fn intern(&mut self, symbol: Symbol) -> Result<TokenId> {
        if let Some(&id) = self.lookup.get(&symbol) {
            return Ok(id);
        }
        if self.store.len() >= MAX_SYMBOLS {
            return Err(ChatterError::CapacityExceeded { limit: MAX_SYMBOLS });
        }
        let id = self.store.len() as TokenId;
        self.lookup.insert(symbol.clone(), id);
        self.store.push(symbol);
        Ok(id)
    }

    pub fn symbol_of(&self, id: TokenId) -> Result<&Symbol> {
        self.store
            .get(id as usize)
            .ok_or(ChatterError::InvalidId(id))
    }

    pub fn id_of(&self, symbol: &Symbol) -> Result<TokenId> {
        self.lookup
            .get(symbol)
            .copied()
            .ok_or_else(|| ChatterError::UnknownSymbol(symbol.clone()))
    }

    /// Like [`id_of`](Self::id_of) but without the error.
    pub fn get(&self, symbol: &Symbol) -> Option<TokenId> {
        self.lookup.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Symbols in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.store.iter()
    }

    /// Rebuilds a table from symbols listed in id order.
    /// Fails if a symbol repeats, since ids would no longer be a bijection.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Result<Self> {
        let mut table = Self::new();
        for symbol in symbols {
            let expected = table.len();
            let id = table.intern(symbol)?;
            if id as usize != expected {
                return Err(ChatterError::format(format!(
                    "duplicate symbol table entry at index {expected}"
                )));
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_assigns_sequential_ids() {
        let mut table = SymbolTable::new();
        assert_eq!(table.intern(Symbol::Word("A".into())).unwrap(), 0);
        assert_eq!(table.intern(Symbol::Terminator).unwrap(), 1);
        assert_eq!(table.intern(Symbol::Word("A".into())).unwrap(), 0);
        assert_eq!(table.intern(Symbol::Terminator).unwrap(), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_lookups_both_ways() {
        let mut table = SymbolTable::new();
        let id = table.intern(Symbol::Url("http://x".into())).unwrap();
        assert_eq!(table.symbol_of(id).unwrap(), &Symbol::Url("http://x".into()));
        assert_eq!(table.id_of(&Symbol::Url("http://x".into())).unwrap(), id);
        assert!(matches!(table.symbol_of(7), Err(ChatterError::InvalidId(7))));
        assert!(matches!(
            table.id_of(&Symbol::Terminator),
            Err(ChatterError::UnknownSymbol(Symbol::Terminator))
        ));
    }

    #[test]
    fn test_capacity_boundary() {
        let mut table = SymbolTable::new();
        for i in 0..MAX_SYMBOLS - 1 {
            table.intern(Symbol::Word(i.to_string())).unwrap();
        }
        // The 65,536th distinct symbol still fits.
        let last = table.intern(Symbol::Word("LAST".into())).unwrap();
        assert_eq!(last, TokenId::MAX);
        assert_eq!(table.len(), MAX_SYMBOLS);

        let overflow = table.intern(Symbol::Word("ONE MORE".into()));
        assert!(matches!(overflow, Err(ChatterError::CapacityExceeded { .. })));
        // Known symbols still resolve once full.
        assert_eq!(table.intern(Symbol::Word("LAST".into())).unwrap(), TokenId::MAX);
    }

    #[test]
    fn test_from_symbols_rejects_duplicates() {
        let table = SymbolTable::from_symbols(vec![Symbol::Terminator, Symbol::Word("X".into())]).unwrap();
        assert_eq!(table.id_of(&Symbol::Word("X".into())).unwrap(), 1);

        let dup = SymbolTable::from_symbols(vec![Symbol::Terminator, Symbol::Terminator]);
        assert!(matches!(dup, Err(ChatterError::Format(_))));
    }
}
