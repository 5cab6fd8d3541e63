use crate::core::symbol::Symbol;
use crate::core::symbol_table::SymbolTable;
use crate::core::tokenizer::{format, tokenize};
use crate::core::trie::Tries;
use crate::core::types::{Direction, TokenId, HARD_CUTOFF, ORDER, SOFT_CUTOFF};
use crate::error::Result;
use crate::learning::LearningEngine;
use crate::persistence::{load_from_disk, save_to_disk};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Size figures for a model, as reported to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    /// Distinct symbols ever seen.
    pub symbols: usize,
    /// Distinct `ORDER`-token contexts in the forward trie.
    pub tuples: usize,
    /// Forward-trie nodes, root included.
    pub nodes: usize,
    /// Estimated forward-trie footprint in bytes.
    pub bytes: usize,
}

/// A generated reply together with the input it answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub input: Vec<Symbol>,
    pub symbols: Vec<Symbol>,
}

impl Reply {
    pub fn text(&self) -> String {
        format(&self.symbols)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True if the reply says exactly what the input did.
    pub fn echoes_input(&self) -> bool {
        let said = self.input.iter().filter(|sym| !sym.is_terminator());
        !self.symbols.is_empty() && self.symbols.iter().eq(said)
    }
}

/// The order-2 conversation model: a symbol table and two tries.
///
/// All randomness comes from the owned `R`, so a fixed generator gives
/// reproducible replies.
pub struct Model<R = StdRng> {
    symbols: SymbolTable,
    tries: Tries,
    learner: LearningEngine,
    rng: R,
}

impl Model<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reads a model saved with [`Model::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let (symbols, tries) = load_from_disk(path.as_ref())?;
        Ok(Self::from_parts(symbols, tries, StdRng::from_entropy()))
    }

    /// Loads `path` if it exists, otherwise starts empty.
    pub fn from_file_or_new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No brain at {}, starting empty", path.display());
            Ok(Self::new())
        }
    }
}

impl Default for Model<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Model<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::from_parts(SymbolTable::new(), Tries::new(), rng)
    }

    pub fn from_parts(symbols: SymbolTable, tries: Tries, rng: R) -> Self {
        Self {
            symbols,
            tries,
            learner: LearningEngine::new(ORDER),
            rng,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn tries(&self) -> &Tries {
        &self.tries
    }

    /// Forgets everything learned so far.
    pub fn clear(&mut self) {
        self.symbols = SymbolTable::new();
        self.tries = Tries::new();
    }

    fn intern_text(&mut self, text: &str) -> Result<Vec<TokenId>> {
        tokenize(text).map(|sym| self.symbols.intern(sym)).collect()
    }

    fn learn_tokens(&mut self, tokens: &[TokenId]) -> Result<()> {
        if tokens.len() < self.learner.order() + 1 {
            return Ok(());
        }
        let terminator = self.symbols.intern(Symbol::Terminator)?;
        self.learner.learn(&mut self.tries, tokens, terminator);
        Ok(())
    }

    pub fn learn(&mut self, text: &str) -> Result<()> {
        let tokens = self.intern_text(text)?;
        debug!("learning {} tokens", tokens.len());
        self.learn_tokens(&tokens)
    }

    /// Learns every line of `reader`, returning how many were read.
    pub fn train_reader(&mut self, reader: impl BufRead) -> Result<usize> {
        let mut lines = 0;
        for line in reader.lines() {
            self.learn(&line?)?;
            lines += 1;
        }
        Ok(lines)
    }

    pub fn train_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let lines = self.train_reader(BufReader::new(File::open(path)?))?;
        info!("Trained on {} lines from {}", lines, path.display());
        Ok(lines)
    }

    /// Generates a reply to `text`, then learns `text`.
    pub fn query(&mut self, text: &str) -> Result<String> {
        Ok(self.reply_to(text)?.text())
    }

    /// Like [`query`](Self::query) but returns the symbols on both sides.
    pub fn reply_to(&mut self, text: &str) -> Result<Reply> {
        let tokens = self.intern_text(text)?;
        let mut reply = self.generate(&tokens);
        if !reply.is_empty() {
            reply.push(self.symbols.intern(Symbol::Terminator)?);
        }
        debug!("query of {} tokens produced {} tokens", tokens.len(), reply.len());
        self.learn_tokens(&tokens)?;

        let resolve = |ids: &[TokenId]| -> Result<Vec<Symbol>> {
            ids.iter()
                .map(|&id| self.symbols.symbol_of(id).cloned())
                .filter(|sym| !matches!(sym, Ok(Symbol::Terminator)))
                .collect()
        };
        Ok(Reply {
            input: resolve(&tokens)?,
            symbols: resolve(&reply)?,
        })
    }

    fn is_terminator(&self, token: TokenId) -> bool {
        matches!(self.symbols.symbol_of(token), Ok(Symbol::Terminator))
    }

    fn is_sentence_end(&self, token: TokenId) -> bool {
        matches!(self.symbols.symbol_of(token), Ok(sym) if sym.is_terminating_punctuation())
    }

    fn pick_next(&mut self, direction: Direction, context: &[TokenId]) -> Option<TokenId> {
        let node = self.tries.find(direction, context)?;
        node.pick_random_child(&mut self.rng).map(|child| child.token())
    }

    /// Seed, then grow backwards, then forwards. Returns no terminator.
    fn generate(&mut self, tokens: &[TokenId]) -> Vec<TokenId> {
        let mut reply = self.seed(tokens);
        if reply.is_empty() {
            return reply;
        }

        while reply.len() < HARD_CUTOFF {
            let o = ORDER.min(reply.len());
            let context: Vec<TokenId> = reply[..o].iter().rev().copied().collect();
            let Some(token) = self.pick_next(Direction::Backward, &context) else {
                break;
            };
            if self.is_terminator(token) || self.is_sentence_end(token) {
                break;
            }
            reply.insert(0, token);
        }

        while reply.len() < HARD_CUTOFF {
            let o = ORDER.min(reply.len());
            let context = reply[reply.len() - o..].to_vec();
            let Some(token) = self.pick_next(Direction::Forward, &context) else {
                break;
            };
            if self.is_terminator(token) {
                break;
            }
            reply.push(token);
            if reply.len() >= SOFT_CUTOFF && self.is_sentence_end(token) {
                break;
            }
        }
        reply
    }

    /// The first window of `tokens` the forward trie knows, trying a random
    /// order first and shrinking; otherwise any token that starts a path.
    fn seed(&mut self, tokens: &[TokenId]) -> Vec<TokenId> {
        let try_order = self.rng.gen_range(1..=ORDER);
        for o in (1..=try_order).rev() {
            let known = tokens
                .windows(o)
                .find(|window| self.tries.find(Direction::Forward, window).is_some());
            if let Some(window) = known {
                return window.to_vec();
            }
        }
        self.pick_next(Direction::Forward, &[]).into_iter().collect()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn tuple_count(&self) -> usize {
        self.tries
            .root(Direction::Forward)
            .count_nodes_at_depth(ORDER)
    }

    pub fn node_count(&self) -> usize {
        self.tries.root(Direction::Forward).count_all_nodes()
    }

    pub fn bytes_used(&self) -> usize {
        self.tries.root(Direction::Forward).estimate_bytes()
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            symbols: self.symbol_count(),
            tuples: self.tuple_count(),
            nodes: self.node_count(),
            bytes: self.bytes_used(),
        }
    }

    /// Writes the model to `path`.
    ///
    /// The file stores the symbol count as a `u16`, so a table holding all
    /// 65,536 ids cannot be saved and fails with `CapacityExceeded`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save_to_disk(&self.symbols, &self.tries, path.as_ref())
    }
}
