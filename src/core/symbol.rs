// File: src/core/symbol.rs
use std::fmt;

const PUNCTUATION_MARKS: [char; 6] = ['.', ',', ';', ':', '!', '?'];

/// Characters besides letters and digits that may appear inside a word.
const EXTRA_WORD_CHARS: &str = "-_$#@'+=*&/";

/// One of the six punctuation marks the tokenizer recognises.
/// The discriminant is the kind index used on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Period = 0,
    Comma = 1,
    Semicolon = 2,
    Colon = 3,
    Exclamation = 4,
    Question = 5,
}

impl Punctuation {
    pub fn from_char(ch: char) -> Option<Self> {
        PUNCTUATION_MARKS
            .iter()
            .position(|&mark| mark == ch)
            .and_then(|idx| Self::from_index(idx as u8))
    }

    pub fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Punctuation::Period),
            1 => Some(Punctuation::Comma),
            2 => Some(Punctuation::Semicolon),
            3 => Some(Punctuation::Colon),
            4 => Some(Punctuation::Exclamation),
            5 => Some(Punctuation::Question),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn as_char(self) -> char {
        PUNCTUATION_MARKS[self as usize]
    }

    /// `.`, `!` and `?` end a sentence.
    pub fn is_terminating(self) -> bool {
        matches!(
            self,
            Punctuation::Period | Punctuation::Exclamation | Punctuation::Question
        )
    }
}

/// A unit of learned text. Equality and hashing are by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// An upper-cased word.
    Word(String),
    Punctuation(Punctuation),
    /// A URL, kept verbatim.
    Url(String),
    /// End of a sequence.
    Terminator,
}

impl Symbol {
    pub fn is_word_char(ch: char) -> bool {
        ch.is_alphanumeric() || EXTRA_WORD_CHARS.contains(ch)
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, Symbol::Terminator)
    }

    /// True for punctuation that ends a sentence.
    pub fn is_terminating_punctuation(&self) -> bool {
        matches!(self, Symbol::Punctuation(p) if p.is_terminating())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Word(word) => f.write_str(word),
            Symbol::Punctuation(p) => write!(f, "{}", p.as_char()),
            Symbol::Url(url) => f.write_str(url),
            Symbol::Terminator => Ok(()),
        }
    }
}
