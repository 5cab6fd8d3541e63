// File: src/core/tokenizer.rs
use crate::core::symbol::{Punctuation, Symbol};
use std::iter::Peekable;
use std::str::Chars;

/// Splits raw text into symbols. See [`Tokens`] for the rules.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens::new(text)
}

/// A single-pass stream of symbols over some text.
///
/// Word characters accumulate into upper-cased `Word`s, punctuation marks
/// become `Punctuation`, a run of `http:`/`https:` becomes a verbatim `Url`
/// up to the next whitespace, and anything else separates words. The stream
/// always ends with a `Terminator`, except for empty input which yields
/// nothing at all.
pub struct Tokens<'a> {
    chars: Peekable<Chars<'a>>,
    buf: String,
    pending: Option<Symbol>,
    done: bool,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            buf: String::new(),
            pending: None,
            done: text.is_empty(),
        }
    }

    fn take_word(&mut self) -> Symbol {
        let word = self.buf.to_uppercase();
        self.buf.clear();
        Symbol::Word(word)
    }

    fn take_url(&mut self, colon: char) -> Symbol {
        let mut url = std::mem::take(&mut self.buf);
        url.push(colon);
        while let Some(&next_c) = self.chars.peek() {
            if next_c.is_whitespace() {
                break;
            }
            url.push(next_c);
            self.chars.next();
        }
        Symbol::Url(url)
    }
}

impl Iterator for Tokens<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if let Some(sym) = self.pending.take() {
            return Some(sym);
        }
        if self.done {
            return None;
        }

        while let Some(c) = self.chars.next() {
            if Symbol::is_word_char(c) {
                self.buf.push(c);
                continue;
            }

            if !self.buf.is_empty() {
                if c == ':' && (self.buf == "http" || self.buf == "https") {
                    return Some(self.take_url(c));
                }
                // The separator itself may still be a punctuation mark.
                self.pending = Punctuation::from_char(c).map(Symbol::Punctuation);
                return Some(self.take_word());
            }

            if let Some(p) = Punctuation::from_char(c) {
                return Some(Symbol::Punctuation(p));
            }
        }

        if !self.buf.is_empty() {
            self.pending = Some(Symbol::Terminator);
            self.done = true;
            return Some(self.take_word());
        }
        self.done = true;
        Some(Symbol::Terminator)
    }
}

/// Renders symbols back into text, stopping at the first `Terminator`.
///
/// Words are lower-cased and the first word of each sentence capitalised.
/// Punctuation attaches to the previous token; URLs pass through untouched.
pub fn format<'s, I>(symbols: I) -> String
where
    I: IntoIterator<Item = &'s Symbol>,
{
    let mut result = String::new();
    let mut begin_sentence = true;

    for sym in symbols {
        match sym {
            Symbol::Terminator => break,
            Symbol::Punctuation(_) => {}
            _ if !result.is_empty() => result.push(' '),
            _ => {}
        }

        if let Symbol::Url(url) = sym {
            result.push_str(url);
            begin_sentence = false;
            continue;
        }

        let text = sym.to_string().to_lowercase();
        if begin_sentence {
            let mut chars = text.chars();
            if let Some(first) = chars.next() {
                result.extend(first.to_uppercase());
                result.push_str(chars.as_str());
            }
            begin_sentence = false;
        } else {
            result.push_str(&text);
        }

        if sym.is_terminating_punctuation() {
            begin_sentence = true;
        }
    }
    result
}
