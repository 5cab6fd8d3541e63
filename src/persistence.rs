// File: src/persistence.rs
//! On-disk model format.
//!
//! ```text
//! u16 symbol count, then per symbol a tag byte and payload:
//!   0 Punctuation  u8 kind index
//!   1 Word         length-prefixed string
//!   2 Terminator   nothing
//!   3 Url          length-prefixed string
//! forward trie, then backward trie, each pre-order:
//!   u16 token id, u16 child count, children...
//! ```
//!
//! Integers are little-endian. Strings carry a 7-bit varint byte length
//! followed by UTF-8, matching the legacy brain files.
use crate::core::symbol::{Punctuation, Symbol};
use crate::core::symbol_table::SymbolTable;
use crate::core::trie::{TrieNode, Tries};
use crate::core::types::{Direction, TokenId, ORDER};
use crate::error::{ChatterError, Result};
use log::info;
use std::fs;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const TAG_PUNCTUATION: u8 = 0;
const TAG_WORD: u8 = 1;
const TAG_TERMINATOR: u8 = 2;
const TAG_URL: u8 = 3;

/// Deepest level a learned path can reach below a root.
const MAX_TRIE_DEPTH: usize = ORDER + 1;

/// Writes the model to `path` through a temporary file in the same
/// directory, so a failed save leaves any previous file untouched.
pub fn save_to_disk(symbols: &SymbolTable, tries: &Tries, path: &Path) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write_model(&mut writer, symbols, tries)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;

    info!("Saved {} symbols to {}", symbols.len(), path.display());
    Ok(())
}

/// Reads a whole model file. Nothing is returned unless every byte decodes.
pub fn load_from_disk(path: &Path) -> Result<(SymbolTable, Tries)> {
    let data = fs::read(path)?;
    let model = decode_model(&data)?;
    info!("Loaded {} symbols from {}", model.0.len(), path.display());
    Ok(model)
}

pub fn encode_model(symbols: &SymbolTable, tries: &Tries) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_model(&mut buf, symbols, tries)?;
    Ok(buf)
}

pub fn decode_model(mut data: &[u8]) -> Result<(SymbolTable, Tries)> {
    let symbols = read_symbols(&mut data)?;
    let forward = read_node(&mut data, 0, symbols.len())?;
    let backward = read_node(&mut data, 0, symbols.len())?;
    if !data.is_empty() {
        return Err(ChatterError::format(format!(
            "{} trailing bytes after the backward trie",
            data.len()
        )));
    }
    Ok((symbols, Tries::from_roots(forward, backward)))
}

fn write_model<W: Write>(writer: &mut W, symbols: &SymbolTable, tries: &Tries) -> Result<()> {
    write_symbols(writer, symbols)?;
    write_node(writer, tries.root(Direction::Forward))?;
    write_node(writer, tries.root(Direction::Backward))?;
    Ok(())
}

fn count_to_u16(count: usize) -> Result<u16> {
    u16::try_from(count).map_err(|_| ChatterError::CapacityExceeded {
        limit: u16::MAX as usize,
    })
}

fn write_symbols<W: Write>(writer: &mut W, symbols: &SymbolTable) -> Result<()> {
    writer.write_all(&count_to_u16(symbols.len())?.to_le_bytes())?;
    for symbol in symbols.iter() {
        match symbol {
            Symbol::Punctuation(p) => writer.write_all(&[TAG_PUNCTUATION, p.index()])?,
            Symbol::Word(word) => {
                writer.write_all(&[TAG_WORD])?;
                write_string(writer, word)?;
            }
            Symbol::Terminator => writer.write_all(&[TAG_TERMINATOR])?,
            Symbol::Url(url) => {
                writer.write_all(&[TAG_URL])?;
                write_string(writer, url)?;
            }
        }
    }
    Ok(())
}

fn write_string<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    let mut len = s.len();
    while len >= 0x80 {
        writer.write_all(&[(len as u8 & 0x7f) | 0x80])?;
        len >>= 7;
    }
    writer.write_all(&[len as u8])?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

fn write_node<W: Write>(writer: &mut W, node: &TrieNode) -> Result<()> {
    writer.write_all(&node.token().to_le_bytes())?;
    writer.write_all(&count_to_u16(node.child_count())?.to_le_bytes())?;
    for child in node.children() {
        write_node(writer, child)?;
    }
    Ok(())
}

fn read_exact(reader: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => ChatterError::format("unexpected end of file"),
        _ => ChatterError::Io(e),
    })
}

fn read_u8(reader: &mut impl Read) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact(reader, &mut buf)?;
    Ok(buf[0])
}

fn read_u16(reader: &mut impl Read) -> Result<u16> {
    let mut buf = [0u8; 2];
    read_exact(reader, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_string(reader: &mut impl Read) -> Result<String> {
    let mut len = 0usize;
    let mut shift = 0;
    loop {
        if shift >= 35 {
            return Err(ChatterError::format("string length prefix too long"));
        }
        let byte = read_u8(reader)?;
        len |= ((byte & 0x7f) as usize) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }

    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(ChatterError::format("unexpected end of file"));
    }
    String::from_utf8(bytes).map_err(|_| ChatterError::format("string is not valid UTF-8"))
}

fn read_symbol(reader: &mut impl Read) -> Result<Symbol> {
    match read_u8(reader)? {
        TAG_PUNCTUATION => {
            let idx = read_u8(reader)?;
            Punctuation::from_index(idx)
                .map(Symbol::Punctuation)
                .ok_or_else(|| ChatterError::format(format!("unknown punctuation kind {idx}")))
        }
        TAG_WORD => Ok(Symbol::Word(read_string(reader)?)),
        TAG_TERMINATOR => Ok(Symbol::Terminator),
        TAG_URL => Ok(Symbol::Url(read_string(reader)?)),
        tag => Err(ChatterError::format(format!("unknown symbol tag {tag}"))),
    }
}

fn read_symbols(reader: &mut impl Read) -> Result<SymbolTable> {
    let count = read_u16(reader)? as usize;
    let mut symbols = Vec::with_capacity(count);
    for _ in 0..count {
        symbols.push(read_symbol(reader)?);
    }
    SymbolTable::from_symbols(symbols)
}

fn read_node(reader: &mut impl Read, depth: usize, symbol_count: usize) -> Result<TrieNode> {
    let token: TokenId = read_u16(reader)?;
    if depth > 0 && token as usize >= symbol_count {
        return Err(ChatterError::format(format!(
            "token {token} is outside the symbol table"
        )));
    }

    let branch = read_u16(reader)? as usize;
    if branch > 0 && depth == MAX_TRIE_DEPTH {
        return Err(ChatterError::format("trie is deeper than any learned path"));
    }
    let mut children = Vec::with_capacity(branch);
    for _ in 0..branch {
        children.push(read_node(reader, depth + 1, symbol_count)?);
    }

    TrieNode::from_parts(token, children)
        .ok_or_else(|| ChatterError::format(format!("children of token {token} are not sorted")))
}
