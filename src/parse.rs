//! C3 (line parser) + C4 (entry collector).
//!
//! Grounded on `original_source/rtic.cpp`: `parseLine`/`addFlag`/
//! `addNumber`/`addString`/`addDisable` for C3, and `main`'s header-line
//! handling for C4.

use std::io::{BufRead, Write};

use crate::cap::Cap;
use crate::decode::decode_string;
use crate::dictionary::{self, CapKind};
use crate::diagnostics::Diagnostics;
use crate::entry::{CompilerState, Entry};

/// Split a continuation line into tokens at commas that are not escaped.
///
/// A comma is escaped iff the number of `^`/`\` characters seen since the
/// last character that was neither is odd (spec.md §4.3 step 1);
/// equivalently, toggle a boolean on every `^` or `\` and clear it on
/// anything else, splitting only when the toggle is false.
fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut escaped = false;
    let mut start = 0usize;
    let chars: Vec<char> = line.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '^' | '\\' => escaped = !escaped,
            ',' if !escaped => {
                push_token(&mut tokens, &chars[start..i]);
                start = i + 1;
            }
            _ => escaped = false,
        }
    }
    push_token(&mut tokens, &chars[start..]);
    tokens
}

fn push_token(tokens: &mut Vec<String>, chars: &[char]) {
    let token: String = chars.iter().collect();
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return;
    }
    if trimmed.starts_with('.') {
        return;
    }
    tokens.push(trimmed.to_string());
}

enum TokenKind {
    Flag,
    Number { offset: usize },
    String { offset: usize },
    Disable { offset: usize },
}

/// Classify a token by the first occurrence of `#`, `=`, or `@`.
fn classify(token: &str) -> TokenKind {
    for (i, ch) in token.char_indices() {
        match ch {
            '#' => return TokenKind::Number { offset: i + 1 },
            '=' => return TokenKind::String { offset: i + 1 },
            '@' => return TokenKind::Disable { offset: i },
            _ => {}
        }
    }
    TokenKind::Flag
}

/// Parse a leading signed decimal integer with C `atoi` semantics:
/// optional sign, decimal digits, stop at the first non-digit.
fn atoi(text: &str) -> i16 {
    let bytes = text.as_bytes();
    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value * 10 + i64::from(bytes[i] - b'0');
        i += 1;
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

fn add_flag(entry: &mut Entry, name: &str) {
    let cap = match dictionary::lookup_kind(name, CapKind::Flag) {
        Some(index) => Cap::flag(index),
        None => Cap::extended_flag(),
    };
    entry.insert_first_wins(name.to_string(), cap);
}

fn add_number(entry: &mut Entry, token: &str, offset: usize) {
    let name = &token[..offset - 1];
    let value = atoi(&token[offset..]);
    let cap = match dictionary::lookup_kind(name, CapKind::Number) {
        Some(index) => Cap::number(value, index),
        None => Cap::extended_number(value),
    };
    entry.insert_first_wins(name.to_string(), cap);
}

fn add_string<W: Write>(entry: &mut Entry, token: &str, offset: usize, line: usize, diag: &mut Diagnostics<W>) {
    let name = &token[..offset - 1];
    if name == "use" {
        entry.uses.push(token[offset..].to_string());
        return;
    }
    let data = decode_string(&token[offset..], line, diag);
    let cap = match dictionary::lookup_kind(name, CapKind::String) {
        Some(index) => Cap::string(data, index),
        None => Cap::extended_string(data),
    };
    entry.insert_first_wins(name.to_string(), cap);
}

fn add_disable(entry: &mut Entry, token: &str, offset: usize) {
    let name = &token[..offset];
    let cap = match dictionary::lookup(name) {
        Some((CapKind::Flag, index)) => Cap::disabled_flag(index),
        Some((CapKind::Number, index)) => Cap::disabled_number(index),
        Some((CapKind::String, index)) => Cap::disabled_string(index),
        None => Cap::disabled_extended_flag(),
    };
    entry.insert_first_wins(name.to_string(), cap);
}

/// Parse one (already trimmed) continuation line into `entry` (C3).
pub fn parse_line<W: Write>(entry: &mut Entry, line: &str, line_no: usize, diag: &mut Diagnostics<W>) {
    for token in split_tokens(line) {
        match classify(&token) {
            TokenKind::Flag => add_flag(entry, &token),
            TokenKind::Number { offset } => add_number(entry, &token, offset),
            TokenKind::String { offset } => add_string(entry, &token, offset, line_no, diag),
            TokenKind::Disable { offset } => add_disable(entry, &token, offset),
        }
    }
}

/// Strip a single trailing `,` if present, otherwise return the line
/// unchanged. See DESIGN.md's Open Question (b): the original drops the
/// final character unconditionally, which loses a byte of the long name
/// when the header is missing its trailing comma; this crate does not
/// reproduce that bug.
fn strip_trailing_comma(line: &str) -> &str {
    line.strip_suffix(',').unwrap_or(line)
}

/// Consume the entire terminfo source stream into `state` (C4).
pub fn parse_source<R: BufRead, W: Write>(
    reader: R,
    state: &mut CompilerState,
    diag: &mut Diagnostics<W>,
) {
    let mut current: Option<String> = None;

    for (line_no, raw_line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let Ok(line) = raw_line else { break };

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with(|c: char| c.is_whitespace()) {
            match current.as_ref().and_then(|name| state.entries.get_mut(name)) {
                Some(entry) => parse_line(entry, line.trim(), line_no, diag),
                None => diag.orphaned_line(line_no),
            }
            continue;
        }

        // New entry header.
        let pipe_pos = line.find('|');
        let name_end = pipe_pos.unwrap_or_else(|| line.len().saturating_sub(1));
        let primary = line[..name_end].to_string();

        if state.entries.contains_key(&primary) {
            diag.duplicate_entry(line_no, &primary);
            current = None;
            continue;
        }

        let entry = Entry {
            names: strip_trailing_comma(&line).to_string(),
            ..Entry::default()
        };

        if let Some(first_pipe) = pipe_pos {
            let mut pos = first_pipe;
            while let Some(rel_end) = line[pos + 1..].find('|') {
                let end = pos + 1 + rel_end;
                state
                    .aliases
                    .insert(line[pos + 1..end].to_string(), primary.clone());
                pos = end;
            }
            // The final substring after the last `|` (the long name) is
            // registered too (spec.md §9 Open Question (a), preserved).
            let tail = strip_trailing_comma(&line[pos + 1..]);
            state.aliases.insert(tail.to_string(), primary.clone());
        }

        state.entries.insert(primary.clone(), entry);
        current = Some(primary);
    }
}
