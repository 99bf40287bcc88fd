//! C2: the string-value escape/control/octal sublanguage.
//!
//! Ported byte-for-byte from `original_source/rtic.cpp::parseString`: a
//! `%{N}` numeric-literal pre-pass followed by a four-state machine over
//! the remaining bytes. See spec.md §4.2 for the transition table this
//! mirrors exactly.

use crate::diagnostics::Diagnostics;
use std::io::Write;

/// `a→0x07, b→0x08, E→0x1B, e→0x1B, f→0x0C, l→0x0A, n→0x0A, r→0x0D,
/// s→0x20, t→0x09, ^→0x5E, \→0x5C, ,→0x2C, :→0x3A`.
fn escape(ch: u8) -> Option<u8> {
    Some(match ch {
        b'a' => 0x07,
        b'b' => 0x08,
        b'E' | b'e' => 0x1B,
        b'f' => 0x0C,
        b'l' | b'n' => 0x0A,
        b'r' => 0x0D,
        b's' => 0x20,
        b't' => 0x09,
        b'^' => b'^',
        b'\\' => b'\\',
        b',' => b',',
        b':' => b':',
        _ => return None,
    })
}

/// Rewrite every `%{N}` where `N` is a printable, non-backslash ASCII
/// code point into `%'c'`. Restarts the scan from the beginning after
/// each rewrite, since a replacement can only ever shrink the string and
/// cannot introduce a new `%{`, but matching the original's restart
/// keeps behavior identical for adjacent/overlapping occurrences.
fn rewrite_numeric_literals(src: &str) -> String {
    let mut s = src.to_string();
    let mut pos = 0;
    while let Some(start) = s[pos..].find("%{").map(|i| i + pos) {
        let digits_start = start + 2;
        let digits_end = s[digits_start..]
            .find(|c: char| !c.is_ascii_digit())
            .map(|i| digits_start + i)
            .unwrap_or(s.len());
        let has_digits = digits_end > digits_start;
        let closes = has_digits && s.as_bytes().get(digits_end) == Some(&b'}');

        if closes {
            let n: Result<u32, _> = s[digits_start..digits_end].parse();
            if let Ok(n) = n {
                if n > 0x20 && n < 0x7F && n != u32::from(b'\\') {
                    let c = n as u8 as char;
                    let replacement = format!("%'{c}'");
                    s.replace_range(start..=digits_end, &replacement);
                    pos = 0;
                    continue;
                }
            }
        }
        pos = start + 2;
    }
    s
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Escaped,
    Control,
    Number,
}

/// Decode a string capability's source text (the bytes after `=`) into
/// its compiled byte sequence, terminator included.
pub fn decode_string<W: Write>(src: &str, line: usize, diag: &mut Diagnostics<W>) -> Vec<u8> {
    let rewritten = rewrite_numeric_literals(src);
    let mut out = Vec::with_capacity(rewritten.len() + 1);
    let mut state = State::Default;
    let mut accumulator: u32 = 0;
    let mut count = 0u8;

    // The original accumulates into an 8-bit `unsigned char`, so the
    // zero-replacement check is on the value mod 256, not the untruncated
    // accumulator: `\400` wraps to 0 there and must take the same
    // substitution as `\000`.
    let flush_octal = |out: &mut Vec<u8>, accumulator: u32| {
        let byte = (accumulator & 0xFF) as u8;
        out.push(if byte == 0 { 0x80 } else { byte });
    };

    for &b in rewritten.as_bytes() {
        match state {
            State::Default => match b {
                b'\\' => state = State::Escaped,
                b'^' => state = State::Control,
                _ => out.push(b),
            },
            State::Escaped => {
                if b.is_ascii_digit() {
                    accumulator = u32::from(b - b'0');
                    count = 1;
                    state = State::Number;
                } else if let Some(mapped) = escape(b) {
                    out.push(mapped);
                    state = State::Default;
                } else {
                    diag.unknown_escape(line, b as char);
                    out.push(b);
                    state = State::Default;
                }
            }
            State::Control => {
                if (b'A'..=b'_').contains(&b) {
                    out.push(b - b'@');
                } else {
                    out.push(b'^');
                    out.push(b);
                }
                state = State::Default;
            }
            State::Number => {
                if b.is_ascii_digit() && count <= 2 {
                    accumulator = accumulator * 8 + u32::from(b - b'0');
                    count += 1;
                } else {
                    flush_octal(&mut out, accumulator);
                    state = State::Default;
                    match b {
                        b'\\' => state = State::Escaped,
                        b'^' => state = State::Control,
                        _ => out.push(b),
                    }
                }
            }
        }
    }

    if state == State::Number {
        flush_octal(&mut out, accumulator);
    }

    out.push(0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(src: &str) -> Vec<u8> {
        let mut sink = Vec::new();
        let mut diag = Diagnostics::new(&mut sink);
        decode_string(src, 1, &mut diag)
    }

    #[test]
    fn escape_e_is_esc() {
        assert_eq!(decode("\\E"), vec![0x1B, 0x00]);
    }

    #[test]
    fn control_m_is_cr() {
        assert_eq!(decode("^M"), vec![0x0D, 0x00]);
    }

    #[test]
    fn octal_nonzero_roundtrips() {
        assert_eq!(decode("\\200"), vec![0x80, 0x00]);
    }

    #[test]
    fn octal_zero_is_promoted_to_0x80() {
        assert_eq!(decode("\\000"), vec![0x80, 0x00]);
    }

    #[test]
    fn octal_value_wrapping_to_zero_mod_256_is_also_promoted() {
        // `\400` (decimal 256) accumulates past 8 bits; the original's
        // accumulator is an `unsigned char`, so this wraps to 0 and must
        // take the same 0x80 substitution as a literal `\000`, not emit a
        // raw embedded NUL.
        assert_eq!(decode("\\400"), vec![0x80, 0x00]);
    }

    #[test]
    fn numeric_literal_rewrite_then_decode() {
        // %{65} -> %'A'; decoding leaves the %' sequence untouched since
        // it isn't part of the escape/control/octal sublanguage.
        assert_eq!(decode("\\%{65}%dX"), b"%'A'%dX\0");
    }

    #[test]
    fn unknown_escape_is_reported_and_passed_through() {
        let mut sink = Vec::new();
        let mut diag = Diagnostics::new(&mut sink);
        let result = decode_string("\\Q", 42, &mut diag);
        assert_eq!(result, vec![b'Q', 0]);
        assert_eq!(diag.warning_count(), 1);
    }

    #[test]
    fn control_non_letter_emits_literal_caret() {
        assert_eq!(decode("^9"), vec![b'^', b'9', 0]);
    }

    #[test]
    fn octal_pending_at_end_of_input_is_flushed() {
        assert_eq!(decode("\\07"), vec![0x07, 0]);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(decode("hello"), b"hello\0");
    }
}
