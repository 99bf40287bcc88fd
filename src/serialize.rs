//! C6 (standard binary section) + C7 (extended capability section).
//!
//! Grounded on `original_source/rtic.cpp::updateDB`/`updateExtendedCaps`:
//! the legacy ncurses terminfo binary layout, byte for byte, including its
//! "max index used + 1" count convention and `0xFFFF` unset sentinels.

use crate::cap::Cap;
use crate::dictionary::CapKind;
use crate::entry::Entry;
use bitflags::bitflags;

/// Legacy magic number `0432` (octal), stored low byte first.
const MAGIC: u16 = 0o0432;

/// An entry whose compiled size would overflow the format's 16-bit
/// offset/count fields. Per spec.md §9, callers should report this as a
/// diagnostic and skip the entry rather than silently wrap or panic.
#[derive(Debug)]
pub struct EntryTooLarge;

bitflags! {
    /// Which kinds of extended capabilities an entry carries. Purely a
    /// presence check (C7: the section is omitted entirely when nothing
    /// is present), but modeled as flags rather than three `bool`s since
    /// they are tested together exactly once, the same shape as the
    /// format's own `ex_tabsize == 0` short-circuit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ExSectionFlags: u8 {
        const FLAGS = 0b001;
        const NUMBERS = 0b010;
        const STRINGS = 0b100;
    }
}

fn fits_i16(value: usize) -> Result<u16, EntryTooLarge> {
    if value > i16::MAX as usize {
        Err(EntryTooLarge)
    } else {
        Ok(value as u16)
    }
}

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn pad_to_word(buf: &mut Vec<u8>) {
    if buf.len() % 2 != 0 {
        buf.push(0);
    }
}

/// Standard (defined, non-disabled) capabilities sorted by dictionary
/// index, one bucket per kind.
struct StandardCaps<'a> {
    flags: Vec<(usize, &'a Cap)>,
    numbers: Vec<(usize, &'a Cap)>,
    strings: Vec<(usize, &'a Cap)>,
}

fn gather_standard(entry: &Entry) -> StandardCaps<'_> {
    let mut flags = Vec::new();
    let mut numbers = Vec::new();
    let mut strings = Vec::new();

    for cap in entry.caps.values() {
        if cap.disabled || !cap.index.is_standard() {
            continue;
        }
        let Some(index) = cap.index.as_usize() else {
            continue;
        };
        match cap.kind {
            CapKind::Flag => flags.push((index, cap)),
            CapKind::Number => numbers.push((index, cap)),
            CapKind::String => strings.push((index, cap)),
        }
    }

    flags.sort_by_key(|(i, _)| *i);
    numbers.sort_by_key(|(i, _)| *i);
    strings.sort_by_key(|(i, _)| *i);
    StandardCaps {
        flags,
        numbers,
        strings,
    }
}

/// Serialize `entry` into the legacy binary layout described in spec.md
/// §4.6/§4.7. Returns the complete file contents.
pub fn serialize_entry(entry: &Entry) -> Result<Vec<u8>, EntryTooLarge> {
    let standard = gather_standard(entry);

    let n_flags = standard.flags.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
    let n_numbers = standard
        .numbers
        .iter()
        .map(|(i, _)| i + 1)
        .max()
        .unwrap_or(0);
    let n_offsets = standard
        .strings
        .iter()
        .map(|(i, _)| i + 1)
        .max()
        .unwrap_or(0);

    let mut flags_section = vec![0u8; n_flags];
    for (index, cap) in &standard.flags {
        flags_section[*index] = cap.data[0];
    }

    let mut numbers_section = vec![0xFFu8; n_numbers * 2];
    for (index, cap) in &standard.numbers {
        numbers_section[index * 2] = cap.data[0];
        numbers_section[index * 2 + 1] = cap.data[1];
    }

    let mut offsets_section = vec![0xFFu8; n_offsets * 2];
    let mut string_table = Vec::new();
    for (index, cap) in &standard.strings {
        let offset = fits_i16(string_table.len())?;
        let bytes = offset.to_le_bytes();
        offsets_section[index * 2] = bytes[0];
        offsets_section[index * 2 + 1] = bytes[1];
        string_table.extend_from_slice(&cap.data);
    }

    let names_len = fits_i16(entry.names.len() + 1)?;
    let strtab_size = fits_i16(string_table.len())?;

    let mut out = Vec::new();
    push_u16(&mut out, MAGIC);
    push_u16(&mut out, names_len);
    push_u16(&mut out, fits_i16(n_flags)?);
    push_u16(&mut out, fits_i16(n_numbers)?);
    push_u16(&mut out, fits_i16(n_offsets)?);
    push_u16(&mut out, strtab_size);

    out.extend_from_slice(entry.names.as_bytes());
    out.push(0);

    out.extend_from_slice(&flags_section);
    pad_to_word(&mut out);

    out.extend_from_slice(&numbers_section);
    out.extend_from_slice(&offsets_section);
    out.extend_from_slice(&string_table);

    write_extended_section(&mut out, entry)?;

    Ok(out)
}

fn write_extended_section(out: &mut Vec<u8>, entry: &Entry) -> Result<(), EntryTooLarge> {
    let mut flags_buf = Vec::new();
    let mut numbers_buf = Vec::new();
    let mut string_offsets_buf = Vec::new();
    let mut payload_buf = Vec::new();
    let mut name_offsets_buf = Vec::new();
    let mut name_buf = Vec::new();
    let mut present = ExSectionFlags::empty();

    for kind in [CapKind::Flag, CapKind::Number, CapKind::String] {
        for (name, cap) in &entry.caps {
            if cap.disabled || !cap.index.is_extended() || cap.kind != kind {
                continue;
            }
            match kind {
                CapKind::Flag => {
                    flags_buf.push(1);
                    present |= ExSectionFlags::FLAGS;
                }
                CapKind::Number => {
                    numbers_buf.extend_from_slice(&cap.data);
                    present |= ExSectionFlags::NUMBERS;
                }
                CapKind::String => {
                    let offset = fits_i16(payload_buf.len())?;
                    string_offsets_buf.extend_from_slice(&offset.to_le_bytes());
                    payload_buf.extend_from_slice(&cap.data);
                    present |= ExSectionFlags::STRINGS;
                }
            }
            let name_offset = fits_i16(name_buf.len())?;
            name_offsets_buf.extend_from_slice(&name_offset.to_le_bytes());
            name_buf.extend_from_slice(name.as_bytes());
            name_buf.push(0);
        }
    }

    let ex_tabsize = payload_buf.len() + name_buf.len();
    if present.is_empty() || ex_tabsize == 0 {
        return Ok(());
    }

    let ex_flags = fits_i16(flags_buf.len())?;
    let ex_numbers = fits_i16(numbers_buf.len() / 2)?;
    let ex_strings = fits_i16(string_offsets_buf.len() / 2)?;
    let ex_strcount = ex_flags + ex_numbers + ex_strings * 2;
    let ex_tabsize = fits_i16(ex_tabsize)?;

    pad_to_word(out);

    push_u16(out, ex_flags);
    push_u16(out, ex_numbers);
    push_u16(out, ex_strings);
    push_u16(out, ex_strcount);
    push_u16(out, ex_tabsize);
    push_u16(out, 0);

    out.extend_from_slice(&flags_buf);
    pad_to_word(out);

    out.extend_from_slice(&numbers_buf);
    out.extend_from_slice(&string_offsets_buf);
    out.extend_from_slice(&name_offsets_buf);
    out.extend_from_slice(&payload_buf);
    out.extend_from_slice(&name_buf);

    Ok(())
}

/// Read back the int16 at `offset` in `buf`, little-endian. Test helper
/// for the property-based invariants in `tests/compile.rs`.
#[cfg(test)]
pub(crate) fn read_i16_at(buf: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buf[offset], buf[offset + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{BOOL_CAPS, NUM_CAPS, STR_CAPS};

    fn idx(caps: &[&str], name: &str) -> usize {
        caps.iter().position(|&n| n == name).unwrap()
    }

    #[test]
    fn header_starts_with_magic_bytes() {
        let entry = Entry {
            names: "dumb".into(),
            ..Entry::default()
        };
        let out = serialize_entry(&entry).unwrap();
        assert_eq!(&out[0..2], &[0x1A, 0x01]);
    }

    #[test]
    fn s1_dumb_entry_matches_expected_layout() {
        let mut entry = Entry {
            names: "dumb|80-column dumb tty".into(),
            ..Entry::default()
        };
        let am = idx(BOOL_CAPS, "am");
        let cols = idx(NUM_CAPS, "cols");
        let bel = idx(STR_CAPS, "bel");
        entry.caps.insert("am".into(), Cap::flag(am));
        entry.caps.insert("cols".into(), Cap::number(80, cols));
        entry
            .caps
            .insert("bel".into(), Cap::string(vec![0x07, 0x00], bel));

        let out = serialize_entry(&entry).unwrap();
        let names_len = read_i16_at(&out, 2);
        let n_flags = read_i16_at(&out, 4);
        let n_numbers = read_i16_at(&out, 6);
        let n_offsets = read_i16_at(&out, 8);
        let strtab_size = read_i16_at(&out, 10);

        assert_eq!(names_len as usize, entry.names.len() + 1);
        assert_eq!(n_flags as usize, am + 1);
        assert_eq!(n_numbers as usize, cols + 1);
        assert_eq!(n_offsets as usize, bel + 1);
        assert_eq!(strtab_size, 2);

        let flags_start = 12 + names_len as usize;
        assert_eq!(out[flags_start + am], 1);

        let pad = if (flags_start + n_flags as usize) % 2 != 0 {
            1
        } else {
            0
        };
        let numbers_start = flags_start + n_flags as usize + pad;
        let cols_slot = numbers_start + cols * 2;
        assert_eq!(&out[cols_slot..cols_slot + 2], &[0x50, 0x00]);

        let offsets_start = numbers_start + n_numbers as usize * 2;
        let bel_offset = read_i16_at(&out, offsets_start + bel * 2);
        let strtab_start = offsets_start + n_offsets as usize * 2;
        let bel_bytes = &out[strtab_start + bel_offset as usize..strtab_start + bel_offset as usize + 2];
        assert_eq!(bel_bytes, &[0x07, 0x00]);
    }

    #[test]
    fn disabled_flag_is_excluded_from_flags_section() {
        let mut entry = Entry::default();
        let am = idx(BOOL_CAPS, "am");
        entry.caps.insert("am".into(), Cap::disabled_flag(am));
        let out = serialize_entry(&entry).unwrap();
        let n_flags = read_i16_at(&out, 4);
        assert_eq!(n_flags, 0);
    }

    #[test]
    fn extended_string_produces_extended_section() {
        let mut entry = Entry::default();
        entry
            .caps
            .insert("foo".into(), Cap::extended_string(b"bar\0".to_vec()));
        let out = serialize_entry(&entry).unwrap();
        let n_offsets = read_i16_at(&out, 8);
        assert_eq!(n_offsets, 0);

        // Extended section begins right after the (empty) standard string
        // table, word-aligned.
        let names_len = read_i16_at(&out, 2) as usize;
        let std_end = 12 + names_len; // no flags/numbers/strings defined
        let ext_start = std_end + std_end % 2;
        let ex_flags = read_i16_at(&out, ext_start);
        let ex_numbers = read_i16_at(&out, ext_start + 2);
        let ex_strings = read_i16_at(&out, ext_start + 4);
        assert_eq!((ex_flags, ex_numbers, ex_strings), (0, 0, 1));
    }

    #[test]
    fn no_extended_caps_omits_section_entirely() {
        let mut entry = Entry::default();
        let am = idx(BOOL_CAPS, "am");
        entry.caps.insert("am".into(), Cap::flag(am));
        let out = serialize_entry(&entry).unwrap();
        let names_len = read_i16_at(&out, 2) as usize;
        let n_flags = read_i16_at(&out, 4) as usize;
        let flags_start = 12 + names_len;
        let pad = (flags_start + n_flags) % 2;
        let numbers_start = flags_start + n_flags + pad;
        let n_numbers = read_i16_at(&out, 6) as usize;
        let n_offsets = read_i16_at(&out, 8) as usize;
        let strtab_size = read_i16_at(&out, 10) as usize;
        let expected_len = numbers_start + n_numbers * 2 + n_offsets * 2 + strtab_size;
        assert_eq!(out.len(), expected_len);
    }

    #[test]
    fn oversized_string_table_is_rejected() {
        let mut entry = Entry::default();
        let huge = vec![b'x'; i16::MAX as usize + 10];
        entry.caps.insert("u0".into(), Cap::string(huge, 0));
        assert!(matches!(serialize_entry(&entry), Err(EntryTooLarge)));
    }
}
