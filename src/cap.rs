//! The per-capability data model (part of C3/C4's `Entry`).

use crate::dictionary::CapKind;

/// A signed index into one of the three capability dictionaries, or one
/// of two sentinel values.
///
/// Mirrors the original's `enum { kExtended = -3, kDisabled = -2, kNotSet
/// = -1 }`: the legacy format stores these as plain `short`s, but giving
/// them a newtype keeps "is this a real dictionary slot" checks from
/// being scattered `>= 0` comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapIndex(i16);

impl CapIndex {
    /// Not present in any standard dictionary; carries its own name in
    /// the extended section (C7).
    pub const EXTENDED: CapIndex = CapIndex(-3);
    /// Placeholder index for a disabled number capability (`cap@`).
    pub const DISABLED_MARKER: CapIndex = CapIndex(-2);

    #[must_use]
    pub fn standard(index: usize) -> CapIndex {
        debug_assert!(index <= i16::MAX as usize);
        CapIndex(index as i16)
    }

    #[must_use]
    pub fn is_standard(self) -> bool {
        self.0 >= 0
    }

    #[must_use]
    pub fn is_extended(self) -> bool {
        self == Self::EXTENDED
    }

    /// The dictionary slot this index refers to, if it is a standard one.
    #[must_use]
    pub fn as_usize(self) -> Option<usize> {
        self.is_standard().then_some(self.0 as usize)
    }

    #[must_use]
    pub fn raw(self) -> i16 {
        self.0
    }
}

/// A single parsed capability (C3's per-token output).
#[derive(Debug, Clone)]
pub struct Cap {
    pub kind: CapKind,
    pub index: CapIndex,
    pub disabled: bool,
    /// Flag: one byte (0/1). Number: two little-endian bytes. String: the
    /// decoded payload followed by its terminating `0x00` (empty when
    /// disabled).
    pub data: Vec<u8>,
}

impl Cap {
    #[must_use]
    pub fn flag(index: usize) -> Cap {
        Cap {
            kind: CapKind::Flag,
            index: CapIndex::standard(index),
            disabled: false,
            data: vec![1],
        }
    }

    #[must_use]
    pub fn extended_flag() -> Cap {
        Cap {
            kind: CapKind::Flag,
            index: CapIndex::EXTENDED,
            disabled: false,
            data: vec![1],
        }
    }

    #[must_use]
    pub fn disabled_flag(index: usize) -> Cap {
        Cap {
            kind: CapKind::Flag,
            index: CapIndex::standard(index),
            disabled: true,
            data: vec![0],
        }
    }

    /// A disabled extended-flag placeholder: per spec, an extended
    /// capability disable is always treated as a flag.
    #[must_use]
    pub fn disabled_extended_flag() -> Cap {
        Cap {
            kind: CapKind::Flag,
            index: CapIndex::EXTENDED,
            disabled: true,
            data: vec![0],
        }
    }

    #[must_use]
    pub fn number(value: i16, index: usize) -> Cap {
        Cap {
            kind: CapKind::Number,
            index: CapIndex::standard(index),
            disabled: false,
            data: vec![(value & 0xFF) as u8, ((value >> 8) & 0xFF) as u8],
        }
    }

    #[must_use]
    pub fn extended_number(value: i16) -> Cap {
        Cap {
            kind: CapKind::Number,
            index: CapIndex::EXTENDED,
            disabled: false,
            data: vec![(value & 0xFF) as u8, ((value >> 8) & 0xFF) as u8],
        }
    }

    /// A disabled number (`cap@`): the dictionary slot `index` is real
    /// (so it's excluded from the standard section by `disabled`, not by
    /// its index), but its payload bytes are the `DISABLED_MARKER`
    /// sentinel rather than a real value, matching the original's
    /// `Cap(kDisabled, i, true)`.
    #[must_use]
    pub fn disabled_number(index: usize) -> Cap {
        let marker = CapIndex::DISABLED_MARKER.raw();
        Cap {
            kind: CapKind::Number,
            index: CapIndex::standard(index),
            disabled: true,
            data: vec![(marker & 0xFF) as u8, ((marker >> 8) & 0xFF) as u8],
        }
    }

    #[must_use]
    pub fn string(data: Vec<u8>, index: usize) -> Cap {
        Cap {
            kind: CapKind::String,
            index: CapIndex::standard(index),
            disabled: false,
            data,
        }
    }

    #[must_use]
    pub fn extended_string(data: Vec<u8>) -> Cap {
        Cap {
            kind: CapKind::String,
            index: CapIndex::EXTENDED,
            disabled: false,
            data,
        }
    }

    #[must_use]
    pub fn disabled_string(index: usize) -> Cap {
        Cap {
            kind: CapKind::String,
            index: CapIndex::standard(index),
            disabled: true,
            data: Vec::new(),
        }
    }
}
