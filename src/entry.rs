//! The `Entry` data model (C3/C4) and the pipeline's explicit state object.
//!
//! `entries` and `aliases` are process-wide in the original `rtic`; here
//! they are fields of [`CompilerState`], constructed once per
//! [`crate::compile_database`] call and threaded through parsing,
//! resolution, and serialization by `&mut` reference rather than held as
//! module-scope singletons (spec.md §9).

use std::collections::BTreeMap;

use crate::cap::Cap;

/// One terminal description between an entry-header line and the next.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    /// The full `name|alias|...|longname` header line, verbatim, minus its
    /// trailing `,` (see `DESIGN.md`'s Open Question (b) for the one
    /// deliberate deviation from the original's "minus the last
    /// character" rule).
    pub names: String,
    /// Capability name -> parsed value. A `BTreeMap` rather than a
    /// `HashMap`: C7 iterates "by kind, then by name order within the
    /// entry's capability map", and a sorted map makes that order
    /// reproducible without a separate sort step.
    pub caps: BTreeMap<String, Cap>,
    /// `use=<name>` targets, in source order.
    pub uses: Vec<String>,
}

impl Entry {
    /// Insert a capability only if its name is not already present
    /// (first-definition-wins, per spec.md §4.3).
    pub fn insert_first_wins(&mut self, name: String, cap: Cap) {
        self.caps.entry(name).or_insert(cap);
    }
}

/// The compiler's full mutable state: parsed entries and the alias table.
#[derive(Debug, Default)]
pub struct CompilerState {
    /// Primary name -> entry.
    pub entries: BTreeMap<String, Entry>,
    /// Alias (including the trailing long name) -> primary name.
    pub aliases: BTreeMap<String, String>,
}

impl CompilerState {
    #[must_use]
    pub fn new() -> CompilerState {
        CompilerState::default()
    }

    /// Resolve an alias or primary name down to a primary name, the way
    /// `use=` targets and CLI/alias lookups need to (spec.md §4.5).
    #[must_use]
    pub fn resolve_primary(&self, name: &str) -> Option<&str> {
        if self.entries.contains_key(name) {
            return Some(name);
        }
        self.aliases.get(name).map(String::as_str)
    }
}
