//! C5: `use=` inheritance resolution.
//!
//! Grounded on `original_source/rtic.cpp::resolveUses`/`mergeEntries`: a
//! post-order walk with "absent only" merge semantics and no cycle
//! detection (spec.md §9 — a cycle recurses indefinitely; this crate does
//! not guard against it, matching the original and the spec's Non-goals).

use std::io::Write;

use crate::diagnostics::Diagnostics;
use crate::entry::{CompilerState, Entry};

/// Merge `src`'s capabilities into `dst`, keeping whatever `dst` already
/// defines (destination always wins).
fn merge_into(src: &Entry, dst: &mut Entry) {
    for (name, cap) in &src.caps {
        dst.caps.entry(name.clone()).or_insert_with(|| cap.clone());
    }
}

/// Resolve `name` (the entry currently being visited) into `target`,
/// recursing through its `use=` list first (post-order: deepest ancestors
/// merge first, though "absent only" means only the first-seen binding
/// for any capability ever sticks).
fn resolve_into<W: Write>(
    state: &CompilerState,
    name: &str,
    target: &mut Entry,
    diag: &mut Diagnostics<W>,
) {
    let Some(entry) = state.entries.get(name) else {
        return;
    };

    for used in &entry.uses {
        let resolved = state.resolve_primary(used);
        match resolved {
            Some(primary) => {
                let primary = primary.to_string();
                resolve_into(state, &primary, target, diag);
            }
            None => diag.unresolved_use(name, used),
        }
    }

    merge_into(entry, target);
}

/// Resolve every entry in `state` in place.
///
/// Each entry is resolved against a scratch clone of itself (the outer
/// call in the original is `resolveUses(entry, entry)`), since the
/// recursive walk needs a read-only view of `state.entries` while
/// accumulating into a target that is not borrowed from it.
pub fn resolve_all<W: Write>(state: &mut CompilerState, diag: &mut Diagnostics<W>) {
    let names: Vec<String> = state.entries.keys().cloned().collect();
    for name in names {
        let mut target = state.entries[&name].clone();
        resolve_into(state, &name, &mut target, diag);
        state.entries.insert(name, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::Cap;

    fn diag() -> Diagnostics<Vec<u8>> {
        Diagnostics::new(Vec::new())
    }

    #[test]
    fn inherits_capabilities_from_use_target() {
        let mut state = CompilerState::new();
        let mut a = Entry {
            names: "a|alpha".into(),
            ..Entry::default()
        };
        a.caps.insert("bel".into(), Cap::string(vec![7, 0], 1));
        state.entries.insert("a".into(), a);

        let mut b = Entry {
            names: "b|beta".into(),
            ..Entry::default()
        };
        b.uses.push("a".into());
        state.entries.insert("b".into(), b);

        let mut d = diag();
        resolve_all(&mut state, &mut d);

        assert_eq!(state.entries["b"].caps["bel"].data, vec![7, 0]);
    }

    #[test]
    fn destination_definition_always_wins() {
        let mut state = CompilerState::new();
        let mut a = Entry::default();
        a.caps.insert("cub1".into(), Cap::extended_string(b"A\0".to_vec()));
        state.entries.insert("a".into(), a);

        let mut e = Entry::default();
        e.caps.insert("cub1".into(), Cap::extended_string(b"E\0".to_vec()));
        e.uses.push("a".into());
        state.entries.insert("e".into(), e);

        let mut d = diag();
        resolve_all(&mut state, &mut d);

        assert_eq!(state.entries["e"].caps["cub1"].data, b"E\0".to_vec());
    }

    #[test]
    fn use_resolves_through_alias() {
        let mut state = CompilerState::new();
        let mut a = Entry::default();
        a.caps.insert("bel".into(), Cap::string(vec![7, 0], 1));
        state.entries.insert("a".into(), a);
        state.aliases.insert("alpha".into(), "a".into());

        let mut b = Entry::default();
        b.uses.push("alpha".into());
        state.entries.insert("b".into(), b);

        let mut d = diag();
        resolve_all(&mut state, &mut d);

        assert_eq!(state.entries["b"].caps["bel"].data, vec![7, 0]);
    }

    #[test]
    fn unresolved_use_target_is_reported_and_skipped() {
        let mut state = CompilerState::new();
        let mut b = Entry::default();
        b.uses.push("does-not-exist".into());
        state.entries.insert("b".into(), b);

        let mut d = diag();
        resolve_all(&mut state, &mut d);

        assert_eq!(d.warning_count(), 1);
        assert!(state.entries["b"].caps.is_empty());
    }
}
