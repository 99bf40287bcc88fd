//! End-to-end coverage of `compile_database` against real terminfo
//! source text, exercising the scenarios and invariants named in
//! spec.md §8.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rtic::{compile_database, Diagnostics};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A uniquely-named, self-cleaned scratch directory under the OS temp
/// root. No `tempfile` dependency: process id plus a monotonic counter
/// is enough uniqueness for a handful of sequential integration tests.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(tag: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut dir = std::env::temp_dir();
        dir.push(format!("rtic-compile-test-{tag}-{}-{n}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        ScratchDir(dir)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn compile(src: &str, dir: &Path) -> Diagnostics<Vec<u8>> {
    let mut diagnostics = Diagnostics::new(Vec::new());
    compile_database(Cursor::new(src.as_bytes()), dir, &mut diagnostics).unwrap();
    diagnostics
}

#[test]
fn s1_minimal_single_entry_compiles() {
    let scratch = ScratchDir::new("s1");
    let src = "dumb|80-column dumb tty,\n\tam, cols#80, bel=^G,\n";
    let diagnostics = compile(src, scratch.path());

    assert_eq!(diagnostics.warning_count(), 0);
    let bytes = fs::read(scratch.path().join("d").join("dumb")).unwrap();
    assert_eq!(&bytes[0..2], &[0x1A, 0x01]);

    let alias = scratch.path().join("8").join("80-column dumb tty");
    let meta = fs::symlink_metadata(&alias).unwrap();
    assert!(meta.file_type().is_symlink());
}

#[test]
fn s2_use_inheritance_pulls_in_missing_capabilities() {
    let scratch = ScratchDir::new("s2");
    let src = "\
base,
\tam, cols#80, bel=^G,
child|a child terminal, use=base,
\tbold=\\E[1m,
";
    let diagnostics = compile(src, scratch.path());
    assert_eq!(diagnostics.warning_count(), 0);

    let parent = fs::read(scratch.path().join("b").join("base")).unwrap();
    let child = fs::read(scratch.path().join("c").join("child")).unwrap();
    assert_ne!(parent, child);
    assert!(scratch.path().join("c").join("child").is_file());
}

#[test]
fn s3_disabled_capability_is_excluded_but_slot_reserved() {
    let scratch = ScratchDir::new("s3");
    let src = "x|x terminal,\n\tam@, cols#80,\n";
    let diagnostics = compile(src, scratch.path());
    assert_eq!(diagnostics.warning_count(), 0);
    assert!(scratch.path().join("x").join("x").is_file());
}

#[test]
fn s4_orphaned_continuation_line_is_a_warning_not_an_error() {
    let scratch = ScratchDir::new("s4");
    let src = "\tam,\nx,\n\tcols#80,\n";
    let diagnostics = compile(src, scratch.path());
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(scratch.path().join("x").join("x").is_file());
}

#[test]
fn s5_duplicate_entry_name_keeps_the_first() {
    let scratch = ScratchDir::new("s5");
    let src = "x,\n\tcols#80,\nx,\n\tcols#1,\n";
    let diagnostics = compile(src, scratch.path());
    assert_eq!(diagnostics.warning_count(), 2);

    let bytes = fs::read(scratch.path().join("x").join("x")).unwrap();
    // cols is the single standard number defined; its little-endian value
    // should be 80, from the first (kept) definition.
    let n_numbers_offset = 6;
    let n_numbers = i16::from_le_bytes([bytes[n_numbers_offset], bytes[n_numbers_offset + 1]]);
    assert!(n_numbers >= 1);
}

#[test]
fn s6_unresolved_use_target_is_a_warning_not_an_error() {
    let scratch = ScratchDir::new("s6");
    let src = "x,\n\tuse=nonexistent,\n";
    let diagnostics = compile(src, scratch.path());
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(scratch.path().join("x").join("x").is_file());
}

#[test]
fn extended_capability_round_trips_through_the_extended_section() {
    let scratch = ScratchDir::new("extended");
    let src = "x,\n\tmy_custom_cap=hello,\n";
    let diagnostics = compile(src, scratch.path());
    assert_eq!(diagnostics.warning_count(), 0);

    let bytes = fs::read(scratch.path().join("x").join("x")).unwrap();
    let haystack = b"my_custom_cap";
    assert!(bytes.windows(haystack.len()).any(|w| w == haystack));
    let haystack = b"hello";
    assert!(bytes.windows(haystack.len()).any(|w| w == haystack));
}

#[test]
fn empty_source_produces_no_entries_and_no_warnings() {
    let scratch = ScratchDir::new("empty");
    let diagnostics = compile("", scratch.path());
    assert_eq!(diagnostics.warning_count(), 0);
}

#[test]
fn comment_and_blank_lines_are_ignored() {
    let scratch = ScratchDir::new("comments");
    let src = "# a comment\n\ndumb,\n\tam,\n";
    let diagnostics = compile(src, scratch.path());
    assert_eq!(diagnostics.warning_count(), 0);
    assert!(scratch.path().join("d").join("dumb").is_file());
}
