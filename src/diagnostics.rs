//! C10: a structured sink for the warning-level conditions spec.md §7
//! calls out (orphaned continuation lines, duplicate entries, unresolved
//! `use=` targets, unknown escapes, I/O and symlink warnings).
//!
//! None of these affect the process exit code (spec.md §7); centralizing
//! them here just keeps the wording in one place and gives tests
//! something to assert against instead of scraping stderr.

use std::io::{self, Write};

pub struct Diagnostics<W: Write> {
    out: W,
    warnings: usize,
}

impl Diagnostics<io::Stderr> {
    #[must_use]
    pub fn stderr() -> Self {
        Diagnostics {
            out: io::stderr(),
            warnings: 0,
        }
    }
}

impl<W: Write> Diagnostics<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Diagnostics { out, warnings: 0 }
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    fn emit(&mut self, message: std::fmt::Arguments<'_>) {
        self.warnings += 1;
        // A write failure on the diagnostic stream itself has nowhere
        // further to report to; drop it rather than panic mid-compile.
        let _ = writeln!(self.out, "{message}");
    }

    pub fn orphaned_line(&mut self, line: usize) {
        self.emit(format_args!("line {line}: orphaned line ignored."));
    }

    pub fn duplicate_entry(&mut self, line: usize, name: &str) {
        self.emit(format_args!(
            "line {line}: duplicate terminfo entry ignored: {name}"
        ));
    }

    pub fn unresolved_use(&mut self, entry: &str, target: &str) {
        self.emit(format_args!(
            "Entry '{entry}': unresolved link to '{target}' ignored."
        ));
    }

    pub fn unknown_escape(&mut self, line: usize, ch: char) {
        self.emit(format_args!("{line}: unknown escape: {ch}"));
    }

    pub fn io_warning(&mut self, path: &std::path::Path, error: &io::Error) {
        self.emit(format_args!("{}: {error}", path.display()));
    }

    pub fn symlink_warning(&mut self, alias: &str, primary: &str, error: &io::Error) {
        self.emit(format_args!(
            "Cannot create alias {alias} for {primary}. {error}"
        ));
    }

    pub fn entry_too_large(&mut self, name: &str) {
        self.emit(format_args!(
            "entry '{name}': compiled size exceeds 16-bit limits, skipped."
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_formats_warnings() {
        let mut buf = Vec::new();
        {
            let mut diag = Diagnostics::new(&mut buf);
            diag.orphaned_line(3);
            diag.duplicate_entry(7, "dumb");
            assert_eq!(diag.warning_count(), 2);
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("line 3: orphaned line ignored."));
        assert!(text.contains("line 7: duplicate terminfo entry ignored: dumb"));
    }
}
