//! A reduced terminfo database compiler.
//!
//! Parses the textual terminfo source format, resolves `use=`
//! inheritance, and serializes each entry into the legacy ncurses binary
//! terminfo layout, writing the result into a two-level directory tree
//! with alias symlinks.

pub mod cap;
pub mod decode;
pub mod dictionary;
pub mod diagnostics;
pub mod entry;
pub mod error;
pub mod output;
pub mod parse;
pub mod resolve;
pub mod serialize;

use std::io::{self, Write};
use std::path::Path;

pub use crate::diagnostics::Diagnostics;
pub use crate::entry::{CompilerState, Entry};
pub use crate::error::CompileError;

/// Compile a terminfo source stream into `output_dir`.
///
/// Reads the full pipeline: C4 entry collection (which drives C3/C2 per
/// capability), C5 `use=` resolution, then C6/C7 serialization and C8
/// output for every entry, in that order. Per-capability and per-entry
/// problems are reported through `diagnostics` and do not abort the run;
/// only a failure to read `input` at all is a [`CompileError`] (the
/// output root's own createability is the caller's concern via
/// [`output::write_database`]'s `io::Result`, surfaced here as
/// [`CompileError::OutputRoot`]).
///
/// `input` need not already be buffered: it is wrapped in a
/// [`io::BufReader`] internally before the line-oriented C4 scan.
pub fn compile_database<R: io::Read, W: Write>(
    input: R,
    output_dir: &Path,
    diagnostics: &mut Diagnostics<W>,
) -> Result<(), CompileError> {
    let mut state = CompilerState::new();
    parse::parse_source(io::BufReader::new(input), &mut state, diagnostics);
    resolve::resolve_all(&mut state, diagnostics);
    output::write_database(&state, output_dir, diagnostics).map_err(|source| {
        CompileError::OutputRoot {
            path: output_dir.to_path_buf(),
            source,
        }
    })
}
