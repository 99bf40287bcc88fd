//! C8: writing compiled entries to the output tree.
//!
//! Grounded on `original_source/rtic.cpp::mkdirIfNeeded` and the
//! alias-symlink loop in `updateDB`: entries land two levels deep, keyed
//! by the first character of their primary name, and every alias
//! (including the trailing long name) becomes a symlink pointing at the
//! primary file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::diagnostics::Diagnostics;
use crate::entry::CompilerState;
use crate::serialize::serialize_entry;

/// The subdirectory an entry or alias named `name` lives under: its raw
/// first character, as a single-character directory name. No case
/// folding: `original_source/rtic.cpp:1060` buckets on `e->first[0]`
/// verbatim, so `vt100` and `Vt100` fall under different buckets (`v/`
/// and `V/`) just as the original does.
fn bucket_dir(output_dir: &Path, name: &str) -> Option<PathBuf> {
    let first = name.chars().next()?;
    let mut bucket = String::new();
    bucket.push(first);
    Some(output_dir.join(bucket))
}

/// Create `dir` if it doesn't exist. If it already exists as a directory,
/// touch its mtime so downstream build systems observe the update
/// (mirrors `original_source/rtic.cpp::mkdirIfNeeded`'s `utime(dirName,
/// NULL)` call); if it exists but is not a directory, that's a hard
/// failure for this path, not a silent success.
fn mkdir_if_needed(dir: &Path) -> io::Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            touch_mtime(dir);
            Ok(())
        }
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "already exists and is not a directory",
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => fs::create_dir_all(dir),
        Err(e) => Err(e),
    }
}

/// Best-effort; the original ignores `utime`'s return value too.
fn touch_mtime(dir: &Path) {
    if let Ok(file) = fs::File::open(dir) {
        let _ = file.set_modified(SystemTime::now());
    }
}

/// Compile and write every entry in `state` under `output_dir`, then
/// materialize every alias as a symlink to its primary's file.
///
/// Entries whose compiled form would overflow the format's 16-bit fields,
/// or whose bucket directory can't be created, are diagnosed and skipped
/// rather than failing the whole run (spec.md §7: "per-entry output
/// failure: skip that entry and continue", matching
/// `original_source/rtic.cpp:1062`'s `if (!mkdirIfNeeded(...)) continue;`);
/// a missing entry simply has no alias targets created for it. Only the
/// output root itself (`output_dir`) aborts the whole run on failure.
pub fn write_database<W: Write>(
    state: &CompilerState,
    output_dir: &Path,
    diag: &mut Diagnostics<W>,
) -> std::io::Result<()> {
    mkdir_if_needed(output_dir)?;

    for (name, entry) in &state.entries {
        let Some(dir) = bucket_dir(output_dir, name) else {
            continue;
        };
        let bytes = match serialize_entry(entry) {
            Ok(bytes) => bytes,
            Err(_) => {
                diag.entry_too_large(name);
                continue;
            }
        };

        if let Err(e) = mkdir_if_needed(&dir) {
            diag.io_warning(&dir, &e);
            continue;
        }
        let path = dir.join(name);
        if let Err(e) = fs::write(&path, &bytes) {
            diag.io_warning(&path, &e);
        }
    }

    for (alias, primary) in &state.aliases {
        if alias == primary || !state.entries.contains_key(primary) {
            continue;
        }
        let Some(dir) = bucket_dir(output_dir, alias) else {
            continue;
        };
        if let Err(e) = mkdir_if_needed(&dir) {
            diag.io_warning(&dir, &e);
            continue;
        }
        let link_path = dir.join(alias);
        let target = primary_link_target(alias, primary);
        if let Err(e) = create_symlink(&target, &link_path) {
            diag.symlink_warning(alias, primary, &e);
        }
    }

    Ok(())
}

/// The path an alias symlink should point at, relative to the alias's own
/// bucket directory: the bare primary name when the alias shares its
/// first-letter bucket with the primary, otherwise `../<bucket>/<primary>`
/// (spec.md §4.8). Bucketing uses the raw first character, same as
/// `bucket_dir` — no case folding.
fn primary_link_target(alias: &str, primary: &str) -> PathBuf {
    let alias_first = alias.chars().next();
    let primary_first = primary.chars().next();
    if alias_first == primary_first {
        return PathBuf::from(primary);
    }
    let Some(first) = primary_first else {
        return PathBuf::from(primary);
    };
    let mut bucket = String::new();
    bucket.push(first);
    Path::new("..").join(bucket).join(primary)
}

/// Create the alias symlink, leaving whatever already occupies `link`
/// untouched on collision: spec.md §4.8/§7 require `EEXIST` on symlink
/// creation to be silently ignored, not the target pre-emptively unlinked
/// (`original_source/rtic.cpp:1179`). Nothing prevents an alias name from
/// colliding with a different entry's primary name, so unlinking first
/// would silently destroy an already-written compiled entry file.
#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    match std::os::unix::fs::symlink(target, link) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(not(unix))]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    match std::os::windows::fs::symlink_file(target, link) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}
