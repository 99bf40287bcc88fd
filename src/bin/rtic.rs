//! C11: the CLI front door.
//!
//! Hand-parses exactly two positional arguments, matching
//! `original_source/rtic.cpp::main`'s own bare `argv` walk. No
//! argument-parsing crate: two positional paths don't warrant one.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use rtic::{compile_database, CompileError, Diagnostics};

fn run() -> Result<(), CompileError> {
    let mut args = std::env::args_os().skip(1);
    let (Some(input_arg), Some(output_arg), None) = (args.next(), args.next(), args.next())
    else {
        return Err(CompileError::Usage);
    };

    let mut diagnostics = Diagnostics::stderr();
    let output_dir = PathBuf::from(output_arg);

    if input_arg == "-" {
        compile_database(io::stdin(), &output_dir, &mut diagnostics)
    } else {
        let path = PathBuf::from(&input_arg);
        let file = File::open(&path).map_err(|source| CompileError::OpenInput {
            path: path.clone(),
            source,
        })?;
        compile_database(file, &output_dir, &mut diagnostics)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(255)
        }
    }
}
