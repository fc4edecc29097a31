//! Rotate and current commands.
//!
//! These are the commands scripts call, so stdout carries exactly one line:
//! the key, or with `--export` an assignment to `eval`.

use std::io::{self, Write};

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::ExportArgs;
use crate::core::config::Settings;
use crate::core::domain::KeyEntry;
use crate::core::env;
use crate::core::store::Store;
use crate::core::validation;
use crate::error::Result;

/// Switch to the next usable key and print it.
pub fn rotate(settings: &Settings, args: &ExportArgs) -> Result<()> {
    check_export(settings, args)?;
    let store = Store::open(settings);
    let entry = store.rotate()?;
    info!(key = %entry, "rotated");
    emit(settings, args, &entry)
}

/// Print the active key without switching.
pub fn current(settings: &Settings, args: &ExportArgs) -> Result<()> {
    check_export(settings, args)?;
    let store = Store::open(settings);
    let entry = store.current()?;
    info!(key = %entry, "current");
    emit(settings, args, &entry)
}

/// Reject a bad `--var` before the store is touched.
fn check_export(settings: &Settings, args: &ExportArgs) -> Result<()> {
    if args.export {
        validation::validate_var_name(&settings.var_name)?;
    }
    Ok(())
}

/// Write the key line. A closed stdout surfaces as an io error.
fn emit(settings: &Settings, args: &ExportArgs, entry: &KeyEntry) -> Result<()> {
    let mut out = io::stdout().lock();
    if args.export {
        let line = Zeroizing::new(env::render_export(
            args.shell.into(),
            &settings.var_name,
            entry.secret(),
        ));
        writeln!(out, "{}", line.as_str())?;
    } else {
        writeln!(out, "{}", entry.secret())?;
    }
    out.flush()?;
    Ok(())
}
