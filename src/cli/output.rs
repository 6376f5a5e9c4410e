//! JSON output for pipeline steps.

use std::io::{self, Write};

use serde::Serialize;

use crate::codecommit::AdapterError;

/// Writes `value` as a single JSON document to stdout.
///
/// # Errors
///
/// Returns [`AdapterError::Io`] when serialisation or writing fails.
pub fn write_json<T: Serialize>(value: &T) -> Result<(), AdapterError> {
    let mut stdout = io::stdout().lock();
    write_json_to(&mut stdout, value)
}

/// Writes `value` as a single JSON document to the given writer.
///
/// # Errors
///
/// Returns [`AdapterError::Io`] when serialisation or writing fails.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), AdapterError> {
    serde_json::to_writer(&mut *writer, value).map_err(|error| io_error(&error))?;
    writeln!(writer).map_err(|error| io_error(&error))
}

fn io_error(error: &impl ToString) -> AdapterError {
    AdapterError::Io {
        message: error.to_string(),
    }
}
