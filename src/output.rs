//! Document delivery to standard output or a file.
use crate::config::STDOUT_TARGET;
use crate::error::{Error, Result};
use std::fs;
use std::io::Write;

/// Write `text` to stdout for the `stdout` target, else replace the file.
pub fn write_document(target: &str, text: &str) -> Result<()> {
    let write_err = |source: std::io::Error| Error::WriteFailure {
        target: target.to_string(),
        source,
    };
    if target == STDOUT_TARGET {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes()).map_err(write_err)?;
        stdout.flush().map_err(write_err)?;
        return Ok(());
    }
    fs::write(target, text.as_bytes()).map_err(write_err)?;
    tracing::info!(path = target, bytes = text.len(), "wrote document");
    Ok(())
}
