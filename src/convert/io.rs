//! Reading the input document and writing the output file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Read a whole document into memory.
///
/// A missing or unreadable file is an [`Error::OpenFailed`].
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path)
        .map_err(|e| Error::OpenFailed(format!("{}: {}", path.display(), e)))?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Write `contents` to `path`, replacing any previous file in one step.
///
/// The data goes to a temporary file next to the destination which is then
/// renamed over it, so a failed write leaves an existing output untouched.
/// Missing parent directories are created.
pub fn write_output<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let write_failed = |source: io::Error| Error::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_failed)?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    file.write_all(contents.as_bytes()).map_err(write_failed)?;
    file.as_file().sync_all().map_err(write_failed)?;
    file.persist(path).map_err(|e| write_failed(e.error))?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
