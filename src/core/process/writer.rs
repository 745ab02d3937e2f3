//! Atomic output files
//!
//! Output is written to a temporary file next to the destination and
//! renamed into place only once every line has been written. A failure or
//! an abrupt exit leaves the previous destination (if any) untouched and
//! never exposes a partially written file under the destination name.
//!
//! Temporary files are created owner-only. Before the rename the file
//! takes the permissions of the destination it replaces, or failing that
//! of a template path (the source log), so outputs are as readable as a
//! plainly created file would be.

use crate::domain::FileError;
use std::fs::{self, Permissions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Buffered writer over a temporary file that commits by rename
pub struct AtomicOutput {
    destination: PathBuf,
    permissions_from: Option<PathBuf>,
    writer: BufWriter<NamedTempFile>,
}

impl AtomicOutput {
    /// Create the temporary file in the destination's directory
    pub fn create(destination: &Path) -> Result<Self, FileError> {
        let dir = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let prefix = destination
            .file_name()
            .map(|n| format!(".{}.", n.to_string_lossy()))
            .unwrap_or_else(|| ".loganon.".to_string());

        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| FileError::create_destination(destination, e))?;

        Ok(Self {
            destination: destination.to_path_buf(),
            permissions_from: None,
            writer: BufWriter::new(temp),
        })
    }

    /// Use the permissions of `template` when there is no existing destination
    pub fn with_permissions_from(mut self, template: &Path) -> Self {
        self.permissions_from = Some(template.to_path_buf());
        self
    }

    /// Append `bytes` verbatim
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FileError> {
        self.writer
            .write_all(bytes)
            .map_err(|e| FileError::write(&self.destination, e))
    }

    /// Permissions the committed file should carry, if any can be determined
    fn target_permissions(&self) -> Option<Permissions> {
        std::iter::once(self.destination.as_path())
            .chain(self.permissions_from.as_deref())
            .find_map(|path| fs::metadata(path).ok())
            .map(|meta| meta.permissions())
    }

    /// Flush and atomically move the temporary file onto the destination
    pub fn commit(self) -> Result<(), FileError> {
        let permissions = self.target_permissions();
        let destination = self.destination;
        let temp = self
            .writer
            .into_inner()
            .map_err(|e| FileError::write(&destination, e.error()))?;
        if let Some(permissions) = permissions {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|e| FileError::write(&destination, e))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| FileError::write(&destination, e))?;
        temp.persist(&destination)
            .map_err(|e| FileError::commit(&destination, e.error))?;
        Ok(())
    }
}
