//! # Note Storage
//!
//! Notes are plain files under a single notes directory. The [`NoteStore`]
//! trait is the only way the rest of the crate touches that directory, so
//! the filter and the selection controller can be tested without a disk.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: the real notes directory
//! - [`memory::InMemoryStore`]: in-memory tree for tests, including files
//!   that fail to read
//!
//! ## Two enumerations
//!
//! - [`NoteStore::list_all`] is shallow and returns *every* entry of the
//!   notes directory, folders included. It backs the unfiltered listing.
//! - [`NoteStore::walk`] is recursive and returns files only. It backs
//!   searching.
//!
//! Both are ordered by file name so results are stable between calls.
//!
//! A walk does not stop at a subdirectory it cannot read. The failure is
//! returned in [`Walk::skipped`] and the caller decides what it means.

use crate::error::{NeonvError, Result};
use crate::model::NoteFile;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Files found by [`NoteStore::walk`].
#[derive(Debug, Default)]
pub struct Walk {
    pub notes: Vec<NoteFile>,
    /// [`NeonvError::ScanIo`] for each subdirectory that could not be read.
    pub skipped: Vec<NeonvError>,
}

/// Abstract access to the notes directory.
pub trait NoteStore {
    /// Root of the notes directory.
    fn root(&self) -> &Path;

    /// Create the notes directory if it is missing. Idempotent.
    fn ensure_directory_exists(&self) -> Result<()>;

    /// Immediate entries of the notes directory, non-recursive.
    fn list_all(&self) -> Result<Vec<NoteFile>>;

    /// Every file below the notes directory, depth first. Fails only when
    /// the notes directory itself cannot be read.
    fn walk(&self) -> Result<Walk>;

    /// Raw bytes of a note.
    fn read_note(&self, note: &NoteFile) -> Result<Vec<u8>>;

    /// Create an empty note named `file_name` at the top of the notes
    /// directory, or return the existing one.
    fn create_note(&mut self, file_name: &str) -> Result<NoteFile>;
}

/// Checks that `file_name` names a single entry directly inside the notes
/// directory.
pub(crate) fn validate_file_name(file_name: &str) -> Result<()> {
    let trimmed = file_name.trim();
    let bad = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || file_name.contains('/')
        || file_name.contains('\\')
        || file_name.contains('\0');
    if bad {
        return Err(NeonvError::InvalidTitle(
            file_name.to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("groceries.md").is_ok());
        assert!(validate_file_name("with spaces.md").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("   ").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("../escape.md").is_err());
        assert!(validate_file_name("sub/dir.md").is_err());
    }
}
