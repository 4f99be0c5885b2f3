use super::{validate_file_name, NoteStore, Walk};
use crate::error::{NeonvError, Result};
use crate::model::NoteFile;
use log::warn;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn startup_err(&self, source: std::io::Error) -> NeonvError {
        NeonvError::StartupIo {
            path: self.root.clone(),
            source,
        }
    }
}

impl NoteStore for FileStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root.is_dir() {
            fs::create_dir_all(&self.root).map_err(|e| self.startup_err(e))?;
        }
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<NoteFile>> {
        let mut notes = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| self.startup_err(e))? {
            let entry = entry.map_err(|e| self.startup_err(e))?;
            notes.push(NoteFile::new(entry.path()));
        }
        notes.sort_by(|a, b| a.path().file_name().cmp(&b.path().file_name()));
        Ok(notes)
    }

    fn walk(&self) -> Result<Walk> {
        let mut walk = Walk::default();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let depth = e.depth();
                    let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                    let err = NeonvError::ScanIo { path, source };
                    if depth == 0 {
                        return Err(err);
                    }
                    warn!("event=walk_skip module=store err={}", err);
                    walk.skipped.push(err);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            walk.notes.push(NoteFile::new(entry.into_path()));
        }
        Ok(walk)
    }

    fn read_note(&self, note: &NoteFile) -> Result<Vec<u8>> {
        fs::read(note.path()).map_err(|source| NeonvError::ScanIo {
            path: note.path().to_path_buf(),
            source,
        })
    }

    fn create_note(&mut self, file_name: &str) -> Result<NoteFile> {
        validate_file_name(file_name)?;
        self.ensure_directory_exists()?;

        let path = self.root.join(file_name);
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(NeonvError::Io(e)),
        }
        Ok(NoteFile::new(path))
    }
}
