use super::{validate_file_name, NoteStore, Walk};
use crate::error::{NeonvError, Result};
use crate::model::NoteFile;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Entry {
    File(Vec<u8>),
    Unreadable,
}

/// Notes tree kept in memory. Paths are relative to a fake root.
///
/// `BTreeMap` ordering over `PathBuf` compares component by component,
/// which gives the same depth-first, name-sorted order as the real walk.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    root: PathBuf,
    entries: BTreeMap<PathBuf, Entry>,
    locked_dirs: BTreeSet<PathBuf>,
    directory_present: bool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/notes"),
            entries: BTreeMap::new(),
            locked_dirs: BTreeSet::new(),
            directory_present: true,
        }
    }

    /// Store whose notes directory does not exist and cannot be listed.
    pub fn missing() -> Self {
        Self {
            directory_present: false,
            ..Self::new()
        }
    }

    pub fn insert(&mut self, rel: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.entries
            .insert(rel.as_ref().to_path_buf(), Entry::File(content.into()));
    }

    /// Adds a file that shows up in listings but fails to read.
    pub fn insert_unreadable(&mut self, rel: impl AsRef<Path>) {
        self.entries
            .insert(rel.as_ref().to_path_buf(), Entry::Unreadable);
    }

    /// Adds a subdirectory whose contents cannot be listed. Files already
    /// inserted below it are hidden from walks.
    pub fn insert_unreadable_dir(&mut self, rel: impl AsRef<Path>) {
        self.locked_dirs.insert(rel.as_ref().to_path_buf());
    }

    fn is_locked(&self, rel: &Path) -> bool {
        self.locked_dirs.iter().any(|dir| rel.starts_with(dir))
    }

    fn check_present(&self) -> Result<()> {
        if self.directory_present {
            return Ok(());
        }
        Err(NeonvError::StartupIo {
            path: self.root.clone(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn relative<'a>(&self, note: &'a NoteFile) -> Option<&'a Path> {
        note.path().strip_prefix(&self.root).ok()
    }
}

impl NoteStore for InMemoryStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_directory_exists(&self) -> Result<()> {
        self.check_present()
    }

    fn list_all(&self) -> Result<Vec<NoteFile>> {
        self.check_present()?;
        let top: BTreeSet<_> = self
            .entries
            .keys()
            .chain(&self.locked_dirs)
            .filter_map(|rel| rel.components().next())
            .map(|first| first.as_os_str().to_os_string())
            .collect();
        Ok(top
            .into_iter()
            .map(|name| NoteFile::new(self.root.join(name)))
            .collect())
    }

    fn walk(&self) -> Result<Walk> {
        if !self.directory_present {
            return Err(NeonvError::ScanIo {
                path: self.root.clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        let notes = self
            .entries
            .keys()
            .filter(|rel| !self.is_locked(rel))
            .map(|rel| NoteFile::new(self.root.join(rel)))
            .collect();
        let skipped = self
            .locked_dirs
            .iter()
            .map(|dir| NeonvError::ScanIo {
                path: self.root.join(dir),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
            .collect();
        Ok(Walk { notes, skipped })
    }

    fn read_note(&self, note: &NoteFile) -> Result<Vec<u8>> {
        let entry = self.relative(note).and_then(|rel| self.entries.get(rel));
        match entry {
            Some(Entry::File(content)) => Ok(content.clone()),
            Some(Entry::Unreadable) => Err(NeonvError::ScanIo {
                path: note.path().to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }),
            None => Err(NeonvError::ScanIo {
                path: note.path().to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }

    fn create_note(&mut self, file_name: &str) -> Result<NoteFile> {
        validate_file_name(file_name)?;
        self.check_present()?;
        self.entries
            .entry(PathBuf::from(file_name))
            .or_insert_with(|| Entry::File(Vec::new()));
        Ok(NoteFile::new(self.root.join(file_name)))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_note(mut self, rel: &str, content: &str) -> Self {
            self.store.insert(rel, content);
            self
        }

        pub fn with_unreadable(mut self, rel: &str) -> Self {
            self.store.insert_unreadable(rel);
            self
        }

        pub fn with_unreadable_dir(mut self, rel: &str) -> Self {
            self.store.insert_unreadable_dir(rel);
            self
        }

        /// `shopping.md` ("buy milk") and `todo.md` ("call mom").
        pub fn shopping_and_todo() -> Self {
            Self::new()
                .with_note("shopping.md", "buy milk")
                .with_note("todo.md", "call mom")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn test_list_all_collapses_nested_entries() {
        let store = StoreFixture::new()
            .with_note("b.md", "")
            .with_note("a/one.md", "")
            .with_note("a/two.md", "")
            .store;
        let names: Vec<_> = store
            .list_all()
            .unwrap()
            .iter()
            .map(|n| n.short_name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b.md"]);
    }

    #[test]
    fn test_walk_matches_depth_first_name_order() {
        let store = StoreFixture::new()
            .with_note("a.md", "")
            .with_note("a/inner.md", "")
            .with_note("b.md", "")
            .store;
        let names: Vec<_> = store
            .walk()
            .unwrap()
            .notes
            .iter()
            .map(|n| n.path().strip_prefix("/notes").unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a/inner.md"),
                PathBuf::from("a.md"),
                PathBuf::from("b.md")
            ]
        );
    }

    #[test]
    fn test_unreadable_dir_is_listed_but_not_walked() {
        let store = StoreFixture::new()
            .with_note("a.md", "")
            .with_note("locked/inner.md", "")
            .with_unreadable_dir("locked")
            .store;
        let names: Vec<_> = store
            .list_all()
            .unwrap()
            .iter()
            .map(|n| n.short_name().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "locked"]);

        let walk = store.walk().unwrap();
        assert_eq!(walk.notes, vec![NoteFile::new("/notes/a.md")]);
        assert!(matches!(
            &walk.skipped[..],
            [NeonvError::ScanIo { path, .. }] if path.as_path() == Path::new("/notes/locked")
        ));
    }

    #[test]
    fn test_unreadable_entry_fails_to_read() {
        let store = StoreFixture::new().with_unreadable("locked.md").store;
        let note = NoteFile::new("/notes/locked.md");
        assert!(matches!(
            store.read_note(&note),
            Err(NeonvError::ScanIo { .. })
        ));
    }

    #[test]
    fn test_missing_store_fails_listing() {
        let store = InMemoryStore::missing();
        assert!(matches!(
            store.list_all(),
            Err(NeonvError::StartupIo { .. })
        ));
    }
}
