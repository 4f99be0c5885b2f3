use serde::Serialize;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A note on disk. Only the path is kept; names are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NoteFile {
    pub path: PathBuf,
}

impl NoteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// Last path segment, e.g. `shopping.md`. Bytes that are not UTF-8
    /// show up as U+FFFD.
    pub fn short_name(&self) -> Cow<'_, str> {
        self.file_name().to_string_lossy()
    }

    /// Last path segment as raw bytes, for matching.
    #[cfg(unix)]
    pub fn name_bytes(&self) -> Cow<'_, [u8]> {
        use std::os::unix::ffi::OsStrExt;
        Cow::Borrowed(self.file_name().as_bytes())
    }

    #[cfg(not(unix))]
    pub fn name_bytes(&self) -> Cow<'_, [u8]> {
        match self.short_name() {
            Cow::Borrowed(name) => Cow::Borrowed(name.as_bytes()),
            Cow::Owned(name) => Cow::Owned(name.into_bytes()),
        }
    }

    /// Short name with `note_ext` stripped when it is the trailing extension.
    ///
    /// Only an exact extension match is stripped: with `.md`, `todo.md`
    /// becomes `todo` but `todo.markdown` and `.md` stay as they are.
    pub fn display_name(&self, note_ext: &str) -> Cow<'_, str> {
        let short = self.short_name();
        let keep = match short.strip_suffix(note_ext) {
            Some(stem) if !stem.is_empty() && !note_ext.is_empty() => Some(stem.len()),
            _ => None,
        };
        let Some(keep) = keep else {
            return short;
        };
        match short {
            Cow::Borrowed(name) => Cow::Borrowed(&name[..keep]),
            Cow::Owned(mut name) => {
                name.truncate(keep);
                Cow::Owned(name)
            }
        }
    }
}

/// Half-open byte range `[start, end)` of a content match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One note that matched a query.
///
/// `span` is `None` for filename matches and for the unfiltered listing;
/// content matches always carry the span of the first hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub note: NoteFile,
    pub span: Option<MatchSpan>,
}

impl MatchResult {
    pub fn by_name(note: NoteFile) -> Self {
        Self { note, span: None }
    }

    pub fn by_content(note: NoteFile, span: MatchSpan) -> Self {
        Self {
            note,
            span: Some(span),
        }
    }

    pub fn is_content_match(&self) -> bool {
        self.span.is_some()
    }
}
