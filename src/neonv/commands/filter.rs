//! # Match Filter
//!
//! Decides which notes match a query. There is no index: every call lists
//! or walks the notes directory again, which is fine at note-taking scale.
//!
//! - An empty query lists the notes directory as-is, without spans.
//! - Otherwise each file below the notes directory is checked by name
//!   first, then by content. A name hit wins and never carries a span.
//!   Names are matched on their raw bytes, so a file name that is not
//!   UTF-8 can still match on its valid parts.
//! - Files and subdirectories that cannot be read follow the
//!   [`UnreadablePolicy`].
//!
//! Results keep walk order. There is no ranking.

use crate::error::{NeonvError, Result};
use crate::matcher::LooseMatcher;
use crate::model::MatchResult;
use crate::store::NoteStore;
use log::{debug, warn};
use std::path::PathBuf;

/// What to do when a note or a subdirectory cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreadablePolicy {
    /// Log it, treat it as a non-match, keep going.
    #[default]
    Skip,
    /// Fail the whole pass with [`NeonvError::ScanIo`].
    Abort,
}

/// Outcome of one filter pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterPass {
    pub matches: Vec<MatchResult>,
    /// Notes and subdirectories skipped under [`UnreadablePolicy::Skip`].
    pub unreadable: Vec<PathBuf>,
}

pub fn run<S: NoteStore>(store: &S, query: &str, policy: UnreadablePolicy) -> Result<FilterPass> {
    if query.is_empty() {
        let matches = store
            .list_all()?
            .into_iter()
            .map(MatchResult::by_name)
            .collect();
        return Ok(FilterPass {
            matches,
            unreadable: Vec::new(),
        });
    }

    let matcher = LooseMatcher::new(query);
    let mut pass = FilterPass::default();

    let walk = store.walk()?;
    for err in walk.skipped {
        match (policy, err) {
            (UnreadablePolicy::Skip, NeonvError::ScanIo { path, source }) => {
                warn!(
                    "event=filter_skip module=filter path={} err={}",
                    path.display(),
                    source
                );
                pass.unreadable.push(path);
            }
            (_, err) => return Err(err),
        }
    }

    for note in walk.notes {
        if matcher.is_match(&note.name_bytes()) {
            pass.matches.push(MatchResult::by_name(note));
            continue;
        }

        let content = match store.read_note(&note) {
            Ok(content) => content,
            Err(err @ NeonvError::ScanIo { .. }) if policy == UnreadablePolicy::Skip => {
                warn!("event=filter_skip module=filter path={} err={}", note.path().display(), err);
                pass.unreadable.push(note.path);
                continue;
            }
            Err(err) => return Err(err),
        };

        if let Some(span) = matcher.find(&content) {
            pass.matches.push(MatchResult::by_content(note, span));
        }
    }

    debug!(
        "event=filter module=filter query={:?} matches={} skipped={}",
        query,
        pass.matches.len(),
        pass.unreadable.len()
    );
    Ok(pass)
}

/// Matching notes for `query`, in walk order.
pub fn filter<S: NoteStore>(
    store: &S,
    query: &str,
    policy: UnreadablePolicy,
) -> Result<Vec<MatchResult>> {
    run(store, query, policy).map(|pass| pass.matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteFile;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn names(matches: &[MatchResult]) -> Vec<String> {
        matches
            .iter()
            .map(|m| m.note.short_name().into_owned())
            .collect()
    }

    #[test]
    fn empty_query_lists_everything_without_spans() {
        let store = StoreFixture::shopping_and_todo().store;
        let all = filter(&store, "", UnreadablePolicy::Skip).unwrap();
        assert_eq!(names(&all), vec!["shopping.md", "todo.md"]);
        assert!(all.iter().all(|m| m.span.is_none()));
    }

    #[test]
    fn empty_query_on_empty_dir_is_empty() {
        let store = InMemoryStore::new();
        assert!(filter(&store, "", UnreadablePolicy::Skip).unwrap().is_empty());
    }

    #[test]
    fn content_match_carries_span() {
        let store = StoreFixture::shopping_and_todo().store;
        let hits = filter(&store, "milk", UnreadablePolicy::Skip).unwrap();
        assert_eq!(names(&hits), vec!["shopping.md"]);
        let span = hits[0].span.unwrap();
        assert_eq!((span.start, span.end), (4, 8));
    }

    #[test]
    fn filename_match_has_no_span() {
        let store = StoreFixture::shopping_and_todo().store;
        let hits = filter(&store, "md", UnreadablePolicy::Skip).unwrap();
        assert_eq!(names(&hits), vec!["shopping.md", "todo.md"]);
        assert!(hits.iter().all(|m| m.span.is_none()));
    }

    #[test]
    fn filename_match_wins_over_content() {
        let store = StoreFixture::new()
            .with_note("milk.md", "this note talks about milk")
            .store;
        let hits = filter(&store, "milk", UnreadablePolicy::Skip).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(!hits[0].is_content_match());
    }

    #[test]
    fn matching_ignores_case_and_diacritics() {
        let store = StoreFixture::new()
            .with_note("Café.md", "")
            .with_note("recipes.md", "CRÈME brûlée")
            .with_note("other.md", "nothing here")
            .store;
        assert_eq!(
            names(&filter(&store, "cafe", UnreadablePolicy::Skip).unwrap()),
            vec!["Café.md"]
        );
        assert_eq!(
            names(&filter(&store, "creme", UnreadablePolicy::Skip).unwrap()),
            vec!["recipes.md"]
        );
    }

    #[test]
    fn nested_files_are_searched() {
        let store = StoreFixture::new()
            .with_note("top.md", "nothing")
            .with_note("work/standup.md", "blockers: none")
            .store;
        let hits = filter(&store, "blockers", UnreadablePolicy::Skip).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].note, NoteFile::new("/notes/work/standup.md"));
    }

    #[test]
    fn every_result_matches_and_every_miss_does_not() {
        let store = StoreFixture::new()
            .with_note("alpha.md", "the quick brown fox")
            .with_note("beta.md", "lazy dog")
            .with_note("gamma.md", "Quick thinking")
            .with_note("delta.md", "slow")
            .store;
        let query = "quick";
        let matcher = LooseMatcher::new(query);
        let hits = filter(&store, query, UnreadablePolicy::Skip).unwrap();

        for note in store.walk().unwrap().notes {
            let content = store.read_note(&note).unwrap();
            let hit = hits.iter().find(|m| m.note == note);
            let expected = matcher.is_match(&note.name_bytes())
                || matcher.is_match(&content);
            assert_eq!(hit.is_some(), expected, "{}", note.short_name());
            if let Some(span) = hit.and_then(|m| m.span) {
                assert!(span.start <= span.end && span.end <= content.len());
            }
        }
        assert_eq!(names(&hits), vec!["alpha.md", "gamma.md"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let store = StoreFixture::shopping_and_todo()
            .with_note("notes/mom.md", "birthday")
            .store;
        let first = filter(&store, "mo", UnreadablePolicy::Skip).unwrap();
        let second = filter(&store, "mo", UnreadablePolicy::Skip).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unreadable_file_is_skipped_by_default() {
        let store = StoreFixture::shopping_and_todo()
            .with_unreadable("locked.md")
            .store;
        let pass = run(&store, "milk", UnreadablePolicy::Skip).unwrap();
        assert_eq!(names(&pass.matches), vec!["shopping.md"]);
        assert_eq!(pass.unreadable, vec![PathBuf::from("/notes/locked.md")]);
    }

    #[test]
    fn unreadable_file_still_matches_by_name() {
        let store = StoreFixture::new().with_unreadable("locked.md").store;
        let hits = filter(&store, "lock", UnreadablePolicy::Abort).unwrap();
        assert_eq!(names(&hits), vec!["locked.md"]);
    }

    #[test]
    fn unreadable_file_aborts_under_abort_policy() {
        let store = StoreFixture::shopping_and_todo()
            .with_unreadable("locked.md")
            .store;
        let err = filter(&store, "milk", UnreadablePolicy::Abort).unwrap_err();
        assert!(matches!(err, NeonvError::ScanIo { .. }));
    }

    #[test]
    fn unreadable_dir_is_skipped_by_default() {
        let store = StoreFixture::shopping_and_todo()
            .with_note("locked/milk.md", "milk")
            .with_unreadable_dir("locked")
            .store;
        let pass = run(&store, "milk", UnreadablePolicy::Skip).unwrap();
        assert_eq!(names(&pass.matches), vec!["shopping.md"]);
        assert_eq!(pass.unreadable, vec![PathBuf::from("/notes/locked")]);
    }

    #[test]
    fn unreadable_dir_aborts_under_abort_policy() {
        let store = StoreFixture::shopping_and_todo()
            .with_unreadable_dir("locked")
            .store;
        let err = filter(&store, "milk", UnreadablePolicy::Abort).unwrap_err();
        assert!(matches!(err, NeonvError::ScanIo { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_matches_by_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut store = InMemoryStore::new();
        store.insert(OsStr::from_bytes(b"caf\xe9 list.md"), "x");
        store.insert("other.md", "x");

        let hits = filter(&store, "list", UnreadablePolicy::Skip).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].note.display_name(".md"), "caf\u{FFFD} list");
        assert!(!hits[0].is_content_match());
        assert!(filter(&store, "caf", UnreadablePolicy::Skip)
            .unwrap()
            .iter()
            .any(|m| m.note == hits[0].note));
    }
}
