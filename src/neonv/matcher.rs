//! # Loose Matching
//!
//! Substring search that ignores case and diacritics, so `cafe` finds
//! `Café` and `CAFÉ`. Both sides are folded the same way: every char is
//! lowercased, decomposed to NFD, and stripped of combining marks.
//!
//! Haystacks are raw bytes because note files are not guaranteed to be
//! UTF-8. Invalid byte runs fold to a placeholder that never matches, so a
//! hit can never straddle one.
//!
//! Spans are reported in bytes of the *original* haystack. A folded char
//! remembers the byte range of the source char it came from, which lets a
//! match on `e` inside a decomposed `é` report the full two-byte `é`.

use crate::model::MatchSpan;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Stands in for an invalid UTF-8 run. Folded needles never contain it.
const OPAQUE: char = '\u{FFFD}';

#[derive(Debug, Clone, Copy)]
struct Folded {
    ch: char,
    start: usize,
    end: usize,
}

/// A compiled query. Fold once, search many haystacks.
#[derive(Debug, Clone)]
pub struct LooseMatcher {
    needle: Vec<char>,
}

impl LooseMatcher {
    pub fn new(query: &str) -> Self {
        let mut needle = Vec::with_capacity(query.len());
        for ch in query.chars() {
            fold_char(ch, |folded| {
                if folded != OPAQUE {
                    needle.push(folded)
                }
            });
        }
        Self { needle }
    }

    /// True when the query folds to nothing (e.g. only combining marks).
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.find(haystack).is_some()
    }

    /// First loose occurrence of the query in `haystack`.
    pub fn find(&self, haystack: &[u8]) -> Option<MatchSpan> {
        if self.needle.is_empty() {
            return Some(MatchSpan::new(0, 0));
        }

        let folded = fold_bytes(haystack);
        if folded.len() < self.needle.len() {
            return None;
        }

        let last = folded.len() - self.needle.len();
        (0..=last)
            .find(|&i| {
                folded[i..i + self.needle.len()]
                    .iter()
                    .zip(&self.needle)
                    .all(|(f, n)| f.ch == *n)
            })
            .map(|i| {
                let first = folded[i];
                let tail = folded[i + self.needle.len() - 1];
                MatchSpan::new(first.start, tail.end)
            })
    }
}

fn fold_char(ch: char, mut emit: impl FnMut(char)) {
    for lower in ch.to_lowercase() {
        for decomposed in std::iter::once(lower).nfd() {
            if !is_combining_mark(decomposed) {
                emit(decomposed);
            }
        }
    }
}

fn fold_bytes(haystack: &[u8]) -> Vec<Folded> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut offset = 0;

    for chunk in haystack.utf8_chunks() {
        for (idx, ch) in chunk.valid().char_indices() {
            let start = offset + idx;
            let end = start + ch.len_utf8();
            fold_char(ch, |folded| out.push(Folded { ch: folded, start, end }));
        }
        offset += chunk.valid().len();

        let invalid = chunk.invalid();
        if !invalid.is_empty() {
            out.push(Folded {
                ch: OPAQUE,
                start: offset,
                end: offset + invalid.len(),
            });
            offset += invalid.len();
        }
    }

    out
}
