use crate::commands::filter::{self, UnreadablePolicy};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::NoteStore;

/// Every entry of the notes directory, as the unfiltered sidebar shows it.
pub fn run<S: NoteStore>(store: &S) -> Result<CmdResult> {
    let matches = filter::filter(store, "", UnreadablePolicy::Skip)?;
    Ok(CmdResult::default().with_matches(matches))
}
