use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NeonvError, Result};
use crate::model::NoteFile;
use crate::store::NoteStore;

/// File name for a note titled `title`: the title plus the note extension.
pub fn note_file_name(title: &str, file_ext: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NeonvError::InvalidTitle(title.to_string()));
    }
    Ok(format!("{}{}", title, file_ext))
}

/// Creates the note file for `title` unless it already exists.
pub fn create_note<S: NoteStore>(store: &mut S, title: &str, file_ext: &str) -> Result<NoteFile> {
    let file_name = note_file_name(title, file_ext)?;
    store.create_note(&file_name)
}

pub fn run<S: NoteStore>(store: &mut S, title: &str, file_ext: &str) -> Result<CmdResult> {
    let note = create_note(store, title, file_ext)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note ready: {}",
        note.display_name(file_ext)
    )));
    Ok(result.with_created(note))
}
