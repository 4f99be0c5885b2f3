use crate::commands::{CmdMessage, CmdResult, NeonvPaths};
use crate::error::Result;
use crate::store::NoteStore;

pub fn run<S: NoteStore>(store: &S, paths: &NeonvPaths) -> Result<CmdResult> {
    store.ensure_directory_exists()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Notes directory ready at {}",
        store.root().display()
    )));
    Ok(result.with_paths(vec![paths.data.clone(), paths.notes.clone()]))
}
