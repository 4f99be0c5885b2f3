//! # API Facade
//!
//! Thin facade over the command layer, used by the one-shot CLI
//! subcommands. It dispatches, applies the loaded config (note extension,
//! unreadable-file policy) and returns [`CmdResult`]s. No printing.
//!
//! The interactive browser does not go through here for every keystroke;
//! [`NeonvApi::into_controller`] hands the store over to a
//! [`SelectionController`] instead.

use crate::commands::{self, config::ConfigAction, CmdResult, NeonvPaths};
use crate::config::NeonvConfig;
use crate::controller::SelectionController;
use crate::editor::RemoteEditor;
use crate::error::Result;
use crate::store::NoteStore;

pub struct NeonvApi<S: NoteStore> {
    store: S,
    paths: NeonvPaths,
    config: NeonvConfig,
}

impl<S: NoteStore> NeonvApi<S> {
    pub fn new(store: S, paths: NeonvPaths, config: NeonvConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn paths(&self) -> &NeonvPaths {
        &self.paths
    }

    pub fn config(&self) -> &NeonvConfig {
        &self.config
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.store, &self.paths)
    }

    pub fn list_notes(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn search_notes(&self, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, query, self.config.unreadable_policy())
    }

    pub fn create_note(&mut self, title: &str) -> Result<CmdResult> {
        commands::create::run(&mut self.store, title, self.config.file_ext())
    }

    /// Reads or updates `config.json`. A successful set is applied to this
    /// instance too.
    pub fn configure(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn into_controller<E: RemoteEditor>(self, editor: E) -> SelectionController<S, E> {
        let policy = self.config.unreadable_policy();
        SelectionController::new(self.store, editor, self.config.file_ext, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerState;
    use crate::editor::fixtures::RecordingEditor;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn api(store: InMemoryStore) -> (TempDir, NeonvApi<InMemoryStore>) {
        let dir = TempDir::new().unwrap();
        let paths = NeonvPaths::new(dir.path());
        (dir, NeonvApi::new(store, paths, NeonvConfig::default()))
    }

    #[test]
    fn search_dispatches_with_query() {
        let (_dir, api) = api(StoreFixture::shopping_and_todo().store);
        let result = api.search_notes("mom").unwrap();
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].note.short_name(), "todo.md");
    }

    #[test]
    fn create_uses_configured_extension() {
        let (_dir, mut api) = api(InMemoryStore::new());
        api.configure(ConfigAction::Set("file-ext".into(), "txt".into()))
            .unwrap();
        let result = api.create_note("ideas").unwrap();
        assert_eq!(result.created.unwrap().short_name(), "ideas.txt");
    }

    #[test]
    fn controller_inherits_store_and_config() {
        let (_dir, api) = api(StoreFixture::shopping_and_todo().store);
        let ctrl = api.into_controller(RecordingEditor::new());
        assert_eq!(ctrl.state(), ControllerState::Empty);
        assert_eq!(ctrl.store().list_all().unwrap().len(), 2);
    }
}
