//! Drives the selection controller against a real notes directory.

use neonv::commands::filter::UnreadablePolicy;
use neonv::controller::{
    ControllerState, NavKey, NoteListView, SearchInput, SelectionController, SubmitOutcome,
};
use neonv::editor::RemoteEditor;
use neonv::error::Result;
use neonv::store::fs::FileStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct Editor {
    open: Option<PathBuf>,
    closes: usize,
}

impl RemoteEditor for Editor {
    fn open_buffer(&mut self, path: &Path) -> Result<()> {
        self.open = Some(path.to_path_buf());
        Ok(())
    }

    fn force_close_buffer(&mut self) -> Result<()> {
        self.open = None;
        self.closes += 1;
        Ok(())
    }

    fn set_preview_mode(&mut self) -> Result<()> {
        Ok(())
    }

    fn run_startup_script(&mut self, _script: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct List {
    len: usize,
    selected: Option<usize>,
}

impl NoteListView for List {
    fn refresh(&mut self, len: usize) {
        self.len = len;
        self.selected = None;
    }

    fn select(&mut self, index: isize) -> Option<usize> {
        let index = usize::try_from(index).ok().filter(|i| *i < self.len)?;
        self.selected = Some(index);
        Some(index)
    }

    fn unselect_all(&mut self) {
        self.selected = None;
    }

    fn scroll_to_top(&mut self) {}
}

#[derive(Default)]
struct Input(String);

impl SearchInput for Input {
    fn set_text(&mut self, text: &str) {
        self.0 = text.to_string();
    }
}

fn setup(notes: &[(&str, &str)]) -> (TempDir, SelectionController<FileStore, Editor>, List) {
    let dir = TempDir::new().unwrap();
    for (name, content) in notes {
        fs::write(dir.path().join(name), content).unwrap();
    }
    let store = FileStore::new(dir.path());
    let mut ctrl = SelectionController::new(store, Editor::default(), ".md", UnreadablePolicy::Skip);
    let mut list = List::default();
    ctrl.load(&mut list).unwrap();
    (dir, ctrl, list)
}

#[test]
fn typing_narrows_and_opens_first_hit() {
    let (dir, mut ctrl, mut list) =
        setup(&[("shopping.md", "buy milk"), ("todo.md", "call mom")]);
    assert_eq!(ctrl.state(), ControllerState::Idle);
    assert_eq!(ctrl.len(), 2);

    ctrl.on_query_changed("MILK", &mut list);
    assert_eq!(ctrl.state(), ControllerState::Viewing(0));
    assert_eq!(ctrl.render_item(0).as_deref(), Some("shopping"));
    assert_eq!(ctrl.editor().open, Some(dir.path().join("shopping.md")));
}

#[test]
fn navigation_walks_the_list() {
    let (dir, mut ctrl, mut list) = setup(&[("a.md", "x"), ("b.md", "x"), ("c.md", "x")]);
    ctrl.on_query_changed("x", &mut list);
    ctrl.on_nav_key(NavKey::Next, &mut list);
    ctrl.on_nav_key(NavKey::Next, &mut list);
    assert_eq!(ctrl.state(), ControllerState::Viewing(2));
    assert_eq!(ctrl.editor().open, Some(dir.path().join("c.md")));

    ctrl.on_nav_key(NavKey::Next, &mut list);
    assert_eq!(ctrl.state(), ControllerState::Viewing(2));
}

#[test]
fn submitting_unknown_title_creates_note_on_disk() {
    let (dir, mut ctrl, mut list) = setup(&[("todo.md", "call mom")]);
    ctrl.on_query_changed("groceries", &mut list);
    assert_eq!(ctrl.state(), ControllerState::Empty);

    let outcome = ctrl.on_query_submitted("groceries", &mut Input::default(), &mut list);
    let created = dir.path().join("groceries.md");
    assert!(matches!(outcome, SubmitOutcome::Created(ref note) if note.path() == created));
    assert!(created.is_file());
    assert_eq!(ctrl.state(), ControllerState::Viewing(0));
    assert_eq!(ctrl.editor().open, Some(created));
}

#[test]
fn escape_restores_full_list() {
    let (_dir, mut ctrl, mut list) =
        setup(&[("shopping.md", "buy milk"), ("todo.md", "call mom")]);
    let mut input = Input("mom".to_string());
    ctrl.on_query_changed("mom", &mut list);
    assert_eq!(ctrl.len(), 1);

    ctrl.clear_query(&mut input, &mut list);
    assert_eq!(input.0, "");
    assert_eq!(ctrl.query(), "");
    assert_eq!(ctrl.len(), 2);
}

#[test]
fn notes_in_subdirectories_are_searched() {
    let (dir, mut ctrl, mut list) = setup(&[("top.md", "nothing")]);
    fs::create_dir(dir.path().join("work")).unwrap();
    fs::write(dir.path().join("work/plan.md"), "ship it").unwrap();

    ctrl.on_query_changed("ship", &mut list);
    assert_eq!(ctrl.len(), 1);
    assert_eq!(ctrl.editor().open, Some(dir.path().join("work/plan.md")));
}
