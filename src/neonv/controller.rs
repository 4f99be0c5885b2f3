//! # Selection Controller
//!
//! Keeps three things consistent: the match list shown in the sidebar, the
//! selected index, and the buffer open in the remote editor.
//!
//! ```text
//!            query changed, 0 hits
//!   ┌──────────────────────────────────────────┐
//!   ▼                                          │
//! Empty ──query changed, hits──▶ Viewing(0) ───┤
//!                                  │   ▲       │
//!                       unselected │   │ item selected / nav key
//!                                  ▼   │       │
//!                                  Idle ───────┘
//! ```
//!
//! Every move away from a note force-closes its buffer. Unsaved edits in
//! the editor are dropped, never written. A query change always snaps to
//! the first hit, even if the previously open note is still listed.
//!
//! Widgets are reached only through [`NoteListView`] and [`SearchInput`].
//! Adapters forward widget events to the `on_*` methods. Programmatic
//! calls the controller makes on a widget (`select`, `set_text`) must not
//! echo back as events.
//!
//! Errors after startup never escape: they are logged, queued as notices
//! (see [`SelectionController::take_messages`]) and the controller lands
//! in `Empty` or `Idle`.

use crate::commands::create;
use crate::commands::filter::{self, UnreadablePolicy};
use crate::commands::CmdMessage;
use crate::editor::RemoteEditor;
use crate::error::{NeonvError, Result};
use crate::model::{MatchResult, NoteFile};
use crate::store::NoteStore;
use log::{debug, error, info};
use std::borrow::Cow;

/// The sidebar list, as the controller sees it.
pub trait NoteListView {
    /// Item count changed; re-read length and labels from the controller.
    fn refresh(&mut self, len: usize);

    /// Highlight `index`, which may be out of range. Returns the index the
    /// list actually selected, or `None` if it rejected the request.
    fn select(&mut self, index: isize) -> Option<usize>;

    fn unselect_all(&mut self);

    fn scroll_to_top(&mut self);
}

/// The search bar, as the controller sees it.
pub trait SearchInput {
    fn set_text(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
}

impl NavKey {
    fn delta(self) -> isize {
        match self {
            NavKey::Next => 1,
            NavKey::Previous => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No matches, no buffer.
    Empty,
    /// Matches listed, no buffer.
    Idle,
    /// Match `i` open in preview mode and selected in the list.
    Viewing(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// There were no matches, so a note named after the query was created.
    Created(NoteFile),
    /// There were matches; the adapter should focus the editor.
    FocusEditor,
    /// Creating the note failed; see the queued notice.
    Rejected,
}

pub struct SelectionController<S: NoteStore, E: RemoteEditor> {
    store: S,
    editor: E,
    note_ext: String,
    policy: UnreadablePolicy,
    query: String,
    matches: Vec<MatchResult>,
    selected: Option<usize>,
    /// Last index the list reported as selected; base for nav keys.
    cursor: usize,
    messages: Vec<CmdMessage>,
}

impl<S: NoteStore, E: RemoteEditor> SelectionController<S, E> {
    pub fn new(store: S, editor: E, note_ext: impl Into<String>, policy: UnreadablePolicy) -> Self {
        Self {
            store,
            editor,
            note_ext: note_ext.into(),
            policy,
            query: String::new(),
            matches: Vec::new(),
            selected: None,
            cursor: 0,
            messages: Vec::new(),
        }
    }

    /// Startup pass. Unlike later refreshes, a notes directory that cannot
    /// be created or listed is an error here.
    pub fn load<L: NoteListView>(&mut self, list: &mut L) -> Result<()> {
        self.store.ensure_directory_exists()?;
        self.query.clear();
        self.matches = filter::filter(&self.store, "", self.policy)?;
        info!(
            "event=controller_load module=controller notes={} root={}",
            self.matches.len(),
            self.store.root().display()
        );
        list.refresh(self.matches.len());
        if self.matches.is_empty() {
            self.enter_empty(list);
        }
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        match self.selected {
            _ if self.matches.is_empty() => ControllerState::Empty,
            Some(i) => ControllerState::Viewing(i),
            None => ControllerState::Idle,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[MatchResult] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// List label for row `index`.
    pub fn render_item(&self, index: usize) -> Option<Cow<'_, str>> {
        self.matches
            .get(index)
            .map(|m| m.note.display_name(&self.note_ext))
    }

    pub fn selected(&self) -> Option<&MatchResult> {
        self.selected.and_then(|i| self.matches.get(i))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Notices queued since the last call.
    pub fn take_messages(&mut self) -> Vec<CmdMessage> {
        std::mem::take(&mut self.messages)
    }

    pub fn on_query_changed<L: NoteListView>(&mut self, query: &str, list: &mut L) {
        self.query = query.to_string();
        self.rebuild(list);

        if self.matches.is_empty() {
            self.enter_empty(list);
        } else {
            self.open_index(0, list);
        }
    }

    pub fn on_item_selected<L: NoteListView>(&mut self, index: usize, list: &mut L) {
        self.open_index(index, list);
    }

    pub fn on_item_unselected(&mut self, index: usize) {
        debug!("event=unselect module=controller index={}", index);
        self.close_buffer();
        self.selected = None;
    }

    /// Moves the selection one row. The target goes to the list unchecked,
    /// so `-1` or `len` are possible; the list decides what to do with them.
    pub fn on_nav_key<L: NoteListView>(&mut self, key: NavKey, list: &mut L) {
        let requested = self.cursor as isize + key.delta();
        debug!(
            "event=nav module=controller key={:?} requested={}",
            key, requested
        );
        if let Some(index) = list.select(requested) {
            self.open_index(index, list);
        }
    }

    /// Enter in the search bar. With no matches the text becomes the title
    /// of a new note, and the search bar is set to the trimmed title.
    pub fn on_query_submitted<I: SearchInput, L: NoteListView>(
        &mut self,
        text: &str,
        input: &mut I,
        list: &mut L,
    ) -> SubmitOutcome {
        if !self.matches.is_empty() {
            return SubmitOutcome::FocusEditor;
        }

        self.close_buffer();
        let note = match create::create_note(&mut self.store, text, &self.note_ext) {
            Ok(note) => note,
            Err(err) => {
                self.report(err);
                return SubmitOutcome::Rejected;
            }
        };
        info!(
            "event=note_create module=controller path={}",
            note.path().display()
        );

        let title = text.trim();
        if title != text {
            input.set_text(title);
        }
        self.query = title.to_string();
        self.rebuild(list);
        let index = self
            .matches
            .iter()
            .position(|m| m.note == note)
            .unwrap_or(0);
        if self.matches.is_empty() {
            self.enter_empty(list);
        } else {
            self.open_index(index, list);
        }
        SubmitOutcome::Created(note)
    }

    /// Escape in the search bar: clear it and show everything.
    pub fn clear_query<I: SearchInput, L: NoteListView>(&mut self, input: &mut I, list: &mut L) {
        input.set_text("");
        self.on_query_changed("", list);
    }

    fn rebuild<L: NoteListView>(&mut self, list: &mut L) {
        self.matches = match filter::run(&self.store, &self.query, self.policy) {
            Ok(pass) => {
                for path in pass.unreadable {
                    self.messages.push(CmdMessage::warning(format!(
                        "Skipped unreadable path: {}",
                        path.display()
                    )));
                }
                pass.matches
            }
            Err(err) => {
                self.report(err);
                Vec::new()
            }
        };
        list.refresh(self.matches.len());
        list.scroll_to_top();
    }

    fn open_index<L: NoteListView>(&mut self, index: usize, list: &mut L) {
        self.close_buffer();

        let Some(path) = self.matches.get(index).map(|m| m.note.path.clone()) else {
            debug!("event=open_skip module=controller index={} len={}", index, self.matches.len());
            self.selected = None;
            list.unselect_all();
            return;
        };

        if let Err(err) = self.editor.open_buffer(&path) {
            self.report(err);
            self.selected = None;
            list.unselect_all();
            return;
        }
        if let Err(err) = self.editor.set_preview_mode() {
            self.report(err);
        }

        debug!(
            "event=open module=controller index={} path={}",
            index,
            path.display()
        );
        self.selected = Some(index);
        self.cursor = index;
        list.select(index as isize);
    }

    fn enter_empty<L: NoteListView>(&mut self, list: &mut L) {
        self.close_buffer();
        self.selected = None;
        self.cursor = 0;
        list.unselect_all();
    }

    fn close_buffer(&mut self) {
        if let Err(err) = self.editor.force_close_buffer() {
            self.report(err);
        }
    }

    fn report(&mut self, err: NeonvError) {
        error!("event=controller_error module=controller err={}", err);
        self.messages.push(CmdMessage::error(err.to_string()));
    }
}
