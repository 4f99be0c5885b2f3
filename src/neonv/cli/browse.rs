//! Terminal stand-in for the graphical shell.
//!
//! Each input line is one event:
//!
//! ```text
//! <text>     search bar changed to <text> (empty line shows everything)
//! :s         submit the search bar (creates a note when nothing matches)
//! :j / :k    next / previous note
//! :<n>       click row n
//! :u         unselect
//! :c         escape: clear the search bar
//! :q         quit
//! ```
//!
//! The editor process has no UI attached here, so the selected note is
//! previewed by printing its first lines.

use super::print::{format_row, print_messages};
use neonv::api::NeonvApi;
use neonv::controller::{
    ControllerState, NavKey, NoteListView, SearchInput, SelectionController, SubmitOutcome,
};
use neonv::editor::nvim::NvimEditor;
use neonv::editor::{resolve_nvim, RemoteEditor, STARTUP_SCRIPT};
use neonv::error::Result;
use neonv::store::fs::FileStore;
use neonv::store::NoteStore;
use std::fs;
use std::io::{self, BufRead, Write};

const PREVIEW_LINES: usize = 6;

#[derive(Debug, Default)]
struct TerminalList {
    len: usize,
    selected: Option<usize>,
}

impl NoteListView for TerminalList {
    fn refresh(&mut self, len: usize) {
        self.len = len;
        if self.selected.is_some_and(|i| i >= len) {
            self.selected = None;
        }
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

#[derive(Debug, Default)]
struct TerminalInput {
    text: String,
}

impl SearchInput for TerminalInput {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

enum Event {
    Changed(String),
    Submit,
    Nav(NavKey),
    Click(usize),
    Unselect,
    Clear,
    Quit,
    Unknown(String),
}

fn parse_event(line: &str) -> Event {
    let Some(command) = line.strip_prefix(':') else {
        return Event::Changed(line.to_string());
    };
    match command.trim() {
        "s" => Event::Submit,
        "j" => Event::Nav(NavKey::Next),
        "k" => Event::Nav(NavKey::Previous),
        "u" => Event::Unselect,
        "c" => Event::Clear,
        "q" => Event::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Event::Click(n - 1),
            _ => Event::Unknown(other.to_string()),
        },
    }
}

pub(super) fn run(api: NeonvApi<FileStore>) -> Result<()> {
    let nvim = resolve_nvim(api.config().nvim.as_deref())?;
    let mut editor = NvimEditor::spawn(&nvim, &api.paths().notes)?;
    if let Err(e) = editor.run_startup_script(STARTUP_SCRIPT) {
        eprintln!("Warning: startup script failed: {}", e);
    }

    let mut ctrl = api.into_controller(editor);
    let mut list = TerminalList::default();
    let mut input = TerminalInput::default();
    ctrl.load(&mut list)?;
    render(&mut ctrl, &list, &input);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_event(&line) {
            Event::Changed(text) => {
                input.set_text(&text);
                ctrl.on_query_changed(&text, &mut list);
            }
            Event::Submit => {
                let text = input.text.clone();
                let outcome = ctrl.on_query_submitted(&text, &mut input, &mut list);
                if outcome == SubmitOutcome::FocusEditor {
                    println!("(editor focused)");
                }
            }
            Event::Nav(key) => ctrl.on_nav_key(key, &mut list),
            Event::Click(index) => {
                if index >= list.len {
                    println!("No row {}", index + 1);
                } else {
                    if let Some(previous) = list.selected {
                        ctrl.on_item_unselected(previous);
                    }
                    if let Some(index) = list.select(index as isize) {
                        ctrl.on_item_selected(index, &mut list);
                    }
                }
            }
            Event::Unselect => {
                if let Some(previous) = list.selected.take() {
                    ctrl.on_item_unselected(previous);
                }
            }
            Event::Clear => ctrl.clear_query(&mut input, &mut list),
            Event::Quit => break,
            Event::Unknown(command) => println!("Unknown command :{}", command),
        }
        render(&mut ctrl, &list, &input);
    }
    Ok(())
}

fn render<S: NoteStore, E: RemoteEditor>(
    ctrl: &mut SelectionController<S, E>,
    list: &TerminalList,
    input: &TerminalInput,
) {
    println!();
    println!("search: {}", input.text);
    for i in 0..ctrl.len() {
        let label = ctrl.render_item(i).unwrap_or_default();
        println!("{}", format_row(i, &label, list.selected));
    }

    match ctrl.state() {
        ControllerState::Empty => println!("No notes. Type :s to create \"{}\".", input.text),
        ControllerState::Idle => {}
        ControllerState::Viewing(_) => {
            if let Some(m) = ctrl.selected() {
                let content = fs::read(m.note.path()).unwrap_or_default();
                let text = String::from_utf8_lossy(&content);
                println!("────────");
                for line in text.lines().take(PREVIEW_LINES) {
                    println!("{}", line);
                }
            }
        }
    }

    print_messages(&ctrl.take_messages());
    print!("> ");
    let _ = io::stdout().flush();
}
