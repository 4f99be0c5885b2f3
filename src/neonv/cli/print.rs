use colored::Colorize;
use neonv::commands::{CmdMessage, MessageLevel};
use neonv::model::{MatchResult, MatchSpan};
use std::fs;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const SNIPPET_CONTEXT: usize = 30;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_matches(matches: &[MatchResult], note_ext: &str) {
    if matches.is_empty() {
        println!("No notes found.");
        return;
    }
    for (i, m) in matches.iter().enumerate() {
        println!("{}", format_row(i, &m.note.display_name(note_ext), None));
        if let Some(line) = content_snippet(m) {
            println!("{}", line);
        }
    }
}

/// One sidebar row: index, marker for the selection, display name.
pub(super) fn format_row(index: usize, label: &str, selected: Option<usize>) -> String {
    let marker = if selected == Some(index) { ">" } else { " " };
    let idx = format!("{:>3}. ", index + 1);
    let prefix_width = 2 + idx.width();
    let name = truncate_to_width(label, LINE_WIDTH.saturating_sub(prefix_width));
    if selected == Some(index) {
        format!("{} {}{}", marker.yellow(), idx.yellow(), name.bold())
    } else {
        format!("{} {}{}", marker, idx.dimmed(), name)
    }
}

fn content_snippet(m: &MatchResult) -> Option<String> {
    let span = m.span?;
    let content = fs::read(m.note.path()).ok()?;
    let (before, hit, after) = snippet(&content, span)?;
    Some(format!(
        "        {}{}{}",
        before.dimmed(),
        hit.yellow().bold(),
        after.dimmed()
    ))
}

/// Splits the line around `span` into (before, hit, after), each trimmed to
/// a bit of context. Returns `None` if the span does not fit `content`.
pub(super) fn snippet(content: &[u8], span: MatchSpan) -> Option<(String, String, String)> {
    if span.start > span.end || span.end > content.len() {
        return None;
    }
    let line_start = content[..span.start]
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |p| p + 1);
    let line_end = content[span.end..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(content.len(), |p| span.end + p);

    let before = String::from_utf8_lossy(&content[line_start..span.start]);
    let hit = String::from_utf8_lossy(&content[span.start..span.end]);
    let after = String::from_utf8_lossy(&content[span.end..line_end]);

    let before_chars = before.chars().count();
    let before = if before_chars > SNIPPET_CONTEXT {
        let tail: String = before.chars().skip(before_chars - SNIPPET_CONTEXT).collect();
        format!("…{}", tail.trim_start())
    } else {
        before.trim_start().to_string()
    };
    let after = if after.chars().count() > SNIPPET_CONTEXT {
        let head: String = after.chars().take(SNIPPET_CONTEXT).collect();
        format!("{}…", head.trim_end())
    } else {
        after.trim_end().to_string()
    };

    Some((before, hit.into_owned(), after))
}

pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
