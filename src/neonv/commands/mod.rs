use crate::config::NeonvConfig;
use crate::model::{MatchResult, NoteFile};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod filter;
pub mod init;
pub mod list;
pub mod search;

/// Where neonv keeps its files.
#[derive(Debug, Clone)]
pub struct NeonvPaths {
    /// Holds `config.json` and the notes directory.
    pub data: PathBuf,
    pub notes: PathBuf,
}

impl NeonvPaths {
    pub fn new(data: impl Into<PathBuf>) -> Self {
        let data = data.into();
        let notes = data.join("notes");
        Self { data, notes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub matches: Vec<MatchResult>,
    pub created: Option<NoteFile>,
    pub paths: Vec<PathBuf>,
    pub config: Option<NeonvConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_matches(mut self, matches: Vec<MatchResult>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_created(mut self, note: NoteFile) -> Self {
        self.created = Some(note);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: NeonvConfig) -> Self {
        self.config = Some(config);
        self
    }
}
