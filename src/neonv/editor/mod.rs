//! # Remote Editor
//!
//! neonv never edits text itself. Notes are shown in an external Neovim
//! process, and the rest of the crate talks to it only through the
//! [`RemoteEditor`] trait:
//!
//! - [`RemoteEditor::open_buffer`]: open a note file
//! - [`RemoteEditor::force_close_buffer`]: drop the current buffer, discarding edits
//! - [`RemoteEditor::set_preview_mode`]: make the current buffer read-only
//! - [`RemoteEditor::run_startup_script`]: run Lua once after spawning
//!
//! [`nvim::NvimEditor`] is the real implementation. Tests use
//! [`fixtures::RecordingEditor`], which records every call.

use crate::error::{NeonvError, Result};
use std::env;
use std::path::Path;

pub mod nvim;
pub mod rpc;

/// Lua run in every embedded Neovim right after it starts.
pub const STARTUP_SCRIPT: &str = include_str!("../init.lua");

/// Commands the selection logic issues against the editor, in order.
pub trait RemoteEditor {
    fn open_buffer(&mut self, path: &Path) -> Result<()>;

    /// Deletes the current buffer even if it has unsaved changes.
    fn force_close_buffer(&mut self) -> Result<()>;

    fn set_preview_mode(&mut self) -> Result<()>;

    fn run_startup_script(&mut self, script: &str) -> Result<()>;
}

/// Finds the Neovim binary to embed.
/// Checks the configured path, then $NEONV_NVIM, then `nvim` on PATH.
pub fn resolve_nvim(configured: Option<&str>) -> Result<String> {
    if let Some(path) = configured.filter(|p| !p.is_empty()) {
        return Ok(path.to_string());
    }

    if let Ok(path) = env::var("NEONV_NVIM") {
        if !path.is_empty() {
            return Ok(path);
        }
    }

    if let Some(path) = find_on_path("nvim") {
        return Ok(path);
    }

    Err(NeonvError::Remote(
        "No nvim found. Set it with `neonv config nvim <path>` or $NEONV_NVIM.".to_string(),
    ))
}

fn find_on_path(binary: &str) -> Option<String> {
    which::which(binary)
        .ok()
        .map(|path| path.to_string_lossy().into_owned())
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum EditorCall {
        Open(PathBuf),
        ForceClose,
        Preview,
        Startup,
    }

    /// Records calls. `fail_opens` makes every `open_buffer` fail.
    #[derive(Debug, Default)]
    pub struct RecordingEditor {
        pub calls: Vec<EditorCall>,
        pub fail_opens: bool,
    }

    impl RecordingEditor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Path of the buffer that is open after replaying the calls.
        pub fn open_buffer_path(&self) -> Option<&Path> {
            let mut open = None;
            for call in &self.calls {
                match call {
                    EditorCall::Open(path) => open = Some(path.as_path()),
                    EditorCall::ForceClose => open = None,
                    _ => {}
                }
            }
            open
        }

        pub fn last_call(&self) -> Option<&EditorCall> {
            self.calls.last()
        }
    }

    impl RemoteEditor for RecordingEditor {
        fn open_buffer(&mut self, path: &Path) -> Result<()> {
            if self.fail_opens {
                return Err(NeonvError::Remote(format!(
                    "E484: Can't open file {}",
                    path.display()
                )));
            }
            self.calls.push(EditorCall::Open(path.to_path_buf()));
            Ok(())
        }

        fn force_close_buffer(&mut self) -> Result<()> {
            self.calls.push(EditorCall::ForceClose);
            Ok(())
        }

        fn set_preview_mode(&mut self) -> Result<()> {
            self.calls.push(EditorCall::Preview);
            Ok(())
        }

        fn run_startup_script(&mut self, _script: &str) -> Result<()> {
            self.calls.push(EditorCall::Startup);
            Ok(())
        }
    }
}
