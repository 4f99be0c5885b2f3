use super::rpc::RpcSession;
use super::RemoteEditor;
use crate::error::{NeonvError, Result};
use log::{debug, info};
use rmpv::Value;
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// An `nvim --embed` child process driven over msgpack-RPC.
///
/// The child is started in the notes directory, without user config
/// (`--clean`) and without swap files (`-n`). It is killed on drop.
pub struct NvimEditor {
    child: Child,
    session: RpcSession<ChildStdout, ChildStdin>,
}

impl NvimEditor {
    pub fn spawn(nvim: &str, notes_dir: &Path) -> Result<Self> {
        let mut child = Command::new(nvim)
            .args(["--embed", "--clean", "-n"])
            .current_dir(notes_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| NeonvError::Remote(format!("Failed to launch '{}': {}", nvim, e)))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let (stdin, stdout) = match (stdin, stdout) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                return Err(NeonvError::Remote(format!("No stdio pipes for '{}'", nvim)));
            }
        };

        info!(
            "event=editor_spawn module=editor nvim={} pid={} cwd={}",
            nvim,
            child.id(),
            notes_dir.display()
        );
        Ok(Self {
            child,
            session: RpcSession::new(stdout, stdin),
        })
    }

    pub fn command(&mut self, command: &str) -> Result<()> {
        debug!("event=editor_command module=editor command={:?}", command);
        self.session
            .call("nvim_command", vec![Value::from(command)])
            .map(|_| ())
    }

    fn fnameescape(&mut self, path: &Path) -> Result<String> {
        let raw = path.to_string_lossy();
        let escaped = self.session.call(
            "nvim_call_function",
            vec![
                Value::from("fnameescape"),
                Value::Array(vec![Value::from(raw.into_owned())]),
            ],
        )?;
        escaped
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| NeonvError::Rpc(format!("fnameescape returned {}", escaped)))
    }
}

impl RemoteEditor for NvimEditor {
    fn open_buffer(&mut self, path: &Path) -> Result<()> {
        let escaped = self.fnameescape(path)?;
        self.command(&format!("edit {}", escaped))
    }

    fn force_close_buffer(&mut self) -> Result<()> {
        self.command("bdelete!")
    }

    fn set_preview_mode(&mut self) -> Result<()> {
        self.command("stopinsert | setlocal nomodifiable")
    }

    fn run_startup_script(&mut self, script: &str) -> Result<()> {
        self.session
            .call(
                "nvim_exec_lua",
                vec![Value::from(script), Value::Array(Vec::new())],
            )
            .map(|_| ())
    }
}

impl Drop for NvimEditor {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
