use crate::commands::filter::UnreadablePolicy;
use crate::error::{NeonvError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".md";

/// Configuration for neonv, stored as `config.json` in the data directory
/// (next to, not inside, the notes directory).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NeonvConfig {
    /// Extension given to new notes and stripped from list labels
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Neovim binary to embed. Falls back to `$NEONV_NVIM`, then `nvim` on PATH.
    #[serde(default)]
    pub nvim: Option<String>,

    /// Fail the whole search when one note cannot be read
    #[serde(default)]
    pub abort_on_unreadable: bool,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

impl Default for NeonvConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            nvim: None,
            abort_on_unreadable: false,
        }
    }
}

impl NeonvConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NeonvError::Io)?;
        let config: NeonvConfig =
            serde_json::from_str(&content).map_err(NeonvError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NeonvError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NeonvError::Serialization)?;
        fs::write(config_path, content).map_err(NeonvError::Io)?;
        Ok(())
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }

    pub fn unreadable_policy(&self) -> UnreadablePolicy {
        if self.abort_on_unreadable {
            UnreadablePolicy::Abort
        } else {
            UnreadablePolicy::Skip
        }
    }

    /// Reads a key by its CLI name.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "file-ext" => Ok(self.file_ext.clone()),
            "nvim" => Ok(self.nvim.clone().unwrap_or_default()),
            "abort-on-unreadable" => Ok(self.abort_on_unreadable.to_string()),
            other => Err(NeonvError::Config(format!("Unknown config key: {}", other))),
        }
    }

    /// Sets a key by its CLI name. An empty `nvim` value clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "file-ext" => self.set_file_ext(value),
            "nvim" => {
                self.nvim = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "abort-on-unreadable" => {
                self.abort_on_unreadable = value.parse().map_err(|_| {
                    NeonvError::Config(format!("Expected true or false, got {:?}", value))
                })?
            }
            other => {
                return Err(NeonvError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    pub const KEYS: [&'static str; 3] = ["file-ext", "nvim", "abort-on-unreadable"];
}
