use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeonvError {
    #[error("Cannot open notes directory {}: {source}", path.display())]
    StartupIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read {} while searching: {source}", path.display())]
    ScanIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor command failed: {0}")]
    Remote(String),

    #[error("Malformed editor RPC message: {0}")]
    Rpc(String),

    #[error("Invalid note title: {0:?}")]
    InvalidTitle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NeonvError>;
