use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "neonv", version)]
#[command(about = "Search-as-you-type notes browser on top of an embedded Neovim", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose logging (same as NEONV_LOG_LEVEL=DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse notes interactively in an embedded Neovim (default)
    #[command(alias = "b")]
    Browse,

    /// List every note
    #[command(alias = "ls")]
    List,

    /// Search note names and contents, ignoring case and accents
    #[command(alias = "s")]
    Search {
        /// Text to look for
        query: String,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note (keeps an existing one with the same title)
    #[command(alias = "n")]
    New {
        /// Title of the note; the note extension is appended
        title: String,
    },

    /// Print the notes directory
    Path,

    /// Get or set configuration
    Config {
        /// Configuration key (file-ext, nvim, abort-on-unreadable)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the notes directory
    Init,
}
