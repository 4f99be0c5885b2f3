//! # CLI Layer
//!
//! One possible front-end for neonv. This layer is the only place that:
//! - parses arguments (clap, see `args.rs`)
//! - prints to stdout/stderr
//! - decides exit codes
//!
//! One-shot subcommands go through [`NeonvApi`]. `browse` (the default)
//! hands the store to a [`neonv::controller::SelectionController`] and
//! drives it from the terminal; see `browse.rs`.

mod browse;
mod print;

use crate::args::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use neonv::api::NeonvApi;
use neonv::commands::config::ConfigAction;
use neonv::commands::NeonvPaths;
use neonv::config::NeonvConfig;
use neonv::error::{NeonvError, Result};
use neonv::logging;
use neonv::store::fs::FileStore;
use neonv::store::NoteStore;
use print::{print_matches, print_messages};
use std::env;
use std::path::PathBuf;

const HOME_ENV: &str = "NEONV_HOME";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(logging::resolve_level(cli.verbose)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut api = init_api()?;

    match cli.command {
        None | Some(Commands::Browse) => browse::run(api),
        Some(Commands::List) => handle_list(&api),
        Some(Commands::Search { query, json }) => handle_search(&api, &query, json),
        Some(Commands::New { title }) => handle_new(&mut api, &title),
        Some(Commands::Path) => handle_path(&api),
        Some(Commands::Config { key, value }) => handle_config(&mut api, key, value),
        Some(Commands::Init) => handle_init(&api),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("com", "neonv", "neonv")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NeonvError::Config("Could not determine data directory".to_string()))
}

/// Builds the API. The notes directory must exist afterwards; failing to
/// create it ends the program.
fn init_api() -> Result<NeonvApi<FileStore>> {
    let paths = NeonvPaths::new(data_dir()?);
    let config = NeonvConfig::load(&paths.data)?;
    let store = FileStore::new(&paths.notes);
    store.ensure_directory_exists()?;
    Ok(NeonvApi::new(store, paths, config))
}

fn handle_list(api: &NeonvApi<FileStore>) -> Result<()> {
    let result = api.list_notes()?;
    print_matches(&result.matches, api.config().file_ext());
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(api: &NeonvApi<FileStore>, query: &str, json: bool) -> Result<()> {
    let result = api.search_notes(query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.matches)?);
    } else {
        print_matches(&result.matches, api.config().file_ext());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_new(api: &mut NeonvApi<FileStore>, title: &str) -> Result<()> {
    let result = api.create_note(title)?;
    if let Some(note) = &result.created {
        println!("{}", note.path().display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_path(api: &NeonvApi<FileStore>) -> Result<()> {
    println!("{}", api.paths().notes.display());
    Ok(())
}

fn handle_config(
    api: &mut NeonvApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.configure(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in NeonvConfig::KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(api: &NeonvApi<FileStore>) -> Result<()> {
    let result = api.init()?;
    print_messages(&result.messages);
    Ok(())
}
