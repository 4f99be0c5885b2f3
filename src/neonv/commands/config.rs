use crate::commands::{CmdMessage, CmdResult, NeonvPaths};
use crate::config::NeonvConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &NeonvPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = NeonvConfig::load(&paths.data)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.data)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                config.get(&key)?
            )));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NeonvError;
    use tempfile::TempDir;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = TempDir::new().unwrap();
        let paths = NeonvPaths::new(dir.path());

        run(&paths, ConfigAction::Set("file-ext".into(), "txt".into())).unwrap();
        let result = run(&paths, ConfigAction::ShowKey("file-ext".into())).unwrap();
        assert_eq!(result.messages[0].content, "file-ext = .txt");
        assert_eq!(result.config.unwrap().file_ext, ".txt");
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = TempDir::new().unwrap();
        let paths = NeonvPaths::new(dir.path());
        let err = run(&paths, ConfigAction::ShowKey("theme".into())).unwrap_err();
        assert!(matches!(err, NeonvError::Config(_)));
    }
}
