use crate::commands::{CmdMessage, CmdResult};
use crate::config::RosterConfig;
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// What `roster config` was asked to do.
#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads `config.json` under `data_dir`, then shows or changes one setting.
///
/// A rejected key or value becomes an error message and nothing is written.
pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = RosterConfig::load(data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => result.add_message(match config.get(&key) {
            Some(current) => CmdMessage::info(current),
            None => CmdMessage::error(format!("Unknown config key: {}", key)),
        }),
        ConfigAction::Set(key, value) => {
            if let Err(reason) = config.set(&key, &value) {
                debug!("Rejected config change {}={}: {}", key, value, reason);
                result.add_message(CmdMessage::error(reason));
                return Ok(result);
            }
            config.save(data_dir)?;
            let stored = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
            result = result.with_config(config);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn show_all_returns_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(RosterConfig::default()));
    }

    #[test]
    fn set_persists_and_show_key_reads_it_back() {
        let temp = TempDir::new().unwrap();

        let set = run(
            temp.path(),
            ConfigAction::Set("course-min".into(), "1".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].level, MessageLevel::Success);

        let shown = run(temp.path(), ConfigAction::ShowKey("course-min".into())).unwrap();
        assert_eq!(shown.messages[0].content, "1");
    }

    #[test]
    fn bad_key_or_value_is_reported_not_saved() {
        let temp = TempDir::new().unwrap();

        let unknown = run(temp.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(unknown.messages[0].level, MessageLevel::Error);

        let bad = run(
            temp.path(),
            ConfigAction::Set("course-max".into(), "many".into()),
        )
        .unwrap();
        assert_eq!(bad.messages[0].level, MessageLevel::Error);
        assert!(!temp.path().join("config.json").exists());
    }
}
