use crate::api::{CmdMessage, CmdResult, MessageLevel, RosterApi};
use crate::config::RosterConfig;
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the data directory.
pub const HOME_ENV: &str = "ROSTER_HOME";
const LOCAL_DIR: &str = ".roster";

pub struct RosterContext {
    pub api: RosterApi<FsBackend>,
    pub config: RosterConfig,
    /// Messages from the startup load, for the caller to show.
    pub startup: CmdResult,
}

/// Picks the data directory: an explicit path, then `ROSTER_HOME`, then the
/// platform data directory, then `.roster` under `cwd`.
pub fn resolve_data_dir(
    explicit: Option<&Path>,
    env_home: Option<PathBuf>,
    cwd: &Path,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_home.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    ProjectDirs::from("com", "roster", "roster")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| cwd.join(LOCAL_DIR))
}

/// Builds the API over real files in `data_dir` and, when configured, loads
/// the saved roster.
///
/// A broken config file or a failed startup load does not stop the session;
/// both come back as warnings in [`RosterContext::startup`].
pub fn initialize(data_dir: PathBuf) -> RosterContext {
    let mut startup = CmdResult::default();

    let config = match RosterConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config in {}: {}", data_dir.display(), e);
            startup.add_message(CmdMessage::warning(format!(
                "Using default settings: {}",
                e
            )));
            RosterConfig::default()
        }
    };

    let backend = FsBackend::new(config.text_path(&data_dir), config.binary_path(&data_dir));
    debug!("Roster data directory: {}", data_dir.display());
    let mut api = RosterApi::new(backend, config.clone(), data_dir);

    if config.autoload {
        match api.autoload() {
            // Only problems are worth showing on every start.
            Ok(loaded) => startup.messages.extend(
                loaded
                    .messages
                    .into_iter()
                    .filter(|m| m.level != MessageLevel::Success),
            ),
            Err(e) => {
                warn!("Startup load failed: {}", e);
                startup.add_message(CmdMessage::warning(format!(
                    "Starting with an empty roster: {}",
                    e
                )));
            }
        }
    }

    RosterContext {
        api,
        config,
        startup,
    }
}
