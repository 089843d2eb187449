use crate::error::Result;
use crate::store::{DEFAULT_CAPACITY, MAX_INITIAL_CAPACITY};
use crate::validation::CourseBounds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TEXT_FILE: &str = "students.txt";
const DEFAULT_BINARY_FILE: &str = "students.bin";

/// Keys accepted by [`RosterConfig::get`] and [`RosterConfig::set`].
pub const KEYS: [&str; 7] = [
    "text-file",
    "binary-file",
    "course-min",
    "course-max",
    "console-width",
    "initial-capacity",
    "autoload",
];

/// Configuration for roster, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    /// Text roster file, relative to the data directory unless absolute
    #[serde(default = "default_text_file")]
    pub text_file: PathBuf,

    /// Binary roster file, relative to the data directory unless absolute
    #[serde(default = "default_binary_file")]
    pub binary_file: PathBuf,

    #[serde(default = "default_course_min")]
    pub course_min: i32,

    #[serde(default = "default_course_max")]
    pub course_max: i32,

    /// Fixed table width; probed from the terminal when unset
    #[serde(default)]
    pub console_width: Option<usize>,

    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Load the roster files when a session starts
    #[serde(default = "default_autoload")]
    pub autoload: bool,
}

fn default_text_file() -> PathBuf {
    PathBuf::from(DEFAULT_TEXT_FILE)
}

fn default_binary_file() -> PathBuf {
    PathBuf::from(DEFAULT_BINARY_FILE)
}

fn default_course_min() -> i32 {
    CourseBounds::default().min
}

fn default_course_max() -> i32 {
    CourseBounds::default().max
}

fn default_initial_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_autoload() -> bool {
    true
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            text_file: default_text_file(),
            binary_file: default_binary_file(),
            course_min: default_course_min(),
            course_max: default_course_max(),
            console_width: None,
            initial_capacity: default_initial_capacity(),
            autoload: default_autoload(),
        }
    }
}

impl RosterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: RosterConfig = serde_json::from_str(&content)?;
        if !(1..=MAX_INITIAL_CAPACITY).contains(&config.initial_capacity) {
            warn!(
                "initial_capacity {} in {} is out of range, using {}",
                config.initial_capacity,
                config_path.display(),
                config.initial_capacity.clamp(1, MAX_INITIAL_CAPACITY)
            );
            config.initial_capacity = config.initial_capacity.clamp(1, MAX_INITIAL_CAPACITY);
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn course_bounds(&self) -> CourseBounds {
        CourseBounds {
            min: self.course_min,
            max: self.course_max,
        }
    }

    pub fn text_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.text_file)
    }

    pub fn binary_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.binary_file)
    }

    /// Current value of a key, formatted for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "text-file" => self.text_file.display().to_string(),
            "binary-file" => self.binary_file.display().to_string(),
            "course-min" => self.course_min.to_string(),
            "course-max" => self.course_max.to_string(),
            "console-width" => match self.console_width {
                Some(width) => width.to_string(),
                None => "auto".to_string(),
            },
            "initial-capacity" => self.initial_capacity.to_string(),
            "autoload" => self.autoload.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Parses `value` into the field named by `key`.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "text-file" => self.text_file = non_empty_path(key, value)?,
            "binary-file" => self.binary_file = non_empty_path(key, value)?,
            "course-min" => {
                let min = parse_number::<i32>(key, value)?;
                if min > self.course_max {
                    return Err(format!(
                        "course-min {} exceeds course-max {}",
                        min, self.course_max
                    ));
                }
                self.course_min = min;
            }
            "course-max" => {
                let max = parse_number::<i32>(key, value)?;
                if max < self.course_min {
                    return Err(format!(
                        "course-max {} is below course-min {}",
                        max, self.course_min
                    ));
                }
                self.course_max = max;
            }
            "console-width" => {
                self.console_width = if value == "auto" {
                    None
                } else {
                    Some(parse_number::<usize>(key, value)?)
                };
            }
            "initial-capacity" => {
                let capacity = parse_number::<usize>(key, value)?;
                if !(1..=MAX_INITIAL_CAPACITY).contains(&capacity) {
                    return Err(format!(
                        "initial-capacity must be between 1 and {}",
                        MAX_INITIAL_CAPACITY
                    ));
                }
                self.initial_capacity = capacity;
            }
            "autoload" => {
                self.autoload = value
                    .parse::<bool>()
                    .map_err(|_| format!("autoload must be true or false, got '{}'", value))?;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> std::result::Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("{} must be a number, got '{}'", key, value))
}

fn non_empty_path(key: &str, value: &str) -> std::result::Result<PathBuf, String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", key));
    }
    Ok(PathBuf::from(value))
}
