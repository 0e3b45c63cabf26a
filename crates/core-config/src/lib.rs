//! Configuration loading and parsing.
//!
//! Parses `stencil.toml` (or an override path provided by the binary):
//! placeholder colors, the command sentinel, shell command triggers and the
//! log file location. Every section and field is optional. Unknown fields are
//! ignored so older binaries accept newer files. A file that fails to parse
//! is replaced by defaults; a prompt should never refuse to start over a
//! config typo. Loading happens before logging is configured (the log file
//! may come from the config), so the outcome is kept in [`LoadStatus`] and
//! reported by [`Config::log_status`] once a subscriber exists.

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub const FILE_NAME: &str = "stencil.toml";

/// Color names are resolved by the renderer; unknown names fall back there.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub pending: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CommandsConfig {
    #[serde(default = "CommandsConfig::default_sentinel")]
    pub sentinel: char,
    /// Trigger -> shell line.
    #[serde(default)]
    pub shell: BTreeMap<String, String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            sentinel: Self::default_sentinel(),
            shell: BTreeMap::new(),
        }
    }
}

impl CommandsConfig {
    const fn default_sentinel() -> char {
        ':'
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// How the config was obtained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Absent,
    Loaded,
    ParseFailed { error: String },
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub path: Option<PathBuf>,
    pub status: LoadStatus,
}

/// Best-effort config path: working directory first, then the platform config
/// dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    discover_in(&cwd, dirs::config_dir().as_deref())
}

pub fn discover_in(cwd: &Path, config_dir: Option<&Path>) -> PathBuf {
    let local = cwd.join(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = config_dir {
        return dir.join("stencil").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config {
            path: Some(path),
            ..Config::default()
        });
    };
    Ok(parse(content, path))
}

fn parse(content: String, path: PathBuf) -> Config {
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Config {
            raw: Some(content),
            file,
            path: Some(path),
            status: LoadStatus::Loaded,
        },
        Err(e) => Config {
            path: Some(path),
            status: LoadStatus::ParseFailed {
                error: e.to_string(),
            },
            ..Config::default()
        },
    }
}

impl Config {
    /// Report the load outcome under the `config` target.
    pub fn log_status(&self) {
        let path = self.path.as_deref().unwrap_or(Path::new(FILE_NAME)).display();
        match &self.status {
            LoadStatus::Absent => info!(target: "config", %path, "config_absent_using_defaults"),
            LoadStatus::Loaded => info!(
                target: "config",
                %path,
                shell_commands = self.file.commands.shell.len(),
                "config_loaded"
            ),
            LoadStatus::ParseFailed { error } => {
                warn!(target: "config", %path, %error, "config_parse_failed")
            }
        }
    }

    pub fn sentinel(&self) -> char {
        self.file.commands.sentinel
    }

    pub fn shell_commands(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.file
            .commands
            .shell
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.file.log.file.as_deref()
    }
}
