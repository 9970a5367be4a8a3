// src/config/config_load.rs
//
// loading config.toml

use log::{Level, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::config_types::{
    ControlConfig, DisplayConfig, LoggingConfig, OscConfig, PollConfig, SourceConfig,
};
use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "config.toml";

// Where the active config came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigOrigin {
    #[default]
    Defaults,
    File(PathBuf),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub poll: PollConfig,
    pub osc: OscConfig,
    pub display: DisplayConfig,
    pub control: ControlConfig,
    pub logging: LoggingConfig,

    // Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
    #[serde(skip)]
    pub origin: ConfigOrigin,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut dirs = Vec::new();

        // First try the executable's directory
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir);
        }

        // Fallback to the current working directory
        dirs.push(PathBuf::new());

        Self::load_from_dirs(&dirs)
    }

    /// First `config.toml` found in `dirs`, or the defaults when there is none.
    pub fn load_from_dirs(dirs: &[PathBuf]) -> Result<Self> {
        for dir in dirs {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Ok(Self::default())
    }

    /// Loads an explicit config file. Unlike `load`, a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::parse(&content, path)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.origin = ConfigOrigin::File(path.to_path_buf());
        Ok(config)
    }

    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn resolve_song_file(&self) -> PathBuf {
        self.resolve_path(&self.source.song_file)
    }

    pub fn resolve_pointer_file(&self) -> PathBuf {
        self.resolve_path(&self.source.pointer_file)
    }

    pub fn resolve_log_file(&self) -> Option<PathBuf> {
        let file = self.logging.file.trim();
        if file.is_empty() {
            None
        } else {
            Some(self.resolve_path(file))
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.logging.level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Messages about how the config was loaded. Loading happens before the
    /// logger exists, so the caller logs these once it is installed.
    pub fn startup_notices(&self) -> Vec<(Level, String)> {
        let mut notices = Vec::new();
        match &self.origin {
            ConfigOrigin::File(path) => {
                notices.push((Level::Info, format!("Loaded config from {}", path.display())));
            }
            ConfigOrigin::Defaults => {
                notices.push((
                    Level::Warn,
                    format!("No {} found, using defaults", CONFIG_FILE_NAME),
                ));
            }
        }
        if self.logging.level.parse::<LevelFilter>().is_err() {
            notices.push((
                Level::Warn,
                format!("Unknown log level {:?}, using info", self.logging.level),
            ));
        }
        notices.push((Level::Debug, format!("Config: {:?}", self)));
        notices
    }
}
