// src/config/config_types.rs
//
// Config sections for songosc. Every field has a default so a sparse config.toml still loads.

use serde::Deserialize;
use std::time::Duration;

pub const SLOW_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const FAST_POLL_INTERVAL: Duration = Duration::from_millis(200);

// VRChat listens for OSC input on 9000, sends avatar parameter changes to 9001
// and caps chatbox messages at 144 characters
pub const DEFAULT_OSC_PORT: u16 = 9000;
pub const DEFAULT_LISTEN_PORT: u16 = 9001;
pub const CHATBOX_MAX_CHARS: usize = 144;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub song_file: String,
    pub pointer_file: String,
    pub pick_on_start: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            song_file: "songConfig.txt".to_string(),
            pointer_file: "filepath.txt".to_string(),
            pick_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollPreset {
    /// Manual song changes
    #[default]
    Slow,
    /// Near real-time display updates
    Fast,
}

impl PollPreset {
    pub fn interval(self) -> Duration {
        match self {
            PollPreset::Slow => SLOW_POLL_INTERVAL,
            PollPreset::Fast => FAST_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub preset: PollPreset,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OscConfig {
    pub target_addr: String,
    pub target_port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            target_addr: "127.0.0.1".to_string(),
            target_port: DEFAULT_OSC_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub template: String,
    pub notify_sound: bool,
    pub max_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            template: "{song}".to_string(),
            notify_sound: false,
            max_chars: CHATBOX_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub enabled: bool,
    pub listen_port: u16,
    // Echo seek positions back to the avatar slider
    pub feedback: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_port: DEFAULT_LISTEN_PORT,
            feedback: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: String::new(),
        }
    }
}
