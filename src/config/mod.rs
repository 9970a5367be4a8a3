pub mod config_load;
pub mod config_types;

pub use config_load::{Config, ConfigOrigin, CONFIG_FILE_NAME};
pub use config_types::{
    ControlConfig, DisplayConfig, LoggingConfig, OscConfig, PollConfig, PollPreset, SourceConfig,
    CHATBOX_MAX_CHARS, DEFAULT_LISTEN_PORT, DEFAULT_OSC_PORT, FAST_POLL_INTERVAL, SLOW_POLL_INTERVAL,
};
