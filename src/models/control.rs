// src/models/control.rs
//
// Media controls sent by the avatar and the player actions they turn into

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    Off,
    /// Repeat the playlist or album
    Context,
    Track,
}

impl RepeatMode {
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(RepeatMode::Off),
            1 => Some(RepeatMode::Context),
            2 => Some(RepeatMode::Track),
            _ => None,
        }
    }
}

/// One decoded `/avatar/parameters/*` message.
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarCommand {
    PlayPause(bool),
    Next(bool),
    Previous(bool),
    Shuffle(bool),
    Repeat(RepeatMode),
    /// Hand is on the seek slider
    InSlider(bool),
    SliderPosition(f32),
    InVolumeSlider(bool),
    VolumePosition(f32),
    /// Value to pass through to the `chan1` parameter
    Ramp(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    TogglePlayback,
    Next,
    Previous,
    SetShuffle(bool),
    SetRepeat(RepeatMode),
    /// Fraction of the track, 0.0 to 1.0
    Seek(f32),
    /// Percent
    SetVolume(u8),
    RelayChannel(f32),
}

impl PlayerAction {
    /// Avatar parameter to echo back after the action, if any.
    pub fn feedback(&self) -> Option<(&'static str, f32)> {
        match self {
            PlayerAction::Seek(fraction) => Some(("slider", *fraction)),
            PlayerAction::RelayChannel(value) => Some(("chan1", *value)),
            _ => None,
        }
    }
}
