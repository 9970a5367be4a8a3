// src/services/control.rs
//
// Turns avatar media controls into player actions

use log::{info, warn};
use std::future::Future;
use std::time::Duration;

use crate::controllers::{OscController, OscSender};
use crate::models::{AvatarCommand, PlayerAction};

// How often the listener drains its socket
pub const CONTROL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Slider state between messages. Seek and volume fire when the hand leaves the slider.
#[derive(Debug, Default)]
pub struct ControlState {
    in_slider: bool,
    slider_position: f32,
    in_volume: bool,
    volume_position: f32,
}

impl ControlState {
    pub fn apply(&mut self, command: AvatarCommand) -> Option<PlayerAction> {
        match command {
            AvatarCommand::PlayPause(pressed) => pressed.then_some(PlayerAction::TogglePlayback),
            AvatarCommand::Next(pressed) => pressed.then_some(PlayerAction::Next),
            AvatarCommand::Previous(pressed) => pressed.then_some(PlayerAction::Previous),
            AvatarCommand::Shuffle(on) => Some(PlayerAction::SetShuffle(on)),
            AvatarCommand::Repeat(mode) => Some(PlayerAction::SetRepeat(mode)),
            AvatarCommand::InSlider(inside) => {
                let released = self.in_slider && !inside;
                self.in_slider = inside;
                // The slider's proximity reads 1.0 at the start of the track
                released.then(|| PlayerAction::Seek(round_to_hundredths(1.0 - self.slider_position)))
            }
            AvatarCommand::SliderPosition(position) => {
                if self.in_slider {
                    self.slider_position = position.clamp(0.0, 1.0);
                }
                None
            }
            AvatarCommand::InVolumeSlider(inside) => {
                let released = self.in_volume && !inside;
                self.in_volume = inside;
                released.then(|| PlayerAction::SetVolume((self.volume_position * 100.0) as u8))
            }
            AvatarCommand::VolumePosition(position) => {
                if self.in_volume {
                    self.volume_position = position.clamp(0.0, 1.0);
                }
                None
            }
            AvatarCommand::Ramp(value) => Some(PlayerAction::RelayChannel(value)),
        }
    }
}

fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

pub struct ControlListener {
    controller: OscController,
    state: ControlState,
    feedback: Option<OscSender>,
}

impl ControlListener {
    /// `feedback` receives the parameters echoed back by `PlayerAction::feedback`.
    pub fn new(controller: OscController, feedback: Option<OscSender>) -> Self {
        Self {
            controller,
            state: ControlState::default(),
            feedback,
        }
    }

    /// Handles everything waiting on the socket and returns the resulting actions.
    pub fn process(&mut self) -> Vec<PlayerAction> {
        self.controller.process_messages();
        let mut actions = Vec::new();
        for command in self.controller.take_commands() {
            if let Some(action) = self.state.apply(command) {
                self.dispatch(&action);
                actions.push(action);
            }
        }
        actions
    }

    fn dispatch(&self, action: &PlayerAction) {
        info!("Player action: {:?}", action);
        let (Some(sender), Some((name, value))) = (&self.feedback, action.feedback()) else {
            return;
        };
        if let Err(err) = sender.send_parameter(name, value) {
            warn!("Failed to send {} feedback: {}", name, err);
        }
    }

    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(CONTROL_POLL_INTERVAL);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.process();
                }
            }
        }
        info!("Control listener stopped");
    }
}
