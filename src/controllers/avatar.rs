// src/controllers/avatar.rs
// OSC input from VRChat: avatar parameters used as media controls

use log::{debug, trace};
use nannou_osc as osc;

use crate::error::{Error, Result};
use crate::models::{AvatarCommand, RepeatMode};

use super::osc::AVATAR_PARAMETER_PREFIX;

pub const PLAY_PAUSE_PARAM: &str = "OSC_AUDIO_CONTROLS_PLAY_PAUSE";
pub const NEXT_PARAM: &str = "OSC_AUDIO_CONTROLS_NEXT";
pub const PREVIOUS_PARAM: &str = "OSC_AUDIO_CONTROLS_PREVIOUS";
pub const SHUFFLE_PARAM: &str = "shuffleSongState";
pub const REPEAT_PARAM: &str = "repeatSongState";
pub const IN_SLIDER_PARAM: &str = "inSlider";
pub const SLIDER_POSITION_PARAM: &str = "proxValue";
pub const IN_VOLUME_SLIDER_PARAM: &str = "inVolumeSlider";
pub const VOLUME_POSITION_PARAM: &str = "volumeSliderProx";
pub const RAMP_ADDR: &str = "/ramp";

pub struct OscController {
    command_queue: Vec<AvatarCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self> {
        let receiver = osc::receiver(port).map_err(|e| Error::Osc(e.to_string()))?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    /// Drains every packet waiting on the socket without blocking.
    pub fn process_messages(&mut self) {
        for (packet, addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match decode_message(&message) {
                    Some(command) => self.command_queue.push(command),
                    None => trace!("Ignoring OSC {} from {}", message.addr, addr),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<AvatarCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub fn decode_message(message: &osc::Message) -> Option<AvatarCommand> {
    if message.addr == RAMP_ADDR {
        return match &message.args[..] {
            [osc::Type::Float(value), ..] => Some(AvatarCommand::Ramp(*value)),
            _ => {
                debug!("{} without a float argument", RAMP_ADDR);
                None
            }
        };
    }

    let name = message.addr.strip_prefix(AVATAR_PARAMETER_PREFIX)?;
    let arg = message.args.first();
    let command = match name {
        PLAY_PAUSE_PARAM => AvatarCommand::PlayPause(as_bool(arg)?),
        NEXT_PARAM => AvatarCommand::Next(as_bool(arg)?),
        PREVIOUS_PARAM => AvatarCommand::Previous(as_bool(arg)?),
        SHUFFLE_PARAM => AvatarCommand::Shuffle(as_int(arg)? == 1),
        REPEAT_PARAM => {
            let index = as_int(arg)?;
            match RepeatMode::from_index(index) {
                Some(mode) => AvatarCommand::Repeat(mode),
                None => {
                    debug!("Invalid repeat state: {}", index);
                    return None;
                }
            }
        }
        IN_SLIDER_PARAM => AvatarCommand::InSlider(as_bool(arg)?),
        SLIDER_POSITION_PARAM => AvatarCommand::SliderPosition(as_float(arg)?),
        IN_VOLUME_SLIDER_PARAM => AvatarCommand::InVolumeSlider(as_bool(arg)?),
        VOLUME_POSITION_PARAM => AvatarCommand::VolumePosition(as_float(arg)?),
        _ => return None,
    };
    Some(command)
}

fn as_bool(arg: Option<&osc::Type>) -> Option<bool> {
    match arg? {
        osc::Type::Bool(value) => Some(*value),
        osc::Type::Int(value) => Some(*value != 0),
        other => {
            debug!("Expected a bool, got {:?}", other);
            None
        }
    }
}

fn as_int(arg: Option<&osc::Type>) -> Option<i32> {
    match arg? {
        osc::Type::Int(value) => Some(*value),
        osc::Type::Bool(value) => Some(i32::from(*value)),
        other => {
            debug!("Expected an int, got {:?}", other);
            None
        }
    }
}

fn as_float(arg: Option<&osc::Type>) -> Option<f32> {
    match arg? {
        osc::Type::Float(value) => Some(*value),
        osc::Type::Double(value) => Some(*value as f32),
        other => {
            debug!("Expected a float, got {:?}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::OscSender;
    use crate::test_support::free_port;
    use std::time::{Duration, Instant};

    fn param(name: &str, arg: osc::Type) -> osc::Message {
        osc::Message {
            addr: format!("{}{}", AVATAR_PARAMETER_PREFIX, name),
            args: vec![arg],
        }
    }

    #[test]
    fn test_decodes_button_parameters() {
        assert_eq!(
            decode_message(&param(PLAY_PAUSE_PARAM, osc::Type::Bool(true))),
            Some(AvatarCommand::PlayPause(true))
        );
        assert_eq!(
            decode_message(&param(NEXT_PARAM, osc::Type::Bool(false))),
            Some(AvatarCommand::Next(false))
        );
        assert_eq!(
            decode_message(&param(PREVIOUS_PARAM, osc::Type::Int(1))),
            Some(AvatarCommand::Previous(true))
        );
    }

    #[test]
    fn test_decodes_shuffle_and_repeat_ints() {
        assert_eq!(
            decode_message(&param(SHUFFLE_PARAM, osc::Type::Int(1))),
            Some(AvatarCommand::Shuffle(true))
        );
        assert_eq!(
            decode_message(&param(SHUFFLE_PARAM, osc::Type::Int(0))),
            Some(AvatarCommand::Shuffle(false))
        );
        assert_eq!(
            decode_message(&param(REPEAT_PARAM, osc::Type::Int(1))),
            Some(AvatarCommand::Repeat(RepeatMode::Context))
        );
        assert_eq!(
            decode_message(&param(REPEAT_PARAM, osc::Type::Int(2))),
            Some(AvatarCommand::Repeat(RepeatMode::Track))
        );
        assert_eq!(decode_message(&param(REPEAT_PARAM, osc::Type::Int(7))), None);
    }

    #[test]
    fn test_decodes_slider_parameters() {
        assert_eq!(
            decode_message(&param(IN_SLIDER_PARAM, osc::Type::Bool(true))),
            Some(AvatarCommand::InSlider(true))
        );
        assert_eq!(
            decode_message(&param(SLIDER_POSITION_PARAM, osc::Type::Float(0.25))),
            Some(AvatarCommand::SliderPosition(0.25))
        );
        assert_eq!(
            decode_message(&param(VOLUME_POSITION_PARAM, osc::Type::Float(0.5))),
            Some(AvatarCommand::VolumePosition(0.5))
        );
    }

    #[test]
    fn test_decodes_ramp() {
        let message = osc::Message {
            addr: RAMP_ADDR.to_string(),
            args: vec![osc::Type::Float(0.75)],
        };
        assert_eq!(decode_message(&message), Some(AvatarCommand::Ramp(0.75)));
    }

    #[test]
    fn test_ignores_unknown_and_malformed_messages() {
        assert_eq!(decode_message(&param("VelocityX", osc::Type::Float(1.0))), None);
        assert_eq!(
            decode_message(&param(SLIDER_POSITION_PARAM, osc::Type::String("x".into()))),
            None
        );
        let no_args = osc::Message {
            addr: format!("{}{}", AVATAR_PARAMETER_PREFIX, NEXT_PARAM),
            args: vec![],
        };
        assert_eq!(decode_message(&no_args), None);
        let chatbox = osc::Message {
            addr: "/chatbox/input".to_string(),
            args: vec![osc::Type::String("hi".into())],
        };
        assert_eq!(decode_message(&chatbox), None);
    }

    #[test]
    fn test_receives_commands_over_udp() {
        let port = free_port();
        let mut controller = OscController::new(port).unwrap();
        let sender = OscSender::new("127.0.0.1", port).unwrap();

        sender.send_parameter(SLIDER_POSITION_PARAM, 0.4).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut commands = Vec::new();
        while commands.is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            controller.process_messages();
            commands = controller.take_commands();
        }

        assert_eq!(commands, vec![AvatarCommand::SliderPosition(0.4)]);
    }
}
