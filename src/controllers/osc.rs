// src/controllers/osc.rs
// OSC output to VRChat

use log::debug;
use nannou_osc as osc;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::config::{DisplayConfig, OscConfig};
use crate::error::{Error, Result};
use crate::models::DisplaySink;

pub const CHATBOX_INPUT_ADDR: &str = "/chatbox/input";
pub const AVATAR_PARAMETER_PREFIX: &str = "/avatar/parameters/";

// Placeholder in DisplayConfig::template
pub const SONG_PLACEHOLDER: &str = "{song}";

pub struct OscSender {
    sender: osc::Sender,
    target: SocketAddr,
}

impl OscSender {
    pub fn new(target_addr: &str, target_port: u16) -> Result<Self> {
        let invalid = || Error::InvalidTarget {
            addr: target_addr.to_string(),
            port: target_port,
        };
        let target = (target_addr, target_port)
            .to_socket_addrs()
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)?;
        let sender = osc::sender().map_err(|e| Error::Osc(e.to_string()))?;

        Ok(Self { sender, target })
    }

    pub fn from_config(config: &OscConfig) -> Result<Self> {
        Self::new(&config.target_addr, config.target_port)
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// `immediate` skips the in-game keyboard, `notify` plays the chatbox sound.
    pub fn send_chatbox(&self, text: &str, immediate: bool, notify: bool) -> Result<()> {
        let addr = CHATBOX_INPUT_ADDR.to_string();
        let args = vec![
            osc::Type::String(text.to_string()),
            osc::Type::Bool(immediate),
            osc::Type::Bool(notify),
        ];
        self.send(addr, args)
    }

    pub fn send_parameter(&self, name: &str, value: f32) -> Result<()> {
        let addr = format!("{}{}", AVATAR_PARAMETER_PREFIX, name);
        let args = vec![osc::Type::Float(value)];
        self.send(addr, args)
    }

    pub fn send_bool_parameter(&self, name: &str, value: bool) -> Result<()> {
        let addr = format!("{}{}", AVATAR_PARAMETER_PREFIX, name);
        let args = vec![osc::Type::Bool(value)];
        self.send(addr, args)
    }

    fn send(&self, addr: String, args: Vec<osc::Type>) -> Result<()> {
        debug!("osc -> {} {} {:?}", self.target, addr, args);
        self.sender
            .send((addr, args), self.target)
            .map(|_| ())
            .map_err(|e| Error::Osc(e.to_string()))
    }
}

/// Shows the current song in the VRChat chatbox.
pub struct OscDisplay {
    sender: OscSender,
    template: String,
    notify_sound: bool,
    max_chars: usize,
    stopped: bool,
}

impl OscDisplay {
    pub fn new(sender: OscSender, display: &DisplayConfig) -> Self {
        Self {
            sender,
            template: display.template.clone(),
            notify_sound: display.notify_sound,
            max_chars: display.max_chars,
            stopped: false,
        }
    }

    pub fn render(&self, song: &str) -> String {
        render_text(&self.template, song, self.max_chars)
    }
}

impl DisplaySink for OscDisplay {
    fn update(&mut self, text: &str) -> Result<()> {
        if self.stopped {
            debug!("Display stopped, dropping {:?}", text);
            return Ok(());
        }
        let rendered = self.render(text);
        self.sender.send_chatbox(&rendered, true, self.notify_sound)
    }

    fn stop(&mut self) -> Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;
        self.sender.send_chatbox("", true, false)
    }
}

/// Fills the template and cuts the result to `max_chars` characters.
pub fn render_text(template: &str, song: &str, max_chars: usize) -> String {
    let text = if template.contains(SONG_PLACEHOLDER) {
        template.replace(SONG_PLACEHOLDER, song)
    } else {
        song.to_string()
    };
    text.chars().take(max_chars).collect()
}
