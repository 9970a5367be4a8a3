//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use nannou_osc as osc;
use std::net::UdpSocket;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::models::DisplaySink;

/// Remembers every update. `failing()` also records but reports each call as an error.
#[derive(Debug, Default)]
pub struct RecordingSink {
    updates: Vec<String>,
    stops: usize,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn updates(&self) -> Vec<&str> {
        self.updates.iter().map(String::as_str).collect()
    }

    pub fn stop_count(&self) -> usize {
        self.stops
    }
}

impl DisplaySink for RecordingSink {
    fn update(&mut self, text: &str) -> Result<()> {
        self.updates.push(text.to_string());
        if self.fail {
            return Err(Error::Osc("send failed".to_string()));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.stops += 1;
        Ok(())
    }
}

/// A UDP port that was free a moment ago.
pub fn free_port() -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap().port()
}

/// Decoded messages from `receiver`, waiting up to two seconds for `count` of them.
pub fn recv_messages(receiver: &osc::Receiver, count: usize) -> Vec<osc::Message> {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut messages = Vec::new();
    while messages.len() < count && Instant::now() < deadline {
        for (packet, _addr) in receiver.try_iter() {
            messages.extend(packet.into_msgs());
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    messages
}
