// src/lib.rs
//
// songosc: shows the song in a text file on a VRChat avatar via OSC

pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
