// src/models/song.rs
//
// Result of one read of the song file

use std::io;

#[derive(Debug)]
pub enum ReadOutcome {
    /// Trimmed, non-empty content
    Text(String),
    /// File exists but holds only whitespace
    Empty,
    Missing,
    Failed(io::Error),
}

impl ReadOutcome {
    pub fn from_contents(contents: &str) -> Self {
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            ReadOutcome::Empty
        } else {
            ReadOutcome::Text(trimmed.to_string())
        }
    }

    pub fn from_error(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ReadOutcome::Missing
        } else {
            ReadOutcome::Failed(err)
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ReadOutcome::Text(text) => Some(text),
            _ => None,
        }
    }
}
