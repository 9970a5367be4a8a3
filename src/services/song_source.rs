// src/services/song_source.rs
//
// The song file written by the music player integration

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ReadOutcome;

#[derive(Debug, Clone)]
pub struct SongFile {
    path: PathBuf,
}

impl SongFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> ReadOutcome {
        match fs::read_to_string(&self.path) {
            Ok(contents) => ReadOutcome::from_contents(&contents),
            Err(err) => ReadOutcome::from_error(err),
        }
    }
}
