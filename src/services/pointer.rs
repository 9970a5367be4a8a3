// src/services/pointer.rs
//
// The pointer file remembers which song file the user picked on first run.

use log::{info, warn};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::picker::PathPicker;
use crate::config::Config;
use crate::error::{Error, Result};

pub struct PathPointer {
    path: PathBuf,
}

impl PathPointer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored path, if the pointer file exists and holds one.
    pub fn read(&self) -> Option<PathBuf> {
        match fs::read(&self.path) {
            Ok(contents) => {
                let stored = trim_ascii_whitespace(&contents);
                (!stored.is_empty()).then(|| path_from_bytes(stored))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!("Failed to read {}: {}", self.path.display(), err);
                None
            }
        }
    }

    pub fn store(&self, selected: &Path) -> Result<()> {
        fs::write(&self.path, path_to_bytes(selected)).map_err(|e| Error::io(&self.path, e))
    }

    /// Returns the stored path, asking `picker` and storing its answer when there is none.
    /// `Ok(None)` means the user made no selection.
    pub fn acquire(&self, picker: &mut dyn PathPicker) -> Result<Option<PathBuf>> {
        if let Some(stored) = self.read() {
            info!("File path already exists in {}", self.path.display());
            return Ok(Some(stored));
        }

        match picker.pick() {
            Some(selected) => {
                self.store(&selected)?;
                info!("File path saved: {}", selected.display());
                Ok(Some(selected))
            }
            None => {
                warn!("No file was selected");
                Ok(None)
            }
        }
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

// Unix paths are arbitrary bytes and are stored as-is
#[cfg(unix)]
fn path_to_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> Cow<'_, [u8]> {
    Cow::Owned(path.to_string_lossy().into_owned().into_bytes())
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Picks the file to poll: `source_override`, then the pointer file (asking `picker` when it is
/// empty and `pick_on_start` is set), then the configured song file.
pub fn resolve_song_path(
    config: &Config,
    source_override: Option<PathBuf>,
    picker: &mut dyn PathPicker,
) -> Result<PathBuf> {
    if let Some(path) = source_override {
        return Ok(path);
    }

    let pointer = PathPointer::new(config.resolve_pointer_file());
    let stored = if config.source.pick_on_start {
        pointer.acquire(picker)?
    } else {
        pointer.read()
    };

    Ok(stored.unwrap_or_else(|| config.resolve_song_file()))
}
