// src/services/picker.rs
//
// Ways of asking the user which song file to poll

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub trait PathPicker {
    /// Returns `None` when the user made no selection.
    fn pick(&mut self) -> Option<PathBuf>;
}

/// Asks for a path on the terminal.
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptPicker<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PathPicker for PromptPicker<R, W> {
    fn pick(&mut self) -> Option<PathBuf> {
        // Prompt failures only cost us the prompt text
        let _ = write!(self.output, "Path to the song file: ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => parse_answer(&line),
        }
    }
}

// Drag-and-drop into a terminal wraps the path in quotes
fn parse_answer(line: &str) -> Option<PathBuf> {
    let answer = line.trim();
    let answer = answer
        .strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .or_else(|| answer.strip_prefix('\'').and_then(|a| a.strip_suffix('\'')))
        .unwrap_or(answer)
        .trim();

    if answer.is_empty() {
        None
    } else {
        Some(PathBuf::from(answer))
    }
}

/// Native "Open" dialog.
#[cfg(feature = "dialog")]
pub struct DialogPicker;

#[cfg(feature = "dialog")]
impl PathPicker for DialogPicker {
    fn pick(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select the song file")
            .add_filter("Text", &["txt"])
            .pick_file()
    }
}
