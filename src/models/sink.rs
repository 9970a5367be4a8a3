// src/models/sink.rs
//
// The display end of the pipeline: anything that can show a line of text.

use crate::error::Result;

pub trait DisplaySink {
    /// Shows `text`. Called once per observed change, possibly many times.
    fn update(&mut self, text: &str) -> Result<()>;

    /// Releases the display. Called once when the poll loop ends.
    fn stop(&mut self) -> Result<()>;
}
