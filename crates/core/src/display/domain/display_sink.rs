use std::time::Duration;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("display window error: {0}")]
    Window(String),
}

/// Presents annotated frames and owns the operator's quit signal.
pub trait DisplaySink {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Waits at most `wait` for the quit command; `true` once it was given.
    fn poll_quit(&mut self, wait: Duration) -> bool;

    /// Closes the display surface. Safe to call more than once.
    fn close(&mut self);
}
