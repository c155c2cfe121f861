use std::path::PathBuf;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera device error: {0}")]
    Device(String),
    #[error("failed to decode frame: {0}")]
    Decode(String),
    #[error("no more frames available")]
    Exhausted,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Produces frames on demand from a single device opened at construction.
///
/// Any error from [`FrameSource::next_frame`] is fatal to the main loop;
/// implementations do not retry.
pub trait FrameSource {
    /// Blocks until the next frame is available.
    fn next_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Releases the underlying device. Safe to call more than once.
    fn release(&mut self);
}
