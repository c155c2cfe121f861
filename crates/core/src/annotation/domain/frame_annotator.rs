use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

/// Draws detection results onto a frame in place.
pub trait FrameAnnotator: Send {
    fn annotate(&self, frame: &mut Frame, faces: &[Rectangle]);
}
