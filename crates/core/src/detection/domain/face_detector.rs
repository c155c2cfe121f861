use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

/// Domain interface for face detection.
///
/// Detection only reports rectangles; drawing them is the annotator's job.
/// Implementations keep no state between frames, so `&self` suffices.
pub trait FaceDetector: Send {
    fn detect(&self, frame: &Frame) -> Vec<Rectangle>;
}
