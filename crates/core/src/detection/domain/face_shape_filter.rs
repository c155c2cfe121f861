use crate::shared::constants::{MAX_FACE_ASPECT, MAX_FACE_WIDTH, MIN_FACE_ASPECT, MIN_FACE_WIDTH};
use crate::shared::rectangle::Rectangle;

/// Geometric test deciding whether a bounding box is face-like.
///
/// All bounds are exclusive. Height is only constrained through the
/// aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceShapeFilter {
    pub min_aspect: f64,
    pub max_aspect: f64,
    pub min_width: i32,
    pub max_width: i32,
}

impl FaceShapeFilter {
    pub fn accepts(&self, rect: &Rectangle) -> bool {
        if rect.height <= 0 {
            return false;
        }
        let aspect = rect.aspect_ratio();
        self.min_aspect < aspect
            && aspect < self.max_aspect
            && self.min_width < rect.width
            && rect.width < self.max_width
    }
}

impl Default for FaceShapeFilter {
    fn default() -> Self {
        Self {
            min_aspect: MIN_FACE_ASPECT,
            max_aspect: MAX_FACE_ASPECT,
            min_width: MIN_FACE_WIDTH,
            max_width: MAX_FACE_WIDTH,
        }
    }
}
