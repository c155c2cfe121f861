use image::GrayImage;

use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_shape_filter::FaceShapeFilter;
use crate::shared::constants::{BLUR_KERNEL_SIZE, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD};
use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

use super::{canny, contours, gaussian, grayscale};

/// Rule-based face detector: edges, outer contours and a shape filter.
///
/// Every square-ish closed outline of plausible size counts as a face.
/// There is no learned model, so false positives on arbitrary boxes and
/// misses on real faces are expected.
pub struct HeuristicFaceDetector {
    kernel: Vec<f32>,
    low_threshold: f32,
    high_threshold: f32,
    filter: FaceShapeFilter,
}

impl HeuristicFaceDetector {
    pub fn new() -> Self {
        Self {
            kernel: gaussian::gaussian_kernel_1d(BLUR_KERNEL_SIZE),
            low_threshold: CANNY_LOW_THRESHOLD,
            high_threshold: CANNY_HIGH_THRESHOLD,
            filter: FaceShapeFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: FaceShapeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Binary edge map the contours are extracted from.
    pub fn edge_map(&self, frame: &Frame) -> GrayImage {
        let gray = grayscale::to_grayscale(frame);
        let blurred = gaussian::gaussian_blur(&gray, &self.kernel);
        canny::canny(&blurred, self.low_threshold, self.high_threshold)
    }

    /// Bounding boxes of every outer contour, before shape filtering.
    pub fn candidates(&self, frame: &Frame) -> Vec<Rectangle> {
        contours::external_bounding_boxes(&self.edge_map(frame))
    }
}

impl Default for HeuristicFaceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceDetector for HeuristicFaceDetector {
    fn detect(&self, frame: &Frame) -> Vec<Rectangle> {
        let faces: Vec<Rectangle> = self
            .candidates(frame)
            .into_iter()
            .filter(|r| self.filter.accepts(r))
            .collect();
        log::trace!("Frame {}: {} face-like regions", frame.index(), faces.len());
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black frame with a filled white block.
    fn frame_with_block(x: u32, y: u32, w: u32, h: u32) -> Frame {
        let mut frame = Frame::filled(320, 240, [0, 0, 0], 0);
        {
            let mut pixels = frame.as_ndarray_mut();
            for row in y..y + h {
                for col in x..x + w {
                    for c in 0..3 {
                        pixels[[row as usize, col as usize, c]] = 255;
                    }
                }
            }
        }
        frame
    }

    #[test]
    fn test_uniform_frames_have_no_faces() {
        let detector = HeuristicFaceDetector::new();
        for rgb in [[0, 0, 0], [255, 255, 255], [12, 200, 90]] {
            let frame = Frame::filled(160, 120, rgb, 0);
            assert!(detector.edge_map(&frame).pixels().all(|p| p.0[0] == 0));
            assert!(detector.detect(&frame).is_empty());
        }
    }

    #[test]
    fn test_square_block_is_detected_near_its_bounds() {
        let detector = HeuristicFaceDetector::new();
        let faces = detector.detect(&frame_with_block(100, 60, 100, 90));

        assert_eq!(faces.len(), 1);
        let face = faces[0];
        assert!((face.x - 100).abs() <= 2, "x = {}", face.x);
        assert!((face.y - 60).abs() <= 2, "y = {}", face.y);
        assert!((face.width - 100).abs() <= 2, "width = {}", face.width);
        assert!((face.height - 90).abs() <= 2, "height = {}", face.height);
    }

    #[test]
    fn test_wide_block_is_a_candidate_but_not_a_face() {
        let detector = HeuristicFaceDetector::new();
        let frame = frame_with_block(100, 60, 100, 50);
        assert_eq!(detector.candidates(&frame).len(), 1);
        assert!(detector.detect(&frame).is_empty());
    }

    #[test]
    fn test_small_square_is_rejected_by_width() {
        let detector = HeuristicFaceDetector::new();
        let frame = frame_with_block(40, 40, 30, 30);
        assert_eq!(detector.candidates(&frame).len(), 1);
        assert!(detector.detect(&frame).is_empty());
    }

    #[test]
    fn test_custom_filter_is_applied() {
        let wide = FaceShapeFilter {
            min_aspect: 1.5,
            max_aspect: 2.5,
            ..FaceShapeFilter::default()
        };
        let detector = HeuristicFaceDetector::new().with_filter(wide);
        assert_eq!(detector.detect(&frame_with_block(100, 60, 100, 50)).len(), 1);
    }

    #[test]
    fn test_detection_does_not_modify_or_depend_on_history() {
        let detector = HeuristicFaceDetector::new();
        let frame = frame_with_block(100, 60, 100, 90);
        let before = frame.clone();

        let first = detector.detect(&frame);
        detector.detect(&Frame::filled(320, 240, [0, 0, 0], 1));
        let second = detector.detect(&frame);

        assert_eq!(first, second);
        assert_eq!(frame, before);
    }
}
