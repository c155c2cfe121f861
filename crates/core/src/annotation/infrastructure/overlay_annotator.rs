use image::{ImageBuffer, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::shared::constants::{
    LABEL_COLOR, LABEL_ORIGIN, LABEL_SCALE, OUTLINE_COLOR, OUTLINE_THICKNESS,
};
use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

use super::bitmap_font;

/// Outlines every face and stamps the `Faces: <count>` label.
pub struct OverlayAnnotator {
    outline_color: [u8; 3],
    outline_thickness: u32,
    label_color: [u8; 3],
    label_origin: (i32, i32),
    label_scale: u32,
}

impl OverlayAnnotator {
    pub fn new() -> Self {
        Self {
            outline_color: OUTLINE_COLOR,
            outline_thickness: OUTLINE_THICKNESS,
            label_color: LABEL_COLOR,
            label_origin: LABEL_ORIGIN,
            label_scale: LABEL_SCALE,
        }
    }

    pub fn label(count: usize) -> String {
        format!("Faces: {count}")
    }

    /// Draws an outline along `x..=x + width` and `y..=y + height`.
    ///
    /// The stroke is centred on the edge; the extra pixel of an even
    /// thickness falls outside the rectangle.
    pub fn draw_outline(&self, frame: &mut Frame, rect: &Rectangle) {
        let (width, height) = (frame.width(), frame.height());
        let Some(mut canvas) =
            ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, height, frame.data_mut())
        else {
            log::warn!("Cannot annotate a frame that is not 3-channel RGB");
            return;
        };
        let thickness = self.outline_thickness as i32;
        for inset in -(thickness / 2)..thickness - thickness / 2 {
            let w = rect.width + 1 - 2 * inset;
            let h = rect.height + 1 - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let outline = Rect::at(rect.x + inset, rect.y + inset).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(&mut canvas, outline, Rgb(self.outline_color));
        }
    }

    /// Renders `text` with its baseline starting at the label origin.
    /// Pixels outside the frame are clipped.
    pub fn draw_label(&self, frame: &mut Frame, text: &str) {
        let (width, height) = (frame.width() as i32, frame.height() as i32);
        let scale = self.label_scale as i32;
        let left = self.label_origin.0;
        let top = self.label_origin.1 - bitmap_font::GLYPH_HEIGHT as i32 * scale;
        let channels = frame.channels() as usize;
        let mut pixels = frame.as_ndarray_mut();

        for (col, row) in bitmap_font::lit_cells(text) {
            let cell_x = left + col as i32 * scale;
            let cell_y = top + row as i32 * scale;
            for y in cell_y..cell_y + scale {
                for x in cell_x..cell_x + scale {
                    if x < 0 || y < 0 || x >= width || y >= height {
                        continue;
                    }
                    for (c, &value) in self.label_color.iter().enumerate().take(channels) {
                        pixels[[y as usize, x as usize, c]] = value;
                    }
                }
            }
        }
    }
}

impl Default for OverlayAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAnnotator for OverlayAnnotator {
    fn annotate(&self, frame: &mut Frame, faces: &[Rectangle]) {
        for face in faces {
            self.draw_outline(frame, face);
        }
        self.draw_label(frame, &Self::label(faces.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLACK: [u8; 3] = [0, 0, 0];

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let arr = frame.as_ndarray();
        [arr[[y, x, 0]], arr[[y, x, 1]], arr[[y, x, 2]]]
    }

    #[test]
    fn test_label_text() {
        assert_eq!(OverlayAnnotator::label(0), "Faces: 0");
        assert_eq!(OverlayAnnotator::label(12), "Faces: 12");
    }

    #[test]
    fn test_outline_is_two_pixels_wide_and_hollow() {
        let annotator = OverlayAnnotator::new();
        let mut frame = Frame::filled(200, 200, BLACK, 0);
        annotator.draw_outline(&mut frame, &Rectangle::new(50, 60, 100, 90));

        // Ring on the edge itself: x..=x+w, y..=y+h
        assert_eq!(pixel(&frame, 50, 60), RED);
        assert_eq!(pixel(&frame, 150, 150), RED);
        assert_eq!(pixel(&frame, 100, 60), RED);
        assert_eq!(pixel(&frame, 50, 100), RED);
        // Second ring straddles the edge on the outside
        assert_eq!(pixel(&frame, 49, 59), RED);
        assert_eq!(pixel(&frame, 151, 151), RED);
        assert_eq!(pixel(&frame, 151, 100), RED);
        // Inside the edge and the centre stay untouched
        assert_eq!(pixel(&frame, 51, 100), BLACK);
        assert_eq!(pixel(&frame, 149, 149), BLACK);
        assert_eq!(pixel(&frame, 100, 100), BLACK);
        // Nothing further out
        assert_eq!(pixel(&frame, 48, 100), BLACK);
        assert_eq!(pixel(&frame, 152, 100), BLACK);
    }

    #[test]
    fn test_outline_is_clipped_at_frame_edge() {
        let annotator = OverlayAnnotator::new();
        let mut frame = Frame::filled(60, 60, BLACK, 0);
        annotator.draw_outline(&mut frame, &Rectangle::new(30, 30, 100, 100));
        assert_eq!(pixel(&frame, 30, 45), RED);
        assert_eq!(pixel(&frame, 59, 30), RED);
        assert_eq!(pixel(&frame, 29, 45), RED);
    }

    #[test]
    fn test_outline_at_origin_clips_outer_ring() {
        let annotator = OverlayAnnotator::new();
        let mut frame = Frame::filled(80, 80, BLACK, 0);
        annotator.draw_outline(&mut frame, &Rectangle::new(0, 0, 60, 60));
        assert_eq!(pixel(&frame, 0, 0), RED);
        assert_eq!(pixel(&frame, 61, 30), RED);
        assert_eq!(pixel(&frame, 1, 30), BLACK);
    }

    #[test]
    fn test_odd_thickness_is_centred_on_edge() {
        let annotator = OverlayAnnotator {
            outline_thickness: 3,
            ..OverlayAnnotator::new()
        };
        let mut frame = Frame::filled(200, 200, BLACK, 0);
        annotator.draw_outline(&mut frame, &Rectangle::new(50, 60, 100, 90));
        assert_eq!(pixel(&frame, 49, 100), RED);
        assert_eq!(pixel(&frame, 50, 100), RED);
        assert_eq!(pixel(&frame, 51, 100), RED);
        assert_eq!(pixel(&frame, 48, 100), BLACK);
        assert_eq!(pixel(&frame, 52, 100), BLACK);
    }

    #[test]
    fn test_label_is_drawn_in_green_above_baseline() {
        let annotator = OverlayAnnotator::new();
        let mut frame = Frame::filled(200, 100, BLACK, 0);
        annotator.draw_label(&mut frame, "F");

        // Top bar of 'F' spans the first cell row: y in 9..12, x in 10..25.
        assert_eq!(pixel(&frame, 10, 9), GREEN);
        assert_eq!(pixel(&frame, 24, 11), GREEN);
        // Stem reaches the baseline row but not past it.
        assert_eq!(pixel(&frame, 10, 29), GREEN);
        assert_eq!(pixel(&frame, 10, 30), BLACK);
        assert_eq!(pixel(&frame, 10, 8), BLACK);
    }

    #[test]
    fn test_label_is_clipped_on_tiny_frames() {
        let annotator = OverlayAnnotator::new();
        let mut frame = Frame::filled(12, 12, BLACK, 0);
        annotator.draw_label(&mut frame, "Faces: 3");
        assert_eq!(pixel(&frame, 10, 9), GREEN);
    }

    #[test]
    fn test_annotate_outlines_each_face_and_counts_them() {
        let annotator = OverlayAnnotator::new();
        let faces = [Rectangle::new(20, 50, 60, 60), Rectangle::new(120, 50, 60, 60)];

        let mut frame = Frame::filled(200, 150, BLACK, 0);
        annotator.annotate(&mut frame, &faces);

        let mut expected = Frame::filled(200, 150, BLACK, 0);
        annotator.draw_outline(&mut expected, &faces[0]);
        annotator.draw_outline(&mut expected, &faces[1]);
        annotator.draw_label(&mut expected, "Faces: 2");

        assert_eq!(frame, expected);
    }
}
