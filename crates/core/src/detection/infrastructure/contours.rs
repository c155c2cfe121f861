use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::shared::rectangle::Rectangle;

/// Bounding boxes of the outermost contours in a binary edge map.
///
/// Contours nested inside another contour are skipped. Boxes are returned
/// in discovery order (raster scan from the top-left corner).
pub fn external_bounding_boxes(edges: &GrayImage) -> Vec<Rectangle> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .filter_map(|contour| Rectangle::bounding(contour.points.iter().map(|p| (p.x, p.y))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::drawing::draw_hollow_rect_mut;
    use imageproc::rect::Rect;

    const WHITE: image::Luma<u8> = image::Luma([255]);

    #[test]
    fn test_empty_map_has_no_contours() {
        assert!(external_bounding_boxes(&GrayImage::new(30, 30)).is_empty());
    }

    #[test]
    fn test_outline_yields_one_box_with_inclusive_size() {
        let mut edges = GrayImage::new(200, 200);
        draw_hollow_rect_mut(&mut edges, Rect::at(20, 30).of_size(100, 90), WHITE);
        assert_eq!(
            external_bounding_boxes(&edges),
            vec![Rectangle::new(20, 30, 100, 90)]
        );
    }

    #[test]
    fn test_nested_outline_is_skipped() {
        let mut edges = GrayImage::new(200, 200);
        draw_hollow_rect_mut(&mut edges, Rect::at(10, 10).of_size(150, 150), WHITE);
        draw_hollow_rect_mut(&mut edges, Rect::at(50, 50).of_size(40, 40), WHITE);
        assert_eq!(
            external_bounding_boxes(&edges),
            vec![Rectangle::new(10, 10, 150, 150)]
        );
    }

    #[test]
    fn test_separate_outlines_in_raster_order() {
        let mut edges = GrayImage::new(200, 200);
        draw_hollow_rect_mut(&mut edges, Rect::at(100, 120).of_size(30, 30), WHITE);
        draw_hollow_rect_mut(&mut edges, Rect::at(10, 10).of_size(60, 20), WHITE);
        assert_eq!(
            external_bounding_boxes(&edges),
            vec![
                Rectangle::new(10, 10, 60, 20),
                Rectangle::new(100, 120, 30, 30),
            ]
        );
    }

    #[test]
    fn test_open_curve_is_bounded_too() {
        let mut edges = GrayImage::new(50, 50);
        for x in 5..25 {
            edges.put_pixel(x, 12, WHITE);
        }
        assert_eq!(
            external_bounding_boxes(&edges),
            vec![Rectangle::new(5, 12, 20, 1)]
        );
    }
}
