use image::GrayImage;

use crate::shared::frame::Frame;

// ITU-R BT.601 luma weights in 14-bit fixed point.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Collapses an RGB frame to single-channel intensity.
pub fn to_grayscale(frame: &Frame) -> GrayImage {
    debug_assert_eq!(frame.channels(), 3, "grayscale conversion expects RGB");
    let pixels = frame.as_ndarray();
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let (row, col) = (y as usize, x as usize);
        let r = pixels[[row, col, 0]] as u32;
        let g = pixels[[row, col, 1]] as u32;
        let b = pixels[[row, col, 2]] as u32;
        let luma = (r * R_WEIGHT + g * G_WEIGHT + b * B_WEIGHT + (1 << (SHIFT - 1))) >> SHIFT;
        image::Luma([luma as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::black([0, 0, 0], 0)]
    #[case::white([255, 255, 255], 255)]
    #[case::red([255, 0, 0], 76)]
    #[case::green([0, 255, 0], 150)]
    #[case::blue([0, 0, 255], 29)]
    #[case::grey([128, 128, 128], 128)]
    fn test_luma_of_solid_colours(#[case] rgb: [u8; 3], #[case] expected: u8) {
        let gray = to_grayscale(&Frame::filled(3, 2, rgb, 0));
        assert_eq!(gray.dimensions(), (3, 2));
        assert!(gray.pixels().all(|p| p.0[0] == expected));
    }

    #[test]
    fn test_keeps_pixel_positions() {
        let mut frame = Frame::filled(4, 3, [0, 0, 0], 0);
        frame.as_ndarray_mut()[[2, 1, 1]] = 255; // row 2, col 1, green
        let gray = to_grayscale(&frame);
        assert_eq!(gray.get_pixel(1, 2).0[0], 150);
        assert_eq!(gray.get_pixel(2, 1).0[0], 0);
    }
}
