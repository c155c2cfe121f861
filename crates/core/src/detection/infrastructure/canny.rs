use std::collections::VecDeque;

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

const EDGE: u8 = 255;
/// tan(22.5°), used to quantise gradient directions.
const TAN_22_5: f32 = 0.414_213_57;
/// tan(67.5°).
const TAN_67_5: f32 = 2.414_213_6;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Candidate {
    None,
    Weak,
    Strong,
}

/// Canny edge detector over an already smoothed image.
///
/// Uses 3x3 Sobel gradients with replicated borders, L1 magnitude,
/// non-maximum suppression along the quantised gradient direction and
/// hysteresis between `low` and `high`. Edge pixels are 255, the rest 0.
pub fn canny(image: &GrayImage, low: f32, high: f32) -> GrayImage {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut out = GrayImage::new(image.width(), image.height());
    if width == 0 || height == 0 {
        return out;
    }

    let (gx, gy) = gradients(image);
    let magnitude: Vec<f32> = gx
        .iter()
        .zip(&gy)
        .map(|(&dx, &dy)| (dx.abs() + dy.abs()) as f32)
        .collect();

    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0.0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    let mut candidates = vec![Candidate::None; width * height];
    let mut queue = VecDeque::new();
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let m = magnitude[i];
            if m <= low {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let dx = gx[i].abs() as f32;
            let dy = gy[i].abs() as f32;
            let is_peak = if dy < dx * TAN_22_5 {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else if dy > dx * TAN_67_5 {
                m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
            } else {
                let s: isize = if (gx[i] < 0) != (gy[i] < 0) { -1 } else { 1 };
                m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
            };
            if !is_peak {
                continue;
            }
            if m > high {
                candidates[i] = Candidate::Strong;
                queue.push_back((x, y));
            } else {
                candidates[i] = Candidate::Weak;
            }
        }
    }

    // Hysteresis: grow strong edges through 8-connected weak neighbours.
    while let Some((x, y)) = queue.pop_front() {
        out.put_pixel(x as u32, y as u32, image::Luma([EDGE]));
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let n = ny * width + nx;
                if candidates[n] == Candidate::Weak {
                    candidates[n] = Candidate::Strong;
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    out
}

/// 3x3 Sobel derivatives (x then y), widened to `i32` for the L1 sum.
fn gradients(image: &GrayImage) -> (Vec<i32>, Vec<i32>) {
    let widen = |g: ImageBuffer<Luma<i16>, Vec<i16>>| -> Vec<i32> {
        g.into_raw().into_iter().map(i32::from).collect()
    };
    (
        widen(horizontal_sobel(image)),
        widen(vertical_sobel(image)),
    )
}
