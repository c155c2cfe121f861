use image::GrayImage;

/// Fixed binomial kernels used when sigma is left at zero for small sizes.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Builds a normalised 1D Gaussian kernel with sigma derived from its size.
///
/// `kernel_size` must be odd and >= 1. Sizes up to 7 use the classic
/// binomial tables; larger sizes use `sigma = 0.3 * ((k - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    if kernel_size <= 7 {
        return SMALL_KERNELS[kernel_size / 2].to_vec();
    }
    let sigma = 0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Separable Gaussian blur of a single-channel image.
///
/// Borders are mirrored without repeating the edge pixel (`dcb|abcd|cba`).
pub fn gaussian_blur(image: &GrayImage, kernel: &[f32]) -> GrayImage {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return image.clone();
    }
    let half = (kernel_size / 2) as isize;
    let src = image.as_raw();
    let mut temp = vec![0.0f32; width * height];

    // Horizontal pass: src → temp
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - half, width);
                sum += src[y * width + sx] as f32 * w;
            }
            temp[y * width + x] = sum;
        }
    }

    // Vertical pass: temp → out
    let mut out = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + k as isize - half, height);
                sum += temp[sy * width + x] * w;
            }
            out[y * width + x] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }

    GrayImage::from_raw(width as u32, height as u32, out)
        .expect("output buffer matches image dimensions")
}

fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = index;
    while i < 0 || i > last {
        i = if i < 0 { -i } else { 2 * last - i };
    }
    i as usize
}
