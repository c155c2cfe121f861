use std::time::Duration;

pub const DEFAULT_REPORT_URL: &str = "http://192.168.1.1/update";
pub const REPORT_INTERVAL: Duration = Duration::from_secs(5);
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(2);

pub const WINDOW_TITLE: &str = "Face Detection (No ML)";
/// How long the display waits for a quit key on each iteration.
pub const QUIT_POLL_WAIT: Duration = Duration::from_millis(1);
pub const QUIT_KEY: char = 'q';

pub const BLUR_KERNEL_SIZE: usize = 5;
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Exclusive aspect-ratio bounds (width / height) for a face-like box.
pub const MIN_FACE_ASPECT: f64 = 0.8;
pub const MAX_FACE_ASPECT: f64 = 1.2;
/// Exclusive width bounds in pixels for a face-like box.
pub const MIN_FACE_WIDTH: i32 = 50;
pub const MAX_FACE_WIDTH: i32 = 300;

pub const OUTLINE_COLOR: [u8; 3] = [255, 0, 0];
pub const OUTLINE_THICKNESS: u32 = 2;
pub const LABEL_COLOR: [u8; 3] = [0, 255, 0];
/// Left end of the label baseline.
pub const LABEL_ORIGIN: (i32, i32) = (10, 30);
pub const LABEL_SCALE: u32 = 3;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
