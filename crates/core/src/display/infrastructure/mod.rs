pub mod console_display;
#[cfg(feature = "window")]
pub mod window_display;
