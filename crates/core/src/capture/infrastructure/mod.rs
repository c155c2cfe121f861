pub mod image_directory_source;
#[cfg(feature = "camera")]
pub mod webcam_source;
