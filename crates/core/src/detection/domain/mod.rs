pub mod face_detector;
pub mod face_shape_filter;
