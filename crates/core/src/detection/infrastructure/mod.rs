mod canny;
mod contours;
mod gaussian;
mod grayscale;
pub mod heuristic_face_detector;
