pub mod count_faces_use_case;
pub mod loop_logger;
