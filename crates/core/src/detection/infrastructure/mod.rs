pub mod centroid_landmark_source;
pub mod skip_frame_source;
