/// Number of points in the face-mesh landmark layout the pipeline expects.
pub const MESH_LANDMARK_COUNT: usize = 468;

/// Index of the nose tip within the face-mesh layout, used as the
/// attention reference point.
pub const NOSE_TIP_INDEX: usize = 1;

/// Default focus band bounds (normalized frame coordinates).
pub const DEFAULT_BAND_LOW: f64 = 0.35;
pub const DEFAULT_BAND_HIGH: f64 = 0.65;

/// Multipart boundary token for the MJPEG stream.
pub const STREAM_BOUNDARY: &str = "frame";

/// Default JPEG quality for delivered frames.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;
