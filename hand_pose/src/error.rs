use std::fmt;

/// Errors raised while building or acquiring hand landmarks.
#[derive(Clone, Debug, PartialEq)]
pub enum PoseError {
    /// A landmark set did not carry the expected number of points.
    LandmarkCount { expected: usize, found: usize },
    /// The pose source has no frame to offer yet (camera warming up,
    /// device not connected).
    NotReady,
    /// The underlying tracking device reported a failure.
    Device(String),
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseError::LandmarkCount { expected, found } =>
                write!(f, "expected {} hand landmarks, found {}", expected, found),
            PoseError::NotReady  => write!(f, "pose source is not ready"),
            PoseError::Device(e) => write!(f, "tracking device error: {}", e),
        }
    }
}

impl std::error::Error for PoseError {}
