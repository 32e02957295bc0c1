//! Single detected keypoint

use serde::{Deserialize, Serialize};

/// One landmark as delivered by the detector
///
/// `x`/`y` are normalized image-plane coordinates (0-1, y grows downward),
/// `z` is optional relative depth, `visibility` is detection confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    pub visibility: f64,
}

impl Point {
    /// Create a 2D point
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, z: None, visibility }
    }

    /// Create a point with depth
    pub fn with_depth(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z: Some(z), visibility }
    }

    /// Placeholder for an undetected landmark
    pub fn hidden() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Visibility check against an explicit threshold (inclusive)
    pub fn is_visible_at(&self, threshold: f64) -> bool {
        self.visibility >= threshold
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::hidden()
    }
}
