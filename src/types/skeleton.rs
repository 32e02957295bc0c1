//! One frame's full set of keypoints

use serde::{Deserialize, Serialize};
use crate::error::FrameError;
use crate::types::{Landmark, Point};
use crate::LANDMARK_COUNT;

/// Fixed-size landmark set for a single frame
///
/// Always holds exactly `LANDMARK_COUNT` points, indexed by [`Landmark`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SkeletonWire", into = "SkeletonWire")]
pub struct Skeleton {
    points: Vec<Point>,
}

/// Wire form: `{"landmarks": [ ...33 points... ]}`
#[derive(Serialize, Deserialize)]
struct SkeletonWire {
    landmarks: Vec<Point>,
}

impl TryFrom<SkeletonWire> for Skeleton {
    type Error = FrameError;

    fn try_from(wire: SkeletonWire) -> Result<Self, Self::Error> {
        Skeleton::from_points(wire.landmarks)
    }
}

impl From<Skeleton> for SkeletonWire {
    fn from(skeleton: Skeleton) -> Self {
        SkeletonWire { landmarks: skeleton.points }
    }
}

impl Skeleton {
    /// Build from detector output, rejecting the wrong landmark count
    pub fn from_points(points: Vec<Point>) -> Result<Self, FrameError> {
        if points.len() != LANDMARK_COUNT {
            return Err(FrameError::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Skeleton with every landmark undetected
    pub fn hidden() -> Self {
        Self { points: vec![Point::hidden(); LANDMARK_COUNT] }
    }

    /// Point for a landmark
    pub fn get(&self, landmark: Landmark) -> &Point {
        &self.points[landmark.index()]
    }

    /// Replace one landmark, returning the updated skeleton
    pub fn with(mut self, landmark: Landmark, point: Point) -> Self {
        self.points[landmark.index()] = point;
        self
    }

    /// Are all of `landmarks` at or above `threshold` visibility?
    pub fn all_visible(&self, landmarks: &[Landmark], threshold: f64) -> bool {
        landmarks.iter().all(|lm| self.get(*lm).is_visible_at(threshold))
    }
}
