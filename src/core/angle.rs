//! Joint angle calculation using the dot product
//!
//! Angle at vertex M between rays M→A and M→B, on the 2D image plane.

use crate::types::Point;

/// Ray length below which a vector counts as degenerate
const MIN_RAY_LENGTH: f64 = 1e-9;

/// Angle at `m` in degrees, 0-180
///
/// Uses cos(θ) = (v1 · v2) / (|v1| × |v2|), ignoring depth.
/// Returns 0 when either ray has zero length; callers gate on visibility
/// first and must read 0 as "unmeasurable", not as a closed joint.
pub fn angle_at(a: &Point, m: &Point, b: &Point) -> f64 {
    let v1 = (a.x - m.x, a.y - m.y);
    let v2 = (b.x - m.x, b.y - m.y);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 < MIN_RAY_LENGTH || mag2 < MIN_RAY_LENGTH {
        return 0.0;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees()
}

/// Angle of the segment `from`→`to` away from the vertical axis, folded
/// so that pointing straight up or straight down both read as ~0
///
/// `None` when the two points coincide and there is no segment to measure.
pub fn tilt_from_vertical(from: &Point, to: &Point) -> Option<f64> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if (dx * dx + dy * dy).sqrt() < MIN_RAY_LENGTH {
        return None;
    }
    // 0 = straight down the image, 180 = straight up
    let angle = dx.atan2(dy).to_degrees().abs();
    Some(angle.min((180.0 - angle).abs()))
}
