//! Landmark identifiers (MediaPipe Pose, 33 points)

use serde::{Deserialize, Serialize};

/// Body side of a landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "LEFT"),
            Side::Right => write!(f, "RIGHT"),
        }
    }
}

/// Named landmark; the discriminant is the index into a skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(usize)]
pub enum Landmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Landmark {
    /// Index into the skeleton's point array
    pub fn index(self) -> usize {
        self as usize
    }

    /// Side of the body, `None` for the nose
    pub fn side(self) -> Option<Side> {
        match self {
            Landmark::Nose => None,
            Landmark::LeftEyeInner
            | Landmark::LeftEye
            | Landmark::LeftEyeOuter
            | Landmark::LeftEar
            | Landmark::MouthLeft
            | Landmark::LeftShoulder
            | Landmark::LeftElbow
            | Landmark::LeftWrist
            | Landmark::LeftPinky
            | Landmark::LeftIndex
            | Landmark::LeftThumb
            | Landmark::LeftHip
            | Landmark::LeftKnee
            | Landmark::LeftAnkle
            | Landmark::LeftHeel
            | Landmark::LeftFootIndex => Some(Side::Left),
            _ => Some(Side::Right),
        }
    }

    pub fn shoulder(side: Side) -> Self {
        match side {
            Side::Left => Landmark::LeftShoulder,
            Side::Right => Landmark::RightShoulder,
        }
    }

    pub fn elbow(side: Side) -> Self {
        match side {
            Side::Left => Landmark::LeftElbow,
            Side::Right => Landmark::RightElbow,
        }
    }

    pub fn wrist(side: Side) -> Self {
        match side {
            Side::Left => Landmark::LeftWrist,
            Side::Right => Landmark::RightWrist,
        }
    }

    pub fn hip(side: Side) -> Self {
        match side {
            Side::Left => Landmark::LeftHip,
            Side::Right => Landmark::RightHip,
        }
    }
}

/// Bone connections drawn by the skeleton overlay
pub const POSE_CONNECTIONS: [(Landmark, Landmark); 35] = {
    use Landmark::*;
    [
        (Nose, LeftEyeInner),
        (LeftEyeInner, LeftEye),
        (LeftEye, LeftEyeOuter),
        (LeftEyeOuter, LeftEar),
        (Nose, RightEyeInner),
        (RightEyeInner, RightEye),
        (RightEye, RightEyeOuter),
        (RightEyeOuter, RightEar),
        (MouthLeft, MouthRight),
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftWrist, LeftIndex),
        (LeftWrist, LeftThumb),
        (LeftPinky, LeftIndex),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightWrist, RightIndex),
        (RightWrist, RightThumb),
        (RightPinky, RightIndex),
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        (LeftHip, LeftKnee),
        (LeftKnee, LeftAnkle),
        (LeftAnkle, LeftHeel),
        (LeftHeel, LeftFootIndex),
        (LeftAnkle, LeftFootIndex),
        (RightHip, RightKnee),
        (RightKnee, RightAnkle),
        (RightAnkle, RightHeel),
        (RightHeel, RightFootIndex),
        (RightAnkle, RightFootIndex),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_mediapipe_layout() {
        assert_eq!(Landmark::Nose.index(), 0);
        assert_eq!(Landmark::LeftShoulder.index(), 11);
        assert_eq!(Landmark::RightHip.index(), 24);
        assert_eq!(Landmark::RightFootIndex.index(), 32);
    }

    #[test]
    fn test_side_lookup() {
        assert_eq!(Landmark::LeftWrist.side(), Some(Side::Left));
        assert_eq!(Landmark::RightKnee.side(), Some(Side::Right));
        assert_eq!(Landmark::Nose.side(), None);
        assert_eq!(Landmark::elbow(Side::Right), Landmark::RightElbow);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Landmark::LeftShoulder).unwrap();
        assert_eq!(json, "\"LEFT_SHOULDER\"");
        let back: Landmark = serde_json::from_str("\"RIGHT_KNEE\"").unwrap();
        assert_eq!(back, Landmark::RightKnee);
    }
}
