//! Landmark points, finger topology, and the [`Hand`] container.

use crate::error::PoseError;

// ════════════════════════════════════════════════════════════════════════════
// Joint indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Skeleton segments, finger by finger, each chain starting at the wrist.
pub const HAND_BONES: [(usize, usize); 20] = [
    (WRIST, THUMB_CMC),  (THUMB_CMC, THUMB_MCP),   (THUMB_MCP, THUMB_IP),   (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP),  (INDEX_MCP, INDEX_PIP),   (INDEX_PIP, INDEX_DIP),  (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP),   (RING_MCP, RING_PIP),     (RING_PIP, RING_DIP),    (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP),  (PINKY_MCP, PINKY_PIP),   (PINKY_PIP, PINKY_DIP),  (PINKY_DIP, PINKY_TIP),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One joint position.  `x`/`y` are in frame pixels, `z` is relative depth
/// in the same units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx*dx + dy*dy + dz*dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from(p: [f32; 3]) -> Self {
        Landmark::new(p[0], p[1], p[2])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger
// ════════════════════════════════════════════════════════════════════════════

/// The five fingers in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Finger::Thumb  => "thumb",
            Finger::Index  => "index",
            Finger::Middle => "middle",
            Finger::Ring   => "ring",
            Finger::Pinky  => "pinky",
        }
    }

    /// Position in [`Finger::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Joint chain from the wrist out to the fingertip.
    pub fn joints(self) -> [usize; 5] {
        let base = 1 + self.index() * 4;
        [WRIST, base, base + 1, base + 2, base + 3]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand
// ════════════════════════════════════════════════════════════════════════════

/// The 21 landmarks of one detected hand, plus the detector's confidence.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
    score:     f32,
}

impl Hand {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], score: f32) -> Self {
        Hand { landmarks, score: score.clamp(0.0, 1.0) }
    }

    /// Build a hand from a detector's flat point list.
    ///
    /// Extra points past the 21st are ignored; fewer is an error.
    pub fn from_slice(points: &[Landmark], score: f32) -> Result<Self, PoseError> {
        if points.len() < LANDMARK_COUNT {
            return Err(PoseError::LandmarkCount {
                expected: LANDMARK_COUNT,
                found:    points.len(),
            });
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks.copy_from_slice(&points[..LANDMARK_COUNT]);
        Ok(Hand::new(landmarks, score))
    }

    /// Same as [`Hand::from_slice`] for `[x, y, z]` triples.
    pub fn from_points(points: &[[f32; 3]], score: f32) -> Result<Self, PoseError> {
        let lms: Vec<Landmark> = points.iter().copied().map(Landmark::from).collect();
        Hand::from_slice(&lms, score)
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] { &self.landmarks }
    pub fn score(&self)     -> f32                          { self.score }

    pub fn joint(&self, idx: usize) -> Option<&Landmark> {
        self.landmarks.get(idx)
    }

    /// The five points of one finger's chain, wrist first.
    pub fn finger(&self, finger: Finger) -> [Landmark; 5] {
        finger.joints().map(|i| self.landmarks[i])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_chains_start_at_wrist() {
        assert_eq!(Finger::Thumb.joints(),  [0, 1, 2, 3, 4]);
        assert_eq!(Finger::Index.joints(),  [0, 5, 6, 7, 8]);
        assert_eq!(Finger::Middle.joints(), [0, 9, 10, 11, 12]);
        assert_eq!(Finger::Ring.joints(),   [0, 13, 14, 15, 16]);
        assert_eq!(Finger::Pinky.joints(),  [0, 17, 18, 19, 20]);
    }

    #[test]
    fn bones_follow_finger_chains() {
        for finger in Finger::ALL {
            let j = finger.joints();
            let start = finger.index() * 4;
            for k in 0..4 {
                assert_eq!(HAND_BONES[start + k], (j[k], j[k + 1]));
            }
        }
    }

    #[test]
    fn from_slice_rejects_short_input() {
        let pts = vec![Landmark::default(); 20];
        assert_eq!(
            Hand::from_slice(&pts, 1.0),
            Err(PoseError::LandmarkCount { expected: 21, found: 20 })
        );
    }

    #[test]
    fn from_points_keeps_order() {
        let pts: Vec<[f32; 3]> = (0..21).map(|i| [i as f32, 2.0 * i as f32, 0.0]).collect();
        let hand = Hand::from_points(&pts, 0.9).unwrap();
        assert_eq!(hand.joint(8), Some(&Landmark::new(8.0, 16.0, 0.0)));
        assert_eq!(hand.finger(Finger::Pinky)[4].x, 20.0);
    }

    #[test]
    fn score_is_clamped() {
        let hand = Hand::new([Landmark::default(); LANDMARK_COUNT], 3.0);
        assert_eq!(hand.score(), 1.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 12.0);
        assert!((a.distance(&b) - 13.0).abs() < 1e-5);
    }
}
