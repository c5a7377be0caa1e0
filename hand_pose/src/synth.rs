//! Synthetic hands for simulation and testing.
//!
//! A hand is built by forward kinematics: every finger starts at a fixed
//! base point relative to the wrist and each of its three segments is bent
//! toward the camera by a per-joint flexion angle.  A small deterministic
//! wobble keyed on the frame number keeps the skeleton from looking frozen.

use crate::landmark::{Finger, Hand, Landmark, LANDMARK_COUNT, WRIST};

/// A pose the simulator can hold up in front of the "camera".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimPose {
    Fist,
    Open,
    Victory,
}

impl SimPose {
    pub const ALL: [SimPose; 3] = [SimPose::Fist, SimPose::Open, SimPose::Victory];

    pub fn name(self) -> &'static str {
        match self {
            SimPose::Fist    => "fist",
            SimPose::Open    => "open hand",
            SimPose::Victory => "victory",
        }
    }

    /// Flexion in degrees per finger (thumb first), per joint (base first).
    pub fn flexion(self) -> [[f32; 3]; 5] {
        const STRAIGHT: [f32; 3] = [0.0, 5.0, 5.0];
        const FOLDED:   [f32; 3] = [70.0, 100.0, 70.0];
        const THUMB_IN: [f32; 3] = [20.0, 60.0, 70.0];
        match self {
            SimPose::Fist    => [THUMB_IN, FOLDED, FOLDED, FOLDED, FOLDED],
            SimPose::Open    => [STRAIGHT; 5],
            SimPose::Victory => [THUMB_IN, STRAIGHT, STRAIGHT, FOLDED, FOLDED],
        }
    }
}

/// Rest geometry of one finger at scale 1.0 (pixels).
struct FingerGeom {
    /// Offset of the first joint past the wrist.
    base:    (f32, f32),
    /// Unit direction of the straight finger in the image plane.
    dir:     (f32, f32),
    lengths: [f32; 3],
}

const GEOMETRY: [FingerGeom; 5] = [
    FingerGeom { base: (-30.0, -15.0), dir: (-0.7071, -0.7071), lengths: [35.0, 28.0, 24.0] },
    FingerGeom { base: (-28.0, -85.0), dir: (-0.1483, -0.9889), lengths: [40.0, 24.0, 20.0] },
    FingerGeom { base: ( -8.0, -90.0), dir: ( 0.0,    -1.0),    lengths: [44.0, 27.0, 21.0] },
    FingerGeom { base: ( 12.0, -86.0), dir: ( 0.1191, -0.9929), lengths: [40.0, 25.0, 20.0] },
    FingerGeom { base: ( 30.0, -76.0), dir: ( 0.2873, -0.9578), lengths: [32.0, 19.0, 18.0] },
];

/// Build the hand for `pose`, palm centred near `center`.
pub fn synthesize(pose: SimPose, center: (f32, f32), scale: f32, frame: u64) -> Hand {
    synthesize_with(pose.flexion(), center, scale, frame)
}

/// Build a hand from explicit flexion angles (see [`SimPose::flexion`]).
pub fn synthesize_with(
    flexion: [[f32; 3]; 5],
    center:  (f32, f32),
    scale:   f32,
    frame:   u64,
) -> Hand {
    let t = frame as f32;
    let sway_x = 4.0 * (t * 0.05).sin();
    let sway_y = 3.0 * (t * 0.07).cos();

    let wrist = Landmark::new(
        center.0 + sway_x * scale,
        center.1 + (60.0 + sway_y) * scale,
        0.0,
    );

    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    pts[WRIST] = wrist;

    for finger in Finger::ALL {
        let i      = finger.index();
        let g      = &GEOMETRY[i];
        let chain  = finger.joints();
        let jitter = 3.0 * (t * 0.21 + i as f32).sin();

        let mut p = Landmark::new(
            wrist.x + g.base.0 * scale,
            wrist.y + g.base.1 * scale,
            0.0,
        );
        pts[chain[1]] = p;

        let mut theta = 0.0_f32;
        for k in 0..3 {
            theta += (flexion[i][k] + jitter).to_radians();
            let len = g.lengths[k] * scale;
            p = Landmark::new(
                p.x + g.dir.0 * theta.cos() * len,
                p.y + g.dir.1 * theta.cos() * len,
                p.z - theta.sin() * len,
            );
            pts[chain[k + 2]] = p;
        }
    }

    Hand::new(pts, 0.95)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
