//! Pose sources: where per-frame hand landmarks come from.
//!
//! The app only sees [`PoseSource`]; it does not care whether the hands
//! came from the keyboard simulator or real tracking hardware.

use hand_pose::{synthesize, Hand, PoseError, SimPose};

// ════════════════════════════════════════════════════════════════════════════
// PoseSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver the hands visible in the current frame.
pub trait PoseSource {
    /// Hands in the current frame; empty when nothing is in view.
    /// [`PoseError::NotReady`] is the readiness signal (camera warming up,
    /// device still connecting): skip this frame and try again.  Every call
    /// counts as a frame, so warm-up advances even while not ready.
    fn estimate_hands(&mut self) -> Result<Vec<Hand>, PoseError>;

    /// Simulation hook: hold up `pose` (or lower the hand with `None`).
    /// Hardware sources ignore it.
    fn select_pose(&mut self, _pose: Option<SimPose>) {}

    /// Pose currently held up by the simulator, if any.
    fn selected_pose(&self) -> Option<SimPose> { None }

    fn name(&self) -> &'static str;
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Synthesises a hand for whichever pose the user picked on the keyboard.
///
/// Reports not-ready for the first `warmup_frames` frames, the way a real
/// webcam needs a moment before it delivers frames.
#[derive(Clone, Debug)]
pub struct SimPoseSource {
    pose:          Option<SimPose>,
    center:        (f32, f32),
    scale:         f32,
    frame:         u64,
    warmup_frames: u32,
}

impl SimPoseSource {
    /// Hand centred in a `width × height` camera frame, no pose raised.
    pub fn new(width: usize, height: usize, warmup_frames: u32) -> Self {
        SimPoseSource {
            pose:   None,
            center: (width as f32 / 2.0, height as f32 / 2.0),
            scale:  height as f32 / 320.0,
            frame:  0,
            warmup_frames,
        }
    }

    pub fn frame(&self) -> u64 { self.frame }
}

impl PoseSource for SimPoseSource {
    fn estimate_hands(&mut self) -> Result<Vec<Hand>, PoseError> {
        self.frame += 1;
        if self.frame <= self.warmup_frames as u64 {
            return Err(PoseError::NotReady);
        }
        Ok(match self.pose {
            Some(pose) => vec![synthesize(pose, self.center, self.scale, self.frame)],
            None       => Vec::new(),
        })
    }

    fn select_pose(&mut self, pose: Option<SimPose>) {
        if self.pose != pose {
            log::debug!("sim pose → {}", pose.map_or("hidden", SimPose::name));
        }
        self.pose = pose;
    }

    fn selected_pose(&self) -> Option<SimPose> { self.pose }

    fn name(&self) -> &'static str { "keyboard simulation" }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapPoseSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand landmarks from a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Leap reports four bones per digit in millimetres, y up.  Landmarks are
/// taken at the bone joints (base of proximal, intermediate, distal, then
/// the distal tip) and projected into the camera panel's pixel space; the
/// wrist is the front end of the forearm bone.
#[cfg(feature = "leap")]
pub struct LeapPoseSource {
    connection: leaprs::Connection,
    width:      f32,
    height:     f32,
    latest:     Vec<Hand>,
    connected:  bool,
}

#[cfg(feature = "leap")]
impl LeapPoseSource {
    /// Millimetres → pixels.
    const MM_TO_PX:     f32 = 1.6;
    /// Height above the sensor mapped to the bottom of the frame.
    const FLOOR_MM:     f32 = 80.0;
    const POLL_TIMEOUT: u32 = 5;

    pub fn open(width: usize, height: usize) -> Result<Self, PoseError> {
        use leaprs::{Connection, ConnectionConfig};

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| PoseError::Device(format!("{:?}", e)))?;
        connection.open()
            .map_err(|e| PoseError::Device(format!("{:?}", e)))?;
        log::info!("LeapC connection opened");

        Ok(LeapPoseSource {
            connection,
            width:     width as f32,
            height:    height as f32,
            latest:    Vec::new(),
            connected: false,
        })
    }

    fn project(size: (f32, f32), x: f32, y: f32, z: f32) -> hand_pose::Landmark {
        hand_pose::Landmark::new(
            size.0 / 2.0 + x * Self::MM_TO_PX,
            size.1 - (y - Self::FLOOR_MM) * Self::MM_TO_PX,
            z * Self::MM_TO_PX,
        )
    }

    fn convert(size: (f32, f32), hand: &leaprs::Hand) -> Option<Hand> {
        use hand_pose::LANDMARK_COUNT;

        let mut pts = [hand_pose::Landmark::default(); LANDMARK_COUNT];
        let wrist = hand.arm().next_joint();
        pts[0] = Self::project(size, wrist.x, wrist.y, wrist.z);

        let digits: Vec<_> = hand.digits().collect();
        if digits.len() < 5 { return None; }

        for (i, digit) in digits.iter().take(5).enumerate() {
            let base   = 1 + i * 4;
            let joints = [
                digit.proximal().prev_joint(),
                digit.intermediate().prev_joint(),
                digit.distal().prev_joint(),
                digit.distal().next_joint(),
            ];
            for (k, j) in joints.iter().enumerate() {
                pts[base + k] = Self::project(size, j.x, j.y, j.z);
            }
        }
        Some(Hand::new(pts, 1.0))
    }
}

#[cfg(feature = "leap")]
impl PoseSource for LeapPoseSource {
    fn estimate_hands(&mut self) -> Result<Vec<Hand>, PoseError> {
        use leaprs::Event;

        let size = (self.width, self.height);
        // A poll timeout just means no new frame; keep the last one.
        let msg = match self.connection.poll(Self::POLL_TIMEOUT) {
            Ok(m)                      => m,
            Err(_) if !self.connected  => return Err(PoseError::NotReady),
            Err(_)                     => return Ok(self.latest.clone()),
        };

        if !self.connected {
            log::info!("LeapMotion service responding");
            self.connected = true;
        }

        if let Event::Tracking(frame) = msg.event() {
            let hands: Vec<Hand> = frame.hands()
                .filter_map(|h| Self::convert(size, &h))
                .collect();
            self.latest = hands;
        }
        Ok(self.latest.clone())
    }

    fn name(&self) -> &'static str { "LeapMotion" }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_frames_are_not_ready() {
        let mut src = SimPoseSource::new(640, 480, 2);
        src.select_pose(Some(SimPose::Fist));
        assert_eq!(src.estimate_hands(), Err(PoseError::NotReady));
        assert_eq!(src.estimate_hands(), Err(PoseError::NotReady));
        assert_eq!(src.frame(), 2);
        assert_eq!(src.estimate_hands().unwrap().len(), 1);
    }

    #[test]
    fn hidden_hand_gives_no_hands() {
        let mut src = SimPoseSource::new(640, 480, 0);
        assert!(src.estimate_hands().unwrap().is_empty());
        src.select_pose(Some(SimPose::Open));
        assert_eq!(src.selected_pose(), Some(SimPose::Open));
        assert_eq!(src.estimate_hands().unwrap().len(), 1);
        src.select_pose(None);
        assert!(src.estimate_hands().unwrap().is_empty());
    }

    #[test]
    fn synthetic_hand_stays_in_frame() {
        let mut src = SimPoseSource::new(640, 480, 0);
        for pose in SimPose::ALL {
            src.select_pose(Some(pose));
            for _ in 0..30 {
                let hands = src.estimate_hands().unwrap();
                for lm in hands[0].landmarks() {
                    assert!(lm.x >= 0.0 && lm.x < 640.0, "{:?}", lm);
                    assert!(lm.y >= 0.0 && lm.y < 480.0, "{:?}", lm);
                }
            }
        }
    }
}
