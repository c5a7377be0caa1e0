//! # hand_pose
//!
//! Hand landmarks, finger-curl estimation, and template-based gesture
//! matching.
//!
//! A detected hand is 21 keypoints in the usual hand-landmark layout:
//!
//! | Index | Joint |
//! |---|---|
//! | 0 | Wrist |
//! | 1–4 | Thumb CMC, MCP, IP, tip |
//! | 5–8 | Index MCP, PIP, DIP, tip |
//! | 9–12 | Middle MCP, PIP, DIP, tip |
//! | 13–16 | Ring MCP, PIP, DIP, tip |
//! | 17–20 | Pinky MCP, PIP, DIP, tip |
//!
//! Each finger is reduced to a [`FingerCurl`] (none / half / full) from the
//! bend angle along its chain, and the five curls are scored against every
//! [`GestureTemplate`] in a [`TemplateStore`].  Scores run 0–10; matches
//! below the minimum score are dropped.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_pose::{CurlMatcher, GestureMatcher, SimPose, synthesize, DEFAULT_MIN_SCORE};
//!
//! let hand    = synthesize(SimPose::Fist, (320.0, 300.0), 1.0, 0);
//! let matcher = CurlMatcher::default();
//! let result  = matcher.estimate(&hand, DEFAULT_MIN_SCORE);
//!
//! assert_eq!(result.best().map(|m| m.name.as_str()), Some("fist"));
//! ```

pub mod error;
pub mod landmark;
pub mod curl;
pub mod template;
pub mod matcher;
pub mod synth;

pub use error::PoseError;
pub use landmark::{Landmark, Hand, Finger, HAND_BONES, LANDMARK_COUNT};
pub use curl::{FingerCurl, CurlLimits, estimate_curls, estimate_finger_curl};
pub use template::{GestureTemplate, TemplateStore, FIST, OPEN_FIST, VICTORY};
pub use matcher::{GestureMatch, MatchResult, GestureMatcher, CurlMatcher, DEFAULT_MIN_SCORE};
pub use synth::{SimPose, synthesize, synthesize_with};
