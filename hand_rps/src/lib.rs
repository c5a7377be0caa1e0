//! # hand_rps
//!
//! Rock-paper-scissors against the computer, played by holding a hand
//! gesture up to the camera, with a live skeleton overlay.
//!
//! ## Gesture → Move mapping
//!
//! | Template | Move | Pose |
//! |---|---|---|
//! | `fist` | Rock | all fingers curled |
//! | `open_fist` | Paper | all fingers straight |
//! | `victory` | Scissors | index + middle straight, ring + pinky curled |
//!
//! A gesture plays only after it has been the best match for
//! `hold_frames` consecutive frames, and only once per hold; lower the hand
//! or switch gesture to play the next round.
//!
//! ## Game flow
//!
//! 1. Type the number of rounds (default 5) and press Enter.  The field
//!    locks; invalid counts (`0`, `-2`, empty) are rejected in place.
//! 2. Each confirmed gesture (or R/P/S key) is one round against a random
//!    computer move.  Results accumulate in the log on the right.
//! 3. After the last round a summary line is added and moves are ignored.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the keyboard picks the pose a
//!   synthetic hand holds up.
//! * `leap` — **Hardware mode**: landmarks from a LeapMotion controller via
//!   LeapC (`source = "leap"` in the config file).
//!
//! ### Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `0`–`9`, `-`, Backspace | Edit the round count |
//! | `Enter` | Submit the round count |
//! | `F` / `O` / `V` | Show fist / open hand / victory (simulation) |
//! | `H` | Lower the hand (simulation) |
//! | `R` / `P` / `S` | Play rock / paper / scissors directly |
//! | `Q` / `Escape` | Quit |

pub mod config;
pub mod pose;
pub mod latch;
pub mod frame;
pub mod overlay;
pub mod visualizer;
pub mod app;
