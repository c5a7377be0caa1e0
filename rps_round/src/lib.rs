//! # rps_round
//!
//! Round bookkeeping for a best-of-N rock-paper-scissors game.
//!
//! ## Lifecycle
//!
//! | Phase | Entered by | Accepts moves |
//! |---|---|---|
//! | `AwaitingConfig` | [`RoundState::new`] | no |
//! | `InProgress` | [`RoundState::configure`] with a valid [`RoundCount`] | yes |
//! | `Complete` | resolving round N of N | no |
//!
//! Each user move is paired with a uniformly random computer move; the pair
//! is resolved, the winner's score bumped, and a line appended to the
//! [`ResultLog`].  The last round also appends a summary line.
//!
//! ## Quick start
//!
//! ```rust
//! use rps_round::{RoundState, RoundCount, Move, Phase};
//!
//! let mut game = RoundState::new();
//! game.configure(RoundCount::parse("1").unwrap()).unwrap();
//!
//! let report = game.play_against(Move::Rock, Move::Scissors).unwrap();
//! assert!(report.game_over);
//! assert_eq!(game.phase(), Phase::Complete);
//! assert_eq!(game.user_score(), 1);
//! ```

pub mod moves;
pub mod round_count;
pub mod result_log;
pub mod round;

pub use moves::{Move, Outcome, resolve, move_for_gesture};
pub use round_count::{RoundCount, RoundCountError, DEFAULT_ROUNDS};
pub use result_log::ResultLog;
pub use round::{RoundState, RoundReport, Phase, PlayError};
