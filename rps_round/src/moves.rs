//! Moves, the win relation, and the gesture-name mapping.

use std::fmt;
use rand::Rng;

// ════════════════════════════════════════════════════════════════════════════
// Move
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock     => "rock",
            Move::Paper    => "paper",
            Move::Scissors => "scissors",
        }
    }

    /// The move this one defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock     => Move::Scissors,
            Move::Scissors => Move::Paper,
            Move::Paper    => Move::Rock,
        }
    }

    /// Uniform draw over the three moves.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Move {
        Move::ALL[rng.random_range(0..Move::ALL.len())]
    }

    /// Parse a typed move: full name or first letter, any case.
    pub fn from_input(text: &str) -> Option<Move> {
        match text.trim().to_ascii_lowercase().as_str() {
            "rock"     | "r" => Some(Move::Rock),
            "paper"    | "p" => Some(Move::Paper),
            "scissors" | "s" => Some(Move::Scissors),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outcome
// ════════════════════════════════════════════════════════════════════════════

/// Result of one round, from the user's side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    UserWins,
    ComputerWins,
    Tie,
}

impl Outcome {
    /// The same round seen from the other side.
    pub fn flipped(self) -> Outcome {
        match self {
            Outcome::UserWins     => Outcome::ComputerWins,
            Outcome::ComputerWins => Outcome::UserWins,
            Outcome::Tie          => Outcome::Tie,
        }
    }
}

/// Rock beats scissors, scissors beats paper, paper beats rock.
pub fn resolve(user: Move, computer: Move) -> Outcome {
    if user == computer {
        Outcome::Tie
    } else if user.beats() == computer {
        Outcome::UserWins
    } else {
        Outcome::ComputerWins
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Gesture mapping
// ════════════════════════════════════════════════════════════════════════════

/// Translate a matched gesture label into a move.  Unknown labels give
/// `None`, which registers nothing.
pub fn move_for_gesture(name: &str) -> Option<Move> {
    match name {
        "fist"      => Some(Move::Rock),
        "open_fist" => Some(Move::Paper),
        "victory"   => Some(Move::Scissors),
        _           => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn classic_rules() {
        assert_eq!(resolve(Move::Rock,     Move::Scissors), Outcome::UserWins);
        assert_eq!(resolve(Move::Scissors, Move::Paper),    Outcome::UserWins);
        assert_eq!(resolve(Move::Paper,    Move::Rock),     Outcome::UserWins);
        assert_eq!(resolve(Move::Rock,     Move::Paper),    Outcome::ComputerWins);
    }

    #[test]
    fn resolution_is_antisymmetric() {
        for a in Move::ALL {
            for b in Move::ALL {
                assert_eq!(resolve(a, b), resolve(b, a).flipped(), "{} vs {}", a, b);
                if a == b {
                    assert_eq!(resolve(a, b), Outcome::Tie);
                }
            }
        }
    }

    #[test]
    fn every_move_beats_exactly_one_other() {
        for a in Move::ALL {
            let wins = Move::ALL.iter().filter(|&&b| resolve(a, b) == Outcome::UserWins).count();
            assert_eq!(wins, 1);
        }
    }

    #[test]
    fn gesture_mapping() {
        assert_eq!(move_for_gesture("fist"),      Some(Move::Rock));
        assert_eq!(move_for_gesture("open_fist"), Some(Move::Paper));
        assert_eq!(move_for_gesture("victory"),   Some(Move::Scissors));
        assert_eq!(move_for_gesture("thumbs_up"), None);
        assert_eq!(move_for_gesture(""),          None);
        assert_eq!(move_for_gesture("Fist"),      None);
    }

    #[test]
    fn random_covers_all_moves() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [0usize; 3];
        for _ in 0..300 {
            let m = Move::random(&mut rng);
            seen[Move::ALL.iter().position(|&x| x == m).unwrap()] += 1;
        }
        assert!(seen.iter().all(|&n| n > 50), "{:?}", seen);
    }

    #[test]
    fn typed_input() {
        assert_eq!(Move::from_input(" R "),      Some(Move::Rock));
        assert_eq!(Move::from_input("Scissors"), Some(Move::Scissors));
        assert_eq!(Move::from_input("lizard"),   None);
    }
}
