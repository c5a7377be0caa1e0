//! Validation of the "number of rounds" input.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Value pre-filled in the round-count input.
pub const DEFAULT_ROUNDS: u32 = 5;

/// A validated, strictly positive number of rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundCount(NonZeroU32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundCountError {
    Empty,
    /// Not a whole number (`"abc"`, `"2.5"`).
    NotAnInteger(String),
    /// Zero or negative.
    NotPositive(i64),
    TooLarge(i64),
}

impl fmt::Display for RoundCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundCountError::Empty           => write!(f, "enter a number of rounds"),
            RoundCountError::NotAnInteger(s) => write!(f, "\"{}\" is not a whole number", s),
            RoundCountError::NotPositive(n)  => write!(f, "number of rounds must be at least 1, got {}", n),
            RoundCountError::TooLarge(n)     => write!(f, "{} rounds is too many", n),
        }
    }
}

impl std::error::Error for RoundCountError {}

impl RoundCount {
    pub fn new(n: u32) -> Result<Self, RoundCountError> {
        NonZeroU32::new(n)
            .map(RoundCount)
            .ok_or(RoundCountError::NotPositive(0))
    }

    /// Parse user text.  Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, RoundCountError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RoundCountError::Empty);
        }
        let n: i64 = text.parse()
            .map_err(|_| RoundCountError::NotAnInteger(text.to_string()))?;
        if n < 1 {
            return Err(RoundCountError::NotPositive(n));
        }
        let n = u32::try_from(n).map_err(|_| RoundCountError::TooLarge(n))?;
        RoundCount::new(n)
    }

    pub fn get(self) -> u32 { self.0.get() }
}

impl Default for RoundCount {
    fn default() -> Self {
        RoundCount(NonZeroU32::new(DEFAULT_ROUNDS).unwrap_or(NonZeroU32::MIN))
    }
}

impl FromStr for RoundCount {
    type Err = RoundCountError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { RoundCount::parse(s) }
}

impl fmt::Display for RoundCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
