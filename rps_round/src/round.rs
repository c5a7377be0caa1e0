//! The round state machine.
//!
//! `RoundState` owns the configured round count, both scores, the pending
//! move pair, and the [`ResultLog`].  A round resolves the moment both
//! pending moves are present; the pair is then cleared.

use std::fmt;
use rand::Rng;

use crate::moves::{resolve, Move, Outcome};
use crate::result_log::ResultLog;
use crate::round_count::RoundCount;

// ════════════════════════════════════════════════════════════════════════════
// Phase / errors / report
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingConfig,
    InProgress,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayError {
    /// A move arrived before the round count was submitted.
    NotConfigured,
    /// The round count was already submitted and is locked.
    AlreadyConfigured,
    /// Every configured round has been played.
    GameOver,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotConfigured     => write!(f, "set the number of rounds first"),
            PlayError::AlreadyConfigured => write!(f, "the number of rounds is already set"),
            PlayError::GameOver          => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for PlayError {}

/// What happened in one resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based number of the round just played.
    pub round:     u32,
    pub user:      Move,
    pub computer:  Move,
    pub outcome:   Outcome,
    /// True when this round was the last one.
    pub game_over: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// RoundState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct RoundState {
    configured:       Option<RoundCount>,
    current_round:    u32,
    user_score:       u32,
    computer_score:   u32,
    log:              ResultLog,
    pending_user:     Option<Move>,
    pending_computer: Option<Move>,
}

impl RoundState {
    pub fn new() -> Self { Self::default() }

    pub fn phase(&self) -> Phase {
        match self.configured {
            None                                          => Phase::AwaitingConfig,
            Some(n) if self.current_round >= n.get()      => Phase::Complete,
            Some(_)                                       => Phase::InProgress,
        }
    }

    /// Submit the round count and start the game.  Locked afterwards.
    pub fn configure(&mut self, rounds: RoundCount) -> Result<(), PlayError> {
        if self.configured.is_some() {
            log::warn!("round count resubmitted ({}); keeping {:?}", rounds, self.configured);
            return Err(PlayError::AlreadyConfigured);
        }
        self.configured = Some(rounds);
        log::info!("game started: {} round(s)", rounds);
        Ok(())
    }

    // ── moves ─────────────────────────────────────────────────────────────

    /// Record the user's move; resolves if the computer's move is already
    /// pending.  A second user move before resolution replaces the first.
    pub fn record_user_move(&mut self, mv: Move) -> Result<Option<RoundReport>, PlayError> {
        self.ensure_accepting()?;
        self.pending_user = Some(mv);
        Ok(self.try_resolve())
    }

    /// Record the computer's move; resolves if the user's move is already
    /// pending.
    pub fn record_computer_move(&mut self, mv: Move) -> Result<Option<RoundReport>, PlayError> {
        self.ensure_accepting()?;
        self.pending_computer = Some(mv);
        Ok(self.try_resolve())
    }

    /// Play one full round against a fresh random computer move.
    pub fn play<R: Rng + ?Sized>(&mut self, user: Move, rng: &mut R) -> Result<RoundReport, PlayError> {
        self.ensure_accepting()?;
        let computer = Move::random(rng);
        self.play_against(user, computer)
    }

    /// Play one full round against a known computer move.
    pub fn play_against(&mut self, user: Move, computer: Move) -> Result<RoundReport, PlayError> {
        self.ensure_accepting()?;
        self.pending_user     = Some(user);
        self.pending_computer = Some(computer);
        Ok(self.resolve(user, computer))
    }

    fn ensure_accepting(&self) -> Result<(), PlayError> {
        match self.phase() {
            Phase::AwaitingConfig => Err(PlayError::NotConfigured),
            Phase::Complete       => Err(PlayError::GameOver),
            Phase::InProgress     => Ok(()),
        }
    }

    fn try_resolve(&mut self) -> Option<RoundReport> {
        match (self.pending_user, self.pending_computer) {
            (Some(u), Some(c)) => Some(self.resolve(u, c)),
            _                  => None,
        }
    }

    fn resolve(&mut self, user: Move, computer: Move) -> RoundReport {
        let outcome = resolve(user, computer);
        let round   = self.current_round + 1;

        let line = match outcome {
            Outcome::UserWins => {
                self.user_score += 1;
                format!("Round {}: You win! {} beats {}", round, user, computer)
            }
            Outcome::ComputerWins => {
                self.computer_score += 1;
                format!("Round {}: You lose! {} beats {}", round, computer, user)
            }
            Outcome::Tie => format!("Round {}: It's a tie! {} and {}", round, computer, user),
        };
        log::info!("{}", line);
        self.log.push(line);

        self.current_round    = round;
        self.pending_user     = None;
        self.pending_computer = None;

        let game_over = self.phase() == Phase::Complete;
        if game_over {
            let summary = self.summary();
            log::info!("game complete: {}", summary);
            self.log.push(summary);
        }

        RoundReport { round, user, computer, outcome, game_over }
    }

    fn summary(&self) -> String {
        let (u, c) = (self.user_score, self.computer_score);
        if u > c {
            format!("Congratulations! You won the game with a score of {}-{}", u, c)
        } else if u < c {
            format!("Sorry, You lost the game with a score of {}-{}", u, c)
        } else {
            format!("The game was a tie with a score of {}-{}", u, c)
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn configured_rounds(&self) -> Option<u32>  { self.configured.map(RoundCount::get) }
    pub fn current_round(&self)     -> u32          { self.current_round }
    pub fn user_score(&self)        -> u32          { self.user_score }
    pub fn computer_score(&self)    -> u32          { self.computer_score }
    pub fn log(&self)               -> &ResultLog   { &self.log }
    pub fn pending_user(&self)      -> Option<Move> { self.pending_user }
    pub fn pending_computer(&self)  -> Option<Move> { self.pending_computer }
    pub fn is_configured(&self)     -> bool         { self.configured.is_some() }
    pub fn accepts_moves(&self)     -> bool         { self.phase() == Phase::InProgress }

    /// Rounds that ended level; always `current_round - user - computer`.
    pub fn ties(&self) -> u32 {
        self.current_round - self.user_score - self.computer_score
    }

    /// One-line scoreboard.
    pub fn score_line(&self) -> String {
        match self.configured {
            None    => "Set the number of rounds to start".to_string(),
            Some(n) => format!(
                "Round {}/{}   You {} - {} Computer",
                self.current_round, n, self.user_score, self.computer_score
            ),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn started(n: u32) -> RoundState {
        let mut s = RoundState::new();
        s.configure(RoundCount::new(n).unwrap()).unwrap();
        s
    }

    #[test]
    fn starts_awaiting_config() {
        let s = RoundState::new();
        assert_eq!(s.phase(), Phase::AwaitingConfig);
        assert_eq!(s.configured_rounds(), None);
    }

    #[test]
    fn moves_rejected_before_configure() {
        let mut s = RoundState::new();
        assert_eq!(s.play_against(Move::Rock, Move::Paper), Err(PlayError::NotConfigured));
        assert_eq!(s.record_user_move(Move::Rock), Err(PlayError::NotConfigured));
        assert_eq!(s.current_round(), 0);
        assert!(s.log().is_empty());
    }

    #[test]
    fn round_count_is_locked() {
        let mut s = started(3);
        assert_eq!(s.configure(RoundCount::new(9).unwrap()), Err(PlayError::AlreadyConfigured));
        assert_eq!(s.configured_rounds(), Some(3));
    }

    #[test]
    fn user_move_alone_does_not_resolve() {
        let mut s = started(3);
        assert_eq!(s.record_user_move(Move::Paper), Ok(None));
        assert_eq!(s.pending_user(), Some(Move::Paper));
        assert_eq!(s.current_round(), 0);
    }

    #[test]
    fn both_pending_moves_resolve_and_clear() {
        let mut s = started(3);
        s.record_computer_move(Move::Rock).unwrap();
        let r = s.record_user_move(Move::Paper).unwrap().unwrap();
        assert_eq!(r.outcome, Outcome::UserWins);
        assert_eq!(r.round, 1);
        assert_eq!(s.pending_user(), None);
        assert_eq!(s.pending_computer(), None);
        assert_eq!(s.log().last(), Some("Round 1: You win! paper beats rock"));
    }

    #[test]
    fn result_line_wording() {
        let mut s = started(3);
        s.play_against(Move::Rock, Move::Paper).unwrap();
        s.play_against(Move::Scissors, Move::Scissors).unwrap();
        assert_eq!(s.log().entries()[0], "Round 1: You lose! paper beats rock");
        assert_eq!(s.log().entries()[1], "Round 2: It's a tie! scissors and scissors");
    }

    #[test]
    fn three_round_tie_example() {
        let mut s = started(3);
        s.play_against(Move::Rock, Move::Scissors).unwrap();
        s.play_against(Move::Paper, Move::Paper).unwrap();
        let last = s.play_against(Move::Scissors, Move::Rock).unwrap();
        assert!(last.game_over);
        assert_eq!((s.user_score(), s.computer_score(), s.ties()), (1, 1, 1));
        assert_eq!(s.phase(), Phase::Complete);
        assert_eq!(s.log().len(), 4);
        assert_eq!(s.log().last(), Some("The game was a tie with a score of 1-1"));
    }

    #[test]
    fn win_and_loss_summaries() {
        let mut s = started(1);
        s.play_against(Move::Paper, Move::Rock).unwrap();
        assert_eq!(s.log().last(), Some("Congratulations! You won the game with a score of 1-0"));

        let mut s = started(2);
        s.play_against(Move::Paper, Move::Scissors).unwrap();
        s.play_against(Move::Paper, Move::Paper).unwrap();
        assert_eq!(s.log().last(), Some("Sorry, You lost the game with a score of 0-1"));
    }

    #[test]
    fn no_moves_after_complete() {
        let mut s = started(1);
        s.play_against(Move::Rock, Move::Rock).unwrap();
        assert_eq!(s.play_against(Move::Rock, Move::Paper), Err(PlayError::GameOver));
        assert_eq!(s.record_computer_move(Move::Rock), Err(PlayError::GameOver));
        assert_eq!(s.current_round(), 1);
        assert_eq!(s.log().len(), 2);
    }

    #[test]
    fn scores_and_ties_add_up_every_round() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut s = started(25);
        while s.accepts_moves() {
            let user = Move::random(&mut rng);
            s.play(user, &mut rng).unwrap();
            assert_eq!(s.user_score() + s.computer_score() + s.ties(), s.current_round());
            assert!(s.current_round() <= 25);
        }
        assert_eq!(s.current_round(), 25);
        // 25 round lines + summary
        assert_eq!(s.log().len(), 26);
    }

    #[test]
    fn score_line_before_and_after_start() {
        let s = RoundState::new();
        assert_eq!(s.score_line(), "Set the number of rounds to start");
        let mut s = started(5);
        s.play_against(Move::Rock, Move::Scissors).unwrap();
        assert_eq!(s.score_line(), "Round 1/5   You 1 - 0 Computer");
    }
}
