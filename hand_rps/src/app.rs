//! Top-level application state machine.
//!
//! `AppState` owns the `RoundState`, the pose source, the gesture matcher,
//! the latch, and the computer's RNG.  It applies `UiAction`s and processes
//! one camera frame at a time; `App` pairs it with the window and runs it
//! under the `FrameScheduler`.

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};

use hand_pose::{CurlMatcher, GestureMatcher, Hand, PoseError, TemplateStore};
use rps_round::{move_for_gesture, Move, RoundCount, RoundReport, RoundState, Outcome, DEFAULT_ROUNDS};

use crate::config::{AppConfig, SourceKind};
use crate::frame::{FrameOutcome, FrameScheduler, FrameStats, FrameTask, SkipReason, StopHandle};
use crate::latch::GestureLatch;
use crate::overlay::OverlayStyle;
use crate::pose::{PoseSource, SimPoseSource};
use crate::visualizer::{UiAction, UiView, Visualizer};

/// Longest text the round-count field accepts.
const MAX_INPUT_LEN: usize = 6;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── game ──────────────────────────────────────────────────────────────
    round:       RoundState,
    rng:         StdRng,

    // ── detection ─────────────────────────────────────────────────────────
    source:      Box<dyn PoseSource>,
    matcher:     Box<dyn GestureMatcher>,
    latch:       GestureLatch,
    min_score:   f32,
    hands:       Vec<Hand>,
    gesture:     Option<String>,

    // ── round-count input ─────────────────────────────────────────────────
    round_input: String,
    input_error: Option<String>,

    // ── status message ────────────────────────────────────────────────────
    pub status:  String,
}

impl AppState {
    pub fn new(source: Box<dyn PoseSource>, matcher: Box<dyn GestureMatcher>, cfg: &AppConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => {
                log::info!("computer moves seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        let mut app = AppState {
            round:       RoundState::new(),
            rng,
            status:      format!("Ready ({}). Set the number of rounds and press Enter", source.name()),
            source,
            matcher,
            latch:       GestureLatch::new(cfg.hold_frames),
            min_score:   cfg.min_score,
            hands:       Vec::new(),
            gesture:     None,
            round_input: DEFAULT_ROUNDS.to_string(),
            input_error: None,
        };

        if let Some(n) = cfg.rounds {
            app.round_input = n.to_string();
            app.submit_rounds();
        }
        app
    }

    // ── UI actions ────────────────────────────────────────────────────────

    /// Apply one UI action.  Returns false when the app should quit.
    pub fn handle_action(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::RoundChar(c) => {
                if self.round.is_configured() { return true; }
                if (c.is_ascii_digit() || c == '-') && self.round_input.len() < MAX_INPUT_LEN {
                    self.round_input.push(c);
                    self.input_error = None;
                }
            }
            UiAction::RoundBackspace => {
                if !self.round.is_configured() {
                    self.round_input.pop();
                    self.input_error = None;
                }
            }
            UiAction::SubmitRounds => { self.submit_rounds(); }
            UiAction::ManualMove(mv) => { self.submit_move(mv); }
            UiAction::ShowPose(pose) => {
                self.source.select_pose(pose);
                self.status = match pose {
                    Some(p) => format!("Showing {}", p.name()),
                    None    => "Hand lowered".to_string(),
                };
            }
            UiAction::Quit => return false,
        }
        true
    }

    /// Validate the round-count text and start the game.  The field locks
    /// on success; on failure the error is shown and nothing starts.
    pub fn submit_rounds(&mut self) -> bool {
        if self.round.is_configured() {
            self.status = "The number of rounds is locked for this game".to_string();
            return false;
        }
        let rounds = match RoundCount::parse(&self.round_input) {
            Ok(n)  => n,
            Err(e) => {
                log::warn!("rejected round count {:?}: {}", self.round_input, e);
                self.input_error = Some(e.to_string());
                return false;
            }
        };
        if let Err(e) = self.round.configure(rounds) {
            self.status = e.to_string();
            return false;
        }
        self.input_error = None;
        self.latch.reset();
        self.status = format!("Game on: {} round(s). Show rock, paper or scissors", rounds);
        true
    }

    /// Play `mv` against a random computer move.
    pub fn submit_move(&mut self, mv: Move) -> Option<RoundReport> {
        match self.round.play(mv, &mut self.rng) {
            Ok(report) => {
                self.status = match report.outcome {
                    Outcome::UserWins     => format!("You played {}, computer {}. Point to you", report.user, report.computer),
                    Outcome::ComputerWins => format!("You played {}, computer {}. Point to the computer", report.user, report.computer),
                    Outcome::Tie          => format!("You both played {}", report.user),
                };
                if report.game_over {
                    self.status = "Game over".to_string();
                }
                Some(report)
            }
            Err(e) => {
                log::debug!("move {} ignored: {}", mv, e);
                self.status = e.to_string();
                None
            }
        }
    }

    // ── Per-frame processing ──────────────────────────────────────────────

    /// Detect, match, latch, and play for one camera frame.
    pub fn process_frame(&mut self) -> FrameOutcome {
        let hands = match self.source.estimate_hands() {
            Ok(h) => h,
            Err(PoseError::NotReady) => {
                self.hands.clear();
                return FrameOutcome::Skipped(SkipReason::SourceNotReady);
            }
            Err(e) => {
                log::warn!("{}: {}", self.source.name(), e);
                self.hands.clear();
                return FrameOutcome::Skipped(SkipReason::SourceError);
            }
        };
        self.hands = hands;

        let Some(hand) = self.hands.first() else {
            self.latch.observe(None);
            return FrameOutcome::Skipped(SkipReason::NoHand);
        };

        let result = self.matcher.estimate(hand, self.min_score);
        let Some(best) = result.best() else {
            self.latch.observe(None);
            return FrameOutcome::Skipped(SkipReason::NoGesture);
        };
        log::trace!("best gesture {} ({:.2})", best.name, best.score);
        self.gesture = Some(best.name.clone());

        if let Some(fired) = self.latch.observe(Some(best.name.as_str())) {
            match move_for_gesture(&fired) {
                Some(mv) => { self.submit_move(mv); }
                None     => log::debug!("gesture {} maps to no move", fired),
            }
        }
        FrameOutcome::Rendered
    }

    /// Snapshot for the window.
    pub fn view<'a>(&'a self, style: &'a OverlayStyle) -> UiView<'a> {
        UiView {
            hands:         &self.hands,
            style,
            round_input:   &self.round_input,
            input_locked:  self.round.is_configured(),
            input_error:   self.input_error.as_deref(),
            gesture:       self.gesture.as_deref(),
            hold_progress: self.latch.progress(),
            score_line:    self.round.score_line(),
            log:           self.round.log(),
            status:        &self.status,
            source_name:   self.source.name(),
            shown_pose:    self.source.selected_pose(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn round(&self)       -> &RoundState    { &self.round }
    pub fn hands(&self)       -> &[Hand]        { &self.hands }
    pub fn gesture(&self)     -> Option<&str>   { self.gesture.as_deref() }
    pub fn round_input(&self) -> &str           { &self.round_input }
    pub fn input_error(&self) -> Option<&str>   { self.input_error.as_deref() }
}

// ════════════════════════════════════════════════════════════════════════════
// App — AppState + window, driven as a FrameTask
// ════════════════════════════════════════════════════════════════════════════

pub struct App {
    state: AppState,
    vis:   Visualizer,
    style: OverlayStyle,
    stop:  StopHandle,
}

impl FrameTask for App {
    fn frame(&mut self) -> FrameOutcome {
        if self.stop.is_stopped() || !self.vis.is_open() {
            return FrameOutcome::Stop;
        }
        for action in self.vis.poll_input() {
            if !self.state.handle_action(action) {
                return FrameOutcome::Stop;
            }
        }
        let outcome = self.state.process_frame();
        self.vis.render(&self.state.view(&self.style));
        outcome
    }
}

/// What a finished session leaves behind.
pub struct SessionReport {
    pub stats: FrameStats,
    pub round: RoundState,
}

/// Build the configured pose source.
pub fn open_source(cfg: &AppConfig) -> anyhow::Result<Box<dyn PoseSource>> {
    match cfg.source {
        SourceKind::Sim => Ok(Box::new(SimPoseSource::new(
            cfg.camera_width, cfg.camera_height, cfg.warmup_frames,
        ))),
        #[cfg(feature = "leap")]
        SourceKind::Leap => {
            let src = crate::pose::LeapPoseSource::open(cfg.camera_width, cfg.camera_height)
                .context("opening LeapMotion controller")?;
            Ok(Box::new(src))
        }
        #[cfg(not(feature = "leap"))]
        SourceKind::Leap => anyhow::bail!("LeapMotion support is not compiled in; rebuild with --features leap"),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application until the window closes or the user quits.
pub fn run(cfg: AppConfig) -> anyhow::Result<SessionReport> {
    let source  = open_source(&cfg)?;
    let matcher = CurlMatcher::new(TemplateStore::builtin()).with_limits(cfg.curl_limits());
    log::info!(
        "pose source: {}; {} template(s), min score {}",
        source.name(), matcher.store().len(), cfg.min_score
    );

    let state = AppState::new(source, Box::new(matcher), &cfg);
    let vis = Visualizer::new(cfg.camera_width, cfg.camera_height)
        .map_err(anyhow::Error::msg)
        .context("opening window")?;

    let mut sched = FrameScheduler::with_interval(cfg.frame_interval());
    let mut app = App {
        state,
        vis,
        style: OverlayStyle { mirror: cfg.mirror, ..OverlayStyle::default() },
        stop:  sched.stop_handle(),
    };

    let stats = sched.run(&mut app);
    Ok(SessionReport { stats, round: app.state.round })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
