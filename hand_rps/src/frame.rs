//! Cooperative frame scheduling.
//!
//! One frame runs to completion (or is skipped) before the next is
//! requested.  Between frames the scheduler sleeps for whatever is left of
//! the frame interval; a slow frame simply delays the next one.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// ════════════════════════════════════════════════════════════════════════════
// Frame outcomes
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The pose source has nothing yet (warming up, connecting).
    SourceNotReady,
    /// The pose source reported an error for this frame.
    SourceError,
    /// No hand in view.
    NoHand,
    /// A hand was seen but no template reached the min score.
    NoGesture,
}

impl SkipReason {
    pub const ALL: [SkipReason; 4] = [
        SkipReason::SourceNotReady,
        SkipReason::SourceError,
        SkipReason::NoHand,
        SkipReason::NoGesture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkipReason::SourceNotReady => "source not ready",
            SkipReason::SourceError    => "source error",
            SkipReason::NoHand         => "no hand",
            SkipReason::NoGesture      => "no gesture",
        }
    }

    fn slot(self) -> usize {
        match self {
            SkipReason::SourceNotReady => 0,
            SkipReason::SourceError    => 1,
            SkipReason::NoHand         => 2,
            SkipReason::NoGesture      => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    Skipped(SkipReason),
    /// The task wants the loop to end (window closed, quit key).
    Stop,
}

// ════════════════════════════════════════════════════════════════════════════
// FrameStats
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub rendered: u64,
    skipped:      [u64; 4],
}

impl FrameStats {
    pub fn record(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Rendered          => self.rendered += 1,
            FrameOutcome::Skipped(reason)   => self.skipped[reason.slot()] += 1,
            FrameOutcome::Stop              => {}
        }
    }

    pub fn skipped(&self, reason: SkipReason) -> u64 { self.skipped[reason.slot()] }
    pub fn total_skipped(&self)               -> u64 { self.skipped.iter().sum() }
    pub fn total(&self)                       -> u64 { self.rendered + self.total_skipped() }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} frame(s): {} rendered", self.total(), self.rendered)?;
        for reason in SkipReason::ALL {
            let n = self.skipped(reason);
            if n > 0 {
                write!(f, ", {} skipped ({})", n, reason.name())?;
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameTask / StopHandle
// ════════════════════════════════════════════════════════════════════════════

/// One unit of per-frame work.  The task owns its long-lived state.
pub trait FrameTask {
    fn frame(&mut self) -> FrameOutcome;
}

impl<F: FnMut() -> FrameOutcome> FrameTask for F {
    fn frame(&mut self) -> FrameOutcome { self() }
}

/// Cloneable cancel signal for a running [`FrameScheduler`].
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self { Self::default() }

    pub fn stop(&self)            { self.0.store(true, Ordering::SeqCst); }
    pub fn is_stopped(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameScheduler
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameScheduler {
    interval: Duration,
    stop:     StopHandle,
    stats:    FrameStats,
}

impl FrameScheduler {
    /// Pace to `fps` frames per second (clamped to 1–240).
    pub fn new(fps: u32) -> Self {
        let fps = fps.clamp(1, 240);
        Self::with_interval(Duration::from_secs_f64(1.0 / fps as f64))
    }

    /// Explicit interval; `Duration::ZERO` runs frames back to back.
    pub fn with_interval(interval: Duration) -> Self {
        FrameScheduler { interval, stop: StopHandle::new(), stats: FrameStats::default() }
    }

    /// Share an existing stop signal instead of the scheduler's own.
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_handle(&self) -> StopHandle  { self.stop.clone() }
    pub fn stats(&self)       -> FrameStats  { self.stats }
    pub fn interval(&self)    -> Duration    { self.interval }

    /// Run exactly one frame and record its outcome.
    pub fn step<T: FrameTask + ?Sized>(&mut self, task: &mut T) -> FrameOutcome {
        let outcome = task.frame();
        if let FrameOutcome::Skipped(reason) = outcome {
            log::trace!("frame skipped: {}", reason.name());
        }
        self.stats.record(outcome);
        outcome
    }

    /// Run frames until the task returns [`FrameOutcome::Stop`] or the stop
    /// handle is signalled.  Returns the final statistics.
    pub fn run<T: FrameTask + ?Sized>(&mut self, task: &mut T) -> FrameStats {
        log::debug!("frame loop started ({:?} per frame)", self.interval);

        while !self.stop.is_stopped() {
            let started = Instant::now();
            if self.step(task) == FrameOutcome::Stop {
                self.stop.stop();
                break;
            }
            let spent = started.elapsed();
            if spent < self.interval {
                thread::sleep(self.interval - spent);
            }
        }

        log::info!("frame loop stopped: {}", self.stats);
        self.stats
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
