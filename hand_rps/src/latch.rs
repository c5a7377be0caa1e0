//! Hold-to-confirm filter between per-frame gesture matches and moves.
//!
//! The matcher reports a label every frame.  Feeding that straight into the
//! round state machine would spend every remaining round on one held pose,
//! so a label must stay the best match for `hold_frames` consecutive frames
//! before it fires, and it fires only once until the hand changes.

#[derive(Clone, Debug)]
pub struct GestureLatch {
    hold_frames: u32,
    candidate:   Option<String>,
    count:       u32,
    fired:       bool,
}

impl GestureLatch {
    /// `hold_frames` is clamped to at least 1 (fire on first sight).
    pub fn new(hold_frames: u32) -> Self {
        GestureLatch {
            hold_frames: hold_frames.max(1),
            candidate:   None,
            count:       0,
            fired:       false,
        }
    }

    /// Feed this frame's best label (`None` when no hand or no match).
    ///
    /// Returns the label on the frame it is confirmed; `None` on every
    /// other frame.
    pub fn observe(&mut self, label: Option<&str>) -> Option<String> {
        let Some(label) = label else {
            self.reset();
            return None;
        };

        if self.candidate.as_deref() != Some(label) {
            self.candidate = Some(label.to_string());
            self.count     = 0;
            self.fired     = false;
        }

        if self.fired { return None; }

        self.count += 1;
        if self.count >= self.hold_frames {
            self.fired = true;
            log::debug!("latch fired: {} after {} frame(s)", label, self.count);
            return self.candidate.clone();
        }
        None
    }

    pub fn reset(&mut self) {
        self.candidate = None;
        self.count     = 0;
        self.fired     = false;
    }

    /// Fraction of the hold completed for the current candidate, 0.0–1.0.
    /// Stays at 1.0 after firing until the label changes.
    pub fn progress(&self) -> f32 {
        if self.candidate.is_none() { return 0.0; }
        (self.count as f32 / self.hold_frames as f32).min(1.0)
    }

    pub fn candidate(&self)   -> Option<&str> { self.candidate.as_deref() }
    pub fn hold_frames(&self) -> u32          { self.hold_frames }
    pub fn has_fired(&self)   -> bool         { self.fired }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_hold() {
        let mut l = GestureLatch::new(3);
        assert_eq!(l.observe(Some("fist")), None);
        assert_eq!(l.observe(Some("fist")), None);
        assert_eq!(l.observe(Some("fist")), Some("fist".to_string()));
    }

    #[test]
    fn fires_once_while_held() {
        let mut l = GestureLatch::new(2);
        let fired: Vec<_> = (0..50).filter_map(|_| l.observe(Some("victory"))).collect();
        assert_eq!(fired, vec!["victory".to_string()]);
        assert!(l.has_fired());
        assert_eq!(l.progress(), 1.0);
    }

    #[test]
    fn label_change_restarts_count() {
        let mut l = GestureLatch::new(3);
        l.observe(Some("fist"));
        l.observe(Some("fist"));
        assert_eq!(l.observe(Some("victory")), None);
        assert_eq!(l.candidate(), Some("victory"));
        assert_eq!(l.observe(Some("victory")), None);
        assert_eq!(l.observe(Some("victory")), Some("victory".to_string()));
    }

    #[test]
    fn rearms_after_hand_disappears() {
        let mut l = GestureLatch::new(1);
        assert_eq!(l.observe(Some("fist")), Some("fist".to_string()));
        assert_eq!(l.observe(Some("fist")), None);
        assert_eq!(l.observe(None), None);
        assert_eq!(l.progress(), 0.0);
        assert_eq!(l.observe(Some("fist")), Some("fist".to_string()));
    }

    #[test]
    fn zero_hold_behaves_like_one() {
        let mut l = GestureLatch::new(0);
        assert_eq!(l.hold_frames(), 1);
        assert_eq!(l.observe(Some("open_fist")), Some("open_fist".to_string()));
    }

    #[test]
    fn gap_in_hold_starts_over() {
        let mut l = GestureLatch::new(3);
        l.observe(Some("fist"));
        l.observe(Some("fist"));
        l.observe(None);
        assert_eq!(l.observe(Some("fist")), None);
        assert!((l.progress() - 1.0 / 3.0).abs() < 1e-6);
    }
}
