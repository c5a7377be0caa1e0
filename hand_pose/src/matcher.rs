//! Scoring a hand against the template store.

use std::cmp::Ordering;

use crate::curl::{estimate_curls, CurlLimits};
use crate::landmark::{Hand, Landmark};
use crate::template::TemplateStore;

/// Minimum score (0–10) a template must reach to count as a match.
pub const DEFAULT_MIN_SCORE: f32 = 8.0;

// ════════════════════════════════════════════════════════════════════════════
// MatchResult
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct GestureMatch {
    pub name:  String,
    pub score: f32,
}

/// Matches at or above the minimum score, highest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchResult {
    matches: Vec<GestureMatch>,
}

impl MatchResult {
    /// Sorts `matches` by descending score.  The sort is stable, so equal
    /// scores keep their input order.
    pub fn new(mut matches: Vec<GestureMatch>) -> Self {
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        MatchResult { matches }
    }

    /// The chosen gesture for this frame, if anything matched.
    pub fn best(&self) -> Option<&GestureMatch> { self.matches.first() }

    pub fn iter(&self)     -> std::slice::Iter<'_, GestureMatch> { self.matches.iter() }
    pub fn len(&self)      -> usize { self.matches.len() }
    pub fn is_empty(&self) -> bool  { self.matches.is_empty() }

    pub fn score_of(&self, name: &str) -> Option<f32> {
        self.matches.iter().find(|m| m.name == name).map(|m| m.score)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureMatcher
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can rank gestures for a set of hand landmarks.
pub trait GestureMatcher {
    /// Rank gestures for `hand`, dropping any below `min_score`.
    fn estimate(&self, hand: &Hand, min_score: f32) -> MatchResult;
}

/// Curl-only matcher over a [`TemplateStore`].
#[derive(Clone, Debug, Default)]
pub struct CurlMatcher {
    store:  TemplateStore,
    limits: CurlLimits,
}

impl CurlMatcher {
    pub fn new(store: TemplateStore) -> Self {
        CurlMatcher { store, limits: CurlLimits::default() }
    }

    pub fn with_limits(mut self, limits: CurlLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn store(&self)  -> &TemplateStore { &self.store }
    pub fn limits(&self) -> &CurlLimits    { &self.limits }
}

impl GestureMatcher for CurlMatcher {
    fn estimate(&self, hand: &Hand, min_score: f32) -> MatchResult {
        if !hand.landmarks().iter().all(Landmark::is_finite) {
            log::trace!("hand has non-finite landmarks; no match");
            return MatchResult::default();
        }
        let curls = estimate_curls(hand, &self.limits);
        log::trace!("curls: {:?}", curls);

        let matches = self.store.iter()
            .filter_map(|t| t.score(&curls).map(|s| (t, s)))
            .filter(|&(_, s)| s >= min_score)
            .map(|(t, score)| GestureMatch { name: t.name().to_string(), score })
            .collect();
        MatchResult::new(matches)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{synthesize, SimPose};
    use crate::template::{GestureTemplate, FIST, OPEN_FIST, VICTORY};
    use crate::curl::FingerCurl;

    fn best(pose: SimPose) -> Option<String> {
        let hand = synthesize(pose, (320.0, 320.0), 1.0, 0);
        CurlMatcher::default()
            .estimate(&hand, DEFAULT_MIN_SCORE)
            .best()
            .map(|m| m.name.clone())
    }

    #[test]
    fn fist_pose_matches_fist() {
        assert_eq!(best(SimPose::Fist).as_deref(), Some(FIST));
    }

    #[test]
    fn open_pose_matches_open_fist() {
        assert_eq!(best(SimPose::Open).as_deref(), Some(OPEN_FIST));
    }

    #[test]
    fn victory_pose_matches_victory() {
        assert_eq!(best(SimPose::Victory).as_deref(), Some(VICTORY));
    }

    #[test]
    fn min_score_filters_everything_above_ten() {
        let hand = synthesize(SimPose::Fist, (320.0, 320.0), 1.0, 0);
        assert!(CurlMatcher::default().estimate(&hand, 10.5).is_empty());
    }

    #[test]
    fn nan_hand_matches_nothing() {
        let hand = Hand::new([Landmark::new(f32::NAN, f32::NAN, f32::NAN); 21], 1.0);
        let r = CurlMatcher::default().estimate(&hand, 0.0);
        assert!(r.is_empty());
        assert_eq!(r.best(), None);
    }

    #[test]
    fn fist_with_infinite_joints_matches_nothing() {
        let fist = synthesize(SimPose::Fist, (320.0, 320.0), 1.0, 0);
        let mut pts = *fist.landmarks();
        for p in pts.iter_mut().skip(1) {
            p.x = f32::INFINITY;
        }
        let hand = Hand::new(pts, 1.0);
        assert!(CurlMatcher::default().estimate(&hand, 0.0).is_empty());
    }

    #[test]
    fn one_bad_landmark_spoils_the_hand() {
        let open = synthesize(SimPose::Open, (320.0, 320.0), 1.0, 0);
        let mut pts = *open.landmarks();
        pts[8].z = f32::NAN;
        let hand = Hand::new(pts, 1.0);
        assert!(CurlMatcher::default().estimate(&hand, DEFAULT_MIN_SCORE).is_empty());
    }

    #[test]
    fn results_are_sorted_descending() {
        let r = MatchResult::new(vec![
            GestureMatch { name: "a".into(), score: 8.0 },
            GestureMatch { name: "b".into(), score: 9.5 },
            GestureMatch { name: "c".into(), score: 8.0 },
        ]);
        let names: Vec<&str> = r.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(r.score_of("c"), Some(8.0));
    }

    #[test]
    fn custom_store_is_used() {
        let store = TemplateStore::new(vec![
            GestureTemplate::new("anything").every_finger(FingerCurl::NoCurl, 1.0)
                .every_finger(FingerCurl::HalfCurl, 1.0)
                .every_finger(FingerCurl::FullCurl, 1.0),
        ]);
        let hand = synthesize(SimPose::Victory, (0.0, 0.0), 1.0, 3);
        let r = CurlMatcher::new(store).estimate(&hand, 0.0);
        assert_eq!(r.best().map(|m| m.score), Some(10.0));
    }
}
