//! Finger-curl estimation.
//!
//! Each finger is judged by the angle at its second chain joint, between
//! the first joint past the wrist and the fingertip.  A straight finger
//! gives ~180°; a finger folded into the palm gives well under 60°.

use crate::landmark::{Finger, Hand, Landmark};

/// Bend state of one finger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerCurl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl FingerCurl {
    pub const ALL: [FingerCurl; 3] = [FingerCurl::NoCurl, FingerCurl::HalfCurl, FingerCurl::FullCurl];

    pub fn name(self) -> &'static str {
        match self {
            FingerCurl::NoCurl   => "none",
            FingerCurl::HalfCurl => "half",
            FingerCurl::FullCurl => "full",
        }
    }
}

/// Angle thresholds (degrees) separating the three curl classes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurlLimits {
    /// Angles strictly above this are [`FingerCurl::NoCurl`].
    pub no_curl_above:   f32,
    /// Angles strictly above this (and not above `no_curl_above`) are
    /// [`FingerCurl::HalfCurl`]; anything lower is full.
    pub half_curl_above: f32,
}

impl Default for CurlLimits {
    fn default() -> Self {
        CurlLimits { no_curl_above: 130.0, half_curl_above: 60.0 }
    }
}

impl CurlLimits {
    pub fn classify(&self, angle_deg: f32) -> FingerCurl {
        if angle_deg > self.no_curl_above {
            FingerCurl::NoCurl
        } else if angle_deg > self.half_curl_above {
            FingerCurl::HalfCurl
        } else {
            FingerCurl::FullCurl
        }
    }
}

/// Interior angle at `mid` (degrees) of the triangle `start`–`mid`–`end`.
///
/// Returns `None` when a point is non-finite or either side touching `mid`
/// has zero length.
pub fn bend_angle(start: &Landmark, mid: &Landmark, end: &Landmark) -> Option<f32> {
    if !(start.is_finite() && mid.is_finite() && end.is_finite()) {
        return None;
    }
    let start_mid = start.distance(mid);
    let mid_end   = mid.distance(end);
    let start_end = start.distance(end);
    if start_mid < 1e-6 || mid_end < 1e-6 {
        return None;
    }
    let cos_in = (mid_end*mid_end + start_mid*start_mid - start_end*start_end)
        / (2.0 * mid_end * start_mid);
    let angle = cos_in.clamp(-1.0, 1.0).acos().to_degrees();
    angle.is_finite().then_some(angle)
}

/// Bend angle of one finger; `None` for degenerate geometry.
pub fn finger_angle(hand: &Hand, finger: Finger) -> Option<f32> {
    let chain = hand.finger(finger);
    bend_angle(&chain[1], &chain[2], &chain[4])
}

pub fn estimate_finger_curl(hand: &Hand, finger: Finger, limits: &CurlLimits) -> FingerCurl {
    match finger_angle(hand, finger) {
        Some(angle) => limits.classify(angle),
        None        => FingerCurl::NoCurl,
    }
}

/// Curl of every finger, in [`Finger::ALL`] order.
pub fn estimate_curls(hand: &Hand, limits: &CurlLimits) -> [FingerCurl; 5] {
    Finger::ALL.map(|f| estimate_finger_curl(hand, f, limits))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT};

    fn angle_between(deg: f32) -> f32 {
        // start at (-1,0), mid at origin, end at angle `deg` measured from start ray
        let start = Landmark::new(-1.0, 0.0, 0.0);
        let mid   = Landmark::new(0.0, 0.0, 0.0);
        let rad   = (180.0 - deg).to_radians();
        let end   = Landmark::new(rad.cos(), rad.sin(), 0.0);
        bend_angle(&start, &mid, &end).unwrap()
    }

    #[test]
    fn straight_line_is_180() {
        assert!((angle_between(180.0) - 180.0).abs() < 0.01);
    }

    #[test]
    fn right_angle_is_90() {
        assert!((angle_between(90.0) - 90.0).abs() < 0.01);
    }

    #[test]
    fn degenerate_segment_has_no_angle() {
        let p = Landmark::new(1.0, 1.0, 0.0);
        assert_eq!(bend_angle(&p, &p, &Landmark::default()), None);
    }

    #[test]
    fn non_finite_point_has_no_angle() {
        let a = Landmark::new(-1.0, 0.0, 0.0);
        let b = Landmark::default();
        assert_eq!(bend_angle(&a, &b, &Landmark::new(f32::NAN, 1.0, 0.0)), None);
        assert_eq!(bend_angle(&a, &Landmark::new(0.0, f32::INFINITY, 0.0), &b), None);
        // finite but huge coordinates overflow the squared distances
        assert_eq!(bend_angle(&Landmark::new(-3e38, 0.0, 0.0), &b, &Landmark::new(3e38, 1.0, 0.0)), None);
    }

    #[test]
    fn classify_uses_strict_limits() {
        let l = CurlLimits::default();
        assert_eq!(l.classify(170.0), FingerCurl::NoCurl);
        assert_eq!(l.classify(130.0), FingerCurl::HalfCurl);
        assert_eq!(l.classify(90.0),  FingerCurl::HalfCurl);
        assert_eq!(l.classify(60.0),  FingerCurl::FullCurl);
        assert_eq!(l.classify(20.0),  FingerCurl::FullCurl);
    }

    #[test]
    fn collapsed_hand_reads_as_uncurled() {
        let hand = Hand::new([Landmark::default(); LANDMARK_COUNT], 1.0);
        let curls = estimate_curls(&hand, &CurlLimits::default());
        assert!(curls.iter().all(|&c| c == FingerCurl::NoCurl));
    }

    #[test]
    fn folded_index_is_full_curl() {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        // index MCP, PIP, DIP, tip: out along +y then folded back toward MCP
        pts[5] = Landmark::new(0.0, 0.0, 0.0);
        pts[6] = Landmark::new(0.0, 10.0, 0.0);
        pts[7] = Landmark::new(0.0, 12.0, 6.0);
        pts[8] = Landmark::new(0.0, 4.0, 5.0);
        let hand = Hand::new(pts, 1.0);
        assert_eq!(
            estimate_finger_curl(&hand, Finger::Index, &CurlLimits::default()),
            FingerCurl::FullCurl
        );
    }
}
