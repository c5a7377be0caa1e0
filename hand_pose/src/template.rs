//! Gesture templates (named reference poses as per-finger curl
//! expectations) and the read-only store that holds them.

use crate::curl::FingerCurl;
use crate::landmark::Finger;

pub const VICTORY:   &str = "victory";
pub const FIST:      &str = "fist";
pub const OPEN_FIST: &str = "open_fist";

// ════════════════════════════════════════════════════════════════════════════
// GestureTemplate
// ════════════════════════════════════════════════════════════════════════════

/// A named pose: for each finger, the acceptable curls and the weight each
/// contributes when detected.
///
/// Built once with the chained setters and never changed afterwards.
///
/// ```rust
/// use hand_pose::{GestureTemplate, Finger, FingerCurl};
///
/// let point = GestureTemplate::new("point")
///     .curl(Finger::Index,  FingerCurl::NoCurl,   1.0)
///     .curl(Finger::Middle, FingerCurl::FullCurl, 1.0);
/// assert_eq!(point.expected(Finger::Index).len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GestureTemplate {
    name:  String,
    curls: [Vec<(FingerCurl, f32)>; 5],
}

impl GestureTemplate {
    pub fn new(name: &str) -> Self {
        GestureTemplate {
            name:  name.to_string(),
            curls: Default::default(),
        }
    }

    /// Expect `curl` on `finger` with confidence `weight` (clamped to
    /// 0–1).  Adding the same curl twice keeps the later weight.
    pub fn curl(mut self, finger: Finger, curl: FingerCurl, weight: f32) -> Self {
        let weight  = weight.clamp(0.0, 1.0);
        let entries = &mut self.curls[finger.index()];
        match entries.iter_mut().find(|(c, _)| *c == curl) {
            Some(entry) => entry.1 = weight,
            None        => entries.push((curl, weight)),
        }
        self
    }

    /// Same expectation on all five fingers.
    pub fn every_finger(self, curl: FingerCurl, weight: f32) -> Self {
        Finger::ALL.iter().fold(self, |t, &f| t.curl(f, curl, weight))
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn expected(&self, finger: Finger) -> &[(FingerCurl, f32)] {
        &self.curls[finger.index()]
    }

    /// Score detected curls against this template on a 0–10 scale.
    ///
    /// Each constrained finger contributes the weight of its matching curl
    /// (0 when the detected curl is not listed); the total is averaged
    /// over constrained fingers.  `None` if the template constrains no
    /// finger at all.
    pub fn score(&self, detected: &[FingerCurl; 5]) -> Option<f32> {
        let mut total       = 0.0_f32;
        let mut constrained = 0usize;
        for finger in Finger::ALL {
            let expected = self.expected(finger);
            if expected.is_empty() { continue; }
            constrained += 1;
            let got = detected[finger.index()];
            total += expected.iter()
                .filter(|(c, _)| *c == got)
                .map(|&(_, w)| w)
                .fold(0.0, f32::max);
        }
        if constrained == 0 {
            None
        } else {
            Some(total / constrained as f32 * 10.0)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Built-in templates
// ════════════════════════════════════════════════════════════════════════════

/// Index and middle up, ring and pinky folded; thumb loose.
pub fn victory() -> GestureTemplate {
    GestureTemplate::new(VICTORY)
        .curl(Finger::Thumb,  FingerCurl::HalfCurl, 0.5)
        .curl(Finger::Thumb,  FingerCurl::NoCurl,   0.5)
        .curl(Finger::Index,  FingerCurl::NoCurl,   1.0)
        .curl(Finger::Middle, FingerCurl::NoCurl,   1.0)
        .curl(Finger::Ring,   FingerCurl::FullCurl, 1.0)
        .curl(Finger::Pinky,  FingerCurl::FullCurl, 1.0)
}

pub fn fist() -> GestureTemplate {
    GestureTemplate::new(FIST)
        .every_finger(FingerCurl::FullCurl, 1.0)
        .every_finger(FingerCurl::HalfCurl, 0.9)
}

pub fn open_fist() -> GestureTemplate {
    GestureTemplate::new(OPEN_FIST)
        .every_finger(FingerCurl::NoCurl,   1.0)
        .every_finger(FingerCurl::HalfCurl, 0.9)
}

// ════════════════════════════════════════════════════════════════════════════
// TemplateStore
// ════════════════════════════════════════════════════════════════════════════

/// Ordered, read-only collection of templates.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateStore {
    templates: Vec<GestureTemplate>,
}

impl TemplateStore {
    pub fn new(templates: Vec<GestureTemplate>) -> Self {
        TemplateStore { templates }
    }

    /// victory, fist, open_fist, in that order.
    pub fn builtin() -> Self {
        TemplateStore::new(vec![victory(), fist(), open_fist()])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GestureTemplate> { self.templates.iter() }
    pub fn len(&self)      -> usize { self.templates.len() }
    pub fn is_empty(&self) -> bool  { self.templates.is_empty() }

    pub fn get(&self, name: &str) -> Option<&GestureTemplate> {
        self.templates.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name()).collect()
    }
}

impl Default for TemplateStore {
    fn default() -> Self { TemplateStore::builtin() }
}

impl<'a> IntoIterator for &'a TemplateStore {
    type Item     = &'a GestureTemplate;
    type IntoIter = std::slice::Iter<'a, GestureTemplate>;
    fn into_iter(self) -> Self::IntoIter { self.templates.iter() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
