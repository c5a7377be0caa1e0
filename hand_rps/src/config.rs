//! Application configuration.
//!
//! Every field has a default, so an empty or missing TOML file is valid.
//! Command-line flags are applied on top in `main`.
//!
//! ```toml
//! fps         = 30
//! min_score   = 8.0
//! hold_frames = 12
//! mirror      = true
//! rounds      = 5
//! seed        = 42
//! source      = "sim"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use hand_pose::{CurlLimits, DEFAULT_MIN_SCORE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Keyboard-driven synthetic hand.
    #[default]
    Sim,
    /// LeapMotion controller (needs the `leap` feature).
    Leap,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub camera_width:    usize,
    pub camera_height:   usize,
    pub fps:             u32,
    /// Minimum template score (0–10) for a gesture to count.
    pub min_score:       f32,
    /// Consecutive frames a gesture must be held before it plays.
    pub hold_frames:     u32,
    pub no_curl_above:   f32,
    pub half_curl_above: f32,
    pub mirror:          bool,
    /// Submitted automatically at startup when set.
    pub rounds:          Option<u32>,
    /// Seeds the computer's moves for a reproducible game.
    pub seed:            Option<u64>,
    pub source:          SourceKind,
    /// Frames the simulated camera reports not-ready after startup.
    pub warmup_frames:   u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let limits = CurlLimits::default();
        AppConfig {
            camera_width:    640,
            camera_height:   480,
            fps:             30,
            min_score:       DEFAULT_MIN_SCORE,
            hold_frames:     12,
            no_curl_above:   limits.no_curl_above,
            half_curl_above: limits.half_curl_above,
            mirror:          true,
            rounds:          None,
            seed:            None,
            source:          SourceKind::Sim,
            warmup_frames:   10,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.camera_width > 0 && self.camera_height > 0,
            "camera size must be non-zero, got {}x{}", self.camera_width, self.camera_height);
        anyhow::ensure!((0.0..=10.0).contains(&self.min_score),
            "min_score must be within 0–10, got {}", self.min_score);
        anyhow::ensure!(self.half_curl_above < self.no_curl_above,
            "half_curl_above ({}) must be below no_curl_above ({})",
            self.half_curl_above, self.no_curl_above);
        Ok(())
    }

    pub fn curl_limits(&self) -> CurlLimits {
        CurlLimits { no_curl_above: self.no_curl_above, half_curl_above: self.half_curl_above }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
