//! hand_rps — windowed entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use hand_rps::app::run;
use hand_rps::config::AppConfig;
use rps_round::RoundCount;

#[derive(Parser, Debug)]
#[command(name = "hand_rps", about = "Rock-paper-scissors played with hand gestures")]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start straight away with this many rounds
    #[arg(long, value_parser = parse_rounds)]
    rounds: Option<u32>,

    /// Minimum template score (0–10) for a gesture to count
    #[arg(long)]
    min_score: Option<f32>,

    /// Frames a gesture must be held before it plays
    #[arg(long)]
    hold_frames: Option<u32>,

    /// Target frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Show the camera panel unmirrored
    #[arg(long)]
    no_mirror: bool,

    /// Seed for the computer's moves
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_rounds(s: &str) -> Result<u32, String> {
    RoundCount::parse(s).map(RoundCount::get).map_err(|e| e.to_string())
}

impl Cli {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(n) = self.rounds      { cfg.rounds      = Some(n); }
        if let Some(s) = self.min_score   { cfg.min_score   = s; }
        if let Some(h) = self.hold_frames { cfg.hold_frames = h; }
        if let Some(f) = self.fps         { cfg.fps         = f; }
        if let Some(s) = self.seed        { cfg.seed        = Some(s); }
        if self.no_mirror                 { cfg.mirror      = false; }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand RPS — Rock · Paper · Scissors by gesture         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None       => AppConfig::default(),
    };
    cli.apply(&mut cfg);
    cfg.validate().context("invalid settings")?;

    #[cfg(feature = "leap")]
    println!("  Build: LeapMotion support enabled");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!("  F/O/V show a pose, H hides it, R/P/S play directly, Q quits.");
    println!();
    log::info!("hand_rps v{} starting", env!("CARGO_PKG_VERSION"));

    let report = run(cfg)?;

    println!();
    for line in report.round.log() {
        println!("  {}", line);
    }
    println!("  {}", report.round.score_line());
    log::info!("{}", report.stats);
    println!();
    Ok(())
}
