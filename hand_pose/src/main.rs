//! Interactive gesture menu: build a synthetic hand, show per-finger curls and the
//! template scores the matcher assigns.

use hand_pose::{
    CurlLimits, CurlMatcher, Finger, GestureMatcher, SimPose, TemplateStore,
    estimate_curls, synthesize, synthesize_with, DEFAULT_MIN_SCORE,
};
use hand_pose::curl::finger_angle;
use hand_pose::Hand;
use std::io::{self, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            Hand Gesture Template Menu                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let matcher = CurlMatcher::new(TemplateStore::builtin());

    loop {
        print_menu();
        let choice = read_line("Select a pose (1–4, or q to quit): ");

        let hand = match menu_choice(&choice) {
            MenuChoice::Quit       => { println!("\nGoodbye!\n"); break; }
            MenuChoice::Pose(pose) => synthesize(pose, (320.0, 240.0), 1.0, 0),
            MenuChoice::Custom     => synthesize_with(pick_flexion(), (320.0, 240.0), 1.0, 0),
            MenuChoice::Invalid    => { println!("  ⚠  Please enter 1–4 or q.\n"); continue; }
        };

        let min_score: f32 = read_line(&format!("  Min score (default {}): ", DEFAULT_MIN_SCORE))
            .trim().parse().unwrap_or(DEFAULT_MIN_SCORE);

        report(&hand, &matcher, min_score);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum MenuChoice {
    Pose(SimPose),
    Custom,
    Quit,
    Invalid,
}

/// Interpret one raw line from stdin.  An empty read (no newline at all)
/// means stdin is closed, which quits like `q`.
fn menu_choice(raw: &str) -> MenuChoice {
    if raw.is_empty() {
        return MenuChoice::Quit;
    }
    match raw.trim() {
        "1" => MenuChoice::Pose(SimPose::Fist),
        "2" => MenuChoice::Pose(SimPose::Open),
        "3" => MenuChoice::Pose(SimPose::Victory),
        "4" => MenuChoice::Custom,
        q if q.eq_ignore_ascii_case("q") => MenuChoice::Quit,
        _   => MenuChoice::Invalid,
    }
}

fn report(hand: &Hand, matcher: &CurlMatcher, min_score: f32) {
    let curls = estimate_curls(hand, &CurlLimits::default());

    println!();
    println!("  ┌─ finger curls ─");
    for finger in Finger::ALL {
        let angle = finger_angle(hand, finger)
            .map(|a| format!("{:6.1}°", a))
            .unwrap_or_else(|| "   n/a ".to_string());
        println!("  │  {:<7} {}  {}", finger.name(), angle, curls[finger.index()].name());
    }
    println!("  │");
    println!("  ├─ template scores (0–10) ─");
    for template in matcher.store() {
        let score = template.score(&curls).unwrap_or(0.0);
        let mark  = if score >= min_score { "✓" } else { " " };
        println!("  │  {} {:<10} {:5.2}", mark, template.name(), score);
    }
    let result = matcher.estimate(hand, min_score);
    match result.best() {
        Some(m) => println!("  └─ best match: {} ({:.2})", m.name, m.score),
        None    => println!("  └─ no gesture at or above {:.1}", min_score),
    }
    println!();
}

fn pick_flexion() -> [[f32; 3]; 5] {
    let mut flexion = [[0.0; 3]; 5];
    println!("  Enter three joint flexions in degrees per finger (e.g. \"70 100 70\").");
    for finger in Finger::ALL {
        let line = read_line(&format!("    {:<7}: ", finger.name()));
        let vals: Vec<f32> = line.split_whitespace()
            .filter_map(|v| v.parse().ok())
            .collect();
        for (k, v) in vals.into_iter().take(3).enumerate() {
            flexion[finger.index()][k] = v.clamp(-30.0, 140.0);
        }
    }
    flexion
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    for (i, pose) in SimPose::ALL.iter().enumerate() {
        println!("  │  {}. {:49}│", i + 1, pose.name());
    }
    println!("  │  4. {:49}│", "custom flexion");
    println!("  └──────────────────────────────────────────────────────┘");
    println!();
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
