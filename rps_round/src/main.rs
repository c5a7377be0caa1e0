//! Terminal rock-paper-scissors: the keyboard fallback without a camera.

use rps_round::{Move, Phase, RoundCount, RoundState, DEFAULT_ROUNDS};
use std::io::{self, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║             Rock · Paper · Scissors (console)            ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let mut game = RoundState::new();
    let rounds = pick_rounds();
    if let Err(e) = game.configure(rounds) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let mut rng = rand::rng();
    let mut shown = 0usize;

    while game.phase() == Phase::InProgress {
        println!("  {}", game.score_line());
        let raw   = read_line("  Your move (r/p/s, q to quit): ");
        let input = raw.trim();

        // EOF on stdin reads as an empty line with no newline
        if raw.is_empty() || input.eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            return;
        }
        let Some(user) = Move::from_input(input) else {
            println!("  ⚠  rock, paper or scissors (r/p/s).\n");
            continue;
        };

        match game.play(user, &mut rng) {
            Ok(report) => println!("  Computer chose {}.", report.computer),
            Err(e)     => println!("  ⚠  {}", e),
        }
        for line in &game.log().entries()[shown..] {
            println!("  {}", line);
        }
        shown = game.log().len();
        println!();
    }
    println!();
}

fn pick_rounds() -> RoundCount {
    loop {
        let text = read_line(&format!("  Number of rounds (default {}): ", DEFAULT_ROUNDS));
        if text.trim().is_empty() {
            return RoundCount::default();
        }
        match RoundCount::parse(&text) {
            Ok(n)  => return n,
            Err(e) => println!("  ⚠  {}.", e),
        }
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
