use rand::{rngs::StdRng, SeedableRng};
use rps_round::{
    move_for_gesture, Move, Outcome, Phase, PlayError, RoundCount, RoundCountError, RoundState,
};

fn play_gesture(game: &mut RoundState, gesture: &str, computer: Move) -> Option<Outcome> {
    let user = move_for_gesture(gesture)?;
    game.play_against(user, computer).ok().map(|r| r.outcome)
}

#[test]
fn submitted_text_starts_the_game() {
    let mut game = RoundState::new();
    for bad in ["0", "-2", "", "three"] {
        assert!(RoundCount::parse(bad).is_err(), "{:?} should be rejected", bad);
    }
    assert_eq!(game.phase(), Phase::AwaitingConfig);

    game.configure(RoundCount::parse("5").unwrap()).unwrap();
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.configured_rounds(), Some(5));
    assert_eq!(
        game.configure(RoundCount::parse("7").unwrap()),
        Err(PlayError::AlreadyConfigured)
    );
}

#[test]
fn unknown_gesture_registers_nothing() {
    let mut game = RoundState::new();
    game.configure(RoundCount::new(2).unwrap()).unwrap();
    assert_eq!(play_gesture(&mut game, "thumbs_up", Move::Rock), None);
    assert_eq!(game.current_round(), 0);
    assert!(game.log().is_empty());
}

#[test]
fn gesture_driven_three_rounds() {
    let mut game = RoundState::new();
    game.configure(RoundCount::new(3).unwrap()).unwrap();

    assert_eq!(play_gesture(&mut game, "fist",      Move::Scissors), Some(Outcome::UserWins));
    assert_eq!(play_gesture(&mut game, "open_fist", Move::Paper),    Some(Outcome::Tie));
    assert_eq!(play_gesture(&mut game, "victory",   Move::Rock),     Some(Outcome::ComputerWins));

    assert_eq!(game.phase(), Phase::Complete);
    assert_eq!(game.log().render(), [
        "Round 1: You win! rock beats scissors",
        "Round 2: It's a tie! paper and paper",
        "Round 3: You lose! rock beats scissors",
        "The game was a tie with a score of 1-1",
    ].join("\n"));

    // Locked once complete
    assert_eq!(play_gesture(&mut game, "fist", Move::Scissors), None);
    assert_eq!(game.current_round(), 3);
}

#[test]
fn seeded_games_are_reproducible() {
    let run = |seed| {
        let mut rng  = StdRng::seed_from_u64(seed);
        let mut game = RoundState::new();
        game.configure(RoundCount::new(10).unwrap()).unwrap();
        while game.accepts_moves() {
            game.play(Move::Rock, &mut rng).unwrap();
        }
        game.log().render()
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn error_messages_are_readable() {
    assert_eq!(
        RoundCount::parse("-2").unwrap_err().to_string(),
        "number of rounds must be at least 1, got -2"
    );
    assert_eq!(RoundCountError::Empty.to_string(), "enter a number of rounds");
    assert_eq!(PlayError::GameOver.to_string(), "the game is over");
}
