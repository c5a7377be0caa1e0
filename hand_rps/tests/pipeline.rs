use hand_pose::{synthesize, CurlMatcher, GestureMatcher, SimPose, TemplateStore, DEFAULT_MIN_SCORE};
use hand_rps::app::AppState;
use hand_rps::config::AppConfig;
use hand_rps::frame::{FrameOutcome, FrameScheduler, SkipReason};
use hand_rps::latch::GestureLatch;
use hand_rps::pose::{PoseSource, SimPoseSource};
use hand_rps::visualizer::UiAction;
use rps_round::{move_for_gesture, Move, Phase, RoundCount, RoundState};
use std::time::Duration;

fn best_move(pose: SimPose, frame: u64) -> Option<Move> {
    let matcher = CurlMatcher::new(TemplateStore::builtin());
    let hand = synthesize(pose, (320.0, 240.0), 1.5, frame);
    let result = matcher.estimate(&hand, DEFAULT_MIN_SCORE);
    move_for_gesture(&result.best()?.name)
}

#[test]
fn each_pose_maps_to_its_move() {
    for frame in [0, 17, 250] {
        assert_eq!(best_move(SimPose::Fist, frame),    Some(Move::Rock));
        assert_eq!(best_move(SimPose::Open, frame),    Some(Move::Paper));
        assert_eq!(best_move(SimPose::Victory, frame), Some(Move::Scissors));
    }
}

#[test]
fn sim_source_through_latch_to_round_state() {
    let mut source  = SimPoseSource::new(640, 480, 0);
    let matcher     = CurlMatcher::new(TemplateStore::builtin());
    let mut latch   = GestureLatch::new(4);
    let mut game    = RoundState::new();
    game.configure(RoundCount::new(3).unwrap()).unwrap();

    let mut played = Vec::new();
    for pose in [SimPose::Fist, SimPose::Fist, SimPose::Victory] {
        source.select_pose(Some(pose));
        for _ in 0..10 {
            let hands = source.estimate_hands().unwrap();
            let label = matcher.estimate(&hands[0], DEFAULT_MIN_SCORE)
                .best()
                .map(|m| m.name.clone());
            if let Some(fired) = latch.observe(label.as_deref()) {
                let mv = move_for_gesture(&fired).unwrap();
                played.push(mv);
                game.play_against(mv, Move::Paper).unwrap();
            }
        }
        // lower the hand between rounds so the same gesture can fire again
        source.select_pose(None);
        assert!(source.estimate_hands().unwrap().is_empty());
        latch.observe(None);
    }

    assert_eq!(played, vec![Move::Rock, Move::Rock, Move::Scissors]);
    assert_eq!(game.phase(), Phase::Complete);
    assert_eq!(game.log().render(), [
        "Round 1: You lose! paper beats rock",
        "Round 2: You lose! paper beats rock",
        "Round 3: You win! scissors beats paper",
        "Sorry, You lost the game with a score of 1-2",
    ].join("\n"));
}

#[test]
fn app_state_under_scheduler() {
    let cfg = AppConfig {
        rounds:        Some(2),
        seed:          Some(5),
        hold_frames:   2,
        warmup_frames: 3,
        ..AppConfig::default()
    };
    let source  = SimPoseSource::new(cfg.camera_width, cfg.camera_height, cfg.warmup_frames);
    let matcher = CurlMatcher::new(TemplateStore::builtin()).with_limits(cfg.curl_limits());
    let mut app = AppState::new(Box::new(source), Box::new(matcher), &cfg);

    let mut sched = FrameScheduler::with_interval(Duration::ZERO);
    let mut frame = 0u32;
    let stats = sched.run(&mut || {
        frame += 1;
        match frame {
            6  => { app.handle_action(UiAction::ShowPose(Some(SimPose::Open))); }
            12 => { app.handle_action(UiAction::ShowPose(None)); }
            14 => { app.handle_action(UiAction::ShowPose(Some(SimPose::Victory))); }
            20 => return FrameOutcome::Stop,
            _  => {}
        }
        app.process_frame()
    });

    // 3 warm-up frames, then frames 4–5 and 12–13 had no hand
    assert_eq!(stats.skipped(SkipReason::SourceNotReady), 3);
    assert_eq!(stats.skipped(SkipReason::NoHand), 4);
    assert_eq!(stats.rendered, 12);
    assert_eq!(app.round().phase(), Phase::Complete);
    assert!(app.round().log().entries()[0].contains("paper"));
    assert!(app.round().log().entries()[1].contains("scissors"));
}
