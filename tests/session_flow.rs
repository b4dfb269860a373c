use car_dodge::sim::{
    AssetCatalog, FieldBounds, GamePhase, InputEvent, MovementMode, Obstacle, ObstacleKind,
    TickInput,
};
use car_dodge::{FileHighScoreStore, HighScoreStore, Session, Settings, autopilot};

fn open(path: &std::path::Path, seed: u64) -> Session<FileHighScoreStore> {
    Session::with_seed(
        seed,
        FieldBounds::default(),
        MovementMode::Physics,
        AssetCatalog::default(),
        FileHighScoreStore::new(path),
    )
}

fn crash(session: &mut Session<FileHighScoreStore>) {
    let state = session.state_mut();
    let blocker = Obstacle {
        kind: ObstacleKind::Medium,
        pos: state.player.pos,
        width: 54.0,
        height: 54.0,
        velocity: 0.0,
        active: true,
        variant: None,
    };
    state.pool.obstacles.push(blocker);
    session.step(&TickInput::default());
}

#[test]
fn full_session_menu_play_crash_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores").join("highscore.txt");
    let mut session = open(&path, 11);

    assert_eq!(session.snapshot().phase, GamePhase::Menu);
    session.step(&TickInput::event(InputEvent::Select));
    assert_eq!(session.snapshot().phase, GamePhase::Playing);
    // Keep the lane clear so only the forced crash ends the run
    session.state_mut().pool.obstacles.clear();
    session.state_mut().pool.spawn_timer = f32::MAX;

    for _ in 0..120 {
        session.step(&TickInput::default());
    }
    session.step(&TickInput::event(InputEvent::TogglePause));
    let paused_score = session.snapshot().score;
    for _ in 0..30 {
        session.step(&TickInput::default());
    }
    assert_eq!(session.snapshot().score, paused_score);
    session.step(&TickInput::event(InputEvent::TogglePause));

    crash(&mut session);
    assert_eq!(session.snapshot().phase, GamePhase::GameOver);
    let best = session.snapshot().highscore;
    assert!(best >= paused_score);
    assert_eq!(FileHighScoreStore::new(&path).load_highscore(), best);

    session.step(&TickInput::event(InputEvent::Restart));
    assert_eq!(session.snapshot().phase, GamePhase::Playing);
    // The restart tick itself already scores a little
    assert!(session.snapshot().score < 5);
    assert_eq!(session.snapshot().highscore, best);

    let reopened = open(&path, 12);
    assert_eq!(reopened.snapshot().highscore, best);
}

#[test]
fn autopilot_keeps_player_inside_field() {
    let mut session = Session::with_seed(
        3,
        FieldBounds::default(),
        MovementMode::Arcade,
        AssetCatalog::default(),
        car_dodge::MemoryHighScoreStore::default(),
    );
    session.step(&TickInput::event(InputEvent::Select));

    for _ in 0..600 {
        if session.snapshot().phase != GamePhase::Playing {
            break;
        }
        let held = autopilot::drive(&session.snapshot());
        session.step(&TickInput::held(held));

        let snap = session.snapshot();
        let p = snap.player;
        assert!(p.pos.x >= 0.0 && p.pos.x + p.width <= snap.bounds.width);
        assert!(p.pos.y >= 0.0 && p.pos.y + p.height <= snap.bounds.height);
    }
}

#[test]
fn settings_drive_session_setup() {
    let settings = Settings {
        movement_mode: MovementMode::Arcade,
        seed: Some(77),
        field_width: 640.0,
        field_height: 480.0,
        ..Default::default()
    };
    let session = Session::new(
        &settings,
        AssetCatalog::default(),
        car_dodge::MemoryHighScoreStore::new(250),
    );
    let snap = session.snapshot();
    assert_eq!(snap.mode, MovementMode::Arcade);
    assert_eq!(snap.bounds.width, 640.0);
    assert_eq!(snap.highscore, 250);
    assert_eq!(session.state().seed, 77);
}
