//! Car Dodge entry point
//!
//! Headless runner: loads settings, drives a session at 60 Hz with the
//! autopilot and logs a HUD line once per second.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use car_dodge::consts::SIM_DT;
use car_dodge::settings::SETTINGS_FILE;
use car_dodge::sim::{AssetCatalog, FixedStep, GamePhase, InputEvent, Snapshot, TickInput};
use car_dodge::{FileHighScoreStore, Session, Settings, autopilot};

fn main() {
    env_logger::init();
    log::info!("Car Dodge (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let store = FileHighScoreStore::new(settings.highscore_path.clone());
    let mut session = Session::new(&settings, AssetCatalog::default(), store);

    run(&mut session, &settings);

    let snap = session.snapshot();
    log::info!(
        "Final score {} (best {}), level {}, stage {}",
        snap.score,
        snap.highscore,
        snap.level,
        snap.stage
    );
}

/// Paced step loop; returns on game over, quit or when the demo time is up
fn run(session: &mut Session<FileHighScoreStore>, settings: &Settings) {
    let mut clock = FixedStep::new();
    log::info!("Menu: selecting {}", session.snapshot().menu_cursor.label());
    let mut pending = vec![InputEvent::Select];
    let mut last_frame = Instant::now();
    let mut ticks: u64 = 0;
    let ticks_per_second = (1.0 / SIM_DT).round() as u64;
    let demo_ticks = (settings.demo_seconds.max(0.0) / SIM_DT) as u64;

    while session.is_running() {
        let now = Instant::now();
        let steps = clock.advance((now - last_frame).as_secs_f32());
        last_frame = now;

        for _ in 0..steps {
            let held = if settings.autopilot && session.snapshot().phase == GamePhase::Playing {
                autopilot::drive(&session.snapshot())
            } else {
                Default::default()
            };
            let input = TickInput {
                held,
                events: std::mem::take(&mut pending),
            };
            let report = session.step(&input);

            if report.game_over {
                log::info!("Crashed after {:.1}s", ticks as f32 * SIM_DT);
                return;
            }

            ticks += 1;
            if ticks % ticks_per_second == 0 {
                log_hud(&session.snapshot());
            }
            if ticks >= demo_ticks {
                log::info!("Demo time up");
                return;
            }
        }

        thread::sleep(Duration::from_secs_f32(SIM_DT));
    }
}

fn log_hud(snap: &Snapshot<'_>) {
    log::info!(
        "Score: {}  Best: {}  Level: {}  Stage: {}  Mode: {}  Obstacles: {}",
        snap.score,
        snap.highscore,
        snap.level,
        snap.stage,
        snap.mode.as_str(),
        snap.obstacles.len()
    );
}
