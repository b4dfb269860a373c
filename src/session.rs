//! Session orchestrator
//!
//! Owns the run state and the high score store. Every frame the host calls
//! [`Session::step`] with the input gathered since the last step, then hands
//! [`Session::snapshot`] to its renderer.

use crate::consts::SIM_DT;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{AssetCatalog, FieldBounds, MovementMode, RunState, Snapshot, TickInput, TickReport, tick};

pub struct Session<S: HighScoreStore> {
    state: RunState,
    store: S,
    running: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a session from settings; reads the high score once
    pub fn new(settings: &Settings, assets: AssetCatalog, store: S) -> Self {
        Self::with_seed(
            settings.resolve_seed(),
            settings.bounds(),
            settings.movement_mode,
            assets,
            store,
        )
    }

    pub fn with_seed(
        seed: u64,
        bounds: FieldBounds,
        mode: MovementMode,
        assets: AssetCatalog,
        store: S,
    ) -> Self {
        let highscore = store.load_highscore();
        log::info!(
            "Session started: seed {}, field {}x{}, high score {}",
            seed,
            bounds.width,
            bounds.height,
            highscore
        );
        Self {
            state: RunState::new(seed, bounds, mode, assets, highscore),
            store,
            running: true,
        }
    }

    /// Run one fixed step
    pub fn step(&mut self, input: &TickInput) -> TickReport {
        self.step_with_dt(input, SIM_DT)
    }

    pub fn step_with_dt(&mut self, input: &TickInput, dt: f32) -> TickReport {
        if !self.running {
            return TickReport::default();
        }

        let report = tick(&mut self.state, input, dt);

        if report.new_record {
            self.store.save_highscore(self.state.highscore());
        }
        if report.quit {
            self.stop();
        }
        report
    }

    /// Cancel the step loop; later steps do nothing
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Session stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Direct access for tools and tests (e.g. placing obstacles)
    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScoreStore;
    use crate::sim::{GamePhase, InputEvent, Obstacle, ObstacleKind};

    fn session(highscore: u64) -> Session<MemoryHighScoreStore> {
        Session::with_seed(
            1,
            FieldBounds::default(),
            MovementMode::Physics,
            AssetCatalog::default(),
            MemoryHighScoreStore::new(highscore),
        )
    }

    fn crash(session: &mut Session<MemoryHighScoreStore>) -> TickReport {
        let state = session.state_mut();
        let blocker = Obstacle {
            kind: ObstacleKind::Medium,
            pos: state.player.pos,
            width: 40.0,
            height: 40.0,
            velocity: 0.0,
            active: true,
            variant: None,
        };
        state.pool.obstacles.push(blocker);
        session.step(&TickInput::default())
    }

    #[test]
    fn test_loads_highscore_at_start() {
        let s = session(321);
        assert_eq!(s.snapshot().highscore, 321);
        assert_eq!(s.snapshot().phase, GamePhase::Menu);
    }

    #[test]
    fn test_new_record_is_saved_once() {
        let mut s = session(0);
        s.step(&TickInput::event(InputEvent::Select));
        for _ in 0..60 {
            s.step(&TickInput::default());
        }
        let report = crash(&mut s);
        assert!(report.new_record);
        assert_eq!(s.store().saves, 1);
        assert_eq!(s.store().score, s.state().score);

        // Ticks in GameOver do not save again
        for _ in 0..10 {
            s.step(&TickInput::default());
        }
        assert_eq!(s.store().saves, 1);
    }

    #[test]
    fn test_no_save_without_record() {
        let mut s = session(1_000_000);
        s.step(&TickInput::event(InputEvent::Select));
        let report = crash(&mut s);
        assert!(report.game_over);
        assert_eq!(s.store().saves, 0);
    }

    #[test]
    fn test_record_survives_restart_on_disk() {
        use crate::highscores::FileHighScoreStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        let open = || {
            Session::with_seed(
                2,
                FieldBounds::default(),
                MovementMode::Arcade,
                AssetCatalog::default(),
                FileHighScoreStore::new(&path),
            )
        };

        let mut first = open();
        first.step(&TickInput::event(InputEvent::Select));
        for _ in 0..30 {
            first.step(&TickInput::default());
        }
        let state = first.state_mut();
        let blocker = Obstacle {
            kind: ObstacleKind::LargeSlow,
            pos: state.player.pos,
            width: 60.0,
            height: 60.0,
            velocity: 0.0,
            active: true,
            variant: None,
        };
        state.pool.obstacles.push(blocker);
        let report = first.step(&TickInput::default());
        assert!(report.new_record);
        let score = first.state().score;
        assert!(score > 0);

        let second = open();
        assert_eq!(second.snapshot().highscore, score);
    }

    #[test]
    fn test_quit_stops_session() {
        let mut s = session(0);
        s.step(&TickInput::event(InputEvent::Back));
        assert!(!s.is_running());

        let report = s.step(&TickInput::event(InputEvent::Select));
        assert_eq!(report, TickReport::default());
        assert_eq!(s.snapshot().phase, GamePhase::Menu);
    }
}
