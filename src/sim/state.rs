//! Run state and the read-only snapshot handed to renderers
//!
//! `RunState` is the single owner of everything a run mutates. There are no
//! globals: the orchestrator holds one `RunState` and lends it out per tick.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyState;
use super::obstacle::{Obstacle, ObstaclePool, VariantId};
use super::phase::{MenuItem, PhaseMachine};
use super::player::{FieldBounds, MovementMode, PlayerBody};
use super::score::ScoreAccumulator;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu (Start / Controls / Quit)
    Menu,
    /// Controls help screen
    Controls,
    /// Active gameplay
    Playing,
    /// Gameplay frozen, last frame still drawn
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// Visual handles supplied by the asset collaborator
///
/// Purely cosmetic: an empty catalog changes rendering, never gameplay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub player: Option<VariantId>,
    pub obstacle_variants: Vec<VariantId>,
}

/// Everything the orchestrator owns for the lifetime of a session
#[derive(Debug, Clone)]
pub struct RunState {
    /// Session seed; each run derives its own obstacle seed from it
    pub seed: u64,
    /// Runs started this session
    pub run_count: u32,
    pub fsm: PhaseMachine,
    pub mode: MovementMode,
    pub bounds: FieldBounds,
    pub player: PlayerBody,
    pub pool: ObstaclePool,
    pub difficulty: DifficultyState,
    pub scoring: ScoreAccumulator,
    /// Score of the current (or last finished) run
    pub score: u64,
    /// Cosmetic counter, +1 every 1000 points
    pub level: u32,
    /// Simulation ticks of the current run
    pub time_ticks: u64,
    pub assets: AssetCatalog,
}

impl RunState {
    pub fn new(
        seed: u64,
        bounds: FieldBounds,
        mode: MovementMode,
        assets: AssetCatalog,
        highscore: u64,
    ) -> Self {
        Self {
            seed,
            run_count: 0,
            fsm: PhaseMachine::default(),
            mode,
            bounds,
            player: PlayerBody::spawn(bounds),
            pool: ObstaclePool::new(seed, assets.obstacle_variants.clone()),
            difficulty: DifficultyState::default(),
            scoring: ScoreAccumulator::new(highscore),
            score: 0,
            level: 1,
            time_ticks: 0,
            assets,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.fsm.phase
    }

    pub fn highscore(&self) -> u64 {
        self.scoring.highscore
    }

    /// Seed for the obstacle RNG of a given run
    fn run_seed(&self, run: u32) -> u64 {
        (run as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed)
    }

    /// Throw away the current run and build fresh player/obstacle state
    ///
    /// Nothing from the previous run survives except the high score and
    /// the chosen movement mode.
    pub fn reset_run(&mut self) {
        self.run_count += 1;
        let run_seed = self.run_seed(self.run_count);

        self.player = PlayerBody::spawn(self.bounds);
        self.pool = ObstaclePool::new(run_seed, self.assets.obstacle_variants.clone());
        self.difficulty = DifficultyState::default();
        self.scoring.reset_carry();
        self.score = 0;
        self.level = 1;
        self.time_ticks = 0;
        self.apply_difficulty();

        log::info!("Run {} started (seed {})", self.run_count, run_seed);
    }

    /// Push the current multipliers into the obstacle pool
    pub fn apply_difficulty(&mut self) {
        let level = &self.difficulty.level;
        self.pool.obstacle_speed = level.obstacle_speed();
        self.pool.spawn_interval = level.spawn_interval();
    }

    /// Borrowed read-only view for the render collaborator
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            obstacles: &self.pool.obstacles,
            score: self.score,
            highscore: self.scoring.highscore,
            stage: self.difficulty.level.stage,
            level: self.level,
            mode: self.mode,
            phase: self.fsm.phase,
            menu_cursor: self.fsm.cursor,
            player_variant: self.assets.player,
            bounds: self.bounds,
        }
    }
}

/// What a renderer may see of the run, valid until the next tick
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub player: &'a PlayerBody,
    pub obstacles: &'a [Obstacle],
    pub score: u64,
    pub highscore: u64,
    pub stage: u8,
    pub level: u32,
    pub mode: MovementMode,
    pub phase: GamePhase,
    pub menu_cursor: MenuItem,
    pub player_variant: Option<VariantId>,
    pub bounds: FieldBounds,
}
