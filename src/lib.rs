//! Car Dodge - steer a car through a field of falling obstacles
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (kinematics, obstacles, difficulty, scoring)
//! - `session`: Owns a run, applies input events, persists the high score
//! - `autopilot`: Snapshot-driven input adapter used by the headless demo
//! - `highscores`: Single-integer high score persistence
//! - `settings`: Player preferences

pub mod autopilot;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Countdown decrement applied by every spawn call
    pub const FRAME_DT: f32 = SIM_DT;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock frame delta fed into the fixed-step clock
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Spawn offset from the bottom edge
    pub const PLAYER_START_BOTTOM_OFFSET: f32 = 100.0;

    /// Physics mode: turning rate (radians per second)
    pub const TURN_SPEED: f32 = 7.0;
    /// Physics mode: forward thrust (units/s²)
    pub const ACCELERATION: f32 = 500.0;
    /// Physics mode: reverse thrust, weaker than forward (units/s²)
    pub const BRAKE_FORCE: f32 = 300.0;
    /// Exponential velocity damping per second
    pub const FRICTION: f32 = 3.0;
    /// Speed cap (units/s)
    pub const MAX_SPEED: f32 = 800.0;
    /// Arcade mode: fixed speed while a direction is held
    pub const ARCADE_SPEED: f32 = 300.0;

    /// Obstacle spawning
    pub const BASE_SPAWN_INTERVAL: f32 = 1.5;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.35;
    pub const BASE_OBSTACLE_SPEED: f32 = 250.0;
    /// All obstacle categories are scaled up by this factor
    pub const OBSTACLE_SIZE_SCALE: f32 = 1.35;
    /// Gap between an obstacle's bottom edge and the top of the field on spawn
    pub const SPAWN_MARGIN: f32 = 10.0;

    /// Hitbox shrink per side, as a fraction of the box's own size
    pub const HITBOX_INSET_RATIO: f32 = 0.12;

    /// Points per second at score multiplier 1
    pub const BASE_SCORE_RATE: f64 = 75.0;
    /// Legacy level counter step
    pub const POINTS_PER_LEVEL: u64 = 1000;

    /// Difficulty curve caps
    pub const MAX_SPEED_MULT: f32 = 3.0;
    pub const MAX_SCORE_MULT: f32 = 4.0;
    /// Stage thresholds: reaching `STAGE_THRESHOLDS[i]` enters stage `i + 2`
    pub const STAGE_THRESHOLDS: [u64; 4] = [500, 1500, 3000, 5000];
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// True for a timestep the simulation can integrate (finite and positive)
#[inline]
pub fn is_valid_dt(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}
