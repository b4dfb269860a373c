//! Score-driven difficulty curve
//!
//! Every multiplier is a pure function of the cumulative score. The
//! orchestrator recomputes after each whole point and pushes the result into
//! the obstacle pool.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Multipliers and stage for one score value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    /// Scales obstacle fall speed, in [1, 3]
    pub speed_mult: f32,
    /// Scales the spawn interval, in [MIN_SPAWN_INTERVAL / BASE_SPAWN_INTERVAL, 1]
    pub spawn_mult: f32,
    /// Scales the point rate, in [1, 4]
    pub score_mult: f32,
    /// Discrete tier, 1..=5
    pub stage: u8,
}

impl DifficultyLevel {
    pub fn obstacle_speed(&self) -> f32 {
        BASE_OBSTACLE_SPEED * self.speed_mult
    }

    pub fn spawn_interval(&self) -> f32 {
        BASE_SPAWN_INTERVAL * self.spawn_mult
    }
}

/// Smallest allowed spawn multiplier
pub fn min_spawn_ratio() -> f32 {
    MIN_SPAWN_INTERVAL / BASE_SPAWN_INTERVAL
}

/// Stage for a cumulative score
pub fn stage_for_score(score: u64) -> u8 {
    1 + STAGE_THRESHOLDS.iter().filter(|&&t| score >= t).count() as u8
}

/// Map a score to its difficulty multipliers
pub fn recompute(score: u64) -> DifficultyLevel {
    let s = score as f64;

    let speed_mult = (1.0 + s / 2000.0).powf(1.5).min(MAX_SPEED_MULT as f64);
    let spawn_mult = (1.0 + s / 1500.0)
        .powf(-1.2)
        .max(min_spawn_ratio() as f64);
    let score_mult = (1.0 + (s / 3000.0).powf(0.8)).min(MAX_SCORE_MULT as f64);

    DifficultyLevel {
        speed_mult: speed_mult as f32,
        spawn_mult: spawn_mult as f32,
        score_mult: score_mult as f32,
        stage: stage_for_score(score),
    }
}

/// One-shot notification that a new stage was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub from: u8,
    pub to: u8,
}

/// Difficulty derived from the run's score, plus the last announced stage
///
/// The score itself lives on `RunState`; this only caches what it implies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyState {
    pub level: DifficultyLevel,
    pub announced_stage: u8,
}

impl Default for DifficultyState {
    fn default() -> Self {
        let level = recompute(0);
        Self {
            level,
            announced_stage: level.stage,
        }
    }
}

impl DifficultyState {
    /// Recompute for a new score and report a stage change exactly once
    pub fn update(&mut self, score: u64) -> Option<StageChange> {
        self.level = recompute(score);

        if self.level.stage != self.announced_stage {
            let change = StageChange {
                from: self.announced_stage,
                to: self.level.stage,
            };
            self.announced_stage = self.level.stage;
            Some(change)
        } else {
            None
        }
    }
}
