//! Time-based score accrual
//!
//! Points accrue continuously at `BASE_SCORE_RATE * score_mult` per second.
//! The fractional remainder is carried between calls so the total does not
//! depend on how elapsed time is chunked into ticks.

use serde::{Deserialize, Serialize};

use crate::consts::BASE_SCORE_RATE;
use crate::is_valid_dt;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreAccumulator {
    /// Unpaid fraction of a point, in [0, 1)
    pub carry: f64,
    /// Best score seen this session (loaded at start, saved on a new record)
    pub highscore: u64,
}

impl ScoreAccumulator {
    pub fn new(highscore: u64) -> Self {
        Self {
            carry: 0.0,
            highscore,
        }
    }

    /// Add `dt` seconds of play and return the whole points earned
    pub fn accumulate(&mut self, dt: f32, score_mult: f32) -> u64 {
        if !is_valid_dt(dt) || !score_mult.is_finite() || score_mult <= 0.0 {
            return 0;
        }

        self.carry += BASE_SCORE_RATE * score_mult as f64 * dt as f64;
        let points = self.carry.floor();
        self.carry -= points;
        points as u64
    }

    /// Drop the carry when a new run starts
    pub fn reset_carry(&mut self) {
        self.carry = 0.0;
    }

    /// Record a finished run; returns true for a new high score
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.highscore {
            self.highscore = score;
            true
        } else {
            false
        }
    }
}
