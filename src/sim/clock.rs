//! Wall-clock to fixed-step conversion

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Turns variable frame deltas into a whole number of `SIM_DT` steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed time and get the number of ticks to run
    ///
    /// Long frames are capped (`MAX_FRAME_DT`, `MAX_SUBSTEPS`) so a stall
    /// never turns into a burst of catch-up ticks.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Spiral of death guard: drop the backlog
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}
