//! Fixed timestep simulation tick
//!
//! Single place where a run is mutated. Order per tick: one-shot events,
//! then (only while playing) player, obstacles, collision, score, difficulty.

use serde::{Deserialize, Serialize};

use super::collision::first_hit;
use super::difficulty::StageChange;
use super::phase::{InputEvent, PhaseCommand};
use super::player::HeldDirections;
use super::state::{GamePhase, RunState};
use crate::consts::{MAX_FRAME_DT, POINTS_PER_LEVEL};
use crate::is_valid_dt;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement directions, applied every playing tick
    pub held: HeldDirections,
    /// One-shot events, applied in order before the simulation step
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn held(held: HeldDirections) -> Self {
        Self {
            held,
            events: Vec::new(),
        }
    }

    pub fn event(event: InputEvent) -> Self {
        Self {
            held: HeldDirections::default(),
            events: vec![event],
        }
    }
}

/// Observable outcomes of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A new run was started by an event this tick
    pub run_started: bool,
    /// Quit was chosen; the step loop should stop
    pub quit: bool,
    /// An obstacle was spawned
    pub spawned: bool,
    /// Points earned this tick
    pub points: u64,
    /// Stage reached this tick, reported once
    pub stage_change: Option<StageChange>,
    /// Legacy level increments this tick
    pub level_ups: u32,
    /// A collision ended the run
    pub game_over: bool,
    /// The finished run beat the high score
    pub new_record: bool,
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    for &event in &input.events {
        match state.fsm.handle(event) {
            PhaseCommand::StartRun => {
                state.reset_run();
                report.run_started = true;
            }
            PhaseCommand::ToggleMode => {
                state.mode = state.mode.toggled();
                log::info!("Movement mode: {}", state.mode.as_str());
            }
            PhaseCommand::Quit => report.quit = true,
            PhaseCommand::Ignore | PhaseCommand::Cursor(_) | PhaseCommand::Enter(_) => {}
        }
    }

    // Only active play advances the simulation
    if state.phase() != GamePhase::Playing || !is_valid_dt(dt) {
        return report;
    }
    // Keeps the per-point loop bounded for oversized steps
    let dt = dt.min(MAX_FRAME_DT);

    state.time_ticks += 1;

    let bounds = state.bounds;
    state.player.tick(dt, bounds, input.held, state.mode);

    state.pool.update(dt, bounds.height);
    report.spawned = state.pool.spawn(bounds.width, bounds.height);

    if let Some(index) = first_hit(&state.player.aabb(), &state.pool.obstacles) {
        log::debug!("Hit obstacle #{} at tick {}", index, state.time_ticks);
        end_run(state, &mut report);
        return report;
    }

    report.points = state.scoring.accumulate(dt, state.difficulty.level.score_mult);
    for _ in 0..report.points {
        award_point(state, &mut report);
    }

    report
}

/// Credit one point and recompute difficulty for the new score
fn award_point(state: &mut RunState, report: &mut TickReport) {
    state.score += 1;

    if let Some(change) = state.difficulty.update(state.score) {
        log::info!("Stage {} reached at score {}", change.to, state.score);
        // Several crossings in one tick collapse into one change
        report.stage_change = Some(match report.stage_change {
            Some(earlier) => StageChange {
                from: earlier.from,
                to: change.to,
            },
            None => change,
        });
    }
    state.apply_difficulty();

    if state.score % POINTS_PER_LEVEL == 0 {
        state.level += 1;
        report.level_ups += 1;
    }
}

fn end_run(state: &mut RunState, report: &mut TickReport) {
    state.fsm.game_over();
    report.game_over = true;
    report.new_record = state.scoring.record(state.score);
    if report.new_record {
        log::info!("New high score: {}", state.score);
    }
    log::info!(
        "Game over: score {} (level {}, stage {})",
        state.score,
        state.level,
        state.difficulty.level.stage
    );
}
