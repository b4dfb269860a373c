//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering, input-device or file dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod phase;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;

pub use clock::FixedStep;
pub use collision::{Aabb, boxes_overlap, first_hit};
pub use difficulty::{DifficultyLevel, DifficultyState, StageChange, recompute, stage_for_score};
pub use obstacle::{Obstacle, ObstacleKind, ObstaclePool, VariantId};
pub use phase::{InputEvent, MenuItem, PhaseCommand, PhaseMachine};
pub use player::{FieldBounds, HeldDirections, MovementMode, PlayerBody};
pub use score::ScoreAccumulator;
pub use state::{AssetCatalog, GamePhase, RunState, Snapshot};
pub use tick::{TickInput, TickReport, tick};
