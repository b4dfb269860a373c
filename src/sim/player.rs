//! Player kinematics
//!
//! One controllable body, integrated under held-direction intents in one of
//! two control models. Positions are the top-left corner of the body's box,
//! with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::{is_valid_dt, normalize_angle};

/// Control model for the player body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementMode {
    /// Turn with left/right, thrust with up/down, coast under friction
    #[default]
    Physics,
    /// Held directions set velocity directly, no inertia
    Arcade,
}

impl MovementMode {
    pub fn toggled(self) -> Self {
        match self {
            MovementMode::Physics => MovementMode::Arcade,
            MovementMode::Arcade => MovementMode::Physics,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementMode::Physics => "Physics",
            MovementMode::Arcade => "Arcade",
        }
    }
}

/// The four held-direction booleans supplied by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    /// Screen-space direction of the held keys, not normalized
    pub fn axis(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }

    /// -1 turning left, +1 turning right, 0 when both or neither
    pub fn turn(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Rectangle the player is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing direction (radians, 0 = +x, -π/2 = up the screen)
    pub angle: f32,
    /// Turn rate applied on the last tick (radians per second)
    pub angular_vel: f32,
    pub max_speed: f32,
    /// Extra per-second damping of the sideways velocity component (0 = full drift)
    pub lateral_damping: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayerBody {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: -std::f32::consts::FRAC_PI_2,
            angular_vel: 0.0,
            max_speed: MAX_SPEED,
            lateral_damping: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }

    /// Body placed at the bottom center of the field, facing up
    pub fn spawn(bounds: FieldBounds) -> Self {
        let x = bounds.width / 2.0 - PLAYER_WIDTH / 2.0;
        let y = bounds.height - PLAYER_START_BOTTOM_OFFSET;
        Self::new(Vec2::new(x, y))
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Unit vector the car is facing
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Advance the body by one timestep
    ///
    /// Invalid timesteps (non-positive, NaN, infinite) leave the body untouched.
    pub fn tick(&mut self, dt: f32, bounds: FieldBounds, held: HeldDirections, mode: MovementMode) {
        if !is_valid_dt(dt) {
            return;
        }

        match mode {
            MovementMode::Physics => {
                self.steer(dt, held);
                self.apply_friction(dt);
            }
            MovementMode::Arcade => self.drive_arcade(held),
        }

        self.clamp_speed();
        self.pos += self.vel * dt;
        self.clamp_to(bounds);
    }

    /// Physics mode input: turn, then thrust along the new heading
    fn steer(&mut self, dt: f32, held: HeldDirections) {
        self.angular_vel = TURN_SPEED * held.turn();
        self.angle = normalize_angle(self.angle + self.angular_vel * dt);

        let heading = self.heading();
        if held.up {
            self.vel += heading * ACCELERATION * dt;
        }
        if held.down {
            self.vel -= heading * BRAKE_FORCE * dt;
        }
    }

    /// Frame-rate independent exponential decay, plus optional sideways grip
    fn apply_friction(&mut self, dt: f32) {
        self.vel *= (-FRICTION * dt).exp();

        if self.lateral_damping > 0.0 {
            let heading = self.heading();
            let forward = heading * self.vel.dot(heading);
            let lateral = self.vel - forward;
            self.vel = forward + lateral * (-self.lateral_damping * dt).exp();
        }
    }

    fn drive_arcade(&mut self, held: HeldDirections) {
        self.angular_vel = 0.0;
        let dir = held.axis().normalize_or_zero();
        self.vel = dir * ARCADE_SPEED;
        if dir != Vec2::ZERO {
            self.angle = dir.to_angle();
        }
    }

    fn clamp_speed(&mut self) {
        if self.max_speed <= 0.0 {
            self.vel = Vec2::ZERO;
            return;
        }
        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed;
        }
    }

    /// Hard stop at the field edges: clamp position, drop the outward velocity
    fn clamp_to(&mut self, bounds: FieldBounds) {
        let max_x = (bounds.width - self.width).max(0.0);
        let max_y = (bounds.height - self.height).max(0.0);

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.max(0.0);
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = self.vel.x.min(0.0);
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.max(0.0);
        } else if self.pos.y > max_y {
            self.pos.y = max_y;
            self.vel.y = self.vel.y.min(0.0);
        }
    }
}
