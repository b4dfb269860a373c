//! Autopilot input adapter
//!
//! Reads a snapshot and decides which directions to hold, the same way a
//! keyboard adapter would. Used by the headless demo; it never touches the
//! run state directly.

use glam::Vec2;

use crate::normalize_angle;
use crate::sim::{HeldDirections, MovementMode, Obstacle, PlayerBody, Snapshot};

/// How far above the player an obstacle counts as a threat
const LOOKAHEAD: f32 = 260.0;
/// Extra clearance kept beside a dodged obstacle
const CLEARANCE: f32 = 18.0;
/// Close enough to the target, stop steering
const TOLERANCE: f32 = 6.0;
/// Physics mode: only thrust when roughly facing the target
const THRUST_CONE: f32 = 0.5;

/// Held directions that move the player toward safety
pub fn drive(snapshot: &Snapshot<'_>) -> HeldDirections {
    let target = target_position(snapshot);
    match snapshot.mode {
        MovementMode::Arcade => drive_arcade(snapshot.player, target),
        MovementMode::Physics => drive_physics(snapshot.player, target),
    }
}

/// Where the player's top-left corner should head next
pub fn target_position(snapshot: &Snapshot<'_>) -> Vec2 {
    let player = snapshot.player;
    let bounds = snapshot.bounds;
    let home_y = (bounds.height - player.height - 40.0).max(0.0);
    let max_x = (bounds.width - player.width).max(0.0);

    let target_x = match nearest_threat(player, snapshot.obstacles) {
        Some(threat) => {
            let threat_center = threat.pos.x + threat.width / 2.0;
            let player_center = player.pos.x + player.width / 2.0;
            let go_left = threat.pos.x - player.width - CLEARANCE;
            let go_right = threat.pos.x + threat.width + CLEARANCE;

            // Prefer the side we are already on, unless it is walled off
            let left_ok = go_left >= 0.0;
            let right_ok = go_right <= max_x;
            match (left_ok, right_ok) {
                (true, true) if player_center < threat_center => go_left,
                (true, true) => go_right,
                (true, false) => go_left,
                (false, true) => go_right,
                (false, false) => player.pos.x,
            }
        }
        None => max_x / 2.0,
    };

    Vec2::new(target_x.clamp(0.0, max_x), home_y)
}

/// Lowest obstacle above the player that overlaps its lane
fn nearest_threat<'a>(player: &PlayerBody, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let lane_left = player.pos.x - CLEARANCE;
    let lane_right = player.pos.x + player.width + CLEARANCE;

    obstacles
        .iter()
        .filter(|o| o.active)
        .filter(|o| o.pos.x < lane_right && o.pos.x + o.width > lane_left)
        .filter(|o| {
            let bottom = o.pos.y + o.height;
            bottom <= player.pos.y + player.height && bottom > player.pos.y - LOOKAHEAD
        })
        .max_by(|a, b| {
            (a.pos.y + a.height)
                .partial_cmp(&(b.pos.y + b.height))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn drive_arcade(player: &PlayerBody, target: Vec2) -> HeldDirections {
    let delta = target - player.pos;
    HeldDirections {
        left: delta.x < -TOLERANCE,
        right: delta.x > TOLERANCE,
        up: delta.y < -TOLERANCE,
        down: delta.y > TOLERANCE,
    }
}

fn drive_physics(player: &PlayerBody, target: Vec2) -> HeldDirections {
    let delta = target - player.pos;
    if delta.length() < TOLERANCE {
        // Brake if still rolling forward
        let forward = player.vel.dot(player.heading());
        return HeldDirections {
            down: forward > 20.0,
            ..Default::default()
        };
    }

    let error = normalize_angle(delta.to_angle() - player.angle);
    HeldDirections {
        left: error < -0.05,
        right: error > 0.05,
        up: error.abs() < THRUST_CONE,
        down: false,
    }
}
