//! Falling obstacles and the pool that spawns and retires them

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::is_valid_dt;

/// Opaque handle to a visual variant supplied by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantId(pub u32);

/// Size/speed category, picked uniformly at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallFast,
    Medium,
    LargeSlow,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::SmallFast,
        ObstacleKind::Medium,
        ObstacleKind::LargeSlow,
    ];

    /// Unscaled (width, height)
    pub fn base_size(&self) -> (f32, f32) {
        match self {
            ObstacleKind::SmallFast => (30.0, 30.0),
            ObstacleKind::Medium => (40.0, 40.0),
            ObstacleKind::LargeSlow => (70.0, 50.0),
        }
    }

    /// Multiplier on the pool's base fall speed
    pub fn speed_factor(&self) -> f32 {
        match self {
            ObstacleKind::SmallFast => 1.4,
            ObstacleKind::Medium => 1.0,
            ObstacleKind::LargeSlow => 0.75,
        }
    }

    /// On-field (width, height)
    pub fn size(&self) -> (f32, f32) {
        let (w, h) = self.base_size();
        (w * OBSTACLE_SIZE_SCALE, h * OBSTACLE_SIZE_SCALE)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Fall speed (units/s, positive = down)
    pub velocity: f32,
    pub active: bool,
    /// Cosmetic only; `None` renders the default shape
    pub variant: Option<VariantId>,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Countdown values at or below this count as expired
const TIMER_EPSILON: f32 = 1e-4;

/// Owns every live obstacle plus the spawn schedule
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Seconds until the next spawn
    pub spawn_timer: f32,
    /// Countdown reset value, pushed in by the difficulty controller
    pub spawn_interval: f32,
    /// Base fall speed, pushed in by the difficulty controller
    pub obstacle_speed: f32,
    /// Visual variants to pick from (may be empty)
    pub variants: Vec<VariantId>,
    rng: Pcg32,
}

impl ObstaclePool {
    pub fn new(seed: u64, variants: Vec<VariantId>) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval: BASE_SPAWN_INTERVAL,
            obstacle_speed: BASE_OBSTACLE_SPEED,
            variants,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Move every obstacle down and drop the ones that left the field
    pub fn update(&mut self, dt: f32, field_height: f32) {
        if !is_valid_dt(dt) {
            return;
        }
        for obstacle in &mut self.obstacles {
            obstacle.pos.y += obstacle.velocity * dt;
            if obstacle.pos.y > field_height {
                obstacle.active = false;
            }
        }
        self.obstacles.retain(|o| o.active);
    }

    /// Count down one frame and spawn a single obstacle when the timer runs out
    ///
    /// Returns true when an obstacle was created.
    pub fn spawn(&mut self, field_width: f32, _field_height: f32) -> bool {
        self.spawn_timer -= FRAME_DT;
        // Repeated f32 subtraction leaves a sliver above zero on the due frame
        if self.spawn_timer > TIMER_EPSILON {
            return false;
        }

        let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];
        let (width, height) = kind.size();

        let max_x = field_width - width;
        let x = if max_x > 0.0 {
            self.rng.random_range(0.0..=max_x)
        } else {
            0.0
        };

        let variant = if self.variants.is_empty() {
            None
        } else {
            Some(self.variants[self.rng.random_range(0..self.variants.len())])
        };

        let obstacle = Obstacle {
            kind,
            pos: Vec2::new(x, -height - SPAWN_MARGIN),
            width,
            height,
            velocity: self.obstacle_speed * kind.speed_factor(),
            active: true,
            variant,
        };
        log::debug!(
            "Spawned {:?} at x={:.1} falling at {:.1}",
            kind,
            x,
            obstacle.velocity
        );
        self.obstacles.push(obstacle);

        self.spawn_timer = self.spawn_interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(y: f32, velocity: f32) -> Obstacle {
        Obstacle {
            kind: ObstacleKind::Medium,
            pos: Vec2::new(100.0, y),
            width: 54.0,
            height: 54.0,
            velocity,
            active: true,
            variant: None,
        }
    }

    #[test]
    fn test_update_moves_and_purges() {
        let mut pool = ObstaclePool::new(1, Vec::new());
        pool.obstacles.push(manual(0.0, 120.0));
        pool.obstacles.push(manual(599.0, 120.0));

        pool.update(0.5, FIELD_HEIGHT);
        assert_eq!(pool.len(), 1);
        assert!((pool.obstacles[0].pos.y - 60.0).abs() < 1e-4);
        assert!(pool.obstacles.iter().all(|o| o.active));
    }

    #[test]
    fn test_update_invalid_dt_is_noop() {
        let mut pool = ObstaclePool::new(1, Vec::new());
        pool.obstacles.push(manual(10.0, 120.0));
        pool.update(f32::NAN, FIELD_HEIGHT);
        pool.update(-1.0, FIELD_HEIGHT);
        assert_eq!(pool.obstacles[0].pos.y, 10.0);
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let mut pool = ObstaclePool::new(7, Vec::new());
        assert!(pool.spawn(FIELD_WIDTH, FIELD_HEIGHT));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.spawn_timer, pool.spawn_interval);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut pool = ObstaclePool::new(7, Vec::new());
        pool.spawn_interval = 1.5;

        // 1.5 seconds of frames
        let spawned = (0..90).filter(|_| pool.spawn(FIELD_WIDTH, FIELD_HEIGHT)).count();
        assert_eq!(spawned, 1);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_steady_state_cadence() {
        let mut pool = ObstaclePool::new(7, Vec::new());
        assert!(pool.spawn(FIELD_WIDTH, FIELD_HEIGHT));
        assert_eq!(pool.spawn_timer, 1.5);

        // Each following obstacle is due exactly 90 frames later
        for _ in 0..3 {
            let mut calls = 1;
            while !pool.spawn(FIELD_WIDTH, FIELD_HEIGHT) {
                calls += 1;
                assert!(calls < 200);
            }
            assert_eq!(calls, 90);
        }
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_spawn_timer_uses_current_interval() {
        let mut pool = ObstaclePool::new(7, Vec::new());
        pool.spawn(FIELD_WIDTH, FIELD_HEIGHT);
        assert_eq!(pool.spawn_timer, 1.5);

        // Difficulty update lands between spawns
        pool.spawn_interval = 0.9;
        let mut calls = 0;
        while !pool.spawn(FIELD_WIDTH, FIELD_HEIGHT) {
            calls += 1;
            assert!(calls < 200);
        }
        assert_eq!(pool.spawn_timer, 0.9);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_spawned_obstacle_geometry() {
        let mut pool = ObstaclePool::new(99, Vec::new());
        pool.obstacle_speed = 200.0;
        for _ in 0..50 {
            pool.spawn_timer = 0.0;
            pool.spawn(FIELD_WIDTH, FIELD_HEIGHT);
        }
        for o in &pool.obstacles {
            let (w, h) = o.kind.size();
            assert_eq!((o.width, o.height), (w, h));
            assert!(o.pos.x >= 0.0 && o.pos.x <= FIELD_WIDTH - o.width);
            assert_eq!(o.pos.y, -o.height - SPAWN_MARGIN);
            assert!((o.velocity - 200.0 * o.kind.speed_factor()).abs() < 1e-4);
            assert!(o.variant.is_none());
        }
    }

    #[test]
    fn test_spawn_covers_all_categories() {
        let mut pool = ObstaclePool::new(3, Vec::new());
        for _ in 0..200 {
            pool.spawn_timer = 0.0;
            pool.spawn(FIELD_WIDTH, FIELD_HEIGHT);
        }
        for kind in ObstacleKind::ALL {
            assert!(pool.obstacles.iter().any(|o| o.kind == kind));
        }
    }

    #[test]
    fn test_narrow_field_clamps_to_zero() {
        let mut pool = ObstaclePool::new(5, Vec::new());
        for _ in 0..20 {
            pool.spawn_timer = 0.0;
            pool.spawn(10.0, FIELD_HEIGHT);
        }
        assert!(pool.obstacles.iter().all(|o| o.pos.x == 0.0));
    }

    #[test]
    fn test_variants_are_attached() {
        let variants = vec![VariantId(10), VariantId(11), VariantId(12)];
        let mut pool = ObstaclePool::new(5, variants.clone());
        for _ in 0..30 {
            pool.spawn_timer = 0.0;
            pool.spawn(FIELD_WIDTH, FIELD_HEIGHT);
        }
        for o in &pool.obstacles {
            let v = o.variant.expect("variant attached");
            assert!(variants.contains(&v));
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = ObstaclePool::new(42, Vec::new());
        let mut b = ObstaclePool::new(42, Vec::new());
        for _ in 0..10 {
            a.spawn_timer = 0.0;
            b.spawn_timer = 0.0;
            a.spawn(FIELD_WIDTH, FIELD_HEIGHT);
            b.spawn(FIELD_WIDTH, FIELD_HEIGHT);
        }
        for (x, y) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.pos, y.pos);
        }
    }
}
