//! Shoal Run - A side-scrolling school-of-fish survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, flocking, spawning, collisions)
//! - `tuning`: Data-driven game balance
//! - `snapshot`: Read-only view of the simulation for an external renderer

pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use snapshot::{EntityKind, Snapshot, SpriteInstance};
pub use tuning::{Difficulty, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Leader defaults - fixed column, moves vertically only
    pub const PLAYER_X: f32 = 110.0;
    pub const PLAYER_SIZE: f32 = 128.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Base scroll speed of obstacles and coins (pixels/tick)
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Speed multiplier never exceeds this
    pub const MAX_SPEED_MULTIPLIER: f32 = 5.0;

    /// Vertical gap between a top and bottom obstacle
    pub const OBSTACLE_MIN_GAP: f32 = 300.0;
    pub const OBSTACLE_MAX_GAP: f32 = 400.0;
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Ticks between obstacle pairs (~2.5s at 60 Hz)
    pub const SPAWN_PERIOD_TICKS: u32 = 150;

    /// Coins spawned inside each gap
    pub const COIN_SIZE: f32 = 16.0;
    pub const COIN_GAP_INSET: f32 = 20.0;
    pub const COIN_LEAD: f32 = 20.0;
    pub const COIN_STEP: f32 = 40.0;
    pub const COINS_PER_GAP_MIN: u32 = 2;
    pub const COINS_PER_GAP_MAX: u32 = 3;

    /// Follower school
    pub const NUM_FOLLOWERS: usize = 6;
    pub const FOLLOWER_SIZE: f32 = 96.0;
    pub const FOLLOWER_SPEED: f32 = 4.0;
    /// Placement disk behind the leader
    pub const PLACEMENT_RADIUS: f32 = 120.0;
    pub const PLACEMENT_OFFSET_X: f32 = -80.0;
    /// Minimum spacing between placed followers, as a multiple of follower size
    pub const PLACEMENT_SPACING: f32 = 1.2;
    pub const PLACEMENT_ATTEMPTS: u32 = 100;
    /// Wander around the base offset
    pub const WANDER_RADIUS: f32 = 30.0;
    pub const WANDER_INTERVAL_MIN: u32 = 60;
    pub const WANDER_INTERVAL_MAX: u32 = 180;

    /// Collision circles, as a fraction of nominal sprite size
    pub const LEADER_HIT_FRACTION: f32 = 0.35;
    pub const FOLLOWER_HIT_FRACTION: f32 = 0.4;
    pub const COIN_HIT_FRACTION: f32 = 0.4;

    /// Ambient decoration
    pub const NUM_BACKGROUND_FISH: usize = 8;
    pub const NUM_BUBBLES: usize = 20;

    /// Difficulty acceleration rates (ticks to gain +1.0x speed)
    pub const ACCEL_RATE_EASY: f32 = 8000.0;
    pub const ACCEL_RATE_MEDIUM: f32 = 4000.0;
    pub const ACCEL_RATE_HARD: f32 = 2000.0;

    /// Restart code typed on the game over screen
    pub const RESTART_PASSPHRASE: &str = "anay";
    pub const RESTART_INPUT_MAX: usize = 10;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Uniform random point inside a disk of the given radius, centred on the origin.
///
/// The radius is `sqrt(u) * radius` so samples are spread evenly over the
/// area instead of bunching up near the centre.
pub fn random_point_in_disk(rng: &mut impl rand::Rng, radius: f32) -> Vec2 {
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    let r = radius * rng.random::<f32>().sqrt();
    polar_to_cartesian(r, theta)
}
