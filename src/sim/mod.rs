//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame, fixed order within a tick
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (spawn order, ids increase)
//! - No rendering or platform dependencies

pub mod ambient;
pub mod follower;
pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use ambient::{BackgroundFish, Bubble};
pub use follower::{FollowerPlacement, place_followers};
pub use geometry::{Circle, Rect, circle_overlap, circle_rect_overlap, rect_overlap};
pub use spawner::{ObstaclePair, generate_pair};
pub use state::{Coin, Follower, GamePhase, GameState, Leader, Obstacle, Session};
pub use tick::{TickInput, autopilot, tick};
