//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes from a [`Tuning`].
//! Defaults live in [`crate::consts`]; a JSON file may override any subset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::geometry::Rect;

/// Difficulty tiers (selected once per run on the menu)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a menu choice: name, initial, or number key
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "m" | "2" => Some(Difficulty::Medium),
            "hard" | "h" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Game balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Leader ===
    pub player_x: f32,
    pub player_size: f32,
    pub player_speed: f32,

    // === Scrolling ===
    pub scroll_speed: f32,
    pub max_speed_multiplier: f32,
    pub accel_rate_easy: f32,
    pub accel_rate_medium: f32,
    pub accel_rate_hard: f32,

    // === Spawner ===
    pub min_gap: f32,
    pub max_gap: f32,
    pub obstacle_width: f32,
    pub spawn_period: u32,
    pub coin_size: f32,
    /// Vertical padding between coins and the gap edges
    pub coin_gap_inset: f32,
    /// Horizontal distance from the obstacle's trailing edge to the first coin
    pub coin_lead: f32,
    pub coin_step: f32,
    pub coins_min: u32,
    pub coins_max: u32,

    // === Followers ===
    pub num_followers: usize,
    pub follower_size: f32,
    pub follower_speed: f32,
    pub placement_radius: f32,
    pub placement_offset_x: f32,
    /// Minimum spacing between placed followers (multiple of follower size)
    pub placement_spacing: f32,
    pub placement_attempts: u32,
    pub wander_radius: f32,
    pub wander_interval_min: u32,
    pub wander_interval_max: u32,

    // === Collision ===
    pub leader_hit_fraction: f32,
    pub follower_hit_fraction: f32,
    pub coin_hit_fraction: f32,

    // === Ambient ===
    pub num_background_fish: usize,
    pub num_bubbles: usize,

    // === Restart ===
    pub restart_passphrase: String,
    pub restart_input_max: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,

            scroll_speed: SCROLL_SPEED,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
            accel_rate_easy: ACCEL_RATE_EASY,
            accel_rate_medium: ACCEL_RATE_MEDIUM,
            accel_rate_hard: ACCEL_RATE_HARD,

            min_gap: OBSTACLE_MIN_GAP,
            max_gap: OBSTACLE_MAX_GAP,
            obstacle_width: OBSTACLE_WIDTH,
            spawn_period: SPAWN_PERIOD_TICKS,
            coin_size: COIN_SIZE,
            coin_gap_inset: COIN_GAP_INSET,
            coin_lead: COIN_LEAD,
            coin_step: COIN_STEP,
            coins_min: COINS_PER_GAP_MIN,
            coins_max: COINS_PER_GAP_MAX,

            num_followers: NUM_FOLLOWERS,
            follower_size: FOLLOWER_SIZE,
            follower_speed: FOLLOWER_SPEED,
            placement_radius: PLACEMENT_RADIUS,
            placement_offset_x: PLACEMENT_OFFSET_X,
            placement_spacing: PLACEMENT_SPACING,
            placement_attempts: PLACEMENT_ATTEMPTS,
            wander_radius: WANDER_RADIUS,
            wander_interval_min: WANDER_INTERVAL_MIN,
            wander_interval_max: WANDER_INTERVAL_MAX,

            leader_hit_fraction: LEADER_HIT_FRACTION,
            follower_hit_fraction: FOLLOWER_HIT_FRACTION,
            coin_hit_fraction: COIN_HIT_FRACTION,

            num_background_fish: NUM_BACKGROUND_FISH,
            num_bubbles: NUM_BUBBLES,

            restart_passphrase: RESTART_PASSPHRASE.to_string(),
            restart_input_max: RESTART_INPUT_MAX,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning file
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Ticks needed to gain +1.0x scroll speed on the given tier
    pub fn acceleration_rate(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Easy => self.accel_rate_easy,
            Difficulty::Medium => self.accel_rate_medium,
            Difficulty::Hard => self.accel_rate_hard,
        }
    }

    /// The play field rectangle
    pub fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen_width, self.screen_height)
    }

    /// Leader's resting position at the start of a session (vertically centred)
    pub fn leader_start(&self) -> Vec2 {
        Vec2::new(self.player_x, self.screen_height / 2.0 - self.player_size / 2.0)
    }

    /// Check the spawner and wander preconditions.
    ///
    /// The simulation does not guard against a tuning that fails this; callers
    /// loading external files should reject it up front.
    pub fn is_valid(&self) -> bool {
        self.min_gap > 0.0
            && self.min_gap <= self.max_gap
            && self.max_gap < self.screen_height
            && self.coins_min <= self.coins_max
            && self.wander_interval_min <= self.wander_interval_max
            && self.wander_interval_max > 0
            && self.spawn_period > 0
            && self.player_size <= self.screen_height
            && self.follower_size <= self.screen_height
            && self.follower_size <= self.screen_width
    }
}
