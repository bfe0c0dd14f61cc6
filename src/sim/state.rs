//! Game state and core simulation types
//!
//! A [`GameState`] owns the RNG, the tuning, the phase machine and the current
//! [`Session`]. Restarting swaps in a fresh `Session`; nothing else is carried over.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambient::{self, BackgroundFish, Bubble};
use super::follower::place_followers;
use super::geometry::{Circle, Rect};
use super::spawner::ObstaclePair;
use crate::tuning::{Difficulty, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Difficulty menu is up, nothing moves
    AwaitingDifficulty,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for the restart code
    GameOver,
}

/// The player-controlled fish (fixed column, moves vertically)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leader {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl Leader {
    pub fn new(tuning: &Tuning) -> Self {
        let start = tuning.leader_start();
        Self {
            x: start.x,
            y: start.y,
            size: tuning.player_size,
            speed: tuning.player_speed,
        }
    }

    /// Top-left corner; followers anchor their offsets here
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos(), self.size)
    }

    pub fn hit_circle(&self, fraction: f32) -> Circle {
        Circle::inscribed(self.pos(), self.size, fraction)
    }

    /// Apply held up/down input and keep the sprite on screen
    pub fn steer(&mut self, up: bool, down: bool, screen_height: f32) {
        if up {
            self.y -= self.speed;
        }
        if down {
            self.y += self.speed;
        }
        self.y = self.y.clamp(0.0, screen_height - self.size);
    }
}

/// A fish trailing the leader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follower {
    /// Current top-left position
    pub pos: Vec2,
    /// Fixed offset from the leader, chosen once at session start
    pub base_offset: Vec2,
    /// Current wander target (always within the wander radius of `base_offset`)
    pub target_offset: Vec2,
    pub wander_timer: u32,
    pub wander_interval: u32,
}

/// A kelp obstacle (half of a top/bottom pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Set once when the trailing edge crosses the leader column
    pub passed: bool,
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn hit_circle(&self, fraction: f32) -> Circle {
        Circle::inscribed(self.pos, self.size, fraction)
    }
}

/// Everything that belongs to one run, from difficulty pick to game over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub leader: Leader,
    /// Followers in placement order
    pub followers: Vec<Follower>,
    /// Live obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Live coins (spawn order)
    pub coins: Vec<Coin>,
    /// Decorative background fish (not gameplay-affecting)
    pub background_fish: Vec<BackgroundFish>,
    /// Decorative bubbles (not gameplay-affecting)
    pub bubbles: Vec<Bubble>,
    /// Obstacles passed
    pub score: u32,
    pub coins_collected: u32,
    /// Ticks spent in `Playing`
    pub elapsed_ticks: u64,
    /// Scroll speed scalar, 1.0 at start, capped by tuning
    pub speed_multiplier: f32,
    /// Counts up to the spawn period, then wraps
    pub spawn_timer: u32,
    /// Next entity ID
    next_id: u32,
}

impl Session {
    /// Fresh run: leader centred, followers packed behind it, empty field
    pub fn new(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let leader = Leader::new(tuning);
        let placement = place_followers(tuning, leader.pos(), rng);
        if placement.fallbacks > 0 {
            log::debug!(
                "{} of {} followers placed without full spacing",
                placement.fallbacks,
                placement.followers.len()
            );
        }

        Self {
            leader,
            followers: placement.followers,
            obstacles: Vec::new(),
            coins: Vec::new(),
            background_fish: ambient::spawn_background_fish(tuning, rng),
            bubbles: ambient::spawn_bubbles(tuning, rng),
            score: 0,
            coins_collected: 0,
            elapsed_ticks: 0,
            speed_multiplier: 1.0,
            spawn_timer: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a generated obstacle pair and its coins to the field
    pub fn push_pair(&mut self, pair: ObstaclePair) {
        for rect in [pair.top, pair.bottom].into_iter().flatten() {
            let id = self.next_entity_id();
            self.obstacles.push(Obstacle {
                id,
                rect,
                passed: false,
            });
        }
        for (pos, size) in pair.coins {
            let id = self.next_entity_id();
            self.coins.push(Coin {
                id,
                pos,
                size,
                collected: false,
            });
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from (for reproducing a run)
    pub seed: u64,
    /// Single random source for spawning, placement, wander and ambient motion
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Chosen on the menu; fixed for the rest of the process
    pub difficulty: Option<Difficulty>,
    pub session: Session,
    /// Restart code typed so far (game over screen)
    pub restart_input: String,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.is_valid(), "tuning violates spawner/wander bounds");
        let mut rng = Pcg32::seed_from_u64(seed);
        let session = Session::new(&tuning, &mut rng);
        Self {
            seed,
            rng,
            tuning,
            phase: GamePhase::AwaitingDifficulty,
            difficulty: None,
            session,
            restart_input: String::new(),
        }
    }

    /// Pick a tier on the menu. Ignored outside `AwaitingDifficulty`.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != GamePhase::AwaitingDifficulty {
            return false;
        }
        log::info!("Difficulty selected: {}", difficulty.as_str());
        self.difficulty = Some(difficulty);
        self.phase = GamePhase::Playing;
        true
    }

    /// Type one character of the restart code (letters only, lowercased)
    pub fn append_char(&mut self, c: char) {
        if self.phase != GamePhase::GameOver || !c.is_ascii_alphabetic() {
            return;
        }
        if self.restart_input.len() < self.tuning.restart_input_max {
            self.restart_input.push(c.to_ascii_lowercase());
        }
    }

    pub fn backspace(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.restart_input.pop();
        }
    }

    /// Check a restart code. On a match the run restarts with a fresh session;
    /// otherwise the input buffer is cleared.
    pub fn submit_restart_code(&mut self, code: &str) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.restart_input.clear();
        if code.to_lowercase() != self.tuning.restart_passphrase.to_lowercase() {
            log::warn!("Wrong restart code");
            return false;
        }
        self.reset();
        true
    }

    /// Replace the session wholesale and resume play
    pub fn reset(&mut self) {
        log::info!(
            "Restarting (last run: score {}, coins {})",
            self.session.score,
            self.session.coins_collected
        );
        self.session = Session::new(&self.tuning, &mut self.rng);
        self.restart_input.clear();
        self.phase = if self.difficulty.is_some() {
            GamePhase::Playing
        } else {
            GamePhase::AwaitingDifficulty
        };
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
