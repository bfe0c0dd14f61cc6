//! Read-only view of the simulation for an external renderer
//!
//! The renderer never touches `GameState`; it gets a [`Snapshot`] per frame
//! and switches on [`EntityKind`] to pick sprites and tints.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::sim::geometry::Rect;
use crate::sim::state::{GamePhase, GameState};
use crate::sim::{BackgroundFish, Bubble};
use crate::tuning::Difficulty;

/// Entity tag the renderer dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum EntityKind {
    BackgroundFish = 0,
    Bubble = 1,
    Obstacle = 2,
    Coin = 3,
    Leader = 4,
    Follower = 5,
}

/// One sprite for an instanced draw call
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// `EntityKind` as u32
    pub kind: u32,
    /// Direction for fish (+1 right, -1 left), depth-fade for background fish
    pub facing: f32,
    pub alpha: f32,
    pub _pad: f32,
}

impl SpriteInstance {
    pub fn new(kind: EntityKind, rect: Rect) -> Self {
        Self {
            position: rect.pos.to_array(),
            size: rect.size.to_array(),
            kind: kind as u32,
            facing: 1.0,
            alpha: 1.0,
            _pad: 0.0,
        }
    }
}

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    pub leader: Rect,
    /// In placement order
    pub followers: Vec<Rect>,
    pub obstacles: Vec<Rect>,
    /// Uncollected coins only
    pub coins: Vec<Rect>,
    pub background_fish: Vec<BackgroundFish>,
    pub bubbles: Vec<Bubble>,
    pub score: u32,
    pub coins_collected: u32,
    pub speed_multiplier: f32,
    /// Restart code typed so far (echoed on the game over panel)
    pub restart_input: String,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let session = &self.session;
        let follower_size = self.tuning.follower_size;
        Snapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            leader: session.leader.rect(),
            followers: session
                .followers
                .iter()
                .map(|f| f.rect(follower_size))
                .collect(),
            obstacles: session.obstacles.iter().map(|o| o.rect).collect(),
            coins: session
                .coins
                .iter()
                .filter(|c| !c.collected)
                .map(|c| c.rect())
                .collect(),
            background_fish: session.background_fish.clone(),
            bubbles: session.bubbles.clone(),
            score: session.score,
            coins_collected: session.coins_collected,
            speed_multiplier: session.speed_multiplier,
            restart_input: self.restart_input.clone(),
        }
    }
}

impl Snapshot {
    /// Instances in back-to-front draw order
    pub fn instances(&self) -> Vec<SpriteInstance> {
        let mut out = Vec::with_capacity(
            self.background_fish.len()
                + self.bubbles.len()
                + self.obstacles.len()
                + self.coins.len()
                + 1
                + self.followers.len(),
        );

        for fish in &self.background_fish {
            let mut inst =
                SpriteInstance::new(EntityKind::BackgroundFish, Rect::square(fish.pos, fish.size));
            inst.facing = fish.direction;
            inst.alpha = fish.depth;
            out.push(inst);
        }
        for bubble in &self.bubbles {
            out.push(SpriteInstance::new(
                EntityKind::Bubble,
                Rect::square(bubble.pos, bubble.size),
            ));
        }
        out.extend(
            self.obstacles
                .iter()
                .map(|r| SpriteInstance::new(EntityKind::Obstacle, *r)),
        );
        out.extend(
            self.coins
                .iter()
                .map(|r| SpriteInstance::new(EntityKind::Coin, *r)),
        );
        out.push(SpriteInstance::new(EntityKind::Leader, self.leader));
        out.extend(
            self.followers
                .iter()
                .map(|r| SpriteInstance::new(EntityKind::Follower, *r)),
        );
        out
    }

    /// Raw bytes of [`Snapshot::instances`], ready for a GPU buffer upload
    pub fn instance_bytes(&self) -> Vec<u8> {
        let instances = self.instances();
        bytemuck::cast_slice::<SpriteInstance, u8>(&instances).to_vec()
    }
}
