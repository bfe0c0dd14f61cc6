//! Background fish and bubbles
//!
//! Purely decorative: nothing here collides with anything. They share the
//! simulation RNG so a seeded run stays reproducible end to end.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Horizontal slack before a drifting bubble wraps to the other side
const BUBBLE_WRAP_SLACK: f32 = 20.0;
/// Peak sideways sway of a bubble (pixels)
const BUBBLE_SWAY: f32 = 10.0;

/// A fish swimming across the back of the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundFish {
    pub pos: Vec2,
    pub speed: f32,
    /// +1 swims right, -1 swims left
    pub direction: f32,
    pub size: f32,
    /// 0.3 - 0.7, lower = further back (renderer fades by this)
    pub depth: f32,
}

impl BackgroundFish {
    fn random(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let depth = rng.random_range(0.3..0.7);
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * tuning.screen_width,
                rng.random::<f32>() * tuning.screen_height,
            ),
            speed: rng.random_range(0.5..1.5),
            direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            size: 30.0 + depth * 30.0,
            depth,
        }
    }

    /// Swim one tick; wrap to the far edge at a new height once fully off-screen
    pub fn update(&mut self, tuning: &Tuning, rng: &mut impl Rng) {
        self.pos.x += self.speed * self.direction;
        let off_right = self.direction > 0.0 && self.pos.x > tuning.screen_width + self.size;
        let off_left = self.direction < 0.0 && self.pos.x < -self.size;
        if off_right {
            self.pos.x = -self.size;
        } else if off_left {
            self.pos.x = tuning.screen_width + self.size;
        }
        if off_right || off_left {
            self.pos.y = rng.random::<f32>() * tuning.screen_height;
        }
    }
}

/// A bubble rising with a gentle sideways sway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bubble {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    /// Sway phase (radians)
    pub wobble: f32,
    pub wobble_speed: f32,
}

impl Bubble {
    fn random(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * tuning.screen_width,
                rng.random::<f32>() * tuning.screen_height,
            ),
            speed: rng.random_range(0.5..2.0),
            size: rng.random_range(3.0..11.0),
            wobble: rng.random_range(0.0..std::f32::consts::TAU),
            wobble_speed: rng.random_range(0.02..0.05),
        }
    }

    pub fn update(&mut self, tuning: &Tuning, rng: &mut impl Rng) {
        self.pos.y -= self.speed;
        self.wobble += self.wobble_speed;
        self.pos.x += self.wobble.sin() * BUBBLE_SWAY * 0.05;

        // Popped off the top: respawn below the bottom edge
        if self.pos.y < -self.size {
            self.pos.y = tuning.screen_height + self.size;
            self.pos.x = rng.random::<f32>() * tuning.screen_width;
            self.wobble = rng.random_range(0.0..std::f32::consts::TAU);
        }

        if self.pos.x < -BUBBLE_WRAP_SLACK {
            self.pos.x = tuning.screen_width + BUBBLE_WRAP_SLACK;
        } else if self.pos.x > tuning.screen_width + BUBBLE_WRAP_SLACK {
            self.pos.x = -BUBBLE_WRAP_SLACK;
        }
    }
}

pub fn spawn_background_fish(tuning: &Tuning, rng: &mut impl Rng) -> Vec<BackgroundFish> {
    (0..tuning.num_background_fish)
        .map(|_| BackgroundFish::random(tuning, rng))
        .collect()
}

pub fn spawn_bubbles(tuning: &Tuning, rng: &mut impl Rng) -> Vec<Bubble> {
    (0..tuning.num_bubbles)
        .map(|_| Bubble::random(tuning, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_counts_and_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(10);
        let fish = spawn_background_fish(&tuning, &mut rng);
        let bubbles = spawn_bubbles(&tuning, &mut rng);
        assert_eq!(fish.len(), tuning.num_background_fish);
        assert_eq!(bubbles.len(), tuning.num_bubbles);
        for f in &fish {
            assert!((0.3..0.7).contains(&f.depth));
            assert!((f.size - (30.0 + f.depth * 30.0)).abs() < 1e-4);
            assert!(f.direction == 1.0 || f.direction == -1.0);
        }
        for b in &bubbles {
            assert!((3.0..11.0).contains(&b.size));
        }
    }

    #[test]
    fn test_fish_wraps_to_opposite_edge() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut fish = BackgroundFish {
            pos: Vec2::new(tuning.screen_width + 40.0, 100.0),
            speed: 1.0,
            direction: 1.0,
            size: 40.0,
            depth: 0.5,
        };
        fish.update(&tuning, &mut rng);
        assert_eq!(fish.pos.x, -40.0);
        assert!((0.0..=tuning.screen_height).contains(&fish.pos.y));

        fish.direction = -1.0;
        fish.pos.x = -40.5;
        fish.update(&tuning, &mut rng);
        assert_eq!(fish.pos.x, tuning.screen_width + 40.0);
    }

    #[test]
    fn test_bubble_respawns_at_bottom() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bubble = Bubble {
            pos: Vec2::new(200.0, -5.0),
            speed: 1.0,
            size: 5.0,
            wobble: 0.0,
            wobble_speed: 0.03,
        };
        bubble.update(&tuning, &mut rng);
        assert_eq!(bubble.pos.y, tuning.screen_height + 5.0);
        assert!((0.0..=tuning.screen_width).contains(&bubble.pos.x));
    }

    #[test]
    fn test_bubble_rises() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bubble = Bubble {
            pos: Vec2::new(200.0, 300.0),
            speed: 1.5,
            size: 5.0,
            wobble: 0.0,
            wobble_speed: 0.03,
        };
        bubble.update(&tuning, &mut rng);
        assert_eq!(bubble.pos.y, 298.5);
        assert!((bubble.pos.x - 200.0).abs() <= BUBBLE_SWAY * 0.05);
    }
}
