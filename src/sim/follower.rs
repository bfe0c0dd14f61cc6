//! Follower school behaviour
//!
//! Each follower keeps a fixed base offset from the leader and drifts around
//! it: every few seconds it picks a new wander target inside a small disk
//! around that offset, then swims toward `leader + target` at a capped speed.
//! Followers never look at each other after the initial placement.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Circle, Rect};
use super::state::Follower;
use crate::random_point_in_disk;
use crate::tuning::Tuning;

/// Result of packing followers behind the leader
#[derive(Debug, Clone)]
pub struct FollowerPlacement {
    pub followers: Vec<Follower>,
    /// Followers that ran out of attempts and took their last sample
    pub fallbacks: usize,
}

/// Scatter followers inside the placement disk behind the leader.
///
/// Rejection sampling: a sample closer than `placement_spacing * follower_size`
/// to an already placed follower is redrawn, up to `placement_attempts` times.
/// When attempts run out the last sample is kept anyway.
pub fn place_followers(tuning: &Tuning, anchor: Vec2, rng: &mut impl Rng) -> FollowerPlacement {
    let center = anchor + Vec2::new(tuning.placement_offset_x, 0.0);
    let min_spacing = tuning.follower_size * tuning.placement_spacing;
    let attempts = tuning.placement_attempts.max(1);

    let mut points: Vec<Vec2> = Vec::with_capacity(tuning.num_followers);
    let mut fallbacks = 0;

    for _ in 0..tuning.num_followers {
        let mut sample = center;
        let mut placed = false;
        for _ in 0..attempts {
            sample = center + random_point_in_disk(rng, tuning.placement_radius);
            if points.iter().all(|p| p.distance(sample) >= min_spacing) {
                placed = true;
                break;
            }
        }
        if !placed {
            fallbacks += 1;
        }
        points.push(sample);
    }

    let followers = points
        .into_iter()
        .map(|pos| Follower::new(pos, pos - anchor, tuning, rng))
        .collect();

    FollowerPlacement {
        followers,
        fallbacks,
    }
}

fn random_interval(tuning: &Tuning, rng: &mut impl Rng) -> u32 {
    rng.random_range(tuning.wander_interval_min..=tuning.wander_interval_max)
}

impl Follower {
    /// New follower at `pos`, resting on its base offset with a random wander phase
    pub fn new(pos: Vec2, base_offset: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            base_offset,
            target_offset: base_offset,
            wander_timer: rng.random_range(0..tuning.wander_interval_max.max(1)),
            wander_interval: random_interval(tuning, rng),
        }
    }

    pub fn rect(&self, size: f32) -> Rect {
        Rect::square(self.pos, size)
    }

    pub fn hit_circle(&self, size: f32, fraction: f32) -> Circle {
        Circle::inscribed(self.pos, size, fraction)
    }

    /// Advance the wander timer; on expiry draw a new interval and target
    pub fn wander(&mut self, tuning: &Tuning, rng: &mut impl Rng) -> bool {
        self.wander_timer += 1;
        if self.wander_timer < self.wander_interval {
            return false;
        }
        self.wander_timer = 0;
        self.wander_interval = random_interval(tuning, rng);
        self.target_offset = self.base_offset + random_point_in_disk(rng, tuning.wander_radius);
        true
    }

    /// Move toward `anchor + target_offset` by at most `speed`, snapping when close
    pub fn seek(&mut self, anchor: Vec2, speed: f32) {
        let target = anchor + self.target_offset;
        let to_target = target - self.pos;
        let distance = to_target.length();
        if distance > speed {
            self.pos += to_target / distance * speed;
        } else {
            self.pos = target;
        }
    }

    /// Keep the whole sprite inside the field
    pub fn clamp_to(&mut self, field: &Rect, size: f32) {
        let max = (field.max() - Vec2::splat(size)).max(field.min());
        self.pos = self.pos.clamp(field.min(), max);
    }

    /// One tick: wander retarget, seek the leader-relative target, clamp
    pub fn update(&mut self, anchor: Vec2, tuning: &Tuning, rng: &mut impl Rng) {
        self.wander(tuning, rng);
        self.seek(anchor, tuning.follower_speed);
        self.clamp_to(&tuning.field(), tuning.follower_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn anchor(tuning: &Tuning) -> Vec2 {
        tuning.leader_start()
    }

    fn min_pairwise_distance(followers: &[Follower]) -> f32 {
        let mut min = f32::MAX;
        for (i, a) in followers.iter().enumerate() {
            for b in &followers[i + 1..] {
                min = min.min(a.pos.distance(b.pos));
            }
        }
        min
    }

    #[test]
    fn test_placement_respects_spacing_with_fixed_seed() {
        // Small school in a roomy disk: every follower finds a free spot
        let tuning = Tuning {
            num_followers: 4,
            follower_size: 20.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(2024);
        let placement = place_followers(&tuning, anchor(&tuning), &mut rng);

        assert_eq!(placement.followers.len(), 4);
        assert_eq!(placement.fallbacks, 0);
        assert!(min_pairwise_distance(&placement.followers) >= 24.0);
    }

    #[test]
    fn test_placement_spacing_or_fallback() {
        let tuning = Tuning::default();
        let spacing = tuning.follower_size * tuning.placement_spacing;
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let placement = place_followers(&tuning, anchor(&tuning), &mut rng);
            if placement.fallbacks == 0 {
                assert!(min_pairwise_distance(&placement.followers) >= spacing);
            }
        }
    }

    #[test]
    fn test_placement_exhaustion_is_best_effort() {
        // Spacing wider than the disk: only the first follower fits
        let tuning = Tuning {
            num_followers: 3,
            placement_radius: 10.0,
            placement_attempts: 5,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        let placement = place_followers(&tuning, anchor(&tuning), &mut rng);
        assert_eq!(placement.followers.len(), 3);
        assert_eq!(placement.fallbacks, 2);
    }

    #[test]
    fn test_base_offset_is_relative_to_leader() {
        let tuning = Tuning::default();
        let leader = anchor(&tuning);
        let mut rng = Pcg32::seed_from_u64(5);
        let placement = place_followers(&tuning, leader, &mut rng);
        let disk_center = leader + Vec2::new(tuning.placement_offset_x, 0.0);
        for f in &placement.followers {
            assert!((f.pos - (leader + f.base_offset)).length() < 1e-3);
            assert_eq!(f.target_offset, f.base_offset);
            assert!(f.pos.distance(disk_center) <= tuning.placement_radius + 1e-3);
            assert!(f.wander_timer < tuning.wander_interval_max);
        }
    }

    #[test]
    fn test_seek_caps_speed_and_snaps() {
        let mut f = Follower {
            pos: Vec2::ZERO,
            base_offset: Vec2::ZERO,
            target_offset: Vec2::new(30.0, 40.0),
            wander_timer: 0,
            wander_interval: 100,
        };
        f.seek(Vec2::ZERO, 4.0);
        assert!((f.pos.length() - 4.0).abs() < 1e-4);
        assert!((f.pos - Vec2::new(2.4, 3.2)).length() < 1e-4);

        f.pos = Vec2::new(29.0, 40.0);
        f.seek(Vec2::ZERO, 4.0);
        assert_eq!(f.pos, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_wander_retargets_on_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(77);
        let mut f = Follower {
            pos: Vec2::ZERO,
            base_offset: Vec2::new(-50.0, 10.0),
            target_offset: Vec2::new(-50.0, 10.0),
            wander_timer: 0,
            wander_interval: 3,
        };
        assert!(!f.wander(&tuning, &mut rng));
        assert!(!f.wander(&tuning, &mut rng));
        assert!(f.wander(&tuning, &mut rng));
        assert_eq!(f.wander_timer, 0);
        assert!(
            (tuning.wander_interval_min..=tuning.wander_interval_max).contains(&f.wander_interval)
        );
    }

    #[test]
    fn test_clamp_keeps_sprite_on_screen() {
        let tuning = Tuning::default();
        let mut f = Follower {
            pos: Vec2::new(-40.0, 9000.0),
            base_offset: Vec2::ZERO,
            target_offset: Vec2::ZERO,
            wander_timer: 0,
            wander_interval: 1,
        };
        f.clamp_to(&tuning.field(), tuning.follower_size);
        assert_eq!(f.pos, Vec2::new(0.0, tuning.screen_height - tuning.follower_size));
    }

    proptest! {
        #[test]
        fn prop_wander_target_stays_in_radius(seed in any::<u64>(), cycles in 1usize..200) {
            let tuning = Tuning {
                wander_interval_min: 1,
                wander_interval_max: 2,
                ..Default::default()
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            let base = Vec2::new(-60.0, 25.0);
            let mut f = Follower::new(base, base, &tuning, &mut rng);
            for _ in 0..cycles {
                f.update(Vec2::new(110.0, 296.0), &tuning, &mut rng);
                prop_assert_eq!(f.base_offset, base);
                prop_assert!(f.target_offset.distance(base) <= tuning.wander_radius + 1e-3);
            }
        }
    }
}
