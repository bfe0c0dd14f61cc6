//! Procedural obstacle pairs
//!
//! Each pair is a top and bottom kelp column with a random vertical gap
//! between them, plus a short row of coins inside the gap just past the
//! columns' trailing edge.

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;
use crate::tuning::Tuning;

/// A freshly generated pair, not yet on the field
#[derive(Debug, Clone)]
pub struct ObstaclePair {
    /// Y of the gap's upper edge
    pub gap_top: f32,
    pub gap_size: f32,
    /// Upper column (absent when the gap starts at the top of the screen)
    pub top: Option<Rect>,
    /// Lower column (absent when the gap reaches the bottom of the screen)
    pub bottom: Option<Rect>,
    /// Coin top-left positions and sizes, left to right
    pub coins: Vec<(Vec2, f32)>,
}

impl ObstaclePair {
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }

    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap_size / 2.0
    }
}

/// Generate the next obstacle pair just beyond the right edge of the screen.
///
/// Assumes `0 < min_gap <= max_gap < screen_height`.
pub fn generate_pair(tuning: &Tuning, rng: &mut impl Rng) -> ObstaclePair {
    let height = tuning.screen_height;
    let gap_size = tuning.min_gap + rng.random::<f32>() * (tuning.max_gap - tuning.min_gap);
    // Gap centre keeps the whole gap on screen
    let gap_center = gap_size / 2.0 + rng.random::<f32>() * (height - gap_size);
    let gap_top = gap_center - gap_size / 2.0;
    let gap_bottom = gap_center + gap_size / 2.0;

    let x = tuning.screen_width;
    let width = tuning.obstacle_width;

    let top = (gap_top > 0.0).then(|| Rect::new(x, 0.0, width, gap_top));
    let bottom_height = height - gap_bottom;
    let bottom = (bottom_height > 0.0).then(|| Rect::new(x, gap_bottom, width, bottom_height));

    let count = rng.random_range(tuning.coins_min..=tuning.coins_max);
    let band = (gap_size - 2.0 * tuning.coin_gap_inset).max(0.0);
    let coins = (0..count)
        .map(|i| {
            let y = gap_top + tuning.coin_gap_inset + rng.random::<f32>() * band;
            let cx = x + width + tuning.coin_lead + i as f32 * tuning.coin_step;
            (Vec2::new(cx, y), tuning.coin_size)
        })
        .collect();

    ObstaclePair {
        gap_top,
        gap_size,
        top,
        bottom,
        coins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn height_of(rect: &Option<Rect>) -> f32 {
        rect.map(|r| r.size.y).unwrap_or(0.0)
    }

    #[test]
    fn test_fixed_gap_heights_sum_to_screen() {
        let tuning = Tuning {
            min_gap: 350.0,
            max_gap: 350.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(31337);
        for _ in 0..500 {
            let pair = generate_pair(&tuning, &mut rng);
            assert_eq!(pair.gap_size, 350.0);
            let total = height_of(&pair.top) + pair.gap_size + height_of(&pair.bottom);
            assert!(
                (total - tuning.screen_height).abs() < 1e-3,
                "top + gap + bottom = {total}"
            );
        }
    }

    #[test]
    fn test_gap_within_bounds_and_on_screen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..500 {
            let pair = generate_pair(&tuning, &mut rng);
            assert!(pair.gap_size >= tuning.min_gap && pair.gap_size <= tuning.max_gap);
            assert!(pair.gap_top >= 0.0);
            assert!(pair.gap_bottom() <= tuning.screen_height + 1e-3);
            // Never an empty pair
            assert!(pair.top.is_some() || pair.bottom.is_some());
        }
    }

    #[test]
    fn test_columns_start_off_screen_right() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let pair = generate_pair(&tuning, &mut rng);
        for rect in [pair.top, pair.bottom].into_iter().flatten() {
            assert_eq!(rect.pos.x, tuning.screen_width);
            assert_eq!(rect.size.x, tuning.obstacle_width);
        }
        if let Some(top) = pair.top {
            assert_eq!(top.pos.y, 0.0);
            assert!((top.bottom() - pair.gap_top).abs() < 1e-3);
        }
        if let Some(bottom) = pair.bottom {
            assert!((bottom.pos.y - pair.gap_bottom()).abs() < 1e-3);
            assert!((bottom.bottom() - tuning.screen_height).abs() < 1e-3);
        }
    }

    #[test]
    fn test_coins_inside_gap_left_to_right() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            let pair = generate_pair(&tuning, &mut rng);
            assert!((2..=3).contains(&pair.coins.len()));

            let trailing_edge = tuning.screen_width + tuning.obstacle_width;
            for (i, (pos, size)) in pair.coins.iter().enumerate() {
                assert_eq!(*size, tuning.coin_size);
                assert_eq!(
                    pos.x,
                    trailing_edge + tuning.coin_lead + i as f32 * tuning.coin_step
                );
                assert!(pos.y >= pair.gap_top + tuning.coin_gap_inset - 1e-3);
                assert!(pos.y <= pair.gap_bottom() - tuning.coin_gap_inset + 1e-3);
            }
        }
    }

    #[test]
    fn test_near_full_height_gap_leaves_one_pixel_of_kelp() {
        // One column may be omitted, but the leftover kelp is always one pixel tall
        let tuning = Tuning {
            min_gap: 719.0,
            max_gap: 719.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let pair = generate_pair(&tuning, &mut rng);
            let total = height_of(&pair.top) + height_of(&pair.bottom);
            assert!((total - 1.0).abs() < 1e-3);
        }
    }
}
