//! Fixed-rate simulation tick
//!
//! One call per rendered frame. Within `Playing` the order is fixed:
//! clock, leader, followers, ambient, scroll + score, collisions, spawn.

use super::geometry::{circle_overlap, circle_rect_overlap};
use super::spawner::generate_pair;
use super::state::{GamePhase, GameState, Session};
use crate::tuning::{Difficulty, Tuning};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held: swim up (Up / W)
    pub move_up: bool,
    /// Held: swim down (Down / S)
    pub move_down: bool,
    /// Menu choice (edge-triggered)
    pub select_difficulty: Option<Difficulty>,
    /// Characters typed this frame on the game over screen
    pub typed: String,
    /// Backspace pressed this frame
    pub backspace: bool,
    /// Enter pressed this frame: submit the typed restart code
    pub submit: bool,
    /// Idle/demo mode - steer the leader toward the next gap
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::AwaitingDifficulty => {
            if let Some(difficulty) = input.select_difficulty {
                state.select_difficulty(difficulty);
            }
        }

        GamePhase::GameOver => {
            if input.backspace {
                state.backspace();
            }
            for c in input.typed.chars() {
                state.append_char(c);
            }
            if input.submit {
                let code = std::mem::take(&mut state.restart_input);
                state.submit_restart_code(&code);
            }
        }

        GamePhase::Playing => {
            let difficulty = state.difficulty.unwrap_or_default();
            let (up, down) = if input.autopilot {
                autopilot(&state.session, &state.tuning)
            } else {
                (input.move_up, input.move_down)
            };
            let tuning = &state.tuning;
            let session = &mut state.session;
            let rng = &mut state.rng;

            advance_clock(session, tuning, difficulty);
            session.leader.steer(up, down, tuning.screen_height);

            let anchor = session.leader.pos();
            for follower in &mut session.followers {
                follower.update(anchor, tuning, rng);
            }

            for fish in &mut session.background_fish {
                fish.update(tuning, rng);
            }
            for bubble in &mut session.bubbles {
                bubble.update(tuning, rng);
            }

            scroll(session, tuning);

            if detect_collisions(session, tuning) {
                log::info!(
                    "Game over after {} ticks: score {}, coins {}",
                    session.elapsed_ticks,
                    session.score,
                    session.coins_collected
                );
                state.phase = GamePhase::GameOver;
                return;
            }

            session.spawn_timer += 1;
            if session.spawn_timer >= tuning.spawn_period {
                session.spawn_timer = 0;
                let pair = generate_pair(tuning, rng);
                log::debug!(
                    "Spawned pair: gap {:.0}px centred at y={:.0}, {} coins",
                    pair.gap_size,
                    pair.gap_center(),
                    pair.coins.len()
                );
                session.push_pair(pair);
            }
        }
    }
}

/// Tick counter and difficulty-scaled speed multiplier
fn advance_clock(session: &mut Session, tuning: &Tuning, difficulty: Difficulty) {
    session.elapsed_ticks += 1;
    let rate = tuning.acceleration_rate(difficulty);
    session.speed_multiplier =
        (1.0 + session.elapsed_ticks as f32 / rate).min(tuning.max_speed_multiplier);
}

/// Scroll obstacles and coins left, score passed obstacles, drop what is gone
fn scroll(session: &mut Session, tuning: &Tuning) {
    let dx = tuning.scroll_speed * session.speed_multiplier;
    let leader_x = session.leader.x;

    for obstacle in &mut session.obstacles {
        obstacle.rect.pos.x -= dx;
        if !obstacle.passed && obstacle.rect.right() < leader_x {
            obstacle.passed = true;
            session.score += 1;
        }
    }
    session.obstacles.retain(|o| o.rect.right() > 0.0);

    for coin in &mut session.coins {
        coin.pos.x -= dx;
    }
    session.coins.retain(|c| !c.collected && c.pos.x + c.size > 0.0);
}

/// Run the collision passes. Returns true on game over.
///
/// Leader vs obstacles, leader vs coins, followers vs obstacles, followers vs
/// coins. Coin pickups before a fatal hit still count.
fn detect_collisions(session: &mut Session, tuning: &Tuning) -> bool {
    let leader = session.leader.hit_circle(tuning.leader_hit_fraction);

    if session
        .obstacles
        .iter()
        .any(|o| circle_rect_overlap(&leader, &o.rect))
    {
        return true;
    }

    for coin in &mut session.coins {
        if !coin.collected && circle_overlap(&leader, &coin.hit_circle(tuning.coin_hit_fraction)) {
            coin.collected = true;
            session.coins_collected += 1;
        }
    }

    let follower_circles: Vec<_> = session
        .followers
        .iter()
        .map(|f| f.hit_circle(tuning.follower_size, tuning.follower_hit_fraction))
        .collect();

    let follower_hit = follower_circles.iter().any(|circle| {
        session
            .obstacles
            .iter()
            .any(|o| circle_rect_overlap(circle, &o.rect))
    });
    if follower_hit {
        return true;
    }

    for circle in &follower_circles {
        for coin in &mut session.coins {
            if !coin.collected && circle_overlap(circle, &coin.hit_circle(tuning.coin_hit_fraction))
            {
                coin.collected = true;
                session.coins_collected += 1;
            }
        }
    }

    false
}

/// Demo steering: aim the leader's centre at the nearest gap still ahead.
///
/// Returns (up, down). Holds still inside a dead zone of one leader step.
pub fn autopilot(session: &Session, tuning: &Tuning) -> (bool, bool) {
    let leader = &session.leader;
    let Some(target_y) = next_gap_center(session, tuning) else {
        return (false, false);
    };
    let center_y = leader.y + leader.size / 2.0;
    let delta = target_y - center_y;
    if delta.abs() <= leader.speed {
        (false, false)
    } else {
        (delta < 0.0, delta > 0.0)
    }
}

/// Centre of the gap formed by the closest unpassed column(s)
fn next_gap_center(session: &Session, tuning: &Tuning) -> Option<f32> {
    let ahead = session
        .obstacles
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.rect.pos.x)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;

    let mut gap_top = 0.0_f32;
    let mut gap_bottom = tuning.screen_height;
    for o in session.obstacles.iter().filter(|o| o.rect.pos.x == ahead) {
        if o.rect.pos.y <= 0.0 {
            gap_top = gap_top.max(o.rect.bottom());
        } else {
            gap_bottom = gap_bottom.min(o.rect.pos.y);
        }
    }
    Some((gap_top + gap_bottom) / 2.0)
}
