//! Obstacle creation, scrolling and off-screen cleanup.

use rand::Rng;

use crate::config::Config;
use crate::entities::{BirdAltitude, GameState, Obstacle};

/// Ticks to wait before the next spawn: base separation plus jitter.
pub fn roll_threshold(config: &Config, rng: &mut impl Rng) -> u32 {
    config.min_separation + rng.gen_range(0..config.random_separation.max(1))
}

/// A single obstacle at column `x`: mostly cacti, occasionally a bird.
pub fn random_obstacle(x: i32, config: &Config, rng: &mut impl Rng) -> Obstacle {
    if rng.gen_bool(config.bird_probability) {
        let altitude = match rng.gen_range(0..3) {
            0 => BirdAltitude::Low,
            1 => BirdAltitude::Mid,
            _ => BirdAltitude::High,
        };
        Obstacle::bird(x, altitude)
    } else {
        let width = rng.gen_range(1..=2);
        let height = rng.gen_range(4..=7);
        Obstacle::cactus(x, width, height)
    }
}

/// Three or four short cacti, staggered so they stay in spawn order.
pub fn burst(x: i32, rng: &mut impl Rng) -> Vec<Obstacle> {
    let count = 3 + rng.gen_range(0..2);
    (0..count)
        .map(|i| {
            let height = rng.gen_range(2..=4);
            let gap = 8 + rng.gen_range(0..4);
            Obstacle::cactus(x + i * gap, 1, height)
        })
        .collect()
}

/// Push the next spawn (single obstacle or burst) at the right edge.
pub fn spawn_obstacles(state: &mut GameState, rng: &mut impl Rng) {
    if state.staircase.active {
        return;
    }
    let x = state.right_edge();
    let cfg = state.config;
    if state.score > cfg.burst_min_score && rng.gen_ratio(1, cfg.burst_chance) {
        let group = burst(x, rng);
        log::debug!("Burst of {} obstacles", group.len());
        state.obstacles.extend(group);
    } else {
        state.obstacles.push(random_obstacle(x, &cfg, rng));
    }
}

/// Count up and spawn once the threshold is exceeded.  The timer is held
/// at zero during the staircase event.
pub fn step_spawn_timer(state: &mut GameState, rng: &mut impl Rng) {
    if state.staircase.active {
        state.spawn_timer = 0;
        return;
    }
    state.spawn_timer += 1;
    if state.spawn_timer > state.next_spawn_at {
        spawn_obstacles(state, rng);
        state.spawn_timer = 0;
        state.next_spawn_at = roll_threshold(&state.config, rng);
    }
}

/// Scroll every obstacle left, mark the ones the dino has passed, drop the
/// ones fully off-screen.  Returns how many were newly passed.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, speed: i32, dino_x: i32) -> u32 {
    let mut passed = 0;
    for ob in obstacles.iter_mut() {
        ob.x -= speed;
        if !ob.destroyed && !ob.passed && ob.x < dino_x {
            ob.passed = true;
            passed += 1;
        }
    }
    obstacles.retain(|ob| !ob.is_off_screen());
    passed
}
