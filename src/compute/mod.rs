//! Game rules.
//!
//! Input handlers and `tick` map a `&GameState` to the next `GameState`.
//! Randomness only enters through the `Rng` passed in, so a seeded RNG
//! replays a session exactly.

pub mod collision;
pub mod physics;
pub mod spawner;
pub mod staircase;
pub mod weapons;

use rand::Rng;

use crate::config::Config;
use crate::entities::{Dino, GameState, GameStatus, Parallax, Staircase};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Ground sits three quarters of the way down the field.
fn ground_row(height: u16) -> i32 {
    (height as i32 * 3) / 4
}

fn new_session(
    config: Config,
    width: u16,
    height: u16,
    high_score: u32,
    status: GameStatus,
    rng: &mut impl Rng,
) -> GameState {
    let ground_y = ground_row(height);
    let mut state = GameState {
        dino: Dino::new(ground_y, config.starting_lives),
        obstacles: Vec::new(),
        weapons: Vec::new(),
        staircase: Staircase::default(),
        parallax: Parallax::default(),
        score: 0,
        high_score,
        fireballs: config.starting_fireballs,
        speed: config.base_speed,
        spawn_timer: 0,
        next_spawn_at: spawner::roll_threshold(&config, rng),
        status,
        frame: 0,
        width,
        height,
        ground_y,
        config,
    };
    // Never start with an empty field.
    spawner::spawn_obstacles(&mut state, rng);
    state
}

/// Build the initial game state for the given terminal dimensions.  The
/// session waits in `Ready` until `start` is called.
pub fn init_state(
    config: Config,
    width: u16,
    height: u16,
    high_score: u32,
    rng: &mut impl Rng,
) -> GameState {
    new_session(config, width, height, high_score, GameStatus::Ready, rng)
}

/// Fresh game in the same field, keeping the high score.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    log::info!("Restarting (high score {})", state.high_score);
    new_session(
        state.config,
        state.width,
        state.height,
        state.high_score,
        GameStatus::Playing,
        rng,
    )
}

/// Fit the running session to a new terminal size.  Progress is kept;
/// everything measured from the ground row moves with it.
pub fn resize(state: &GameState, width: u16, height: u16) -> GameState {
    let mut next = state.clone();
    let ground_y = ground_row(height);
    let dy = ground_y - state.ground_y;

    next.width = width;
    next.height = height;
    next.ground_y = ground_y;
    next.dino.y += dy as f32;
    for w in next.weapons.iter_mut() {
        w.y += dy;
    }
    next.staircase.stair_y += dy;
    for block in next.staircase.blocks.iter_mut() {
        block.y += dy;
    }

    let world = (width as i32).max(1);
    next.parallax.far_offset %= world;
    next.parallax.near_offset %= world;
    next
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn start(state: &GameState) -> GameState {
    if state.status != GameStatus::Ready {
        return state.clone();
    }
    GameState {
        status: GameStatus::Playing,
        ..state.clone()
    }
}

/// Jump (double jump while tokens remain, gentle boost while flying).
pub fn jump(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    physics::apply_jump(&mut next.dino, &state.config);
    next
}

/// Playing ⇄ Paused.  Other states are left alone.
pub fn toggle_pause(state: &GameState) -> GameState {
    let status = match state.status {
        GameStatus::Playing => GameStatus::Paused,
        GameStatus::Paused => GameStatus::Playing,
        other => other,
    };
    GameState {
        status,
        ..state.clone()
    }
}

/// Fly cheat: gravity off, and the fireball pouch is topped up to 99.
pub fn toggle_flying(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    let flying = !next.dino.flying;
    physics::set_flying(&mut next.dino, flying);
    next.fireballs = 99;
    log::info!("Fly cheat {}", if flying { "on" } else { "off" });
    next
}

pub fn fire(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    weapons::spawn_fireball(&next.dino, &mut next.fireballs, &mut next.weapons);
    next
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Add points one at a time so every milestone on the way fires exactly once.
fn award(state: &mut GameState, points: u32) {
    let cfg = state.config;
    for _ in 0..points {
        state.score += 1;
        let score = state.score;

        if score % cfg.speed_step_every == 0 {
            state.speed = physics::scroll_speed(score, &cfg);
            log::debug!("Speed increased! New speed: {}", state.speed);
        }
        if score % cfg.shield_every == 0 {
            state.dino.shield = true;
        }
        if score % cfg.fireball_refill_every == 0 {
            state.fireballs += cfg.fireball_refill;
        }
        if score == cfg.staircase_score && !state.staircase.triggered {
            staircase::trigger(&mut state.staircase, state.ground_y);
        }
    }
    state.high_score = state.high_score.max(state.score);
}

// ── Per-frame tick (RNG is injected) ─────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// Outside `Playing` this is a no-op.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    let cfg = next.config;
    let right_edge = next.right_edge();
    next.frame += 1;

    // ── 1. Staircase set-piece ───────────────────────────────────────────────
    if next.staircase.active {
        staircase::step(&mut next.staircase, next.speed, right_edge, &cfg);
    }

    // ── 2. Dino physics ──────────────────────────────────────────────────────
    physics::step_dino(
        &mut next.dino,
        next.ground_y,
        &next.staircase.blocks,
        &cfg,
    );

    // ── 3. Fireballs (before obstacles move) ─────────────────────────────────
    let burned = weapons::advance_fireballs(
        &mut next.weapons,
        &mut next.obstacles,
        next.ground_y,
        right_edge,
        &cfg,
    );
    award(&mut next, burned);

    // ── 4. Obstacles: scroll, score, spawn ───────────────────────────────────
    let passed = spawner::advance_obstacles(&mut next.obstacles, next.speed, next.dino.x);
    award(&mut next, passed);
    spawner::step_spawn_timer(&mut next, rng);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    let bonus = collision::resolve(&mut next);
    award(&mut next, bonus);

    // ── 6. Timers & background ───────────────────────────────────────────────
    next.dino.invincible_ticks = next.dino.invincible_ticks.saturating_sub(1);
    physics::step_parallax(&mut next.parallax, next.speed, next.width as i32);

    // ── 7. Game over ─────────────────────────────────────────────────────────
    if next.dino.lives == 0 {
        next.status = GameStatus::GameOver;
        log::info!("GAME OVER! Final score: {}", next.score);
    }

    next
}
