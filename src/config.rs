//! Game tuning: physics, pacing and milestone constants.
//!
//! `Params` holds the built-in values; `Config` is the runtime copy that
//! can be overridden from a JSON file.  Missing keys fall back to `Params`.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Built-in tuning values.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Physics (rows per tick)
    pub const GRAVITY: f32 = 0.12;
    pub const JUMP_STRENGTH: f32 = -1.6;
    pub const MAX_JUMPS: u32 = 2;
    pub const FLY_DRAG: f32 = 0.9;

    // Scrolling (columns per tick)
    pub const BASE_SPEED: i32 = 1;
    pub const SPEED_STEP_EVERY: u32 = 25;

    // Spawner (ticks)
    pub const MIN_SEPARATION: u32 = 25;
    pub const RANDOM_SEPARATION: u32 = 20;
    pub const BIRD_PROBABILITY: f64 = 0.1;
    pub const BURST_MIN_SCORE: u32 = 50;
    pub const BURST_CHANCE: u32 = 4; // one in N

    // Player
    pub const STARTING_LIVES: u32 = 3;
    pub const INVINCIBILITY_TICKS: u32 = 50;
    pub const SHIELD_EVERY: u32 = 15;

    // Fireballs
    pub const STARTING_FIREBALLS: u32 = 3;
    pub const FIREBALL_REFILL: u32 = 3;
    pub const FIREBALL_REFILL_EVERY: u32 = 10;
    pub const FIREBALL_SPEED: i32 = 2;
    pub const FIREBALL_REACH: i32 = 5;

    // Staircase event (ticks)
    pub const STAIRCASE_SCORE: u32 = 100;
    pub const STAIR_RISING: u32 = 100;
    pub const STAIR_FLAT: u32 = 300;
    pub const STAIR_FALLING: u32 = 100;
    pub const STAIR_STEP_RATE: u32 = 10;

    // Frame timing
    pub const FRAME_MS: u64 = 33;
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up).
    pub jump_strength: f32,
    /// Jumps allowed before touching ground again (2 = double jump).
    pub max_jumps: u32,
    pub fly_drag: f32,
    pub base_speed: i32,
    /// Scroll speed grows by one every this many points.
    pub speed_step_every: u32,
    pub min_separation: u32,
    pub random_separation: u32,
    pub bird_probability: f64,
    pub burst_min_score: u32,
    pub burst_chance: u32,
    pub starting_lives: u32,
    pub invincibility_ticks: u32,
    pub shield_every: u32,
    pub starting_fireballs: u32,
    pub fireball_refill: u32,
    pub fireball_refill_every: u32,
    pub fireball_speed: i32,
    pub fireball_reach: i32,
    pub staircase_score: u32,
    pub stair_rising: u32,
    pub stair_flat: u32,
    pub stair_falling: u32,
    pub stair_step_rate: u32,
    pub frame_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: Params::GRAVITY,
            jump_strength: Params::JUMP_STRENGTH,
            max_jumps: Params::MAX_JUMPS,
            fly_drag: Params::FLY_DRAG,
            base_speed: Params::BASE_SPEED,
            speed_step_every: Params::SPEED_STEP_EVERY,
            min_separation: Params::MIN_SEPARATION,
            random_separation: Params::RANDOM_SEPARATION,
            bird_probability: Params::BIRD_PROBABILITY,
            burst_min_score: Params::BURST_MIN_SCORE,
            burst_chance: Params::BURST_CHANCE,
            starting_lives: Params::STARTING_LIVES,
            invincibility_ticks: Params::INVINCIBILITY_TICKS,
            shield_every: Params::SHIELD_EVERY,
            starting_fireballs: Params::STARTING_FIREBALLS,
            fireball_refill: Params::FIREBALL_REFILL,
            fireball_refill_every: Params::FIREBALL_REFILL_EVERY,
            fireball_speed: Params::FIREBALL_SPEED,
            fireball_reach: Params::FIREBALL_REACH,
            staircase_score: Params::STAIRCASE_SCORE,
            stair_rising: Params::STAIR_RISING,
            stair_flat: Params::STAIR_FLAT,
            stair_falling: Params::STAIR_FALLING,
            stair_step_rate: Params::STAIR_STEP_RATE,
            frame_ms: Params::FRAME_MS,
        }
    }
}

impl Config {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> io::Result<()> {
        let problem = if !(self.gravity > 0.0) {
            Some("gravity must be positive")
        } else if !(self.jump_strength < 0.0) {
            Some("jump_strength must be negative")
        } else if !(0.0..=1.0).contains(&self.fly_drag) {
            Some("fly_drag must be within 0..=1")
        } else if self.base_speed < 1 {
            Some("base_speed must be at least 1")
        } else if self.fireball_speed < 1 {
            Some("fireball_speed must be at least 1")
        } else if !(0.0..=1.0).contains(&self.bird_probability) {
            Some("bird_probability must be within 0..=1")
        } else if self.speed_step_every == 0
            || self.shield_every == 0
            || self.fireball_refill_every == 0
        {
            Some("milestone intervals must be non-zero")
        } else if self.burst_chance == 0 {
            Some("burst_chance must be at least 1")
        } else if self.stair_step_rate == 0 {
            Some("stair_step_rate must be non-zero")
        } else if self.frame_ms == 0 {
            Some("frame_ms must be non-zero")
        } else {
            None
        };

        match problem {
            Some(msg) => Err(io::Error::new(io::ErrorKind::InvalidInput, msg)),
            None => Ok(()),
        }
    }

    /// Parse a (possibly partial) JSON config.
    pub fn from_json(text: &str) -> io::Result<Config> {
        let config: Config = serde_json::from_str(text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> io::Result<Config> {
        let text = std::fs::read_to_string(path)?;
        Config::from_json(&text)
    }
}

/// `$DINO_RUNNER_CONFIG`, else `~/.dino_runner.json`.
pub fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("DINO_RUNNER_CONFIG") {
        return PathBuf::from(p);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".dino_runner.json")
}

/// Load the user config, falling back to defaults when absent or broken.
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match Config::load(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring config {}: {}", path.display(), e);
            Config::default()
        }
    }
}
