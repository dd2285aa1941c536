//! The one-off staircase set-piece: rising, flat and falling runs of
//! stair blocks fed in from the right edge at a fixed cadence.

use crate::config::Config;
use crate::entities::{StairPhase, Staircase, TerrainBlock};

/// Blocks linger this many columns past the left edge before removal.
const OFFSCREEN_MARGIN: i32 = 5;

pub fn trigger(stairs: &mut Staircase, ground_y: i32) {
    stairs.active = true;
    stairs.triggered = true;
    stairs.timer = 0;
    stairs.stair_y = ground_y;
    stairs.blocks.clear();
    log::info!("Staircase event started");
}

pub fn phase(timer: u32, config: &Config) -> StairPhase {
    let rising_end = config.stair_rising;
    let flat_end = rising_end + config.stair_flat;
    let falling_end = flat_end + config.stair_falling;
    if timer < rising_end {
        StairPhase::Rising
    } else if timer < flat_end {
        StairPhase::Flat
    } else if timer < falling_end {
        StairPhase::Falling
    } else {
        StairPhase::Done
    }
}

/// Advance the event one tick.
pub fn step(stairs: &mut Staircase, speed: i32, right_edge: i32, config: &Config) {
    stairs.timer += 1;

    for block in stairs.blocks.iter_mut() {
        block.x -= speed;
    }
    stairs.blocks.retain(|b| b.x >= -OFFSCREEN_MARGIN);

    let current = phase(stairs.timer, config);
    if stairs.timer % config.stair_step_rate == 0 {
        match current {
            StairPhase::Rising => stairs.stair_y -= 1,
            StairPhase::Falling => stairs.stair_y += 1,
            StairPhase::Flat | StairPhase::Done => {}
        }
        if current != StairPhase::Done {
            stairs.blocks.push(TerrainBlock {
                x: right_edge,
                y: stairs.stair_y,
            });
        }
    }

    if current == StairPhase::Done && stairs.blocks.is_empty() {
        stairs.active = false;
        log::info!("Staircase event finished after {} ticks", stairs.timer);
    }
}
