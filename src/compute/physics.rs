//! Jump and gravity integration, scroll speed, parallax.

use crate::config::Config;
use crate::entities::{Dino, Parallax, TerrainBlock, HUD_ROWS};

/// Highest feet row while flying: keeps the head below the HUD.
pub const FLY_CEILING: i32 = HUD_ROWS + 6;

/// Feet columns that can rest on a stair block.
fn under_feet(block: &TerrainBlock, dino_x: i32) -> bool {
    block.x == dino_x || block.x == dino_x - 1 || block.x == dino_x - 2
}

/// Start a jump (or a flying boost).  Returns `false` when no jump is left.
pub fn apply_jump(dino: &mut Dino, config: &Config) -> bool {
    if dino.flying {
        dino.vy = config.jump_strength * 0.5;
        return true;
    }
    if dino.jumps_used >= config.max_jumps {
        return false;
    }
    dino.jumps_used += 1;
    dino.grounded = false;
    dino.vy = config.jump_strength;
    true
}

/// Toggle the fly cheat.  Leaving flight hands the dino back to gravity.
pub fn set_flying(dino: &mut Dino, flying: bool) {
    dino.flying = flying;
    dino.vy = 0.0;
    if flying {
        dino.grounded = false;
    }
}

/// Whether the dino is currently standing on something solid.
fn supported(dino: &Dino, ground_y: i32, blocks: &[TerrainBlock]) -> bool {
    let feet = dino.feet_row();
    feet >= ground_y - 1
        || blocks
            .iter()
            .any(|b| under_feet(b, dino.x) && b.y - 1 == feet)
}

/// Advance the dino one tick.
///
/// Airborne: velocity gains gravity first, then moves the feet.  Landing
/// snaps to the ground row (or the top of a stair block crossed while
/// falling), zeroes velocity and restores the jump tokens.
pub fn step_dino(dino: &mut Dino, ground_y: i32, blocks: &[TerrainBlock], config: &Config) {
    let floor = (ground_y - 1) as f32;

    if dino.flying {
        dino.vy *= config.fly_drag;
        dino.y += dino.vy;
        if dino.y < FLY_CEILING as f32 {
            dino.y = FLY_CEILING as f32;
            dino.vy = 0.0;
        }
        if dino.y >= floor {
            dino.y = floor;
            dino.vy = 0.0;
        }
        return;
    }

    // Walked off a stair block.
    if dino.grounded && !supported(dino, ground_y, blocks) {
        dino.grounded = false;
        dino.vy = 0.0;
    }

    if dino.grounded {
        return;
    }

    dino.vy += config.gravity;
    let prev = dino.y;
    dino.y += dino.vy;

    let mut landing = floor;
    if dino.vy > 0.0 {
        if let Some(block) = blocks.iter().find(|b| {
            let top = (b.y - 1) as f32;
            under_feet(b, dino.x) && dino.y >= top && prev < top
        }) {
            landing = (block.y - 1) as f32;
        }
    }

    if dino.y >= landing {
        dino.y = landing;
        dino.vy = 0.0;
        dino.grounded = true;
        dino.jumps_used = 0;
    }
}

/// Base speed plus one column per tick for every `speed_step_every` points.
pub fn scroll_speed(score: u32, config: &Config) -> i32 {
    config.base_speed + (score / config.speed_step_every) as i32
}

/// Far layer at half the scroll speed, near layer at full speed.
pub fn step_parallax(parallax: &mut Parallax, speed: i32, world_width: i32) {
    parallax.far_speed = (speed / 2).max(1);
    parallax.near_speed = speed.max(1);
    parallax.far_offset -= parallax.far_speed;
    parallax.near_offset -= parallax.near_speed;
    if world_width > 0 {
        if parallax.far_offset <= -world_width {
            parallax.far_offset += world_width;
        }
        if parallax.near_offset <= -world_width {
            parallax.near_offset += world_width;
        }
    }
}
