//! Dino ↔ obstacle / stair-block overlap and hit bookkeeping.

use crate::entities::{Dino, GameState, Obstacle, Rect, TerrainBlock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// Index into `GameState::obstacles`.
    Obstacle(usize),
    Terrain,
}

/// Obstacle box widened to at least one scroll step so a fast obstacle
/// cannot skip over a body cell between ticks.
pub fn hit_rect(ob: &Obstacle, ground_y: i32, speed: i32) -> Rect {
    let r = ob.rect(ground_y);
    Rect { w: r.w.max(speed), ..r }
}

/// First thing the dino's body touches this tick, stair blocks first.
pub fn find_hit(
    dino: &Dino,
    obstacles: &[Obstacle],
    blocks: &[TerrainBlock],
    ground_y: i32,
    speed: i32,
) -> Option<Hit> {
    if dino
        .cells()
        .any(|(x, y)| blocks.iter().any(|b| b.x == x && b.y == y))
    {
        return Some(Hit::Terrain);
    }

    let body = dino.bounding_box();
    obstacles
        .iter()
        .enumerate()
        .filter(|(_, ob)| !ob.destroyed)
        .map(|(i, ob)| (i, hit_rect(ob, ground_y, speed)))
        .filter(|(_, r)| r.intersects(&body))
        .find(|(_, r)| dino.cells().any(|(x, y)| r.contains(x, y)))
        .map(|(i, _)| Hit::Obstacle(i))
}

/// Apply at most one hit.  Returns bonus points earned (a shield block).
pub fn resolve(state: &mut GameState) -> u32 {
    if state.dino.is_invincible() {
        return 0;
    }

    let blocks: &[TerrainBlock] = if state.staircase.active {
        &state.staircase.blocks
    } else {
        &[]
    };
    let hit = find_hit(
        &state.dino,
        &state.obstacles,
        blocks,
        state.ground_y,
        state.speed,
    );

    let Some(hit) = hit else {
        return 0;
    };

    state.dino.invincible_ticks = state.config.invincibility_ticks;

    match hit {
        Hit::Terrain => {
            state.dino.lives = state.dino.lives.saturating_sub(1);
            log::debug!("Hit a stair block, lives left: {}", state.dino.lives);
            0
        }
        Hit::Obstacle(i) => {
            let ob = &mut state.obstacles[i];
            ob.destroyed = true;
            ob.passed = true;
            if state.dino.shield {
                state.dino.shield = false;
                log::debug!("Shield absorbed a hit");
                1
            } else {
                state.dino.lives = state.dino.lives.saturating_sub(1);
                log::debug!("Hit an obstacle, lives left: {}", state.dino.lives);
                0
            }
        }
    }
}
