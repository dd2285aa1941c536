//! Fireballs: fired from the dino's chest, fly right, burn one obstacle.

use crate::config::Config;
use crate::entities::{Dino, Obstacle, Weapon};

/// Fire one fireball if any ammo is left.
pub fn spawn_fireball(dino: &Dino, ammo: &mut u32, weapons: &mut Vec<Weapon>) -> bool {
    if *ammo == 0 {
        return false;
    }
    weapons.push(Weapon {
        x: dino.x + 2,
        y: dino.feet_row() - 3,
        used: false,
    });
    *ammo -= 1;
    log::debug!("Fired! Remaining: {}", ammo);
    true
}

/// Move fireballs, resolve impacts, drop spent ones.  Returns the number of
/// obstacles destroyed.
pub fn advance_fireballs(
    weapons: &mut Vec<Weapon>,
    obstacles: &mut [Obstacle],
    ground_y: i32,
    right_edge: i32,
    config: &Config,
) -> u32 {
    let mut destroyed = 0;

    for w in weapons.iter_mut().filter(|w| !w.used) {
        w.x += config.fireball_speed;
        if w.x > right_edge + 5 {
            w.used = true;
            continue;
        }

        let target = obstacles.iter_mut().find(|ob| {
            if ob.destroyed {
                return false;
            }
            let r = ob.rect(ground_y);
            w.x >= ob.x && w.x <= ob.x + config.fireball_reach && w.y >= r.y && w.y <= r.bottom()
        });

        if let Some(ob) = target {
            ob.destroyed = true;
            ob.passed = true;
            w.used = true;
            destroyed += 1;
            log::debug!("Fireball destroyed obstacle at x={}", ob.x);
        }
    }

    weapons.retain(|w| !w.used);
    destroyed
}
