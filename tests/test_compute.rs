use dino_runner::compute::*;
use dino_runner::config::Config;
use dino_runner::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A playing session with an empty field and spawning switched off.
fn playing_state(config: Config, width: u16, height: u16) -> GameState {
    let mut s = init_state(config, width, height, 0, &mut seeded_rng());
    s.status = GameStatus::Playing;
    s.obstacles.clear();
    s.next_spawn_at = u32::MAX;
    s
}

fn make_state() -> GameState {
    // ground_y = 30, dino feet on row 29, right edge 79
    playing_state(Config::default(), 80, 40)
}

/// An obstacle flying overhead: scores when passed, never hits.
fn overhead_bird(x: i32) -> Obstacle {
    Obstacle::bird(x, BirdAltitude::High)
}

// ── init_state / start / restart ─────────────────────────────────────────────

#[test]
fn init_state_waits_ready_with_one_obstacle() {
    let s = init_state(Config::default(), 80, 40, 7, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::Ready);
    assert_eq!(s.ground_y, 30);
    assert_eq!(s.obstacles.len(), 1);
    assert_eq!(s.obstacles[0].x, 79);
    assert_eq!(s.dino.y, 29.0);
    assert!(s.dino.grounded);
    assert_eq!(s.dino.lives, 3);
    assert_eq!(s.fireballs, 3);
    assert_eq!(s.high_score, 7);
    assert_eq!(s.score, 0);
}

#[test]
fn tick_in_ready_is_noop() {
    let s = init_state(Config::default(), 80, 40, 0, &mut seeded_rng());
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.frame, 0);
    assert_eq!(s2.obstacles, s.obstacles);
}

#[test]
fn start_moves_ready_to_playing() {
    let s = init_state(Config::default(), 80, 40, 0, &mut seeded_rng());
    let s2 = start(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s.status, GameStatus::Ready); // original untouched
}

#[test]
fn restart_keeps_high_score_and_resets_the_rest() {
    let mut s = make_state();
    s.score = 40;
    s.high_score = 55;
    s.dino.lives = 0;
    s.status = GameStatus::GameOver;
    s.weapons.push(Weapon { x: 30, y: 20, used: false });
    s.staircase.triggered = true;
    s.speed = 3;

    let s2 = restart(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.high_score, 55);
    assert_eq!(s2.dino.lives, 3);
    assert_eq!(s2.speed, 1);
    assert!(s2.weapons.is_empty());
    assert!(!s2.staircase.triggered);
    assert_eq!(s2.obstacles.len(), 1);
}

#[test]
fn resize_keeps_the_run_and_moves_the_ground() {
    let mut s = make_state();
    s.score = 12;
    s.dino.lives = 2;
    s.weapons.push(Weapon { x: 30, y: 26, used: false });
    s.staircase.stair_y = 29;
    s.staircase.blocks.push(TerrainBlock { x: 40, y: 29 });
    s.parallax.far_offset = -70;

    let r = resize(&s, 60, 20);
    assert_eq!(r.status, GameStatus::Playing);
    assert_eq!((r.width, r.height, r.ground_y), (60, 20, 15));
    assert_eq!(r.score, 12);
    assert_eq!(r.dino.lives, 2);
    assert_eq!(r.dino.y, 14.0);
    assert_eq!(r.weapons[0].y, 11);
    assert_eq!(r.staircase.stair_y, 14);
    assert_eq!(r.staircase.blocks[0], TerrainBlock { x: 40, y: 14 });
    assert_eq!(r.parallax.far_offset, -10);

    let after = tick(&r, &mut seeded_rng());
    assert!(after.dino.grounded);
    assert_eq!(after.dino.y, 14.0);
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_toggles_and_freezes() {
    let s = make_state();
    let paused = toggle_pause(&s);
    assert_eq!(paused.status, GameStatus::Paused);

    let still = tick(&paused, &mut seeded_rng());
    assert_eq!(still.frame, paused.frame);

    let resumed = toggle_pause(&paused);
    assert_eq!(resumed.status, GameStatus::Playing);
}

#[test]
fn pause_ignored_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    assert_eq!(toggle_pause(&s).status, GameStatus::GameOver);
}

// ── Jumping ───────────────────────────────────────────────────────────────────

#[test]
fn jump_from_ground_sets_strength() {
    let s = make_state();
    let s2 = jump(&s);
    assert_eq!(s2.dino.vy, Config::default().jump_strength);
    assert!(!s2.dino.grounded);
    assert_eq!(s2.dino.jumps_used, 1);
}

#[test]
fn double_jump_then_no_more() {
    let s = make_state();
    let s2 = tick(&jump(&s), &mut seeded_rng());
    let s3 = jump(&s2);
    assert_eq!(s3.dino.vy, Config::default().jump_strength);
    assert_eq!(s3.dino.jumps_used, 2);

    let s4 = tick(&s3, &mut seeded_rng());
    let s5 = jump(&s4);
    assert_eq!(s5.dino.vy, s4.dino.vy); // third press ignored
    assert_eq!(s5.dino.jumps_used, 2);
}

#[test]
fn jump_ignored_when_not_playing() {
    let mut s = make_state();
    s.status = GameStatus::Paused;
    let s2 = jump(&s);
    assert!(s2.dino.grounded);
}

#[test]
fn jump_arc_with_strength_18_gravity_1() {
    let cfg = Config {
        gravity: 1.0,
        jump_strength: -18.0,
        ..Config::default()
    };
    let mut s = playing_state(cfg, 80, 800);
    let ground_feet = (s.ground_y - 1) as f32;
    s = jump(&s);
    let mut rng = seeded_rng();

    let mut highest = ground_feet;
    for t in 1..=36 {
        let before = s.dino.clone();
        s = tick(&s, &mut rng);

        if !s.dino.grounded {
            // velocity gains exactly one gravity step before moving
            assert_eq!(s.dino.vy, before.vy + 1.0, "tick {}", t);
            assert_eq!(s.dino.y, before.y + s.dino.vy, "tick {}", t);
        }
        highest = highest.min(s.dino.y);

        if t == 18 {
            assert_eq!(s.dino.vy, 0.0);
            assert_eq!(s.dino.y, ground_feet - 153.0);
        }
        if t == 34 {
            assert!(!s.dino.grounded);
        }
    }

    assert_eq!(highest, ground_feet - 153.0);
    assert!(s.dino.grounded);
    assert_eq!(s.dino.vy, 0.0);
    assert_eq!(s.dino.y, ground_feet);
    assert_eq!(s.dino.jumps_used, 0);
}

// ── Flying cheat ──────────────────────────────────────────────────────────────

#[test]
fn flying_disables_gravity_and_fills_ammo() {
    let s = toggle_flying(&make_state());
    assert!(s.dino.flying);
    assert_eq!(s.fireballs, 99);

    let s2 = tick(&jump(&s), &mut seeded_rng());
    // boost is half the jump strength, then drag
    assert!((s2.dino.vy - (-0.8 * 0.9)).abs() < 1e-5);
    assert!(s2.dino.y < 29.0);

    let s3 = toggle_flying(&s2);
    assert!(!s3.dino.flying);
}

// ── Obstacles & scoring ──────────────────────────────────────────────────────

#[test]
fn obstacle_crosses_800_columns_in_160_ticks() {
    let cfg = Config {
        base_speed: 5,
        ..Config::default()
    };
    let mut s = playing_state(cfg, 800, 40);
    let mut post = overhead_bird(800);
    post.width = 1;
    s.obstacles.push(post);
    let mut rng = seeded_rng();

    for _ in 0..159 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.obstacles.len(), 1);
    assert_eq!(s.obstacles[0].x, 5);

    // tick 160: x = 0, right edge 0
    s = tick(&s, &mut rng);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score, 1);
}

#[test]
fn score_once_per_obstacle_passed() {
    let mut s = make_state();
    s.obstacles.push(overhead_bird(11));
    s.obstacles.push(overhead_bird(14));
    let mut rng = seeded_rng();

    let mut scores = Vec::new();
    for _ in 0..8 {
        s = tick(&s, &mut rng);
        scores.push(s.score);
    }
    // first bird passes on tick 2, second on tick 5
    assert_eq!(scores, vec![0, 1, 1, 1, 2, 2, 2, 2]);
    assert_eq!(s.high_score, 2);
}

#[test]
fn spawn_after_threshold_at_right_edge() {
    let mut s = make_state();
    s.next_spawn_at = 0;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.obstacles[0].x, 79);
    assert_eq!(s2.spawn_timer, 0);
    assert!((25..45).contains(&s2.next_spawn_at));
}

#[test]
fn no_spawn_before_threshold() {
    let mut s = make_state();
    s.next_spawn_at = 30;
    s.spawn_timer = 29;
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.obstacles.is_empty());
    assert_eq!(s2.spawn_timer, 30);
}

// ── Collisions ────────────────────────────────────────────────────────────────

#[test]
fn hit_costs_a_life_and_starts_invincibility() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::cactus(11, 1, 4)); // reaches the dino next tick
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.dino.lives, 2);
    assert_eq!(s2.dino.invincible_ticks, 49);
    assert!(s2.obstacles[0].destroyed);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn invincible_dino_takes_no_damage() {
    let mut s = make_state();
    s.dino.invincible_ticks = 10;
    s.obstacles.push(Obstacle::cactus(11, 1, 4));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.dino.lives, 3);
    assert_eq!(s2.dino.invincible_ticks, 9);
    assert!(!s2.obstacles[0].destroyed);
}

#[test]
fn invincibility_runs_out() {
    let mut s = make_state();
    s.dino.invincible_ticks = 2;
    let mut rng = seeded_rng();
    s = tick(&s, &mut rng);
    assert!(s.dino.is_invincible());
    s = tick(&s, &mut rng);
    assert!(!s.dino.is_invincible());
}

#[test]
fn shield_absorbs_one_hit() {
    let mut s = make_state();
    s.dino.shield = true;
    s.obstacles.push(Obstacle::cactus(11, 1, 4));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.dino.lives, 3);
    assert!(!s2.dino.shield);
    assert_eq!(s2.score, 1);
    assert!(s2.dino.is_invincible());
}

#[test]
fn last_life_ends_the_game() {
    let mut s = make_state();
    s.dino.lives = 1;
    s.obstacles.push(Obstacle::cactus(11, 1, 4));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.dino.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);

    let s3 = tick(&s2, &mut seeded_rng());
    assert_eq!(s3.frame, s2.frame);
}

#[test]
fn jumping_clears_a_cactus() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::cactus(20, 1, 4));
    s = jump(&s);
    let mut rng = seeded_rng();
    for _ in 0..20 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.dino.lives, 3);
    assert_eq!(s.score, 1);
}

// ── Fireballs ─────────────────────────────────────────────────────────────────

#[test]
fn fire_spends_ammo() {
    let s = make_state();
    let s2 = fire(&s);
    assert_eq!(s2.fireballs, 2);
    assert_eq!(s2.weapons, vec![Weapon { x: 12, y: 26, used: false }]);
}

#[test]
fn fire_without_ammo_does_nothing() {
    let mut s = make_state();
    s.fireballs = 0;
    let s2 = fire(&s);
    assert!(s2.weapons.is_empty());
}

#[test]
fn fireball_destroys_obstacle_and_scores() {
    let mut s = make_state();
    s.obstacles.push(Obstacle::cactus(30, 1, 7));
    s = fire(&s);
    let mut rng = seeded_rng();
    for _ in 0..10 {
        s = tick(&s, &mut rng);
    }
    assert!(s.obstacles.iter().all(|o| o.destroyed));
    assert!(s.weapons.is_empty());
    assert_eq!(s.score, 1);
    assert_eq!(s.dino.lives, 3);
}

// ── Milestones ────────────────────────────────────────────────────────────────

fn pass_one_at(score: u32) -> GameState {
    let mut s = make_state();
    s.score = score;
    s.obstacles.push(overhead_bird(10));
    tick(&s, &mut seeded_rng())
}

#[test]
fn speed_increases_every_25() {
    let s = pass_one_at(24);
    assert_eq!(s.score, 25);
    assert_eq!(s.speed, 2);
}

#[test]
fn shield_granted_every_15() {
    let s = pass_one_at(14);
    assert!(s.dino.shield);
    let s = pass_one_at(15);
    assert!(!s.dino.shield);
}

#[test]
fn fireballs_refilled_every_10() {
    let s = pass_one_at(9);
    assert_eq!(s.fireballs, 6);
}

#[test]
fn staircase_triggers_at_100_once() {
    let s = pass_one_at(99);
    assert!(s.staircase.active);
    assert!(s.staircase.triggered);
    assert_eq!(s.staircase.stair_y, s.ground_y);

    let mut again = make_state();
    again.score = 99;
    again.staircase.triggered = true;
    again.obstacles.push(overhead_bird(10));
    let again = tick(&again, &mut seeded_rng());
    assert!(!again.staircase.active);
}

#[test]
fn staircase_holds_back_regular_spawns() {
    let mut s = make_state();
    s.staircase.active = true;
    s.staircase.triggered = true;
    s.staircase.stair_y = s.ground_y;
    s.next_spawn_at = 0;
    s.spawn_timer = 100;
    let mut rng = seeded_rng();
    for _ in 0..20 {
        s = tick(&s, &mut rng);
    }
    assert!(s.obstacles.is_empty());
    assert_eq!(s.spawn_timer, 0);
    assert_eq!(s.staircase.blocks.len(), 2);
}

#[test]
fn running_into_a_stair_block_costs_a_life() {
    let mut s = make_state();
    s.staircase.active = true;
    s.staircase.triggered = true;
    s.staircase.stair_y = 27;
    // scrolls onto the body row at (10, 27) this tick
    s.staircase.blocks.push(TerrainBlock { x: 11, y: 27 });

    let s = tick(&s, &mut seeded_rng());
    assert_eq!(s.dino.lives, 2);
    assert_eq!(s.dino.invincible_ticks, 49);
}

#[test]
fn leftover_blocks_are_harmless_once_the_staircase_ends() {
    let mut s = make_state();
    s.staircase.triggered = true;
    s.staircase.blocks.push(TerrainBlock { x: 10, y: 27 });

    let s = tick(&s, &mut seeded_rng());
    assert_eq!(s.dino.lives, 3);
    assert_eq!(s.dino.invincible_ticks, 0);
}

#[test]
fn dino_lands_on_a_stair_block_then_walks_off() {
    let cfg = Config {
        gravity: 1.0,
        ..Config::default()
    };
    let mut s = playing_state(cfg, 80, 40);
    s.staircase.active = true;
    s.staircase.triggered = true;
    s.staircase.stair_y = 26;
    s.staircase.blocks.push(TerrainBlock { x: 13, y: 26 });
    s.dino.y = 20.0;
    s.dino.grounded = false;
    let mut rng = seeded_rng();

    // feet 21, 23, then cross the block top (row 25) as it reaches x=10
    for _ in 0..3 {
        s = tick(&s, &mut rng);
    }
    assert!(s.dino.grounded);
    assert_eq!(s.dino.y, 25.0);
    assert_eq!(s.dino.vy, 0.0);
    assert_eq!(s.dino.jumps_used, 0);

    // block slides under the back foot, then out from under the dino
    for _ in 0..10 {
        s = tick(&s, &mut rng);
    }
    assert!(s.dino.grounded);
    assert_eq!(s.dino.y, 29.0);
    assert_eq!(s.dino.lives, 3);
}

// ── Whole-session properties ──────────────────────────────────────────────────

fn autoplay(seed: u64, ticks: u32) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut s = start(&init_state(Config::default(), 100, 40, 0, &mut rng));
    for t in 0..ticks {
        if t % 17 == 0 {
            s = jump(&s);
        }
        if t % 45 == 0 {
            s = fire(&s);
        }
        s = tick(&s, &mut rng);
    }
    s
}

#[test]
fn same_seed_same_game() {
    let a = autoplay(9, 600);
    let b = autoplay(9, 600);
    assert_eq!(a.score, b.score);
    assert_eq!(a.dino, b.dino);
    assert_eq!(a.obstacles, b.obstacles);
    assert_eq!(a.status, b.status);
}

#[test]
fn long_run_invariants() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut s = start(&init_state(Config::default(), 100, 40, 0, &mut rng));
    let mut last_score = 0;
    let mut last_lives = s.dino.lives;
    for t in 0..3_000 {
        if t % 13 == 0 {
            s = jump(&s);
        }
        s = tick(&s, &mut rng);

        assert!(s.score >= last_score);
        assert!(s.dino.lives <= last_lives);
        assert!(s.dino.y <= (s.ground_y - 1) as f32);
        assert!(s.obstacles.iter().all(|o| !o.is_off_screen()));
        assert!(s.high_score >= s.score);
        if s.dino.grounded {
            assert_eq!(s.dino.vy, 0.0);
        }
        last_score = s.score;
        last_lives = s.dino.lives;

        if s.status == GameStatus::GameOver {
            assert_eq!(s.dino.lives, 0);
            break;
        }
    }
}
