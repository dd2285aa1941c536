//! Terminal drawing for the runner.
//!
//! `render` paints one frame from a `GameState` snapshot: backdrop, ground,
//! obstacles, stairs, fireballs, the dino, HUD and overlays.  It reads the
//! state and never changes it.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dino_runner::entities::{GameState, GameStatus, ObstacleKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_GROUND: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_AMMO: Color = Color::DarkYellow;
const C_DINO: Color = Color::Green;
const C_SHIELD: Color = Color::Cyan;
const C_CACTUS: Color = Color::DarkGreen;
const C_BIRD: Color = Color::Grey;
const C_STAIR: Color = Color::DarkGrey;
const C_FIREBALL: Color = Color::DarkYellow;
const C_SUN: Color = Color::Yellow;
const C_MOUNTAIN_FAR: Color = Color::DarkBlue;
const C_MOUNTAIN_NEAR: Color = Color::DarkCyan;
const C_HINT: Color = Color::DarkGrey;

const SHIELD_RADIUS: i32 = 5;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, state)?;
    draw_ground(out, state)?;

    for ob in state.obstacles.iter().filter(|o| !o.destroyed) {
        let r = ob.rect(state.ground_y);
        match ob.kind {
            ObstacleKind::Cactus => {
                for y in r.y..=r.bottom() {
                    put(out, state, r.x, y, &"█".repeat(r.w as usize), C_CACTUS)?;
                }
            }
            ObstacleKind::Bird(_) => {
                put(out, state, r.x, r.y, "\\v/", C_BIRD)?;
                put(out, state, r.x, r.bottom(), "<^>", C_BIRD)?;
            }
        }
    }

    for block in &state.staircase.blocks {
        put(out, state, block.x, block.y, "▓", C_STAIR)?;
    }

    for w in state.weapons.iter().filter(|w| !w.used) {
        put(out, state, w.x, w.y, "@~~~", C_FIREBALL)?;
    }

    draw_dino(out, state)?;
    draw_hud(out, state)?;
    draw_controls_hint(out, state)?;

    match state.status {
        GameStatus::Ready => draw_ready(out, state)?,
        GameStatus::Paused => draw_banner(out, state, &[("PAUSED", Color::White)])?,
        GameStatus::GameOver => draw_game_over(out, state)?,
        GameStatus::Playing => {}
    }

    // Park the cursor on the hint row.
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Print `text` at a world cell, clipping anything outside the terminal.
fn put<W: Write>(
    out: &mut W,
    state: &GameState,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if y < 0 || y >= state.height as i32 || x >= state.width as i32 {
        return Ok(());
    }
    // Drop the part of the string left of column 0.
    let skip = (-x).max(0) as usize;
    let visible: String = text.chars().skip(skip).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(x.max(0) as u16, y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(visible))?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let world = state.width as i32;
    let ground = state.ground_y;
    let headroom = (ground - 3).max(1);

    // Static sun, a quarter of the way across.
    let (sx, sy, radius) = (world / 4, (ground - 14).max(3), 2);
    for dx in -radius * 2..=radius * 2 {
        for dy in -radius..=radius {
            // Cells are twice as tall as they are wide.
            if (dx * dx) / 4 + dy * dy <= radius * radius {
                put(out, state, sx + dx, sy + dy, "●", C_SUN)?;
            }
        }
    }

    // Far layer: taller peaks, slower. Near layer: lower, faster.
    draw_mountain_layer(out, state, true, (headroom / 2).min(9), 0.35)?;
    draw_mountain_layer(out, state, false, (headroom / 3).min(6), 0.6)?;
    Ok(())
}

/// One triangular mountain, tiled twice so scrolling wraps seamlessly.
fn draw_mountain_layer<W: Write>(
    out: &mut W,
    state: &GameState,
    far: bool,
    peak_height: i32,
    peak_frac: f32,
) -> std::io::Result<()> {
    let world = state.width as i32;
    let half = (world / 2).max(1);
    let (offset, glyph, color) = if far {
        (state.parallax.far_offset, "░", C_MOUNTAIN_FAR)
    } else {
        (state.parallax.near_offset, "▒", C_MOUNTAIN_NEAR)
    };

    for tile in 0..=1 {
        let peak_x = (peak_frac * world as f32) as i32 + offset + tile * world;
        for x in (peak_x - half)..=(peak_x + half) {
            let dist = (x - peak_x).abs();
            let h = peak_height - (dist * peak_height) / half;
            for yy in 0..h {
                put(out, state, x, state.ground_y - 1 - yy, glyph, color)?;
            }
        }
    }
    Ok(())
}

fn draw_ground<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let line = "▀".repeat(state.width as usize);
    put(out, state, 0, state.ground_y, &line, C_GROUND)
}

// ── Dino ──────────────────────────────────────────────────────────────────────

fn draw_dino<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let dino = &state.dino;

    // Flicker while invincible.
    if !dino.is_invincible() || dino.invincible_ticks % 10 < 5 {
        for (x, y) in dino.cells() {
            put(out, state, x, y, "█", C_DINO)?;
        }
    }

    if dino.shield {
        let (cx, cy) = (dino.x - 1, dino.feet_row() - 3);
        let r_sq = SHIELD_RADIUS * SHIELD_RADIUS;
        for dx in -SHIELD_RADIUS..=SHIELD_RADIUS {
            for dy in -SHIELD_RADIUS..=SHIELD_RADIUS {
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= r_sq - SHIELD_RADIUS && dist_sq <= r_sq + SHIELD_RADIUS {
                    put(out, state, cx + dx, cy + dy, "·", C_SHIELD)?;
                }
            }
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    put(
        out,
        state,
        1,
        0,
        &format!("Score: {:>6}   Best: {:>6}", state.score, state.high_score),
        C_HUD_SCORE,
    )?;

    let hearts = "♥".repeat(state.dino.lives as usize);
    let lives_text = format!("Lives: {}", hearts);
    let ammo_text = format!("Fireballs: {}", state.fireballs);
    let shield_text = if state.dino.shield { "[SHIELD]" } else { "" };

    let right = format!("{}  {}  {}", shield_text, ammo_text, lives_text);
    let rx = state.width as i32 - right.chars().count() as i32 - 1;
    put(out, state, rx, 0, shield_text, C_SHIELD)?;
    let ammo_x = rx + shield_text.chars().count() as i32 + 2;
    put(out, state, ammo_x, 0, &ammo_text, C_HUD_AMMO)?;
    let lives_x = ammo_x + ammo_text.chars().count() as i32 + 2;
    put(out, state, lives_x, 0, &lives_text, C_HUD_LIVES)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    put(
        out,
        state,
        1,
        state.height as i32 - 1,
        "SPACE : Jump   ENTER : Fire   P : Pause   F : Fly   Q : Quit",
        C_HINT,
    )
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    state: &GameState,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = state.width as i32 / 2;
    let start_row = (state.height as i32 / 3) - lines.len() as i32 / 2;

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx - msg.chars().count() as i32 / 2;
        put(out, state, col, start_row + i as i32, msg, *color)?;
    }
    Ok(())
}

fn draw_ready<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let best = format!("Best Score: {}", state.high_score);
    let lines: &[(&str, Color)] = &[
        ("★  DINO  RUNNER  ★", Color::Cyan),
        (best.as_str(), Color::Yellow),
        ("Press SPACE to start", Color::White),
    ];
    draw_banner(out, state, lines)
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("SPACE - Play Again  Q - Quit", Color::White),
    ];
    draw_banner(out, state, lines)
}
