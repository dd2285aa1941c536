//! Game entity types: plain data plus a few geometry accessors.
//!
//! World coordinates are terminal cells: `x` grows rightward, `y` grows
//! downward.  Every entity shares the single ground row `GameState::ground_y`;
//! things standing on the ground occupy the row just above it.

use crate::config::Config;

/// Column of the dino's front foot.  The dino never moves horizontally.
pub const DINO_X: i32 = 10;

/// Rows reserved for the HUD at the top of the field.
pub const HUD_ROWS: i32 = 2;

/// Dino body as (dx, dy) offsets from the front foot.
pub const DINO_SHAPE: [(i32, i32); 16] = [
    // head
    (1, -6),
    (0, -6),
    (1, -5),
    (0, -5),
    // neck
    (0, -4),
    (0, -3),
    // body
    (-3, -2),
    (-2, -2),
    (-1, -2),
    (0, -2),
    // tail
    (-4, -1),
    (-3, -1),
    (-2, -1),
    (-1, -1),
    // legs
    (-2, 0),
    (0, 0),
];

pub const BIRD_WIDTH: i32 = 3;
pub const BIRD_HEIGHT: i32 = 2;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box of cells.  `right()` and `bottom()` are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h - 1
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

// ── Game status ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for the first Space press.
    Ready,
    Playing,
    Paused,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Dino {
    pub x: i32,
    /// Row of the feet.  Fractional so small velocities accumulate.
    pub y: f32,
    /// Vertical velocity in rows per tick (negative = up).
    pub vy: f32,
    pub grounded: bool,
    /// Jumps spent since last landing; compared against `Config::max_jumps`.
    pub jumps_used: u32,
    pub lives: u32,
    /// Ticks left in the invincibility window.
    pub invincible_ticks: u32,
    pub shield: bool,
    pub flying: bool,
}

impl Dino {
    /// A fresh dino standing on the ground.
    pub fn new(ground_y: i32, lives: u32) -> Self {
        Dino {
            x: DINO_X,
            y: (ground_y - 1) as f32,
            vy: 0.0,
            grounded: true,
            jumps_used: 0,
            lives,
            invincible_ticks: 0,
            shield: false,
            flying: false,
        }
    }

    pub fn feet_row(&self) -> i32 {
        self.y.round() as i32
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Absolute cells occupied by the body.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let feet = self.feet_row();
        DINO_SHAPE
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, feet + dy))
    }

    pub fn bounding_box(&self) -> Rect {
        let feet = self.feet_row();
        Rect::new(self.x - 4, feet - 6, 6, 7)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// Gap between the ground and a bird's lowest row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BirdAltitude {
    /// Skims the dino's legs.
    Low,
    /// Head height.
    Mid,
    /// Passes overhead.
    High,
}

impl BirdAltitude {
    pub fn clearance(&self) -> i32 {
        match self {
            BirdAltitude::Low => 1,
            BirdAltitude::Mid => 4,
            BirdAltitude::High => 8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Cactus,
    Bird(BirdAltitude),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: i32,
    pub width: i32,
    pub height: i32,
    pub kind: ObstacleKind,
    /// Already scored (or destroyed); never counts again.
    pub passed: bool,
    /// Hit by a fireball or the dino; harmless and invisible until it scrolls off.
    pub destroyed: bool,
}

impl Obstacle {
    pub fn cactus(x: i32, width: i32, height: i32) -> Self {
        Obstacle {
            x,
            width,
            height,
            kind: ObstacleKind::Cactus,
            passed: false,
            destroyed: false,
        }
    }

    pub fn bird(x: i32, altitude: BirdAltitude) -> Self {
        Obstacle {
            x,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            kind: ObstacleKind::Bird(altitude),
            passed: false,
            destroyed: false,
        }
    }

    pub fn rect(&self, ground_y: i32) -> Rect {
        let bottom = match self.kind {
            ObstacleKind::Cactus => ground_y - 1,
            ObstacleKind::Bird(alt) => ground_y - 1 - alt.clearance(),
        };
        Rect::new(self.x, bottom - self.height + 1, self.width, self.height)
    }

    /// Gone once the right edge reaches the left boundary.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width - 1 <= 0
    }
}

// ── Fireballs ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub x: i32,
    pub y: i32,
    pub used: bool,
}

// ── Staircase event ───────────────────────────────────────────────────────────

/// One stair cell.  Solid: it can be stood on and it hurts to run into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainBlock {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StairPhase {
    Rising,
    Flat,
    Falling,
    Done,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Staircase {
    pub active: bool,
    /// Set on first trigger; the event runs once per game.
    pub triggered: bool,
    /// Ticks since the event started.
    pub timer: u32,
    /// Row of the most recently spawned block.
    pub stair_y: i32,
    pub blocks: Vec<TerrainBlock>,
}

// ── Background ────────────────────────────────────────────────────────────────

/// Two mountain layers scrolling at different rates.  Offsets are in
/// columns and wrap at the field width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parallax {
    pub far_offset: i32,
    pub near_offset: i32,
    pub far_speed: i32,
    pub near_speed: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game session.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub dino: Dino,
    /// Oldest first.
    pub obstacles: Vec<Obstacle>,
    pub weapons: Vec<Weapon>,
    pub staircase: Staircase,
    pub parallax: Parallax,
    pub score: u32,
    /// Best score seen so far (updated live during play).
    pub high_score: u32,
    pub fireballs: u32,
    /// Current scroll speed in columns per tick.
    pub speed: i32,
    pub spawn_timer: u32,
    /// Spawn once `spawn_timer` exceeds this.
    pub next_spawn_at: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: u16,
    pub height: u16,
    pub ground_y: i32,
    pub config: Config,
}

impl GameState {
    /// Column where new obstacles and stair blocks appear.
    pub fn right_edge(&self) -> i32 {
        self.width as i32 - 1
    }
}
