/// Game entity types: plain data plus the geometry predicates the simulation
/// runs against. The character state machine lives in `character`, enemy
/// decision making in `ai`.

use crate::ai::AiController;
use crate::animation::{self, LADDER_TILES, PLATFORM_TILES};
use crate::character::{Character, CharacterState};
use crate::constants::{
    ANIMATION_FRAME_TICKS, CHARACTER_VX, CLIMB_SPEED, DEFAULT_ENEMY_HEALTH,
    DEFAULT_PLAYER_HEALTH, SWOOSH_HEIGHT, SWOOSH_VX, SWOOSH_WIDTH, TILE_DEST_HEIGHT,
    TILE_DEST_WIDTH,
};
use crate::error::{Axis, GameError, GameResult};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle anchored at its centre.
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

    pub fn left(&self) -> i32 {
        self.x - self.w / 2
    }

    pub fn right(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn top(&self) -> i32 {
        self.y - self.h / 2
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Strict overlap: rectangles sharing only an edge do not touch.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.bottom() > other.top()
            && self.top() < other.bottom()
            && self.right() > other.left()
            && self.left() < other.right()
    }
}

/// A cell on a sprite sheet, addressed by column and row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetCell {
    pub col: i32,
    pub row: i32,
}

impl SheetCell {
    pub const fn new(col: i32, row: i32) -> Self {
        SheetCell { col, row }
    }
}

// ── Platforms ─────────────────────────────────────────────────────────────────

/// Tile-sheet cells a platform is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformTiles {
    pub top_left: SheetCell,
    pub top_middle: SheetCell,
    pub top_right: SheetCell,
    pub mid_left: SheetCell,
    pub mid_middle: SheetCell,
    pub mid_right: SheetCell,
}

/// Overlay tile drawn on top of a platform, positioned relative to the
/// platform's top-left corner so it follows the platform when the world scrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoration {
    pub cell: SheetCell,
    pub dx: i32,
    pub dy: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    tiles: PlatformTiles,
    decorations: Vec<Decoration>,
}

impl Platform {
    pub const MIN_WIDTH: i32 = 3 * TILE_DEST_WIDTH;

    /// A grass-topped platform. Fails when narrower than three tiles, the
    /// minimum that fits both corner tiles and one middle tile.
    pub fn walkable(x: i32, y: i32, w: i32, h: i32) -> GameResult<Platform> {
        Self::with_tiles(x, y, w, h, PLATFORM_TILES)
    }

    pub fn with_tiles(x: i32, y: i32, w: i32, h: i32, tiles: PlatformTiles) -> GameResult<Platform> {
        if w < Self::MIN_WIDTH {
            return Err(GameError::PlatformTooNarrow {
                width: w,
                min: Self::MIN_WIDTH,
            });
        }
        Ok(Platform {
            x,
            y,
            w,
            h,
            tiles,
            decorations: Vec::new(),
        })
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn left(&self) -> i32 {
        self.rect().left()
    }

    pub fn right(&self) -> i32 {
        self.rect().right()
    }

    pub fn top(&self) -> i32 {
        self.rect().top()
    }

    pub fn tiles(&self) -> &PlatformTiles {
        &self.tiles
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn add_upper_left_decoration(&mut self, dx: i32, dy: i32) -> GameResult<()> {
        self.add_decoration(animation::DECORATION_UPPER_LEFT, dx, dy)
    }

    pub fn add_upper_middle_decoration(&mut self, dx: i32, dy: i32) -> GameResult<()> {
        self.add_decoration(animation::DECORATION_UPPER_MIDDLE, dx, dy)
    }

    pub fn add_upper_right_decoration(&mut self, dx: i32, dy: i32) -> GameResult<()> {
        self.add_decoration(animation::DECORATION_UPPER_RIGHT, dx, dy)
    }

    pub fn add_lower_middle_decoration(&mut self, dx: i32, dy: i32) -> GameResult<()> {
        self.add_decoration(animation::DECORATION_LOWER_MIDDLE, dx, dy)
    }

    /// Adds a decoration tile at (dx, dy) relative to the top-left corner.
    /// The whole tile has to fit inside the platform.
    fn add_decoration(&mut self, cell: SheetCell, dx: i32, dy: i32) -> GameResult<()> {
        let r = self.rect();
        if r.left() + dx + TILE_DEST_WIDTH > r.right() || dx < 0 {
            return Err(GameError::DecorationOutOfBounds {
                axis: Axis::X,
                offset: dx,
                limit: self.w,
            });
        }
        if r.top() + dy + TILE_DEST_HEIGHT > r.bottom() || dy < 0 {
            return Err(GameError::DecorationOutOfBounds {
                axis: Axis::Y,
                offset: dy,
                limit: self.h,
            });
        }
        self.decorations.push(Decoration { cell, dx, dy });
        Ok(())
    }

    /// Destination rectangle of a decoration in world coordinates.
    pub fn decoration_rect(&self, d: &Decoration) -> Rect {
        Rect::new(
            self.left() + d.dx + TILE_DEST_WIDTH / 2,
            self.top() + d.dy + TILE_DEST_HEIGHT / 2,
            TILE_DEST_WIDTH,
            TILE_DEST_HEIGHT,
        )
    }

    pub fn shift_x(&mut self, dx: i32) {
        self.x += dx;
    }
}

// ── Ladders ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LadderTiles {
    pub top: SheetCell,
    pub mid: SheetCell,
    pub bottom: SheetCell,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ladder {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    tiles: LadderTiles,
}

impl Ladder {
    pub const MIN_WIDTH: i32 = TILE_DEST_WIDTH;
    pub const MIN_HEIGHT: i32 = 2 * TILE_DEST_HEIGHT;

    pub fn new(x: i32, y: i32, w: i32, h: i32) -> GameResult<Ladder> {
        if w < Self::MIN_WIDTH {
            return Err(GameError::LadderTooNarrow {
                width: w,
                min: Self::MIN_WIDTH,
            });
        }
        if h < Self::MIN_HEIGHT {
            return Err(GameError::LadderTooShort {
                height: h,
                min: Self::MIN_HEIGHT,
            });
        }
        Ok(Ladder {
            x,
            y,
            w,
            h,
            tiles: LADDER_TILES,
        })
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn left(&self) -> i32 {
        self.rect().left()
    }

    pub fn right(&self) -> i32 {
        self.rect().right()
    }

    pub fn top(&self) -> i32 {
        self.rect().top()
    }

    pub fn bottom(&self) -> i32 {
        self.rect().bottom()
    }

    pub fn tiles(&self) -> &LadderTiles {
        &self.tiles
    }

    pub fn shift_x(&mut self, dx: i32) {
        self.x += dx;
    }
}

// ── Swoosh ────────────────────────────────────────────────────────────────────

/// Short-lived attack hitbox. Owned by the character that swung it.
#[derive(Clone, Debug, PartialEq)]
pub struct Swoosh {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub vx: f32,
    pub faced_right: bool,
    pub destroyed: bool,
    time: u32,
}

impl Swoosh {
    pub fn new(x: i32, y: i32, faced_right: bool) -> Self {
        Swoosh {
            x,
            y,
            w: SWOOSH_WIDTH,
            h: SWOOSH_HEIGHT,
            vx: if faced_right { SWOOSH_VX } else { -SWOOSH_VX },
            faced_right,
            destroyed: false,
            time: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    /// Ticks a swoosh stays alive: one full pass over its animation.
    pub fn lifetime() -> u32 {
        animation::SWOOSH_FRAMES.len() as u32 * ANIMATION_FRAME_TICKS
    }

    /// One tick of travel and ageing. A fresh swoosh holds its spawn position
    /// for its first tick.
    pub fn advance(&mut self) {
        if self.time > 0 {
            self.x += self.vx as i32;
        }
        self.time += 1;
        if self.time > Self::lifetime() {
            self.destroyed = true;
        }
    }

    pub fn frame_index(&self) -> usize {
        animation::frame_index(self.time, animation::SWOOSH_FRAMES.len())
    }

    pub fn shift_x(&mut self, dx: i32) {
        self.x += dx;
    }
}

// ── Characters ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    Player,
    EnemySlasher,
    EnemySnake,
}

/// How a character damages others.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackStyle {
    /// Swings spawn a travelling swoosh hitbox.
    Swoosh,
    /// The body itself hurts on contact.
    Touch,
}

/// Which decision states an enemy controller may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiProfile {
    PatrolOnly,
    PatrolAndChase,
}

impl CharacterKind {
    pub fn attack_style(self) -> AttackStyle {
        match self {
            CharacterKind::Player | CharacterKind::EnemySlasher => AttackStyle::Swoosh,
            CharacterKind::EnemySnake => AttackStyle::Touch,
        }
    }

    pub fn ai_profile(self) -> Option<AiProfile> {
        match self {
            CharacterKind::Player => None,
            CharacterKind::EnemySlasher => Some(AiProfile::PatrolAndChase),
            CharacterKind::EnemySnake => Some(AiProfile::PatrolOnly),
        }
    }

    pub fn default_health(self) -> i32 {
        match self {
            CharacterKind::Player => DEFAULT_PLAYER_HEALTH,
            CharacterKind::EnemySlasher | CharacterKind::EnemySnake => DEFAULT_ENEMY_HEALTH,
        }
    }

    /// States this kind of character can be in. Requests that would lead
    /// anywhere else are ignored.
    pub fn supports(self, state: CharacterState) -> bool {
        use CharacterState::*;
        match self {
            CharacterKind::Player => state != ShowingAlarm,
            CharacterKind::EnemySlasher => state != Climbing,
            CharacterKind::EnemySnake => matches!(state, Standing | Walking | Falling | Hit | Dead),
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Intents active during one frame, as handed over by the input layer.
/// `jump` and `attack` are edge-triggered presses, the rest are held keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub climb_up: bool,
    pub climb_down: bool,
    pub quit: bool,
}

impl InputSnapshot {
    /// Horizontal step per tick requested by the held direction keys.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -CHARACTER_VX,
            (false, true) => CHARACTER_VX,
            _ => 0.0,
        }
    }

    /// Vertical ladder speed requested by the held climb keys; up is negative.
    pub fn vertical(&self) -> f32 {
        match (self.climb_up, self.climb_down) {
            (true, false) => -CLIMB_SPEED,
            (false, true) => CLIMB_SPEED,
            _ => 0.0,
        }
    }

    /// Used by the title and game-over screens to move on.
    pub fn confirm(&self) -> bool {
        self.jump || self.attack
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Everything one running level consists of.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Character,
    pub enemies: Vec<Character>,
    /// One controller per entry in `enemies`, linked by character id.
    pub controllers: Vec<AiController>,
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    /// How far the world has been scrolled left, in pixels.
    pub scroll_x: i32,
    pub status: GameStatus,
    pub frame: u64,
}
