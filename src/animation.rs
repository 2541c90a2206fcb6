/// Sprite-sheet layout: which cells make up each animation and each tile.
///
/// Character cells are 32x32 on the characters sheet, one row per character
/// kind. Tile cells are 16x16 on the background sheet.

use crate::character::CharacterState;
use crate::constants::ANIMATION_FRAME_TICKS;
use crate::entities::{CharacterKind, LadderTiles, PlatformTiles, SheetCell};

type Frames = &'static [SheetCell];

const fn c(col: i32, row: i32) -> SheetCell {
    SheetCell::new(col, row)
}

// ── Player (row 1) ────────────────────────────────────────────────────────────

const PLAYER_STANDING: Frames = &[c(0, 1)];
const PLAYER_WALKING: Frames = &[c(1, 1), c(2, 1), c(3, 1), c(4, 1)];
const PLAYER_JUMPING: Frames = &[c(6, 1)];
const PLAYER_FALLING: Frames = &[c(7, 1)];
const PLAYER_ATTACKING: Frames = &[c(12, 1), c(11, 1), c(12, 1), c(13, 1)];
const PLAYER_HIT: Frames = &[c(9, 1), c(10, 1)];
const PLAYER_CLIMBING: Frames = &[c(19, 1), c(20, 1), c(21, 1), c(22, 1)];

// ── Slasher (row 0) ───────────────────────────────────────────────────────────

const SLASHER_STANDING: Frames = &[c(0, 0)];
const SLASHER_WALKING: Frames = &[c(1, 0), c(2, 0), c(3, 0), c(4, 0)];
const SLASHER_JUMPING: Frames = &[c(6, 0)];
const SLASHER_FALLING: Frames = &[c(7, 0)];
const SLASHER_ATTACKING: Frames = &[c(12, 0), c(11, 0), c(12, 0), c(13, 0)];
const SLASHER_HIT: Frames = &[c(9, 0), c(10, 0)];

// ── Snake (row 3) ─────────────────────────────────────────────────────────────

const SNAKE_STANDING: Frames = &[c(0, 3)];
const SNAKE_WALKING: Frames = &[c(1, 3), c(2, 3), c(3, 3)];

/// Swoosh cells on the swoosh sheet.
pub const SWOOSH_FRAMES: Frames = &[c(0, 0), c(1, 0), c(2, 0), c(3, 0)];

// ── Background tiles ──────────────────────────────────────────────────────────

pub const PLATFORM_TILES: PlatformTiles = PlatformTiles {
    top_left: c(10, 0),
    top_middle: c(11, 0),
    top_right: c(12, 0),
    mid_left: c(10, 1),
    mid_middle: c(11, 1),
    mid_right: c(12, 1),
};

pub const LADDER_TILES: LadderTiles = LadderTiles {
    top: c(7, 4),
    mid: c(7, 5),
    bottom: c(7, 6),
};

pub const DECORATION_UPPER_LEFT: SheetCell = c(7, 0);
pub const DECORATION_UPPER_MIDDLE: SheetCell = c(8, 0);
pub const DECORATION_UPPER_RIGHT: SheetCell = c(9, 0);
pub const DECORATION_LOWER_MIDDLE: SheetCell = c(7, 1);

/// Animation of `kind` while in `state`. States a kind never enters fall back
/// to its standing pose.
pub fn character_frames(kind: CharacterKind, state: CharacterState) -> Frames {
    use CharacterState::*;
    match kind {
        CharacterKind::Player => match state {
            Standing | ShowingAlarm => PLAYER_STANDING,
            Walking => PLAYER_WALKING,
            Jumping => PLAYER_JUMPING,
            Falling => PLAYER_FALLING,
            Attacking => PLAYER_ATTACKING,
            Hit | Dead => PLAYER_HIT,
            Climbing => PLAYER_CLIMBING,
        },
        CharacterKind::EnemySlasher => match state {
            Standing | ShowingAlarm | Climbing => SLASHER_STANDING,
            Walking => SLASHER_WALKING,
            Jumping => SLASHER_JUMPING,
            Falling => SLASHER_FALLING,
            Attacking => SLASHER_ATTACKING,
            Hit | Dead => SLASHER_HIT,
        },
        CharacterKind::EnemySnake => match state {
            Walking => SNAKE_WALKING,
            _ => SNAKE_STANDING,
        },
    }
}

/// Each frame is held for `ANIMATION_FRAME_TICKS` ticks, looping.
pub fn frame_index(time: u32, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    (time / ANIMATION_FRAME_TICKS) as usize % frame_count
}
