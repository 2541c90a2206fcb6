/// Tuning constants.
///
/// Every speed and timer is expressed per simulation tick; one tick is one
/// rendered frame.

// ── Window & tiles ────────────────────────────────────────────────────────────

pub const WINDOW_WIDTH: i32 = 860;
pub const WINDOW_HEIGHT: i32 = 510;

const SCALE_X: i32 = WINDOW_WIDTH / 288;
const SCALE_Y: i32 = WINDOW_HEIGHT / 172;

pub const TILE_SOURCE_WIDTH: i32 = 16;
pub const TILE_SOURCE_HEIGHT: i32 = 128 / 8;
pub const TILE_DEST_WIDTH: i32 = TILE_SOURCE_WIDTH * SCALE_X;
pub const TILE_DEST_HEIGHT: i32 = TILE_SOURCE_HEIGHT * SCALE_Y;

pub const CHARACTER_SOURCE_WIDTH: i32 = 32;
pub const CHARACTER_SOURCE_HEIGHT: i32 = 32;
pub const CHARACTER_DEST_WIDTH: i32 = CHARACTER_SOURCE_WIDTH * SCALE_X;
pub const CHARACTER_DEST_HEIGHT: i32 = CHARACTER_SOURCE_HEIGHT * SCALE_Y;

// ── Physics ───────────────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 0.05;
pub const JUMP_SPEED: f32 = 4.0;
pub const CHARACTER_VX: f32 = 1.0;
pub const CLIMB_SPEED: f32 = 1.0;
/// Vertical velocity applied on being hit or killed.
pub const CHARACTER_VY_WHEN_HIT: f32 = -2.0;
/// Vertical velocity of the hop an enemy does when it notices the player.
pub const ALARM_VY: f32 = -2.0;
/// Pixels below a platform's top edge that still count as standing on it.
pub const LANDING_BAND: i32 = 5;

// ── Combat ────────────────────────────────────────────────────────────────────

pub const CHARACTER_STAMINA_MAX: u32 = 30;
pub const DEFAULT_PLAYER_HEALTH: i32 = 1;
pub const DEFAULT_ENEMY_HEALTH: i32 = 1;
pub const HIT_STATE_LENGTH: u32 = 70;

pub const SWOOSH_VX: f32 = 1.0;
pub const SWOOSH_X_SHIFT: i32 = 10;
pub const SWOOSH_WIDTH: i32 = 32;
pub const SWOOSH_HEIGHT: i32 = 32;

// ── Animation ─────────────────────────────────────────────────────────────────

/// Ticks each animation frame stays on screen.
pub const ANIMATION_FRAME_TICKS: u32 = 10;

// ── AI ────────────────────────────────────────────────────────────────────────

/// Distance a patrolling enemy walks away from its reference point.
pub const PATROL_RANGE: i32 = 3 * TILE_DEST_WIDTH;
pub const PATROL_STAND_TICKS: u32 = 100;
pub const CHARACTER_SIGHT_LIMIT: i32 = 8 * CHARACTER_SOURCE_WIDTH;
/// Ticks a chasing enemy keeps chasing after losing the player.
pub const AI_COOLDOWN_TIME: u32 = 200;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Distance from a screen edge at which the world starts scrolling.
pub const SCROLL_MARGIN: i32 = 5 * TILE_DEST_WIDTH;
