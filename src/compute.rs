/// Per-frame orchestration.
///
/// A frame runs strictly in this order: player intents, player update, AI
/// decisions, enemy updates, removal of fallen enemies, camera scroll. The
/// scroll happens last so the next frame's AI and physics already see the
/// shifted world.

use tracing::{debug, info};

use crate::ai::AiController;
use crate::character::{Character, CharacterId};
use crate::constants::{SCROLL_MARGIN, WINDOW_WIDTH};
use crate::entities::{CharacterKind, GameState, GameStatus, InputSnapshot};
use crate::error::GameResult;
use crate::level::Level;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a level. Invalid geometry is a level
/// design bug and fails the whole construction.
pub fn init_state(level: &Level) -> GameResult<GameState> {
    let platforms = level.build_platforms()?;
    let ladders = level.build_ladders()?;

    let (px, py) = level.player_spawn;
    let player = Character::new(CharacterId(0), CharacterKind::Player, px, py);

    let mut enemies = Vec::with_capacity(level.enemies.len());
    let mut controllers = Vec::with_capacity(level.enemies.len());
    for (i, spawn) in level.enemies.iter().enumerate() {
        let enemy = Character::new(CharacterId(i as u32 + 1), spawn.kind, spawn.x, spawn.y);
        controllers.push(AiController::for_enemy(&enemy)?);
        enemies.push(enemy);
    }

    info!(
        platforms = platforms.len(),
        ladders = ladders.len(),
        enemies = enemies.len(),
        "level ready"
    );

    Ok(GameState {
        player,
        enemies,
        controllers,
        platforms,
        ladders,
        scroll_x: 0,
        status: GameStatus::Playing,
        frame: 0,
    })
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Hand this frame's intents to the player character.
pub fn apply_input(state: &mut GameState, input: &InputSnapshot) {
    if state.status != GameStatus::Playing {
        return;
    }
    let player = &mut state.player;
    player.walk(input.horizontal());
    player.climb(input.vertical(), &state.ladders);
    if input.jump {
        player.jump();
    }
    if input.attack {
        player.attack();
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn tick(state: &mut GameState) {
    if state.status != GameStatus::Playing {
        return;
    }
    state.frame += 1;

    state
        .player
        .update(&state.platforms, &state.ladders, &mut state.enemies);

    for ctrl in &mut state.controllers {
        ctrl.update(&mut state.enemies, &state.player, &state.platforms);
    }

    for enemy in &mut state.enemies {
        enemy.update(
            &state.platforms,
            &state.ladders,
            std::slice::from_mut(&mut state.player),
        );
    }

    remove_fallen_enemies(state);

    if state.player.is_dead() {
        info!(frame = state.frame, "player fell off the level, game over");
        state.status = GameStatus::GameOver;
        return;
    }

    scroll_camera(state);
}

/// Drops enemies below the window together with their controllers.
fn remove_fallen_enemies(state: &mut GameState) {
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.is_dead());
    if state.enemies.len() == before {
        return;
    }
    let enemies = &state.enemies;
    state
        .controllers
        .retain(|c| enemies.iter().any(|e| e.id == c.character()));
    debug!(
        removed = before - state.enemies.len(),
        remaining = state.enemies.len(),
        "removed fallen enemies"
    );
}

/// Keeps the player away from the screen edges by moving the world instead.
/// The world never scrolls right past its starting position.
fn scroll_camera(state: &mut GameState) {
    if state.player.is_close_to_right_screen_edge() {
        let dx = state.player.x + SCROLL_MARGIN - WINDOW_WIDTH;
        shift_world(state, -dx);
        state.scroll_x += dx;
        for ctrl in &mut state.controllers {
            ctrl.shift_patrolling_reference_point_left(dx);
        }
    } else if state.player.is_close_to_left_screen_edge() && state.scroll_x > 0 {
        let dx = (SCROLL_MARGIN - state.player.x).min(state.scroll_x);
        shift_world(state, dx);
        state.scroll_x -= dx;
        for ctrl in &mut state.controllers {
            ctrl.shift_patrolling_reference_point_right(dx);
        }
    }
    if state.player.x < 0 {
        state.player.x = 0;
    }
}

fn shift_world(state: &mut GameState, dx: i32) {
    state.player.shift_x(dx);
    for enemy in &mut state.enemies {
        enemy.shift_x(dx);
    }
    for p in &mut state.platforms {
        p.shift_x(dx);
    }
    for l in &mut state.ladders {
        l.shift_x(dx);
    }
}
