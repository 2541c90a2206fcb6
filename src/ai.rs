/// Enemy decision making.
///
/// Each enemy gets one `AiController`. Every tick the controller looks at the
/// player and the level and issues intents (`walk`, `attack`, `show_alarm`) to
/// its character; the character's own state machine decides what they do.
/// Patrol-only enemies never leave the three patrol states.

use std::fmt;

use tracing::debug;

use crate::character::{Character, CharacterId, CharacterState};
use crate::constants::{
    AI_COOLDOWN_TIME, CHARACTER_DEST_WIDTH, CHARACTER_VX, PATROL_RANGE, PATROL_STAND_TICKS,
};
use crate::entities::{AiProfile, Platform};
use crate::error::{GameError, GameResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatrolState {
    MoveRight,
    MoveLeft,
    Stand,
    Alarmed,
    Chasing,
}

impl fmt::Display for PatrolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatrolState::MoveRight => "patrolling right",
            PatrolState::MoveLeft => "patrolling left",
            PatrolState::Stand => "patrolling stand",
            PatrolState::Alarmed => "alarmed",
            PatrolState::Chasing => "chasing",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct AiController {
    character: CharacterId,
    profile: AiProfile,
    /// Patrol reference point. Follows the world when the camera scrolls.
    start_x: i32,
    time: u32,
    cooldown: u32,
    state: PatrolState,
}

impl AiController {
    /// Builds the controller matching the enemy's kind. Characters without an
    /// AI profile (the player) are rejected.
    pub fn for_enemy(ch: &Character) -> GameResult<AiController> {
        let profile = ch
            .kind()
            .ai_profile()
            .ok_or(GameError::UnknownEnemyType(ch.kind()))?;
        Ok(AiController {
            character: ch.id,
            profile,
            start_x: ch.x,
            time: 0,
            cooldown: 0,
            state: PatrolState::MoveRight,
        })
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    pub fn profile(&self) -> AiProfile {
        self.profile
    }

    pub fn state(&self) -> PatrolState {
        self.state
    }

    pub fn start_x(&self) -> i32 {
        self.start_x
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn shift_patrolling_reference_point_left(&mut self, dx: i32) {
        self.start_x -= dx;
    }

    pub fn shift_patrolling_reference_point_right(&mut self, dx: i32) {
        self.start_x += dx;
    }

    fn set_state(&mut self, next: PatrolState) {
        debug!(id = self.character.0, from = %self.state, to = %next, "switching ai state");
        self.state = next;
        self.time = 0;
    }

    /// One decision tick. `enemies` holds every enemy including the one this
    /// controller drives; a controller whose character is gone does nothing.
    pub fn update(&mut self, enemies: &mut [Character], player: &Character, platforms: &[Platform]) {
        let Some(me) = enemies.iter().position(|e| e.id == self.character) else {
            return;
        };
        let target_engaged = enemies.iter().enumerate().any(|(i, e)| {
            i != me
                && e.state() != CharacterState::Dead
                && e.on_same_height(player)
                && e.within_attack_range(player)
        });
        let ch = &mut enemies[me];

        match self.state {
            PatrolState::MoveRight => {
                if self.noticed(ch, player) {
                    return;
                }
                ch.walk(CHARACTER_VX);
                if ch.x > self.start_x + PATROL_RANGE || ch.is_close_to_platform_right_edge(platforms) {
                    self.set_state(PatrolState::Stand);
                }
            }
            PatrolState::MoveLeft => {
                if self.noticed(ch, player) {
                    return;
                }
                ch.walk(-CHARACTER_VX);
                if ch.x < self.start_x - PATROL_RANGE || ch.is_close_to_platform_left_edge(platforms) {
                    self.set_state(PatrolState::Stand);
                }
            }
            PatrolState::Stand => {
                if self.noticed(ch, player) {
                    return;
                }
                ch.walk(0.0);
                self.time += 1;
                if self.time >= PATROL_STAND_TICKS {
                    if ch.is_faced_right() {
                        self.set_state(PatrolState::MoveLeft);
                    } else {
                        self.set_state(PatrolState::MoveRight);
                    }
                }
            }
            PatrolState::Alarmed => {
                ch.walk(0.0);
                if self.time == 0 {
                    ch.show_alarm();
                    self.time = 1;
                } else if ch.finished_showing_alarm() {
                    self.cooldown = AI_COOLDOWN_TIME;
                    self.set_state(PatrolState::Chasing);
                }
            }
            PatrolState::Chasing => self.chase(ch, player, platforms, target_engaged),
        }
    }

    /// Switches to `Alarmed` when the player, alive and on the same height,
    /// shows up ahead of the enemy.
    fn noticed(&mut self, ch: &Character, player: &Character) -> bool {
        if self.profile != AiProfile::PatrolAndChase
            || player.state() == CharacterState::Dead
            || !ch.within_sight(player)
        {
            return false;
        }
        self.set_state(PatrolState::Alarmed);
        true
    }

    fn chase(&mut self, ch: &mut Character, player: &Character, platforms: &[Platform], target_engaged: bool) {
        if ch.is_close(player) {
            self.cooldown = AI_COOLDOWN_TIME;
            let in_range = ch.within_attack_range(player);
            if in_range {
                ch.attack();
            }
            // Let whoever already reached the player fight; the rest queue up.
            let blocked = target_engaged && !in_range;
            if player.x - CHARACTER_DEST_WIDTH / 2 > ch.x
                && !blocked
                && !ch.is_close_to_platform_right_edge(platforms)
            {
                ch.walk(CHARACTER_VX);
            } else if player.x + CHARACTER_DEST_WIDTH / 2 < ch.x
                && !blocked
                && !ch.is_close_to_platform_left_edge(platforms)
            {
                ch.walk(-CHARACTER_VX);
            } else {
                ch.walk(0.0);
            }
            return;
        }

        if ch.is_close_to_platform_right_edge(platforms) || ch.is_close_to_platform_left_edge(platforms) {
            ch.walk(0.0);
        }
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            self.set_state(PatrolState::MoveLeft);
        }
    }
}
