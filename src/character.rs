/// Character behaviour: physics integration, the state machine shared by the
/// player and every enemy, and attack resolution.
///
/// A character is always in exactly one `CharacterState`. Every operation
/// (`walk`, `jump`, `attack`, ...) is dispatched on that state; requests a
/// state has no answer for are silently ignored. Any transition resets the
/// state-local `time` counter, which drives animation and state timers.

use std::fmt;

use tracing::trace;

use crate::animation;
use crate::constants::{
    ALARM_VY, ANIMATION_FRAME_TICKS, CHARACTER_DEST_HEIGHT, CHARACTER_DEST_WIDTH,
    CHARACTER_SIGHT_LIMIT, CHARACTER_STAMINA_MAX, CHARACTER_VY_WHEN_HIT, GRAVITY,
    HIT_STATE_LENGTH, JUMP_SPEED, LANDING_BAND, SCROLL_MARGIN, SWOOSH_X_SHIFT, TILE_DEST_HEIGHT,
    TILE_DEST_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::entities::{AttackStyle, CharacterKind, Ladder, Platform, Rect, SheetCell, Swoosh};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterState {
    Standing,
    Walking,
    Jumping,
    Falling,
    Attacking,
    Hit,
    Dead,
    ShowingAlarm,
    Climbing,
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterState::Standing => "standing",
            CharacterState::Walking => "walking",
            CharacterState::Jumping => "jumping",
            CharacterState::Falling => "falling",
            CharacterState::Attacking => "attacking",
            CharacterState::Hit => "hit",
            CharacterState::Dead => "dead",
            CharacterState::ShowingAlarm => "showing alarm",
            CharacterState::Climbing => "climbing",
        };
        f.write_str(name)
    }
}

/// Stable handle of a character inside a `GameState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharacterId(pub u32);

#[derive(Clone, Debug)]
pub struct Character {
    pub id: CharacterId,
    /// Horizontal centre.
    pub x: i32,
    /// Vertical anchor; the collision box bottom edge is `y + h`.
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub vx: f32,
    pub vy: f32,
    kind: CharacterKind,
    state: CharacterState,
    faced_right: bool,
    health: i32,
    stamina: u32,
    time: u32,
    swooshes: Vec<Swoosh>,
}

impl Character {
    /// A new character starts falling at its spawn point, facing right, with
    /// full stamina.
    pub fn new(id: CharacterId, kind: CharacterKind, x: i32, y: i32) -> Self {
        Character {
            id,
            x,
            y,
            w: TILE_DEST_WIDTH,
            h: TILE_DEST_HEIGHT,
            vx: 0.0,
            vy: 0.0,
            kind,
            state: CharacterState::Falling,
            faced_right: true,
            health: kind.default_health(),
            stamina: CHARACTER_STAMINA_MAX,
            time: 0,
            swooshes: Vec::new(),
        }
    }

    /// Overrides the kind's starting health.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn is_faced_right(&self) -> bool {
        self.faced_right
    }

    pub fn swooshes(&self) -> &[Swoosh] {
        &self.swooshes
    }

    pub fn is_player(&self) -> bool {
        self.kind == CharacterKind::Player
    }

    pub fn is_enemy_slasher(&self) -> bool {
        self.kind == CharacterKind::EnemySlasher
    }

    pub fn is_enemy_snake(&self) -> bool {
        self.kind == CharacterKind::EnemySnake
    }

    /// Centred collision box used for attack overlap tests.
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    fn set_state(&mut self, next: CharacterState) {
        if next != self.state {
            trace!(id = self.id.0, from = %self.state, to = %next, "character state");
        }
        self.time = 0;
        self.state = next;
    }

    /// Transition only if this kind of character has the target state.
    fn try_set_state(&mut self, next: CharacterState) -> bool {
        if !self.kind.supports(next) {
            return false;
        }
        self.set_state(next);
        true
    }

    // ── Intents ───────────────────────────────────────────────────────────────

    /// Sets the horizontal step per tick. Zero stops a walk.
    pub fn walk(&mut self, vx: f32) {
        match self.state {
            CharacterState::Standing => {
                if vx != 0.0 && self.try_set_state(CharacterState::Walking) {
                    self.set_velocity_and_facing(vx);
                }
            }
            CharacterState::Walking | CharacterState::Jumping | CharacterState::Falling => {
                self.set_velocity_and_facing(vx);
            }
            _ => {}
        }
    }

    pub fn jump(&mut self) {
        match self.state {
            CharacterState::Standing | CharacterState::Walking => {
                if self.try_set_state(CharacterState::Jumping) {
                    self.vy = -JUMP_SPEED;
                }
            }
            CharacterState::Climbing => {
                self.vy = 0.0;
                self.set_state(CharacterState::Jumping);
            }
            _ => {}
        }
    }

    /// Swings only when stamina is full and the character stands on the ground.
    pub fn attack(&mut self) {
        match self.state {
            CharacterState::Standing | CharacterState::Walking => self.try_attack(),
            _ => {}
        }
    }

    /// Knocks the character back with horizontal velocity `vx` and costs one
    /// health point. Ignored while already hit or dead.
    pub fn hit(&mut self, vx: f32) {
        match self.state {
            CharacterState::Hit | CharacterState::Dead => {}
            _ => {
                self.vx = vx;
                self.vy = CHARACTER_VY_WHEN_HIT;
                self.health = (self.health - 1).max(0);
                // Turn towards where the blow came from.
                if vx > 0.0 {
                    self.faced_right = false;
                } else if vx < 0.0 {
                    self.faced_right = true;
                }
                self.set_state(CharacterState::Hit);
            }
        }
    }

    pub fn kill(&mut self, vx: f32) {
        if self.state == CharacterState::Dead {
            return;
        }
        self.vx = vx;
        self.vy = CHARACTER_VY_WHEN_HIT;
        self.set_state(CharacterState::Dead);
    }

    /// Small upward hop signalling that the player was spotted.
    pub fn show_alarm(&mut self) {
        match self.state {
            CharacterState::Standing | CharacterState::Walking | CharacterState::Jumping => {
                if self.try_set_state(CharacterState::ShowingAlarm) {
                    self.vx = 0.0;
                    self.vy = ALARM_VY;
                }
            }
            _ => {}
        }
    }

    /// Grabs a touched ladder when `vy` is non-zero, or sets the climbing
    /// speed while already on one.
    pub fn climb(&mut self, vy: f32, ladders: &[Ladder]) {
        match self.state {
            CharacterState::Standing
            | CharacterState::Walking
            | CharacterState::Jumping
            | CharacterState::Falling => self.try_grab_ladder(vy, ladders),
            CharacterState::Climbing => self.vy = vy,
            _ => {}
        }
    }

    fn set_velocity_and_facing(&mut self, vx: f32) {
        self.vx = vx;
        if vx > 0.0 {
            self.faced_right = true;
        } else if vx < 0.0 {
            self.faced_right = false;
        }
    }

    fn try_attack(&mut self) {
        if !self.can_attack() || !self.kind.supports(CharacterState::Attacking) {
            return;
        }
        if self.kind.attack_style() == AttackStyle::Swoosh {
            let shift = if self.faced_right { SWOOSH_X_SHIFT } else { -SWOOSH_X_SHIFT };
            self.swooshes.push(Swoosh::new(self.x + shift, self.y, self.faced_right));
        }
        // The swing happens in place.
        self.vx = 0.0;
        self.stamina = 0;
        self.set_state(CharacterState::Attacking);
    }

    fn try_grab_ladder(&mut self, vy: f32, ladders: &[Ladder]) {
        if vy == 0.0 || !self.kind.supports(CharacterState::Climbing) {
            return;
        }
        let Some(ladder) = ladders.iter().find(|l| self.is_touching_ladder(l)) else {
            return;
        };
        self.x = ladder.x;
        self.vx = 0.0;
        self.vy = vy;
        self.set_state(CharacterState::Climbing);
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Advances the character by one tick. `targets` are the characters this
    /// one can damage; it is never among them.
    pub fn update(&mut self, platforms: &[Platform], ladders: &[Ladder], targets: &mut [Character]) {
        // Only the truncated pixel step is applied; fractional velocity keeps
        // accumulating in vx/vy.
        self.x += self.vx as i32;
        self.y += self.vy as i32;
        if !self.can_attack() {
            self.stamina += 1;
        }
        self.update_state(platforms, ladders);
        match self.kind.attack_style() {
            AttackStyle::Swoosh => self.update_swoosh_attack(targets),
            AttackStyle::Touch => self.update_touch_attack(targets),
        }
    }

    fn update_state(&mut self, platforms: &[Platform], ladders: &[Ladder]) {
        match self.state {
            CharacterState::Standing => {}
            CharacterState::Walking => {
                self.time += 1;
                if self.landing_platform_top(platforms).is_some() {
                    if self.vx == 0.0 {
                        self.set_state(CharacterState::Standing);
                    }
                } else {
                    self.vy += GRAVITY;
                    self.set_state(CharacterState::Falling);
                }
            }
            CharacterState::Jumping => {
                self.time = 0;
                self.vy += GRAVITY;
                if self.is_falling() {
                    self.set_state(CharacterState::Falling);
                }
            }
            CharacterState::Falling => {
                self.time = 0;
                self.vy += GRAVITY;
                if let Some(top) = self.landing_platform_top(platforms) {
                    self.land_on(top);
                    if self.vx == 0.0 {
                        self.set_state(CharacterState::Standing);
                    } else {
                        self.set_state(CharacterState::Walking);
                    }
                }
            }
            CharacterState::Attacking => {
                self.vx = 0.0;
                self.time += 1;
                if self.time > self.frame_count() * ANIMATION_FRAME_TICKS {
                    if self.landing_platform_top(platforms).is_some() {
                        self.set_state(CharacterState::Standing);
                    } else {
                        self.set_state(CharacterState::Falling);
                    }
                }
            }
            CharacterState::Hit => {
                if self.health <= 0 {
                    self.set_state(CharacterState::Dead);
                    return;
                }
                self.time += 1;
                self.vy += GRAVITY;
                if let Some(top) = self.landing_platform_top(platforms) {
                    self.land_on(top);
                }
                if self.time > HIT_STATE_LENGTH {
                    self.vx = 0.0;
                    self.set_state(CharacterState::Falling);
                }
            }
            CharacterState::Dead => {
                // No landing: the body drops through the level and leaves the screen.
                self.time += 1;
                self.vy += GRAVITY;
            }
            CharacterState::ShowingAlarm => {
                self.vy += GRAVITY;
                if let Some(top) = self.landing_platform_top(platforms) {
                    self.land_on(top);
                    self.set_state(CharacterState::Standing);
                }
            }
            CharacterState::Climbing => {
                self.vx = 0.0;
                if self.vy == 0.0 {
                    self.time = 0;
                } else {
                    self.time += 1;
                }
                if ladders.iter().any(|l| self.is_touching_ladder(l)) {
                    return;
                }
                if let Some(top) = self.landing_platform_top(platforms) {
                    self.land_on(top);
                    self.set_state(CharacterState::Standing);
                    return;
                }
                self.vy = 0.0;
                self.set_state(CharacterState::Falling);
            }
        }
    }

    fn land_on(&mut self, platform_top: i32) {
        self.y = platform_top - self.h;
        self.vy = 0.0;
    }

    fn update_swoosh_attack(&mut self, targets: &mut [Character]) {
        for swoosh in &mut self.swooshes {
            let area = swoosh.rect();
            if let Some(target) = targets
                .iter_mut()
                .find(|t| t.state != CharacterState::Dead && area.overlaps(&t.hitbox()))
            {
                target.hit(swoosh.vx);
                swoosh.destroyed = true;
            }
        }
        self.swooshes.retain(|s| !s.destroyed);
        for swoosh in &mut self.swooshes {
            swoosh.advance();
        }
        self.swooshes.retain(|s| !s.destroyed);
    }

    fn update_touch_attack(&self, targets: &mut [Character]) {
        if self.state == CharacterState::Dead {
            return;
        }
        let body = self.hitbox();
        if let Some(target) = targets
            .iter_mut()
            .find(|t| !t.is_enemy_snake() && body.overlaps(&t.hitbox()))
        {
            target.hit(self.vx - target.vx);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn can_attack(&self) -> bool {
        self.stamina >= CHARACTER_STAMINA_MAX
    }

    pub fn is_falling(&self) -> bool {
        self.vy > 0.0
    }

    /// The bottom edge sits inside the landing band below the platform's top
    /// edge and the centre is within its horizontal span.
    pub fn is_touching_platform_from_above(&self, p: &Platform) -> bool {
        let bottom = self.y + self.h;
        bottom >= p.top()
            && bottom <= p.top() + LANDING_BAND
            && self.x >= p.left()
            && self.x <= p.right()
    }

    pub fn is_touching_ladder(&self, l: &Ladder) -> bool {
        // Counting a bottom edge level with the ladder top lets the character
        // step off onto a platform at that height and climb down from it.
        self.x > l.left() && self.x < l.right() && self.y >= l.top() - self.h && self.y + self.h <= l.bottom()
    }

    fn supporting_platform<'a>(&self, platforms: &'a [Platform]) -> Option<&'a Platform> {
        platforms.iter().find(|p| self.is_touching_platform_from_above(p))
    }

    fn landing_platform_top(&self, platforms: &[Platform]) -> Option<i32> {
        self.supporting_platform(platforms).map(Platform::top)
    }

    /// Below the bottom of the window; such characters are removed.
    pub fn is_dead(&self) -> bool {
        self.y - self.h > WINDOW_HEIGHT
    }

    pub fn is_close_to_right_screen_edge(&self) -> bool {
        self.x + SCROLL_MARGIN > WINDOW_WIDTH
    }

    pub fn is_close_to_left_screen_edge(&self) -> bool {
        self.x < SCROLL_MARGIN
    }

    pub fn is_close_to_platform_left_edge(&self, platforms: &[Platform]) -> bool {
        self.supporting_platform(platforms)
            .is_some_and(|p| self.x < p.left() + self.w / 2)
    }

    pub fn is_close_to_platform_right_edge(&self, platforms: &[Platform]) -> bool {
        self.supporting_platform(platforms)
            .is_some_and(|p| self.x > p.right() - self.w / 2)
    }

    pub fn finished_showing_alarm(&self) -> bool {
        self.state != CharacterState::ShowingAlarm
    }

    /// Vertical distance to `other` is at most one tile.
    pub fn on_same_height(&self, other: &Character) -> bool {
        (self.y - other.y).abs() <= TILE_DEST_HEIGHT
    }

    /// On the same height and within sight distance on either side.
    pub fn is_close(&self, other: &Character) -> bool {
        self.on_same_height(other) && (other.x - self.x).abs() < CHARACTER_SIGHT_LIMIT
    }

    pub fn within_attack_range(&self, other: &Character) -> bool {
        let distance = other.x - self.x;
        distance != 0 && distance.abs() < CHARACTER_DEST_WIDTH
    }

    /// `other` is ahead in the facing direction, within sight distance.
    pub fn within_sight(&self, other: &Character) -> bool {
        if !self.on_same_height(other) {
            return false;
        }
        if self.faced_right {
            other.x > self.x && other.x < self.x + CHARACTER_SIGHT_LIMIT
        } else {
            other.x < self.x && other.x > self.x - CHARACTER_SIGHT_LIMIT
        }
    }

    // ── Camera & drawing ──────────────────────────────────────────────────────

    /// Moves the character and its swooshes horizontally with the world.
    pub fn shift_x(&mut self, dx: i32) {
        self.x += dx;
        for swoosh in &mut self.swooshes {
            swoosh.shift_x(dx);
        }
    }

    pub fn animation_frames(&self) -> &'static [SheetCell] {
        animation::character_frames(self.kind, self.state)
    }

    fn frame_count(&self) -> u32 {
        self.animation_frames().len() as u32
    }

    pub fn frame_index(&self) -> usize {
        animation::frame_index(self.time, self.animation_frames().len())
    }

    pub fn displayed_frame(&self) -> SheetCell {
        self.animation_frames()[self.frame_index()]
    }

    /// Where the sprite goes on screen: the 64x64 character cell centred on
    /// the character position.
    pub fn sprite_rect(&self) -> Rect {
        Rect::new(self.x, self.y, CHARACTER_DEST_WIDTH, CHARACTER_DEST_HEIGHT)
    }
}
