use platformer::ai::{AiController, PatrolState};
use platformer::character::{Character, CharacterId, CharacterState};
use platformer::entities::*;
use platformer::error::GameError;

use pretty_assertions::assert_eq;

/// Wide ground: top edge at y = 268, spanning x 30..=830.
fn ground() -> Vec<Platform> {
    vec![Platform::walkable(430, 300, 800, 64).unwrap()]
}

const GROUND_Y: i32 = 236;

fn standing(kind: CharacterKind, id: u32, x: i32) -> Character {
    let mut ch = Character::new(CharacterId(id), kind, x, GROUND_Y);
    ch.update(&ground(), &[], &mut []);
    ch
}

/// A player nowhere near anyone.
fn distant_player() -> Character {
    Character::new(CharacterId(0), CharacterKind::Player, 2000, -500)
}

/// One frame of AI decisions followed by enemy physics, with the player held still.
fn step(ctrls: &mut [AiController], enemies: &mut [Character], player: &mut Character, platforms: &[Platform]) {
    for c in ctrls.iter_mut() {
        c.update(enemies, player, platforms);
    }
    for e in enemies.iter_mut() {
        e.update(platforms, &[], std::slice::from_mut(player));
    }
}

fn controllers_for(enemies: &[Character]) -> Vec<AiController> {
    enemies
        .iter()
        .map(|e| AiController::for_enemy(e).unwrap())
        .collect()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn controller_matches_enemy_kind() {
    let snake = standing(CharacterKind::EnemySnake, 1, 300);
    let ctrl = AiController::for_enemy(&snake).unwrap();
    assert_eq!(ctrl.profile(), AiProfile::PatrolOnly);
    assert_eq!(ctrl.state(), PatrolState::MoveRight);
    assert_eq!(ctrl.start_x(), 300);
    assert_eq!(ctrl.character(), CharacterId(1));

    let slasher = standing(CharacterKind::EnemySlasher, 2, 300);
    assert_eq!(
        AiController::for_enemy(&slasher).unwrap().profile(),
        AiProfile::PatrolAndChase
    );
}

#[test]
fn player_gets_no_controller() {
    let player = standing(CharacterKind::Player, 0, 300);
    assert_eq!(
        AiController::for_enemy(&player).unwrap_err(),
        GameError::UnknownEnemyType(CharacterKind::Player)
    );
}

#[test]
fn reference_point_shifts_with_world() {
    let mut ctrl = AiController::for_enemy(&standing(CharacterKind::EnemySnake, 1, 300)).unwrap();
    ctrl.shift_patrolling_reference_point_left(50);
    assert_eq!(ctrl.start_x(), 250);
    ctrl.shift_patrolling_reference_point_right(20);
    assert_eq!(ctrl.start_x(), 270);
}

#[test]
fn controller_without_character_does_nothing() {
    let platforms = ground();
    let mut ctrl = AiController::for_enemy(&standing(CharacterKind::EnemySlasher, 5, 300)).unwrap();
    let mut others = vec![standing(CharacterKind::EnemySlasher, 6, 300)];
    ctrl.update(&mut others, &distant_player(), &platforms);
    assert_eq!((ctrl.state(), ctrl.time()), (PatrolState::MoveRight, 0));
    assert_eq!(others[0].state(), CharacterState::Standing);
}

// ── Patrolling ────────────────────────────────────────────────────────────────

#[test]
fn patrol_walks_range_stands_and_turns_around() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySnake, 1, 300)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = distant_player();

    for _ in 0..200 {
        if ctrls[0].state() == PatrolState::Stand {
            break;
        }
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[0].state(), PatrolState::Stand);
    assert!(enemies[0].x > 300 + 96);

    // The flip happens on the 100th standing tick
    for _ in 0..99 {
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[0].state(), PatrolState::Stand);
    assert_eq!(ctrls[0].time(), 99);
    assert_eq!(enemies[0].state(), CharacterState::Standing);

    step(&mut ctrls, &mut enemies, &mut player, &platforms);
    assert_eq!(ctrls[0].state(), PatrolState::MoveLeft);

    for _ in 0..400 {
        if ctrls[0].state() == PatrolState::Stand {
            break;
        }
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[0].state(), PatrolState::Stand);
    assert!(enemies[0].x < 300 - 96);
    assert!(!enemies[0].is_faced_right());

    for _ in 0..100 {
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[0].state(), PatrolState::MoveRight);
}

#[test]
fn patrol_stops_at_platform_edge() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySlasher, 1, 800)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = distant_player();

    for _ in 0..100 {
        if ctrls[0].state() == PatrolState::Stand {
            break;
        }
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[0].state(), PatrolState::Stand);
    assert!(enemies[0].x < 800 + 96);

    step(&mut ctrls, &mut enemies, &mut player, &platforms);
    assert_eq!(enemies[0].state(), CharacterState::Standing);
}

// ── Noticing the player ───────────────────────────────────────────────────────

#[test]
fn player_behind_is_not_noticed() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySlasher, 1, 300)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = standing(CharacterKind::Player, 0, 200);

    for _ in 0..50 {
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
        assert_ne!(ctrls[0].state(), PatrolState::Alarmed);
    }
}

#[test]
fn dead_player_is_not_noticed() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySlasher, 1, 300)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = standing(CharacterKind::Player, 0, 450);
    player.kill(0.0);

    for _ in 0..10 {
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[0].state(), PatrolState::MoveRight);
}

#[test]
fn snake_never_gives_chase() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySnake, 1, 300)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = standing(CharacterKind::Player, 0, 450);

    for _ in 0..300 {
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
        assert!(!matches!(
            ctrls[0].state(),
            PatrolState::Alarmed | PatrolState::Chasing
        ));
    }
}

/// Steps until every controller is chasing. Returns whether the lead enemy
/// was seen doing its alarm hop on the way.
fn run_until_chasing(
    ctrls: &mut [AiController],
    enemies: &mut [Character],
    player: &mut Character,
    platforms: &[Platform],
) -> bool {
    let mut hopped = false;
    for _ in 0..500 {
        if ctrls.iter().all(|c| c.state() == PatrolState::Chasing) {
            break;
        }
        step(ctrls, enemies, player, platforms);
        hopped |= enemies[0].state() == CharacterState::ShowingAlarm;
    }
    hopped
}

#[test]
fn alarm_then_chase() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySlasher, 1, 300)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = standing(CharacterKind::Player, 0, 450);

    step(&mut ctrls, &mut enemies, &mut player, &platforms);
    assert_eq!(ctrls[0].state(), PatrolState::Alarmed);
    // Noticing takes the whole tick; the enemy did not walk.
    assert_eq!(enemies[0].x, 300);

    let hopped = run_until_chasing(&mut ctrls, &mut enemies, &mut player, &platforms);
    assert!(hopped);
    assert_eq!(ctrls[0].state(), PatrolState::Chasing);
    assert_eq!(ctrls[0].cooldown(), 200);
    assert_eq!(enemies[0].state(), CharacterState::Standing);
}

#[test]
fn chaser_closes_in_and_strikes() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySlasher, 1, 300)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = standing(CharacterKind::Player, 0, 450);
    run_until_chasing(&mut ctrls, &mut enemies, &mut player, &platforms);

    for _ in 0..500 {
        if player.state() == CharacterState::Hit {
            break;
        }
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(player.state(), CharacterState::Hit);
    assert!(enemies[0].x > 300);
    assert!(enemies[0].within_attack_range(&player));
}

#[test]
fn losing_the_player_ends_chase_after_cooldown() {
    let platforms = ground();
    let mut enemies = vec![standing(CharacterKind::EnemySlasher, 1, 300)];
    let mut ctrls = controllers_for(&enemies);
    let mut player = standing(CharacterKind::Player, 0, 450);
    run_until_chasing(&mut ctrls, &mut enemies, &mut player, &platforms);

    // Out of sight
    player.y = -1000;
    for _ in 0..199 {
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[0].state(), PatrolState::Chasing);
    assert_eq!(ctrls[0].cooldown(), 1);

    step(&mut ctrls, &mut enemies, &mut player, &platforms);
    assert_eq!(ctrls[0].state(), PatrolState::MoveLeft);
}

#[test]
fn chasers_queue_behind_the_one_in_range() {
    let platforms = ground();
    let mut enemies = vec![
        standing(CharacterKind::EnemySlasher, 1, 400),
        standing(CharacterKind::EnemySlasher, 2, 300),
    ];
    let mut ctrls = controllers_for(&enemies);
    let mut player = standing(CharacterKind::Player, 0, 450);
    run_until_chasing(&mut ctrls, &mut enemies, &mut player, &platforms);
    assert_eq!(enemies[1].x, 300);

    for _ in 0..100 {
        step(&mut ctrls, &mut enemies, &mut player, &platforms);
    }
    assert_eq!(ctrls[1].state(), PatrolState::Chasing);
    assert_eq!(enemies[1].x, 300);
    assert!(enemies[0].within_attack_range(&player));
}

#[test]
fn patrol_state_names() {
    assert_eq!(PatrolState::Stand.to_string(), "patrolling stand");
    assert_eq!(PatrolState::Chasing.to_string(), "chasing");
}
