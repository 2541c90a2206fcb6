/// Level layouts: where platforms, ladders and enemies are when a game starts.

use crate::constants::{TILE_DEST_HEIGHT as TH, TILE_DEST_WIDTH as TW};
use crate::entities::{CharacterKind, Ladder, Platform};
use crate::error::GameResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationKind {
    UpperLeft,
    UpperMiddle,
    UpperRight,
    LowerMiddle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecorationSpec {
    pub kind: DecorationKind,
    pub dx: i32,
    pub dy: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformSpec {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub decorations: Vec<DecorationSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LadderSpec {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub kind: CharacterKind,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub player_spawn: (i32, i32),
    pub platforms: Vec<PlatformSpec>,
    pub ladders: Vec<LadderSpec>,
    pub enemies: Vec<EnemySpawn>,
}

fn platform(x: i32, y: i32, w: i32, h: i32) -> PlatformSpec {
    PlatformSpec {
        x,
        y,
        w,
        h,
        decorations: Vec::new(),
    }
}

fn decoration(kind: DecorationKind, dx: i32, dy: i32) -> DecorationSpec {
    DecorationSpec { kind, dx, dy }
}

impl Default for Level {
    /// The built-in stage, laid out on the 32px tile grid.
    fn default() -> Self {
        let mut start = platform(TW * 2, TH * 14, TW * 5, TH * 5);
        start.decorations = vec![
            decoration(DecorationKind::UpperLeft, 0, 0),
            decoration(DecorationKind::UpperMiddle, TW, 0),
            decoration(DecorationKind::UpperRight, TW * 2, 0),
            decoration(DecorationKind::LowerMiddle, TW, TH),
        ];

        Level {
            player_spawn: (TW, TH),
            platforms: vec![
                start,
                platform(TW * 6, TH * 12, TW * 5, TH * 8),
                platform(TW * 19, TH * 14, TW * 22, TH * 5),
                platform(TW * 22, TH * 7, TW * 5, TH),
                platform(TW * 34, TH * 11, TW * 6, TH * 4),
                platform(TW * 45, TH * 13, TW * 10, TH * 6),
            ],
            ladders: vec![LadderSpec {
                x: TW * 22,
                y: TH * 9,
                w: TW,
                h: TH * 5,
            }],
            enemies: vec![
                EnemySpawn {
                    kind: CharacterKind::EnemySlasher,
                    x: TW * 16,
                    y: TH * 8,
                },
                EnemySpawn {
                    kind: CharacterKind::EnemySnake,
                    x: TW * 26,
                    y: TH * 8,
                },
                EnemySpawn {
                    kind: CharacterKind::EnemySlasher,
                    x: TW * 34,
                    y: TH * 6,
                },
                EnemySpawn {
                    kind: CharacterKind::EnemySnake,
                    x: TW * 44,
                    y: TH * 8,
                },
            ],
        }
    }
}

impl Level {
    pub fn build_platforms(&self) -> GameResult<Vec<Platform>> {
        self.platforms
            .iter()
            .map(|spec| {
                let mut p = Platform::walkable(spec.x, spec.y, spec.w, spec.h)?;
                for d in &spec.decorations {
                    match d.kind {
                        DecorationKind::UpperLeft => p.add_upper_left_decoration(d.dx, d.dy)?,
                        DecorationKind::UpperMiddle => p.add_upper_middle_decoration(d.dx, d.dy)?,
                        DecorationKind::UpperRight => p.add_upper_right_decoration(d.dx, d.dy)?,
                        DecorationKind::LowerMiddle => p.add_lower_middle_decoration(d.dx, d.dy)?,
                    }
                }
                Ok(p)
            })
            .collect()
    }

    pub fn build_ladders(&self) -> GameResult<Vec<Ladder>> {
        self.ladders
            .iter()
            .map(|l| Ladder::new(l.x, l.y, l.w, l.h))
            .collect()
    }
}
