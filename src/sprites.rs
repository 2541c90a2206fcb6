/// What to draw this frame. The simulation never draws; it hands the renderer
/// a list of destination rectangles, sheet cells and flip flags.

use crate::animation::SWOOSH_FRAMES;
use crate::character::{Character, CharacterState};
use crate::entities::{CharacterKind, GameState, Rect, SheetCell};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sheet {
    Background,
    Characters,
    Swoosh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drawable {
    Platform,
    Decoration,
    Ladder,
    Character { kind: CharacterKind, dead: bool },
    Swoosh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    pub drawable: Drawable,
    pub sheet: Sheet,
    /// Sheet cell to copy from. For platforms and ladders, the tile the
    /// renderer repeats across the destination.
    pub source: SheetCell,
    /// Index of `source` within its animation.
    pub frame: usize,
    /// Destination in window pixels, centred.
    pub dst: Rect,
    /// Mirror horizontally (the sprite faces left).
    pub flip: bool,
}

/// Back to front: level geometry, enemies, player, swooshes.
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut out = Vec::new();

    for p in &state.platforms {
        out.push(DrawCommand {
            drawable: Drawable::Platform,
            sheet: Sheet::Background,
            source: p.tiles().top_middle,
            frame: 0,
            dst: p.rect(),
            flip: false,
        });
        for d in p.decorations() {
            out.push(DrawCommand {
                drawable: Drawable::Decoration,
                sheet: Sheet::Background,
                source: d.cell,
                frame: 0,
                dst: p.decoration_rect(d),
                flip: false,
            });
        }
    }

    for l in &state.ladders {
        out.push(DrawCommand {
            drawable: Drawable::Ladder,
            sheet: Sheet::Background,
            source: l.tiles().mid,
            frame: 0,
            dst: l.rect(),
            flip: false,
        });
    }

    for e in &state.enemies {
        push_character(&mut out, e);
    }
    push_character(&mut out, &state.player);

    for ch in state.enemies.iter().chain(std::iter::once(&state.player)) {
        for s in ch.swooshes() {
            let frame = s.frame_index();
            out.push(DrawCommand {
                drawable: Drawable::Swoosh,
                sheet: Sheet::Swoosh,
                source: SWOOSH_FRAMES[frame],
                frame,
                dst: s.rect(),
                flip: !s.faced_right,
            });
        }
    }

    out
}

fn push_character(out: &mut Vec<DrawCommand>, ch: &Character) {
    out.push(DrawCommand {
        drawable: Drawable::Character {
            kind: ch.kind(),
            dead: ch.state() == CharacterState::Dead,
        },
        sheet: Sheet::Characters,
        source: ch.displayed_frame(),
        frame: ch.frame_index(),
        dst: ch.sprite_rect(),
        flip: !ch.is_faced_right(),
    });
}
