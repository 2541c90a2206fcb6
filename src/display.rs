/// Terminal rendering. All terminal output lives here.
///
/// The simulation works in window pixels; here every 8x16 pixel block becomes
/// one terminal cell. Nothing in this module changes game state.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use platformer::entities::{CharacterKind, GameState, Rect};
use platformer::screen::Screen;
use platformer::sprites::{draw_list, DrawCommand, Drawable};

const CELL_W: i32 = 8;
const CELL_H: i32 = 16;
/// Row 0 holds the HUD; the world starts below it.
const WORLD_TOP_ROW: i32 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_GRASS: Color = Color::Green;
const C_SOIL: Color = Color::DarkYellow;
const C_DECORATION: Color = Color::Magenta;
const C_LADDER: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_SLASHER: Color = Color::Red;
const C_SNAKE: Color = Color::DarkGreen;
const C_DEAD: Color = Color::DarkGrey;
const C_SWOOSH: Color = Color::Cyan;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS: &str = "← → : Move   ↑ ↓ : Climb   SPACE : Jump   X : Attack   Q : Quit";

/// Terminal area available for drawing.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    /// Terminal cell for a window-pixel position, if it is on screen.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 {
            return None;
        }
        let col = x / CELL_W;
        let row = y / CELL_H + WORLD_TOP_ROW;
        // Keep the last row free for the controls hint.
        if col >= self.cols as i32 || row >= self.rows as i32 - 1 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport { cols, rows };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match screen {
        Screen::Start => draw_title(out, &view)?,
        Screen::Play(state) => {
            draw_hud(out, state)?;
            for cmd in draw_list(state) {
                draw_command(out, &view, &cmd)?;
            }
            draw_controls_hint(out, &view)?;
        }
        Screen::Over { frames } => draw_game_over(out, &view, *frames)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Frame:{:>7}  Enemies:{:>2}  Distance:{:>5}  [{}]",
        state.frame,
        state.enemies.len(),
        state.scroll_x,
        state.player.state(),
    )))?;
    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_command<W: Write>(out: &mut W, view: &Viewport, cmd: &DrawCommand) -> std::io::Result<()> {
    match cmd.drawable {
        Drawable::Platform => draw_platform(out, view, &cmd.dst),
        Drawable::Decoration => put(out, view, cmd.dst.x, cmd.dst.y, C_DECORATION, "*"),
        Drawable::Ladder => draw_ladder(out, view, &cmd.dst),
        Drawable::Character { kind, dead } => draw_character(out, view, cmd, kind, dead),
        Drawable::Swoosh => {
            let glyph = if cmd.flip { "(" } else { ")" };
            put(out, view, cmd.dst.x, cmd.dst.y, C_SWOOSH, glyph)
        }
    }
}

fn draw_platform<W: Write>(out: &mut W, view: &Viewport, r: &Rect) -> std::io::Result<()> {
    let mut y = r.top();
    while y < r.bottom() {
        let (color, glyph) = if y == r.top() { (C_GRASS, "▀") } else { (C_SOIL, "▓") };
        let mut x = r.left();
        while x < r.right() {
            put(out, view, x, y, color, glyph)?;
            x += CELL_W;
        }
        y += CELL_H;
    }
    Ok(())
}

fn draw_ladder<W: Write>(out: &mut W, view: &Viewport, r: &Rect) -> std::io::Result<()> {
    let mut y = r.top();
    while y < r.bottom() {
        put(out, view, r.x, y, C_LADDER, "H")?;
        y += CELL_H;
    }
    Ok(())
}

/// Two cells tall: a head that shows the facing direction over a body glyph.
fn draw_character<W: Write>(
    out: &mut W,
    view: &Viewport,
    cmd: &DrawCommand,
    kind: CharacterKind,
    dead: bool,
) -> std::io::Result<()> {
    let (color, body) = match (kind, dead) {
        (_, true) => (C_DEAD, "x"),
        (CharacterKind::Player, _) => (C_PLAYER, "@"),
        (CharacterKind::EnemySlasher, _) => (C_SLASHER, "S"),
        (CharacterKind::EnemySnake, _) => (C_SNAKE, "~"),
    };
    // Walk cycles alternate the head glyph so motion is visible.
    let head = match (cmd.flip, cmd.frame % 2) {
        (false, 0) => "▸",
        (false, _) => "›",
        (true, 0) => "◂",
        (true, _) => "‹",
    };
    let feet = cmd.dst.bottom() - 1;
    put(out, view, cmd.dst.x, feet, color, body)?;
    put(out, view, cmd.dst.x, feet - CELL_H, color, head)
}

fn put<W: Write>(out: &mut W, view: &Viewport, x: i32, y: i32, color: Color, glyph: &str) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(x, y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS))?;
    Ok(())
}

// ── Title & game-over screens ─────────────────────────────────────────────────

fn draw_centered<W: Write>(out: &mut W, view: &Viewport, row: u16, color: Color, msg: &str) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(msg))?;
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = view.rows / 2;
    draw_centered(out, view, cy.saturating_sub(4), Color::Cyan, "★  SIMPLE  PLATFORMER  ★")?;
    draw_centered(out, view, cy.saturating_sub(2), Color::White, "Press SPACE to start")?;
    draw_centered(out, view, cy, C_SLASHER, "S  slasher: spots you, gives chase, swings")?;
    draw_centered(out, view, cy + 1, C_SNAKE, "~  snake: patrols, bites on contact")?;
    draw_centered(out, view, cy + 3, C_HINT, CONTROLS)?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, frames: u64) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let start_row = (view.rows / 2).saturating_sub(3);
    for (i, (msg, color)) in lines.iter().enumerate() {
        draw_centered(out, view, start_row + i as u16, *color, msg)?;
    }
    let survived = format!("Survived {} frames", frames);
    draw_centered(out, view, start_row + 3, Color::Yellow, &survived)?;
    draw_centered(out, view, start_row + 4, Color::White, "SPACE - Title  Q - Quit")?;
    Ok(())
}
