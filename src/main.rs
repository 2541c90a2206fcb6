mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use platformer::entities::InputSnapshot;
use platformer::level::Level;
use platformer::screen::Screen;

#[derive(Parser)]
#[command(name = "platformer")]
#[command(author, version, about = "Side-scrolling terminal platformer", long_about = None)]
struct Args {
    /// Minimum wall-clock length of one frame, in milliseconds
    #[arg(long, default_value_t = 5)]
    frame_ms: u64,

    /// Where to write the log (the terminal is busy drawing the game)
    #[arg(long, default_value = "platformer.log")]
    log_file: PathBuf,
}

// ── Held-key input ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events;
/// at 5 ms frames, 12 frames outlasts the OS key-repeat interval.
const HOLD_WINDOW: u64 = 12;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Turns raw key events into one `InputSnapshot` per frame.
///
/// Movement and climbing follow the held-key map. Jump and attack fire only
/// on the frame a press (or OS repeat) arrives.
#[derive(Default)]
struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyTracker {
    fn poll(&mut self, rx: &mpsc::Receiver<Event>) -> InputSnapshot {
        self.frame += 1;
        let mut input = InputSnapshot::default();

        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            input.quit = true
                        }
                        KeyCode::Char(' ') => input.jump = true,
                        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('f') | KeyCode::Char('F') => {
                            input.attack = true
                        }
                        _ => {}
                    }
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }

        let frame = self.frame;
        let held = &self.key_frame;
        input.left = any_held(held, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame);
        input.right = any_held(held, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame);
        input.climb_up = any_held(held, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame);
        input.climb_down = any_held(held, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame);
        input
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Puts the terminal into game mode and restores it on drop, including when
/// the game loop bails out with an error.
struct TerminalGuard {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let mut out = BufWriter::new(stdout());
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        out.execute(terminal::EnterAlternateScreen)
            .context("failed to enter alternate screen")?;
        out.execute(cursor::Hide)?;

        // Request key-release (and key-repeat) events from the terminal.
        // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

        Ok(Self { out, keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// File-only logging. The default level is INFO, with DEBUG for this crate;
/// override with RUST_LOG.
fn init_logging(path: &Path) -> Result<WorkerGuard> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,platformer=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(&args.log_file)?;

    let level = Level::default();
    // Catch level design errors before touching the terminal.
    level.build_platforms().context("invalid level platforms")?;
    level.build_ladders().context("invalid level ladders")?;

    let mut term = TerminalGuard::enter()?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    info!(frame_ms = args.frame_ms, "platformer started");
    let result = run(&mut term.out, &rx, &level, Duration::from_millis(args.frame_ms));
    info!("platformer exiting");
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    level: &Level,
    frame_len: Duration,
) -> Result<()> {
    let mut screen = Screen::default();
    let mut keys = KeyTracker::default();

    loop {
        let frame_start = Instant::now();

        let input = keys.poll(rx);
        if input.quit {
            return Ok(());
        }

        screen.step(&input, level).context("failed to start a game")?;
        display::render(out, &screen).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}
