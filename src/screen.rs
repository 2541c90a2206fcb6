/// Top-level screen flow: title, running game, game over.
///
/// The binary owns one `Screen` and steps it once per frame. A `GameState`
/// only exists while playing; it is built when leaving the title screen and
/// dropped when the game ends.

use tracing::info;

use crate::compute::{apply_input, init_state, tick};
use crate::entities::{GameStatus, GameState, InputSnapshot};
use crate::error::GameResult;
use crate::level::Level;

#[derive(Clone, Debug, Default)]
pub enum Screen {
    #[default]
    Start,
    Play(Box<GameState>),
    Over {
        /// Frames the finished game lasted.
        frames: u64,
    },
}

impl Screen {
    /// Advance one frame.
    pub fn step(&mut self, input: &InputSnapshot, level: &Level) -> GameResult<()> {
        let next = match self {
            Screen::Start => {
                if !input.confirm() {
                    return Ok(());
                }
                info!("starting new game");
                Screen::Play(Box::new(init_state(level)?))
            }
            Screen::Play(state) => {
                apply_input(state, input);
                tick(state);
                if state.status != GameStatus::GameOver {
                    return Ok(());
                }
                Screen::Over { frames: state.frame }
            }
            Screen::Over { .. } => {
                if !input.confirm() {
                    return Ok(());
                }
                Screen::Start
            }
        };
        *self = next;
        Ok(())
    }

    pub fn game(&self) -> Option<&GameState> {
        match self {
            Screen::Play(state) => Some(state.as_ref()),
            _ => None,
        }
    }
}
