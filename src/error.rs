use thiserror::Error;

use crate::entities::CharacterKind;

/// Axis a decoration was rejected on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Failures raised while building a level. The per-frame simulation never fails.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("platform width {width} must be at least {min}")]
    PlatformTooNarrow { width: i32, min: i32 },

    #[error("invalid ladder width {width}, must be at least {min}")]
    LadderTooNarrow { width: i32, min: i32 },

    #[error("invalid ladder height {height}, must be at least {min}")]
    LadderTooShort { height: i32, min: i32 },

    #[error("invalid decoration position {axis}: {offset}, decoration exceeds platform size ({limit})")]
    DecorationOutOfBounds { axis: Axis, offset: i32, limit: i32 },

    #[error("unknown enemy type: {0:?}")]
    UnknownEnemyType(CharacterKind),
}

pub type GameResult<T> = Result<T, GameError>;
