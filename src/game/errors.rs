use thiserror::Error;

/// Failures raised by game session operations.
///
/// Every variant is recoverable; a failed operation leaves the session
/// exactly as it was. The variant name doubles as the stable `kind` code
/// reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error, strum_macros::AsRefStr)]
pub enum GameError {
    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("That player name already exists: {0}")]
    DuplicatePlayer(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Round not found: {0}")]
    RoundNotFound(String),

    #[error("Invalid round index {index} (game has {round_count} rounds)")]
    RoundIndexOutOfRange { index: i64, round_count: usize },

    #[error("Map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No answer has been set for round {0} yet")]
    AnswerNotSet(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

impl GameError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &str {
        self.as_ref()
    }

    /// Whether the error means the addressed round does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, GameError::RoundNotFound(_))
    }
}
