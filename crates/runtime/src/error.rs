//! Errors surfaced by the room and simulation API.

use game_core::{EntityId, ErrorSeverity, GameError, InteractionType, TemplateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown monster template '{name}'")]
    UnknownTemplate { name: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("no live monster with id {id}")]
    UnknownMonster { id: EntityId },

    #[error("{interaction} is not delivered by a player weapon")]
    NotAWeapon { interaction: InteractionType },

    #[error("{interaction} carries a payload the room cannot supply")]
    PayloadRequired { interaction: InteractionType },

    #[error("simulation requires a room layout before building")]
    MissingLayout,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownTemplate { .. } | Self::MissingLayout => ErrorSeverity::Validation,
            Self::Template(error) => error.severity(),
            Self::UnknownMonster { .. } | Self::NotAWeapon { .. } | Self::PayloadRequired { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTemplate { .. } => "RUNTIME_UNKNOWN_TEMPLATE",
            Self::Template(error) => error.error_code(),
            Self::UnknownMonster { .. } => "RUNTIME_UNKNOWN_MONSTER",
            Self::NotAWeapon { .. } => "RUNTIME_NOT_A_WEAPON",
            Self::PayloadRequired { .. } => "RUNTIME_PAYLOAD_REQUIRED",
            Self::MissingLayout => "RUNTIME_MISSING_LAYOUT",
        }
    }
}
