//! Common error infrastructure for game-core.
//!
//! Domain-specific errors live next to the code that raises them:
//! [`RegistrationError`](crate::interaction::RegistrationError) in the
//! interaction module and [`TemplateError`](crate::monster::TemplateError) in
//! the monster module. Both implement [`GameError`].
//!
//! Runtime misuse that indicates a programming error (registering a reaction
//! for the wrong payload shape through the panicking API, beginning an
//! unregistered phase) panics instead of returning an error.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the operation may succeed with different input
/// - **Validation**: invalid configuration that must be fixed before use
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted simulation state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable, upper snake case `error_code` per variant
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
