//! Per-monster table from interaction type to reaction chain.

use std::sync::Arc;

use crate::error::{ErrorSeverity, GameError};

use super::kind::InteractionType;
use super::payload::PayloadShape;
use super::reaction::Reaction;

/// A reaction was registered for an interaction type whose payload it
/// cannot read.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error(
        "reaction '{reaction}' reads a {required} payload but {interaction} always carries a {supplied} payload"
    )]
    PayloadMismatch {
        interaction: InteractionType,
        reaction: &'static str,
        required: PayloadShape,
        supplied: PayloadShape,
    },
}

impl GameError for RegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PayloadMismatch { .. } => "REGISTRATION_PAYLOAD_MISMATCH",
        }
    }
}

/// Reaction chains indexed by [`InteractionType`].
///
/// Every type starts with an empty chain, so triggering an unregistered type
/// is a no-op. Chains are stored behind `Arc` so a trigger can hold its
/// chain while reactions mutate the monster that owns this table.
#[derive(Clone, Debug)]
pub struct InteractionDispatcher {
    chains: Vec<Arc<[Reaction]>>,
}

impl InteractionDispatcher {
    pub fn new() -> Self {
        Self {
            chains: (0..InteractionType::COUNT).map(|_| empty_chain()).collect(),
        }
    }

    /// Replaces the chain for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if any reaction reads a payload variant `kind` never carries.
    pub fn set_reaction(&mut self, kind: InteractionType, reactions: Vec<Reaction>) {
        if let Err(error) = self.try_set_reaction(kind, reactions) {
            panic!("{error}");
        }
    }

    /// Appends one reaction to the chain for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the reaction reads a payload variant `kind` never carries.
    pub fn add_reaction(&mut self, kind: InteractionType, reaction: Reaction) {
        if let Err(error) = self.try_add_reaction(kind, reaction) {
            panic!("{error}");
        }
    }

    /// Fallible form of [`set_reaction`](Self::set_reaction). On error the
    /// existing chain is left untouched.
    pub fn try_set_reaction(
        &mut self,
        kind: InteractionType,
        reactions: Vec<Reaction>,
    ) -> Result<(), RegistrationError> {
        for reaction in &reactions {
            check_payload(kind, reaction)?;
        }
        self.chains[kind.index()] = Arc::from(reactions);
        Ok(())
    }

    /// Fallible form of [`add_reaction`](Self::add_reaction).
    pub fn try_add_reaction(
        &mut self,
        kind: InteractionType,
        reaction: Reaction,
    ) -> Result<(), RegistrationError> {
        check_payload(kind, &reaction)?;
        let slot = &mut self.chains[kind.index()];
        let mut chain = slot.to_vec();
        chain.push(reaction);
        *slot = Arc::from(chain);
        Ok(())
    }

    pub fn clear(&mut self, kind: InteractionType) {
        self.chains[kind.index()] = empty_chain();
    }

    /// Shared handle to the chain for `kind`, in registration order.
    pub fn chain(&self, kind: InteractionType) -> Arc<[Reaction]> {
        Arc::clone(&self.chains[kind.index()])
    }

    pub fn is_empty(&self, kind: InteractionType) -> bool {
        self.chains[kind.index()].is_empty()
    }

    /// Names of the reactions registered for `kind`.
    pub fn reaction_names(&self, kind: InteractionType) -> Vec<&'static str> {
        self.chains[kind.index()].iter().map(Reaction::name).collect()
    }
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_chain() -> Arc<[Reaction]> {
    Arc::from(Vec::new())
}

fn check_payload(kind: InteractionType, reaction: &Reaction) -> Result<(), RegistrationError> {
    let supplied = kind.payload_shape();
    match reaction.required_shape() {
        Some(required) if required != supplied => Err(RegistrationError::PayloadMismatch {
            interaction: kind,
            reaction: reaction.name(),
            required,
            supplied,
        }),
        _ => Ok(()),
    }
}
