use core::fmt;
use std::sync::Arc;

use crate::env::World;
use crate::monster::Monster;

use super::payload::{Payload, PayloadShape};
use super::sender::Sender;

type ReactionFn = dyn Fn(&mut Monster, &mut dyn Sender, &Payload, &mut World) + Send + Sync;

/// One step of a reaction chain.
///
/// A reaction may mutate the monster it is registered on, the sender that
/// triggered it and the room. Reactions that read payload data declare the
/// [`PayloadShape`] they need so mismatched registrations are rejected up
/// front.
#[derive(Clone)]
pub struct Reaction {
    name: &'static str,
    requires: Option<PayloadShape>,
    run: Arc<ReactionFn>,
}

impl Reaction {
    pub fn new<F>(name: &'static str, run: F) -> Self
    where
        F: Fn(&mut Monster, &mut dyn Sender, &Payload, &mut World) + Send + Sync + 'static,
    {
        Self {
            name,
            requires: None,
            run: Arc::new(run),
        }
    }

    /// Declares the payload variant this reaction reads.
    #[must_use]
    pub fn requiring(mut self, shape: PayloadShape) -> Self {
        self.requires = Some(shape);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn required_shape(&self) -> Option<PayloadShape> {
        self.requires
    }

    pub fn invoke(
        &self,
        monster: &mut Monster,
        sender: &mut dyn Sender,
        payload: &Payload,
        world: &mut World,
    ) {
        (self.run)(monster, sender, payload, world);
    }
}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}
