//! Combat interactions between monsters and everything that touches them.
//!
//! The collision pass classifies every contact as an [`InteractionType`] and
//! calls [`Monster::trigger`](crate::Monster::trigger). The monster's
//! [`InteractionDispatcher`] maps that type to an ordered chain of
//! [`Reaction`]s built from the subject library in [`reactions`] and the
//! sender library in [`sender_reactions`].

mod dispatcher;
mod kind;
mod payload;
mod reaction;
pub mod reactions;
pub mod sender_reactions;
mod sender;
mod spec;

pub use dispatcher::{InteractionDispatcher, RegistrationError};
pub use kind::{InteractionCategory, InteractionType};
pub use payload::{Payload, PayloadShape, ToolKind, ToolRef, WeaponItem, WeaponLevel};
pub use reaction::Reaction;
pub use sender::{Interceptable, Sender, SenderKind};
pub use spec::{
    ChainMode, ReactionOverride, ReactionSpec, SenderReaction, SubjectReaction, default_reactions,
};
