//! Deterministic monster behavior and combat-interaction engine.
//!
//! `game-core` decides how non-player creatures move, when they attack and how
//! they respond to being hit. It is invoked once per tick per monster by a
//! room that owns physics, rendering and persistence:
//!
//! - [`Monster::update_ai`] advances a monster by one tick and writes a
//!   velocity for the external integrator.
//! - [`Monster::trigger`] is the sole entry point through which the collision
//!   pass makes a monster react to a hit, walking that interaction type's
//!   reaction chain in registration order.
//!
//! Modules are organized by responsibility:
//! - [`interaction`] hosts the interaction taxonomy, payloads, the reaction
//!   library and the per-monster dispatcher
//! - [`movement`] provides the angle-quantized steering algorithms
//! - [`script`] builds multi-phase behaviors on the generic state machine
//! - [`monster`] composes the above from a data-driven [`MonsterTemplate`]
//! - [`env`] declares the collaborator contracts the room implements
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod monster;
pub mod movement;
pub mod script;

#[cfg(test)]
pub(crate) mod testing;

pub use config::GameConfig;
pub use entity::{EntityId, Tick};
pub use env::{
    Animation, EffectKind, Footprint, PcgRng, PhysicsOracle, PlayerView, Presentation,
    ProjectileKind, RngOracle, RoomControl, RoomEvent, Sound, Spawn, SpawnKind, TileFlags,
    TileLocation, TileView, World, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Angle, CollisionBox, Direction, Rect, Rotation, Winding};
pub use interaction::{
    ChainMode, InteractionCategory, InteractionDispatcher, InteractionType, Interceptable, Payload,
    PayloadShape, Reaction, ReactionOverride, ReactionSpec, RegistrationError, Sender,
    SenderKind, SenderReaction, SubjectReaction, ToolKind, ToolRef, WeaponItem, WeaponLevel,
};
pub use monster::{
    ActiveStatus, Aim, BehaviorSpec, Body, BoxKind, Health, Hurt, Knockback, Monster, MonsterFlags,
    MonsterTemplate, MovementSpec, PhaseMachine, PropertyValue, ShootSpec, SpawnProperties,
    StatusKind, SteerSpec, TemplateError, TemplateFlags, TickRange,
};
pub use movement::{ChargeMotion, Homing, Wanderer};
pub use script::{
    ChargeSpec, ChargeStop, ElectrocuteSpec, FlipOverSpec, Phase, ScriptSpec, SubmergeSpec,
};
