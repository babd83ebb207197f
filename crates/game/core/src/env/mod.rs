//! Traits describing the room a monster lives in.
//!
//! Monsters never own physics, rendering or entity lifetimes. They reach the
//! outside world through [`RoomControl`], which bundles the collision
//! queries of [`PhysicsOracle`], the cue sink of [`Presentation`], the
//! room's [`RngOracle`] and deferred spawn and event requests.
mod physics;
mod presentation;
mod rng;
mod room;

pub use physics::{Footprint, PhysicsOracle, TileFlags, TileLocation, TileView};
pub use presentation::{Animation, EffectKind, Presentation, ProjectileKind, Sound};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use room::{PlayerView, RoomControl, RoomEvent, Spawn, SpawnKind, World};
