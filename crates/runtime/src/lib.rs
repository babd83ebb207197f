//! Reference room that drives `game-core` monsters.
//!
//! `game-core` never integrates velocities, detects overlaps or owns entity
//! lifetimes. This crate does, in the smallest way that exercises every
//! collaborator contract a monster relies on:
//!
//! - [`room`] hosts the tile map, projectiles, the player stand-in and the
//!   per-tick pass order
//! - [`simulation`] wraps a room in a builder-configured headless run
//! - [`error`] is the crate's error type
pub mod error;
pub mod room;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use room::cues::{Cue, CueLog};
pub use room::entities::{HazardTile, PlayerStandIn, Projectile, ToolSwing};
pub use room::tiles::TileMap;
pub use room::world::RoomWorld;
pub use room::{Room, RoomStats};
pub use simulation::{RunSummary, RuntimeConfig, Simulation, SimulationBuilder};
