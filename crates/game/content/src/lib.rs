//! Data-driven monster content.
//!
//! This crate houses the static data a room is built from and the loaders
//! that read it:
//! - Monster templates (data-driven via RON)
//! - Room layouts: tiles, player start and monster placements (RON)
//! - Game configuration (TOML)
//!
//! A copy of the bundled data is compiled in, so a room can be simulated
//! without any files on disk.

pub mod catalog;
pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::MonsterCatalog;
pub use layout::{Placement, RoomLayout, TileKind};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, MonsterLoader, RoomLoader, builtin_config,
    builtin_monsters, builtin_room,
};
