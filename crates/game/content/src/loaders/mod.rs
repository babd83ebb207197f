//! Content loaders for reading game data from files.
//!
//! Monster templates and room layouts are RON, the game configuration is
//! TOML. Every loader has a `parse` twin that takes the text directly, which
//! is also how the bundled copies in [`builtin`] are read.

pub mod builtin;
pub mod config;
pub mod factory;
pub mod monsters;
pub mod room;

pub use builtin::{builtin_config, builtin_monsters, builtin_room};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use monsters::MonsterLoader;
pub use room::RoomLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
