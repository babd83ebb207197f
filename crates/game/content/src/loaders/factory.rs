//! Content factory for loading a data directory.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::catalog::MonsterCatalog;
use crate::layout::RoomLayout;
use crate::loaders::{ConfigLoader, LoadResult, MonsterLoader, RoomLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── monsters.ron
/// └── rooms/
///     └── river.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<MonsterCatalog> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load a room from `rooms/{room_name}.ron`.
    pub fn load_room(&self, room_name: &str, catalog: &MonsterCatalog) -> LoadResult<RoomLayout> {
        let path = self.data_dir.join("rooms").join(format!("{}.ron", room_name));
        RoomLoader::load(&path, catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
