//! Content compiled into the crate.

use game_core::GameConfig;

use crate::catalog::MonsterCatalog;
use crate::layout::RoomLayout;
use crate::loaders::{ConfigLoader, LoadResult, MonsterLoader, RoomLoader};

const CONFIG: &str = include_str!("../../data/config.toml");
const MONSTERS: &str = include_str!("../../data/monsters.ron");
const RIVER: &str = include_str!("../../data/rooms/river.ron");

pub fn builtin_config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn builtin_monsters() -> LoadResult<MonsterCatalog> {
    MonsterLoader::parse(MONSTERS)
}

/// The bundled river room, checked against `catalog`.
pub fn builtin_room(catalog: &MonsterCatalog) -> LoadResult<RoomLayout> {
    RoomLoader::parse(RIVER, catalog)
}

#[cfg(test)]
mod tests {
    use game_core::{BehaviorSpec, ScriptSpec, TemplateFlags};

    use super::*;

    #[test]
    fn bundled_content_loads() {
        let config = builtin_config().unwrap();
        let catalog = builtin_monsters().unwrap();
        let room = builtin_room(&catalog).unwrap();

        assert_eq!(config.tile_size, 16.0);
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec!["biri", "keese", "octorok", "river_zora", "rope", "spiked_beetle"]
        );
        assert_eq!(room.monsters.len(), 6);
    }

    #[test]
    fn bundled_monsters_keep_their_traits() {
        let catalog = builtin_monsters().unwrap();
        let zora = catalog.get("river_zora").unwrap();
        assert!(zora.flags.contains(TemplateFlags::IGNORES_HAZARDS | TemplateFlags::NO_KNOCKBACK));
        assert!(matches!(
            zora.behavior,
            BehaviorSpec::Script(ScriptSpec::Submerge(_))
        ));
        assert!(catalog.get("keese").unwrap().flags.contains(TemplateFlags::FLYING));
    }
}
