//! Room layout loader.

use std::path::Path;

use crate::catalog::MonsterCatalog;
use crate::layout::RoomLayout;
use crate::loaders::{LoadResult, read_file};

/// Largest room side, in tiles.
const MAX_ROOM_SIDE: i32 = 256;

/// Loader for room layouts from RON files.
pub struct RoomLoader;

impl RoomLoader {
    /// Load a room layout and check it against the monster catalog.
    pub fn load(path: &Path, catalog: &MonsterCatalog) -> LoadResult<RoomLayout> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
            .map_err(|e| anyhow::anyhow!("Invalid room file {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, catalog: &MonsterCatalog) -> LoadResult<RoomLayout> {
        let layout: RoomLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse room RON: {}", e))?;
        Self::validate(&layout, catalog)?;
        Ok(layout)
    }

    /// Checks dimensions, tile coordinates and monster placements.
    pub fn validate(layout: &RoomLayout, catalog: &MonsterCatalog) -> LoadResult<()> {
        let sides = 1..=MAX_ROOM_SIDE;
        if !sides.contains(&layout.width) || !sides.contains(&layout.height) {
            anyhow::bail!(
                "room '{}' is {}x{} tiles; each side must be within 1..={}",
                layout.name,
                layout.width,
                layout.height,
                MAX_ROOM_SIDE
            );
        }

        if let Some(&(x, y, kind)) = layout
            .tiles
            .iter()
            .find(|(x, y, _)| !layout.contains_tile(*x, *y))
        {
            anyhow::bail!("room '{}' places {:?} outside the room at ({}, {})", layout.name, kind, x, y);
        }

        for placement in &layout.monsters {
            if !catalog.contains(&placement.template) {
                anyhow::bail!(
                    "room '{}' places unknown monster '{}'",
                    layout.name,
                    placement.template
                );
            }
            if !placement.position.is_finite() {
                anyhow::bail!(
                    "room '{}' places '{}' at a non-finite position",
                    layout.name,
                    placement.template
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use game_core::{BehaviorSpec, MonsterTemplate, PropertyValue, SpawnProperties};

    use super::*;
    use crate::layout::TileKind;

    fn catalog() -> MonsterCatalog {
        [MonsterTemplate::new("octorok", 1, BehaviorSpec::Wander { shoot: None })]
            .into_iter()
            .collect()
    }

    const POND: &str = r#"(
        name: "pond",
        width: 4,
        height: 3,
        tiles: [(1, 1, Water), (3, 0, Wall)],
        player: Some((8.0, 40.0)),
        monsters: [
            (template: "octorok", position: (56.0, 8.0), properties: {"direction": "left"}),
        ],
    )"#;

    #[test]
    fn parses_layouts() {
        let layout = RoomLoader::parse(POND, &catalog()).unwrap();
        assert_eq!((layout.width, layout.height), (4, 3));
        assert_eq!(layout.tiles[0], (1, 1, TileKind::Water));
        assert_eq!(layout.monsters.len(), 1);
        assert_eq!(
            layout.monsters[0].properties,
            SpawnProperties::new().with("direction", PropertyValue::Text("left".to_owned()))
        );
    }

    #[test]
    fn rejects_unknown_monsters() {
        let layout = POND.replace("\"octorok\"", "\"moblin\"");
        let error = RoomLoader::parse(&layout, &catalog()).unwrap_err();
        assert!(error.to_string().contains("moblin"));
    }

    #[test]
    fn rejects_tiles_outside_the_room() {
        let layout = POND.replace("(3, 0, Wall)", "(4, 0, Wall)");
        let error = RoomLoader::parse(&layout, &catalog()).unwrap_err();
        assert!(error.to_string().contains("outside"));
    }

    #[test]
    fn rejects_empty_rooms() {
        let layout = RoomLayout::new("void", 0, 5);
        assert!(RoomLoader::validate(&layout, &catalog()).is_err());
    }
}
