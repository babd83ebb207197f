//! Room layouts.

use game_core::geometry::Vec2;
use game_core::{SpawnProperties, TileFlags};

/// What a tile is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Floor,
    Wall,
    Hole,
    Water,
    Lava,
    /// Blocks walkers, not flyers.
    Ledge,
}

impl TileKind {
    pub const fn flags(self) -> TileFlags {
        match self {
            Self::Floor => TileFlags::empty(),
            Self::Wall => TileFlags::SOLID,
            Self::Hole => TileFlags::HOLE,
            Self::Water => TileFlags::WATER,
            Self::Lava => TileFlags::LAVA,
            Self::Ledge => TileFlags::LEDGE,
        }
    }
}

/// A monster to spawn when the room loads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Name of a template in the monster catalog.
    pub template: String,
    pub position: Vec2,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: SpawnProperties,
}

/// Static description of a room.
///
/// Tiles not listed are floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomLayout {
    pub name: String,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiles: Vec<(i32, i32, TileKind)>,
    /// Where the player stands, if the room has one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub player: Option<Vec2>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monsters: Vec<Placement>,
}

impl RoomLayout {
    /// An empty floor of `width` by `height` tiles.
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            tiles: Vec::new(),
            player: None,
            monsters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tile(mut self, x: i32, y: i32, kind: TileKind) -> Self {
        self.tiles.push((x, y, kind));
        self
    }

    #[must_use]
    pub fn with_player(mut self, position: Vec2) -> Self {
        self.player = Some(position);
        self
    }

    #[must_use]
    pub fn with_monster(
        mut self,
        template: impl Into<String>,
        position: Vec2,
        properties: SpawnProperties,
    ) -> Self {
        self.monsters.push(Placement {
            template: template.into(),
            position,
            properties,
        });
        self
    }

    pub fn contains_tile(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Row-major tile flags. Later entries for the same tile win and
    /// out-of-range entries are ignored.
    pub fn tile_grid(&self) -> Vec<TileFlags> {
        let size = (self.width.max(0) * self.height.max(0)) as usize;
        let mut grid = vec![TileFlags::empty(); size];
        for &(x, y, kind) in &self.tiles {
            if self.contains_tile(x, y) {
                grid[(y * self.width + x) as usize] = kind.flags();
            }
        }
        grid
    }
}
