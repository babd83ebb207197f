//! Static tile grid served through [`game_core::PhysicsOracle`] queries.

use game_content::RoomLayout;
use game_core::geometry::Vec2;
use game_core::{CollisionBox, Rect, TileFlags, TileLocation, TileView};

/// Row-major grid of tile flags.
///
/// Holds immutable room structure; nothing changes it during a run.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    width: i32,
    height: i32,
    tile_size: f32,
    tiles: Vec<TileFlags>,
}

impl TileMap {
    /// An empty floor of `width` by `height` tiles.
    pub fn open(width: i32, height: i32, tile_size: f32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tile_size,
            tiles: vec![TileFlags::empty(); size],
        }
    }

    pub fn from_layout(layout: &RoomLayout, tile_size: f32) -> Self {
        Self {
            width: layout.width,
            height: layout.height,
            tile_size,
            tiles: layout.tile_grid(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Overwrites one tile. Out-of-range locations are ignored.
    pub fn set(&mut self, location: TileLocation, flags: TileFlags) {
        if let Some(index) = self.index(location) {
            self.tiles[index] = flags;
        }
    }

    pub fn get(&self, location: TileLocation) -> Option<TileView> {
        self.index(location).map(|index| TileView {
            location,
            flags: self.tiles[index],
        })
    }

    /// World-space rectangle covered by the grid.
    pub fn bounds(&self) -> Rect {
        Rect {
            min: Vec2::ZERO,
            max: Vec2::new(
                self.width as f32 * self.tile_size,
                self.height as f32 * self.tile_size,
            ),
        }
    }

    pub fn is_outside(&self, rect: &Rect) -> bool {
        let bounds = self.bounds();
        rect.min.x < bounds.min.x
            || rect.min.y < bounds.min.y
            || rect.max.x > bounds.max.x
            || rect.max.y > bounds.max.y
    }

    /// Tiles overlapped by the box, in row-major order.
    pub fn meeting(&self, position: Vec2, collision_box: CollisionBox) -> Vec<TileView> {
        let rect = collision_box.at(position);
        let size = self.tile_size;
        let x0 = (rect.min.x / size).floor() as i32;
        let y0 = (rect.min.y / size).floor() as i32;
        let x1 = (rect.max.x / size).ceil() as i32;
        let y1 = (rect.max.y / size).ceil() as i32;

        let mut tiles = Vec::new();
        for y in y0.max(0)..y1.min(self.height) {
            for x in x0.max(0)..x1.min(self.width) {
                if let Some(tile) = self.get(TileLocation::new(x, y)) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    /// Whether the box overlaps any tile carrying one of `flags`.
    pub fn meets_any(&self, position: Vec2, collision_box: CollisionBox, flags: TileFlags) -> bool {
        self.meeting(position, collision_box)
            .iter()
            .any(|tile| tile.flags.intersects(flags))
    }

    fn index(&self, location: TileLocation) -> Option<usize> {
        let inside = (0..self.width).contains(&location.x) && (0..self.height).contains(&location.y);
        inside.then(|| (location.y * self.width + location.x) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_meet_every_overlapped_tile() {
        let map = TileMap::open(4, 4, 16.0);
        let tiles = map.meeting(Vec2::new(16.0, 16.0), CollisionBox::centered(12.0, 12.0));
        let locations: Vec<_> = tiles.iter().map(|tile| tile.location).collect();
        assert_eq!(
            locations,
            vec![
                TileLocation::new(0, 0),
                TileLocation::new(1, 0),
                TileLocation::new(0, 1),
                TileLocation::new(1, 1),
            ]
        );
    }

    #[test]
    fn box_edges_on_a_tile_boundary_do_not_reach_the_next_tile() {
        let map = TileMap::open(4, 4, 16.0);
        let tiles = map.meeting(Vec2::new(8.0, 8.0), CollisionBox::centered(16.0, 16.0));
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn lookups_outside_the_grid_miss() {
        let mut map = TileMap::open(2, 2, 16.0);
        map.set(TileLocation::new(5, 5), TileFlags::SOLID);
        assert!(map.get(TileLocation::new(-1, 0)).is_none());
        assert!(map.get(TileLocation::new(2, 0)).is_none());
        assert!(!map.meets_any(Vec2::new(16.0, 16.0), CollisionBox::centered(8.0, 8.0), TileFlags::SOLID));
    }
}
