use crate::entity::EntityId;
use crate::geometry::{CollisionBox, Vec2};

bitflags::bitflags! {
    /// Properties of a room tile relevant to monster movement.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u16 {
        const SOLID = 1 << 0;
        const HOLE = 1 << 1;
        const WATER = 1 << 2;
        const LAVA = 1 << 3;
        /// Solid for walkers but passable for flying monsters.
        const LEDGE = 1 << 4;

        /// Tiles a ground monster must never wander into.
        const HAZARDS = Self::HOLE.bits() | Self::WATER.bits() | Self::LAVA.bits();
    }
}

/// Grid coordinates of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLocation {
    pub x: i32,
    pub y: i32,
}

impl TileLocation {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing the world-space point.
    pub fn containing(point: Vec2, tile_size: f32) -> Self {
        Self {
            x: (point.x / tile_size).floor() as i32,
            y: (point.y / tile_size).floor() as i32,
        }
    }

    /// World-space center of this tile.
    pub fn center(self, tile_size: f32) -> Vec2 {
        Vec2::new(
            (self.x as f32 + 0.5) * tile_size,
            (self.y as f32 + 0.5) * tile_size,
        )
    }
}

/// Read-only view of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileView {
    pub location: TileLocation,
    pub flags: TileFlags,
}

/// What a moving monster occupies when its path is checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub position: Vec2,
    pub hard_box: CollisionBox,
    /// Ground monsters treat hazard tiles as obstacles; flying ones do not.
    pub avoids_hazards: bool,
    /// Flyers cross ledges.
    pub flying: bool,
}

impl Footprint {
    /// Tile flags, besides solid ones, this footprint may not overlap.
    pub fn blocking_tiles(&self) -> TileFlags {
        let mut blocking = TileFlags::empty();
        if self.avoids_hazards {
            blocking |= TileFlags::HAZARDS;
        }
        if !self.flying {
            blocking |= TileFlags::LEDGE;
        }
        blocking
    }
}

/// Collision queries answered by the room's physics.
///
/// Every query places `collision_box` at `position` and inspects what it
/// would overlap there, without moving anything.
pub trait PhysicsOracle {
    fn is_place_meeting_solid(&self, position: Vec2, collision_box: CollisionBox) -> bool;

    fn is_place_meeting_room_edge(&self, position: Vec2, collision_box: CollisionBox) -> bool;

    /// Tiles overlapped by the box, in row-major order.
    fn tiles_meeting(&self, position: Vec2, collision_box: CollisionBox) -> Vec<TileView>;

    fn is_meeting_entity(&self, position: Vec2, collision_box: CollisionBox, entity: EntityId)
    -> bool;

    /// True when the footprint would overlap anything it must not enter.
    fn is_footprint_blocked(&self, footprint: &Footprint, position: Vec2) -> bool {
        if self.is_place_meeting_solid(position, footprint.hard_box)
            || self.is_place_meeting_room_edge(position, footprint.hard_box)
        {
            return true;
        }
        let blocking = footprint.blocking_tiles();
        !blocking.is_empty()
            && self
                .tiles_meeting(position, footprint.hard_box)
                .iter()
                .any(|tile| tile.flags.intersects(blocking))
    }
}
