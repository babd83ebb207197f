use state_machine::DurationRng;

use crate::config::GameConfig;
use crate::entity::{EntityId, Tick};
use crate::env::{EffectKind, PhysicsOracle, Presentation, ProjectileKind, RngOracle};
use crate::env::{TileLocation, TileView};
use crate::geometry::Vec2;

/// Snapshot of the player as monsters see it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Vec2,
    /// Center of the player's hitbox; what monsters aim at.
    pub center: Vec2,
}

/// What a monster asks the room to create.
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnKind {
    Effect(EffectKind),
    Projectile {
        kind: ProjectileKind,
        velocity: Vec2,
    },
    /// Another monster, by template name.
    Monster { template: String },
}

/// Deferred creation request. The room inserts spawned entities after the
/// current monster update finishes.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawn {
    pub kind: SpawnKind,
    pub position: Vec2,
    pub source: Option<EntityId>,
}

impl Spawn {
    pub fn effect(effect: EffectKind, position: Vec2) -> Self {
        Self {
            kind: SpawnKind::Effect(effect),
            position,
            source: None,
        }
    }

    pub fn projectile(kind: ProjectileKind, position: Vec2, velocity: Vec2) -> Self {
        Self {
            kind: SpawnKind::Projectile { kind, velocity },
            position,
            source: None,
        }
    }

    #[must_use]
    pub fn from_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }
}

/// The room as seen from monster code.
///
/// Phase machines are parameterized over this type, so every monster entry
/// point takes `&mut World` rather than a borrowed-lifetime trait object.
pub type World = dyn RoomControl;

/// Callback run by the room after a delay.
pub type RoomEvent = Box<dyn FnOnce(&mut World) + Send>;

/// Everything a monster may ask of the room it lives in.
///
/// The room owns physics, presentation and entity lifetimes. Monsters only
/// observe it through queries and mutate it through deferred requests.
pub trait RoomControl: PhysicsOracle + Presentation {
    fn config(&self) -> &GameConfig;

    fn tick(&self) -> Tick;

    fn rng(&mut self) -> &mut dyn RngOracle;

    /// The player, when one is present in the room.
    fn player(&self) -> Option<PlayerView>;

    /// Queues an entity for insertion and returns the id it will have.
    fn spawn_entity(&mut self, spawn: Spawn) -> EntityId;

    /// Runs `event` once `delay` ticks have passed.
    fn schedule_event(&mut self, delay: u32, event: RoomEvent);

    fn tile_at(&self, location: TileLocation) -> Option<TileView>;
}

impl DurationRng for dyn RoomControl {
    fn roll_duration(&mut self, min: u32, max: u32) -> u32 {
        self.rng().range(min, max)
    }
}
