//! The room as monsters see it.

use game_core::geometry::Vec2;
use game_core::{
    Animation, CollisionBox, EntityId, Footprint, GameConfig, PcgRng, PhysicsOracle, PlayerView,
    Presentation, Rect, RngOracle, RoomControl, RoomEvent, Sound, Spawn, Tick, TileFlags,
    TileLocation, TileView,
};
use tracing::debug;

use super::cues::{Cue, CueLog};
use super::tiles::TileMap;

/// A spawn request with the id it was promised.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSpawn {
    pub id: EntityId,
    pub spawn: Spawn,
}

struct ScheduledEvent {
    due: Tick,
    event: RoomEvent,
}

/// Implements every collaborator contract a monster reaches through
/// [`RoomControl`].
///
/// Requests are deferred: spawns queue until the room drains them after the
/// AI pass, events wait in a queue ordered by due tick.
pub struct RoomWorld {
    config: GameConfig,
    tiles: TileMap,
    rng: PcgRng,
    tick: Tick,
    player: Option<PlayerView>,
    /// Rectangles of live monsters' hard boxes, refreshed before each AI pass.
    occupants: Vec<(EntityId, Rect)>,
    spawns: Vec<PendingSpawn>,
    events: Vec<ScheduledEvent>,
    cues: CueLog,
    next_id: u32,
}

impl RoomWorld {
    pub fn new(config: GameConfig, tiles: TileMap, seed: u64) -> Self {
        Self {
            config,
            tiles,
            rng: PcgRng::new(seed),
            tick: Tick::ZERO,
            player: None,
            occupants: Vec::new(),
            spawns: Vec::new(),
            events: Vec::new(),
            cues: CueLog::new(),
            next_id: EntityId::PLAYER.0 + 1,
        }
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn cues(&self) -> &CueLog {
        &self.cues
    }

    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn record(&mut self, cue: Cue) {
        self.cues.record(self.tick, cue);
    }

    pub(crate) fn set_player(&mut self, player: Option<PlayerView>) {
        self.player = player;
    }

    pub(crate) fn set_occupants(&mut self, occupants: Vec<(EntityId, Rect)>) {
        self.occupants = occupants;
    }

    pub(crate) fn advance(&mut self) {
        self.tick = self.tick.next();
    }

    pub(crate) fn take_spawns(&mut self) -> Vec<PendingSpawn> {
        std::mem::take(&mut self.spawns)
    }

    /// Removes and returns events due at or before the current tick, in the
    /// order they become due. Events due on the same tick keep their
    /// scheduling order.
    pub(crate) fn take_due_events(&mut self) -> Vec<RoomEvent> {
        let now = self.tick;
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.events)
            .into_iter()
            .partition(|event| event.due <= now);
        self.events = pending;
        due.sort_by_key(|event| event.due);
        due.into_iter().map(|event| event.event).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Whether a walker (or a flyer, when `flying`) can stand with `hard_box`
    /// at `position`.
    ///
    /// Uses the same blocking rules as the wander lookahead, minus hazards:
    /// monsters may still be pushed into those.
    pub fn is_passable_for(&self, position: Vec2, hard_box: CollisionBox, flying: bool) -> bool {
        let footprint = Footprint {
            position,
            hard_box,
            avoids_hazards: false,
            flying,
        };
        !self.is_footprint_blocked(&footprint, position)
    }
}

impl PhysicsOracle for RoomWorld {
    fn is_place_meeting_solid(&self, position: Vec2, collision_box: CollisionBox) -> bool {
        self.tiles.meets_any(position, collision_box, TileFlags::SOLID)
    }

    fn is_place_meeting_room_edge(&self, position: Vec2, collision_box: CollisionBox) -> bool {
        self.tiles.is_outside(&collision_box.at(position))
    }

    fn tiles_meeting(&self, position: Vec2, collision_box: CollisionBox) -> Vec<TileView> {
        self.tiles.meeting(position, collision_box)
    }

    fn is_meeting_entity(
        &self,
        position: Vec2,
        collision_box: CollisionBox,
        entity: EntityId,
    ) -> bool {
        let rect = collision_box.at(position);
        if entity.is_player() {
            return self
                .player
                .is_some_and(|player| rect.contains(player.center));
        }
        self.occupants
            .iter()
            .any(|(id, other)| *id == entity && rect.intersects(other))
    }
}

impl Presentation for RoomWorld {
    fn play_sound(&mut self, sound: Sound) {
        self.record(Cue::Sound(sound));
    }

    fn play_animation(&mut self, entity: EntityId, animation: Animation) {
        self.record(Cue::Animation { entity, animation });
    }
}

impl RoomControl for RoomWorld {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn tick(&self) -> Tick {
        self.tick
    }

    fn rng(&mut self) -> &mut dyn RngOracle {
        &mut self.rng
    }

    fn player(&self) -> Option<PlayerView> {
        self.player
    }

    fn spawn_entity(&mut self, spawn: Spawn) -> EntityId {
        let id = self.allocate_id();
        debug!(target: "room", %id, kind = ?spawn.kind, source = ?spawn.source, "spawn queued");
        self.spawns.push(PendingSpawn { id, spawn });
        id
    }

    fn schedule_event(&mut self, delay: u32, event: RoomEvent) {
        let due = self.tick.after(delay);
        self.events.push(ScheduledEvent { due, event });
    }

    fn tile_at(&self, location: TileLocation) -> Option<TileView> {
        self.tiles.get(location)
    }
}
