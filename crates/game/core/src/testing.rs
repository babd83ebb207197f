//! In-memory room and sender used by unit tests.

use crate::config::GameConfig;
use crate::entity::{EntityId, Tick};
use crate::env::{
    Animation, EffectKind, PcgRng, PhysicsOracle, PlayerView, Presentation, ProjectileKind,
    RngOracle, RoomControl, RoomEvent, Sound, Spawn, SpawnKind, TileFlags, TileLocation, TileView,
};
use crate::geometry::{CollisionBox, Rect, Vec2};
use crate::interaction::{
    Interceptable, Payload, Sender, SenderKind, ToolKind, ToolRef, WeaponItem, WeaponLevel,
};

pub struct TestWorld {
    pub config: GameConfig,
    pub rng: PcgRng,
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<TileFlags>,
    pub player: Option<PlayerView>,
    pub sounds: Vec<Sound>,
    pub animations: Vec<(EntityId, Animation)>,
    pub spawns: Vec<Spawn>,
    pub events: Vec<(u32, RoomEvent)>,
    pub tick: Tick,
    next_id: u32,
}

impl TestWorld {
    /// A floor-only room of `width` by `height` tiles.
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            config: GameConfig::default(),
            rng: PcgRng::new(0x5eed),
            width,
            height,
            tiles: vec![TileFlags::empty(); (width * height) as usize],
            player: None,
            sounds: Vec::new(),
            animations: Vec::new(),
            spawns: Vec::new(),
            events: Vec::new(),
            tick: Tick::ZERO,
            next_id: 100,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = PcgRng::new(seed);
        self
    }

    pub fn set_tile(&mut self, x: i32, y: i32, flags: TileFlags) {
        let index = (y * self.width + x) as usize;
        self.tiles[index] = flags;
    }

    pub fn place_player(&mut self, center: Vec2) {
        self.player = Some(PlayerView {
            id: EntityId::PLAYER,
            position: center,
            center,
        });
    }

    pub fn spawned_effects(&self) -> Vec<EffectKind> {
        self.spawns
            .iter()
            .filter_map(|spawn| match spawn.kind {
                SpawnKind::Effect(effect) => Some(effect),
                _ => None,
            })
            .collect()
    }

    pub fn spawned_projectiles(&self) -> Vec<(ProjectileKind, Vec2)> {
        self.spawns
            .iter()
            .filter_map(|spawn| match spawn.kind {
                SpawnKind::Projectile { kind, velocity } => Some((kind, velocity)),
                _ => None,
            })
            .collect()
    }

    fn tile_size(&self) -> f32 {
        self.config.tile_size
    }

    fn bounds(&self) -> Rect {
        let size = self.tile_size();
        Rect {
            min: Vec2::ZERO,
            max: Vec2::new(self.width as f32 * size, self.height as f32 * size),
        }
    }
}

impl PhysicsOracle for TestWorld {
    fn is_place_meeting_solid(&self, position: Vec2, collision_box: CollisionBox) -> bool {
        self.tiles_meeting(position, collision_box)
            .iter()
            .any(|tile| tile.flags.contains(TileFlags::SOLID))
    }

    fn is_place_meeting_room_edge(&self, position: Vec2, collision_box: CollisionBox) -> bool {
        let rect = collision_box.at(position);
        let bounds = self.bounds();
        rect.min.x < bounds.min.x
            || rect.min.y < bounds.min.y
            || rect.max.x > bounds.max.x
            || rect.max.y > bounds.max.y
    }

    fn tiles_meeting(&self, position: Vec2, collision_box: CollisionBox) -> Vec<TileView> {
        let rect = collision_box.at(position);
        let size = self.tile_size();
        let (x0, y0) = ((rect.min.x / size).floor() as i32, (rect.min.y / size).floor() as i32);
        let (x1, y1) = ((rect.max.x / size).ceil() as i32, (rect.max.y / size).ceil() as i32);
        let mut tiles = Vec::new();
        for y in y0.max(0)..y1.min(self.height) {
            for x in x0.max(0)..x1.min(self.width) {
                if let Some(tile) = self.tile_at(TileLocation::new(x, y)) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    fn is_meeting_entity(
        &self,
        position: Vec2,
        collision_box: CollisionBox,
        entity: EntityId,
    ) -> bool {
        self.player
            .filter(|player| player.id == entity)
            .is_some_and(|player| collision_box.at(position).contains(player.center))
    }
}

impl Presentation for TestWorld {
    fn play_sound(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    fn play_animation(&mut self, entity: EntityId, animation: Animation) {
        self.animations.push((entity, animation));
    }
}

impl RoomControl for TestWorld {
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
        self.spawns.push(spawn);
        self.next_id += 1;
        EntityId(self.next_id)
    }

    fn schedule_event(&mut self, delay: u32, event: RoomEvent) {
        self.events.push((delay, event));
    }

    fn tile_at(&self, location: TileLocation) -> Option<TileView> {
        if location.x < 0 || location.y < 0 || location.x >= self.width || location.y >= self.height {
            return None;
        }
        let flags = self.tiles[(location.y * self.width + location.x) as usize];
        Some(TileView { location, flags })
    }
}

/// Sender that records everything done to it.
pub struct TestSender {
    pub id: EntityId,
    pub kind: SenderKind,
    pub position: Vec2,
    pub destroyed: bool,
    pub killed: bool,
    pub living: bool,
    pub can_intercept: bool,
    pub intercepted: u32,
    pub deflected: u32,
    pub bumps: u32,
    pub damage_taken: u32,
}

impl TestSender {
    pub fn new(kind: SenderKind) -> Self {
        Self {
            id: EntityId(50),
            kind,
            position: Vec2::new(64.0, 64.0),
            destroyed: false,
            killed: false,
            living: false,
            can_intercept: false,
            intercepted: 0,
            deflected: 0,
            bumps: 0,
            damage_taken: 0,
        }
    }

    pub fn projectile(kind: ProjectileKind) -> Self {
        Self::new(SenderKind::Projectile(kind))
    }

    pub fn living(mut self) -> Self {
        self.living = true;
        self
    }

    pub fn with_intercept(mut self) -> Self {
        self.can_intercept = true;
        self
    }

    pub fn sword_payload(level: WeaponLevel) -> Payload {
        Payload::Weapon {
            weapon: WeaponItem::Sword,
            tool: ToolRef {
                owner: EntityId::PLAYER,
                kind: ToolKind::Sword,
                position: Vec2::new(56.0, 64.0),
            },
            level,
        }
    }
}

impl Sender for TestSender {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> SenderKind {
        self.kind
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn interceptable(&mut self) -> Option<&mut dyn Interceptable> {
        if self.can_intercept { Some(self) } else { None }
    }

    fn is_living_unit(&self) -> bool {
        self.living
    }

    fn bump(&mut self, _from: Vec2) {
        self.bumps += 1;
    }

    fn hurt(&mut self, damage: u32, _source: Vec2) {
        self.damage_taken += damage;
    }

    fn kill(&mut self) {
        self.killed = true;
        self.destroyed = true;
    }
}

impl Interceptable for TestSender {
    fn intercept(&mut self) {
        self.intercepted += 1;
    }

    fn deflect(&mut self) {
        self.deflected += 1;
    }
}
