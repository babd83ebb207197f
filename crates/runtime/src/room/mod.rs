//! Reference room driving monsters on a fixed timestep.
//!
//! A [`Room`] owns everything monsters never do: the tile map, projectiles,
//! the player, entity lifetimes and the order of passes inside a tick.
//!
//! Each [`Room::step`] runs:
//! 1. room events that have come due
//! 2. the AI pass, one [`Monster::update_ai`] per live monster
//! 3. integration of monster and projectile velocities against the tiles
//! 4. the collision pass, which calls [`Monster::trigger`]
//! 5. queued spawns, then soft-killed monsters whose respawn is due
//! 6. the sweep that removes everything destroyed during the tick
mod collision;
pub mod cues;
pub mod entities;
pub mod tiles;
pub mod world;

use std::sync::Arc;

use game_content::{MonsterCatalog, RoomLayout};
use game_core::geometry::Vec2;
use game_core::{
    BoxKind, EntityId, GameConfig, InteractionType, Monster, Payload, PayloadShape,
    PhysicsOracle, ProjectileKind, RoomControl, Sender, SenderKind, Spawn, SpawnKind,
    SpawnProperties, TemplateFlags, Tick, ToolKind, ToolRef, WeaponItem, WeaponLevel, World,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};
use cues::Cue;
use entities::{HazardTile, PlayerStandIn, Projectile, ToolSwing};
use tiles::TileMap;
use world::{PendingSpawn, RoomWorld};

/// Spawn rounds per tick. Monsters spawned while spawns are being flushed
/// may queue more; anything left after this many rounds waits a tick.
const SPAWN_ROUNDS: usize = 4;

/// Running totals kept by a room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoomStats {
    pub monsters_spawned: u64,
    pub monsters_killed: u64,
    pub monsters_soft_killed: u64,
    /// Soft-killed monsters brought back home. Monsters spawned by
    /// reactions or scripts count only towards `monsters_spawned`.
    pub monsters_respawned: u64,
    pub projectiles_fired: u64,
    pub projectiles_removed: u64,
    /// Interactions delivered to monsters.
    pub interactions: u64,
}

struct MonsterSlot {
    monster: Monster,
    /// Where the monster was first placed; respawns return here.
    home: Vec2,
}

/// A soft-killed monster waiting to come back.
struct Respawn {
    due: Tick,
    template: String,
    home: Vec2,
}

pub struct Room {
    name: String,
    world: RoomWorld,
    catalog: MonsterCatalog,
    monsters: Vec<MonsterSlot>,
    projectiles: Vec<Projectile>,
    player: Option<PlayerStandIn>,
    respawn_delay: Option<u32>,
    respawns: Vec<Respawn>,
    stats: RoomStats,
}

impl Room {
    pub fn new(
        name: impl Into<String>,
        config: GameConfig,
        tiles: TileMap,
        catalog: MonsterCatalog,
        seed: u64,
    ) -> Self {
        Self {
            name: name.into(),
            world: RoomWorld::new(config, tiles, seed),
            catalog,
            monsters: Vec::new(),
            projectiles: Vec::new(),
            player: None,
            respawn_delay: None,
            respawns: Vec::new(),
            stats: RoomStats::default(),
        }
    }

    /// Builds a room from a layout, placing the player and every monster.
    pub fn from_layout(
        layout: &RoomLayout,
        catalog: MonsterCatalog,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self> {
        let tiles = TileMap::from_layout(layout, config.tile_size);
        let mut room = Self::new(layout.name.clone(), config, tiles, catalog, seed);
        if let Some(position) = layout.player {
            room.place_player(position);
        }
        for placement in &layout.monsters {
            room.spawn_monster(&placement.template, placement.position, &placement.properties)?;
        }
        info!(
            target: "room",
            room = %room.name,
            monsters = room.monsters.len(),
            seed,
            "room loaded"
        );
        Ok(room)
    }

    /// Soft-killed monsters come back after `delay` ticks.
    #[must_use]
    pub fn with_respawn_delay(mut self, delay: Option<u32>) -> Self {
        self.respawn_delay = delay;
        self
    }

    pub fn place_player(&mut self, position: Vec2) {
        let invincibility = self.world.config().hurt_invincibility;
        self.player = Some(PlayerStandIn::at(position).with_hurt_invincibility(invincibility));
        self.sync_world();
    }

    pub fn spawn_monster(
        &mut self,
        template: &str,
        position: Vec2,
        properties: &SpawnProperties,
    ) -> Result<EntityId> {
        let id = self.world.allocate_id();
        self.insert_monster(id, template, position, properties)?;
        Ok(id)
    }

    /// Fires a player projectile.
    pub fn fire_projectile(
        &mut self,
        kind: ProjectileKind,
        position: Vec2,
        velocity: Vec2,
    ) -> EntityId {
        let id = self.world.allocate_id();
        let lifetime = self.world.config().projectile_lifetime;
        self.projectiles.push(
            Projectile::new(id, kind, position, velocity)
                .with_lifetime(lifetime)
                .with_source(Some(EntityId::PLAYER)),
        );
        self.stats.projectiles_fired += 1;
        id
    }

    /// Hits `target` with a player weapon swung from the player's position.
    ///
    /// Damage the weapon takes back, such as from an electrified monster,
    /// lands on the player.
    pub fn strike(
        &mut self,
        target: EntityId,
        interaction: InteractionType,
        level: WeaponLevel,
    ) -> Result<()> {
        let (weapon, tool) =
            weapon_for(interaction).ok_or(RuntimeError::NotAWeapon { interaction })?;
        let origin = self
            .player
            .as_ref()
            .map_or(Vec2::ZERO, |player| player.rect().center());
        let slot = self
            .monsters
            .iter_mut()
            .find(|slot| slot.monster.id() == target && !slot.monster.is_destroyed())
            .ok_or(RuntimeError::UnknownMonster { id: target })?;

        let payload = Payload::Weapon {
            weapon,
            tool: ToolRef {
                owner: EntityId::PLAYER,
                kind: tool,
                position: origin,
            },
            level,
        };
        let mut swing = ToolSwing {
            kind: SenderKind::PlayerTool(tool),
            position: origin,
            damage_taken: 0,
        };
        slot.monster.trigger(interaction, &mut swing, &payload, &mut self.world);
        self.stats.interactions += 1;

        if swing.damage_taken > 0
            && let Some(player) = self.player.as_mut()
        {
            player.take_damage(swing.damage_taken);
        }
        Ok(())
    }

    /// Delivers a plain-payload interaction from the room itself, such as a
    /// mine cart or a falling block, at the monster's center.
    pub fn hit(&mut self, target: EntityId, interaction: InteractionType) -> Result<()> {
        if interaction.payload_shape() != PayloadShape::Plain {
            return Err(RuntimeError::PayloadRequired { interaction });
        }
        let slot = self
            .monsters
            .iter_mut()
            .find(|slot| slot.monster.id() == target && !slot.monster.is_destroyed())
            .ok_or(RuntimeError::UnknownMonster { id: target })?;
        let center = slot.monster.center();
        let mut source = HazardTile { position: center };
        slot.monster
            .trigger(interaction, &mut source, &Payload::plain(center), &mut self.world);
        self.stats.interactions += 1;
        Ok(())
    }

    /// Advances the room by one tick.
    pub fn step(&mut self) {
        self.run_due_events();

        self.sync_world();
        for slot in &mut self.monsters {
            if !slot.monster.is_destroyed() {
                slot.monster.update_ai(&mut self.world);
            }
        }

        self.integrate_monsters();
        self.integrate_projectiles();
        self.sync_world();

        self.stats.interactions += collision::run(
            &mut self.monsters,
            &mut self.projectiles,
            self.player.as_mut(),
            &mut self.world,
        );

        self.flush_spawns();
        self.sweep();

        if let Some(player) = self.player.as_mut() {
            player.tick();
        }
        self.world.advance();
    }

    // ===== accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tick(&self) -> Tick {
        self.world.tick()
    }

    pub fn world(&self) -> &RoomWorld {
        &self.world
    }

    pub fn stats(&self) -> RoomStats {
        self.stats
    }

    pub fn player(&self) -> Option<&PlayerStandIn> {
        self.player.as_ref()
    }

    pub fn monster(&self, id: EntityId) -> Option<&Monster> {
        self.monsters
            .iter()
            .map(|slot| &slot.monster)
            .find(|monster| monster.id() == id)
    }

    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut Monster> {
        self.monsters
            .iter_mut()
            .map(|slot| &mut slot.monster)
            .find(|monster| monster.id() == id)
    }

    /// Monsters still in the room, in spawn order.
    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().map(|slot| &slot.monster)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Soft-killed monsters still waiting to respawn.
    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    // ===== tick passes =====

    fn insert_monster(
        &mut self,
        id: EntityId,
        template: &str,
        position: Vec2,
        properties: &SpawnProperties,
    ) -> Result<()> {
        let template = self
            .catalog
            .get(template)
            .ok_or_else(|| RuntimeError::UnknownTemplate {
                name: template.to_owned(),
            })?;
        let mut monster = Monster::new(id, Arc::clone(template))?;
        monster.initialize(position, properties, &mut self.world);
        self.monsters.push(MonsterSlot {
            monster,
            home: position,
        });
        self.stats.monsters_spawned += 1;
        Ok(())
    }

    fn run_due_events(&mut self) {
        for event in self.world.take_due_events() {
            let world: &mut World = &mut self.world;
            event(world);
        }
    }

    /// Publishes the player and monster positions monsters may query.
    fn sync_world(&mut self) {
        self.world
            .set_player(self.player.as_ref().map(PlayerStandIn::view));
        let occupants = self
            .monsters
            .iter()
            .filter(|slot| !slot.monster.is_destroyed())
            .map(|slot| (slot.monster.id(), slot.monster.hitbox(BoxKind::Hard)))
            .collect();
        self.world.set_occupants(occupants);
    }

    /// Moves each monster by its velocity, one axis at a time, stopping at
    /// walls. Flyers cross ledges.
    fn integrate_monsters(&mut self) {
        for slot in &mut self.monsters {
            let monster = &mut slot.monster;
            if monster.is_destroyed() {
                continue;
            }
            let velocity = monster.velocity();
            let hard_box = monster.collision_box(BoxKind::Hard);
            let flying = monster.template().flags.contains(TemplateFlags::FLYING);

            let mut position = monster.position();
            let mut blocked = false;
            for step in [Vec2::new(velocity.x, 0.0), Vec2::new(0.0, velocity.y)] {
                if step == Vec2::ZERO {
                    continue;
                }
                if self.world.is_passable_for(position + step, hard_box, flying) {
                    position += step;
                } else {
                    blocked = true;
                }
            }

            let body = monster.body_mut();
            body.position = position;
            body.colliding = blocked;
        }
    }

    fn integrate_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            if projectile.is_destroyed() {
                continue;
            }
            projectile.position += projectile.velocity;
            projectile.lifetime = projectile.lifetime.saturating_sub(1);
            let rect = projectile.hitbox();
            let hit_wall = self.world.tiles().is_outside(&rect)
                || self.world.is_place_meeting_solid(projectile.position, Projectile::HITBOX);
            if hit_wall || projectile.lifetime == 0 {
                projectile.destroy();
            }
        }
    }

    fn flush_spawns(&mut self) {
        for _ in 0..SPAWN_ROUNDS {
            let spawns = self.world.take_spawns();
            if spawns.is_empty() {
                break;
            }
            for PendingSpawn { id, spawn } in spawns {
                self.apply_spawn(id, spawn);
            }
        }
        self.respawn_due();
    }

    /// Brings back soft-killed monsters whose delay has run out.
    fn respawn_due(&mut self) {
        let now = self.world.tick();
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.respawns)
            .into_iter()
            .partition(|respawn| respawn.due <= now);
        self.respawns = waiting;

        for Respawn { template, home, .. } in due {
            let id = self.world.allocate_id();
            match self.insert_monster(id, &template, home, &SpawnProperties::new()) {
                Ok(()) => {
                    self.stats.monsters_respawned += 1;
                    debug!(target: "room", %id, %template, "monster respawned");
                }
                Err(error) => warn!(target: "room", %template, %error, "respawn failed"),
            }
        }
    }

    fn apply_spawn(&mut self, id: EntityId, spawn: Spawn) {
        let Spawn {
            kind,
            position,
            source,
        } = spawn;
        match kind {
            SpawnKind::Effect(effect) => self.world.record(Cue::Effect { effect, position }),
            SpawnKind::Projectile { kind, velocity } => {
                let lifetime = self.world.config().projectile_lifetime;
                self.projectiles.push(
                    Projectile::new(id, kind, position, velocity)
                        .with_lifetime(lifetime)
                        .with_source(source),
                );
                self.stats.projectiles_fired += 1;
            }
            SpawnKind::Monster { template } => {
                match self.insert_monster(id, &template, position, &SpawnProperties::new()) {
                    Ok(()) => debug!(target: "room", %id, %template, "monster spawned"),
                    Err(error) => warn!(target: "room", %template, %error, "spawn failed"),
                }
            }
        }
    }

    /// Removes destroyed entities. Soft-killed monsters are scheduled to
    /// respawn when the room has a respawn delay.
    fn sweep(&mut self) {
        let before = self.projectiles.len();
        self.projectiles.retain(|projectile| !projectile.is_destroyed());
        let projectiles_removed = (before - self.projectiles.len()) as u64;
        self.stats.projectiles_removed += projectiles_removed;

        let mut killed = 0;
        let mut soft_killed = 0;
        for slot in self.monsters.iter().filter(|slot| slot.monster.is_destroyed()) {
            if !slot.monster.is_respawnable() {
                killed += 1;
                continue;
            }
            soft_killed += 1;
            if let Some(delay) = self.respawn_delay {
                self.respawns.push(Respawn {
                    due: self.world.tick().after(delay),
                    template: slot.monster.name().to_owned(),
                    home: slot.home,
                });
            }
        }
        self.monsters.retain(|slot| !slot.monster.is_destroyed());
        self.stats.monsters_killed += killed;
        self.stats.monsters_soft_killed += soft_killed;

        if killed + soft_killed > 0 {
            info!(
                target: "room",
                tick = %self.world.tick(),
                killed,
                soft_killed,
                projectiles_removed,
                remaining = self.monsters.len(),
                "sweep"
            );
        }
    }
}

/// Weapon item and tool behind a weapon-shaped interaction.
fn weapon_for(interaction: InteractionType) -> Option<(WeaponItem, ToolKind)> {
    if interaction.payload_shape() != PayloadShape::Weapon {
        return None;
    }
    Some(match interaction {
        InteractionType::BiggoronSword => (WeaponItem::BiggoronSword, ToolKind::BiggoronSword),
        InteractionType::Shield => (WeaponItem::Shield, ToolKind::Shield),
        InteractionType::Shovel => (WeaponItem::Shovel, ToolKind::Shovel),
        _ => (WeaponItem::Sword, ToolKind::Sword),
    })
}
