//! Non-monster entities the room simulates: projectiles, the player and the
//! tiles themselves when they act as a sender.

use game_core::geometry::Vec2;
use game_core::{
    CollisionBox, EntityId, InteractionType, Interceptable, PlayerView, ProjectileKind, Rect,
    Sender, SenderKind,
};

/// Interaction a projectile delivers to a monster it touches.
///
/// Monster shots return `None`; they only ever hurt the player.
pub fn projectile_interaction(kind: ProjectileKind) -> Option<InteractionType> {
    let interaction = match kind {
        ProjectileKind::Arrow => InteractionType::Arrow,
        ProjectileKind::Boomerang => InteractionType::Boomerang,
        ProjectileKind::SwordBeam => InteractionType::SwordBeam,
        ProjectileKind::RodFire => InteractionType::RodFire,
        ProjectileKind::EmberSeed => InteractionType::EmberSeed,
        ProjectileKind::ScentSeed => InteractionType::ScentSeed,
        ProjectileKind::PegasusSeed => InteractionType::PegasusSeed,
        ProjectileKind::GaleSeed => InteractionType::GaleSeed,
        ProjectileKind::MysterySeed => InteractionType::MysterySeed,
        ProjectileKind::SwitchHook => InteractionType::SwitchHook,
        ProjectileKind::Rock | ProjectileKind::Fireball | ProjectileKind::MagicBeam => return None,
    };
    Some(interaction)
}

/// Damage a monster shot deals to the player.
pub const fn projectile_damage(kind: ProjectileKind) -> u32 {
    match kind {
        ProjectileKind::Fireball | ProjectileKind::MagicBeam => 2,
        _ => 1,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Ticks left before the projectile expires.
    pub lifetime: u32,
    /// Who fired it.
    pub source: Option<EntityId>,
    /// Sent back by a monster; it now hurts the player like a monster shot.
    pub deflected: bool,
    destroyed: bool,
}

impl Projectile {
    pub const HITBOX: CollisionBox = CollisionBox::centered(6.0, 6.0);

    pub fn new(id: EntityId, kind: ProjectileKind, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            velocity,
            lifetime: u32::MAX,
            source: None,
            deflected: false,
            destroyed: false,
        }
    }

    #[must_use]
    pub fn with_lifetime(mut self, lifetime: u32) -> Self {
        self.lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Option<EntityId>) -> Self {
        self.source = source;
        self
    }

    pub fn hitbox(&self) -> Rect {
        Self::HITBOX.at(self.position)
    }

    /// Whether the projectile can hurt the player.
    pub fn is_hostile(&self) -> bool {
        self.deflected || projectile_interaction(self.kind).is_none()
    }
}

impl Sender for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Projectile(self.kind)
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
        match self.kind {
            ProjectileKind::Boomerang | ProjectileKind::SwitchHook | ProjectileKind::Arrow => {
                Some(self)
            }
            _ => None,
        }
    }
}

impl Interceptable for Projectile {
    /// Caught projectiles drop out of the air.
    fn intercept(&mut self) {
        self.destroyed = true;
    }

    fn deflect(&mut self) {
        self.velocity = -self.velocity;
        self.deflected = true;
    }
}

/// Minimal player: a hitbox that takes damage and gets pushed around.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStandIn {
    pub position: Vec2,
    pub hitbox: CollisionBox,
    pub damage_taken: u32,
    pub bumps: u32,
    /// Ticks during which further damage is ignored.
    pub invincibility: u32,
    /// Invincibility granted by each hit.
    pub hurt_invincibility: u32,
    knockback: u32,
}

impl PlayerStandIn {
    const KNOCKBACK_TICKS: u32 = 8;

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            hitbox: CollisionBox::centered(12.0, 12.0),
            damage_taken: 0,
            bumps: 0,
            invincibility: 0,
            hurt_invincibility: 0,
            knockback: 0,
        }
    }

    #[must_use]
    pub fn with_hurt_invincibility(mut self, ticks: u32) -> Self {
        self.hurt_invincibility = ticks;
        self
    }

    pub fn rect(&self) -> Rect {
        self.hitbox.at(self.position)
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: EntityId::PLAYER,
            position: self.position,
            center: self.rect().center(),
        }
    }

    /// Counts down timers once per tick.
    pub fn tick(&mut self) {
        self.invincibility = self.invincibility.saturating_sub(1);
        self.knockback = self.knockback.saturating_sub(1);
    }

    /// Applies damage unless still flashing from the last hit.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        if self.invincibility > 0 {
            return false;
        }
        self.damage_taken = self.damage_taken.saturating_add(damage);
        self.invincibility = self.hurt_invincibility;
        true
    }
}

impl Sender for PlayerStandIn {
    fn id(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Player
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// The player never leaves the room.
    fn destroy(&mut self) {}

    fn is_destroyed(&self) -> bool {
        false
    }

    fn is_living_unit(&self) -> bool {
        true
    }

    fn is_being_knocked_back(&self) -> bool {
        self.knockback > 0
    }

    fn bump(&mut self, _from: Vec2) {
        self.bumps += 1;
        self.knockback = Self::KNOCKBACK_TICKS;
    }

    fn hurt(&mut self, damage: u32, _source: Vec2) {
        self.take_damage(damage);
    }

    fn kill(&mut self) {
        self.damage_taken = u32::MAX;
    }
}

/// A player-held tool that exists only for the duration of one swing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolSwing {
    pub kind: SenderKind,
    pub position: Vec2,
    pub damage_taken: u32,
}

impl Sender for ToolSwing {
    fn id(&self) -> EntityId {
        EntityId::PLAYER
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

    fn destroy(&mut self) {}

    fn is_destroyed(&self) -> bool {
        false
    }

    /// Damage to the tool lands on the player holding it.
    fn is_living_unit(&self) -> bool {
        true
    }

    fn hurt(&mut self, damage: u32, _source: Vec2) {
        self.damage_taken += damage;
    }
}

/// The tile under a monster, acting as the sender of a hazard interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HazardTile {
    pub position: Vec2,
}

impl HazardTile {
    /// Id reported for room tiles.
    pub const ID: EntityId = EntityId(u32::MAX);
}

impl Sender for HazardTile {
    fn id(&self) -> EntityId {
        Self::ID
    }

    fn kind(&self) -> SenderKind {
        SenderKind::Environment
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, _position: Vec2) {}

    fn destroy(&mut self) {}

    fn is_destroyed(&self) -> bool {
        false
    }
}
