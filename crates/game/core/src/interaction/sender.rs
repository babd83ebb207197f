use crate::entity::EntityId;
use crate::env::{EffectKind, ProjectileKind};
use crate::geometry::Vec2;

use super::payload::ToolKind;

/// What kind of entity initiated an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum SenderKind {
    Player,
    /// A tool held by the player (sword, shield, shovel).
    PlayerTool(ToolKind),
    Projectile(ProjectileKind),
    Effect(EffectKind),
    Monster,
    /// A pushed block, mine cart or thrown object.
    Object,
    /// Room tiles (holes, water, lava).
    Environment,
}

impl SenderKind {
    pub const fn is_fire(self) -> bool {
        match self {
            Self::Projectile(kind) => kind.is_fire(),
            Self::Effect(EffectKind::Fire) => true,
            _ => false,
        }
    }

    /// The player or something the player is holding.
    pub const fn is_player_held(self) -> bool {
        matches!(self, Self::Player | Self::PlayerTool(_))
    }
}

/// Entity that initiated an interaction.
///
/// Monsters only ever see the sender through this trait while a reaction
/// chain runs.
pub trait Sender {
    fn id(&self) -> EntityId;

    fn kind(&self) -> SenderKind;

    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    /// Marks the entity for removal at the end of the tick.
    fn destroy(&mut self);

    fn is_destroyed(&self) -> bool;

    /// Projectiles that can be caught or bounced back.
    fn interceptable(&mut self) -> Option<&mut dyn Interceptable> {
        None
    }

    /// Whether the sender has health and can be hurt or killed.
    fn is_living_unit(&self) -> bool {
        false
    }

    fn is_being_knocked_back(&self) -> bool {
        false
    }

    /// Knocks the sender away from `from`.
    fn bump(&mut self, _from: Vec2) {}

    fn hurt(&mut self, _damage: u32, _source: Vec2) {}

    fn kill(&mut self) {
        self.destroy();
    }
}

/// Projectiles a monster can stop or send back.
pub trait Interceptable {
    /// Stops the projectile; a boomerang returns to its thrower.
    fn intercept(&mut self);

    /// Sends the projectile back the way it came.
    fn deflect(&mut self);
}
