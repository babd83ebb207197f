use crate::entity::EntityId;

/// Sound cues requested by monsters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sound {
    MonsterHurt,
    MonsterDie,
    Cling,
    Burn,
    Electrocute,
    Stun,
    SwitchHook,
    Shoot,
    Splash,
    Charge,
    FlipOver,
}

/// Animation cues requested by monsters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Animation {
    Idle,
    Move,
    Hurt,
    Burn,
    Stun,
    Electrocute,
    Charge,
    Submerged,
    Surfacing,
    Surfaced,
    FlippedOver,
    Recovering,
}

/// Short-lived visual effects spawned by monsters.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Sparks where two weapons clash.
    Cling,
    /// Puff left behind by a dying monster.
    MonsterExplosion,
    Splash,
    Fire,
    Dust,
}

/// Projectiles in flight, whether fired by the player or by monsters.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileKind {
    Arrow,
    Boomerang,
    SwordBeam,
    RodFire,
    EmberSeed,
    ScentSeed,
    PegasusSeed,
    GaleSeed,
    MysterySeed,
    SwitchHook,
    Rock,
    Fireball,
    MagicBeam,
}

impl ProjectileKind {
    /// Projectiles that set monsters alight.
    pub const fn is_fire(self) -> bool {
        matches!(self, Self::RodFire | Self::EmberSeed | Self::Fireball)
    }
}

/// Fire-and-forget presentation sink.
pub trait Presentation {
    fn play_sound(&mut self, sound: Sound);

    fn play_animation(&mut self, entity: EntityId, animation: Animation);
}
