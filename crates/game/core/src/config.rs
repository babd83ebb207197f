/// Tunable parameters shared by every monster in a room.
///
/// All durations are in ticks, distances in pixels and speeds in pixels per
/// tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Speed applied while a monster is being knocked back.
    pub knockback_speed: f32,
    pub knockback_duration: u32,
    /// Ticks after a hit during which further damage is ignored.
    pub hurt_invincibility: u32,
    /// Multiplier applied to velocity when probing for obstacles ahead of a
    /// wandering monster.
    pub wander_lookahead: f32,
    pub stun_duration: u32,
    pub burn_duration: u32,
    pub gale_duration: u32,
    /// Drift speed while carried away by a gale.
    pub gale_speed: f32,
    /// Ticks a monster stays busy after swapping places with a switch hook.
    pub busy_duration: u32,
    pub electrocute_duration: u32,
    /// Damage dealt to the attacker by an electrocuting monster.
    pub electrocute_damage: u32,
    pub tile_size: f32,
    /// Speed of monster projectiles whose template gives none.
    pub projectile_speed: f32,
    /// Ticks a projectile flies before the room removes it.
    pub projectile_lifetime: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Finest supported movement-angle quantization.
    pub const MAX_ANGLE_COUNT: u16 = 32;
    /// Upper bound on wander candidates evaluated per decision.
    pub const MAX_WANDER_CANDIDATES: usize = Self::MAX_ANGLE_COUNT as usize;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_KNOCKBACK_SPEED: f32 = 2.0;
    pub const DEFAULT_KNOCKBACK_DURATION: u32 = 10;
    pub const DEFAULT_HURT_INVINCIBILITY: u32 = 16;
    pub const DEFAULT_WANDER_LOOKAHEAD: f32 = 1.1;
    pub const DEFAULT_STUN_DURATION: u32 = 120;
    pub const DEFAULT_BURN_DURATION: u32 = 60;
    pub const DEFAULT_GALE_DURATION: u32 = 60;
    pub const DEFAULT_GALE_SPEED: f32 = 1.0;
    pub const DEFAULT_BUSY_DURATION: u32 = 30;
    pub const DEFAULT_ELECTROCUTE_DURATION: u32 = 40;
    pub const DEFAULT_ELECTROCUTE_DAMAGE: u32 = 2;
    pub const DEFAULT_TILE_SIZE: f32 = 16.0;
    pub const DEFAULT_PROJECTILE_SPEED: f32 = 2.0;
    pub const DEFAULT_PROJECTILE_LIFETIME: u32 = 120;

    pub fn new() -> Self {
        Self {
            knockback_speed: Self::DEFAULT_KNOCKBACK_SPEED,
            knockback_duration: Self::DEFAULT_KNOCKBACK_DURATION,
            hurt_invincibility: Self::DEFAULT_HURT_INVINCIBILITY,
            wander_lookahead: Self::DEFAULT_WANDER_LOOKAHEAD,
            stun_duration: Self::DEFAULT_STUN_DURATION,
            burn_duration: Self::DEFAULT_BURN_DURATION,
            gale_duration: Self::DEFAULT_GALE_DURATION,
            gale_speed: Self::DEFAULT_GALE_SPEED,
            busy_duration: Self::DEFAULT_BUSY_DURATION,
            electrocute_duration: Self::DEFAULT_ELECTROCUTE_DURATION,
            electrocute_damage: Self::DEFAULT_ELECTROCUTE_DAMAGE,
            tile_size: Self::DEFAULT_TILE_SIZE,
            projectile_speed: Self::DEFAULT_PROJECTILE_SPEED,
            projectile_lifetime: Self::DEFAULT_PROJECTILE_LIFETIME,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
