//! Data-driven monster definitions.
//!
//! A [`MonsterTemplate`] is immutable and shared by every instance of a kind
//! of monster. It is validated once, when the first [`Monster`](super::Monster)
//! is built from it.

use crate::env::{ProjectileKind, RngOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::{Angle, CollisionBox};
use crate::interaction::{ReactionOverride, RegistrationError};
use crate::script::{Phase, ScriptSpec};

bitflags::bitflags! {
    /// Static traits of a kind of monster.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TemplateFlags: u8 {
        /// Moves over holes, water, lava and ledges.
        const FLYING = 1 << 0;
        /// Ignores all damage.
        const INVINCIBLE = 1 << 1;
        /// Walks onto hazard tiles without avoiding them.
        const IGNORES_HAZARDS = 1 << 2;
        /// Never knocked back by hits.
        const NO_KNOCKBACK = 1 << 3;
    }
}

/// Which of a monster's two boxes a query uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxKind {
    /// Collides with walls and tiles.
    Hard,
    /// Collides with weapons, projectiles and the player.
    Soft,
}

/// Inclusive range of ticks sampled from the room RNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    pub min: u32,
    pub max: u32,
}

impl TickRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(ticks: u32) -> Self {
        Self::new(ticks, ticks)
    }

    pub fn sample(self, rng: &mut dyn RngOracle) -> u32 {
        rng.range(self.min, self.max)
    }

    pub(crate) fn check(self, name: &str, field: &'static str) -> Result<(), TemplateError> {
        if self.min > self.max {
            return Err(TemplateError::InvertedRange {
                name: name.to_owned(),
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Parameters shared by every movement strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementSpec {
    /// Pixels per tick.
    pub speed: f32,
    /// Number of quantized headings; a multiple of 4 from 4 through 32.
    pub angle_count: u16,
    /// Percent chance that a new wander heading points at the player.
    pub face_player_chance: u8,
    pub move_time: TickRange,
    pub stop_time: TickRange,
}

impl Default for MovementSpec {
    fn default() -> Self {
        Self {
            speed: 0.5,
            angle_count: 8,
            face_player_chance: 0,
            move_time: TickRange::new(30, 60),
            stop_time: TickRange::new(30, 60),
        }
    }
}

/// Where a shot goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aim {
    Facing,
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShootSpec {
    pub projectile: ProjectileKind,
    /// Falls back to [`GameConfig::projectile_speed`](crate::GameConfig).
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: Option<f32>,
    /// Percent chance to fire when a move ends.
    pub chance: u8,
    pub aim: Aim,
    /// Distance from the monster's center at which the projectile appears.
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: f32,
}

/// Bounded-turn homing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteerSpec {
    /// Ticks between heading recomputations.
    pub angle_duration: u32,
}

/// How a monster decides where to go each tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorSpec {
    /// Never moves on its own.
    Idle,
    /// Alternating move and stop timers with obstacle-aware headings.
    Wander {
        #[cfg_attr(feature = "serde", serde(default))]
        shoot: Option<ShootSpec>,
    },
    /// Turns toward the player one angle step at a time.
    Steer(SteerSpec),
    /// Multi-phase behavior driven by a state machine.
    Script(ScriptSpec),
}

impl BehaviorSpec {
    pub fn script(&self) -> Option<&ScriptSpec> {
        match self {
            Self::Script(script) => Some(script),
            _ => None,
        }
    }

    const fn requires_movement(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Immutable definition of a kind of monster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    pub health: u32,
    /// Damage dealt to the player on touch.
    #[cfg_attr(feature = "serde", serde(default))]
    pub contact_damage: u32,
    pub hard_box: CollisionBox,
    pub soft_box: CollisionBox,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: TemplateFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement: MovementSpec,
    pub behavior: BehaviorSpec,
    /// Applied in order on top of the default reaction table.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reactions: Vec<ReactionOverride>,
}

impl MonsterTemplate {
    pub fn new(name: impl Into<String>, health: u32, behavior: BehaviorSpec) -> Self {
        Self {
            name: name.into(),
            health,
            contact_damage: 1,
            hard_box: CollisionBox::centered(12.0, 12.0),
            soft_box: CollisionBox::centered(14.0, 14.0),
            flags: TemplateFlags::empty(),
            movement: MovementSpec::default(),
            behavior,
            reactions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_movement(mut self, movement: MovementSpec) -> Self {
        self.movement = movement;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TemplateFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_contact_damage(mut self, damage: u32) -> Self {
        self.contact_damage = damage;
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, reaction: ReactionOverride) -> Self {
        self.reactions.push(reaction);
        self
    }

    pub fn collision_box(&self, kind: BoxKind) -> CollisionBox {
        match kind {
            BoxKind::Hard => self.hard_box,
            BoxKind::Soft => self.soft_box,
        }
    }

    /// Ground monsters avoid hazard tiles when choosing where to walk.
    pub fn avoids_hazards(&self) -> bool {
        !self
            .flags
            .intersects(TemplateFlags::FLYING | TemplateFlags::IGNORES_HAZARDS)
    }

    /// Checks the static parts of the template.
    ///
    /// Reaction overrides are checked when they are compiled into a
    /// dispatcher.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let name = self.name.as_str();
        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if self.health == 0 {
            return Err(TemplateError::ZeroHealth {
                name: name.to_owned(),
            });
        }

        let movement = &self.movement;
        if !Angle::is_valid_count(movement.angle_count) {
            return Err(TemplateError::InvalidAngleCount {
                name: name.to_owned(),
                count: movement.angle_count,
            });
        }
        if self.behavior.requires_movement()
            && !(movement.speed.is_finite() && movement.speed > 0.0)
        {
            return Err(TemplateError::NonPositiveSpeed {
                name: name.to_owned(),
                speed: movement.speed,
            });
        }
        check_chance(name, "face_player_chance", movement.face_player_chance)?;
        movement.move_time.check(name, "move_time")?;
        movement.stop_time.check(name, "stop_time")?;

        match &self.behavior {
            BehaviorSpec::Wander { shoot: Some(shoot) } => {
                check_chance(name, "shoot.chance", shoot.chance)?;
            }
            BehaviorSpec::Script(script) => script.validate(name)?,
            _ => {}
        }
        Ok(())
    }
}

pub(crate) fn check_chance(
    name: &str,
    field: &'static str,
    percent: u8,
) -> Result<(), TemplateError> {
    if percent > 100 {
        return Err(TemplateError::InvalidChance {
            name: name.to_owned(),
            field,
            percent,
        });
    }
    Ok(())
}

/// A monster template that cannot be instantiated.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("monster template has an empty name")]
    EmptyName,

    #[error("monster '{name}' has zero health")]
    ZeroHealth { name: String },

    #[error("monster '{name}' uses {count} movement angles; expected a multiple of 4 in 4..=32")]
    InvalidAngleCount { name: String, count: u16 },

    #[error("monster '{name}' has inverted tick range {min}..={max} for {field}")]
    InvertedRange {
        name: String,
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("monster '{name}' has a zero {field}")]
    ZeroTicks { name: String, field: &'static str },

    #[error("monster '{name}' moves but has speed {speed}")]
    NonPositiveSpeed { name: String, speed: f32 },

    #[error("monster '{name}' has {field} of {percent}%, above 100%")]
    InvalidChance {
        name: String,
        field: &'static str,
        percent: u8,
    },

    #[error("monster '{name}' reacts by entering phase {phase} which its script never defines")]
    UnknownPhase { name: String, phase: Phase },

    #[error("monster '{name}': {source}")]
    Registration {
        name: String,
        #[source]
        source: RegistrationError,
    },
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "TEMPLATE_EMPTY_NAME",
            Self::ZeroHealth { .. } => "TEMPLATE_ZERO_HEALTH",
            Self::InvalidAngleCount { .. } => "TEMPLATE_INVALID_ANGLE_COUNT",
            Self::InvertedRange { .. } => "TEMPLATE_INVERTED_RANGE",
            Self::ZeroTicks { .. } => "TEMPLATE_ZERO_TICKS",
            Self::NonPositiveSpeed { .. } => "TEMPLATE_NON_POSITIVE_SPEED",
            Self::InvalidChance { .. } => "TEMPLATE_INVALID_CHANCE",
            Self::UnknownPhase { .. } => "TEMPLATE_UNKNOWN_PHASE",
            Self::Registration { .. } => "TEMPLATE_REGISTRATION",
        }
    }
}
