//! Mutable per-monster simulation state.

use crate::env::Animation;
use crate::geometry::Vec2;

/// Kinematic state written by the monster and integrated by the room.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    /// Height above the floor, used for hops.
    pub z: f32,
    /// Pixels per tick. The room's integrator moves the body by this amount.
    pub velocity: Vec2,
    /// Set by the integrator when the last move was blocked.
    pub colliding: bool,
}

impl Body {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn current(self) -> u32 {
        self.current
    }

    pub const fn max(self) -> u32 {
        self.max
    }

    pub const fn is_depleted(self) -> bool {
        self.current == 0
    }

    /// Subtracts `amount`, saturating at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Temporary conditions that override a monster's normal behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    Stunned,
    Burning,
    /// Carried away by a gust.
    Gale,
    /// Recovering after swapping places with a switch hook.
    Busy,
    Electrocuted,
}

impl StatusKind {
    pub const fn animation(self) -> Animation {
        match self {
            Self::Stunned => Animation::Stun,
            Self::Burning => Animation::Burn,
            Self::Gale | Self::Busy => Animation::Idle,
            Self::Electrocuted => Animation::Electrocute,
        }
    }
}

/// A status with its remaining ticks and the velocity held while it lasts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveStatus {
    pub kind: StatusKind,
    pub remaining: u32,
    pub drift: Vec2,
}

/// Knockback in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Knockback {
    remaining: u32,
    velocity: Vec2,
}

impl Knockback {
    pub fn start(&mut self, velocity: Vec2, duration: u32) {
        self.remaining = duration;
        self.velocity = velocity;
    }

    pub const fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Velocity for this tick, or `None` once the knockback has run out.
    pub fn tick(&mut self) -> Option<Vec2> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.velocity)
    }
}

/// A request to damage a monster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hurt {
    pub damage: u32,
    /// Where the blow came from; knockback pushes away from it.
    pub source: Vec2,
    pub knockback: bool,
    pub sound: bool,
}

impl Hurt {
    pub const fn new(damage: u32, source: Vec2) -> Self {
        Self {
            damage,
            source,
            knockback: true,
            sound: true,
        }
    }

    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.sound = false;
        self
    }

    #[must_use]
    pub const fn without_knockback(mut self) -> Self {
        self.knockback = false;
        self
    }
}

bitflags::bitflags! {
    /// Lifecycle flags of a monster instance.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MonsterFlags: u8 {
        /// Removed from the room at the end of the tick.
        const DESTROYED = 1 << 0;
        /// Killed for good; does not respawn when the room is re-entered.
        const DEAD = 1 << 1;
        /// Skipped by the collision pass (submerged, burrowed).
        const PASSABLE = 1 << 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_saturates_at_zero() {
        let mut health = Health::full(3);
        health.damage(2);
        assert_eq!(health.current(), 1);
        health.damage(5);
        assert!(health.is_depleted());
        assert_eq!(health.max(), 3);
    }

    #[test]
    fn knockback_runs_for_its_duration() {
        let mut knockback = Knockback::default();
        knockback.start(Vec2::new(2.0, 0.0), 2);
        assert!(knockback.is_active());
        assert_eq!(knockback.tick(), Some(Vec2::new(2.0, 0.0)));
        assert_eq!(knockback.tick(), Some(Vec2::new(2.0, 0.0)));
        assert_eq!(knockback.tick(), None);
        assert!(!knockback.is_active());
    }
}
