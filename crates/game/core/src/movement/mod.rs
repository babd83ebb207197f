//! Movement strategies.
//!
//! Every strategy only writes the monster's velocity. Integrating it and
//! resolving collisions is the room's job.

mod charge;
mod homing;
mod wander;

pub use charge::{ChargeMotion, grid_crossing};
pub use homing::{Homing, turn_toward};
pub use wander::{WanderParams, Wanderer, choose_wander_angle, is_heading_clear};

use crate::monster::BehaviorSpec;

/// Per-instance movement state for every strategy a monster may use.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub wander: Wanderer,
    pub homing: Homing,
    pub charge: ChargeMotion,
}

impl Motion {
    pub fn for_behavior(behavior: &BehaviorSpec) -> Self {
        let homing = match behavior {
            BehaviorSpec::Steer(steer) => Homing::new(steer.angle_duration),
            _ => Homing::default(),
        };
        Self {
            homing,
            ..Self::default()
        }
    }
}
