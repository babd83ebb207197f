//! Wander, then stand still charged with electricity, and repeat.
//!
//! The script only drives the phases. Shocking whoever strikes the monster
//! while it is charged is left to the template's reaction table, usually an
//! `InPhase { phase: Electrocuting, .. }` entry on the melee interactions.

use super::Phase;
use crate::env::{Animation, Sound};
use crate::geometry::Vec2;
use crate::monster::{PhaseMachine, TemplateError, TickRange};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElectrocuteSpec {
    pub move_time: TickRange,
    pub electrocute_time: u32,
}

impl Default for ElectrocuteSpec {
    fn default() -> Self {
        Self {
            move_time: TickRange::new(90, 150),
            electrocute_time: 60,
        }
    }
}

impl ElectrocuteSpec {
    pub(crate) fn validate(&self, name: &str) -> Result<(), TemplateError> {
        self.move_time.check(name, "electrocute.move_time")
    }
}

pub(super) fn build(spec: &ElectrocuteSpec, machine: &mut PhaseMachine) {
    machine
        .add_state(Phase::Moving)
        .on_begin(|monster, world| monster.start_wander_leg(world))
        .on_update(|monster, world| monster.wander_step(None, world))
        .set_duration_range(spec.move_time.min, spec.move_time.max)
        .set_next(Phase::Electrocuting);

    machine
        .add_state(Phase::Electrocuting)
        .on_begin(|monster, world| {
            monster.body.velocity = Vec2::ZERO;
            world.play_animation(monster.id, Animation::Electrocute);
            world.play_sound(Sound::Electrocute);
        })
        .on_update(|monster, _world| monster.body.velocity = Vec2::ZERO)
        .on_end(|monster, world| world.play_animation(monster.id, Animation::Move))
        .set_duration(spec.electrocute_time)
        .set_next(Phase::Moving);
}
