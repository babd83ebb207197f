//! Wander until flipped onto its back, lie helpless, hop back up.
//!
//! Nothing in the script flips the monster. The template's reaction table
//! does, with a `BeginPhase(FlippedOver)` reaction on whatever interactions
//! should turn it over.

use super::Phase;
use crate::env::{Animation, Sound};
use crate::geometry::Vec2;
use crate::monster::{PhaseMachine, TemplateError, TickRange};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlipOverSpec {
    pub flipped_time: TickRange,
    pub recover_time: u32,
    pub hop_interval: u32,
    /// Height reached by each recovery hop.
    pub hop_height: f32,
}

impl Default for FlipOverSpec {
    fn default() -> Self {
        Self {
            flipped_time: TickRange::new(120, 180),
            recover_time: 48,
            hop_interval: 16,
            hop_height: 4.0,
        }
    }
}

impl FlipOverSpec {
    pub(crate) fn validate(&self, name: &str) -> Result<(), TemplateError> {
        if self.hop_interval == 0 {
            return Err(TemplateError::ZeroTicks {
                name: name.to_owned(),
                field: "flip_over.hop_interval",
            });
        }
        self.flipped_time.check(name, "flip_over.flipped_time")
    }
}

pub(super) fn build(spec: &FlipOverSpec, machine: &mut PhaseMachine) {
    let spec = *spec;

    machine
        .add_state(Phase::Wandering)
        .on_begin(|monster, world| monster.start_wander_leg(world))
        .on_update(|monster, world| monster.wander_step(None, world));

    machine
        .add_state(Phase::FlippedOver)
        .on_begin(|monster, world| {
            monster.body.velocity = Vec2::ZERO;
            world.play_animation(monster.id, Animation::FlippedOver);
            world.play_sound(Sound::FlipOver);
        })
        .on_update(|monster, _world| monster.body.velocity = Vec2::ZERO)
        .set_duration_range(spec.flipped_time.min, spec.flipped_time.max)
        .set_next(Phase::Recovering);

    let recovering = machine
        .add_state(Phase::Recovering)
        .on_begin(|monster, world| world.play_animation(monster.id, Animation::Recovering))
        .on_update(|monster, _world| {
            monster.body.velocity = Vec2::ZERO;
            monster.body.z = (monster.body.z - 1.0).max(0.0);
        })
        .on_end(|monster, _world| monster.body.z = 0.0)
        .set_duration(spec.recover_time)
        .set_next(Phase::Wandering);
    let hops = spec.recover_time / spec.hop_interval;
    (0..hops).fold(recovering, |builder, _| {
        builder.append_event(spec.hop_interval, move |monster, _world| {
            monster.body.z = spec.hop_height;
        })
    });
}
