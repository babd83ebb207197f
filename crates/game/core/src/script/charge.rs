//! Wander until the player lines up on an axis, charge, then cool down.

use tracing::trace;

use super::Phase;
use crate::env::{Animation, Sound, World};
use crate::geometry::{Direction, Vec2};
use crate::monster::{Monster, PhaseMachine, TemplateError, TickRange};
use crate::movement::grid_crossing;

/// What ends a charge besides running out of time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargeStop {
    /// Nothing; the monster keeps pushing against whatever it hit.
    Duration,
    /// Running into something.
    #[default]
    Collision,
    /// Running into something. Once time is up the charge also continues to
    /// the next tile center and stops exactly on it.
    TileAligned,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChargeSpec {
    /// How far off a cardinal axis the player may stand and still be seen.
    pub sight_width: f32,
    pub sight_range: f32,
    pub start_speed: f32,
    /// Added to the speed every tick.
    pub acceleration: f32,
    pub max_speed: f32,
    pub charge_time: TickRange,
    pub stop: ChargeStop,
    pub cooldown: TickRange,
}

impl Default for ChargeSpec {
    fn default() -> Self {
        Self {
            sight_width: 8.0,
            sight_range: 96.0,
            start_speed: 0.5,
            acceleration: 0.125,
            max_speed: 2.5,
            charge_time: TickRange::new(40, 60),
            stop: ChargeStop::Collision,
            cooldown: TickRange::new(30, 45),
        }
    }
}

impl ChargeSpec {
    pub(crate) fn validate(&self, name: &str) -> Result<(), TemplateError> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(TemplateError::NonPositiveSpeed {
                name: name.to_owned(),
                speed: self.max_speed,
            });
        }
        self.charge_time.check(name, "charge.charge_time")?;
        self.cooldown.check(name, "charge.cooldown")
    }
}

/// Cardinal direction in which the player is in plain sight, if any.
fn sighted(monster: &Monster, world: &World, spec: &ChargeSpec) -> Option<Direction> {
    let player = world.player()?;
    let offset = player.center - monster.center();
    let direction = Direction::from_vector(offset);
    let axis = direction.to_vector();
    let along = offset.dot(axis);
    let across = offset.perp_dot(axis).abs();
    (along > 0.0 && along <= spec.sight_range && across <= spec.sight_width).then_some(direction)
}

fn end_charge(monster: &mut Monster, world: &mut World, reason: &'static str) {
    trace!(target: "script", monster = %monster.id, reason, "charge ended");
    monster.body.velocity = Vec2::ZERO;
    monster.begin_phase(Phase::Cooldown, world);
}

pub(super) fn build(spec: &ChargeSpec, machine: &mut PhaseMachine) {
    let spec = *spec;

    machine
        .add_state(Phase::Wandering)
        .on_begin(|monster, world| monster.start_wander_leg(world))
        .on_update(move |monster, world| {
            if let Some(direction) = sighted(monster, world, &spec) {
                monster.angle = direction.to_angle(monster.angle.count());
                monster.facing = direction;
                monster.begin_phase(Phase::Charging, world);
                return;
            }
            monster.wander_step(None, world);
        });

    machine
        .add_state(Phase::Charging)
        .on_begin(move |monster, world| {
            let ticks = spec.charge_time.sample(world.rng());
            monster.motion.charge.start(
                monster.angle,
                spec.start_speed,
                spec.acceleration,
                spec.max_speed,
                ticks,
            );
            monster.body.velocity = monster.angle.to_vector() * monster.motion.charge.speed();
            world.play_sound(Sound::Charge);
            world.play_animation(monster.id, Animation::Charge);
        })
        .on_update(move |monster, world| {
            let velocity = monster.motion.charge.step();
            let footprint = monster.footprint();
            let blocked = monster.body.colliding
                || world.is_footprint_blocked(&footprint, footprint.position + velocity);
            if blocked && spec.stop != ChargeStop::Duration {
                end_charge(monster, world, "blocked");
                return;
            }

            if monster.motion.charge.is_spent() {
                if spec.stop != ChargeStop::TileAligned {
                    end_charge(monster, world, "spent");
                    return;
                }
                let tile_size = world.config().tile_size;
                if let Some(stop) = grid_crossing(footprint.position, velocity, tile_size) {
                    monster.body.position = stop;
                    end_charge(monster, world, "aligned");
                    return;
                }
            }
            monster.body.velocity = velocity;
        });

    machine
        .add_state(Phase::Cooldown)
        .on_begin(|monster, world| {
            monster.body.velocity = Vec2::ZERO;
            world.play_animation(monster.id, Animation::Idle);
        })
        .on_update(|monster, _world| monster.body.velocity = Vec2::ZERO)
        .set_duration_range(spec.cooldown.min, spec.cooldown.max)
        .set_next(Phase::Wandering);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::entity::EntityId;
    use crate::monster::{BehaviorSpec, MonsterTemplate, SpawnProperties};
    use crate::script::ScriptSpec;
    use crate::testing::TestWorld;

    fn charger(spec: ChargeSpec, world: &mut TestWorld, at: Vec2) -> Monster {
        let template =
            MonsterTemplate::new("charger", 4, BehaviorSpec::Script(ScriptSpec::Charge(spec)));
        let mut monster = Monster::new(EntityId(3), Arc::new(template)).expect("valid template");
        monster.initialize(at, &SpawnProperties::new(), world);
        monster
    }

    fn quick() -> ChargeSpec {
        ChargeSpec {
            start_speed: 1.0,
            acceleration: 0.5,
            max_speed: 2.0,
            charge_time: TickRange::fixed(5),
            cooldown: TickRange::fixed(3),
            ..ChargeSpec::default()
        }
    }

    #[test]
    fn wanders_while_the_player_is_out_of_sight() {
        let mut world = TestWorld::open(12, 12);
        world.place_player(Vec2::new(150.0, 150.0));
        let mut monster = charger(quick(), &mut world, Vec2::new(40.0, 40.0));
        for _ in 0..10 {
            monster.update_ai(&mut world);
            assert_eq!(monster.phase(), Some(Phase::Wandering));
        }
    }

    #[test]
    fn aligned_player_triggers_an_accelerating_charge() {
        let mut world = TestWorld::open(12, 12);
        world.place_player(Vec2::new(130.0, 84.0));
        let mut monster = charger(quick(), &mut world, Vec2::new(80.0, 80.0));

        monster.update_ai(&mut world);
        assert_eq!(monster.phase(), Some(Phase::Charging));
        assert_eq!(monster.facing(), Direction::Right);
        assert!(world.sounds.contains(&Sound::Charge));

        monster.update_ai(&mut world);
        assert!((monster.velocity().x - 1.5).abs() < 1e-5);
        monster.update_ai(&mut world);
        assert!((monster.velocity().x - 2.0).abs() < 1e-5);
        monster.update_ai(&mut world);
        assert!((monster.velocity().x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn charge_runs_out_then_cools_down_then_wanders() {
        let mut world = TestWorld::open(12, 12);
        world.place_player(Vec2::new(130.0, 80.0));
        let mut monster = charger(quick(), &mut world, Vec2::new(80.0, 80.0));
        monster.update_ai(&mut world);

        for _ in 0..4 {
            monster.update_ai(&mut world);
            assert_eq!(monster.phase(), Some(Phase::Charging));
        }
        monster.update_ai(&mut world);
        assert_eq!(monster.phase(), Some(Phase::Cooldown));
        assert_eq!(monster.velocity(), Vec2::ZERO);

        world.player = None;
        for _ in 0..3 {
            monster.update_ai(&mut world);
        }
        assert_eq!(monster.phase(), Some(Phase::Wandering));
    }

    #[test]
    fn collision_cuts_the_charge_short() {
        let mut world = TestWorld::open(12, 12);
        world.place_player(Vec2::new(130.0, 80.0));
        let mut monster = charger(quick(), &mut world, Vec2::new(80.0, 80.0));
        monster.update_ai(&mut world);

        monster.body_mut().colliding = true;
        monster.update_ai(&mut world);
        assert_eq!(monster.phase(), Some(Phase::Cooldown));
    }

    #[test]
    fn duration_only_charges_ignore_collisions() {
        let mut world = TestWorld::open(12, 12);
        world.place_player(Vec2::new(130.0, 80.0));
        let spec = ChargeSpec {
            stop: ChargeStop::Duration,
            ..quick()
        };
        let mut monster = charger(spec, &mut world, Vec2::new(80.0, 80.0));
        monster.update_ai(&mut world);

        monster.body_mut().colliding = true;
        monster.update_ai(&mut world);
        assert_eq!(monster.phase(), Some(Phase::Charging));
    }

    #[test]
    fn tile_aligned_charges_stop_on_a_tile_center() {
        let mut world = TestWorld::open(12, 12);
        world.place_player(Vec2::new(140.0, 72.0));
        let spec = ChargeSpec {
            start_speed: 1.0,
            acceleration: 0.0,
            max_speed: 1.0,
            charge_time: TickRange::fixed(1),
            stop: ChargeStop::TileAligned,
            ..quick()
        };
        let mut monster = charger(spec, &mut world, Vec2::new(80.0, 72.0));

        let mut ticks = 0;
        while monster.phase() != Some(Phase::Cooldown) {
            monster.update_ai(&mut world);
            let velocity = monster.velocity();
            monster.body_mut().position += velocity;
            ticks += 1;
            assert!(ticks < 20, "charge never snapped");
        }
        assert_eq!(monster.position(), Vec2::new(88.0, 72.0));
    }

    #[test]
    fn non_positive_max_speed_is_rejected() {
        let spec = ChargeSpec {
            max_speed: 0.0,
            ..ChargeSpec::default()
        };
        let template =
            MonsterTemplate::new("charger", 4, BehaviorSpec::Script(ScriptSpec::Charge(spec)));
        assert!(matches!(
            template.validate(),
            Err(TemplateError::NonPositiveSpeed { .. })
        ));
    }
}
