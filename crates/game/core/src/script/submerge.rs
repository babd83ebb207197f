//! Hide underwater, surface to shoot, dive again.
//!
//! While submerged the monster is passable: the collision pass skips it, so
//! nothing can hit it and it cannot touch the player.

use super::Phase;
use crate::env::{Animation, EffectKind, Sound, Spawn, World};
use crate::geometry::Vec2;
use crate::monster::{Monster, MonsterFlags, PhaseMachine, ShootSpec, TemplateError, TickRange};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubmergeSpec {
    pub submerged_time: TickRange,
    /// Length of the surfacing animation.
    pub surface_time: u32,
    pub surfaced_time: TickRange,
    /// Length of the diving animation.
    pub dive_time: u32,
    pub shoot: Option<ShootSpec>,
    /// Ticks after surfacing before the shot.
    pub shoot_delay: u32,
}

impl Default for SubmergeSpec {
    fn default() -> Self {
        Self {
            submerged_time: TickRange::new(60, 120),
            surface_time: 16,
            surfaced_time: TickRange::new(48, 64),
            dive_time: 16,
            shoot: None,
            shoot_delay: 16,
        }
    }
}

impl SubmergeSpec {
    pub(crate) fn validate(&self, name: &str) -> Result<(), TemplateError> {
        self.submerged_time.check(name, "submerge.submerged_time")?;
        self.surfaced_time.check(name, "submerge.surfaced_time")?;
        if let Some(shoot) = &self.shoot {
            crate::monster::check_chance(name, "submerge.shoot.chance", shoot.chance)?;
        }
        Ok(())
    }
}

fn splash(monster: &Monster, world: &mut World) {
    world.spawn_entity(Spawn::effect(EffectKind::Splash, monster.center()).from_source(monster.id));
    world.play_sound(Sound::Splash);
}

fn hold_still(monster: &mut Monster, _world: &mut World) {
    monster.body.velocity = Vec2::ZERO;
}

pub(super) fn build(spec: &SubmergeSpec, machine: &mut PhaseMachine) {
    let spec = *spec;

    machine
        .add_state(Phase::Submerged)
        .on_begin(|monster, _world| {
            monster.flags.insert(MonsterFlags::PASSABLE);
            monster.body.velocity = Vec2::ZERO;
        })
        .on_update(hold_still)
        .on_end(|monster, _world| monster.flags.remove(MonsterFlags::PASSABLE))
        .set_duration_range(spec.submerged_time.min, spec.submerged_time.max)
        .set_next(Phase::Resurfacing);

    machine
        .add_state(Phase::Resurfacing)
        .on_begin(|monster, world| {
            splash(monster, world);
            world.play_animation(monster.id, Animation::Surfacing);
        })
        .on_update(hold_still)
        .set_duration(spec.surface_time)
        .set_next(Phase::Surfaced);

    machine
        .add_state(Phase::Surfaced)
        .on_begin(|monster, world| {
            monster.face_player(world);
            world.play_animation(monster.id, Animation::Surfaced);
        })
        .on_update(hold_still)
        .append_event(spec.shoot_delay, move |monster, world| {
            if let Some(shoot) = &spec.shoot
                && world.rng().chance(shoot.chance)
            {
                monster.shoot(shoot, world);
            }
        })
        .set_duration_range(spec.surfaced_time.min, spec.surfaced_time.max)
        .set_next(Phase::Submerging);

    machine
        .add_state(Phase::Submerging)
        .on_begin(|monster, world| {
            splash(monster, world);
            world.play_animation(monster.id, Animation::Submerged);
        })
        .on_update(hold_still)
        .set_duration(spec.dive_time)
        .set_next(Phase::Submerged);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::entity::EntityId;
    use crate::env::ProjectileKind;
    use crate::monster::{Aim, BehaviorSpec, MonsterTemplate, SpawnProperties};
    use crate::script::ScriptSpec;
    use crate::testing::TestWorld;

    fn spec() -> SubmergeSpec {
        SubmergeSpec {
            submerged_time: TickRange::fixed(10),
            surface_time: 4,
            surfaced_time: TickRange::fixed(8),
            dive_time: 4,
            shoot: Some(ShootSpec {
                projectile: ProjectileKind::Fireball,
                speed: None,
                chance: 100,
                aim: Aim::Player,
                offset: 0.0,
            }),
            shoot_delay: 3,
        }
    }

    fn zora(world: &mut TestWorld) -> Monster {
        let template = MonsterTemplate::new(
            "river_zora",
            2,
            BehaviorSpec::Script(ScriptSpec::Submerge(spec())),
        );
        let mut monster = Monster::new(EntityId(4), Arc::new(template)).expect("valid template");
        monster.initialize(Vec2::new(64.0, 64.0), &SpawnProperties::new(), world);
        monster
    }

    fn run(monster: &mut Monster, world: &mut TestWorld, ticks: u32) {
        for _ in 0..ticks {
            monster.update_ai(world);
        }
    }

    #[test]
    fn starts_submerged_and_passable() {
        let mut world = TestWorld::open(8, 8);
        let monster = zora(&mut world);
        assert_eq!(monster.phase(), Some(Phase::Submerged));
        assert!(monster.is_passable());
    }

    #[test]
    fn cycles_through_every_phase() {
        let mut world = TestWorld::open(8, 8);
        world.place_player(Vec2::new(64.0, 120.0));
        let mut monster = zora(&mut world);

        run(&mut monster, &mut world, 10);
        assert_eq!(monster.phase(), Some(Phase::Resurfacing));
        assert!(!monster.is_passable());
        assert_eq!(world.spawned_effects(), vec![EffectKind::Splash]);

        run(&mut monster, &mut world, 4);
        assert_eq!(monster.phase(), Some(Phase::Surfaced));

        run(&mut monster, &mut world, 8);
        assert_eq!(monster.phase(), Some(Phase::Submerging));

        run(&mut monster, &mut world, 4);
        assert_eq!(monster.phase(), Some(Phase::Submerged));
        assert!(monster.is_passable());
    }

    #[test]
    fn shoots_at_the_player_after_the_delay() {
        let mut world = TestWorld::open(8, 8);
        world.place_player(Vec2::new(64.0, 120.0));
        let mut monster = zora(&mut world);
        run(&mut monster, &mut world, 14);
        assert_eq!(monster.phase(), Some(Phase::Surfaced));

        run(&mut monster, &mut world, 2);
        assert!(world.spawned_projectiles().is_empty());
        run(&mut monster, &mut world, 1);

        let shots = world.spawned_projectiles();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].0, ProjectileKind::Fireball);
        assert!(shots[0].1.y > 0.0, "shot should head down toward the player");
    }
}
