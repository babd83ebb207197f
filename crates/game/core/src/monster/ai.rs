//! Per-tick decision making.

use std::sync::Arc;

use tracing::trace;

use super::{Aim, BehaviorSpec, Monster, PhaseMachine, ShootSpec};
use crate::env::{Animation, Sound, Spawn, World};
use crate::geometry::{Angle, Direction, Vec2};
use crate::movement::{WanderParams, choose_wander_angle, is_heading_clear};

impl Monster {
    /// Advances the monster by one tick and writes its velocity.
    ///
    /// Knockback and status states take precedence over the behavior; the
    /// behavior (and a script's phase timers) resume once they end.
    pub fn update_ai(&mut self, world: &mut World) {
        if self.is_destroyed() {
            self.body.velocity = Vec2::ZERO;
            return;
        }
        self.hurt_timer = self.hurt_timer.saturating_sub(1);

        if let Some(velocity) = self.knockback.tick() {
            self.body.velocity = velocity;
            return;
        }

        if let Some(status) = self.status.as_mut() {
            self.body.velocity = status.drift;
            status.remaining = status.remaining.saturating_sub(1);
            if status.remaining == 0 {
                self.status = None;
                world.play_animation(self.id, Animation::Idle);
            }
            return;
        }

        let template = Arc::clone(&self.template);
        match &template.behavior {
            BehaviorSpec::Idle => self.body.velocity = Vec2::ZERO,
            BehaviorSpec::Wander { shoot } => self.wander_step(shoot.as_ref(), world),
            BehaviorSpec::Steer(_) => self.steer_step(world),
            BehaviorSpec::Script(_) => PhaseMachine::update(self, world),
        }

        if self.body.velocity != Vec2::ZERO {
            self.facing = Direction::from_vector(self.body.velocity);
        }
    }

    fn wander_params(&self, world: &World) -> WanderParams {
        WanderParams {
            speed: self.speed,
            face_player_chance: self.template.movement.face_player_chance,
            lookahead: world.config().wander_lookahead,
        }
    }

    /// Picks a heading and starts a move leg of random length.
    pub(crate) fn start_wander_leg(&mut self, world: &mut World) {
        let params = self.wander_params(world);
        self.angle = choose_wander_angle(world, &self.footprint(), self.angle, &params);
        let ticks = self.template.movement.move_time.sample(world.rng());
        self.motion.wander.start_moving(ticks);
        self.body.velocity = self.angle.to_vector() * self.speed;
    }

    /// One tick of the move/stop cycle. A monster that runs into something
    /// mid-leg picks a new heading without restarting the leg.
    pub(crate) fn wander_step(&mut self, shoot: Option<&ShootSpec>, world: &mut World) {
        if !self.motion.wander.is_moving() {
            self.body.velocity = Vec2::ZERO;
            if self.motion.wander.tick() {
                self.start_wander_leg(world);
            }
            return;
        }

        let params = self.wander_params(world);
        let footprint = self.footprint();
        if self.body.colliding || !is_heading_clear(&*world, &footprint, self.angle, &params) {
            self.angle = choose_wander_angle(world, &footprint, self.angle, &params);
        }
        self.body.velocity = self.angle.to_vector() * self.speed;

        if self.motion.wander.tick() {
            let ticks = self.template.movement.stop_time.sample(world.rng());
            self.motion.wander.stop(ticks);
            self.body.velocity = Vec2::ZERO;
            if let Some(shoot) = shoot
                && world.rng().chance(shoot.chance)
            {
                self.shoot(shoot, world);
            }
        }
    }

    fn steer_step(&mut self, world: &mut World) {
        let Some(player) = world.player() else {
            self.body.velocity = Vec2::ZERO;
            return;
        };
        let center = self.center();
        self.angle = self
            .motion
            .homing
            .update(self.angle, center, player.center, world.rng());
        self.body.velocity = self.angle.to_vector() * self.speed;
    }

    /// Turns toward the player, if there is one.
    pub(crate) fn face_player(&mut self, world: &World) {
        if let Some(player) = world.player() {
            let toward = player.center - self.center();
            if toward != Vec2::ZERO {
                self.angle = Angle::from_vector(toward, self.angle.count());
                self.facing = Direction::from_vector(toward);
            }
        }
    }

    /// Fires one projectile from the monster's center.
    pub(crate) fn shoot(&mut self, spec: &ShootSpec, world: &mut World) {
        let center = self.center();
        let direction = match spec.aim {
            Aim::Facing => self.facing.to_vector(),
            Aim::Player => {
                self.face_player(world);
                world
                    .player()
                    .map(|player| (player.center - center).normalize_or_zero())
                    .filter(|direction| *direction != Vec2::ZERO)
                    .unwrap_or_else(|| self.facing.to_vector())
            }
        };
        let speed = spec.speed.unwrap_or(world.config().projectile_speed);
        let origin = center + direction * spec.offset;
        let projectile = world.spawn_entity(
            Spawn::projectile(spec.projectile, origin, direction * speed).from_source(self.id),
        );
        world.play_sound(Sound::Shoot);
        trace!(
            target: "monster",
            monster = %self.id,
            projectile = %projectile,
            kind = ?spec.projectile,
            "shoot"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::entity::EntityId;
    use crate::env::{ProjectileKind, TileFlags};
    use crate::interaction::{InteractionType, SenderKind, WeaponLevel};
    use crate::monster::{
        MonsterTemplate, MovementSpec, PropertyValue, SpawnProperties, StatusKind, SteerSpec,
        TemplateFlags, TickRange,
    };
    use crate::testing::{TestSender, TestWorld};

    fn spawn(template: MonsterTemplate, world: &mut TestWorld, at: Vec2) -> Monster {
        let mut monster = Monster::new(EntityId(1), Arc::new(template)).expect("valid template");
        monster.initialize(at, &SpawnProperties::new(), world);
        monster
    }

    fn wanderer(shoot: Option<ShootSpec>) -> MonsterTemplate {
        MonsterTemplate::new("octorok", 3, BehaviorSpec::Wander { shoot }).with_movement(
            MovementSpec {
                speed: 1.0,
                move_time: TickRange::fixed(4),
                stop_time: TickRange::fixed(2),
                ..MovementSpec::default()
            },
        )
    }

    #[test]
    fn wanderer_alternates_moving_and_stopping() {
        let mut world = TestWorld::open(10, 10).with_seed(11);
        let mut monster = spawn(wanderer(None), &mut world, Vec2::new(80.0, 80.0));

        let moving: Vec<bool> = (0..8)
            .map(|_| {
                monster.update_ai(&mut world);
                monster.velocity() != Vec2::ZERO
            })
            .collect();
        assert_eq!(moving, vec![true, true, true, false, false, true, true, true]);
    }

    #[test]
    fn wander_velocity_matches_heading_and_speed() {
        let mut world = TestWorld::open(10, 10).with_seed(2);
        let mut monster = spawn(wanderer(None), &mut world, Vec2::new(80.0, 80.0));
        monster.update_ai(&mut world);
        let expected = monster.angle().to_vector() * monster.speed();
        assert!((monster.velocity() - expected).length() < 1e-5);
    }

    #[test]
    fn wanderer_with_certain_shot_fires_when_a_leg_ends() {
        let mut world = TestWorld::open(10, 10).with_seed(3);
        let shoot = ShootSpec {
            projectile: ProjectileKind::Rock,
            speed: Some(3.0),
            chance: 100,
            aim: Aim::Facing,
            offset: 4.0,
        };
        let mut monster = spawn(wanderer(Some(shoot)), &mut world, Vec2::new(80.0, 80.0));
        for _ in 0..4 {
            monster.update_ai(&mut world);
        }

        let shots = world.spawned_projectiles();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].0, ProjectileKind::Rock);
        assert!((shots[0].1.length() - 3.0).abs() < 1e-5);
        assert!(world.sounds.contains(&Sound::Shoot));
    }

    #[test]
    fn player_aimed_shot_heads_for_the_player() {
        let mut world = TestWorld::open(10, 10);
        world.place_player(Vec2::new(80.0, 20.0));
        let mut monster = spawn(wanderer(None), &mut world, Vec2::new(80.0, 80.0));
        let spec = ShootSpec {
            projectile: ProjectileKind::Fireball,
            speed: None,
            chance: 100,
            aim: Aim::Player,
            offset: 0.0,
        };
        monster.shoot(&spec, &mut world);

        let (_, velocity) = world.spawned_projectiles()[0];
        assert!((velocity - Vec2::new(0.0, -world.config.projectile_speed)).length() < 1e-5);
        assert_eq!(monster.facing(), Direction::Up);
    }

    #[test]
    fn enclosed_wanderer_keeps_going_without_panicking() {
        let mut world = TestWorld::open(5, 5).with_seed(8);
        for y in 1..=3 {
            for x in 1..=3 {
                if (x, y) != (2, 2) {
                    world.set_tile(x, y, TileFlags::SOLID);
                }
            }
        }
        let template = wanderer(None).with_movement(MovementSpec {
            speed: 4.0,
            move_time: TickRange::fixed(3),
            stop_time: TickRange::fixed(1),
            ..MovementSpec::default()
        });
        let mut monster = spawn(template, &mut world, Vec2::new(40.0, 40.0));
        for _ in 0..50 {
            monster.update_ai(&mut world);
        }
        assert_eq!(monster.angle().count(), 8);
    }

    #[test]
    fn steering_turns_one_step_at_a_time() {
        let mut world = TestWorld::open(10, 10);
        world.place_player(Vec2::new(80.0, 8.0));
        let steer = BehaviorSpec::Steer(SteerSpec { angle_duration: 1 });
        let template = MonsterTemplate::new("keese", 1, steer)
            .with_flags(TemplateFlags::FLYING)
            .with_movement(MovementSpec {
                angle_count: 16,
                ..MovementSpec::default()
            });
        let mut monster = Monster::new(EntityId(2), Arc::new(template)).expect("valid template");
        let properties = SpawnProperties::new()
            .with(SpawnProperties::DIRECTION, PropertyValue::Text("right".to_owned()));
        monster.initialize(Vec2::new(80.0, 80.0), &properties, &mut world);

        let headings: Vec<u16> = (0..5)
            .map(|_| {
                monster.update_ai(&mut world);
                monster.angle().index()
            })
            .collect();
        assert_eq!(headings, vec![1, 2, 3, 4, 4]);
    }

    #[test]
    fn steering_without_a_player_stands_still() {
        let mut world = TestWorld::open(10, 10);
        let steer = BehaviorSpec::Steer(SteerSpec { angle_duration: 4 });
        let template = MonsterTemplate::new("keese", 1, steer);
        let mut monster = spawn(template, &mut world, Vec2::new(80.0, 80.0));
        monster.update_ai(&mut world);
        assert_eq!(monster.velocity(), Vec2::ZERO);
    }

    #[test]
    fn status_freezes_behavior_until_it_runs_out() {
        let mut world = TestWorld::open(10, 10);
        let mut monster = spawn(wanderer(None), &mut world, Vec2::new(80.0, 80.0));
        let mut boomerang = TestSender::projectile(ProjectileKind::Boomerang);
        monster.trigger_plain(InteractionType::Boomerang, &mut boomerang, &mut world);
        assert!(monster.has_status(StatusKind::Stunned));

        for _ in 0..world.config.stun_duration {
            monster.update_ai(&mut world);
            assert_eq!(monster.velocity(), Vec2::ZERO);
        }
        assert!(monster.status().is_none());
    }

    #[test]
    fn knockback_overrides_behavior_and_expires() {
        let mut world = TestWorld::open(10, 10);
        let mut monster = spawn(wanderer(None), &mut world, Vec2::new(80.0, 80.0));
        let mut shield = TestSender::new(SenderKind::Player);
        shield.position = Vec2::new(60.0, 80.0);
        let payload = TestSender::sword_payload(WeaponLevel::L1);
        monster.trigger(InteractionType::Shovel, &mut shield, &payload, &mut world);
        assert!(monster.is_being_knocked_back());

        for _ in 0..world.config.knockback_duration {
            monster.update_ai(&mut world);
            assert!(monster.velocity().x > 0.0);
        }
        assert!(!monster.is_being_knocked_back());
    }

    #[test]
    fn destroyed_monsters_stop_thinking() {
        let mut world = TestWorld::open(10, 10);
        let mut monster = spawn(wanderer(None), &mut world, Vec2::new(80.0, 80.0));
        monster.kill(&mut world);
        monster.update_ai(&mut world);
        assert_eq!(monster.velocity(), Vec2::ZERO);
    }
}
