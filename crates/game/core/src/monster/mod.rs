//! Monster instances.
//!
//! A [`Monster`] owns its simulation state, exactly one
//! [`InteractionDispatcher`] and a [`PhaseMachine`] that is only populated
//! for scripted behaviors. The room drives it through two entry points:
//! [`Monster::update_ai`] once per tick and [`Monster::trigger`] whenever
//! the collision pass detects contact.

mod ai;
mod properties;
mod status;
mod template;

use std::sync::Arc;

use state_machine::{MachineHost, StateMachine};
use tracing::{debug, trace};

pub use properties::{PropertyValue, SpawnProperties};
pub use status::{ActiveStatus, Body, Health, Hurt, Knockback, MonsterFlags, StatusKind};
pub use template::{
    Aim, BehaviorSpec, BoxKind, MonsterTemplate, MovementSpec, ShootSpec, SteerSpec,
    TemplateError, TemplateFlags, TickRange,
};
pub(crate) use template::check_chance;

use crate::entity::EntityId;
use crate::env::{Animation, EffectKind, Footprint, Sound, Spawn, World};
use crate::geometry::{Angle, CollisionBox, Direction, Rect, Vec2};
use crate::interaction::{
    ChainMode, InteractionDispatcher, InteractionType, Payload, ReactionSpec, Sender,
    default_reactions,
};
use crate::movement::Motion;
use crate::script::Phase;

/// State machine driving scripted monsters.
pub type PhaseMachine = StateMachine<Phase, Monster, World>;

/// A live monster in a room.
#[derive(Debug)]
pub struct Monster {
    pub(crate) id: EntityId,
    pub(crate) template: Arc<MonsterTemplate>,
    pub(crate) body: Body,
    pub(crate) health: Health,
    pub(crate) angle: Angle,
    pub(crate) facing: Direction,
    pub(crate) speed: f32,
    pub(crate) status: Option<ActiveStatus>,
    pub(crate) knockback: Knockback,
    pub(crate) hurt_timer: u32,
    pub(crate) flags: MonsterFlags,
    pub(crate) variant: Option<String>,
    pub(crate) reactions: InteractionDispatcher,
    pub(crate) motion: Motion,
    pub(crate) phases: PhaseMachine,
}

impl Monster {
    /// Builds a monster from a template.
    ///
    /// Validates the template, compiles the default reaction table plus the
    /// template's overrides and registers the script's phases. The monster
    /// is inert until [`Monster::initialize`] places it in a room.
    pub fn new(id: EntityId, template: Arc<MonsterTemplate>) -> Result<Self, TemplateError> {
        template.validate()?;

        let mut phases = PhaseMachine::new();
        if let Some(script) = template.behavior.script() {
            script.build(&mut phases);
        }
        let reactions = compile_reactions(&template, &phases)?;

        let count = template.movement.angle_count;
        Ok(Self {
            id,
            body: Body::default(),
            health: Health::full(template.health),
            angle: Angle::new(0, count),
            facing: Direction::Right,
            speed: template.movement.speed,
            status: None,
            knockback: Knockback::default(),
            hurt_timer: 0,
            flags: MonsterFlags::empty(),
            variant: None,
            reactions,
            motion: Motion::for_behavior(&template.behavior),
            phases,
            template,
        })
    }

    /// Places the monster at `position` and resets all per-run state.
    ///
    /// Spawn properties are read here and nowhere else.
    pub fn initialize(&mut self, position: Vec2, properties: &SpawnProperties, world: &mut World) {
        let template = Arc::clone(&self.template);
        self.body = Body::at(position);
        self.health = Health::full(template.health);
        self.speed = template.movement.speed;
        self.status = None;
        self.knockback.clear();
        self.hurt_timer = 0;
        self.flags = MonsterFlags::empty();
        self.variant = properties.variant().map(str::to_owned);
        self.motion = Motion::for_behavior(&template.behavior);

        let count = template.movement.angle_count;
        let initial_direction = properties.direction();
        self.angle = match initial_direction {
            Some(direction) => direction.to_angle(count),
            None => Angle::new(world.rng().index(usize::from(count)) as i32, count),
        };
        self.facing = self.angle.direction();

        match &template.behavior {
            BehaviorSpec::Wander { .. } => {
                if initial_direction.is_some() {
                    let ticks = template.movement.move_time.sample(world.rng());
                    self.motion.wander.start_moving(ticks);
                } else {
                    self.start_wander_leg(world);
                }
            }
            BehaviorSpec::Script(script) => {
                PhaseMachine::initialize_on_state(self, world, script.initial_phase());
            }
            BehaviorSpec::Idle | BehaviorSpec::Steer(_) => {}
        }

        debug!(
            target: "monster",
            monster = %self.id,
            name = %template.name,
            x = position.x,
            y = position.y,
            variant = ?self.variant,
            "initialized"
        );
    }

    /// Runs the reaction chain registered for `kind`, in registration order.
    ///
    /// An empty chain does nothing. The chain is captured before the first
    /// reaction runs, so reactions that re-register reactions only affect
    /// later triggers.
    pub fn trigger(
        &mut self,
        kind: InteractionType,
        sender: &mut dyn Sender,
        payload: &Payload,
        world: &mut World,
    ) {
        debug_assert_eq!(
            payload.shape(),
            kind.payload_shape(),
            "{kind} delivered with the wrong payload"
        );
        let chain = self.reactions.chain(kind);
        trace!(
            target: "interaction",
            monster = %self.id,
            name = %self.template.name,
            interaction = %kind,
            sender = %sender.id(),
            reactions = chain.len(),
            "trigger"
        );
        for reaction in chain.iter() {
            reaction.invoke(self, sender, payload, world);
        }
    }

    /// Triggers with a plain payload located at the sender.
    pub fn trigger_plain(
        &mut self,
        kind: InteractionType,
        sender: &mut dyn Sender,
        world: &mut World,
    ) {
        let payload = Payload::plain(sender.position());
        self.trigger(kind, sender, &payload, world);
    }

    // ===== accessors =====

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn template(&self) -> &Arc<MonsterTemplate> {
        &self.template
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable body access for the room's integrator.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Center of the hard box.
    pub fn center(&self) -> Vec2 {
        self.hitbox(BoxKind::Hard).center()
    }

    pub fn collision_box(&self, kind: BoxKind) -> CollisionBox {
        self.template.collision_box(kind)
    }

    /// World-space rectangle of the given box.
    pub fn hitbox(&self, kind: BoxKind) -> Rect {
        self.collision_box(kind).at(self.body.position)
    }

    pub fn footprint(&self) -> Footprint {
        Footprint {
            position: self.body.position,
            hard_box: self.template.hard_box,
            avoids_hazards: self.template.avoids_hazards(),
            flying: self.template.flags.contains(TemplateFlags::FLYING),
        }
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn flags(&self) -> MonsterFlags {
        self.flags
    }

    pub fn status(&self) -> Option<&ActiveStatus> {
        self.status.as_ref()
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status.is_some_and(|status| status.kind == kind)
    }

    pub fn is_destroyed(&self) -> bool {
        self.flags.contains(MonsterFlags::DESTROYED)
    }

    /// Destroyed by a soft kill; the room may bring it back on re-entry.
    pub fn is_respawnable(&self) -> bool {
        self.is_destroyed() && !self.flags.contains(MonsterFlags::DEAD)
    }

    /// Whether the collision pass should skip this monster.
    pub fn is_passable(&self) -> bool {
        self.flags.contains(MonsterFlags::PASSABLE)
    }

    pub fn is_invincible(&self) -> bool {
        self.template.flags.contains(TemplateFlags::INVINCIBLE) || self.hurt_timer > 0
    }

    pub fn is_being_knocked_back(&self) -> bool {
        self.knockback.is_active()
    }

    /// Current script phase, if the monster runs a script.
    pub fn phase(&self) -> Option<Phase> {
        self.phases.current().copied()
    }

    pub fn phases(&self) -> &PhaseMachine {
        &self.phases
    }

    pub fn reactions(&self) -> &InteractionDispatcher {
        &self.reactions
    }

    /// Mutable access for application code that registers reactions at
    /// runtime.
    pub fn reactions_mut(&mut self) -> &mut InteractionDispatcher {
        &mut self.reactions
    }

    // ===== combat =====

    /// Applies damage unless the monster is destroyed or invincible.
    ///
    /// Returns whether the hit landed. Depleting health kills the monster.
    pub fn hurt(&mut self, hurt: Hurt, world: &mut World) -> bool {
        if self.is_destroyed() || self.is_invincible() {
            return false;
        }

        self.health.damage(hurt.damage);
        self.hurt_timer = world.config().hurt_invincibility;
        debug!(
            target: "monster",
            monster = %self.id,
            name = %self.template.name,
            damage = hurt.damage,
            health = self.health.current(),
            "hurt"
        );

        if hurt.sound {
            world.play_sound(Sound::MonsterHurt);
        }
        world.play_animation(self.id, Animation::Hurt);

        if self.health.is_depleted() {
            self.kill(world);
        } else if hurt.knockback {
            self.bump_from(hurt.source, world);
        }
        true
    }

    /// Kills the monster for good: death effect, death sound, no respawn.
    pub fn kill(&mut self, world: &mut World) {
        if self.destroy(MonsterFlags::DESTROYED | MonsterFlags::DEAD, world) {
            debug!(target: "monster", monster = %self.id, name = %self.template.name, "killed");
        }
    }

    /// Destroys the monster but lets the room respawn it on re-entry.
    pub fn soft_kill(&mut self, world: &mut World) {
        if self.destroy(MonsterFlags::DESTROYED, world) {
            debug!(target: "monster", monster = %self.id, name = %self.template.name, "soft killed");
        }
    }

    fn destroy(&mut self, flags: MonsterFlags, world: &mut World) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.flags.insert(flags);
        self.body.velocity = Vec2::ZERO;
        self.status = None;
        self.knockback.clear();
        world.spawn_entity(
            Spawn::effect(EffectKind::MonsterExplosion, self.center()).from_source(self.id),
        );
        world.play_sound(Sound::MonsterDie);
        true
    }

    /// Starts a knockback away from `source` unless one is already running
    /// or the template is immune.
    pub fn bump_from(&mut self, source: Vec2, world: &mut World) {
        if self.is_being_knocked_back()
            || self.is_destroyed()
            || self.template.flags.contains(TemplateFlags::NO_KNOCKBACK)
        {
            return;
        }
        let away = (self.center() - source).normalize_or_zero();
        let away = if away == Vec2::ZERO {
            self.facing.opposite().to_vector()
        } else {
            away
        };
        let config = world.config();
        self.knockback
            .start(away * config.knockback_speed, config.knockback_duration);
        self.body.velocity = away * config.knockback_speed;
    }

    /// Enters a status state for `duration` ticks, replacing any other.
    pub fn set_status(&mut self, kind: StatusKind, duration: u32, drift: Vec2, world: &mut World) {
        if self.is_destroyed() || duration == 0 {
            return;
        }
        self.status = Some(ActiveStatus {
            kind,
            remaining: duration,
            drift,
        });
        self.body.velocity = drift;
        world.play_animation(self.id, kind.animation());
        debug!(target: "monster", monster = %self.id, status = %kind, duration, "status");
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Begins a script phase. Restarts it when already active.
    ///
    /// # Panics
    ///
    /// Panics if the monster's script does not define `phase`.
    pub fn begin_phase(&mut self, phase: Phase, world: &mut World) {
        PhaseMachine::begin_state(self, world, phase);
    }
}

impl MachineHost<Phase, World> for Monster {
    fn state_machine(&mut self) -> &mut PhaseMachine {
        &mut self.phases
    }
}

/// Default table plus the template's overrides, in declaration order.
fn compile_reactions(
    template: &MonsterTemplate,
    phases: &PhaseMachine,
) -> Result<InteractionDispatcher, TemplateError> {
    let registration = |source| TemplateError::Registration {
        name: template.name.clone(),
        source,
    };

    let mut dispatcher = InteractionDispatcher::new();
    for (kind, specs) in default_reactions(template.contact_damage) {
        let chain = specs.iter().map(ReactionSpec::compile).collect();
        dispatcher
            .try_set_reaction(kind, chain)
            .map_err(registration)?;
    }

    for entry in &template.reactions {
        for spec in &entry.reactions {
            if let Some(phase) = spec.phases().into_iter().find(|phase| !phases.contains(phase)) {
                return Err(TemplateError::UnknownPhase {
                    name: template.name.clone(),
                    phase,
                });
            }
        }

        let chain: Vec<_> = entry.reactions.iter().map(ReactionSpec::compile).collect();
        match entry.mode {
            ChainMode::Set => dispatcher
                .try_set_reaction(entry.interaction, chain)
                .map_err(registration)?,
            ChainMode::Add => {
                for reaction in chain {
                    dispatcher
                        .try_add_reaction(entry.interaction, reaction)
                        .map_err(registration)?;
                }
            }
        }
    }
    Ok(dispatcher)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::env::ProjectileKind;
    use crate::interaction::{
        PayloadShape, Reaction, ToolKind, ToolRef, WeaponLevel, reactions, sender_reactions,
    };
    use crate::testing::{TestSender, TestWorld};

    fn monster(world: &mut TestWorld, health: u32) -> Monster {
        let template = MonsterTemplate::new("dummy", health, BehaviorSpec::Idle);
        let mut monster = Monster::new(EntityId(1), Arc::new(template)).expect("valid template");
        monster.initialize(Vec2::new(64.0, 64.0), &SpawnProperties::new(), world);
        monster
    }

    fn logging(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Reaction {
        let log = Arc::clone(log);
        Reaction::new(name, move |_, _, _, _| log.lock().unwrap().push(name))
    }

    fn payload_for(kind: InteractionType) -> Payload {
        match kind.payload_shape() {
            PayloadShape::Plain => Payload::plain(Vec2::new(60.0, 64.0)),
            PayloadShape::Weapon => TestSender::sword_payload(WeaponLevel::L1),
            PayloadShape::Parry => Payload::Parry {
                monster_tool: ToolRef {
                    owner: EntityId(1),
                    kind: ToolKind::MonsterShield,
                    position: Vec2::new(64.0, 64.0),
                },
                sender_tool: ToolRef {
                    owner: EntityId(7),
                    kind: ToolKind::Sword,
                    position: Vec2::new(60.0, 64.0),
                },
            },
        }
    }

    #[test]
    fn trigger_runs_the_set_chain_in_order() {
        let mut world = TestWorld::open(8, 8);
        let mut monster = monster(&mut world, 3);
        let log = Arc::new(Mutex::new(Vec::new()));

        let dispatcher = monster.reactions_mut();
        dispatcher.add_reaction(InteractionType::Arrow, logging("c", &log));
        dispatcher.set_reaction(
            InteractionType::Arrow,
            vec![logging("a", &log), logging("b", &log)],
        );

        let mut arrow = TestSender::projectile(ProjectileKind::Arrow);
        monster.trigger(
            InteractionType::Arrow,
            &mut arrow,
            &Payload::plain(Vec2::new(60.0, 64.0)),
            &mut world,
        );

        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn triggering_an_empty_chain_changes_nothing() {
        for kind in InteractionType::iter() {
            let mut world = TestWorld::open(8, 8);
            let mut monster = monster(&mut world, 3);
            monster.reactions_mut().clear(kind);
            let before = (
                monster.position(),
                monster.velocity(),
                monster.flags(),
                monster.status().is_none(),
            );
            let world_before = (world.spawns.len(), world.sounds.len(), world.events.len());

            let mut sender = TestSender::projectile(ProjectileKind::Arrow).living();
            monster.trigger(kind, &mut sender, &payload_for(kind), &mut world);

            let after = (
                monster.position(),
                monster.velocity(),
                monster.flags(),
                monster.status().is_none(),
            );
            assert_eq!(before, after, "{kind} changed the monster");
            assert_eq!(monster.health().current(), 3, "{kind}");
            assert!(!monster.is_destroyed(), "{kind}");
            assert_eq!(
                (world.spawns.len(), world.sounds.len(), world.events.len()),
                world_before,
                "{kind} reached the room"
            );
            assert!(!sender.destroyed && !sender.killed, "{kind}");
            assert_eq!(
                (sender.damage_taken, sender.bumps, sender.intercepted, sender.deflected),
                (0, 0, 0, 0),
                "{kind} touched the sender"
            );
        }
    }

    #[test]
    fn a_destroy_then_damage_chain_spends_the_arrow() {
        let mut world = TestWorld::open(8, 8);
        let mut monster = monster(&mut world, 3);
        monster.reactions_mut().set_reaction(
            InteractionType::Arrow,
            vec![sender_reactions::destroy(), reactions::damage(1)],
        );

        let mut arrow = TestSender::projectile(ProjectileKind::Arrow);
        monster.trigger(
            InteractionType::Arrow,
            &mut arrow,
            &Payload::plain(Vec2::new(60.0, 64.0)),
            &mut world,
        );

        assert!(arrow.destroyed);
        assert_eq!(monster.health().current(), 2);
    }
}
