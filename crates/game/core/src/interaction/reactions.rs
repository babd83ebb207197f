//! Reactions that act on the monster a chain is registered on.
//!
//! Each function returns a fresh [`Reaction`]; none of them keep state
//! between invocations.

use crate::env::{EffectKind, Sound, Spawn};
use crate::geometry::Vec2;
use crate::monster::{Hurt, StatusKind};
use crate::script::Phase;

use super::kind::InteractionType;
use super::payload::{Payload, PayloadShape, WeaponLevel};
use super::reaction::Reaction;

pub fn kill() -> Reaction {
    Reaction::new("kill", |monster, _sender, _payload, world| monster.kill(world))
}

/// Destroys the monster but leaves it respawnable.
pub fn soft_kill() -> Reaction {
    Reaction::new("soft_kill", |monster, _sender, _payload, world| {
        monster.soft_kill(world)
    })
}

pub fn damage(amount: u32) -> Reaction {
    Reaction::new("damage", move |monster, sender, _payload, world| {
        monster.hurt(Hurt::new(amount, sender.position()), world);
    })
}

/// Like [`damage`] without the hurt sound.
pub fn silent_damage(amount: u32) -> Reaction {
    Reaction::new("silent_damage", move |monster, sender, _payload, world| {
        monster.hurt(Hurt::new(amount, sender.position()).silent(), world);
    })
}

/// Damage chosen by the weapon's upgrade level.
///
/// Only valid for interaction types that carry a weapon payload; the
/// dispatcher rejects any other registration.
pub fn damage_by_level(l1: u32, l2: u32, l3: u32) -> Reaction {
    Reaction::new("damage_by_level", move |monster, sender, payload, world| {
        let Some(level) = payload.weapon_level() else {
            panic!(
                "damage_by_level needs a weapon payload, got {}",
                payload.shape()
            );
        };
        let amount = match level {
            WeaponLevel::L1 => l1,
            WeaponLevel::L2 => l2,
            WeaponLevel::L3 => l3,
        };
        monster.hurt(Hurt::new(amount, sender.position()), world);
    })
    .requiring(PayloadShape::Weapon)
}

/// Knockback without damage. Skipped while already being knocked back.
pub fn bump() -> Reaction {
    Reaction::new("bump", |monster, sender, _payload, world| {
        if !monster.is_being_knocked_back() {
            monster.bump_from(sender.position(), world);
        }
    })
}

/// Knocks the monster and the sender away from each other.
pub fn parry() -> Reaction {
    Reaction::new("parry", |monster, sender, _payload, world| {
        if monster.is_being_knocked_back() || sender.is_being_knocked_back() {
            return;
        }
        monster.bump_from(sender.position(), world);
        sender.bump(monster.center());
    })
}

/// [`parry`] plus sparks and a cling sound where the weapons met.
pub fn parry_with_cling_effect() -> Reaction {
    Reaction::new("parry_with_cling_effect", |monster, sender, payload, world| {
        if monster.is_being_knocked_back() || sender.is_being_knocked_back() {
            return;
        }
        let cling_point = match payload {
            Payload::Parry { .. } => payload.contact_point(),
            _ => (monster.center() + sender.position()) * 0.5,
        };
        monster.bump_from(sender.position(), world);
        sender.bump(monster.center());
        world.spawn_entity(Spawn::effect(EffectKind::Cling, cling_point).from_source(monster.id()));
        world.play_sound(Sound::Cling);
    })
}

/// Damages and sets the monster alight. Fire senders are used up.
pub fn burn(amount: u32) -> Reaction {
    Reaction::new("burn", move |monster, sender, _payload, world| {
        if sender.kind().is_fire() {
            sender.destroy();
        }
        let hurt = Hurt::new(amount, sender.position()).without_knockback();
        if monster.hurt(hurt, world) && !monster.is_destroyed() {
            let duration = world.config().burn_duration;
            monster.set_status(StatusKind::Burning, duration, Vec2::ZERO, world);
            world.play_sound(Sound::Burn);
        }
    })
}

pub fn stun() -> Reaction {
    Reaction::new("stun", |monster, _sender, _payload, world| {
        if monster.is_destroyed() {
            return;
        }
        let duration = world.config().stun_duration;
        monster.set_status(StatusKind::Stunned, duration, Vec2::ZERO, world);
        world.play_sound(Sound::Stun);
    })
}

/// Carries the monster away from the sender for a while.
pub fn gale() -> Reaction {
    Reaction::new("gale", |monster, sender, _payload, world| {
        if monster.is_destroyed() {
            return;
        }
        let away = (monster.center() - sender.position()).normalize_or_zero();
        let config = world.config();
        let (duration, drift) = (config.gale_duration, away * config.gale_speed);
        monster.set_status(StatusKind::Gale, duration, drift, world);
    })
}

/// Swaps places with the switch hook and leaves the monster busy.
pub fn switch_hook() -> Reaction {
    Reaction::new("switch_hook", |monster, sender, _payload, world| {
        if monster.is_destroyed() {
            return;
        }
        let hook = sender.position();
        sender.set_position(monster.body.position);
        monster.body.position = hook;
        monster.body.velocity = Vec2::ZERO;
        let duration = world.config().busy_duration;
        monster.set_status(StatusKind::Busy, duration, Vec2::ZERO, world);
        world.play_sound(Sound::SwitchHook);
    })
}

/// Shocks a player-held attacker and freezes the monster while it sparks.
///
/// Senders that are not the player or a player-held tool are ignored, as
/// is a monster already electrocuted.
pub fn electrocute() -> Reaction {
    Reaction::new("electrocute", |monster, sender, _payload, world| {
        if monster.is_destroyed()
            || !sender.kind().is_player_held()
            || monster.has_status(StatusKind::Electrocuted)
        {
            return;
        }
        let config = world.config();
        let (damage, duration) = (config.electrocute_damage, config.electrocute_duration);
        sender.hurt(damage, monster.center());
        monster.set_status(StatusKind::Electrocuted, duration, Vec2::ZERO, world);
        world.play_sound(Sound::Electrocute);
    })
}

/// Re-dispatches as one of the four seed types, picked by the room RNG.
pub fn mystery_seed() -> Reaction {
    const SEEDS: [InteractionType; 4] = [
        InteractionType::EmberSeed,
        InteractionType::ScentSeed,
        InteractionType::PegasusSeed,
        InteractionType::GaleSeed,
    ];
    Reaction::new("mystery_seed", |monster, sender, payload, world| {
        let seed = SEEDS[world.rng().index(SEEDS.len())];
        monster.trigger(seed, sender, payload, world);
    })
}

/// Spawns `effect` at the contact point.
pub fn contact_effect(effect: EffectKind) -> Reaction {
    Reaction::new("contact_effect", move |monster, _sender, payload, world| {
        world.spawn_entity(Spawn::effect(effect, payload.contact_point()).from_source(monster.id()));
    })
}

/// Moves the monster's script into `phase`.
pub fn begin_phase(phase: Phase) -> Reaction {
    Reaction::new("begin_phase", move |monster, _sender, _payload, world| {
        if !monster.is_destroyed() {
            monster.begin_phase(phase, world);
        }
    })
}

/// Runs `then` while the script is in `phase`, `otherwise` the rest of the
/// time.
///
/// The combined reaction reads whatever payload its branches read.
pub fn in_phase(phase: Phase, then: Vec<Reaction>, otherwise: Vec<Reaction>) -> Reaction {
    let requires = then
        .iter()
        .chain(&otherwise)
        .find_map(Reaction::required_shape);
    let reaction = Reaction::new("in_phase", move |monster, sender, payload, world| {
        let branch = if monster.phase() == Some(phase) {
            &then
        } else {
            &otherwise
        };
        for reaction in branch {
            reaction.invoke(monster, sender, payload, world);
        }
    });
    match requires {
        Some(shape) => reaction.requiring(shape),
        None => reaction,
    }
}
