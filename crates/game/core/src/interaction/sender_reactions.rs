//! Reactions that act on the sender of an interaction.

use super::reaction::Reaction;

pub fn destroy() -> Reaction {
    Reaction::new("sender_destroy", |_monster, sender, _payload, _world| {
        sender.destroy()
    })
}

/// Stops an interceptable projectile. Other senders are unaffected.
pub fn intercept() -> Reaction {
    Reaction::new("sender_intercept", |_monster, sender, _payload, _world| {
        if let Some(projectile) = sender.interceptable() {
            projectile.intercept();
        }
    })
}

/// Bounces an interceptable projectile back. Other senders are unaffected.
pub fn deflect() -> Reaction {
    Reaction::new("sender_deflect", |_monster, sender, _payload, _world| {
        if let Some(projectile) = sender.interceptable() {
            projectile.deflect();
        }
    })
}

pub fn bump() -> Reaction {
    Reaction::new("sender_bump", |monster, sender, _payload, _world| {
        sender.bump(monster.center())
    })
}

pub fn damage(amount: u32) -> Reaction {
    Reaction::new("sender_damage", move |monster, sender, _payload, _world| {
        sender.hurt(amount, monster.center())
    })
}

/// Kills living senders and destroys everything else.
pub fn kill() -> Reaction {
    Reaction::new("sender_kill", |_monster, sender, _payload, _world| {
        if sender.is_living_unit() {
            sender.kill();
        } else {
            sender.destroy();
        }
    })
}
