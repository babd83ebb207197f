//! The collision pass: turns overlaps found after integration into interactions.

use game_core::{BoxKind, InteractionType, Payload, RoomControl, Sender, TileFlags, TileLocation};

use super::MonsterSlot;
use super::entities::{HazardTile, PlayerStandIn, Projectile, projectile_damage, projectile_interaction};
use super::world::RoomWorld;

/// Delivers every overlap found this tick and returns how many interactions
/// reached a monster.
///
/// Passable and destroyed monsters are skipped entirely.
pub(super) fn run(
    monsters: &mut [MonsterSlot],
    projectiles: &mut [Projectile],
    mut player: Option<&mut PlayerStandIn>,
    world: &mut RoomWorld,
) -> u64 {
    let mut delivered = 0;

    for projectile in projectiles.iter_mut() {
        if projectile.is_destroyed() {
            continue;
        }
        if projectile.is_hostile() {
            if let Some(player) = player.as_deref_mut()
                && player.rect().intersects(&projectile.hitbox())
            {
                player.take_damage(projectile_damage(projectile.kind));
                projectile.destroy();
            }
            continue;
        }
        delivered += projectile_hit(monsters, projectile, world);
    }

    if let Some(player) = player.as_deref_mut() {
        let reach = player.rect();
        for slot in monsters.iter_mut() {
            let monster = &mut slot.monster;
            if monster.is_destroyed()
                || monster.is_passable()
                || !monster.hitbox(BoxKind::Soft).intersects(&reach)
            {
                continue;
            }
            let payload = Payload::plain(reach.center());
            monster.trigger(InteractionType::PlayerContact, &mut *player, &payload, &mut *world);
            delivered += 1;
        }
    }

    for slot in monsters.iter_mut() {
        let monster = &mut slot.monster;
        if monster.is_destroyed()
            || monster.is_passable()
            || !monster.template().avoids_hazards()
            || monster.body().z > 0.0
        {
            continue;
        }
        let center = monster.center();
        let location = TileLocation::containing(center, world.config().tile_size);
        let Some(interaction) = world.tile_at(location).and_then(|tile| hazard_interaction(tile.flags))
        else {
            continue;
        };
        let mut tile = HazardTile { position: center };
        monster.trigger(interaction, &mut tile, &Payload::plain(center), &mut *world);
        delivered += 1;
    }

    delivered
}

/// Lets a player projectile hit the first monster it overlaps.
///
/// Projectiles are spent by a hit unless a reaction sent them back.
fn projectile_hit(monsters: &mut [MonsterSlot], projectile: &mut Projectile, world: &mut RoomWorld) -> u64 {
    let Some(interaction) = projectile_interaction(projectile.kind) else {
        return 0;
    };
    let rect = projectile.hitbox();
    let Some(slot) = monsters.iter_mut().find(|slot| {
        let monster = &slot.monster;
        !monster.is_destroyed()
            && !monster.is_passable()
            && Some(monster.id()) != projectile.source
            && monster.hitbox(BoxKind::Soft).intersects(&rect)
    }) else {
        return 0;
    };

    let payload = Payload::plain(projectile.position);
    slot.monster.trigger(interaction, &mut *projectile, &payload, world);
    if !projectile.deflected {
        projectile.destroy();
    }
    1
}

fn hazard_interaction(flags: TileFlags) -> Option<InteractionType> {
    if flags.contains(TileFlags::HOLE) {
        Some(InteractionType::Hole)
    } else if flags.contains(TileFlags::LAVA) {
        Some(InteractionType::Lava)
    } else if flags.contains(TileFlags::WATER) {
        Some(InteractionType::Water)
    } else {
        None
    }
}
