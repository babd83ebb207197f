use game_content::builtin_monsters;
use game_core::geometry::Vec2;
use game_core::{
    BoxKind, EntityId, GameConfig, InteractionType, Phase, ProjectileKind, RoomControl, SpawnProperties,
    TileFlags, TileLocation, WeaponLevel,
};
use runtime::{Room, RuntimeError, TileMap};

const TILE: f32 = 16.0;

fn open_room(tiles: TileMap, seed: u64) -> Room {
    let catalog = builtin_monsters().expect("builtin monsters parse");
    Room::new("test", GameConfig::default(), tiles, catalog, seed)
}

fn spawn(room: &mut Room, template: &str, position: Vec2) -> EntityId {
    room.spawn_monster(template, position, &SpawnProperties::new())
        .expect("template exists")
}

#[test]
fn an_arrow_is_spent_and_takes_one_health() {
    let mut room = open_room(TileMap::open(16, 16, TILE), 5);
    let beetle = spawn(&mut room, "spiked_beetle", Vec2::new(120.0, 120.0));
    let health = room.monster(beetle).expect("beetle").health().current();

    let arrow = room.fire_projectile(ProjectileKind::Arrow, Vec2::new(120.0, 120.0), Vec2::ZERO);
    room.step();

    let monster = room.monster(beetle).expect("beetle survives one arrow");
    assert_eq!(monster.health().current(), health - 1);
    assert!(room.projectiles().iter().all(|projectile| projectile.id != arrow));
    assert_eq!(room.stats().projectiles_removed, 1);
}

#[test]
fn sword_on_an_electrocuting_biri_hurts_the_player_instead() {
    let mut room = open_room(TileMap::open(16, 16, TILE), 9);
    room.place_player(Vec2::new(220.0, 220.0));
    let biri = spawn(&mut room, "biri", Vec2::new(40.0, 40.0));
    let health = room.monster(biri).expect("biri").health().current();

    let mut steps = 0;
    while room.monster(biri).and_then(|biri| biri.phase()) != Some(Phase::Electrocuting) {
        room.step();
        steps += 1;
        assert!(steps < 400, "biri never started electrocuting");
    }

    room.strike(biri, InteractionType::Sword, WeaponLevel::L2)
        .expect("biri is alive");

    let expected = room.world().config().electrocute_damage;
    assert_eq!(room.player().expect("player").damage_taken, expected);
    assert_eq!(room.monster(biri).expect("biri").health().current(), health);
}

#[test]
fn sword_on_a_moving_biri_damages_it() {
    let mut room = open_room(TileMap::open(16, 16, TILE), 9);
    room.place_player(Vec2::new(220.0, 220.0));
    let biri = spawn(&mut room, "biri", Vec2::new(40.0, 40.0));
    assert_eq!(room.monster(biri).and_then(|biri| biri.phase()), Some(Phase::Moving));

    room.strike(biri, InteractionType::Sword, WeaponLevel::L2)
        .expect("biri is alive");

    assert_eq!(room.monster(biri).expect("biri").health().current(), 1);
    assert_eq!(room.player().expect("player").damage_taken, 0);
}

#[test]
fn strike_rejects_non_weapon_interactions() {
    let mut room = open_room(TileMap::open(8, 8, TILE), 1);
    let keese = spawn(&mut room, "keese", Vec2::new(40.0, 40.0));
    let error = room
        .strike(keese, InteractionType::Arrow, WeaponLevel::L1)
        .expect_err("arrows are not swung");
    assert!(matches!(error, RuntimeError::NotAWeapon { .. }));

    let error = room
        .strike(EntityId(999), InteractionType::Sword, WeaponLevel::L1)
        .expect_err("no such monster");
    assert!(matches!(error, RuntimeError::UnknownMonster { .. }));
}

#[test]
fn walkers_that_end_up_in_water_drown() {
    let mut tiles = TileMap::open(8, 8, TILE);
    let pond = TileLocation::new(3, 3);
    tiles.set(pond, TileFlags::WATER);
    let mut room = open_room(tiles, 2);
    let octorok = spawn(&mut room, "octorok", pond.center(TILE));
    let zora = spawn(&mut room, "river_zora", pond.center(TILE));

    room.step();

    assert!(room.monster(octorok).is_none());
    assert!(room.monster(zora).is_some());
    assert_eq!(room.stats().monsters_killed, 1);
}

#[test]
fn soft_killed_monsters_respawn_at_home() {
    let mut room = open_room(TileMap::open(8, 8, TILE), 4).with_respawn_delay(Some(5));
    let home = Vec2::new(56.0, 56.0);
    let keese = spawn(&mut room, "keese", home);

    room.hit(keese, InteractionType::MineCart).expect("keese is alive");
    room.step();
    assert!(room.monster(keese).is_none());
    assert_eq!(room.stats().monsters_soft_killed, 1);

    for _ in 0..6 {
        room.step();
    }
    assert_eq!(room.stats().monsters_respawned, 1);
    let respawned = room.monsters().next().expect("keese is back");
    assert_eq!(respawned.name(), "keese");
    assert_ne!(respawned.id(), keese);
}

#[test]
fn hit_refuses_weapon_interactions() {
    let mut room = open_room(TileMap::open(8, 8, TILE), 4);
    let keese = spawn(&mut room, "keese", Vec2::new(56.0, 56.0));
    let error = room
        .hit(keese, InteractionType::Sword)
        .expect_err("swords need a weapon payload");
    assert!(matches!(error, RuntimeError::PayloadRequired { .. }));
}

#[test]
fn monsters_never_walk_through_walls() {
    let mut tiles = TileMap::open(6, 6, TILE);
    for i in 0..6 {
        tiles.set(TileLocation::new(i, 0), TileFlags::SOLID);
        tiles.set(TileLocation::new(i, 5), TileFlags::SOLID);
        tiles.set(TileLocation::new(0, i), TileFlags::SOLID);
        tiles.set(TileLocation::new(5, i), TileFlags::SOLID);
    }
    let mut room = open_room(tiles, 77);
    let octorok = spawn(&mut room, "octorok", Vec2::new(48.0, 48.0));

    for _ in 0..600 {
        room.step();
        let Some(monster) = room.monster(octorok) else {
            break;
        };
        let hard = monster.hitbox(BoxKind::Hard);
        assert!(hard.min.x >= TILE && hard.max.x <= 5.0 * TILE);
        assert!(hard.min.y >= TILE && hard.max.y <= 5.0 * TILE);
    }
}
