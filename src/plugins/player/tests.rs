use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::config::{Arsenal, ArsenalSource};
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::formation::{AddWeapon, WeaponFormation};

#[test]
fn spawn_creates_player_and_requests_starting_weapons() {
    let mut world = World::new();
    let arsenal = Arsenal::from_ron(&ArsenalSource::embedded().0).unwrap();
    let starting = arsenal.starting_weapons.clone();
    world.insert_resource(arsenal);
    world.init_resource::<Messages<AddWeapon>>();

    run_system_once(&mut world, super::spawn);

    let player = world
        .query_filtered::<Entity, With<super::Player>>()
        .single(&world)
        .expect("one player");
    assert!(world.get::<WeaponFormation>(player).unwrap().is_empty());

    let requested = run_system_once(&mut world, |mut reader: MessageReader<AddWeapon>| {
        reader
            .read()
            .map(|req| (req.player, req.archetype.name.clone()))
            .collect::<Vec<_>>()
    });
    let expected: Vec<_> = starting.into_iter().map(|name| (player, name)).collect();
    assert_eq!(requested, expected);
}

#[test]
fn apply_movement_sets_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables {
        player_speed: 100.0,
        ..default()
    });
    world.insert_resource(super::PlayerInput {
        move_axis: Vec2::new(1.0, 0.0),
    });
    world.spawn((super::Player, LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
}

#[test]
fn missing_keyboard_leaves_input_untouched() {
    let mut world = World::new();
    world.insert_resource(super::PlayerInput::default());

    run_system_once(&mut world, super::gather_input);

    assert_eq!(world.resource::<super::PlayerInput>().move_axis, Vec2::ZERO);
}
