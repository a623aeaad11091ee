use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::config::ArsenalSource;
use crate::common::test_utils::{run_system_once, step_time};

fn encounter_world() -> World {
    let mut world = World::new();
    world.insert_resource(Arsenal::from_ron(&ArsenalSource::embedded().0).unwrap());
    world.insert_resource(Encounter::default());
    world.spawn((Player, Transform::default()));
    world
}

fn live_hostiles(world: &mut World) -> usize {
    world
        .query_filtered::<(), (With<Hostile>, Without<Dead>)>()
        .iter(world)
        .count()
}

#[test]
fn spawns_walls_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_arena);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn configured_pickups_are_placed() {
    let mut world = encounter_world();
    run_system_once(&mut world, spawn_pickups);

    let expected = world.resource::<Arsenal>().pickups.len();
    let placed = world
        .query::<&crate::plugins::pickups::WeaponPickup>()
        .iter(&world)
        .count();
    assert_eq!(placed, expected);
}

#[test]
fn first_wave_arrives_immediately_and_the_next_waits_for_a_clear_field() {
    let mut world = encounter_world();
    let wave_size = world.resource::<Arsenal>().encounter.wave_size;
    let delay = world.resource::<Arsenal>().encounter.wave_delay;

    step_time(&mut world, 0.1);
    run_system_once(&mut world, run_waves);
    assert_eq!(live_hostiles(&mut world), wave_size);
    assert_eq!(world.resource::<Encounter>().wave, 1);

    // Field still occupied: nothing new.
    step_time(&mut world, delay * 2.0);
    run_system_once(&mut world, run_waves);
    assert_eq!(live_hostiles(&mut world), wave_size);

    // Clear the field, then wait out the delay.
    let hostiles: Vec<Entity> = world
        .query_filtered::<Entity, With<Hostile>>()
        .iter(&world)
        .collect();
    for e in hostiles {
        world.despawn(e);
    }
    step_time(&mut world, delay * 0.5);
    run_system_once(&mut world, run_waves);
    assert_eq!(live_hostiles(&mut world), 0);

    step_time(&mut world, delay * 0.6);
    run_system_once(&mut world, run_waves);
    assert_eq!(live_hostiles(&mut world), wave_size);
    assert_eq!(world.resource::<Encounter>().wave, 2);
}

#[test]
fn wave_ring_surrounds_the_player_inside_the_arena() {
    let config = EncounterConfig::default();
    let positions = wave_positions(Vec2::ZERO, &config, 0);
    assert_eq!(positions.len(), config.wave_size);
    for p in &positions {
        assert!((p.length() - config.ring_radius).abs() < 1e-3);
    }

    let cornered = wave_positions(Vec2::new(HALF_W, HALF_H), &config, 0);
    for p in &cornered {
        assert!(p.x.abs() < HALF_W && p.y.abs() < HALF_H);
    }
}
