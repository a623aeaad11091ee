//! World plugin: arena walls, configured pickups and hostile waves.
//!
//! Waves spawn on a ring around the player. A new wave is queued once the field is clear and
//! arrives `wave_delay` seconds later.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::config::{Arsenal, EncounterConfig};
use crate::common::geometry::orbit_offset;
use crate::common::state::GameState;
use crate::plugins::hostiles::{Dead, Health, HitFlash, Hostile, Seek};
use crate::plugins::physics;
use crate::plugins::pickups::pickup_bundle;
use crate::plugins::player::Player;

const HALF_W: f32 = 1024.0;
const HALF_H: f32 = 576.0;
const WALL: f32 = 30.0;
pub const HOSTILE_RADIUS: f32 = 14.0;
const HOSTILE_COLOR: Color = Color::srgb(0.9, 0.25, 0.25);
/// Each wave's ring is rotated a little so hostiles do not spawn on the same spots.
const WAVE_TWIST_DEG: f32 = 17.0;

#[derive(Resource, Debug, Default)]
pub struct Encounter {
    pub wave: u32,
    /// Seconds until the next wave; only runs down while the field is clear.
    pub next_wave_in: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_arena, spawn_pickups, start_encounter),
    );
    app.add_systems(Update, run_waves.run_if(in_state(GameState::InGame)));
}

fn spawn_arena(mut commands: Commands) {
    let walls = [
        ("WallTop", Vec2::new(0.0, HALF_H + WALL * 0.5), Vec2::new(HALF_W * 2.0 + WALL * 2.0, WALL)),
        ("WallBottom", Vec2::new(0.0, -HALF_H - WALL * 0.5), Vec2::new(HALF_W * 2.0 + WALL * 2.0, WALL)),
        ("WallLeft", Vec2::new(-HALF_W - WALL * 0.5, 0.0), Vec2::new(WALL, HALF_H * 2.0)),
        ("WallRight", Vec2::new(HALF_W + WALL * 0.5, 0.0), Vec2::new(WALL, HALF_H * 2.0)),
    ];

    for (name, pos, size) in walls {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: Color::srgb(0.25, 0.27, 0.33),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            physics::world_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn spawn_pickups(mut commands: Commands, arsenal: Res<Arsenal>) {
    for pickup in &arsenal.pickups {
        let Some(archetype) = arsenal.weapon(&pickup.weapon) else {
            continue;
        };
        let position = Vec2::new(pickup.position.0, pickup.position.1);
        commands.spawn(pickup_bundle(archetype.clone(), position));
    }
}

fn start_encounter(mut commands: Commands) {
    commands.insert_resource(Encounter::default());
}

/// Spawn positions for one wave around `center`, kept inside the arena.
pub fn wave_positions(center: Vec2, config: &EncounterConfig, wave: u32) -> Vec<Vec2> {
    let n = config.wave_size.max(1);
    let twist = wave as f32 * WAVE_TWIST_DEG;
    let margin = Vec2::splat(HOSTILE_RADIUS * 2.0);
    let bound = Vec2::new(HALF_W, HALF_H) - margin;

    (0..config.wave_size)
        .map(|i| {
            let angle = twist + i as f32 * 360.0 / n as f32;
            (center + orbit_offset(angle, config.ring_radius)).clamp(-bound, bound)
        })
        .collect()
}

fn hostile_bundle(config: &EncounterConfig, position: Vec2, index: usize) -> impl Bundle {
    (
        Name::new(format!("Hostile{index}")),
        Hostile,
        Health::new(config.hostile_health),
        HitFlash::new(HOSTILE_COLOR),
        Seek {
            speed: config.hostile_speed,
            stop_distance: config.stop_distance,
        },
        Sprite {
            color: HOSTILE_COLOR,
            custom_size: Some(Vec2::splat(HOSTILE_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(position.extend(1.0)),
        RigidBody::Dynamic,
        Collider::circle(HOSTILE_RADIUS),
        LockedAxes::ROTATION_LOCKED,
        physics::hostile_layers(),
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    )
}

pub fn run_waves(
    mut commands: Commands,
    time: Res<Time>,
    arsenal: Res<Arsenal>,
    mut encounter: ResMut<Encounter>,
    q_player: Query<&Transform, With<Player>>,
    q_live: Query<(), (With<Hostile>, Without<Dead>)>,
) {
    let config = &arsenal.encounter;

    if !q_live.is_empty() {
        encounter.next_wave_in = config.wave_delay;
        return;
    }

    encounter.next_wave_in -= time.delta_secs();
    if encounter.next_wave_in > 0.0 {
        return;
    }

    let Ok(player_tf) = q_player.single() else {
        return;
    };

    let positions = wave_positions(player_tf.translation.truncate(), config, encounter.wave);
    for (i, position) in positions.into_iter().enumerate() {
        commands.spawn(hostile_bundle(config, position, i));
    }

    encounter.wave += 1;
    encounter.next_wave_in = config.wave_delay;
    info!("wave {}: {} hostiles", encounter.wave, config.wave_size);
}

#[cfg(test)]
mod tests;
