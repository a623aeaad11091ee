//! Pickups plugin: floating weapon crates that feed the player's formation.
//!
//! Collision detection is avian's: pickups are sensors with `CollisionEventsEnabled`, and
//! `collect_pickups` reads `CollisionStart` messages. A touched pickup is always consumed, even
//! when the formation turns the weapon away for capacity.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::config::WeaponArchetype;
use crate::common::state::GameState;
use crate::plugins::formation::{AddWeapon, WeaponFormation, attach_weapons};
use crate::plugins::physics;
use crate::plugins::CombatSet;

const PICKUP_SIZE: f32 = 18.0;
const SPIN_DEG_PER_SEC: f32 = 90.0;
const BOB_AMPLITUDE: f32 = 4.0;
/// Radians per second.
const BOB_SPEED: f32 = 2.0;

#[derive(Component, Debug, Clone)]
pub struct WeaponPickup {
    pub archetype: WeaponArchetype,
}

/// Spin plus a vertical bob around `anchor`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PickupMotion {
    pub anchor: Vec2,
    pub phase: f32,
}

impl PickupMotion {
    pub fn at(anchor: Vec2) -> Self {
        Self { anchor, phase: 0.0 }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(0.0, (self.phase * BOB_SPEED).sin() * BOB_AMPLITUDE)
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (animate_pickups, collect_pickups)
            .in_set(CombatSet::Formation)
            .before(attach_weapons),
    );
}

pub fn pickup_bundle(archetype: WeaponArchetype, position: Vec2) -> impl Bundle {
    (
        Name::new(format!("Pickup:{}", archetype.name)),
        WeaponPickup { archetype },
        PickupMotion::at(position),
        Sprite {
            color: Color::srgb(0.95, 0.9, 0.35),
            custom_size: Some(Vec2::splat(PICKUP_SIZE)),
            ..default()
        },
        Transform::from_translation(position.extend(1.5)),
        RigidBody::Dynamic,
        Collider::rectangle(PICKUP_SIZE, PICKUP_SIZE),
        Sensor,
        CollisionEventsEnabled,
        physics::pickup_layers(),
        DespawnOnExit(GameState::InGame),
    )
}

pub fn animate_pickups(time: Res<Time>, mut q: Query<(&mut PickupMotion, &mut Transform), With<WeaponPickup>>) {
    let dt = time.delta_secs();

    for (mut motion, mut tf) in &mut q {
        motion.phase += dt;
        let pos = motion.anchor + motion.offset();
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        tf.rotate_z(SPIN_DEG_PER_SEC.to_radians() * dt);
    }
}

pub fn collect_pickups(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut add: MessageWriter<AddWeapon>,
    q_pickups: Query<&WeaponPickup>,
    q_collectors: Query<(), With<WeaponFormation>>,
    // Per-frame dedupe
    mut consumed: Local<HashSet<Entity>>,
) {
    consumed.clear();

    for ev in started.read() {
        let sides = [
            (ev.collider1, ev.body2.unwrap_or(ev.collider2)),
            (ev.collider2, ev.body1.unwrap_or(ev.collider1)),
        ];

        for (pickup, other) in sides {
            let Ok(item) = q_pickups.get(pickup) else {
                continue;
            };
            if !q_collectors.contains(other) || !consumed.insert(pickup) {
                continue;
            }

            add.write(AddWeapon {
                player: other,
                archetype: item.archetype.clone(),
            });
            commands.entity(pickup).despawn();
            info!("picked up `{}`", item.archetype.name);
        }
    }
}
