//! Target search, acquisition and aiming.

use bevy::prelude::*;

use super::components::{TargetLock, Targeting, Weapon, WeaponStats};
use crate::common::geometry::{facing, turn_toward};
use crate::plugins::hostiles::{Hostile, HostileScan};

/// Tick every auto-targeting weapon's search timer; an expiry requests acquisition.
pub fn tick_target_search(time: Res<Time>, mut q: Query<(&WeaponStats, &mut Targeting), With<Weapon>>) {
    let dt = time.delta_secs();

    for (stats, mut targeting) in &mut q {
        if !stats.auto_target {
            continue;
        }
        if targeting.search.tick(dt) {
            targeting.lock = TargetLock::Acquiring;
        }
    }
}

/// Lock onto the hostile nearest the owner, within attack range.
pub fn acquire_targets(
    scan: HostileScan,
    q_owner: Query<&Transform, Without<Weapon>>,
    mut q: Query<(Entity, &Weapon, &WeaponStats, &mut Targeting)>,
) {
    for (entity, weapon, stats, mut targeting) in &mut q {
        if targeting.lock != TargetLock::Acquiring {
            continue;
        }

        let Ok(owner_tf) = q_owner.get(weapon.owner()) else {
            targeting.lock = TargetLock::Idle;
            continue;
        };

        let center = owner_tf.translation.truncate();
        targeting.lock = match scan.nearest(center, stats.attack_range) {
            Some((target, _)) => {
                trace!("weapon {entity:?} locked {target:?}");
                TargetLock::Locked(target)
            }
            None => TargetLock::Idle,
        };
    }
}

/// Turn toward a resolvable lock, or spin idly.
pub fn aim_weapons(
    time: Res<Time>,
    scan: HostileScan,
    mut q: Query<(&WeaponStats, &Targeting, &mut Transform), (With<Weapon>, Without<Hostile>)>,
) {
    let dt = time.delta_secs();

    for (stats, targeting, mut tf) in &mut q {
        let desired = targeting
            .target()
            .filter(|_| stats.auto_target)
            .and_then(|target| scan.position_of(target))
            .and_then(|pos| facing(pos - tf.translation.truncate()));

        match desired {
            Some(rotation) => {
                tf.rotation = turn_toward(tf.rotation, rotation, stats.turn_speed, dt);
            }
            None if stats.idle_rotation => {
                tf.rotate_z(stats.idle_rotation_speed.to_radians() * dt);
            }
            None => {}
        }
    }
}
