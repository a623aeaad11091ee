//! Spawn consumer and per-tick flight.
//!
//! Per projectile, each tick, in this order:
//! 1. lifetime: expiry despawns without damage
//! 2. target: an unresolvable handle despawns
//! 3. motion: `step_projectile`
//! 4. proximity: within the hit radius of the target applies damage and despawns

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::Projectile;
use super::messages::SpawnProjectileRequest;
use crate::common::geometry::{facing, forward, segment_distance};
use crate::common::state::GameState;
use crate::common::timers::Lifetime;
use crate::common::tunables::Tunables;
use crate::plugins::hostiles::{CombatStats, DamageRequest, Hostile, HostileScan};

const PROJECTILE_Z: f32 = 3.0;

pub fn spawn_projectiles(
    mut commands: Commands,
    mut requests: MessageReader<SpawnProjectileRequest>,
    mut combat: ResMut<CombatStats>,
) {
    for req in requests.read() {
        let archetype = req.archetype;
        let color = if archetype.homing() {
            Color::srgb(0.6, 1.0, 0.5)
        } else {
            Color::srgb(1.0, 0.85, 0.3)
        };

        commands.spawn((
            Name::new("Projectile"),
            Projectile {
                target: req.target,
                damage: req.damage,
                speed: archetype.speed(),
                homing: archetype.homing(),
                source: req.source,
            },
            Lifetime::from_seconds(archetype.lifetime()),
            Sprite {
                color,
                custom_size: Some(Vec2::new(10.0, 4.0)),
                ..default()
            },
            Transform::from_translation(req.origin.extend(PROJECTILE_Z)).with_rotation(req.rotation),
            DespawnOnExit(GameState::InGame),
        ));
        combat.projectiles_fired += 1;
    }
}

/// Advance one projectile by `dt`. Returns the new position and heading.
///
/// Homing blends the heading toward the target bearing by `turn_rate * dt` (clamped to 1), so
/// the path curves. Without homing the heading snaps to the bearing.
pub fn step_projectile(
    position: Vec2,
    heading: Vec2,
    target: Vec2,
    speed: f32,
    homing: bool,
    turn_rate: f32,
    dt: f32,
) -> (Vec2, Vec2) {
    let Some(bearing) = (target - position).try_normalize() else {
        return (position, heading);
    };

    let heading = if homing {
        heading
            .lerp(bearing, (turn_rate * dt).clamp(0.0, 1.0))
            .try_normalize()
            .unwrap_or(bearing)
    } else {
        bearing
    };

    (position + heading * speed * dt, heading)
}

pub fn fly_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    scan: HostileScan,
    mut damage: MessageWriter<DamageRequest>,
    mut q: Query<(Entity, &Projectile, &mut Lifetime, &mut Transform), Without<Hostile>>,
) {
    let dt = time.delta_secs();

    for (e, projectile, mut lifetime, mut tf) in &mut q {
        lifetime.tick(time.delta());
        if lifetime.is_finished() {
            commands.entity(e).despawn();
            continue;
        }

        let Some(target_pos) = scan.position_of(projectile.target) else {
            trace!("projectile {e:?} lost target {:?}", projectile.target);
            commands.entity(e).despawn();
            continue;
        };

        let from = tf.translation.truncate();
        let (to, heading) = step_projectile(
            from,
            forward(tf.rotation),
            target_pos,
            projectile.speed,
            projectile.homing,
            tunables.homing_turn_rate,
            dt,
        );

        tf.translation = to.extend(tf.translation.z);
        if let Some(rotation) = facing(heading) {
            tf.rotation = rotation;
        }

        // Swept along this tick's step so fast shots cannot tunnel past the target.
        if segment_distance(from, to, target_pos) < tunables.projectile_hit_radius {
            damage.write(DamageRequest {
                target: projectile.target,
                amount: projectile.damage,
                source: projectile.source,
            });
            commands.entity(e).despawn();
        }
    }
}
