//! Attack timer and attack resolution.
//!
//! One attack at most per weapon per tick. The victim is either the resolvable lock, or the
//! nearest in-range hostile found by an immediate scan around the owner. A lock whose hostile
//! disappeared skips this cycle's attack; the clock has already re-armed.

use bevy::prelude::*;

use super::components::{AttackClock, TargetLock, Targeting, Weapon, WeaponStats};
use crate::common::geometry::facing;
use crate::common::tunables::Tunables;
use crate::plugins::effects::AttackEffectRequest;
use crate::plugins::hostiles::{CombatStats, DamageRequest, Hostile, HostileScan};
use crate::plugins::projectiles::SpawnProjectileRequest;

pub fn resolve_attacks(
    time: Res<Time>,
    tunables: Res<Tunables>,
    scan: HostileScan,
    mut combat: ResMut<CombatStats>,
    mut damage: MessageWriter<DamageRequest>,
    mut effects: MessageWriter<AttackEffectRequest>,
    mut projectiles: MessageWriter<SpawnProjectileRequest>,
    q_owner: Query<&Transform, (Without<Weapon>, Without<Hostile>)>,
    mut q: Query<
        (Entity, &Weapon, &WeaponStats, &mut Targeting, &mut AttackClock, &mut Transform),
        Without<Hostile>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, weapon, stats, mut targeting, mut clock, mut tf) in &mut q {
        if !clock.tick(dt) {
            continue;
        }

        let origin = tf.translation.truncate();

        let (target, target_pos) = match targeting.lock {
            TargetLock::Locked(target) if stats.auto_target => match scan.position_of(target) {
                Some(pos) => (target, pos),
                None => {
                    trace!("weapon {entity:?}: lock {target:?} went stale, attack skipped");
                    targeting.lock = TargetLock::Idle;
                    continue;
                }
            },
            _ => {
                let Ok(owner_tf) = q_owner.get(weapon.owner()) else {
                    continue;
                };
                let center = owner_tf.translation.truncate();
                let Some(&(target, pos)) = scan.ranked(center, stats.attack_range).first() else {
                    continue;
                };

                if let Some(rotation) = facing(pos - origin) {
                    tf.rotation = rotation;
                }
                if stats.auto_target {
                    targeting.lock = TargetLock::Locked(target);
                }
                (target, pos)
            }
        };

        combat.attacks += 1;

        match stats.projectile {
            Some(archetype) => {
                projectiles.write(SpawnProjectileRequest {
                    origin,
                    rotation: tf.rotation,
                    target,
                    damage: stats.damage,
                    archetype,
                    source: entity,
                });
            }
            None => {
                damage.write(DamageRequest {
                    target,
                    amount: stats.damage,
                    source: entity,
                });
                effects.write(AttackEffectRequest {
                    origin,
                    target: target_pos,
                    duration: tunables.attack_effect_duration,
                });
            }
        }
    }
}
