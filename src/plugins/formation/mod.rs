//! Formation plugin: weapon add/remove lifecycle and per-tick slot assignment.
//!
//! ```text
//! Formation set (chained):
//!   attach_weapons          AddWeapon    -> capacity check -> spawn weapon entity
//!   detach_weapons          RemoveWeapon -> drop from list -> despawn weapon entity
//!   despawn_orphan_weapons  owner lost its formation -> despawn
//!   update_formations       prune vanished weapons, advance orbit, write poses
//! ```
//!
//! Weapons are top-level entities; the formation writes their world translation every tick.
//! Orbit placement never touches a weapon's rotation, so targeting keeps full control of facing.

use bevy::prelude::*;

use crate::common::config::WeaponArchetype;
use crate::plugins::hostiles::CombatStats;
use crate::plugins::weapons::{Weapon, weapon_bundle};
use crate::plugins::CombatSet;

pub mod layout;

pub use layout::{FormationError, FormationLayout, Slot, SlotPose, WeaponFormation};

const WEAPON_Z: f32 = 2.0;

/// Ask `player`'s formation to build and attach a weapon.
#[derive(Message, Clone, Debug)]
pub struct AddWeapon {
    pub player: Entity,
    pub archetype: WeaponArchetype,
}

/// Detach and destroy `weapon`. Ignored when it is not in `player`'s formation.
#[derive(Message, Clone, Copy, Debug)]
pub struct RemoveWeapon {
    pub player: Entity,
    pub weapon: Entity,
}

pub fn plugin(app: &mut App) {
    app.add_message::<AddWeapon>().add_message::<RemoveWeapon>();

    app.add_systems(
        Update,
        (
            attach_weapons,
            detach_weapons,
            despawn_orphan_weapons,
            update_formations,
        )
            .chain()
            .in_set(CombatSet::Formation),
    );
}

fn weapon_transform(pose: SlotPose) -> Transform {
    Transform::from_translation(pose.translation.extend(WEAPON_Z))
        .with_rotation(pose.rotation.unwrap_or_default())
}

pub fn attach_weapons(
    mut commands: Commands,
    mut requests: MessageReader<AddWeapon>,
    mut combat: ResMut<CombatStats>,
    mut q: Query<(&Transform, &mut WeaponFormation), Without<Weapon>>,
) {
    for req in requests.read() {
        let Ok((player_tf, mut formation)) = q.get_mut(req.player) else {
            warn!("AddWeapon for {:?}: no formation", req.player);
            continue;
        };

        if let Err(err) = req.archetype.validate() {
            warn!("`{}` not added to {:?}: {err}", req.archetype.name, req.player);
            combat.weapons_rejected += 1;
            continue;
        }

        if let Err(err) = formation.ensure_capacity() {
            warn!("`{}` not added to {:?}: {err}", req.archetype.name, req.player);
            combat.weapons_rejected += 1;
            continue;
        }

        let weapon = commands.spawn_empty().id();
        let index = formation
            .attach(weapon)
            .expect("capacity was checked before spawning");
        let pose = formation.pose(index, player_tf.translation.truncate());

        commands
            .entity(weapon)
            .insert(weapon_bundle(req.player, req.archetype.clone(), weapon_transform(pose)));

        info!(
            "`{}` attached to {:?} ({}/{})",
            req.archetype.name,
            req.player,
            formation.len(),
            formation.capacity()
        );
    }
}

pub fn detach_weapons(
    mut commands: Commands,
    mut requests: MessageReader<RemoveWeapon>,
    mut q: Query<&mut WeaponFormation>,
) {
    for req in requests.read() {
        let Ok(mut formation) = q.get_mut(req.player) else {
            continue;
        };
        if formation.detach(req.weapon) {
            commands.entity(req.weapon).despawn();
            debug!("weapon {:?} removed from {:?}", req.weapon, req.player);
        } else {
            debug!("weapon {:?} is not in {:?}'s formation", req.weapon, req.player);
        }
    }
}

/// Weapons whose owner no longer carries a formation.
pub fn despawn_orphan_weapons(
    mut commands: Commands,
    q_weapons: Query<(Entity, &Weapon)>,
    q_formations: Query<(), With<WeaponFormation>>,
) {
    for (e, weapon) in &q_weapons {
        if !q_formations.contains(weapon.owner()) {
            commands.entity(e).despawn();
        }
    }
}

pub fn update_formations(
    time: Res<Time>,
    mut q_players: Query<(&Transform, &mut WeaponFormation), Without<Weapon>>,
    mut q_weapons: Query<&mut Transform, With<Weapon>>,
) {
    let dt = time.delta_secs();

    for (player_tf, mut formation) in &mut q_players {
        let dropped = formation.prune(|w| q_weapons.contains(w));
        if dropped > 0 {
            debug!("formation pruned {dropped} vanished weapon(s)");
        }

        formation.advance(dt);

        let anchor = player_tf.translation.truncate();
        for (&weapon, pose) in formation.weapons().iter().zip(formation.poses(anchor)) {
            let Ok(mut tf) = q_weapons.get_mut(weapon) else {
                continue;
            };
            tf.translation = pose.translation.extend(WEAPON_Z);
            if let Some(rotation) = pose.rotation {
                tf.rotation = rotation;
            }
        }
    }
}
