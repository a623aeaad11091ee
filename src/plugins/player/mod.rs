//! Player plugin.
//!
//! Pipeline:
//! - OnEnter(InGame): spawn the player with an empty `WeaponFormation`, request starting weapons
//! - Update: sample input, write PlayerInput resource
//! - FixedUpdate: apply velocity to kinematic rigid body
//!
//! Input is optional: headless apps have no `ButtonInput`, and the player then stands still.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::config::Arsenal;
use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::formation::{AddWeapon, WeaponFormation};
use crate::plugins::physics;

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(FixedUpdate, apply_movement.run_if(in_state(GameState::InGame)));
}

fn spawn(mut commands: Commands, arsenal: Res<Arsenal>, mut add: MessageWriter<AddWeapon>) {
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            WeaponFormation::from_config(&arsenal.formation),
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::splat(26.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0),
            RigidBody::Kinematic,
            Collider::circle(13.0),
            physics::player_layers(),
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    for name in &arsenal.starting_weapons {
        // Names were checked when the arsenal was validated.
        let Some(archetype) = arsenal.weapon(name) else {
            continue;
        };
        add.write(AddWeapon {
            player,
            archetype: archetype.clone(),
        });
    }
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.player_speed;
}

#[cfg(test)]
mod tests;
