//! Lighting plugin (Firefly) (render-only).
//!
//! Lights and occluders are attached to gameplay entities as they appear, so the gameplay
//! plugins stay free of render types.

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::plugins::hostiles::Hostile;
use crate::plugins::player::Player;
use crate::plugins::projectiles::Projectile;
use crate::plugins::world::HOSTILE_RADIUS;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(
        PostUpdate,
        (light_player, light_projectiles, occlude_hostiles),
    );
}

fn light_player(mut commands: Commands, q: Query<Entity, Added<Player>>) {
    for e in &q {
        commands.entity(e).with_child((
            Name::new("PlayerLight"),
            PointLight2d {
                color: Color::srgb(1.0, 0.9, 0.75),
                range: 450.0,
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 10.0),
        ));
    }
}

fn light_projectiles(mut commands: Commands, q: Query<Entity, Added<Projectile>>) {
    for e in &q {
        commands.entity(e).insert(PointLight2d {
            color: Color::srgb(0.7, 1.0, 0.6),
            range: 60.0,
            ..default()
        });
    }
}

fn occlude_hostiles(mut commands: Commands, q: Query<Entity, Added<Hostile>>) {
    for e in &q {
        commands.entity(e).insert(Occluder2d::circle(HOSTILE_RADIUS));
    }
}
