//! Physics setup and collision-layer presets.
//!
//! Top-down: no gravity. Lengths are pixels, scaled by `Tunables::pixels_per_meter`.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, tunables::Tunables};

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
}

#[inline]
pub fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Hostile])
}

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Hostile, Layer::Pickup])
}

#[inline]
pub fn hostile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Hostile, [Layer::World, Layer::Player, Layer::Hostile])
}

/// Pickups only ever report contacts with the player.
#[inline]
pub fn pickup_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Pickup, [Layer::Player])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interacts(a: CollisionLayers, b: CollisionLayers) -> bool {
        a.interacts_with(b)
    }

    #[test]
    fn pickups_only_meet_the_player() {
        assert!(interacts(pickup_layers(), player_layers()));
        assert!(!interacts(pickup_layers(), hostile_layers()));
        assert!(!interacts(pickup_layers(), world_layers()));
    }

    #[test]
    fn hostiles_crowd_each_other_and_the_player() {
        assert!(interacts(hostile_layers(), hostile_layers()));
        assert!(interacts(hostile_layers(), player_layers()));
        assert!(interacts(hostile_layers(), world_layers()));
    }
}
