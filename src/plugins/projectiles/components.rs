use bevy::prelude::*;

/// An in-flight shot.
///
/// `target` is a plain handle resolved every tick; `damage` is captured at spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub target: Entity,
    pub damage: f32,
    pub speed: f32,
    pub homing: bool,
    pub source: Entity,
}
