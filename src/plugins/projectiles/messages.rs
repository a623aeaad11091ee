//! Buffered spawn requests.
//!
//! Weapons only describe the shot; `spawn_projectiles` is the single place projectile entities
//! are created. Producer → queue → consumer.

use bevy::prelude::*;

use crate::common::config::ProjectileArchetype;

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnProjectileRequest {
    pub origin: Vec2,
    /// Initial facing; a homing shot bends away from it toward the target.
    pub rotation: Quat,
    pub target: Entity,
    pub damage: f32,
    pub archetype: ProjectileArchetype,
    pub source: Entity,
}
