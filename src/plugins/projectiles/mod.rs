//! Projectiles plugin: **message-based producer → consumer** spawning plus homing flight.
//!
//! ```text
//!   Update, Attack set
//!     resolve_attacks ── SpawnProjectileRequest ──┐
//!                                                 v
//!   Update, Projectiles set
//!     spawn_projectiles   (single writer of projectile entities)
//!     fly_projectiles     lifetime → target lookup → step → proximity
//!                            │
//!                            └── DamageRequest ──▶ Damage set (hostiles::apply_damage)
//! ```
//!
//! A projectile holds its target as a bare `Entity`. Hostiles killed in the Damage set are only
//! marked `Dead`; the next tick's lookup fails and the projectile despawns then.

use bevy::prelude::*;

use crate::plugins::CombatSet;

pub mod components;
pub mod flight;
pub mod messages;

pub use components::Projectile;
pub use messages::SpawnProjectileRequest;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnProjectileRequest>();

        app.add_systems(
            Update,
            (flight::spawn_projectiles, flight::fly_projectiles)
                .chain()
                .in_set(CombatSet::Projectiles),
        );
    }
}
