//! Feature plugins.
//!
//! Per-tick combat order in `Update`, gated on `GameState::InGame`:
//!
//! ```text
//! Formation → Targeting → Attack → Projectiles → Damage → Effects
//! ```
//!
//! Dead hostiles are despawned in `PostUpdate`, after the whole chain.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod effects;
pub mod formation;
pub mod hostiles;
pub mod physics;
pub mod pickups;
pub mod player;
pub mod projectiles;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Weapon add/remove, slot poses, hostile movement, pickups.
    Formation,
    Targeting,
    Attack,
    Projectiles,
    Damage,
    Effects,
}

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    app.configure_sets(
        Update,
        (
            CombatSet::Formation,
            CombatSet::Targeting,
            CombatSet::Attack,
            CombatSet::Projectiles,
            CombatSet::Damage,
            CombatSet::Effects,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    hostiles::plugin(app);
    formation::plugin(app);
    weapons::plugin(app);
    effects::plugin(app);
    pickups::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}

