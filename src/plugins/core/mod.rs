//! Core plugin: shared resources, global settings and arsenal loading.
//!
//! The arsenal text comes from the `ArsenalSource` resource. Apps and tests may insert their
//! own before startup; otherwise the embedded `config/arsenal.ron` is used.

use bevy::prelude::*;

use crate::common::config::{Arsenal, ArsenalSource};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    if !app.world().contains_resource::<ArsenalSource>() {
        app.insert_resource(ArsenalSource::embedded());
    }

    app.add_systems(OnEnter(GameState::Loading), load_arsenal);
}

/// Parse and validate the arsenal; park in `ConfigRejected` on failure.
fn load_arsenal(
    mut commands: Commands,
    source: Res<ArsenalSource>,
    mut next: ResMut<NextState<GameState>>,
) {
    match Arsenal::from_ron(&source.0) {
        Ok(arsenal) => {
            info!(
                "arsenal loaded: {} weapon archetypes",
                arsenal.weapon_names().count()
            );
            commands.insert_resource(arsenal);
            next.set(GameState::InGame);
        }
        Err(err) => {
            error!("arsenal rejected: {err}");
            next.set(GameState::ConfigRejected);
        }
    }
}
