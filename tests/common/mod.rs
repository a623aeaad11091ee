//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `orbit_arsenal::game::configure_headless` to install gameplay plugins.
//! - every `app.update()` advances exactly `FRAME`, so runs are repeatable.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use orbit_arsenal::common::config::ArsenalSource;
use orbit_arsenal::common::state::GameState;

pub const FRAME: Duration = Duration::from_millis(100);

pub fn app_headless() -> App {
    build(None)
}

/// Headless app that loads `ron` instead of the embedded arsenal.
pub fn app_headless_with_arsenal(ron: &str) -> App {
    build(Some(ArsenalSource(ron.to_owned())))
}

fn build(source: Option<ArsenalSource>) -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    if let Some(source) = source {
        app.insert_resource(source);
    }

    orbit_arsenal::game::configure_headless(&mut app);
    // `App::run` would do this; tests drive `update()` by hand, so finish
    // plugin setup here (avian registers its diagnostics resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Update until the arsenal is loaded and the game is running.
pub fn enter_game(app: &mut App) {
    for _ in 0..5 {
        app.update();
        if state(app) == GameState::InGame {
            // One more frame so OnEnter spawns are applied and Update has run.
            app.update();
            return;
        }
    }
    panic!("never reached InGame, stuck in {:?}", state(app));
}
