//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()` after running
//! so queued commands are applied before assertions.
//!
//! Gameplay systems read `Res<Time>`. `step_time` advances that clock so the next system run
//! sees exactly `dt` seconds of frame time.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Advance (or create) the default `Time` clock by `dt` seconds.
pub fn step_time(world: &mut World, dt: f32) {
    if world.get_resource::<Time>().is_none() {
        world.insert_resource(Time::<()>::default());
    }
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
}
