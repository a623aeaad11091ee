//! Effects plugin: short-lived attack lines for direct-damage hits.
//!
//! Fire-and-forget. Weapons write `AttackEffectRequest` and never look at the result.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::geometry::facing;
use crate::common::state::GameState;
use crate::common::timers::Lifetime;
use crate::plugins::CombatSet;

const LINE_Z: f32 = 4.0;
const LINE_WIDTH: f32 = 2.0;
const HUE_STEP: f32 = 37.0;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct AttackEffectRequest {
    pub origin: Vec2,
    pub target: Vec2,
    /// Seconds on screen.
    pub duration: f32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct AttackLine;

pub fn plugin(app: &mut App) {
    app.add_message::<AttackEffectRequest>();
    app.add_systems(
        Update,
        (spawn_attack_lines, expire_attack_lines)
            .chain()
            .in_set(CombatSet::Effects),
    );
}

/// One stretched sprite per request, spanning origin → target.
pub fn spawn_attack_lines(
    mut commands: Commands,
    mut requests: MessageReader<AttackEffectRequest>,
    mut hue: Local<f32>,
) {
    for req in requests.read() {
        let span = req.target - req.origin;
        let rotation = facing(span).unwrap_or_default();
        *hue = (*hue + HUE_STEP) % 360.0;

        commands.spawn((
            Name::new("AttackLine"),
            AttackLine,
            Lifetime::from_seconds(req.duration),
            Sprite {
                color: Color::hsl(*hue, 0.9, 0.65),
                custom_size: Some(Vec2::new(span.length().max(1.0), LINE_WIDTH)),
                ..default()
            },
            Transform::from_translation((req.origin + span * 0.5).extend(LINE_Z))
                .with_rotation(rotation),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Fade, then despawn once the lifetime is over.
pub fn expire_attack_lines(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime, &mut Sprite), With<AttackLine>>,
) {
    for (e, mut lifetime, mut sprite) in &mut q {
        lifetime.tick(time.delta());
        if lifetime.is_finished() {
            commands.entity(e).despawn();
            continue;
        }
        sprite.color.set_alpha(1.0 - lifetime.fraction());
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;
    use bevy::prelude::*;

    use super::*;
    use crate::common::test_utils::{run_system_once, step_time};

    #[test]
    fn request_spawns_a_line_spanning_origin_to_target() {
        let mut world = World::new();
        world.init_resource::<Messages<AttackEffectRequest>>();
        world.write_message(AttackEffectRequest {
            origin: Vec2::ZERO,
            target: Vec2::new(0.0, 40.0),
            duration: 0.1,
        });

        run_system_once(&mut world, spawn_attack_lines);

        let mut q = world.query_filtered::<(&Transform, &Sprite), With<AttackLine>>();
        let (tf, sprite) = q.single(&world).expect("one line");
        assert_eq!(tf.translation.truncate(), Vec2::new(0.0, 20.0));
        assert_eq!(sprite.custom_size, Some(Vec2::new(40.0, LINE_WIDTH)));
    }

    #[test]
    fn lines_expire_after_their_duration() {
        let mut world = World::new();
        let line = world
            .spawn((AttackLine, Lifetime::from_seconds(0.1), Sprite::default()))
            .id();

        step_time(&mut world, 0.05);
        run_system_once(&mut world, expire_attack_lines);
        assert!(world.get_entity(line).is_ok());

        step_time(&mut world, 0.06);
        run_system_once(&mut world, expire_attack_lines);
        assert!(world.get_entity(line).is_err());
    }
}
