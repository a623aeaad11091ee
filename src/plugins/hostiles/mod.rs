//! Hostiles plugin: health, damage intake, death and the seek-the-player movement.
//!
//! Damage is a message (`DamageRequest`), not a direct component write. Weapons and projectiles
//! only produce requests; `apply_damage` is the single writer to `Health`.
//!
//! ```text
//! Update (Attack / Projectiles sets)  -> DamageRequest messages
//! Update (Damage set)                 -> apply_damage: Health, HitFlash, Dead marker
//! Update (Effects set)                -> fade_hit_flash
//! PostUpdate                          -> despawn_dead_hostiles
//! ```
//!
//! Dead hostiles are only marked during `Update` and despawned afterwards, so anything holding a
//! handle to them (a projectile in flight) observes the loss on its own next tick.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::CombatSet;

pub mod scan;

pub use scan::HostileScan;

pub const HIT_FLASH_SECS: f32 = 0.1;
const HIT_FLASH_COLOR: Color = Color::srgb(1.0, 0.15, 0.1);

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Hostile;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract `amount`, clamping at zero. Returns the damage actually applied.
    #[inline]
    pub fn take(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);
        before - self.current
    }
}

/// Terminal marker: health reached zero. Removed from the world in `PostUpdate`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Presentation-only hit feedback.
///
/// Always present on hostiles; a hit only rewinds `remaining`.
#[derive(Component, Debug, Clone)]
pub struct HitFlash {
    remaining: f32,
    base: Color,
}

impl HitFlash {
    pub fn new(base: Color) -> Self {
        Self {
            remaining: 0.0,
            base,
        }
    }

    #[inline]
    pub fn trigger(&mut self) {
        self.remaining = HIT_FLASH_SECS;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Walk toward the player until within `stop_distance`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Seek {
    pub speed: f32,
    pub stop_distance: f32,
}

// -----------------------------------------------------------------------------
// Messages / resources
// -----------------------------------------------------------------------------

/// Damage intake contract.
///
/// A request for an entity that is gone, already dead, or not a hostile is dropped silently.
#[derive(Message, Clone, Copy, Debug)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    pub source: Entity,
}

/// Running combat counters.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct CombatStats {
    pub damage_dealt: f32,
    pub kills: u32,
    pub attacks: u32,
    pub projectiles_fired: u32,
    /// Capacity or invalid archetype.
    pub weapons_rejected: u32,
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.init_resource::<CombatStats>()
        .add_message::<DamageRequest>();

    app.add_systems(Update, seek_player.in_set(CombatSet::Formation));
    app.add_systems(Update, apply_damage.in_set(CombatSet::Damage));
    app.add_systems(Update, fade_hit_flash.in_set(CombatSet::Effects));

    app.add_systems(
        PostUpdate,
        despawn_dead_hostiles.run_if(in_state(GameState::InGame)),
    );
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

pub fn seek_player(
    q_player: Query<&Transform, (With<Player>, Without<Hostile>)>,
    mut q_hostiles: Query<(&Transform, &Seek, &mut LinearVelocity), (With<Hostile>, Without<Dead>)>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let goal = player_tf.translation.truncate();

    for (tf, seek, mut vel) in &mut q_hostiles {
        let to_goal = goal - tf.translation.truncate();
        vel.0 = if to_goal.length() > seek.stop_distance {
            to_goal.normalize_or_zero() * seek.speed
        } else {
            Vec2::ZERO
        };
    }
}

/// Consume damage requests.
pub fn apply_damage(
    mut commands: Commands,
    mut requests: MessageReader<DamageRequest>,
    mut stats: ResMut<CombatStats>,
    mut q: Query<(Option<&mut Health>, Option<&mut HitFlash>), (With<Hostile>, Without<Dead>)>,
) {
    for req in requests.read() {
        let Ok((health, flash)) = q.get_mut(req.target) else {
            debug!("damage for {:?} dropped: target gone", req.target);
            continue;
        };

        debug_assert!(health.is_some(), "hostile {:?} has no Health", req.target);
        let Some(mut health) = health else {
            continue;
        };

        // Killed earlier this tick; the Dead marker is still queued.
        if health.is_depleted() {
            continue;
        }

        let applied = health.take(req.amount);
        stats.damage_dealt += applied;

        if let Some(mut flash) = flash {
            flash.trigger();
        }

        if health.is_depleted() {
            stats.kills += 1;
            commands.entity(req.target).insert(Dead);
            debug!("hostile {:?} killed by {:?}", req.target, req.source);
        }
    }
}

pub fn fade_hit_flash(time: Res<Time>, mut q: Query<(&mut HitFlash, &mut Sprite)>) {
    let dt = time.delta_secs();

    for (mut flash, mut sprite) in &mut q {
        if !flash.is_active() {
            continue;
        }
        flash.remaining = (flash.remaining - dt).max(0.0);
        sprite.color = if flash.is_active() {
            HIT_FLASH_COLOR
        } else {
            flash.base
        };
    }
}

pub fn despawn_dead_hostiles(mut commands: Commands, q: Query<Entity, (With<Hostile>, With<Dead>)>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
