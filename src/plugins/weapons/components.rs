use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::config::WeaponArchetype;
use crate::common::state::GameState;
use crate::common::timers::Countdown;

/// A weapon bound to its owner for life.
#[derive(Component, Debug, Clone, Copy)]
pub struct Weapon {
    owner: Entity,
}

impl Weapon {
    pub fn new(owner: Entity) -> Self {
        Self { owner }
    }

    #[inline]
    pub fn owner(&self) -> Entity {
        self.owner
    }
}

/// The resolved archetype this weapon was built from.
#[derive(Component, Debug, Clone, Deref)]
pub struct WeaponStats(pub WeaponArchetype);

/// Target lock state.
///
/// `Locked` holds a plain handle: it never keeps the hostile alive and is re-resolved on
/// every use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetLock {
    #[default]
    Idle,
    /// Search timer fired; the next acquisition pass picks a target.
    Acquiring,
    Locked(Entity),
}

#[derive(Component, Debug, Clone)]
pub struct Targeting {
    pub lock: TargetLock,
    pub search: Countdown,
}

impl Targeting {
    pub fn new(archetype: &WeaponArchetype) -> Self {
        Self {
            lock: TargetLock::Idle,
            search: Countdown::with_delay(archetype.targeting_interval, archetype.first_search_delay),
        }
    }

    #[inline]
    pub fn target(&self) -> Option<Entity> {
        match self.lock {
            TargetLock::Locked(e) => Some(e),
            _ => None,
        }
    }
}

/// Seconds until the next attack.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct AttackClock(pub Countdown);

impl AttackClock {
    pub fn new(archetype: &WeaponArchetype) -> Self {
        Self(Countdown::with_delay(
            archetype.attack_period(),
            archetype.first_attack_delay,
        ))
    }
}

fn weapon_color(archetype: &WeaponArchetype) -> Color {
    match archetype.projectile {
        Some(p) if p.homing() => Color::srgb(0.55, 0.95, 0.45),
        Some(_) => Color::srgb(0.95, 0.75, 0.3),
        None => Color::srgb(0.45, 0.7, 1.0),
    }
}

/// Everything a live weapon entity carries.
pub fn weapon_bundle(owner: Entity, archetype: WeaponArchetype, transform: Transform) -> impl Bundle {
    (
        Name::new(format!("Weapon:{}", archetype.name)),
        Weapon::new(owner),
        Targeting::new(&archetype),
        AttackClock::new(&archetype),
        Sprite {
            color: weapon_color(&archetype),
            custom_size: Some(Vec2::new(16.0, 6.0)),
            ..default()
        },
        WeaponStats(archetype),
        transform,
        DespawnOnExit(GameState::InGame),
    )
}
