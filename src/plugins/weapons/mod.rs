//! Weapons plugin: per-weapon targeting state machine and rate-limited attacks.
//!
//! ```text
//! Targeting set:  tick_target_search -> acquire_targets -> aim_weapons
//! Attack set:     resolve_attacks
//!                   ├─ projectile archetype -> SpawnProjectileRequest
//!                   └─ direct               -> DamageRequest + AttackEffectRequest
//! ```
//!
//! Lock states:
//! ```text
//!  Idle ──search timer──▶ Acquiring ──hostile in range──▶ Locked(e)
//!   ▲                         │                              │
//!   └────────none in range────┘◀──── stale at attack time ───┘
//! ```
//! A lock is only re-evaluated when the search timer fires again, so a weapon can keep a
//! target that has since walked out of range until its next search.

use bevy::prelude::*;

use crate::plugins::CombatSet;

pub mod attack;
pub mod components;
pub mod targeting;

pub use components::{AttackClock, TargetLock, Targeting, Weapon, WeaponStats, weapon_bundle};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            targeting::tick_target_search,
            targeting::acquire_targets,
            targeting::aim_weapons,
        )
            .chain()
            .in_set(CombatSet::Targeting),
    );
    app.add_systems(Update, attack::resolve_attacks.in_set(CombatSet::Attack));
}
