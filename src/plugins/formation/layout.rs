//! Slot assignment for a player's weapons.
//!
//! `WeaponFormation` is plain data: it owns the ordered weapon list and computes one pose per
//! weapon from that order. Poses are always derived from the current list, never stored.

use bevy::prelude::*;
use thiserror::Error;

use crate::common::config::{FallbackPlacement, FormationConfig};
use crate::common::geometry::{arc_offset, facing, orbit_offset};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationError {
    #[error("formation is full ({capacity} weapons)")]
    CapacityExceeded { capacity: usize },
}

/// A manual attachment point relative to the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot {
    pub offset: Vec2,
    /// Degrees. `None` leaves the weapon's facing alone.
    pub facing: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormationLayout {
    /// Weapon `i` sits on slot `min(i, len - 1)`; surplus weapons share the last slot.
    Slots(Vec<Slot>),
    /// Evenly spaced circle, spinning at `speed` degrees per second. Position only.
    Orbit { radius: f32, speed: f32 },
    /// Half circle lifted by `height`; weapons face the player.
    Arc { radius: f32, height: f32 },
}

impl FormationLayout {
    pub fn from_config(config: &FormationConfig) -> Self {
        if !config.slots.is_empty() {
            return Self::Slots(
                config
                    .slots
                    .iter()
                    .map(|s| Slot {
                        offset: Vec2::new(s.offset.0, s.offset.1),
                        facing: s.facing,
                    })
                    .collect(),
            );
        }
        match config.fallback {
            FallbackPlacement::Orbit => Self::Orbit {
                radius: config.orbit_radius,
                speed: config.orbit_speed,
            },
            FallbackPlacement::Arc { height } => Self::Arc {
                radius: config.orbit_radius,
                height,
            },
        }
    }
}

/// World-space placement for one weapon. `rotation: None` means "keep your own facing".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotPose {
    pub translation: Vec2,
    pub rotation: Option<Quat>,
}

#[derive(Component, Debug, Clone)]
pub struct WeaponFormation {
    capacity: usize,
    weapons: Vec<Entity>,
    layout: FormationLayout,
    /// Degrees, kept in `[0, 360)`.
    orbit_angle: f32,
}

impl WeaponFormation {
    pub fn new(capacity: usize, layout: FormationLayout) -> Self {
        debug_assert!(capacity >= 1, "formation capacity must be at least 1");
        Self {
            capacity,
            weapons: Vec::with_capacity(capacity),
            layout,
            orbit_angle: 0.0,
        }
    }

    pub fn from_config(config: &FormationConfig) -> Self {
        Self::new(config.capacity, FormationLayout::from_config(config))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn weapons(&self) -> &[Entity] {
        &self.weapons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    #[inline]
    pub fn layout(&self) -> &FormationLayout {
        &self.layout
    }

    #[inline]
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    pub fn ensure_capacity(&self) -> Result<(), FormationError> {
        if self.weapons.len() >= self.capacity {
            return Err(FormationError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Append `weapon`. Returns its slot index.
    pub fn attach(&mut self, weapon: Entity) -> Result<usize, FormationError> {
        self.ensure_capacity()?;
        self.weapons.push(weapon);
        Ok(self.weapons.len() - 1)
    }

    /// Remove `weapon`, keeping the order of the rest. `false` if it was not attached.
    pub fn detach(&mut self, weapon: Entity) -> bool {
        let Some(index) = self.weapons.iter().position(|&w| w == weapon) else {
            return false;
        };
        self.weapons.remove(index);
        true
    }

    /// Drop weapons for which `keep` is false. Returns how many were dropped.
    pub fn prune(&mut self, mut keep: impl FnMut(Entity) -> bool) -> usize {
        let before = self.weapons.len();
        self.weapons.retain(|&w| keep(w));
        before - self.weapons.len()
    }

    /// Advance the running orbit angle. Only the orbit layout moves.
    pub fn advance(&mut self, dt: f32) {
        if let FormationLayout::Orbit { speed, .. } = self.layout {
            self.orbit_angle = (self.orbit_angle + speed * dt).rem_euclid(360.0);
        }
    }

    /// Pose of the weapon at `index` for a player standing at `anchor`.
    pub fn pose(&self, index: usize, anchor: Vec2) -> SlotPose {
        let count = self.weapons.len().max(1);
        match &self.layout {
            FormationLayout::Slots(slots) if !slots.is_empty() => {
                let slot = slots[index.min(slots.len() - 1)];
                SlotPose {
                    translation: anchor + slot.offset,
                    rotation: slot.facing.map(|deg| Quat::from_rotation_z(deg.to_radians())),
                }
            }
            FormationLayout::Slots(_) => SlotPose {
                translation: anchor,
                rotation: None,
            },
            FormationLayout::Orbit { radius, .. } => {
                let angle = self.orbit_angle + index as f32 * (360.0 / count as f32);
                SlotPose {
                    translation: anchor + orbit_offset(angle, *radius),
                    rotation: None,
                }
            }
            FormationLayout::Arc { radius, height } => {
                let translation = anchor + arc_offset(index, count, *radius, *height);
                SlotPose {
                    translation,
                    rotation: facing(anchor - translation),
                }
            }
        }
    }

    /// One pose per attached weapon, in attachment order.
    pub fn poses(&self, anchor: Vec2) -> Vec<SlotPose> {
        (0..self.weapons.len())
            .map(|i| self.pose(i, anchor))
            .collect()
    }
}
