//! Radius queries over live hostiles.
//!
//! A brute-force pass over the hostile query. Inclusion is the Euclidean distance of the
//! hostile's transform origin, inclusive at the boundary. Dead hostiles are never returned.
//!
//! Tie-break: `nearest` and `ranked` keep the query's iteration order among equal distances.
//! That order is consistent within one pass but is otherwise unspecified (it follows archetype
//! and table layout), so callers must not rely on which of two equidistant hostiles wins.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{Dead, Hostile};

#[derive(SystemParam)]
pub struct HostileScan<'w, 's> {
    hostiles: Query<'w, 's, (Entity, &'static Transform), (With<Hostile>, Without<Dead>)>,
}

impl HostileScan<'_, '_> {
    /// Every live hostile whose reference point lies within `radius` of `center`.
    pub fn within_radius(&self, center: Vec2, radius: f32) -> impl Iterator<Item = (Entity, Vec2)> {
        let radius_sq = radius * radius;
        self.hostiles.iter().filter_map(move |(e, tf)| {
            let p = tf.translation.truncate();
            (p.distance_squared(center) <= radius_sq).then_some((e, p))
        })
    }

    /// Closest live hostile within `radius`, with its position.
    pub fn nearest(&self, center: Vec2, radius: f32) -> Option<(Entity, Vec2)> {
        nearest_of(self.within_radius(center, radius), center)
    }

    /// Live hostiles within `radius`, ascending by distance (stable).
    pub fn ranked(&self, center: Vec2, radius: f32) -> Vec<(Entity, Vec2)> {
        let mut hits: Vec<(Entity, Vec2)> = self.within_radius(center, radius).collect();
        hits.sort_by(|a, b| {
            a.1.distance_squared(center)
                .total_cmp(&b.1.distance_squared(center))
        });
        hits
    }

    /// Resolve a held handle. `None` once the hostile is dead or gone.
    pub fn position_of(&self, hostile: Entity) -> Option<Vec2> {
        self.hostiles
            .get(hostile)
            .ok()
            .map(|(_, tf)| tf.translation.truncate())
    }
}

/// First minimum-distance candidate; later equal candidates never replace it.
pub fn nearest_of(
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
    center: Vec2,
) -> Option<(Entity, Vec2)> {
    let mut best: Option<(Entity, Vec2, f32)> = None;
    for (e, p) in candidates {
        let d = p.distance_squared(center);
        if best.is_none_or(|(_, _, bd)| d < bd) {
            best = Some((e, p, d));
        }
    }
    best.map(|(e, p, _)| (e, p))
}
