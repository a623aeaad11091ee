//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    /// How fast a homing projectile bends its heading toward the target (per second).
    pub homing_turn_rate: f32,
    /// A projectile closer than this to its target counts as a hit.
    pub projectile_hit_radius: f32,
    /// How long a direct-damage attack line stays on screen.
    pub attack_effect_duration: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 260.0,
            homing_turn_rate: 10.0,
            projectile_hit_radius: 10.0,
            attack_effect_duration: 0.1,
        }
    }
}
