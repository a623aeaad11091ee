//! Arsenal configuration: weapon/projectile archetypes, formation layout, encounter.
//!
//! Archetypes are loaded from RON into the raw `*File` structs, then validated into the
//! `Arsenal` resource. Validation is the only place numbers are range-checked: once an
//! `Arsenal` exists, every rate, lifetime and speed in it is positive, so runtime code can
//! divide by them without guards.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{owner}: `{field}` must be positive, got {value}")]
    NonPositive {
        owner: String,
        field: &'static str,
        value: f32,
    },
    #[error("{owner}: `{field}` must not be negative, got {value}")]
    Negative {
        owner: String,
        field: &'static str,
        value: f32,
    },
    #[error("formation capacity must be at least 1")]
    ZeroCapacity,
    #[error("weapon `{weapon}` references unknown projectile `{projectile}`")]
    UnknownProjectile { weapon: String, projectile: String },
    #[error("unknown weapon archetype `{0}`")]
    UnknownWeapon(String),
    #[error("archetype name `{0}` is defined more than once")]
    DuplicateName(String),
    #[error("arsenal file could not be parsed: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

fn positive(owner: &str, field: &'static str, value: f32) -> Result<f32, ConfigError> {
    // `!(value > 0.0)` also rejects NaN.
    if !(value > 0.0) || !value.is_finite() {
        return Err(ConfigError::NonPositive {
            owner: owner.to_owned(),
            field,
            value,
        });
    }
    Ok(value)
}

fn non_negative(owner: &str, field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(ConfigError::Negative {
            owner: owner.to_owned(),
            field,
            value,
        });
    }
    Ok(value)
}

// -----------------------------------------------------------------------------
// Archetypes (validated)
// -----------------------------------------------------------------------------

/// Only constructible through validation, so speed and lifetime are always positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileArchetype {
    speed: f32,
    lifetime: f32,
    homing: bool,
}

impl ProjectileArchetype {
    pub fn new(speed: f32, lifetime: f32, homing: bool) -> Result<Self, ConfigError> {
        Self::named("projectile", speed, lifetime, homing)
    }

    fn named(owner: &str, speed: f32, lifetime: f32, homing: bool) -> Result<Self, ConfigError> {
        Ok(Self {
            speed: positive(owner, "speed", speed)?,
            lifetime: positive(owner, "lifetime", lifetime)?,
            homing,
        })
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Seconds.
    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    #[inline]
    pub fn homing(&self) -> bool {
        self.homing
    }
}

/// A fully resolved weapon archetype.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponArchetype {
    pub name: String,
    pub damage: f32,
    /// Attacks per second.
    pub attack_rate: f32,
    pub attack_range: f32,
    /// Seconds between target re-acquisition scans.
    pub targeting_interval: f32,
    /// Slerp rate while turning toward a locked target.
    pub turn_speed: f32,
    pub idle_rotation: bool,
    /// Degrees per second.
    pub idle_rotation_speed: f32,
    pub auto_target: bool,
    pub first_attack_delay: f32,
    pub first_search_delay: f32,
    /// `None` resolves attacks as direct damage.
    pub projectile: Option<ProjectileArchetype>,
}

impl WeaponArchetype {
    /// A direct-damage archetype with the stock timings. Not validated here; see `validate`.
    pub fn direct(name: impl Into<String>, damage: f32, attack_rate: f32, attack_range: f32) -> Self {
        Self {
            name: name.into(),
            damage,
            attack_rate,
            attack_range,
            targeting_interval: 0.2,
            turn_speed: 5.0,
            idle_rotation: true,
            idle_rotation_speed: 90.0,
            auto_target: true,
            first_attack_delay: 0.5,
            first_search_delay: 1.0,
            projectile: None,
        }
    }

    pub fn with_projectile(mut self, projectile: ProjectileArchetype) -> Self {
        self.projectile = Some(projectile);
        self
    }

    /// Seconds between attacks.
    #[inline]
    pub fn attack_period(&self) -> f32 {
        1.0 / self.attack_rate
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let owner = self.name.as_str();
        positive(owner, "damage", self.damage)?;
        positive(owner, "attack_rate", self.attack_rate)?;
        positive(owner, "attack_range", self.attack_range)?;
        positive(owner, "targeting_interval", self.targeting_interval)?;
        non_negative(owner, "turn_speed", self.turn_speed)?;
        non_negative(owner, "first_attack_delay", self.first_attack_delay)?;
        non_negative(owner, "first_search_delay", self.first_search_delay)?;
        if !self.idle_rotation_speed.is_finite() {
            return Err(ConfigError::Negative {
                owner: owner.to_owned(),
                field: "idle_rotation_speed",
                value: self.idle_rotation_speed,
            });
        }
        Ok(())
    }
}

/// Placement used when a formation has no manual slots.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum FallbackPlacement {
    /// Even circle around the player; weapons keep their own facing.
    Orbit,
    /// Half circle above the player, weapons face the player.
    Arc { height: f32 },
}

/// A manual attachment point, relative to the player.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SlotConfig {
    pub offset: (f32, f32),
    /// Degrees. When set the slot also dictates the weapon's facing.
    #[serde(default)]
    pub facing: Option<f32>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct FormationConfig {
    pub capacity: usize,
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
    pub orbit_radius: f32,
    /// Degrees per second.
    pub orbit_speed: f32,
    #[serde(default = "default_fallback")]
    pub fallback: FallbackPlacement,
}

fn default_fallback() -> FallbackPlacement {
    FallbackPlacement::Orbit
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            capacity: 6,
            slots: Vec::new(),
            orbit_radius: 30.0,
            orbit_speed: 20.0,
            fallback: FallbackPlacement::Orbit,
        }
    }
}

impl FormationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        non_negative("formation", "orbit_radius", self.orbit_radius)?;
        if !self.orbit_speed.is_finite() {
            return Err(ConfigError::Negative {
                owner: "formation".to_owned(),
                field: "orbit_speed",
                value: self.orbit_speed,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EncounterConfig {
    pub wave_size: usize,
    pub ring_radius: f32,
    pub hostile_health: f32,
    pub hostile_speed: f32,
    pub stop_distance: f32,
    pub wave_delay: f32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            wave_size: 8,
            ring_radius: 240.0,
            hostile_health: 100.0,
            hostile_speed: 40.0,
            stop_distance: 48.0,
            wave_delay: 3.0,
        }
    }
}

impl EncounterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("encounter", "hostile_health", self.hostile_health)?;
        positive("encounter", "wave_delay", self.wave_delay)?;
        non_negative("encounter", "ring_radius", self.ring_radius)?;
        non_negative("encounter", "hostile_speed", self.hostile_speed)?;
        non_negative("encounter", "stop_distance", self.stop_distance)?;
        Ok(())
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct PickupConfig {
    pub weapon: String,
    pub position: (f32, f32),
}

// -----------------------------------------------------------------------------
// Raw file layout
// -----------------------------------------------------------------------------

#[derive(Deserialize, Clone, Debug)]
pub struct ProjectileFile {
    pub name: String,
    pub speed: f32,
    pub lifetime: f32,
    #[serde(default = "yes")]
    pub homing: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WeaponFile {
    pub name: String,
    pub damage: f32,
    pub attack_rate: f32,
    pub attack_range: f32,
    #[serde(default = "default_targeting_interval")]
    pub targeting_interval: f32,
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f32,
    #[serde(default = "yes")]
    pub idle_rotation: bool,
    #[serde(default = "default_idle_rotation_speed")]
    pub idle_rotation_speed: f32,
    #[serde(default = "yes")]
    pub auto_target: bool,
    #[serde(default = "default_first_attack_delay")]
    pub first_attack_delay: f32,
    #[serde(default = "default_first_search_delay")]
    pub first_search_delay: f32,
    #[serde(default)]
    pub projectile: Option<String>,
}

fn yes() -> bool {
    true
}
fn default_targeting_interval() -> f32 {
    0.2
}
fn default_turn_speed() -> f32 {
    5.0
}
fn default_idle_rotation_speed() -> f32 {
    90.0
}
fn default_first_attack_delay() -> f32 {
    0.5
}
fn default_first_search_delay() -> f32 {
    1.0
}

#[derive(Deserialize, Clone, Debug)]
pub struct ArsenalFile {
    #[serde(default)]
    pub projectiles: Vec<ProjectileFile>,
    pub weapons: Vec<WeaponFile>,
    #[serde(default)]
    pub formation: FormationConfig,
    #[serde(default)]
    pub starting_weapons: Vec<String>,
    #[serde(default)]
    pub encounter: EncounterConfig,
    #[serde(default)]
    pub pickups: Vec<PickupConfig>,
}

// -----------------------------------------------------------------------------
// Validated resource
// -----------------------------------------------------------------------------

/// Raw arsenal text, parsed on entering `GameState::Loading`.
#[derive(Resource, Debug, Clone)]
pub struct ArsenalSource(pub String);

impl ArsenalSource {
    pub fn embedded() -> Self {
        Self(include_str!("../../config/arsenal.ron").to_owned())
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Arsenal {
    weapons: HashMap<String, WeaponArchetype>,
    pub formation: FormationConfig,
    pub starting_weapons: Vec<String>,
    pub encounter: EncounterConfig,
    pub pickups: Vec<PickupConfig>,
}

impl Arsenal {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let file: ArsenalFile = ron::from_str(text)?;
        Self::from_file(file)
    }

    pub fn from_file(file: ArsenalFile) -> Result<Self, ConfigError> {
        let mut projectiles = HashMap::new();
        for p in file.projectiles {
            let archetype = ProjectileArchetype::named(&p.name, p.speed, p.lifetime, p.homing)?;
            if projectiles.insert(p.name.clone(), archetype).is_some() {
                return Err(ConfigError::DuplicateName(p.name));
            }
        }

        let mut weapons = HashMap::new();
        for w in file.weapons {
            let projectile = match &w.projectile {
                Some(name) => Some(*projectiles.get(name).ok_or_else(|| {
                    ConfigError::UnknownProjectile {
                        weapon: w.name.clone(),
                        projectile: name.clone(),
                    }
                })?),
                None => None,
            };
            let archetype = WeaponArchetype {
                name: w.name.clone(),
                damage: w.damage,
                attack_rate: w.attack_rate,
                attack_range: w.attack_range,
                targeting_interval: w.targeting_interval,
                turn_speed: w.turn_speed,
                idle_rotation: w.idle_rotation,
                idle_rotation_speed: w.idle_rotation_speed,
                auto_target: w.auto_target,
                first_attack_delay: w.first_attack_delay,
                first_search_delay: w.first_search_delay,
                projectile,
            };
            archetype.validate()?;
            if weapons.insert(w.name.clone(), archetype).is_some() {
                return Err(ConfigError::DuplicateName(w.name));
            }
        }

        file.formation.validate()?;
        file.encounter.validate()?;

        let known = |name: &String| {
            if weapons.contains_key(name) {
                Ok(())
            } else {
                Err(ConfigError::UnknownWeapon(name.clone()))
            }
        };
        file.starting_weapons.iter().try_for_each(known)?;
        file.pickups.iter().map(|p| &p.weapon).try_for_each(known)?;

        Ok(Self {
            weapons,
            formation: file.formation,
            starting_weapons: file.starting_weapons,
            encounter: file.encounter,
            pickups: file.pickups,
        })
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponArchetype> {
        self.weapons.get(name)
    }

    pub fn weapon_names(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"(
        projectiles: [(name: "bolt", speed: 10.0, lifetime: 2.0)],
        weapons: [
            (name: "zap", damage: 5.0, attack_rate: 2.0, attack_range: 50.0),
            (name: "launcher", damage: 9.0, attack_rate: 1.0, attack_range: 80.0, projectile: Some("bolt")),
        ],
        starting_weapons: ["zap"],
    )"#;

    #[test]
    fn embedded_arsenal_is_valid() {
        let arsenal = Arsenal::from_ron(&ArsenalSource::embedded().0).expect("embedded arsenal");
        assert!(!arsenal.starting_weapons.is_empty());
        for name in &arsenal.starting_weapons {
            assert!(arsenal.weapon(name).is_some());
        }
    }

    #[test]
    fn minimal_arsenal_applies_defaults_and_resolves_projectiles() {
        let arsenal = Arsenal::from_ron(MINIMAL).unwrap();

        let zap = arsenal.weapon("zap").unwrap();
        assert_eq!(zap.targeting_interval, 0.2);
        assert_eq!(zap.first_attack_delay, 0.5);
        assert!(zap.auto_target);
        assert!(zap.projectile.is_none());
        assert_eq!(zap.attack_period(), 0.5);

        let launcher = arsenal.weapon("launcher").unwrap();
        let p = launcher.projectile.unwrap();
        assert_eq!(p.speed(), 10.0);
        assert!(p.homing());

        assert_eq!(arsenal.formation.capacity, 6);
        assert_eq!(arsenal.formation.fallback, FallbackPlacement::Orbit);
    }

    #[test]
    fn zero_attack_rate_is_rejected() {
        let text = MINIMAL.replace("attack_rate: 2.0", "attack_rate: 0.0");
        let err = Arsenal::from_ron(&text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive { field: "attack_rate", .. }
        ));
    }

    #[test]
    fn non_positive_projectile_numbers_are_rejected() {
        let text = MINIMAL.replace("lifetime: 2.0", "lifetime: 0.0");
        assert!(matches!(
            Arsenal::from_ron(&text),
            Err(ConfigError::NonPositive { ref owner, field: "lifetime", .. }) if owner == "bolt"
        ));

        let text = MINIMAL.replace("speed: 10.0", "speed: -1.0");
        assert!(matches!(
            Arsenal::from_ron(&text),
            Err(ConfigError::NonPositive { field: "speed", .. })
        ));

        assert!(ProjectileArchetype::new(0.0, 1.0, true).is_err());
        assert!(ProjectileArchetype::new(1.0, f32::NAN, true).is_err());
        assert!(ProjectileArchetype::new(1.0, 1.0, false).is_ok());
    }

    #[test]
    fn unknown_references_are_rejected() {
        let text = MINIMAL.replace("Some(\"bolt\")", "Some(\"rocket\")");
        assert!(matches!(
            Arsenal::from_ron(&text),
            Err(ConfigError::UnknownProjectile { .. })
        ));

        let text = MINIMAL.replace("starting_weapons: [\"zap\"]", "starting_weapons: [\"nope\"]");
        assert!(matches!(
            Arsenal::from_ron(&text),
            Err(ConfigError::UnknownWeapon(name)) if name == "nope"
        ));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let text = MINIMAL.replace(
            "starting_weapons",
            "formation: (capacity: 0, orbit_radius: 1.0, orbit_speed: 0.0), starting_weapons",
        );
        assert!(matches!(Arsenal::from_ron(&text), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        assert!(matches!(
            Arsenal::from_ron("(weapons: [("),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn direct_archetype_validates() {
        let a = WeaponArchetype::direct("test", 10.0, 2.0, 30.0);
        assert!(a.validate().is_ok());
        let bad = WeaponArchetype { turn_speed: -1.0, ..a };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::Negative { field: "turn_speed", .. })
        ));
    }
}
