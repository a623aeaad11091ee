//! Frame-time driven timers.

use bevy::prelude::*;

/// A re-arming countdown.
///
/// Each `tick` subtracts the frame time. When the remaining time reaches zero the countdown
/// fires once and is re-armed to a full `period`, however far past zero the frame went.
/// Long frames therefore never produce a burst of catch-up firings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Countdown {
    remaining: f32,
    period: f32,
}

impl Countdown {
    /// `period` must be positive; archetype validation guarantees that for config-driven timers.
    pub fn new(period: f32) -> Self {
        Self::with_delay(period, period)
    }

    /// First firing after `first`, then every `period`.
    ///
    /// Callers guarantee `period` is positive and finite. Weapon timers get that from
    /// `WeaponArchetype::validate`, which both the arsenal loader and `attach_weapons` run.
    pub fn with_delay(period: f32, first: f32) -> Self {
        debug_assert!(period > 0.0, "countdown period must be positive, got {period}");
        Self {
            remaining: first.max(0.0),
            period,
        }
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[inline]
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Returns `true` on the tick that crosses zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }
}

/// One-shot lifetime for transient entities.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

impl Lifetime {
    pub fn from_seconds(secs: f32) -> Self {
        Self(Timer::from_seconds(secs, TimerMode::Once))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_decrements_until_it_crosses_zero() {
        let mut c = Countdown::with_delay(1.0, 0.5);
        assert!(!c.tick(0.2));
        assert!((c.remaining() - 0.3).abs() < 1e-6);
        assert!(!c.tick(0.2));
        assert!((c.remaining() - 0.1).abs() < 1e-6);
        assert!(c.tick(0.2));
        assert_eq!(c.remaining(), 1.0);
    }

    #[test]
    fn countdown_fires_once_for_a_frame_spanning_many_periods() {
        let mut c = Countdown::new(0.25);
        assert!(c.tick(10.0));
        assert_eq!(c.remaining(), 0.25);
        assert!(!c.tick(0.1));
    }

    #[test]
    fn countdown_with_zero_delay_fires_on_first_tick() {
        let mut c = Countdown::with_delay(2.0, 0.0);
        assert!(c.tick(0.0));
        assert_eq!(c.remaining(), 2.0);
    }

    #[test]
    fn countdown_is_never_left_non_positive() {
        let mut c = Countdown::new(0.3);
        for i in 0..200 {
            let dt = (i % 7) as f32 * 0.05;
            c.tick(dt);
            assert!(c.remaining() > 0.0);
            assert!(c.remaining() <= c.period());
        }
    }
}
