//! Common, shared types.

pub mod config;
pub mod geometry;
pub mod layers;
pub mod state;
pub mod timers;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
