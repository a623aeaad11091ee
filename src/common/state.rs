//! Global state machine.
//!
//! ```text
//! Loading ──arsenal ok──> InGame
//!    └────rejected──────> ConfigRejected
//! ```

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    /// Arsenal config is parsed and validated on entry.
    #[default]
    Loading,
    InGame,
    /// Terminal: the arsenal failed validation, nothing is spawned.
    ConfigRejected,
}
