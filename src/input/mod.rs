//! # Input Module
//!
//! The device-independent input boundary.
//!
//! A shell translates raw key/touch events into [`Intent`] values and
//! enqueues them on the engine; they are applied at the start of the next
//! update, never concurrently with one. How an intent is interpreted
//! depends on the lifecycle phase — a directional intent starts an idle
//! game, turns a running one, and is ignored everywhere else.

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// One unit of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Steer the player; also starts an idle game
    Turn(Direction),
    /// Toggle between Playing and Paused
    TogglePause,
    /// Start or restart from Start, GameOver, or Win
    Start,
}
