//! # Game State Module
//!
//! Scoring, lives, and the timers that drive the ghost mode machine, all
//! kept as plain data so the engine stays the single writer.
//!
//! Timers are absolute deadlines compared against a simulation clock that
//! only advances while the game is Playing. Pausing therefore freezes
//! every timer for free: the clock stops, the deadlines keep.

use crate::config;
use crate::game::Mode;
use serde::{Deserialize, Serialize};

/// Overall lifecycle phase of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Idle before the first input; the maze is built and visible
    Start,
    /// Simulation running
    Playing,
    /// Frozen mid-game; toggling resumes exactly where it stopped
    Paused,
    /// Terminal until an explicit restart
    GameOver,
    /// Terminal until an explicit restart
    Win,
}

/// The patrol behavior all non-frightened, non-dead ghosts share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolPhase {
    Scatter,
    Chase,
}

impl PatrolPhase {
    /// The ghost mode this phase corresponds to.
    pub fn mode(self) -> Mode {
        match self {
            PatrolPhase::Scatter => Mode::Scatter,
            PatrolPhase::Chase => Mode::Chase,
        }
    }

    /// How long one leg of this phase lasts.
    pub fn duration(self) -> f64 {
        match self {
            PatrolPhase::Scatter => config::SCATTER_SECS,
            PatrolPhase::Chase => config::CHASE_SECS,
        }
    }

    /// The other phase.
    pub fn toggled(self) -> Self {
        match self {
            PatrolPhase::Scatter => PatrolPhase::Chase,
            PatrolPhase::Chase => PatrolPhase::Scatter,
        }
    }
}

/// Score, lives, and timer bookkeeping for one game.
///
/// # Examples
///
/// ```
/// use chomp::{GameState, PatrolPhase, Phase};
///
/// let state = GameState::new(1200);
/// assert_eq!(state.phase, Phase::Start);
/// assert_eq!(state.high_score, 1200);
/// assert_eq!(state.patrol, PatrolPhase::Scatter);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    /// Best score seen, persisted by the engine's store
    pub high_score: u32,
    /// Spare lives; the game ends when this drops below zero
    pub lives: i32,
    pub level: u32,
    /// Simulation clock in seconds; advances only while Playing
    pub clock: f64,
    /// Current shared patrol phase
    pub patrol: PatrolPhase,
    /// Deadline at which the patrol phase toggles
    pub patrol_until: f64,
    /// Whether a fright window is active
    pub frightened: bool,
    /// Deadline at which the fright window expires
    pub fright_until: f64,
    /// Ghosts eaten so far in the current fright window, capped
    pub eat_chain: u8,
    /// Deadline before which another life cannot be lost
    pub death_block_until: f64,
}

impl GameState {
    /// Creates the state for a fresh game, carrying over a high score.
    pub fn new(high_score: u32) -> Self {
        Self {
            phase: Phase::Start,
            score: 0,
            high_score,
            lives: config::STARTING_LIVES,
            level: 1,
            clock: 0.0,
            patrol: PatrolPhase::Scatter,
            patrol_until: config::SCATTER_SECS,
            frightened: false,
            fright_until: 0.0,
            eat_chain: 0,
            death_block_until: 0.0,
        }
    }

    /// Adds points, tracking the high score.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Moves to a new lifecycle phase.
    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Opens a fright window starting now.
    pub fn start_fright(&mut self) {
        self.frightened = true;
        self.fright_until = self.clock + config::FRIGHT_SECS;
        self.eat_chain = 0;
    }

    /// Toggles the patrol phase if its deadline passed, returning the new
    /// phase when a toggle happened.
    pub(crate) fn tick_patrol(&mut self) -> Option<PatrolPhase> {
        if self.clock < self.patrol_until {
            return None;
        }
        self.patrol = self.patrol.toggled();
        self.patrol_until = self.clock + self.patrol.duration();
        log::debug!("patrol -> {:?}", self.patrol);
        Some(self.patrol)
    }

    /// Expires the fright window if its deadline passed. Returns true on
    /// the frame the window closes; the eat chain resets with it.
    pub(crate) fn tick_fright(&mut self) -> bool {
        if !self.frightened || self.clock < self.fright_until {
            return false;
        }
        self.frightened = false;
        self.eat_chain = 0;
        true
    }
}
