//! # Engine Module
//!
//! The owned simulation object. A shell calls [`Engine::queue_intent`] as
//! device events arrive and [`Engine::update`] once per animation frame;
//! renderers read the immutable [`Engine::snapshot`]. Nothing in here ever
//! draws or blocks.

use crate::config;
use crate::game::{
    collision::{self, ContactOutcome},
    movement, GameState, Ghost, Maze, Mode, PelletField, Personality, Phase, Player,
};
use crate::input::Intent;
use crate::persistence::HighScoreStore;
use crate::{generation, ChompResult};
use serde::Serialize;
use std::collections::VecDeque;

/// The simulation core.
///
/// One logical thread of simulation: all mutation happens synchronously
/// inside [`Engine::update`]. Input intents are only enqueued between
/// frames and applied at the start of the next update.
///
/// # Examples
///
/// ```
/// use chomp::{Direction, Engine, Intent, MemoryStore, Phase};
///
/// let mut engine = Engine::new(MemoryStore::default());
/// engine.queue_intent(Intent::Turn(Direction::Left));
/// engine.update(1.0 / 60.0);
/// assert_eq!(engine.snapshot().phase, Phase::Playing);
/// ```
#[derive(Debug)]
pub struct Engine {
    pub maze: Maze,
    pub pellets: PelletField,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    pub state: GameState,
    intents: VecDeque<Intent>,
    store: Box<dyn HighScoreStore>,
}

/// Read-only view of one frame, for renderers and debugging tools.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub pellets: &'a PelletField,
    pub player: &'a Player,
    pub ghosts: &'a [Ghost],
    pub phase: Phase,
    pub frightened: bool,
    pub score: u32,
    pub high_score: u32,
    pub lives: i32,
    pub level: u32,
    pub pellets_remaining: u32,
}

impl Engine {
    /// Builds a fresh engine in the Start phase.
    ///
    /// The store is read once here; a failed read degrades to "no high
    /// score" and is logged, never fatal.
    pub fn new(store: impl HighScoreStore + 'static) -> Self {
        let mut store: Box<dyn HighScoreStore> = Box::new(store);
        let high_score = match store.load() {
            Ok(Some(score)) => score,
            Ok(None) => 0,
            Err(err) => {
                log::warn!("high score unavailable: {err}");
                0
            }
        };

        let maze = generation::build_maze();
        let pellets = generation::seed_pellets(&maze);
        let player = Player::spawn(maze.player_start);
        let ghosts = Self::spawn_ghosts(&maze);
        Self {
            maze,
            pellets,
            player,
            ghosts,
            state: GameState::new(high_score),
            intents: VecDeque::new(),
            store,
        }
    }

    /// Enqueues an input intent for the next update.
    pub fn queue_intent(&mut self, intent: Intent) {
        self.intents.push_back(intent);
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// `dt` is clamped to [`config::MAX_FRAME_SECS`] so a stalled frame
    /// cannot jump the simulation. Outside the Playing phase the call only
    /// drains intents; Paused in particular freezes every timer because
    /// the clock simply does not advance.
    pub fn update(&mut self, dt: f32) {
        debug_assert!(
            dt.is_finite() && dt >= 0.0,
            "update() requires a finite, non-negative dt"
        );
        if !dt.is_finite() || dt < 0.0 {
            return;
        }

        self.drain_intents();
        if self.state.phase != Phase::Playing {
            return;
        }

        let dt = dt.min(config::MAX_FRAME_SECS);
        self.state.clock += f64::from(dt);

        if let Some(patrol) = self.state.tick_patrol() {
            for ghost in &mut self.ghosts {
                ghost.follow_patrol(patrol);
            }
        }
        if self.state.tick_fright() {
            let patrol = self.state.patrol;
            for ghost in &mut self.ghosts {
                ghost.calm_down(patrol);
            }
        }

        let high_before = self.state.high_score;

        movement::advance_player(&mut self.player, &self.maze, dt);
        let player_tile = self.player.core.tile();
        let player_dir = self.player.core.dir;
        for i in 0..self.ghosts.len() {
            let target = self.ghosts[i].target_tile(&self.maze, player_tile, player_dir);
            movement::advance_ghost(&mut self.ghosts[i], &self.maze, target, dt);
            self.settle_house_arrival(i);
        }

        collision::consume_pellets(
            &mut self.state,
            &mut self.pellets,
            &self.player,
            &mut self.ghosts,
        );
        match collision::resolve_contacts(&mut self.state, &self.player, &mut self.ghosts) {
            ContactOutcome::Continue => {}
            ContactOutcome::LifeLost => self.reset_positions(),
            ContactOutcome::GameOver => self.state.set_phase(Phase::GameOver),
        }

        if collision::board_cleared(&self.state, &self.pellets) {
            self.state.set_phase(Phase::Win);
        }

        let ended = matches!(self.state.phase, Phase::GameOver | Phase::Win);
        if self.state.high_score > high_before || ended {
            self.persist_high_score();
        }
    }

    /// The read-only state view for this frame.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.maze,
            pellets: &self.pellets,
            player: &self.player,
            ghosts: &self.ghosts,
            phase: self.state.phase,
            frightened: self.state.frightened,
            score: self.state.score,
            high_score: self.state.high_score,
            lives: self.state.lives,
            level: self.state.level,
            pellets_remaining: self.pellets.remaining(),
        }
    }

    /// Serializes the current snapshot, for shells that ship frames across
    /// a process boundary.
    pub fn snapshot_json(&self) -> ChompResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    fn drain_intents(&mut self) {
        while let Some(intent) = self.intents.pop_front() {
            match (self.state.phase, intent) {
                (Phase::Start, Intent::Turn(dir)) => {
                    // The first directional input both starts the game and
                    // queues that direction.
                    self.player.queue_turn(dir);
                    self.state.set_phase(Phase::Playing);
                }
                (Phase::Playing, Intent::Turn(dir)) => self.player.queue_turn(dir),
                (Phase::Playing, Intent::TogglePause) => self.state.set_phase(Phase::Paused),
                (Phase::Paused, Intent::TogglePause) => self.state.set_phase(Phase::Playing),
                (Phase::Start | Phase::GameOver | Phase::Win, Intent::Start) => self.new_game(),
                (phase, intent) => log::debug!("ignoring {intent:?} in {phase:?}"),
            }
        }
    }

    /// Full reset: fresh board, score, lives, level, entity positions.
    fn new_game(&mut self) {
        log::info!("new game");
        self.maze = generation::build_maze();
        self.pellets = generation::seed_pellets(&self.maze);
        let high_score = self.state.high_score;
        self.state = GameState::new(high_score);
        self.reset_positions();
        self.state.set_phase(Phase::Playing);
    }

    /// Repositions every entity to its spawn. Score, lives, and pellets
    /// are untouched; ghosts restart inside the house and leave through
    /// the gate.
    fn reset_positions(&mut self) {
        self.player = Player::spawn(self.maze.player_start);
        self.ghosts = Self::spawn_ghosts(&self.maze);
    }

    /// Eaten ghosts revive at the house revival point; Leaving ghosts
    /// dissolve into the current patrol at the rendezvous.
    fn settle_house_arrival(&mut self, index: usize) {
        let patrol = self.state.patrol;
        let revival = self.maze.revival.center();
        let rendezvous = self.maze.rendezvous.center();
        let ghost = &mut self.ghosts[index];
        match ghost.mode {
            Mode::Eaten => {
                if ghost.core.pos.distance(revival) <= config::ARRIVAL_RADIUS {
                    ghost.set_mode(Mode::Leaving);
                }
            }
            Mode::Leaving => {
                if ghost.core.pos.distance(rendezvous) <= config::ARRIVAL_RADIUS {
                    ghost.dead = false;
                    ghost.set_mode(patrol.mode());
                }
            }
            _ => {}
        }
    }

    fn spawn_ghosts(maze: &Maze) -> Vec<Ghost> {
        Personality::ALL
            .iter()
            .enumerate()
            .map(|(i, &personality)| {
                Ghost::spawn(personality, maze.ghost_starts[i], maze.home_corners[i])
            })
            .collect()
    }

    fn persist_high_score(&mut self) {
        if let Err(err) = self.store.save(self.state.high_score) {
            log::warn!("high score not saved: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Mode};
    use crate::persistence::MemoryStore;

    fn started_engine() -> Engine {
        let mut engine = Engine::new(MemoryStore::default());
        engine.queue_intent(Intent::Turn(Direction::Left));
        engine.update(0.0);
        engine
    }

    #[test]
    fn starts_idle_until_first_directional_intent() {
        let mut engine = Engine::new(MemoryStore::default());
        assert_eq!(engine.state.phase, Phase::Start);

        // Idle updates simulate nothing.
        let before = engine.player.core.pos;
        engine.update(0.5);
        assert_eq!(engine.state.phase, Phase::Start);
        assert_eq!(engine.player.core.pos, before);
        assert_eq!(engine.state.clock, 0.0);

        engine.queue_intent(Intent::Turn(Direction::Left));
        engine.update(0.016);
        assert_eq!(engine.state.phase, Phase::Playing);
    }

    #[test]
    fn dt_is_clamped_against_stalls() {
        let mut engine = started_engine();
        let x0 = engine.player.core.pos.x;
        engine.update(5.0);
        let travelled = (x0 - engine.player.core.pos.x).abs();
        assert!(travelled <= config::PLAYER_SPEED * config::MAX_FRAME_SECS + 1e-3);
        assert!((engine.state.clock - f64::from(config::MAX_FRAME_SECS)).abs() < 1e-9);
    }

    #[test]
    fn malformed_dt_is_a_safe_no_op_in_release() {
        let mut engine = started_engine();
        let clock = engine.state.clock;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            engine.update(f32::NAN);
        }));
        // Debug builds assert; release builds ignore the frame.
        if result.is_ok() {
            assert_eq!(engine.state.clock, clock);
        }
    }

    #[test]
    fn pause_freezes_everything_exactly() {
        let mut engine = started_engine();
        for _ in 0..10 {
            engine.update(0.016);
        }
        engine.queue_intent(Intent::TogglePause);
        engine.update(0.016);
        assert_eq!(engine.state.phase, Phase::Paused);

        let frozen_clock = engine.state.clock;
        let frozen_pos = engine.player.core.pos;
        let frozen_score = engine.state.score;
        for _ in 0..50 {
            engine.update(0.1);
        }
        assert_eq!(engine.state.clock, frozen_clock);
        assert_eq!(engine.player.core.pos, frozen_pos);
        assert_eq!(engine.state.score, frozen_score);

        engine.queue_intent(Intent::TogglePause);
        engine.update(0.0);
        assert_eq!(engine.state.phase, Phase::Playing);
        assert_eq!(engine.state.clock, frozen_clock);
        assert_eq!(engine.player.core.pos, frozen_pos);
    }

    #[test]
    fn turn_intents_are_dropped_while_paused() {
        let mut engine = started_engine();
        engine.queue_intent(Intent::TogglePause);
        engine.update(0.016);
        engine.player.queued = None;

        engine.queue_intent(Intent::Turn(Direction::Up));
        engine.update(0.016);
        assert_eq!(engine.player.queued, None);
    }

    #[test]
    fn patrol_cycle_toggles_ghosts_between_scatter_and_chase() {
        let mut engine = started_engine();
        for ghost in &mut engine.ghosts {
            ghost.dead = false;
            ghost.set_mode(Mode::Scatter);
        }
        // Jump the clock to just past the scatter deadline.
        engine.state.patrol_until = engine.state.clock;
        engine.update(0.016);
        for ghost in &engine.ghosts {
            assert_eq!(ghost.mode, Mode::Chase);
        }
        assert_eq!(engine.state.patrol, crate::game::PatrolPhase::Chase);

        engine.state.patrol_until = engine.state.clock;
        engine.update(0.016);
        for ghost in &engine.ghosts {
            assert_eq!(ghost.mode, Mode::Scatter);
        }
    }

    #[test]
    fn fright_expiry_restores_the_patrol_phase_and_chain() {
        let mut engine = started_engine();
        for ghost in &mut engine.ghosts {
            ghost.set_mode(Mode::Frightened);
        }
        engine.state.frightened = true;
        engine.state.fright_until = engine.state.clock;
        engine.state.eat_chain = 2;

        engine.update(0.016);
        assert!(!engine.state.frightened);
        assert_eq!(engine.state.eat_chain, 0);
        for ghost in &engine.ghosts {
            assert_eq!(ghost.mode, engine.state.patrol.mode());
        }
    }

    #[test]
    fn win_fires_exactly_once_when_board_clears() {
        let mut engine = started_engine();
        // Park the player on some tile that still holds a dot, then clear
        // every other pellet.
        let mut keep = None;
        'outer: for y in 0..engine.maze.rows {
            for x in 0..engine.maze.cols {
                let pos = crate::game::TilePos::new(x, y);
                if engine.pellets.get(pos) == crate::game::Pellet::Dot {
                    keep = Some(pos);
                    break 'outer;
                }
            }
        }
        let keep = keep.expect("board still has dots");
        engine.player.core.pos = keep.center();
        for y in 0..engine.maze.rows {
            for x in 0..engine.maze.cols {
                let pos = crate::game::TilePos::new(x, y);
                if pos != keep {
                    engine.pellets.take(pos);
                }
            }
        }
        assert_eq!(engine.pellets.remaining(), 1);

        engine.update(0.016);
        assert_eq!(engine.pellets.remaining(), 0);
        assert_eq!(engine.state.phase, Phase::Win);

        // Terminal: further updates change nothing.
        let score = engine.state.score;
        engine.update(0.1);
        assert_eq!(engine.state.phase, Phase::Win);
        assert_eq!(engine.state.score, score);
    }

    #[test]
    fn restart_resets_board_score_and_lives_but_keeps_high_score() {
        let mut engine = started_engine();
        engine.state.add_score(500);
        engine.state.lives = 0;
        engine.state.set_phase(Phase::GameOver);

        let full_board = crate::generation::seed_pellets(&engine.maze).remaining();
        engine.queue_intent(Intent::Start);
        engine.update(0.0);

        // The restarting update already consumed the dot under the spawn
        // tile, like any other Playing frame.
        assert_eq!(engine.state.phase, Phase::Playing);
        assert_eq!(engine.state.score, config::DOT_SCORE);
        assert_eq!(engine.state.high_score, 510);
        assert_eq!(engine.state.lives, config::STARTING_LIVES);
        assert_eq!(engine.state.level, 1);
        assert_eq!(engine.pellets.remaining(), full_board - 1);
        assert_eq!(engine.player.core.tile(), engine.maze.player_start);
    }

    #[test]
    fn snapshot_reflects_engine_state_and_serializes() {
        let engine = started_engine();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.pellets_remaining, engine.pellets.remaining());
        assert_eq!(snapshot.ghosts.len(), 4);

        let json = engine.snapshot_json().expect("snapshot serializes");
        assert!(json.contains("\"phase\""));
        assert!(json.contains("Playing"));
    }
}
