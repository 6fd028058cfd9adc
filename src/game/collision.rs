//! # Collision Module
//!
//! Pellet consumption, power-pellet effects, and player/ghost contact
//! resolution. Pure rules over the state the engine hands in; the engine
//! applies the returned outcome.

use crate::config;
use crate::game::{GameState, Ghost, Mode, PelletField, Pellet, Phase, Player};

/// What a round of contact resolution asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Nothing happened that the engine needs to act on
    Continue,
    /// A life was lost; entities must be repositioned
    LifeLost,
    /// A life was lost and none remain
    GameOver,
}

/// Consumes whatever pellet sits under the player's tile.
///
/// A dot scores; a power pellet additionally opens the fright window and
/// frightens every ghost on patrol.
pub fn consume_pellets(
    state: &mut GameState,
    pellets: &mut PelletField,
    player: &Player,
    ghosts: &mut [Ghost],
) {
    match pellets.take(player.core.tile()) {
        Pellet::None => {}
        Pellet::Dot => state.add_score(config::DOT_SCORE),
        Pellet::Power => {
            state.add_score(config::POWER_SCORE);
            state.start_fright();
            for ghost in ghosts.iter_mut() {
                ghost.frighten();
            }
        }
    }
}

/// Resolves player/ghost proximity contacts for one frame.
///
/// A frightened, living ghost is eaten: it turns Eaten, the chain advances
/// (capped), and the chained bonus doubles per ghost. Any other living,
/// non-eaten ghost costs a life — at most once per death cooldown, so one
/// crowded frame cannot take several lives.
pub fn resolve_contacts(
    state: &mut GameState,
    player: &Player,
    ghosts: &mut [Ghost],
) -> ContactOutcome {
    for ghost in ghosts.iter_mut() {
        let distance = player.core.pos.distance(ghost.core.pos);
        if distance >= player.core.radius + ghost.core.radius {
            continue;
        }

        if ghost.mode == Mode::Frightened && !ghost.dead {
            ghost.dead = true;
            ghost.set_mode(Mode::Eaten);
            if state.eat_chain < config::EAT_CHAIN_CAP {
                state.eat_chain += 1;
            }
            let bonus = config::GHOST_SCORE_BASE << (state.eat_chain - 1);
            state.add_score(bonus);
            log::debug!("{} eaten, +{}", ghost.name, bonus);
            continue;
        }

        if !ghost.dead && ghost.mode != Mode::Eaten && state.clock >= state.death_block_until {
            state.lives -= 1;
            state.death_block_until = state.clock + config::DEATH_COOLDOWN_SECS;
            log::info!("caught by {}, {} lives left", ghost.name, state.lives);
            return if state.lives < 0 {
                ContactOutcome::GameOver
            } else {
                ContactOutcome::LifeLost
            };
        }
    }
    ContactOutcome::Continue
}

/// Whether the board has been cleared. The engine turns this into the Win
/// transition exactly once, since Win stops the simulation.
pub fn board_cleared(state: &GameState, pellets: &PelletField) -> bool {
    state.phase == Phase::Playing && pellets.remaining() == 0
}
