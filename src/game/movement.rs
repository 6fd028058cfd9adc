//! # Movement Module
//!
//! Continuous-position, delta-time movement shared by the player and the
//! ghosts.
//!
//! Frames are advanced in sub-steps that stop exactly at tile centers, so
//! turning and AI decisions resolve at alignment no matter how large `dt`
//! is. Positions on the tunnel row are cyclic modulo the maze pixel width.

use crate::config;
use crate::game::{entities, Direction, EntityCore, Ghost, Maze, Mode, Mover, Player, TilePos};

/// Upper bound on center-to-center sub-steps per frame. A clamped frame
/// moves an entity at most a fraction of the maze, so this is never hit
/// by legal speeds.
const MAX_SUBSTEPS: u32 = 8;

/// Advances the player by one frame.
///
/// A queued reverse applies immediately, mid-tile. Any other queued turn
/// applies at the next tile center whose destination is passable. When the
/// tile ahead is impassable the player snaps to the center and halts until
/// a legal turn arrives.
pub fn advance_player(player: &mut Player, maze: &Maze, dt: f32) {
    if let Some(queued) = player.queued {
        if queued == player.core.dir.opposite() {
            player.core.dir = queued;
            player.queued = None;
        }
    }

    let mut budget = player.core.speed * dt;
    let mut moved = 0.0;
    for _ in 0..MAX_SUBSTEPS {
        if budget <= f32::EPSILON {
            break;
        }
        if player.core.is_centered() {
            player.core.snap_to_center();
            let tile = player.core.tile();
            if let Some(queued) = player.queued {
                if maze.passable(maze.neighbor(tile, queued), Mover::Player) {
                    player.core.dir = queued;
                    player.queued = None;
                }
            }
            if !maze.passable(maze.neighbor(tile, player.core.dir), Mover::Player) {
                break;
            }
        }
        let step_len = budget.min(distance_to_next_center(&player.core));
        step(&mut player.core, step_len, maze);
        moved += step_len;
        budget -= step_len;
    }

    player.anim_phase = (player.anim_phase + moved / config::TILE_SIZE).fract();
}

/// Advances a ghost by one frame, re-deciding its direction at every tile
/// center it reaches. `target` is the tile the ghost is steering toward
/// this frame.
pub fn advance_ghost(ghost: &mut Ghost, maze: &Maze, target: TilePos, dt: f32) {
    let mut budget = ghost.core.speed * dt;
    for _ in 0..MAX_SUBSTEPS {
        if budget <= f32::EPSILON {
            break;
        }
        if ghost.core.is_centered() {
            ghost.core.snap_to_center();
            let tile = ghost.core.tile();
            // House waypoints are reached exactly, never overshot, so the
            // arrival transition cannot be skipped by a large frame.
            if matches!(ghost.mode, Mode::Eaten | Mode::Leaving) && tile == target {
                break;
            }
            let dir = entities::choose_direction(
                maze,
                tile,
                ghost.core.dir,
                ghost.mode,
                ghost.dead,
                target,
            );
            ghost.core.dir = dir;
            if !maze.passable(maze.neighbor(tile, dir), Mover::Ghost(ghost.mode)) {
                // Fully boxed in; wait for a mode change to open a door.
                break;
            }
        }
        let step_len = budget.min(distance_to_next_center(&ghost.core));
        step(&mut ghost.core, step_len, maze);
        budget -= step_len;
    }
}

/// Distance along the current heading to the next tile center at or ahead
/// of the position. At a center this is a full tile.
fn distance_to_next_center(core: &EntityCore) -> f32 {
    let center = core.tile().center();
    let ahead = match core.dir {
        Direction::Right => center.x - core.pos.x,
        Direction::Left => core.pos.x - center.x,
        Direction::Down => center.y - core.pos.y,
        Direction::Up => core.pos.y - center.y,
    };
    if ahead > 0.01 {
        ahead
    } else {
        ahead + config::TILE_SIZE
    }
}

/// Moves the entity `dist` pixels along its heading, wrapping horizontally
/// across the maze seam. The wrap preserves the sub-pixel offset: position
/// is congruent modulo the maze width.
fn step(core: &mut EntityCore, dist: f32, maze: &Maze) {
    let (ux, uy) = core.dir.unit();
    core.pos.x += ux * dist;
    core.pos.y += uy * dist;
    let width = maze.width_px();
    if core.pos.x < 0.0 {
        core.pos.x += width;
    } else if core.pos.x >= width {
        core.pos.x -= width;
    }
}
