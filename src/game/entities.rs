//! # Entities Module
//!
//! The player, the four ghosts, and the ghost decision logic: mode state,
//! per-personality targeting, and the deterministic direction choice made
//! at every tile center.

use crate::config;
use crate::game::{Direction, Maze, Mover, PatrolPhase, PixelPos, TilePos};
use serde::{Deserialize, Serialize};

/// Behavior mode of a ghost.
///
/// Scatter and Chase are the two patrol behaviors toggled by the shared
/// cycle timer. Frightened is the post-power-pellet flee window. Eaten
/// ghosts travel back to the house revival point; Leaving ghosts travel
/// from the house to the rendezvous and then rejoin the patrol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
    Leaving,
}

impl Mode {
    /// Whether this is one of the two patrol behaviors.
    pub fn is_patrol(self) -> bool {
        matches!(self, Mode::Scatter | Mode::Chase)
    }

    /// Movement speed while in this mode, pixels per second.
    pub fn speed(self) -> f32 {
        match self {
            Mode::Frightened => config::FRIGHT_SPEED,
            Mode::Eaten => config::EATEN_SPEED,
            Mode::Scatter | Mode::Chase | Mode::Leaving => config::GHOST_SPEED,
        }
    }
}

/// Chase-mode targeting personality.
///
/// A closed set with one target computation per variant. `Default`
/// duplicates `Direct` on purpose; see the pinning test below before
/// changing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Personality {
    /// Targets the player's tile directly
    Direct,
    /// Targets four tiles ahead of the player's facing
    Ambush,
    /// Targets the player when far away, its home corner when close
    Conditional,
    /// Targets the player's tile, same as Direct
    Default,
}

impl Personality {
    /// All personalities in roster order.
    pub const ALL: [Personality; 4] = [
        Personality::Direct,
        Personality::Ambush,
        Personality::Conditional,
        Personality::Default,
    ];

    /// Display identity used by renderers.
    pub fn display_name(self) -> &'static str {
        match self {
            Personality::Direct => "Blinky",
            Personality::Ambush => "Pinky",
            Personality::Conditional => "Clyde",
            Personality::Default => "Inky",
        }
    }

    /// The tile this personality hunts while in Chase mode.
    ///
    /// `own_tile` is the ghost's current tile; only Conditional consults
    /// it. Targets may fall outside the maze; they are only compared by
    /// distance, never dereferenced.
    pub fn chase_target(
        self,
        own_tile: TilePos,
        player_tile: TilePos,
        player_dir: Direction,
        home_corner: TilePos,
    ) -> TilePos {
        match self {
            Personality::Direct => player_tile,
            Personality::Ambush => player_tile.offset(player_dir, config::AMBUSH_LEAD_TILES),
            Personality::Conditional => {
                if own_tile.distance(player_tile) >= config::CONDITIONAL_RANGE_TILES {
                    player_tile
                } else {
                    home_corner
                }
            }
            Personality::Default => player_tile,
        }
    }
}

/// Shared continuous-movement state for the player and ghosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCore {
    /// Continuous pixel position
    pub pos: PixelPos,
    /// Current heading
    pub dir: Direction,
    /// Speed in pixels per second
    pub speed: f32,
    /// Collision radius in pixels
    pub radius: f32,
}

impl EntityCore {
    /// Creates an entity centered on `tile`, heading `dir`.
    pub fn at_tile(tile: TilePos, dir: Direction, speed: f32) -> Self {
        Self {
            pos: tile.center(),
            dir,
            speed,
            radius: config::ENTITY_RADIUS,
        }
    }

    /// The tile currently containing this entity.
    pub fn tile(&self) -> TilePos {
        self.pos.tile()
    }

    /// Whether the entity is within the alignment epsilon of its tile's
    /// center. Turns and AI decisions resolve only here.
    pub fn is_centered(&self) -> bool {
        let c = self.tile().center();
        (self.pos.x - c.x).abs() <= config::ALIGN_EPSILON
            && (self.pos.y - c.y).abs() <= config::ALIGN_EPSILON
    }

    /// Snaps the position exactly onto the current tile's center.
    pub fn snap_to_center(&mut self) {
        self.pos = self.tile().center();
    }
}

/// The player-controlled entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub core: EntityCore,
    /// Turn intent applied at the next legal opportunity
    pub queued: Option<Direction>,
    /// Mouth-animation phase in [0, 1); cosmetic only
    pub anim_phase: f32,
}

impl Player {
    /// Spawns the player centered on `tile`, facing left.
    pub fn spawn(tile: TilePos) -> Self {
        Self {
            core: EntityCore::at_tile(tile, Direction::Left, config::PLAYER_SPEED),
            queued: None,
            anim_phase: 0.0,
        }
    }

    /// Records a turn intent. Applied by the movement engine.
    pub fn queue_turn(&mut self, dir: Direction) {
        self.queued = Some(dir);
    }
}

/// One pursuing ghost.
#[derive(Debug, Clone, Serialize)]
pub struct Ghost {
    pub core: EntityCore,
    pub personality: Personality,
    /// Display identity used by renderers
    pub name: &'static str,
    /// Scatter-mode destination
    pub home_corner: TilePos,
    pub mode: Mode,
    /// Set from the moment the ghost is eaten until it rejoins the
    /// patrol; a dead ghost neither kills nor can be eaten again
    pub dead: bool,
}

impl Ghost {
    /// Spawns a ghost in the house, in Leaving mode so it exits through
    /// the gate and joins the patrol at the rendezvous.
    pub fn spawn(personality: Personality, start: TilePos, home_corner: TilePos) -> Self {
        Self {
            core: EntityCore::at_tile(start, Direction::Up, config::GHOST_SPEED),
            personality,
            name: personality.display_name(),
            home_corner,
            mode: Mode::Leaving,
            dead: false,
        }
    }

    /// Applies a mode change, keeping the movement speed in sync.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("{} -> {:?}", self.name, mode);
        }
        self.mode = mode;
        self.core.speed = mode.speed();
    }

    /// Power-pellet reaction. Only ghosts on patrol can be frightened:
    /// frightening a ghost inside the house would seal the gate under it.
    pub fn frighten(&mut self) {
        if !self.dead && self.mode.is_patrol() {
            self.set_mode(Mode::Frightened);
        }
    }

    /// Fright-window expiry: frightened ghosts revert to the current
    /// patrol phase.
    pub fn calm_down(&mut self, patrol: PatrolPhase) {
        if self.mode == Mode::Frightened {
            self.set_mode(patrol.mode());
        }
    }

    /// Shared-cycle toggle: only ghosts already on patrol follow it.
    pub fn follow_patrol(&mut self, patrol: PatrolPhase) {
        if self.mode.is_patrol() {
            self.set_mode(patrol.mode());
        }
    }

    /// The tile this ghost is currently steering toward.
    pub fn target_tile(
        &self,
        maze: &Maze,
        player_tile: TilePos,
        player_dir: Direction,
    ) -> TilePos {
        match self.mode {
            Mode::Scatter => self.home_corner,
            Mode::Chase => self.personality.chase_target(
                self.core.tile(),
                player_tile,
                player_dir,
                self.home_corner,
            ),
            // Only used for the inverted (farthest) tie-break below.
            Mode::Frightened => player_tile,
            Mode::Eaten => maze.revival,
            Mode::Leaving => maze.rendezvous,
        }
    }
}

/// Picks a ghost's direction at a tile center.
///
/// Candidates are enumerated Up, Down, Left, Right; the exact reverse of
/// the current heading is excluded, impassable destinations are dropped,
/// and the remainder is ranked by Euclidean distance from the destination
/// tile to `target` — nearest wins, or farthest while frightened and not
/// dead. Ties keep the earlier candidate, making the choice fully
/// deterministic. With no candidate left the ghost reverses.
pub fn choose_direction(
    maze: &Maze,
    from: TilePos,
    current: Direction,
    mode: Mode,
    dead: bool,
    target: TilePos,
) -> Direction {
    let flee = mode == Mode::Frightened && !dead;
    let mut best: Option<(Direction, f32)> = None;
    for dir in Direction::ALL {
        if dir == current.opposite() {
            continue;
        }
        let dest = maze.neighbor(from, dir);
        if !maze.passable(dest, Mover::Ghost(mode)) {
            continue;
        }
        let score = dest.distance(target);
        let better = match best {
            None => true,
            Some((_, incumbent)) => {
                if flee {
                    score > incumbent
                } else {
                    score < incumbent
                }
            }
        };
        if better {
            best = Some((dir, score));
        }
    }
    best.map(|(dir, _)| dir).unwrap_or_else(|| current.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Maze;

    #[test]
    fn direct_personality_targets_player_tile() {
        let own = TilePos::new(10, 10);
        let player = TilePos::new(4, 7);
        let home = TilePos::new(17, 1);
        assert_eq!(
            Personality::Direct.chase_target(own, player, Direction::Up, home),
            player
        );
    }

    #[test]
    fn ambush_personality_leads_the_player() {
        let own = TilePos::new(10, 10);
        let player = TilePos::new(4, 7);
        let home = TilePos::new(1, 1);
        assert_eq!(
            Personality::Ambush.chase_target(own, player, Direction::Right, home),
            TilePos::new(8, 7)
        );
        assert_eq!(
            Personality::Ambush.chase_target(own, player, Direction::Up, home),
            TilePos::new(4, 3)
        );
    }

    #[test]
    fn conditional_personality_retreats_when_close() {
        let home = TilePos::new(1, 19);
        let player = TilePos::new(9, 14);
        let far_ghost = TilePos::new(17, 1);
        let near_ghost = TilePos::new(9, 12);
        assert_eq!(
            Personality::Conditional.chase_target(far_ghost, player, Direction::Left, home),
            player
        );
        assert_eq!(
            Personality::Conditional.chase_target(near_ghost, player, Direction::Left, home),
            home
        );
    }

    // Default tracks the player's tile exactly like Direct. The duplication
    // is pinned here so any divergence is a deliberate change.
    #[test]
    fn default_personality_duplicates_direct() {
        let home = TilePos::new(17, 19);
        for (gx, gy) in [(1, 1), (9, 12), (16, 5)] {
            let own = TilePos::new(gx, gy);
            for (px, py) in [(1, 1), (9, 14), (17, 19), (3, 10)] {
                let player = TilePos::new(px, py);
                for dir in Direction::ALL {
                    assert_eq!(
                        Personality::Default.chase_target(own, player, dir, home),
                        Personality::Direct.chase_target(own, player, dir, home)
                    );
                }
            }
        }
    }

    #[test]
    fn choose_direction_never_reverses_with_options_open() {
        let maze = Maze::standard();
        // Top-left corner pocket: up and left are walls, so the only legal
        // non-reverse options are down and right.
        let picked = choose_direction(
            &maze,
            TilePos::new(1, 1),
            Direction::Up,
            Mode::Chase,
            false,
            TilePos::new(1, 19),
        );
        assert_ne!(picked, Direction::Down);
        assert_eq!(picked, Direction::Right);
    }

    #[test]
    fn choose_direction_falls_back_to_reverse_in_dead_end() {
        let maze = Maze::standard();
        // The stub below the house wall: only the tile it was entered from
        // is passable.
        let stub = TilePos::new(6, 12);
        assert!(maze.passable(stub, Mover::Ghost(Mode::Chase)));
        let picked = choose_direction(
            &maze,
            stub,
            Direction::Up,
            Mode::Chase,
            false,
            TilePos::new(0, 0),
        );
        assert_eq!(picked, Direction::Down);
    }

    #[test]
    fn distance_ties_resolve_by_enumeration_order() {
        let maze = Maze::standard();
        // From (5, 5) heading right, both Down (5,6) and Right (6,5) are
        // one tile from the target (6,6); Down is enumerated first.
        let picked = choose_direction(
            &maze,
            TilePos::new(5, 5),
            Direction::Right,
            Mode::Chase,
            false,
            TilePos::new(6, 6),
        );
        assert_eq!(picked, Direction::Down);
    }

    #[test]
    fn frightened_ghost_picks_the_farthest_candidate() {
        let maze = Maze::standard();
        // Same junction as above: Up (5,4) is the farthest from (6,6).
        let picked = choose_direction(
            &maze,
            TilePos::new(5, 5),
            Direction::Right,
            Mode::Frightened,
            false,
            TilePos::new(6, 6),
        );
        assert_eq!(picked, Direction::Up);
    }

    #[test]
    fn frighten_only_affects_patrol_modes() {
        let maze = Maze::standard();
        let mut ghost = Ghost::spawn(
            Personality::Direct,
            maze.ghost_starts[0],
            maze.home_corners[0],
        );
        assert_eq!(ghost.mode, Mode::Leaving);
        ghost.frighten();
        assert_eq!(ghost.mode, Mode::Leaving);

        ghost.set_mode(Mode::Scatter);
        ghost.frighten();
        assert_eq!(ghost.mode, Mode::Frightened);
        assert_eq!(ghost.core.speed, config::FRIGHT_SPEED);

        ghost.dead = true;
        ghost.set_mode(Mode::Eaten);
        ghost.frighten();
        assert_eq!(ghost.mode, Mode::Eaten);
        assert_eq!(ghost.core.speed, config::EATEN_SPEED);
    }

    #[test]
    fn calm_down_reverts_to_current_patrol_phase() {
        let maze = Maze::standard();
        let mut ghost = Ghost::spawn(
            Personality::Ambush,
            maze.ghost_starts[1],
            maze.home_corners[1],
        );
        ghost.set_mode(Mode::Frightened);
        ghost.calm_down(PatrolPhase::Chase);
        assert_eq!(ghost.mode, Mode::Chase);

        // Eaten ghosts are unaffected by fright expiry.
        ghost.dead = true;
        ghost.set_mode(Mode::Eaten);
        ghost.calm_down(PatrolPhase::Scatter);
        assert_eq!(ghost.mode, Mode::Eaten);
    }

    #[test]
    fn eaten_and_leaving_target_the_house_waypoints() {
        let maze = Maze::standard();
        let mut ghost = Ghost::spawn(
            Personality::Conditional,
            maze.ghost_starts[2],
            maze.home_corners[2],
        );
        let player = TilePos::new(1, 1);

        ghost.set_mode(Mode::Eaten);
        assert_eq!(
            ghost.target_tile(&maze, player, Direction::Left),
            maze.revival
        );
        ghost.set_mode(Mode::Leaving);
        assert_eq!(
            ghost.target_tile(&maze, player, Direction::Left),
            maze.rendezvous
        );
        ghost.set_mode(Mode::Scatter);
        assert_eq!(
            ghost.target_tile(&maze, player, Direction::Left),
            maze.home_corners[2]
        );
    }
}
