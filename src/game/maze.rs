//! # Maze Module
//!
//! Static tile classification and the pellet layout derived from it.
//!
//! The maze is built once per game by the [`crate::generation`] module and
//! never mutated afterwards; the pellet field is the only part of the board
//! that changes during play.

use crate::config;
use crate::game::{Direction, Mode, TilePos};
use serde::{Deserialize, Serialize};

/// Classification of one maze grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Open corridor; holds pellets
    Path,
    /// Solid wall, never passable
    Wall,
    /// Ghost-house door; passable only for ghosts entering or exiting
    Gate,
    /// Ghost-house interior
    House,
}

/// Who is asking for passage. Gate passability depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mover {
    Player,
    Ghost(Mode),
}

/// The static maze grid plus the fixed coordinates the AI navigates by.
///
/// All special coordinates (gate, revival point, rendezvous, starts) are
/// derived by the generator from the layout it carves, so they stay
/// consistent if the layout constants ever change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    pub cols: i32,
    pub rows: i32,
    /// Row-major tile storage, `rows * cols` entries
    tiles: Vec<Tile>,
    /// The row carrying the two border tunnel openings
    pub tunnel_row: i32,
    /// The single gate cell in the ghost-house perimeter
    pub gate: TilePos,
    /// House-interior point Eaten ghosts travel to before reviving
    pub revival: TilePos,
    /// Point just above the house that Leaving ghosts exit through
    pub rendezvous: TilePos,
    /// Fixed player spawn tile
    pub player_start: TilePos,
    /// Fixed ghost spawn tiles inside the house
    pub ghost_starts: [TilePos; 4],
    /// Scatter-mode home corner per ghost
    pub home_corners: [TilePos; 4],
}

impl Maze {
    /// Builds the standard layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use chomp::{Maze, Mover, Tile};
    ///
    /// let maze = Maze::standard();
    /// assert_eq!(maze.tile(maze.gate), Some(Tile::Gate));
    /// assert!(!maze.passable(maze.gate, Mover::Player));
    /// ```
    pub fn standard() -> Self {
        crate::generation::build_maze()
    }

    /// Creates a maze from prebuilt parts. Used by the generator.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        cols: i32,
        rows: i32,
        tiles: Vec<Tile>,
        tunnel_row: i32,
        gate: TilePos,
        revival: TilePos,
        rendezvous: TilePos,
        player_start: TilePos,
        ghost_starts: [TilePos; 4],
        home_corners: [TilePos; 4],
    ) -> Self {
        debug_assert_eq!(tiles.len(), (cols * rows) as usize);
        Self {
            cols,
            rows,
            tiles,
            tunnel_row,
            gate,
            revival,
            rendezvous,
            player_start,
            ghost_starts,
            home_corners,
        }
    }

    /// Whether a tile coordinate lies inside the grid.
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// The tile at `pos`, or `None` out of bounds.
    pub fn tile(&self, pos: TilePos) -> Option<Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[(pos.y * self.cols + pos.x) as usize])
    }

    /// Whether `mover` may occupy `pos`.
    ///
    /// Walls are never passable, the gate only for ghosts in Eaten or
    /// Leaving mode, everything else always. Out-of-bounds coordinates are
    /// not passable rather than an error; this is queried every frame by
    /// every entity and must stay pure.
    pub fn passable(&self, pos: TilePos, mover: Mover) -> bool {
        match self.tile(pos) {
            None | Some(Tile::Wall) => false,
            Some(Tile::Gate) => matches!(mover, Mover::Ghost(Mode::Eaten | Mode::Leaving)),
            Some(Tile::Path) | Some(Tile::House) => true,
        }
    }

    /// The tile one step from `pos` in `dir`, wrapping horizontally on the
    /// tunnel row only.
    pub fn neighbor(&self, pos: TilePos, dir: Direction) -> TilePos {
        let (dx, dy) = dir.delta();
        let mut next = TilePos::new(pos.x + dx, pos.y + dy);
        if next.y == self.tunnel_row {
            next.x = next.x.rem_euclid(self.cols);
        }
        next
    }

    /// Maze width in pixels; positions on the tunnel row are cyclic
    /// modulo this value.
    pub fn width_px(&self) -> f32 {
        self.cols as f32 * config::TILE_SIZE
    }
}

/// Contents of one pellet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pellet {
    None,
    Dot,
    Power,
}

/// The consumable pellet layer, derived from the maze.
///
/// Invariant: `remaining()` always equals the number of cells that are not
/// [`Pellet::None`]. [`PelletField::take`] is the only mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PelletField {
    cols: i32,
    rows: i32,
    cells: Vec<Pellet>,
    remaining: u32,
}

impl PelletField {
    /// Creates a field from prebuilt cells. Used by the generator.
    pub(crate) fn from_cells(cols: i32, rows: i32, cells: Vec<Pellet>) -> Self {
        debug_assert_eq!(cells.len(), (cols * rows) as usize);
        let remaining = cells.iter().filter(|&&c| c != Pellet::None).count() as u32;
        Self {
            cols,
            rows,
            cells,
            remaining,
        }
    }

    /// The pellet at `pos`; out-of-bounds reads as empty.
    pub fn get(&self, pos: TilePos) -> Pellet {
        if pos.x < 0 || pos.x >= self.cols || pos.y < 0 || pos.y >= self.rows {
            return Pellet::None;
        }
        self.cells[(pos.y * self.cols + pos.x) as usize]
    }

    /// Removes and returns the pellet at `pos`, keeping the count in sync.
    pub fn take(&mut self, pos: TilePos) -> Pellet {
        if pos.x < 0 || pos.x >= self.cols || pos.y < 0 || pos.y >= self.rows {
            return Pellet::None;
        }
        let idx = (pos.y * self.cols + pos.x) as usize;
        let taken = self.cells[idx];
        if taken != Pellet::None {
            self.cells[idx] = Pellet::None;
            self.remaining -= 1;
        }
        taken
    }

    /// Number of pellets (regular and power) still on the board.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Recounts non-empty cells. The invariant check used by tests.
    pub fn count_nonempty(&self) -> u32 {
        self.cells.iter().filter(|&&c| c != Pellet::None).count() as u32
    }
}
