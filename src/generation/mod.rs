//! # Generation Module
//!
//! The deterministic procedural layout: one fixed maze, built the same way
//! every time, plus the pellet field derived from it.
//!
//! The layout is a procedural constant rather than data: border walls,
//! interior barrier rows pierced by vertical corridor columns (with two gap
//! rows left fully open), a rectangular ghost house with a single gate, and
//! two tunnel openings on the border at the house row. Everything the AI
//! navigates by — gate, revival point, rendezvous, spawn tiles, home
//! corners — is derived here from the carved layout, not hard-coded at the
//! call sites.

use crate::config::{COLS, ROWS};
use crate::game::{Maze, Pellet, PelletField, Tile, TilePos};

/// Ghost-house rectangle, inclusive bounds.
const HOUSE_X0: i32 = 6;
const HOUSE_X1: i32 = 12;
const HOUSE_Y0: i32 = 9;
const HOUSE_Y1: i32 = 11;

/// Interior barrier rows are carved every third row starting here.
const BARRIER_STEP: i32 = 3;

/// Rows exempted from barrier carving so two full-width corridors survive.
const GAP_ROWS: [i32; 2] = [6, 15];

/// Spacing of the vertical corridor columns that pierce each barrier row.
const CORRIDOR_STEP: i32 = 3;

/// Builds the standard maze.
///
/// Deterministic: two calls always produce identical grids.
pub fn build_maze() -> Maze {
    let mut tiles = vec![Tile::Path; (COLS * ROWS) as usize];
    let idx = |x: i32, y: i32| (y * COLS + x) as usize;

    // Interior barrier rows, pierced at the corridor columns.
    let mut y = BARRIER_STEP;
    while y < ROWS - 2 {
        let in_house_band = (HOUSE_Y0..=HOUSE_Y1).contains(&y);
        if !GAP_ROWS.contains(&y) && !in_house_band {
            for x in 1..COLS - 1 {
                if x % CORRIDOR_STEP != 0 {
                    tiles[idx(x, y)] = Tile::Wall;
                }
            }
        }
        y += BARRIER_STEP;
    }

    // Ghost house: walled perimeter, open interior, one gate at top-center.
    for y in HOUSE_Y0..=HOUSE_Y1 {
        for x in HOUSE_X0..=HOUSE_X1 {
            let on_perimeter = y == HOUSE_Y0 || y == HOUSE_Y1 || x == HOUSE_X0 || x == HOUSE_X1;
            tiles[idx(x, y)] = if on_perimeter { Tile::Wall } else { Tile::House };
        }
    }
    let gate = TilePos::new((HOUSE_X0 + HOUSE_X1) / 2, HOUSE_Y0);
    tiles[idx(gate.x, gate.y)] = Tile::Gate;

    // Border walls, then the two tunnel openings at the house row.
    for x in 0..COLS {
        tiles[idx(x, 0)] = Tile::Wall;
        tiles[idx(x, ROWS - 1)] = Tile::Wall;
    }
    for y in 0..ROWS {
        tiles[idx(0, y)] = Tile::Wall;
        tiles[idx(COLS - 1, y)] = Tile::Wall;
    }
    let tunnel_row = (HOUSE_Y0 + HOUSE_Y1) / 2;
    tiles[idx(0, tunnel_row)] = Tile::Path;
    tiles[idx(COLS - 1, tunnel_row)] = Tile::Path;

    let revival = TilePos::new(gate.x, tunnel_row);
    let rendezvous = TilePos::new(gate.x, HOUSE_Y0 - 1);
    let player_start = TilePos::new(gate.x, HOUSE_Y1 + 3);
    let ghost_starts = [
        TilePos::new(HOUSE_X0 + 1, tunnel_row),
        TilePos::new(HOUSE_X0 + 2, tunnel_row),
        TilePos::new(HOUSE_X1 - 2, tunnel_row),
        TilePos::new(HOUSE_X1 - 1, tunnel_row),
    ];
    // Home corners in personality order: Direct, Ambush, Conditional,
    // Default. Each sits on the power-pellet tile nearest that corner.
    let home_corners = [
        TilePos::new(COLS - 2, 1),
        TilePos::new(1, 1),
        TilePos::new(1, ROWS - 2),
        TilePos::new(COLS - 2, ROWS - 2),
    ];

    Maze::from_parts(
        COLS,
        ROWS,
        tiles,
        tunnel_row,
        gate,
        revival,
        rendezvous,
        player_start,
        ghost_starts,
        home_corners,
    )
}

/// Seeds the pellet field for a freshly built maze.
///
/// Every `Path` tile gets a dot, the four tiles nearest the outer corners
/// get power pellets, and tiles inside or adjoining the ghost house stay
/// empty.
pub fn seed_pellets(maze: &Maze) -> PelletField {
    let mut cells = vec![Pellet::None; (maze.cols * maze.rows) as usize];
    for y in 0..maze.rows {
        for x in 0..maze.cols {
            let pos = TilePos::new(x, y);
            if maze.tile(pos) == Some(Tile::Path) && !adjoins_house(pos) {
                cells[(y * maze.cols + x) as usize] = Pellet::Dot;
            }
        }
    }
    for corner in [
        TilePos::new(1, 1),
        TilePos::new(maze.cols - 2, 1),
        TilePos::new(1, maze.rows - 2),
        TilePos::new(maze.cols - 2, maze.rows - 2),
    ] {
        debug_assert_eq!(maze.tile(corner), Some(Tile::Path));
        cells[(corner.y * maze.cols + corner.x) as usize] = Pellet::Power;
    }
    PelletField::from_cells(maze.cols, maze.rows, cells)
}

/// Whether a tile is inside the ghost house rectangle or within one tile
/// of it. Such tiles never carry pellets.
fn adjoins_house(pos: TilePos) -> bool {
    pos.x >= HOUSE_X0 - 1
        && pos.x <= HOUSE_X1 + 1
        && pos.y >= HOUSE_Y0 - 1
        && pos.y <= HOUSE_Y1 + 1
}
