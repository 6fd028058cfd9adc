//! # Chomp
//!
//! A maze-chase arcade simulation core: four pursuing ghosts with
//! personality-driven targeting, a pellet-filled procedural maze, and a
//! frame-driven lifecycle state machine.
//!
//! ## Architecture Overview
//!
//! Chomp is a pure simulation library. Rendering, input devices, and the
//! surrounding application shell are external collaborators; the crate is
//! organized around a handful of concepts:
//!
//! - **Engine**: the owned simulation object — one `update(dt)` per frame,
//!   a read-only snapshot accessor for renderers
//! - **Maze & Pellets**: static tile classification and the collectible
//!   layout derived from it
//! - **Movement Engine**: continuous-position, delta-time movement with
//!   tile-center turning and tunnel wrapping
//! - **Ghost AI**: a five-mode state machine with per-personality targeting
//! - **Lifecycle**: Start/Playing/Paused/GameOver/Win orchestration with
//!   deadline-based timers
//!
//! All timing is delta-time based; nothing in the simulation depends on the
//! frame rate. Input arrives as [`Intent`] values queued between frames and
//! applied at the start of the next update.
//!
//! ## Example
//!
//! ```
//! use chomp::{Direction, Engine, Intent, MemoryStore, Phase};
//!
//! let mut engine = Engine::new(MemoryStore::default());
//! assert_eq!(engine.snapshot().phase, Phase::Start);
//!
//! // The first directional intent starts the game and queues the turn.
//! engine.queue_intent(Intent::Turn(Direction::Left));
//! engine.update(1.0 / 60.0);
//! assert_eq!(engine.snapshot().phase, Phase::Playing);
//! ```

pub mod game;
pub mod generation;
pub mod input;
pub mod persistence;

// Explicit re-exports for the commonly used public surface.
pub use game::{
    // From engine
    Engine,
    Snapshot,
    // From entities
    EntityCore,
    Ghost,
    Mode,
    Personality,
    Player,
    // From maze
    Maze,
    Mover,
    Pellet,
    PelletField,
    Tile,
    // From state
    GameState,
    PatrolPhase,
    Phase,
    // From mod
    Direction,
    PixelPos,
    TilePos,
};
pub use input::Intent;
pub use persistence::{HighScoreStore, JsonFileStore, MemoryStore};

/// Core error type for the Chomp simulation crate.
#[derive(thiserror::Error, Debug)]
pub enum ChompError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Simulation state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Chomp codebase.
pub type ChompResult<T> = Result<T, ChompError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation configuration constants.
///
/// Every tunable in the simulation lives here. Distances are pixels unless
/// the name says tiles; durations are seconds of simulation time.
pub mod config {
    /// Maze width in tiles
    pub const COLS: i32 = 19;

    /// Maze height in tiles
    pub const ROWS: i32 = 21;

    /// Side length of one tile in pixels
    pub const TILE_SIZE: f32 = 16.0;

    /// Distance from a tile center within which an entity counts as centered
    pub const ALIGN_EPSILON: f32 = 1.2;

    /// Player movement speed in pixels per second
    pub const PLAYER_SPEED: f32 = 60.0;

    /// Ghost movement speed in Scatter/Chase/Leaving, pixels per second
    pub const GHOST_SPEED: f32 = 56.0;

    /// Ghost movement speed while Frightened, pixels per second
    pub const FRIGHT_SPEED: f32 = 36.0;

    /// Ghost movement speed while Eaten, pixels per second
    pub const EATEN_SPEED: f32 = 90.0;

    /// Collision radius of a single entity; a contact triggers when two
    /// entities are closer than the sum of their radii (0.6 tiles total)
    pub const ENTITY_RADIUS: f32 = 4.8;

    /// Duration of one Scatter leg of the patrol cycle
    pub const SCATTER_SECS: f64 = 7.0;

    /// Duration of one Chase leg of the patrol cycle
    pub const CHASE_SECS: f64 = 20.0;

    /// Duration of the Frightened window after a power pellet
    pub const FRIGHT_SECS: f64 = 6.0;

    /// Minimum time between two life losses
    pub const DEATH_COOLDOWN_SECS: f64 = 1.0;

    /// Ceiling applied to `dt` to absorb stalls between frames
    pub const MAX_FRAME_SECS: f32 = 0.1;

    /// Score for a regular pellet
    pub const DOT_SCORE: u32 = 10;

    /// Score for a power pellet
    pub const POWER_SCORE: u32 = 50;

    /// Base score for the first ghost eaten in a Frightened window;
    /// doubles for each subsequent ghost in the chain
    pub const GHOST_SCORE_BASE: u32 = 200;

    /// Maximum length of the ghost-eat chain
    pub const EAT_CHAIN_CAP: u8 = 4;

    /// Tiles of lead the Ambush personality aims ahead of the player
    pub const AMBUSH_LEAD_TILES: i32 = 4;

    /// Tile distance at which the Conditional personality switches from
    /// pursuing the player to retreating toward its home corner
    pub const CONDITIONAL_RANGE_TILES: f32 = 8.0;

    /// Proximity (pixels) at which an Eaten ghost counts as having reached
    /// the revival point, and a Leaving ghost the rendezvous
    pub const ARRIVAL_RADIUS: f32 = 2.0;

    /// Starting number of spare lives
    pub const STARTING_LIVES: i32 = 3;
}
