//! HEXILE Core - Game engine
//!
//! This crate provides the core game logic for HEXILE:
//! - Board geometry (hex grid with axial coordinates)
//! - Tile model with per-side connections and capture-by-flip control
//! - Group tracking with fixed-capacity per-player arenas
//! - Move resolution (merges, captures, self-captures)
//! - Legal move generation with the whole-section exception
//! - Game orchestration and snapshot persistence

pub mod board;
pub mod game;
pub mod group;
pub mod movegen;
pub mod resolve;
pub mod tile;

// Re-exports for convenient access
pub use board::{Board, Hex, Side, BOARD_RADIUS};
pub use game::{GameResult, GameState, Hand, Move, MoveError, PlayOutcome, Snapshot, TileId};
pub use group::{CellTag, Group, GroupArena, GroupHandle};
pub use movegen::{edges_match, regenerate};
pub use resolve::{Oscillation, Placement, PlacementKind, Position};
pub use tile::{connection_mask, format_connections, parse_connections, Player, Tile};
