//! Hex board geometry with axial coordinates

use crate::tile::{Player, Tile};
use serde::{Deserialize, Serialize};

/// Board radius (distance from center to edge)
pub const BOARD_RADIUS: i8 = 4;

/// Width of the dense rhombus grid enclosing the hexagon
const GRID_WIDTH: usize = (2 * BOARD_RADIUS as usize) + 1;

/// Number of slots in the dense grid (corner slots stay permanently empty)
pub(crate) const CELL_COUNT: usize = GRID_WIDTH * GRID_WIDTH;

/// One of the six sides of a hex cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    NorthEast = 0,
    East = 1,
    SouthEast = 2,
    SouthWest = 3,
    West = 4,
    NorthWest = 5,
}

impl Side {
    pub const ALL: [Side; 6] = [
        Side::NorthEast,
        Side::East,
        Side::SouthEast,
        Side::SouthWest,
        Side::West,
        Side::NorthWest,
    ];

    /// Axial delta vectors (dq, dr), indexed like [`Side::ALL`]
    const DELTAS: [(i8, i8); 6] = [
        (1, -1),  // NE
        (1, 0),   // E
        (0, 1),   // SE
        (-1, 1),  // SW
        (-1, 0),  // W
        (0, -1),  // NW
    ];

    /// The unique opposite side (NE<->SW, E<->W, SE<->NW)
    pub fn opposite(self) -> Side {
        Side::ALL[(self as usize + 3) % 6]
    }

    /// Axial coordinate delta for this side
    pub fn delta(self) -> (i8, i8) {
        Side::DELTAS[self as usize]
    }

    /// Bit for this side in a tile's connection mask
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Short lowercase name used by move notation
    pub fn abbrev(self) -> &'static str {
        match self {
            Side::NorthEast => "ne",
            Side::East => "e",
            Side::SouthEast => "se",
            Side::SouthWest => "sw",
            Side::West => "w",
            Side::NorthWest => "nw",
        }
    }

    /// Parse a short side name as produced by [`Side::abbrev`]
    pub fn from_abbrev(s: &str) -> Option<Side> {
        Side::ALL.into_iter().find(|side| side.abbrev() == s)
    }
}

/// Axial hex coordinates
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Check if this hex is on the board
    pub fn is_valid(&self) -> bool {
        self.q.abs() <= BOARD_RADIUS
            && self.r.abs() <= BOARD_RADIUS
            && (self.q + self.r).abs() <= BOARD_RADIUS
    }

    /// Neighboring hex across the given side (may be off-board)
    pub fn neighbor(&self, side: Side) -> Hex {
        let (dq, dr) = side.delta();
        Hex::new(self.q + dq, self.r + dr)
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// Dense grid slot for a hex; only call with valid hexes
pub(crate) fn cell_index(hex: Hex) -> usize {
    debug_assert!(hex.is_valid(), "cell_index on off-board hex {hex}");
    let row = (hex.r + BOARD_RADIUS) as usize;
    let col = (hex.q + BOARD_RADIUS) as usize;
    row * GRID_WIDTH + col
}

/// Inverse of [`cell_index`]; the result may be an off-board rhombus corner
pub(crate) fn hex_at(index: usize) -> Hex {
    Hex::new(
        (index % GRID_WIDTH) as i8 - BOARD_RADIUS,
        (index / GRID_WIDTH) as i8 - BOARD_RADIUS,
    )
}

/// Fixed board: one tile slot per cell, zero = empty
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Tile; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Tile::EMPTY; CELL_COUNT],
        }
    }

    /// Tile at a cell (empty sentinel for vacant cells)
    pub fn get(&self, hex: Hex) -> Tile {
        self.cells[cell_index(hex)]
    }

    pub fn set(&mut self, hex: Hex, tile: Tile) {
        self.cells[cell_index(hex)] = tile;
    }

    /// Neighbor across a side, or None when off the board
    pub fn neighbor(&self, hex: Hex, side: Side) -> Option<Hex> {
        let n = hex.neighbor(side);
        n.is_valid().then_some(n)
    }

    /// Iterate every on-board cell
    pub fn cells(&self) -> impl Iterator<Item = Hex> {
        (0..CELL_COUNT).map(hex_at).filter(Hex::is_valid)
    }

    /// Iterate occupied cells with their tiles
    pub fn occupied(&self) -> impl Iterator<Item = (Hex, Tile)> + '_ {
        self.cells()
            .map(|h| (h, self.get(h)))
            .filter(|(_, t)| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.occupied().next().is_none()
    }

    /// Number of cells currently controlled by a player
    pub fn count_controlled(&self, player: Player) -> usize {
        self.occupied()
            .filter(|(_, t)| t.controller() == player)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
