//! Tile model: per-side connections plus owner and controller bits

use crate::board::Side;
use serde::{Deserialize, Serialize};

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Bits 0-5 of a tile: one connection flag per side
pub const CONNECTION_MASK: u8 = 0x3F;

const OWNER_BIT: u8 = 1 << 6;
const CONTROLLER_BIT: u8 = 1 << 7;

/// A tile: six connection bits, an owner bit, and a controller bit.
///
/// The all-zero value is the "no tile" sentinel; the fully disconnected
/// pattern is excluded from play, so zero never collides with a White piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile(u8);

impl Tile {
    pub const EMPTY: Tile = Tile(0);

    /// Build a tile from a connection mask; owner and controller start equal.
    ///
    /// Panics on the disconnected pattern or on bits outside the mask.
    pub fn new(connections: u8, owner: Player) -> Tile {
        assert!(
            connections & CONNECTION_MASK != 0,
            "the fully disconnected tile is not playable"
        );
        assert_eq!(connections & !CONNECTION_MASK, 0, "stray bits in connection mask");
        let player_bits = match owner {
            Player::White => 0,
            Player::Black => OWNER_BIT | CONTROLLER_BIT,
        };
        Tile(connections | player_bits)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether this tile's edge on the given side is a connected edge
    pub fn is_connected(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }

    /// The six connection bits
    pub fn connections(self) -> u8 {
        self.0 & CONNECTION_MASK
    }

    /// Who originally placed the tile
    pub fn owner(self) -> Player {
        if self.0 & OWNER_BIT == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Who currently controls the tile (changes on capture)
    pub fn controller(self) -> Player {
        if self.0 & CONTROLLER_BIT == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Toggle the controller bit, preserving owner and connections
    pub fn flip_controller(self) -> Tile {
        debug_assert!(!self.is_empty(), "flipping the empty sentinel");
        Tile(self.0 ^ CONTROLLER_BIT)
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "Tile::EMPTY");
        }
        write!(f, "Tile({:?}[{}])", self.controller(), format_connections(self.connections()))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "empty");
        }
        let color = match self.controller() {
            Player::White => 'W',
            Player::Black => 'B',
        };
        write!(f, "{}[{}]", color, format_connections(self.connections()))
    }
}

/// Combine sides into a connection mask
pub fn connection_mask(sides: &[Side]) -> u8 {
    sides.iter().fold(0, |mask, side| mask | side.bit())
}

/// Dotted side list for a connection mask, e.g. "ne.e.sw"
pub fn format_connections(mask: u8) -> String {
    let names: Vec<&str> = Side::ALL
        .into_iter()
        .filter(|s| mask & s.bit() != 0)
        .map(|s| s.abbrev())
        .collect();
    names.join(".")
}

/// Parse a dotted side list back into a connection mask
pub fn parse_connections(text: &str) -> Option<u8> {
    let mut mask = 0u8;
    for part in text.split('.') {
        let side = Side::from_abbrev(part.trim())?;
        mask |= side.bit();
    }
    (mask != 0).then_some(mask)
}
