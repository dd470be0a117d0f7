//! Legal placement generation
//!
//! A placement is legal when the cell is a candidate (forced adjacency to
//! the opponent, or the whole-section exception), every edge matches its
//! neighbor, and resolving it would not oscillate. The oscillation filter
//! probes a scratch copy of the position through the same resolution code
//! that will later apply the move, so the two can never disagree.

use crate::board::{Board, Hex, Side};
use crate::game::Hand;
use crate::resolve::Position;
use crate::tile::{Player, Tile};
use rustc_hash::FxHashSet;

/// All legal placements for the mover, given the tiles left in their hand
pub fn regenerate(position: &Position, hand: &Hand, mover: Player) -> FxHashSet<(Hex, Tile)> {
    let board = position.board();
    let mut legal = FxHashSet::default();
    for cell in candidate_cells(position, mover) {
        for (_, tile) in hand.available() {
            debug_assert_eq!(tile.controller(), mover, "foreign tile in hand");
            if !edges_match(board, cell, tile) {
                continue;
            }
            if !placement_resolves(position, cell, tile, mover) {
                continue;
            }
            legal.insert((cell, tile));
        }
    }
    tracing::trace!(mover = ?mover, count = legal.len(), "regenerated legal placements");
    legal
}

/// Empty cells where the mover may place at all: adjacent to an opponent
/// tile on any side, or a liberty of one of the mover's whole-section
/// (extendable) groups. On an empty board every cell qualifies.
fn candidate_cells(position: &Position, mover: Player) -> Vec<Hex> {
    let board = position.board();
    if board.is_empty() {
        return board.cells().collect();
    }

    let mut whole_section: FxHashSet<Hex> = FxHashSet::default();
    for group in position.live_groups(mover) {
        if group.is_extendable() {
            whole_section.extend(group.liberties());
        }
    }

    board
        .cells()
        .filter(|&cell| board.get(cell).is_empty())
        .filter(|&cell| {
            whole_section.contains(&cell) || touches_opponent(board, cell, mover)
        })
        .collect()
}

fn touches_opponent(board: &Board, cell: Hex, mover: Player) -> bool {
    Side::ALL.into_iter().any(|side| {
        board
            .neighbor(cell, side)
            .map(|n| {
                let t = board.get(n);
                !t.is_empty() && t.controller() == mover.opponent()
            })
            .unwrap_or(false)
    })
}

/// Per-side matching: connected edges face connected edges, disconnected
/// face disconnected; the board edge is permanently disconnected; empty
/// neighbors are unconstrained.
pub fn edges_match(board: &Board, cell: Hex, tile: Tile) -> bool {
    for side in Side::ALL {
        match board.neighbor(cell, side) {
            None => {
                if tile.is_connected(side) {
                    return false;
                }
            }
            Some(n) => {
                let neighbor_tile = board.get(n);
                if !neighbor_tile.is_empty()
                    && neighbor_tile.is_connected(side.opposite()) != tile.is_connected(side)
                {
                    return false;
                }
            }
        }
    }
    true
}

fn placement_resolves(position: &Position, cell: Hex, tile: Tile, mover: Player) -> bool {
    if keeps_a_liberty(position, cell, tile, mover) {
        return true;
    }
    position.clone().place(cell, tile).is_ok()
}

/// Cheap sufficient condition: the placed structure keeps a liberty, so no
/// resolution path can strand it. Anything else goes through the scratch
/// probe.
fn keeps_a_liberty(position: &Position, cell: Hex, tile: Tile, mover: Player) -> bool {
    let board = position.board();
    for side in Side::ALL {
        if !tile.is_connected(side) {
            continue;
        }
        let Some(n) = board.neighbor(cell, side) else {
            continue;
        };
        let neighbor_tile = board.get(n);
        if neighbor_tile.is_empty() {
            return true;
        }
        if neighbor_tile.controller() == mover {
            let group = position.group_at(n).expect("stale group index entry");
            if group.has_liberty_other_than(cell) {
                return true;
            }
        }
    }
    false
}
