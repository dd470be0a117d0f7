//! Group resolution: merges, captures, and self-captures
//!
//! [`Position`] owns the board, both group arenas, and the cell-to-group
//! index, and keeps all three exactly consistent after every placement.

use crate::board::{cell_index, Board, Hex, Side, CELL_COUNT};
use crate::group::{CellTag, Group, GroupArena, GroupHandle};
use crate::tile::{Player, Tile};

/// What a placement did to the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementKind {
    /// No controller changed
    Quiet,
    /// At least one enemy group flipped to the mover
    Capture,
    /// The mover's own structure flipped to the opponent
    SelfCapture,
}

/// Report of a resolved placement, for the caller and for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub cell: Hex,
    pub kind: PlacementKind,
    /// Cells whose controller changed, in flip order
    pub flipped: Vec<Hex>,
}

/// A placement ended in a structure with zero liberties under either
/// controller. The legal move generator filters these out, so seeing this
/// error on a certified move means an engine invariant was broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("placement at {cell} produces a structure with no liberties under either controller")]
pub struct Oscillation {
    pub cell: Hex,
}

/// Board plus derived group state, mutated one placement at a time
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    arenas: [GroupArena; 2],
    index: [GroupHandle; CELL_COUNT],
}

impl Position {
    /// Empty position; capacities are the players' hand sizes
    pub fn new(capacity: [usize; 2]) -> Self {
        Self {
            board: Board::new(),
            arenas: [
                GroupArena::new(Player::White, capacity[0]),
                GroupArena::new(Player::Black, capacity[1]),
            ],
            index: [GroupHandle::NONE; CELL_COUNT],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Handle of the group claiming this cell ([`GroupHandle::NONE`] if empty)
    pub fn handle_at(&self, hex: Hex) -> GroupHandle {
        self.index[cell_index(hex)]
    }

    /// Group claiming this cell, if any
    pub fn group_at(&self, hex: Hex) -> Option<&Group> {
        let handle = self.handle_at(hex);
        self.arenas[handle.owner().index()].get(handle)
    }

    pub fn live_groups(&self, player: Player) -> impl Iterator<Item = &Group> {
        self.arenas[player.index()].live().map(|(_, g)| g)
    }

    pub fn live_group_count(&self, player: Player) -> usize {
        self.arenas[player.index()].live_count()
    }

    /// Resolve a placement.
    ///
    /// Preconditions: the cell is empty and the tile edge-matches all its
    /// occupied and off-board neighbors (the legal move generator certifies
    /// both). On `Err` the position is left mid-resolution and must be
    /// discarded.
    pub fn place(&mut self, cell: Hex, tile: Tile) -> Result<Placement, Oscillation> {
        debug_assert!(self.board.get(cell).is_empty(), "placement target {cell} not empty");
        debug_assert!(!tile.is_empty());
        let mover = tile.controller();
        let opponent = mover.opponent();
        self.board.set(cell, tile);

        // Classify neighbors reachable through the tile's connected sides.
        let mut friendly: Vec<GroupHandle> = Vec::new();
        let mut enemy: Vec<GroupHandle> = Vec::new();
        let mut active = Group::new();
        active.set_tag(cell, CellTag::Member);
        for side in Side::ALL {
            if !tile.is_connected(side) {
                continue;
            }
            let Some(n) = self.board.neighbor(cell, side) else {
                continue;
            };
            let neighbor_tile = self.board.get(n);
            if neighbor_tile.is_empty() {
                active.set_tag(n, CellTag::Liberty);
            } else if neighbor_tile.controller() == mover {
                let handle = self.handle_at(n);
                if !friendly.contains(&handle) {
                    friendly.push(handle);
                }
            } else {
                active.set_tag(n, CellTag::Foe);
                let handle = self.handle_at(n);
                if !enemy.contains(&handle) {
                    enemy.push(handle);
                }
            }
        }
        tracing::trace!(
            cell = %cell,
            friendly = friendly.len(),
            enemy = enemy.len(),
            "classified placement neighbors"
        );

        // Union the friendly neighbor groups into the active group. The new
        // cell was a liberty of each of them; Member dominates on absorb.
        for &handle in &friendly {
            let group = self.arenas[mover.index()]
                .remove(handle)
                .expect("stale friendly group handle");
            active.absorb(&group);
        }

        // Adjacency is symmetric bookkeeping: the enemy groups lose the new
        // cell as a liberty and gain it as an enemy edge.
        for &handle in &enemy {
            let group = self.arenas[opponent.index()]
                .get_mut(handle)
                .expect("stale enemy group handle");
            group.set_tag(cell, CellTag::Foe);
            group.recompute_extendable();
        }

        // Capture every enemy group left without liberties.
        let mut flipped: Vec<Hex> = Vec::new();
        let mut captured_any = false;
        for &handle in &enemy {
            let starved = self.arenas[opponent.index()]
                .get(handle)
                .expect("stale enemy group handle")
                .liberty_count()
                == 0;
            if !starved {
                continue;
            }
            let group = self.arenas[opponent.index()]
                .remove(handle)
                .expect("stale enemy group handle");
            tracing::debug!(cell = %cell, members = group.member_count(), "capturing enemy group");
            for member in group.members() {
                let t = self.board.get(member);
                self.board.set(member, t.flip_controller());
                flipped.push(member);
            }
            active.absorb(&group);
            captured_any = true;
        }

        if captured_any {
            // A capture can connect the active group to friendly groups that
            // were only reachable through the captured structure: they show
            // up as enemy-edge tags now pointing at the mover's own tiles.
            loop {
                let reconnected = active
                    .foes()
                    .find(|&f| self.board.get(f).controller() == mover);
                let Some(f) = reconnected else {
                    break;
                };
                let handle = self.handle_at(f);
                let group = self.arenas[mover.index()]
                    .remove(handle)
                    .expect("stale reconnected group handle");
                active.absorb(&group);
            }
            // Captured tiles flip rather than vacate, so a capture creates no
            // new liberties; the merged structure can still end up starved.
            if active.liberty_count() == 0 {
                return Err(Oscillation { cell });
            }
            self.commit(mover, active);
            return Ok(Placement {
                cell,
                kind: PlacementKind::Capture,
                flipped,
            });
        }

        // Self-capture: the mover's structure starved itself and flips into
        // the opponent groups it touches.
        if active.liberty_count() == 0 {
            let mut targets: Vec<GroupHandle> = Vec::new();
            for f in active.foes() {
                let handle = self.handle_at(f);
                if !targets.contains(&handle) {
                    targets.push(handle);
                }
            }
            if targets.is_empty() {
                // Sealed by its own structure and the board edge: no
                // controller gives it a liberty.
                return Err(Oscillation { cell });
            }
            tracing::debug!(cell = %cell, members = active.member_count(), "self-capture");
            for member in active.members() {
                let t = self.board.get(member);
                self.board.set(member, t.flip_controller());
                flipped.push(member);
            }
            let mut merged = active;
            for &handle in &targets {
                let group = self.arenas[opponent.index()]
                    .remove(handle)
                    .expect("stale self-capture target handle");
                merged.absorb(&group);
            }
            if merged.liberty_count() == 0 {
                return Err(Oscillation { cell });
            }
            self.commit(opponent, merged);
            return Ok(Placement {
                cell,
                kind: PlacementKind::SelfCapture,
                flipped,
            });
        }

        self.commit(mover, active);
        Ok(Placement {
            cell,
            kind: PlacementKind::Quiet,
            flipped,
        })
    }

    /// Store the resolved group and point every member cell's index entry at
    /// its new handle.
    fn commit(&mut self, owner: Player, mut group: Group) -> GroupHandle {
        group.recompute_extendable();
        let members: Vec<Hex> = group.members().collect();
        let handle = self.arenas[owner.index()].insert(group);
        for member in members {
            self.index[cell_index(member)] = handle;
        }
        handle
    }

    /// Rebuild the full group partition from the board alone.
    ///
    /// Used when loading a snapshot, and by tests as the reference the
    /// incremental bookkeeping must stay isomorphic to.
    pub fn rebuild(board: &Board, capacity: [usize; 2]) -> Self {
        let mut position = Self::new(capacity);
        position.board = board.clone();
        for cell in board.cells() {
            let tile = board.get(cell);
            if tile.is_empty() || position.handle_at(cell).is_valid() {
                continue;
            }
            let controller = tile.controller();
            let mut group = Group::new();
            group.set_tag(cell, CellTag::Member);
            let mut queue = vec![cell];
            while let Some(c) = queue.pop() {
                let t = board.get(c);
                for side in Side::ALL {
                    if !t.is_connected(side) {
                        continue;
                    }
                    let Some(n) = board.neighbor(c, side) else {
                        continue;
                    };
                    let nt = board.get(n);
                    if nt.is_empty() {
                        group.set_tag(n, CellTag::Liberty);
                    } else if !nt.is_connected(side.opposite()) {
                        // adjacent but unlinked edge
                    } else if nt.controller() == controller {
                        if group.tag(n) != CellTag::Member {
                            group.set_tag(n, CellTag::Member);
                            queue.push(n);
                        }
                    } else {
                        group.set_tag(n, CellTag::Foe);
                    }
                }
            }
            position.commit(controller, group);
        }
        position
    }
}
