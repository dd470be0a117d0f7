//! Group records and the per-player fixed-capacity arena

use crate::board::{cell_index, hex_at, Hex, CELL_COUNT};
use crate::tile::Player;

/// Per-cell status from one group's point of view.
///
/// Merging two groups takes the per-cell maximum: Member dominates, and
/// Liberty/Foe never conflict because a cell cannot be both empty and
/// enemy-occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellTag {
    Empty = 0,
    /// Empty cell reachable through a member's connected side
    Liberty = 1,
    /// Opponent-controlled cell reachable through a member's connected side
    Foe = 2,
    /// Cell occupied by this group
    Member = 3,
}

/// A connected structure of same-controller tiles, stored as a status tag
/// per board cell plus the whole-section flag.
#[derive(Clone, Debug)]
pub struct Group {
    tags: [CellTag; CELL_COUNT],
    extendable: bool,
}

impl Group {
    pub fn new() -> Self {
        Self {
            tags: [CellTag::Empty; CELL_COUNT],
            extendable: true,
        }
    }

    pub fn tag(&self, hex: Hex) -> CellTag {
        self.tags[cell_index(hex)]
    }

    pub fn set_tag(&mut self, hex: Hex, tag: CellTag) {
        self.tags[cell_index(hex)] = tag;
    }

    /// Union another group's tag set into this one
    pub fn absorb(&mut self, other: &Group) {
        for i in 0..CELL_COUNT {
            self.tags[i] = self.tags[i].max(other.tags[i]);
        }
    }

    fn cells_with(&self, tag: CellTag) -> impl Iterator<Item = Hex> + '_ {
        self.tags
            .iter()
            .enumerate()
            .filter(move |(_, &t)| t == tag)
            .map(|(i, _)| hex_at(i))
    }

    pub fn members(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells_with(CellTag::Member)
    }

    pub fn liberties(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells_with(CellTag::Liberty)
    }

    pub fn foes(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells_with(CellTag::Foe)
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties().count()
    }

    pub fn member_count(&self) -> usize {
        self.members().count()
    }

    pub fn has_liberty_other_than(&self, hex: Hex) -> bool {
        self.liberties().any(|l| l != hex)
    }

    /// True when the group touches no opponent anywhere: it is an entire
    /// isolated structure, not part of one pressed against the enemy.
    pub fn is_extendable(&self) -> bool {
        self.extendable
    }

    pub fn recompute_extendable(&mut self) {
        let extendable = self.foes().next().is_none();
        self.extendable = extendable;
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact reference to an arena slot. The all-zero value is the reserved
/// invalid-and-ownerless handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupHandle {
    owner: Player,
    index: u8,
    valid: bool,
}

impl GroupHandle {
    pub const NONE: GroupHandle = GroupHandle {
        owner: Player::White,
        index: 0,
        valid: false,
    };

    fn new(owner: Player, index: u8) -> Self {
        Self {
            owner,
            index,
            valid: true,
        }
    }

    pub fn is_valid(self) -> bool {
        self.valid
    }

    pub fn owner(self) -> Player {
        self.owner
    }
}

/// Fixed-capacity group store for one player.
///
/// Capacity equals the player's hand size, and slots are never reused within
/// a game: total placements cannot exceed the hand, so the monotone cursor
/// never overflows. Removal only marks a slot dead, which keeps every old
/// handle detectably stale.
#[derive(Clone, Debug)]
pub struct GroupArena {
    owner: Player,
    slots: Vec<Option<Group>>,
    capacity: usize,
}

impl GroupArena {
    pub fn new(owner: Player, capacity: usize) -> Self {
        Self {
            owner,
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Store a group, returning its handle. Exhaustion means the hand-size
    /// invariant was broken somewhere upstream.
    pub fn insert(&mut self, group: Group) -> GroupHandle {
        if self.slots.len() >= self.capacity {
            panic!("group arena for {:?} exhausted (capacity {})", self.owner, self.capacity);
        }
        let index = self.slots.len() as u8;
        self.slots.push(Some(group));
        GroupHandle::new(self.owner, index)
    }

    /// None for an invalid handle, a wrong-owner handle, or a dead slot
    pub fn get(&self, handle: GroupHandle) -> Option<&Group> {
        if !handle.valid || handle.owner != self.owner {
            return None;
        }
        self.slots.get(handle.index as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, handle: GroupHandle) -> Option<&mut Group> {
        if !handle.valid || handle.owner != self.owner {
            return None;
        }
        self.slots.get_mut(handle.index as usize)?.as_mut()
    }

    /// Mark the slot dead and hand back the group's final state
    pub fn remove(&mut self, handle: GroupHandle) -> Option<Group> {
        if !handle.valid || handle.owner != self.owner {
            return None;
        }
        self.slots.get_mut(handle.index as usize)?.take()
    }

    /// Iterate live groups with their handles
    pub fn live(&self) -> impl Iterator<Item = (GroupHandle, &Group)> {
        let owner = self.owner;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| {
                slot.as_ref().map(|g| (GroupHandle::new(owner, i as u8), g))
            })
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
