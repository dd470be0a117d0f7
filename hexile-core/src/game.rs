//! Game state: turns, hands, passes, scoring, and snapshots

use crate::board::{Board, Hex};
use crate::movegen;
use crate::resolve::{Placement, Position};
use crate::tile::{Player, Tile, CONNECTION_MASK};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Index of a tile in its owner's hand
pub type TileId = u8;

/// A player's tile inventory. Tiles are withdrawn by id and never returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    tiles: Vec<Tile>,
    played: Vec<bool>,
}

impl Hand {
    /// One tile of every legal connection pattern
    pub fn standard(owner: Player) -> Self {
        let patterns: Vec<u8> = (1..=CONNECTION_MASK).collect();
        Self::new(&patterns, owner)
    }

    pub fn new(patterns: &[u8], owner: Player) -> Self {
        Self {
            tiles: patterns.iter().map(|&p| Tile::new(p, owner)).collect(),
            played: vec![false; patterns.len()],
        }
    }

    /// Total hand size, played tiles included; this bounds the owner's
    /// group arena
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.played.iter().filter(|&&p| !p).count()
    }

    /// Tile for an id, None when out of range or already played
    pub fn get(&self, id: TileId) -> Option<Tile> {
        let i = id as usize;
        (i < self.tiles.len() && !self.played[i]).then(|| self.tiles[i])
    }

    /// Remove a tile from the hand
    pub fn withdraw(&mut self, id: TileId) -> Option<Tile> {
        let tile = self.get(id)?;
        self.played[id as usize] = true;
        Some(tile)
    }

    /// Iterate unplayed tiles with their ids
    pub fn available(&self) -> impl Iterator<Item = (TileId, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, _)| !self.played[i])
            .map(|(i, &t)| (i as TileId, t))
    }
}

/// A move request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Pass,
    Place { cell: Hex, tile: TileId },
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

/// Declined moves: the request was invalid and nothing changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Player),
    #[error("tile {0} is not available in hand")]
    TileUnavailable(TileId),
    #[error("placement at {0} is not in the legal set")]
    IllegalPlacement(Hex),
}

/// What an accepted move did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Passed,
    Placed(Placement),
}

/// Full game state (clone to explore variations)
#[derive(Clone, Debug)]
pub struct GameState {
    position: Position,
    hands: [Hand; 2],
    current: Player,
    pass_count: u8,
    move_number: u16,
    result: GameResult,
    legal: FxHashSet<(Hex, Tile)>,
}

impl GameState {
    /// New game with the standard 63-tile hands
    pub fn standard() -> Self {
        Self::with_hands(Hand::standard(Player::White), Hand::standard(Player::Black))
    }

    pub fn with_hands(white: Hand, black: Hand) -> Self {
        let position = Position::new([white.len(), black.len()]);
        let mut state = Self {
            position,
            hands: [white, black],
            current: Player::White,
            pass_count: 0,
            move_number: 0,
            result: GameResult::Ongoing,
            legal: FxHashSet::default(),
        };
        state.legal = movegen::regenerate(
            &state.position,
            &state.hands[state.current.index()],
            state.current,
        );
        state
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn hand(&self, player: Player) -> &Hand {
        &self.hands[player.index()]
    }

    /// The precomputed legal placement set for the player to move
    pub fn legal_placements(&self) -> &FxHashSet<(Hex, Tile)> {
        &self.legal
    }

    /// Legal placement moves in hand order (no Pass)
    pub fn placement_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (id, tile) in self.hands[self.current.index()].available() {
            for &(cell, t) in &self.legal {
                if t == tile {
                    moves.push(Move::Place { cell, tile: id });
                }
            }
        }
        moves
    }

    /// All legal moves; passing is always allowed while the game runs
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.result != GameResult::Ongoing {
            return vec![];
        }
        let mut moves = vec![Move::Pass];
        moves.extend(self.placement_moves());
        moves
    }

    /// Apply a move for the given player.
    ///
    /// Declined moves return an error and leave the state untouched. A
    /// certified placement that fails to resolve panics: that is an engine
    /// bug, not a playable condition.
    pub fn play(&mut self, mover: Player, mv: Move) -> Result<PlayOutcome, MoveError> {
        if self.result != GameResult::Ongoing {
            return Err(MoveError::GameOver);
        }
        if mover != self.current {
            return Err(MoveError::NotYourTurn(mover));
        }
        match mv {
            Move::Pass => {
                self.pass_count += 1;
                self.move_number += 1;
                tracing::debug!(move_number = self.move_number, player = ?mover, "pass");
                if self.pass_count >= 2 {
                    self.conclude();
                }
                self.advance_turn();
                Ok(PlayOutcome::Passed)
            }
            Move::Place { cell, tile } => {
                let t = self.hands[mover.index()]
                    .get(tile)
                    .ok_or(MoveError::TileUnavailable(tile))?;
                if !self.legal.contains(&(cell, t)) {
                    return Err(MoveError::IllegalPlacement(cell));
                }
                self.hands[mover.index()].withdraw(tile);
                let placement = match self.position.place(cell, t) {
                    Ok(p) => p,
                    Err(err) => panic!(
                        "internal consistency violation on move {}: certified placement oscillated: {err}",
                        self.move_number
                    ),
                };
                tracing::debug!(
                    move_number = self.move_number,
                    player = ?mover,
                    cell = %cell,
                    kind = ?placement.kind,
                    flipped = placement.flipped.len(),
                    "placed tile"
                );
                self.pass_count = 0;
                self.move_number += 1;
                self.advance_turn();
                Ok(PlayOutcome::Placed(placement))
            }
        }
    }

    fn advance_turn(&mut self) {
        self.current = self.current.opponent();
        self.legal = if self.result == GameResult::Ongoing {
            movegen::regenerate(
                &self.position,
                &self.hands[self.current.index()],
                self.current,
            )
        } else {
            FxHashSet::default()
        };
    }

    /// Both players passed: whoever controls more tiles wins
    fn conclude(&mut self) {
        let white = self.position.board().count_controlled(Player::White);
        let black = self.position.board().count_controlled(Player::Black);
        self.result = if white > black {
            GameResult::WhiteWins
        } else if black > white {
            GameResult::BlackWins
        } else {
            GameResult::Draw
        };
        tracing::info!(white, black, result = ?self.result, "game concluded");
    }

    /// Persistable view of the game. Group arenas and the cell index are
    /// derived data and are rebuilt on restore.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tiles: self.position.board().occupied().collect(),
            white_hand: self.hands[0].clone(),
            black_hand: self.hands[1].clone(),
            current: self.current,
            pass_count: self.pass_count,
            move_number: self.move_number,
        }
    }

    pub fn restore(snapshot: Snapshot) -> Self {
        let mut board = Board::new();
        for &(hex, tile) in &snapshot.tiles {
            board.set(hex, tile);
        }
        let position =
            Position::rebuild(&board, [snapshot.white_hand.len(), snapshot.black_hand.len()]);
        let mut state = Self {
            position,
            hands: [snapshot.white_hand, snapshot.black_hand],
            current: snapshot.current,
            pass_count: snapshot.pass_count,
            move_number: snapshot.move_number,
            result: GameResult::Ongoing,
            legal: FxHashSet::default(),
        };
        if state.pass_count >= 2 {
            state.conclude();
        } else {
            state.legal = movegen::regenerate(
                &state.position,
                &state.hands[state.current.index()],
                state.current,
            );
        }
        state
    }
}

/// Saved game: board tiles, hands, and turn bookkeeping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tiles: Vec<(Hex, Tile)>,
    pub white_hand: Hand,
    pub black_hand: Hand,
    pub current: Player,
    pub pass_count: u8,
    pub move_number: u16,
}

impl Snapshot {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
