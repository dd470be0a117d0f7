//! Integration tests for the HEXILE engine
//!
//! Plays full random games and checks, after every single move, the
//! invariants the incremental group bookkeeping must uphold: the partition
//! of controlled cells into groups, the one-liberty minimum, agreement
//! between the legal move generator and resolution, and isomorphism with a
//! from-scratch reconstruction of the group state.

use hexile_core::{GameResult, GameState, Group, Hex, Move, Player, Position};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPERS
// ============================================================================

/// Canonical form of a player's group partition: sorted member and liberty
/// sets plus the whole-section flag, sorted across groups
fn canonical_partition(position: &Position, player: Player) -> Vec<(Vec<Hex>, Vec<Hex>, bool)> {
    let canonical = |g: &Group| {
        let mut members: Vec<Hex> = g.members().collect();
        members.sort();
        let mut liberties: Vec<Hex> = g.liberties().collect();
        liberties.sort();
        (members, liberties, g.is_extendable())
    };
    let mut groups: Vec<_> = position.live_groups(player).map(canonical).collect();
    groups.sort();
    groups
}

fn assert_invariants(game: &GameState) {
    let position = game.position();
    for player in [Player::White, Player::Black] {
        // partition invariant: group members are exactly the cells the
        // player controls, each claimed once
        let mut members: Vec<Hex> = position
            .live_groups(player)
            .flat_map(|g| g.members().collect::<Vec<_>>())
            .collect();
        members.sort();
        let mut controlled: Vec<Hex> = game
            .board()
            .occupied()
            .filter(|(_, t)| t.controller() == player)
            .map(|(h, _)| h)
            .collect();
        controlled.sort();
        assert_eq!(members, controlled, "{player:?} partition out of sync");

        // liberty invariant
        for group in position.live_groups(player) {
            assert!(
                group.liberty_count() >= 1,
                "{player:?} group with no liberties survived resolution"
            );
        }

        // the cell index agrees with the board
        for (hex, _) in game
            .board()
            .occupied()
            .filter(|(_, t)| t.controller() == player)
        {
            let handle = position.handle_at(hex);
            assert!(handle.is_valid(), "occupied cell {hex} has no group");
            assert_eq!(handle.owner(), player, "index points across controllers");
            let group = position.group_at(hex).expect("index points at dead slot");
            assert!(group.members().any(|m| m == hex));
        }
    }
}

fn assert_reconstruction_matches(game: &GameState) {
    let rebuilt = Position::rebuild(game.board(), [63, 63]);
    for player in [Player::White, Player::Black] {
        assert_eq!(
            canonical_partition(game.position(), player),
            canonical_partition(&rebuilt, player),
            "incremental state diverged from reconstruction for {player:?}"
        );
    }
}

fn random_move(game: &GameState, rng: &mut ChaCha8Rng) -> Move {
    let placements = game.placement_moves();
    placements.choose(rng).copied().unwrap_or(Move::Pass)
}

// ============================================================================
// RANDOM GAME INVARIANTS
// ============================================================================

#[test]
fn test_random_games_preserve_invariants() {
    for seed in 0..4u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = GameState::standard();
        while game.result() == GameResult::Ongoing && game.move_number() < 300 {
            let mv = random_move(&game, &mut rng);
            game.play(game.current_player(), mv)
                .expect("random legal move declined");
            assert_invariants(&game);
            assert_reconstruction_matches(&game);
        }
    }
}

#[test]
fn test_every_certified_placement_resolves() {
    // the legal set must never contain a move that oscillates
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut game = GameState::standard();
    while game.result() == GameResult::Ongoing && game.move_number() < 80 {
        for &(cell, tile) in game.legal_placements() {
            let mut probe = game.position().clone();
            assert!(
                probe.place(cell, tile).is_ok(),
                "certified placement {tile} at {cell} oscillated"
            );
        }
        let mv = random_move(&game, &mut rng);
        game.play(game.current_player(), mv).unwrap();
    }
}

#[test]
fn test_random_games_terminate() {
    for seed in 100..103u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = GameState::standard();
        let mut moves = 0;
        while game.result() == GameResult::Ongoing {
            let mv = random_move(&game, &mut rng);
            game.play(game.current_player(), mv).unwrap();
            moves += 1;
            assert!(moves < 2000, "random game failed to terminate");
        }
        assert_ne!(game.result(), GameResult::Ongoing);
    }
}

// ============================================================================
// SNAPSHOT PERSISTENCE
// ============================================================================

#[test]
fn test_snapshot_round_trip_mid_game() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut game = GameState::standard();
    for _ in 0..30 {
        if game.result() != GameResult::Ongoing {
            break;
        }
        let mv = random_move(&game, &mut rng);
        game.play(game.current_player(), mv).unwrap();
    }

    let restored = GameState::restore(game.snapshot());
    assert_eq!(restored.current_player(), game.current_player());
    assert_eq!(restored.move_number(), game.move_number());
    assert_eq!(restored.result(), game.result());
    assert_eq!(restored.legal_placements(), game.legal_placements());
    for player in [Player::White, Player::Black] {
        assert_eq!(
            canonical_partition(restored.position(), player),
            canonical_partition(game.position(), player),
        );
    }

    // the restored game plays on identically
    let mut rng2 = rng.clone();
    let mut original = game;
    let mut resumed = restored;
    for _ in 0..20 {
        if original.result() != GameResult::Ongoing {
            break;
        }
        let mv = random_move(&original, &mut rng);
        let mv2 = random_move(&resumed, &mut rng2);
        assert_eq!(mv, mv2);
        original.play(original.current_player(), mv).unwrap();
        resumed.play(resumed.current_player(), mv2).unwrap();
    }
    assert_eq!(original.result(), resumed.result());
}

#[test]
fn test_snapshot_of_finished_game() {
    let mut game = GameState::standard();
    let mv = game.placement_moves()[0];
    game.play(Player::White, mv).unwrap();
    game.play(Player::Black, Move::Pass).unwrap();
    game.play(Player::White, Move::Pass).unwrap();
    assert_eq!(game.result(), GameResult::WhiteWins);

    let restored = GameState::restore(game.snapshot());
    assert_eq!(restored.result(), GameResult::WhiteWins);
    assert!(restored.legal_moves().is_empty());
}
