//! Seeded random self-play for statistics and soak-testing the engine

use anyhow::Result;
use hexile_core::{GameResult, GameState, Move};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn run(games: usize, seed: u64, max_moves: usize) -> Result<()> {
    let mut white_wins = 0usize;
    let mut black_wins = 0usize;
    let mut draws = 0usize;
    let mut total_moves = 0usize;
    let mut total_flips = 0usize;

    for game_number in 0..games {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(game_number as u64));
        let (state, flips) = play_one(&mut rng, max_moves)?;
        total_moves += state.move_number() as usize;
        total_flips += flips;
        match state.result() {
            GameResult::WhiteWins => white_wins += 1,
            GameResult::BlackWins => black_wins += 1,
            GameResult::Draw | GameResult::Ongoing => draws += 1,
        }
        tracing::info!(
            game = game_number,
            moves = state.move_number(),
            flips,
            result = ?state.result(),
            "self-play game finished"
        );
    }

    println!("self-play: {games} games, seed {seed}");
    println!("  white wins: {white_wins}");
    println!("  black wins: {black_wins}");
    println!("  draws/unfinished: {draws}");
    if games > 0 {
        println!("  avg moves: {:.1}", total_moves as f64 / games as f64);
        println!("  avg flips: {:.1}", total_flips as f64 / games as f64);
    }
    Ok(())
}

/// Play one game with uniformly random placements, passing only when no
/// placement is legal. Returns the final state and the flip count.
fn play_one(rng: &mut ChaCha8Rng, max_moves: usize) -> Result<(GameState, usize)> {
    let mut game = GameState::standard();
    let mut flips = 0usize;
    while game.result() == GameResult::Ongoing && (game.move_number() as usize) < max_moves {
        let placements = game.placement_moves();
        let mv = placements.choose(rng).copied().unwrap_or(Move::Pass);
        let outcome = game.play(game.current_player(), mv)?;
        if let hexile_core::PlayOutcome::Placed(report) = outcome {
            flips += report.flipped.len();
        }
    }
    Ok((game, flips))
}
