//! Interactive terminal play

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hexile_core::{GameResult, GameState, Move, PlayOutcome, Snapshot};

use crate::display;
use crate::notation::{self, ParsedMove};

/// Run an interactive game, optionally resuming from a snapshot
pub fn run(load: Option<PathBuf>) -> Result<()> {
    let mut game = match load {
        Some(path) => {
            let snapshot = Snapshot::load(&path)
                .with_context(|| format!("loading snapshot {}", path.display()))?;
            tracing::info!(path = %path.display(), "resumed game");
            GameState::restore(snapshot)
        }
        None => GameState::standard(),
    };

    println!("hexile - moves: pass | q,r=ne.e.sw | save <file> | quit");
    let stdin = io::stdin();
    while game.result() == GameResult::Ongoing {
        println!();
        println!("{}", display::render_status(&game));
        print!("{}", display::render_board(&game));
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        if let Some(path) = line.strip_prefix("save ") {
            let path = Path::new(path.trim());
            match game.snapshot().save(path) {
                Ok(()) => println!("saved to {}", path.display()),
                Err(err) => println!("save failed: {err:#}"),
            }
            continue;
        }

        match apply_text_move(&mut game, line) {
            Ok(summary) => println!("{summary}"),
            Err(err) => println!("{err:#}"),
        }
    }

    if game.result() != GameResult::Ongoing {
        print!("{}", display::render_board(&game));
        println!("result: {:?}", game.result());
    }
    Ok(())
}

fn apply_text_move(game: &mut GameState, line: &str) -> Result<String> {
    let mover = game.current_player();
    let mv = match notation::parse_move(line)? {
        ParsedMove::Pass => Move::Pass,
        ParsedMove::Place { cell, connections } => {
            let tile = game
                .hand(mover)
                .available()
                .find(|(_, t)| t.connections() == connections)
                .map(|(id, _)| id)
                .with_context(|| format!("no unplayed {:?} tile with those sides", mover))?;
            Move::Place { cell, tile }
        }
    };
    let outcome = game.play(mover, mv)?;
    Ok(match outcome {
        PlayOutcome::Passed => format!("{mover:?} passed"),
        PlayOutcome::Placed(report) => notation::describe(&report),
    })
}

/// Render a saved snapshot without playing
pub fn show(path: &Path) -> Result<()> {
    let snapshot =
        Snapshot::load(path).with_context(|| format!("loading snapshot {}", path.display()))?;
    let game = GameState::restore(snapshot);
    println!("{}", display::render_status(&game));
    print!("{}", display::render_board(&game));
    if game.result() != GameResult::Ongoing {
        println!("result: {:?}", game.result());
    }
    Ok(())
}
