//! ASCII rendering of the board

use hexile_core::{GameState, Hex, Player, BOARD_RADIUS};

/// Render the board as an indented hex grid, one glyph per cell
pub fn render_board(game: &GameState) -> String {
    let board = game.board();
    let mut out = String::new();
    for r in -BOARD_RADIUS..=BOARD_RADIUS {
        let indent = (r + BOARD_RADIUS) as usize;
        out.push_str(&" ".repeat(indent));
        let q_min = (-BOARD_RADIUS).max(-BOARD_RADIUS - r);
        let q_max = BOARD_RADIUS.min(BOARD_RADIUS - r);
        for q in q_min..=q_max {
            let tile = board.get(Hex::new(q, r));
            let glyph = if tile.is_empty() {
                '.'
            } else {
                match tile.controller() {
                    Player::White => 'W',
                    Player::Black => 'B',
                }
            };
            out.push(glyph);
            if q < q_max {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

/// One-line turn summary printed above the board
pub fn render_status(game: &GameState) -> String {
    format!(
        "move {} | {:?} to play | hands W:{} B:{} | legal placements: {}",
        game.move_number(),
        game.current_player(),
        game.hand(Player::White).remaining(),
        game.hand(Player::Black).remaining(),
        game.legal_placements().len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexile_core::{connection_mask, GameState, Move, Side};

    #[test]
    fn test_render_empty_board_shape() {
        let game = GameState::standard();
        let rendered = render_board(&game);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 9);
        // row widths follow the hexagon: 5..9..5 cells
        assert_eq!(rows[0].trim().split(' ').count(), 5);
        assert_eq!(rows[4].trim().split(' ').count(), 9);
        assert_eq!(rows[8].trim().split(' ').count(), 5);
    }

    #[test]
    fn test_render_shows_controllers() {
        let mut game = GameState::standard();
        let tile = game
            .hand(Player::White)
            .available()
            .find(|(_, t)| t.connections() == connection_mask(&[Side::East, Side::West]))
            .unwrap()
            .0;
        game.play(
            Player::White,
            Move::Place {
                cell: Hex::new(0, 0),
                tile,
            },
        )
        .unwrap();
        let rendered = render_board(&game);
        assert!(rendered.contains('W'));
        assert!(!rendered.contains('B'));
    }
}
