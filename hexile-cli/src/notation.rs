//! Move notation: `pass` or `q,r=ne.e.sw`

use anyhow::{anyhow, bail, Context, Result};
use hexile_core::{format_connections, parse_connections, Hex, Placement, Tile};

/// A parsed move request, before hand lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedMove {
    Pass,
    Place { cell: Hex, connections: u8 },
}

pub fn parse_move(input: &str) -> Result<ParsedMove> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("pass") {
        return Ok(ParsedMove::Pass);
    }
    let (coords, sides) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("expected `pass` or `q,r=sides`, got `{input}`"))?;
    let (q, r) = coords
        .split_once(',')
        .ok_or_else(|| anyhow!("expected coordinates as `q,r`, got `{coords}`"))?;
    let q: i8 = q.trim().parse().context("bad q coordinate")?;
    let r: i8 = r.trim().parse().context("bad r coordinate")?;
    let cell = Hex::new(q, r);
    if !cell.is_valid() {
        bail!("{cell} is off the board");
    }
    let connections = parse_connections(sides)
        .ok_or_else(|| anyhow!("bad side list `{sides}` (use e.g. `ne.e.sw`)"))?;
    Ok(ParsedMove::Place { cell, connections })
}

pub fn format_placement(cell: Hex, tile: Tile) -> String {
    format!("{},{}={}", cell.q, cell.r, format_connections(tile.connections()))
}

/// Human summary of a resolved placement
pub fn describe(report: &Placement) -> String {
    use hexile_core::PlacementKind;
    match report.kind {
        PlacementKind::Quiet => format!("placed at {}", report.cell),
        PlacementKind::Capture => format!(
            "placed at {}, captured {} tile(s)",
            report.cell,
            report.flipped.len()
        ),
        PlacementKind::SelfCapture => format!(
            "placed at {}, lost {} tile(s) to self-capture",
            report.cell,
            report.flipped.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexile_core::{connection_mask, Player, Side};

    #[test]
    fn test_parse_pass() {
        assert_eq!(parse_move("pass").unwrap(), ParsedMove::Pass);
        assert_eq!(parse_move("  PASS ").unwrap(), ParsedMove::Pass);
    }

    #[test]
    fn test_parse_placement() {
        let parsed = parse_move("1,-2=ne.w").unwrap();
        assert_eq!(
            parsed,
            ParsedMove::Place {
                cell: Hex::new(1, -2),
                connections: connection_mask(&[Side::NorthEast, Side::West]),
            }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_move("frobnicate").is_err());
        assert!(parse_move("1,2").is_err());
        assert!(parse_move("9,9=e").is_err());
        assert!(parse_move("0,0=xyz").is_err());
        assert!(parse_move("0,0=").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let tile = Tile::new(connection_mask(&[Side::East, Side::SouthWest]), Player::Black);
        let text = format_placement(Hex::new(-3, 2), tile);
        let parsed = parse_move(&text).unwrap();
        assert_eq!(
            parsed,
            ParsedMove::Place {
                cell: Hex::new(-3, 2),
                connections: tile.connections(),
            }
        );
    }
}
