//! Whether a neighboring tunnel cell opens onto the shared edge.

use crate::geometry::Direction;
use crate::overmap::{CellType, Network};

/// Does `there` present an opening on its `side` edge? Covers the subway, sewer and ant
/// tunnel families.
///
/// Callers looking at their northern neighbor ask about that neighbor's *south* side:
/// `connects_to(ctx.neighbor(North), North.opposite())`.
pub fn connects_to(there: CellType, side: Direction) -> bool {
    match there.network() {
        Some((Network::Subway | Network::Sewer | Network::Ants, open)) => open[side.index()],
        _ => false,
    }
}

/// The sides of the current cell that should carve a passage towards a connecting
/// neighbor, indexed by `Direction::index`.
pub fn open_sides(neighbors: impl Fn(Direction) -> CellType) -> [bool; 4] {
    let mut open = [false; 4];
    for dir in Direction::ALL {
        open[dir.index()] = connects_to(neighbors(dir), dir.opposite());
    }
    open
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_drives_openings() {
        assert!(connects_to(CellType::SewerNs, Direction::South));
        assert!(connects_to(CellType::SewerNs, Direction::North));
        assert!(!connects_to(CellType::SewerNs, Direction::East));
        assert!(connects_to(CellType::AntsEsw, Direction::West));
        assert!(!connects_to(CellType::AntsEsw, Direction::North));
    }

    #[test]
    fn test_roads_and_other_cells_never_connect() {
        for dir in Direction::ALL {
            assert!(!connects_to(CellType::RoadNesw, dir));
            assert!(!connects_to(CellType::Field, dir));
            assert!(!connects_to(CellType::AntsQueen, dir));
        }
    }

    #[test]
    fn test_directionally_consistent() {
        // B north of A with a southern opening means A sees a passage to its north,
        // for every tunnel shape.
        for b in CellType::ALL.iter().copied() {
            let b_opens_south = matches!(
                b.network(),
                Some((Network::Subway | Network::Sewer | Network::Ants, open)) if open[2]
            );
            let sides = open_sides(|d| if d == Direction::North { b } else { CellType::Rock });
            assert_eq!(sides[Direction::North.index()], b_opens_south, "{}", b);
            assert!(!sides[Direction::South.index()]);
        }
    }
}
