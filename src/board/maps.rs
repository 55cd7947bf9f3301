//! Small sample boards for tests, benchmarks and demos.
//!
//! All boards come back unclaimed; use [`Board::assign`] or the setup
//! functions to place owners and troops.

use crate::error::Result;

use super::graph::Board;

/// `n` territories in a path: `0 - 1 - ... - n-1`.
pub fn line(n: u16) -> Result<Board> {
    let mut builder = Board::builder();
    for i in 0..n {
        builder = builder.territory(i, format!("Line {}", i));
    }
    for i in 1..n {
        builder = builder.border(i - 1, i);
    }
    builder.build()
}

/// `n` territories in a cycle.
pub fn ring(n: u16) -> Result<Board> {
    let mut builder = Board::builder();
    for i in 0..n {
        builder = builder.territory(i, format!("Ring {}", i));
    }
    for i in 0..n {
        let next = (i + 1) % n;
        if next != i {
            builder = builder.border(i, next);
        }
    }
    builder.build()
}

/// Two four-territory continents. North (bonus 3) is fully connected;
/// South (bonus 2) is the square `4 - 5 - 7 - 6 - 4`. Gatewatch (3) borders
/// both 4 and 6.
pub fn two_continents() -> Result<Board> {
    Board::builder()
        .territory(0, "Highcrest")
        .territory(1, "Frostmere")
        .territory(2, "Amberfield")
        .territory(3, "Gatewatch")
        .territory(4, "Saltmarsh")
        .territory(5, "Duneport")
        .territory(6, "Redcliff")
        .territory(7, "Sunhollow")
        .border(0, 1)
        .border(0, 2)
        .border(0, 3)
        .border(1, 2)
        .border(1, 3)
        .border(2, 3)
        .border(3, 4)
        .border(3, 6)
        .border(4, 5)
        .border(4, 6)
        .border(5, 7)
        .border(6, 7)
        .continent("North", 3, &[0, 1, 2, 3])
        .continent("South", 2, &[4, 5, 6, 7])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TerritoryGraph;
    use crate::core::TerritoryId;

    #[test]
    fn test_line() {
        let board = line(4).unwrap();
        assert_eq!(board.len(), 4);
        assert_eq!(board.neighbors_of(TerritoryId::new(0)).unwrap().len(), 1);
        assert_eq!(board.neighbors_of(TerritoryId::new(2)).unwrap().len(), 2);
        assert!(board.continents().is_empty());
        assert!(!board.is_fully_claimed());
    }

    #[test]
    fn test_ring() {
        let board = ring(5).unwrap();
        for id in board.territory_ids() {
            assert_eq!(board.neighbors_of(id).unwrap().len(), 2);
        }

        let single = ring(1).unwrap();
        assert!(single.neighbors_of(TerritoryId::new(0)).unwrap().is_empty());
    }

    #[test]
    fn test_two_continents() {
        let board = two_continents().unwrap();
        assert_eq!(board.len(), 8);
        assert_eq!(board.continents().len(), 2);
        assert_eq!(board.neighbors_of(TerritoryId::new(3)).unwrap().len(), 5);
    }
}
