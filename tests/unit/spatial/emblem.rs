//! Tests for the centered emblem footprint and its reservation rules

#[cfg(test)]
mod tests {
    use mazegen::spatial::direction::Coord;
    use mazegen::spatial::emblem::{EmblemPlacement, emblem_cells, place_emblem};
    use mazegen::spatial::grid::{FULLY_WALLED, MazeGrid};

    // Tests the minimum size gate
    // Verified by relaxing the height check
    #[test]
    fn test_emblem_requires_nine_by_seven() {
        assert!(emblem_cells(8, 7).is_none());
        assert!(emblem_cells(9, 6).is_none());
        assert!(emblem_cells(9, 7).is_some());
    }

    // Tests the footprint on the smallest grid: 7 cells for the 4, 11 for the 2
    #[test]
    fn test_emblem_footprint_on_minimum_grid() {
        let Some(cells) = emblem_cells(9, 7) else {
            unreachable!("9x7 grid must fit the emblem");
        };
        assert_eq!(cells.len(), 18);

        for expected in [
            Coord::new(3, 2),
            Coord::new(1, 1),
            Coord::new(5, 3),
            Coord::new(3, 6),
            Coord::new(1, 7),
            Coord::new(5, 5),
        ] {
            assert!(cells.contains(&expected), "missing {expected}");
        }

        // One-cell margin around the emblem
        assert!(cells.iter().all(|c| (1..=5).contains(&c.row)));
        assert!(cells.iter().all(|c| (1..=7).contains(&c.col)));
    }

    // Tests the emblem stays centered on larger grids
    #[test]
    fn test_emblem_is_centered() {
        let Some(cells) = emblem_cells(21, 15) else {
            unreachable!("21x15 grid must fit the emblem");
        };
        let min_row = cells.iter().map(|c| c.row).min();
        let max_row = cells.iter().map(|c| c.row).max();
        assert_eq!(min_row, Some(5));
        assert_eq!(max_row, Some(9));
    }

    // Tests a clean placement reserves every emblem cell
    // Verified by skipping the reserve call
    #[test]
    fn test_place_emblem_reserves_cells() {
        let mut grid = MazeGrid::new(9, 7, Coord::new(0, 0), Coord::new(6, 8))
            .unwrap_or_else(|e| unreachable!("{e}"));

        let placement = place_emblem(&mut grid);
        assert!(matches!(placement, Ok(EmblemPlacement::Placed(18))));
        assert_eq!(grid.reserved_count(), 18);
        for cell in grid.reserved_cells() {
            assert_eq!(grid.mask(cell).ok(), Some(FULLY_WALLED));
        }
    }

    // Tests entry on the emblem discards the whole reservation
    // Verified by applying the non-conflicting cells anyway
    #[test]
    fn test_place_emblem_conflict_discards_reservation() {
        let mut grid = MazeGrid::new(9, 7, Coord::new(3, 1), Coord::new(6, 8))
            .unwrap_or_else(|e| unreachable!("{e}"));

        let placement = place_emblem(&mut grid);
        assert!(matches!(placement, Ok(EmblemPlacement::Conflict)));
        assert_eq!(grid.reserved_count(), 0);
        assert!(!placement.is_ok_and(EmblemPlacement::is_placed));
    }

    // Tests exit on the emblem is treated the same as entry
    #[test]
    fn test_place_emblem_conflict_on_exit() {
        let mut grid = MazeGrid::new(9, 7, Coord::new(0, 0), Coord::new(3, 5))
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert!(matches!(
            place_emblem(&mut grid),
            Ok(EmblemPlacement::Conflict)
        ));
        assert!(grid.reserved_cells().is_empty());
    }

    // Tests small grids are skipped without error
    #[test]
    fn test_place_emblem_too_small() {
        let mut grid = MazeGrid::new(5, 5, Coord::new(0, 0), Coord::new(4, 4))
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert!(matches!(
            place_emblem(&mut grid),
            Ok(EmblemPlacement::TooSmall)
        ));
        assert_eq!(grid.reserved_count(), 0);
    }
}
