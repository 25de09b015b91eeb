//! Tests for the hex text export

#[cfg(test)]
mod tests {
    use mazegen::algorithm::carving::carve;
    use mazegen::algorithm::resolver::solve;
    use mazegen::io::export::{mask_to_hex, render_maze_text, write_maze_file};
    use mazegen::spatial::direction::{Coord, Direction};
    use mazegen::spatial::grid::MazeGrid;
    use rand::{SeedableRng, rngs::StdRng};

    fn corridor() -> MazeGrid {
        let mut grid = MazeGrid::new(3, 1, Coord::new(0, 0), Coord::new(0, 2))
            .unwrap_or_else(|e| unreachable!("{e}"));
        assert!(grid.open_wall(Coord::new(0, 0), Direction::East).is_ok());
        assert!(grid.open_wall(Coord::new(0, 1), Direction::East).is_ok());
        grid
    }

    // Tests uppercase digits and the out-of-range marker
    #[test]
    fn test_mask_to_hex() {
        assert_eq!(mask_to_hex(0), '0');
        assert_eq!(mask_to_hex(9), '9');
        assert_eq!(mask_to_hex(10), 'A');
        assert_eq!(mask_to_hex(15), 'F');
        assert_eq!(mask_to_hex(16), '?');
    }

    // Tests the exact layout: hex rows, blank line, entry, exit, route with nothing after it
    // Verified by writing the coordinates as col,row
    #[test]
    fn test_render_corridor() {
        let grid = corridor();
        let (_, solution) = solve(&grid).unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(render_maze_text(&grid, &solution), "D57\n\n0,0\n0,2\nEE");
    }

    // Tests row count, row width and route characters on a carved maze
    #[test]
    fn test_render_dimensions() {
        let mut grid = MazeGrid::new(7, 4, Coord::new(3, 0), Coord::new(0, 6))
            .unwrap_or_else(|e| unreachable!("{e}"));
        assert!(carve(&mut grid, &mut StdRng::seed_from_u64(4)).is_ok());
        let (_, solution) = solve(&grid).unwrap_or_else(|e| unreachable!("{e}"));

        let text = render_maze_text(&grid, &solution);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4 + 1 + 3);
        assert!(lines.iter().take(4).all(|line| line.len() == 7));
        assert!(
            lines
                .iter()
                .take(4)
                .all(|line| line.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()))
        );
        assert_eq!(lines.get(4), Some(&""));
        assert_eq!(lines.get(5), Some(&"3,0"));
        assert_eq!(lines.get(6), Some(&"0,6"));
        assert_eq!(lines.get(7).map(|line| line.len()), Some(solution.len()));
        assert!(!text.ends_with('\n'));
    }

    // Tests files land on disk with parent directories created
    #[test]
    fn test_write_maze_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| unreachable!("{e}"));
        let path = dir.path().join("nested").join("maze.txt");
        let grid = corridor();
        let (_, solution) = solve(&grid).unwrap_or_else(|e| unreachable!("{e}"));

        assert!(write_maze_file(&path, &grid, &solution).is_ok());
        let written = std::fs::read_to_string(&path).unwrap_or_default();
        assert_eq!(written, render_maze_text(&grid, &solution));
    }
}
