//! Tests for error formatting, sources and retry classification

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;

    use mazegen::MazeError;
    use mazegen::io::config_loader::ConfigViolation;
    use mazegen::io::error::{file_system_error, invariant_violation};
    use mazegen::spatial::direction::{Coord, Direction};
    use mazegen::spatial::grid::GridStage;

    // Tests messages carry the offending values
    #[test]
    fn test_display_messages() {
        let invalid = MazeError::InvalidCoordinate {
            coord: Coord::new(9, 2),
            dimensions: (5, 4),
        };
        assert_eq!(
            invalid.to_string(),
            "Coordinate (9, 2) is outside the 4x5 grid"
        );

        let sealed = MazeError::SealedBorder {
            coord: Coord::new(0, 0),
            direction: Direction::North,
        };
        assert!(sealed.to_string().contains("north"));

        let stage = MazeError::InvalidStage {
            operation: "carve",
            found: GridStage::Resolved,
        };
        assert!(stage.to_string().contains("Resolved"));
    }

    // Tests configuration errors list every violation on its own line
    #[test]
    fn test_configuration_invalid_lists_violations() {
        let error = MazeError::ConfigurationInvalid {
            violations: vec![
                ConfigViolation::MissingKey { key: "WIDTH" },
                ConfigViolation::EntryEqualsExit,
            ],
        };
        let message = error.to_string();
        assert_eq!(message.lines().count(), 3);
        assert!(message.contains("WIDTH is missing"));
        assert!(message.contains("ENTRY and EXIT must be different"));
    }

    // Tests I/O failures keep their source
    #[test]
    fn test_file_system_error_source() {
        let error = file_system_error(
            "maze.txt",
            "write maze",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(error.source().is_some());
        assert!(matches!(
            &error,
            MazeError::FileSystem { path, .. } if path == &PathBuf::from("maze.txt")
        ));
        assert!(error.to_string().contains("write maze"));
    }

    // Tests only unsolvable mazes are worth another attempt
    // Verified by marking InvariantViolation as retryable
    #[test]
    fn test_retryable_classification() {
        let unsolvable = MazeError::UnsolvableMaze {
            entry: Coord::new(0, 0),
            exit: Coord::new(1, 1),
        };
        assert!(unsolvable.is_retryable());
        assert!(!invariant_violation(&"broken").is_retryable());
        assert!(
            !MazeError::ReservedCell {
                coord: Coord::new(1, 1)
            }
            .is_retryable()
        );
        assert!(unsolvable.source().is_none());

        let isolated = MazeError::ExitIsolated {
            entry: Coord::new(0, 0),
            exit: Coord::new(2, 2),
        };
        assert!(!isolated.is_retryable());
        assert!(isolated.to_string().contains("(2, 2)"));
    }
}
