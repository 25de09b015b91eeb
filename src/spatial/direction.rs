//! Cell coordinates and cardinal directions with their wall-bit encoding
//!
//! Each direction owns one bit of a cell's wall mask (N=1, E=2, S=4, W=8),
//! an opposite, a unit row/col delta and a single-letter label used by the
//! solution string.

use std::fmt;

/// Grid cell position, 0-indexed from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row index in `[0, height)`
    pub row: usize,
    /// Column index in `[0, width)`
    pub col: usize,
}

impl Coord {
    /// Create a coordinate from row and column
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move one step in a direction, returning `None` on underflow
    ///
    /// Upper bounds are not checked here; callers use
    /// `MazeGrid::neighbor` for a bounds-aware step.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        match (
            self.row.checked_add_signed(d_row),
            self.col.checked_add_signed(d_col),
        ) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal direction of movement or wall
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    North,
    /// Towards the last column
    East,
    /// Towards the last row
    South,
    /// Towards column 0
    West,
}

impl Direction {
    /// All directions in wall-bit order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Canonical enumeration order for walks, searches and path tie-breaks
    pub const TRAVERSAL_ORDER: [Self; 4] = [Self::East, Self::West, Self::North, Self::South];

    /// Wall-mask bit owned by this direction
    pub const fn bit(self) -> u8 {
        match self {
            Self::North => 1,
            Self::East => 2,
            Self::South => 4,
            Self::West => 8,
        }
    }

    /// Direction pointing back the way this one came
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Unit (row, col) offset of one step
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Single-letter label used in solution strings
    pub const fn label(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parse a solution-string label
    pub const fn from_label(label: char) -> Option<Self> {
        match label {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}
