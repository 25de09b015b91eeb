//! `KEY=VALUE` configuration files and cross-field validation
//!
//! Parsing and validation are separate steps. [`parse_config`] only splits
//! lines into raw key/value strings; [`validate`] is a pure function that
//! checks every invariant and reports all violations at once.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::io::configuration::MAX_DIMENSION;
use crate::io::error::{MazeError, Result, file_system_error};
use crate::spatial::direction::Coord;

/// Recognised configuration keys
pub const KEYS: [&str; 6] = ["WIDTH", "HEIGHT", "ENTRY", "EXIT", "PERFECT", "OUTPUT_FILE"];

/// Validated maze configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// Number of columns, in `1..=MAX_DIMENSION`
    pub width: usize,
    /// Number of rows, in `1..=MAX_DIMENSION`
    pub height: usize,
    /// Entry cell, inside the grid
    pub entry: Coord,
    /// Exit cell, inside the grid and distinct from the entry
    pub exit: Coord,
    /// Whether the maze must be a spanning tree
    pub perfect: bool,
    /// Destination of the text export
    pub output_file: PathBuf,
}

/// Raw key/value pairs as read from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    entries: BTreeMap<String, String>,
}

impl RawConfig {
    /// Set a key, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw value of a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Keys present that are not part of the configuration contract
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|key| !KEYS.contains(key))
            .collect()
    }
}

/// A single violated configuration invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigViolation {
    /// Required key absent
    MissingKey {
        /// Key name
        key: &'static str,
    },
    /// Value is not a non-negative integer
    NotAnInteger {
        /// Key name
        key: &'static str,
        /// Raw value
        value: String,
    },
    /// Width or height is zero
    NonPositiveDimension {
        /// Key name
        key: &'static str,
    },
    /// Width or height above the policy maximum
    DimensionTooLarge {
        /// Key name
        key: &'static str,
        /// Provided value
        value: usize,
    },
    /// Coordinate not of the form `row,col`
    MalformedCoordinate {
        /// Key name
        key: &'static str,
        /// Raw value
        value: String,
    },
    /// Coordinate outside the grid
    CoordinateOutOfBounds {
        /// Key name
        key: &'static str,
        /// Provided coordinate
        coord: Coord,
    },
    /// Entry and exit are the same cell
    EntryEqualsExit,
    /// Perfect flag not `true` or `false`
    NotABoolean {
        /// Raw value
        value: String,
    },
    /// Output path is empty
    EmptyOutputFile,
}

impl fmt::Display for ConfigViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "{key} is missing"),
            Self::NotAnInteger { key, value } => {
                write!(f, "{key} must be a non-negative integer, got '{value}'")
            }
            Self::NonPositiveDimension { key } => write!(f, "{key} must be a positive integer"),
            Self::DimensionTooLarge { key, value } => {
                write!(f, "{key} = {value} exceeds the maximum of {MAX_DIMENSION}")
            }
            Self::MalformedCoordinate { key, value } => {
                write!(f, "{key} must look like '<row>,<col>', got '{value}'")
            }
            Self::CoordinateOutOfBounds { key, coord } => {
                write!(f, "{key} {coord} is outside the maze")
            }
            Self::EntryEqualsExit => write!(f, "ENTRY and EXIT must be different"),
            Self::NotABoolean { value } => {
                write!(f, "PERFECT must be 'true' or 'false', got '{value}'")
            }
            Self::EmptyOutputFile => write!(f, "OUTPUT_FILE must not be empty"),
        }
    }
}

/// Split configuration text into raw key/value pairs
///
/// Blank lines and lines starting with `#` are skipped. Keys and values are
/// trimmed; only the first `=` separates them.
///
/// # Errors
///
/// Returns `ConfigParse` for a non-comment line without `=`
pub fn parse_config(text: &str) -> Result<RawConfig> {
    let mut raw = RawConfig::default();
    for (number, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(MazeError::ConfigParse {
                line: number + 1,
                reason: format!("expected KEY=VALUE, got '{trimmed}'"),
            });
        };
        raw.insert(key.trim(), value.trim());
    }
    Ok(raw)
}

fn parse_dimension(
    raw: &RawConfig,
    key: &'static str,
    violations: &mut Vec<ConfigViolation>,
) -> Option<usize> {
    let Some(value) = raw.get(key) else {
        violations.push(ConfigViolation::MissingKey { key });
        return None;
    };
    let Ok(parsed) = value.parse::<usize>() else {
        violations.push(ConfigViolation::NotAnInteger {
            key,
            value: value.to_string(),
        });
        return None;
    };
    if parsed == 0 {
        violations.push(ConfigViolation::NonPositiveDimension { key });
        return None;
    }
    if parsed > MAX_DIMENSION {
        violations.push(ConfigViolation::DimensionTooLarge { key, value: parsed });
        return None;
    }
    Some(parsed)
}

/// Parse a `row,col` coordinate string
pub fn parse_coordinate(value: &str) -> Option<Coord> {
    let (row, col) = value.split_once(',')?;
    let row = row.trim().parse().ok()?;
    let col = col.trim().parse().ok()?;
    Some(Coord::new(row, col))
}

fn parse_point(
    raw: &RawConfig,
    key: &'static str,
    violations: &mut Vec<ConfigViolation>,
) -> Option<Coord> {
    let Some(value) = raw.get(key) else {
        violations.push(ConfigViolation::MissingKey { key });
        return None;
    };
    let coord = parse_coordinate(value);
    if coord.is_none() {
        violations.push(ConfigViolation::MalformedCoordinate {
            key,
            value: value.to_string(),
        });
    }
    coord
}

/// Check every configuration invariant
///
/// # Errors
///
/// Returns the full list of violations when any invariant fails
pub fn validate(raw: &RawConfig) -> std::result::Result<MazeConfig, Vec<ConfigViolation>> {
    let mut violations = Vec::new();

    let width = parse_dimension(raw, "WIDTH", &mut violations);
    let height = parse_dimension(raw, "HEIGHT", &mut violations);
    let entry = parse_point(raw, "ENTRY", &mut violations);
    let exit = parse_point(raw, "EXIT", &mut violations);

    if let (Some(width), Some(height)) = (width, height) {
        for (key, point) in [("ENTRY", entry), ("EXIT", exit)] {
            if let Some(coord) = point {
                if coord.row >= height || coord.col >= width {
                    violations.push(ConfigViolation::CoordinateOutOfBounds { key, coord });
                }
            }
        }
    }
    if entry.is_some() && entry == exit {
        violations.push(ConfigViolation::EntryEqualsExit);
    }

    let perfect = match raw.get("PERFECT") {
        None => {
            violations.push(ConfigViolation::MissingKey { key: "PERFECT" });
            None
        }
        Some(value) if value.eq_ignore_ascii_case("true") => Some(true),
        Some(value) if value.eq_ignore_ascii_case("false") => Some(false),
        Some(value) => {
            violations.push(ConfigViolation::NotABoolean {
                value: value.to_string(),
            });
            None
        }
    };

    let output_file = match raw.get("OUTPUT_FILE") {
        None => {
            violations.push(ConfigViolation::MissingKey { key: "OUTPUT_FILE" });
            None
        }
        Some("") => {
            violations.push(ConfigViolation::EmptyOutputFile);
            None
        }
        Some(path) => Some(PathBuf::from(path)),
    };

    match (width, height, entry, exit, perfect, output_file) {
        (Some(width), Some(height), Some(entry), Some(exit), Some(perfect), Some(output_file))
            if violations.is_empty() =>
        {
            Ok(MazeConfig {
                width,
                height,
                entry,
                exit,
                perfect,
                output_file,
            })
        }
        _ => Err(violations),
    }
}

/// Parse and validate configuration text
///
/// # Errors
///
/// Returns `ConfigParse` for malformed lines and `ConfigurationInvalid`
/// listing every violated invariant
pub fn config_from_str(text: &str) -> Result<MazeConfig> {
    let raw = parse_config(text)?;
    for key in raw.unknown_keys() {
        debug!(key, "ignoring unknown configuration key");
    }
    validate(&raw).map_err(|violations| MazeError::ConfigurationInvalid { violations })
}

/// Read, parse and validate a configuration file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, otherwise the errors
/// of [`config_from_str`]
pub fn load_config(path: &Path) -> Result<MazeConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| file_system_error(path, "read configuration", e))?;
    config_from_str(&text)
}
