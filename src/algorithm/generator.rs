//! Generation pipeline: emblem, carving, loop breaking and resolution
//!
//! `MazeGenerator` owns the seeded RNG and the artifacts of the latest run.
//! Each run builds a brand-new grid and only replaces the stored grid,
//! distance map and solution once every stage has succeeded.

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::algorithm::carving::{CarveReport, carve};
use crate::algorithm::loops::{LoopReport, break_walls};
use crate::algorithm::resolver::{DistanceMap, Solution, distance_map, reconstruct};
use crate::io::config_loader::MazeConfig;
use crate::io::error::{Result, invariant_violation};
use crate::spatial::emblem::{EmblemPlacement, place_emblem};
use crate::spatial::grid::{GridStage, MazeGrid};

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    /// Resolved grid
    pub grid: MazeGrid,
    /// BFS distances from the entry
    pub distances: DistanceMap,
    /// Shortest route from entry to exit
    pub solution: Solution,
    /// Emblem placement outcome
    pub emblem: EmblemPlacement,
    /// Carving statistics
    pub carve_report: CarveReport,
    /// Loop-breaking statistics, `None` for perfect mazes
    pub loop_report: Option<LoopReport>,
}

/// Seeded maze generator with regeneration support
pub struct MazeGenerator {
    config: MazeConfig,
    seed: u64,
    rng: StdRng,
    emblem: bool,
    generation: usize,
    current: Option<GeneratedMaze>,
}

impl MazeGenerator {
    /// Create a generator for a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce a grid (zero
    /// dimension, out-of-bounds or identical entry/exit)
    pub fn new(config: MazeConfig, seed: u64) -> Result<Self> {
        // Fail fast before any randomness is consumed
        MazeGrid::new(config.width, config.height, config.entry, config.exit)?;

        Ok(Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
            emblem: true,
            generation: 0,
            current: None,
        })
    }

    /// Enable or disable emblem placement for subsequent runs
    #[must_use]
    pub const fn with_emblem(mut self, emblem: bool) -> Self {
        self.emblem = emblem;
        self
    }

    /// Seed the RNG was created from
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration in use
    pub const fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Number of successful runs so far
    pub const fn generation(&self) -> usize {
        self.generation
    }

    /// Latest successful run, if any
    pub const fn current(&self) -> Option<&GeneratedMaze> {
        self.current.as_ref()
    }

    /// Grid of the latest successful run
    pub fn grid(&self) -> Option<&MazeGrid> {
        self.current.as_ref().map(|maze| &maze.grid)
    }

    /// Solution of the latest successful run
    pub fn solution(&self) -> Option<&Solution> {
        self.current.as_ref().map(|maze| &maze.solution)
    }

    /// Run the full pipeline on a fresh grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The exit cannot be reached (`UnsolvableMaze`, retryable)
    /// - Reserved cells isolate the exit (`ExitIsolated`, not retryable)
    /// - A perfect maze fails full connectivity (`InvariantViolation`)
    /// - A stage is invoked out of order (internal bug)
    pub fn generate(&mut self) -> Result<&GeneratedMaze> {
        let maze = self.run_pipeline()?;
        self.generation += 1;
        info!(
            generation = self.generation,
            path_length = maze.solution.len(),
            "maze generated"
        );
        Ok(self.current.insert(maze))
    }

    /// Discard the current maze and build a new one with fresh randomness
    ///
    /// The RNG stream continues, so a sequence of regenerations is still
    /// reproducible from the original seed. On failure the previous maze
    /// has already been dropped.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::generate`]
    pub fn regenerate(&mut self) -> Result<&GeneratedMaze> {
        self.current = None;
        self.generate()
    }

    fn run_pipeline(&mut self) -> Result<GeneratedMaze> {
        let config = &self.config;
        let mut grid = MazeGrid::new(config.width, config.height, config.entry, config.exit)?;

        let emblem = if self.emblem {
            place_emblem(&mut grid)?
        } else {
            EmblemPlacement::Disabled
        };

        let carve_report = carve(&mut grid, &mut self.rng)?;

        let loop_report = if config.perfect {
            None
        } else {
            Some(break_walls(&mut grid, &mut self.rng)?)
        };

        let distances = distance_map(&grid);
        if config.perfect {
            check_spanning_tree(&grid, &distances, &carve_report)?;
        }

        let solution = reconstruct(&grid, &distances)?;
        grid.advance(
            "resolve",
            &[GridStage::Carved, GridStage::LoopBroken],
            GridStage::Resolved,
        )?;
        debug!(path = %solution.path_string(), "solution resolved");

        Ok(GeneratedMaze {
            grid,
            distances,
            solution,
            emblem,
            carve_report,
            loop_report,
        })
    }
}

// A perfect maze must reach every non-stranded open cell using exactly n - 1 passages
fn check_spanning_tree(
    grid: &MazeGrid,
    distances: &DistanceMap,
    carve_report: &CarveReport,
) -> Result<()> {
    let unreachable = distances.unreachable_cells(grid).len();
    if unreachable != carve_report.stranded {
        return Err(invariant_violation(&format!(
            "{unreachable} cells unreachable after carving, expected {}",
            carve_report.stranded
        )));
    }

    let tree_cells = grid.open_cell_count() - carve_report.stranded;
    let passages = grid.passage_count();
    if passages + 1 != tree_cells {
        return Err(invariant_violation(&format!(
            "{passages} passages carved for {tree_cells} connected cells"
        )));
    }
    Ok(())
}
