//! Command-line interface: load a configuration, generate, export

use crate::algorithm::generator::{GeneratedMaze, MazeGenerator};
use crate::io::config_loader::{MazeConfig, load_config};
use crate::io::configuration::{DEFAULT_CONFIG_FILE, DEFAULT_MAX_ATTEMPTS};
use crate::io::error::{MazeError, Result};
use crate::io::export::write_maze_file;
use crate::io::image::{RenderContext, export_maze_as_png};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{Level, info, warn};

#[derive(Parser, Debug)]
#[command(name = "mazegen")]
#[command(
    author,
    version,
    about = "Generate a maze with Wilson's algorithm and solve it"
)]
/// Command-line arguments for the maze generator
pub struct Cli {
    /// Configuration file with WIDTH, HEIGHT, ENTRY, EXIT, PERFECT and OUTPUT_FILE
    #[arg(value_name = "CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Random seed for reproducible generation (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override OUTPUT_FILE from the configuration
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also render the maze and its solution to a PNG file
    #[arg(short, long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Skip the centered emblem
    #[arg(long)]
    pub no_emblem: bool,

    /// Generation attempts before giving up on an unsolvable maze
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log level implied by the verbosity flags
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Seed to use, drawing a fresh one when none was given
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Drives one command-line invocation from configuration to files on disk
pub struct MazeRunner {
    cli: Cli,
}

impl MazeRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load configuration, generate, and write every requested output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration cannot be read or is invalid
    /// - Every generation attempt fails
    /// - An output file cannot be written
    pub fn run(&self) -> Result<()> {
        let start_time = Instant::now();
        let mut config = load_config(&self.cli.config)?;
        if let Some(output) = &self.cli.output {
            config.output_file.clone_from(output);
        }

        let seed = self.cli.resolve_seed();
        info!(
            seed,
            width = config.width,
            height = config.height,
            perfect = config.perfect,
            "generating maze"
        );

        let mut generator = MazeGenerator::new(config, seed)?.with_emblem(!self.cli.no_emblem);
        let maze = Self::generate_with_retries(&mut generator, self.cli.attempts)?;
        let config: &MazeConfig = generator.config();

        write_maze_file(&config.output_file, &maze.grid, &maze.solution)?;

        if let Some(png_path) = &self.cli.png {
            export_maze_as_png(
                &maze.grid,
                Some(&maze.solution),
                &RenderContext::default(),
                png_path,
            )?;
            info!(path = %png_path.display(), "render written");
        }

        info!(elapsed_ms = start_time.elapsed().as_millis(), "done");
        Ok(())
    }

    // Regenerates on retryable failures, keeping the RNG stream going
    fn generate_with_retries(generator: &mut MazeGenerator, attempts: usize) -> Result<GeneratedMaze> {
        let attempts = attempts.max(1);
        let mut last_error: Option<MazeError> = None;

        for attempt in 1..=attempts {
            match generator.regenerate() {
                Ok(maze) => return Ok(maze.clone()),
                Err(error) if error.is_retryable() => {
                    warn!(attempt, %error, "generation failed, retrying");
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        Err(last_error.unwrap_or_else(|| crate::io::error::invariant_violation(&"no attempts made")))
    }
}
