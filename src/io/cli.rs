//! Command-line interface for solving scene files

use crate::algorithm::executor::WaveFunctionCollapse;
use crate::analysis::statistics::TileUsage;
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, OUTPUT_EXTENSION, OUTPUT_SUFFIX, SolverConfig,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::export::ExportDocument;
use crate::io::logging::LogLevel;
use crate::io::progress::SolveProgress;
use crate::io::scene::SceneFile;
use crate::spatial::direction::{Direction, Position};
use crate::spatial::grid::BoundingBox;
use crate::tileset::Tileset;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "socketwfc")]
#[command(
    author,
    version,
    about = "Fill a 3D volume with socket-matched tiles using wave function collapse"
)]
/// Command-line arguments for the scene solver
pub struct Cli {
    /// TOML scene file with tiles and bounds
    #[arg(value_name = "SCENE")]
    pub scene: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Minimum corner as x,y,z (overrides the scene)
    #[arg(long, value_parser = parse_position, allow_hyphen_values = true)]
    pub min: Option<Position>,

    /// Maximum corner as x,y,z (overrides the scene)
    #[arg(long, value_parser = parse_position, allow_hyphen_values = true)]
    pub max: Option<Position>,

    /// Whole-run attempts on contradiction, each with the next seed
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: u32,

    /// Output JSON path (defaults to `<scene>_result.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List every variant and its allowed neighbours instead of solving
    #[arg(long)]
    pub inspect: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by `-v` and `--quiet`
    pub const fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbose, self.quiet)
    }

    /// Where the result is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.scene))
    }
}

/// Parse `x,y,z` into a position
///
/// # Errors
///
/// Returns a message when there are not exactly three integers
pub fn parse_position(text: &str) -> std::result::Result<Position, String> {
    let parts = text
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|error| format!("invalid coordinate in '{text}': {error}"))?;
    <[i32; 3]>::try_from(parts.as_slice())
        .map_err(|_length_error| format!("expected three comma-separated integers, got '{text}'"))
}

/// `<dir>/<stem>_result.json` next to the scene file
pub fn default_output_path(scene: &Path) -> PathBuf {
    let stem = scene.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    );

    if let Some(parent) = scene.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Loads a scene, solves it with retries and writes the result
pub struct SceneRunner {
    cli: Cli,
}

impl SceneRunner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the command described by the arguments
    ///
    /// # Errors
    ///
    /// Returns scene, configuration and export errors, or the last retryable
    /// error once every attempt has failed
    pub fn run(&self) -> Result<()> {
        let scene = SceneFile::load(&self.cli.scene)?;
        let tileset = scene.tileset()?;
        info!(
            definitions = scene.tiles.len(),
            variants = tileset.len(),
            "expanded tileset"
        );

        if self.cli.inspect {
            let stdout = std::io::stdout();
            return write_inspection(&mut stdout.lock(), &tileset);
        }

        let bounds = self.resolve_bounds(&scene)?;
        let document = self.solve(&scene, tileset, bounds)?;

        let output_path = self.cli.output_path();
        document.write(&output_path)?;
        info!(path = %output_path.display(), placements = document.placements.len(), "wrote result");
        Ok(())
    }

    /// Command-line corners override the scene's
    fn resolve_bounds(&self, scene: &SceneFile) -> Result<BoundingBox> {
        let declared = scene.bounding_box()?;
        let min = self.cli.min.or_else(|| declared.map(|bounds| bounds.min));
        let max = self.cli.max.or_else(|| declared.map(|bounds| bounds.max));
        match (min, max) {
            (Some(min), Some(max)) => BoundingBox::new(min, max),
            _ => Err(invalid_parameter(
                "bounds",
                &"<missing>",
                &"scene has no [bounds]; pass --min and --max",
            )),
        }
    }

    fn solve(
        &self,
        scene: &SceneFile,
        tileset: Tileset,
        bounds: BoundingBox,
    ) -> Result<ExportDocument> {
        let attempts = self.cli.attempts.max(1);
        let mut solver =
            WaveFunctionCollapse::initialize(tileset, bounds, SolverConfig::with_seed(self.cli.seed))?
                .with_weights(scene.weight_callback());
        let progress = SolveProgress::new(bounds.volume(), !self.cli.should_show_progress());

        let mut last_error = None;
        for attempt in 0..attempts {
            let seed = self.cli.seed.wrapping_add(u64::from(attempt));
            if attempt > 0 {
                solver.clear();
                solver.reseed(seed);
            }
            progress.start_attempt(attempt + 1, seed);

            let start_time = Instant::now();
            match run_attempt(&mut solver, scene, &progress) {
                Ok(()) => {
                    progress.finish("done");
                    let usage = TileUsage::from_tiles(solver.tiles());
                    info!(
                        attempt = attempt + 1,
                        seed,
                        iterations = solver.iteration(),
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "solved scene"
                    );
                    info!("tile usage\n{usage}");
                    return Ok(ExportDocument::from_solver(&solver));
                }
                Err(error) if error.is_retryable() => {
                    warn!(attempt = attempt + 1, seed, %error, "attempt failed, retrying");
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        progress.finish("failed");
        Err(last_error.unwrap_or(AlgorithmError::RunHalted { iteration: 0 }))
    }
}

fn run_attempt(
    solver: &mut WaveFunctionCollapse,
    scene: &SceneFile,
    progress: &SolveProgress,
) -> Result<()> {
    scene.apply(solver)?;
    progress.update(solver.collapsed_count());

    while solver.iterate()?.is_some() {
        if solver.take_dirty() {
            progress.update(solver.collapsed_count());
        }
    }
    progress.update(solver.collapsed_count());
    Ok(())
}

/// List every variant with its allowed neighbour ids per direction
///
/// # Errors
///
/// Returns `FileSystem` if writing fails
pub fn write_inspection(out: &mut impl Write, tileset: &Tileset) -> Result<()> {
    let adjacency = crate::algorithm::adjacency::AdjacencyTable::build(tileset);
    let write_error = |source: std::io::Error| AlgorithmError::FileSystem {
        path: PathBuf::from("<stdout>"),
        operation: "write inspection",
        source,
    };

    for (tile, variant) in tileset.variants().iter().enumerate() {
        writeln!(out, "[{tile}] {variant}").map_err(write_error)?;
        for direction in Direction::ALL {
            let neighbors = adjacency.neighbor_ids(tile, direction);
            writeln!(out, "    {direction}: {neighbors:?}").map_err(write_error)?;
        }
    }
    Ok(())
}
