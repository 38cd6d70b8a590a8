//! Command-line interface for solving a module file into a voxel grid

use crate::algorithm::executor::{BorderConstraints, Solver};
use crate::algorithm::extraction::SolvedGrid;
use crate::connector::{Connector, ConnectorCatalog};
use crate::io::configuration::{DEFAULT_ATTEMPTS, DEFAULT_GRID_SIZE, DEFAULT_SEED, OUTPUT_SUFFIX};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::export_layers_as_png;
use crate::io::module_file::ModuleFile;
use crate::io::output::write_solved_grid;
use crate::io::prefill::PrefillData;
use crate::io::progress::SolveProgress;
use crate::module::ModuleLibrary;
use crate::spatial::Dimensions;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn parse_dimensions(text: &str) -> std::result::Result<Dimensions, String> {
    text.parse().map_err(|e: AlgorithmError| e.to_string())
}

fn parse_connector(text: &str) -> std::result::Result<Connector, String> {
    text.parse().map_err(|e: AlgorithmError| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "voxelwave")]
#[command(
    author,
    version,
    about = "Fill a voxel grid with modules whose touching faces connect"
)]
/// Command-line arguments for the grid solver
pub struct Cli {
    /// JSON module file with blueprints and optional overrides
    #[arg(value_name = "MODULES")]
    pub modules: PathBuf,

    /// Grid extent as XxYxZ (default 10x3x10)
    #[arg(long, value_parser = parse_dimensions)]
    pub size: Option<Dimensions>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Seeds to try before giving up on contradictions
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: u32,

    /// Connector required on the underside of the bottom layer
    #[arg(long, value_parser = parse_connector)]
    pub bottom: Option<Connector>,

    /// Connector required on top of the top layer
    #[arg(long, value_parser = parse_connector)]
    pub top: Option<Connector>,

    /// Connector required on the perimeter above the bottom layer
    #[arg(long, value_parser = parse_connector)]
    pub side: Option<Connector>,

    /// Connector required on the perimeter of the bottom layer
    #[arg(long, value_parser = parse_connector)]
    pub ground: Option<Connector>,

    /// Drop the island defaults; only explicitly given border flags apply
    #[arg(long)]
    pub no_border: bool,

    /// Solved grid JSON path (default: <MODULES stem>_solved.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a PNG preview of every layer
    #[arg(short, long)]
    pub preview: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Grid extent, falling back to the default size
    ///
    /// # Errors
    ///
    /// Returns an error if the default extent is rejected
    pub fn dimensions(&self) -> Result<Dimensions> {
        match self.size {
            Some(size) => Ok(size),
            None => {
                let [x, y, z] = DEFAULT_GRID_SIZE;
                Dimensions::new(x, y, z)
            }
        }
    }

    /// Border constraints: explicit flags over the island defaults, or alone with `--no-border`
    pub fn border(&self) -> BorderConstraints {
        if self.no_border {
            return BorderConstraints {
                bottom: self.bottom,
                top: self.top,
                side: self.side,
                ground: self.ground,
            };
        }
        let island = BorderConstraints::island();
        BorderConstraints {
            bottom: self.bottom.or(island.bottom),
            top: self.top.or(island.top),
            side: self.side.or(island.side),
            ground: self.ground.or(island.ground),
        }
    }

    /// Where the solved grid is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.modules))
    }
}

/// `<stem>_solved.json` next to the module file
pub fn default_output_path(modules: &Path) -> PathBuf {
    let stem = modules.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.json", stem.to_string_lossy());

    if let Some(parent) = modules.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Loads the module file and retries the solve with successive seeds
pub struct GenerationRunner {
    cli: Cli,
    progress: SolveProgress,
}

impl GenerationRunner {
    /// Create a runner for the parsed arguments
    pub fn new(cli: Cli) -> Self {
        let progress = SolveProgress::new(0, cli.should_show_progress());
        Self { cli, progress }
    }

    /// Solve and write the outputs
    ///
    /// # Errors
    ///
    /// Returns an error if the module file cannot be loaded or compiled, the
    /// last attempt ends in a contradiction, or an output cannot be written
    pub fn run(&mut self) -> Result<SolvedGrid> {
        let start_time = Instant::now();
        let file = ModuleFile::load(&self.cli.modules)?;
        let mut catalog = ConnectorCatalog::new();
        let library = file.compile(&mut catalog)?;
        let prefill = file.prefill();
        prefill.validate(&library)?;

        let solved = self.solve_with_retries(&library, &prefill)?;

        let output_path = self.cli.output_path();
        write_solved_grid(&solved, &output_path)?;
        if let Some(preview) = &self.cli.preview {
            export_layers_as_png(&solved, preview)?;
        }

        self.progress.finish("done");
        info!(
            "wrote {} placements to '{}' in {:.2?}",
            solved.placements().len(),
            output_path.display(),
            start_time.elapsed()
        );
        Ok(solved)
    }

    /// Run attempts until one succeeds or a non-contradiction error occurs
    ///
    /// # Errors
    ///
    /// Returns the last contradiction once every attempt failed, or the first
    /// other error
    pub fn solve_with_retries(
        &self,
        library: &ModuleLibrary,
        prefill: &PrefillData,
    ) -> Result<SolvedGrid> {
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"at least one attempt is required",
            ));
        }

        let dimensions = self.cli.dimensions()?;
        let border = self.cli.border();
        let mut attempt = 1;
        loop {
            let seed = self.cli.seed.wrapping_add(u64::from(attempt - 1));
            self.progress.start_attempt(attempt, seed);
            match self.attempt(library, dimensions, &border, prefill.clone(), seed) {
                Ok(solved) => return Ok(solved),
                Err(e) if e.is_contradiction() && attempt < self.cli.attempts => {
                    warn!("attempt {attempt} with seed {seed} failed: {e}; retrying");
                    self.progress.fail_attempt(&e.to_string());
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn attempt(
        &self,
        library: &ModuleLibrary,
        dimensions: Dimensions,
        border: &BorderConstraints,
        mut prefill: PrefillData,
        seed: u64,
    ) -> Result<SolvedGrid> {
        let mut solver = Solver::new(library, dimensions, seed)?;
        solver.apply_border_constraints(border)?;
        prefill.apply_to(&mut solver)?;
        solver.solve_observed(|explored, total| self.progress.update(explored, total))?;
        solver.extract()
    }
}
