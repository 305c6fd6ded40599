//! Command-line interface for generating, scattering and solving rod puzzles

use crate::hint::advisory::{AdvisorySlot, OfflineHints};
use crate::input::autoplay::Autoplay;
use crate::io::configuration::{
    DEFAULT_CELL_PIXELS, DEFAULT_OUTPUT_DIR, DEFAULT_PUZZLE_COUNT, DEFAULT_SEED, DEFAULT_STEM,
    FALLBACK_HINT, SCATTER_SUFFIX, SOLVED_SUFFIX, START_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_layout_as_png, load_source_image};
use crate::io::progress::ProgressManager;
use crate::puzzle::policy::Difficulty;
use crate::puzzle::session::Session;
use crate::render::layout::MediaSource;
use clap::Parser;
use image::RgbaImage;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rodgrid")]
#[command(author, version, about = "Cut a picture into rods, scramble them and put them back")]
/// Command-line arguments for the puzzle tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image the puzzle is cut from (palette colours when omitted)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Grid size tier
    #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// Random seed for reproducible puzzles
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of puzzles to generate, seeded consecutively
    #[arg(short = 'n', long, default_value_t = DEFAULT_PUZZLE_COUNT)]
    pub puzzles: usize,

    /// Directory receiving the rendered layouts
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Pixel size of one grid cell in rendered layouts
    #[arg(short = 'p', long, default_value_t = DEFAULT_CELL_PIXELS)]
    pub cell_pixels: u32,

    /// Scatter the loose pieces this many times after generation
    #[arg(short = 'x', long, default_value_t = 0)]
    pub scatter: usize,

    /// Solve each puzzle by scripted dragging and render the result
    #[arg(short = 'S', long)]
    pub solve: bool,

    /// Request an advisory hint for the source
    #[arg(short = 'H', long)]
    pub hint: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// File stem used for rendered layouts
    pub fn stem(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .map_or_else(
                || DEFAULT_STEM.to_string(),
                |stem| stem.to_string_lossy().into_owned(),
            )
    }
}

/// Orchestrates a batch of puzzles with progress tracking
pub struct PuzzleRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PuzzleRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate, render and optionally solve every requested puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if the source image cannot be loaded, a layout cannot
    /// be rendered or written, or a puzzle cannot be generated
    pub fn process(&mut self) -> Result<()> {
        if self.cli.puzzles == 0 {
            return Ok(());
        }

        let media = self.cli.source.clone().map(MediaSource::from_path);
        let picture = media.as_ref().map(load_source_image).transpose()?;

        let mut hints = AdvisorySlot::new();
        if self.cli.hint {
            if let Some(source) = &media {
                hints.request(Arc::new(OfflineHints), source.clone());
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.puzzles);
        }

        for index in 0..self.cli.puzzles {
            self.process_puzzle(index, picture.as_ref())?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if self.cli.hint {
            let text = hints
                .wait(Duration::from_secs(2))
                .unwrap_or(FALLBACK_HINT);
            info!("Hint: {text}");
        }

        Ok(())
    }

    fn process_puzzle(&mut self, index: usize, picture: Option<&RgbaImage>) -> Result<()> {
        let seed = self.cli.seed.wrapping_add(index as u64);
        let mut session = Session::new(self.cli.difficulty, seed)?;
        let label = format!("{} #{index} ({})", self.cli.stem(), self.cli.difficulty);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_puzzle(index, &label, session.pieces().len());
        }

        export_layout_as_png(
            &session,
            picture,
            self.cli.cell_pixels,
            &self.output_path(index, START_SUFFIX),
        )?;

        if self.cli.scatter > 0 {
            for _ in 0..self.cli.scatter {
                let _ = session.scatter();
            }
            export_layout_as_png(
                &session,
                picture,
                self.cli.cell_pixels,
                &self.output_path(index, SCATTER_SUFFIX),
            )?;
        }

        if self.cli.solve {
            let progress = &mut self.progress_manager;
            let report = Autoplay::default().solve_with(&mut session, |solving| {
                if let Some(pm) = progress.as_mut() {
                    pm.update_locked(index, solving.locked_count());
                }
            })?;
            info!(
                "{label}: solved={} after {} drags and {} moves",
                session.is_solved(),
                report.drags,
                report.moves
            );
            export_layout_as_png(
                &session,
                picture,
                self.cli.cell_pixels,
                &self.output_path(index, SOLVED_SUFFIX),
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_puzzle(index);
        }

        Ok(())
    }

    /// Path of the rendered layout for puzzle `index` with a stage suffix
    pub fn output_path(&self, index: usize, suffix: &str) -> PathBuf {
        self.cli
            .output
            .join(format!("{}_{index}{suffix}.png", self.cli.stem()))
    }
}
