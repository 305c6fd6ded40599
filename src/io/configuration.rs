//! Puzzle constants and runtime configuration defaults

// Generation limits
/// Largest accepted grid dimension
pub const MAX_GRID_SIZE: u32 = 64;

/// Resampling attempts before a piece is allowed to start on its home cell
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10;

// Difficulty tiers: (grid size, max rod length, max rod thickness)
/// Small tier grid dimension
pub const SMALL_GRID_SIZE: u32 = 4;
/// Small tier longest rod
pub const SMALL_MAX_ROD_LENGTH: u32 = 4;
/// Medium tier grid dimension
pub const MEDIUM_GRID_SIZE: u32 = 6;
/// Medium tier longest rod
pub const MEDIUM_MAX_ROD_LENGTH: u32 = 4;
/// Large tier grid dimension
pub const LARGE_GRID_SIZE: u32 = 10;
/// Large tier longest rod
pub const LARGE_MAX_ROD_LENGTH: u32 = 5;
/// Large tier thickest rod
pub const LARGE_MAX_ROD_THICKNESS: u32 = 2;

// Default values for configurable parameters
/// Fixed seed for reproducible puzzles
pub const DEFAULT_SEED: u64 = 42;

/// Number of puzzles generated per run
pub const DEFAULT_PUZZLE_COUNT: usize = 1;

/// Pixel size of one grid cell in exported images
pub const DEFAULT_CELL_PIXELS: u32 = 48;

/// Largest accepted cell size for exported images
pub const MAX_CELL_PIXELS: u32 = 512;

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "out";

// Output settings
/// Suffix for the scrambled starting layout image
pub const START_SUFFIX: &str = "_start";
/// Suffix for the layout after scattering
pub const SCATTER_SUFFIX: &str = "_scatter";
/// Suffix for the solved layout image
pub const SOLVED_SUFFIX: &str = "_solved";
/// Stem used when no source image is given
pub const DEFAULT_STEM: &str = "puzzle";

/// Outline colour drawn around loose pieces
pub const LOOSE_OUTLINE_RGBA: [u8; 4] = [20, 20, 20, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Advisory text used whenever the hint service fails
pub const FALLBACK_HINT: &str =
    "Work from the corners inward and lock the longest rods first.";
