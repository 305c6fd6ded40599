//! Difficulty tiers and the size policy that drives partitioning

use std::fmt;

use clap::ValueEnum;

use crate::io::configuration::{
    LARGE_GRID_SIZE, LARGE_MAX_ROD_LENGTH, LARGE_MAX_ROD_THICKNESS, MAX_GRID_SIZE,
    MEDIUM_GRID_SIZE, MEDIUM_MAX_ROD_LENGTH, SMALL_GRID_SIZE, SMALL_MAX_ROD_LENGTH,
};
use crate::io::error::{Result, invalid_parameter};
use crate::puzzle::piece::CellRect;

/// Difficulty selector exposed to players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Difficulty {
    /// Small grid with long rods
    Small,
    /// Medium grid
    #[default]
    Medium,
    /// Large grid with thick and thin rods
    Large,
}

impl Difficulty {
    /// Size policy for this tier
    pub const fn policy(self) -> SizePolicy {
        match self {
            Self::Small => SizePolicy {
                grid_size: SMALL_GRID_SIZE,
                max_rod_length: SMALL_MAX_ROD_LENGTH,
                max_rod_thickness: 1,
            },
            Self::Medium => SizePolicy {
                grid_size: MEDIUM_GRID_SIZE,
                max_rod_length: MEDIUM_MAX_ROD_LENGTH,
                max_rod_thickness: 1,
            },
            Self::Large => SizePolicy {
                grid_size: LARGE_GRID_SIZE,
                max_rod_length: LARGE_MAX_ROD_LENGTH,
                max_rod_thickness: LARGE_MAX_ROD_THICKNESS,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        f.write_str(name)
    }
}

/// Validated grid dimension and rod size bounds
///
/// A rod is `length x thickness` cells in either orientation, with
/// `1 <= thickness <= length <= grid_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizePolicy {
    grid_size: u32,
    max_rod_length: u32,
    max_rod_thickness: u32,
}

impl SizePolicy {
    /// Create a policy, rejecting bounds that cannot produce a tiling
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `grid_size` is zero or larger than `MAX_GRID_SIZE`
    /// - `max_rod_length` is zero or larger than `grid_size`
    /// - `max_rod_thickness` is zero or larger than `max_rod_length`
    pub fn new(grid_size: u32, max_rod_length: u32, max_rod_thickness: u32) -> Result<Self> {
        if grid_size == 0 || grid_size > MAX_GRID_SIZE {
            return Err(invalid_parameter(
                "grid_size",
                &grid_size,
                &format!("must be between 1 and {MAX_GRID_SIZE}"),
            ));
        }
        if max_rod_length == 0 || max_rod_length > grid_size {
            return Err(invalid_parameter(
                "max_rod_length",
                &max_rod_length,
                &format!("must be between 1 and the grid size {grid_size}"),
            ));
        }
        if max_rod_thickness == 0 || max_rod_thickness > max_rod_length {
            return Err(invalid_parameter(
                "max_rod_thickness",
                &max_rod_thickness,
                &format!("must be between 1 and the rod length {max_rod_length}"),
            ));
        }
        Ok(Self {
            grid_size,
            max_rod_length,
            max_rod_thickness,
        })
    }

    /// Grid dimension (cells per side)
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Longest rod side
    pub const fn max_rod_length(&self) -> u32 {
        self.max_rod_length
    }

    /// Longest short side of a rod
    pub const fn max_rod_thickness(&self) -> u32 {
        self.max_rod_thickness
    }
}

impl From<Difficulty> for SizePolicy {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.policy()
    }
}

/// Recipe for building one puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blueprint {
    /// Random rod partition under a size policy
    Random(SizePolicy),
    /// Explicit home rectangles, verified to tile the grid
    Fixed {
        /// Grid dimension
        grid_size: u32,
        /// Home rectangle of every piece
        rects: Vec<CellRect>,
    },
}

impl Blueprint {
    /// Grid dimension the blueprint produces
    pub const fn grid_size(&self) -> u32 {
        match self {
            Self::Random(policy) => policy.grid_size(),
            Self::Fixed { grid_size, .. } => *grid_size,
        }
    }
}

impl From<SizePolicy> for Blueprint {
    fn from(policy: SizePolicy) -> Self {
        Self::Random(policy)
    }
}

impl From<Difficulty> for Blueprint {
    fn from(difficulty: Difficulty) -> Self {
        Self::Random(difficulty.policy())
    }
}
