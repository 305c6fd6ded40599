//! Grid partitioning into rectangular rods
//!
//! The grid is scanned row-major. At each uncovered cell a random rod extent is
//! drawn from the size policy, then truncated against the grid edge and any
//! cells already covered. Every step covers at least the scan cell itself, so
//! the loop terminates after at most `grid_size^2` steps with an exact tiling.

use bitvec::vec::BitVec;
use ndarray::Array2;
use rand::Rng;

use crate::io::error::{Result, invalid_tiling};
use crate::puzzle::order::{Layer, RankCounter};
use crate::puzzle::piece::{Cell, CellRect, Piece, PieceIds};
use crate::puzzle::policy::SizePolicy;

/// Row-major bitmask of covered cells
struct CoverageMask {
    bits: BitVec,
    grid_size: u32,
}

impl CoverageMask {
    fn new(grid_size: u32) -> Self {
        let cells = grid_size as usize * grid_size as usize;
        Self {
            bits: BitVec::repeat(false, cells),
            grid_size,
        }
    }

    const fn index(&self, cell: Cell) -> usize {
        cell[1] as usize * self.grid_size as usize + cell[0] as usize
    }

    fn is_free(&self, cell: Cell) -> bool {
        cell[0] < self.grid_size
            && cell[1] < self.grid_size
            && self.bits.get(self.index(cell)).is_some_and(|bit| !*bit)
    }

    fn first_free(&self) -> Option<Cell> {
        let index = self.bits.first_zero()?;
        let size = self.grid_size as usize;
        Some([(index % size) as u32, (index / size) as u32])
    }

    // Length of the free run starting at `cell` going right, capped at `limit`
    fn free_run(&self, cell: Cell, limit: u32) -> u32 {
        (0..limit)
            .take_while(|&dx| self.is_free([cell[0] + dx, cell[1]]))
            .count() as u32
    }

    fn row_free(&self, x: u32, y: u32, width: u32) -> bool {
        (x..x + width).all(|column| self.is_free([column, y]))
    }

    fn cover(&mut self, rect: &CellRect) {
        for cell in rect.cells() {
            let index = self.index(cell);
            self.bits.set(index, true);
        }
    }
}

/// Draw the rod extent for the uncovered cell `cell`
///
/// The drawn rod is truncated to the free run on its first row, then grown
/// downward while the rows below stay free.
fn choose_extent<R: Rng + ?Sized>(
    policy: &SizePolicy,
    mask: &CoverageMask,
    cell: Cell,
    rng: &mut R,
) -> CellRect {
    let length = rng.random_range(1..=policy.max_rod_length());
    let thickness = rng.random_range(1..=policy.max_rod_thickness().min(length));
    let (wanted_width, wanted_height) = if rng.random_bool(0.5) {
        (length, thickness)
    } else {
        (thickness, length)
    };

    let width = mask.free_run(cell, wanted_width).max(1);
    let mut height = 1;
    while height < wanted_height && mask.row_free(cell[0], cell[1] + height, width) {
        height += 1;
    }

    CellRect::new(cell[0], cell[1], width, height)
}

/// Partition a `grid_size x grid_size` grid into rod rectangles
///
/// Rectangles are returned in the order their top-left cells are scanned.
pub fn partition_rects<R: Rng + ?Sized>(policy: &SizePolicy, rng: &mut R) -> Vec<CellRect> {
    let mut mask = CoverageMask::new(policy.grid_size());
    let mut rects = Vec::new();

    while let Some(cell) = mask.first_free() {
        let rect = choose_extent(policy, &mask, cell, rng);
        mask.cover(&rect);
        rects.push(rect);
    }

    rects
}

/// Turn home rectangles into solved-state pieces
///
/// Each piece receives a fresh identifier and a loose-layer rank in input
/// order, starts on its home cell and is unlocked.
pub fn pieces_from_rects(
    rects: &[CellRect],
    ids: &mut PieceIds,
    ranks: &mut RankCounter,
) -> Vec<Piece> {
    rects
        .iter()
        .map(|rect| Piece::new(ids.allocate(), *rect, ranks.raise(Layer::Loose)))
        .collect()
}

/// Partition the grid and build the solved-state pieces
pub fn partition<R: Rng + ?Sized>(
    policy: &SizePolicy,
    ids: &mut PieceIds,
    ranks: &mut RankCounter,
    rng: &mut R,
) -> Vec<Piece> {
    let rects = partition_rects(policy, rng);
    pieces_from_rects(&rects, ids, ranks)
}

/// Map each grid cell to the entry whose rectangle covers it
///
/// The map is indexed `[row, col]`.
///
/// # Errors
///
/// Returns `InvalidTiling` if a rectangle is empty or leaves the grid, if two
/// rectangles overlap, or if any cell is left uncovered.
pub fn ownership_map<T: Copy>(
    entries: impl IntoIterator<Item = (T, CellRect)>,
    grid_size: u32,
) -> Result<Array2<Option<T>>> {
    let size = grid_size as usize;
    let mut owners = Array2::from_elem((size, size), None);

    for (owner, rect) in entries {
        if !rect.fits_within(grid_size) {
            return Err(invalid_tiling(&format!(
                "rectangle {}x{} at ({}, {}) does not fit the {grid_size}x{grid_size} grid",
                rect.width, rect.height, rect.x, rect.y
            )));
        }
        for [x, y] in rect.cells() {
            let Some(slot) = owners.get_mut([y as usize, x as usize]) else {
                return Err(invalid_tiling(&format!("cell ({x}, {y}) is outside the grid")));
            };
            if slot.is_some() {
                return Err(invalid_tiling(&format!("cell ({x}, {y}) is covered twice")));
            }
            *slot = Some(owner);
        }
    }

    if let Some(((row, col), _)) = owners.indexed_iter().find(|(_, owner)| owner.is_none()) {
        return Err(invalid_tiling(&format!("cell ({col}, {row}) is not covered")));
    }

    Ok(owners)
}

/// Check that home rectangles tile a `grid_size x grid_size` grid exactly
///
/// # Errors
///
/// Returns `InvalidTiling` describing the first overlap, gap or overhang found.
pub fn verify_tiling(rects: &[CellRect], grid_size: u32) -> Result<()> {
    ownership_map(rects.iter().copied().enumerate(), grid_size).map(|_| ())
}
