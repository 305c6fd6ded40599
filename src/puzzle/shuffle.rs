//! Scrambled starting layouts
//!
//! Positions are drawn uniformly from the cells where a piece still fits. A
//! draw that lands on the piece's home cell is redrawn, up to a fixed number
//! of attempts; after that the home cell is accepted rather than looping.
//! Overlap between live positions is allowed: the scramble is a loose pile,
//! not a second tiling.

use rand::Rng;

use crate::puzzle::piece::{Cell, Piece};

/// Draw a top-left cell where `piece` fits inside the grid
///
/// Candidates equal to the home cell are redrawn up to `attempts` times in
/// total; the last candidate is returned even if it is the home cell.
pub fn sample_position<R: Rng + ?Sized>(
    piece: &Piece,
    grid_size: u32,
    attempts: u32,
    rng: &mut R,
) -> Cell {
    let [max_x, max_y] = piece.max_position(grid_size);
    let home = piece.origin();
    let mut candidate = home;

    for _ in 0..attempts.max(1) {
        candidate = [rng.random_range(0..=max_x), rng.random_range(0..=max_y)];
        if candidate != home {
            break;
        }
    }

    candidate
}

/// Scrambled live positions, one per piece in input order
pub fn shuffled_positions<R: Rng + ?Sized>(
    pieces: &[Piece],
    grid_size: u32,
    attempts: u32,
    rng: &mut R,
) -> Vec<Cell> {
    pieces
        .iter()
        .map(|piece| sample_position(piece, grid_size, attempts, rng))
        .collect()
}

/// Move every unlocked piece to a freshly scrambled position
///
/// Returns how many pieces still landed on their home cell.
pub fn shuffle_layout<R: Rng + ?Sized>(
    pieces: &mut [Piece],
    grid_size: u32,
    attempts: u32,
    rng: &mut R,
) -> usize {
    let positions = shuffled_positions(pieces, grid_size, attempts, rng);
    let mut home_count = 0;
    for (piece, position) in pieces.iter_mut().zip(positions) {
        piece.move_to(position);
        if !piece.is_locked() && piece.is_home() {
            home_count += 1;
        }
    }
    home_count
}
