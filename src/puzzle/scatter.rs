//! Re-randomize loose pieces without disturbing locked ones

use rand::Rng;
use rand::seq::SliceRandom;

use crate::puzzle::order::{Layer, RankCounter};
use crate::puzzle::piece::Piece;
use crate::puzzle::shuffle::sample_position;

/// Scatter every unlocked piece to a new position and draw order
///
/// Positions are resampled the same way as the starting layout. The loose
/// pieces then receive fresh loose-layer ranks in a random order, which keeps
/// them above all locked pieces. Locked pieces keep their cell, rank and lock
/// flag. Returns the number of pieces scattered.
pub fn scatter<R: Rng + ?Sized>(
    pieces: &mut [Piece],
    grid_size: u32,
    attempts: u32,
    ranks: &mut RankCounter,
    rng: &mut R,
) -> usize {
    let mut loose: Vec<usize> = pieces
        .iter()
        .enumerate()
        .filter(|(_, piece)| !piece.is_locked())
        .map(|(index, _)| index)
        .collect();

    for &index in &loose {
        if let Some(piece) = pieces.get_mut(index) {
            let cell = sample_position(piece, grid_size, attempts, rng);
            piece.move_to(cell);
        }
    }

    loose.shuffle(rng);
    for &index in &loose {
        if let Some(piece) = pieces.get_mut(index) {
            piece.set_rank(ranks.raise(Layer::Loose));
        }
    }

    loose.len()
}
