//! Tests for re-randomizing loose pieces around locked ones

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rodgrid::io::configuration::MAX_PLACEMENT_ATTEMPTS;
    use rodgrid::puzzle::order::{Layer, RankCounter};
    use rodgrid::puzzle::piece::{CellRect, Piece};
    use rodgrid::puzzle::policy::Blueprint;
    use rodgrid::puzzle::scatter::scatter;
    use rodgrid::puzzle::session::Session;

    fn unit_grid(size: u32) -> Blueprint {
        Blueprint::Fixed {
            grid_size: size,
            rects: (0..size * size)
                .map(|i| CellRect::new(i % size, i / size, 1, 1))
                .collect(),
        }
    }

    // Locks the first `count` pieces of a session and returns its pieces
    fn partly_locked(count: usize) -> Vec<Piece> {
        let mut session = Session::new(unit_grid(4), 13).expect("valid blueprint");
        let ids: Vec<_> = session.pieces().iter().take(count).map(Piece::id).collect();
        for id in ids {
            let Some(piece) = session.piece(id) else {
                continue;
            };
            let [x, y] = piece.current();
            let [hx, hy] = piece.origin();
            session
                .begin_drag(id, [f64::from(x), f64::from(y)])
                .expect("loose piece");
            let _ = session.drag_to([f64::from(hx), f64::from(hy)]);
            let _ = session.end_drag();
        }
        session.pieces().to_vec()
    }

    // Tests locked pieces keep their cell and rank
    // Verified by resampling every piece
    #[test]
    fn test_scatter_keeps_locked_pieces() {
        let before = partly_locked(5);
        let mut after = before.clone();
        let mut ranks = RankCounter::new();
        let mut rng = StdRng::seed_from_u64(4);

        let moved = scatter(&mut after, 4, MAX_PLACEMENT_ATTEMPTS, &mut ranks, &mut rng);

        assert_eq!(moved, 11);
        for (old, new) in before.iter().zip(&after) {
            if old.is_locked() {
                assert_eq!(old, new);
            } else {
                assert!(!new.is_locked());
            }
        }
    }

    // Tests scattered positions stay on the grid
    // Verified by sampling against the full grid size
    #[test]
    fn test_scatter_positions_in_bounds() {
        let mut pieces = partly_locked(3);
        let mut ranks = RankCounter::new();
        let mut rng = StdRng::seed_from_u64(6);

        for _ in 0..10 {
            let _ = scatter(&mut pieces, 4, MAX_PLACEMENT_ATTEMPTS, &mut ranks, &mut rng);
            for piece in &pieces {
                let [x, y] = piece.current();
                let [max_x, max_y] = piece.max_position(4);
                assert!(x <= max_x && y <= max_y);
            }
        }
    }

    // Tests loose pieces get fresh loose ranks above every locked piece
    // Verified by assigning locked-layer ranks to scattered pieces
    #[test]
    fn test_scatter_reassigns_loose_ranks() {
        let mut pieces = partly_locked(6);
        let mut ranks = RankCounter::new();
        let mut rng = StdRng::seed_from_u64(10);

        let _ = scatter(&mut pieces, 4, MAX_PLACEMENT_ATTEMPTS, &mut ranks, &mut rng);

        let highest_locked = pieces
            .iter()
            .filter(|piece| piece.is_locked())
            .map(Piece::rank)
            .max();
        let lowest_loose = pieces
            .iter()
            .filter(|piece| !piece.is_locked())
            .map(Piece::rank)
            .min();
        assert!(highest_locked < lowest_loose);
        assert!(
            pieces
                .iter()
                .filter(|piece| !piece.is_locked())
                .all(|piece| piece.rank().layer() == Layer::Loose)
        );
    }

    // Tests a fully locked board is left alone
    // Verified by counting locked pieces as scattered
    #[test]
    fn test_scatter_solved_board() {
        let before = partly_locked(16);
        let mut after = before.clone();
        let mut rng = StdRng::seed_from_u64(1);

        let moved = scatter(&mut after, 4, MAX_PLACEMENT_ATTEMPTS, &mut RankCounter::new(), &mut rng);

        assert_eq!(moved, 0);
        assert_eq!(before, after);
    }
}
