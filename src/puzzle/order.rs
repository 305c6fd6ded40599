//! Interaction rank: draw and hit-test priority without reordering storage
//!
//! Every piece carries a [`Rank`]. Ranks order first by [`Layer`] (locked
//! pieces sit beneath loose ones) and then by a sequence number handed out
//! by a [`RankCounter`], so the most recently touched piece of a layer sorts
//! last. Raising or locking a piece only rewrites that piece's rank.

/// Draw layer of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Locked pieces, drawn beneath everything else
    Locked,
    /// Unlocked pieces, drawn above the locked layer
    Loose,
}

/// Total order key for drawing and hit testing; higher is on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank {
    layer: Layer,
    sequence: u64,
}

impl Rank {
    /// Layer this rank belongs to
    pub const fn layer(self) -> Layer {
        self.layer
    }

    /// Sequence number within the layer
    pub const fn sequence(self) -> u64 {
        self.sequence
    }
}

/// Source of fresh ranks, one sequence shared by both layers
#[derive(Debug, Clone, Default)]
pub struct RankCounter {
    next: u64,
}

impl RankCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Rank above every rank previously issued for `layer`
    pub const fn raise(&mut self, layer: Layer) -> Rank {
        let rank = Rank {
            layer,
            sequence: self.next,
        };
        self.next += 1;
        rank
    }
}
