//! Rod pieces, grid rectangles and identifier allocation

use std::fmt;

use crate::puzzle::order::Rank;

/// Grid cell coordinates as `[x, y]`
pub type Cell = [u32; 2];

/// Stable piece identifier, unique for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u64);

impl PieceId {
    /// Raw identifier value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic identifier source
///
/// Survives puzzle regeneration so identifiers are never recycled.
#[derive(Debug, Clone, Default)]
pub struct PieceIds {
    next: u64,
}

impl PieceIds {
    /// Create an allocator starting at zero
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Hand out the next unused identifier
    pub const fn allocate(&mut self) -> PieceId {
        let id = PieceId(self.next);
        self.next += 1;
        id
    }

    /// Number of identifiers handed out so far
    pub const fn issued(&self) -> u64 {
        self.next
    }
}

/// Axis-aligned rectangle of grid cells, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Columns spanned
    pub width: u32,
    /// Rows spanned
    pub height: u32,
}

impl CellRect {
    /// Create a rectangle from its top-left cell and extent
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left cell
    pub const fn origin(&self) -> Cell {
        [self.x, self.y]
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Number of cells covered
    pub const fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Check whether a cell lies inside the rectangle
    pub const fn contains(&self, cell: Cell) -> bool {
        cell[0] >= self.x && cell[0] < self.right() && cell[1] >= self.y && cell[1] < self.bottom()
    }

    /// Check whether the rectangle fits inside a `grid_size` square
    pub const fn fits_within(&self, grid_size: u32) -> bool {
        self.width >= 1
            && self.height >= 1
            && self.right() <= grid_size
            && self.bottom() <= grid_size
    }

    /// Iterate every covered cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| [x, y]))
    }
}

/// A rectangular rod of the puzzle
///
/// The home cell and extent are fixed at creation. The live cell and the lock
/// flag change only through the placement state machine and the scatter
/// operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    origin: Cell,
    current: Cell,
    width: u32,
    height: u32,
    locked: bool,
    rank: Rank,
}

impl Piece {
    /// Create a piece sitting on its home cell, unlocked
    pub const fn new(id: PieceId, home: CellRect, rank: Rank) -> Self {
        Self {
            id,
            origin: home.origin(),
            current: home.origin(),
            width: home.width,
            height: home.height,
            locked: false,
            rank,
        }
    }

    /// Stable identifier
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// Home (solved) top-left cell
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Live top-left cell
    pub const fn current(&self) -> Cell {
        self.current
    }

    /// Columns spanned
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Rows spanned
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether the piece has been locked home
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Interaction and draw priority
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Whether the live cell equals the home cell
    pub const fn is_home(&self) -> bool {
        self.current[0] == self.origin[0] && self.current[1] == self.origin[1]
    }

    /// Footprint in the solved layout; also the crop of the visual source
    pub const fn home_rect(&self) -> CellRect {
        CellRect::new(self.origin[0], self.origin[1], self.width, self.height)
    }

    /// Footprint in the live layout
    pub const fn current_rect(&self) -> CellRect {
        CellRect::new(self.current[0], self.current[1], self.width, self.height)
    }

    /// Largest valid top-left cell for this extent on a `grid_size` grid
    pub const fn max_position(&self, grid_size: u32) -> Cell {
        [
            grid_size.saturating_sub(self.width),
            grid_size.saturating_sub(self.height),
        ]
    }

    pub(crate) const fn move_to(&mut self, cell: Cell) {
        if !self.locked {
            self.current = cell;
        }
    }

    pub(crate) const fn lock(&mut self, rank: Rank) {
        self.locked = true;
        self.rank = rank;
    }

    pub(crate) const fn set_rank(&mut self, rank: Rank) {
        if !self.locked {
            self.rank = rank;
        }
    }
}
