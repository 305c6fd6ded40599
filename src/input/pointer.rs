//! Device-agnostic pointer events and the pixel to grid mapping
//!
//! Mouse, pen and touch input all reduce to a [`PointerEvent`] before reaching
//! a session. Coordinates are in the caller's pixel space; the [`Viewport`]
//! set on the session converts them to fractional grid cells.

use num_traits::ToPrimitive;

use crate::io::error::{Result, invalid_parameter};
use crate::puzzle::piece::{Cell, CellRect};

/// Phase of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer pressed on the board
    DragStart,
    /// Pointer moved while pressed
    DragMove,
    /// Pointer released
    DragEnd,
}

/// Normalized input event in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Gesture phase
    pub kind: PointerKind,
    /// Horizontal pointer position
    pub x: f64,
    /// Vertical pointer position
    pub y: f64,
}

impl PointerEvent {
    /// Pointer pressed at `(x, y)`
    pub const fn start(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::DragStart,
            x,
            y,
        }
    }

    /// Pointer moved to `(x, y)`
    pub const fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::DragMove,
            x,
            y,
        }
    }

    /// Pointer released at `(x, y)`
    pub const fn end(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::DragEnd,
            x,
            y,
        }
    }

    /// Pointer position as `[x, y]`
    pub const fn position(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Placement of the board in pixel space
///
/// The board's top-left corner sits at `origin` and every cell is
/// `cell_size` pixels square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin: [f64; 2],
    cell_size: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            cell_size: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport from the board origin and cell size in pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not finite or the cell size is not a
    /// positive finite number
    pub fn new(origin: [f64; 2], cell_size: f64) -> Result<Self> {
        if !origin.iter().all(|value| value.is_finite()) {
            return Err(invalid_parameter(
                "origin",
                &format!("{origin:?}"),
                &"must be finite",
            ));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"must be a positive finite number",
            ));
        }
        Ok(Self { origin, cell_size })
    }

    /// Viewport for a square container of `side` pixels holding the grid
    ///
    /// # Errors
    ///
    /// Returns an error if the grid size is zero or the derived cell size is
    /// invalid
    pub fn from_container(left: f64, top: f64, side: f64, grid_size: u32) -> Result<Self> {
        if grid_size == 0 {
            return Err(invalid_parameter(
                "grid_size",
                &grid_size,
                &"must be positive",
            ));
        }
        Self::new([left, top], side / f64::from(grid_size))
    }

    /// Board top-left corner in pixels
    pub const fn origin(&self) -> [f64; 2] {
        self.origin
    }

    /// Pixel size of one cell
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Convert a pixel position into fractional grid coordinates
    pub const fn to_grid(&self, pixel: [f64; 2]) -> [f64; 2] {
        [
            (pixel[0] - self.origin[0]) / self.cell_size,
            (pixel[1] - self.origin[1]) / self.cell_size,
        ]
    }

    /// Convert fractional grid coordinates into a pixel position
    pub fn to_pixel(&self, grid: [f64; 2]) -> [f64; 2] {
        [
            grid[0].mul_add(self.cell_size, self.origin[0]),
            grid[1].mul_add(self.cell_size, self.origin[1]),
        ]
    }

    /// Pixel position of the centre of a cell rectangle
    pub fn rect_center(&self, rect: &CellRect) -> [f64; 2] {
        self.to_pixel([
            f64::from(rect.x) + f64::from(rect.width) / 2.0,
            f64::from(rect.y) + f64::from(rect.height) / 2.0,
        ])
    }

    /// Grid cell under a pixel position, if it lies on the board
    pub fn cell_at(&self, pixel: [f64; 2], grid_size: u32) -> Option<Cell> {
        let [gx, gy] = self.to_grid(pixel);
        let x = gx.floor().to_u32()?;
        let y = gy.floor().to_u32()?;
        (x < grid_size && y < grid_size).then_some([x, y])
    }
}

/// Round a fractional coordinate to the nearest cell and clamp to `[0, max]`
///
/// Returns `None` for non-finite input.
pub fn snap_axis(value: f64, max: u32) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    value.round().clamp(0.0, f64::from(max)).to_u32()
}
