//! Read-only view of a session for renderers
//!
//! The core never deals in pixels. Renderers receive, per piece, the live
//! footprint, the crop of the media source (the home footprint), the lock
//! flag and the draw position, and scale cells to pixels themselves.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::puzzle::piece::{CellRect, PieceId};
use crate::puzzle::session::Session;

/// Kind of visual source a puzzle is cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Still image
    Image,
    /// Motion source, cropped per frame by the renderer
    Video,
}

impl MediaKind {
    /// Guess the media kind from a file extension
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("mp4" | "webm" | "mov" | "mkv" | "avi") => Self::Video,
            _ => Self::Image,
        }
    }

    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque handle to the image or video a puzzle shows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaSource {
    kind: MediaKind,
    location: PathBuf,
}

impl MediaSource {
    /// Create a handle of an explicit kind
    pub fn new(kind: MediaKind, location: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }

    /// Create a handle whose kind is inferred from the file extension
    pub fn from_path(location: impl Into<PathBuf>) -> Self {
        let location = location.into();
        Self {
            kind: MediaKind::from_path(&location),
            location,
        }
    }

    /// Media kind
    pub const fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Where the media lives
    pub fn location(&self) -> &Path {
        &self.location
    }
}

/// Everything a renderer needs to draw one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedPiece {
    /// Piece identifier
    pub id: PieceId,
    /// Live footprint on the board
    pub rect: CellRect,
    /// Region of the media source shown on the piece
    pub crop: CellRect,
    /// Whether the piece is locked home
    pub locked: bool,
    /// Position in draw order, zero is drawn first
    pub draw_index: usize,
}

/// Pieces of a session in draw order, bottom-most first
pub fn layout(session: &Session) -> Vec<RenderedPiece> {
    session
        .draw_order()
        .into_iter()
        .filter_map(|id| session.piece(id))
        .enumerate()
        .map(|(draw_index, piece)| RenderedPiece {
            id: piece.id(),
            rect: piece.current_rect(),
            crop: piece.home_rect(),
            locked: piece.is_locked(),
            draw_index,
        })
        .collect()
}

/// Scale a cell rectangle to pixels as `[x, y, width, height]`
pub const fn pixel_rect(rect: &CellRect, cell_pixels: u32) -> [u32; 4] {
    [
        rect.x * cell_pixels,
        rect.y * cell_pixels,
        rect.width * cell_pixels,
        rect.height * cell_pixels,
    ]
}
