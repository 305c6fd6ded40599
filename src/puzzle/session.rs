//! Placement state machine owning the live puzzle
//!
//! A [`Session`] holds every piece of the current puzzle instance, the single
//! optional active drag with its grab offset, and the solved flag. All
//! mutation goes through the transition methods below and happens
//! synchronously on the caller's thread.
//!
//! Per piece: `Idle -> Dragging -> (Idle | Locked)`, with `Locked` terminal.
//! Per puzzle: `InProgress -> Solved`, reached when the last piece locks.

use log::{debug, info, trace};
use rand::{SeedableRng, rngs::StdRng};

use crate::input::pointer::{PointerEvent, PointerKind, Viewport, snap_axis};
use crate::io::configuration::{MAX_GRID_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::puzzle::order::{Layer, RankCounter};
use crate::puzzle::partition::{partition, pieces_from_rects, verify_tiling};
use crate::puzzle::piece::{Cell, Piece, PieceId, PieceIds};
use crate::puzzle::policy::Blueprint;
use crate::puzzle::scatter::scatter;
use crate::puzzle::shuffle::shuffle_layout;

/// Global puzzle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleStatus {
    /// At least one piece is still loose
    InProgress,
    /// Every piece is locked home
    Solved,
}

/// Interaction state of a single piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceState {
    /// Loose and not being dragged
    Idle,
    /// Following the pointer
    Dragging,
    /// Locked on its home cell
    Locked,
}

/// Result of feeding one input into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// A drag began on the piece
    Started(PieceId),
    /// The dragged piece snapped to a cell
    Moved {
        /// Dragged piece
        piece: PieceId,
        /// Cell after snapping and clamping
        cell: Cell,
    },
    /// The drag ended away from home; the piece stays loose
    Released(PieceId),
    /// The drag ended on the home cell and the piece locked
    Locked {
        /// Newly locked piece
        piece: PieceId,
        /// Whether this lock solved the puzzle
        solved: bool,
    },
    /// Nothing happened
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    piece: PieceId,
    index: usize,
    // pointer position minus piece top-left, in grid units
    grab_offset: [f64; 2],
}

/// Live puzzle: pieces, active drag and solved state
#[derive(Debug)]
pub struct Session {
    blueprint: Blueprint,
    grid_size: u32,
    pieces: Vec<Piece>,
    drag: Option<DragState>,
    status: PuzzleStatus,
    viewport: Viewport,
    ids: PieceIds,
    ranks: RankCounter,
    rng: StdRng,
    instance: u64,
}

impl Session {
    /// Build a new session and its first scrambled puzzle instance
    ///
    /// # Errors
    ///
    /// Returns an error if the blueprint is invalid: a grid size outside
    /// `1..=MAX_GRID_SIZE`, or fixed rectangles that do not tile the grid
    pub fn new(blueprint: impl Into<Blueprint>, seed: u64) -> Result<Self> {
        let blueprint = blueprint.into();
        let mut session = Self {
            blueprint: blueprint.clone(),
            grid_size: blueprint.grid_size(),
            pieces: Vec::new(),
            drag: None,
            status: PuzzleStatus::InProgress,
            viewport: Viewport::default(),
            ids: PieceIds::new(),
            ranks: RankCounter::new(),
            rng: StdRng::seed_from_u64(seed),
            instance: 0,
        };
        session.rebuild(&blueprint)?;
        Ok(session)
    }

    /// Discard the current puzzle and build a new one from `blueprint`
    ///
    /// Used for difficulty and source changes. Any active drag is dropped
    /// together with the old pieces; identifiers are never reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the blueprint is invalid, in which case the current
    /// puzzle is left untouched
    pub fn reset(&mut self, blueprint: impl Into<Blueprint>) -> Result<()> {
        let blueprint = blueprint.into();
        self.rebuild(&blueprint)?;
        self.blueprint = blueprint;
        Ok(())
    }

    /// Regenerate the puzzle from the current blueprint
    ///
    /// # Errors
    ///
    /// Returns an error if the stored blueprint fails validation
    pub fn restart(&mut self) -> Result<()> {
        let blueprint = self.blueprint.clone();
        self.rebuild(&blueprint)
    }

    fn rebuild(&mut self, blueprint: &Blueprint) -> Result<()> {
        let grid_size = blueprint.grid_size();
        if grid_size == 0 || grid_size > MAX_GRID_SIZE {
            return Err(invalid_parameter(
                "grid_size",
                &grid_size,
                &format!("must be between 1 and {MAX_GRID_SIZE}"),
            ));
        }

        let mut pieces = match blueprint {
            Blueprint::Random(policy) => {
                partition(policy, &mut self.ids, &mut self.ranks, &mut self.rng)
            }
            Blueprint::Fixed { rects, .. } => {
                verify_tiling(rects, grid_size)?;
                pieces_from_rects(rects, &mut self.ids, &mut self.ranks)
            }
        };
        let home_count =
            shuffle_layout(&mut pieces, grid_size, MAX_PLACEMENT_ATTEMPTS, &mut self.rng);

        if let Some(drag) = self.drag.take() {
            debug!("Discarding drag of piece {} on regeneration", drag.piece);
        }
        self.pieces = pieces;
        self.grid_size = grid_size;
        self.status = PuzzleStatus::InProgress;
        self.instance += 1;

        info!(
            "Puzzle instance {} ready: {}x{} grid, {} pieces, {} starting at home",
            self.instance,
            grid_size,
            grid_size,
            self.pieces.len(),
            home_count
        );
        Ok(())
    }

    /// Grid dimension of the current puzzle
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Blueprint the current puzzle was built from
    pub const fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// One-based count of puzzle instances built by this session
    pub const fn instance(&self) -> u64 {
        self.instance
    }

    /// All pieces in generation order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Look up a piece of the current instance
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.id() == id)
    }

    /// Global puzzle state
    pub const fn status(&self) -> PuzzleStatus {
        self.status
    }

    /// Whether every piece is locked
    pub fn is_solved(&self) -> bool {
        self.status == PuzzleStatus::Solved
    }

    /// Number of locked pieces
    pub fn locked_count(&self) -> usize {
        self.pieces.iter().filter(|piece| piece.is_locked()).count()
    }

    /// Piece currently being dragged
    pub fn active_drag(&self) -> Option<PieceId> {
        self.drag.map(|drag| drag.piece)
    }

    /// Interaction state of a piece
    pub fn piece_state(&self, id: PieceId) -> Option<PieceState> {
        let piece = self.piece(id)?;
        Some(if piece.is_locked() {
            PieceState::Locked
        } else if self.active_drag() == Some(id) {
            PieceState::Dragging
        } else {
            PieceState::Idle
        })
    }

    /// Piece identifiers from bottom-most to top-most
    ///
    /// Locked pieces come first, then loose pieces; within each group the most
    /// recently raised piece is last.
    pub fn draw_order(&self) -> Vec<PieceId> {
        let mut ranked: Vec<_> = self
            .pieces
            .iter()
            .map(|piece| (piece.rank(), piece.id()))
            .collect();
        ranked.sort_unstable();
        ranked.into_iter().map(|(_, id)| id).collect()
    }

    /// Pixel mapping applied to pointer coordinates
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replace the pixel mapping, e.g. after the board container resized
    pub const fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Top-most loose piece under a pixel position
    pub fn piece_at(&self, pointer: [f64; 2]) -> Option<PieceId> {
        let cell = self.viewport.cell_at(pointer, self.grid_size)?;
        self.pieces
            .iter()
            .filter(|piece| !piece.is_locked() && piece.current_rect().contains(cell))
            .max_by_key(|piece| piece.rank())
            .map(Piece::id)
    }

    /// Feed one normalized pointer event into the state machine
    ///
    /// `DragStart` picks the top-most loose piece under the pointer; pressing
    /// on empty space or on locked pieces is ignored. Moves and releases
    /// without an active drag are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DragInProgress` if a drag start arrives while a drag is active
    pub fn handle(&mut self, event: PointerEvent) -> Result<DragOutcome> {
        let pointer = event.position();
        match event.kind {
            PointerKind::DragStart => {
                let Some(id) = self.piece_at(pointer) else {
                    return Ok(DragOutcome::Ignored);
                };
                self.begin_drag(id, pointer)?;
                Ok(DragOutcome::Started(id))
            }
            PointerKind::DragMove => {
                let Some(piece) = self.active_drag() else {
                    return Ok(DragOutcome::Ignored);
                };
                Ok(self
                    .drag_to(pointer)
                    .map_or(DragOutcome::Ignored, |cell| DragOutcome::Moved { piece, cell }))
            }
            PointerKind::DragEnd => Ok(self.end_drag()),
        }
    }

    /// Start dragging a piece grabbed at a pixel position
    ///
    /// The piece is raised above every other piece and the grab offset is
    /// recorded so the piece keeps its position relative to the pointer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - another drag is active (`DragInProgress`)
    /// - the piece is not part of this instance (`UnknownPiece`)
    /// - the piece is locked (`PieceLocked`)
    pub fn begin_drag(&mut self, id: PieceId, pointer: [f64; 2]) -> Result<()> {
        if let Some(drag) = self.drag {
            return Err(PuzzleError::DragInProgress {
                active: drag.piece,
                requested: id,
            });
        }
        let index = self.index_of(id).ok_or(PuzzleError::UnknownPiece { id })?;
        let grid = self.viewport.to_grid(pointer);

        let piece = self
            .pieces
            .get_mut(index)
            .ok_or(PuzzleError::UnknownPiece { id })?;
        if piece.is_locked() {
            return Err(PuzzleError::PieceLocked { id });
        }

        piece.set_rank(self.ranks.raise(Layer::Loose));
        let [x, y] = piece.current();
        let grab_offset = [grid[0] - f64::from(x), grid[1] - f64::from(y)];
        self.drag = Some(DragState {
            piece: id,
            index,
            grab_offset,
        });

        debug!("Drag started on piece {id} at ({x}, {y})");
        Ok(())
    }

    /// Move the dragged piece to follow a pixel position
    ///
    /// The pointer is converted to grid space, the grab offset removed, the
    /// result rounded to the nearest cell and clamped so the piece stays on
    /// the grid. Returns the new cell, or `None` without an active drag or
    /// for non-finite coordinates.
    pub fn drag_to(&mut self, pointer: [f64; 2]) -> Option<Cell> {
        let drag = self.drag?;
        let grid = self.viewport.to_grid(pointer);
        let grid_size = self.grid_size;

        let piece = self.pieces.get_mut(drag.index)?;
        let [max_x, max_y] = piece.max_position(grid_size);
        let x = snap_axis(grid[0] - drag.grab_offset[0], max_x)?;
        let y = snap_axis(grid[1] - drag.grab_offset[1], max_y)?;
        piece.move_to([x, y]);

        trace!("Piece {} snapped to ({x}, {y})", drag.piece);
        Some([x, y])
    }

    /// Release the active drag
    ///
    /// A piece released on its home cell locks, drops beneath all loose
    /// pieces and may solve the puzzle. Otherwise it stays loose where it is.
    pub fn end_drag(&mut self) -> DragOutcome {
        let Some(drag) = self.drag.take() else {
            return DragOutcome::Ignored;
        };
        let Some(piece) = self.pieces.get_mut(drag.index) else {
            return DragOutcome::Ignored;
        };

        if !piece.is_home() {
            let [x, y] = piece.current();
            debug!("Piece {} released at ({x}, {y})", drag.piece);
            return DragOutcome::Released(drag.piece);
        }

        piece.lock(self.ranks.raise(Layer::Locked));
        debug!("Piece {} locked home", drag.piece);

        let solved = self.pieces.iter().all(Piece::is_locked);
        if solved {
            self.status = PuzzleStatus::Solved;
            info!("Puzzle instance {} solved", self.instance);
        }
        DragOutcome::Locked {
            piece: drag.piece,
            solved,
        }
    }

    /// Abandon the active drag, leaving the piece loose where it is
    pub fn cancel_drag(&mut self) -> Option<PieceId> {
        let drag = self.drag.take()?;
        debug!("Drag of piece {} cancelled", drag.piece);
        Some(drag.piece)
    }

    /// Scatter all loose pieces to new positions and a new draw order
    ///
    /// Any active drag is cancelled first. Locked pieces and the puzzle status
    /// are untouched. Returns the number of pieces scattered.
    pub fn scatter(&mut self) -> usize {
        let _ = self.cancel_drag();
        let scattered = scatter(
            &mut self.pieces,
            self.grid_size,
            MAX_PLACEMENT_ATTEMPTS,
            &mut self.ranks,
            &mut self.rng,
        );
        debug!("Scattered {scattered} loose pieces");
        scattered
    }
}
