//! Scripted player that solves a session through pointer events
//!
//! Each step grabs the top-most loose piece at its centre, drags it over its
//! home cell and releases. Everything goes through [`Session::handle`], so the
//! hit testing, snapping and lock rules are exercised exactly as for a person.

use crate::input::pointer::PointerEvent;
use crate::io::error::Result;
use crate::puzzle::piece::PieceId;
use crate::puzzle::session::{DragOutcome, Session};

/// Counters collected while solving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoplayReport {
    /// Drag gestures performed
    pub drags: usize,
    /// Pointer moves sent
    pub moves: usize,
    /// Pieces locked by this run
    pub locked: usize,
}

/// Drives a session towards the solved state
#[derive(Debug, Clone, Copy)]
pub struct Autoplay {
    waypoints: usize,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Autoplay {
    /// Create a player that sends `waypoints` moves per drag (at least one)
    ///
    /// Intermediate waypoints interpolate linearly from grab point to target.
    pub fn new(waypoints: usize) -> Self {
        Self {
            waypoints: waypoints.max(1),
        }
    }

    /// Top-most loose piece, the one a pointer at its centre would grab
    fn next_target(session: &Session) -> Option<PieceId> {
        session
            .draw_order()
            .into_iter()
            .rev()
            .find(|&id| session.piece(id).is_some_and(|piece| !piece.is_locked()))
    }

    /// Drag one loose piece home and release it
    ///
    /// Returns the release outcome, or `None` if no loose piece remains.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the drag start, which happens
    /// when another drag is already active
    pub fn step(
        &self,
        session: &mut Session,
        report: &mut AutoplayReport,
    ) -> Result<Option<DragOutcome>> {
        let Some(target) = Self::next_target(session) else {
            return Ok(None);
        };
        let Some(piece) = session.piece(target) else {
            return Ok(None);
        };
        let viewport = *session.viewport();
        let from = viewport.rect_center(&piece.current_rect());
        let to = viewport.rect_center(&piece.home_rect());

        let started = session.handle(PointerEvent::start(from[0], from[1]))?;
        if started != DragOutcome::Started(target) {
            return Ok(Some(started));
        }
        report.drags += 1;

        for waypoint in 1..=self.waypoints {
            let t = waypoint as f64 / self.waypoints as f64;
            let x = (to[0] - from[0]).mul_add(t, from[0]);
            let y = (to[1] - from[1]).mul_add(t, from[1]);
            let _ = session.handle(PointerEvent::moved(x, y))?;
            report.moves += 1;
        }

        let released = session.handle(PointerEvent::end(to[0], to[1]))?;
        if matches!(released, DragOutcome::Locked { .. }) {
            report.locked += 1;
        }
        Ok(Some(released))
    }

    /// Repeat [`Autoplay::step`] until the puzzle is solved
    ///
    /// Each successful step locks one piece, so at most one step per piece is
    /// taken.
    ///
    /// # Errors
    ///
    /// Returns an error if a drag start is rejected
    pub fn solve(&self, session: &mut Session) -> Result<AutoplayReport> {
        self.solve_with(session, |_| {})
    }

    /// Like [`Autoplay::solve`], calling `on_step` with the session after
    /// every completed step
    ///
    /// # Errors
    ///
    /// Returns an error if a drag start is rejected
    pub fn solve_with<F>(&self, session: &mut Session, mut on_step: F) -> Result<AutoplayReport>
    where
        F: FnMut(&Session),
    {
        let mut report = AutoplayReport::default();
        for _ in 0..session.pieces().len() {
            if session.is_solved() || self.step(session, &mut report)?.is_none() {
                break;
            }
            on_step(session);
        }
        Ok(report)
    }
}
