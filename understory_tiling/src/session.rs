// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive drag-to-resize state machine.
//!
//! A [`ResizeSession`] turns pointer input into line moves on a [`Grid`]:
//!
//! 1. **Press** ([`ResizeSession::on_press`]): hit test the pointer, pick the
//!    nearest side of the cell under it, and collect the cells on both sides
//!    of that side's line. If both sides have cells, a drag starts; if one is
//!    empty the press landed on the container border and nothing happens.
//! 2. **Move** ([`ResizeSession::on_move`]): feed the pointer delta along the
//!    line's normal to [`resize_dimension`]. Steps that would squash a cell
//!    below [`GridConfig::min_cell_size`](crate::GridConfig::min_cell_size)
//!    are dropped.
//! 3. **Release** ([`ResizeSession::on_release`]) or
//!    [`ResizeSession::cancel`]: back to idle.
//!
//! Only one drag runs at a time. A press while dragging is ignored, so two
//! sessions never move the same line.
//!
//! The session does not own the grid. Every call takes it explicitly, and the
//! caller must not run other structural edits on the dragged cells while a
//! drag is active; if it does, the next move ends the drag with
//! [`MoveOutcome::Cancelled`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_tiling::{Direction, Grid, MoveOutcome, PressOutcome, ResizeSession};
//!
//! let mut grid = Grid::new(Size::new(200.0, 100.0));
//! let left = grid.add_cell(0.0, 0.0, 0.0, 0.0);
//! let right = grid.split(left, Direction::Right, 0.5).unwrap();
//!
//! let mut session = ResizeSession::new();
//! // Just left of the divider at x = 100.
//! let press = session.on_press(&grid, Point::new(95.0, 50.0));
//! assert!(matches!(press, PressOutcome::Started(_)));
//!
//! assert_eq!(session.on_move(&mut grid, Vec2::new(20.0, 0.0)), MoveOutcome::Resized);
//! assert!(session.on_release());
//!
//! assert_eq!(grid.cell_rect(left).unwrap().x1, 120.0);
//! assert_eq!(grid.cell_rect(right).unwrap().x0, 120.0);
//! ```

use kurbo::{Point, Vec2};

use crate::direction::Direction;
use crate::edge::Edge;
use crate::grid::{CellGroup, Grid};
use crate::resize::{ResizeOutcome, resize_dimension};

/// Everything a drag needs, captured at press time.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    /// The edge that was grabbed.
    pub edge: Edge,
    /// Cells on the low-coordinate side of the line.
    pub lower: CellGroup,
    /// Cells on the high-coordinate side of the line.
    pub higher: CellGroup,
    /// Offset direction measured from the low-coordinate container edge:
    /// [`Direction::Left`] for a vertical line, [`Direction::Top`] for a
    /// horizontal one.
    pub lower_direction: Direction,
    /// Minimum cell extent in pixels.
    pub min_size: f64,
}

impl DragContext {
    /// Build the context for dragging `edge`, or `None` if its line lies on
    /// the container border (or the cell is gone).
    pub fn from_edge(grid: &Grid, edge: Edge) -> Option<Self> {
        let line = edge.line(grid)?;
        if line.is_boundary() {
            return None;
        }
        // The edge's own side is on the high-coordinate side for top/left edges.
        let (lower, higher) = match edge.direction() {
            Direction::Top | Direction::Left => (line.across, line.same),
            Direction::Bottom | Direction::Right => (line.same, line.across),
        };
        Some(Self {
            edge,
            lower,
            higher,
            lower_direction: edge.direction().lower(),
            min_size: grid.config().min_cell_size,
        })
    }

    /// Component of a pointer delta along the line's normal.
    pub fn axis_delta(&self, delta: Vec2) -> f64 {
        if self.lower_direction.is_horizontal() {
            delta.x
        } else {
            delta.y
        }
    }
}

#[derive(Clone, Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragContext),
}

/// Result of a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// A drag started on this edge. The host should consume the event and
    /// capture pointer motion until release.
    Started(Edge),
    /// A drag is already active; the press was ignored.
    AlreadyDragging,
    /// No cell strictly contains the point.
    NoCell,
    /// The nearest edge lies on the container border.
    Boundary,
}

impl PressOutcome {
    /// Whether the host should stop propagation of the press.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

/// Result of a pointer move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The line moved.
    Resized,
    /// The step would have squashed a cell below the minimum size; nothing changed.
    Blocked,
    /// No drag is active.
    Idle,
    /// The dragged cells changed under the session; the drag was ended.
    Cancelled,
}

/// Idle / dragging state machine for resizing lines with a pointer.
///
/// See the [module docs](self) for the flow.
#[derive(Clone, Debug, Default)]
pub struct ResizeSession {
    state: DragState,
}

impl ResizeSession {
    /// A session in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The active drag, if any.
    pub fn context(&self) -> Option<&DragContext> {
        match &self.state {
            DragState::Dragging(ctx) => Some(ctx),
            DragState::Idle => None,
        }
    }

    /// Handle a press at `point`, relative to the container's top-left corner.
    pub fn on_press(&mut self, grid: &Grid, point: Point) -> PressOutcome {
        if self.is_dragging() {
            #[cfg(feature = "tracing")]
            tracing::trace!(?point, "press ignored, drag already active");
            return PressOutcome::AlreadyDragging;
        }
        let Some(edge) = grid.edge_at(point) else {
            return PressOutcome::NoCell;
        };
        let Some(ctx) = DragContext::from_edge(grid, edge) else {
            return PressOutcome::Boundary;
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cell = ?edge.cell(),
            direction = %edge.direction(),
            lower = ctx.lower.len(),
            higher = ctx.higher.len(),
            "drag started"
        );
        self.state = DragState::Dragging(ctx);
        PressOutcome::Started(edge)
    }

    /// Handle pointer motion by `delta` pixels.
    ///
    /// Only the component normal to the grabbed line is used.
    pub fn on_move(&mut self, grid: &mut Grid, delta: Vec2) -> MoveOutcome {
        let DragState::Dragging(ctx) = &self.state else {
            return MoveOutcome::Idle;
        };
        let direction = ctx.lower_direction;
        let size = grid.size();
        let result = resize_dimension(
            grid,
            &ctx.lower,
            direction,
            &ctx.higher,
            |cell| cell.extent_px(direction, size),
            ctx.min_size,
            ctx.axis_delta(delta),
        );
        match result {
            Ok(ResizeOutcome::Applied) => MoveOutcome::Resized,
            Ok(ResizeOutcome::Blocked) => MoveOutcome::Blocked,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "drag cancelled, grid changed underneath");
                self.state = DragState::Idle;
                MoveOutcome::Cancelled
            }
        }
    }

    /// Handle a release. Returns whether a drag ended.
    pub fn on_release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        #[cfg(feature = "tracing")]
        if was_dragging {
            tracing::debug!("drag ended");
        }
        was_dragging
    }

    /// End any drag because of an external interrupt (focus loss, escape).
    ///
    /// Lines keep the position reached so far.
    pub fn cancel(&mut self) -> bool {
        self.on_release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellId;
    use crate::util::approx_eq;
    use kurbo::Size;

    fn columns() -> (Grid, CellId, CellId) {
        let mut grid = Grid::new(Size::new(100.0, 100.0));
        let a = grid.add_cell(0.0, 0.0, 0.0, 0.5);
        let b = grid.add_cell(0.0, 0.5, 0.0, 0.0);
        (grid, a, b)
    }

    #[test]
    fn drag_vertical_line() {
        let (mut grid, a, b) = columns();
        let mut session = ResizeSession::new();
        assert_eq!(
            session.on_press(&grid, Point::new(45.0, 50.0)),
            PressOutcome::Started(Edge::new(a, Direction::Right))
        );
        let ctx = session.context().unwrap();
        assert_eq!(ctx.lower.as_slice(), &[a]);
        assert_eq!(ctx.higher.as_slice(), &[b]);
        assert_eq!(ctx.lower_direction, Direction::Left);

        // Vertical motion is ignored for a vertical line.
        assert_eq!(session.on_move(&mut grid, Vec2::new(10.0, 3.0)), MoveOutcome::Resized);
        assert!(approx_eq(grid.cell(a).unwrap().right, 0.4, 1e-12));
        assert!(approx_eq(grid.cell(b).unwrap().left, 0.6, 1e-12));

        // b is 40px wide: 25 + 20 does not fit.
        assert_eq!(session.on_move(&mut grid, Vec2::new(25.0, 0.0)), MoveOutcome::Blocked);
        assert!(approx_eq(grid.cell(b).unwrap().left, 0.6, 1e-12));

        assert_eq!(session.on_move(&mut grid, Vec2::new(-30.0, 0.0)), MoveOutcome::Resized);
        assert!(approx_eq(grid.cell(a).unwrap().right, 0.7, 1e-12));
        assert!(approx_eq(grid.cell(b).unwrap().left, 0.3, 1e-12));
        assert_eq!(grid.check_partition(), Ok(()));

        assert!(session.on_release());
        assert!(!session.is_dragging());
        assert_eq!(session.on_move(&mut grid, Vec2::new(5.0, 0.0)), MoveOutcome::Idle);
        assert!(!session.on_release());
    }

    #[test]
    fn drag_from_the_far_side() {
        let (mut grid, a, b) = columns();
        let mut session = ResizeSession::new();
        assert_eq!(
            session.on_press(&grid, Point::new(55.0, 50.0)),
            PressOutcome::Started(Edge::new(b, Direction::Left))
        );
        let ctx = session.context().unwrap();
        assert_eq!(ctx.lower.as_slice(), &[a]);
        assert_eq!(ctx.higher.as_slice(), &[b]);

        assert_eq!(session.on_move(&mut grid, Vec2::new(10.0, 0.0)), MoveOutcome::Resized);
        assert!(approx_eq(grid.cell(b).unwrap().left, 0.6, 1e-12));
    }

    #[test]
    fn drag_horizontal_line() {
        let mut grid = Grid::new(Size::new(100.0, 100.0));
        let top = grid.add_cell(0.0, 0.0, 0.0, 0.0);
        let bottom = grid.split(top, Direction::Bottom, 0.5).unwrap();
        let mut session = ResizeSession::new();
        assert_eq!(
            session.on_press(&grid, Point::new(50.0, 55.0)),
            PressOutcome::Started(Edge::new(bottom, Direction::Top))
        );
        assert_eq!(session.context().unwrap().lower_direction, Direction::Top);
        assert_eq!(session.on_move(&mut grid, Vec2::new(7.0, 10.0)), MoveOutcome::Resized);
        assert!(approx_eq(grid.cell(top).unwrap().bottom, 0.4, 1e-12));
        assert!(approx_eq(grid.cell(bottom).unwrap().top, 0.6, 1e-12));
    }

    #[test]
    fn presses_that_do_not_start_a_drag() {
        let (grid, _, _) = columns();
        let mut session = ResizeSession::new();
        // Near the container's left border.
        assert_eq!(session.on_press(&grid, Point::new(5.0, 50.0)), PressOutcome::Boundary);
        // Exactly on the shared line, and outside the container.
        assert_eq!(session.on_press(&grid, Point::new(50.0, 50.0)), PressOutcome::NoCell);
        assert_eq!(session.on_press(&grid, Point::new(150.0, 50.0)), PressOutcome::NoCell);
        assert!(!session.is_dragging());
        assert!(!PressOutcome::Boundary.is_handled());
    }

    #[test]
    fn second_press_is_ignored() {
        let (grid, a, _) = columns();
        let mut session = ResizeSession::new();
        let first = session.on_press(&grid, Point::new(45.0, 50.0));
        assert!(first.is_handled());
        assert_eq!(
            session.on_press(&grid, Point::new(55.0, 50.0)),
            PressOutcome::AlreadyDragging
        );
        assert_eq!(session.context().unwrap().edge, Edge::new(a, Direction::Right));
        assert!(session.cancel());
        assert!(!session.is_dragging());
    }

    #[test]
    fn removed_cells_cancel_the_drag() {
        let (mut grid, a, b) = columns();
        let mut session = ResizeSession::new();
        session.on_press(&grid, Point::new(45.0, 50.0));
        grid.remove(b);
        assert_eq!(session.on_move(&mut grid, Vec2::new(5.0, 0.0)), MoveOutcome::Cancelled);
        assert!(!session.is_dragging());
        assert!(approx_eq(grid.cell(a).unwrap().right, 0.5, 1e-12));
    }
}
