// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edges: one side of one cell, and the structural edits made through them.

use alloc::string::String;
use core::fmt::Write as _;

use crate::cell::CellId;
use crate::direction::Direction;
use crate::error::TilingError;
use crate::grid::{CellGroup, Grid};
use crate::util::{approx_eq, approx_ge};

/// The two groups of cells that meet along a line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    /// Cells whose offset in the edge's direction equals the edge position.
    ///
    /// These sit on the same side of the line as the edge's own cell, which
    /// is always a member.
    pub same: CellGroup,
    /// Cells whose offset in the opposite direction puts their far side on
    /// the line; the neighbors across it.
    pub across: CellGroup,
}

impl Line {
    /// Whether one side is empty, i.e. the line is part of the container border.
    pub fn is_boundary(&self) -> bool {
        self.same.is_empty() || self.across.is_empty()
    }
}

/// One side of a cell.
///
/// An edge is a transient view: it stores only the cell id and direction, and
/// every query reads the current offsets from the [`Grid`] it is given. Queries
/// on an edge whose cell has been removed return `None` (or an empty group),
/// and edits return [`TilingError::StaleCell`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    cell: CellId,
    direction: Direction,
}

impl Edge {
    /// The `direction` side of `cell`.
    pub const fn new(cell: CellId, direction: Direction) -> Self {
        Self { cell, direction }
    }

    /// The cell this edge belongs to.
    pub const fn cell(&self) -> CellId {
        self.cell
    }

    /// Which side of the cell this edge is.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Fractional distance of the edge from the container side it faces.
    pub fn position(&self, grid: &Grid) -> Option<f64> {
        grid.cell(self.cell).map(|c| c.offset(self.direction))
    }

    /// Extent of the edge along the cross axis.
    pub fn length(&self, grid: &Grid) -> Option<f64> {
        grid.cell(self.cell).map(|c| c.extent(self.direction.cw()))
    }

    /// Extent of the cell perpendicular to the edge: the room available to split.
    pub fn normal_length(&self, grid: &Grid) -> Option<f64> {
        grid.cell(self.cell).map(|c| c.extent(self.direction))
    }

    /// `"<cell id string>;<direction index>"`, for debugging.
    pub fn id_string(&self, grid: &Grid) -> Option<String> {
        let mut s = grid.cell(self.cell)?.id_string();
        let _ = write!(s, ";{}", self.direction.index());
        Some(s)
    }

    /// Both sides of the line this edge lies on.
    ///
    /// The line runs across the whole container; cells on it need not be
    /// adjacent to this edge's cell.
    pub fn line(&self, grid: &Grid) -> Option<Line> {
        let position = self.position(grid)?;
        Some(Line {
            same: grid.aligned_cells(self.direction, position),
            across: grid.aligned_cells(self.direction.opposite(), 1.0 - position),
        })
    }

    /// Insert a new cell on this edge and return it.
    ///
    /// The cell's extent perpendicular to the edge is divided at `ratio`,
    /// measured from this edge. The new cell takes the `ratio` share nearest
    /// the edge and the existing cell shrinks to the remainder, so the two
    /// together cover exactly the original rectangle.
    ///
    /// `ratio` must lie strictly between 0 and 1; anything else (including
    /// NaN) is rejected with [`TilingError::InvalidRatio`] before any change.
    pub fn split(&self, grid: &mut Grid, ratio: f64) -> Result<CellId, TilingError> {
        if ratio.is_nan() || ratio <= 0.0 || ratio >= 1.0 {
            return Err(TilingError::InvalidRatio { ratio });
        }
        let mut inset = *grid
            .cell(self.cell)
            .ok_or(TilingError::StaleCell { cell: self.cell })?;
        let size = inset.extent(self.direction);
        let facing = self.direction.opposite();

        let cell = grid.cell_mut(self.cell)?;
        cell.set_offset(self.direction, cell.offset(self.direction) + size * ratio);
        inset.set_offset(facing, inset.offset(facing) + size * (1.0 - ratio));
        let new_cell = grid.insert(inset);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cell = ?self.cell,
            direction = %self.direction,
            ratio,
            new_cell = ?new_cell,
            "split cell"
        );
        Ok(new_cell)
    }

    /// Split `cell` on its `direction` side; shorthand for [`Edge::split`].
    pub fn split_cell(
        grid: &mut Grid,
        cell: CellId,
        direction: Direction,
        ratio: f64,
    ) -> Result<CellId, TilingError> {
        Self::new(cell, direction).split(grid, ratio)
    }

    /// Neighbors across this edge that can grow to cover the cell if it is deleted.
    ///
    /// When no other cell shares the line on this cell's side, every cell
    /// across the line qualifies. Otherwise the neighbors across must include
    /// one flush with each end of the edge, and only neighbors lying between
    /// those ends are returned. An empty group means the cell cannot be merged
    /// in this direction.
    pub fn find_aligned_across(&self, grid: &Grid) -> CellGroup {
        let (Some(cell), Some(line)) = (grid.cell(self.cell), self.line(grid)) else {
            return CellGroup::new();
        };
        if line.same.len() == 1 {
            return line.across;
        }

        let tolerance = grid.config().tolerance;
        let cw = self.direction.cw();
        let ccw = self.direction.ccw();
        let (cell_cw, cell_ccw) = (cell.offset(cw), cell.offset(ccw));
        let across = &line.across;
        let neighbors = || {
            across
                .iter()
                .filter_map(move |&id| Some((id, grid.cell(id)?)))
        };

        let flush_cw = neighbors().any(|(_, n)| approx_eq(n.offset(cw), cell_cw, tolerance));
        let flush_ccw = neighbors().any(|(_, n)| approx_eq(n.offset(ccw), cell_ccw, tolerance));
        if !(flush_cw && flush_ccw) {
            return CellGroup::new();
        }
        neighbors()
            .filter(|(_, n)| {
                approx_ge(n.offset(cw), cell_cw, tolerance)
                    && approx_ge(n.offset(ccw), cell_ccw, tolerance)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// The first side of `cell`, in [`Direction::ALL`] order, with neighbors
    /// that can absorb it, together with those neighbors.
    ///
    /// The fixed order is the tie-break when a cell could merge several ways:
    /// top, then left, bottom, right.
    pub fn aligned(grid: &Grid, cell: CellId) -> Option<(Direction, CellGroup)> {
        Direction::ALL.into_iter().find_map(|direction| {
            let group = Self::new(cell, direction).find_aligned_across(grid);
            (!group.is_empty()).then_some((direction, group))
        })
    }

    /// Remove `cell` and extend its aligned neighbors over the freed space.
    ///
    /// Fails with [`TilingError::GapCannotBeFilled`] when no side has a legal
    /// set of neighbors; the grid is unchanged in that case.
    pub fn delete_cell(grid: &mut Grid, cell: CellId) -> Result<(), TilingError> {
        let Some(target) = grid.cell(cell).copied() else {
            return Err(TilingError::StaleCell { cell });
        };
        let Some((side, neighbors)) = Self::aligned(grid, cell) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(cell = ?cell, "no aligned neighbors, refusing to delete");
            return Err(TilingError::GapCannotBeFilled { cell });
        };
        let width = target.extent(side);
        let facing = side.opposite();
        for id in &neighbors {
            let neighbor = grid.cell_mut(*id)?;
            neighbor.set_offset(facing, neighbor.offset(facing) - width);
        }
        grid.remove(cell);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cell = ?cell,
            side = %side,
            neighbors = neighbors.len(),
            "deleted cell"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use kurbo::Size;
    use Direction::*;

    const EPS: f64 = 1e-9;

    fn assert_cell(grid: &Grid, id: CellId, expected: Cell) {
        let cell = grid.cell(id).expect("live cell");
        for d in Direction::ALL {
            assert!(
                approx_eq(cell.offset(d), expected.offset(d), EPS),
                "{d} offset of {cell:?} should be {}",
                expected.offset(d)
            );
        }
    }

    /// The five-panel editor arrangement.
    fn editor_layout() -> (Grid, [CellId; 5]) {
        let mut grid = Grid::new(Size::new(1000.0, 800.0));
        let main = grid.add_cell(0.0, 0.0, 0.0, 0.0);
        let actions = Edge::split_cell(&mut grid, main, Right, 0.3).unwrap();
        let properties = Edge::split_cell(&mut grid, actions, Bottom, 0.5).unwrap();
        let log = Edge::split_cell(&mut grid, main, Bottom, 0.3).unwrap();
        let tree = Edge::split_cell(&mut grid, main, Left, 0.3).unwrap();
        (grid, [main, actions, properties, log, tree])
    }

    /// A 2x2 grid: top-left, bottom-left, top-right, bottom-right.
    fn quadrants() -> (Grid, [CellId; 4]) {
        let mut grid = Grid::default();
        let tl = grid.add_cell(0.0, 0.0, 0.0, 0.0);
        let bl = grid.split(tl, Bottom, 0.5).unwrap();
        let tr = grid.split(tl, Right, 0.5).unwrap();
        let br = grid.split(bl, Right, 0.5).unwrap();
        (grid, [tl, bl, tr, br])
    }

    #[test]
    fn edge_measurements() {
        let mut grid = Grid::default();
        let id = grid.add_cell(0.1, 0.2, 0.3, 0.4);
        let edge = Edge::new(id, Top);
        assert_eq!(edge.position(&grid), Some(0.1));
        assert!(approx_eq(edge.length(&grid).unwrap(), 0.4, EPS));
        assert!(approx_eq(edge.normal_length(&grid).unwrap(), 0.6, EPS));
        assert_eq!(edge.id_string(&grid).as_deref(), Some("0.1;0.2;0.3;0.4;0"));
        assert_eq!(Edge::new(id, Right).id_string(&grid).as_deref(), Some("0.1;0.2;0.3;0.4;3"));
    }

    #[test]
    fn split_right_at_ratio() {
        let mut grid = Grid::default();
        let a = grid.add_cell(0.0, 0.0, 0.0, 0.0);
        let b = Edge::split_cell(&mut grid, a, Right, 0.3).unwrap();
        assert_cell(&grid, a, Cell::new(0.0, 0.0, 0.0, 0.3));
        assert_cell(&grid, b, Cell::new(0.0, 0.7, 0.0, 0.0));
        assert_eq!(grid.check_partition(), Ok(()));
    }

    #[test]
    fn split_inner_cell_uses_its_own_extent() {
        let mut grid = Grid::default();
        let a = grid.add_cell(0.2, 0.1, 0.4, 0.5);
        let b = grid.split(a, Top, 0.25).unwrap();
        // Height is 0.4: the top quarter goes to the new cell.
        assert_cell(&grid, a, Cell::new(0.3, 0.1, 0.4, 0.5));
        assert_cell(&grid, b, Cell::new(0.2, 0.1, 0.7, 0.5));
    }

    #[test]
    fn split_rejects_bad_ratios() {
        let mut grid = Grid::default();
        let a = grid.add_cell(0.0, 0.0, 0.0, 0.0);
        let _ = grid.take_changes();
        for ratio in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                grid.split(a, Left, ratio),
                Err(TilingError::InvalidRatio { .. })
            ));
        }
        assert_eq!(grid.len(), 1);
        assert_cell(&grid, a, Cell::FULL);
        assert!(grid.take_changes().is_empty());
    }

    #[test]
    fn split_stale_cell() {
        let mut grid = Grid::default();
        let a = grid.add_cell(0.0, 0.0, 0.0, 0.0);
        grid.remove(a);
        assert_eq!(
            grid.split(a, Left, 0.5),
            Err(TilingError::StaleCell { cell: a })
        );
    }

    #[test]
    fn editor_layout_offsets() {
        let (grid, [main, actions, properties, log, tree]) = editor_layout();
        assert_cell(&grid, main, Cell::new(0.0, 0.21, 0.3, 0.3));
        assert_cell(&grid, actions, Cell::new(0.0, 0.7, 0.5, 0.0));
        assert_cell(&grid, properties, Cell::new(0.5, 0.7, 0.0, 0.0));
        assert_cell(&grid, log, Cell::new(0.7, 0.0, 0.0, 0.3));
        assert_cell(&grid, tree, Cell::new(0.0, 0.0, 0.3, 0.79));
        assert_eq!(grid.check_partition(), Ok(()));
    }

    #[test]
    fn line_groups() {
        let (grid, [main, actions, properties, log, tree]) = editor_layout();

        // Right side of main: the vertical line at x = 0.7.
        let line = Edge::new(main, Right).line(&grid).unwrap();
        assert_eq!(line.same.as_slice(), &[main, log]);
        assert_eq!(line.across.as_slice(), &[actions, properties]);
        assert!(!line.is_boundary());

        // Top of tree is the container border.
        let line = Edge::new(tree, Top).line(&grid).unwrap();
        assert_eq!(line.same.as_slice(), &[main, actions, tree]);
        assert!(line.across.is_empty());
        assert!(line.is_boundary());

        // Unchanged grid, unchanged answer.
        let edge = Edge::new(log, Top);
        assert_eq!(edge.line(&grid), edge.line(&grid));
    }

    #[test]
    fn sole_edge_returns_everything_across() {
        let (grid, [main, _, _, _, tree]) = editor_layout();
        let group = Edge::new(tree, Right).find_aligned_across(&grid);
        assert_eq!(group.as_slice(), &[main]);
    }

    #[test]
    fn incomplete_bracket_is_not_mergeable() {
        let (grid, [.., tree]) = editor_layout();
        // Log sits under tree but extends past tree's right side.
        assert!(Edge::new(tree, Bottom).find_aligned_across(&grid).is_empty());
        // Container border.
        assert!(Edge::new(tree, Left).find_aligned_across(&grid).is_empty());
        assert!(Edge::new(tree, Top).find_aligned_across(&grid).is_empty());
    }

    #[test]
    fn bracketed_neighbors_are_filtered_to_the_span() {
        // Three columns on top of one wide bottom cell that is split in two.
        let mut grid = Grid::default();
        let left = grid.add_cell(0.0, 0.0, 0.5, 0.5);
        let right = grid.add_cell(0.0, 0.5, 0.5, 0.0);
        let bottom_left = grid.add_cell(0.5, 0.0, 0.0, 0.75);
        let bottom_mid = grid.add_cell(0.5, 0.25, 0.0, 0.5);
        let bottom_right = grid.add_cell(0.5, 0.5, 0.0, 0.0);
        assert_eq!(grid.check_partition(), Ok(()));

        let group = Edge::new(left, Bottom).find_aligned_across(&grid);
        assert_eq!(group.as_slice(), &[bottom_left, bottom_mid]);
        let group = Edge::new(right, Bottom).find_aligned_across(&grid);
        assert_eq!(group.as_slice(), &[bottom_right]);
    }

    #[test]
    fn bracketing_tolerates_drift() {
        // Same shape as above, with the bottom row a few 1e-6 off the lines.
        let mut grid = Grid::default();
        let left = grid.add_cell(0.0, 0.0, 0.5, 0.5);
        let right = grid.add_cell(0.0, 0.5, 0.5, 0.0);
        let bottom_left = grid.add_cell(0.5 + 3e-6, -2e-6, 0.0, 0.75);
        let bottom_mid = grid.add_cell(0.5 - 3e-6, 0.25, 0.0, 0.5 + 4e-6);
        let bottom_right = grid.add_cell(0.5, 0.5, 0.0, 0.0);

        let group = Edge::new(left, Bottom).find_aligned_across(&grid);
        assert_eq!(group.as_slice(), &[bottom_left, bottom_mid]);

        grid.delete(left).unwrap();
        assert!(!grid.is_alive(left), "left should be merged away");
        for id in [right, bottom_left, bottom_mid, bottom_right] {
            assert!(grid.is_alive(id), "{id:?} should survive");
        }
        assert!(approx_eq(grid.cell(bottom_left).unwrap().top, 0.0, 1e-5));
        assert!(approx_eq(grid.cell(bottom_mid).unwrap().top, 0.0, 1e-5));
        assert_eq!(grid.check_partition(), Ok(()));
    }

    #[test]
    fn aligned_prefers_top() {
        let (grid, [tl, bl, tr, br]) = quadrants();
        // Bottom-right could merge up into tr or left into bl.
        assert_eq!(
            Edge::new(br, Left).find_aligned_across(&grid).as_slice(),
            &[bl]
        );
        let (side, group) = Edge::aligned(&grid, br).unwrap();
        assert_eq!(side, Top);
        assert_eq!(group.as_slice(), &[tr]);

        let (side, group) = Edge::aligned(&grid, tl).unwrap();
        assert_eq!(side, Bottom);
        assert_eq!(group.as_slice(), &[bl]);
    }

    #[test]
    fn delete_merges_into_preferred_side() {
        let (mut grid, [tl, bl, tr, br]) = quadrants();
        Edge::delete_cell(&mut grid, br).unwrap();
        assert!(!grid.is_alive(br));
        assert_cell(&grid, tr, Cell::new(0.0, 0.5, 0.0, 0.0));
        assert_cell(&grid, tl, Cell::new(0.0, 0.0, 0.5, 0.5));
        assert_cell(&grid, bl, Cell::new(0.5, 0.0, 0.0, 0.5));
        assert_eq!(grid.check_partition(), Ok(()));
    }

    #[test]
    fn delete_undoes_splits() {
        let (mut grid, [main, actions, properties, log, tree]) = editor_layout();
        grid.delete(tree).unwrap();
        assert_cell(&grid, main, Cell::new(0.0, 0.0, 0.3, 0.3));
        grid.delete(log).unwrap();
        assert_cell(&grid, main, Cell::new(0.0, 0.0, 0.0, 0.3));
        grid.delete(properties).unwrap();
        assert_cell(&grid, actions, Cell::new(0.0, 0.7, 0.0, 0.0));
        grid.delete(actions).unwrap();
        assert_cell(&grid, main, Cell::FULL);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.check_partition(), Ok(()));
    }

    #[test]
    fn delete_reports_changes() {
        let (mut grid, [_, _, tr, br]) = quadrants();
        let _ = grid.take_changes();
        grid.delete(br).unwrap();
        let changes = grid.take_changes();
        assert_eq!(changes.updated.as_slice(), &[tr]);
        assert_eq!(changes.removed.as_slice(), &[br]);
    }

    #[test]
    fn delete_last_cell_fails_cleanly() {
        let mut grid = Grid::default();
        let only = grid.add_cell(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            Edge::delete_cell(&mut grid, only),
            Err(TilingError::GapCannotBeFilled { cell: only })
        );
        assert!(grid.is_alive(only));
        assert_cell(&grid, only, Cell::FULL);
    }

    #[test]
    fn delete_stale_cell() {
        let (mut grid, [.., br]) = quadrants();
        grid.delete(br).unwrap();
        assert_eq!(grid.delete(br), Err(TilingError::StaleCell { cell: br }));
    }
}
