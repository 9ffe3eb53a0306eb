// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The container: cell storage, line queries, hit testing, and change tracking.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::cell::{Cell, CellId};
use crate::direction::Direction;
use crate::edge::Edge;
use crate::error::{PartitionViolation, TilingError};
use crate::geometry::{closest_side, is_point_in_rect};
use crate::util::approx_eq;

/// Cells lying on one side of a line. Usually only a handful.
pub type CellGroup = SmallVec<[CellId; 4]>;

/// Offsets closer than this are treated as the same line.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Smallest extent, in pixels, a drag may leave a cell with.
pub const DEFAULT_MIN_CELL_SIZE: f64 = 20.0;

/// Tunables for a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Fractional distance under which two offsets are considered equal.
    ///
    /// Repeated splits and drags accumulate floating point drift, so line
    /// membership is never tested with exact equality.
    pub tolerance: f64,
    /// Minimum extent in pixels that an interactive resize leaves on the
    /// shrinking side of a line.
    pub min_cell_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
        }
    }
}

/// Cells touched since the last [`Grid::take_changes`].
///
/// A renderer drains this after each operation and re-projects the listed
/// cells with [`Grid::cell_rect`]. A cell added and removed within the same
/// batch is reported in neither list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Newly created cells.
    pub added: Vec<CellId>,
    /// Live cells whose offsets changed (excluding ones in `added`).
    pub updated: Vec<CellId>,
    /// Cells that no longer exist.
    pub removed: Vec<CellId>,
}

impl Changes {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    cell: Cell,
}

/// A container tiled by non-overlapping [`Cell`]s.
///
/// The grid owns its cells; callers hold [`CellId`]s and pass the grid
/// explicitly to every [`Edge`] operation. Cells are kept in insertion order,
/// which is the iteration order of every query and therefore the tie-break
/// order of hit testing and alignment searches.
///
/// ## Example
///
/// ```rust
/// use kurbo::Size;
/// use understory_tiling::{Direction, Edge, Grid};
///
/// let mut grid = Grid::new(Size::new(800.0, 600.0));
/// let main = grid.add_cell(0.0, 0.0, 0.0, 0.0);
/// let side = Edge::split_cell(&mut grid, main, Direction::Right, 0.25).unwrap();
///
/// assert_eq!(grid.len(), 2);
/// assert_eq!(grid.cell(main).unwrap().right, 0.25);
/// assert_eq!(grid.cell(side).unwrap().left, 0.75);
/// assert!(grid.check_partition().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    slots: Vec<Option<Slot>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    order: Vec<CellId>,
    size: Size,
    config: GridConfig,
    changes: Changes,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Size::new(1.0, 1.0))
    }
}

impl Grid {
    /// Create an empty grid for a container of `size` pixels.
    pub fn new(size: Size) -> Self {
        Self::with_config(size, GridConfig::default())
    }

    /// Create an empty grid with explicit tunables.
    pub fn with_config(size: Size, config: GridConfig) -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            size,
            config,
            changes: Changes::default(),
        }
    }

    /// The active tunables.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Container size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Update the container size after the host surface resized.
    ///
    /// Offsets are fractional and stay as they are; every cell is reported as
    /// updated because its pixel rectangle moved.
    pub fn set_size(&mut self, size: Size) {
        if self.size == size {
            return;
        }
        self.size = size;
        for i in 0..self.order.len() {
            let id = self.order[i];
            self.mark_updated(id);
        }
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` names a live cell.
    pub fn is_alive(&self, id: CellId) -> bool {
        matches!(
            self.slots.get(id.idx()),
            Some(Some(slot)) if slot.generation == id.generation()
        )
    }

    /// The cell for a live id.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        let slot = self.slots.get(id.idx())?.as_ref()?;
        (slot.generation == id.generation()).then_some(&slot.cell)
    }

    /// Live cell ids in insertion order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.order.iter().copied()
    }

    /// Live cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.cell(id).map(|cell| (id, cell)))
    }

    /// Create a cell with the given offsets and append it to the grid.
    pub fn add_cell(&mut self, top: f64, left: f64, bottom: f64, right: f64) -> CellId {
        self.insert(Cell::new(top, left, bottom, right))
    }

    /// Append `cell` to the grid.
    ///
    /// The caller is responsible for keeping the tiling intact; structural
    /// edits should normally go through [`Edge::split`] instead.
    pub fn insert(&mut self, cell: Cell) -> CellId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot { generation, cell });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot { generation, cell }));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "CellId stores 32-bit slot indices."
        )]
        let id = CellId::new(idx as u32, generation);
        self.order.push(id);
        self.changes.added.push(id);
        id
    }

    /// Remove a cell, returning its last offsets.
    ///
    /// Returns `None` for stale ids. Like [`Grid::insert`], this does not
    /// repair the tiling; use [`Edge::delete_cell`] to close the gap.
    pub fn remove(&mut self, id: CellId) -> Option<Cell> {
        if !self.is_alive(id) {
            return None;
        }
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        self.order.retain(|&c| c != id);
        self.changes.updated.retain(|&c| c != id);
        let len_before = self.changes.added.len();
        self.changes.added.retain(|&c| c != id);
        if self.changes.added.len() == len_before {
            self.changes.removed.push(id);
        }
        Some(slot.cell)
    }

    /// Set one offset of a live cell.
    ///
    /// Only this cell changes, so the tiling is not repaired; move whole
    /// lines with [`resize_dimension`](crate::resize_dimension) instead.
    pub fn set_offset(
        &mut self,
        id: CellId,
        direction: Direction,
        value: f64,
    ) -> Result<(), TilingError> {
        self.cell_mut(id)?.set_offset(direction, value);
        Ok(())
    }

    /// Move one edge of a live cell by `delta` pixels.
    ///
    /// Like [`Grid::set_offset`], this does not keep the tiling intact on its
    /// own.
    pub fn change_distance_px(
        &mut self,
        id: CellId,
        direction: Direction,
        delta: f64,
    ) -> Result<(), TilingError> {
        let size = self.size;
        self.cell_mut(id)?.change_distance_px(direction, delta, size);
        Ok(())
    }

    /// Pixel extent of a live cell along `direction`'s axis.
    pub fn extent_px(&self, id: CellId, direction: Direction) -> Option<f64> {
        self.cell(id).map(|c| c.extent_px(direction, self.size))
    }

    /// Pixel rectangle of a live cell, for rendering.
    pub fn cell_rect(&self, id: CellId) -> Option<Rect> {
        self.cell(id).map(|c| c.rect(self.size))
    }

    /// Every cell whose offset in `direction` is within tolerance of `position`.
    pub fn aligned_cells(&self, direction: Direction, position: f64) -> CellGroup {
        let tolerance = self.config.tolerance;
        self.cells()
            .filter(|(_, c)| approx_eq(c.offset(direction), position, tolerance))
            .map(|(id, _)| id)
            .collect()
    }

    /// The first cell (in insertion order) whose pixel rectangle strictly contains `point`.
    ///
    /// `point` is relative to the container's top-left corner.
    pub fn cell_at(&self, point: Point) -> Option<CellId> {
        self.cells()
            .find(|(_, c)| is_point_in_rect(point, c.rect(self.size)))
            .map(|(id, _)| id)
    }

    /// The edge nearest to `point` on the cell under it.
    pub fn edge_at(&self, point: Point) -> Option<Edge> {
        let id = self.cell_at(point)?;
        let rect = self.cell_rect(id)?;
        Some(Edge::new(id, closest_side(point, rect)))
    }

    /// Split a cell; see [`Edge::split`].
    pub fn split(
        &mut self,
        cell: CellId,
        direction: Direction,
        ratio: f64,
    ) -> Result<CellId, TilingError> {
        Edge::new(cell, direction).split(self, ratio)
    }

    /// Delete a cell and close the gap; see [`Edge::delete_cell`].
    pub fn delete(&mut self, cell: CellId) -> Result<(), TilingError> {
        Edge::delete_cell(self, cell)
    }

    /// Drain the cells touched since the previous call.
    pub fn take_changes(&mut self) -> Changes {
        core::mem::take(&mut self.changes)
    }

    /// Verify that the cells tile the container.
    ///
    /// Every cell must have positive extent and stay inside the unit square
    /// (within tolerance), no two cells may overlap by more than tolerance on
    /// both axes, and the areas must sum to one.
    pub fn check_partition(&self) -> Result<(), PartitionViolation> {
        let tolerance = self.config.tolerance;
        let mut area = 0.0;
        for (id, cell) in self.cells() {
            if cell.width() <= 0.0 || cell.height() <= 0.0 {
                return Err(PartitionViolation::Degenerate { cell: id });
            }
            if Direction::ALL
                .into_iter()
                .any(|d| cell.offset(d) < -tolerance)
            {
                return Err(PartitionViolation::OutOfBounds { cell: id });
            }
            area += cell.area();
        }
        for (i, (a, ca)) in self.cells().enumerate() {
            let ra = ca.unit_rect();
            for (b, cb) in self.cells().skip(i + 1) {
                let overlap = ra.intersect(cb.unit_rect());
                if overlap.width() > tolerance && overlap.height() > tolerance {
                    return Err(PartitionViolation::Overlap { a, b });
                }
            }
        }
        if !self.is_empty() && !approx_eq(area, 1.0, tolerance) {
            return Err(PartitionViolation::Coverage { area });
        }
        Ok(())
    }

    /// Mutable access to a live cell; records it as updated.
    pub(crate) fn cell_mut(&mut self, id: CellId) -> Result<&mut Cell, TilingError> {
        if !self.is_alive(id) {
            return Err(TilingError::StaleCell { cell: id });
        }
        self.mark_updated(id);
        match self.slots[id.idx()].as_mut() {
            Some(slot) => Ok(&mut slot.cell),
            None => Err(TilingError::StaleCell { cell: id }),
        }
    }

    fn mark_updated(&mut self, id: CellId) {
        if !self.changes.added.contains(&id) && !self.changes.updated.contains(&id) {
            self.changes.updated.push(id);
        }
    }
}
