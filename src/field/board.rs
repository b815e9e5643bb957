//! Board storage: a dense, fixed-size grid of cells with pre-bound
//! neighbor indices.
//!
//! Cells are never added or removed after construction; life and death are
//! flag flips on the existing cells. Neighbor lists are computed exactly
//! once in [`Board::new`] and stay immutable for the board's lifetime.

use crate::config::{GridMode, Rgba};
use crate::field::topology;

/// Width of the invisible simulation margin around the visible region in
/// [`GridMode::Infinite`]. Wide enough for a glider stream to fully leave
/// the screen before starving at the true edge.
pub const MARGIN: usize = 10;

/// Sentinel value for "no neighbor" in a [`Neighbors`] array.
pub const NO_NEIGHBOR: u32 = u32::MAX;

/// Pre-bound neighbor cell indices, padded with `NO_NEIGHBOR`.
///
/// All 8 slots are populated in toroidal mode; bounded-edge cells have
/// fewer. Raw u32 indices keep the array compact on the hot path.
pub type Neighbors = [u32; 8];

/// One square of the field.
#[derive(Clone, Debug)]
pub struct Cell {
    pub alive: bool,
    /// Generations spent in the current alive/dead state.
    pub age_in_state: u32,
    /// Color the cell shows while alive; set at birth.
    pub alive_color: Rgba,
    /// Color at the moment of the last death, kept as a tint for the
    /// renderer while the cell fades.
    pub dead_color: Rgba,
}

impl Cell {
    fn dead(color: Rgba) -> Self {
        Self {
            alive: false,
            age_in_state: 0,
            alive_color: color,
            dead_color: color,
        }
    }
}

/// The complete grid: every cell, its neighbor bindings, and the visible
/// sub-region the renderer is allowed to see.
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    neighbors: Vec<Neighbors>,
    visible_origin: (usize, usize),
    visible_columns: usize,
    visible_rows: usize,
}

impl Board {
    /// Build a board whose visible region is `visible_columns x visible_rows`.
    ///
    /// In toroidal mode the whole board is visible. In infinite mode the
    /// true grid is larger by [`MARGIN`] on every side; margin cells
    /// simulate normally but are never reported to the renderer.
    ///
    /// Panics if either visible dimension is zero; that can only come from
    /// a defective configuration collaborator.
    pub fn new(visible_columns: usize, visible_rows: usize, mode: GridMode) -> Self {
        assert!(
            visible_columns > 0 && visible_rows > 0,
            "board dimensions must be positive, got {visible_columns}x{visible_rows}"
        );

        let (columns, rows, visible_origin) = match mode {
            GridMode::Toroidal => (visible_columns, visible_rows, (0, 0)),
            GridMode::Infinite => (
                visible_columns + 2 * MARGIN,
                visible_rows + 2 * MARGIN,
                (MARGIN, MARGIN),
            ),
        };

        let total = columns * rows;
        let cells = vec![Cell::dead(Rgba::opaque(0.0, 0.0, 0.0)); total];

        let mut neighbors = vec![[NO_NEIGHBOR; 8]; total];
        let mut scratch = [(0usize, 0usize); 8];
        for row in 0..rows {
            for col in 0..columns {
                let count = topology::neighbors(mode, columns, rows, col, row, &mut scratch);
                let entry = &mut neighbors[row * columns + col];
                for (slot, &(nc, nr)) in entry.iter_mut().zip(scratch[..count].iter()) {
                    *slot = (nr * columns + nc) as u32;
                }
            }
        }

        Self {
            columns,
            rows,
            cells,
            neighbors,
            visible_origin,
            visible_columns,
            visible_rows,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total cell count. Constant for the board's lifetime.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn visible_columns(&self) -> usize {
        self.visible_columns
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.columns && row < self.rows);
        row * self.columns + col
    }

    #[inline]
    pub fn coord(&self, idx: usize) -> (usize, usize) {
        (idx % self.columns, idx / self.columns)
    }

    /// Board index of a coordinate given in visible-region space.
    #[inline]
    pub fn visible_index(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.visible_columns && row < self.visible_rows);
        self.index(self.visible_origin.0 + col, self.visible_origin.1 + row)
    }

    /// Visible-region coordinate of a cell, or `None` for margin cells.
    #[inline]
    pub fn visible_coord(&self, idx: usize) -> Option<(u16, u16)> {
        let (col, row) = self.coord(idx);
        let (ox, oy) = self.visible_origin;
        if col >= ox && col < ox + self.visible_columns && row >= oy && row < oy + self.visible_rows
        {
            Some(((col - ox) as u16, (row - oy) as u16))
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    #[inline]
    pub fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    #[inline]
    pub fn neighbors_of(&self, idx: usize) -> &Neighbors {
        &self.neighbors[idx]
    }

    /// Iterate the neighbor indices of a cell, skipping sentinel slots.
    #[inline]
    pub fn neighbor_indices(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[idx]
            .iter()
            .take_while(|&&n| n != NO_NEIGHBOR)
            .map(|&n| n as usize)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    pub fn live_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.alive)
            .map(|(i, _)| i)
    }
}
