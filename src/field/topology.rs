//! Neighbor addressing for the two grid topologies.
//!
//! Pure coordinate math, invoked once per cell when a board is built. The
//! toroidal mode wraps every offset, so each cell sees exactly 8 neighbors;
//! the bounded mode omits offsets that fall off the true grid edge, so edge
//! and corner cells see fewer and life there starves off naturally.

use crate::config::GridMode;

/// The 8 Moore-neighborhood offsets as (dcol, drow).
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

/// Collect the neighbor coordinates of `(col, row)` on a `columns x rows`
/// grid into `out`, returning how many were written.
///
/// Bounded mode omits out-of-range offsets rather than clamping or wrapping
/// them; the resulting count can be as low as 3 in a corner.
pub fn neighbors(
    mode: GridMode,
    columns: usize,
    rows: usize,
    col: usize,
    row: usize,
    out: &mut [(usize, usize); 8],
) -> usize {
    debug_assert!(col < columns && row < rows);
    let (w, h) = (columns as i32, rows as i32);
    let mut count = 0;
    for (dc, dr) in NEIGHBOR_OFFSETS {
        let (nc, nr) = (col as i32 + dc, row as i32 + dr);
        match mode {
            GridMode::Toroidal => {
                out[count] = (nc.rem_euclid(w) as usize, nr.rem_euclid(h) as usize);
                count += 1;
            }
            GridMode::Infinite => {
                if nc >= 0 && nc < w && nr >= 0 && nr < h {
                    out[count] = (nc as usize, nr as usize);
                    count += 1;
                }
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(mode: GridMode, columns: usize, rows: usize, col: usize, row: usize) -> Vec<(usize, usize)> {
        let mut buf = [(0, 0); 8];
        let n = neighbors(mode, columns, rows, col, row, &mut buf);
        buf[..n].to_vec()
    }

    #[test]
    fn toroidal_always_eight() {
        for (c, r) in [(0, 0), (4, 0), (0, 3), (4, 3), (2, 2)] {
            assert_eq!(collect(GridMode::Toroidal, 5, 4, c, r).len(), 8);
        }
    }

    #[test]
    fn toroidal_corner_wraps_to_opposite_corner() {
        let n = collect(GridMode::Toroidal, 5, 4, 0, 0);
        assert!(n.contains(&(4, 3)));
        assert!(n.contains(&(4, 0)));
        assert!(n.contains(&(0, 3)));
    }

    #[test]
    fn bounded_corner_has_three() {
        let n = collect(GridMode::Infinite, 5, 4, 0, 0);
        assert_eq!(n.len(), 3);
        assert!(n.contains(&(1, 0)));
        assert!(n.contains(&(0, 1)));
        assert!(n.contains(&(1, 1)));
    }

    #[test]
    fn bounded_edge_has_five() {
        assert_eq!(collect(GridMode::Infinite, 5, 4, 2, 0).len(), 5);
        assert_eq!(collect(GridMode::Infinite, 5, 4, 0, 2).len(), 5);
    }

    #[test]
    fn bounded_interior_has_eight() {
        assert_eq!(collect(GridMode::Infinite, 5, 4, 2, 2).len(), 8);
    }

    #[test]
    fn no_cell_is_its_own_neighbor_on_regular_grids() {
        for (c, r) in [(0, 0), (2, 1), (4, 3)] {
            assert!(!collect(GridMode::Toroidal, 5, 4, c, r).contains(&(c, r)));
        }
    }
}
