//! The active-set optimization must be invisible: N generations with dirty
//! tracking have to match a naive always-full-board reference, flag for
//! flag, on both topologies.

use std::collections::HashSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ambient_life::field::MARGIN;
use ambient_life::{FieldConfig, GridMode, LifeEngine};

/// Naive full-board step over a `columns x rows` grid. `wrap` selects
/// toroidal neighbor addressing; otherwise out-of-range neighbors simply
/// do not exist.
fn step_reference(
    alive: &HashSet<(i32, i32)>,
    columns: i32,
    rows: i32,
    wrap: bool,
) -> HashSet<(i32, i32)> {
    let mut next = HashSet::new();
    for row in 0..rows {
        for col in 0..columns {
            let mut count = 0;
            for dc in -1..=1 {
                for dr in -1..=1 {
                    if dc == 0 && dr == 0 {
                        continue;
                    }
                    let (mut nc, mut nr) = (col + dc, row + dr);
                    if wrap {
                        nc = nc.rem_euclid(columns);
                        nr = nr.rem_euclid(rows);
                    } else if nc < 0 || nc >= columns || nr < 0 || nr >= rows {
                        continue;
                    }
                    if alive.contains(&(nc, nr)) {
                        count += 1;
                    }
                }
            }
            let is_alive = alive.contains(&(col, row));
            let lives_on = if is_alive {
                count == 2 || count == 3
            } else {
                count == 3
            };
            if lives_on {
                next.insert((col, row));
            }
        }
    }
    next
}

fn engine_live(engine: &LifeEngine<StdRng>) -> HashSet<(i32, i32)> {
    let board = engine.board();
    board
        .live_indices()
        .map(|idx| {
            let (c, r) = board.coord(idx);
            (c as i32, r as i32)
        })
        .collect()
}

fn random_cells(seed: u64, columns: usize, rows: usize, density: f64) -> Vec<(usize, usize)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cells = Vec::new();
    for row in 0..rows {
        for col in 0..columns {
            if rng.random::<f64>() < density {
                cells.push((col, row));
            }
        }
    }
    cells
}

#[test]
fn toroidal_engine_matches_reference() {
    let t0 = Instant::now();
    let mut engine = LifeEngine::with_grid(
        FieldConfig::default(),
        24,
        16,
        StdRng::seed_from_u64(0xBADC0FFE),
    );

    let mut reference: HashSet<(i32, i32)> = HashSet::new();
    for (col, row) in random_cells(0x5EED, 24, 16, 0.33) {
        engine.set_cell_alive(col, row);
        reference.insert((col as i32, row as i32));
    }

    for generation in 0..12 {
        assert_eq!(
            engine_live(&engine),
            reference,
            "divergence at generation {generation}"
        );
        engine.step(t0);
        reference = step_reference(&reference, 24, 16, true);
    }
}

#[test]
fn infinite_engine_matches_bounded_reference() {
    let t0 = Instant::now();
    let config = FieldConfig::default().grid_mode(GridMode::Infinite);
    let mut engine = LifeEngine::with_grid(config, 24, 16, StdRng::seed_from_u64(0xDEAD_BEEF));

    // The reference grid is the full simulation area: visible plus margin.
    let (total_cols, total_rows) = (24 + 2 * MARGIN, 16 + 2 * MARGIN);
    let mut reference: HashSet<(i32, i32)> = HashSet::new();
    for (col, row) in random_cells(0xFEED, 24, 16, 0.33) {
        engine.set_cell_alive(col, row);
        reference.insert(((col + MARGIN) as i32, (row + MARGIN) as i32));
    }

    for generation in 0..12 {
        assert_eq!(
            engine_live(&engine),
            reference,
            "divergence at generation {generation}"
        );
        engine.step(t0);
        reference = step_reference(&reference, total_cols as i32, total_rows as i32, false);
    }
}
