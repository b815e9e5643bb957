//! Seed pattern library.
//!
//! Every generator writes birth colors straight into board cells and
//! appends the affected cell indices to the caller's list; the engine turns
//! those into actual births and folds them into the next active set.
//!
//! Placement is always validated against the visible grid size. A grid too
//! small for a requested template falls back to the default random scatter
//! instead of failing or truncating the pattern.

use log::debug;
use rand::Rng;

use crate::config::{FieldConfig, Rgba, StartingPattern};
use crate::field::board::{Board, NO_NEIGHBOR};

/// A fixed-geometry seed: literal cell offsets inside a bounding box.
/// Offsets are (col, row) from the top-left corner of the box.
struct Template {
    cells: &'static [(u8, u8)],
    width: u8,
    height: u8,
}

/// The four diagonal glider orientations, offsets around a center anchor:
/// down-right, down-left, up-right, up-left.
const GLIDER_ORIENTATIONS: [[(i8, i8); 5]; 4] = [
    [(0, 1), (1, 0), (-1, -1), (0, -1), (1, -1)],
    [(0, 1), (-1, 0), (1, -1), (0, -1), (-1, -1)],
    [(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)],
    [(0, -1), (-1, 0), (1, 1), (0, 1), (-1, 1)],
];

/// Gosper glider gun: 36 cells in a 36x9 box.
const GOSPER_GUN: Template = Template {
    width: 36,
    height: 9,
    cells: &[
        // Left block
        (0, 4),
        (0, 5),
        (1, 4),
        (1, 5),
        // Left part of gun
        (10, 4),
        (10, 5),
        (10, 6),
        (11, 3),
        (11, 7),
        (12, 2),
        (12, 8),
        (13, 2),
        (13, 8),
        (14, 5),
        (15, 3),
        (15, 7),
        (16, 4),
        (16, 5),
        (16, 6),
        (17, 5),
        // Right part of gun
        (20, 2),
        (20, 3),
        (20, 4),
        (21, 2),
        (21, 3),
        (21, 4),
        (22, 1),
        (22, 5),
        (24, 0),
        (24, 1),
        (24, 5),
        (24, 6),
        // Right block
        (34, 2),
        (34, 3),
        (35, 2),
        (35, 3),
    ],
};

/// R-pentomino: tiny methuselah, chaotic for ~1100 generations.
const R_PENTOMINO: Template = Template {
    width: 3,
    height: 3,
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

/// Acorn: 7 cells that take thousands of generations to settle.
const ACORN: Template = Template {
    width: 7,
    height: 3,
    cells: &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
};

/// Pulsar: the classic period-3 oscillator, 48 cells in 13x13.
const PULSAR: Template = Template {
    width: 13,
    height: 13,
    cells: &[
        (2, 0),
        (3, 0),
        (4, 0),
        (8, 0),
        (9, 0),
        (10, 0),
        (0, 2),
        (5, 2),
        (7, 2),
        (12, 2),
        (0, 3),
        (5, 3),
        (7, 3),
        (12, 3),
        (0, 4),
        (5, 4),
        (7, 4),
        (12, 4),
        (2, 5),
        (3, 5),
        (4, 5),
        (8, 5),
        (9, 5),
        (10, 5),
        (2, 7),
        (3, 7),
        (4, 7),
        (8, 7),
        (9, 7),
        (10, 7),
        (0, 8),
        (5, 8),
        (7, 8),
        (12, 8),
        (0, 9),
        (5, 9),
        (7, 9),
        (12, 9),
        (0, 10),
        (5, 10),
        (7, 10),
        (12, 10),
        (2, 12),
        (3, 12),
        (4, 12),
        (8, 12),
        (9, 12),
        (10, 12),
    ],
};

/// Pentadecathlon: period-15 oscillator.
const PENTADECATHLON: Template = Template {
    width: 4,
    height: 9,
    cells: &[
        (1, 0),
        (2, 0),
        (0, 1),
        (3, 1),
        (0, 2),
        (3, 2),
        (1, 3),
        (2, 3),
        (1, 4),
        (2, 4),
        (1, 5),
        (2, 5),
        (0, 6),
        (3, 6),
        (0, 7),
        (3, 7),
        (1, 8),
        (2, 8),
    ],
};

/// Lightweight spaceship, travelling horizontally.
const LIGHTWEIGHT: Template = Template {
    width: 5,
    height: 4,
    cells: &[
        (1, 0),
        (4, 0),
        (0, 1),
        (0, 2),
        (4, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (3, 3),
    ],
};

/// Puffer train: two lightweight spaceships escorting an unstable engine,
/// leaving debris behind as the trio travels.
const PUFFER_TRAIN: Template = Template {
    width: 5,
    height: 18,
    cells: &[
        (0, 0),
        (3, 0),
        (4, 1),
        (0, 2),
        (4, 2),
        (1, 3),
        (2, 3),
        (3, 3),
        (4, 3),
        (0, 7),
        (2, 8),
        (3, 9),
        (3, 10),
        (0, 11),
        (3, 11),
        (1, 12),
        (2, 12),
        (3, 12),
        (0, 14),
        (3, 14),
        (4, 15),
        (0, 16),
        (4, 16),
        (1, 17),
        (2, 17),
        (3, 17),
        (4, 17),
    ],
};

/// Smallest visible grid a glider anchor range fits on.
const GLIDER_MIN: usize = 5;
/// Smallest visible grid the three lonely-glider regions fit on.
const LONELY_MIN: usize = 9;

/// Seed the board with the configured starting pattern, appending every
/// marked cell index to `out`.
pub(crate) fn seed<R: Rng>(
    board: &mut Board,
    config: &FieldConfig,
    rng: &mut R,
    out: &mut Vec<u32>,
) {
    match config.starting_pattern {
        StartingPattern::DefaultRandom => {
            scatter(board, config, rng, config.square_size.scatter_count(), out)
        }
        StartingPattern::Sparse => scatter(
            board,
            config,
            rng,
            config.square_size.sparse_scatter_count(),
            out,
        ),
        StartingPattern::Gliders => {
            gliders(board, config, rng, config.square_size.glider_count(), out)
        }
        StartingPattern::SparseGliders => gliders(
            board,
            config,
            rng,
            config.square_size.sparse_glider_count(),
            out,
        ),
        StartingPattern::LonelyGliders => lonely_gliders(board, config, rng, out),
        StartingPattern::GosperGun => {
            place_template(board, config, rng, &GOSPER_GUN, Anchor::CenterJitter, out)
        }
        StartingPattern::RPentomino => {
            place_template(board, config, rng, &R_PENTOMINO, Anchor::Random, out)
        }
        StartingPattern::Acorn => place_template(board, config, rng, &ACORN, Anchor::Random, out),
        StartingPattern::Pulsar => {
            place_template(board, config, rng, &PULSAR, Anchor::CenterJitter, out)
        }
        StartingPattern::Pentadecathlon => place_template(
            board,
            config,
            rng,
            &PENTADECATHLON,
            Anchor::CenterJitter,
            out,
        ),
        StartingPattern::Lightweight => {
            place_template(board, config, rng, &LIGHTWEIGHT, Anchor::Random, out)
        }
        StartingPattern::PufferTrain => {
            place_template(board, config, rng, &PUFFER_TRAIN, Anchor::Random, out)
        }
    }
}

fn random_color<R: Rng>(config: &FieldConfig, rng: &mut R) -> Rgba {
    config.palette[rng.random_range(0..config.palette.len())]
}

/// Random scatter: pick a visible cell, wake roughly half of its neighbors
/// with a shared color, repeat. Repetition count is scaled by square size
/// so density looks the same at every setting.
fn scatter<R: Rng>(
    board: &mut Board,
    config: &FieldConfig,
    rng: &mut R,
    repetitions: usize,
    out: &mut Vec<u32>,
) {
    let (w, h) = (board.visible_columns(), board.visible_rows());
    for _ in 0..repetitions {
        let anchor = board.visible_index(rng.random_range(0..w), rng.random_range(0..h));
        let color = random_color(config, rng);
        let neighbors = *board.neighbors_of(anchor);
        for n in neighbors.iter().take_while(|&&n| n != NO_NEIGHBOR) {
            if rng.random_bool(0.5) {
                board.cell_mut(*n as usize).alive_color = color;
                out.push(*n);
            }
        }
    }
}

/// Place `count` gliders at random anchors, each in a random diagonal
/// orientation with a random palette color.
fn gliders<R: Rng>(
    board: &mut Board,
    config: &FieldConfig,
    rng: &mut R,
    count: usize,
    out: &mut Vec<u32>,
) {
    let (w, h) = (board.visible_columns(), board.visible_rows());
    if w < GLIDER_MIN || h < GLIDER_MIN {
        debug!("grid {w}x{h} too small for gliders, falling back to random scatter");
        return scatter(board, config, rng, config.square_size.scatter_count(), out);
    }

    for _ in 0..count {
        let cx = rng.random_range(2..w - 2);
        let cy = rng.random_range(2..h - 2);
        let color = random_color(config, rng);
        let orientation = GLIDER_ORIENTATIONS[rng.random_range(0..GLIDER_ORIENTATIONS.len())];
        write_glider(board, cx, cy, orientation, color, out);
    }
}

/// Exactly three gliders in three disjoint screen regions, one per palette
/// color, so each can be watched on its own: top-left heading down-right,
/// top-right heading down-left, bottom-center heading up at random.
fn lonely_gliders<R: Rng>(
    board: &mut Board,
    config: &FieldConfig,
    rng: &mut R,
    out: &mut Vec<u32>,
) {
    let (w, h) = (board.visible_columns(), board.visible_rows());
    if w < LONELY_MIN || h < LONELY_MIN {
        debug!("grid {w}x{h} too small for lonely gliders, falling back to random scatter");
        return scatter(board, config, rng, config.square_size.scatter_count(), out);
    }

    let placements = [
        (2..=w / 3, 2..=h / 3, 0),
        (w * 2 / 3..=w - 3, 2..=h / 3, 1),
        (w / 3..=w * 2 / 3, h * 2 / 3..=h - 3, rng.random_range(2..4)),
    ];

    for (i, (xs, ys, orientation)) in placements.into_iter().enumerate() {
        let cx = rng.random_range(xs);
        let cy = rng.random_range(ys);
        let color = config.palette[i % config.palette.len()];
        write_glider(board, cx, cy, GLIDER_ORIENTATIONS[orientation], color, out);
    }
}

fn write_glider(
    board: &mut Board,
    cx: usize,
    cy: usize,
    offsets: [(i8, i8); 5],
    color: Rgba,
    out: &mut Vec<u32>,
) {
    for (dx, dy) in offsets {
        let col = (cx as i32 + dx as i32) as usize;
        let row = (cy as i32 + dy as i32) as usize;
        let idx = board.visible_index(col, row);
        board.cell_mut(idx).alive_color = color;
        out.push(idx as u32);
    }
}

enum Anchor {
    /// Centered on the visible region, nudged by a small random jitter.
    CenterJitter,
    /// Anywhere the bounding box fully fits.
    Random,
}

/// Stamp a fixed template onto the visible region with random horizontal
/// and vertical flips and a single random color. Falls back to the default
/// scatter when the visible grid is smaller than the bounding box.
fn place_template<R: Rng>(
    board: &mut Board,
    config: &FieldConfig,
    rng: &mut R,
    template: &Template,
    anchor: Anchor,
    out: &mut Vec<u32>,
) {
    let (w, h) = (board.visible_columns(), board.visible_rows());
    let (tw, th) = (template.width as usize, template.height as usize);
    if w < tw || h < th {
        debug!("grid {w}x{h} too small for a {tw}x{th} template, falling back to random scatter");
        return scatter(board, config, rng, config.square_size.scatter_count(), out);
    }

    fn jitter<R: Rng>(span: usize, extent: usize, rng: &mut R) -> usize {
        let base = (span - extent) / 2;
        let nudge = rng.random_range(-2i32..=2);
        (base as i32 + nudge).clamp(0, (span - extent) as i32) as usize
    }

    let (ax, ay) = match anchor {
        Anchor::Random => (
            rng.random_range(0..=w - tw),
            rng.random_range(0..=h - th),
        ),
        Anchor::CenterJitter => (jitter(w, tw, rng), jitter(h, th, rng)),
    };

    let flip_h = rng.random_bool(0.5);
    let flip_v = rng.random_bool(0.5);
    let color = random_color(config, rng);

    for &(x, y) in template.cells {
        let x = (if flip_h { template.width - 1 - x } else { x }) as usize;
        let y = (if flip_v { template.height - 1 - y } else { y }) as usize;
        let idx = board.visible_index(ax + x, ay + y);
        board.cell_mut(idx).alive_color = color;
        out.push(idx as u32);
    }
}
