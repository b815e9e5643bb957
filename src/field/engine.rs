//! The simulation engine: one generation per `step` call.
//!
//! Single-threaded and tick-driven. The embedding render loop calls
//! [`LifeEngine::step`] at most once per its configured interval; every
//! call completes a full generation synchronously and returns the lifecycle
//! events the renderer should play. Stopping the loop simply stops the
//! simulation; no generation is ever left half-applied.

use std::time::Instant;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{FieldConfig, RespawnMode, Timings};
use crate::field::activity::ActivitySet;
use crate::field::board::Board;
use crate::field::events::CellEvent;
use crate::field::patterns;
use crate::field::stasis::{BoardSnapshot, StasisDetector};

/// Hue rotation applied on each birth inheritance when shifting colors are
/// enabled.
const HUE_STEP: f32 = 0.005;

/// Every this many generations, emit a full-board `Resync` sweep so the
/// renderer can repair any desync caused by interrupted animations.
const VISUAL_SYNC_INTERVAL: u32 = 100;

/// Resting alpha of a dead cell while death-fade keeps it dimly visible.
const DEAD_DIM_ALPHA: f32 = 0.2;

pub struct LifeEngine<R: Rng = StdRng> {
    config: FieldConfig,
    timings: Timings,
    board: Board,
    activity: ActivitySet,
    stasis: StasisDetector,
    rng: R,
    generation: u64,
    population: usize,
    generations_since_sync: u32,
}

impl LifeEngine<StdRng> {
    /// Build a field from configuration with an OS-seeded random source.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> LifeEngine<R> {
    /// Build a field with an explicit random source. A seeded `StdRng`
    /// makes the whole simulation deterministic, which is how the tests
    /// drive it.
    pub fn with_rng(config: FieldConfig, rng: R) -> Self {
        let (columns, rows) = config.square_size.grid_size();
        Self::with_grid(config, columns, rows, rng)
    }

    /// Build a field with explicit visible dimensions instead of the ones
    /// implied by `square_size`.
    pub fn with_grid(config: FieldConfig, columns: usize, rows: usize, rng: R) -> Self {
        let board = Board::new(columns, rows, config.grid_mode);
        info!(
            "field created: {}x{} visible ({}x{} total), {:?}",
            columns,
            rows,
            board.columns(),
            board.rows(),
            config.grid_mode,
        );
        let cell_count = board.len();
        Self {
            timings: config.timings(),
            board,
            activity: ActivitySet::new(cell_count),
            stasis: StasisDetector::new(),
            rng,
            generation: 0,
            population: 0,
            generations_since_sync: 0,
            config,
        }
    }

    /// Tear down the current board and start over with new settings. All
    /// simulation state (board, active set, stasis history) is replaced;
    /// the random source is kept.
    pub fn rebuild(&mut self, config: FieldConfig) {
        let (columns, rows) = config.square_size.grid_size();
        let board = Board::new(columns, rows, config.grid_mode);
        info!(
            "field rebuilt: {}x{} visible, {:?}",
            columns, rows, config.grid_mode
        );
        self.activity = ActivitySet::new(board.len());
        self.stasis = StasisDetector::new();
        self.board = board;
        self.timings = config.timings();
        self.config = config;
        self.generation = 0;
        self.population = 0;
        self.generations_since_sync = 0;
    }

    /// Kill every living cell and reset activity and stasis tracking, so
    /// the next step re-evaluates the whole (empty) board and reseeds.
    /// Returns the dying events for the renderer.
    pub fn end_life(&mut self) -> Vec<CellEvent> {
        let mut events = Vec::new();
        let live: Vec<usize> = self.board.live_indices().collect();
        for idx in live {
            let visible = self.board.visible_coord(idx);
            let cell = self.board.cell_mut(idx);
            cell.alive = false;
            cell.dead_color = cell.alive_color;
            cell.age_in_state = 0;
            if let Some(coord) = visible {
                events.push(self.dying_event(coord));
            }
        }
        self.population = 0;
        self.activity.clear();
        self.stasis.reset();
        events
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Whether the visible cell at (col, row) is alive.
    pub fn is_alive(&self, col: usize, row: usize) -> bool {
        self.board.cell(self.board.visible_index(col, row)).alive
    }

    /// Manually wake a visible cell, marking it and its neighbors for
    /// re-evaluation. Intended for tests and embedding hosts that seed by
    /// hand.
    pub fn set_cell_alive(&mut self, col: usize, row: usize) {
        let idx = self.board.visible_index(col, row);
        let cell = self.board.cell_mut(idx);
        if !cell.alive {
            cell.alive = true;
            cell.alive_color = self.config.palette[0];
            cell.age_in_state = 0;
            self.population += 1;
        }
        mark_with_neighbors(&mut self.activity, &self.board, idx);
    }

    /// Advance one generation. `now` is the caller's wall clock, used only
    /// for stagnation timing.
    pub fn step(&mut self, now: Instant) -> Vec<CellEvent> {
        // Drain the active set accumulated by the previous generation;
        // inserts from this point land in the next one. An empty set means
        // evaluate everything (first tick, or right after a reset).
        let drained = self.activity.take();
        let full_scan = drained.is_empty();
        let candidates: Vec<u32> = if full_scan {
            (0..self.board.len() as u32).collect()
        } else {
            drained
        };

        let mut dying: Vec<u32> = Vec::new();
        let mut living: Vec<u32> = Vec::new();

        // Classify every candidate against an immutable view of the board;
        // alive flags are only flipped after this loop completes.
        for &idx in &candidates {
            let idx = idx as usize;
            let mut live_neighbors = [0u32; 8];
            let mut live_count = 0;
            for n in self.board.neighbor_indices(idx) {
                if self.board.cell(n).alive {
                    live_neighbors[live_count] = n as u32;
                    live_count += 1;
                }
            }

            if self.board.cell(idx).alive {
                if !(2..=3).contains(&live_count) {
                    dying.push(idx as u32);
                    mark_with_neighbors(&mut self.activity, &self.board, idx);
                } else {
                    living.push(idx as u32);
                }
            } else if live_count == 3 {
                let inherited = live_neighbors[self.rng.random_range(0..live_count)] as usize;
                let mut color = self.board.cell(inherited).alive_color;
                if self.config.shifting_colors {
                    color = color.shift_hue(HUE_STEP);
                }
                self.board.cell_mut(idx).alive_color = color;
                living.push(idx as u32);
                mark_with_neighbors(&mut self.activity, &self.board, idx);
            } else {
                dying.push(idx as u32);
            }
        }

        // A fully dead board reseeds immediately so the screen is never
        // empty for more than one tick. This is also how the very first
        // generation gets its starting pattern.
        if living.is_empty() {
            debug!(
                "board died out at generation {}, seeding {:?}",
                self.generation, self.config.starting_pattern
            );
            let first_seeded = living.len();
            patterns::seed(&mut self.board, &self.config, &mut self.rng, &mut living);
            for i in first_seeded..living.len() {
                mark_with_neighbors(&mut self.activity, &self.board, living[i] as usize);
            }
        }

        // Stagnation check runs on what the board will look like after this
        // generation is applied.
        let snapshot: BoardSnapshot = living
            .iter()
            .map(|&idx| {
                let (c, r) = self.board.coord(idx as usize);
                (c as u16, r as u16)
            })
            .collect();
        if self
            .stasis
            .observe(&snapshot, now, self.config.stasis_delay())
        {
            debug!(
                "stagnation expired at generation {}, respawning ({:?}, {:?})",
                self.generation, self.config.respawn_mode, self.config.starting_pattern
            );
            if self.config.respawn_mode == RespawnMode::FreshStart {
                living.clear();
                dying.extend(self.board.live_indices().map(|i| i as u32));
            }
            let first_seeded = living.len();
            patterns::seed(&mut self.board, &self.config, &mut self.rng, &mut living);
            for i in first_seeded..living.len() {
                mark_with_neighbors(&mut self.activity, &self.board, living[i] as usize);
            }
        }

        // Apply all decisions, dying first so a reseed can revive a cell
        // killed in the same generation (the later event wins).
        let mut events = Vec::new();
        for &idx in &dying {
            let idx = idx as usize;
            let visible = self.board.visible_coord(idx);
            let cell = self.board.cell_mut(idx);
            if cell.alive {
                cell.alive = false;
                cell.dead_color = cell.alive_color;
                cell.age_in_state = 0;
                self.population -= 1;
                if let Some(coord) = visible {
                    events.push(self.dying_event(coord));
                }
            } else {
                cell.age_in_state += 1;
            }
        }
        for &idx in &living {
            let idx = idx as usize;
            let visible = self.board.visible_coord(idx);
            let cell = self.board.cell_mut(idx);
            if !cell.alive {
                cell.alive = true;
                cell.age_in_state = 0;
                self.population += 1;
                let color = cell.alive_color;
                if let Some(coord) = visible {
                    events.push(CellEvent::BecameAlive {
                        cell: coord,
                        color,
                        fade_in: self.timings.fade_in,
                    });
                }
            } else {
                cell.age_in_state += 1;
            }
        }

        self.generation += 1;
        self.generations_since_sync += 1;
        if self.generations_since_sync >= VISUAL_SYNC_INTERVAL {
            self.generations_since_sync = 0;
            self.push_resync_sweep(&mut events);
        }

        trace!(
            "generation {}: {} candidates ({}), population {}",
            self.generation,
            candidates.len(),
            if full_scan { "full scan" } else { "active set" },
            self.population,
        );

        events
    }

    fn dying_event(&self, cell: (u16, u16)) -> CellEvent {
        CellEvent::BeganDying {
            cell,
            dim: self.timings.fade_dim,
            hold: self.timings.fade_hold,
            fade_out: self.timings.fade_out,
            fade: self.config.death_fade,
        }
    }

    /// Full-board visual consistency sweep, independent of the active set:
    /// tell the renderer what alpha every settled visible cell should be
    /// showing by now.
    fn push_resync_sweep(&self, events: &mut Vec<CellEvent>) {
        let dead_alpha = if self.config.death_fade {
            DEAD_DIM_ALPHA
        } else {
            0.0
        };
        for idx in 0..self.board.len() {
            if let Some(coord) = self.board.visible_coord(idx) {
                let expected_alpha = if self.board.cell(idx).alive {
                    1.0
                } else {
                    dead_alpha
                };
                events.push(CellEvent::Resync {
                    cell: coord,
                    expected_alpha,
                });
            }
        }
    }
}

/// Mark a state-changing cell and all of its neighbors for re-evaluation
/// next generation, since a flip changes every neighbor's living count.
fn mark_with_neighbors(activity: &mut ActivitySet, board: &Board, idx: usize) {
    activity.insert(idx as u32);
    for n in board.neighbor_indices(idx) {
        activity.insert(n as u32);
    }
}
