//! Stagnation detection over whole-board snapshots.
//!
//! A small circular buffer of recent alive-cell sets catches static boards
//! and period-2 oscillators (any two of three consecutive snapshots equal),
//! and a population floor catches the lone-spaceship case. Stagnation is
//! gated on elapsed wall-clock time rather than generation count, so the
//! user-perceived wait until a reseed is the same at every animation speed.

use std::collections::HashSet;
use std::time::{Duration, Instant};

/// The alive-cell coordinates of one generation. Pure value, compared for
/// set equality only.
pub type BoardSnapshot = HashSet<(u16, u16)>;

/// Populations at or below this count never meaningfully evolve on their
/// own (a single glider is 5 cells).
const LOW_POPULATION: usize = 5;

const SNAPSHOT_SLOTS: usize = 3;

pub struct StasisDetector {
    snapshots: [BoardSnapshot; SNAPSHOT_SLOTS],
    write_index: usize,
    filled: bool,
    stagnant_since: Option<Instant>,
}

impl StasisDetector {
    pub fn new() -> Self {
        Self {
            snapshots: Default::default(),
            write_index: 0,
            filled: false,
            stagnant_since: None,
        }
    }

    /// Record this generation's alive set and report whether the board has
    /// been stagnant for at least `delay` of real time.
    ///
    /// Returns `true` exactly once per stagnation episode; all snapshot and
    /// timer state is reset before returning, so the next report requires a
    /// full new episode.
    pub fn observe(&mut self, snapshot: &BoardSnapshot, now: Instant, delay: Duration) -> bool {
        self.snapshots[self.write_index] = snapshot.clone();
        self.write_index = (self.write_index + 1) % SNAPSHOT_SLOTS;
        if !self.filled && self.write_index == 0 {
            self.filled = true;
        }

        if !self.filled {
            return false;
        }

        let [a, b, c] = &self.snapshots;
        let repeating = a == b || a == c || b == c;
        let low_population = snapshot.len() <= LOW_POPULATION;

        if repeating || low_population {
            let since = *self.stagnant_since.get_or_insert(now);
            if now.duration_since(since) >= delay {
                self.reset();
                return true;
            }
        } else {
            self.stagnant_since = None;
        }

        false
    }

    /// Drop all recorded state. Called on field rebuilds and explicit
    /// end-of-life resets.
    pub fn reset(&mut self) {
        for slot in &mut self.snapshots {
            slot.clear();
        }
        self.write_index = 0;
        self.filled = false;
        self.stagnant_since = None;
    }
}

impl Default for StasisDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(cells: &[(u16, u16)]) -> BoardSnapshot {
        cells.iter().copied().collect()
    }

    #[test]
    fn needs_three_snapshots_before_reporting() {
        let mut detector = StasisDetector::new();
        let t0 = Instant::now();
        let frozen = snap(&[(1, 1), (1, 2), (2, 1), (2, 2), (5, 5), (6, 6)]);
        let delay = Duration::ZERO;
        assert!(!detector.observe(&frozen, t0, delay));
        assert!(!detector.observe(&frozen, t0, delay));
        // Third observation fills the buffer; with zero delay it fires.
        assert!(detector.observe(&frozen, t0, delay));
    }

    #[test]
    fn period_two_oscillation_is_stagnant() {
        let mut detector = StasisDetector::new();
        let t0 = Instant::now();
        let delay = Duration::from_secs(5);
        let a = snap(&[(4, 5), (5, 5), (6, 5), (9, 9), (9, 8), (8, 9)]);
        let b = snap(&[(5, 4), (5, 5), (5, 6), (9, 9), (9, 8), (8, 9)]);

        assert!(!detector.observe(&a, t0, delay));
        assert!(!detector.observe(&b, t0, delay));
        assert!(!detector.observe(&a, t0, delay));
        // Timer started at t0; past the delay it reports exactly once.
        assert!(detector.observe(&b, t0 + Duration::from_secs(6), delay));
        // State was reset: the same feed needs a whole new episode.
        assert!(!detector.observe(&a, t0 + Duration::from_secs(7), delay));
        assert!(!detector.observe(&b, t0 + Duration::from_secs(8), delay));
    }

    #[test]
    fn evolving_board_clears_the_timer() {
        let mut detector = StasisDetector::new();
        let t0 = Instant::now();
        let delay = Duration::from_secs(5);
        let a = snap(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
        let b = snap(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1), (5, 1)]);

        detector.observe(&a, t0, delay);
        detector.observe(&a, t0, delay);
        detector.observe(&a, t0, delay);
        // A genuinely different snapshot wipes the pending timer...
        let c = snap(&[(7, 7), (8, 7), (9, 7), (7, 8), (8, 8), (9, 8)]);
        assert!(!detector.observe(&b, t0 + Duration::from_secs(4), delay));
        assert!(!detector.observe(&c, t0 + Duration::from_secs(10), delay));
        // ...so even well past the original deadline nothing fires.
        let d = snap(&[(1, 7), (2, 7), (3, 7), (1, 8), (2, 8), (3, 8)]);
        assert!(!detector.observe(&d, t0 + Duration::from_secs(20), delay));
    }

    #[test]
    fn low_population_counts_as_stagnant() {
        let mut detector = StasisDetector::new();
        let t0 = Instant::now();
        let delay = Duration::from_secs(5);
        // Distinct snapshots every generation (a travelling glider), but
        // population is at the floor.
        for i in 0..3u16 {
            let glider = snap(&[(i, 0), (i + 1, 1), (i + 2, 1), (i, 2), (i + 1, 2)]);
            assert!(!detector.observe(&glider, t0, delay));
        }
        let last = snap(&[(3, 0), (4, 1), (5, 1), (3, 2), (4, 2)]);
        assert!(detector.observe(&last, t0 + Duration::from_secs(6), delay));
    }

    #[test]
    fn reset_requires_refill() {
        let mut detector = StasisDetector::new();
        let t0 = Instant::now();
        let frozen = snap(&[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 6)]);
        detector.observe(&frozen, t0, Duration::ZERO);
        detector.reset();
        assert!(!detector.observe(&frozen, t0, Duration::ZERO));
        assert!(!detector.observe(&frozen, t0, Duration::ZERO));
        assert!(detector.observe(&frozen, t0, Duration::ZERO));
    }
}
