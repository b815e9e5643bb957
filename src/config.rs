//! External configuration surface for a life field.
//!
//! All values here are owned by an embedding settings collaborator; the
//! engine reads them once at field-build time. Changing any of them requires
//! a field rebuild (`LifeEngine::rebuild`).

use std::time::Duration;

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Returns this color with its hue rotated by `delta` (fraction of a
    /// full turn), keeping saturation, value and alpha. Used for the
    /// shifting-colors birth rule, so lineages drift through the spectrum.
    pub fn shift_hue(self, delta: f32) -> Self {
        let (h, s, v) = self.to_hsv();
        Self::from_hsv((h + delta).rem_euclid(1.0), s, v, self.a)
    }

    fn to_hsv(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == self.r {
            (((self.g - self.b) / delta).rem_euclid(6.0)) / 6.0
        } else if max == self.g {
            ((self.b - self.r) / delta + 2.0) / 6.0
        } else {
            ((self.r - self.g) / delta + 4.0) / 6.0
        };
        let s = if max == 0.0 { 0.0 } else { delta / max };
        (h, s, max)
    }

    fn from_hsv(h: f32, s: f32, v: f32, a: f32) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match i as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(r, g, b, a)
    }
}

/// Default three-color seed palette.
pub const DEFAULT_PALETTE: [Rgba; 3] = [
    Rgba::opaque(172.0 / 255.0, 48.0 / 255.0, 17.0 / 255.0),
    Rgba::opaque(6.0 / 255.0, 66.0 / 255.0, 110.0 / 255.0),
    Rgba::opaque(174.0 / 255.0, 129.0 / 255.0, 0.0),
];

/// Cell size setting. Larger variants mean smaller squares, hence more of
/// them on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SquareSize {
    UltraSmall,
    SuperSmall,
    VerySmall,
    Small,
    #[default]
    Medium,
    Large,
}

impl SquareSize {
    /// Visible grid dimensions as (columns, rows).
    pub const fn grid_size(self) -> (usize, usize) {
        match self {
            SquareSize::UltraSmall => (256, 148),
            SquareSize::SuperSmall => (128, 74),
            SquareSize::VerySmall => (64, 36),
            SquareSize::Small => (32, 18),
            SquareSize::Medium => (16, 9),
            SquareSize::Large => (7, 4),
        }
    }

    /// Repetitions for the default random scatter, scaled so seed density
    /// reads the same at every square size.
    pub(crate) const fn scatter_count(self) -> usize {
        match self {
            SquareSize::UltraSmall => 2000,
            SquareSize::SuperSmall => 500,
            SquareSize::VerySmall => 50,
            SquareSize::Small => 20,
            SquareSize::Medium => 10,
            SquareSize::Large => 4,
        }
    }

    pub(crate) const fn sparse_scatter_count(self) -> usize {
        match self {
            SquareSize::UltraSmall => 1000,
            SquareSize::SuperSmall => 250,
            SquareSize::VerySmall => 25,
            SquareSize::Small => 10,
            SquareSize::Medium => 5,
            SquareSize::Large => 2,
        }
    }

    pub(crate) const fn glider_count(self) -> usize {
        match self {
            SquareSize::UltraSmall => 100,
            SquareSize::SuperSmall => 50,
            SquareSize::VerySmall => 20,
            SquareSize::Small => 10,
            SquareSize::Medium => 4,
            SquareSize::Large => 2,
        }
    }

    pub(crate) const fn sparse_glider_count(self) -> usize {
        match self {
            SquareSize::UltraSmall => 50,
            SquareSize::SuperSmall => 25,
            SquareSize::VerySmall => 10,
            SquareSize::Small => 5,
            SquareSize::Medium => 2,
            SquareSize::Large => 1,
        }
    }
}

/// Animation pacing. The engine itself is speed-agnostic; these values only
/// size the generation interval and the fade durations carried on emitted
/// events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AnimationSpeed {
    Fastest,
    Fast,
    #[default]
    Normal,
    Slow,
    /// No fade animation at all; generations still tick.
    Off,
}

/// Renderer-facing durations derived from an [`AnimationSpeed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Minimum wall-clock time between generations.
    pub generation_interval: Duration,
    /// Fade-to-full-alpha duration for a newly born cell.
    pub fade_in: Duration,
    /// Fade-to-dim duration for a freshly dead cell.
    pub fade_dim: Duration,
    /// How long a dead cell stays dim before fading out entirely.
    pub fade_hold: Duration,
    /// Final fade-to-transparent duration.
    pub fade_out: Duration,
}

impl AnimationSpeed {
    pub fn timings(self) -> Timings {
        let (anim, interval, hold) = match self {
            AnimationSpeed::Fastest => (0.0, 0.067, 90.0),
            AnimationSpeed::Fast => (0.6, 0.6, 180.0),
            AnimationSpeed::Normal => (2.0, 2.0, 540.0),
            AnimationSpeed::Slow => (5.0, 5.0, 900.0),
            AnimationSpeed::Off => (0.0, 0.1, 90.0),
        };
        Timings {
            generation_interval: Duration::from_secs_f64(interval),
            fade_in: Duration::from_secs_f64(anim),
            fade_dim: Duration::from_secs_f64(anim * 5.0),
            fade_hold: Duration::from_secs_f64(hold),
            fade_out: Duration::from_secs_f64(anim * 5.0),
        }
    }
}

/// Grid topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GridMode {
    /// Edges wrap around; every cell has exactly 8 neighbors.
    #[default]
    Toroidal,
    /// Bounded board with an invisible margin around the visible region.
    /// Patterns can leave the screen and die off at the unreachable true
    /// edge instead of wrapping back into view.
    Infinite,
}

/// What a stagnation reseed does with life already on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RespawnMode {
    /// Kill everything, then place the new seed.
    #[default]
    FreshStart,
    /// Leave existing life untouched and add the new seed on top.
    AddLife,
}

/// Named seed used to populate an empty or stagnant board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StartingPattern {
    #[default]
    DefaultRandom,
    Sparse,
    Gliders,
    SparseGliders,
    LonelyGliders,
    GosperGun,
    RPentomino,
    Acorn,
    Pulsar,
    Pentadecathlon,
    Lightweight,
    PufferTrain,
}

/// Full configuration for one life field.
///
/// Use `FieldConfig::default()` for the stock ambient setup, or customise
/// individual knobs via the builder methods.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub square_size: SquareSize,
    pub animation_speed: AnimationSpeed,
    pub grid_mode: GridMode,
    pub respawn_mode: RespawnMode,
    pub starting_pattern: StartingPattern,
    /// Apply a small hue rotation on every birth-color inheritance.
    pub shifting_colors: bool,
    /// Whether dying cells dim out gradually or disappear immediately.
    pub death_fade: bool,
    pub palette: [Rgba; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            square_size: SquareSize::default(),
            animation_speed: AnimationSpeed::default(),
            grid_mode: GridMode::default(),
            respawn_mode: RespawnMode::default(),
            starting_pattern: StartingPattern::default(),
            shifting_colors: false,
            death_fade: true,
            palette: DEFAULT_PALETTE,
        }
    }
}

impl FieldConfig {
    pub fn square_size(mut self, size: SquareSize) -> Self {
        self.square_size = size;
        self
    }

    pub fn animation_speed(mut self, speed: AnimationSpeed) -> Self {
        self.animation_speed = speed;
        self
    }

    pub fn grid_mode(mut self, mode: GridMode) -> Self {
        self.grid_mode = mode;
        self
    }

    pub fn respawn_mode(mut self, mode: RespawnMode) -> Self {
        self.respawn_mode = mode;
        self
    }

    pub fn starting_pattern(mut self, pattern: StartingPattern) -> Self {
        self.starting_pattern = pattern;
        self
    }

    pub fn shifting_colors(mut self, enabled: bool) -> Self {
        self.shifting_colors = enabled;
        self
    }

    pub fn death_fade(mut self, enabled: bool) -> Self {
        self.death_fade = enabled;
        self
    }

    pub fn palette(mut self, palette: [Rgba; 3]) -> Self {
        self.palette = palette;
        self
    }

    pub fn timings(&self) -> Timings {
        self.animation_speed.timings()
    }

    /// How long a board must sit in stasis before a reseed fires. Shorter
    /// when death-fade is off, because dead cells vanish immediately and a
    /// stuck board reads as empty much sooner.
    pub fn stasis_delay(&self) -> Duration {
        if self.death_fade {
            Duration::from_secs(30)
        } else {
            Duration::from_secs(5)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_sizes_scale_monotonically() {
        let sizes = [
            SquareSize::Large,
            SquareSize::Medium,
            SquareSize::Small,
            SquareSize::VerySmall,
            SquareSize::SuperSmall,
            SquareSize::UltraSmall,
        ];
        let mut prev = 0;
        for size in sizes {
            let (c, r) = size.grid_size();
            assert!(c * r > prev);
            prev = c * r;
        }
    }

    #[test]
    fn hue_shift_preserves_alpha_and_wraps() {
        let color = Rgba::new(0.8, 0.2, 0.1, 0.5);
        let shifted = color.shift_hue(0.005);
        assert_eq!(shifted.a, 0.5);
        // 200 shifts of 0.005 is a full turn back to the original hue.
        let mut c = color;
        for _ in 0..200 {
            c = c.shift_hue(0.005);
        }
        assert!((c.r - color.r).abs() < 1e-3);
        assert!((c.g - color.g).abs() < 1e-3);
        assert!((c.b - color.b).abs() < 1e-3);
    }

    #[test]
    fn gray_hue_shift_is_identity() {
        let gray = Rgba::opaque(0.5, 0.5, 0.5);
        assert_eq!(gray.shift_hue(0.3), gray);
    }

    #[test]
    fn stasis_delay_tracks_death_fade() {
        let with_fade = FieldConfig::default().death_fade(true);
        let without = FieldConfig::default().death_fade(false);
        assert!(with_fade.stasis_delay() > without.stasis_delay());
    }
}
