//! Descriptions of valid actions and observations.

use fastrand::Rng;

/// A set of values an environment accepts or produces.
pub trait Space {
    type Element;

    /// Membership test used to validate actions and observations.
    fn contains(&self, x: &Self::Element) -> bool;

    /// Draws a uniformly random member of the space.
    fn sample(&self, rng: &mut Rng) -> Self::Element;
}

/// The integers `start..start + n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    n: i64,
    start: i64,
}

impl Discrete {
    /// # Panics
    ///
    /// Panics if `n` is not positive.
    #[must_use]
    pub fn new(n: i64) -> Self {
        Self::with_start(n, 0)
    }

    /// # Panics
    ///
    /// Panics if `n` is not positive.
    #[must_use]
    pub fn with_start(n: i64, start: i64) -> Self {
        assert!(n > 0, "a discrete space needs at least one element");
        Self { n, start }
    }

    #[must_use]
    pub fn n(&self) -> i64 {
        self.n
    }

    #[must_use]
    pub fn start(&self) -> i64 {
        self.start
    }
}

impl Space for Discrete {
    type Element = i64;

    fn contains(&self, x: &i64) -> bool {
        (self.start..self.start + self.n).contains(x)
    }

    fn sample(&self, rng: &mut Rng) -> i64 {
        rng.i64(self.start..self.start + self.n)
    }
}

/// A closed box `[low, high]` in `N` dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpace<const N: usize> {
    low: [f32; N],
    high: [f32; N],
}

impl<const N: usize> BoxSpace<N> {
    /// # Panics
    ///
    /// Panics if any `low` bound exceeds its `high` bound.
    #[must_use]
    pub fn new(low: [f32; N], high: [f32; N]) -> Self {
        assert!(
            low.iter().zip(&high).all(|(lo, hi)| lo <= hi),
            "box lower bounds must not exceed upper bounds"
        );
        Self { low, high }
    }

    #[must_use]
    pub fn low(&self) -> &[f32; N] {
        &self.low
    }

    #[must_use]
    pub fn high(&self) -> &[f32; N] {
        &self.high
    }
}

impl<const N: usize> Space for BoxSpace<N> {
    type Element = [f32; N];

    fn contains(&self, x: &[f32; N]) -> bool {
        x.iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }

    fn sample(&self, rng: &mut Rng) -> [f32; N] {
        let mut out = [0.0; N];
        for (i, v) in out.iter_mut().enumerate() {
            // Interpolate instead of `low + t * (high - low)`, which overflows at f32::MAX.
            let t = rng.f32();
            *v = (self.low[i] * (1.0 - t) + self.high[i] * t).clamp(self.low[i], self.high[i]);
        }
        out
    }
}
