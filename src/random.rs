//! Uniform random sources used for outcome selection and turn counts.
//!
//! The wheel never reaches for a global RNG. Callers inject a [`RandomSource`],
//! which is either a real generator wrapped in [`RngSource`] or a
//! [`ScriptedSource`] replaying fixed draws in tests.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapter exposing any `rand` generator as a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible spins.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a source from explicit samples.
    ///
    /// Samples are clamped into `[0, 1)`; an empty list yields `0.0` forever.
    pub fn new(samples: Vec<f64>) -> Self {
        let samples = samples
            .into_iter()
            .map(|s| if s.is_finite() { s.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        Self { samples, cursor: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}

/// Draws an integer uniformly from `[min, max)`.
pub(crate) fn uniform_index(source: &mut dyn RandomSource, min: u32, max: u32) -> u32 {
    debug_assert!(min < max);
    let span = (max - min) as f64;
    let offset = (source.next_unit() * span).floor() as u32;
    min + offset.min(max - min - 1)
}

#[cfg(test)]
mod tests {
    use super::{uniform_index, RandomSource, RngSource, ScriptedSource};

    #[test]
    fn scripted_source_cycles_and_clamps() {
        let mut source = ScriptedSource::new(vec![0.25, 1.5, f64::NAN]);
        assert_eq!(source.next_unit(), 0.25);
        assert!(source.next_unit() < 1.0);
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_unit(), 0.25);
    }

    #[test]
    fn seeded_source_stays_in_unit_interval() {
        let mut source = RngSource::seeded(7);
        for _ in 0..1000 {
            let v = source.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn uniform_index_covers_range() {
        let mut low = ScriptedSource::new(vec![0.0]);
        let mut high = ScriptedSource::new(vec![0.999_999]);
        assert_eq!(uniform_index(&mut low, 5, 10), 5);
        assert_eq!(uniform_index(&mut high, 5, 10), 9);
    }
}
