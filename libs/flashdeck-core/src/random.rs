//! Injected randomness for shuffling and sampling.
//!
//! Every study mode owns a [`RandomSource`]. Production code hands in a
//! `rand` generator; tests hand in [`Scripted`] or [`Identity`] to get
//! reproducible orderings.

/// A source of uniform indices.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. `bound` is always greater than zero.
    fn below(&mut self, bound: usize) -> usize;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn below(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Replays a fixed list of values, wrapping around when exhausted.
///
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct Scripted {
    values: Vec<usize>,
    cursor: usize,
}

impl Scripted {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for Scripted {
    fn below(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}

/// Always answers `bound - 1`, which makes [`shuffle`] leave slices untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl RandomSource for Identity {
    fn below(&mut self, bound: usize) -> usize {
        bound.saturating_sub(1)
    }
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// Shuffle `0..len` and keep the first `count` indices.
pub fn sample<R: RandomSource + ?Sized>(len: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    shuffle(&mut indices, rng);
    indices.truncate(count);
    indices
}
