//! Built-in generators for common types.

use crate::gen::Gen;
use rand::distributions::{Distribution, Uniform as UniformDist};
use rand::RngCore;
use rand_distr::Poisson;
use std::ops::Range;

/// Generate a value uniformly distributed in the given half-open range.
pub struct Uniform<T> {
    range: Range<T>,
}

impl<T> Uniform<T> {
    pub fn new(range: Range<T>) -> Self {
        Self { range }
    }
}

impl Gen<u32> for Uniform<u32> {
    fn generate(&self, rng: &mut dyn RngCore) -> u32 {
        UniformDist::new(self.range.start, self.range.end).sample(rng)
    }
}

impl Gen<i64> for Uniform<i64> {
    fn generate(&self, rng: &mut dyn RngCore) -> i64 {
        UniformDist::new(self.range.start, self.range.end).sample(rng)
    }
}

impl Gen<usize> for Uniform<usize> {
    fn generate(&self, rng: &mut dyn RngCore) -> usize {
        UniformDist::new(self.range.start, self.range.end).sample(rng)
    }
}

/// Convenience function to create a uniform generator.
pub fn uniform<T>(range: Range<T>) -> Uniform<T> {
    Uniform::new(range)
}

/// Generate a value uniformly selected from a static table.
pub struct OneOf<T: 'static> {
    items: &'static [T],
}

impl<T: Copy> OneOf<T> {
    /// `items` must not be empty.
    pub fn new(items: &'static [T]) -> Self {
        Self { items }
    }
}

impl<T: Copy> Gen<T> for OneOf<T> {
    fn generate(&self, rng: &mut dyn RngCore) -> T {
        let idx = UniformDist::new(0, self.items.len()).sample(rng);
        self.items[idx]
    }
}

/// Convenience function to create a one-of generator.
pub fn one_of<T: Copy>(items: &'static [T]) -> OneOf<T> {
    OneOf::new(items)
}

/// Generate a constant value.
pub struct Constant<T> {
    value: T,
}

impl<T: Clone> Constant<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone> Gen<T> for Constant<T> {
    fn generate(&self, _rng: &mut dyn RngCore) -> T {
        self.value.clone()
    }
}

/// Convenience function to create a constant generator.
pub fn constant<T: Clone>(value: T) -> Constant<T> {
    Constant::new(value)
}

/// Generate a boolean with the given probability of being true.
pub struct BoolWithProb {
    prob: f64,
}

impl BoolWithProb {
    pub fn new(prob: f64) -> Self {
        Self { prob }
    }
}

impl Gen<bool> for BoolWithProb {
    fn generate(&self, rng: &mut dyn RngCore) -> bool {
        let r: f64 = UniformDist::new(0.0, 1.0).sample(rng);
        r < self.prob
    }
}

/// Convenience function to create a boolean generator with given probability.
pub fn bool_with_prob(prob: f64) -> BoolWithProb {
    BoolWithProb::new(prob)
}

/// Generate counts from a Poisson distribution.
pub struct PoissonCount {
    dist: Poisson<f64>,
}

impl PoissonCount {
    /// Create a Poisson count generator. `mean` must be strictly positive.
    pub fn new(mean: f64) -> Result<Self, rand_distr::PoissonError> {
        Ok(Self {
            dist: Poisson::new(mean)?,
        })
    }
}

impl Gen<usize> for PoissonCount {
    fn generate(&self, rng: &mut dyn RngCore) -> usize {
        self.dist.sample(rng) as usize
    }
}
