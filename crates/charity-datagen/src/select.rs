//! Weighted fund selection without replacement.

use crate::catalog::{Fund, FundId};
use crate::error::GenerateError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;
use std::collections::HashSet;

/// Picks distinct funds, favouring funds with larger weights.
///
/// Each draw builds a weighted distribution over the funds not yet chosen,
/// using their catalog weights, samples one, and excludes it from later draws.
/// A fund's chance on any draw is its weight divided by the total weight of the
/// funds still in play.
#[derive(Debug, Clone, Copy)]
pub struct FundSelector<'a> {
    funds: &'a [Fund],
}

impl<'a> FundSelector<'a> {
    pub fn new(funds: &'a [Fund]) -> Self {
        Self { funds }
    }

    /// The funds this selector draws from.
    pub fn funds(&self) -> &'a [Fund] {
        self.funds
    }

    /// Number of funds available for selection.
    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Select `n` distinct funds. `n` must be in `1..=self.len()`.
    pub fn select(
        &self,
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<FundId>, GenerateError> {
        if n == 0 || n > self.funds.len() {
            return Err(GenerateError::SamplingInvariant {
                requested: n,
                available: self.funds.len(),
            });
        }

        let mut excluded: HashSet<FundId> = HashSet::with_capacity(n);
        let mut selected = Vec::with_capacity(n);

        for _ in 0..n {
            let candidates: Vec<&Fund> = self
                .funds
                .iter()
                .filter(|f| !excluded.contains(&f.id))
                .collect();
            let dist = WeightedIndex::new(candidates.iter().map(|f| f.weight)).map_err(|e| {
                GenerateError::invalid_config(format!("unusable fund weights: {}", e))
            })?;

            let chosen = candidates[dist.sample(rng)].id;
            excluded.insert(chosen);
            selected.push(chosen);
        }

        Ok(selected)
    }
}
