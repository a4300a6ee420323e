//! Statistical models for gift counts, allocation counts, amounts, and dates.

use crate::amount::Amount;
use crate::config::DateWindow;
use crate::error::GenerateError;
use crate::gen::{BoxedGen, Gen};
use crate::generators::{constant, uniform, PoissonCount, Uniform};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

/// Smallest allocation, in cents ($1.00).
pub const MIN_AMOUNT_CENTS: i64 = 100;

/// Exclusive upper bound on an allocation, in cents ($10,000.00).
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000;

// ----------------------------------------------------------------------------
// Gift Count Model
// ----------------------------------------------------------------------------

/// Number of gifts a donor makes: Poisson with a configurable mean.
///
/// Zero is a legitimate outcome. A mean of exactly zero always yields zero.
pub struct GiftCountModel {
    inner: BoxedGen<usize>,
}

impl GiftCountModel {
    pub fn new(mean: f64) -> Result<Self, GenerateError> {
        if !mean.is_finite() || mean < 0.0 {
            return Err(GenerateError::invalid_config(format!(
                "gift count mean must be a finite number >= 0, got {}",
                mean
            )));
        }
        let inner = if mean == 0.0 {
            constant(0usize).boxed()
        } else {
            PoissonCount::new(mean)
                .map_err(|e| GenerateError::invalid_config(e.to_string()))?
                .boxed()
        };
        Ok(Self { inner })
    }
}

impl Gen<usize> for GiftCountModel {
    fn generate(&self, rng: &mut dyn RngCore) -> usize {
        self.inner.generate(rng)
    }
}

// ----------------------------------------------------------------------------
// Allocation Count Model
// ----------------------------------------------------------------------------

/// Number of distinct funds one gift is split across.
///
/// Draws Poisson(1), rejecting values above the catalog size, then maps 0 to
/// 1. Both real ones and remapped zeros land on 1, so single-fund gifts are
/// far more common than Poisson(1) alone would give (about 0.74 vs 0.37).
pub struct AllocationCountModel {
    inner: BoxedGen<usize>,
}

impl AllocationCountModel {
    /// `fund_count` bounds the result and must be at least 1.
    pub fn new(fund_count: usize) -> Result<Self, GenerateError> {
        if fund_count == 0 {
            return Err(GenerateError::invalid_config(
                "allocation count needs at least one fund",
            ));
        }
        let inner = PoissonCount::new(1.0)
            .map_err(|e| GenerateError::invalid_config(e.to_string()))?
            .filter(move |n: &usize| *n <= fund_count)
            .map(|n: usize| n.max(1))
            .boxed();
        Ok(Self { inner })
    }
}

impl Gen<usize> for AllocationCountModel {
    fn generate(&self, rng: &mut dyn RngCore) -> usize {
        self.inner.generate(rng)
    }
}

// ----------------------------------------------------------------------------
// Amount Model
// ----------------------------------------------------------------------------

/// Allocation amount: whole cents uniform in `[$1.00, $10,000.00)`.
pub struct AmountModel {
    cents: Uniform<i64>,
}

impl Default for AmountModel {
    fn default() -> Self {
        Self {
            cents: uniform(MIN_AMOUNT_CENTS..MAX_AMOUNT_CENTS),
        }
    }
}

impl Gen<Amount> for AmountModel {
    fn generate(&self, rng: &mut dyn RngCore) -> Amount {
        Amount::from_cents(self.cents.generate(rng))
    }
}

// ----------------------------------------------------------------------------
// Gift Dates
// ----------------------------------------------------------------------------

/// Uniform instant within the window, at millisecond resolution.
impl Gen<DateTime<Utc>> for DateWindow {
    fn generate(&self, rng: &mut dyn RngCore) -> DateTime<Utc> {
        let range_millis = self.duration().num_milliseconds();
        if range_millis <= 0 {
            return self.start;
        }
        // Inclusive of the end instant.
        let offset = uniform(0..range_millis + 1).generate(rng);
        self.start + Duration::milliseconds(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DRAWS: usize = 100_000;

    #[test]
    fn test_gift_count_zero_mean() {
        let model = GiftCountModel::new(0.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!((0..1000).all(|_| model.generate(&mut rng) == 0));
    }

    #[test]
    fn test_gift_count_mean() {
        let model = GiftCountModel::new(2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let total: usize = (0..DRAWS).map(|_| model.generate(&mut rng)).sum();
        let mean = total as f64 / DRAWS as f64;
        assert!((mean - 2.0).abs() < 0.05, "sample mean was {}", mean);
    }

    #[test]
    fn test_gift_count_produces_zero() {
        let model = GiftCountModel::new(1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!((0..1000).any(|_| model.generate(&mut rng) == 0));
    }

    #[test]
    fn test_gift_count_rejects_negative() {
        assert!(GiftCountModel::new(-0.5).is_err());
        assert!(GiftCountModel::new(f64::NAN).is_err());
    }

    #[test]
    fn test_allocation_count_bounds() {
        let model = AllocationCountModel::new(5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..DRAWS {
            let n = model.generate(&mut rng);
            assert!((1..=5).contains(&n), "count {} out of range", n);
        }
    }

    #[test]
    fn test_allocation_count_skews_to_one() {
        let model = AllocationCountModel::new(5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let ones = (0..DRAWS).filter(|_| model.generate(&mut rng) == 1).count();
        let freq = ones as f64 / DRAWS as f64;

        // Poisson(1) puts e^-1 ~= 0.368 on k=1; with the 0 -> 1 remap it is ~0.736.
        let poisson_one = (-1.0f64).exp();
        assert!(
            freq > poisson_one + 0.3,
            "frequency of 1 was {}, expected well above {}",
            freq,
            poisson_one
        );
        assert!((freq - 2.0 * poisson_one).abs() < 0.01);
    }

    #[test]
    fn test_allocation_count_single_fund_catalog() {
        let model = AllocationCountModel::new(1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!((0..1000).all(|_| model.generate(&mut rng) == 1));
    }

    #[test]
    fn test_allocation_count_requires_funds() {
        assert!(AllocationCountModel::new(0).is_err());
    }

    #[test]
    fn test_amount_bounds() {
        let model = AmountModel::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..DRAWS {
            let amount = model.generate(&mut rng);
            assert!(amount >= Amount::from_cents(100));
            assert!(amount <= Amount::from_cents(999_999));
        }
    }

    #[test]
    fn test_dates_within_window() {
        let window = DateWindow::historical();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let instant = window.generate(&mut rng);
            assert!(window.contains(instant));
        }
    }

    #[test]
    fn test_empty_window_returns_start() {
        let start = DateWindow::historical().start;
        let window = DateWindow::new(start, start);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(window.generate(&mut rng), start);
    }
}
