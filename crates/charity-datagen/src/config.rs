//! Configuration for a generation run.

use crate::error::GenerateError;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Start of the historical gift window: 2000-01-01T00:00:00Z.
pub const FIRST_DATE_EPOCH_SECS: i64 = 946_684_800;

/// End of the historical gift window: 2020-01-01T00:00:00Z.
pub const LAST_DATE_EPOCH_SECS: i64 = 1_577_836_800;

/// Top-level configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of donors to fabricate
    pub donor_count: usize,

    /// Mean of the per-donor gift count distribution
    pub gifts_per_donor: f64,

    /// Seed for the run's RNG; drawn from OS entropy when unset
    pub seed: Option<u64>,

    /// Window gift dates are drawn from
    pub date_window: DateWindow,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            donor_count: 100,
            gifts_per_donor: 3.0,
            seed: None,
            date_window: DateWindow::historical(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(donor_count: usize, gifts_per_donor: f64) -> Self {
        Self {
            donor_count,
            gifts_per_donor,
            ..Self::default()
        }
    }

    /// Set the RNG seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of donors.
    pub fn with_donors(mut self, count: usize) -> Self {
        self.donor_count = count;
        self
    }

    /// Set the mean number of gifts per donor.
    pub fn with_gifts_per_donor(mut self, mean: f64) -> Self {
        self.gifts_per_donor = mean;
        self
    }

    /// Set the gift date window.
    pub fn with_date_window(mut self, window: DateWindow) -> Self {
        self.date_window = window;
        self
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !self.gifts_per_donor.is_finite() || self.gifts_per_donor < 0.0 {
            return Err(GenerateError::invalid_config(format!(
                "gifts per donor must be a finite number >= 0, got {}",
                self.gifts_per_donor
            )));
        }
        if self.date_window.end < self.date_window.start {
            return Err(GenerateError::invalid_config(format!(
                "date window ends ({}) before it starts ({})",
                self.date_window.end, self.date_window.start
            )));
        }
        Ok(())
    }
}

/// Inclusive window of instants that gift dates are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Create a window with explicit start and end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The fixed 2000-01-01 to 2020-01-01 window.
    pub fn historical() -> Self {
        Self {
            start: DateTime::from_timestamp(FIRST_DATE_EPOCH_SECS, 0).expect("Invalid date"),
            end: DateTime::from_timestamp(LAST_DATE_EPOCH_SECS, 0).expect("Invalid date"),
        }
    }

    /// Length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether an instant lies inside the window (both ends inclusive).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether a calendar day overlaps the window.
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.start.date_naive() <= day && day <= self.end.date_naive()
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::historical()
    }
}
