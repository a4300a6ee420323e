//! Main charity data generator.

use crate::amount::Amount;
use crate::catalog::FUNDS;
use crate::config::GeneratorConfig;
use crate::distributions::{AllocationCountModel, AmountModel, GiftCountModel};
use crate::donor::DonorFabricator;
use crate::error::GenerateError;
use crate::gen::Gen;
use crate::rng::RunRng;
use crate::select::FundSelector;
use crate::sink::{DonorId, GiftId, StorageSink};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info};

/// Counts of what a generation run wrote to the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Funds newly inserted (zero when the catalog was already seeded)
    pub funds_inserted: usize,
    pub donors: usize,
    pub gifts: usize,
    pub allocations: usize,
    /// Sum of every allocation amount
    pub total_amount: Amount,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} donors, {} gifts, {} allocations totalling ${} ({} new funds)",
            self.donors, self.gifts, self.allocations, self.total_amount, self.funds_inserted
        )
    }
}

/// Gift and allocation tallies for the gift phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GiftTally {
    pub gifts: usize,
    pub allocations: usize,
    pub total_amount: Amount,
}

/// Generates funds, donors, gifts, and allocations into a storage sink.
///
/// Phases run strictly in order: funds, then donors, then each donor's gifts
/// with their allocations. All randomness comes from one seeded source.
///
/// # Example
/// ```
/// use charity_datagen::{CharityDataGenerator, GeneratorConfig, MemorySink};
///
/// let config = GeneratorConfig::new(3, 2.0).with_seed(42);
/// let mut generator = CharityDataGenerator::new(config, MemorySink::new()).unwrap();
/// let summary = generator.generate().unwrap();
///
/// assert_eq!(summary.donors, 3);
/// assert_eq!(generator.sink().funds().len(), 5);
/// ```
pub struct CharityDataGenerator<S> {
    config: GeneratorConfig,
    sink: S,
    rng: RunRng,
    selector: FundSelector<'static>,
    gift_counts: GiftCountModel,
    allocation_counts: AllocationCountModel,
    amounts: AmountModel,
    fabricator: DonorFabricator,
    donors: Option<Vec<DonorId>>,
}

impl<S: StorageSink> CharityDataGenerator<S> {
    /// Create a generator over the standard fund catalog.
    pub fn new(config: GeneratorConfig, sink: S) -> Result<Self, GenerateError> {
        config.validate()?;
        let selector = FundSelector::new(&FUNDS);
        if selector.is_empty() {
            return Err(GenerateError::invalid_config("fund catalog is empty"));
        }
        let rng = RunRng::resolve(config.seed);
        Ok(Self {
            gift_counts: GiftCountModel::new(config.gifts_per_donor)?,
            allocation_counts: AllocationCountModel::new(selector.len())?,
            amounts: AmountModel::default(),
            fabricator: DonorFabricator::default(),
            selector,
            donors: None,
            config,
            sink,
            rng,
        })
    }

    /// The seed driving this run.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Get the configuration used by this generator.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Donor ids in generation order, once donors have been generated.
    pub fn donors(&self) -> Option<&[DonorId]> {
        self.donors.as_deref()
    }

    /// Run every phase: funds, donors, then gifts and allocations.
    pub fn generate(&mut self) -> Result<GenerationSummary, GenerateError> {
        info!(
            seed = self.seed(),
            donors = self.config.donor_count,
            gifts_per_donor = self.config.gifts_per_donor,
            "starting generation"
        );

        let funds_inserted = self.insert_funds()?;
        let donors = self.generate_donors()?.len();
        let tally = self.generate_gifts()?;

        let summary = GenerationSummary {
            funds_inserted,
            donors,
            gifts: tally.gifts,
            allocations: tally.allocations,
            total_amount: tally.total_amount,
        };
        info!("{}", summary);
        Ok(summary)
    }

    /// Seed the fund catalog. Funds that already exist are left alone.
    ///
    /// Returns the number of funds newly inserted.
    pub fn insert_funds(&mut self) -> Result<usize, GenerateError> {
        let mut inserted = 0;
        let funds = self.selector.funds();
        for fund in funds {
            if self.sink.upsert_fund(fund.id, fund.name)? {
                info!(fund_id = %fund.id, "inserted fund {}", fund.name);
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Fabricate and store the configured number of donors.
    ///
    /// May only be called once per generator.
    pub fn generate_donors(&mut self) -> Result<&[DonorId], GenerateError> {
        if self.donors.is_some() {
            return Err(GenerateError::precondition("donors already generated"));
        }

        let mut donors = Vec::with_capacity(self.config.donor_count);
        for _ in 0..self.config.donor_count {
            let donor = self.fabricator.generate(&mut self.rng);
            let id = self.sink.insert_donor(&donor)?;
            debug!("donor {}: {}", id, donor.name);
            donors.push(id);
        }

        let donors = self.donors.insert(donors);
        Ok(donors.as_slice())
    }

    /// Generate each donor's gifts and their fund allocations.
    ///
    /// Requires [`generate_donors`](Self::generate_donors) to have run.
    pub fn generate_gifts(&mut self) -> Result<GiftTally, GenerateError> {
        let donors = self
            .donors
            .take()
            .ok_or_else(|| GenerateError::precondition("donors not generated yet"))?;

        let mut tally = GiftTally::default();
        let result = donors.iter().try_for_each(|&donor| {
            let ngifts = self.gift_counts.generate(&mut self.rng);
            self.generate_gifts_for_donor(donor, ngifts, &mut tally)
        });
        self.donors = Some(donors);

        result.map(|()| tally)
    }

    fn generate_gifts_for_donor(
        &mut self,
        donor: DonorId,
        ngifts: usize,
        tally: &mut GiftTally,
    ) -> Result<(), GenerateError> {
        for _ in 0..ngifts {
            let instant: DateTime<Utc> = self.config.date_window.generate(&mut self.rng);
            let gift = self.sink.insert_gift(instant.date_naive(), donor)?;
            debug!(donor = %donor, "gift {} on {}", gift, instant.date_naive());

            tally.gifts += 1;
            self.generate_allocations(gift, tally)?;
        }
        Ok(())
    }

    fn generate_allocations(
        &mut self,
        gift: GiftId,
        tally: &mut GiftTally,
    ) -> Result<(), GenerateError> {
        let nallocs = self.allocation_counts.generate(&mut self.rng);
        let funds = self.selector.select(nallocs, &mut self.rng)?;

        for fund in funds {
            let amount = self.amounts.generate(&mut self.rng);
            self.sink.insert_allocation(gift, fund, amount)?;
            tally.allocations += 1;
            tally.total_amount = tally.total_amount + amount;
        }
        Ok(())
    }
}
