//! In-memory storage sink.
//!
//! Mirrors the relational schema closely enough to catch the same mistakes a
//! real store would: unknown donors, gifts, or funds and duplicate
//! (gift, fund) allocations are rejected as statement errors.

use crate::amount::Amount;
use crate::catalog::FundId;
use crate::donor::NewDonor;
use crate::error::SinkError;
use crate::sink::{DonorId, GiftId, StorageSink};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// A donor row held by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDonor {
    pub id: DonorId,
    pub donor: NewDonor,
}

/// A gift row held by [`MemorySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredGift {
    pub id: GiftId,
    pub donor_id: DonorId,
    pub date: NaiveDate,
}

/// An allocation row held by [`MemorySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredAllocation {
    pub gift_id: GiftId,
    pub fund_id: FundId,
    pub amount: Amount,
}

/// Storage sink that keeps every row in memory and assigns sequential ids.
#[derive(Debug, Default)]
pub struct MemorySink {
    funds: BTreeMap<FundId, String>,
    donors: Vec<StoredDonor>,
    gifts: Vec<StoredGift>,
    allocations: Vec<StoredAllocation>,
    allocation_keys: HashSet<(GiftId, FundId)>,
    /// Remaining successful calls before every call fails
    fail_after: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that accepts `calls` requests and then fails every later one
    /// with a connection error.
    pub fn failing_after(calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::default()
        }
    }

    pub fn funds(&self) -> &BTreeMap<FundId, String> {
        &self.funds
    }

    pub fn donors(&self) -> &[StoredDonor] {
        &self.donors
    }

    pub fn gifts(&self) -> &[StoredGift] {
        &self.gifts
    }

    pub fn allocations(&self) -> &[StoredAllocation] {
        &self.allocations
    }

    /// Allocations belonging to one gift, in insertion order.
    pub fn allocations_for(&self, gift: GiftId) -> impl Iterator<Item = &StoredAllocation> {
        self.allocations.iter().filter(move |a| a.gift_id == gift)
    }

    /// Sum of all allocations of one gift.
    pub fn gift_total(&self, gift: GiftId) -> Amount {
        self.allocations_for(gift).map(|a| a.amount).sum()
    }

    fn check_available(&mut self) -> Result<(), SinkError> {
        match self.fail_after.as_mut() {
            Some(0) => Err(SinkError::connection("memory sink closed")),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    // Ids are assigned sequentially from 1, so the row for id `n` is at `n - 1`.
    fn has_donor(&self, id: DonorId) -> bool {
        id.0 >= 1 && id.0 as usize <= self.donors.len()
    }

    fn has_gift(&self, id: GiftId) -> bool {
        id.0 >= 1 && id.0 as usize <= self.gifts.len()
    }
}

impl StorageSink for MemorySink {
    fn upsert_fund(&mut self, id: FundId, name: &str) -> Result<bool, SinkError> {
        self.check_available()?;
        if self.funds.contains_key(&id) {
            return Ok(false);
        }
        self.funds.insert(id, name.to_string());
        Ok(true)
    }

    fn insert_donor(&mut self, donor: &NewDonor) -> Result<DonorId, SinkError> {
        self.check_available()?;
        let id = DonorId(self.donors.len() as i64 + 1);
        self.donors.push(StoredDonor {
            id,
            donor: donor.clone(),
        });
        Ok(id)
    }

    fn insert_gift(&mut self, date: NaiveDate, donor: DonorId) -> Result<GiftId, SinkError> {
        self.check_available()?;
        if !self.has_donor(donor) {
            return Err(SinkError::statement(
                "insert gift",
                format!("donor {} does not exist", donor),
            ));
        }
        let id = GiftId(self.gifts.len() as i64 + 1);
        self.gifts.push(StoredGift {
            id,
            donor_id: donor,
            date,
        });
        Ok(id)
    }

    fn insert_allocation(
        &mut self,
        gift: GiftId,
        fund: FundId,
        amount: Amount,
    ) -> Result<(), SinkError> {
        self.check_available()?;
        if !self.has_gift(gift) {
            return Err(SinkError::statement(
                "insert allocation",
                format!("gift {} does not exist", gift),
            ));
        }
        if !self.funds.contains_key(&fund) {
            return Err(SinkError::statement(
                "insert allocation",
                format!("fund {} does not exist", fund),
            ));
        }
        if !amount.is_positive() {
            return Err(SinkError::statement(
                "insert allocation",
                format!("amount {} must be positive", amount),
            ));
        }
        if !self.allocation_keys.insert((gift, fund)) {
            return Err(SinkError::statement(
                "insert allocation",
                format!("gift {} already has an allocation to fund {}", gift, fund),
            ));
        }
        self.allocations.push(StoredAllocation {
            gift_id: gift,
            fund_id: fund,
            amount,
        });
        Ok(())
    }
}
