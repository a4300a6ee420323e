//! Storage sink abstraction.
//!
//! The generator never talks to a database directly. It hands each new entity
//! to a [`StorageSink`], which persists it and, for donors and gifts, returns
//! the identifier the store assigned.

use crate::amount::Amount;
use crate::catalog::FundId;
use crate::donor::NewDonor;
use crate::error::SinkError;
use chrono::NaiveDate;
use std::fmt;

/// Identifier assigned to a donor by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DonorId(pub i64);

/// Identifier assigned to a gift by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GiftId(pub i64);

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistence capability consumed by the generator.
///
/// Every call is a blocking request/response. Any error aborts the run and is
/// returned to the caller unchanged.
pub trait StorageSink {
    /// Insert a fund unless one with this id already exists.
    ///
    /// Returns `true` when a new row was created.
    fn upsert_fund(&mut self, id: FundId, name: &str) -> Result<bool, SinkError>;

    /// Insert a donor and return its new identifier.
    fn insert_donor(&mut self, donor: &NewDonor) -> Result<DonorId, SinkError>;

    /// Insert a gift for `donor` and return its new identifier.
    fn insert_gift(&mut self, date: NaiveDate, donor: DonorId) -> Result<GiftId, SinkError>;

    /// Allocate part of a gift to a fund.
    fn insert_allocation(
        &mut self,
        gift: GiftId,
        fund: FundId,
        amount: Amount,
    ) -> Result<(), SinkError>;
}

impl<S: StorageSink + ?Sized> StorageSink for &mut S {
    fn upsert_fund(&mut self, id: FundId, name: &str) -> Result<bool, SinkError> {
        (**self).upsert_fund(id, name)
    }

    fn insert_donor(&mut self, donor: &NewDonor) -> Result<DonorId, SinkError> {
        (**self).insert_donor(donor)
    }

    fn insert_gift(&mut self, date: NaiveDate, donor: DonorId) -> Result<GiftId, SinkError> {
        (**self).insert_gift(date, donor)
    }

    fn insert_allocation(
        &mut self,
        gift: GiftId,
        fund: FundId,
        amount: Amount,
    ) -> Result<(), SinkError> {
        (**self).insert_allocation(gift, fund, amount)
    }
}

impl<S: StorageSink + ?Sized> StorageSink for Box<S> {
    fn upsert_fund(&mut self, id: FundId, name: &str) -> Result<bool, SinkError> {
        (**self).upsert_fund(id, name)
    }

    fn insert_donor(&mut self, donor: &NewDonor) -> Result<DonorId, SinkError> {
        (**self).insert_donor(donor)
    }

    fn insert_gift(&mut self, date: NaiveDate, donor: DonorId) -> Result<GiftId, SinkError> {
        (**self).insert_gift(date, donor)
    }

    fn insert_allocation(
        &mut self,
        gift: GiftId,
        fund: FundId,
        amount: Amount,
    ) -> Result<(), SinkError> {
        (**self).insert_allocation(gift, fund, amount)
    }
}
