//! Synthetic data generation for the charity database.
//!
//! Fabricates donors, their gifts, and the split of each gift across a small
//! weighted catalog of funds. Generation is driven by composable generators
//! and a single seeded RNG, so a fixed seed reproduces a run exactly. Rows are
//! handed to a [`StorageSink`], which owns persistence.

pub mod amount;
pub mod catalog;
pub mod config;
pub mod distributions;
pub mod donor;
pub mod error;
pub mod gen;
pub mod generator;
pub mod generators;
pub mod memory;
pub mod rng;
pub mod select;
pub mod sink;

pub use amount::{Amount, ParseAmountError};
pub use catalog::{Fund, FundId, FUNDS};
pub use config::{DateWindow, GeneratorConfig};
pub use distributions::{AllocationCountModel, AmountModel, GiftCountModel};
pub use donor::{zip_in_state, DonorFabricator, NewDonor};
pub use error::{GenerateError, SinkError};
pub use gen::{BoxedGen, Gen};
pub use generator::{CharityDataGenerator, GenerationSummary, GiftTally};
pub use memory::{MemorySink, StoredAllocation, StoredDonor, StoredGift};
pub use rng::RunRng;
pub use select::FundSelector;
pub use sink::{DonorId, GiftId, StorageSink};
