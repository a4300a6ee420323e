//! DuckDB storage sink for the charity data generator.

use anyhow::Context;
use charity_datagen::{Amount, DonorId, FundId, GiftId, NewDonor, SinkError, StorageSink};
use chrono::NaiveDate;
use duckdb::{params, Connection};
use std::path::Path;
use tracing::debug;

/// Tables and id sequences the generator writes to.
///
/// Every statement is `IF NOT EXISTS`, so opening an existing database is safe.
const SCHEMA: &str = r#"
CREATE SEQUENCE IF NOT EXISTS donor_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS gift_id_seq START 1;

CREATE TABLE IF NOT EXISTS fund (
    fund_id INTEGER PRIMARY KEY,
    fund_name VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS donor (
    donor_id BIGINT PRIMARY KEY DEFAULT nextval('donor_id_seq'),
    donor_name VARCHAR NOT NULL,
    donor_email VARCHAR NOT NULL,
    donor_address VARCHAR NOT NULL,
    donor_city VARCHAR NOT NULL,
    donor_state VARCHAR(2) NOT NULL,
    donor_zip VARCHAR(5) NOT NULL
);

CREATE TABLE IF NOT EXISTS gift (
    gift_id BIGINT PRIMARY KEY DEFAULT nextval('gift_id_seq'),
    donor_id BIGINT NOT NULL REFERENCES donor (donor_id),
    gift_date DATE NOT NULL
);

CREATE TABLE IF NOT EXISTS gift_fund_allocation (
    gift_id BIGINT NOT NULL REFERENCES gift (gift_id),
    fund_id INTEGER NOT NULL REFERENCES fund (fund_id),
    amount DECIMAL(10, 2) NOT NULL CHECK (amount > 0),
    PRIMARY KEY (gift_id, fund_id)
);
"#;

const UPSERT_FUND: &str =
    "INSERT INTO fund (fund_id, fund_name) VALUES (?, ?) ON CONFLICT DO NOTHING";

const INSERT_DONOR: &str = "INSERT INTO donor \
    (donor_name, donor_email, donor_address, donor_city, donor_state, donor_zip) \
    VALUES (?, ?, ?, ?, ?, ?) RETURNING donor_id";

const INSERT_GIFT: &str =
    "INSERT INTO gift (gift_date, donor_id) VALUES (CAST(? AS DATE), ?) RETURNING gift_id";

const INSERT_ALLOCATION: &str = "INSERT INTO gift_fund_allocation (gift_id, fund_id, amount) \
    VALUES (?, ?, CAST(? AS DECIMAL(10, 2)))";

/// Storage sink writing into a DuckDB database.
///
/// Statements go through the connection's prepared statement cache; each
/// cached handle lives for one call and returns to the cache when dropped.
pub struct DuckDbSink {
    connection: Connection,
}

impl DuckDbSink {
    /// Open or create a database file and ensure the schema exists.
    pub fn open(database_path: &Path) -> Result<Self, SinkError> {
        // Create parent directory if needed
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let connection = Connection::open(database_path).map_err(|e| {
            SinkError::connection(format!(
                "Failed to open DuckDB database {:?}: {}",
                database_path, e
            ))
        })?;
        debug!("opened DuckDB database at {:?}", database_path);
        Self::with_connection(connection)
    }

    /// An in-memory database, mostly useful for tests and dry runs.
    pub fn in_memory() -> Result<Self, SinkError> {
        let connection = Connection::open_in_memory()
            .map_err(|e| SinkError::connection(format!("Failed to open DuckDB: {}", e)))?;
        Self::with_connection(connection)
    }

    /// Wrap an existing connection, creating the schema if needed.
    pub fn with_connection(connection: Connection) -> Result<Self, SinkError> {
        connection
            .execute_batch(SCHEMA)
            .map_err(|e| SinkError::statement("create schema", e.to_string()))?;
        Ok(Self { connection })
    }

    /// The underlying connection, for ad-hoc queries.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Number of rows in one of the generator's tables.
    pub fn row_count(&self, table: Table) -> Result<usize, SinkError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = self
            .connection
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| SinkError::statement(sql.clone(), e.to_string()))?;
        Ok(count as usize)
    }
}

/// Tables managed by [`DuckDbSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Fund,
    Donor,
    Gift,
    Allocation,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Fund => "fund",
            Table::Donor => "donor",
            Table::Gift => "gift",
            Table::Allocation => "gift_fund_allocation",
        }
    }
}

impl StorageSink for DuckDbSink {
    fn upsert_fund(&mut self, id: FundId, name: &str) -> Result<bool, SinkError> {
        let mut stmt = self
            .connection
            .prepare_cached(UPSERT_FUND)
            .map_err(|e| SinkError::statement(UPSERT_FUND, e.to_string()))?;
        let inserted = stmt
            .execute(params![i64::from(id.0), name])
            .map_err(|e| SinkError::statement(UPSERT_FUND, e.to_string()))?;
        Ok(inserted > 0)
    }

    fn insert_donor(&mut self, donor: &NewDonor) -> Result<DonorId, SinkError> {
        let mut stmt = self
            .connection
            .prepare_cached(INSERT_DONOR)
            .map_err(|e| SinkError::statement(INSERT_DONOR, e.to_string()))?;
        let id = stmt
            .query_row(
                params![
                    donor.name,
                    donor.email,
                    donor.address,
                    donor.city,
                    donor.state,
                    donor.zip
                ],
                |row| row.get::<_, Option<i64>>(0),
            )
            .map_err(|e| match e {
                duckdb::Error::QueryReturnedNoRows => SinkError::missing_id("donor"),
                e => SinkError::statement(INSERT_DONOR, e.to_string()),
            })?
            .ok_or_else(|| SinkError::missing_id("donor"))?;
        Ok(DonorId(id))
    }

    fn insert_gift(&mut self, date: NaiveDate, donor: DonorId) -> Result<GiftId, SinkError> {
        let mut stmt = self
            .connection
            .prepare_cached(INSERT_GIFT)
            .map_err(|e| SinkError::statement(INSERT_GIFT, e.to_string()))?;
        let id = stmt
            .query_row(params![date.to_string(), donor.0], |row| {
                row.get::<_, Option<i64>>(0)
            })
            .map_err(|e| match e {
                duckdb::Error::QueryReturnedNoRows => SinkError::missing_id("gift"),
                e => SinkError::statement(INSERT_GIFT, e.to_string()),
            })?
            .ok_or_else(|| SinkError::missing_id("gift"))?;
        Ok(GiftId(id))
    }

    fn insert_allocation(
        &mut self,
        gift: GiftId,
        fund: FundId,
        amount: Amount,
    ) -> Result<(), SinkError> {
        let mut stmt = self
            .connection
            .prepare_cached(INSERT_ALLOCATION)
            .map_err(|e| SinkError::statement(INSERT_ALLOCATION, e.to_string()))?;
        stmt.execute(params![gift.0, i64::from(fund.0), amount.to_string()])
            .map_err(|e| SinkError::statement(INSERT_ALLOCATION, e.to_string()))?;
        Ok(())
    }
}
