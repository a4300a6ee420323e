//! Integration tests for the DuckDB storage sink

use charity_datagen::{
    Amount, CharityDataGenerator, DonorId, FundId, GeneratorConfig, GiftId, MemorySink, NewDonor,
    SinkError, StorageSink,
};
use charity_store_duckdb::{DuckDbSink, Table};
use chrono::NaiveDate;
use std::str::FromStr;
use tempfile::TempDir;

fn donor(name: &str) -> NewDonor {
    NewDonor {
        name: name.to_string(),
        email: "someone@example.org".to_string(),
        address: "1 Main Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn query_i64(sink: &DuckDbSink, sql: &str) -> i64 {
    sink.connection().query_row(sql, [], |row| row.get(0)).unwrap()
}

fn query_string(sink: &DuckDbSink, sql: &str) -> String {
    sink.connection().query_row(sql, [], |row| row.get(0)).unwrap()
}

/// (gift_id, fund_id, amount) for every allocation, ordered by key.
fn allocations(sink: &DuckDbSink) -> Vec<(i64, i64, Amount)> {
    let mut stmt = sink
        .connection()
        .prepare(
            "SELECT gift_id, fund_id, CAST(amount AS VARCHAR) FROM gift_fund_allocation \
             ORDER BY gift_id, fund_id",
        )
        .unwrap();
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .unwrap();
    rows.map(|r| {
        let (gift, fund, amount) = r.unwrap();
        (gift, fund, Amount::from_str(&amount).unwrap())
    })
    .collect()
}

#[test]
fn test_upsert_fund_is_idempotent() {
    let mut sink = DuckDbSink::in_memory().unwrap();

    assert!(sink.upsert_fund(FundId(1), "General").unwrap());
    assert!(!sink.upsert_fund(FundId(1), "General").unwrap());
    assert_eq!(sink.row_count(Table::Fund).unwrap(), 1);
    assert_eq!(
        query_string(&sink, "SELECT fund_name FROM fund WHERE fund_id = 1"),
        "General"
    );
}

#[test]
fn test_returning_ids() {
    let mut sink = DuckDbSink::in_memory().unwrap();

    let d1 = sink.insert_donor(&donor("Ada Lovelace")).unwrap();
    let d2 = sink.insert_donor(&donor("Grace Hopper")).unwrap();
    assert_eq!((d1, d2), (DonorId(1), DonorId(2)));

    let g1 = sink.insert_gift(day(2005, 3, 14), d2).unwrap();
    assert_eq!(g1, GiftId(1));
    assert_eq!(
        query_string(&sink, "SELECT CAST(gift_date AS VARCHAR) FROM gift WHERE gift_id = 1"),
        "2005-03-14"
    );
    assert_eq!(
        query_i64(&sink, "SELECT donor_id FROM gift WHERE gift_id = 1"),
        2
    );
}

#[test]
fn test_amount_is_exact() {
    let mut sink = DuckDbSink::in_memory().unwrap();
    sink.upsert_fund(FundId(1), "General").unwrap();
    let d = sink.insert_donor(&donor("Ada Lovelace")).unwrap();
    let g = sink.insert_gift(day(2001, 1, 1), d).unwrap();

    sink.insert_allocation(g, FundId(1), Amount::from_cents(249))
        .unwrap();

    assert_eq!(allocations(&sink), vec![(1, 1, Amount::from_cents(249))]);
}

#[test]
fn test_constraints_rejected() {
    let mut sink = DuckDbSink::in_memory().unwrap();
    sink.upsert_fund(FundId(1), "General").unwrap();

    // Unknown donor
    assert!(matches!(
        sink.insert_gift(day(2001, 1, 1), DonorId(42)),
        Err(SinkError::Statement { .. })
    ));

    let d = sink.insert_donor(&donor("Ada Lovelace")).unwrap();
    let g = sink.insert_gift(day(2001, 1, 1), d).unwrap();

    // Unknown fund
    assert!(sink
        .insert_allocation(g, FundId(9), Amount::from_cents(100))
        .is_err());

    // Duplicate (gift, fund)
    sink.insert_allocation(g, FundId(1), Amount::from_cents(100))
        .unwrap();
    assert!(matches!(
        sink.insert_allocation(g, FundId(1), Amount::from_cents(500)),
        Err(SinkError::Statement { .. })
    ));

    // Non-positive amount
    sink.upsert_fund(FundId(2), "Veterinary Assistance").unwrap();
    assert!(sink.insert_allocation(g, FundId(2), Amount::ZERO).is_err());

    assert_eq!(sink.row_count(Table::Allocation).unwrap(), 1);
}

#[test]
fn test_generated_data_invariants() {
    let config = GeneratorConfig::new(3, 2.0).with_seed(2024);
    let mut generator = CharityDataGenerator::new(config, DuckDbSink::in_memory().unwrap()).unwrap();
    let summary = generator.generate().unwrap();
    let sink = generator.into_sink();

    assert_eq!(sink.row_count(Table::Fund).unwrap(), 5);
    assert_eq!(sink.row_count(Table::Donor).unwrap(), 3);
    assert_eq!(sink.row_count(Table::Gift).unwrap(), summary.gifts);
    assert_eq!(sink.row_count(Table::Allocation).unwrap(), summary.allocations);

    // Every gift has at least one allocation
    assert_eq!(
        query_i64(
            &sink,
            "SELECT COUNT(*) FROM gift g WHERE NOT EXISTS \
             (SELECT 1 FROM gift_fund_allocation a WHERE a.gift_id = g.gift_id)"
        ),
        0
    );

    // Dates within the historical window
    assert_eq!(
        query_i64(
            &sink,
            "SELECT COUNT(*) FROM gift \
             WHERE gift_date < DATE '2000-01-01' OR gift_date > DATE '2020-01-01'"
        ),
        0
    );

    // Amounts within [$1.00, $10,000.00)
    assert_eq!(
        query_i64(
            &sink,
            "SELECT COUNT(*) FROM gift_fund_allocation \
             WHERE amount < 1.00 OR amount >= 10000.00"
        ),
        0
    );

    let total: Amount = allocations(&sink).into_iter().map(|(_, _, a)| a).sum();
    assert_eq!(total, summary.total_amount);
}

#[test]
fn test_matches_memory_sink() {
    let config = GeneratorConfig::new(10, 3.0).with_seed(31);

    let mut in_memory = CharityDataGenerator::new(config.clone(), MemorySink::new()).unwrap();
    in_memory.generate().unwrap();
    let memory = in_memory.into_sink();

    let mut on_disk = CharityDataGenerator::new(config, DuckDbSink::in_memory().unwrap()).unwrap();
    on_disk.generate().unwrap();
    let duck = on_disk.into_sink();

    let mut expected: Vec<(i64, i64, Amount)> = memory
        .allocations()
        .iter()
        .map(|a| (a.gift_id.0, i64::from(a.fund_id.0), a.amount))
        .collect();
    expected.sort_by_key(|(gift, fund, _)| (*gift, *fund));

    assert_eq!(allocations(&duck), expected);
}

#[test]
fn test_reopen_existing_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("charity.duckdb");

    let first = {
        let sink = DuckDbSink::open(&db_path).unwrap();
        let config = GeneratorConfig::new(4, 1.0).with_seed(1);
        CharityDataGenerator::new(config, sink)
            .unwrap()
            .generate()
            .unwrap()
    };
    assert_eq!(first.funds_inserted, 5);

    let sink = DuckDbSink::open(&db_path).unwrap();
    let config = GeneratorConfig::new(4, 1.0).with_seed(2);
    let mut generator = CharityDataGenerator::new(config, sink).unwrap();
    let second = generator.generate().unwrap();

    assert_eq!(second.funds_inserted, 0);
    assert_eq!(generator.donors().unwrap()[0], DonorId(5));

    let sink = generator.into_sink();
    assert_eq!(sink.row_count(Table::Fund).unwrap(), 5);
    assert_eq!(sink.row_count(Table::Donor).unwrap(), 8);
}
