//! Integration tests for the charity-gen bootstrap

use charity_cli::{run, run_with_sink, Args};
use charity_datagen::{GeneratorConfig, MemorySink};
use charity_store_duckdb::{DuckDbSink, Table};
use clap::Parser;
use tempfile::TempDir;

#[test]
fn test_dry_run() {
    let args =
        Args::try_parse_from(["charity-gen", "--dry-run", "--donors", "5", "--seed", "3"]).unwrap();
    let summary = run(&args).unwrap();

    assert_eq!(summary.funds_inserted, 5);
    assert_eq!(summary.donors, 5);
}

#[test]
fn test_writes_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("charity.duckdb");

    let args = Args::try_parse_from([
        "charity-gen",
        "--database",
        db_path.to_str().unwrap(),
        "--donors",
        "3",
        "--gifts-per-donor",
        "2.0",
        "--seed",
        "11",
    ])
    .unwrap();
    let summary = run(&args).unwrap();

    let sink = DuckDbSink::open(&db_path).unwrap();
    assert_eq!(sink.row_count(Table::Fund).unwrap(), 5);
    assert_eq!(sink.row_count(Table::Donor).unwrap(), 3);
    assert_eq!(sink.row_count(Table::Gift).unwrap(), summary.gifts);
    assert_eq!(
        sink.row_count(Table::Allocation).unwrap(),
        summary.allocations
    );
}

#[test]
fn test_same_seed_same_summary() {
    let config = GeneratorConfig::new(8, 3.0).with_seed(99);
    let first = run_with_sink(config.clone(), MemorySink::new()).unwrap();
    let second = run_with_sink(config, MemorySink::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_mean_reported() {
    let config = GeneratorConfig::new(1, -2.0);
    let err = run_with_sink(config, MemorySink::new()).unwrap_err();
    assert!(err.to_string().contains("Invalid generator configuration"));
}
