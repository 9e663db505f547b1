//! `tpcc` — load a warehouse count and drive the standard mix.
//!
//! Usage: `tpcc [--json] <warehouses>`
//!
//! Loads the item catalog and `<warehouses>` warehouses, runs a fixed
//! number of transactions, and prints the load time, the transaction
//! count, and the throughput. `--json` emits the same stats as one JSON
//! object. Logging goes to stderr, filtered by `RUST_LOG`.

use std::process;
use std::time::Instant;

use clap::{Arg, ArgAction, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tpcc_cli::clock::Clock;
use tpcc_cli::{Client, Generator, SystemClock, TpccRandom};
use tpcc_core::scale::MAX_WAREHOUSE_ID;
use tpcc_engine::Tables;

/// Transactions per measured run.
const NUM_TRANSACTIONS: u64 = 4_096;

fn build_cli() -> Command {
    Command::new("tpcc")
        .about("In-memory TPC-C benchmark")
        .arg(
            Arg::new("warehouses")
                .help(format!("Warehouse count (1..={MAX_WAREHOUSE_ID})"))
                .required(true)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print run statistics as JSON")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let requested = *matches
        .get_one::<i64>("warehouses")
        .unwrap_or(&0);
    if requested < 1 || requested > i64::from(MAX_WAREHOUSE_ID) {
        eprintln!("Warehouse count must be in 1..={MAX_WAREHOUSE_ID} (was {requested})");
        process::exit(1);
    }
    let num_warehouses = requested as i32;
    let json = matches.get_flag("json");

    let clock = SystemClock;
    let now = clock.timestamp();
    let mut random = TpccRandom::from_entropy();
    let load_constants = random.c();

    // Load phase.
    let mut tables = Tables::new();
    let mut generator = Generator::new(random, &now);
    let load_start = Instant::now();
    generator.make_items(&mut tables);
    for w_id in 1..=num_warehouses {
        if let Err(e) = generator.make_warehouse(&mut tables, w_id) {
            eprintln!("Load failed: {e}");
            process::exit(1);
        }
    }
    let load_ms = load_start.elapsed().as_millis();
    info!(target: "tpcc::cli", num_warehouses, load_ms, "load complete");
    if !json {
        println!("Loaded {num_warehouses} warehouses in {load_ms} ms");
    }

    // Run phase: fresh sampler with run-valid constants.
    let mut run_random = TpccRandom::from_entropy();
    run_random.renew_c_for_run(&load_constants);
    let mut client = Client::new(Box::new(clock), run_random, tables, num_warehouses);

    let run_start = Instant::now();
    for _ in 0..NUM_TRANSACTIONS {
        if let Err(e) = client.do_one() {
            eprintln!("Transaction failed: {e}");
            process::exit(1);
        }
    }
    let elapsed = run_start.elapsed();

    let counts = client.counts();
    let tps = counts.total() as f64 / elapsed.as_secs_f64();
    if json {
        let stats = serde_json::json!({
            "warehouses": num_warehouses,
            "load_ms": load_ms,
            "transactions": counts.total(),
            "new_order": counts.new_order,
            "payment": counts.payment,
            "order_status": counts.order_status,
            "delivery": counts.delivery,
            "stock_level": counts.stock_level,
            "rollbacks": counts.rollbacks,
            "elapsed_ms": elapsed.as_millis() as u64,
            "tps": tps,
        });
        println!("{stats}");
    } else {
        println!(
            "{} transactions in {} ms = {:.1} txns/s",
            counts.total(),
            elapsed.as_millis(),
            tps
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_accepts_a_warehouse_count() {
        let matches = build_cli().try_get_matches_from(["tpcc", "4"]).unwrap();
        assert_eq!(matches.get_one::<i64>("warehouses"), Some(&4));
        assert!(!matches.get_flag("json"));
    }

    #[test]
    fn test_cli_rejects_non_numeric_count() {
        assert!(build_cli().try_get_matches_from(["tpcc", "many"]).is_err());
    }

    #[test]
    fn test_cli_requires_the_count() {
        assert!(build_cli().try_get_matches_from(["tpcc"]).is_err());
    }

    #[test]
    fn test_cli_json_flag() {
        let matches = build_cli()
            .try_get_matches_from(["tpcc", "--json", "1"])
            .unwrap();
        assert!(matches.get_flag("json"));
    }
}
