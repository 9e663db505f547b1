//! Benchmark harness around the table engine.
//!
//! The engine core executes transactions against parameters it is handed;
//! everything that *produces* those parameters lives here:
//! - [`clock`]: fixed-width timestamp source
//! - [`random`]: uniform and non-uniform samplers, name formula
//! - [`generator`]: initial table population
//! - [`client`]: the transaction mix driver
//!
//! The `tpcc` binary wires these together: load, then run.

#![warn(clippy::all)]

pub mod client;
pub mod clock;
pub mod generator;
pub mod random;

pub use client::{Client, RunCounts, TransactionKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use generator::Generator;
pub use random::{NuRandC, TpccRandom};
