//! In-memory table engine for the TPC-C workload.
//!
//! This crate owns the data:
//! - [`Tables`]: the façade holding every record behind one primary index
//!   per table plus the two secondary indexes (customer-by-name and
//!   order-by-customer)
//! - The five transaction procedures, implemented directly on [`Tables`]
//!
//! The engine is single-threaded by design. Every transaction runs to
//! completion between driver calls; there are no locks and no partial
//! commits: new-order validates every item before its first write.

#![warn(clippy::all)]

mod tables;
mod transactions;

pub use tables::Tables;
