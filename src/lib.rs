//! # tpccbench
//!
//! An in-memory TPC-C transaction engine: nine owned tables behind one
//! [`Tables`] façade, two secondary indexes, and the five business
//! transactions executed single-threaded against a single process's own
//! data.
//!
//! # Quick Start
//!
//! ```text
//! use tpcc_cli::{Generator, SystemClock, TpccRandom, Clock};
//! use tpccbench::Tables;
//!
//! let mut tables = Tables::new();
//! let now = SystemClock.timestamp();
//! let mut generator = Generator::new(TpccRandom::from_entropy(), &now);
//! generator.make_items(&mut tables);
//! generator.make_warehouse(&mut tables, 1)?;
//!
//! let out = tables.new_order(1, 1, 42, &items, &now)?;
//! assert!(out.committed());
//! ```
//!
//! Or run the binary: `tpcc <warehouses>`.
//!
//! # Transactions
//!
//! | Transaction | Writes | Entry points |
//! |-------------|--------|--------------|
//! | New-Order | order, order lines, new-order marker, stock | `new_order` |
//! | Payment | warehouse/district ytd, customer, history | `payment`, `payment_by_name` |
//! | Order-Status | — | `order_status`, `order_status_by_name` |
//! | Delivery | new-order marker, order, order lines, customer | `delivery` |
//! | Stock-Level | — | `stock_level` |
//!
//! # Architecture
//!
//! [`Tables`] is the single owner of every record. Primary indexes map
//! composite keys packed into order-preserving integers; the two
//! secondary indexes (customer-by-name, order-by-customer) map back to
//! primary keys. The loader, workload driver, RNG, and clock live in the
//! `tpcc-cli` crate; the engine only ever sees literal parameters and
//! preformatted timestamps.

pub use tpcc_core::{
    BrandGeneric, Customer, DeliveryOrder, District, History, Item, NewOrder, NewOrderItem,
    NewOrderLineInfo, NewOrderOutput, Order, OrderLine, OrderStatusLine, OrderStatusOutput,
    PaymentOutput, Result, Stock, TpccError, Warehouse, INVALID_ITEM_STATUS,
};
pub use tpcc_engine::Tables;

/// Key encoders and scale constants, re-exported for callers that build
/// their own fixtures.
pub use tpcc_core::{keys, scale};
