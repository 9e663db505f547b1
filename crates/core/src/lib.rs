//! Core types for the TPC-C engine.
//!
//! This crate defines the foundational pieces shared by the engine and the
//! benchmark harness:
//! - Record types: the nine logical tables' row shapes
//! - Scale constants: cardinalities and field capacities of the data model
//! - Key encoders: composite keys packed into order-preserving integers
//! - Outputs: the per-transaction result records
//! - Error: precondition-violation error hierarchy
//!
//! There is no storage here: records are plain owned values, and the engine
//! crate owns the indexes that hold them.

#![warn(clippy::all)]

pub mod error;
pub mod keys;
pub mod output;
pub mod records;
pub mod scale;

pub use error::{Result, TpccError};
pub use output::{
    BrandGeneric, DeliveryOrder, NewOrderItem, NewOrderLineInfo, NewOrderOutput, OrderStatusLine,
    OrderStatusOutput, PaymentOutput, INVALID_ITEM_STATUS,
};
pub use records::{
    Customer, District, History, Item, NewOrder, Order, OrderLine, Stock, Warehouse,
};
