//! Scale constants for the TPC-C data model.
//!
//! Cardinalities follow the benchmark definition: each warehouse has a fixed
//! number of districts, each district a fixed number of customers, and the
//! item catalog is shared by every warehouse.
//!
//! The key encoders in [`crate::keys`] multiply by these values, so they are
//! part of the encoded key format: changing one re-keys every table.

/// Number of items in the shared catalog.
pub const NUM_ITEMS: i32 = 100_000;

/// Stock rows per warehouse (one per item).
pub const STOCK_PER_WAREHOUSE: i32 = 100_000;

/// Districts per warehouse.
pub const DISTRICTS_PER_WAREHOUSE: i32 = 10;

/// Customers per district.
pub const CUSTOMERS_PER_DISTRICT: i32 = 3_000;

/// Largest warehouse id the key encoders accept.
pub const MAX_WAREHOUSE_ID: i32 = 100;

/// Largest order id the key encoders accept.
pub const MAX_ORDER_ID: i32 = 10_000_000;

/// Order line count bounds for a single order.
pub const MIN_OL_CNT: i32 = 5;
/// Maximum order lines per order; also a factor in the order-line key.
pub const MAX_OL_CNT: i32 = 15;

/// Orders loaded per district; `d_next_o_id` starts one past this.
pub const INITIAL_ORDERS_PER_DISTRICT: i32 = 3_000;

/// Loaded orders per district that start undelivered (with a NewOrder row).
pub const INITIAL_NEW_ORDERS_PER_DISTRICT: i32 = 900;

/// First loaded order id that is undelivered.
pub const FIRST_UNDELIVERED_ORDER_ID: i32 =
    INITIAL_ORDERS_PER_DISTRICT - INITIAL_NEW_ORDERS_PER_DISTRICT + 1;

/// How many trailing orders the stock-level transaction inspects.
pub const STOCK_LEVEL_ORDERS: i32 = 20;

/// Sentinel carrier id meaning "not yet delivered".
pub const NULL_CARRIER_ID: i32 = 0;

/// Carrier id bounds assigned by delivery.
pub const MIN_CARRIER_ID: i32 = 1;
pub const MAX_CARRIER_ID: i32 = 10;

/// Width of every timestamp string, in bytes.
pub const DATETIME_LEN: usize = 14;

/// Capacity of `c_last` in bytes.
pub const MAX_LAST_LEN: usize = 16;

/// Capacity of `c_data` in bytes.
pub const MAX_CUSTOMER_DATA: usize = 500;

/// Width of each per-district stock info string.
pub const DIST_INFO_LEN: usize = 24;

/// Credit rating tags.
pub const GOOD_CREDIT: &str = "GC";
pub const BAD_CREDIT: &str = "BC";

/// Substring marking an item or stock row as "original"; drives the
/// brand/generic classification in the new-order output.
pub const ORIGINAL_MARKER: &str = "ORIGINAL";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_undelivered_order_follows_loaded_counts() {
        assert_eq!(FIRST_UNDELIVERED_ORDER_ID, 2_101);
        assert_eq!(
            INITIAL_ORDERS_PER_DISTRICT - FIRST_UNDELIVERED_ORDER_ID + 1,
            INITIAL_NEW_ORDERS_PER_DISTRICT
        );
    }

    #[test]
    fn test_stock_matches_catalog() {
        assert_eq!(NUM_ITEMS, STOCK_PER_WAREHOUSE);
    }
}
