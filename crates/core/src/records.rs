//! Record types for the nine logical tables.
//!
//! All identifiers are 1-based `i32`s and all monetary amounts are `f32`,
//! matching the single-precision arithmetic the transaction profiles are
//! defined over. String fields carry documented byte capacities; the load
//! stage constructs values in range, and the one mutation that can grow a
//! string past its cap (the bad-credit `c_data` prepend) re-truncates to
//! [`MAX_CUSTOMER_DATA`](crate::scale::MAX_CUSTOMER_DATA) itself.

use serde::Serialize;

use crate::scale::DISTRICTS_PER_WAREHOUSE;

/// Catalog item. Loaded once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub i_id: i32,
    /// 14–24 chars.
    pub i_name: String,
    pub i_price: f32,
    /// 26–50 chars; may contain the `"ORIGINAL"` marker.
    pub i_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Warehouse {
    pub w_id: i32,
    /// 6–10 chars.
    pub w_name: String,
    /// Rate in [0, 0.2].
    pub w_tax: f32,
    /// Year-to-date payment total; grows with every payment.
    pub w_ytd: f32,
}

/// Per-warehouse inventory row for one item.
#[derive(Debug, Clone, Serialize)]
pub struct Stock {
    pub s_i_id: i32,
    pub s_w_id: i32,
    /// Stays within [0, 10_000] under the new-order replenish rule.
    pub s_quantity: i32,
    /// Units sold, lifetime.
    pub s_ytd: i32,
    pub s_order_cnt: i32,
    pub s_remote_cnt: i32,
    /// One info string per ordering district, each exactly
    /// [`DIST_INFO_LEN`](crate::scale::DIST_INFO_LEN) chars. The ordering
    /// district's entry, not the supplying warehouse's, is copied into
    /// each new order line.
    pub s_dist: [String; DISTRICTS_PER_WAREHOUSE as usize],
    /// 26–50 chars; may contain the `"ORIGINAL"` marker.
    pub s_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct District {
    pub d_id: i32,
    pub d_w_id: i32,
    /// 6–10 chars.
    pub d_name: String,
    /// Rate in [0, 0.2].
    pub d_tax: f32,
    pub d_ytd: f32,
    /// Next order id to assign; strictly monotonic per district.
    pub d_next_o_id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub c_id: i32,
    pub c_d_id: i32,
    pub c_w_id: i32,
    /// 8–16 chars.
    pub c_first: String,
    /// Always `"OE"`.
    pub c_middle: String,
    /// Generated from the syllable formula; at most
    /// [`MAX_LAST_LEN`](crate::scale::MAX_LAST_LEN) bytes.
    pub c_last: String,
    /// `"GC"` or `"BC"`.
    pub c_credit: String,
    /// Rate in [0, 0.5].
    pub c_discount: f32,
    pub c_balance: f32,
    pub c_ytd_payment: f32,
    pub c_payment_cnt: i32,
    pub c_delivery_cnt: i32,
    /// Free-form history, at most
    /// [`MAX_CUSTOMER_DATA`](crate::scale::MAX_CUSTOMER_DATA) bytes. Bad
    /// credit payments prepend a formatted record and truncate the tail.
    pub c_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub o_id: i32,
    pub o_c_id: i32,
    pub o_d_id: i32,
    pub o_w_id: i32,
    /// [`NULL_CARRIER_ID`](crate::scale::NULL_CARRIER_ID) until delivered.
    pub o_carrier_id: i32,
    pub o_ol_cnt: i32,
    /// True when every line is supplied by the ordering warehouse.
    pub o_all_local: bool,
    /// Entry timestamp, fixed 14-byte form.
    pub o_entry_d: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    pub ol_o_id: i32,
    pub ol_d_id: i32,
    pub ol_w_id: i32,
    /// 1-based position within the order, in `[1, o_ol_cnt]`.
    pub ol_number: i32,
    pub ol_i_id: i32,
    pub ol_supply_w_id: i32,
    pub ol_quantity: i32,
    pub ol_amount: f32,
    /// Empty until the order is delivered.
    pub ol_delivery_d: String,
    /// Copied from the supplying stock's `s_dist` entry for the ordering
    /// district.
    pub ol_dist_info: String,
}

/// Marker row: present iff the order has not been delivered yet. Only its
/// presence carries information.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub no_w_id: i32,
    pub no_d_id: i32,
    pub no_o_id: i32,
}

/// Append-only payment audit row. Never looked up.
#[derive(Debug, Clone, Serialize)]
pub struct History {
    pub h_c_id: i32,
    pub h_c_d_id: i32,
    pub h_c_w_id: i32,
    pub h_d_id: i32,
    pub h_w_id: i32,
    pub h_date: String,
    pub h_amount: f32,
    /// Paying warehouse and district names joined by four spaces.
    pub h_data: String,
}

impl Order {
    /// True once delivery has assigned a carrier.
    pub fn is_delivered(&self) -> bool {
        self.o_carrier_id != crate::scale::NULL_CARRIER_ID
    }
}
