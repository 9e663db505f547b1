//! Transaction inputs and outputs.
//!
//! Each transaction fills one of these records for the caller to display.
//! They are plain owned values; copying out of the tables is what lets
//! the engine mutate rows freely while a result is still held.

use serde::Serialize;

use crate::records::Customer;

/// Status text reported when a new-order request names an unknown item.
pub const INVALID_ITEM_STATUS: &str = "Item number is not valid";

/// One requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewOrderItem {
    pub i_id: i32,
    pub ol_supply_w_id: i32,
    /// In [1, 10].
    pub ol_quantity: i32,
}

/// Brand/generic classification of a new-order line: `Brand` when both the
/// item data and the supplying stock data carry the `"ORIGINAL"` marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum BrandGeneric {
    Brand,
    #[default]
    Generic,
}

/// Per-line detail in a new-order result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewOrderLineInfo {
    pub i_name: String,
    pub i_price: f32,
    /// Supplying stock quantity after the replenish rule applied.
    pub s_quantity: i32,
    pub ol_amount: f32,
    pub brand_generic: BrandGeneric,
}

/// Result of a new-order transaction.
///
/// On a rollback (unknown item id) only the header fields read before
/// validation (`d_tax`, `o_id`, `c_last`, `c_credit`, `c_discount`) are
/// meaningful, and [`status`](NewOrderOutput::status) holds
/// [`INVALID_ITEM_STATUS`]. TPC-C §2.4.3.4 requires those header fields to
/// be displayed even for rolled-back orders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewOrderOutput {
    pub w_tax: f32,
    pub d_tax: f32,
    /// The order id this request was assigned (or would have been).
    pub o_id: i32,
    pub c_last: String,
    pub c_credit: String,
    pub c_discount: f32,
    /// Sum of `ol_amount` over all lines.
    pub total: f32,
    pub items: Vec<NewOrderLineInfo>,
    /// Empty on commit; a diagnostic sentence on rollback.
    pub status: String,
}

impl NewOrderOutput {
    /// True when the order was committed (no status text).
    pub fn committed(&self) -> bool {
        self.status.is_empty()
    }
}

/// Result of a payment transaction: the updated year-to-date totals and a
/// copy of the customer row after the payment applied.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOutput {
    pub w_ytd: f32,
    pub d_ytd: f32,
    pub customer: Customer,
}

/// One line echoed by order-status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderStatusLine {
    pub ol_i_id: i32,
    pub ol_supply_w_id: i32,
    pub ol_quantity: i32,
    pub ol_amount: f32,
    pub ol_delivery_d: String,
}

/// Result of an order-status transaction: the customer echo plus their
/// most recent order and its lines.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderStatusOutput {
    pub c_id: i32,
    pub c_balance: f32,
    pub c_first: String,
    pub c_middle: String,
    pub c_last: String,
    pub o_id: i32,
    pub o_carrier_id: i32,
    pub o_entry_d: String,
    pub lines: Vec<OrderStatusLine>,
}

/// One delivered order in a delivery result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryOrder {
    pub d_id: i32,
    pub o_id: i32,
}
