//! Composite key encoders for the table indexes.
//!
//! Each composite logical key is packed into a single `i32` (or `i64` for
//! the two shifted encodings) whose numeric order matches the iteration
//! order the transactions rely on:
//!
//! - the new-order key orders by `o_id` within a district, which delivery
//!   uses to pop the lowest undelivered order;
//! - the order-by-customer key orders by `o_id` within `(w, d, c)`, which
//!   order-status uses to find a customer's most recent order.
//!
//! The order and order-line keys place `o_id` in the most significant
//! position. Nothing iterates those indexes, so only point lookups care,
//! and the encoding is kept for its positivity checks.
//!
//! All encoders require 1-based inputs in range and produce strictly
//! positive keys; both are checked with `debug_assert!`.

use crate::scale::{
    CUSTOMERS_PER_DISTRICT, DISTRICTS_PER_WAREHOUSE, MAX_LAST_LEN, MAX_OL_CNT, MAX_ORDER_ID,
    MAX_WAREHOUSE_ID, STOCK_PER_WAREHOUSE,
};

#[inline]
fn check_warehouse(w_id: i32) {
    debug_assert!((1..=MAX_WAREHOUSE_ID).contains(&w_id), "w_id {w_id}");
}

#[inline]
fn check_district(d_id: i32) {
    debug_assert!((1..=DISTRICTS_PER_WAREHOUSE).contains(&d_id), "d_id {d_id}");
}

#[inline]
fn check_customer(c_id: i32) {
    debug_assert!((1..=CUSTOMERS_PER_DISTRICT).contains(&c_id), "c_id {c_id}");
}

#[inline]
fn check_order(o_id: i32) {
    debug_assert!((1..=MAX_ORDER_ID).contains(&o_id), "o_id {o_id}");
}

/// Key for a stock row.
pub fn stock_key(w_id: i32, i_id: i32) -> i32 {
    check_warehouse(w_id);
    debug_assert!((1..=STOCK_PER_WAREHOUSE).contains(&i_id), "i_id {i_id}");
    let key = i_id + w_id * STOCK_PER_WAREHOUSE;
    debug_assert!(key > 0);
    key
}

/// Key for a district row.
pub fn district_key(w_id: i32, d_id: i32) -> i32 {
    check_warehouse(w_id);
    check_district(d_id);
    let key = d_id + w_id * DISTRICTS_PER_WAREHOUSE;
    debug_assert!(key > 0);
    key
}

/// Key for a customer row.
pub fn customer_key(w_id: i32, d_id: i32, c_id: i32) -> i32 {
    check_warehouse(w_id);
    check_district(d_id);
    check_customer(c_id);
    let key = (w_id * DISTRICTS_PER_WAREHOUSE + d_id) * CUSTOMERS_PER_DISTRICT + c_id;
    debug_assert!(key > 0);
    key
}

/// Key for an order row. `o_id` sits in the most significant position;
/// no transaction iterates this index.
pub fn order_key(w_id: i32, d_id: i32, o_id: i32) -> i32 {
    check_warehouse(w_id);
    check_district(d_id);
    check_order(o_id);
    let key = (o_id * DISTRICTS_PER_WAREHOUSE + d_id) * MAX_WAREHOUSE_ID + w_id;
    debug_assert!(key > 0);
    key
}

/// Key for an order line row: the order key scaled by the maximum line
/// count, plus the 1-based line number.
pub fn order_line_key(w_id: i32, d_id: i32, o_id: i32, number: i32) -> i32 {
    debug_assert!((1..=MAX_OL_CNT).contains(&number), "ol_number {number}");
    let key = order_key(w_id, d_id, o_id) * MAX_OL_CNT + number;
    debug_assert!(key > 0);
    key
}

/// Key for a new-order row. The district occupies the high 32 bits and
/// `o_id` the low 32, so in-district iteration order is `o_id` order;
/// delivery pops the lowest key at or above `new_order_key(w, d, 1)`.
pub fn new_order_key(w_id: i32, d_id: i32, o_id: i32) -> i64 {
    check_warehouse(w_id);
    check_district(d_id);
    check_order(o_id);
    let upper = w_id * MAX_WAREHOUSE_ID + d_id;
    debug_assert!(upper > 0);
    let key = (i64::from(upper) << 32) | i64::from(o_id);
    debug_assert!(key > 0);
    key
}

/// Key for the order-by-customer index. The customer key occupies the
/// high 32 bits and `o_id` the low 32, so within `(w, d, c)` the greatest
/// key is the most recent order.
pub fn order_by_customer_key(w_id: i32, d_id: i32, c_id: i32, o_id: i32) -> i64 {
    check_order(o_id);
    let upper = customer_key(w_id, d_id, c_id);
    let key = (i64::from(upper) << 32) | i64::from(o_id);
    debug_assert!(key > 0);
    key
}

/// Ordered key for the customer-by-name index.
///
/// Derived `Ord` compares fields top to bottom, giving the
/// `(w_id, d_id, last, first)` lexicographic order the by-name lookup
/// scans in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CustomerNameKey {
    pub w_id: i32,
    pub d_id: i32,
    pub last: String,
    pub first: String,
}

impl CustomerNameKey {
    /// Full key for one customer.
    pub fn new(w_id: i32, d_id: i32, last: &str, first: &str) -> Self {
        CustomerNameKey {
            w_id,
            d_id,
            last: last.to_string(),
            first: first.to_string(),
        }
    }

    /// Lower bound of the run of customers sharing `last`: the empty
    /// first name sorts before every generated one.
    pub fn probe(w_id: i32, d_id: i32, last: &str) -> Self {
        CustomerNameKey::new(w_id, d_id, last, "")
    }

    /// Exclusive upper bound of the run of customers sharing `last`.
    ///
    /// Appends `'A'` when there is room; at full capacity the final
    /// character is bumped by one instead.
    pub fn probe_end(w_id: i32, d_id: i32, last: &str) -> Self {
        let mut bound = String::from(last);
        if last.len() < MAX_LAST_LEN {
            bound.push('A');
        } else if let Some(ch) = bound.pop() {
            let next = char::from_u32(ch as u32 + 1).unwrap_or(ch);
            bound.push(next);
        }
        CustomerNameKey::new(w_id, d_id, &bound, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Exact encodings ===

    #[test]
    fn test_stock_key_values() {
        assert_eq!(stock_key(1, 1), 100_001);
        assert_eq!(stock_key(2, 5), 200_005);
        assert_eq!(stock_key(1, STOCK_PER_WAREHOUSE), 200_000);
    }

    #[test]
    fn test_district_key_values() {
        assert_eq!(district_key(1, 1), 11);
        assert_eq!(district_key(1, 10), 20);
        assert_eq!(district_key(3, 7), 37);
    }

    #[test]
    fn test_customer_key_values() {
        assert_eq!(customer_key(1, 1, 1), 33_001);
        assert_eq!(customer_key(1, 1, 3_000), 36_000);
        assert_eq!(customer_key(1, 2, 1), 36_001);
    }

    #[test]
    fn test_order_key_values() {
        assert_eq!(order_key(1, 1, 1), 1_101);
        assert_eq!(order_key(1, 1, 3_001), 3_001_101);
    }

    #[test]
    fn test_order_line_key_extends_order_key() {
        let base = order_key(1, 4, 2_000);
        assert_eq!(order_line_key(1, 4, 2_000, 1), base * MAX_OL_CNT + 1);
        assert_eq!(order_line_key(1, 4, 2_000, 15), base * MAX_OL_CNT + 15);
    }

    #[test]
    fn test_new_order_key_packs_district_high() {
        let key = new_order_key(2, 3, 77);
        assert_eq!(key >> 32, i64::from(2 * MAX_WAREHOUSE_ID + 3));
        assert_eq!(key & 0xFFFF_FFFF, 77);
    }

    #[test]
    fn test_order_by_customer_key_packs_customer_high() {
        let key = order_by_customer_key(1, 1, 42, 9);
        assert_eq!(key >> 32, i64::from(customer_key(1, 1, 42)));
        assert_eq!(key & 0xFFFF_FFFF, 9);
    }

    // === Ordering properties the transactions rely on ===

    #[test]
    fn test_new_order_key_orders_by_o_id_within_district() {
        let a = new_order_key(1, 1, 5);
        let b = new_order_key(1, 1, 6);
        let c = new_order_key(1, 2, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_order_by_customer_key_orders_by_o_id_within_customer() {
        let a = order_by_customer_key(1, 1, 7, 100);
        let b = order_by_customer_key(1, 1, 7, 101);
        let c = order_by_customer_key(1, 1, 8, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_all_keys_positive_at_bounds() {
        assert!(stock_key(MAX_WAREHOUSE_ID, STOCK_PER_WAREHOUSE) > 0);
        assert!(district_key(MAX_WAREHOUSE_ID, DISTRICTS_PER_WAREHOUSE) > 0);
        assert!(customer_key(MAX_WAREHOUSE_ID, DISTRICTS_PER_WAREHOUSE, CUSTOMERS_PER_DISTRICT) > 0);
        assert!(new_order_key(MAX_WAREHOUSE_ID, DISTRICTS_PER_WAREHOUSE, 1) > 0);
        assert!(
            order_by_customer_key(
                MAX_WAREHOUSE_ID,
                DISTRICTS_PER_WAREHOUSE,
                CUSTOMERS_PER_DISTRICT,
                1
            ) > 0
        );
    }

    // === Name key ===

    #[test]
    fn test_name_key_orders_by_fields() {
        let a = CustomerNameKey::new(1, 1, "BARBAR", "ALICE");
        let b = CustomerNameKey::new(1, 1, "BARBAR", "BOB");
        let c = CustomerNameKey::new(1, 1, "BAROUGHT", "AAA");
        let d = CustomerNameKey::new(1, 2, "AAA", "AAA");
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn test_probe_brackets_the_last_name_run() {
        let lo = CustomerNameKey::probe(1, 1, "BARBAR");
        let hi = CustomerNameKey::probe_end(1, 1, "BARBAR");
        let inside = CustomerNameKey::new(1, 1, "BARBAR", "ZZZZ");
        let outside = CustomerNameKey::new(1, 1, "BARBARA", "AAA");
        assert!(lo <= inside && inside < hi);
        // The bound is "BARBAR" + 'A', so the longer name falls outside.
        assert!(outside >= hi);
    }

    #[test]
    fn test_probe_end_at_full_capacity_bumps_last_byte() {
        let last = "ABABABABABABABAB"; // exactly MAX_LAST_LEN bytes
        assert_eq!(last.len(), MAX_LAST_LEN);
        let hi = CustomerNameKey::probe_end(1, 1, last);
        assert_eq!(hi.last, "ABABABABABABABAC");
    }
}
