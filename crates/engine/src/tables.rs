//! The table façade: one owner for every record.
//!
//! Each table has a primary index mapping an encoded integer key to the
//! owned record. Item is a dense vector (ids are 1-based and contiguous)
//! and History is an append-only vector with no lookup path. The two
//! secondary indexes map to *primary keys*, not records, so a hit is
//! resolved with a second lookup through the primary index.
//!
//! Inserts are unique: a duplicate primary key means the load stage (or a
//! transaction) is corrupt and surfaces as
//! [`TpccError::DuplicateKey`].

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Debug;

use tpcc_core::error::{Result, TpccError};
use tpcc_core::keys::{
    customer_key, district_key, new_order_key, order_by_customer_key, order_key, order_line_key,
    stock_key, CustomerNameKey,
};
use tpcc_core::records::{
    Customer, District, History, Item, NewOrder, Order, OrderLine, Stock, Warehouse,
};
use tpcc_core::scale::MAX_ORDER_ID;

/// Insert that refuses to overwrite: the uniqueness contract of every
/// primary and secondary index.
fn insert_unique<K, V>(
    map: &mut BTreeMap<K, V>,
    table: &'static str,
    key: K,
    value: V,
) -> Result<()>
where
    K: Ord + Debug,
{
    match map.entry(key) {
        Entry::Occupied(entry) => Err(TpccError::DuplicateKey {
            table,
            key: format!("{:?}", entry.key()),
        }),
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

/// Sole owner of the nine logical tables and both secondary indexes.
///
/// All mutation happens through `&mut self` methods; borrowed records
/// returned by the `find_*` methods are released before the next
/// mutation, so container growth can never invalidate a live reference.
#[derive(Debug, Default)]
pub struct Tables {
    /// Dense catalog, `i_id - 1` indexing.
    pub(crate) items: Vec<Item>,
    pub(crate) warehouses: BTreeMap<i32, Warehouse>,
    pub(crate) stock: BTreeMap<i32, Stock>,
    pub(crate) districts: BTreeMap<i32, District>,
    pub(crate) customers: BTreeMap<i32, Customer>,
    /// Secondary: `(w, d, last, first)` ordered, values are `c_id`.
    pub(crate) customers_by_name: BTreeMap<CustomerNameKey, i32>,
    pub(crate) orders: BTreeMap<i32, Order>,
    /// Secondary: customer-major packed key, values are order primary keys.
    pub(crate) orders_by_customer: BTreeMap<i64, i32>,
    pub(crate) order_lines: BTreeMap<i32, OrderLine>,
    pub(crate) new_orders: BTreeMap<i64, NewOrder>,
    pub(crate) history: Vec<History>,
}

impl Tables {
    /// Create an empty set of tables.
    pub fn new() -> Self {
        Tables::default()
    }

    // ========== Item ==========

    /// Append the next catalog item. Ids must arrive dense and in order.
    pub fn insert_item(&mut self, item: Item) {
        debug_assert_eq!(item.i_id as usize, self.items.len() + 1);
        self.items.push(item);
    }

    /// Look up an item; out-of-range ids return `None` (the new-order
    /// rollback path depends on this being a soft miss).
    pub fn find_item(&self, i_id: i32) -> Option<&Item> {
        if i_id < 1 {
            return None;
        }
        self.items.get(i_id as usize - 1)
    }

    /// Number of loaded catalog items.
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    // ========== Warehouse ==========

    pub fn insert_warehouse(&mut self, warehouse: Warehouse) -> Result<()> {
        insert_unique(
            &mut self.warehouses,
            "warehouse",
            warehouse.w_id,
            warehouse,
        )
    }

    pub fn find_warehouse(&self, w_id: i32) -> Option<&Warehouse> {
        self.warehouses.get(&w_id)
    }

    // ========== Stock ==========

    pub fn insert_stock(&mut self, stock: Stock) -> Result<()> {
        let key = stock_key(stock.s_w_id, stock.s_i_id);
        insert_unique(&mut self.stock, "stock", key, stock)
    }

    pub fn find_stock(&self, w_id: i32, i_id: i32) -> Option<&Stock> {
        self.stock.get(&stock_key(w_id, i_id))
    }

    // ========== District ==========

    pub fn insert_district(&mut self, district: District) -> Result<()> {
        let key = district_key(district.d_w_id, district.d_id);
        insert_unique(&mut self.districts, "district", key, district)
    }

    pub fn find_district(&self, w_id: i32, d_id: i32) -> Option<&District> {
        self.districts.get(&district_key(w_id, d_id))
    }

    // ========== Customer ==========

    /// Insert a customer into the primary index and the by-name index.
    /// Both must be free of the key; the two always agree on membership.
    pub fn insert_customer(&mut self, customer: Customer) -> Result<()> {
        let key = customer_key(customer.c_w_id, customer.c_d_id, customer.c_id);
        let name_key = CustomerNameKey::new(
            customer.c_w_id,
            customer.c_d_id,
            &customer.c_last,
            &customer.c_first,
        );
        insert_unique(
            &mut self.customers_by_name,
            "customer-by-name",
            name_key,
            customer.c_id,
        )?;
        insert_unique(&mut self.customers, "customer", key, customer)
    }

    pub fn find_customer(&self, w_id: i32, d_id: i32, c_id: i32) -> Option<&Customer> {
        self.customers.get(&customer_key(w_id, d_id, c_id))
    }

    /// Resolve a customer by `(w_id, d_id, c_last)`.
    ///
    /// Scans the run of customers sharing the last name (ordered by first
    /// name) and returns the one at position `⌈n/2⌉` in 1-based terms,
    /// i.e. index `(n - 1) / 2`, the rule of TPC-C §2.6.2.2. The load
    /// stage guarantees at least one match; none is a corrupt-index error.
    pub fn find_customer_by_name(&self, w_id: i32, d_id: i32, c_last: &str) -> Result<&Customer> {
        let start = CustomerNameKey::probe(w_id, d_id, c_last);
        let end = CustomerNameKey::probe_end(w_id, d_id, c_last);
        let matches: Vec<i32> = self
            .customers_by_name
            .range(start..end)
            .map(|(_, &c_id)| c_id)
            .collect();
        if matches.is_empty() {
            return Err(TpccError::CustomerNameNotFound {
                w_id,
                d_id,
                c_last: c_last.to_string(),
            });
        }
        let c_id = matches[(matches.len() - 1) / 2];
        self.find_customer(w_id, d_id, c_id)
            .ok_or(TpccError::CustomerNotFound { w_id, d_id, c_id })
    }

    // ========== Order ==========

    /// Insert an order into the primary index and the by-customer index.
    pub fn insert_order(&mut self, order: Order) -> Result<()> {
        let key = order_key(order.o_w_id, order.o_d_id, order.o_id);
        let by_customer = order_by_customer_key(order.o_w_id, order.o_d_id, order.o_c_id, order.o_id);
        insert_unique(
            &mut self.orders_by_customer,
            "order-by-customer",
            by_customer,
            key,
        )?;
        insert_unique(&mut self.orders, "order", key, order)
    }

    pub fn find_order(&self, w_id: i32, d_id: i32, o_id: i32) -> Option<&Order> {
        self.orders.get(&order_key(w_id, d_id, o_id))
    }

    /// The order with the greatest `o_id` for one customer, or `None` if
    /// the customer has never ordered.
    ///
    /// Probes the by-customer index just past the customer's key range
    /// and steps back one entry; the prefix check rejects a predecessor
    /// belonging to a different customer.
    pub fn find_last_order_by_customer(
        &self,
        w_id: i32,
        d_id: i32,
        c_id: i32,
    ) -> Option<&Order> {
        let bound = order_by_customer_key(w_id, d_id, c_id, 1) + (1i64 << 32);
        let (_, &order_pk) = self.orders_by_customer.range(..bound).next_back()?;
        let order = self.orders.get(&order_pk)?;
        (order.o_w_id == w_id && order.o_d_id == d_id && order.o_c_id == c_id).then_some(order)
    }

    // ========== OrderLine ==========

    pub fn insert_order_line(&mut self, line: OrderLine) -> Result<()> {
        let key = order_line_key(line.ol_w_id, line.ol_d_id, line.ol_o_id, line.ol_number);
        insert_unique(&mut self.order_lines, "order-line", key, line)
    }

    pub fn find_order_line(
        &self,
        w_id: i32,
        d_id: i32,
        o_id: i32,
        number: i32,
    ) -> Option<&OrderLine> {
        self.order_lines
            .get(&order_line_key(w_id, d_id, o_id, number))
    }

    // ========== NewOrder ==========

    pub fn insert_new_order(&mut self, new_order: NewOrder) -> Result<()> {
        let key = new_order_key(new_order.no_w_id, new_order.no_d_id, new_order.no_o_id);
        insert_unique(&mut self.new_orders, "new-order", key, new_order)
    }

    pub fn find_new_order(&self, w_id: i32, d_id: i32, o_id: i32) -> Option<&NewOrder> {
        self.new_orders.get(&new_order_key(w_id, d_id, o_id))
    }

    /// Undelivered order ids for one district, ascending. Inspection
    /// helper for invariant checks; transactions do not use it.
    pub fn undelivered_order_ids(&self, w_id: i32, d_id: i32) -> Vec<i32> {
        let lo = new_order_key(w_id, d_id, 1);
        let hi = new_order_key(w_id, d_id, MAX_ORDER_ID);
        self.new_orders
            .range(lo..=hi)
            .map(|(_, no)| no.no_o_id)
            .collect()
    }

    // ========== History ==========

    /// Append a payment audit row. History has no lookup path.
    pub fn insert_history(&mut self, history: History) {
        self.history.push(history);
    }

    /// All payment audit rows, in append order.
    pub fn history(&self) -> &[History] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpcc_core::scale::NULL_CARRIER_ID;

    fn warehouse(w_id: i32) -> Warehouse {
        Warehouse {
            w_id,
            w_name: format!("WARE{w_id}"),
            w_tax: 0.05,
            w_ytd: 300_000.0,
        }
    }

    fn customer(w_id: i32, d_id: i32, c_id: i32, last: &str, first: &str) -> Customer {
        Customer {
            c_id,
            c_d_id: d_id,
            c_w_id: w_id,
            c_first: first.to_string(),
            c_middle: "OE".to_string(),
            c_last: last.to_string(),
            c_credit: "GC".to_string(),
            c_discount: 0.1,
            c_balance: -10.0,
            c_ytd_payment: 10.0,
            c_payment_cnt: 1,
            c_delivery_cnt: 0,
            c_data: "some customer data".to_string(),
        }
    }

    fn order(w_id: i32, d_id: i32, o_id: i32, c_id: i32) -> Order {
        Order {
            o_id,
            o_c_id: c_id,
            o_d_id: d_id,
            o_w_id: w_id,
            o_carrier_id: NULL_CARRIER_ID,
            o_ol_cnt: 1,
            o_all_local: true,
            o_entry_d: "20260801120000".to_string(),
        }
    }

    #[test]
    fn test_insert_then_find_warehouse() {
        let mut tables = Tables::new();
        tables.insert_warehouse(warehouse(3)).unwrap();
        let found = tables.find_warehouse(3).unwrap();
        assert_eq!(found.w_name, "WARE3");
        assert!(tables.find_warehouse(4).is_none());
    }

    #[test]
    fn test_duplicate_warehouse_rejected() {
        let mut tables = Tables::new();
        tables.insert_warehouse(warehouse(3)).unwrap();
        let err = tables.insert_warehouse(warehouse(3)).unwrap_err();
        assert!(matches!(err, TpccError::DuplicateKey { table: "warehouse", .. }));
    }

    #[test]
    fn test_item_dense_lookup() {
        let mut tables = Tables::new();
        for i_id in 1..=3 {
            tables.insert_item(Item {
                i_id,
                i_name: format!("item-{i_id}"),
                i_price: 1.0,
                i_data: "data".to_string(),
            });
        }
        assert_eq!(tables.find_item(2).unwrap().i_name, "item-2");
        assert!(tables.find_item(0).is_none());
        assert!(tables.find_item(4).is_none());
        assert!(tables.find_item(-7).is_none());
    }

    #[test]
    fn test_by_name_index_agrees_with_primary() {
        let mut tables = Tables::new();
        tables.insert_customer(customer(1, 1, 7, "BARBAR", "ALICE")).unwrap();
        let by_name = tables.find_customer_by_name(1, 1, "BARBAR").unwrap();
        let by_id = tables.find_customer(1, 1, 7).unwrap();
        assert_eq!(by_name.c_id, by_id.c_id);
        assert_eq!(by_name.c_first, by_id.c_first);
    }

    #[test]
    fn test_by_name_selects_middle_by_first_name_order() {
        let mut tables = Tables::new();
        // Inserted out of first-name order on purpose.
        tables.insert_customer(customer(1, 1, 1, "BARBAR", "CAROL")).unwrap();
        tables.insert_customer(customer(1, 1, 2, "BARBAR", "ALICE")).unwrap();
        tables.insert_customer(customer(1, 1, 3, "BARBAR", "BOB")).unwrap();
        // n = 3 matches ordered ALICE, BOB, CAROL; (n - 1) / 2 = 1 -> BOB.
        let picked = tables.find_customer_by_name(1, 1, "BARBAR").unwrap();
        assert_eq!(picked.c_first, "BOB");

        // n = 1 and n = 2 both resolve to the first entry.
        tables.insert_customer(customer(1, 1, 4, "OUGHTPRI", "DAVE")).unwrap();
        assert_eq!(tables.find_customer_by_name(1, 1, "OUGHTPRI").unwrap().c_first, "DAVE");
        tables.insert_customer(customer(1, 1, 5, "OUGHTPRI", "ZOE")).unwrap();
        assert_eq!(tables.find_customer_by_name(1, 1, "OUGHTPRI").unwrap().c_first, "DAVE");
    }

    #[test]
    fn test_by_name_does_not_bleed_into_longer_names() {
        let mut tables = Tables::new();
        tables.insert_customer(customer(1, 1, 1, "BAR", "ALICE")).unwrap();
        tables.insert_customer(customer(1, 1, 2, "BARBAR", "BOB")).unwrap();
        let picked = tables.find_customer_by_name(1, 1, "BAR").unwrap();
        assert_eq!(picked.c_id, 1);
    }

    #[test]
    fn test_by_name_missing_is_an_error() {
        let mut tables = Tables::new();
        tables.insert_customer(customer(1, 1, 1, "BARBAR", "ALICE")).unwrap();
        let err = tables.find_customer_by_name(1, 1, "ESEANTI").unwrap_err();
        assert!(matches!(err, TpccError::CustomerNameNotFound { .. }));
    }

    #[test]
    fn test_last_order_by_customer() {
        let mut tables = Tables::new();
        tables.insert_order(order(1, 1, 10, 5)).unwrap();
        tables.insert_order(order(1, 1, 12, 5)).unwrap();
        tables.insert_order(order(1, 1, 11, 6)).unwrap();

        let last = tables.find_last_order_by_customer(1, 1, 5).unwrap();
        assert_eq!(last.o_id, 12);
        let last = tables.find_last_order_by_customer(1, 1, 6).unwrap();
        assert_eq!(last.o_id, 11);
        // Customer 4 never ordered; its predecessor in the index belongs
        // to someone else and must be rejected.
        assert!(tables.find_last_order_by_customer(1, 1, 4).is_none());
    }

    #[test]
    fn test_undelivered_order_ids_ascending() {
        let mut tables = Tables::new();
        for o_id in [2_101, 2_103, 2_102] {
            tables
                .insert_new_order(NewOrder {
                    no_w_id: 1,
                    no_d_id: 2,
                    no_o_id: o_id,
                })
                .unwrap();
        }
        assert_eq!(tables.undelivered_order_ids(1, 2), vec![2_101, 2_102, 2_103]);
        assert!(tables.undelivered_order_ids(1, 3).is_empty());
    }
}
