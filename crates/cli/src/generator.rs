//! Initial table population.
//!
//! Fills the tables from the benchmark's load distributions: the shared
//! item catalog first, then one warehouse at a time with its stock,
//! districts, customers, history, and order backlog. Every district is
//! loaded with [`INITIAL_ORDERS_PER_DISTRICT`] orders against a shuffled
//! customer permutation; the newest nine hundred of them start
//! undelivered, each with its marker row.

use tpcc_core::error::Result;
use tpcc_core::records::{
    Customer, District, History, Item, NewOrder, Order, OrderLine, Stock, Warehouse,
};
use tpcc_core::scale::{
    BAD_CREDIT, CUSTOMERS_PER_DISTRICT, DISTRICTS_PER_WAREHOUSE, DIST_INFO_LEN,
    FIRST_UNDELIVERED_ORDER_ID, GOOD_CREDIT, INITIAL_ORDERS_PER_DISTRICT, MAX_CARRIER_ID,
    MAX_OL_CNT, MIN_CARRIER_ID, MIN_OL_CNT, NULL_CARRIER_ID, NUM_ITEMS, ORIGINAL_MARKER,
    STOCK_PER_WAREHOUSE,
};
use tpcc_engine::Tables;

use crate::random::TpccRandom;

/// Fraction of items, stock rows, and customers flagged as "original" /
/// bad-credit: one in ten.
const ORIGINAL_PERCENT: i32 = 10;
const BAD_CREDIT_PERCENT: i32 = 10;

/// Quantity loaded into every initial order line.
const LOAD_OL_QUANTITY: i32 = 5;

/// Table populator. Consumes randomness from one sampler so a seeded
/// load is fully reproducible.
pub struct Generator {
    random: TpccRandom,
    now: String,
}

impl Generator {
    pub fn new(random: TpccRandom, now: &str) -> Self {
        Generator {
            random,
            now: now.to_string(),
        }
    }

    /// Load the shared item catalog.
    pub fn make_items(&mut self, tables: &mut Tables) {
        for i_id in 1..=NUM_ITEMS {
            let original = self.random.number(1, 100) <= ORIGINAL_PERCENT;
            let item = self.generate_item(i_id, original);
            tables.insert_item(item);
        }
    }

    /// Load one warehouse: stock, districts, customers, history, orders.
    pub fn make_warehouse(&mut self, tables: &mut Tables, w_id: i32) -> Result<()> {
        tables.insert_warehouse(Warehouse {
            w_id,
            w_name: self.random.astring(6, 10),
            w_tax: self.tax_rate(),
            w_ytd: 300_000.0,
        })?;

        for i_id in 1..=STOCK_PER_WAREHOUSE {
            let original = self.random.number(1, 100) <= ORIGINAL_PERCENT;
            let stock = self.generate_stock(w_id, i_id, original);
            tables.insert_stock(stock)?;
        }

        for d_id in 1..=DISTRICTS_PER_WAREHOUSE {
            self.make_district(tables, w_id, d_id)?;
        }
        Ok(())
    }

    fn make_district(&mut self, tables: &mut Tables, w_id: i32, d_id: i32) -> Result<()> {
        tables.insert_district(District {
            d_id,
            d_w_id: w_id,
            d_name: self.random.astring(6, 10),
            d_tax: self.tax_rate(),
            d_ytd: 30_000.0,
            d_next_o_id: INITIAL_ORDERS_PER_DISTRICT + 1,
        })?;

        for c_id in 1..=CUSTOMERS_PER_DISTRICT {
            let customer = self.generate_customer(w_id, d_id, c_id);
            tables.insert_customer(customer)?;
            let history = self.generate_history(w_id, d_id, c_id);
            tables.insert_history(history);
        }

        // Each loaded order belongs to a distinct customer of the
        // district; the newest 900 start undelivered.
        let customer_ids = self.random.permutation(1, CUSTOMERS_PER_DISTRICT);
        for o_id in 1..=INITIAL_ORDERS_PER_DISTRICT {
            let undelivered = o_id >= FIRST_UNDELIVERED_ORDER_ID;
            let c_id = customer_ids[o_id as usize - 1];
            let ol_cnt = self.random.number(MIN_OL_CNT, MAX_OL_CNT);

            tables.insert_order(Order {
                o_id,
                o_c_id: c_id,
                o_d_id: d_id,
                o_w_id: w_id,
                o_carrier_id: if undelivered {
                    NULL_CARRIER_ID
                } else {
                    self.random.number(MIN_CARRIER_ID, MAX_CARRIER_ID)
                },
                o_ol_cnt: ol_cnt,
                o_all_local: true,
                o_entry_d: self.now.clone(),
            })?;

            for number in 1..=ol_cnt {
                let line = self.generate_order_line(w_id, d_id, o_id, number, undelivered);
                tables.insert_order_line(line)?;
            }

            if undelivered {
                tables.insert_new_order(NewOrder {
                    no_w_id: w_id,
                    no_d_id: d_id,
                    no_o_id: o_id,
                })?;
            }
        }
        Ok(())
    }

    fn generate_item(&mut self, i_id: i32, original: bool) -> Item {
        Item {
            i_id,
            i_name: self.random.astring(14, 24),
            i_price: self.random.number(100, 10_000) as f32 / 100.0,
            i_data: self.data_string(original),
        }
    }

    fn generate_stock(&mut self, w_id: i32, i_id: i32, original: bool) -> Stock {
        Stock {
            s_i_id: i_id,
            s_w_id: w_id,
            s_quantity: self.random.number(10, 100),
            s_ytd: 0,
            s_order_cnt: 0,
            s_remote_cnt: 0,
            s_dist: std::array::from_fn(|_| {
                self.random.astring(DIST_INFO_LEN, DIST_INFO_LEN)
            }),
            s_data: self.data_string(original),
        }
    }

    fn generate_customer(&mut self, w_id: i32, d_id: i32, c_id: i32) -> Customer {
        // The first thousand customers get the thousand distinct names;
        // the rest reuse names non-uniformly (TPC-C §4.3.3.1).
        let c_last = if c_id <= 1_000 {
            TpccRandom::last_name(c_id - 1)
        } else {
            let n = self.random.nu_rand(255, 0, 999);
            TpccRandom::last_name(n)
        };
        let bad_credit = self.random.number(1, 100) <= BAD_CREDIT_PERCENT;
        Customer {
            c_id,
            c_d_id: d_id,
            c_w_id: w_id,
            c_first: self.random.astring(8, 16),
            c_middle: "OE".to_string(),
            c_last,
            c_credit: if bad_credit { BAD_CREDIT } else { GOOD_CREDIT }.to_string(),
            c_discount: self.random.number(0, 5_000) as f32 / 10_000.0,
            c_balance: -10.0,
            c_ytd_payment: 10.0,
            c_payment_cnt: 1,
            c_delivery_cnt: 0,
            c_data: self.random.astring(300, 500),
        }
    }

    fn generate_history(&mut self, w_id: i32, d_id: i32, c_id: i32) -> History {
        History {
            h_c_id: c_id,
            h_c_d_id: d_id,
            h_c_w_id: w_id,
            h_d_id: d_id,
            h_w_id: w_id,
            h_date: self.now.clone(),
            h_amount: 10.0,
            h_data: self.random.astring(12, 24),
        }
    }

    fn generate_order_line(
        &mut self,
        w_id: i32,
        d_id: i32,
        o_id: i32,
        number: i32,
        undelivered: bool,
    ) -> OrderLine {
        OrderLine {
            ol_o_id: o_id,
            ol_d_id: d_id,
            ol_w_id: w_id,
            ol_number: number,
            ol_i_id: self.random.number(1, NUM_ITEMS),
            ol_supply_w_id: w_id,
            ol_quantity: LOAD_OL_QUANTITY,
            ol_amount: if undelivered {
                self.random.number(1, 999_999) as f32 / 100.0
            } else {
                0.0
            },
            ol_delivery_d: if undelivered {
                String::new()
            } else {
                self.now.clone()
            },
            ol_dist_info: self.random.astring(DIST_INFO_LEN, DIST_INFO_LEN),
        }
    }

    /// 26–50 char data string; when `original`, the marker overwrites
    /// eight characters at a random offset.
    fn data_string(&mut self, original: bool) -> String {
        let mut data = self.random.astring(26, 50);
        if original {
            let at = self
                .random
                .number(0, (data.len() - ORIGINAL_MARKER.len()) as i32) as usize;
            data.replace_range(at..at + ORIGINAL_MARKER.len(), ORIGINAL_MARKER);
        }
        data
    }

    /// Tax rate in [0, 0.2].
    fn tax_rate(&mut self) -> f32 {
        self.random.number(0, 2_000) as f32 / 10_000.0
    }
}
