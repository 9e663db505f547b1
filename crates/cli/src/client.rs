//! Workload driver.
//!
//! Picks the next transaction profile from the standard mix, draws its
//! parameters from the prescribed distributions, and calls the matching
//! engine entry point. The driver owns the tables, the sampler, and the
//! clock for the duration of a run.

use tracing::trace;

use tpcc_core::error::Result;
use tpcc_core::output::NewOrderItem;
use tpcc_core::scale::{
    CUSTOMERS_PER_DISTRICT, DISTRICTS_PER_WAREHOUSE, MAX_CARRIER_ID, MAX_OL_CNT, MIN_CARRIER_ID,
    MIN_OL_CNT, NUM_ITEMS,
};
use tpcc_engine::Tables;

use crate::clock::Clock;
use crate::random::TpccRandom;

/// The five transaction profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    NewOrder,
    Payment,
    OrderStatus,
    Delivery,
    StockLevel,
}

/// Committed / rolled-back tallies for one run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunCounts {
    pub new_order: u64,
    pub payment: u64,
    pub order_status: u64,
    pub delivery: u64,
    pub stock_level: u64,
    /// New-order transactions that hit the intentional invalid item.
    pub rollbacks: u64,
}

impl RunCounts {
    /// Total transactions executed, including rolled-back new-orders.
    pub fn total(&self) -> u64 {
        self.new_order + self.payment + self.order_status + self.delivery + self.stock_level
    }
}

/// Transaction driver over one set of tables.
pub struct Client {
    clock: Box<dyn Clock>,
    random: TpccRandom,
    tables: Tables,
    num_warehouses: i32,
    counts: RunCounts,
}

impl Client {
    pub fn new(
        clock: Box<dyn Clock>,
        random: TpccRandom,
        tables: Tables,
        num_warehouses: i32,
    ) -> Self {
        Client {
            clock,
            random,
            tables,
            num_warehouses,
            counts: RunCounts::default(),
        }
    }

    /// Execute one transaction from the standard mix: 45 % new-order,
    /// 43 % payment, 4 % each order-status, delivery, and stock-level.
    pub fn do_one(&mut self) -> Result<TransactionKind> {
        let roll = self.random.number(1, 100);
        let kind = if roll <= 4 {
            self.do_stock_level()?;
            TransactionKind::StockLevel
        } else if roll <= 8 {
            self.do_delivery()?;
            TransactionKind::Delivery
        } else if roll <= 12 {
            self.do_order_status()?;
            TransactionKind::OrderStatus
        } else if roll <= 55 {
            self.do_payment()?;
            TransactionKind::Payment
        } else {
            self.do_new_order()?;
            TransactionKind::NewOrder
        };
        trace!(target: "tpcc::client", ?kind, "transaction done");
        Ok(kind)
    }

    /// Tallies so far.
    pub fn counts(&self) -> RunCounts {
        self.counts
    }

    /// Read access to the driven tables (for invariant checks).
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Give the tables back when the run is over.
    pub fn into_tables(self) -> Tables {
        self.tables
    }

    fn home_warehouse(&mut self) -> i32 {
        self.random.number(1, self.num_warehouses)
    }

    fn do_stock_level(&mut self) -> Result<()> {
        let w_id = self.home_warehouse();
        let d_id = self.random.number(1, DISTRICTS_PER_WAREHOUSE);
        let threshold = self.random.number(10, 20);
        self.tables.stock_level(w_id, d_id, threshold)?;
        self.counts.stock_level += 1;
        Ok(())
    }

    fn do_delivery(&mut self) -> Result<()> {
        let w_id = self.home_warehouse();
        let carrier = self.random.number(MIN_CARRIER_ID, MAX_CARRIER_ID);
        let now = self.clock.timestamp();
        self.tables.delivery(w_id, carrier, &now)?;
        self.counts.delivery += 1;
        Ok(())
    }

    fn do_order_status(&mut self) -> Result<()> {
        let w_id = self.home_warehouse();
        let d_id = self.random.number(1, DISTRICTS_PER_WAREHOUSE);
        if self.by_last_name() {
            let c_last = self.random.run_last_name();
            self.tables.order_status_by_name(w_id, d_id, &c_last)?;
        } else {
            let c_id = self.random.nu_rand(1023, 1, CUSTOMERS_PER_DISTRICT);
            self.tables.order_status(w_id, d_id, c_id)?;
        }
        self.counts.order_status += 1;
        Ok(())
    }

    fn do_payment(&mut self) -> Result<()> {
        let w_id = self.home_warehouse();
        let d_id = self.random.number(1, DISTRICTS_PER_WAREHOUSE);
        let h_amount = self.random.number(100, 500_000) as f32 / 100.0;
        let now = self.clock.timestamp();

        // 85 % pay through the home warehouse; the rest through a remote
        // customer (only meaningful with more than one warehouse).
        let (c_w_id, c_d_id) = if self.num_warehouses == 1 || self.random.number(1, 100) <= 85 {
            (w_id, d_id)
        } else {
            (
                self.random.number_excluding(1, self.num_warehouses, w_id),
                self.random.number(1, DISTRICTS_PER_WAREHOUSE),
            )
        };

        if self.by_last_name() {
            let c_last = self.random.run_last_name();
            self.tables
                .payment_by_name(w_id, d_id, c_w_id, c_d_id, &c_last, h_amount, &now)?;
        } else {
            let c_id = self.random.nu_rand(1023, 1, CUSTOMERS_PER_DISTRICT);
            self.tables
                .payment(w_id, d_id, c_w_id, c_d_id, c_id, h_amount, &now)?;
        }
        self.counts.payment += 1;
        Ok(())
    }

    fn do_new_order(&mut self) -> Result<()> {
        let w_id = self.home_warehouse();
        let d_id = self.random.number(1, DISTRICTS_PER_WAREHOUSE);
        let c_id = self.random.nu_rand(1023, 1, CUSTOMERS_PER_DISTRICT);
        let ol_cnt = self.random.number(MIN_OL_CNT, MAX_OL_CNT);
        // One in a hundred orders is built to roll back on its last item.
        let rollback = self.random.number(1, 100) == 1;

        let mut items = Vec::with_capacity(ol_cnt as usize);
        for index in 0..ol_cnt {
            let i_id = if rollback && index == ol_cnt - 1 {
                NUM_ITEMS + 1
            } else {
                self.random.nu_rand(8191, 1, NUM_ITEMS)
            };
            let ol_supply_w_id =
                if self.num_warehouses > 1 && self.random.number(1, 100) == 1 {
                    self.random.number_excluding(1, self.num_warehouses, w_id)
                } else {
                    w_id
                };
            let ol_quantity = self.random.number(1, 10);
            items.push(NewOrderItem {
                i_id,
                ol_supply_w_id,
                ol_quantity,
            });
        }

        let now = self.clock.timestamp();
        let out = self.tables.new_order(w_id, d_id, c_id, &items, &now)?;
        if !out.committed() {
            self.counts.rollbacks += 1;
        }
        self.counts.new_order += 1;
        Ok(())
    }

    fn by_last_name(&mut self) -> bool {
        self.random.number(1, 100) <= 60
    }
}
