//! The five TPC-C transaction procedures.
//!
//! All five mutate (or read) the tables through [`Tables`] and fill an
//! owned output record. New-order is the only one that can fail for a
//! business reason (an unknown item id), and it validates every item
//! before its first write, so a rolled-back order leaves no trace.
//!
//! Reads that feed later writes are copied into locals first; no borrow
//! is held across an insert.

use tracing::debug;

use tpcc_core::error::{Result, TpccError};
use tpcc_core::keys::{customer_key, district_key, new_order_key, order_key, order_line_key, stock_key};
use tpcc_core::output::{
    BrandGeneric, DeliveryOrder, NewOrderItem, NewOrderLineInfo, NewOrderOutput, OrderStatusLine,
    OrderStatusOutput, PaymentOutput, INVALID_ITEM_STATUS,
};
use tpcc_core::records::{History, NewOrder, Order, OrderLine};
use tpcc_core::scale::{
    BAD_CREDIT, DISTRICTS_PER_WAREHOUSE, MAX_CUSTOMER_DATA, MAX_OL_CNT, NULL_CARRIER_ID,
    ORIGINAL_MARKER, STOCK_LEVEL_ORDERS,
};

use crate::tables::Tables;

impl Tables {
    /// New-order: enter an order of `items` for one customer.
    ///
    /// Returns the filled output; [`NewOrderOutput::committed`] is false
    /// when an item id failed to resolve, in which case no table was
    /// touched and `status` carries the rollback text. Header fields read
    /// before validation are filled either way, per TPC-C §2.4.3.4.
    pub fn new_order(
        &mut self,
        w_id: i32,
        d_id: i32,
        c_id: i32,
        items: &[NewOrderItem],
        now: &str,
    ) -> Result<NewOrderOutput> {
        let dk = district_key(w_id, d_id);
        let (d_tax, o_id) = {
            let district = self
                .districts
                .get(&dk)
                .ok_or(TpccError::DistrictNotFound { w_id, d_id })?;
            (district.d_tax, district.d_next_o_id)
        };
        debug_assert!(self.find_order(w_id, d_id, o_id).is_none());

        let customer = self
            .find_customer(w_id, d_id, c_id)
            .ok_or(TpccError::CustomerNotFound { w_id, d_id, c_id })?;
        let mut out = NewOrderOutput {
            d_tax,
            o_id,
            c_last: customer.c_last.clone(),
            c_credit: customer.c_credit.clone(),
            c_discount: customer.c_discount,
            ..NewOrderOutput::default()
        };

        // Validation pass: resolve every item before the first write, so
        // an unknown id aborts with the tables untouched.
        let mut all_local = true;
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            match self.find_item(item.i_id) {
                Some(found) => resolved.push((
                    found.i_name.clone(),
                    found.i_price,
                    found.i_data.contains(ORIGINAL_MARKER),
                )),
                None => {
                    debug!(target: "tpcc::txn", w_id, d_id, i_id = item.i_id, "new-order rollback");
                    out.status = INVALID_ITEM_STATUS.to_string();
                    return Ok(out);
                }
            }
            all_local &= item.ol_supply_w_id == w_id;
        }

        // Write phase.
        self.districts
            .get_mut(&dk)
            .ok_or(TpccError::DistrictNotFound { w_id, d_id })?
            .d_next_o_id += 1;
        out.w_tax = self
            .find_warehouse(w_id)
            .ok_or(TpccError::WarehouseNotFound { w_id })?
            .w_tax;

        self.insert_order(Order {
            o_id,
            o_c_id: c_id,
            o_d_id: d_id,
            o_w_id: w_id,
            o_carrier_id: NULL_CARRIER_ID,
            o_ol_cnt: items.len() as i32,
            o_all_local: all_local,
            o_entry_d: now.to_string(),
        })?;
        self.insert_new_order(NewOrder {
            no_w_id: w_id,
            no_d_id: d_id,
            no_o_id: o_id,
        })?;

        for (index, (item, (i_name, i_price, item_original))) in
            items.iter().zip(resolved).enumerate()
        {
            let (s_quantity, dist_info, stock_original) = {
                let stock = self
                    .stock
                    .get_mut(&stock_key(item.ol_supply_w_id, item.i_id))
                    .ok_or(TpccError::StockNotFound {
                        w_id: item.ol_supply_w_id,
                        i_id: item.i_id,
                    })?;
                if stock.s_quantity >= item.ol_quantity + 10 {
                    stock.s_quantity -= item.ol_quantity;
                } else {
                    // Replenish: the shelf is restocked by 91 units as it
                    // drops below quantity + 10.
                    stock.s_quantity = stock.s_quantity - item.ol_quantity + 91;
                }
                stock.s_ytd += item.ol_quantity;
                stock.s_order_cnt += 1;
                if item.ol_supply_w_id != w_id {
                    stock.s_remote_cnt += 1;
                }
                (
                    stock.s_quantity,
                    stock.s_dist[d_id as usize - 1].clone(),
                    stock.s_data.contains(ORIGINAL_MARKER),
                )
            };

            let ol_amount = item.ol_quantity as f32 * i_price;
            self.insert_order_line(OrderLine {
                ol_o_id: o_id,
                ol_d_id: d_id,
                ol_w_id: w_id,
                ol_number: index as i32 + 1,
                ol_i_id: item.i_id,
                ol_supply_w_id: item.ol_supply_w_id,
                ol_quantity: item.ol_quantity,
                ol_amount,
                ol_delivery_d: String::new(),
                ol_dist_info: dist_info,
            })?;

            out.total += ol_amount;
            out.items.push(NewOrderLineInfo {
                i_name,
                i_price,
                s_quantity,
                ol_amount,
                brand_generic: if stock_original && item_original {
                    BrandGeneric::Brand
                } else {
                    BrandGeneric::Generic
                },
            });
        }

        Ok(out)
    }

    /// Payment addressed by customer id.
    pub fn payment(
        &mut self,
        w_id: i32,
        d_id: i32,
        c_w_id: i32,
        c_d_id: i32,
        c_id: i32,
        h_amount: f32,
        now: &str,
    ) -> Result<PaymentOutput> {
        self.payment_to(w_id, d_id, c_w_id, c_d_id, c_id, h_amount, now)
    }

    /// Payment addressed by customer last name; resolves the customer
    /// through the by-name index first.
    pub fn payment_by_name(
        &mut self,
        w_id: i32,
        d_id: i32,
        c_w_id: i32,
        c_d_id: i32,
        c_last: &str,
        h_amount: f32,
        now: &str,
    ) -> Result<PaymentOutput> {
        let c_id = self.find_customer_by_name(c_w_id, c_d_id, c_last)?.c_id;
        self.payment_to(w_id, d_id, c_w_id, c_d_id, c_id, h_amount, now)
    }

    fn payment_to(
        &mut self,
        w_id: i32,
        d_id: i32,
        c_w_id: i32,
        c_d_id: i32,
        c_id: i32,
        h_amount: f32,
        now: &str,
    ) -> Result<PaymentOutput> {
        let (w_ytd, w_name) = {
            let warehouse = self
                .warehouses
                .get_mut(&w_id)
                .ok_or(TpccError::WarehouseNotFound { w_id })?;
            warehouse.w_ytd += h_amount;
            (warehouse.w_ytd, warehouse.w_name.clone())
        };
        let (d_ytd, d_name) = {
            let district = self
                .districts
                .get_mut(&district_key(w_id, d_id))
                .ok_or(TpccError::DistrictNotFound { w_id, d_id })?;
            district.d_ytd += h_amount;
            (district.d_ytd, district.d_name.clone())
        };

        let customer = {
            let customer = self
                .customers
                .get_mut(&customer_key(c_w_id, c_d_id, c_id))
                .ok_or(TpccError::CustomerNotFound {
                    w_id: c_w_id,
                    d_id: c_d_id,
                    c_id,
                })?;
            customer.c_balance -= h_amount;
            customer.c_ytd_payment += h_amount;
            customer.c_payment_cnt += 1;
            if customer.c_credit == BAD_CREDIT {
                // Bad credit: the payment record is prepended to c_data
                // and the tail truncated to the field capacity.
                let entry = format!(
                    "({}, {}, {}, {}, {}, {:.2})\n",
                    c_id, c_d_id, c_w_id, d_id, w_id, h_amount
                );
                let mut data = String::with_capacity(MAX_CUSTOMER_DATA);
                data.push_str(&entry);
                for ch in customer.c_data.chars() {
                    if data.len() + ch.len_utf8() > MAX_CUSTOMER_DATA {
                        break;
                    }
                    data.push(ch);
                }
                customer.c_data = data;
            }
            customer.clone()
        };

        self.insert_history(History {
            h_c_id: c_id,
            h_c_d_id: c_d_id,
            h_c_w_id: c_w_id,
            h_d_id: d_id,
            h_w_id: w_id,
            h_date: now.to_string(),
            h_amount,
            h_data: format!("{w_name}    {d_name}"),
        });

        Ok(PaymentOutput {
            w_ytd,
            d_ytd,
            customer,
        })
    }

    /// Order-status addressed by customer id.
    pub fn order_status(&self, w_id: i32, d_id: i32, c_id: i32) -> Result<OrderStatusOutput> {
        self.order_status_of(w_id, d_id, c_id)
    }

    /// Order-status addressed by customer last name.
    pub fn order_status_by_name(
        &self,
        w_id: i32,
        d_id: i32,
        c_last: &str,
    ) -> Result<OrderStatusOutput> {
        let customer = self.find_customer_by_name(w_id, d_id, c_last)?;
        self.order_status_of(customer.c_w_id, customer.c_d_id, customer.c_id)
    }

    fn order_status_of(&self, w_id: i32, d_id: i32, c_id: i32) -> Result<OrderStatusOutput> {
        let customer = self
            .find_customer(w_id, d_id, c_id)
            .ok_or(TpccError::CustomerNotFound { w_id, d_id, c_id })?;
        let order = self
            .find_last_order_by_customer(w_id, d_id, c_id)
            .ok_or(TpccError::NoOrdersForCustomer { w_id, d_id, c_id })?;

        let mut out = OrderStatusOutput {
            c_id: customer.c_id,
            c_balance: customer.c_balance,
            c_first: customer.c_first.clone(),
            c_middle: customer.c_middle.clone(),
            c_last: customer.c_last.clone(),
            o_id: order.o_id,
            o_carrier_id: order.o_carrier_id,
            o_entry_d: order.o_entry_d.clone(),
            lines: Vec::with_capacity(order.o_ol_cnt as usize),
        };
        for number in 1..=order.o_ol_cnt {
            let line = self.find_order_line(w_id, d_id, order.o_id, number).ok_or(
                TpccError::OrderLineNotFound {
                    w_id,
                    d_id,
                    o_id: order.o_id,
                    number,
                },
            )?;
            out.lines.push(OrderStatusLine {
                ol_i_id: line.ol_i_id,
                ol_supply_w_id: line.ol_supply_w_id,
                ol_quantity: line.ol_quantity,
                ol_amount: line.ol_amount,
                ol_delivery_d: line.ol_delivery_d.clone(),
            });
        }
        Ok(out)
    }

    /// Delivery: pop the lowest undelivered order in every district of
    /// the warehouse, stamp the carrier and delivery date, and credit
    /// each order's customer with its total.
    ///
    /// Districts with no undelivered order are skipped, not errors; they
    /// are simply absent from the returned list.
    pub fn delivery(
        &mut self,
        w_id: i32,
        carrier_id: i32,
        now: &str,
    ) -> Result<Vec<DeliveryOrder>> {
        let mut delivered = Vec::with_capacity(DISTRICTS_PER_WAREHOUSE as usize);
        for d_id in 1..=DISTRICTS_PER_WAREHOUSE {
            let probe = new_order_key(w_id, d_id, 1);
            let (key, o_id) = match self.new_orders.range(probe..).next() {
                Some((&key, new_order))
                    if new_order.no_w_id == w_id && new_order.no_d_id == d_id =>
                {
                    (key, new_order.no_o_id)
                }
                _ => {
                    debug!(target: "tpcc::txn", w_id, d_id, "no undelivered orders");
                    continue;
                }
            };
            self.new_orders.remove(&key);

            let (o_c_id, o_ol_cnt) = {
                let order = self
                    .orders
                    .get_mut(&order_key(w_id, d_id, o_id))
                    .ok_or(TpccError::OrderNotFound { w_id, d_id, o_id })?;
                debug_assert_eq!(order.o_carrier_id, NULL_CARRIER_ID);
                order.o_carrier_id = carrier_id;
                (order.o_c_id, order.o_ol_cnt)
            };

            let mut total = 0.0f32;
            for number in 1..=o_ol_cnt {
                let line = self
                    .order_lines
                    .get_mut(&order_line_key(w_id, d_id, o_id, number))
                    .ok_or(TpccError::OrderLineNotFound {
                        w_id,
                        d_id,
                        o_id,
                        number,
                    })?;
                debug_assert!(line.ol_delivery_d.is_empty());
                line.ol_delivery_d = now.to_string();
                total += line.ol_amount;
            }

            let customer = self
                .customers
                .get_mut(&customer_key(w_id, d_id, o_c_id))
                .ok_or(TpccError::CustomerNotFound {
                    w_id,
                    d_id,
                    c_id: o_c_id,
                })?;
            customer.c_balance += total;
            customer.c_delivery_cnt += 1;

            delivered.push(DeliveryOrder { d_id, o_id });
        }
        Ok(delivered)
    }

    /// Stock-level: count distinct items on the district's last twenty
    /// orders whose stock has fallen below `threshold`.
    ///
    /// The line scan walks numbers `1..=MAX_OL_CNT` and stops at the
    /// first gap, which by construction is the end of the order's lines.
    pub fn stock_level(&self, w_id: i32, d_id: i32, threshold: i32) -> Result<usize> {
        let next_o_id = self
            .find_district(w_id, d_id)
            .ok_or(TpccError::DistrictNotFound { w_id, d_id })?
            .d_next_o_id;

        let mut item_ids = Vec::with_capacity(300);
        for o_id in (next_o_id - STOCK_LEVEL_ORDERS)..next_o_id {
            for number in 1..=MAX_OL_CNT {
                let Some(line) = self.find_order_line(w_id, d_id, o_id, number) else {
                    break;
                };
                let stock = self.find_stock(w_id, line.ol_i_id).ok_or(
                    TpccError::StockNotFound {
                        w_id,
                        i_id: line.ol_i_id,
                    },
                )?;
                if stock.s_quantity < threshold {
                    item_ids.push(line.ol_i_id);
                }
            }
        }

        item_ids.sort_unstable();
        item_ids.dedup();
        Ok(item_ids.len())
    }
}
