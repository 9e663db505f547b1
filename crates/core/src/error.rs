//! Error types for the TPC-C engine.
//!
//! Every variant here signals a *precondition violation*: a parent row that
//! the load stage guarantees to exist is missing, or a primary key is being
//! inserted twice. Both mean the table state is corrupt, and no transaction
//! retries them.
//!
//! The one business-level failure in the workload (a new-order request
//! naming an unknown item) is deliberately *not* an error. It is reported
//! through the transaction's output status so the caller can display the
//! rolled-back order, see [`crate::output::NewOrderOutput`].

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, TpccError>;

/// Errors raised by table lookups and inserts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TpccError {
    /// Warehouse row missing.
    #[error("warehouse {w_id} does not exist")]
    WarehouseNotFound { w_id: i32 },

    /// District row missing.
    #[error("district ({w_id}, {d_id}) does not exist")]
    DistrictNotFound { w_id: i32, d_id: i32 },

    /// Customer row missing under its primary key.
    #[error("customer ({w_id}, {d_id}, {c_id}) does not exist")]
    CustomerNotFound { w_id: i32, d_id: i32, c_id: i32 },

    /// No customer with the given last name in the district.
    ///
    /// The load stage guarantees every queried last name has at least one
    /// match, so hitting this means the by-name index and the customer
    /// table disagree.
    #[error("no customer named {c_last:?} in district ({w_id}, {d_id})")]
    CustomerNameNotFound {
        w_id: i32,
        d_id: i32,
        c_last: String,
    },

    /// Stock row missing.
    #[error("stock ({w_id}, {i_id}) does not exist")]
    StockNotFound { w_id: i32, i_id: i32 },

    /// Order row missing.
    #[error("order ({w_id}, {d_id}, {o_id}) does not exist")]
    OrderNotFound { w_id: i32, d_id: i32, o_id: i32 },

    /// Order line missing inside the `[1, o_ol_cnt]` range of its order.
    #[error("order line ({w_id}, {d_id}, {o_id}, {number}) does not exist")]
    OrderLineNotFound {
        w_id: i32,
        d_id: i32,
        o_id: i32,
        number: i32,
    },

    /// A customer that is expected to have ordered at least once has no
    /// entry in the order-by-customer index.
    #[error("customer ({w_id}, {d_id}, {c_id}) has no orders")]
    NoOrdersForCustomer { w_id: i32, d_id: i32, c_id: i32 },

    /// An insert found its primary key already present.
    #[error("duplicate {table} key {key}")]
    DuplicateKey {
        /// Table the insert targeted
        table: &'static str,
        /// Display form of the offending key
        key: String,
    },
}

impl TpccError {
    /// True if this error reports a row that should have been loaded.
    ///
    /// All the `*NotFound` variants qualify; `DuplicateKey` does not.
    pub fn is_missing_row(&self) -> bool {
        !matches!(self, TpccError::DuplicateKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_row() {
        let err = TpccError::CustomerNotFound {
            w_id: 1,
            d_id: 2,
            c_id: 3,
        };
        assert_eq!(err.to_string(), "customer (1, 2, 3) does not exist");
    }

    #[test]
    fn test_display_duplicate_key() {
        let err = TpccError::DuplicateKey {
            table: "order",
            key: "301101".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate order key 301101");
    }

    #[test]
    fn test_missing_row_classification() {
        assert!(TpccError::WarehouseNotFound { w_id: 9 }.is_missing_row());
        assert!(TpccError::NoOrdersForCustomer {
            w_id: 1,
            d_id: 1,
            c_id: 1
        }
        .is_missing_row());
        assert!(!TpccError::DuplicateKey {
            table: "stock",
            key: "100001".to_string(),
        }
        .is_missing_row());
    }
}
