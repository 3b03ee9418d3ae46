//! TPC-H row types used by the Q5 engine
//!
//! Only the columns the query reads are materialized; the remaining
//! columns of each `.tbl` line are skipped by the reader.

/// Row of the REGION table
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub region_key: i64,
    pub name: String,
}

/// Row of the NATION table
#[derive(Debug, Clone, PartialEq)]
pub struct Nation {
    pub nation_key: i64,
    pub name: String,
    pub region_key: i64,
}

/// Row of the CUSTOMER table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Customer {
    pub cust_key: i64,
    pub nation_key: i64,
}

/// Row of the SUPPLIER table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Supplier {
    pub supp_key: i64,
    pub nation_key: i64,
    pub acct_bal: f64,
}

/// Row of the ORDERS table
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_key: i64,
    pub cust_key: i64,
    /// Calendar date in `YYYY-MM-DD` form
    pub order_date: String,
}

/// Row of the LINEITEM table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem {
    pub order_key: i64,
    pub supp_key: i64,
    pub extended_price: f64,
    pub discount: f64,
}

impl LineItem {
    /// Net revenue of this line: `extended_price * (1 - discount)`
    #[inline]
    pub fn revenue(&self) -> f64 {
        self.extended_price * (1.0 - self.discount)
    }
}

/// The six input collections consumed by one query run
#[derive(Debug, Clone, Default)]
pub struct TpchTables {
    pub regions: Vec<Region>,
    pub nations: Vec<Nation>,
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub orders: Vec<Order>,
    pub lineitems: Vec<LineItem>,
}

impl TpchTables {
    pub fn row_counts(&self) -> TableRowCounts {
        TableRowCounts {
            region: self.regions.len(),
            nation: self.nations.len(),
            customer: self.customers.len(),
            supplier: self.suppliers.len(),
            orders: self.orders.len(),
            lineitem: self.lineitems.len(),
        }
    }
}

/// Per-table row counts, reported for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableRowCounts {
    pub region: usize,
    pub nation: usize,
    pub customer: usize,
    pub supplier: usize,
    pub orders: usize,
    pub lineitem: usize,
}

/// File names of the TPC-H tables the query reads
pub const REGION_FILE: &str = "region.tbl";
pub const NATION_FILE: &str = "nation.tbl";
pub const CUSTOMER_FILE: &str = "customer.tbl";
pub const SUPPLIER_FILE: &str = "supplier.tbl";
pub const ORDERS_FILE: &str = "orders.tbl";
pub const LINEITEM_FILE: &str = "lineitem.tbl";

/// Scale factor row counts
pub struct TpchRowCounts {
    pub nation: usize,
    pub region: usize,
    pub supplier: usize,
    pub customer: usize,
    pub orders: usize,
    pub lineitem: usize,
}

impl TpchRowCounts {
    /// Get row counts for a given scale factor
    pub fn for_scale_factor(sf: f64) -> Self {
        Self {
            nation: 25,
            region: 5,
            supplier: ((10_000.0 * sf) as usize).max(1),
            customer: ((150_000.0 * sf) as usize).max(1),
            orders: ((1_500_000.0 * sf) as usize).max(1),
            lineitem: ((6_000_000.0 * sf) as usize).max(1),
        }
    }
}
