//! `.tbl` reader
//!
//! TPC-H dbgen writes one row per line with `|` separated columns and a
//! trailing `|`. Rows that cannot be parsed are logged and dropped; the
//! rest of the file is still read.

use crate::error::{QueryError, Result};
use crate::tpch::schema::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Load all six tables the query needs from `data_dir`
pub fn read_tables(data_dir: &Path) -> Result<TpchTables> {
    Ok(TpchTables {
        regions: read_regions(&data_dir.join(REGION_FILE))?,
        nations: read_nations(&data_dir.join(NATION_FILE))?,
        customers: read_customers(&data_dir.join(CUSTOMER_FILE))?,
        orders: read_orders(&data_dir.join(ORDERS_FILE))?,
        lineitems: read_lineitems(&data_dir.join(LINEITEM_FILE))?,
        suppliers: read_suppliers(&data_dir.join(SUPPLIER_FILE))?,
    })
}

/// `r_regionkey|r_name|r_comment|`
pub fn read_regions(path: &Path) -> Result<Vec<Region>> {
    read_table(path, "region", |cols| {
        Ok(Region {
            region_key: parse_field(cols, 0, "r_regionkey")?,
            name: text_field(cols, 1, "r_name")?,
        })
    })
}

/// `n_nationkey|n_name|n_regionkey|n_comment|`
pub fn read_nations(path: &Path) -> Result<Vec<Nation>> {
    read_table(path, "nation", |cols| {
        Ok(Nation {
            nation_key: parse_field(cols, 0, "n_nationkey")?,
            name: text_field(cols, 1, "n_name")?,
            region_key: parse_field(cols, 2, "n_regionkey")?,
        })
    })
}

/// `c_custkey|c_name|c_address|c_nationkey|...`
pub fn read_customers(path: &Path) -> Result<Vec<Customer>> {
    read_table(path, "customer", |cols| {
        Ok(Customer {
            cust_key: parse_field(cols, 0, "c_custkey")?,
            nation_key: parse_field(cols, 3, "c_nationkey")?,
        })
    })
}

/// `s_suppkey|s_name|s_address|s_nationkey|s_phone|s_acctbal|...`
pub fn read_suppliers(path: &Path) -> Result<Vec<Supplier>> {
    read_table(path, "supplier", |cols| {
        Ok(Supplier {
            supp_key: parse_field(cols, 0, "s_suppkey")?,
            nation_key: parse_field(cols, 3, "s_nationkey")?,
            acct_bal: parse_field(cols, 5, "s_acctbal")?,
        })
    })
}

/// `o_orderkey|o_custkey|o_orderstatus|o_totalprice|o_orderdate|...`
pub fn read_orders(path: &Path) -> Result<Vec<Order>> {
    read_table(path, "orders", |cols| {
        Ok(Order {
            order_key: parse_field(cols, 0, "o_orderkey")?,
            cust_key: parse_field(cols, 1, "o_custkey")?,
            order_date: text_field(cols, 4, "o_orderdate")?,
        })
    })
}

/// `l_orderkey|l_partkey|l_suppkey|l_linenumber|l_quantity|l_extendedprice|l_discount|...`
pub fn read_lineitems(path: &Path) -> Result<Vec<LineItem>> {
    read_table(path, "lineitem", |cols| {
        Ok(LineItem {
            order_key: parse_field(cols, 0, "l_orderkey")?,
            supp_key: parse_field(cols, 2, "l_suppkey")?,
            extended_price: parse_field(cols, 5, "l_extendedprice")?,
            discount: parse_field(cols, 6, "l_discount")?,
        })
    })
}

fn read_table<T, F>(path: &Path, table: &str, parse_row: F) -> Result<Vec<T>>
where
    F: Fn(&[&str]) -> Result<T>,
{
    let file = File::open(path).map_err(|e| {
        QueryError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open {}: {}", path.display(), e),
        ))
    })?;
    let mut reader = BufReader::new(file);

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(&['\n', '\r'][..]),
            Err(e) => {
                dropped += 1;
                warn!(table, line = line_no, "dropping row that is not UTF-8: {}", e);
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let cols: Vec<&str> = line.split('|').collect();
        match parse_row(&cols) {
            Ok(row) => rows.push(row),
            Err(e) => {
                dropped += 1;
                warn!(table, line = line_no, "dropping malformed row: {}", e);
            }
        }
    }

    debug!(table, rows = rows.len(), dropped, "table loaded");
    Ok(rows)
}

fn column<'a>(cols: &[&'a str], idx: usize, name: &str) -> Result<&'a str> {
    cols.get(idx)
        .copied()
        .ok_or_else(|| QueryError::Parse(format!("missing column {}", name)))
}

fn text_field(cols: &[&str], idx: usize, name: &str) -> Result<String> {
    column(cols, idx, name).map(str::to_string)
}

fn parse_field<T>(cols: &[&str], idx: usize, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = column(cols, idx, name)?;
    raw.trim()
        .parse()
        .map_err(|e| QueryError::Parse(format!("{} = {:?}: {}", name, raw, e)))
}
