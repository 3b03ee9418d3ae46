//! TPC-H data generator
//!
//! Produces a small, seeded approximation of dbgen output covering the
//! six tables Q5 reads. Data can be kept in memory or written out as
//! `.tbl` files that the reader accepts.

use crate::tpch::schema::*;
use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const NATIONS: [(i64, &str, i64); 25] = [
    (0, "ALGERIA", 0),
    (1, "ARGENTINA", 1),
    (2, "BRAZIL", 1),
    (3, "CANADA", 1),
    (4, "EGYPT", 4),
    (5, "ETHIOPIA", 0),
    (6, "FRANCE", 3),
    (7, "GERMANY", 3),
    (8, "INDIA", 2),
    (9, "INDONESIA", 2),
    (10, "IRAN", 4),
    (11, "IRAQ", 4),
    (12, "JAPAN", 2),
    (13, "JORDAN", 4),
    (14, "KENYA", 0),
    (15, "MOROCCO", 0),
    (16, "MOZAMBIQUE", 0),
    (17, "PERU", 1),
    (18, "CHINA", 2),
    (19, "ROMANIA", 3),
    (20, "SAUDI ARABIA", 4),
    (21, "VIETNAM", 2),
    (22, "RUSSIA", 3),
    (23, "UNITED KINGDOM", 3),
    (24, "UNITED STATES", 1),
];

const REGIONS: [(i64, &str); 5] = [
    (0, "AFRICA"),
    (1, "AMERICA"),
    (2, "ASIA"),
    (3, "EUROPE"),
    (4, "MIDDLE EAST"),
];

// Order dates span 1992-01-01 .. 1998-12-31
const BASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1992, 1, 1) {
    Some(date) => date,
    None => panic!("invalid base date"),
};
const DATE_RANGE_DAYS: i64 = 2557;

/// TPC-H data generator
pub struct TpchGenerator {
    scale_factor: f64,
    rng: StdRng,
}

impl TpchGenerator {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            rng: StdRng::seed_from_u64(42),
        }
    }

    pub fn with_seed(scale_factor: f64, seed: u64) -> Self {
        Self {
            scale_factor,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate all tables in memory
    pub fn generate_all(&mut self) -> TpchTables {
        let row_counts = TpchRowCounts::for_scale_factor(self.scale_factor);

        let regions = Self::generate_region();
        let nations = Self::generate_nation();
        let suppliers = self.generate_supplier(row_counts.supplier);
        let customers = self.generate_customer(row_counts.customer);
        let orders = self.generate_orders(row_counts.orders, row_counts.customer);
        let lineitems =
            self.generate_lineitem(row_counts.lineitem, row_counts.orders, row_counts.supplier);

        TpchTables {
            regions,
            nations,
            customers,
            suppliers,
            orders,
            lineitems,
        }
    }

    /// Generate all tables and write them as `.tbl` files into `output_dir`
    pub fn generate_to_tbl(&mut self, output_dir: &Path) -> std::io::Result<TpchTables> {
        fs::create_dir_all(output_dir)?;
        let tables = self.generate_all();
        write_tbl(output_dir, &tables)?;
        Ok(tables)
    }

    fn generate_region() -> Vec<Region> {
        REGIONS
            .iter()
            .map(|(key, name)| Region {
                region_key: *key,
                name: name.to_string(),
            })
            .collect()
    }

    fn generate_nation() -> Vec<Nation> {
        NATIONS
            .iter()
            .map(|(key, name, region)| Nation {
                nation_key: *key,
                name: name.to_string(),
                region_key: *region,
            })
            .collect()
    }

    fn generate_supplier(&mut self, count: usize) -> Vec<Supplier> {
        (0..count)
            .map(|i| Supplier {
                supp_key: (i + 1) as i64,
                nation_key: self.rng.gen_range(0..25),
                acct_bal: self.rng.gen_range(-999.99..9999.99),
            })
            .collect()
    }

    fn generate_customer(&mut self, count: usize) -> Vec<Customer> {
        (0..count)
            .map(|i| Customer {
                cust_key: (i + 1) as i64,
                nation_key: self.rng.gen_range(0..25),
            })
            .collect()
    }

    fn generate_orders(&mut self, count: usize, cust_count: usize) -> Vec<Order> {
        (0..count)
            .map(|i| {
                let offset = self.rng.gen_range(0..DATE_RANGE_DAYS);
                Order {
                    order_key: (i + 1) as i64,
                    cust_key: ((i % cust_count) + 1) as i64,
                    order_date: (BASE_DATE + Duration::days(offset))
                        .format("%Y-%m-%d")
                        .to_string(),
                }
            })
            .collect()
    }

    fn generate_lineitem(
        &mut self,
        count: usize,
        order_count: usize,
        supp_count: usize,
    ) -> Vec<LineItem> {
        let mut items = Vec::with_capacity(count);
        let mut current_order: i64 = 1;

        for i in 0..count {
            // Move to next order periodically
            if i > 0 && self.rng.gen_bool(0.25) {
                current_order = ((current_order as usize % order_count) + 1) as i64;
            }

            items.push(LineItem {
                order_key: current_order,
                supp_key: self.rng.gen_range(1..=supp_count as i64),
                extended_price: self.rng.gen_range(900.0..100000.0),
                discount: (self.rng.gen_range(0..=10) as f64) / 100.0,
            });
        }

        items
    }
}

/// Write tables in dbgen `.tbl` layout, padding the columns Q5 skips
pub fn write_tbl(output_dir: &Path, tables: &TpchTables) -> std::io::Result<()> {
    write_file(output_dir, REGION_FILE, &tables.regions, |w, r| {
        writeln!(w, "{}|{}|region comment|", r.region_key, r.name)
    })?;
    write_file(output_dir, NATION_FILE, &tables.nations, |w, n| {
        writeln!(w, "{}|{}|{}|nation comment|", n.nation_key, n.name, n.region_key)
    })?;
    write_file(output_dir, CUSTOMER_FILE, &tables.customers, |w, c| {
        writeln!(
            w,
            "{0}|Customer#{0:09}|Address {0}|{1}|10-100-100-1000|0.00|BUILDING|customer comment|",
            c.cust_key, c.nation_key
        )
    })?;
    write_file(output_dir, SUPPLIER_FILE, &tables.suppliers, |w, s| {
        writeln!(
            w,
            "{0}|Supplier#{0:09}|Address {0}|{1}|10-100-100-1000|{2:.2}|supplier comment|",
            s.supp_key, s.nation_key, s.acct_bal
        )
    })?;
    write_file(output_dir, ORDERS_FILE, &tables.orders, |w, o| {
        writeln!(
            w,
            "{}|{}|O|0.00|{}|5-LOW|Clerk#000000001|0|order comment|",
            o.order_key, o.cust_key, o.order_date
        )
    })?;
    write_file(output_dir, LINEITEM_FILE, &tables.lineitems, |w, l| {
        // Full precision so a read-back reproduces the in-memory values
        writeln!(
            w,
            "{}|1|{}|1|1|{}|{}|0.00|N|O|",
            l.order_key, l.supp_key, l.extended_price, l.discount
        )
    })?;
    Ok(())
}

fn write_file<T, F>(dir: &Path, name: &str, rows: &[T], mut write_row: F) -> std::io::Result<()>
where
    F: FnMut(&mut BufWriter<File>, &T) -> std::io::Result<()>,
{
    let path = dir.join(name);
    let mut writer = BufWriter::new(File::create(&path)?);
    for row in rows {
        write_row(&mut writer, row)?;
    }
    writer.flush()?;

    info!("  {}: {} rows -> {}", name, rows.len(), path.display());
    Ok(())
}
