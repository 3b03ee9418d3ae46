//! End-to-end tests of the local supplier revenue query.
//!
//! Run with output:
//!   cargo test --test local_revenue_tests -- --nocapture

use local_revenue::tpch::{Customer, LineItem, Nation, Order, Region, Supplier};
use local_revenue::{run_query, NationRevenue, QueryConfig, QueryError, TpchGenerator, TpchTables};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Generated data shared across tests - initialized lazily on first use
static GENERATED: OnceLock<TpchTables> = OnceLock::new();

/// Scale factor for tests
const SCALE_FACTOR: f64 = 0.01;

fn generated() -> &'static TpchTables {
    GENERATED.get_or_init(|| {
        eprintln!("Generating TPC-H data (SF={})...", SCALE_FACTOR);
        TpchGenerator::new(SCALE_FACTOR).generate_all()
    })
}

fn asia_1994(workers: usize) -> QueryConfig {
    QueryConfig::new("ASIA", "1994-01-01", "1995-01-01", workers)
}

fn totals(rows: &[NationRevenue]) -> HashMap<String, f64> {
    rows.iter().map(|r| (r.nation.clone(), r.revenue)).collect()
}

fn assert_totals_close(a: &[NationRevenue], b: &[NationRevenue]) {
    let (a, b) = (totals(a), totals(b));
    assert_eq!(a.len(), b.len(), "different nation sets: {:?} vs {:?}", a, b);
    for (nation, x) in &a {
        let y = b[nation];
        let rel = ((x - y) / x.abs().max(f64::MIN_POSITIVE)).abs();
        assert!(rel < 1e-9, "{}: {} vs {} (rel err {})", nation, x, y, rel);
    }
}

fn assert_ranked(rows: &[NationRevenue]) {
    for pair in rows.windows(2) {
        assert!(
            pair[0].revenue >= pair[1].revenue,
            "{:?} ranked before {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// One region, one nation, one customer, one supplier, one order, one line
fn india_tables(order_date: &str) -> TpchTables {
    TpchTables {
        regions: vec![Region {
            region_key: 2,
            name: "ASIA".into(),
        }],
        nations: vec![Nation {
            nation_key: 8,
            name: "INDIA".into(),
            region_key: 2,
        }],
        customers: vec![Customer {
            cust_key: 1,
            nation_key: 8,
        }],
        suppliers: vec![Supplier {
            supp_key: 1,
            nation_key: 8,
            acct_bal: 100.0,
        }],
        orders: vec![Order {
            order_key: 1,
            cust_key: 1,
            order_date: order_date.into(),
        }],
        lineitems: vec![LineItem {
            order_key: 1,
            supp_key: 1,
            extended_price: 200.0,
            discount: 0.1,
        }],
    }
}

#[test]
fn single_india_order_yields_exact_revenue() {
    let result = run_query(asia_1994(1), &india_tables("1994-06-15")).unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].nation, "INDIA");
    assert!((result.rows[0].revenue - 180.0).abs() < 1e-9);
    assert_eq!(result.row_counts.orders, 1);
    assert_eq!(result.row_counts.lineitem, 1);
}

#[test]
fn start_date_is_inclusive_end_date_is_exclusive() {
    let on_start = run_query(asia_1994(2), &india_tables("1994-01-01")).unwrap();
    assert_eq!(on_start.rows.len(), 1);

    let on_end = run_query(asia_1994(2), &india_tables("1995-01-01")).unwrap();
    assert!(on_end.rows.is_empty());
}

#[test]
fn supplier_in_other_nation_contributes_nothing() {
    let mut tables = india_tables("1994-06-15");
    // JAPAN is also in ASIA, but is not the customer's nation
    tables.nations.push(Nation {
        nation_key: 12,
        name: "JAPAN".into(),
        region_key: 2,
    });
    tables.suppliers[0].nation_key = 12;

    let result = run_query(asia_1994(1), &tables).unwrap();
    assert!(result.rows.is_empty());
}

#[test]
fn unknown_customer_is_ignored() {
    let mut tables = india_tables("1994-06-15");
    tables.orders.push(Order {
        order_key: 2,
        cust_key: 9999,
        order_date: "1994-06-15".into(),
    });
    tables.lineitems.push(LineItem {
        order_key: 2,
        supp_key: 1,
        extended_price: 1_000_000.0,
        discount: 0.0,
    });

    let result = run_query(asia_1994(2), &tables).unwrap();
    assert_eq!(result.rows.len(), 1);
    assert!((result.rows[0].revenue - 180.0).abs() < 1e-9);
}

#[test]
fn nation_with_unknown_region_is_skipped() {
    let mut tables = india_tables("1994-06-15");
    tables.nations[0].region_key = 77;

    let result = run_query(asia_1994(3), &tables).unwrap();
    assert!(result.rows.is_empty());
}

#[test]
fn customer_with_unknown_nation_is_skipped() {
    let mut tables = india_tables("1994-06-15");
    tables.customers[0].nation_key = 404;

    let result = run_query(asia_1994(2), &tables).unwrap();
    assert!(result.rows.is_empty());
}

#[test]
fn discount_is_not_validated() {
    let mut tables = india_tables("1994-06-15");
    tables.nations.push(Nation {
        nation_key: 12,
        name: "JAPAN".into(),
        region_key: 2,
    });
    tables.customers.push(Customer {
        cust_key: 2,
        nation_key: 12,
    });
    tables.suppliers.push(Supplier {
        supp_key: 2,
        nation_key: 12,
        acct_bal: 0.0,
    });
    tables.orders.push(Order {
        order_key: 2,
        cust_key: 2,
        order_date: "1994-07-01".into(),
    });
    tables.lineitems.push(LineItem {
        order_key: 2,
        supp_key: 2,
        extended_price: 100.0,
        discount: 1.5,
    });

    let result = run_query(asia_1994(2), &tables).unwrap();
    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.rows[0].nation, "INDIA");
    assert_eq!(result.rows[1].nation, "JAPAN");
    assert!((result.rows[1].revenue + 50.0).abs() < 1e-9);
}

#[test]
fn region_filter_is_exact_and_case_sensitive() {
    let tables = india_tables("1994-06-15");

    let lower = QueryConfig::new("asia", "1994-01-01", "1995-01-01", 1);
    assert!(run_query(lower, &tables).unwrap().rows.is_empty());

    let missing = QueryConfig::new("ATLANTIS", "1994-01-01", "1995-01-01", 1);
    assert!(run_query(missing, generated()).unwrap().rows.is_empty());
}

#[test]
fn more_workers_than_orders() {
    let result = run_query(asia_1994(16), &india_tables("1994-06-15")).unwrap();
    assert_eq!(result.metrics.workers, 16);
    assert_eq!(result.rows.len(), 1);
}

#[test]
fn zero_workers_is_a_configuration_error() {
    let err = run_query(asia_1994(0), &india_tables("1994-06-15")).unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
}

#[test]
fn worker_count_does_not_change_totals() {
    let tables = generated();
    let baseline = run_query(asia_1994(1), tables).unwrap();
    assert!(!baseline.rows.is_empty(), "generated data should hit ASIA");
    assert_ranked(&baseline.rows);

    for workers in [2, 3, 8, 13] {
        let result = run_query(asia_1994(workers), tables).unwrap();
        assert_ranked(&result.rows);
        assert_totals_close(&baseline.rows, &result.rows);
    }
}

#[test]
fn input_order_does_not_change_totals() {
    let tables = generated();
    let baseline = run_query(asia_1994(4), tables).unwrap();

    let mut shuffled = tables.clone();
    shuffled.orders.reverse();
    shuffled.lineitems.reverse();
    let result = run_query(asia_1994(4), &shuffled).unwrap();

    assert_totals_close(&baseline.rows, &result.rows);
}

#[test]
fn only_asian_nations_reported() {
    let asian = ["INDIA", "INDONESIA", "JAPAN", "CHINA", "VIETNAM"];
    let result = run_query(asia_1994(4), generated()).unwrap();

    for row in &result.rows {
        assert!(asian.contains(&row.nation.as_str()), "{} is not in ASIA", row.nation);
        assert!(row.revenue > 0.0);
    }
}

#[test]
fn empty_tables_give_empty_result() {
    let result = run_query(asia_1994(4), &TpchTables::default()).unwrap();
    assert!(result.rows.is_empty());
}
