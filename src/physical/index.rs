//! Lookup indices built once per run and shared read-only by all workers
//!
//! Dimension tables are small and keyed by their natural identifiers.
//! The line item fact table is grouped by parent order so a worker can
//! probe all lines of an order with a single lookup.

use crate::tpch::{Customer, LineItem, Nation, Region, Supplier};
use hashbrown::HashMap;

/// Name and parent region of a nation
#[derive(Debug, Clone, PartialEq)]
pub struct NationEntry {
    pub name: String,
    pub region_key: i64,
}

/// Hash lookups over the four dimension tables
#[derive(Debug, Default)]
pub struct DimensionIndex {
    region_name_by_id: HashMap<i64, String>,
    nation_by_id: HashMap<i64, NationEntry>,
    customer_nation_by_id: HashMap<i64, i64>,
    supplier_nation_by_id: HashMap<i64, i64>,
}

impl DimensionIndex {
    /// Build all four lookups in one pass per table.
    ///
    /// A key that appears more than once keeps the row seen last.
    pub fn build(
        regions: &[Region],
        nations: &[Nation],
        customers: &[Customer],
        suppliers: &[Supplier],
    ) -> Self {
        let mut region_name_by_id = HashMap::with_capacity(regions.len());
        for r in regions {
            region_name_by_id.insert(r.region_key, r.name.clone());
        }

        let mut nation_by_id = HashMap::with_capacity(nations.len());
        for n in nations {
            nation_by_id.insert(
                n.nation_key,
                NationEntry {
                    name: n.name.clone(),
                    region_key: n.region_key,
                },
            );
        }

        let customer_nation_by_id = customers
            .iter()
            .map(|c| (c.cust_key, c.nation_key))
            .collect();

        let supplier_nation_by_id = suppliers
            .iter()
            .map(|s| (s.supp_key, s.nation_key))
            .collect();

        Self {
            region_name_by_id,
            nation_by_id,
            customer_nation_by_id,
            supplier_nation_by_id,
        }
    }

    pub fn region_name(&self, region_key: i64) -> Option<&str> {
        self.region_name_by_id.get(&region_key).map(String::as_str)
    }

    pub fn nation(&self, nation_key: i64) -> Option<&NationEntry> {
        self.nation_by_id.get(&nation_key)
    }

    pub fn customer_nation(&self, cust_key: i64) -> Option<i64> {
        self.customer_nation_by_id.get(&cust_key).copied()
    }

    pub fn supplier_nation(&self, supp_key: i64) -> Option<i64> {
        self.supplier_nation_by_id.get(&supp_key).copied()
    }
}

/// Line items grouped by order key, in the order they were supplied
#[derive(Debug, Default)]
pub struct LineItemIndex {
    by_order: HashMap<i64, Vec<LineItem>>,
}

impl LineItemIndex {
    pub fn build(lineitems: &[LineItem]) -> Self {
        let mut by_order: HashMap<i64, Vec<LineItem>> = HashMap::new();
        for li in lineitems {
            by_order.entry(li.order_key).or_default().push(*li);
        }
        Self { by_order }
    }

    /// Lines of an order; `None` when the order has no line items
    pub fn lines(&self, order_key: i64) -> Option<&[LineItem]> {
        self.by_order.get(&order_key).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(order_key: i64, supp_key: i64, price: f64) -> LineItem {
        LineItem {
            order_key,
            supp_key,
            extended_price: price,
            discount: 0.0,
        }
    }

    #[test]
    fn test_dimension_lookups() {
        let index = DimensionIndex::build(
            &[Region {
                region_key: 2,
                name: "ASIA".into(),
            }],
            &[Nation {
                nation_key: 8,
                name: "INDIA".into(),
                region_key: 2,
            }],
            &[Customer {
                cust_key: 1,
                nation_key: 8,
            }],
            &[Supplier {
                supp_key: 5,
                nation_key: 8,
                acct_bal: 0.0,
            }],
        );

        assert_eq!(index.region_name(2), Some("ASIA"));
        assert_eq!(index.nation(8).map(|n| n.name.as_str()), Some("INDIA"));
        assert_eq!(index.customer_nation(1), Some(8));
        assert_eq!(index.supplier_nation(5), Some(8));

        assert_eq!(index.region_name(3), None);
        assert_eq!(index.customer_nation(99), None);
        assert!(index.nation(9).is_none());
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let nations = vec![
            Nation {
                nation_key: 1,
                name: "OLD".into(),
                region_key: 0,
            },
            Nation {
                nation_key: 1,
                name: "NEW".into(),
                region_key: 3,
            },
        ];
        let index = DimensionIndex::build(&[], &nations, &[], &[]);

        let entry = index.nation(1).unwrap();
        assert_eq!(entry.name, "NEW");
        assert_eq!(entry.region_key, 3);
    }

    #[test]
    fn test_lineitems_grouped_in_input_order() {
        let items = vec![line(1, 10, 1.0), line(2, 11, 2.0), line(1, 12, 3.0)];
        let index = LineItemIndex::build(&items);

        let lines = index.lines(1).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].supp_key, 10);
        assert_eq!(lines[1].supp_key, 12);
        assert_eq!(index.lines(2).map(<[_]>::len), Some(1));
        assert!(index.lines(3).is_none());
    }
}
