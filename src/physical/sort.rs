//! Final ordering of per-nation revenue

use hashbrown::HashMap;
use std::cmp::Ordering;

/// One output row: a nation and its total local revenue
#[derive(Debug, Clone, PartialEq)]
pub struct NationRevenue {
    pub nation: String,
    pub revenue: f64,
}

/// Order by revenue descending, then nation name ascending.
///
/// `f64::total_cmp` keeps the sort total even if NaN slipped in through
/// unvalidated discounts.
pub fn rank_by_revenue(groups: HashMap<String, f64>) -> Vec<NationRevenue> {
    let mut rows: Vec<NationRevenue> = groups
        .into_iter()
        .map(|(nation, revenue)| NationRevenue { nation, revenue })
        .collect();
    rows.sort_by(compare_rows);
    rows
}

fn compare_rows(a: &NationRevenue, b: &NationRevenue) -> Ordering {
    b.revenue
        .total_cmp(&a.revenue)
        .then_with(|| a.nation.cmp(&b.nation))
}
