//! Morsel-driven join + aggregation for local supplier revenue
//!
//! Implements the Q5 pipeline with static morsel parallelism:
//! - Each worker scans one morsel of orders and probes the shared indices
//! - Each worker accumulates revenue in its own hash table
//! - A combiner folds every worker table into one shared table under a lock

use crate::error::Result;
use crate::physical::index::{DimensionIndex, LineItemIndex};
use crate::physical::morsel::Morsel;
use crate::tpch::Order;
use hashbrown::HashMap;
use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::debug;

/// Region and half-open order date interval `[start_date, end_date)`
#[derive(Debug, Clone, Copy)]
pub struct RevenueFilter<'a> {
    pub region: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
}

impl RevenueFilter<'_> {
    /// `YYYY-MM-DD` strings order the same way as the dates they encode
    #[inline]
    pub fn date_in_range(&self, date: &str) -> bool {
        self.start_date <= date && date < self.end_date
    }
}

/// Shared read-only inputs of the parallel phase
#[derive(Clone, Copy)]
pub struct JoinInputs<'a> {
    pub orders: &'a [Order],
    pub dims: &'a DimensionIndex,
    pub lines: &'a LineItemIndex,
}

/// Worker-local revenue per nation name
#[derive(Debug, Default, Clone)]
pub struct RevenueState {
    groups: HashMap<String, f64>,
}

impl RevenueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the join/filter/aggregate over every order in `morsel`
    pub fn process_morsel(
        &mut self,
        inputs: &JoinInputs<'_>,
        morsel: &Morsel,
        filter: &RevenueFilter<'_>,
    ) {
        for order in &inputs.orders[morsel.rows.clone()] {
            self.process_order(inputs, order, filter);
        }
    }

    /// Accumulate the local-supplier revenue of one order.
    ///
    /// Orders outside the date range or region, or with a missing
    /// customer, nation or region, contribute nothing. Individual lines
    /// with an unknown supplier are skipped.
    pub fn process_order(
        &mut self,
        inputs: &JoinInputs<'_>,
        order: &Order,
        filter: &RevenueFilter<'_>,
    ) {
        if !filter.date_in_range(&order.order_date) {
            return;
        }

        let Some(nation_key) = inputs.dims.customer_nation(order.cust_key) else {
            return;
        };
        let Some(nation) = inputs.dims.nation(nation_key) else {
            return;
        };
        match inputs.dims.region_name(nation.region_key) {
            Some(region) if region == filter.region => {}
            _ => return,
        }

        let Some(lines) = inputs.lines.lines(order.order_key) else {
            return;
        };

        for li in lines {
            // Supplier must be in the customer's own nation
            if inputs.dims.supplier_nation(li.supp_key) != Some(nation_key) {
                continue;
            }
            self.add(&nation.name, li.revenue());
        }
    }

    fn add(&mut self, nation: &str, revenue: f64) {
        match self.groups.get_mut(nation) {
            Some(total) => *total += revenue,
            None => {
                self.groups.insert(nation.to_string(), revenue);
            }
        }
    }

    /// Merge another state into this one
    pub fn merge(&mut self, other: RevenueState) {
        for (nation, revenue) in other.groups {
            *self.groups.entry(nation).or_insert(0.0) += revenue;
        }
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn get(&self, nation: &str) -> Option<f64> {
        self.groups.get(nation).copied()
    }

    pub fn into_groups(self) -> HashMap<String, f64> {
        self.groups
    }
}

/// Owns the single shared accumulator of the run.
///
/// Workers never see the lock; each hands over its finished local state
/// exactly once.
#[derive(Debug, Default)]
pub struct RevenueCombiner {
    shared: Mutex<RevenueState>,
}

impl RevenueCombiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&self, local: RevenueState) {
        self.shared.lock().merge(local);
    }

    pub fn finish(self) -> RevenueState {
        self.shared.into_inner()
    }
}

/// Build a pool with exactly `workers` threads
pub fn build_worker_pool(workers: usize) -> Result<ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("q5-worker-{}", i))
        .build()?;
    Ok(pool)
}

/// Run one worker per morsel on `pool`, then return the combined state.
///
/// Returns only after every worker has merged (fork-join barrier). A
/// panic in any worker propagates to the caller.
pub fn execute_local_revenue(
    pool: &ThreadPool,
    inputs: JoinInputs<'_>,
    morsels: &[Morsel],
    filter: RevenueFilter<'_>,
) -> RevenueState {
    let combiner = RevenueCombiner::new();

    pool.install(|| {
        morsels.par_iter().for_each(|morsel| {
            let mut state = RevenueState::new();
            state.process_morsel(&inputs, morsel, &filter);
            debug!(
                partition = morsel.partition,
                start = morsel.rows.start,
                end = morsel.rows.end,
                groups = state.num_groups(),
                "worker finished"
            );
            combiner.merge(state);
        });
    });

    combiner.finish()
}
