//! Execution context - main entry point for running the revenue query

use crate::error::{QueryError, Result};
use crate::physical::{
    build_worker_pool, execute_local_revenue, partition_rows, rank_by_revenue, DimensionIndex,
    JoinInputs, LineItemIndex, NationRevenue, RevenueFilter,
};
use crate::tpch::{TableRowCounts, TpchTables};
use chrono::NaiveDate;
use rayon::ThreadPool;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Region name to filter on (exact, case-sensitive)
    pub region: String,
    /// Inclusive lower bound on order date, `YYYY-MM-DD`
    pub start_date: String,
    /// Exclusive upper bound on order date, `YYYY-MM-DD`
    pub end_date: String,
    /// Number of worker threads / partitions
    pub workers: usize,
}

impl QueryConfig {
    pub fn new(
        region: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        workers: usize,
    ) -> Self {
        Self {
            region: region.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            workers,
        }
    }

    /// Check worker count and date formats
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(QueryError::InvalidArgument(
                "worker count must be at least 1".to_string(),
            ));
        }

        let start = parse_date("start date", &self.start_date)?;
        let end = parse_date("end date", &self.end_date)?;
        if start >= end {
            warn!(
                start = %self.start_date,
                end = %self.end_date,
                "date interval is empty, no orders can match"
            );
        }
        Ok(())
    }

    fn filter(&self) -> RevenueFilter<'_> {
        RevenueFilter {
            region: &self.region,
            start_date: &self.start_date,
            end_date: &self.end_date,
        }
    }
}

fn parse_date(what: &str, value: &str) -> Result<NaiveDate> {
    // Reject forms chrono accepts but that do not compare as strings, like "1995-1-1"
    if value.len() != 10 {
        return Err(QueryError::InvalidArgument(format!(
            "{} {:?} is not in YYYY-MM-DD form",
            what, value
        )));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        QueryError::InvalidArgument(format!(
            "{} {:?} is not a valid YYYY-MM-DD date: {}",
            what, value, e
        ))
    })
}

/// Query execution result
#[derive(Debug)]
pub struct QueryResult {
    /// Nations ranked by revenue, highest first
    pub rows: Vec<NationRevenue>,
    /// Input row counts
    pub row_counts: TableRowCounts,
    /// Execution metrics
    pub metrics: QueryMetrics,
}

/// Query execution metrics
#[derive(Debug, Default)]
pub struct QueryMetrics {
    /// Time spent building the lookup indices
    pub index_time: Duration,
    /// Wall-clock time of the parallel phase (workers + merge)
    pub execute_time: Duration,
    /// Time spent ranking the merged totals
    pub sort_time: Duration,
    /// Total time
    pub total_time: Duration,
    /// Number of workers that ran
    pub workers: usize,
}

/// Execution context - owns the configuration and the worker pool
pub struct ExecutionContext {
    config: QueryConfig,
    pool: ThreadPool,
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("config", &self.config)
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

impl ExecutionContext {
    /// Validate `config` and spin up its worker pool
    pub fn new(config: QueryConfig) -> Result<Self> {
        config.validate()?;
        let pool = build_worker_pool(config.workers)?;
        Ok(Self { config, pool })
    }

    /// Run the local supplier revenue query over `tables`
    pub fn execute(&self, tables: &TpchTables) -> Result<QueryResult> {
        let start = Instant::now();
        let mut metrics = QueryMetrics {
            workers: self.config.workers,
            ..Default::default()
        };

        let row_counts = tables.row_counts();
        info!(
            regions = row_counts.region,
            nations = row_counts.nation,
            customers = row_counts.customer,
            orders = row_counts.orders,
            lineitems = row_counts.lineitem,
            suppliers = row_counts.supplier,
            "input loaded"
        );

        // Build
        let index_start = Instant::now();
        let dims = DimensionIndex::build(
            &tables.regions,
            &tables.nations,
            &tables.customers,
            &tables.suppliers,
        );
        let lines = LineItemIndex::build(&tables.lineitems);
        metrics.index_time = index_start.elapsed();

        // Partition
        let morsels = partition_rows(tables.orders.len(), self.config.workers)?;

        // Execute
        info!(workers = self.config.workers, "launching workers");
        let execute_start = Instant::now();
        let inputs = JoinInputs {
            orders: &tables.orders,
            dims: &dims,
            lines: &lines,
        };
        let state = execute_local_revenue(&self.pool, inputs, &morsels, self.config.filter());
        metrics.execute_time = execute_start.elapsed();

        // Rank
        let sort_start = Instant::now();
        let rows = rank_by_revenue(state.into_groups());
        metrics.sort_time = sort_start.elapsed();

        metrics.total_time = start.elapsed();
        info!(
            nations = rows.len(),
            index_ms = metrics.index_time.as_secs_f64() * 1000.0,
            execute_ms = metrics.execute_time.as_secs_f64() * 1000.0,
            sort_ms = metrics.sort_time.as_secs_f64() * 1000.0,
            total_ms = metrics.total_time.as_secs_f64() * 1000.0,
            "query complete"
        );

        Ok(QueryResult {
            rows,
            row_counts,
            metrics,
        })
    }
}

/// Validate `config` and run the query once
pub fn run_query(config: QueryConfig, tables: &TpchTables) -> Result<QueryResult> {
    ExecutionContext::new(config)?.execute(tables)
}
