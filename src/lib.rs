//! Parallel local supplier revenue engine
//!
//! Computes TPC-H Q5: revenue per nation from orders whose customer and
//! supplier share a nation inside one region, over a date interval. The
//! join and aggregation run on a fixed pool of worker threads, each owning
//! one partition of the orders table.

pub mod cli;
pub mod error;
pub mod execution;
pub mod physical;
pub mod tpch;

// Re-export main types
pub use error::{QueryError, Result};
pub use execution::{run_query, ExecutionContext, QueryConfig, QueryResult};
pub use physical::NationRevenue;
pub use tpch::{TpchGenerator, TpchTables};
