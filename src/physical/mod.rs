//! Physical execution module
//!
//! Index build, partitioning, the parallel join/aggregate and ranking

pub mod index;
pub mod morsel;
pub mod morsel_agg;
pub mod sort;

pub use index::*;
pub use morsel::*;
pub use morsel_agg::*;
pub use sort::*;
