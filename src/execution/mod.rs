//! Query execution module

mod context;

pub use context::*;
