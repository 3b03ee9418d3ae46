//! TPC-H tables used by the local supplier revenue query

mod generator;
mod reader;
mod schema;

pub use generator::*;
pub use reader::*;
pub use schema::*;
