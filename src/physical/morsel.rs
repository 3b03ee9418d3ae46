//! Static partitioning of the orders table across workers
//!
//! Each worker receives one contiguous morsel of row indices:
//! - all morsels but the last hold `len / workers` rows
//! - the last morsel absorbs the remainder
//! - with more workers than rows the leading morsels are empty

use crate::error::{QueryError, Result};
use std::ops::Range;

/// A contiguous slice of the orders table assigned to one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morsel {
    /// Worker / partition index
    pub partition: usize,
    /// Row indices `[start, end)` into the orders table
    pub rows: Range<usize>,
}

impl Morsel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split `len` rows into exactly `workers` disjoint contiguous morsels
/// whose union is `[0, len)`.
pub fn partition_rows(len: usize, workers: usize) -> Result<Vec<Morsel>> {
    if workers == 0 {
        return Err(QueryError::InvalidArgument(
            "worker count must be at least 1".to_string(),
        ));
    }

    let chunk = len / workers;
    let morsels = (0..workers)
        .map(|partition| {
            let start = partition * chunk;
            let end = if partition == workers - 1 {
                len
            } else {
                start + chunk
            };
            Morsel {
                partition,
                rows: start..end,
            }
        })
        .collect();

    Ok(morsels)
}
