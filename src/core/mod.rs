//! Aggregation of classified entries into statistics.
//!
//! This module contains:
//! - [`aggregator`] - the single-pass [`ChatAggregator`] and [`aggregate`] driver
//! - [`stats`] - the [`ChatStats`] output record
//! - [`filter`] - optional date window applied before aggregation

pub mod aggregator;
pub mod filter;
pub mod stats;

pub use aggregator::{ChatAggregator, aggregate};
pub use filter::EntryFilter;
pub use stats::{ChatStats, SenderCount};
