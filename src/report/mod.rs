//! Derived, non-persisted views over the ledger: aggregation, the dense
//! day series, and sorting/filtering.
pub mod aggregate;
pub mod query;
pub mod series;
