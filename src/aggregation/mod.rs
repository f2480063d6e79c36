//! Series table and the per-flush aggregation pass.
mod engine;
mod table;


pub use engine::{AggregationReport, aggregate};
pub use table::{Observation, SeriesState, SeriesTable};
