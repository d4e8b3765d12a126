//! Historical hurricane-occurrence statistics from a remote CSV table.
//!
//! The pipeline is fetch → incremental parse → typed dataset, with two pure
//! readers on top: a per-month Poisson possibility estimate and year/month
//! occurrence totals. [`HurricaneSource`] ties the pieces together.

pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod parse;
pub mod source;
pub mod stats;

pub use error::{HurricaneError, Result};
pub use model::{Dataset, Month, MonthRecord, TransformedSummary};
pub use source::HurricaneSource;
