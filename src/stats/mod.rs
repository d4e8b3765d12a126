//! Read-only statistics over a parsed [`Dataset`](crate::model::Dataset):
//! the Poisson possibility estimate and the year/month totals. Both are
//! pure functions; neither triggers a fetch or mutates the dataset.

pub mod estimate;
pub mod transform;

pub use estimate::possibility_for_month;
pub use transform::transform;
