//! Net score aggregation
//!
//! Folds an [`Evaluation`](crate::metrics::Evaluation) into a [`RatingRecord`] using the
//! fixed [`weight`] table. Only error-free, computable metrics contribute, and summation
//! follows registration order so identical inputs always yield identical scores.

mod aggregator;
mod rating_record;
mod weights;

pub use aggregator::{aggregate, net_score};
pub use rating_record::RatingRecord;
pub use weights::weight;
