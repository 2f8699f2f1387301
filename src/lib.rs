//! Robust averages for numeric samples: a symmetric trimmed mean and a
//! rank-weighted mean over sorted samples.
//!
//! Both kernels drop NaN and ±inf before doing anything else and return NaN
//! when nothing finite is left. Inputs are copied, never mutated. Kernels are
//! plain synchronous functions; callers that want parallelism run them on
//! disjoint inputs from their own threads.

pub mod aggregate;
pub mod error;
pub mod input;
pub mod trimmed;
pub mod util;
pub mod weighted;

pub use aggregate::{Aggregator, Params};
pub use error::{Error, Result};
pub use input::parse_values;
pub use trimmed::{clamp_ratio, trimmed_mean, DEFAULT_TRIM_RATIO};
pub use util::{finite, mean};
pub use weighted::{interpolated_weighted_mean, resample_weights, sorted_weighted_mean};
