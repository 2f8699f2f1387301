use std::fmt;

use clap::ValueEnum;
use tracing::debug;

use crate::error::Result;
use crate::trimmed::{trimmed_mean, DEFAULT_TRIM_RATIO};
use crate::util::{finite, mean};
use crate::weighted::{interpolated_weighted_mean, sorted_weighted_mean};

/// Aggregators selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Aggregator {
	/// Mean of the finite values.
	Mean,
	/// Symmetric trimmed mean.
	#[default]
	Trimmed,
	/// Rank-weighted mean, weights must match the finite values one to one.
	SortedWeighted,
	/// Rank-weighted mean with weights resampled to the number of values.
	InterpolatedWeighted,
}

/// Knobs shared by all aggregators; each one reads only what it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
	pub trim_ratio: f64,
	pub assume_sorted: bool,
}

impl Default for Params {
	fn default() -> Self {
		Self {
			trim_ratio: DEFAULT_TRIM_RATIO,
			assume_sorted: false,
		}
	}
}

impl Aggregator {
	pub fn name(&self) -> &'static str {
		match self {
			Aggregator::Mean => "mean",
			Aggregator::Trimmed => "trimmed",
			Aggregator::SortedWeighted => "sorted-weighted",
			Aggregator::InterpolatedWeighted => "interpolated-weighted",
		}
	}

	/// Whether the aggregator reads a weight sequence.
	pub fn uses_weights(&self) -> bool {
		matches!(self, Aggregator::SortedWeighted | Aggregator::InterpolatedWeighted)
	}

	/// Runs the aggregator over `values`.
	///
	/// Missing `weights` count as an empty sequence: uniform for
	/// [`Aggregator::InterpolatedWeighted`], a length mismatch for
	/// [`Aggregator::SortedWeighted`] unless no finite values are present.
	pub fn apply(&self, values: &[f64], weights: Option<&[f64]>, params: &Params) -> Result<f64> {
		let weights = weights.unwrap_or(&[]);
		debug!(aggregator = self.name(), n = values.len(), "aggregating");
		let out = match self {
			Aggregator::Mean => mean(&finite(values)),
			Aggregator::Trimmed => trimmed_mean(values, params.trim_ratio, params.assume_sorted),
			Aggregator::SortedWeighted => sorted_weighted_mean(values, weights, params.assume_sorted)?,
			Aggregator::InterpolatedWeighted => {
				interpolated_weighted_mean(values, weights, params.assume_sorted)
			}
		};
		Ok(out)
	}
}

impl fmt::Display for Aggregator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	fn values() -> Vec<f64> {
		vec![1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY]
	}

	#[test]
	fn names_parse_back() {
		for agg in Aggregator::value_variants() {
			assert_eq!(Aggregator::from_str(agg.name(), false), Ok(*agg));
			assert_eq!(agg.to_string(), agg.name());
		}
	}

	#[test]
	fn default_params() {
		let p = Params::default();
		assert_eq!(p.trim_ratio, 0.10);
		assert!(!p.assume_sorted);
		assert_eq!(Aggregator::default(), Aggregator::Trimmed);
	}

	#[test]
	fn mean_ignores_non_finite() {
		assert_eq!(Aggregator::Mean.apply(&values(), None, &Params::default()), Ok(3.0));
	}

	#[test]
	fn trimmed_uses_ratio() {
		let params = Params { trim_ratio: 0.2, ..Params::default() };
		let v = [1.0, 2.0, 3.0, 4.0, 100.0];
		assert_eq!(Aggregator::Trimmed.apply(&v, None, &params), Ok(3.0));
	}

	#[test]
	fn sorted_weighted_without_weights_fails() {
		let out = Aggregator::SortedWeighted.apply(&[1.0, 2.0], None, &Params::default());
		assert!(matches!(out, Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn interpolated_weighted() {
		let w = [0.0, 1.0, 0.0];
		let out = Aggregator::InterpolatedWeighted.apply(&values(), Some(&w[..]), &Params::default());
		assert_eq!(out, Ok(3.0));
		let out = Aggregator::InterpolatedWeighted.apply(&values(), None, &Params::default());
		assert_eq!(out, Ok(3.0));
	}

	#[test]
	fn outputs_within_range() {
		let v = [-2.0, -1.0, 0.0, 1.0, 3.0];
		let params = Params { trim_ratio: 0.2, ..Params::default() };
		let w = [0.0, 1.0, 0.0, 2.0, 1.0];
		for agg in Aggregator::value_variants() {
			let out = agg.apply(&v, Some(&w[..]), &params).unwrap();
			assert!((-2.0..=3.0).contains(&out), "{agg}: {out}");
		}
	}
}
