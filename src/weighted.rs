use num_traits::Float;
use tracing::debug;

use crate::error::{Error, Result};
use crate::util::finite::{len_as, sort_ascending};
use crate::util::{finite, mean};

/// Weighted mean of the ascending-sorted finite `values`, with `weights`
/// applied by rank.
///
/// Weights that are negative or non-finite are clipped to `0`. The remaining
/// weights are normalized to sum to `1` and the result is the dot product of
/// the sorted values with them, a convex combination of the values. If the
/// weights sum to `0` the plain mean of the values is returned.
///
/// Returns `Ok(NaN)` if no finite values remain. That check runs before the
/// length check below.
///
/// # Errors
/// [`Error::InvalidArgument`] if `weights.len()` differs from the number of
/// finite values.
///
/// # Alignment
/// Non-finite values are dropped but their weights are not, so any NaN or
/// ±inf in `values` makes an equal-length `weights` one element too long and
/// the call fails. Callers that want lenient behaviour should drop the
/// non-finite values themselves or use [`interpolated_weighted_mean`].
///
/// # Sortedness
/// With `assume_sorted = true` the finite values must already be ascending.
/// This is not checked; unsorted input pairs weights with the wrong ranks.
///
/// ```
/// use robust_kernels::sorted_weighted_mean;
/// let out = sorted_weighted_mean(&[3.0, 1.0, 2.0], &[0.0, 1.0, 1.0], false).unwrap();
/// assert_eq!(out, 2.5);
/// ```
pub fn sorted_weighted_mean<T: Float>(values: &[T], weights: &[T], assume_sorted: bool) -> Result<T> {
	let mut v = finite(values);
	if v.is_empty() {
		return Ok(T::nan());
	}
	if !assume_sorted {
		sort_ascending(&mut v);
	}

	let w = clip_weights(weights);
	if w.len() != v.len() {
		return Err(Error::invalid_argument("weights length must match values length"));
	}

	match normalize(w) {
		Some(w) => Ok(dot(&v, w.into_iter())),
		None => {
			debug!(n = v.len(), "weights sum to zero, using plain mean");
			Ok(mean(&v))
		}
	}
}

/// Weighted mean of the ascending-sorted finite `values`, resampling `weights`
/// to the number of finite values with [`resample_weights`].
///
/// Unlike [`sorted_weighted_mean`] this never fails: a weight vector of any
/// length describes a weight profile over the rank range. Empty `weights`
/// mean uniform weights.
///
/// Returns NaN if no finite values remain. `assume_sorted` has the same
/// unchecked contract as in [`sorted_weighted_mean`].
pub fn interpolated_weighted_mean<T: Float>(values: &[T], weights: &[T], assume_sorted: bool) -> T {
	let mut v = finite(values);
	if v.is_empty() {
		return T::nan();
	}
	if !assume_sorted {
		sort_ascending(&mut v);
	}

	let w = resample_weights(weights, v.len());
	dot(&v, w.into_iter())
}

/// Resamples `weights` to `n` normalized, nonnegative weights.
///
/// Negative and non-finite weights are clipped to `0` first. A weight vector
/// of a different length is treated as samples of a profile evenly spaced on
/// `[0, 1]` and linearly interpolated at `n` evenly spaced points. The output
/// sums to `1`; empty input or a zero sum yields uniform weights.
pub fn resample_weights<T: Float>(weights: &[T], n: usize) -> Vec<T> {
	if n == 0 {
		return Vec::new();
	}
	let uniform = || vec![T::one() / len_as::<T>(n); n];

	let w = clip_weights(weights);
	if w.is_empty() {
		return uniform();
	}
	let w = if w.len() == n { w } else { interpolate(&w, n) };

	normalize(w).unwrap_or_else(uniform)
}

/// Scales clipped weights to sum to `1`, or `None` if they sum to `0`.
///
/// A total that overflows to `+inf` is handled by dividing by the largest
/// weight first; finite totals take the direct path.
fn normalize<T: Float>(w: Vec<T>) -> Option<Vec<T>> {
	let mut total = sum(&w);
	let w = if total.is_finite() {
		w
	} else {
		let largest = w.iter().copied().fold(T::zero(), T::max);
		let scaled: Vec<T> = w.into_iter().map(|x| x / largest).collect();
		total = sum(&scaled);
		scaled
	};
	if total > T::zero() {
		Some(w.into_iter().map(|x| x / total).collect())
	} else {
		None
	}
}

fn clip_weights<T: Float>(weights: &[T]) -> Vec<T> {
	weights
		.iter()
		.map(|&x| if !x.is_finite() || x < T::zero() { T::zero() } else { x })
		.collect()
}

/// Linear interpolation of `w` (placed on `[0, 1]`) at `n` points on `[0, 1]`.
fn interpolate<T: Float>(w: &[T], n: usize) -> Vec<T> {
	let m = w.len();
	if m == 1 {
		return vec![w[0]; n];
	}
	let span: T = len_as(m - 1);
	(0..n)
		.map(|i| {
			let t = if n == 1 { T::zero() } else { len_as::<T>(i) / len_as::<T>(n - 1) };
			let pos = t * span;
			let j = pos.floor().to_usize().unwrap_or(0).min(m - 2);
			let frac = pos - len_as::<T>(j);
			w[j] + (w[j + 1] - w[j]) * frac
		})
		.collect()
}

fn sum<T: Float>(xs: &[T]) -> T {
	xs.iter().fold(T::zero(), |acc, &x| acc + x)
}

fn dot<T: Float, I: Iterator<Item = T>>(values: &[T], weights: I) -> T {
	values
		.iter()
		.zip(weights)
		.fold(T::zero(), |acc, (&v, w)| acc + v * w)
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
		proptest::collection::vec(-1e6_f64..1e6, min_len..=max_len)
	}

	fn values_and_weights() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
		(1usize..40).prop_flat_map(|n| {
			(
				proptest::collection::vec(-1e6_f64..1e6, n),
				proptest::collection::vec(-1.0_f64..10.0, n),
			)
		})
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(300))]

		#[test]
		fn presorted_matches_unsorted((values, weights) in values_and_weights()) {
			let mut sorted = values.clone();
			sort_ascending(&mut sorted);
			prop_assert_eq!(
				sorted_weighted_mean(&values, &weights, false),
				sorted_weighted_mean(&sorted, &weights, true)
			);
		}

		#[test]
		fn convex_combination((values, weights) in values_and_weights()) {
			let out = sorted_weighted_mean(&values, &weights, false).unwrap();
			let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
			let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
			prop_assert!(out >= lo - 1e-6 && out <= hi + 1e-6, "{} not in [{}, {}]", out, lo, hi);
		}

		#[test]
		fn mismatched_lengths_fail(values in finite_vec(1, 30), extra in 1usize..5) {
			let weights = vec![1.0; values.len() + extra];
			prop_assert!(matches!(
				sorted_weighted_mean(&values, &weights, false),
				Err(Error::InvalidArgument(_))
			));
		}

		#[test]
		fn resampled_weights_are_normalized(
			weights in proptest::collection::vec(prop_oneof![-1.0_f64..10.0, 1e307_f64..f64::MAX], 0..20),
			n in 1usize..40,
		) {
			let w = resample_weights(&weights, n);
			prop_assert_eq!(w.len(), n);
			prop_assert!(w.iter().all(|&x| x >= 0.0));
			prop_assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-9);
		}

		#[test]
		fn deterministic((values, weights) in values_and_weights()) {
			let a = sorted_weighted_mean(&values, &weights, false).unwrap();
			let b = sorted_weighted_mean(&values, &weights, false).unwrap();
			prop_assert!(a.to_bits() == b.to_bits());
		}
	}
}
