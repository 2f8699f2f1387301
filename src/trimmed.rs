use num_traits::Float;
use tracing::debug;

use crate::util::finite::{len_as, sort_ascending};
use crate::util::{finite, mean};

/// Trim ratio used when the caller has no preference.
pub const DEFAULT_TRIM_RATIO: f64 = 0.10;

/// Symmetric trimmed mean of `values`.
///
/// Non-finite values are dropped first. Then `k = round(ratio * n)` values are
/// removed from each end of the ascending order and the rest is averaged.
/// When `2k >= n` nothing would be left, so the plain mean of all finite
/// values is returned instead.
///
/// `trim_ratio` is clamped to `[0, 0.5]`; a non-finite ratio counts as `0`.
///
/// Returns NaN if no finite values remain.
///
/// # Sortedness
/// With `assume_sorted = true` the finite values must already be in ascending
/// order. This is not checked; unsorted input then trims the wrong elements
/// and the result is meaningless.
///
/// ```
/// use robust_kernels::trimmed_mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN];
/// assert_eq!(trimmed_mean(&v, 0.2, false), 3.0);
/// ```
pub fn trimmed_mean<T: Float>(values: &[T], trim_ratio: T, assume_sorted: bool) -> T {
	let mut v = finite(values);
	if v.is_empty() {
		return T::nan();
	}
	if !assume_sorted {
		sort_ascending(&mut v);
	}

	let n = v.len();
	let k = trim_count(clamp_ratio(trim_ratio), n);
	if 2 * k >= n {
		debug!(n, k, "trim would drop every value, using plain mean");
		return mean(&v);
	}

	let kept = &v[k..n - k];
	let sum = kept.iter().fold(T::zero(), |acc, &x| acc + x);
	sum / len_as::<T>(kept.len())
}

/// Maps a trim ratio into `[0, 0.5]`, treating NaN and ±inf as `0`.
pub fn clamp_ratio<T: Float>(ratio: T) -> T {
	if !ratio.is_finite() {
		return T::zero();
	}
	let half = T::from(0.5).unwrap_or_else(T::zero);
	ratio.max(T::zero()).min(half)
}

/// Number of elements cut from each end: `ratio * n` rounded half away from zero.
fn trim_count<T: Float>(ratio: T, n: usize) -> usize {
	(ratio * len_as::<T>(n)).round().to_usize().unwrap_or(0)
}
