use std::cmp::Ordering;

use num_traits::Float;

/// Returns a copy of `values` with NaN and ±inf removed.
///
/// Retained elements keep their relative order.
pub fn finite<T: Float>(values: &[T]) -> Vec<T> {
	values.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Arithmetic mean of `values`, or NaN when `values` is empty.
///
/// No filtering happens here; callers pass data that went through [`finite`].
pub fn mean<T: Float>(values: &[T]) -> T {
	if values.is_empty() {
		return T::nan();
	}
	let sum = values.iter().fold(T::zero(), |acc, &x| acc + x);
	sum / len_as::<T>(values.len())
}

/// Sorts finite values ascending in place.
pub(crate) fn sort_ascending<T: Float>(values: &mut [T]) {
	values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}

/// `n` as a float, NaN if it does not fit.
pub(crate) fn len_as<T: Float>(n: usize) -> T {
	T::from(n).unwrap_or_else(T::nan)
}
