//! Rescaling of data values to screen units.

/// Map `values` linearly so the smallest becomes `min_out` and the largest `max_out`.
///
/// When every value is equal they all map to `max_out`.
pub fn linear(values: impl IntoIterator<Item = f64> + Clone, min_out: f64, max_out: f64) -> Vec<f64> {
	let (lo, hi) = values
		.clone()
		.into_iter()
		.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
			(lo.min(v), hi.max(v))
		});
	let (a, b) = if hi > lo {
		let a = (max_out - min_out) / (hi - lo);
		(a, max_out - a * hi)
	} else {
		(0.0, max_out)
	};
	values.into_iter().map(|v| a * v + b).collect()
}

/// Fit exported layout positions into a `width` x `height` viewport centered on the origin.
pub fn fit_positions(points: &[(f64, f64)], width: f64, height: f64, margin: f64) -> Vec<(f32, f32)> {
	if points.is_empty() {
		return Vec::new();
	}
	let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
	let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
	for &(x, y) in points {
		min_x = min_x.min(x);
		max_x = max_x.max(x);
		min_y = min_y.min(y);
		max_y = max_y.max(y);
	}
	let (span_x, span_y) = (max_x - min_x, max_y - min_y);
	let (avail_x, avail_y) = (
		(width - 2.0 * margin).max(1.0),
		(height - 2.0 * margin).max(1.0),
	);
	let k = match (span_x > 0.0, span_y > 0.0) {
		(true, true) => (avail_x / span_x).min(avail_y / span_y),
		(true, false) => avail_x / span_x,
		(false, true) => avail_y / span_y,
		(false, false) => 1.0,
	};
	let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
	points
		.iter()
		.map(|&(x, y)| (((x - cx) * k) as f32, ((y - cy) * k) as f32))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn linear_spans_output_range() {
		let out = linear([2.0, 4.0, 6.0], 1.0, 10.0);
		assert_eq!(out, [1.0, 5.5, 10.0]);
	}

	#[test]
	fn linear_constant_input_is_max() {
		assert_eq!(linear([3.0, 3.0], 1.0, 10.0), [10.0, 10.0]);
		assert!(linear(Vec::<f64>::new(), 1.0, 10.0).is_empty());
	}

	#[test]
	fn positions_fit_and_center() {
		let fitted = fit_positions(&[(0.0, 0.0), (10.0, 5.0)], 220.0, 120.0, 10.0);
		assert_eq!(fitted, [(-100.0, -50.0), (100.0, 50.0)]);
		assert_eq!(fit_positions(&[(3.0, 3.0)], 100.0, 100.0, 0.0), [(0.0, 0.0)]);
	}
}
