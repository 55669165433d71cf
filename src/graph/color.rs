//! CSS color strings built from the exporter's `"r,g,b"` triplets.

/// `"r,g,b"` to `rgb(r,g,b)`.
pub fn rgb(triplet: &str) -> String {
	format!("rgb({})", triplet.trim())
}

/// `"r,g,b"` to `rgba(r,g,b,alpha)`.
pub fn rgba(triplet: &str, alpha: f64) -> String {
	format!("rgba({},{})", triplet.trim(), alpha)
}

/// Yellow for 0, red for `max`.
pub fn temperature_gradient(value: f64, max: f64) -> String {
	let ratio = if max > 0.0 {
		(value / max).clamp(0.0, 1.0)
	} else {
		0.0
	};
	format!("hsl({},100%,50%)", 60.0 * (1.0 - ratio))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_css_colors() {
		assert_eq!(rgb("10,20,30"), "rgb(10,20,30)");
		assert_eq!(rgba("10,20,30", 0.25), "rgba(10,20,30,0.25)");
	}

	#[test]
	fn gradient_runs_yellow_to_red() {
		assert_eq!(temperature_gradient(0.0, 10.0), "hsl(60,100%,50%)");
		assert_eq!(temperature_gradient(10.0, 10.0), "hsl(0,100%,50%)");
		assert_eq!(temperature_gradient(5.0, 10.0), "hsl(30,100%,50%)");
		assert_eq!(temperature_gradient(3.0, 0.0), "hsl(60,100%,50%)");
	}
}
