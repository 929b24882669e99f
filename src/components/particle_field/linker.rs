//! Connecting lines between nearby particles.
//!
//! A plain pairwise scan over `i < j`. Quadratic, which is why the store caps
//! the particle count; a spatial grid would be the next step for larger sets.

use super::particles::Particle;
use super::theme::FieldStyle;

/// One line to draw between particles `from` and `to` (`from < to`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: usize,
	pub to: usize,
	pub distance: f64,
	/// Stroke alpha, `(link_distance - distance) / link_alpha_divisor`, in `[0, 1]`.
	pub alpha: f64,
}

/// Every pair of particles closer than the style's link distance.
///
/// Each unordered pair is yielded at most once and never paired with itself.
/// Coincident particles produce a zero-length link at the maximum alpha.
pub fn links<'a>(
	particles: &'a [Particle],
	style: &FieldStyle,
) -> impl Iterator<Item = Link> + use<'a> {
	let (threshold, divisor) = (style.link_distance, style.link_alpha_divisor);
	let enabled = threshold > 0.0 && divisor > 0.0;

	particles
		.iter()
		.enumerate()
		.take_while(move |_| enabled)
		.flat_map(move |(i, a)| {
			particles[i + 1..]
				.iter()
				.enumerate()
				.filter_map(move |(offset, b)| {
					let (dx, dy) = (a.x - b.x, a.y - b.y);
					let distance = (dx * dx + dy * dy).sqrt();
					(distance < threshold).then(|| Link {
						from: i,
						to: i + 1 + offset,
						distance,
						alpha: ((threshold - distance) / divisor).clamp(0.0, 1.0),
					})
				})
		})
}
