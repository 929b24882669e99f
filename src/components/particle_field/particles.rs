//! Particle records and their bulk generation policy.
//!
//! The set is only ever rebuilt as a whole: once on mount and again on every
//! viewport resize. Individual particles are never spawned or removed.

use std::ops::Range;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::theme::FieldStyle;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	/// Base hue in degrees, fixed at spawn.
	pub hue: f64,
	pub opacity: f64,
}

/// Number of particles for a viewport `width` pixels wide.
///
/// `min(floor(width / spacing_divisor), max_count)`, and zero for an empty,
/// negative or non-finite width.
pub fn particle_count(width: f64, style: &FieldStyle) -> usize {
	if !(width.is_finite() && width > 0.0) || !(style.spacing_divisor > 0.0) {
		return 0;
	}
	((width / style.spacing_divisor).floor() as usize).min(style.max_count)
}

fn has_area(width: f64, height: f64) -> bool {
	width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

/// Uniform sample over `range`, tolerating empty or reversed ranges.
fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range<f64>) -> f64 {
	let t: f64 = rng.gen_range(0.0..1.0);
	range.start + t * (range.end - range.start)
}

/// Owns the current particle set and the bounds it was generated for.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleStore {
	/// Generate a fresh set using an entropy-seeded generator.
	pub fn initialize(style: &FieldStyle, width: f64, height: f64) -> Self {
		Self::initialize_with(&mut SmallRng::from_entropy(), style, width, height)
	}

	/// Generate a fresh set drawing randomness from `rng`.
	pub fn initialize_with<R: Rng + ?Sized>(
		rng: &mut R,
		style: &FieldStyle,
		width: f64,
		height: f64,
	) -> Self {
		let count = if has_area(width, height) {
			particle_count(width, style)
		} else {
			0
		};

		let particles = (0..count)
			.map(|_| Particle {
				x: sample(rng, 0.0..width),
				y: sample(rng, 0.0..height),
				vx: sample(rng, -style.speed..style.speed),
				vy: sample(rng, -style.speed..style.speed),
				size: sample(rng, style.size_min..style.size_max),
				hue: sample(rng, style.hue_band()),
				opacity: sample(rng, style.spawn_opacity_min..style.spawn_opacity_max),
			})
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// Build a store from explicit particles, for scripted scenarios.
	pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> Self {
		Self {
			particles,
			width,
			height,
		}
	}

	/// Replace the whole set with one generated for the new bounds.
	pub fn regenerate(&mut self, style: &FieldStyle, width: f64, height: f64) {
		*self = Self::initialize(style, width, height);
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn seeded() -> SmallRng {
		SmallRng::seed_from_u64(7)
	}

	#[test]
	fn count_follows_width_and_cap() {
		let style = FieldStyle::enhanced();
		for w in [0.0, 7.0, 8.0, 100.0, 799.0, 800.0, 1200.0, 1201.0, 4000.0] {
			let expected = ((w / 8.0_f64).floor() as usize).min(150);
			assert_eq!(particle_count(w, &style), expected, "width {w}");
		}
		assert_eq!(particle_count(0.0, &style), 0);
		assert_eq!(particle_count(-50.0, &style), 0);
		assert_eq!(particle_count(f64::NAN, &style), 0);
	}

	#[test]
	fn zero_divisor_spawns_nothing() {
		let style = FieldStyle {
			spacing_divisor: 0.0,
			..FieldStyle::enhanced()
		};
		assert_eq!(particle_count(800.0, &style), 0);
	}

	#[test]
	fn viewport_800_by_600_spawns_100() {
		let store = ParticleStore::initialize_with(&mut seeded(), &FieldStyle::enhanced(), 800.0, 600.0);
		assert_eq!(store.len(), 100);
	}

	#[test]
	fn zero_sized_viewport_spawns_nothing() {
		let style = FieldStyle::enhanced();
		assert!(ParticleStore::initialize(&style, 0.0, 600.0).is_empty());
		assert!(ParticleStore::initialize(&style, 800.0, 0.0).is_empty());
	}

	#[test]
	fn spawned_attributes_respect_style_ranges() {
		let style = FieldStyle::enhanced();
		let store = ParticleStore::initialize_with(&mut seeded(), &style, 1600.0, 900.0);
		assert_eq!(store.len(), 150);

		for p in &store.particles {
			assert!((0.0..1600.0).contains(&p.x));
			assert!((0.0..900.0).contains(&p.y));
			assert!(p.vx.abs() <= style.speed && p.vy.abs() <= style.speed);
			assert!(p.size >= style.size_min && p.size <= style.size_max);
			assert!(style.hue_band().contains(&p.hue));
			assert!(p.opacity >= style.spawn_opacity_min && p.opacity <= style.spawn_opacity_max);
		}
	}

	#[test]
	fn same_seed_gives_same_set() {
		let style = FieldStyle::baseline();
		let a = ParticleStore::initialize_with(&mut seeded(), &style, 640.0, 480.0);
		let b = ParticleStore::initialize_with(&mut seeded(), &style, 640.0, 480.0);
		assert_eq!(a.particles, b.particles);
	}

	#[test]
	fn zero_speed_does_not_panic() {
		let style = FieldStyle {
			speed: 0.0,
			..FieldStyle::enhanced()
		};
		let store = ParticleStore::initialize_with(&mut seeded(), &style, 400.0, 300.0);
		assert!(store.particles.iter().all(|p| p.vx == 0.0 && p.vy == 0.0));
	}

	#[test]
	fn regenerate_replaces_set_for_new_bounds() {
		let style = FieldStyle::enhanced();
		let mut store = ParticleStore::initialize(&style, 800.0, 600.0);
		assert_eq!(store.len(), 100);

		store.regenerate(&style, 400.0, 300.0);
		assert_eq!(store.len(), 50);
		assert_eq!((store.width(), store.height()), (400.0, 300.0));
		assert!(store.particles.iter().all(|p| p.x < 400.0 && p.y < 300.0));
	}
}
