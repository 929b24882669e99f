//! Per-frame motion: integration, wall reflection, pointer repulsion and
//! opacity drift.

use super::particles::Particle;
use super::theme::FieldStyle;

/// Last known pointer position in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

impl Pointer {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Shared hue offset added to every particle's base hue.
///
/// Advances once per frame and wraps at 360 degrees. Lives with the mounted
/// field, so a fresh mount starts again from zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HueCycle {
	offset: f64,
}

impl HueCycle {
	pub fn advance(&mut self, step: f64) {
		if step != 0.0 {
			self.offset = (self.offset + step).rem_euclid(360.0);
		}
	}

	pub fn offset(&self) -> f64 {
		self.offset
	}

	pub fn reset(&mut self) {
		self.offset = 0.0;
	}

	/// Displayed hue for a particle with the given base hue.
	pub fn apply(&self, base_hue: f64) -> f64 {
		(base_hue + self.offset).rem_euclid(360.0)
	}
}

/// Advance every particle by one frame.
///
/// A viewport without area is a no-op frame.
pub fn step(
	particles: &mut [Particle],
	width: f64,
	height: f64,
	pointer: Option<Pointer>,
	style: &FieldStyle,
) {
	if !(width > 0.0 && height > 0.0) {
		return;
	}
	for p in particles {
		step_particle(p, width, height, pointer, style);
	}
}

/// Advance a single particle by one frame.
pub fn step_particle(
	p: &mut Particle,
	width: f64,
	height: f64,
	pointer: Option<Pointer>,
	style: &FieldStyle,
) {
	p.x += p.vx;
	p.y += p.vy;
	reflect(p, width, height);

	let near = pointer.is_some_and(|ptr| repel(p, ptr, style));
	// The impulse may point back out through a wall; outside particles
	// must always be heading inwards.
	if near {
		reflect(p, width, height);
	}

	p.opacity = if near {
		p.opacity + style.opacity_rise
	} else {
		p.opacity - style.opacity_decay
	}
	.clamp(style.opacity_floor, style.opacity_ceiling);
}

/// Reflect rather than clamp: a particle past a wall keeps its position and
/// has its velocity pointed back inside.
fn reflect(p: &mut Particle, width: f64, height: f64) {
	if p.x < 0.0 {
		p.vx = p.vx.abs();
	} else if p.x > width {
		p.vx = -p.vx.abs();
	}
	if p.y < 0.0 {
		p.vy = p.vy.abs();
	} else if p.y > height {
		p.vy = -p.vy.abs();
	}
}

/// Push `p` away from the pointer. Returns whether it was inside the radius.
fn repel(p: &mut Particle, pointer: Pointer, style: &FieldStyle) -> bool {
	let (dx, dy) = (pointer.x - p.x, pointer.y - p.y);
	let distance = (dx * dx + dy * dy).sqrt();
	if distance >= style.repulsion_radius {
		return false;
	}

	if style.repulsion_damping > 0.0 {
		let angle = dy.atan2(dx);
		let force = (style.repulsion_radius - distance) / style.repulsion_damping;
		p.vx -= angle.cos() * force;
		p.vy -= angle.sin() * force;
	}
	true
}
