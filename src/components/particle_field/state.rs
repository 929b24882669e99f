//! Per-mount simulation state.
//!
//! Combines the particle store with the viewport bounds, the shared pointer
//! sample and the hue cycle. Created once when the component mounts and
//! mutated by the animation loop each frame; resize events rebuild the store.

use std::cell::Cell;
use std::rc::Rc;

use log::info;

use super::linker::{self, Link};
use super::particles::{Particle, ParticleStore};
use super::physics::{self, HueCycle, Pointer};
use super::theme::{FieldStyle, Hsla};

/// Latest pointer sample. Written by input listeners, read by the frame.
///
/// Only the most recent position matters, so there is no queue: every write
/// replaces the previous one.
pub type SharedPointer = Rc<Cell<Option<Pointer>>>;

pub struct FieldState {
	pub style: FieldStyle,
	pub store: ParticleStore,
	pub hue: HueCycle,
	pointer: SharedPointer,
	frames: u64,
}

impl FieldState {
	pub fn new(style: FieldStyle, width: f64, height: f64) -> Self {
		let store = ParticleStore::initialize(&style, width, height);
		info!(
			"particle-field: {} particles for {}x{} viewport",
			store.len(),
			width,
			height
		);
		Self::with_store(style, store)
	}

	/// Wrap an existing store, e.g. one generated from a seeded rng.
	///
	/// The style is sanitized first; a swapped opacity floor and ceiling
	/// would otherwise panic on the first tick.
	pub fn with_store(style: FieldStyle, store: ParticleStore) -> Self {
		Self {
			style: style.sanitized(),
			store,
			hue: HueCycle::default(),
			pointer: Rc::new(Cell::new(None)),
			frames: 0,
		}
	}

	/// Handle for input listeners to write pointer samples into.
	pub fn pointer_handle(&self) -> SharedPointer {
		self.pointer.clone()
	}

	pub fn pointer(&self) -> Option<Pointer> {
		self.pointer.get()
	}

	pub fn set_pointer(&self, x: f64, y: f64) {
		self.pointer.set(Some(Pointer::new(x, y)));
	}

	pub fn width(&self) -> f64 {
		self.store.width()
	}

	pub fn height(&self) -> f64 {
		self.store.height()
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Advance one frame: rotate the palette, then move every particle.
	///
	/// All particles are moved before any link is computed, so lines never
	/// use positions from the previous frame.
	pub fn tick(&mut self) {
		self.frames += 1;
		self.hue.advance(self.style.hue_rotation_step);
		let (w, h) = (self.store.width(), self.store.height());
		physics::step(&mut self.store.particles, w, h, self.pointer.get(), &self.style);
	}

	/// Lines to draw for the current positions.
	pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
		linker::links(&self.store.particles, &self.style)
	}

	/// Displayed color of a particle, including the shared hue offset.
	pub fn color_of(&self, particle: &Particle) -> Hsla {
		self.style.color(self.hue.apply(particle.hue), particle.opacity)
	}

	/// Stroke color for a line starting at `particle`. Line alpha is applied
	/// separately; the particle's opacity only tints the line when
	/// `tint_links` is set.
	pub fn link_color(&self, particle: &Particle) -> Hsla {
		let opacity = if self.style.tint_links { particle.opacity } else { 1.0 };
		self.style.color(self.hue.apply(particle.hue), opacity)
	}

	/// Throw away the current set and generate one for the new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.store.regenerate(&self.style, width, height);
		info!(
			"particle-field: regenerated {} particles for {}x{} viewport",
			self.store.len(),
			width,
			height
		);
	}

	/// Return to the state of a fresh mount: palette offset and pointer cleared.
	pub fn reset(&mut self) {
		self.hue.reset();
		self.pointer.set(None);
		self.frames = 0;
	}
}
