//! Canvas rendering for the particle field.
//!
//! Two passes per frame after clearing the surface:
//! 1. Connecting lines, stroked in the color of their lower-index particle
//! 2. Particle discs on top

use std::f64::consts::PI;

use log::warn;
use web_sys::CanvasRenderingContext2d;

use super::state::FieldState;

/// Draws the current state. Physics must already have run for this frame.
pub fn render(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width(), state.height());

	draw_links(state, ctx);
	draw_particles(state, ctx);

	ctx.set_global_alpha(1.0);
}

fn draw_links(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	let particles = &state.store.particles;
	ctx.set_line_width(state.style.link_width);

	for link in state.links() {
		let (a, b) = (&particles[link.from], &particles[link.to]);

		ctx.set_global_alpha(link.alpha);
		ctx.set_stroke_style_str(&state.link_color(a).to_css());
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_particles(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(1.0);

	for p in &state.store.particles {
		ctx.set_fill_style_str(&state.color_of(p).to_css());
		ctx.begin_path();
		if let Err(e) = ctx.arc(p.x, p.y, p.size, 0.0, PI * 2.0) {
			warn!("particle-field: arc failed: {:?}", e);
			continue;
		}
		ctx.fill();
	}
}
